pub mod auth;
pub mod config;
pub mod error;
pub mod event;
pub mod progress;
pub mod registry;
pub mod status;
pub mod workspace;

#[macro_use]
extern crate log;

pub use registry::WorkspaceRegistry;
pub use workspace::{
    Workspace,
    WorkspaceInfo,
    url_from_folder,
};

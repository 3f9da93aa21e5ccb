use serde::{
    Deserialize,
    Serialize,
};
use std::path::PathBuf;

use crate::{
    auth::Credentials,
    event::Notifier,
};

mod impls;
mod status;
mod sync;
mod util;

pub use util::url_from_folder;

pub const ORIGIN: &str = "origin";
pub const DEFAULT_BRANCH: &str = "master";

/// A local mirror of a workspace hosted on PMR.
///
/// At most one repository handle is held at any time; it is released by
/// `close()` or when the workspace is dropped.
#[derive(Default)]
pub struct Workspace {
    pub(crate) url: String,
    pub(crate) name: String,
    pub(crate) description: String,
    pub(crate) owner: String,
    pub(crate) path: Option<PathBuf>,
    pub(crate) credentials: Credentials,
    pub(crate) owned: bool,
    pub(crate) repo: Option<git2::Repository>,
    pub(crate) notifier: Notifier,
}

/// Serializable snapshot of the metadata of a workspace.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct WorkspaceInfo {
    pub url: String,
    pub name: String,
    pub description: String,
    pub owner: String,
    pub path: Option<PathBuf>,
    pub owned: bool,
}

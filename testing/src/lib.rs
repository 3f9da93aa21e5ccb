pub mod http;
pub mod repo;

pub use http::*;
pub use repo::*;

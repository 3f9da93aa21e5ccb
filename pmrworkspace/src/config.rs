use std::{
    env,
    fs,
    path::{
        Path,
        PathBuf,
    },
};

use crate::error::WorkspaceError;

pub const WORKSPACES_ROOT_ENV: &str = "PMR_WORKSPACES_ROOT";

/// Process-wide configuration, resolved once at startup and handed to
/// whatever needs it.
#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    workspaces_root: PathBuf,
}

impl Config {
    pub fn new(workspaces_root: impl Into<PathBuf>) -> Self {
        Self {
            workspaces_root: workspaces_root.into(),
        }
    }

    pub fn from_env() -> Self {
        let workspaces_root = env::var_os(WORKSPACES_ROOT_ENV)
            .filter(|value| !value.is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(default_workspaces_root);
        Self::new(workspaces_root)
    }

    /// The configured root, whether or not it exists on disk.
    pub fn workspaces_root(&self) -> &Path {
        &self.workspaces_root
    }

    /// The root for all local workspaces; created if absent.
    pub fn workspaces_dir(&self) -> Result<&Path, WorkspaceError> {
        if !self.workspaces_root.is_dir() {
            info!("Creating workspaces directory {:?}", self.workspaces_root);
            fs::create_dir_all(&self.workspaces_root)?;
        }
        Ok(&self.workspaces_root)
    }

    /// The conventional clone destination for a workspace name.
    pub fn workspace_dir(&self, name: &str) -> Result<PathBuf, WorkspaceError> {
        let dirname = name
            .trim()
            .chars()
            .map(|c| match c {
                c if c.is_alphanumeric() => c,
                '-' | '_' | '.' | ' ' => c,
                _ => '_',
            })
            .collect::<String>();
        let dirname = match dirname.trim_matches('.') {
            "" => "workspace",
            s => s,
        };
        Ok(self.workspaces_dir()?.join(dirname))
    }
}

pub fn default_workspaces_root() -> PathBuf {
    dirs::document_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("OpenCOR")
        .join("Workspaces")
}

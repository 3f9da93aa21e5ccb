use std::path::Path;

use crate::{
    error::WorkspaceError,
    status::{
        FileStatus,
        RemoteStatus,
    },
};
use super::{
    ORIGIN,
    Workspace,
    util::{
        primary_branch,
        refname_to_id,
        relative_path,
    },
};

impl Workspace {
    /// Where the primary branch stands against its counterpart on
    /// `origin`; `Unknown` unless the workspace is open.
    pub fn remote_status(&self) -> RemoteStatus {
        if !self.opened() {
            return RemoteStatus::Unknown;
        }
        match self.resolve_remote_status() {
            Ok(status) => status,
            Err(e) => {
                self.notifier.warning(e.warning(&format!(
                    "An error occurred while trying to get the status of {}.",
                    self.path.as_deref().unwrap_or(Path::new("")).display(),
                )));
                RemoteStatus::Unknown
            }
        }
    }

    fn resolve_remote_status(&self) -> Result<RemoteStatus, WorkspaceError> {
        let repo = self.repo()?;
        let branch = primary_branch(repo);
        let local = refname_to_id(repo, &format!("refs/heads/{branch}"))?;
        let remote = refname_to_id(
            repo,
            &format!("refs/remotes/{ORIGIN}/{branch}"),
        )?;
        let (ahead, behind) = repo.graph_ahead_behind(local, remote)?;
        debug!("{branch} is {ahead} ahead and {behind} behind {ORIGIN}/{branch}");
        Ok(RemoteStatus::from_ahead_behind(ahead, behind))
    }

    /// The index and working tree status of `path`, which may be
    /// absolute or relative to the root of the workspace.
    pub fn file_status(&self, path: impl AsRef<Path>) -> FileStatus {
        if !self.opened() {
            return FileStatus::default();
        }
        let path = path.as_ref();
        match self.resolve_file_status(path) {
            Ok(status) => status,
            Err(e) => {
                self.notifier.warning(e.warning(&format!(
                    "An error occurred while trying to get the status of {}.",
                    path.display(),
                )));
                FileStatus::default()
            }
        }
    }

    fn resolve_file_status(&self, path: &Path) -> Result<FileStatus, WorkspaceError> {
        let repo = self.repo()?;
        let root = self.path.as_deref().ok_or(WorkspaceError::NoLocalPath)?;
        let flags = repo.status_file(relative_path(root, path))?;
        Ok(flags.into())
    }

    /// Add `path` to the index, or remove it from the index when `stage`
    /// is false, then write the index out.
    ///
    /// Failures here are only logged.
    pub fn stage_file(&mut self, path: impl AsRef<Path>, stage: bool) {
        if !self.open() {
            return;
        }
        let path = path.as_ref();
        if let Err(e) = self.update_index(path, stage) {
            warn!("{}", e.warning(&format!(
                "An error occurred while trying to {} {}.",
                if stage { "stage" } else { "unstage" },
                path.display(),
            )));
        }
    }

    fn update_index(&self, path: &Path, stage: bool) -> Result<(), WorkspaceError> {
        let repo = self.repo()?;
        let root = self.path.as_deref().ok_or(WorkspaceError::NoLocalPath)?;
        let relative = relative_path(root, path);
        let mut index = repo.index()?;
        if stage {
            index.add_path(relative)?;
        } else {
            index.remove_path(relative)?;
        }
        index.write()?;
        Ok(())
    }
}

use git2::{
    Oid,
    Repository,
};
use std::path::Path;

use crate::error::WorkspaceError;
use super::{
    DEFAULT_BRANCH,
    ORIGIN,
};

/// The url of the `origin` remote of the repository at `folder`, if
/// there is one.
pub fn url_from_folder(folder: impl AsRef<Path>) -> Option<String> {
    let repo = Repository::open(folder.as_ref()).ok()?;
    let remote = repo.find_remote(ORIGIN).ok()?;
    remote.url().map(str::to_string)
}

/// The branch HEAD points to, even when it is yet to be born.
pub(super) fn primary_branch(repo: &Repository) -> String {
    repo.find_reference("HEAD")
        .ok()
        .and_then(|head| head.symbolic_target()
            .and_then(|target| target.strip_prefix("refs/heads/"))
            .map(str::to_string)
        )
        .unwrap_or_else(|| DEFAULT_BRANCH.to_string())
}

pub(super) fn refname_to_id(
    repo: &Repository,
    refname: &str,
) -> Result<Oid, WorkspaceError> {
    repo.refname_to_id(refname)
        .map_err(|e| match e.code() {
            git2::ErrorCode::NotFound => WorkspaceError::NoSuchReference {
                refname: refname.to_string(),
            },
            _ => e.into(),
        })
}

/// Paths under `root` are made relative to it; anything else is passed
/// through for the backend to reject.
pub(super) fn relative_path<'a>(root: &Path, path: &'a Path) -> &'a Path {
    path.strip_prefix(root).unwrap_or(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use tempfile::TempDir;

    #[test]
    fn test_url_from_folder() -> anyhow::Result<()> {
        let (td, repo) = test_pmr::repo_init(None)?;
        assert_eq!(url_from_folder(td.path()), None);
        repo.remote("upstream", "https://models.example.com/w/upstream")?;
        assert_eq!(url_from_folder(td.path()), None);
        repo.remote(ORIGIN, "https://models.example.com/w/origin")?;
        assert_eq!(
            url_from_folder(td.path()).as_deref(),
            Some("https://models.example.com/w/origin"),
        );
        Ok(())
    }

    #[test]
    fn test_url_from_folder_not_a_repo() -> anyhow::Result<()> {
        let td = TempDir::new()?;
        assert_eq!(url_from_folder(td.path()), None);
        assert_eq!(url_from_folder(td.path().join("missing")), None);
        Ok(())
    }

    #[test]
    fn test_primary_branch() -> anyhow::Result<()> {
        let (_td, repo) = test_pmr::repo_init(Some("main"))?;
        assert_eq!(primary_branch(&repo), "main");
        let (_td, repo) = test_pmr::repo_init(None)?;
        assert_eq!(primary_branch(&repo), "master");

        let head = repo.head()?.peel_to_commit()?.id();
        repo.set_head_detached(head)?;
        assert_eq!(primary_branch(&repo), DEFAULT_BRANCH);
        Ok(())
    }

    #[test]
    fn test_refname_to_id() -> anyhow::Result<()> {
        let (_td, repo) = test_pmr::repo_init(None)?;
        let head = repo.head()?.peel_to_commit()?.id();
        assert_eq!(refname_to_id(&repo, "refs/heads/master")?, head);
        match refname_to_id(&repo, "refs/remotes/origin/master") {
            Err(WorkspaceError::NoSuchReference { refname }) => {
                assert_eq!(refname, "refs/remotes/origin/master");
            }
            r => panic!("unexpected result {r:?}"),
        }
        Ok(())
    }

    #[test]
    fn test_relative_path() {
        let root = PathBuf::from("/workspaces/w1");
        assert_eq!(
            relative_path(&root, &root.join("models/a.cellml")),
            Path::new("models/a.cellml"),
        );
        assert_eq!(
            relative_path(&root, Path::new("models/a.cellml")),
            Path::new("models/a.cellml"),
        );
        assert_eq!(
            relative_path(&root, Path::new("/elsewhere/a.cellml")),
            Path::new("/elsewhere/a.cellml"),
        );
    }
}

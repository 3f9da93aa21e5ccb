use git2::{
    Oid,
    Repository,
    RepositoryInitOptions,
    build::RepoBuilder,
};
use std::{
    fs,
    path::{
        Path,
        PathBuf,
    },
};
use tempfile::TempDir;

/// A repository with a working tree and an empty initial commit, on
/// `main_branch` (`master` by default).
pub fn repo_init(
    main_branch: Option<&str>,
) -> anyhow::Result<(TempDir, Repository)> {
    let tempdir = TempDir::new()?;
    let mut opts = RepositoryInitOptions::new();
    opts.initial_head(main_branch.unwrap_or("master"));
    let repo = Repository::init_opts(tempdir.path(), &opts)?;
    configure_user(&repo)?;
    {
        let mut index = repo.index()?;
        let id = index.write_tree()?;
        let tree = repo.find_tree(id)?;
        let sig = repo.signature()?;
        repo.commit(Some("HEAD"), &sig, &sig, "initial commit", &tree, &[])?;
    }
    Ok((tempdir, repo))
}

/// A bare clone of `source`, standing in for the remote hosted by PMR.
pub fn bare_remote(source: &Path) -> anyhow::Result<(TempDir, Repository)> {
    let tempdir = TempDir::new()?;
    let repo = RepoBuilder::new()
        .bare(true)
        .clone(path_str(source)?, tempdir.path())?;
    Ok((tempdir, repo))
}

pub fn configure_user(repo: &Repository) -> anyhow::Result<()> {
    let mut config = repo.config()?;
    config.set_str("user.name", "user")?;
    config.set_str("user.email", "user@example.com")?;
    Ok(())
}

pub fn write_file(
    root: &Path,
    name: &str,
    contents: &str,
) -> anyhow::Result<PathBuf> {
    let path = root.join(name);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(&path, contents)?;
    Ok(path)
}

/// Write out the files into the working tree and commit them on HEAD.
pub fn commit_files(
    repo: &Repository,
    files: &[(&str, &str)],
    message: &str,
) -> anyhow::Result<Oid> {
    let root = repo.workdir()
        .ok_or_else(|| anyhow::anyhow!("repository has no working tree"))?;
    let mut index = repo.index()?;
    for (name, contents) in files {
        write_file(root, name, contents)?;
        index.add_path(Path::new(name))?;
    }
    index.write()?;
    let tree = repo.find_tree(index.write_tree()?)?;
    let sig = repo.signature()?;
    let parent = repo.head()?.peel_to_commit()?;
    Ok(repo.commit(Some("HEAD"), &sig, &sig, message, &tree, &[&parent])?)
}

pub fn path_str(path: &Path) -> anyhow::Result<&str> {
    path.to_str()
        .ok_or_else(|| anyhow::anyhow!("path {path:?} is not valid utf-8"))
}

#[test]
fn smoke_test_commit_files() -> anyhow::Result<()> {
    let (td, repo) = repo_init(None)?;
    let oid = commit_files(&repo, &[
        ("README", "a readme\n"),
        ("models/model.cellml", "<model/>\n"),
    ], "add model")?;
    assert_eq!(repo.head()?.shorthand(), Some("master"));
    assert_eq!(repo.head()?.target(), Some(oid));
    let tree = repo.find_commit(oid)?.tree()?;
    assert!(tree.get_path(Path::new("models/model.cellml")).is_ok());
    assert_eq!(fs::read_to_string(td.path().join("README"))?, "a readme\n");

    let (remote_td, remote) = bare_remote(td.path())?;
    assert!(remote.is_bare());
    assert_eq!(remote.refname_to_id("refs/heads/master")?, oid);
    drop(remote_td);
    Ok(())
}

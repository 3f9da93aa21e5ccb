use serde::Serialize;
use std::{
    io,
    path::PathBuf,
    sync::Arc,
};
use structopt::StructOpt;

use pmrworkspace::{
    Workspace,
    auth::EnvCredentials,
    config::Config,
    event::LogListener,
    status::{
        FileStatus,
        RemoteStatus,
    },
    url_from_folder,
};

#[derive(StructOpt)]
struct Args {
    #[structopt(subcommand)]
    cmd: Command,

    #[structopt(short = "v", long = "verbose", parse(from_occurrences))]
    verbose: usize,

    #[structopt(short = "j", long = "json")]
    json: bool,
}

#[derive(StructOpt)]
enum Command {
    Clone {
        url: String,
        #[structopt(short, long)]
        dir: Option<PathBuf>,
        #[structopt(short, long)]
        name: Option<String>,
    },
    Push {
        path: PathBuf,
    },
    Status {
        path: PathBuf,
        files: Vec<PathBuf>,
    },
    Stage {
        path: PathBuf,
        file: PathBuf,
        #[structopt(short, long)]
        unstage: bool,
    },
    Origin {
        path: PathBuf,
    },
}

#[derive(Serialize)]
struct StatusReport {
    remote: RemoteStatus,
    files: Vec<FileStatusEntry>,
}

#[derive(Serialize)]
struct FileStatusEntry {
    path: PathBuf,
    status: FileStatus,
}

fn local_workspace(path: PathBuf) -> Workspace {
    let mut workspace = Workspace::from_folder(path)
        .with_listener(Arc::new(LogListener));
    workspace.use_credentials(&EnvCredentials::default());
    workspace
}

// the name of the workspace is the last path segment of its url.
fn name_from_url(url: &str) -> String {
    url.trim_end_matches('/')
        .rsplit('/')
        .next()
        .unwrap_or(url)
        .trim_end_matches(".git")
        .to_string()
}

#[paw::main]
fn main(args: Args) -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    stderrlog::new()
        .module(module_path!())
        .verbosity(args.verbose + 1)
        .timestamp(stderrlog::Timestamp::Second)
        .init()?;

    let config = Config::from_env();

    match args.cmd {
        Command::Clone { url, dir, name } => {
            let name = name.unwrap_or_else(|| name_from_url(&url));
            let dir = match dir {
                Some(dir) => dir,
                None => config.workspace_dir(&name)?,
            };
            let mut workspace = Workspace::new(&url, &name)
                .with_listener(Arc::new(LogListener));
            workspace.use_credentials(&EnvCredentials::default());
            println!("Cloning workspace <{url}> into {dir:?}...");
            if !workspace.clone_to(&dir) {
                anyhow::bail!("failed to clone <{url}>");
            }
            if args.json {
                serde_json::to_writer(io::stdout(), &workspace.info())?;
            }
            else {
                println!("Cloned workspace {name} into {dir:?}");
            }
        }
        Command::Push { path } => {
            let mut workspace = local_workspace(path);
            println!("Pushing workspace at {:?}...", workspace.path());
            if !workspace.push() {
                anyhow::bail!("failed to push workspace");
            }
            println!("Pushed workspace to <{}>", workspace.url());
        }
        Command::Status { path, files } => {
            let mut workspace = local_workspace(path);
            if !workspace.open() {
                anyhow::bail!("failed to open workspace");
            }
            let report = StatusReport {
                remote: workspace.remote_status(),
                files: files.into_iter()
                    .map(|path| FileStatusEntry {
                        status: workspace.file_status(&path),
                        path,
                    })
                    .collect(),
            };
            if args.json {
                serde_json::to_writer(io::stdout(), &report)?;
            }
            else {
                println!("remote: {}", report.remote);
                for entry in report.files {
                    println!("{} {}", entry.status, entry.path.display());
                }
            }
        }
        Command::Stage { path, file, unstage } => {
            let mut workspace = local_workspace(path);
            workspace.stage_file(&file, !unstage);
            println!("{} {}", workspace.file_status(&file), file.display());
        }
        Command::Origin { path } => {
            match url_from_folder(&path) {
                Some(url) => println!("{url}"),
                None => anyhow::bail!("no origin remote found at {path:?}"),
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_from_url() {
        assert_eq!(name_from_url("https://models.example.com/workspace/beeler_reuter_1977"), "beeler_reuter_1977");
        assert_eq!(name_from_url("https://models.example.com/workspace/hh/"), "hh");
        assert_eq!(name_from_url("https://example.com/models/noble.git"), "noble");
        assert_eq!(name_from_url("local"), "local");
    }
}

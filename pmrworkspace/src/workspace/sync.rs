use git2::{
    FetchOptions,
    PushOptions,
    RemoteCallbacks,
    Repository,
    build::{
        CheckoutBuilder,
        RepoBuilder,
    },
};
use std::path::Path;

use crate::{
    error::WorkspaceError,
    event::Notifier,
    progress::{
        checkout_fraction,
        push_fraction,
        transfer_fraction,
    },
};
use super::{
    ORIGIN,
    Workspace,
    util::primary_branch,
};

// PMR is a trusted service, so its certificate is accepted without
// verifying it against the host.
fn remote_callbacks(notifier: &Notifier) -> RemoteCallbacks<'_> {
    let mut callbacks = RemoteCallbacks::new();
    callbacks.certificate_check(|_cert, _host| true);
    callbacks.transfer_progress(move |stats| {
        notifier.progress(transfer_fraction(
            stats.received_objects(),
            stats.indexed_objects(),
            stats.total_objects(),
        ));
        true
    });
    callbacks
}

fn checkout_builder(notifier: &Notifier) -> CheckoutBuilder<'_> {
    let mut checkout = CheckoutBuilder::new();
    checkout.safe();
    checkout.progress(move |_path, completed_steps, total_steps| {
        notifier.progress(checkout_fraction(completed_steps, total_steps));
    });
    checkout
}

/// Add the push refspec to the remote unless it is already configured.
fn register_push_refspec(
    repo: &Repository,
    remote: &str,
    refspec: &str,
) -> Result<(), WorkspaceError> {
    let registered = repo.find_remote(remote)?
        .push_refspecs()?
        .iter()
        .flatten()
        .any(|spec| spec == refspec);
    if !registered {
        info!("Registering push refspec {refspec} on remote {remote}");
        repo.remote_add_push(remote, refspec)?;
    }
    Ok(())
}

impl Workspace {
    /// Clone the remote into `destination` and bind the workspace to it.
    ///
    /// On failure a warning is emitted and whatever was written to
    /// `destination` is left for the caller to clean up.
    pub fn clone_to(&mut self, destination: impl AsRef<Path>) -> bool {
        let destination = destination.as_ref();
        self.close();
        match self.clone_repo(destination) {
            Ok(repo) => {
                self.repo = Some(repo);
                self.set_path(destination);
                self.notifier.cloned(&self.url, destination);
                true
            }
            Err(e) => {
                self.notifier.warning(e.warning(
                    "An error occurred while trying to clone the workspace."
                ));
                false
            }
        }
    }

    fn clone_repo(&self, destination: &Path) -> Result<Repository, WorkspaceError> {
        let url = &self.url;
        info!("Cloning <{url}> into {destination:?}...");
        let mut fetch_options = FetchOptions::new();
        fetch_options.remote_callbacks(remote_callbacks(&self.notifier));
        if let Some(header) = self.credentials.authorization_header() {
            fetch_options.custom_headers(&[header.as_str()]);
        }
        let repo = RepoBuilder::new()
            .fetch_options(fetch_options)
            .with_checkout(checkout_builder(&self.notifier))
            .clone(url, destination)?;
        info!("Repository cloned");
        Ok(repo)
    }

    /// Push the primary branch to the identically named branch on
    /// `origin`, opening the workspace as needed.
    ///
    /// The pushed event is emitted at the end of every attempt, the
    /// return value reports whether the push itself succeeded.
    pub fn push(&mut self) -> bool {
        let pushed = if self.open() {
            match self.push_origin() {
                Ok(()) => true,
                Err(e) => {
                    self.notifier.warning(e.warning(
                        "An error occurred while trying to push the workspace."
                    ));
                    false
                }
            }
        } else {
            false
        };
        self.notifier.pushed(&self.url);
        pushed
    }

    fn push_origin(&self) -> Result<(), WorkspaceError> {
        let repo = self.repo()?;
        let branch = primary_branch(repo);
        let refspec = format!("refs/heads/{branch}:refs/heads/{branch}");
        register_push_refspec(repo, ORIGIN, &refspec)?;

        // looked up after registration so the refspec is picked up.
        let mut remote = repo.find_remote(ORIGIN)?;
        let notifier = &self.notifier;
        let mut callbacks = remote_callbacks(notifier);
        callbacks.push_transfer_progress(move |current, total, _bytes| {
            notifier.progress(push_fraction(current, total));
        });
        callbacks.push_update_reference(|refname, status| match status {
            Some(msg) => Err(git2::Error::from_str(
                &format!("failed to update {refname}: {msg}")
            )),
            None => Ok(()),
        });
        let mut push_options = PushOptions::new();
        push_options.remote_callbacks(callbacks);
        if let Some(header) = self.credentials.authorization_header() {
            push_options.custom_headers(&[header.as_str()]);
        }

        info!("Pushing {branch} to <{}>...", remote.url().unwrap_or_default());
        // the remote connects using the callbacks and headers above.
        remote.push(&[] as &[&str], Some(&mut push_options))?;
        info!("Workspace pushed");
        Ok(())
    }
}

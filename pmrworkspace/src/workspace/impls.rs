use std::{
    cmp::Ordering,
    fmt,
    path::{
        Path,
        PathBuf,
    },
    sync::Arc,
};

use crate::{
    auth::{
        CredentialProvider,
        Credentials,
    },
    error::WorkspaceError,
    event::WorkspaceListener,
};
use super::{
    Workspace,
    WorkspaceInfo,
    util::url_from_folder,
};

impl Workspace {
    /// A workspace known on the remote but not yet materialized locally.
    pub fn new(
        url: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        // struct update syntax is unavailable as this implements Drop.
        let mut workspace = Self::default();
        workspace.url = url.into();
        workspace.name = name.into();
        workspace
    }

    /// A workspace bound to an existing local clone, with the url taken
    /// from its `origin` remote.
    pub fn from_folder(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        let name = path.file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        let mut workspace = Self::new(
            url_from_folder(path).unwrap_or_default(),
            name,
        );
        workspace.set_path(path);
        workspace
    }

    pub fn with_listener(mut self, listener: Arc<dyn WorkspaceListener>) -> Self {
        self.set_listener(listener);
        self
    }

    pub fn set_listener(&mut self, listener: Arc<dyn WorkspaceListener>) {
        self.notifier.listener = Some(listener);
    }

    pub(crate) fn set_registry_listener(
        &mut self,
        listener: Option<Arc<dyn WorkspaceListener>>,
    ) {
        self.notifier.registry = listener;
    }

    pub fn is_local(&self) -> bool {
        self.path.is_some()
    }

    pub fn is_null(&self) -> bool {
        self.url.is_empty()
    }

    /// Case insensitive ordering by name, for consumers that display
    /// workspaces sorted.
    pub fn compare(first: &Workspace, second: &Workspace) -> Ordering {
        first.name.to_lowercase().cmp(&second.name.to_lowercase())
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn owner(&self) -> &str {
        &self.owner
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn is_owned(&self) -> bool {
        self.owned
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        self.description = description.into();
    }

    pub fn set_owner(&mut self, owner: impl Into<String>) {
        self.owner = owner.into();
    }

    pub fn set_owned(&mut self, owned: bool) {
        self.owned = owned;
    }

    /// Bind the local path; an empty path unbinds it.
    pub fn set_path(&mut self, path: impl Into<PathBuf>) {
        let path = path.into();
        self.path = (!path.as_os_str().is_empty()).then_some(path);
    }

    pub fn set_credentials(
        &mut self,
        username: impl Into<String>,
        password: impl Into<String>,
    ) {
        self.credentials = Credentials::new(username, password);
    }

    /// Take the credentials from the provider, falling back to anonymous
    /// access when it has none to offer.
    pub fn use_credentials(&mut self, provider: &dyn CredentialProvider) {
        self.credentials = provider.credentials().unwrap_or_default();
    }

    pub fn info(&self) -> WorkspaceInfo {
        WorkspaceInfo {
            url: self.url.clone(),
            name: self.name.clone(),
            description: self.description.clone(),
            owner: self.owner.clone(),
            path: self.path.clone(),
            owned: self.owned,
        }
    }

    /// Open the repository at the local path, replacing any handle that
    /// was already open.  A workspace without a local path is silently
    /// left closed.
    pub fn open(&mut self) -> bool {
        self.close();
        let path = match &self.path {
            Some(path) => path,
            None => return false,
        };
        match git2::Repository::open(path) {
            Ok(repo) => {
                self.repo = Some(repo);
                true
            }
            Err(e) => {
                self.notifier.warning(WorkspaceError::from(e).warning(
                    "An error occurred while trying to open the workspace."
                ));
                false
            }
        }
    }

    pub fn opened(&self) -> bool {
        self.repo.is_some()
    }

    pub fn close(&mut self) {
        if self.repo.take().is_some() {
            debug!("closed workspace at {:?}", self.path);
        }
    }

    pub(crate) fn repo(&self) -> Result<&git2::Repository, WorkspaceError> {
        self.repo.as_ref().ok_or(WorkspaceError::NotOpen)
    }
}

impl Drop for Workspace {
    fn drop(&mut self) {
        self.close();
    }
}

impl fmt::Debug for Workspace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Workspace")
            .field("url", &self.url)
            .field("name", &self.name)
            .field("description", &self.description)
            .field("owner", &self.owner)
            .field("path", &self.path)
            .field("credentials", &self.credentials)
            .field("owned", &self.owned)
            .field("opened", &self.opened())
            .finish()
    }
}

use std::{
    ops::{
        Deref,
        DerefMut,
    },
    sync::Arc,
};

use crate::{
    event::WorkspaceListener,
    workspace::Workspace,
};

/// Ordered collection of workspaces.
///
/// Insertion order is preserved and nothing is de-duplicated; callers
/// wanting unique urls should check with `find_by_url` first.  The
/// listener given to the registry receives the cloned event of every
/// workspace it tracks.
#[derive(Default)]
pub struct WorkspaceRegistry {
    workspaces: Vec<Workspace>,
    listener: Option<Arc<dyn WorkspaceListener>>,
}

impl WorkspaceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_listener(listener: Arc<dyn WorkspaceListener>) -> Self {
        Self {
            workspaces: Vec::new(),
            listener: Some(listener),
        }
    }

    /// Create a workspace for the remote `url` and append it.
    pub fn add(&mut self, url: &str, name: &str) {
        self.push(Workspace::new(url, name));
    }

    /// Track a workspace constructed elsewhere.
    pub fn push(&mut self, mut workspace: Workspace) {
        workspace.set_registry_listener(self.listener.clone());
        self.workspaces.push(workspace);
    }

    pub fn find_by_url(&self, url: &str) -> Option<&Workspace> {
        self.workspaces.iter().find(|workspace| workspace.url() == url)
    }

    pub fn find_by_url_mut(&mut self, url: &str) -> Option<&mut Workspace> {
        self.workspaces.iter_mut().find(|workspace| workspace.url() == url)
    }

    /// The workspaces in display order; the registry itself is left as is.
    pub fn sorted(&self) -> Vec<&Workspace> {
        let mut result = self.workspaces.iter().collect::<Vec<_>>();
        result.sort_by(|a, b| Workspace::compare(a, b));
        result
    }
}

impl Deref for WorkspaceRegistry {
    type Target = [Workspace];

    fn deref(&self) -> &Self::Target {
        &self.workspaces
    }
}

impl DerefMut for WorkspaceRegistry {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.workspaces
    }
}

impl IntoIterator for WorkspaceRegistry {
    type Item = Workspace;
    type IntoIter = std::vec::IntoIter<Workspace>;

    fn into_iter(self) -> Self::IntoIter {
        self.workspaces.into_iter()
    }
}

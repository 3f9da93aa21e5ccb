use std::{
    path::{
        Path,
        PathBuf,
    },
    sync::{
        Arc,
        mpsc::Sender,
    },
};

#[derive(Clone, Debug, PartialEq)]
pub enum WorkspaceEvent {
    /// Fraction of the current transfer or checkout phase, in [0, 1].
    Progress(f64),
    /// Non-fatal failure, suitable for display.
    Warning(String),
    Cloned {
        url: String,
        path: PathBuf,
    },
    /// Emitted at the end of every push attempt, successful or not.
    Pushed {
        url: String,
    },
}

/// Receives the events emitted by workspaces.
///
/// Notifications are delivered synchronously on the thread running the
/// workspace operation, so implementations that drive a user interface
/// are responsible for marshaling them where they need to go.
pub trait WorkspaceListener: Send + Sync {
    fn notify(&self, event: &WorkspaceEvent);
}

impl WorkspaceListener for Sender<WorkspaceEvent> {
    fn notify(&self, event: &WorkspaceEvent) {
        // a disconnected receiver simply stopped listening.
        let _ = self.send(event.clone());
    }
}

/// Listener that forwards events into the `log` facade.
#[derive(Default)]
pub struct LogListener;

impl WorkspaceListener for LogListener {
    fn notify(&self, event: &WorkspaceEvent) {
        match event {
            WorkspaceEvent::Progress(value) => info!("progress: {:.0}%", value * 100.0),
            WorkspaceEvent::Warning(message) => warn!("{message}"),
            WorkspaceEvent::Cloned { url, path } => info!("cloned <{url}> into {path:?}"),
            WorkspaceEvent::Pushed { url } => info!("push to <{url}> finished"),
        }
    }
}

#[derive(Clone, Default)]
pub(crate) struct Notifier {
    pub(crate) listener: Option<Arc<dyn WorkspaceListener>>,
    pub(crate) registry: Option<Arc<dyn WorkspaceListener>>,
}

impl Notifier {
    fn emit(&self, event: WorkspaceEvent) {
        if let Some(listener) = &self.listener {
            listener.notify(&event);
        }
    }

    pub(crate) fn progress(&self, value: f64) {
        debug!("progress {value}");
        self.emit(WorkspaceEvent::Progress(value));
    }

    pub(crate) fn warning(&self, message: String) {
        warn!("{message}");
        self.emit(WorkspaceEvent::Warning(message));
    }

    pub(crate) fn cloned(&self, url: &str, path: &Path) {
        let event = WorkspaceEvent::Cloned {
            url: url.to_string(),
            path: path.to_path_buf(),
        };
        if let Some(registry) = &self.registry {
            registry.notify(&event);
        }
        self.emit(event);
    }

    pub(crate) fn pushed(&self, url: &str) {
        self.emit(WorkspaceEvent::Pushed {
            url: url.to_string(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc::channel;

    #[test]
    fn test_cloned_reaches_both_listeners() {
        let (tx, rx) = channel();
        let (registry_tx, registry_rx) = channel();
        let notifier = Notifier {
            listener: Some(Arc::new(tx)),
            registry: Some(Arc::new(registry_tx)),
        };
        notifier.progress(0.5);
        notifier.cloned("https://models.example.com/w/1", Path::new("/tmp/w1"));
        notifier.pushed("https://models.example.com/w/1");

        let expected = WorkspaceEvent::Cloned {
            url: "https://models.example.com/w/1".to_string(),
            path: PathBuf::from("/tmp/w1"),
        };
        assert_eq!(rx.try_iter().collect::<Vec<_>>(), vec![
            WorkspaceEvent::Progress(0.5),
            expected.clone(),
            WorkspaceEvent::Pushed {
                url: "https://models.example.com/w/1".to_string(),
            },
        ]);
        // only the cloned event is registry-wide
        assert_eq!(registry_rx.try_iter().collect::<Vec<_>>(), vec![expected]);
    }

    #[test]
    fn test_disconnected_receiver() {
        let (tx, rx) = channel();
        drop(rx);
        let notifier = Notifier {
            listener: Some(Arc::new(tx)),
            registry: None,
        };
        notifier.warning("nobody is listening".to_string());
    }
}

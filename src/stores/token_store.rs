//! Access token store
//!
//! Holds the current bearer token, mirrors it to a file so it survives
//! restarts, and notifies typed observers on every change. The token is
//! an opaque string: nothing here parses or validates it, and nothing
//! here touches the network.

use std::path::PathBuf;

use parking_lot::RwLock;
use tracing::warn;

type Observer = Box<dyn Fn(Option<&str>) + Send + Sync>;

/// Process-wide holder of the bearer access token
pub struct TokenStore {
    token: RwLock<Option<String>>,
    path: Option<PathBuf>,
    observers: RwLock<Vec<Observer>>,
}

impl TokenStore {
    /// Store persisted at `path`, seeded from its current contents
    pub fn load(path: PathBuf) -> Self {
        let token = std::fs::read_to_string(&path)
            .ok()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());

        Self {
            token: RwLock::new(token),
            path: Some(path),
            observers: RwLock::new(Vec::new()),
        }
    }

    /// Store with no persistence (tests)
    pub fn in_memory() -> Self {
        Self {
            token: RwLock::new(None),
            path: None,
            observers: RwLock::new(Vec::new()),
        }
    }

    /// Current token, if any
    pub fn get(&self) -> Option<String> {
        self.token.read().clone()
    }

    /// Presence of a token is the sole "authenticated" signal
    pub fn is_authenticated(&self) -> bool {
        self.token.read().is_some()
    }

    /// Persist or clear the credential and notify all observers
    pub fn set(&self, token: Option<String>) {
        if let Some(path) = &self.path {
            let result = match &token {
                Some(value) => std::fs::write(path, value),
                None => match std::fs::remove_file(path) {
                    Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
                    other => other,
                },
            };
            if let Err(e) = result {
                warn!("failed to persist access token: {}", e);
            }
        }

        *self.token.write() = token.clone();

        let observers = self.observers.read();
        for observer in observers.iter() {
            observer(token.as_deref());
        }
    }

    /// Register a change observer. Observers run on the caller's thread
    /// inside `set`; keep them short.
    pub fn subscribe(&self, observer: impl Fn(Option<&str>) + Send + Sync + 'static) {
        self.observers.write().push(Box::new(observer));
    }
}

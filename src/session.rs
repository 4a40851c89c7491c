use std::path::PathBuf;
use std::sync::Mutex;

/// The single "remember me" slot living outside the record collections: one
/// opaque session token, used only to resume a session on restart. Failures
/// are logged and swallowed; losing the anchor just means logging in again.
pub trait SessionAnchor: Send + Sync {
    fn load(&self) -> Option<String>;
    fn store(&self, token: &str);
    fn clear(&self);
}

/// File-backed anchor, the local-storage analog.
pub struct FileAnchor {
    path: PathBuf,
}

impl FileAnchor {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl SessionAnchor for FileAnchor {
    fn load(&self) -> Option<String> {
        match std::fs::read_to_string(&self.path) {
            Ok(token) => {
                let token = token.trim().to_string();
                if token.is_empty() {
                    None
                } else {
                    Some(token)
                }
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => None,
            Err(e) => {
                log::warn!("Failed to read session anchor {:?}: {e}", self.path);
                None
            }
        }
    }

    fn store(&self, token: &str) {
        if let Err(e) = std::fs::write(&self.path, token) {
            log::warn!("Failed to write session anchor {:?}: {e}", self.path);
        }
    }

    fn clear(&self) {
        match std::fs::remove_file(&self.path) {
            Ok(()) => {}
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => log::warn!("Failed to clear session anchor {:?}: {e}", self.path),
        }
    }
}

/// In-memory anchor for tests.
#[derive(Default)]
pub struct MemoryAnchor {
    slot: Mutex<Option<String>>,
}

impl MemoryAnchor {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionAnchor for MemoryAnchor {
    fn load(&self) -> Option<String> {
        self.slot.lock().unwrap().clone()
    }

    fn store(&self, token: &str) {
        *self.slot.lock().unwrap() = Some(token.to_string());
    }

    fn clear(&self) {
        *self.slot.lock().unwrap() = None;
    }
}

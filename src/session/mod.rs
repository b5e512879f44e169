//! Session store: the one piece of client state that outlives a command.

pub mod storage;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::Identity;
pub use storage::{FileStorage, MemoryStorage, SessionStorage, StorageError};

/// What gets written under the session key
#[derive(Debug, Clone, Serialize, Deserialize)]
struct StoredSession {
    identity: Identity,
    signed_in_at: DateTime<Utc>,
}

/// Current authenticated identity, backed by persistent storage.
///
/// Created once at startup with [`Session::restore`] and handed to whatever
/// needs it; login and logout are the only writers.
pub struct Session {
    storage: Box<dyn SessionStorage>,
    key: String,
    current: Option<StoredSession>,
}

impl Session {
    /// Hydrate from storage. Unreadable records count as signed out.
    pub fn restore(storage: Box<dyn SessionStorage>, key: impl Into<String>) -> Self {
        let key = key.into();
        let current = match storage.get(&key) {
            Ok(Some(value)) => match serde_json::from_value::<StoredSession>(value) {
                Ok(stored) => Some(stored),
                Err(err) => {
                    tracing::warn!("Ignoring malformed session record '{}': {}", key, err);
                    None
                }
            },
            Ok(None) => None,
            Err(err) => {
                tracing::warn!("Could not read session storage: {}", err);
                None
            }
        };

        if let Some(stored) = &current {
            tracing::debug!("Restored session for {}", stored.identity.display_name());
        }

        Self { storage, key, current }
    }

    /// Signed-out session over process-local storage
    pub fn in_memory() -> Self {
        Self::restore(Box::new(MemoryStorage::new()), "blooms.admin.user")
    }

    /// Persist a freshly authenticated identity, then adopt it in memory
    pub fn login(&mut self, identity: Identity) -> Result<(), StorageError> {
        let stored = StoredSession {
            identity,
            signed_in_at: Utc::now(),
        };
        self.storage.set(&self.key, serde_json::to_value(&stored)?)?;
        tracing::info!("Signed in as {}", stored.identity.display_name());
        self.current = Some(stored);
        Ok(())
    }

    /// Forget the identity. Memory is cleared even if storage fails.
    pub fn logout(&mut self) -> Result<(), StorageError> {
        if let Some(stored) = self.current.take() {
            tracing::info!("Signed out {}", stored.identity.display_name());
        }
        self.storage.remove(&self.key)
    }

    pub fn current_user(&self) -> Option<&Identity> {
        self.current.as_ref().map(|s| &s.identity)
    }

    pub fn signed_in_at(&self) -> Option<DateTime<Utc>> {
        self.current.as_ref().map(|s| s.signed_in_at)
    }

    pub fn is_authenticated(&self) -> bool {
        self.current.is_some()
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("key", &self.key)
            .field("user", &self.current_user().map(Identity::display_name))
            .finish()
    }
}

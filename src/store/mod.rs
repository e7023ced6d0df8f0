//! Storage backends.
//!
//! Two implementations of one set of storage traits: [`LocalStore`]
//! (namespaced JSON snapshot files) and [`RemoteStore`] (cloud document
//! store). The backend is chosen once, at startup, in [`Stores::connect`];
//! data-access services receive trait objects and never branch on a
//! capability flag. Switching modes requires a restart.

pub mod local;
pub mod remote;

pub use local::LocalStore;
pub use remote::RemoteStore;

use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, warn};

use crate::clients::FirestoreClient;
use crate::config::Config;
use crate::models::{Anime, AnimeRequest, RequestStatus, User, WatchEntry};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Remote store responded {status}: {message}")]
    Remote { status: u16, message: String },

    #[error("Document missing: {0}")]
    Missing(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

#[async_trait]
pub trait CatalogStore: Send + Sync {
    async fn list(&self) -> Result<Vec<Anime>, StoreError>;

    async fn get(&self, id: &str) -> Result<Option<Anime>, StoreError>;

    /// Upsert keyed by id. The remote backend merges the supplied top-level
    /// fields into an existing document; the local backend replaces the
    /// record wholesale. Callers must always supply complete records and
    /// never rely on partial updates.
    async fn upsert(&self, anime: &Anime) -> Result<(), StoreError>;

    /// Idempotent; deleting an absent id succeeds.
    async fn delete(&self, id: &str) -> Result<(), StoreError>;

    /// Bulk import. Local: wholesale snapshot replacement. Remote: upsert
    /// record by record, so a failure partway through leaves the earlier
    /// records committed.
    async fn import_many(&self, records: &[Anime]) -> Result<(), StoreError>;

    /// Factory reset: overwrite the entire catalog with `records`.
    async fn replace_all(&self, records: &[Anime]) -> Result<(), StoreError>;
}

#[async_trait]
pub trait UserStore: Send + Sync {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError>;

    /// Exact match on both fields, used by login.
    async fn find_by_credentials(
        &self,
        email: &str,
        password: &str,
    ) -> Result<Option<User>, StoreError>;

    /// Returns the stored record, including its assigned identity.
    async fn insert(&self, user: &User) -> Result<User, StoreError>;
}

/// Push-side of watch-progress synchronization. Only the remote backend
/// implements this; in local mode the session file is the sole persistence
/// and there is nothing to push to.
#[async_trait]
pub trait ProfileSync: Send + Sync {
    /// Partial-field update: writes only the watchlist and watch history,
    /// leaving every other field of the user document untouched.
    async fn update_progress(
        &self,
        user_id: &str,
        watchlist: &[String],
        history: &[WatchEntry],
    ) -> Result<(), StoreError>;
}

#[async_trait]
pub trait RequestStore: Send + Sync {
    async fn insert(&self, request: &AnimeRequest) -> Result<(), StoreError>;

    async fn list(&self) -> Result<Vec<AnimeRequest>, StoreError>;

    /// Idempotent.
    async fn delete(&self, id: &str) -> Result<(), StoreError>;

    /// Fails with [`StoreError::Missing`] if the request no longer exists.
    async fn set_status(&self, id: &str, status: RequestStatus) -> Result<(), StoreError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageMode {
    Local,
    Remote,
}

impl std::fmt::Display for StorageMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Local => write!(f, "local"),
            Self::Remote => write!(f, "remote"),
        }
    }
}

/// The storage handles every data-access service is built from, selected
/// once per process.
pub struct Stores {
    pub mode: StorageMode,

    /// Always present: the session file lives here in both modes, and in
    /// remote mode the catalog falls back to this snapshot on read errors.
    pub local: Arc<LocalStore>,

    pub catalog: Arc<dyn CatalogStore>,

    /// Local snapshot used for fail-soft catalog reads; `None` when the
    /// primary already is the local store.
    pub catalog_fallback: Option<Arc<dyn CatalogStore>>,

    pub users: Arc<dyn UserStore>,

    pub sync: Option<Arc<dyn ProfileSync>>,

    pub requests: Option<Arc<dyn RequestStore>>,
}

impl Stores {
    /// Selects the storage backend from the configuration bundle.
    ///
    /// Remote mode requires all credential fields to be filled in; if they
    /// are missing the client is never constructed and no network is
    /// touched. A client construction failure is reported and degrades to
    /// local mode rather than aborting the process.
    #[must_use]
    pub fn connect(config: &Config) -> Self {
        let local = Arc::new(LocalStore::new(&config.general.data_dir));

        if !config.remote.is_configured() {
            info!("Remote credentials missing or placeholder; running on the local snapshot");
            return Self::local_only(local);
        }

        match FirestoreClient::new(&config.remote) {
            Ok(client) => {
                let remote = Arc::new(RemoteStore::new(client));
                info!(
                    project = %config.remote.project_id,
                    "Remote document store selected"
                );
                Self {
                    mode: StorageMode::Remote,
                    local: local.clone(),
                    catalog: remote.clone(),
                    catalog_fallback: Some(local),
                    users: remote.clone(),
                    sync: Some(remote.clone()),
                    requests: Some(remote),
                }
            }
            Err(err) => {
                warn!("Remote store construction failed ({err}); running on the local snapshot");
                Self::local_only(local)
            }
        }
    }

    fn local_only(local: Arc<LocalStore>) -> Self {
        Self {
            mode: StorageMode::Local,
            local: local.clone(),
            catalog: local.clone(),
            catalog_fallback: None,
            users: local,
            sync: None,
            requests: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unconfigured_remote_selects_local_mode() {
        let config = Config::default();
        let stores = Stores::connect(&config);

        assert_eq!(stores.mode, StorageMode::Local);
        assert!(stores.catalog_fallback.is_none());
        assert!(stores.sync.is_none());
        assert!(stores.requests.is_none());
    }

    #[test]
    fn configured_remote_selects_remote_mode_with_local_fallback() {
        let mut config = Config::default();
        config.remote.api_key = "AIzaSomething".to_string();
        config.remote.project_id = "anivault-demo".to_string();
        config.remote.app_id = "1:42:web:abc".to_string();

        let stores = Stores::connect(&config);

        assert_eq!(stores.mode, StorageMode::Remote);
        assert!(stores.catalog_fallback.is_some());
        assert!(stores.sync.is_some());
        assert!(stores.requests.is_some());
    }
}

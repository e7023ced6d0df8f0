//! Local snapshot store.
//!
//! The offline/demo backend and the fallback mirror for remote catalog
//! reads. Persistence is a handful of namespaced JSON files under the
//! configured data directory, written whole on every mutation (local
//! writes are full-replace by contract).

use async_trait::async_trait;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::warn;
use uuid::Uuid;

use crate::models::{Anime, User};
use crate::seed;
use crate::store::{CatalogStore, StoreError, UserStore};

const CATALOG_FILE: &str = "catalog.json";
const USERS_FILE: &str = "users.json";
const SESSION_FILE: &str = "session.json";

pub struct LocalStore {
    data_dir: PathBuf,
}

impl LocalStore {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    #[must_use]
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    fn file(&self, name: &str) -> PathBuf {
        self.data_dir.join(name)
    }

    async fn read_json<T: DeserializeOwned>(&self, name: &str) -> Result<Option<T>, StoreError> {
        let path = self.file(name);
        match fs::read(&path).await {
            Ok(bytes) => match serde_json::from_slice(&bytes) {
                Ok(value) => Ok(Some(value)),
                Err(err) => {
                    // An unreadable snapshot is treated as absent, the same
                    // way the original discards a corrupt stored blob.
                    warn!("Discarding unreadable snapshot {}: {err}", path.display());
                    Ok(None)
                }
            },
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    async fn write_json<T: Serialize>(&self, name: &str, value: &T) -> Result<(), StoreError> {
        fs::create_dir_all(&self.data_dir).await?;
        let bytes = serde_json::to_vec_pretty(value)?;
        fs::write(self.file(name), bytes).await?;
        Ok(())
    }

    /// The current catalog snapshot, seeding the built-in defaults on
    /// first-ever access.
    pub async fn catalog_snapshot(&self) -> Result<Vec<Anime>, StoreError> {
        if let Some(catalog) = self.read_json::<Vec<Anime>>(CATALOG_FILE).await? {
            return Ok(catalog);
        }

        let seeded = seed::default_catalog();
        self.write_json(CATALOG_FILE, &seeded).await?;
        Ok(seeded)
    }

    async fn user_list(&self) -> Result<Vec<User>, StoreError> {
        Ok(self.read_json(USERS_FILE).await?.unwrap_or_default())
    }

    /// Restores the persisted session, if a user is logged in.
    pub async fn load_session(&self) -> Result<Option<User>, StoreError> {
        self.read_json(SESSION_FILE).await
    }

    pub async fn save_session(&self, user: &User) -> Result<(), StoreError> {
        self.write_json(SESSION_FILE, user).await
    }

    pub async fn clear_session(&self) -> Result<(), StoreError> {
        match fs::remove_file(self.file(SESSION_FILE)).await {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}

#[async_trait]
impl CatalogStore for LocalStore {
    async fn list(&self) -> Result<Vec<Anime>, StoreError> {
        self.catalog_snapshot().await
    }

    async fn get(&self, id: &str) -> Result<Option<Anime>, StoreError> {
        let catalog = self.catalog_snapshot().await?;
        Ok(catalog.into_iter().find(|a| a.id == id))
    }

    async fn upsert(&self, anime: &Anime) -> Result<(), StoreError> {
        let mut catalog = self.catalog_snapshot().await?;

        if let Some(existing) = catalog.iter_mut().find(|a| a.id == anime.id) {
            *existing = anime.clone();
        } else {
            catalog.push(anime.clone());
        }

        self.write_json(CATALOG_FILE, &catalog).await
    }

    async fn delete(&self, id: &str) -> Result<(), StoreError> {
        let mut catalog = self.catalog_snapshot().await?;
        catalog.retain(|a| a.id != id);
        self.write_json(CATALOG_FILE, &catalog).await
    }

    async fn import_many(&self, records: &[Anime]) -> Result<(), StoreError> {
        // Local bulk import replaces the snapshot wholesale.
        self.write_json(CATALOG_FILE, &records).await
    }

    async fn replace_all(&self, records: &[Anime]) -> Result<(), StoreError> {
        self.write_json(CATALOG_FILE, &records).await
    }
}

#[async_trait]
impl UserStore for LocalStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        let users = self.user_list().await?;
        Ok(users.into_iter().find(|u| u.email == email))
    }

    async fn find_by_credentials(
        &self,
        email: &str,
        password: &str,
    ) -> Result<Option<User>, StoreError> {
        let users = self.user_list().await?;
        Ok(users
            .into_iter()
            .find(|u| u.email == email && u.password == password))
    }

    async fn insert(&self, user: &User) -> Result<User, StoreError> {
        let mut stored = user.clone();
        stored.id = Some(format!("local-{}", Uuid::new_v4()));

        let mut users = self.user_list().await?;
        users.push(stored.clone());
        self.write_json(USERS_FILE, &users).await?;

        Ok(stored)
    }
}

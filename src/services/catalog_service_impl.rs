//! Store-backed implementation of the `CatalogService` trait.

use async_trait::async_trait;
use std::sync::Arc;
use tracing::{info, warn};

use crate::models::{Anime, Episode};
use crate::seed;
use crate::services::catalog_service::{
    CatalogError, CatalogService, EpisodeDraft, apply_draft, build_episode, parse_import_payload,
};
use crate::store::{CatalogStore, StoreError, Stores};

pub struct StoreCatalogService {
    primary: Arc<dyn CatalogStore>,
    /// Local snapshot for fail-soft reads; `None` when the primary already
    /// is the local store.
    fallback: Option<Arc<dyn CatalogStore>>,
}

impl StoreCatalogService {
    #[must_use]
    pub fn new(primary: Arc<dyn CatalogStore>, fallback: Option<Arc<dyn CatalogStore>>) -> Self {
        Self { primary, fallback }
    }

    #[must_use]
    pub fn from_stores(stores: &Stores) -> Self {
        Self::new(stores.catalog.clone(), stores.catalog_fallback.clone())
    }

    /// Read used by mutations: always the primary backend, no fallback.
    /// A read-modify-write must never patch a stale fallback copy back
    /// over the primary.
    async fn get_primary(&self, id: &str) -> Result<Option<Anime>, StoreError> {
        self.primary.get(id).await
    }
}

#[async_trait]
impl CatalogService for StoreCatalogService {
    async fn list_all(&self, force_local: bool) -> Result<Vec<Anime>, CatalogError> {
        if force_local && let Some(fallback) = &self.fallback {
            return Ok(fallback.list().await?);
        }

        match self.primary.list().await {
            Ok(catalog) => Ok(catalog),
            Err(err) => match &self.fallback {
                Some(fallback) => {
                    warn!("Catalog read failed ({err}); serving the local snapshot");
                    Ok(fallback.list().await?)
                }
                None => Err(err.into()),
            },
        }
    }

    async fn get(&self, id: &str) -> Result<Option<Anime>, CatalogError> {
        match self.primary.get(id).await {
            Ok(found) => Ok(found),
            Err(err) => match &self.fallback {
                Some(fallback) => {
                    warn!("Catalog lookup failed ({err}); serving the local snapshot");
                    Ok(fallback.get(id).await?)
                }
                None => Err(err.into()),
            },
        }
    }

    async fn save(&self, anime: Anime) -> Result<(), CatalogError> {
        self.primary.upsert(&anime).await?;
        Ok(())
    }

    async fn remove(&self, id: &str) -> Result<(), CatalogError> {
        self.primary.delete(id).await?;
        Ok(())
    }

    async fn reset_to_defaults(&self) -> Result<usize, CatalogError> {
        let seeded = seed::default_catalog();
        self.primary.replace_all(&seeded).await?;
        info!("Catalog reset to the {} built-in titles", seeded.len());
        Ok(seeded.len())
    }

    async fn import_json(&self, payload: &str) -> Result<usize, CatalogError> {
        let records = parse_import_payload(payload)?;
        self.primary.import_many(&records).await?;
        info!("Imported {} catalog records", records.len());
        Ok(records.len())
    }

    async fn export_json(&self) -> Result<String, CatalogError> {
        let catalog = self.list_all(false).await?;
        Ok(serde_json::to_string_pretty(&catalog).map_err(StoreError::from)?)
    }

    async fn add_episode(
        &self,
        anime_id: &str,
        draft: EpisodeDraft,
    ) -> Result<Episode, CatalogError> {
        let Some(mut anime) = self.get_primary(anime_id).await? else {
            return Err(CatalogError::NotFound(anime_id.to_string()));
        };

        let episode = build_episode(&anime, draft);
        anime.episodes.push(episode.clone());
        self.primary.upsert(&anime).await?;

        Ok(episode)
    }

    async fn update_episode(
        &self,
        anime_id: &str,
        episode_id: &str,
        draft: EpisodeDraft,
    ) -> Result<Episode, CatalogError> {
        let Some(mut anime) = self.get_primary(anime_id).await? else {
            return Err(CatalogError::NotFound(anime_id.to_string()));
        };

        let Some(slot) = anime.episodes.iter_mut().find(|e| e.id == episode_id) else {
            return Err(CatalogError::EpisodeNotFound(format!(
                "{anime_id}/{episode_id}"
            )));
        };

        let updated = apply_draft(slot, draft);
        *slot = updated.clone();
        self.primary.upsert(&anime).await?;

        Ok(updated)
    }
}

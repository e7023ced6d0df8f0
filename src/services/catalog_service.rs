//! Domain service for catalog management.
//!
//! The single source of truth for reading and writing anime records,
//! regardless of which storage backend is active. Reads are fail-soft
//! (degrade to the local snapshot); writes always surface failures, since
//! silent loss of an explicit admin write is unacceptable even in a demo
//! system.

use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use crate::models::{Anime, Episode};
use crate::store::StoreError;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Anime not found: {0}")]
    NotFound(String),

    #[error("Episode not found: {0}")]
    EpisodeNotFound(String),

    #[error("Invalid import payload: {0}")]
    InvalidFormat(String),

    #[error("Storage error: {0}")]
    Storage(#[from] StoreError),
}

/// Episode form payload. Unset fields take the same defaults the admin
/// form applies: season 1, `Episode {number}` title, the parent's
/// thumbnail, a 24:00 duration.
#[derive(Debug, Clone, Default)]
pub struct EpisodeDraft {
    pub number: u32,
    pub season_number: Option<u32>,
    pub title: Option<String>,
    pub thumbnail: Option<String>,
    pub video_url: String,
    pub backup_url: Option<String>,
    pub mirror_url: Option<String>,
    pub duration: Option<String>,
}

#[async_trait]
pub trait CatalogService: Send + Sync {
    /// Full catalog. Falls back to the local snapshot when the remote read
    /// fails; `force_local` reads the snapshot directly.
    async fn list_all(&self, force_local: bool) -> Result<Vec<Anime>, CatalogError>;

    /// Point lookup; an absent id is `Ok(None)`, never an error.
    async fn get(&self, id: &str) -> Result<Option<Anime>, CatalogError>;

    /// Upsert keyed by `anime.id`.
    async fn save(&self, anime: Anime) -> Result<(), CatalogError>;

    /// Idempotent delete of a record and all its episodes.
    async fn remove(&self, id: &str) -> Result<(), CatalogError>;

    /// Overwrites the active backend's catalog with the built-in seed set
    /// and returns the seeded count.
    async fn reset_to_defaults(&self) -> Result<usize, CatalogError>;

    /// Bulk import from a JSON array of records. The payload is validated
    /// before any write; a non-array payload fails with
    /// [`CatalogError::InvalidFormat`] and leaves the catalog unchanged.
    async fn import_json(&self, payload: &str) -> Result<usize, CatalogError>;

    /// Literal serialization of the current catalog snapshot.
    async fn export_json(&self) -> Result<String, CatalogError>;

    /// Appends a new episode to the parent record (read-modify-write).
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::NotFound`] when the parent does not exist.
    async fn add_episode(
        &self,
        anime_id: &str,
        draft: EpisodeDraft,
    ) -> Result<Episode, CatalogError>;

    /// Rewrites an existing episode in the parent record.
    ///
    /// # Errors
    ///
    /// - [`CatalogError::NotFound`] when the parent does not exist
    /// - [`CatalogError::EpisodeNotFound`] when the episode id does not
    ///   match any entry of the parent's list
    async fn update_episode(
        &self,
        anime_id: &str,
        episode_id: &str,
        draft: EpisodeDraft,
    ) -> Result<Episode, CatalogError>;
}

/// Parses and validates a bulk-import payload. The top-level array check
/// happens before anything else, so a malformed payload can never cause a
/// partial write.
pub fn parse_import_payload(payload: &str) -> Result<Vec<Anime>, CatalogError> {
    let value: serde_json::Value =
        serde_json::from_str(payload).map_err(|e| CatalogError::InvalidFormat(e.to_string()))?;

    if !value.is_array() {
        return Err(CatalogError::InvalidFormat(
            "top-level value must be an array of anime records".to_string(),
        ));
    }

    serde_json::from_value(value).map_err(|e| CatalogError::InvalidFormat(e.to_string()))
}

/// Builds a new episode from a draft, applying the form defaults.
pub(crate) fn build_episode(parent: &Anime, draft: EpisodeDraft) -> Episode {
    Episode {
        id: format!("ep-{}", Uuid::new_v4()),
        number: draft.number,
        season_number: draft.season_number.unwrap_or(1),
        title: draft
            .title
            .unwrap_or_else(|| format!("Episode {}", draft.number)),
        thumbnail: draft.thumbnail.unwrap_or_else(|| parent.thumbnail.clone()),
        video_url: draft.video_url,
        backup_url: draft.backup_url,
        mirror_url: draft.mirror_url,
        duration: draft.duration.unwrap_or_else(|| "24:00".to_string()),
    }
}

/// Applies a draft over an existing episode, keeping its id and any field
/// the draft leaves unset.
pub(crate) fn apply_draft(existing: &Episode, draft: EpisodeDraft) -> Episode {
    Episode {
        id: existing.id.clone(),
        number: draft.number,
        season_number: draft.season_number.unwrap_or(existing.season_number),
        title: draft.title.unwrap_or_else(|| existing.title.clone()),
        thumbnail: draft.thumbnail.unwrap_or_else(|| existing.thumbnail.clone()),
        video_url: if draft.video_url.is_empty() {
            existing.video_url.clone()
        } else {
            draft.video_url
        },
        backup_url: draft.backup_url.or_else(|| existing.backup_url.clone()),
        mirror_url: draft.mirror_url.or_else(|| existing.mirror_url.clone()),
        duration: draft.duration.unwrap_or_else(|| existing.duration.clone()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed;

    #[test]
    fn parse_import_rejects_non_array_payloads() {
        for payload in [r#"{"id":"1"}"#, r#""catalog""#, "42", "true"] {
            let err = parse_import_payload(payload).unwrap_err();
            assert!(matches!(err, CatalogError::InvalidFormat(_)), "{payload}");
        }
    }

    #[test]
    fn parse_import_rejects_invalid_json() {
        let err = parse_import_payload("not json at all").unwrap_err();
        assert!(matches!(err, CatalogError::InvalidFormat(_)));
    }

    #[test]
    fn parse_import_accepts_an_exported_catalog() {
        let payload = serde_json::to_string(&seed::default_catalog()).unwrap();
        let records = parse_import_payload(&payload).unwrap();
        assert_eq!(records.len(), 3);
    }

    #[test]
    fn parse_import_accepts_an_empty_array() {
        assert!(parse_import_payload("[]").unwrap().is_empty());
    }

    #[test]
    fn build_episode_applies_form_defaults() {
        let parent = &seed::default_catalog()[0];
        let draft = EpisodeDraft {
            number: 13,
            video_url: "https://example.com/13".to_string(),
            ..EpisodeDraft::default()
        };

        let ep = build_episode(parent, draft);
        assert_eq!(ep.season_number, 1);
        assert_eq!(ep.title, "Episode 13");
        assert_eq!(ep.thumbnail, parent.thumbnail);
        assert_eq!(ep.duration, "24:00");
        assert!(ep.id.starts_with("ep-"));
    }

    #[test]
    fn apply_draft_keeps_id_and_unset_fields() {
        let parent = &seed::default_catalog()[0];
        let existing = parent.episodes[0].clone();

        let updated = apply_draft(
            &existing,
            EpisodeDraft {
                number: existing.number,
                title: Some("Recut".to_string()),
                ..EpisodeDraft::default()
            },
        );

        assert_eq!(updated.id, existing.id);
        assert_eq!(updated.title, "Recut");
        assert_eq!(updated.video_url, existing.video_url);
        assert_eq!(updated.duration, existing.duration);
    }
}

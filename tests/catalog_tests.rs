//! Integration tests for the catalog data-access layer over the local
//! backend, plus the fail-soft fallback path with a broken primary.

use std::sync::Arc;

use async_trait::async_trait;

use anivault::models::{Anime, AnimeStatus};
use anivault::services::{CatalogError, CatalogService, EpisodeDraft, StoreCatalogService};
use anivault::store::{CatalogStore, LocalStore, StoreError};

fn temp_local_store() -> Arc<LocalStore> {
    let dir = std::env::temp_dir().join(format!("anivault-test-{}", uuid::Uuid::new_v4()));
    Arc::new(LocalStore::new(dir))
}

fn local_service() -> StoreCatalogService {
    StoreCatalogService::new(temp_local_store(), None)
}

fn bare_anime(id: &str, title: &str) -> Anime {
    Anime {
        id: id.to_string(),
        title: title.to_string(),
        description: String::new(),
        thumbnail: String::new(),
        cover_image: String::new(),
        genres: vec![],
        status: AnimeStatus::Ongoing,
        rating: 0.0,
        release_year: None,
        episodes: vec![],
        featured: false,
        trending: false,
        is_fan_favorite: false,
        is_hindi_dub: false,
        is_trending_no1: false,
    }
}

fn ids(catalog: &[Anime]) -> Vec<&str> {
    let mut ids: Vec<&str> = catalog.iter().map(|a| a.id.as_str()).collect();
    ids.sort_unstable();
    ids
}

/// A primary backend whose every operation fails, standing in for an
/// unreachable remote store.
struct UnreachableStore;

#[async_trait]
impl CatalogStore for UnreachableStore {
    async fn list(&self) -> Result<Vec<Anime>, StoreError> {
        Err(StoreError::Remote {
            status: 503,
            message: "unavailable".to_string(),
        })
    }

    async fn get(&self, _id: &str) -> Result<Option<Anime>, StoreError> {
        Err(StoreError::Remote {
            status: 503,
            message: "unavailable".to_string(),
        })
    }

    async fn upsert(&self, _anime: &Anime) -> Result<(), StoreError> {
        Err(StoreError::Remote {
            status: 503,
            message: "unavailable".to_string(),
        })
    }

    async fn delete(&self, _id: &str) -> Result<(), StoreError> {
        Err(StoreError::Remote {
            status: 503,
            message: "unavailable".to_string(),
        })
    }

    async fn import_many(&self, _records: &[Anime]) -> Result<(), StoreError> {
        Err(StoreError::Remote {
            status: 503,
            message: "unavailable".to_string(),
        })
    }

    async fn replace_all(&self, _records: &[Anime]) -> Result<(), StoreError> {
        Err(StoreError::Remote {
            status: 503,
            message: "unavailable".to_string(),
        })
    }
}

#[tokio::test]
async fn first_read_seeds_the_builtin_catalog() {
    let service = local_service();

    let catalog = service.list_all(false).await.unwrap();
    assert_eq!(ids(&catalog), vec!["1", "2", "3"]);
    assert!(catalog.iter().all(|a| !a.episodes.is_empty()));
}

#[tokio::test]
async fn reset_snapshot_survives_repeated_reads() {
    let service = local_service();

    let seeded = service.reset_to_defaults().await.unwrap();
    assert_eq!(seeded, 3);

    let first = service.list_all(false).await.unwrap();
    let second = service.list_all(false).await.unwrap();

    assert_eq!(ids(&first), ids(&second));
    assert_eq!(
        serde_json::to_value(&first).unwrap(),
        serde_json::to_value(&second).unwrap()
    );
}

#[tokio::test]
async fn local_upsert_replaces_the_whole_record() {
    let service = local_service();

    let mut original = bare_anime("x1", "First Pass");
    original.featured = true;
    original.genres = vec!["Action".to_string()];
    service.save(original).await.unwrap();

    // Second write omits the flag and genres; local semantics are
    // full-replace, so they must not survive the overwrite.
    let replacement = bare_anime("x1", "Second Pass");
    service.save(replacement).await.unwrap();

    let stored = service.get("x1").await.unwrap().unwrap();
    assert_eq!(stored.title, "Second Pass");
    assert!(!stored.featured);
    assert!(stored.genres.is_empty());
}

#[tokio::test]
async fn get_missing_id_is_none_not_error() {
    let service = local_service();
    assert!(service.get("no-such-id").await.unwrap().is_none());
}

#[tokio::test]
async fn delete_is_idempotent() {
    let service = local_service();
    service.save(bare_anime("x1", "Doomed")).await.unwrap();

    service.remove("x1").await.unwrap();
    service.remove("x1").await.unwrap();

    assert!(service.get("x1").await.unwrap().is_none());
}

#[tokio::test]
async fn bulk_import_replaces_the_local_catalog() {
    let service = local_service();
    service.reset_to_defaults().await.unwrap();

    let payload = serde_json::to_string(&vec![
        bare_anime("i1", "Imported One"),
        bare_anime("i2", "Imported Two"),
    ])
    .unwrap();

    let count = service.import_json(&payload).await.unwrap();
    assert_eq!(count, 2);

    let catalog = service.list_all(false).await.unwrap();
    assert_eq!(ids(&catalog), vec!["i1", "i2"]);
}

#[tokio::test]
async fn bulk_import_rejects_non_array_and_leaves_catalog_untouched() {
    let service = local_service();
    service.reset_to_defaults().await.unwrap();

    for payload in [r#"{"id":"1","title":"Object"}"#, "\"text\"", "not json"] {
        let err = service.import_json(payload).await.unwrap_err();
        assert!(matches!(err, CatalogError::InvalidFormat(_)), "{payload}");
    }

    let catalog = service.list_all(false).await.unwrap();
    assert_eq!(ids(&catalog), vec!["1", "2", "3"]);
}

#[tokio::test]
async fn export_round_trips_through_import() {
    let service = local_service();
    service.reset_to_defaults().await.unwrap();

    let exported = service.export_json().await.unwrap();

    let other = local_service();
    other.import_json(&exported).await.unwrap();

    assert_eq!(
        ids(&other.list_all(false).await.unwrap()),
        vec!["1", "2", "3"]
    );
}

#[tokio::test]
async fn add_episode_builds_and_persists_the_episode() {
    let service = local_service();
    service.save(bare_anime("100", "Fresh Series")).await.unwrap();

    let first = service
        .add_episode(
            "100",
            EpisodeDraft {
                number: 1,
                video_url: "https://x".to_string(),
                ..EpisodeDraft::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(first.number, 1);
    assert_eq!(first.season_number, 1);
    assert_eq!(first.video_url, "https://x");

    let second = service
        .add_episode(
            "100",
            EpisodeDraft {
                number: 2,
                video_url: "https://y".to_string(),
                ..EpisodeDraft::default()
            },
        )
        .await
        .unwrap();
    assert_ne!(first.id, second.id);

    let stored = service.get("100").await.unwrap().unwrap();
    assert_eq!(stored.episodes.len(), 2);

    let numbers: Vec<u32> = stored.sorted_episodes().iter().map(|e| e.number).collect();
    assert_eq!(numbers, vec![1, 2]);
}

#[tokio::test]
async fn update_episode_rewrites_in_place() {
    let service = local_service();
    service.save(bare_anime("100", "Fresh Series")).await.unwrap();

    let episode = service
        .add_episode(
            "100",
            EpisodeDraft {
                number: 1,
                video_url: "https://x".to_string(),
                ..EpisodeDraft::default()
            },
        )
        .await
        .unwrap();

    let updated = service
        .update_episode(
            "100",
            &episode.id,
            EpisodeDraft {
                number: 1,
                title: Some("Director's Cut".to_string()),
                ..EpisodeDraft::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.id, episode.id);
    assert_eq!(updated.title, "Director's Cut");
    // Unset draft fields keep their stored values.
    assert_eq!(updated.video_url, "https://x");

    let stored = service.get("100").await.unwrap().unwrap();
    assert_eq!(stored.episodes.len(), 1);
    assert_eq!(stored.episodes[0].title, "Director's Cut");
}

#[tokio::test]
async fn episode_mutations_surface_missing_parents_and_episodes() {
    let service = local_service();
    service.save(bare_anime("100", "Fresh Series")).await.unwrap();

    let draft = EpisodeDraft {
        number: 1,
        video_url: "https://x".to_string(),
        ..EpisodeDraft::default()
    };

    let err = service.add_episode("ghost", draft.clone()).await.unwrap_err();
    assert!(matches!(err, CatalogError::NotFound(_)));

    let err = service
        .update_episode("100", "ep-ghost", draft)
        .await
        .unwrap_err();
    assert!(matches!(err, CatalogError::EpisodeNotFound(_)));
}

#[tokio::test]
async fn unreachable_primary_falls_back_to_local_snapshot_for_reads() {
    let local = temp_local_store();
    let service = StoreCatalogService::new(Arc::new(UnreachableStore), Some(local));

    // Reads degrade to the snapshot (seeding it on first access).
    let catalog = service.list_all(false).await.unwrap();
    assert_eq!(ids(&catalog), vec!["1", "2", "3"]);

    let found = service.get("1").await.unwrap();
    assert!(found.is_some());

    // Writes are never redirected; the failure surfaces.
    let err = service.save(bare_anime("x1", "Lost Write")).await.unwrap_err();
    assert!(matches!(err, CatalogError::Storage(_)));
}

#[tokio::test]
async fn force_local_reads_the_snapshot_directly() {
    let local = temp_local_store();
    local.replace_all(&[bare_anime("cached", "Cached Copy")]).await.unwrap();

    let service = StoreCatalogService::new(Arc::new(UnreachableStore), Some(local));

    let catalog = service.list_all(true).await.unwrap();
    assert_eq!(ids(&catalog), vec!["cached"]);
}

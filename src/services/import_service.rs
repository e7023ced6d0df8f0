//! External metadata importer.
//!
//! Searches the Kitsu catalog and maps its schema onto ours, producing
//! records the admin can save as-is. Search is advisory: any failure is an
//! empty result list, never an error on the caller.

use tracing::warn;

use crate::clients::kitsu::{KitsuAnime, KitsuClient};
use crate::models::{Anime, AnimeStatus};

pub struct KitsuImportService {
    kitsu: KitsuClient,
}

impl KitsuImportService {
    #[must_use]
    pub const fn new(kitsu: KitsuClient) -> Self {
        Self { kitsu }
    }

    pub async fn search(&self, query: &str) -> Vec<Anime> {
        match self.kitsu.search(query).await {
            Ok(items) => items.iter().map(map_to_anime).collect(),
            Err(err) => {
                warn!("Kitsu search failed: {err}");
                Vec::new()
            }
        }
    }
}

/// Deterministic mapping from a Kitsu search result onto a catalog record.
///
/// The id is prefixed with the source name so imports can never collide
/// with locally-created ids. The cheap search call carries no genre data,
/// so a single placeholder genre is used, and episodes are never populated
/// by import; the admin adds them manually afterwards.
#[must_use]
pub fn map_to_anime(item: &KitsuAnime) -> Anime {
    let attr = &item.attributes;

    let title = attr
        .canonical_title
        .clone()
        .or_else(|| attr.titles.en.clone())
        .or_else(|| attr.titles.en_jp.clone())
        .unwrap_or_else(|| "Untitled".to_string());

    let thumbnail = attr
        .poster_image
        .as_ref()
        .and_then(|p| p.small.clone().or_else(|| p.original.clone()))
        .unwrap_or_default();

    let cover_image = attr
        .cover_image
        .as_ref()
        .and_then(|c| c.original.clone())
        .or_else(|| attr.poster_image.as_ref().and_then(|p| p.original.clone()))
        .unwrap_or_default();

    // Kitsu rates 0-100; the catalog's canonical scale is 0-5.
    let rating = attr
        .average_rating
        .as_deref()
        .and_then(|r| r.parse::<f32>().ok())
        .map_or(0.0, |r| (r / 20.0 * 10.0).round() / 10.0);

    let status = if attr.status.as_deref() == Some("finished") {
        AnimeStatus::Completed
    } else {
        AnimeStatus::Ongoing
    };

    Anime {
        id: format!("kitsu-{}", item.id),
        title,
        description: attr
            .synopsis
            .clone()
            .unwrap_or_else(|| "No description available.".to_string()),
        thumbnail,
        cover_image,
        genres: vec!["Anime".to_string()],
        status,
        rating,
        release_year: None,
        episodes: Vec::new(),
        featured: false,
        trending: false,
        is_fan_favorite: false,
        is_hindi_dub: false,
        is_trending_no1: false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kitsu_item(value: serde_json::Value) -> KitsuAnime {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn maps_a_full_search_result() {
        let item = kitsu_item(serde_json::json!({
            "id": "7442",
            "attributes": {
                "canonicalTitle": "Attack on Titan",
                "titles": { "en": "Attack on Titan", "en_jp": "Shingeki no Kyojin" },
                "synopsis": "Humanity lives inside cities surrounded by walls.",
                "posterImage": {
                    "small": "https://media.kitsu.app/poster/small.jpg",
                    "original": "https://media.kitsu.app/poster/original.jpg"
                },
                "coverImage": { "original": "https://media.kitsu.app/cover/original.jpg" },
                "status": "finished",
                "averageRating": "84.69"
            }
        }));

        let anime = map_to_anime(&item);
        assert_eq!(anime.id, "kitsu-7442");
        assert_eq!(anime.title, "Attack on Titan");
        assert_eq!(anime.status, AnimeStatus::Completed);
        assert!((anime.rating - 4.2).abs() < f32::EPSILON);
        assert_eq!(anime.thumbnail, "https://media.kitsu.app/poster/small.jpg");
        assert_eq!(anime.cover_image, "https://media.kitsu.app/cover/original.jpg");
        assert_eq!(anime.genres, vec!["Anime".to_string()]);
        assert!(anime.episodes.is_empty());
    }

    #[test]
    fn airing_status_and_missing_rating_map_to_defaults() {
        let item = kitsu_item(serde_json::json!({
            "id": "1",
            "attributes": {
                "canonicalTitle": "Current Show",
                "status": "current"
            }
        }));

        let anime = map_to_anime(&item);
        assert_eq!(anime.status, AnimeStatus::Ongoing);
        assert!(anime.rating.abs() < f32::EPSILON);
        assert_eq!(anime.description, "No description available.");
    }

    #[test]
    fn title_falls_back_through_language_variants() {
        let item = kitsu_item(serde_json::json!({
            "id": "2",
            "attributes": {
                "titles": { "en_jp": "Romaji Only" }
            }
        }));

        assert_eq!(map_to_anime(&item).title, "Romaji Only");
    }

    #[test]
    fn cover_falls_back_to_poster_original() {
        let item = kitsu_item(serde_json::json!({
            "id": "3",
            "attributes": {
                "canonicalTitle": "No Cover",
                "posterImage": { "original": "https://media.kitsu.app/poster/original.jpg" }
            }
        }));

        let anime = map_to_anime(&item);
        assert_eq!(
            anime.cover_image,
            "https://media.kitsu.app/poster/original.jpg"
        );
        assert_eq!(anime.thumbnail, "https://media.kitsu.app/poster/original.jpg");
    }
}

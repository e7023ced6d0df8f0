//! Built-in seed catalog.
//!
//! Used to initialize an empty local snapshot on first access and by the
//! factory-reset operation. Ids are stable ("1", "2", "3") so exported
//! snapshots and re-imports stay consistent across resets.

use crate::models::{Anime, AnimeStatus, Episode};

fn episodes(anime_id: &str, count: u32, title_stem: &str, duration: &str) -> Vec<Episode> {
    (1..=count)
        .map(|n| Episode {
            id: format!("ep-{anime_id}-{n}"),
            number: n,
            // The second cour of a two-cour run is season 2.
            season_number: if count > 12 && n > 12 { 2 } else { 1 },
            title: format!("{title_stem} {n}"),
            thumbnail: format!("https://picsum.photos/seed/ep{anime_id}-{n}/320/180"),
            video_url: "https://www.w3schools.com/html/mov_bbb.mp4".to_string(),
            backup_url: None,
            mirror_url: None,
            duration: duration.to_string(),
        })
        .collect()
}

/// The fixed default catalog every fresh installation starts from.
#[must_use]
pub fn default_catalog() -> Vec<Anime> {
    vec![
        Anime {
            id: "1".to_string(),
            title: "Demon Hunter Corps".to_string(),
            description: "A young boy sells charcoal for a living. One day, his family is \
                          murdered by a demon. His younger sister survives, but has been \
                          transformed into a demon."
                .to_string(),
            thumbnail: "https://picsum.photos/seed/anime1/300/450".to_string(),
            cover_image: "https://picsum.photos/seed/anime1cover/1920/600".to_string(),
            genres: vec![
                "Action".to_string(),
                "Fantasy".to_string(),
                "Historical".to_string(),
            ],
            status: AnimeStatus::Ongoing,
            rating: 4.9,
            release_year: Some(2019),
            episodes: episodes("1", 12, "Cruelty part", "24:00"),
            featured: true,
            trending: true,
            is_fan_favorite: true,
            is_hindi_dub: true,
            is_trending_no1: false,
        },
        Anime {
            id: "2".to_string(),
            title: "Jujutsu Sorcery".to_string(),
            description: "A boy swallows a cursed talisman - the finger of a demon - and \
                          becomes cursed himself. He enters a shaman's school to be able to \
                          locate the other body parts."
                .to_string(),
            thumbnail: "https://picsum.photos/seed/anime2/300/450".to_string(),
            cover_image: "https://picsum.photos/seed/anime2cover/1920/600".to_string(),
            genres: vec!["Action".to_string(), "Supernatural".to_string()],
            status: AnimeStatus::Ongoing,
            rating: 4.8,
            release_year: Some(2020),
            episodes: episodes("2", 24, "Incident", "24:00"),
            featured: true,
            trending: true,
            is_fan_favorite: true,
            is_hindi_dub: true,
            is_trending_no1: false,
        },
        Anime {
            id: "3".to_string(),
            title: "Shadow Monarchy".to_string(),
            description: "In a world where hunters must battle deadly monsters to protect \
                          mankind, Sung Jinwoo, notoriously the weakest hunter of all \
                          mankind, finds himself in a struggle for survival."
                .to_string(),
            thumbnail: "https://picsum.photos/seed/anime3/300/450".to_string(),
            cover_image: "https://picsum.photos/seed/anime3cover/1920/600".to_string(),
            genres: vec![
                "Action".to_string(),
                "Fantasy".to_string(),
                "Adventure".to_string(),
            ],
            status: AnimeStatus::Ongoing,
            rating: 4.9,
            release_year: Some(2024),
            episodes: episodes("3", 12, "Level Up", "23:45"),
            featured: true,
            trending: true,
            is_fan_favorite: true,
            is_hindi_dub: true,
            is_trending_no1: false,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seed_ids_are_unique() {
        let catalog = default_catalog();
        let mut ids: Vec<&str> = catalog.iter().map(|a| a.id.as_str()).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), catalog.len());
    }

    #[test]
    fn two_cour_seed_splits_seasons() {
        let catalog = default_catalog();
        let jujutsu = catalog.iter().find(|a| a.id == "2").unwrap();
        assert_eq!(jujutsu.episodes.len(), 24);
        assert_eq!(jujutsu.episodes[11].season_number, 1);
        assert_eq!(jujutsu.episodes[12].season_number, 2);
    }
}

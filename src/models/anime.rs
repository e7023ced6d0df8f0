use serde::{Deserialize, Serialize};

/// Airing status of a series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AnimeStatus {
    Ongoing,
    Completed,
}

impl Default for AnimeStatus {
    fn default() -> Self {
        Self::Ongoing
    }
}

impl std::fmt::Display for AnimeStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Ongoing => write!(f, "Ongoing"),
            Self::Completed => write!(f, "Completed"),
        }
    }
}

/// A catalog entry. Serialized form matches the document bodies stored in
/// the `animes` collection, so local snapshots, remote documents and the
/// bulk import/export format are structurally identical.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Anime {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub thumbnail: String,
    #[serde(default)]
    pub cover_image: String,
    #[serde(default)]
    pub genres: Vec<String>,
    #[serde(default)]
    pub status: AnimeStatus,
    /// Canonical 0-5 scale.
    #[serde(default)]
    pub rating: f32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub release_year: Option<i32>,
    #[serde(default)]
    pub episodes: Vec<Episode>,
    #[serde(default)]
    pub featured: bool,
    #[serde(default)]
    pub trending: bool,
    #[serde(default)]
    pub is_fan_favorite: bool,
    #[serde(default)]
    pub is_hindi_dub: bool,
    #[serde(default)]
    pub is_trending_no1: bool,
}

impl Anime {
    /// Episodes ordered for display. Storage order is whatever the admin
    /// entered; (season, number) is the only meaningful ordering.
    #[must_use]
    pub fn sorted_episodes(&self) -> Vec<&Episode> {
        let mut eps: Vec<&Episode> = self.episodes.iter().collect();
        eps.sort_by_key(|e| (e.season_number, e.number));
        eps
    }

    #[must_use]
    pub fn episode(&self, episode_id: &str) -> Option<&Episode> {
        self.episodes.iter().find(|e| e.id == episode_id)
    }
}

/// An episode embedded in its parent [`Anime`]. Episodes are not
/// independently addressable in storage; every mutation goes through a
/// read-modify-write of the parent record.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Episode {
    pub id: String,
    pub number: u32,
    pub season_number: u32,
    pub title: String,
    #[serde(default)]
    pub thumbnail: String,
    /// Main server. Always present.
    pub video_url: String,
    /// Backup server, a full alternative stream.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub backup_url: Option<String>,
    /// Mirror server, a full alternative stream.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mirror_url: Option<String>,
    #[serde(default)]
    pub duration: String,
}

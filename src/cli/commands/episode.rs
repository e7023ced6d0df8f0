//! Episode management command handlers

use crate::services::EpisodeDraft;
use crate::state::AppContext;

#[allow(clippy::too_many_arguments)]
pub async fn cmd_add_episode(
    ctx: &AppContext,
    anime_id: &str,
    number: u32,
    video_url: String,
    season: Option<u32>,
    title: Option<String>,
    thumbnail: Option<String>,
    backup_url: Option<String>,
    mirror_url: Option<String>,
    duration: Option<String>,
) -> anyhow::Result<()> {
    let draft = EpisodeDraft {
        number,
        season_number: season,
        title,
        thumbnail,
        video_url,
        backup_url,
        mirror_url,
        duration,
    };

    let episode = ctx.catalog.add_episode(anime_id, draft).await?;
    println!(
        "Added S{:02}E{:02} '{}' to {anime_id}.",
        episode.season_number, episode.number, episode.title
    );
    println!("  Episode ID: {}", episode.id);

    Ok(())
}

#[allow(clippy::too_many_arguments)]
pub async fn cmd_update_episode(
    ctx: &AppContext,
    anime_id: &str,
    episode_id: &str,
    number: u32,
    season: Option<u32>,
    title: Option<String>,
    thumbnail: Option<String>,
    video_url: Option<String>,
    backup_url: Option<String>,
    mirror_url: Option<String>,
    duration: Option<String>,
) -> anyhow::Result<()> {
    let draft = EpisodeDraft {
        number,
        season_number: season,
        title,
        thumbnail,
        video_url: video_url.unwrap_or_default(),
        backup_url,
        mirror_url,
        duration,
    };

    let episode = ctx
        .catalog
        .update_episode(anime_id, episode_id, draft)
        .await?;
    println!(
        "Updated S{:02}E{:02} '{}' of {anime_id}.",
        episode.season_number, episode.number, episode.title
    );

    Ok(())
}

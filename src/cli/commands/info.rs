//! Anime info command handler

use crate::state::AppContext;

pub async fn cmd_anime_info(ctx: &AppContext, id: &str) -> anyhow::Result<()> {
    let Some(anime) = ctx.catalog.get(id).await? else {
        println!("No anime with id '{id}' in the catalog.");
        return Ok(());
    };

    println!("{} ({})", anime.title, anime.status);
    println!("{:-<70}", "");
    println!("  ID: {}", anime.id);
    println!("  Rating: {:.1}/5", anime.rating);
    if let Some(year) = anime.release_year {
        println!("  Released: {year}");
    }
    println!("  Genres: {}", anime.genres.join(", "));
    println!();
    println!("{}", anime.description);

    if anime.episodes.is_empty() {
        println!();
        println!("No episodes yet. Add one with: anivault episode add {id} <number> <url>");
        return Ok(());
    }

    println!();
    println!("Episodes ({}):", anime.episodes.len());
    for ep in anime.sorted_episodes() {
        let mut servers = vec!["main"];
        if ep.backup_url.is_some() {
            servers.push("backup");
        }
        if ep.mirror_url.is_some() {
            servers.push("mirror");
        }

        println!(
            "  S{:02}E{:02} {} [{} | {}]",
            ep.season_number,
            ep.number,
            ep.title,
            ep.duration,
            servers.join("+")
        );
        println!("    ID: {}", ep.id);
    }

    Ok(())
}

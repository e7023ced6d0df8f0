//! List catalog command handler

use crate::state::AppContext;

pub async fn cmd_list_catalog(ctx: &AppContext, local: bool) -> anyhow::Result<()> {
    let catalog = ctx.catalog.list_all(local).await?;

    if catalog.is_empty() {
        println!("The catalog is empty.");
        println!();
        println!("Seed it with: anivault reset");
        return Ok(());
    }

    println!("Catalog ({} titles, {} mode)", catalog.len(), ctx.mode);
    println!("{:-<70}", "");

    for anime in &catalog {
        let mut flags = Vec::new();
        if anime.featured {
            flags.push("featured");
        }
        if anime.trending {
            flags.push("trending");
        }
        if anime.is_fan_favorite {
            flags.push("fan-favorite");
        }
        if anime.is_hindi_dub {
            flags.push("hindi-dub");
        }
        if anime.is_trending_no1 {
            flags.push("trending-no1");
        }

        println!(
            "{} [{} | {:.1}/5 | {} episodes]",
            anime.title,
            anime.status,
            anime.rating,
            anime.episodes.len()
        );
        println!(
            "  ID: {} | Genres: {}{}",
            anime.id,
            anime.genres.join(", "),
            if flags.is_empty() {
                String::new()
            } else {
                format!(" | {}", flags.join(", "))
            }
        );
    }

    Ok(())
}

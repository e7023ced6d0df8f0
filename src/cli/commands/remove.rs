//! Remove anime command handler

use crate::state::AppContext;

pub async fn cmd_remove_anime(ctx: &AppContext, id: &str) -> anyhow::Result<()> {
    match ctx.catalog.get(id).await? {
        Some(anime) => {
            ctx.catalog.remove(id).await?;
            println!("Removed '{}' and its {} episodes.", anime.title, anime.episodes.len());
        }
        None => {
            // Delete is idempotent; report the miss instead of erroring.
            println!("No anime with id '{id}' in the catalog.");
        }
    }

    Ok(())
}

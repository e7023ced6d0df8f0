//! Kitsu search and add command handlers

use crate::state::AppContext;

pub async fn cmd_search_kitsu(ctx: &AppContext, query: &str) -> anyhow::Result<()> {
    let results = ctx.importer.search(query).await;

    if results.is_empty() {
        println!("No results for '{query}'.");
        return Ok(());
    }

    println!("Kitsu results for '{query}':");
    println!("{:-<70}", "");

    for anime in &results {
        println!("{} [{} | {:.1}/5]", anime.title, anime.status, anime.rating);
        println!("  Import id: {}", anime.id);
    }

    println!();
    println!("Add the best match with: anivault add \"{query}\"");

    Ok(())
}

pub async fn cmd_add_anime(ctx: &AppContext, query: &str) -> anyhow::Result<()> {
    let results = ctx.importer.search(query).await;

    let Some(anime) = results.into_iter().next() else {
        println!("No results for '{query}'; nothing imported.");
        return Ok(());
    };

    let title = anime.title.clone();
    let id = anime.id.clone();
    ctx.catalog.save(anime).await?;

    println!("Imported: {title}");
    println!("  ID: {id}");
    println!("  Episodes are not populated by import; add them with: anivault episode add {id} 1 <url>");

    Ok(())
}

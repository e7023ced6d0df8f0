//! Catalog maintenance command handlers: reset, bulk import, export.

use anyhow::Context;

use crate::state::AppContext;

pub async fn cmd_reset_catalog(ctx: &AppContext) -> anyhow::Result<()> {
    let count = ctx.catalog.reset_to_defaults().await?;
    println!("Catalog reset to the {count} built-in titles.");
    Ok(())
}

pub async fn cmd_import_catalog(ctx: &AppContext, path: &str) -> anyhow::Result<()> {
    let payload = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read import file: {path}"))?;

    let count = ctx.catalog.import_json(&payload).await?;
    println!("Imported {count} records from {path}.");
    Ok(())
}

pub async fn cmd_export_catalog(ctx: &AppContext, path: Option<&str>) -> anyhow::Result<()> {
    let payload = ctx.catalog.export_json().await?;

    match path {
        Some(path) => {
            std::fs::write(path, &payload)
                .with_context(|| format!("Failed to write export file: {path}"))?;
            println!("Catalog exported to {path}.");
        }
        None => println!("{payload}"),
    }

    Ok(())
}

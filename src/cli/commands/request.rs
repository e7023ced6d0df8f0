//! Catalog request command handlers

use chrono::{TimeZone, Utc};

use crate::services::NewRequest;
use crate::state::AppContext;

pub async fn cmd_request_add(
    ctx: &AppContext,
    name: String,
    info: Option<String>,
) -> anyhow::Result<()> {
    // Anonymous submissions are fine; attach identity when logged in.
    let session = ctx.users.load_session().await?;
    let (user_id, user_name) = session
        .user
        .map(|u| (u.id, Some(u.name)))
        .unwrap_or_default();

    let request = NewRequest {
        anime_name: name.clone(),
        additional_info: info,
        user_id,
        user_name,
    };

    match ctx.requests.submit(request).await? {
        Some(record) => println!("Request submitted. ID: {}", record.id),
        None => println!("No remote store configured; the request was not persisted."),
    }

    Ok(())
}

pub async fn cmd_request_list(ctx: &AppContext) -> anyhow::Result<()> {
    let requests = ctx.requests.list().await?;

    if requests.is_empty() {
        println!("No requests.");
        return Ok(());
    }

    println!("Requests ({} total, newest first)", requests.len());
    println!("{:-<70}", "");

    for request in &requests {
        let when = Utc
            .timestamp_millis_opt(request.requested_at)
            .single()
            .map_or_else(|| request.requested_at.to_string(), |t| t.to_rfc3339());

        println!("[{}] {} ({when})", request.status, request.anime_name);
        println!(
            "  ID: {} | From: {}",
            request.id,
            request.user_name.as_deref().unwrap_or("anonymous")
        );
        if let Some(info) = &request.additional_info {
            println!("  Notes: {info}");
        }
    }

    Ok(())
}

pub async fn cmd_request_remove(ctx: &AppContext, id: &str) -> anyhow::Result<()> {
    ctx.requests.remove(id).await?;
    println!("Request {id} removed.");
    Ok(())
}

pub async fn cmd_request_complete(ctx: &AppContext, id: &str) -> anyhow::Result<()> {
    ctx.requests.complete(id).await?;
    println!("Request {id} marked as completed.");
    Ok(())
}

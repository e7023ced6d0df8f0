//! Account and watch-progress command handlers

use chrono::{TimeZone, Utc};

use crate::services::NewUser;
use crate::state::AppContext;

pub async fn cmd_register(
    ctx: &AppContext,
    name: String,
    email: String,
    password: String,
) -> anyhow::Result<()> {
    let user = ctx
        .users
        .register(NewUser {
            name,
            email,
            password,
        })
        .await?;

    let role = if user.is_admin { "admin" } else { "viewer" };
    println!("Account created for {} ({role}).", user.email);

    ctx.users.start_session(user).await?;
    println!("You are now logged in.");

    Ok(())
}

pub async fn cmd_login(ctx: &AppContext, email: &str, password: &str) -> anyhow::Result<()> {
    let user = ctx.users.login(email, password).await?;
    println!("Welcome back, {}.", user.name);

    ctx.users.start_session(user).await?;
    Ok(())
}

pub async fn cmd_logout(ctx: &AppContext) -> anyhow::Result<()> {
    let mut session = ctx.users.load_session().await?;

    if !session.is_authenticated() {
        println!("No active session.");
        return Ok(());
    }

    ctx.users.logout(&mut session).await?;
    println!("Logged out.");
    Ok(())
}

pub async fn cmd_whoami(ctx: &AppContext) -> anyhow::Result<()> {
    let session = ctx.users.load_session().await?;

    match &session.user {
        Some(user) => {
            let role = if user.is_admin { "admin" } else { "viewer" };
            println!("{} <{}> ({role})", user.name, user.email);
            println!(
                "  Watchlist: {} titles | History: {} series",
                user.watchlist.len(),
                user.watch_history.len()
            );
        }
        None => println!("Not logged in."),
    }

    Ok(())
}

pub async fn cmd_watch(ctx: &AppContext, anime_id: &str, episode_id: &str) -> anyhow::Result<()> {
    let mut session = ctx.users.load_session().await?;
    ctx.users
        .record_watch(&mut session, anime_id, episode_id)
        .await?;

    println!("Recorded: {anime_id} / {episode_id}");
    Ok(())
}

pub async fn cmd_watchlist_toggle(ctx: &AppContext, anime_id: &str) -> anyhow::Result<()> {
    let mut session = ctx.users.load_session().await?;
    let added = ctx.users.toggle_watchlist(&mut session, anime_id).await?;

    if added {
        println!("Added {anime_id} to the watchlist.");
    } else {
        println!("Removed {anime_id} from the watchlist.");
    }

    Ok(())
}

pub async fn cmd_history(ctx: &AppContext) -> anyhow::Result<()> {
    let session = ctx.users.load_session().await?;

    let Some(user) = &session.user else {
        println!("Not logged in.");
        return Ok(());
    };

    if user.watch_history.is_empty() {
        println!("Nothing watched yet.");
        return Ok(());
    }

    println!("Continue watching ({} series, most recent last)", user.watch_history.len());
    println!("{:-<70}", "");

    for entry in &user.watch_history {
        let title = ctx
            .catalog
            .get(&entry.anime_id)
            .await?
            .map_or_else(|| entry.anime_id.clone(), |a| a.title);

        let when = Utc
            .timestamp_millis_opt(entry.timestamp)
            .single()
            .map_or_else(|| entry.timestamp.to_string(), |t| t.to_rfc3339());

        println!("{title}: episode {} ({when})", entry.episode_id);
    }

    Ok(())
}

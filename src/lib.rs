pub mod cli;
pub mod clients;
pub mod config;
pub mod models;
pub mod seed;
pub mod services;
pub mod state;
pub mod store;

pub use config::Config;

use clap::Parser;
use cli::{Cli, Commands, EpisodeCommands, RequestCommands};
use state::AppContext;
use tracing_subscriber::EnvFilter;

pub async fn run() -> anyhow::Result<()> {
    let config = Config::load()?;
    config.validate()?;

    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.general.log_level));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    let ctx = AppContext::new(&config);

    match cli.command {
        Commands::List { local } => cli::cmd_list_catalog(&ctx, local).await,

        Commands::Info { id } => cli::cmd_anime_info(&ctx, &id).await,

        Commands::Search { query } => cli::cmd_search_kitsu(&ctx, &query.join(" ")).await,

        Commands::Add { query } => cli::cmd_add_anime(&ctx, &query.join(" ")).await,

        Commands::Remove { id } => cli::cmd_remove_anime(&ctx, &id).await,

        Commands::Reset => cli::cmd_reset_catalog(&ctx).await,

        Commands::Import { path } => cli::cmd_import_catalog(&ctx, &path).await,

        Commands::Export { path } => cli::cmd_export_catalog(&ctx, path.as_deref()).await,

        Commands::Episode { command } => match command {
            EpisodeCommands::Add {
                anime_id,
                number,
                video_url,
                season,
                title,
                thumbnail,
                backup_url,
                mirror_url,
                duration,
            } => {
                cli::cmd_add_episode(
                    &ctx, &anime_id, number, video_url, season, title, thumbnail, backup_url,
                    mirror_url, duration,
                )
                .await
            }
            EpisodeCommands::Update {
                anime_id,
                episode_id,
                number,
                season,
                title,
                thumbnail,
                video_url,
                backup_url,
                mirror_url,
                duration,
            } => {
                cli::cmd_update_episode(
                    &ctx, &anime_id, &episode_id, number, season, title, thumbnail, video_url,
                    backup_url, mirror_url, duration,
                )
                .await
            }
        },

        Commands::Request { command } => match command {
            RequestCommands::Add { name, info } => cli::cmd_request_add(&ctx, name, info).await,
            RequestCommands::List => cli::cmd_request_list(&ctx).await,
            RequestCommands::Remove { id } => cli::cmd_request_remove(&ctx, &id).await,
            RequestCommands::Complete { id } => cli::cmd_request_complete(&ctx, &id).await,
        },

        Commands::Register {
            name,
            email,
            password,
        } => cli::cmd_register(&ctx, name, email, password).await,

        Commands::Login { email, password } => cli::cmd_login(&ctx, &email, &password).await,

        Commands::Logout => cli::cmd_logout(&ctx).await,

        Commands::Whoami => cli::cmd_whoami(&ctx).await,

        Commands::Watch {
            anime_id,
            episode_id,
        } => cli::cmd_watch(&ctx, &anime_id, &episode_id).await,

        Commands::Watchlist { anime_id } => cli::cmd_watchlist_toggle(&ctx, &anime_id).await,

        Commands::History => cli::cmd_history(&ctx).await,

        Commands::Init => {
            let defaults = Config::default();
            defaults.save()?;
            println!("Default config written to config.toml.");
            println!("Fill in [remote] to switch from the local snapshot to the cloud store.");
            Ok(())
        }
    }
}

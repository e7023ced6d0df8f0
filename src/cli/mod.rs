//! CLI module - command-line interface for anivault
//!
//! This module provides a structured CLI using clap for argument parsing.
//! The handlers are thin consumers of the data-access services; all
//! catalog, account and request logic lives behind the service traits.

mod commands;

use clap::{Parser, Subcommand};

/// anivault - anime catalog and watch-progress manager
#[derive(Parser)]
#[command(name = "anivault")]
#[command(author, version, about, long_about = None)]
#[command(arg_required_else_help = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List the catalog
    #[command(alias = "ls", alias = "l")]
    List {
        /// Read the local snapshot even when a remote store is configured
        #[arg(long)]
        local: bool,
    },

    /// Show details and episodes for one title
    #[command(alias = "i")]
    Info {
        /// Anime id
        id: String,
    },

    /// Search Kitsu for a title without saving anything
    #[command(alias = "s")]
    Search {
        /// Search query
        #[arg(required = true)]
        query: Vec<String>,
    },

    /// Search Kitsu and save the best match into the catalog
    #[command(alias = "a")]
    Add {
        /// Search query
        #[arg(required = true)]
        query: Vec<String>,
    },

    /// Remove a title (and all its episodes) from the catalog
    #[command(alias = "rm", alias = "r")]
    Remove {
        /// Anime id to remove
        id: String,
    },

    /// Overwrite the catalog with the built-in seed titles
    Reset,

    /// Bulk-import a JSON catalog export
    Import {
        /// Path to a JSON file holding an array of anime records
        path: String,
    },

    /// Export the catalog as JSON
    Export {
        /// Destination file; stdout when omitted
        path: Option<String>,
    },

    /// Manage episodes of a title
    Episode {
        #[command(subcommand)]
        command: EpisodeCommands,
    },

    /// Manage catalog requests
    Request {
        #[command(subcommand)]
        command: RequestCommands,
    },

    /// Create an account
    Register {
        name: String,
        email: String,
        password: String,
    },

    /// Log in and persist the session
    Login { email: String, password: String },

    /// Clear the persisted session
    Logout,

    /// Show the active session
    Whoami,

    /// Record a watch event for the logged-in user
    Watch {
        /// Anime id
        anime_id: String,
        /// Episode id
        episode_id: String,
    },

    /// Toggle an anime on the logged-in user's watchlist
    Watchlist {
        /// Anime id
        anime_id: String,
    },

    /// Show the logged-in user's continue-watching list
    History,

    /// Create default config file
    #[command(alias = "--init")]
    Init,
}

#[derive(Subcommand)]
pub enum EpisodeCommands {
    /// Append an episode to a title
    Add {
        /// Parent anime id
        anime_id: String,
        /// Episode number
        number: u32,
        /// Main stream URL
        video_url: String,
        #[arg(long)]
        season: Option<u32>,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        thumbnail: Option<String>,
        #[arg(long)]
        backup_url: Option<String>,
        #[arg(long)]
        mirror_url: Option<String>,
        #[arg(long)]
        duration: Option<String>,
    },

    /// Rewrite an existing episode
    Update {
        /// Parent anime id
        anime_id: String,
        /// Episode id
        episode_id: String,
        /// Episode number
        number: u32,
        #[arg(long)]
        season: Option<u32>,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        thumbnail: Option<String>,
        #[arg(long)]
        video_url: Option<String>,
        #[arg(long)]
        backup_url: Option<String>,
        #[arg(long)]
        mirror_url: Option<String>,
        #[arg(long)]
        duration: Option<String>,
    },
}

#[derive(Subcommand)]
pub enum RequestCommands {
    /// Submit a catalog request
    Add {
        /// Requested title
        name: String,
        /// Free-text notes
        #[arg(long)]
        info: Option<String>,
    },

    /// List requests, newest first
    #[command(alias = "ls")]
    List,

    /// Delete a request
    #[command(alias = "rm")]
    Remove {
        /// Request id
        id: String,
    },

    /// Mark a request as completed
    Complete {
        /// Request id
        id: String,
    },
}

pub use commands::*;

mod auth;
mod episode;
mod info;
mod list;
mod maintenance;
mod remove;
mod request;
mod search;

pub use auth::{
    cmd_history, cmd_login, cmd_logout, cmd_register, cmd_watch, cmd_watchlist_toggle, cmd_whoami,
};
pub use episode::{cmd_add_episode, cmd_update_episode};
pub use info::cmd_anime_info;
pub use list::cmd_list_catalog;
pub use maintenance::{cmd_export_catalog, cmd_import_catalog, cmd_reset_catalog};
pub use remove::cmd_remove_anime;
pub use request::{cmd_request_add, cmd_request_complete, cmd_request_list, cmd_request_remove};
pub use search::{cmd_add_anime, cmd_search_kitsu};

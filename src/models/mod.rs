pub mod anime;
pub mod request;
pub mod user;

pub use anime::{Anime, AnimeStatus, Episode};
pub use request::{AnimeRequest, RequestStatus};
pub use user::{User, WatchEntry};

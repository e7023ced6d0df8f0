//! Domain service for accounts and watch progress.
//!
//! Registration, credential login and synchronization of the two profile
//! fields (watchlist, watch history) between the persisted session and the
//! remote user document. Identity is threaded through an explicit
//! [`Session`] value; there is no ambient logged-in user.

use async_trait::async_trait;
use thiserror::Error;

use crate::models::User;
use crate::store::StoreError;

#[derive(Debug, Error)]
pub enum UserError {
    /// Registration with an email that already has an account. This is the
    /// one email-specific failure the system reports.
    #[error("An account with this email already exists")]
    DuplicateEmail,

    /// Login failure. Deliberately identical for a wrong password and an
    /// unknown email, so accounts cannot be enumerated.
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Storage error: {0}")]
    Storage(#[from] StoreError),
}

/// Registration form payload.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// The session context passed to every operation that needs identity.
/// Loaded from the session file at startup, saved on every profile
/// mutation, cleared at logout.
#[derive(Debug, Clone, Default)]
pub struct Session {
    pub user: Option<User>,
}

impl Session {
    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.user.as_ref().is_some_and(|u| u.is_admin)
    }
}

#[async_trait]
pub trait UserService: Send + Sync {
    /// Creates an account after a duplicate-email check.
    ///
    /// The admin role is derived here, once, from the configured
    /// allow-list; the stored flag is authoritative from then on.
    ///
    /// # Errors
    ///
    /// - [`UserError::DuplicateEmail`] when the email is already taken
    /// - [`UserError::Validation`] for empty email or password
    async fn register(&self, candidate: NewUser) -> Result<User, UserError>;

    /// Exact-match credential login.
    ///
    /// # Errors
    ///
    /// Returns [`UserError::InvalidCredentials`] for any mismatch; whether
    /// the email exists is never revealed.
    async fn login(&self, email: &str, password: &str) -> Result<User, UserError>;

    /// Restores the persisted session, if any.
    async fn load_session(&self) -> Result<Session, UserError>;

    /// Persists a fresh session for a registered or logged-in user.
    async fn start_session(&self, user: User) -> Result<Session, UserError>;

    /// Clears the session. The stored account record is untouched.
    async fn logout(&self, session: &mut Session) -> Result<(), UserError>;

    /// Records a watch event (last-one-wins per series), writes the
    /// session through to local persistence and pushes the progress
    /// fields to the remote document best-effort.
    async fn record_watch(
        &self,
        session: &mut Session,
        anime_id: &str,
        episode_id: &str,
    ) -> Result<(), UserError>;

    /// Toggles watchlist membership; returns the new state. Same
    /// write-through and sync behavior as [`record_watch`].
    ///
    /// [`record_watch`]: UserService::record_watch
    async fn toggle_watchlist(
        &self,
        session: &mut Session,
        anime_id: &str,
    ) -> Result<bool, UserError>;

    /// Fire-and-forget push of watchlist and watch history to the remote
    /// user document. A no-op without a remote backend or a user identity;
    /// failures are logged, never surfaced.
    async fn sync_progress(&self, user: &User);
}

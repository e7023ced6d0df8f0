//! Store-backed implementation of the `UserService` trait.

use async_trait::async_trait;
use chrono::Utc;
use std::sync::Arc;
use tracing::warn;

use crate::config::Config;
use crate::models::User;
use crate::services::user_service::{NewUser, Session, UserError, UserService};
use crate::store::{LocalStore, ProfileSync, Stores, UserStore};

pub struct StoreUserService {
    users: Arc<dyn UserStore>,
    /// Remote push handle; `None` in local mode, where the session file is
    /// the sole persistence.
    sync: Option<Arc<dyn ProfileSync>>,
    sessions: Arc<LocalStore>,
    admin_emails: Vec<String>,
}

impl StoreUserService {
    #[must_use]
    pub fn new(
        users: Arc<dyn UserStore>,
        sync: Option<Arc<dyn ProfileSync>>,
        sessions: Arc<LocalStore>,
        admin_emails: Vec<String>,
    ) -> Self {
        Self {
            users,
            sync,
            sessions,
            admin_emails,
        }
    }

    #[must_use]
    pub fn from_stores(stores: &Stores, config: &Config) -> Self {
        Self::new(
            stores.users.clone(),
            stores.sync.clone(),
            stores.local.clone(),
            config.users.admin_emails.clone(),
        )
    }

    fn active_user(session: &mut Session) -> Result<&mut User, UserError> {
        session
            .user
            .as_mut()
            .ok_or_else(|| UserError::Validation("no active session".to_string()))
    }
}

#[async_trait]
impl UserService for StoreUserService {
    async fn register(&self, candidate: NewUser) -> Result<User, UserError> {
        if candidate.email.is_empty() || candidate.password.is_empty() {
            return Err(UserError::Validation(
                "email and password are required".to_string(),
            ));
        }

        // Only as strong as the query's consistency: two registrations
        // racing this check can both pass. Accepted.
        if self.users.find_by_email(&candidate.email).await?.is_some() {
            return Err(UserError::DuplicateEmail);
        }

        let is_admin = self.admin_emails.iter().any(|e| e == &candidate.email);
        let user = User {
            id: None,
            name: candidate.name,
            email: candidate.email,
            password: candidate.password,
            is_admin,
            watchlist: Vec::new(),
            watch_history: Vec::new(),
        };

        Ok(self.users.insert(&user).await?)
    }

    async fn login(&self, email: &str, password: &str) -> Result<User, UserError> {
        self.users
            .find_by_credentials(email, password)
            .await?
            .ok_or(UserError::InvalidCredentials)
    }

    async fn load_session(&self) -> Result<Session, UserError> {
        Ok(Session {
            user: self.sessions.load_session().await?,
        })
    }

    async fn start_session(&self, user: User) -> Result<Session, UserError> {
        self.sessions.save_session(&user).await?;
        Ok(Session { user: Some(user) })
    }

    async fn logout(&self, session: &mut Session) -> Result<(), UserError> {
        session.user = None;
        self.sessions.clear_session().await?;
        Ok(())
    }

    async fn record_watch(
        &self,
        session: &mut Session,
        anime_id: &str,
        episode_id: &str,
    ) -> Result<(), UserError> {
        let user = Self::active_user(session)?;
        user.record_watch(anime_id, episode_id, Utc::now().timestamp_millis());

        self.sessions.save_session(user).await?;
        self.sync_progress(user).await;
        Ok(())
    }

    async fn toggle_watchlist(
        &self,
        session: &mut Session,
        anime_id: &str,
    ) -> Result<bool, UserError> {
        let user = Self::active_user(session)?;
        let added = user.toggle_watchlist(anime_id);

        self.sessions.save_session(user).await?;
        self.sync_progress(user).await;
        Ok(added)
    }

    async fn sync_progress(&self, user: &User) {
        let (Some(sync), Some(id)) = (&self.sync, user.id.as_deref()) else {
            return;
        };

        if let Err(err) = sync
            .update_progress(id, &user.watchlist, &user.watch_history)
            .await
        {
            warn!("Watch-progress sync failed for user {id}: {err}");
        }
    }
}

//! Domain service for user-submitted catalog requests.
//!
//! Requests are remote-only by design: without the cloud store a
//! submission is silently discarded and listings are empty, so anonymous
//! visitors on a local-mode deployment can still use the form without
//! errors. Their request simply is not persisted anywhere.

use async_trait::async_trait;
use thiserror::Error;

use crate::models::AnimeRequest;
use crate::store::StoreError;

#[derive(Debug, Error)]
pub enum RequestError {
    #[error("Request not found: {0}")]
    NotFound(String),

    #[error("Storage error: {0}")]
    Storage(#[from] StoreError),
}

/// Request form payload. Submitter fields are optional; anonymous
/// submissions are allowed.
#[derive(Debug, Clone)]
pub struct NewRequest {
    pub anime_name: String,
    pub additional_info: Option<String>,
    pub user_id: Option<String>,
    pub user_name: Option<String>,
}

#[async_trait]
pub trait RequestService: Send + Sync {
    /// Persists a request. Returns `Ok(None)` when no remote store is
    /// configured (the submission is dropped, by design).
    async fn submit(&self, request: NewRequest) -> Result<Option<AnimeRequest>, RequestError>;

    /// All requests, newest first. Empty without a remote store.
    async fn list(&self) -> Result<Vec<AnimeRequest>, RequestError>;

    /// Idempotent delete.
    async fn remove(&self, id: &str) -> Result<(), RequestError>;

    /// Transitions a pending request to Completed.
    ///
    /// # Errors
    ///
    /// Returns [`RequestError::NotFound`] when the request no longer
    /// exists.
    async fn complete(&self, id: &str) -> Result<(), RequestError>;
}

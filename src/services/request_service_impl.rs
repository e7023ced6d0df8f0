//! Store-backed implementation of the `RequestService` trait.

use async_trait::async_trait;
use chrono::Utc;
use std::sync::Arc;
use tracing::debug;
use uuid::Uuid;

use crate::models::{AnimeRequest, RequestStatus};
use crate::services::request_service::{NewRequest, RequestError, RequestService};
use crate::store::{RequestStore, StoreError, Stores};

pub struct StoreRequestService {
    remote: Option<Arc<dyn RequestStore>>,
}

impl StoreRequestService {
    #[must_use]
    pub fn new(remote: Option<Arc<dyn RequestStore>>) -> Self {
        Self { remote }
    }

    #[must_use]
    pub fn from_stores(stores: &Stores) -> Self {
        Self::new(stores.requests.clone())
    }
}

#[async_trait]
impl RequestService for StoreRequestService {
    async fn submit(&self, request: NewRequest) -> Result<Option<AnimeRequest>, RequestError> {
        let Some(remote) = &self.remote else {
            debug!("No remote store; dropping request for '{}'", request.anime_name);
            return Ok(None);
        };

        let record = AnimeRequest {
            id: format!("req-{}", Uuid::new_v4()),
            anime_name: request.anime_name,
            additional_info: request.additional_info,
            status: RequestStatus::Pending,
            requested_at: Utc::now().timestamp_millis(),
            user_id: request.user_id,
            user_name: request.user_name,
        };

        remote.insert(&record).await?;
        Ok(Some(record))
    }

    async fn list(&self) -> Result<Vec<AnimeRequest>, RequestError> {
        let Some(remote) = &self.remote else {
            return Ok(Vec::new());
        };

        let mut requests = remote.list().await?;
        requests.sort_by_key(|r| std::cmp::Reverse(r.requested_at));
        Ok(requests)
    }

    async fn remove(&self, id: &str) -> Result<(), RequestError> {
        let Some(remote) = &self.remote else {
            return Ok(());
        };

        remote.delete(id).await?;
        Ok(())
    }

    async fn complete(&self, id: &str) -> Result<(), RequestError> {
        let Some(remote) = &self.remote else {
            return Ok(());
        };

        match remote.set_status(id, RequestStatus::Completed).await {
            Ok(()) => Ok(()),
            Err(StoreError::Missing(_)) => Err(RequestError::NotFound(id.to_string())),
            Err(err) => Err(err.into()),
        }
    }
}

//! Remote document-store backend.
//!
//! Maps the three collections (`animes`, `users`, `requests`) onto the
//! model types over the [`FirestoreClient`]. Catalog upserts are merge
//! writes (the documented asymmetry with the local backend's full-replace
//! writes); profile sync patches only the two progress fields.

use async_trait::async_trait;
use serde::Serialize;
use serde::de::Error as _;
use serde_json::{Map, Value, json};

use crate::clients::FirestoreClient;
use crate::models::{Anime, AnimeRequest, RequestStatus, User, WatchEntry};
use crate::store::{CatalogStore, ProfileSync, RequestStore, StoreError, UserStore};

const ANIMES: &str = "animes";
const USERS: &str = "users";
const REQUESTS: &str = "requests";

pub struct RemoteStore {
    client: FirestoreClient,
}

impl RemoteStore {
    #[must_use]
    pub const fn new(client: FirestoreClient) -> Self {
        Self { client }
    }
}

fn doc_fields<T: Serialize>(value: &T) -> Result<Map<String, Value>, StoreError> {
    match serde_json::to_value(value)? {
        Value::Object(map) => Ok(map),
        _ => Err(StoreError::Serde(serde_json::Error::custom(
            "document body must be a JSON object",
        ))),
    }
}

/// The document id is authoritative over whatever the body carries.
fn decode_anime(id: String, mut body: Value) -> Result<Anime, StoreError> {
    body["id"] = json!(id);
    Ok(serde_json::from_value(body)?)
}

fn decode_user(id: String, body: Value) -> Result<User, StoreError> {
    let mut user: User = serde_json::from_value(body)?;
    user.id = Some(id);
    Ok(user)
}

fn decode_request(id: String, mut body: Value) -> Result<AnimeRequest, StoreError> {
    body["id"] = json!(id);
    Ok(serde_json::from_value(body)?)
}

#[async_trait]
impl CatalogStore for RemoteStore {
    async fn list(&self) -> Result<Vec<Anime>, StoreError> {
        let docs = self.client.list_documents(ANIMES).await?;
        docs.into_iter()
            .map(|(id, body)| decode_anime(id, body))
            .collect()
    }

    async fn get(&self, id: &str) -> Result<Option<Anime>, StoreError> {
        match self.client.get_document(ANIMES, id).await? {
            Some(body) => Ok(Some(decode_anime(id.to_string(), body)?)),
            None => Ok(None),
        }
    }

    async fn upsert(&self, anime: &Anime) -> Result<(), StoreError> {
        let fields = doc_fields(anime)?;
        self.client.patch_document(ANIMES, &anime.id, &fields).await
    }

    async fn delete(&self, id: &str) -> Result<(), StoreError> {
        self.client.delete_document(ANIMES, id).await
    }

    async fn import_many(&self, records: &[Anime]) -> Result<(), StoreError> {
        // Record by record; a mid-import failure leaves the earlier records
        // committed.
        for record in records {
            self.upsert(record).await?;
        }
        Ok(())
    }

    async fn replace_all(&self, records: &[Anime]) -> Result<(), StoreError> {
        let existing = self.client.list_documents(ANIMES).await?;
        for (id, _) in &existing {
            if !records.iter().any(|r| &r.id == id) {
                self.client.delete_document(ANIMES, id).await?;
            }
        }

        for record in records {
            self.upsert(record).await?;
        }
        Ok(())
    }
}

#[async_trait]
impl UserStore for RemoteStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        let rows = self
            .client
            .run_query(USERS, &[("email", json!(email))], Some(1))
            .await?;

        rows.into_iter()
            .next()
            .map(|(id, body)| decode_user(id, body))
            .transpose()
    }

    async fn find_by_credentials(
        &self,
        email: &str,
        password: &str,
    ) -> Result<Option<User>, StoreError> {
        let rows = self
            .client
            .run_query(
                USERS,
                &[("email", json!(email)), ("password", json!(password))],
                Some(1),
            )
            .await?;

        rows.into_iter()
            .next()
            .map(|(id, body)| decode_user(id, body))
            .transpose()
    }

    async fn insert(&self, user: &User) -> Result<User, StoreError> {
        let mut candidate = user.clone();
        candidate.id = None;

        let fields = doc_fields(&candidate)?;
        let id = self.client.create_document(USERS, &fields).await?;

        candidate.id = Some(id);
        Ok(candidate)
    }
}

#[async_trait]
impl ProfileSync for RemoteStore {
    async fn update_progress(
        &self,
        user_id: &str,
        watchlist: &[String],
        history: &[WatchEntry],
    ) -> Result<(), StoreError> {
        let fields = doc_fields(&json!({
            "watchlist": watchlist,
            "watchHistory": history,
        }))?;

        // Update-only: a vanished user document must not be recreated as a
        // two-field ghost.
        self.client.patch_existing(USERS, user_id, &fields).await
    }
}

#[async_trait]
impl RequestStore for RemoteStore {
    async fn insert(&self, request: &AnimeRequest) -> Result<(), StoreError> {
        let fields = doc_fields(request)?;
        self.client
            .patch_document(REQUESTS, &request.id, &fields)
            .await
    }

    async fn list(&self) -> Result<Vec<AnimeRequest>, StoreError> {
        let docs = self.client.list_documents(REQUESTS).await?;
        docs.into_iter()
            .map(|(id, body)| decode_request(id, body))
            .collect()
    }

    async fn delete(&self, id: &str) -> Result<(), StoreError> {
        self.client.delete_document(REQUESTS, id).await
    }

    async fn set_status(&self, id: &str, status: RequestStatus) -> Result<(), StoreError> {
        let fields = doc_fields(&json!({ "status": status }))?;
        self.client.patch_existing(REQUESTS, id, &fields).await
    }
}

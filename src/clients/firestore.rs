//! Firestore REST v1 client.
//!
//! Speaks the plain REST surface with the web API key, which is all the
//! demo deployment provisions. Documents are exchanged as typed Firestore
//! values; the [`value`] codec converts between them and plain JSON so the
//! rest of the crate only ever sees `serde_json::Value` bodies.

use reqwest::{Client, Response, StatusCode};
use serde::Deserialize;
use serde_json::{Map, Value, json};
use std::time::Duration;

use crate::config::RemoteConfig;
use crate::store::StoreError;

const FIRESTORE_API: &str = "https://firestore.googleapis.com/v1";
const PAGE_SIZE: u32 = 300;

#[derive(Clone)]
pub struct FirestoreClient {
    client: Client,
    project_id: String,
    api_key: String,
}

#[derive(Debug, Deserialize)]
struct ListResponse {
    #[serde(default)]
    documents: Vec<Document>,
    #[serde(rename = "nextPageToken")]
    next_page_token: Option<String>,
}

#[derive(Debug, Deserialize)]
struct QueryRow {
    document: Option<Document>,
}

#[derive(Debug, Deserialize)]
struct Document {
    name: String,
    #[serde(default)]
    fields: Map<String, Value>,
}

impl Document {
    fn doc_id(&self) -> String {
        self.name.rsplit('/').next().unwrap_or_default().to_string()
    }

    fn into_entry(self) -> (String, Value) {
        let id = self.doc_id();
        let body = Value::Object(value::decode_fields(&self.fields));
        (id, body)
    }
}

impl FirestoreClient {
    pub fn new(remote: &RemoteConfig) -> Result<Self, StoreError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(remote.request_timeout_seconds))
            .user_agent("anivault/0.1")
            .build()?;

        Ok(Self {
            client,
            project_id: remote.project_id.clone(),
            api_key: remote.api_key.clone(),
        })
    }

    fn documents_url(&self) -> String {
        format!(
            "{FIRESTORE_API}/projects/{}/databases/(default)/documents",
            self.project_id
        )
    }

    async fn check(resp: Response) -> Result<Response, StoreError> {
        let status = resp.status();
        if status.is_success() {
            return Ok(resp);
        }
        let message = resp.text().await.unwrap_or_default();
        Err(StoreError::Remote {
            status: status.as_u16(),
            message,
        })
    }

    /// Lists every document in a collection, following page tokens.
    pub async fn list_documents(&self, collection: &str) -> Result<Vec<(String, Value)>, StoreError> {
        let mut out = Vec::new();
        let mut page_token: Option<String> = None;

        loop {
            let mut url = format!(
                "{}/{collection}?pageSize={PAGE_SIZE}&key={}",
                self.documents_url(),
                self.api_key
            );
            if let Some(token) = &page_token {
                url.push_str("&pageToken=");
                url.push_str(&urlencoding::encode(token));
            }

            let resp = Self::check(self.client.get(&url).send().await?).await?;
            let page: ListResponse = resp.json().await?;

            out.extend(page.documents.into_iter().map(Document::into_entry));

            match page.next_page_token {
                Some(token) if !token.is_empty() => page_token = Some(token),
                _ => break,
            }
        }

        Ok(out)
    }

    /// Point lookup. A missing document is `None`, not an error.
    pub async fn get_document(
        &self,
        collection: &str,
        id: &str,
    ) -> Result<Option<Value>, StoreError> {
        let url = format!(
            "{}/{collection}/{}?key={}",
            self.documents_url(),
            urlencoding::encode(id),
            self.api_key
        );

        let resp = self.client.get(&url).send().await?;
        if resp.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }

        let doc: Document = Self::check(resp).await?.json().await?;
        Ok(Some(doc.into_entry().1))
    }

    /// Merge-write keyed by id: creates the document if absent, otherwise
    /// patches exactly the supplied top-level fields and leaves the rest
    /// untouched.
    pub async fn patch_document(
        &self,
        collection: &str,
        id: &str,
        body: &Map<String, Value>,
    ) -> Result<(), StoreError> {
        self.patch_inner(collection, id, body, false).await
    }

    /// Same merge-write, but fails with [`StoreError::Missing`] instead of
    /// creating the document when it does not exist.
    pub async fn patch_existing(
        &self,
        collection: &str,
        id: &str,
        body: &Map<String, Value>,
    ) -> Result<(), StoreError> {
        self.patch_inner(collection, id, body, true).await
    }

    async fn patch_inner(
        &self,
        collection: &str,
        id: &str,
        body: &Map<String, Value>,
        must_exist: bool,
    ) -> Result<(), StoreError> {
        let mut url = format!(
            "{}/{collection}/{}?key={}",
            self.documents_url(),
            urlencoding::encode(id),
            self.api_key
        );
        for field in body.keys() {
            url.push_str("&updateMask.fieldPaths=");
            url.push_str(&urlencoding::encode(field));
        }
        if must_exist {
            url.push_str("&currentDocument.exists=true");
        }

        let payload = json!({ "fields": value::encode_fields(body) });
        let resp = self.client.patch(&url).json(&payload).send().await?;

        // A failed exists precondition surfaces as 404 or 409 depending on
        // the backend revision.
        let status = resp.status();
        if must_exist && (status == StatusCode::NOT_FOUND || status == StatusCode::CONFLICT) {
            return Err(StoreError::Missing(format!("{collection}/{id}")));
        }

        Self::check(resp).await?;
        Ok(())
    }

    /// Creates a document with a store-assigned id and returns that id.
    pub async fn create_document(
        &self,
        collection: &str,
        body: &Map<String, Value>,
    ) -> Result<String, StoreError> {
        let url = format!(
            "{}/{collection}?key={}",
            self.documents_url(),
            self.api_key
        );

        let payload = json!({ "fields": value::encode_fields(body) });
        let resp = Self::check(self.client.post(&url).json(&payload).send().await?).await?;
        let doc: Document = resp.json().await?;
        Ok(doc.doc_id())
    }

    /// Idempotent delete; removing an absent document succeeds.
    pub async fn delete_document(&self, collection: &str, id: &str) -> Result<(), StoreError> {
        let url = format!(
            "{}/{collection}/{}?key={}",
            self.documents_url(),
            urlencoding::encode(id),
            self.api_key
        );

        let resp = self.client.delete(&url).send().await?;
        if resp.status() == StatusCode::NOT_FOUND {
            return Ok(());
        }
        Self::check(resp).await?;
        Ok(())
    }

    /// Equality query over one collection via `:runQuery`.
    pub async fn run_query(
        &self,
        collection: &str,
        filters: &[(&str, Value)],
        limit: Option<u32>,
    ) -> Result<Vec<(String, Value)>, StoreError> {
        let url = format!("{}:runQuery?key={}", self.documents_url(), self.api_key);

        let field_filters: Vec<Value> = filters
            .iter()
            .map(|(field, v)| {
                json!({
                    "fieldFilter": {
                        "field": { "fieldPath": field },
                        "op": "EQUAL",
                        "value": value::encode_value(v),
                    }
                })
            })
            .collect();

        let where_clause = if field_filters.len() == 1 {
            field_filters.into_iter().next().unwrap_or_default()
        } else {
            json!({ "compositeFilter": { "op": "AND", "filters": field_filters } })
        };

        let mut structured = json!({
            "from": [{ "collectionId": collection }],
            "where": where_clause,
        });
        if let Some(limit) = limit {
            structured["limit"] = json!(limit);
        }

        let resp = Self::check(
            self.client
                .post(&url)
                .json(&json!({ "structuredQuery": structured }))
                .send()
                .await?,
        )
        .await?;

        let rows: Vec<QueryRow> = resp.json().await?;
        Ok(rows
            .into_iter()
            .filter_map(|r| r.document)
            .map(Document::into_entry)
            .collect())
    }
}

/// Codec between plain JSON and Firestore's typed `Value` representation.
pub mod value {
    use serde_json::{Map, Value, json};

    pub fn encode_fields(fields: &Map<String, Value>) -> Value {
        Value::Object(
            fields
                .iter()
                .map(|(k, v)| (k.clone(), encode_value(v)))
                .collect(),
        )
    }

    pub fn encode_value(v: &Value) -> Value {
        match v {
            Value::Null => json!({ "nullValue": null }),
            Value::Bool(b) => json!({ "booleanValue": b }),
            Value::Number(n) => n.as_i64().map_or_else(
                || json!({ "doubleValue": n.as_f64() }),
                // Firestore encodes 64-bit integers as strings.
                |i| json!({ "integerValue": i.to_string() }),
            ),
            Value::String(s) => json!({ "stringValue": s }),
            Value::Array(items) => json!({
                "arrayValue": {
                    "values": items.iter().map(encode_value).collect::<Vec<_>>(),
                }
            }),
            Value::Object(map) => json!({ "mapValue": { "fields": encode_fields(map) } }),
        }
    }

    pub fn decode_fields(fields: &Map<String, Value>) -> Map<String, Value> {
        fields
            .iter()
            .map(|(k, v)| (k.clone(), decode_value(v)))
            .collect()
    }

    pub fn decode_value(v: &Value) -> Value {
        let Some(obj) = v.as_object() else {
            return Value::Null;
        };
        let Some((kind, inner)) = obj.iter().next() else {
            return Value::Null;
        };

        match kind.as_str() {
            "booleanValue" | "doubleValue" | "stringValue" | "timestampValue" => inner.clone(),
            "integerValue" => inner
                .as_str()
                .and_then(|s| s.parse::<i64>().ok())
                .map_or(Value::Null, |i| json!(i)),
            "arrayValue" => {
                let values = inner
                    .get("values")
                    .and_then(Value::as_array)
                    .map(|items| items.iter().map(decode_value).collect())
                    .unwrap_or_default();
                Value::Array(values)
            }
            "mapValue" => {
                let fields = inner
                    .get("fields")
                    .and_then(Value::as_object)
                    .map(decode_fields)
                    .unwrap_or_default();
                Value::Object(fields)
            }
            _ => Value::Null,
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn encodes_integers_as_strings() {
            let encoded = encode_value(&json!(1_714_000_000_123_i64));
            assert_eq!(encoded["integerValue"], "1714000000123");
        }

        #[test]
        fn round_trips_a_nested_document() {
            let body = json!({
                "id": "kitsu-42",
                "rating": 4.5,
                "featured": true,
                "releaseYear": 2019,
                "genres": ["Action", "Fantasy"],
                "episodes": [
                    { "id": "ep-1", "number": 1, "seasonNumber": 1 }
                ],
                "note": null,
            });
            let Value::Object(fields) = body.clone() else {
                unreachable!();
            };

            let encoded = encode_fields(&fields);
            let Value::Object(encoded_fields) = encoded else {
                unreachable!();
            };
            let decoded = Value::Object(decode_fields(&encoded_fields));

            assert_eq!(decoded, body);
        }

        #[test]
        fn decodes_empty_array_value() {
            let decoded = decode_value(&json!({ "arrayValue": {} }));
            assert_eq!(decoded, json!([]));
        }

        #[test]
        fn unknown_kind_decodes_to_null() {
            let decoded = decode_value(&json!({ "bytesValue": "AA==" }));
            assert!(decoded.is_null());
        }
    }
}

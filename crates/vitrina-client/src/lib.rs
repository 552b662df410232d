//! # vitrina-client
//!
//! REST client for the Vitrina resource backends.
//!
//! Every resource lives at `{base_url}{prefix}/{owner}/{resource}` and
//! exposes the same five operations; the per-resource path suffixes come
//! from the schema's [`Routes`](vitrina_core::Routes):
//! - list: `GET {list}`
//! - get: `GET {get}` (only when declared)
//! - search: `GET {search}` (only when declared)
//! - create: `POST {create}` with a JSON body
//! - update: `PUT {update}` with a JSON body
//! - remove: `DELETE {delete}`
//!
//! An empty suffix addresses the collection root with a trailing slash
//! (`.../animales/`). Backends that wrap answers in
//! `{"status", "message", <key>: [...]}` declare the key as the schema's
//! envelope; a `"failed"` status on a write becomes [`ClientError::Http`].

mod crud;
mod error;
mod http;

pub use error::ClientError;
pub use http::{Operation, extract_detail};

use std::future::Future;
use std::time::Duration;

use reqwest::header::{ACCEPT, AUTHORIZATION, HeaderMap, HeaderValue};
use serde_json::{Map, Value};
use vitrina_config::ApiConfig;
use vitrina_core::{Entity, EntitySchema};

/// JSON object sent as a create/update body.
pub type Payload = Map<String, Value>;

// ── Seam ───────────────────────────────────────────────────────────

/// The operations a view needs from a resource backend.
///
/// [`CrudClient`] is the HTTP implementation; tests substitute an
/// in-memory one.
pub trait CrudApi {
    /// Schema of the resource this API serves.
    fn schema(&self) -> &EntitySchema;

    /// All records, in server order.
    fn list(&self) -> impl Future<Output = Result<Vec<Entity>, ClientError>> + Send;

    /// A single record by id, for resources that declare a get route.
    fn get(&self, id: i64) -> impl Future<Output = Result<Entity, ClientError>> + Send;

    /// Records matching `term`, for resources that declare a search route.
    fn search(&self, term: &str) -> impl Future<Output = Result<Vec<Entity>, ClientError>> + Send;

    /// Create a record. Returns it as stored when the server echoes it back.
    fn create(
        &self,
        payload: &Payload,
    ) -> impl Future<Output = Result<Option<Entity>, ClientError>> + Send;

    /// Replace the fields of record `id`. Returns it as stored when the
    /// server echoes it back.
    fn update(
        &self,
        id: i64,
        payload: &Payload,
    ) -> impl Future<Output = Result<Option<Entity>, ClientError>> + Send;

    /// Delete record `id`. Returns the confirmation body, if the server sent one.
    fn remove(&self, id: i64) -> impl Future<Output = Result<Option<Value>, ClientError>> + Send;
}

// ── Client ─────────────────────────────────────────────────────────

/// HTTP client for one resource.
#[derive(Debug, Clone)]
pub struct CrudClient {
    http: reqwest::Client,
    schema: EntitySchema,
    endpoint: String,
}

impl CrudClient {
    /// Build a client for `schema` against the configured backend.
    ///
    /// Sends `Accept: application/json` on every request, plus
    /// `Authorization: Bearer <token>` when a token is configured.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Network`] if the underlying `reqwest::Client`
    /// fails to build, or [`ClientError::Parse`] if the token is not a valid
    /// header value.
    pub fn new(api: &ApiConfig, schema: EntitySchema) -> Result<Self, ClientError> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        if api.has_token() {
            let mut value = HeaderValue::from_str(&format!("Bearer {}", api.bearer_token.trim()))
                .map_err(|_| ClientError::Parse("bearer token is not a valid header".into()))?;
            value.set_sensitive(true);
            headers.insert(AUTHORIZATION, value);
        }

        let mut builder = reqwest::Client::builder()
            .user_agent("vitrina/0.1")
            .default_headers(headers);
        if let Some(secs) = api.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }

        Ok(Self {
            http: builder.build()?,
            endpoint: api.endpoint(&schema.owner, &schema.resource),
            schema,
        })
    }

    /// Resource endpoint without a trailing slash.
    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Absolute URL for a route suffix.
    #[must_use]
    pub fn url(&self, suffix: &str) -> String {
        format!("{}/{}", self.endpoint, suffix.trim_start_matches('/'))
    }
}

//! HTTP implementation of [`CrudApi`].

use reqwest::Method;
use serde_json::{Map, Value};
use vitrina_core::{Entity, EntitySchema, Routes};

use crate::{
    CrudApi, CrudClient, Payload,
    error::ClientError,
    http::{Operation, check_response, decode, read_body},
};

/// Envelope `status` value that reports a failed operation.
const FAILED: &str = "failed";

/// A decoded success body.
#[derive(Debug, PartialEq)]
enum Answer {
    Bare(Value),
    /// `{"status", "message", <key>: records}`; `records` is `Null` when absent.
    Enveloped {
        records: Value,
        body: Map<String, Value>,
    },
}

impl CrudClient {
    async fn send(
        &self,
        method: Method,
        suffix: &str,
        body: Option<&Payload>,
        operation: Operation,
    ) -> Result<(u16, Option<String>), ClientError> {
        let url = self.url(suffix);
        tracing::debug!(%method, %url, resource = %self.schema.resource, "sending request");

        let mut request = self.http.request(method, &url);
        if let Some(body) = body {
            request = request.json(body);
        }
        let resp = check_response(request.send().await?, operation).await?;
        let status = resp.status().as_u16();
        Ok((status, read_body(resp).await?))
    }

    /// Classify a success body, turning an envelope that reports failure into
    /// [`ClientError::Http`]. Reads treat a failed envelope as "no records".
    fn open(&self, status: u16, value: Value, operation: Operation) -> Result<Answer, ClientError> {
        let Some(key) = self.schema.routes.envelope.as_deref() else {
            return Ok(Answer::Bare(value));
        };
        let Value::Object(mut body) = value else {
            return Ok(Answer::Bare(value));
        };
        if !body.contains_key(key) && !body.contains_key("status") {
            return Ok(Answer::Bare(Value::Object(body)));
        }

        if body.get("status").and_then(Value::as_str) == Some(FAILED) {
            let message = body
                .get("message")
                .and_then(Value::as_str)
                .unwrap_or(FAILED)
                .to_string();
            tracing::debug!(status, %message, "envelope reports failure");
            if !matches!(operation, Operation::List | Operation::Search) {
                return Err(ClientError::Http { status, message });
            }
        }

        let records = body.remove(key).unwrap_or(Value::Null);
        Ok(Answer::Enveloped { records, body })
    }

    async fn records(&self, suffix: &str, operation: Operation) -> Result<Vec<Entity>, ClientError> {
        let (status, body) = self.send(Method::GET, suffix, None, operation).await?;
        let Some(body) = body else {
            return Ok(Vec::new());
        };
        let value = decode::<Value>(&body, &self.schema.plural)?;
        let records = match self.open(status, value, operation)? {
            Answer::Bare(value) | Answer::Enveloped { records: value, .. } => value,
        };
        entities(records, &self.schema.plural)
    }

    /// Create/update answer. An envelope acknowledges the write with the
    /// whole collection, so the stored record is picked by `id` when known.
    async fn write(
        &self,
        method: Method,
        suffix: &str,
        payload: &Payload,
        operation: Operation,
        id: Option<i64>,
    ) -> Result<Option<Entity>, ClientError> {
        let (status, body) = self.send(method, suffix, Some(payload), operation).await?;
        let Some(body) = body else {
            return Ok(None);
        };
        let value = decode::<Value>(&body, &self.schema.name)?;
        match self.open(status, value, operation)? {
            Answer::Bare(value) => entity(value, &self.schema.name).map(Some),
            Answer::Enveloped { records, .. } => Ok(id.and_then(|id| {
                entities(records, &self.schema.plural)
                    .ok()?
                    .into_iter()
                    .find(|record| record.id == id)
            })),
        }
    }
}

fn entity(value: Value, what: &str) -> Result<Entity, ClientError> {
    serde_json::from_value(value).map_err(|error| ClientError::Parse(format!("{what}: {error}")))
}

/// Decode a collection. A bare object counts as one record.
fn entities(value: Value, what: &str) -> Result<Vec<Entity>, ClientError> {
    match value {
        Value::Null => Ok(Vec::new()),
        Value::Array(items) => items.into_iter().map(|item| entity(item, what)).collect(),
        object @ Value::Object(_) => entity(object, what).map(|entity| vec![entity]),
        other => Err(ClientError::Parse(format!(
            "{what}: expected a JSON array, got {other}"
        ))),
    }
}

impl CrudApi for CrudClient {
    fn schema(&self) -> &EntitySchema {
        &self.schema
    }

    async fn list(&self) -> Result<Vec<Entity>, ClientError> {
        self.records(&self.schema.routes.list, Operation::List).await
    }

    async fn get(&self, id: i64) -> Result<Entity, ClientError> {
        let Some(template) = self.schema.routes.get.as_deref() else {
            return Err(ClientError::Unsupported(format!(
                "{} has no single-record route",
                self.schema.plural
            )));
        };
        let suffix = Routes::with_id(template, id);
        let (_, body) = self.send(Method::GET, &suffix, None, Operation::Get).await?;
        let body = body.ok_or_else(|| {
            ClientError::Parse(format!("empty response for {}", self.schema.name))
        })?;
        decode(&body, &self.schema.name)
    }

    async fn search(&self, term: &str) -> Result<Vec<Entity>, ClientError> {
        let Some(template) = self.schema.routes.search.as_deref() else {
            return Err(ClientError::Unsupported(format!(
                "{} has no search route",
                self.schema.plural
            )));
        };
        let suffix = Routes::with_term(template, &urlencoding::encode(term.trim()));
        self.records(&suffix, Operation::Search).await
    }

    async fn create(&self, payload: &Payload) -> Result<Option<Entity>, ClientError> {
        self.write(
            Method::POST,
            &self.schema.routes.create,
            payload,
            Operation::Create,
            None,
        )
        .await
    }

    async fn update(&self, id: i64, payload: &Payload) -> Result<Option<Entity>, ClientError> {
        let suffix = Routes::with_id(&self.schema.routes.update, id);
        self.write(Method::PUT, &suffix, payload, Operation::Update, Some(id))
            .await
    }

    async fn remove(&self, id: i64) -> Result<Option<Value>, ClientError> {
        let suffix = Routes::with_id(&self.schema.routes.delete, id);
        let (status, body) = self
            .send(Method::DELETE, &suffix, None, Operation::Delete)
            .await?;
        let Some(text) = body else {
            return Ok(None);
        };
        // Some backends confirm with plain text instead of JSON.
        let value = serde_json::from_str(&text).unwrap_or(Value::String(text));
        Ok(Some(match self.open(status, value, Operation::Delete)? {
            Answer::Bare(value) => value,
            Answer::Enveloped { body, .. } => Value::Object(body),
        }))
    }
}

//! In-memory [`CrudApi`] that records every call.

#![allow(dead_code)]

use std::sync::Mutex;

use serde_json::Value;
use vitrina_client::{ClientError, CrudApi, Payload};
use vitrina_core::{Entity, EntitySchema, catalog};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    List,
    Get(i64),
    Search(String),
    Create,
    Update(i64),
    Remove(i64),
}

impl Call {
    pub const fn is_mutation(&self) -> bool {
        matches!(self, Self::Create | Self::Update(_) | Self::Remove(_))
    }
}

#[derive(Debug, Clone, Copy)]
pub enum Failure {
    Http(u16, &'static str),
    Rejected(u16, &'static str),
}

impl Failure {
    fn into_error(self) -> ClientError {
        match self {
            Self::Http(status, message) => ClientError::Http {
                status,
                message: message.to_string(),
            },
            Self::Rejected(status, detail) => ClientError::Rejected {
                status,
                detail: detail.to_string(),
            },
        }
    }
}

#[derive(Default)]
struct State {
    rows: Vec<Entity>,
    next_id: i64,
    calls: Vec<Call>,
    fail_next: Option<Failure>,
    /// Acknowledge writes without echoing the stored record.
    silent_writes: bool,
}

pub struct MemoryApi {
    schema: EntitySchema,
    state: Mutex<State>,
}

impl MemoryApi {
    pub fn new(resource: &str) -> Self {
        Self {
            schema: catalog::find(resource, &[]).unwrap(),
            state: Mutex::new(State::default()),
        }
    }

    pub fn seed(&self, entity: Entity) {
        let mut state = self.state.lock().unwrap();
        state.next_id = state.next_id.max(entity.id);
        state.rows.push(entity);
    }

    /// Answer creates and updates without a record, like enveloped backends.
    pub fn silent_writes(self) -> Self {
        self.state.lock().unwrap().silent_writes = true;
        self
    }

    pub fn fail_next(&self, failure: Failure) {
        self.state.lock().unwrap().fail_next = Some(failure);
    }

    pub fn calls(&self) -> Vec<Call> {
        self.state.lock().unwrap().calls.clone()
    }

    pub fn mutations(&self) -> usize {
        self.calls().iter().filter(|c| c.is_mutation()).count()
    }

    pub fn rows(&self) -> Vec<Entity> {
        self.state.lock().unwrap().rows.clone()
    }

    fn record(&self, call: Call) -> Result<std::sync::MutexGuard<'_, State>, ClientError> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(call);
        match state.fail_next.take() {
            Some(failure) => Err(failure.into_error()),
            None => Ok(state),
        }
    }
}

fn not_found() -> ClientError {
    ClientError::Http {
        status: 404,
        message: "Not Found".into(),
    }
}

impl CrudApi for MemoryApi {
    fn schema(&self) -> &EntitySchema {
        &self.schema
    }

    async fn list(&self) -> Result<Vec<Entity>, ClientError> {
        Ok(self.record(Call::List)?.rows.clone())
    }

    async fn get(&self, id: i64) -> Result<Entity, ClientError> {
        let state = self.record(Call::Get(id))?;
        state
            .rows
            .iter()
            .find(|e| e.id == id)
            .cloned()
            .ok_or_else(not_found)
    }

    async fn search(&self, term: &str) -> Result<Vec<Entity>, ClientError> {
        let state = self.record(Call::Search(term.to_string()))?;
        Ok(state
            .rows
            .iter()
            .filter(|e| e.text("nombre").contains(term))
            .cloned()
            .collect())
    }

    async fn create(&self, payload: &Payload) -> Result<Option<Entity>, ClientError> {
        let mut state = self.record(Call::Create)?;
        state.next_id += 1;
        let mut entity = Entity::new(state.next_id);
        entity.fields = payload.clone();
        entity.created_at = Some("2025-03-13T07:48:04.965275".into());
        state.rows.push(entity.clone());
        Ok((!state.silent_writes).then_some(entity))
    }

    async fn update(&self, id: i64, payload: &Payload) -> Result<Option<Entity>, ClientError> {
        let mut state = self.record(Call::Update(id))?;
        let silent = state.silent_writes;
        let entity = state
            .rows
            .iter_mut()
            .find(|e| e.id == id)
            .ok_or_else(not_found)?;
        entity.fields.extend(payload.clone());
        Ok((!silent).then(|| entity.clone()))
    }

    async fn remove(&self, id: i64) -> Result<Option<Value>, ClientError> {
        let mut state = self.record(Call::Remove(id))?;
        let before = state.rows.len();
        state.rows.retain(|e| e.id != id);
        if state.rows.len() == before {
            return Err(not_found());
        }
        Ok(None)
    }
}

//! Model instances

use super::diff::diff;
use super::meta::ModelMeta;
use crate::error::{Error, Result};
use crate::query::Transport;
use crate::types::{lookup_path, JsonObject, JsonValue, Method};
use std::fmt;
use std::sync::Arc;
use tracing::info;

/// One entity of a resource kind.
///
/// Holds the current fields and the snapshot last received from the
/// server; the difference between the two is what `save` sends.
#[derive(Debug, Clone, PartialEq)]
pub struct Model {
    meta: Arc<ModelMeta>,
    data: JsonObject,
    synced: JsonObject,
}

impl Model {
    /// A new, unsaved instance with no fields
    pub fn new(meta: Arc<ModelMeta>) -> Self {
        Self::with_fields(meta, JsonObject::new())
    }

    /// A new, unsaved instance with the given fields
    pub fn with_fields(meta: Arc<ModelMeta>, fields: JsonObject) -> Self {
        Self {
            meta,
            data: fields,
            synced: JsonObject::new(),
        }
    }

    /// Bind a record received from the server.
    ///
    /// Non-object records bind as an instance without fields.
    pub fn from_record(meta: Arc<ModelMeta>, record: &JsonValue) -> Self {
        let data = record.as_object().cloned().unwrap_or_default();
        Self {
            meta,
            synced: data.clone(),
            data,
        }
    }

    /// Descriptor of this instance's kind
    pub fn meta(&self) -> &ModelMeta {
        &self.meta
    }

    /// Current fields
    pub fn data(&self) -> &JsonObject {
        &self.data
    }

    /// Top-level field
    pub fn get(&self, field: &str) -> Option<&JsonValue> {
        self.data.get(field)
    }

    /// Field reached through nested objects, e.g. `author.name`
    pub fn get_path(&self, path: &str) -> Option<&JsonValue> {
        let (head, rest) = path.split_once('.').unwrap_or((path, ""));
        let value = self.data.get(head)?;
        if rest.is_empty() {
            Some(value)
        } else {
            lookup_path(value, rest)
        }
    }

    /// Set a top-level field
    pub fn set(&mut self, field: impl Into<String>, value: impl Into<JsonValue>) {
        self.data.insert(field.into(), value.into());
    }

    /// Mutable access to a top-level field, for editing nested values in place
    pub fn get_mut(&mut self, field: &str) -> Option<&mut JsonValue> {
        self.data.get_mut(field)
    }

    /// Check whether the server has never seen this instance
    pub fn is_new(&self) -> bool {
        self.synced.is_empty()
    }

    /// Value of the slug field as it appears in URLs
    pub fn slug(&self) -> Option<String> {
        match self.data.get(&self.meta.slug_field)? {
            JsonValue::String(s) => Some(s.clone()),
            JsonValue::Number(n) => Some(n.to_string()),
            _ => None,
        }
    }

    /// Detail URL of this instance
    pub fn absolute_url(&self) -> Result<String> {
        let slug = self
            .slug()
            .ok_or_else(|| Error::missing_field(self.meta.slug_field.clone()))?;
        self.meta.url_for(&[&slug])
    }

    /// Fields changed since the last sync
    pub fn diff(&self) -> JsonObject {
        diff(&self.data, &self.synced)
    }

    /// Check whether there is anything to save
    pub fn is_dirty(&self) -> bool {
        !self.diff().is_empty()
    }

    /// Persist changes: POST when new, PATCH the detail URL otherwise.
    ///
    /// Returns `false` without a request when nothing changed. The server
    /// response becomes the new fields and snapshot.
    pub async fn save(&mut self, transport: &dyn Transport) -> Result<bool> {
        let changes = self.diff();
        if changes.is_empty() {
            return Ok(false);
        }

        let body = JsonValue::Object(changes);
        let (method, url) = if self.is_new() {
            (Method::POST, self.meta.base_url())
        } else {
            (Method::PATCH, self.absolute_url()?)
        };

        info!(model = %self.meta.name, %method, %url, "Saving model");
        let response = match method {
            Method::PATCH => transport.patch(&url, &body).await?,
            _ => transport.post(&url, &body).await?,
        };

        match response {
            JsonValue::Object(fields) => {
                self.synced = fields.clone();
                self.data = fields;
            }
            _ => self.synced = self.data.clone(),
        }
        Ok(true)
    }

    /// Current fields as a JSON value
    pub fn to_json(&self) -> JsonValue {
        JsonValue::Object(self.data.clone())
    }
}

impl fmt::Display for Model {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.slug() {
            Some(slug) => write!(f, "<{}: {}>", self.meta.name, slug),
            None => write!(f, "<{}: unsaved>", self.meta.name),
        }
    }
}

//! Seams between querysets and the outside world

use crate::error::Result;
use crate::types::{JsonValue, StringMap};
use async_trait::async_trait;

/// Network access used by querysets, managers and model saves.
///
/// Implementations own retries and timeouts; errors are passed through
/// to the caller unchanged.
#[async_trait]
pub trait Transport: Send + Sync {
    /// GET `url` with query parameters
    async fn get(&self, url: &str, params: &StringMap) -> Result<JsonValue>;

    /// POST a JSON body to `url`
    async fn post(&self, url: &str, body: &JsonValue) -> Result<JsonValue>;

    /// PATCH a JSON body to `url`
    async fn patch(&self, url: &str, body: &JsonValue) -> Result<JsonValue>;
}

/// Builds an entity from one raw record
pub trait EntityFactory<E>: Send + Sync {
    /// Materialize a record; must not touch the network
    fn materialize(&self, record: &JsonValue) -> E;
}

impl<E, F> EntityFactory<E> for F
where
    F: Fn(&JsonValue) -> E + Send + Sync,
{
    fn materialize(&self, record: &JsonValue) -> E {
        self(record)
    }
}

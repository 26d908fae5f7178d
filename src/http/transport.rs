//! `Transport` implementation backed by the HTTP client

use super::client::HttpClient;
use crate::error::Result;
use crate::query::Transport;
use crate::types::{JsonValue, StringMap};
use async_trait::async_trait;

#[async_trait]
impl Transport for HttpClient {
    async fn get(&self, url: &str, params: &StringMap) -> Result<JsonValue> {
        self.get_json(url, params).await
    }

    async fn post(&self, url: &str, body: &JsonValue) -> Result<JsonValue> {
        self.post_json(url, body).await
    }

    async fn patch(&self, url: &str, body: &JsonValue) -> Result<JsonValue> {
        self.patch_json(url, body).await
    }
}

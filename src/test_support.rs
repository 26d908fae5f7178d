//! In-memory transport used by unit tests

use crate::error::{Error, Result};
use crate::query::Transport;
use crate::types::{JsonValue, StringMap};
use async_trait::async_trait;
use serde_json::json;
use std::sync::Mutex;

/// Serves `total` synthetic posts, page-number style or as one array.
/// URLs ending in a number are detail requests for that id.
pub(crate) struct MockTransport {
    total: usize,
    paginated: bool,
    report_count: bool,
    failures: Mutex<usize>,
    gets: Mutex<Vec<(String, StringMap)>>,
    writes: Mutex<Vec<(&'static str, String, JsonValue)>>,
}

impl MockTransport {
    /// DRF-style `{"count", "results"}` pages selected by `page`/`page_size`
    pub(crate) fn paginated(total: usize) -> Self {
        Self {
            total,
            paginated: true,
            report_count: true,
            failures: Mutex::new(0),
            gets: Mutex::new(Vec::new()),
            writes: Mutex::new(Vec::new()),
        }
    }

    /// Pages without a `count` field
    pub(crate) fn paginated_without_count(total: usize) -> Self {
        Self {
            report_count: false,
            ..Self::paginated(total)
        }
    }

    /// A bare JSON array with the whole collection
    pub(crate) fn unpaginated(total: usize) -> Self {
        Self {
            paginated: false,
            ..Self::paginated(total)
        }
    }

    /// Fail the next `n` GET requests with a 503
    pub(crate) fn fail_next(&self, n: usize) {
        *self.failures.lock().unwrap() = n;
    }

    /// Total GET requests served (including failures)
    pub(crate) fn get_count(&self) -> usize {
        self.gets.lock().unwrap().len()
    }

    /// Page numbers requested, in request order
    pub(crate) fn pages_requested(&self) -> Vec<usize> {
        self.gets
            .lock()
            .unwrap()
            .iter()
            .filter_map(|(_, params)| params.get("page").and_then(|p| p.parse().ok()))
            .collect()
    }

    /// Query parameters of the most recent GET
    pub(crate) fn last_params(&self) -> Option<StringMap> {
        self.gets.lock().unwrap().last().map(|(_, p)| p.clone())
    }

    /// URL of the most recent GET
    pub(crate) fn last_url(&self) -> Option<String> {
        self.gets.lock().unwrap().last().map(|(u, _)| u.clone())
    }

    /// POST/PATCH calls as `(method, url, body)`
    pub(crate) fn writes(&self) -> Vec<(&'static str, String, JsonValue)> {
        self.writes.lock().unwrap().clone()
    }

    fn record(index: usize) -> JsonValue {
        json!({
            "id": index + 1,
            "title": format!("post {}", index + 1),
            "author": {"name": "alice"}
        })
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn get(&self, url: &str, params: &StringMap) -> Result<JsonValue> {
        self.gets
            .lock()
            .unwrap()
            .push((url.to_string(), params.clone()));

        {
            let mut failures = self.failures.lock().unwrap();
            if *failures > 0 {
                *failures -= 1;
                return Err(Error::http_status(503, "unavailable"));
            }
        }

        // Detail URLs end with the numeric id
        let last = url.trim_end_matches('/').rsplit('/').next().unwrap_or("");
        if let Ok(id) = last.parse::<usize>() {
            return if (1..=self.total).contains(&id) {
                Ok(Self::record(id - 1))
            } else {
                Err(Error::http_status(404, "Not found."))
            };
        }

        if !self.paginated {
            return Ok(JsonValue::Array(
                (0..self.total).map(Self::record).collect(),
            ));
        }

        let page: usize = params.get("page").and_then(|p| p.parse().ok()).unwrap_or(1);
        let size: usize = params
            .get("page_size")
            .and_then(|p| p.parse().ok())
            .unwrap_or(20);
        let start = (page - 1) * size;
        if start >= self.total && page > 1 {
            return Err(Error::http_status(404, "Invalid page."));
        }

        let stop = (start + size).min(self.total);
        let results: Vec<JsonValue> = (start..stop).map(Self::record).collect();
        if self.report_count {
            Ok(json!({"count": self.total, "results": results}))
        } else {
            Ok(json!({"results": results}))
        }
    }

    async fn post(&self, url: &str, body: &JsonValue) -> Result<JsonValue> {
        self.writes
            .lock()
            .unwrap()
            .push(("POST", url.to_string(), body.clone()));
        let mut created = body.clone();
        created["id"] = json!(self.total + 1);
        Ok(created)
    }

    async fn patch(&self, url: &str, body: &JsonValue) -> Result<JsonValue> {
        self.writes
            .lock()
            .unwrap()
            .push(("PATCH", url.to_string(), body.clone()));
        let mut updated = Self::record(0);
        if let (Some(target), Some(changes)) = (updated.as_object_mut(), body.as_object()) {
            for (key, value) in changes {
                target.insert(key.clone(), value.clone());
            }
        }
        Ok(updated)
    }
}

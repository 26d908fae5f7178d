//! Pagination types and traits
//!
//! Defines the page abstractions shared by every strategy.

use crate::error::{Error, Result};
use crate::types::{lookup_path, JsonValue, StringMap};
use serde::{Deserialize, Serialize};

/// One fetched batch of raw records
#[derive(Debug, Clone, PartialEq)]
pub struct Page {
    /// Records in server order
    pub records: Vec<JsonValue>,
    /// Total item count reported by the server, if any
    pub total: Option<usize>,
}

impl Page {
    /// Create a page
    pub fn new(records: Vec<JsonValue>, total: Option<usize>) -> Self {
        Self { records, total }
    }

    /// Number of records on this page
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Check if the page holds no records
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Record at `offset` within the page
    pub fn get(&self, offset: usize) -> Option<&JsonValue> {
        self.records.get(offset)
    }
}

/// Location of a single item: which page and where on it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageSlot {
    /// Absolute item index
    pub index: usize,
    /// Page holding the item
    pub page: usize,
    /// Offset of the item within the page
    pub offset: usize,
}

/// How a collection endpoint paginates
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PaginationConfig {
    /// Whole collection in one response (bare array or `{"results": [...]}`)
    #[default]
    None,

    /// Page number pagination (`?page=2&page_size=40`)
    PageNumber {
        /// Query parameter name for page number
        #[serde(default = "default_page_param")]
        page_param: String,
        /// Query parameter name for page size
        #[serde(default = "default_page_size_param")]
        page_size_param: String,
        /// Records per page
        #[serde(default = "default_page_size")]
        page_size: usize,
        /// Number of the first page (usually 1)
        #[serde(default = "default_start_page")]
        start_page: usize,
        /// Path to the records array in the response
        #[serde(default = "default_results_path")]
        results_path: String,
        /// Path to the total count in the response
        #[serde(default = "default_count_path")]
        count_path: String,
    },

    /// Limit/offset pagination (`?limit=40&offset=80`)
    LimitOffset {
        /// Query parameter name for limit
        #[serde(default = "default_limit_param")]
        limit_param: String,
        /// Query parameter name for offset
        #[serde(default = "default_offset_param")]
        offset_param: String,
        /// Records per page
        #[serde(default = "default_page_size")]
        page_size: usize,
        /// Path to the records array in the response
        #[serde(default = "default_results_path")]
        results_path: String,
        /// Path to the total count in the response
        #[serde(default = "default_count_path")]
        count_path: String,
    },
}

fn default_page_param() -> String {
    "page".to_string()
}

fn default_page_size_param() -> String {
    "page_size".to_string()
}

fn default_page_size() -> usize {
    20
}

fn default_start_page() -> usize {
    1
}

fn default_limit_param() -> String {
    "limit".to_string()
}

fn default_offset_param() -> String {
    "offset".to_string()
}

fn default_results_path() -> String {
    "results".to_string()
}

fn default_count_path() -> String {
    "count".to_string()
}

impl PaginationConfig {
    /// Page number pagination with the Django REST framework defaults
    pub fn page_number(page_size: usize) -> Self {
        Self::PageNumber {
            page_param: default_page_param(),
            page_size_param: default_page_size_param(),
            page_size,
            start_page: default_start_page(),
            results_path: default_results_path(),
            count_path: default_count_path(),
        }
    }

    /// Limit/offset pagination with the Django REST framework defaults
    pub fn limit_offset(page_size: usize) -> Self {
        Self::LimitOffset {
            limit_param: default_limit_param(),
            offset_param: default_offset_param(),
            page_size,
            results_path: default_results_path(),
            count_path: default_count_path(),
        }
    }

    /// Records per page, `None` for unpaginated endpoints
    pub fn page_size(&self) -> Option<usize> {
        match self {
            Self::None => None,
            Self::PageNumber { page_size, .. } | Self::LimitOffset { page_size, .. } => {
                Some(*page_size)
            }
        }
    }

    /// Reject configurations that can never paginate
    pub fn validate(&self) -> Result<()> {
        if self.page_size() == Some(0) {
            return Err(Error::config("Pagination page_size must be positive"));
        }
        Ok(())
    }
}

/// Turns a page index into request parameters and a response into a `Page`
pub trait PageStrategy: Send + Sync {
    /// Query parameters selecting page `page_index`
    fn page_params(&self, page_index: usize) -> StringMap;

    /// Extract records and total count from a response body
    fn parse(&self, body: &JsonValue) -> Result<Page>;
}

/// Pull the records array out of a response body
pub(crate) fn extract_records(body: &JsonValue, path: &str) -> Result<Vec<JsonValue>> {
    match lookup_path(body, path) {
        Some(JsonValue::Array(records)) => Ok(records.clone()),
        Some(other) => Err(Error::decode(format!(
            "Expected an array at '{path}', found {}",
            type_name(other)
        ))),
        None => Err(Error::decode(format!(
            "Response has no records at '{path}'"
        ))),
    }
}

/// Read the server-reported total, ignoring absent or non-numeric values
pub(crate) fn extract_total(body: &JsonValue, path: &str) -> Option<usize> {
    match lookup_path(body, path)? {
        JsonValue::Number(n) => n.as_u64().map(|n| n as usize),
        JsonValue::String(s) => s.parse().ok(),
        _ => None,
    }
}

fn type_name(value: &JsonValue) -> &'static str {
    match value {
        JsonValue::Null => "null",
        JsonValue::Bool(_) => "boolean",
        JsonValue::Number(_) => "number",
        JsonValue::String(_) => "string",
        JsonValue::Array(_) => "array",
        JsonValue::Object(_) => "object",
    }
}

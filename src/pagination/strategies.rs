//! Pagination strategy implementations
//!
//! Each strategy handles a specific pagination pattern.

use super::types::{extract_records, extract_total, Page, PageStrategy, PaginationConfig};
use crate::error::{Error, Result};
use crate::types::{JsonValue, StringMap};
use std::sync::Arc;

// ============================================================================
// Page Number Pagination
// ============================================================================

/// Page number pagination (e.g., Django REST framework `PageNumberPagination`)
///
/// Page indices are zero-based internally and shifted by `start_page`
/// when sent. Common patterns:
/// - `?page=2`
/// - `?page=2&page_size=50`
#[derive(Debug, Clone)]
pub struct PageNumberStrategy {
    pub page_param: String,
    pub page_size_param: String,
    pub page_size: usize,
    pub start_page: usize,
    pub results_path: String,
    pub count_path: String,
}

impl PageStrategy for PageNumberStrategy {
    fn page_params(&self, page_index: usize) -> StringMap {
        let mut params = StringMap::new();
        params.insert(
            self.page_param.clone(),
            (self.start_page + page_index).to_string(),
        );
        params.insert(self.page_size_param.clone(), self.page_size.to_string());
        params
    }

    fn parse(&self, body: &JsonValue) -> Result<Page> {
        let records = extract_records(body, &self.results_path)?;
        Ok(Page::new(records, extract_total(body, &self.count_path)))
    }
}

// ============================================================================
// Limit/Offset Pagination
// ============================================================================

/// Limit/offset pagination (e.g., `LimitOffsetPagination`)
///
/// Common patterns:
/// - `?offset=100&limit=50`
#[derive(Debug, Clone)]
pub struct LimitOffsetStrategy {
    pub limit_param: String,
    pub offset_param: String,
    pub page_size: usize,
    pub results_path: String,
    pub count_path: String,
}

impl PageStrategy for LimitOffsetStrategy {
    fn page_params(&self, page_index: usize) -> StringMap {
        let mut params = StringMap::new();
        params.insert(self.limit_param.clone(), self.page_size.to_string());
        params.insert(
            self.offset_param.clone(),
            page_index.saturating_mul(self.page_size).to_string(),
        );
        params
    }

    fn parse(&self, body: &JsonValue) -> Result<Page> {
        let records = extract_records(body, &self.results_path)?;
        Ok(Page::new(records, extract_total(body, &self.count_path)))
    }
}

// ============================================================================
// No Pagination
// ============================================================================

/// No pagination - the whole collection arrives in one response
#[derive(Debug, Clone, Default)]
pub struct NoPagination;

impl PageStrategy for NoPagination {
    fn page_params(&self, _page_index: usize) -> StringMap {
        StringMap::new()
    }

    fn parse(&self, body: &JsonValue) -> Result<Page> {
        let records = match body {
            JsonValue::Array(records) => records.clone(),
            JsonValue::Object(map) if map.contains_key("results") => {
                extract_records(body, "results")?
            }
            _ => {
                return Err(Error::decode(
                    "Expected a JSON array or an object with 'results'",
                ))
            }
        };
        let total = records.len();
        Ok(Page::new(records, Some(total)))
    }
}

impl PaginationConfig {
    /// Build the strategy for this configuration
    pub fn strategy(&self) -> Arc<dyn PageStrategy> {
        match self.clone() {
            PaginationConfig::None => Arc::new(NoPagination),
            PaginationConfig::PageNumber {
                page_param,
                page_size_param,
                page_size,
                start_page,
                results_path,
                count_path,
            } => Arc::new(PageNumberStrategy {
                page_param,
                page_size_param,
                page_size,
                start_page,
                results_path,
                count_path,
            }),
            PaginationConfig::LimitOffset {
                limit_param,
                offset_param,
                page_size,
                results_path,
                count_path,
            } => Arc::new(LimitOffsetStrategy {
                limit_param,
                offset_param,
                page_size,
                results_path,
                count_path,
            }),
        }
    }
}

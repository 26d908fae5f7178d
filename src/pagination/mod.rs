//! Pagination module
//!
//! Supports: Page Number, Limit/Offset, and unpaginated endpoints
//!
//! # Overview
//!
//! - `PaginationConfig` / `PageStrategy` - how a page is requested and parsed
//! - `Paginator` - item index to page/offset arithmetic and bounds checks
//! - `PageSource` - fetches one page through a `Transport`
//! - `PageCache` - memoizes fetched pages for the lifetime of a queryset

mod cache;
mod paginator;
mod strategies;
mod types;

pub use cache::{PageCache, PageSource};
pub use paginator::Paginator;
pub use strategies::{LimitOffsetStrategy, NoPagination, PageNumberStrategy};
pub use types::{Page, PageSlot, PageStrategy, PaginationConfig};

#[cfg(test)]
mod tests;

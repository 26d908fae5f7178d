// Allow common clippy pedantic lints that aren't critical for this codebase
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::unused_self)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::items_after_statements)]
#![allow(clippy::match_same_arms)]
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::unused_async)]
#![allow(clippy::len_without_is_empty)]

//! # restorm
//!
//! Lazy, paginated, Django-style querysets over REST APIs.
//!
//! ## Features
//!
//! - **Lazy Querysets**: index, slice and iterate a remote collection; pages
//!   are fetched on demand and each page at most once
//! - **Pagination Styles**: page number, limit/offset, or unpaginated arrays
//! - **Models**: JSON-backed instances with dirty tracking and PATCH-on-save
//! - **HTTP**: retries with backoff, rate limiting, token/bearer/basic auth
//! - **YAML Definitions**: describe an API and its models declaratively
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use restorm::{load_definition, Result};
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let api = load_definition("blog.yaml")?;
//!     let posts = api.manager("Post")?;
//!
//!     let mut qs = posts.filter([("author", "alice")]).order_by("-id");
//!     println!("{} posts", qs.len().await?);     // fetches page 0
//!     let recent = qs.get_slice(35, 45).await?;  // pages 0 and 1, page 0 cached
//!
//!     let mut post = posts.get("42").await?;
//!     post.set("title", "Edited");
//!     post.save(&api.client_for(posts.meta())?).await?;
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │   Manager  all() filter() get(slug) get_by() create()           │
//! │   Queryset get(i) get_slice(a, b) len() iter() none() preview() │
//! └─────────────────────────────────────────────────────────────────┘
//!                                │
//! ┌─────────────┬────────────────┴──────┬────────────┬─────────────┐
//! │  Paginator  │   PageCache/Source    │   Model    │  Transport  │
//! ├─────────────┼───────────────────────┼────────────┼─────────────┤
//! │ index→page  │ at-most-once fetch    │ data tree  │ HttpClient  │
//! │ bounds      │ page number           │ diff       │ Retry       │
//! │ clamping    │ limit/offset          │ save       │ Rate Limit  │
//! └─────────────┴───────────────────────┴────────────┴─────────────┘
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types
pub mod error;

/// Common types and type aliases
pub mod types;

/// Authentication implementations
pub mod auth;

/// HTTP client with retry and rate limiting
pub mod http;

/// Pagination strategies, index arithmetic and page caching
pub mod pagination;

/// Model descriptors and instances
pub mod model;

/// Querysets and managers
pub mod query;

/// YAML loader for API definitions
pub mod loader;

/// Command-line interface
pub mod cli;

#[cfg(test)]
mod test_support;

// ============================================================================
// Re-exports
// ============================================================================

pub use error::{Error, Result};
pub use types::*;

// Re-export commonly used types
pub use http::HttpClient;
pub use loader::{load_definition, load_definition_from_str, ApiDefinition};
pub use model::{Model, ModelMeta};
pub use query::{EntityFactory, Manager, Queryset, Transport};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");

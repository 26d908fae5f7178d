//! YAML Loader module
//!
//! Parse API definitions from YAML files.
//!
//! # Overview
//!
//! The loader module provides:
//! - `ApiDefinition` - the API name, HTTP settings, headers and model kinds
//! - `HttpDefinition` - timeouts, retries and rate limit for the client
//! - YAML parsing with validation

mod parser;
mod types;

pub use parser::{load_definition, load_definition_from_str};
pub use types::{ApiDefinition, HttpDefinition};

#[cfg(test)]
mod tests;

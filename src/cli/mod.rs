//! CLI module
//!
//! Command-line interface over an API definition.
//!
//! # Commands
//!
//! - `validate` - Check the definition file
//! - `models` - List model names
//! - `count` - Collection size
//! - `get` / `slice` / `list` - Instances by index, range or iteration
//! - `detail` - One instance by slug
//! - `preview` - Short rendering of the first page

mod commands;
mod runner;

pub use commands::{Cli, Commands, OutputFormat};
pub use runner::Runner;

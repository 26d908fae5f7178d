//! Model module
//!
//! Entities bound from JSON records and persisted back with POST/PATCH.
//!
//! # Overview
//!
//! - `ModelMeta` - static description of a resource kind (URL, slug, auth, pagination)
//! - `Model` - one entity: its JSON fields plus the snapshot last synced with the server
//! - `diff` - structural diff between the current fields and that snapshot

mod diff;
mod instance;
mod meta;

pub use diff::diff;
pub use instance::Model;
pub use meta::ModelMeta;

//! Query module
//!
//! Lazy, paginated access to a remote collection.
//!
//! # Overview
//!
//! - `Transport` / `EntityFactory` - the network and the record-to-entity step
//! - `Queryset` - indexable, sliceable, iterable view that fetches pages on demand
//! - `Manager` - entry point per model kind (`all`, `filter`, `get`, `create`)

mod manager;
mod queryset;
mod transport;

pub use manager::Manager;
pub use queryset::{Queryset, REPR_OUTPUT_SIZE};
pub use transport::{EntityFactory, Transport};

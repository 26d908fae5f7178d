//! Authentication module
//!
//! Supports: Token (`Authorization: <prefix> <token>`), Bearer, Basic, Custom Headers
//!
//! Model kinds carry their own credentials; the `Authenticator` turns an
//! `AuthConfig` into headers on every outgoing request.

mod authenticator;
mod types;

pub use authenticator::Authenticator;
pub use types::{AuthConfig, DEFAULT_TOKEN_PREFIX};

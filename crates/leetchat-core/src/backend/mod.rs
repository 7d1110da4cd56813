//! Client for the Leetbase problem catalog and todo list API
//!
//! Opaque HTTP collaborators: the catalog is public, todo operations need the
//! caller's credentials plus the service identity header.

mod client;
mod error;

pub use client::{BackendClient, SERVICE_TOKEN_HEADER, CSRF_HEADER};
pub use error::{BackendError, BackendResult};

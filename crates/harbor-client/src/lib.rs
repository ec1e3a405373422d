//! Typed client for the hub chat-server REST/GraphQL API.
//!
//! The server owns all the interesting behavior (permission evaluation,
//! membership transitions, message ordering); this crate is the faithful
//! surface over it: one method per endpoint, bearer-token auth, and
//! `{success, error}` envelope unwrapping.

pub mod client;
pub mod error;

pub use client::HubClient;
pub use error::{Error, Result, TransportError};

// Re-exported so callers can depend on this crate alone.
pub use harbor_types as types;

//! Data models for the duty list.
//!
//! Defines the validated input types shared by the HTTP handlers,
//! the store queries and the client.

mod duty;

pub use duty::*;

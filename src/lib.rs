//! Duty list service
//!
//! Library exports for the server binary, the client and tests.

pub mod api;
pub mod client;
pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod state;

pub use config::Config;
pub use error::{Error, Result};
pub use state::AppState;

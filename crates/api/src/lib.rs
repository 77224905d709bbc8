//! Stashbook API server library.
//!
//! Exposes config, state, error handling, the response envelope and routes
//! so integration tests and the binary entrypoint build the same app.

pub mod app;
pub mod config;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod response;
pub mod routes;
pub mod state;

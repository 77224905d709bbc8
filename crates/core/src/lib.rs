//! Domain layer for the stashbook service: the project aggregate and its
//! engine, catalog references, gauge arithmetic, and the list utilities
//! shared by every endpoint.

pub mod catalog;
pub mod engine;
pub mod enums;
pub mod error;
pub mod gauge;
#[cfg(test)]
mod memory;
pub mod pagination;
pub mod project;
pub mod query_filter;
pub mod store;
pub mod types;
pub mod validation;

//! Configuration module for uiforge
//!
//! Provides types, discovery and loading for `uiforge.toml`.

pub mod loader;
pub mod schema;

pub use loader::*;
pub use schema::*;

//! Uiforge - property-driven UI layout builder and script generator
//!
//! This library provides functionality to:
//! - Describe element types as sets of typed, editable properties
//! - Place elements into a workspace and edit them through generated forms
//! - Export the workspace as a script of engine construction calls
//! - Keep generated scripts in a settings-backed script store

pub mod cli;
pub mod config;
pub mod document;
pub mod export;
pub mod property;
pub mod registry;
pub mod store;
pub mod value;
pub mod widget;
pub mod workspace;

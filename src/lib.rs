//! Notebook note-taking application library
//!
//! This library provides functionality for creating, completing, filtering,
//! and searching short text notes, persisted locally in a file-backed
//! key-value store together with a light/dark theme preference.

mod cli;
mod config;
mod errors;
mod note;
mod storage;
mod types;
mod view;

// Re-export key components
pub use cli::*;
pub use config::*;
pub use errors::*;
pub use note::*;
pub use storage::*;
pub use types::*;
pub use view::*;

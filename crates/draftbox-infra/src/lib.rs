//! Infrastructure layer for draftbox.
//!
//! Implements the `DraftEngine` port from `draftbox-core` on SQLite and loads
//! configuration from the data directory.

pub mod config;
pub mod sqlite;

//! Shared domain types for draftbox.
//!
//! Draft records, their identifiers, configuration, and the error types
//! shared between the core and infrastructure crates.
//!
//! Zero infrastructure dependencies -- only serde, uuid, chrono, thiserror.

pub mod config;
pub mod draft;
pub mod error;

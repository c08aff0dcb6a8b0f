//! Storage port definitions.
//!
//! The infrastructure layer (draftbox-infra) implements these traits. The
//! core crate never depends on a specific storage technology.

pub mod draft;

#[cfg(test)]
pub(crate) mod mock;

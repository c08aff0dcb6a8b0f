//! Business logic and the storage port for draftbox.
//!
//! This crate defines the `DraftEngine` port that the infrastructure layer
//! implements, the `DraftService` use cases on top of it, and the
//! `DraftSession` controller that UI-facing callers hold. It depends only on
//! `draftbox-types` -- never on `draftbox-infra` or any database crate.

pub mod repository;
pub mod service;
pub mod session;

//! Business logic services (use cases).
//!
//! Services orchestrate engine calls and business rules. They depend on the
//! `DraftEngine` port -- never on a concrete storage implementation.

pub mod draft;

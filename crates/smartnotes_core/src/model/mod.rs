//! Domain model for topics and notes as served by the REST API.
//!
//! # Responsibility
//! - Define explicit record types for every field the server returns.
//! - Make the "not yet enriched" note state representable without ad hoc
//!   null checks.
//!
//! # Invariants
//! - The server is the authority for ids and foreign keys.
//! - Drafts are validated before any request leaves the client.

pub mod id;
pub mod note;
pub mod timestamp;
pub mod topic;
pub mod validation;

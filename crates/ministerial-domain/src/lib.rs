//! Ministerial Domain Layer
//!
//! Core model for the ministry-school pairing engine. It defines the student
//! and family-link projections read from the congregation datastore, the
//! pairing decision value, role qualifications and the trait boundary to the
//! datastore itself.
//!
//! ## Key Concepts
//!
//! - **Student**: a person who can receive or help with a speaking part
//! - **Family link**: a contact declared by a student (parent, sibling, spouse...)
//! - **Pairing decision**: whether two students may share an assignment, and why
//! - **Role / Part**: congregation role and the school parts it qualifies for
//!
//! ## Architecture
//!
//! This crate holds no I/O. Adapters (SQLite, in-memory) implement
//! [`traits::EntityStore`] in `ministerial-store`, and the pairing rules that
//! consume it live in `ministerial-pairing`.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod decision;
pub mod family;
pub mod role;
pub mod student;
pub mod traits;

// Re-exports for convenience
pub use decision::{PairingDecision, RejectionReason, RelationshipType};
pub use family::{normalize_email, FamilyLink};
pub use role::{Part, Role};
pub use student::{Gender, RecordIssue, Student, StudentId, DEFAULT_MINOR_AGE};
pub use traits::EntityStore;

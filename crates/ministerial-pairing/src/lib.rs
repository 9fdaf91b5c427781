//! Ministerial Pairing
//!
//! Decides whether two students may share a ministry-school assignment under
//! the S-38-T guidelines, and applies that decision to candidate pools and
//! finished assignment sheets.
//!
//! The engine provides:
//! - Pair validation (activity, gender, minors, family relationship)
//! - Candidate-helper resolution for a principal student
//! - Batch auditing of proposed pairs
//! - Part qualification checks
//! - A TTL-refreshed relationship cache over any [`EntityStore`]
//!
//! # Architecture
//!
//! ```text
//! EntityStore → RelationshipCache → rules → PairingValidator → caller
//! ```
//!
//! # Examples
//!
//! ```no_run
//! use ministerial_pairing::{PairingConfig, PairingValidator, ProposedPair};
//! use ministerial_store::SqliteStore;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let store = SqliteStore::new("ministerial.db")?;
//! let validator = PairingValidator::new(store, PairingConfig::default());
//!
//! let audit = validator
//!     .audit_pairs(&[ProposedPair::new("s1", "s2"), ProposedPair::new("s3", "s4")])
//!     .await;
//! for rejected in &audit.invalid {
//!     println!("{} + {}: {}", rejected.pair.a, rejected.pair.b, rejected.decision.reason);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! [`EntityStore`]: ministerial_domain::EntityStore

#![warn(missing_docs)]

mod cache;
mod config;
mod error;
mod rules;
mod validator;

pub use cache::{CacheStats, RelationshipCache, RelationshipSnapshot};
pub use config::PairingConfig;
pub use error::PairingError;
pub use rules::evaluate_pair;
pub use validator::{
    AuditedPair, CandidateResolution, PairAudit, PairingValidator, ProposedPair,
    QualificationDecision,
};

//! Ministerial Storage Layer
//!
//! Adapters implementing the read-only [`EntityStore`] boundary consumed by
//! the pairing engine.
//!
//! # Adapters
//!
//! - [`SqliteStore`]: SQLite mirror of the `students` and `family_members`
//!   tables, used by the CLI and as the reference adapter
//! - [`MemoryStore`]: fixed in-memory snapshot, for tests and embedding
//!
//! # Examples
//!
//! ```no_run
//! use ministerial_store::SqliteStore;
//!
//! let store = SqliteStore::new(":memory:").unwrap();
//! // Store is now ready to serve snapshots
//! ```
//!
//! [`EntityStore`]: ministerial_domain::EntityStore

#![warn(missing_docs)]

mod memory;
mod snapshot;
mod sqlite;

pub use memory::MemoryStore;
pub use snapshot::EntitySnapshot;
pub use sqlite::SqliteStore;

use thiserror::Error;

/// Errors that can occur during storage operations
#[derive(Error, Debug)]
pub enum StoreError {
    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// Record the store cannot hold
    #[error("Invalid data: {0}")]
    InvalidData(String),

    /// Snapshot file could not be read
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Snapshot JSON could not be parsed
    #[error("Snapshot parse error: {0}")]
    Snapshot(#[from] serde_json::Error),

    /// Connection lock poisoned by a panicking thread
    #[error("Store lock poisoned")]
    LockPoisoned,

    /// Simulated or upstream outage
    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

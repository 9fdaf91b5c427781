//! Trait definitions for external interactions
//!
//! The pairing engine only reads from the congregation datastore. Writes,
//! authentication and pagination belong to the adapter behind this trait.

use crate::{FamilyLink, Student};
use std::future::Future;

/// Read-only source of complete student and family-link snapshots
///
/// Implemented by the infrastructure layer (ministerial-store). Each call
/// must return the full table; adapters over paginated stores exhaust all
/// pages before returning.
pub trait EntityStore: Send + Sync {
    /// Error type for store operations
    type Error;

    /// Fetch every student record
    fn fetch_all_students(&self) -> impl Future<Output = Result<Vec<Student>, Self::Error>> + Send;

    /// Fetch every declared family link
    fn fetch_all_family_links(
        &self,
    ) -> impl Future<Output = Result<Vec<FamilyLink>, Self::Error>> + Send;
}

impl<T: EntityStore> EntityStore for std::sync::Arc<T> {
    type Error = T::Error;

    fn fetch_all_students(&self) -> impl Future<Output = Result<Vec<Student>, Self::Error>> + Send {
        (**self).fetch_all_students()
    }

    fn fetch_all_family_links(
        &self,
    ) -> impl Future<Output = Result<Vec<FamilyLink>, Self::Error>> + Send {
        (**self).fetch_all_family_links()
    }
}

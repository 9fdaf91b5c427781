//! In-memory adapter serving a fixed snapshot

use crate::{EntitySnapshot, StoreError};
use ministerial_domain::{EntityStore, FamilyLink, Student};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::RwLock;

/// [`EntityStore`] backed by an [`EntitySnapshot`] held in memory
///
/// The snapshot can be swapped with [`MemoryStore::replace`], and the store
/// can be switched offline to exercise refresh-failure paths.
#[derive(Debug, Default)]
pub struct MemoryStore {
    snapshot: RwLock<EntitySnapshot>,
    offline: AtomicBool,
    fetches: AtomicUsize,
}

impl MemoryStore {
    /// Create a store serving `snapshot`
    pub fn new(snapshot: EntitySnapshot) -> Self {
        Self {
            snapshot: RwLock::new(snapshot),
            offline: AtomicBool::new(false),
            fetches: AtomicUsize::new(0),
        }
    }

    /// Create a store from students and links
    pub fn from_parts(students: Vec<Student>, family_links: Vec<FamilyLink>) -> Self {
        Self::new(EntitySnapshot::new(students, family_links))
    }

    /// Replace the served snapshot
    pub fn replace(&self, snapshot: EntitySnapshot) -> Result<(), StoreError> {
        let mut guard = self.snapshot.write().map_err(|_| StoreError::LockPoisoned)?;
        *guard = snapshot;
        Ok(())
    }

    /// Make every fetch fail (`true`) or succeed again (`false`)
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    /// Number of student-table fetches served so far
    pub fn student_fetches(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }

    fn read(&self) -> Result<std::sync::RwLockReadGuard<'_, EntitySnapshot>, StoreError> {
        if self.offline.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("memory store is offline".to_string()));
        }
        self.snapshot.read().map_err(|_| StoreError::LockPoisoned)
    }

    fn load_students(&self) -> Result<Vec<Student>, StoreError> {
        let students = self.read()?.students.clone();
        self.fetches.fetch_add(1, Ordering::SeqCst);
        Ok(students)
    }

    fn load_family_links(&self) -> Result<Vec<FamilyLink>, StoreError> {
        Ok(self.read()?.family_links.clone())
    }
}

impl EntityStore for MemoryStore {
    type Error = StoreError;

    async fn fetch_all_students(&self) -> Result<Vec<Student>, Self::Error> {
        self.load_students()
    }

    async fn fetch_all_family_links(&self) -> Result<Vec<FamilyLink>, Self::Error> {
        self.load_family_links()
    }
}

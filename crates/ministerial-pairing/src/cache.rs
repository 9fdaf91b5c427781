//! Time-bounded relationship cache
//!
//! Holds one immutable [`RelationshipSnapshot`] of every student and family
//! link. A refresh builds a complete new snapshot and swaps it in, so readers
//! see either the old or the new snapshot and never a partial one.

use crate::PairingError;
use ministerial_domain::{EntityStore, FamilyLink, Student, StudentId};
use serde::Serialize;
use std::collections::HashMap;
use std::fmt::Display;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::{Arc, PoisonError, RwLock};
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};
use tracing::{debug, info, warn};

/// Current timestamp in seconds since Unix epoch
fn current_timestamp() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

/// Students and family links as of a single refresh instant
#[derive(Debug, Clone, Default)]
pub struct RelationshipSnapshot {
    students: HashMap<StudentId, Student>,
    family_links: HashMap<StudentId, Vec<FamilyLink>>,
    skipped_links: usize,
    refreshed: Option<(Instant, u64)>,
}

impl RelationshipSnapshot {
    /// Empty, never-refreshed snapshot
    pub fn empty() -> Self {
        Self::default()
    }

    /// Index raw records, dropping malformed family links
    ///
    /// Duplicate student ids keep the last record.
    pub fn build(students: Vec<Student>, links: Vec<FamilyLink>) -> Self {
        let students: HashMap<StudentId, Student> = students
            .into_iter()
            .map(|student| (student.id.clone(), student))
            .collect();

        let mut family_links: HashMap<StudentId, Vec<FamilyLink>> = HashMap::new();
        let mut skipped_links = 0;
        for link in links {
            if !link.is_well_formed() {
                skipped_links += 1;
                continue;
            }
            if let Some(student_id) = link.student_id.clone() {
                family_links.entry(student_id).or_default().push(link);
            }
        }

        Self {
            students,
            family_links,
            skipped_links,
            refreshed: None,
        }
    }

    fn stamped(mut self, at: Instant) -> Self {
        self.refreshed = Some((at, current_timestamp()));
        self
    }

    /// Look up a student
    pub fn student(&self, id: &StudentId) -> Option<&Student> {
        self.students.get(id)
    }

    /// Family links declared by a student
    pub fn family_links(&self, id: &StudentId) -> &[FamilyLink] {
        self.family_links.get(id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Number of students
    pub fn student_count(&self) -> usize {
        self.students.len()
    }

    /// Number of well-formed family links
    pub fn family_link_count(&self) -> usize {
        self.family_links.values().map(Vec::len).sum()
    }

    /// Malformed links dropped while building
    pub fn skipped_links(&self) -> usize {
        self.skipped_links
    }

    /// Iterate over all students
    pub fn students(&self) -> impl Iterator<Item = &Student> {
        self.students.values()
    }

    /// Whether the snapshot is older than `ttl` or was never refreshed
    pub fn is_stale(&self, ttl: Duration) -> bool {
        match self.refreshed {
            Some((at, _)) => at.elapsed() >= ttl,
            None => true,
        }
    }

    /// Refresh time in seconds since Unix epoch
    pub fn refreshed_at(&self) -> Option<u64> {
        self.refreshed.map(|(_, wall)| wall)
    }
}

/// Observability counters for the cache
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    /// Well-formed family links held
    pub family_link_count: usize,

    /// Students held
    pub student_count: usize,

    /// Last successful refresh, seconds since Unix epoch
    pub last_refreshed_at: Option<u64>,

    /// Whether the snapshot is within TTL
    pub is_fresh: bool,

    /// Successful refreshes since creation
    pub refresh_count: u64,

    /// Failed refresh attempts since creation
    pub failed_refresh_count: u64,

    /// Malformed links skipped in the current snapshot
    pub skipped_links: usize,
}

impl CacheStats {
    /// Generate a summary report
    pub fn summary(&self) -> String {
        let refreshed = match self.last_refreshed_at {
            Some(ts) => ts.to_string(),
            None => "never".to_string(),
        };
        let lines = [
            "Relationship Cache".to_string(),
            "==================".to_string(),
            format!("Students: {}", self.student_count),
            format!("Family links: {}", self.family_link_count),
            format!("Skipped links: {}", self.skipped_links),
            format!("Last refresh: {}", refreshed),
            format!("Fresh: {}", self.is_fresh),
            format!(
                "Refreshes: {} ok, {} failed",
                self.refresh_count, self.failed_refresh_count
            ),
        ];
        lines.join("\n")
    }
}

/// Lazily built, TTL-refreshed view over an [`EntityStore`]
///
/// Concurrent callers that find the snapshot stale share a single refresh:
/// the first one takes the refresh gate and fetches, the others wait on the
/// gate and then reuse whatever that attempt left behind, including the
/// previous snapshot when it failed.
pub struct RelationshipCache<S> {
    store: S,
    ttl: Duration,
    minor_age: u32,
    snapshot: RwLock<Arc<RelationshipSnapshot>>,
    refresh_gate: tokio::sync::Mutex<()>,
    refreshes: AtomicU64,
    failures: AtomicU64,
    attempts: AtomicUsize,
}

impl<S> RelationshipCache<S>
where
    S: EntityStore,
    S::Error: Display,
{
    /// Create an empty cache over `store`
    pub fn new(store: S, ttl: Duration, minor_age: u32) -> Self {
        Self {
            store,
            ttl,
            minor_age,
            snapshot: RwLock::new(Arc::new(RelationshipSnapshot::empty())),
            refresh_gate: tokio::sync::Mutex::new(()),
            refreshes: AtomicU64::new(0),
            failures: AtomicU64::new(0),
            attempts: AtomicUsize::new(0),
        }
    }

    /// The underlying store
    pub fn store(&self) -> &S {
        &self.store
    }

    /// The current snapshot, without refreshing
    pub fn current(&self) -> Arc<RelationshipSnapshot> {
        self.snapshot
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn install(&self, snapshot: Arc<RelationshipSnapshot>) {
        *self.snapshot.write().unwrap_or_else(PoisonError::into_inner) = snapshot;
    }

    /// Return a snapshot within TTL, refreshing first if needed
    ///
    /// A failed refresh is logged and the previous snapshot (possibly empty)
    /// is returned instead.
    pub async fn ensure_fresh(&self) -> Arc<RelationshipSnapshot> {
        let attempts = self.attempts.load(Ordering::SeqCst);
        let current = self.current();
        if !current.is_stale(self.ttl) {
            return current;
        }

        let _gate = self.refresh_gate.lock().await;

        // Another caller finished a refresh attempt while we waited
        if self.attempts.load(Ordering::SeqCst) != attempts {
            return self.current();
        }

        match self.refresh_locked().await {
            Ok(snapshot) => snapshot,
            Err(e) => {
                warn!("Relationship cache refresh failed, keeping previous snapshot: {}", e);
                self.current()
            }
        }
    }

    /// Refresh unconditionally, reporting the store error to the caller
    pub async fn force_refresh(&self) -> Result<Arc<RelationshipSnapshot>, PairingError> {
        let _gate = self.refresh_gate.lock().await;
        self.refresh_locked().await
    }

    async fn refresh_locked(&self) -> Result<Arc<RelationshipSnapshot>, PairingError> {
        let links = match self.store.fetch_all_family_links().await {
            Ok(links) => links,
            Err(e) => return Err(self.fail(format!("Failed to load family links: {}", e))),
        };
        let students = match self.store.fetch_all_students().await {
            Ok(students) => students,
            Err(e) => return Err(self.fail(format!("Failed to load students: {}", e))),
        };

        let snapshot = RelationshipSnapshot::build(students, links).stamped(Instant::now());

        if snapshot.skipped_links() > 0 {
            warn!(
                "Skipped {} malformed family links during refresh",
                snapshot.skipped_links()
            );
        }
        for student in snapshot.students() {
            let issues = student.record_issues(self.minor_age);
            if !issues.is_empty() {
                let issues: Vec<String> = issues.iter().map(ToString::to_string).collect();
                debug!("Student {} has record issues: {}", student.id, issues.join("; "));
            }
        }

        info!(
            "Relationship cache refreshed: {} students, {} family links",
            snapshot.student_count(),
            snapshot.family_link_count()
        );

        let snapshot = Arc::new(snapshot);
        self.install(snapshot.clone());
        self.refreshes.fetch_add(1, Ordering::SeqCst);
        self.attempts.fetch_add(1, Ordering::SeqCst);
        Ok(snapshot)
    }

    fn fail(&self, message: String) -> PairingError {
        self.failures.fetch_add(1, Ordering::SeqCst);
        self.attempts.fetch_add(1, Ordering::SeqCst);
        PairingError::Store(message)
    }

    /// Drop the snapshot; the next access refreshes
    pub fn clear(&self) {
        self.install(Arc::new(RelationshipSnapshot::empty()));
        debug!("Relationship cache cleared");
    }

    /// Counts and freshness of the current snapshot
    pub fn stats(&self) -> CacheStats {
        let snapshot = self.current();
        CacheStats {
            family_link_count: snapshot.family_link_count(),
            student_count: snapshot.student_count(),
            last_refreshed_at: snapshot.refreshed_at(),
            is_fresh: !snapshot.is_stale(self.ttl),
            refresh_count: self.refreshes.load(Ordering::SeqCst),
            failed_refresh_count: self.failures.load(Ordering::SeqCst),
            skipped_links: snapshot.skipped_links(),
        }
    }
}

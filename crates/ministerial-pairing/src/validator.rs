//! Pairing validator, candidate resolver and batch auditor

use crate::cache::{CacheStats, RelationshipCache, RelationshipSnapshot};
use crate::rules::evaluate_pair;
use crate::{PairingConfig, PairingError};
use ministerial_domain::{EntityStore, PairingDecision, Part, StudentId};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::fmt::Display;
use tracing::debug;

/// Helpers eligible to pair with a principal student
#[derive(Debug, Clone, Default, Serialize)]
pub struct CandidateResolution {
    /// Candidates with a valid pairing, in input order
    pub all_valid: Vec<StudentId>,

    /// Subset of `all_valid` accepted on a family relationship
    pub family_verified: Vec<StudentId>,

    /// Decision for every evaluated candidate
    pub decisions: HashMap<StudentId, PairingDecision>,
}

/// A proposed pair, as found on an assignment sheet
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProposedPair {
    /// First student
    pub a: StudentId,
    /// Second student
    pub b: StudentId,
}

impl ProposedPair {
    /// Create a proposed pair
    pub fn new(a: impl Into<StudentId>, b: impl Into<StudentId>) -> Self {
        Self {
            a: a.into(),
            b: b.into(),
        }
    }
}

/// A proposed pair together with its decision
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuditedPair {
    /// The pair as proposed
    #[serde(flatten)]
    pub pair: ProposedPair,
    /// Its decision
    pub decision: PairingDecision,
}

/// Result of auditing a list of pairs
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PairAudit {
    /// Pairs that may stand, in input order
    pub valid: Vec<AuditedPair>,
    /// Pairs that must be changed, in input order
    pub invalid: Vec<AuditedPair>,
}

impl PairAudit {
    /// True when no pair was refused
    pub fn is_clean(&self) -> bool {
        self.invalid.is_empty()
    }
}

/// Whether a student may take a given part
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QualificationDecision {
    /// Whether the student may take the part
    pub qualified: bool,
    /// Human-readable explanation
    pub reason: String,
}

/// Single source of truth for pairing eligibility
///
/// Owns the relationship cache over the given store; construct one per
/// long-lived service or per assignment-generation run.
///
/// # Examples
///
/// ```no_run
/// use ministerial_pairing::{PairingConfig, PairingValidator};
/// use ministerial_store::SqliteStore;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let store = SqliteStore::new("ministerial.db")?;
/// let validator = PairingValidator::new(store, PairingConfig::default());
///
/// let decision = validator.validate_pair(&"s1".into(), &"s2".into()).await;
/// if !decision.valid {
///     println!("cannot pair: {}", decision.reason);
/// }
/// # Ok(())
/// # }
/// ```
pub struct PairingValidator<S> {
    cache: RelationshipCache<S>,
    config: PairingConfig,
}

impl<S> PairingValidator<S>
where
    S: EntityStore,
    S::Error: Display,
{
    /// Create a validator over `store`
    pub fn new(store: S, config: PairingConfig) -> Self {
        Self {
            cache: RelationshipCache::new(store, config.cache_ttl(), config.minor_age),
            config,
        }
    }

    /// Create a validator with default configuration
    pub fn default_config(store: S) -> Self {
        Self::new(store, PairingConfig::default())
    }

    /// Active configuration
    pub fn config(&self) -> &PairingConfig {
        &self.config
    }

    /// The relationship cache
    pub fn cache(&self) -> &RelationshipCache<S> {
        &self.cache
    }

    fn decide(&self, snapshot: &RelationshipSnapshot, a: &StudentId, b: &StudentId) -> PairingDecision {
        evaluate_pair(snapshot, a, b, self.config.minor_age)
    }

    /// Decide whether two students may share an assignment
    pub async fn validate_pair(&self, a: &StudentId, b: &StudentId) -> PairingDecision {
        let snapshot = self.cache.ensure_fresh().await;
        self.decide(&snapshot, a, b)
    }

    /// Evaluate every candidate against `principal`
    ///
    /// The principal itself and any id in `exclude` are skipped. All
    /// candidates are judged against the same snapshot.
    pub async fn resolve_candidates(
        &self,
        principal: &StudentId,
        candidates: &[StudentId],
        exclude: &[StudentId],
    ) -> CandidateResolution {
        let snapshot = self.cache.ensure_fresh().await;
        let excluded: HashSet<&StudentId> = exclude.iter().collect();

        let mut resolution = CandidateResolution::default();
        for candidate in candidates {
            if candidate == principal || excluded.contains(candidate) {
                continue;
            }
            // Repeated candidates keep their first position
            if resolution.decisions.contains_key(candidate) {
                continue;
            }

            let decision = self.decide(&snapshot, principal, candidate);
            if decision.valid {
                resolution.all_valid.push(candidate.clone());
                if decision.is_family_verified() {
                    resolution.family_verified.push(candidate.clone());
                }
            }
            resolution.decisions.insert(candidate.clone(), decision);
        }

        debug!(
            "Resolved {} candidates for {}: {} valid, {} via family",
            resolution.decisions.len(),
            principal,
            resolution.all_valid.len(),
            resolution.family_verified.len()
        );
        resolution
    }

    /// Validate each proposed pair independently
    pub async fn audit_pairs(&self, pairs: &[ProposedPair]) -> PairAudit {
        let mut audit = PairAudit::default();
        if pairs.is_empty() {
            return audit;
        }

        let snapshot = self.cache.ensure_fresh().await;
        for pair in pairs {
            let decision = self.decide(&snapshot, &pair.a, &pair.b);
            let audited = AuditedPair {
                pair: pair.clone(),
                decision,
            };
            if audited.decision.valid {
                audit.valid.push(audited);
            } else {
                audit.invalid.push(audited);
            }
        }

        debug!(
            "Audited {} pairs: {} valid, {} invalid",
            pairs.len(),
            audit.valid.len(),
            audit.invalid.len()
        );
        audit
    }

    /// Whether a student may take `part`
    pub async fn check_qualification(&self, student: &StudentId, part: Part) -> QualificationDecision {
        let snapshot = self.cache.ensure_fresh().await;

        let Some(student) = snapshot.student(student) else {
            return QualificationDecision {
                qualified: false,
                reason: "unknown student".to_string(),
            };
        };
        if !student.active {
            return QualificationDecision {
                qualified: false,
                reason: "inactive student".to_string(),
            };
        }

        if student.is_qualified_for(part) {
            QualificationDecision {
                qualified: true,
                reason: format!("{} may take {}", student.label(), part.as_str()),
            }
        } else {
            QualificationDecision {
                qualified: false,
                reason: format!(
                    "{} requires a brother who is an elder, ministerial servant or baptized publisher",
                    part.as_str()
                ),
            }
        }
    }

    /// Drop the cached snapshot; the next query refreshes
    pub fn clear_cache(&self) {
        self.cache.clear();
    }

    /// Counts and freshness of the cached snapshot
    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }

    /// Refresh now and report datastore failures
    pub async fn force_refresh(&self) -> Result<CacheStats, PairingError> {
        self.cache.force_refresh().await?;
        Ok(self.cache.stats())
    }
}

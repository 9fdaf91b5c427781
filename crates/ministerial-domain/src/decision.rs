//! Pairing decision module - the answer to "may these two share a part?"

use serde::{Deserialize, Serialize};
use std::fmt;

/// Why a pairing was accepted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RelationshipType {
    /// Both students share a gender; no family lookup needed
    SameGender,

    /// Immediate family declared outside the parent/link model
    DirectFamily,

    /// Both students have the same registered guardian
    Siblings,

    /// One student is the registered guardian of the other
    ParentChild,

    /// Linked through a declared family member record
    FamilyMembers,
}

impl RelationshipType {
    /// Get the type name as serialized
    pub fn as_str(&self) -> &'static str {
        match self {
            RelationshipType::SameGender => "same_gender",
            RelationshipType::DirectFamily => "direct_family",
            RelationshipType::Siblings => "siblings",
            RelationshipType::ParentChild => "parent_child",
            RelationshipType::FamilyMembers => "family_members",
        }
    }

    /// Whether the acceptance rests on a verified family relationship
    pub fn is_family(&self) -> bool {
        !matches!(self, RelationshipType::SameGender)
    }
}

/// Why a pairing was refused
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RejectionReason {
    /// An id did not resolve to a known student
    UnknownStudent,

    /// One of the students is inactive
    InactiveStudent,

    /// A minor cannot be paired cross-gender, family or not
    MinorCrossGender,

    /// Different genders and no parent, sibling or declared link
    NoVerifiedFamilyRelationship,
}

impl RejectionReason {
    /// Canonical reason text
    pub fn message(&self) -> &'static str {
        match self {
            RejectionReason::UnknownStudent => "unknown student",
            RejectionReason::InactiveStudent => "inactive student",
            RejectionReason::MinorCrossGender => "minors must pair same-gender",
            RejectionReason::NoVerifiedFamilyRelationship => {
                "different genders without verified family relationship"
            }
        }
    }
}

impl fmt::Display for RejectionReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// Outcome of validating one pair
///
/// Produced fresh for every query and never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PairingDecision {
    /// Whether the pair may share an assignment
    pub valid: bool,

    /// Human-readable explanation
    pub reason: String,

    /// Basis of an accepted pairing
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relationship_type: Option<RelationshipType>,

    /// Extra context, e.g. the declared relation label
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,

    /// Typed cause of a refused pairing
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rejection: Option<RejectionReason>,
}

impl PairingDecision {
    /// An accepted pairing
    pub fn accept(relationship_type: RelationshipType, reason: impl Into<String>) -> Self {
        Self {
            valid: true,
            reason: reason.into(),
            relationship_type: Some(relationship_type),
            detail: None,
            rejection: None,
        }
    }

    /// A refused pairing with the canonical reason text
    pub fn reject(rejection: RejectionReason) -> Self {
        Self {
            valid: false,
            reason: rejection.message().to_string(),
            relationship_type: None,
            detail: None,
            rejection: Some(rejection),
        }
    }

    /// Builder: attach detail
    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    /// Accepted on the basis of a family relationship
    pub fn is_family_verified(&self) -> bool {
        self.valid && self.relationship_type.is_some_and(|t| t.is_family())
    }
}

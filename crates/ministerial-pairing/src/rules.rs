//! Pairing rules (S-38-T)
//!
//! Rules are checked in a fixed order and the first one that decides wins:
//!
//! 1. both students must exist and be active
//! 2. same gender is always allowed
//! 3. a minor is never paired cross-gender, even with a relative
//! 4. cross-gender adults need a parent/child, sibling or declared family link

use crate::cache::RelationshipSnapshot;
use ministerial_domain::{
    PairingDecision, RejectionReason, RelationshipType, Student, StudentId,
};

/// Decide whether `a` and `b` may be paired, using `snapshot` only
pub fn evaluate_pair(
    snapshot: &RelationshipSnapshot,
    a: &StudentId,
    b: &StudentId,
    minor_age: u32,
) -> PairingDecision {
    let (Some(first), Some(second)) = (snapshot.student(a), snapshot.student(b)) else {
        return PairingDecision::reject(RejectionReason::UnknownStudent);
    };

    if !first.active || !second.active {
        return PairingDecision::reject(RejectionReason::InactiveStudent);
    }

    if first.gender == second.gender {
        return PairingDecision::accept(RelationshipType::SameGender, "same gender");
    }

    // Applies before any family exception
    if first.is_minor(minor_age) || second.is_minor(minor_age) {
        return PairingDecision::reject(RejectionReason::MinorCrossGender);
    }

    family_relationship(snapshot, first, second)
        .unwrap_or_else(|| PairingDecision::reject(RejectionReason::NoVerifiedFamilyRelationship))
}

/// Parent/child, then siblings, then declared family links
fn family_relationship(
    snapshot: &RelationshipSnapshot,
    first: &Student,
    second: &Student,
) -> Option<PairingDecision> {
    if let Some(decision) = parent_child(first, second).or_else(|| parent_child(second, first)) {
        return Some(decision);
    }

    if let (Some(p1), Some(p2)) = (&first.parent_id, &second.parent_id) {
        if p1 == p2 {
            return Some(
                PairingDecision::accept(RelationshipType::Siblings, "siblings (same guardian)")
                    .with_detail(format!("guardian {}", p1)),
            );
        }
    }

    declared_link(snapshot, first, second).or_else(|| declared_link(snapshot, second, first))
}

fn parent_child(child: &Student, parent: &Student) -> Option<PairingDecision> {
    if child.parent_id.as_ref() != Some(&parent.id) {
        return None;
    }
    Some(
        PairingDecision::accept(
            RelationshipType::ParentChild,
            format!("{} is the guardian of {}", parent.label(), child.label()),
        )
        .with_detail("parent and child"),
    )
}

/// `relative` appears, by email, among the links declared by `declarer`
fn declared_link(
    snapshot: &RelationshipSnapshot,
    declarer: &Student,
    relative: &Student,
) -> Option<PairingDecision> {
    let email = relative.normalized_email()?;
    let link = snapshot
        .family_links(&declarer.id)
        .iter()
        .find(|link| link.matches_email(&email))?;

    Some(
        PairingDecision::accept(
            RelationshipType::FamilyMembers,
            format!(
                "{} is {} of {}",
                relative.label(),
                link.relation,
                declarer.label()
            ),
        )
        .with_detail(link.relation.clone()),
    )
}

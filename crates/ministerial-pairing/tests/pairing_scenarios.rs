//! End-to-end pairing scenarios over the in-memory and SQLite adapters

use ministerial_domain::{
    EntityStore, FamilyLink, Gender, RejectionReason, RelationshipType, Student, StudentId,
};
use ministerial_pairing::{PairingConfig, PairingValidator, ProposedPair};
use ministerial_store::{EntitySnapshot, MemoryStore, SqliteStore};
use std::sync::Arc;

fn id(s: &str) -> StudentId {
    StudentId::new(s)
}

fn validator(students: Vec<Student>, links: Vec<FamilyLink>) -> PairingValidator<MemoryStore> {
    PairingValidator::default_config(MemoryStore::from_parts(students, links))
}

#[tokio::test]
async fn adults_of_different_gender_without_family_are_refused() {
    let validator = validator(
        vec![
            Student::new("a", "André", Gender::Male).with_age(30),
            Student::new("b", "Beatriz", Gender::Female).with_age(28),
        ],
        vec![],
    );

    let decision = validator.validate_pair(&id("a"), &id("b")).await;
    assert!(!decision.valid);
    assert_eq!(
        decision.reason,
        "different genders without verified family relationship"
    );
    assert_eq!(decision.relationship_type, None);
}

#[tokio::test]
async fn minor_is_refused_even_with_declared_family_link() {
    let validator = validator(
        vec![
            Student::new("a", "André", Gender::Male).with_age(16),
            Student::new("b", "Beatriz", Gender::Female)
                .with_age(40)
                .with_email("bia@mail.com"),
        ],
        vec![FamilyLink::new("a", "Beatriz", "Mãe").with_email("bia@mail.com")],
    );

    let decision = validator.validate_pair(&id("a"), &id("b")).await;
    assert!(!decision.valid);
    assert_eq!(decision.reason, "minors must pair same-gender");
    assert_eq!(decision.rejection, Some(RejectionReason::MinorCrossGender));
}

#[tokio::test]
async fn minor_siblings_of_different_gender_are_refused() {
    let validator = validator(
        vec![
            Student::new("p", "Paulo", Gender::Male).with_age(45),
            Student::new("a", "Ana", Gender::Female).with_age(12).with_parent("p"),
            Student::new("b", "Beto", Gender::Male).with_age(20).with_parent("p"),
        ],
        vec![],
    );

    assert!(!validator.validate_pair(&id("a"), &id("b")).await.valid);
    assert!(!validator.validate_pair(&id("a"), &id("p")).await.valid);
}

#[tokio::test]
async fn guardian_and_adult_child_are_accepted() {
    let validator = validator(
        vec![
            Student::new("a", "Ana", Gender::Female).with_age(25).with_parent("b"),
            Student::new("b", "Bruno", Gender::Male).with_age(55),
        ],
        vec![],
    );

    let decision = validator.validate_pair(&id("a"), &id("b")).await;
    assert!(decision.valid);
    assert_eq!(decision.relationship_type, Some(RelationshipType::ParentChild));
}

#[tokio::test]
async fn adult_siblings_are_accepted() {
    let validator = validator(
        vec![
            Student::new("a", "Ana", Gender::Female).with_age(25).with_parent("p"),
            Student::new("b", "Bruno", Gender::Male).with_age(27).with_parent("p"),
        ],
        vec![],
    );

    let decision = validator.validate_pair(&id("a"), &id("b")).await;
    assert!(decision.valid);
    assert_eq!(decision.relationship_type, Some(RelationshipType::Siblings));
}

#[tokio::test]
async fn resolver_keeps_decisions_for_every_candidate() {
    let validator = validator(
        vec![
            Student::new("a", "Ana", Gender::Female).with_age(30),
            Student::new("b", "Bia", Gender::Female).with_age(31),
            Student::new("c", "Caio", Gender::Male).with_age(32),
            Student::new("d", "Duda", Gender::Female).with_age(33).inactive(),
        ],
        vec![],
    );

    let resolution = validator
        .resolve_candidates(&id("a"), &[id("b"), id("c"), id("d")], &[])
        .await;
    assert_eq!(resolution.all_valid, vec![id("b")]);
    assert!(resolution.family_verified.is_empty());
    assert_eq!(resolution.decisions.len(), 3);
}

#[tokio::test]
async fn empty_audit_yields_empty_lists() {
    let validator = validator(vec![], vec![]);
    let audit = validator.audit_pairs(&[]).await;
    assert!(audit.valid.is_empty());
    assert!(audit.invalid.is_empty());
}

#[tokio::test]
async fn audit_agrees_with_validate_pair() {
    let validator = validator(
        vec![
            Student::new("a", "Ana", Gender::Female).with_age(30).with_parent("p"),
            Student::new("b", "Beto", Gender::Male).with_age(31).with_parent("p"),
            Student::new("c", "Caio", Gender::Male).with_age(15),
            Student::new("d", "Dora", Gender::Female).with_age(60).inactive(),
        ],
        vec![],
    );

    let ids = ["a", "b", "c", "d", "missing"];
    for x in ids {
        for y in ids {
            let single = validator.validate_pair(&id(x), &id(y)).await;
            let audit = validator.audit_pairs(&[ProposedPair::new(x, y)]).await;
            assert_eq!(audit.valid.len() == 1, single.valid, "pair ({}, {})", x, y);
            assert_eq!(audit.invalid.len() == 1, !single.valid, "pair ({}, {})", x, y);
        }
    }
}

#[tokio::test]
async fn cleared_cache_gives_identical_decisions() {
    let validator = validator(
        vec![
            Student::new("a", "Ana", Gender::Female).with_age(30),
            Student::new("b", "Beto", Gender::Male)
                .with_age(31)
                .with_email("beto@mail.com"),
        ],
        vec![FamilyLink::new("a", "Beto", "Cônjuge").with_email("beto@mail.com")],
    );

    validator.clear_cache();
    let first = validator.validate_pair(&id("a"), &id("b")).await;
    let second = validator.validate_pair(&id("a"), &id("b")).await;
    assert_eq!(first, second);
    assert_eq!(validator.cache().store().student_fetches(), 1);
}

#[tokio::test]
async fn stale_data_is_served_while_store_is_down() {
    let store = Arc::new(MemoryStore::from_parts(
        vec![
            Student::new("a", "Ana", Gender::Female),
            Student::new("b", "Bia", Gender::Female),
        ],
        vec![],
    ));
    let config = PairingConfig {
        cache_ttl_secs: 0,
        ..Default::default()
    };
    let validator = PairingValidator::new(store.clone(), config);

    assert!(validator.validate_pair(&id("a"), &id("b")).await.valid);

    store.set_offline(true);
    assert!(validator.validate_pair(&id("a"), &id("b")).await.valid);
    assert_eq!(validator.cache_stats().failed_refresh_count, 1);
}

#[tokio::test]
async fn refresh_picks_up_store_changes_after_clear() {
    let store = Arc::new(MemoryStore::from_parts(
        vec![
            Student::new("a", "Ana", Gender::Female).with_age(30),
            Student::new("b", "Beto", Gender::Male).with_age(30),
        ],
        vec![],
    ));
    let validator = PairingValidator::default_config(store.clone());
    assert!(!validator.validate_pair(&id("a"), &id("b")).await.valid);

    store
        .replace(EntitySnapshot::new(
            vec![
                Student::new("a", "Ana", Gender::Female).with_age(30).with_parent("b"),
                Student::new("b", "Beto", Gender::Male).with_age(60),
            ],
            vec![],
        ))
        .unwrap();

    // Within TTL the old snapshot still answers
    assert!(!validator.validate_pair(&id("a"), &id("b")).await.valid);

    validator.clear_cache();
    assert!(validator.validate_pair(&id("a"), &id("b")).await.valid);
}

#[tokio::test]
async fn works_over_sqlite_adapter() {
    let store = SqliteStore::new(":memory:").unwrap();
    store
        .replace_all(&EntitySnapshot::new(
            vec![
                Student::new("a", "Ana", Gender::Female)
                    .with_age(30)
                    .with_email("ana@mail.com"),
                Student::new("b", "Beto", Gender::Male).with_age(33),
            ],
            vec![
                FamilyLink::new("b", "Ana", "Irmã").with_email("ANA@mail.com"),
                FamilyLink::new("b", "", "Mãe"),
            ],
        ))
        .unwrap();
    assert_eq!(store.fetch_all_family_links().await.unwrap().len(), 2);

    let validator = PairingValidator::default_config(store);
    let decision = validator.validate_pair(&id("a"), &id("b")).await;
    assert!(decision.valid);
    assert_eq!(decision.relationship_type, Some(RelationshipType::FamilyMembers));
    assert_eq!(decision.detail.as_deref(), Some("Irmã"));

    let stats = validator.cache_stats();
    assert_eq!(stats.student_count, 2);
    assert_eq!(stats.family_link_count, 1);
    assert_eq!(stats.skipped_links, 1);
}

//! Family link module - contacts declared by a student

use crate::student::{Gender, StudentId};
use serde::{Deserialize, Serialize};

/// A family member declared by a student
///
/// The linked person is not necessarily a student. Links are matched to
/// students by email only; `relation` is an open label ("Pai", "Irmã", ...)
/// that is surfaced but never interpreted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FamilyLink {
    /// Declaring student; nullable upstream, and a link without it is unusable
    #[serde(default)]
    pub student_id: Option<StudentId>,

    /// Name of the family member
    #[serde(default)]
    pub name: String,

    /// Email of the family member
    #[serde(default)]
    pub email: Option<String>,

    /// Phone of the family member
    #[serde(default)]
    pub phone: Option<String>,

    /// Gender of the family member, when recorded
    #[serde(default)]
    pub gender: Option<Gender>,

    /// Relationship label as entered
    #[serde(default)]
    pub relation: String,
}

impl FamilyLink {
    /// Create a link from a student to a named relative
    pub fn new(
        student_id: impl Into<StudentId>,
        name: impl Into<String>,
        relation: impl Into<String>,
    ) -> Self {
        Self {
            student_id: Some(student_id.into()),
            name: name.into(),
            email: None,
            phone: None,
            gender: None,
            relation: relation.into(),
        }
    }

    /// Builder: set the email
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    /// True when student id, name and relation are all present
    pub fn is_well_formed(&self) -> bool {
        self.student_id.as_ref().is_some_and(|id| !id.is_blank())
            && !self.name.trim().is_empty()
            && !self.relation.trim().is_empty()
    }

    /// Normalized email, `None` when absent or blank
    pub fn normalized_email(&self) -> Option<String> {
        self.email.as_deref().and_then(normalize_email)
    }

    /// Whether this link names the person behind `email` (already normalized)
    pub fn matches_email(&self, email: &str) -> bool {
        self.normalized_email().is_some_and(|own| own == email)
    }
}

/// Trim and lowercase an email; blank input never yields a join key
pub fn normalize_email(email: &str) -> Option<String> {
    let trimmed = email.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_lowercase())
    }
}

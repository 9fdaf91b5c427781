//! Student module - the person being assigned or paired

use crate::family::normalize_email;
use crate::role::{Part, Role};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Age below which a student is treated as a minor
pub const DEFAULT_MINOR_AGE: u32 = 18;

/// Valid recorded ages (inclusive)
const AGE_RANGE: std::ops::RangeInclusive<u32> = 1..=120;

/// Opaque student identifier as issued by the datastore
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StudentId(String);

impl StudentId {
    /// Wrap a raw identifier
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the raw identifier
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True when the identifier is empty or whitespace
    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl fmt::Display for StudentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for StudentId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for StudentId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// Student gender
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    /// Brother
    Male,
    /// Sister
    Female,
}

impl Gender {
    /// Get the gender name as stored
    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
        }
    }

    /// Parse a gender, accepting the short `M`/`F` codes as well
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "male" | "m" | "masculino" => Some(Gender::Male),
            "female" | "f" | "feminino" => Some(Gender::Female),
            _ => None,
        }
    }
}

impl std::str::FromStr for Gender {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("Invalid gender: {}", s))
    }
}

/// Read-only student projection consumed by the pairing engine
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Student {
    /// Unique identifier
    pub id: StudentId,

    /// Display name, only used in human-readable reasons
    #[serde(default)]
    pub name: String,

    /// Gender
    pub gender: Gender,

    /// Age in years; `None` means unknown and is treated as adult
    #[serde(default)]
    pub age: Option<u32>,

    /// Inactive students are never eligible partners
    #[serde(default = "default_active")]
    pub active: bool,

    /// Guardian (parent) student, if registered
    #[serde(default)]
    pub parent_id: Option<StudentId>,

    /// Contact email, the join key against declared family links
    #[serde(default)]
    pub email: Option<String>,

    /// Congregation role
    #[serde(default)]
    pub role: Role,
}

fn default_active() -> bool {
    true
}

/// A violated student-record rule
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordIssue {
    /// Age outside the accepted range
    AgeOutOfRange(u32),

    /// Minor without a registered guardian
    MinorWithoutParent,

    /// Role reserved for brothers held by a sister
    RoleRequiresMale(Role),
}

impl fmt::Display for RecordIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordIssue::AgeOutOfRange(age) => write!(
                f,
                "age {} is outside {}..={}",
                age,
                AGE_RANGE.start(),
                AGE_RANGE.end()
            ),
            RecordIssue::MinorWithoutParent => f.write_str("minor without a registered parent"),
            RecordIssue::RoleRequiresMale(role) => {
                write!(f, "role '{}' is reserved for brothers", role.as_str())
            }
        }
    }
}

impl Student {
    /// Create an active adult-by-default student with no relations
    pub fn new(id: impl Into<StudentId>, name: impl Into<String>, gender: Gender) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            gender,
            age: None,
            active: true,
            parent_id: None,
            email: None,
            role: Role::default(),
        }
    }

    /// Builder: set the age
    pub fn with_age(mut self, age: u32) -> Self {
        self.age = Some(age);
        self
    }

    /// Builder: set the guardian
    pub fn with_parent(mut self, parent_id: impl Into<StudentId>) -> Self {
        self.parent_id = Some(parent_id.into());
        self
    }

    /// Builder: set the email
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    /// Builder: set the role
    pub fn with_role(mut self, role: Role) -> Self {
        self.role = role;
        self
    }

    /// Builder: mark inactive
    pub fn inactive(mut self) -> Self {
        self.active = false;
        self
    }

    /// True only when the age is known and below `minor_age`
    pub fn is_minor(&self, minor_age: u32) -> bool {
        self.age.is_some_and(|age| age < minor_age)
    }

    /// Normalized email, `None` when absent or blank
    pub fn normalized_email(&self) -> Option<String> {
        self.email.as_deref().and_then(normalize_email)
    }

    /// Label used in reasons: the name, or the id when the name is blank
    pub fn label(&self) -> &str {
        if self.name.trim().is_empty() {
            self.id.as_str()
        } else {
            &self.name
        }
    }

    /// Whether this student may take the given part
    pub fn is_qualified_for(&self, part: Part) -> bool {
        if !part.requires_qualified_brother() {
            return true;
        }
        self.gender == Gender::Male && self.role.qualifies_for_teaching()
    }

    /// Parts this student may take, in canonical order
    pub fn qualified_parts(&self) -> Vec<Part> {
        Part::ALL
            .iter()
            .copied()
            .filter(|part| self.is_qualified_for(*part))
            .collect()
    }

    /// Every record rule this student violates
    pub fn record_issues(&self, minor_age: u32) -> Vec<RecordIssue> {
        let mut issues = Vec::new();

        if let Some(age) = self.age {
            if !AGE_RANGE.contains(&age) {
                issues.push(RecordIssue::AgeOutOfRange(age));
            }
        }

        if self.is_minor(minor_age) && self.parent_id.is_none() {
            issues.push(RecordIssue::MinorWithoutParent);
        }

        if self.gender == Gender::Female && self.role.requires_male() {
            issues.push(RecordIssue::RoleRequiresMale(self.role));
        }

        issues
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_age_is_not_minor() {
        let student = Student::new("s1", "Ana", Gender::Female);
        assert!(!student.is_minor(DEFAULT_MINOR_AGE));
        assert!(student.clone().with_age(17).is_minor(DEFAULT_MINOR_AGE));
        assert!(!student.with_age(18).is_minor(DEFAULT_MINOR_AGE));
    }

    #[test]
    fn test_gender_parsing() {
        assert_eq!(Gender::parse("M"), Some(Gender::Male));
        assert_eq!(Gender::parse(" Female "), Some(Gender::Female));
        assert_eq!(Gender::parse("feminino"), Some(Gender::Female));
        assert!("x".parse::<Gender>().is_err());
    }

    #[test]
    fn test_label_falls_back_to_id() {
        let student = Student::new("s9", "  ", Gender::Male);
        assert_eq!(student.label(), "s9");
    }

    #[test]
    fn test_qualified_parts() {
        let sister = Student::new("s1", "Ana", Gender::Female).with_role(Role::RegularPioneer);
        assert_eq!(
            sister.qualified_parts(),
            vec![Part::BibleReading, Part::InitialCall, Part::ReturnVisit]
        );

        let brother = Student::new("s2", "Bruno", Gender::Male).with_role(Role::BaptizedPublisher);
        assert!(brother.is_qualified_for(Part::Talk));
        assert!(brother.is_qualified_for(Part::BibleStudy));

        let new_student = Student::new("s3", "Caio", Gender::Male);
        assert!(!new_student.is_qualified_for(Part::Talk));
        assert!(new_student.is_qualified_for(Part::BibleReading));
    }

    #[test]
    fn test_record_issues() {
        let ok = Student::new("s1", "Ana", Gender::Female).with_age(30);
        assert!(ok.record_issues(DEFAULT_MINOR_AGE).is_empty());

        let minor = Student::new("s2", "Bia", Gender::Female).with_age(12);
        assert_eq!(
            minor.record_issues(DEFAULT_MINOR_AGE),
            vec![RecordIssue::MinorWithoutParent]
        );

        let bad = Student::new("s3", "Carla", Gender::Female)
            .with_age(200)
            .with_role(Role::Elder);
        let issues = bad.record_issues(DEFAULT_MINOR_AGE);
        assert_eq!(issues.len(), 2);
        assert!(issues.contains(&RecordIssue::AgeOutOfRange(200)));
        assert!(issues.contains(&RecordIssue::RoleRequiresMale(Role::Elder)));
    }

    #[test]
    fn test_deserialize_defaults() {
        let student: Student =
            serde_json::from_str(r#"{"id":"s1","gender":"male"}"#).unwrap();
        assert!(student.active);
        assert_eq!(student.role, Role::NewStudent);
        assert_eq!(student.age, None);
        assert_eq!(student.id.as_str(), "s1");
    }
}

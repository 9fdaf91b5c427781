//! Role module - congregation roles and the school parts they qualify for

use serde::{Deserialize, Serialize};

/// Congregation role of a student
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Elder
    Elder,
    /// Ministerial servant
    MinisterialServant,
    /// Regular pioneer
    RegularPioneer,
    /// Baptized publisher
    BaptizedPublisher,
    /// Unbaptized publisher
    UnbaptizedPublisher,
    /// Newly enrolled student
    #[default]
    NewStudent,
}

impl Role {
    /// Get the role name as stored
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Elder => "elder",
            Role::MinisterialServant => "ministerial_servant",
            Role::RegularPioneer => "regular_pioneer",
            Role::BaptizedPublisher => "baptized_publisher",
            Role::UnbaptizedPublisher => "unbaptized_publisher",
            Role::NewStudent => "new_student",
        }
    }

    /// Parse a role from its stored name
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "elder" => Some(Role::Elder),
            "ministerial_servant" => Some(Role::MinisterialServant),
            "regular_pioneer" => Some(Role::RegularPioneer),
            "baptized_publisher" => Some(Role::BaptizedPublisher),
            "unbaptized_publisher" => Some(Role::UnbaptizedPublisher),
            "new_student" => Some(Role::NewStudent),
            _ => None,
        }
    }

    /// Roles that can only be held by brothers
    pub fn requires_male(&self) -> bool {
        matches!(self, Role::Elder | Role::MinisterialServant)
    }

    /// Roles whose brothers may conduct studies and give talks
    pub fn qualifies_for_teaching(&self) -> bool {
        matches!(
            self,
            Role::Elder | Role::MinisterialServant | Role::BaptizedPublisher
        )
    }
}

impl std::str::FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("Invalid role: {}", s))
    }
}

/// A ministry-school part
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Part {
    /// Bible reading
    BibleReading,
    /// Starting a conversation
    InitialCall,
    /// Following up
    ReturnVisit,
    /// Conducting a Bible study
    BibleStudy,
    /// Talk
    Talk,
}

impl Part {
    /// Every part, in canonical order
    pub const ALL: [Part; 5] = [
        Part::BibleReading,
        Part::InitialCall,
        Part::ReturnVisit,
        Part::BibleStudy,
        Part::Talk,
    ];

    /// Get the part name as stored
    pub fn as_str(&self) -> &'static str {
        match self {
            Part::BibleReading => "bible_reading",
            Part::InitialCall => "initial_call",
            Part::ReturnVisit => "return_visit",
            Part::BibleStudy => "bible_study",
            Part::Talk => "talk",
        }
    }

    /// Parse a part from its stored name
    pub fn parse(s: &str) -> Option<Self> {
        Part::ALL
            .iter()
            .copied()
            .find(|part| part.as_str() == s.trim().to_lowercase())
    }

    /// Parts restricted to qualified brothers
    pub fn requires_qualified_brother(&self) -> bool {
        matches!(self, Part::BibleStudy | Part::Talk)
    }
}

impl std::str::FromStr for Part {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("Invalid part: {}", s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_parse_round_trip() {
        for role in [
            Role::Elder,
            Role::MinisterialServant,
            Role::RegularPioneer,
            Role::BaptizedPublisher,
            Role::UnbaptizedPublisher,
            Role::NewStudent,
        ] {
            assert_eq!(Role::parse(role.as_str()), Some(role));
        }
        assert!(Role::parse("bishop").is_none());
    }

    #[test]
    fn test_part_parse() {
        assert_eq!("TALK".parse::<Part>(), Ok(Part::Talk));
        assert_eq!(Part::parse("return_visit"), Some(Part::ReturnVisit));
        assert!(Part::parse("sermon").is_none());
    }

    #[test]
    fn test_teaching_roles() {
        assert!(Role::Elder.qualifies_for_teaching());
        assert!(!Role::RegularPioneer.qualifies_for_teaching());
        assert!(Role::MinisterialServant.requires_male());
        assert!(!Role::BaptizedPublisher.requires_male());
    }
}

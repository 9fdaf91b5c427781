//! JSON snapshot of the two tables read by the pairing engine

use crate::StoreError;
use ministerial_domain::{FamilyLink, Student};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Complete export of students and declared family links
///
/// ```json
/// { "students": [ { "id": "s1", "gender": "male" } ], "family_links": [] }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntitySnapshot {
    /// Every student record
    #[serde(default)]
    pub students: Vec<Student>,

    /// Every declared family link
    #[serde(default)]
    pub family_links: Vec<FamilyLink>,
}

impl EntitySnapshot {
    /// Build a snapshot from parts
    pub fn new(students: Vec<Student>, family_links: Vec<FamilyLink>) -> Self {
        Self {
            students,
            family_links,
        }
    }

    /// Parse a snapshot from JSON text
    pub fn from_json(json: &str) -> Result<Self, StoreError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read a snapshot from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json(&contents)
    }
}

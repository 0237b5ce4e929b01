//! School directory domain types

use serde::Serialize;
use std::collections::HashMap;

/// SAT results for one school
///
/// Every score is independently optional: `None` means the source field was
/// missing or not an integer, never zero.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SatData {
    pub num_test_takers: Option<i32>,
    pub avg_reading_score: Option<i32>,
    pub avg_math_score: Option<i32>,
    pub avg_writing_score: Option<i32>,
}

impl SatData {
    /// True when no score parsed
    pub fn is_empty(&self) -> bool {
        self.num_test_takers.is_none()
            && self.avg_reading_score.is_none()
            && self.avg_math_score.is_none()
            && self.avg_writing_score.is_none()
    }
}

/// One merged school record
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct School {
    pub name: String,
    pub overview: Option<String>,
    pub sat_data: Option<SatData>,
}

impl School {
    /// School with only a name
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            overview: None,
            sat_data: None,
        }
    }

    pub fn with_overview(mut self, overview: Option<String>) -> Self {
        self.overview = overview;
        self
    }

    pub fn with_sat_data(mut self, sat_data: SatData) -> Self {
        self.sat_data = Some(sat_data);
        self
    }
}

/// Read-only mapping from school name to merged record
///
/// Only [`crate::builder::DirectoryBuilder`] creates one; every entry's key
/// equals its `School::name`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Directory {
    schools: HashMap<String, School>,
}

impl Directory {
    pub(crate) fn from_map(schools: HashMap<String, School>) -> Self {
        Self { schools }
    }

    /// All schools, in unspecified order
    pub fn schools(&self) -> impl Iterator<Item = &School> {
        self.schools.values()
    }

    /// All schools sorted by name
    pub fn schools_sorted(&self) -> Vec<&School> {
        let mut schools: Vec<&School> = self.schools.values().collect();
        schools.sort_by(|a, b| a.name.cmp(&b.name));
        schools
    }

    /// Exact-name lookup
    pub fn lookup(&self, name: &str) -> Option<&School> {
        self.schools.get(name)
    }

    pub fn len(&self) -> usize {
        self.schools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.schools.is_empty()
    }
}

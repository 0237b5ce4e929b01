//! Directory merge
//!
//! **Merge order:**
//! 1. Directory records populate the map (later duplicates replace earlier ones)
//! 2. SAT records overlay `sat_data` onto existing schools, or create a
//!    name-only school when the name is new
//!
//! The SAT pass assumes the directory pass has finished; callers feed the two
//! sources sequentially.

use std::collections::HashMap;

use crate::fetcher::RawRecord;
use crate::models::{Directory, School};
use crate::parser::{parse_directory_record, parse_sat_record};

/// Per-source counters collected while building
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BuildStats {
    pub directory_records: usize,
    pub directory_skipped: usize,
    /// Directory records that replaced an earlier record with the same name
    pub directory_duplicates: usize,
    pub sat_records: usize,
    pub sat_skipped: usize,
    /// SAT records attached to a school from the directory pass
    pub sat_merged: usize,
    /// Schools that only appear in the SAT dataset
    pub sat_only_schools: usize,
}

/// Mutable name → school map, finalized into a [`Directory`]
#[derive(Debug, Default)]
pub struct DirectoryBuilder {
    schools: HashMap<String, School>,
    stats: BuildStats,
}

impl DirectoryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a directory from both sources in one call
    pub fn build(directory_records: &[RawRecord], sat_records: &[RawRecord]) -> Directory {
        let mut builder = Self::new();
        builder.apply_directory_records(directory_records);
        builder.apply_sat_records(sat_records);
        builder.finish()
    }

    /// Insert or replace one school per parseable directory record
    pub fn apply_directory_records(&mut self, records: &[RawRecord]) {
        for (index, raw) in records.iter().enumerate() {
            self.stats.directory_records += 1;

            let school = match parse_directory_record(raw) {
                Ok(school) => school,
                Err(e) => {
                    self.stats.directory_skipped += 1;
                    tracing::debug!(index, "Skipping directory record: {}", e);
                    continue;
                }
            };

            if self.schools.insert(school.name.clone(), school).is_some() {
                self.stats.directory_duplicates += 1;
            }
        }
    }

    /// Attach SAT data by name, creating name-only schools for unknown names
    pub fn apply_sat_records(&mut self, records: &[RawRecord]) {
        for (index, raw) in records.iter().enumerate() {
            self.stats.sat_records += 1;

            let (name, sat_data) = match parse_sat_record(raw) {
                Ok(parsed) => parsed,
                Err(e) => {
                    self.stats.sat_skipped += 1;
                    tracing::debug!(index, "Skipping SAT record: {}", e);
                    continue;
                }
            };

            match self.schools.get_mut(&name) {
                Some(school) => {
                    school.sat_data = Some(sat_data);
                    self.stats.sat_merged += 1;
                }
                None => {
                    let school = School::new(name.clone()).with_sat_data(sat_data);
                    self.schools.insert(name, school);
                    self.stats.sat_only_schools += 1;
                }
            }
        }
    }

    pub fn stats(&self) -> BuildStats {
        self.stats
    }

    /// Freeze the map
    pub fn finish(self) -> Directory {
        let stats = self.stats;
        tracing::info!(
            schools = self.schools.len(),
            directory_records = stats.directory_records,
            directory_skipped = stats.directory_skipped,
            sat_records = stats.sat_records,
            sat_skipped = stats.sat_skipped,
            sat_merged = stats.sat_merged,
            sat_only = stats.sat_only_schools,
            "School directory built"
        );

        Directory::from_map(self.schools)
    }
}

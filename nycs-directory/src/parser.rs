//! Record parsing for the two source schemas
//!
//! Record-level problems yield [`SkipRecord`]; a bad score field only blanks
//! that one score.

use serde_json::{Map, Value};

use crate::error::{MissingScore, SkipRecord};
use crate::fetcher::RawRecord;
use crate::models::{SatData, School};

pub const SCHOOL_NAME: &str = "school_name";
pub const OVERVIEW_PARAGRAPH: &str = "overview_paragraph";
pub const NUM_TEST_TAKERS: &str = "num_of_sat_test_takers";
pub const AVG_READING_SCORE: &str = "sat_critical_reading_avg_score";
pub const AVG_MATH_SCORE: &str = "sat_math_avg_score";
pub const AVG_WRITING_SCORE: &str = "sat_writing_avg_score";

/// Parse one element of the directory dataset
///
/// Both `school_name` and `overview_paragraph` must be strings. An empty
/// `overview_paragraph` means "no overview".
pub fn parse_directory_record(raw: &RawRecord) -> Result<School, SkipRecord> {
    let object = as_object(raw)?;
    let name = school_name(object)?;

    let overview = object
        .get(OVERVIEW_PARAGRAPH)
        .and_then(Value::as_str)
        .ok_or(SkipRecord::MissingField(OVERVIEW_PARAGRAPH))?;
    let overview = (!overview.is_empty()).then(|| overview.to_string());

    Ok(School::new(name).with_overview(overview))
}

/// Parse one element of the SAT dataset into its key and scores
pub fn parse_sat_record(raw: &RawRecord) -> Result<(String, SatData), SkipRecord> {
    let object = as_object(raw)?;
    let name = school_name(object)?;

    let sat_data = SatData {
        num_test_takers: score_or_none(object, NUM_TEST_TAKERS),
        avg_reading_score: score_or_none(object, AVG_READING_SCORE),
        avg_math_score: score_or_none(object, AVG_MATH_SCORE),
        avg_writing_score: score_or_none(object, AVG_WRITING_SCORE),
    };

    Ok((name, sat_data))
}

/// Parse a base-10 integer carried as a JSON string
///
/// The provider suppresses small cohorts with placeholders such as `"s"`.
pub fn parse_score(object: &Map<String, Value>, field: &'static str) -> Result<i32, MissingScore> {
    let text = match object.get(field) {
        None => {
            return Err(MissingScore {
                field,
                reason: "field missing".to_string(),
            })
        }
        Some(Value::String(text)) => text,
        Some(_) => {
            return Err(MissingScore {
                field,
                reason: "not a string".to_string(),
            })
        }
    };

    text.parse::<i32>().map_err(|e| MissingScore {
        field,
        reason: format!("'{}': {}", text, e),
    })
}

fn score_or_none(object: &Map<String, Value>, field: &'static str) -> Option<i32> {
    match parse_score(object, field) {
        Ok(score) => Some(score),
        Err(e) => {
            tracing::debug!("{}", e);
            None
        }
    }
}

fn as_object(raw: &RawRecord) -> Result<&Map<String, Value>, SkipRecord> {
    raw.as_object().ok_or(SkipRecord::NotAnObject)
}

fn school_name(object: &Map<String, Value>) -> Result<String, SkipRecord> {
    let name = object
        .get(SCHOOL_NAME)
        .and_then(Value::as_str)
        .ok_or(SkipRecord::MissingField(SCHOOL_NAME))?;

    if name.is_empty() {
        return Err(SkipRecord::EmptyField(SCHOOL_NAME));
    }

    Ok(name.to_string())
}

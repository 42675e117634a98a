//! Rust structs that represent the persisted records.
//!
//! These models define the structure of data as it is stored in and retrieved
//! from the statistics store. They differ from the API report, which combines
//! a record with the risk assessment and the employment trend.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Persisted statistics for one occupation code. `code` is the upsert key.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct OccupationRecord {
    pub code: String,
    /// The title as the user searched it.
    pub job_title: String,
    pub standardized_title: String,
    pub category: Option<String>,
    pub current_employment: Option<u64>,
    pub projected_employment: Option<u64>,
    pub percent_change: Option<f64>,
    pub annual_job_openings: Option<u64>,
    pub median_wage: Option<f64>,
    pub last_updated: NaiveDate,
}

impl OccupationRecord {
    /// Whole days between `last_updated` and `today`; negative for future dates.
    pub fn age_in_days(&self, today: NaiveDate) -> i64 {
        (today - self.last_updated).num_days()
    }

    pub fn has_statistics(&self) -> bool {
        self.current_employment.is_some()
            || self.projected_employment.is_some()
            || self.percent_change.is_some()
            || self.annual_job_openings.is_some()
            || self.median_wage.is_some()
    }
}

/// An alternative title pointing at an occupation code.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct TitleAlias {
    pub title: String,
    pub code: String,
    pub is_primary: bool,
}

impl TitleAlias {
    pub fn new(title: impl Into<String>, code: impl Into<String>, is_primary: bool) -> Self {
        Self {
            title: title.into(),
            code: code.into(),
            is_primary,
        }
    }
}

/// One entry of the lookup log.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct SearchRecord {
    pub job_title: String,
    pub searched_at: DateTime<Utc>,
    pub year_1_risk: f64,
    pub year_5_risk: f64,
    pub risk_category: String,
    pub job_category: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct PopularSearch {
    pub job_title: String,
    pub count: u64,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct RiskRanking {
    pub job_title: String,
    pub average_risk: f64,
}

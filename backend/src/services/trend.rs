//! Linear employment trend used for charting.

use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

pub const TREND_YEARS: RangeInclusive<i32> = 2022..=2032;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
pub struct EmploymentTrend {
    pub years: Vec<i32>,
    pub employment: Vec<i64>,
}

impl EmploymentTrend {
    /// Trend over [`TREND_YEARS`]. Both series are empty when either endpoint
    /// is missing.
    pub fn between(current: Option<u64>, projected: Option<u64>) -> Self {
        match (current, projected) {
            (Some(current), Some(projected)) => {
                let years: Vec<i32> = TREND_YEARS.collect();
                let employment = generate_trend(current as i64, projected as i64, years.len());
                EmploymentTrend { years, employment }
            }
            _ => EmploymentTrend::default(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.employment.is_empty()
    }
}

/// `value(i) = current + i * (projected - current) / (n - 1)`, truncated
/// toward zero, for `i` in `0..n`.
pub fn generate_trend(current: i64, projected: i64, years: usize) -> Vec<i64> {
    match years {
        0 => Vec::new(),
        1 => vec![current],
        n => {
            let step = (projected - current) as f64 / (n - 1) as f64;
            (0..n)
                .map(|i| (current as f64 + step * i as f64) as i64)
                .collect()
        }
    }
}

//! Generic data models for the `adapters` crate.
//!
//! These models define the wire shape of the upstream time-series API and the
//! normalized representations (occupation series, projections, search matches)
//! handed to the backend services.

use serde::{Deserialize, Serialize};

/// Status literal the upstream API uses for a successful request.
pub const REQUEST_SUCCEEDED: &str = "REQUEST_SUCCEEDED";

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct TimeSeriesResponse {
    pub status: String,
    #[serde(rename = "responseTime", default)]
    pub response_time: u64,
    #[serde(default)]
    pub message: Vec<String>,
    #[serde(rename = "Results", default)]
    pub results: SeriesResults,
    /// Set on the offline sample; never sent by the upstream.
    #[serde(skip)]
    pub sample: bool,
}

impl TimeSeriesResponse {
    pub fn succeeded(&self) -> bool {
        self.status == REQUEST_SUCCEEDED
    }

    /// Flattens every series into `(series, year, period, value, footnotes)`
    /// rows, keeping upstream order.
    pub fn observations(&self) -> Vec<SeriesObservation> {
        self.results
            .series
            .iter()
            .flat_map(|series| {
                series.data.iter().map(move |point| SeriesObservation {
                    series_id: series.series_id.clone(),
                    year: point.year.clone(),
                    period: point.period.clone(),
                    value: point.value.clone(),
                    footnotes: point.footnotes.clone(),
                })
            })
            .collect()
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct SeriesResults {
    #[serde(default)]
    pub series: Vec<Series>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Series {
    #[serde(rename = "seriesID")]
    pub series_id: String,
    #[serde(default)]
    pub data: Vec<DataPoint>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct DataPoint {
    pub year: String,
    pub period: String,
    #[serde(rename = "periodName", default)]
    pub period_name: String,
    pub value: String,
    #[serde(default)]
    pub footnotes: Vec<serde_json::Value>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct SeriesObservation {
    pub series_id: String,
    pub year: String,
    pub period: String,
    pub value: String,
    pub footnotes: Vec<serde_json::Value>,
}

/// Statistics for one occupation code, as extracted from the time-series API.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct OccupationSeries {
    pub code: String,
    pub observations: Vec<SeriesObservation>,
    pub latest_value: Option<f64>,
    pub sample: bool,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    pub current_employment: u64,
    pub projected_employment: u64,
    pub percent_change: f64,
    pub annual_job_openings: u64,
}

/// A candidate returned by the fallback occupation search.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct OccupationMatch {
    pub code: String,
    pub title: String,
}

impl OccupationMatch {
    pub fn new(code: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            title: title.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn decodes_upstream_payload_and_flattens_series() {
        let body = r#"{
            "status": "REQUEST_SUCCEEDED",
            "responseTime": 42,
            "message": [],
            "Results": {
                "series": [
                    {
                        "seriesID": "OEU1025560000000015125201",
                        "data": [
                            {"year": "2024", "period": "A01", "periodName": "Annual", "value": "132270", "footnotes": [{}]},
                            {"year": "2023", "period": "A01", "periodName": "Annual", "value": "127260", "footnotes": []}
                        ]
                    }
                ]
            }
        }"#;

        let response: TimeSeriesResponse = serde_json::from_str(body).unwrap();
        assert!(response.succeeded());
        assert!(!response.sample);

        let rows = response.observations();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].series_id, "OEU1025560000000015125201");
        assert_eq!(rows[0].year, "2024");
        assert_eq!(rows[1].value, "127260");
    }

    #[test]
    fn failed_payload_without_results_still_decodes() {
        let body = r#"{"status": "REQUEST_NOT_PROCESSED", "message": ["daily threshold reached"]}"#;
        let response: TimeSeriesResponse = serde_json::from_str(body).unwrap();
        assert!(!response.succeeded());
        assert!(response.observations().is_empty());
        assert_eq!(response.message, vec!["daily threshold reached".to_string()]);
    }
}

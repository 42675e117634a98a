//! Employment projection table.
//!
//! Published ten-year projections for the handful of occupations the service
//! currently tracks. Codes outside the table yield `AdapterError::NoProjection`.

use crate::errors::AdapterError;
use crate::models::Projection;

const PROJECTIONS: &[(&str, Projection)] = &[
    (
        "15-1252",
        Projection {
            current_employment: 1_365_500,
            projected_employment: 1_572_900,
            percent_change: 15.2,
            annual_job_openings: 162_900,
        },
    ),
    (
        "29-1141",
        Projection {
            current_employment: 3_130_600,
            projected_employment: 3_458_200,
            percent_change: 10.5,
            annual_job_openings: 203_200,
        },
    ),
    (
        "43-9021",
        Projection {
            current_employment: 149_900,
            projected_employment: 112_400,
            percent_change: -25.0,
            annual_job_openings: 14_200,
        },
    ),
];

pub fn employment_projection(code: &str) -> Result<Projection, AdapterError> {
    PROJECTIONS
        .iter()
        .find(|(known, _)| *known == code)
        .map(|(_, projection)| *projection)
        .ok_or_else(|| AdapterError::NoProjection {
            code: code.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_code_returns_projection() {
        let projection = employment_projection("29-1141").unwrap();
        assert_eq!(projection.current_employment, 3_130_600);
        assert_eq!(projection.projected_employment, 3_458_200);
        assert_eq!(projection.annual_job_openings, 203_200);
    }

    #[test]
    fn declining_occupation_keeps_negative_change() {
        let projection = employment_projection("43-9021").unwrap();
        assert!(projection.percent_change < 0.0);
    }

    #[test]
    fn unknown_code_is_labeled_error() {
        let err = employment_projection("47-2111").unwrap_err();
        assert_eq!(err.kind(), "no_projection");
        assert!(err.to_string().contains("47-2111"));
    }
}

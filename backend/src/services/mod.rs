//! Module for core business logic services.
//!
//! This module encapsulates the job lookup pipeline: title resolution, risk
//! scoring, trend interpolation, the aggregating `JobDataService` and title
//! autocomplete.

pub mod data_aggregator;
pub mod resolver;
pub mod risk_scorer;
pub mod title_search;
pub mod trend;

pub use data_aggregator::{ComparisonRow, JobDataService, JobReport, ReportSource};
pub use resolver::{MatchSource, OccupationResolver, Resolution};
pub use risk_scorer::{RiskAssessment, RiskModel, RiskTier};
pub use title_search::TitleSearch;
pub use trend::EmploymentTrend;

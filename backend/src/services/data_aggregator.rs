//! End-to-end job lookup.
//!
//! `JobDataService` composes the resolver, the statistics repository, the
//! upstream fetcher and the risk model into one report per job title. Missing
//! statistics are fetched on a store miss and written back; collaborator
//! failures end up as `warnings` on the report instead of aborting the lookup.

use std::sync::Arc;

use chrono::NaiveDate;
use jobrisk_adapters::{AdapterError, OccupationSeries, Projection, StatisticsFetcher};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::classification::{normalize_title, GENERAL_CATEGORY};
use crate::database::repository::{search_entry, today};
use crate::database::{OccupationRecord, StatisticsRepository, TitleAlias};
use crate::errors::{LookupFailure, PipelineError};
use crate::services::resolver::{MatchSource, OccupationResolver, Resolution};
use crate::services::risk_scorer::{RiskAssessment, RiskModel, RiskTier};
use crate::services::trend::EmploymentTrend;

/// Where the statistics on a report came from.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ReportSource {
    Store,
    Upstream,
    Sample,
    Unavailable,
}

impl ReportSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReportSource::Store => "store",
            ReportSource::Upstream => "upstream",
            ReportSource::Sample => "sample",
            ReportSource::Unavailable => "unavailable",
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct JobReport {
    pub job_title: String,
    pub occupation_code: String,
    pub job_category: String,
    pub matched_by: MatchSource,

    pub employment: Option<u64>,
    pub projected_employment: Option<u64>,
    pub employment_change_percent: Option<f64>,
    pub annual_job_openings: Option<u64>,
    pub median_wage: Option<f64>,

    pub year_1_risk: f64,
    pub year_5_risk: f64,
    pub risk_category: RiskTier,
    pub risk_factors: Vec<String>,
    pub protective_factors: Vec<String>,
    pub analysis: String,

    pub last_updated: NaiveDate,
    pub source: ReportSource,
    pub trend: EmploymentTrend,
    /// Labels of collaborator failures recovered during the lookup.
    pub warnings: Vec<String>,
}

/// One row of a multi-job comparison. Failed lookups keep only `query`,
/// `job_title`, `source` and `error`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ComparisonRow {
    pub query: String,
    pub job_title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub occupation_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year_1_risk: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year_5_risk: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub risk_category: Option<RiskTier>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_employment: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub projected_growth: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub median_wage: Option<f64>,
    pub source: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ComparisonRow {
    fn from_report(query: &str, report: &JobReport) -> Self {
        Self {
            query: query.to_string(),
            job_title: report.job_title.clone(),
            occupation_code: Some(report.occupation_code.clone()),
            year_1_risk: Some(report.year_1_risk),
            year_5_risk: Some(report.year_5_risk),
            risk_category: Some(report.risk_category),
            current_employment: report.employment,
            projected_growth: report.employment_change_percent,
            median_wage: report.median_wage,
            source: report.source.as_str().to_string(),
            error: None,
        }
    }

    fn from_failure(query: &str, failure: &LookupFailure) -> Self {
        Self {
            query: query.to_string(),
            job_title: query.to_string(),
            occupation_code: None,
            year_1_risk: None,
            year_5_risk: None,
            risk_category: None,
            current_employment: None,
            projected_growth: None,
            median_wage: None,
            source: failure.source.clone(),
            error: Some(failure.error.clone()),
        }
    }
}

struct Statistics {
    record: OccupationRecord,
    source: ReportSource,
    warnings: Vec<String>,
}

pub struct JobDataService {
    resolver: OccupationResolver,
    repository: StatisticsRepository,
    fetcher: Arc<StatisticsFetcher>,
    risk_model: RiskModel,
}

impl JobDataService {
    pub fn new(
        resolver: OccupationResolver,
        repository: StatisticsRepository,
        fetcher: Arc<StatisticsFetcher>,
    ) -> Self {
        Self {
            resolver,
            repository,
            fetcher,
            risk_model: RiskModel::default(),
        }
    }

    pub fn with_risk_model(mut self, risk_model: RiskModel) -> Self {
        self.risk_model = risk_model;
        self
    }

    pub fn resolver(&self) -> &OccupationResolver {
        &self.resolver
    }

    pub fn repository(&self) -> &StatisticsRepository {
        &self.repository
    }

    pub fn fetcher(&self) -> &Arc<StatisticsFetcher> {
        &self.fetcher
    }

    pub fn risk_model(&self) -> RiskModel {
        self.risk_model
    }

    /// Builds the full report for `raw_title`.
    ///
    /// Fails only for a blank title or a title that resolves to no occupation
    /// code; partial statistics still produce a report.
    pub async fn get_complete_job_data(&self, raw_title: &str) -> Result<JobReport, LookupFailure> {
        let title = raw_title.trim();
        if normalize_title(title).is_empty() {
            return Err(LookupFailure::new(raw_title, &PipelineError::InvalidTitle));
        }

        let resolution = self.resolver.resolve(title).await;
        if resolution.is_unknown() {
            info!(title = %title, "no occupation code for job title");
            let err = PipelineError::NotFound {
                title: title.to_string(),
            };
            return Err(LookupFailure::new(title, &err));
        }

        if resolution.matched_by == MatchSource::Search {
            let alias = TitleAlias::new(resolution.title.clone(), resolution.code.clone(), false);
            self.repository.add_alias(alias).await;
        }

        let statistics = self.load_statistics(title, &resolution).await;
        let category = preferred_category(&resolution, statistics.record.category.as_deref());
        let risk = self.risk_model.assess(&resolution.title, &category);

        self.repository
            .record_search(search_entry(
                title,
                risk.year_1_risk,
                risk.year_5_risk,
                risk.tier.as_str(),
                &category,
            ))
            .await;

        Ok(assemble(resolution, category, statistics, risk))
    }

    /// Looks up each title in order. Blank entries are skipped.
    pub async fn compare_jobs(&self, titles: &[String]) -> Vec<ComparisonRow> {
        let mut rows = Vec::with_capacity(titles.len());
        for query in titles.iter().map(|t| t.trim()).filter(|t| !t.is_empty()) {
            let row = match self.get_complete_job_data(query).await {
                Ok(report) => ComparisonRow::from_report(query, &report),
                Err(failure) => ComparisonRow::from_failure(query, &failure),
            };
            rows.push(row);
        }
        rows
    }

    async fn load_statistics(&self, raw_title: &str, resolution: &Resolution) -> Statistics {
        let code = resolution.code.as_str();
        if let Some(record) = self.repository.get_fresh(code).await {
            debug!(code = %code, "serving stored statistics");
            return Statistics {
                record,
                source: ReportSource::Store,
                warnings: Vec::new(),
            };
        }

        let mut failures = FetchFailures::default();
        let series = failures.recover(code, self.fetcher.fetch_occupation_data(code).await);
        let projection = failures.recover(code, self.fetcher.fetch_projection(code));

        let record = fetched_record(raw_title, resolution, series.as_ref(), projection);
        let from_sample = series.as_ref().is_some_and(|series| series.sample);

        let source = if from_sample {
            ReportSource::Sample
        } else if record.has_statistics() {
            ReportSource::Upstream
        } else {
            ReportSource::Unavailable
        };

        let mut warnings = failures.labels;
        if source == ReportSource::Upstream {
            if failures.transient {
                // a partial record would shadow the complete one until it goes stale
                debug!(code = %code, "not persisting statistics after a failed fetch");
            } else if self.repository.upsert(record.clone()).await {
                info!(code = %code, "persisted fetched statistics");
            } else if self.repository.is_configured() {
                warnings.push("store_write_failed".to_string());
            }
        }

        Statistics {
            record,
            source,
            warnings,
        }
    }
}

/// Collaborator failures seen while fetching one record.
#[derive(Default)]
struct FetchFailures {
    labels: Vec<String>,
    /// Set when a failure was anything other than a mapping gap.
    transient: bool,
}

impl FetchFailures {
    /// Turns a collaborator failure into a warning label.
    fn recover<T>(&mut self, code: &str, result: Result<T, AdapterError>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(err) => {
                if err.is_mapping_gap() {
                    debug!(code = %code, error = %err, "statistics not mapped for code");
                } else {
                    warn!(code = %code, error = %err, "statistics fetch failed");
                    self.transient = true;
                }
                self.labels.push(err.kind().to_string());
                None
            }
        }
    }
}

fn fetched_record(
    raw_title: &str,
    resolution: &Resolution,
    series: Option<&OccupationSeries>,
    projection: Option<Projection>,
) -> OccupationRecord {
    OccupationRecord {
        code: resolution.code.clone(),
        job_title: raw_title.to_string(),
        standardized_title: resolution.title.clone(),
        category: Some(resolution.category.clone()),
        current_employment: projection.map(|p| p.current_employment),
        projected_employment: projection.map(|p| p.projected_employment),
        percent_change: projection.map(|p| p.percent_change),
        annual_job_openings: projection.map(|p| p.annual_job_openings),
        median_wage: series.and_then(|series| series.latest_value),
        last_updated: today(),
    }
}

/// The resolver's category wins unless it is the generic fallback.
fn preferred_category(resolution: &Resolution, stored: Option<&str>) -> String {
    if resolution.category != GENERAL_CATEGORY {
        return resolution.category.clone();
    }
    stored
        .filter(|category| !category.is_empty())
        .unwrap_or(GENERAL_CATEGORY)
        .to_string()
}

fn assemble(
    resolution: Resolution,
    category: String,
    statistics: Statistics,
    risk: RiskAssessment,
) -> JobReport {
    let Statistics {
        record,
        source,
        warnings,
    } = statistics;

    JobReport {
        trend: EmploymentTrend::between(record.current_employment, record.projected_employment),
        job_title: resolution.title,
        occupation_code: resolution.code,
        job_category: category,
        matched_by: resolution.matched_by,
        employment: record.current_employment,
        projected_employment: record.projected_employment,
        employment_change_percent: record.percent_change,
        annual_job_openings: record.annual_job_openings,
        median_wage: record.median_wage,
        year_1_risk: risk.year_1_risk,
        year_5_risk: risk.year_5_risk,
        risk_category: risk.tier,
        risk_factors: risk.risk_factors,
        protective_factors: risk.protective_factors,
        analysis: risk.analysis,
        last_updated: record.last_updated,
        source,
        warnings,
    }
}

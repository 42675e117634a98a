//! Memoizing statistics fetcher.
//!
//! `StatisticsFetcher` owns the upstream API handle and the bounded response
//! cache. It maps occupation codes to series ids, converts raw responses into
//! `OccupationSeries`, and serves the labeled sample series when no upstream
//! credential is configured.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::Datelike;
use tracing::{debug, info, warn};

use crate::bls::{sample_response, TimeSeriesApi};
use crate::cache::{CacheKey, ResponseCache};
use crate::errors::AdapterError;
use crate::models::{OccupationSeries, Projection, TimeSeriesResponse};
use crate::projections::employment_projection;

/// Occupation code to OES employment series id.
const SERIES_MAPPING: &[(&str, &str)] = &[
    ("15-1252", "OEU1025560000000015125201"),
    ("11-9111", "OEU1025560000000011911101"),
];

/// Series used to probe upstream reachability.
const CONNECTIVITY_SERIES: &str = "LAUCN040010000000005";

/// Years of history requested for an occupation.
const HISTORY_YEARS: i32 = 5;

pub fn series_id_for(code: &str) -> Option<&'static str> {
    SERIES_MAPPING
        .iter()
        .find(|(known, _)| *known == code)
        .map(|(_, series)| *series)
}

pub struct StatisticsFetcher {
    api: Option<Arc<dyn TimeSeriesApi>>,
    cache: ResponseCache,
    upstream_calls: AtomicU64,
}

impl StatisticsFetcher {
    pub fn new(api: Arc<dyn TimeSeriesApi>, cache: ResponseCache) -> Self {
        Self {
            api: Some(api),
            cache,
            upstream_calls: AtomicU64::new(0),
        }
    }

    /// A fetcher without upstream credentials; every series is the sample.
    pub fn offline() -> Self {
        Self {
            api: None,
            cache: ResponseCache::default(),
            upstream_calls: AtomicU64::new(0),
        }
    }

    pub fn is_offline(&self) -> bool {
        self.api.is_none()
    }

    pub fn cache(&self) -> &ResponseCache {
        &self.cache
    }

    /// Number of requests actually sent upstream.
    pub fn upstream_calls(&self) -> u64 {
        self.upstream_calls.load(Ordering::Relaxed)
    }

    /// Fetches raw series, memoized by `(sorted series, start, end)`.
    ///
    /// Two concurrent misses on the same key may both reach the upstream;
    /// the later insert simply replaces the earlier one.
    pub async fn fetch_time_series(
        &self,
        series_ids: &[String],
        start_year: i32,
        end_year: i32,
    ) -> Result<TimeSeriesResponse, AdapterError> {
        let Some(api) = self.api.as_ref() else {
            debug!(series = ?series_ids, "no BLS API key configured, serving sample series");
            return Ok(sample_response(series_ids));
        };

        let key = CacheKey::new(series_ids, start_year, end_year);
        if let Some(response) = self.cache.get(&key) {
            debug!(series = ?series_ids, start_year, end_year, "BLS response cache hit");
            return Ok(response);
        }

        self.upstream_calls.fetch_add(1, Ordering::Relaxed);
        let response = api
            .fetch(series_ids, start_year, end_year)
            .await
            .map_err(|err| {
                warn!(series = ?series_ids, error = %err, "BLS API request failed");
                err
            })?;

        if response.succeeded() {
            self.cache.insert(key, response.clone());
        }
        Ok(response)
    }

    /// Latest value and full series for `code`, over the last five years.
    pub async fn fetch_occupation_data(&self, code: &str) -> Result<OccupationSeries, AdapterError> {
        let current_year = chrono::Local::now().year();
        self.fetch_occupation_data_between(code, current_year - HISTORY_YEARS, current_year)
            .await
    }

    pub async fn fetch_occupation_data_between(
        &self,
        code: &str,
        start_year: i32,
        end_year: i32,
    ) -> Result<OccupationSeries, AdapterError> {
        let series_id = series_id_for(code).ok_or_else(|| AdapterError::NoSeriesMapping {
            code: code.to_string(),
        })?;

        info!(code = %code, series = series_id, "fetching BLS occupation series");
        let response = self
            .fetch_time_series(&[series_id.to_string()], start_year, end_year)
            .await?;

        parse_occupation_response(code, &response)
    }

    pub fn fetch_projection(&self, code: &str) -> Result<Projection, AdapterError> {
        employment_projection(code)
    }

    /// Whether the configured upstream answers a known series successfully.
    pub async fn check_connectivity(&self) -> bool {
        match self
            .fetch_time_series(&[CONNECTIVITY_SERIES.to_string()], 2020, 2020)
            .await
        {
            Ok(response) => response.succeeded() && !response.sample,
            Err(err) => {
                warn!(error = %err, "BLS connectivity check failed");
                false
            }
        }
    }
}

fn parse_occupation_response(
    code: &str,
    response: &TimeSeriesResponse,
) -> Result<OccupationSeries, AdapterError> {
    if !response.succeeded() {
        let message = if response.message.is_empty() {
            "Unknown error".to_string()
        } else {
            response.message.join("; ")
        };
        return Err(AdapterError::Upstream(message));
    }

    let observations = response.observations();
    let Some(first) = observations.first() else {
        return Err(AdapterError::NoData {
            code: code.to_string(),
        });
    };

    let latest_value = first.value.replace(',', "").trim().parse::<f64>().ok();

    Ok(OccupationSeries {
        code: code.to_string(),
        latest_value,
        observations,
        sample: response.sample,
    })
}

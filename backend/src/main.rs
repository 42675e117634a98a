//! Main entry point for the JobRisk backend.
//!
//! This file installs logging, loads the configuration, wires the store, the
//! upstream fetcher and the job pipeline together, and serves the API.

use std::sync::Arc;

use anyhow::Context;
use jobrisk_adapters::{CatalogSearch, HttpTimeSeriesApi, ResponseCache, StatisticsFetcher};
use jobrisk_backend::api::{self, AppState};
use jobrisk_backend::classification::ClassificationTable;
use jobrisk_backend::config::Config;
use jobrisk_backend::database::StatisticsRepository;
use jobrisk_backend::services::{JobDataService, OccupationResolver};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("jobrisk_backend=info,jobrisk_adapters=info")),
        )
        .init();

    let config = Config::from_env();
    let jobs = build_service(&config)?;

    if jobs.fetcher().is_offline() {
        warn!("BLS_API_KEY not set, serving sample statistics");
    } else if !jobs.fetcher().check_connectivity().await {
        warn!(url = %config.bls_api_url, "BLS API is not reachable, lookups will degrade");
    }

    let app = api::router(AppState::new(Arc::new(jobs)));
    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("cannot bind {}", config.bind_addr))?;
    info!("listening on {}", config.bind_addr);

    axum::serve(listener, app).await?;
    Ok(())
}

fn build_service(config: &Config) -> anyhow::Result<JobDataService> {
    let repository = StatisticsRepository::open(config.database_path.as_deref())
        .with_freshness_days(config.freshness_days);

    let fetcher = match &config.bls_api_key {
        Some(key) => {
            let api = HttpTimeSeriesApi::new(&config.bls_api_url, key, config.http_timeout)?;
            let cache = ResponseCache::new(config.cache_capacity, config.cache_ttl);
            StatisticsFetcher::new(Arc::new(api), cache)
        }
        None => StatisticsFetcher::offline(),
    };

    let resolver = OccupationResolver::new(
        Arc::new(ClassificationTable::with_defaults()),
        Arc::new(CatalogSearch),
    );

    Ok(JobDataService::new(resolver, repository, Arc::new(fetcher)).with_risk_model(config.risk_model))
}

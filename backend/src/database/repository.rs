//! Freshness-enforcing access to the statistics store.
//!
//! The repository is the only component the services talk to. It owns an
//! optional store; when the store is absent or failing, reads return `None`
//! and writes return `false`, and the failure is logged rather than raised.

use std::path::Path;
use std::sync::Arc;

use chrono::{Local, NaiveDate, Utc};
use tracing::{debug, info, warn};

use super::models::{OccupationRecord, PopularSearch, RiskRanking, SearchRecord, TitleAlias};
use super::queries::SqliteStore;
use super::StatisticsStore;
use crate::config::DEFAULT_FRESHNESS_DAYS;

pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

#[derive(Clone)]
pub struct StatisticsRepository {
    store: Option<Arc<dyn StatisticsStore>>,
    freshness_days: i64,
}

impl StatisticsRepository {
    pub fn new(store: Arc<dyn StatisticsStore>) -> Self {
        Self {
            store: Some(store),
            freshness_days: DEFAULT_FRESHNESS_DAYS,
        }
    }

    /// A repository with no backing store.
    pub fn unconfigured() -> Self {
        Self {
            store: None,
            freshness_days: DEFAULT_FRESHNESS_DAYS,
        }
    }

    /// Opens the SQLite store at `path`. A missing path or a store that
    /// cannot be opened yields an unconfigured repository, so lookups keep
    /// working without persistence.
    pub fn open(path: Option<&Path>) -> Self {
        let Some(path) = path else {
            warn!("DATABASE_PATH not set, statistics will not be persisted");
            return Self::unconfigured();
        };
        match SqliteStore::open(path) {
            Ok(store) => {
                info!(path = %path.display(), "using SQLite statistics store");
                Self::new(Arc::new(store))
            }
            Err(err) => {
                warn!(path = %path.display(), error = %err, "cannot open database, statistics will not be persisted");
                Self::unconfigured()
            }
        }
    }

    pub fn with_freshness_days(mut self, days: i64) -> Self {
        self.freshness_days = days;
        self
    }

    pub fn is_configured(&self) -> bool {
        self.store.is_some()
    }

    pub fn freshness_days(&self) -> i64 {
        self.freshness_days
    }

    pub async fn get_fresh(&self, code: &str) -> Option<OccupationRecord> {
        self.get_fresh_as_of(code, today()).await
    }

    /// The stored record for `code` if it is younger than the freshness
    /// window on `today`. Stale records stay in the store.
    pub async fn get_fresh_as_of(&self, code: &str, today: NaiveDate) -> Option<OccupationRecord> {
        let store = self.store.as_ref()?;
        let record = match store.latest_record(code).await {
            Ok(record) => record?,
            Err(err) => {
                warn!(code = %code, error = %err, "cannot read cached statistics");
                return None;
            }
        };

        let age = record.age_in_days(today);
        if age >= self.freshness_days {
            debug!(code = %code, age_days = age, "cached statistics are stale");
            return None;
        }
        Some(record)
    }

    pub async fn upsert(&self, record: OccupationRecord) -> bool {
        self.upsert_as_of(record, today()).await
    }

    /// Persists `record` stamped with `today`. Returns whether it was stored.
    pub async fn upsert_as_of(&self, mut record: OccupationRecord, today: NaiveDate) -> bool {
        let Some(store) = self.store.as_ref() else {
            return false;
        };
        record.last_updated = today;
        match store.upsert_record(&record).await {
            Ok(()) => true,
            Err(err) => {
                warn!(code = %record.code, error = %err, "cannot persist statistics");
                false
            }
        }
    }

    pub async fn add_alias(&self, alias: TitleAlias) -> bool {
        let Some(store) = self.store.as_ref() else {
            return false;
        };
        match store.insert_alias(&alias).await {
            Ok(inserted) => inserted,
            Err(err) => {
                warn!(title = %alias.title, error = %err, "cannot store title alias");
                false
            }
        }
    }

    pub async fn aliases(&self) -> Vec<TitleAlias> {
        let Some(store) = self.store.as_ref() else {
            return Vec::new();
        };
        store.aliases().await.unwrap_or_else(|err| {
            warn!(error = %err, "cannot load title aliases");
            Vec::new()
        })
    }

    pub async fn record_search(&self, search: SearchRecord) -> bool {
        let Some(store) = self.store.as_ref() else {
            return false;
        };
        match store.record_search(&search).await {
            Ok(()) => true,
            Err(err) => {
                warn!(title = %search.job_title, error = %err, "cannot log job search");
                false
            }
        }
    }

    pub async fn popular_searches(&self, limit: usize) -> Vec<PopularSearch> {
        let Some(store) = self.store.as_ref() else {
            return Vec::new();
        };
        store.popular_searches(limit).await.unwrap_or_else(|err| {
            warn!(error = %err, "cannot load popular searches");
            Vec::new()
        })
    }

    pub async fn highest_risk_jobs(&self, limit: usize) -> Vec<RiskRanking> {
        let Some(store) = self.store.as_ref() else {
            return Vec::new();
        };
        store.highest_risk_jobs(limit).await.unwrap_or_else(|err| {
            warn!(error = %err, "cannot load highest risk jobs");
            Vec::new()
        })
    }

    pub async fn lowest_risk_jobs(&self, limit: usize) -> Vec<RiskRanking> {
        let Some(store) = self.store.as_ref() else {
            return Vec::new();
        };
        store.lowest_risk_jobs(limit).await.unwrap_or_else(|err| {
            warn!(error = %err, "cannot load lowest risk jobs");
            Vec::new()
        })
    }

    pub async fn recent_searches(&self, limit: usize) -> Vec<SearchRecord> {
        let Some(store) = self.store.as_ref() else {
            return Vec::new();
        };
        store.recent_searches(limit).await.unwrap_or_else(|err| {
            warn!(error = %err, "cannot load recent searches");
            Vec::new()
        })
    }
}

/// Search-log entry for a lookup made now.
pub fn search_entry(
    job_title: &str,
    year_1_risk: f64,
    year_5_risk: f64,
    risk_category: &str,
    job_category: &str,
) -> SearchRecord {
    SearchRecord {
        job_title: job_title.to_string(),
        searched_at: Utc::now(),
        year_1_risk,
        year_5_risk,
        risk_category: risk_category.to_string(),
        job_category: job_category.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::MemoryStore;
    use crate::errors::StoreError;
    use async_trait::async_trait;
    use chrono::Duration;

    fn record(code: &str, last_updated: NaiveDate) -> OccupationRecord {
        OccupationRecord {
            code: code.to_string(),
            job_title: "Registered Nurse".to_string(),
            standardized_title: "Registered Nurse".to_string(),
            category: Some("Healthcare Practitioners".to_string()),
            current_employment: Some(3_130_600),
            projected_employment: Some(3_458_200),
            percent_change: Some(10.5),
            annual_job_openings: Some(203_200),
            median_wage: None,
            last_updated,
        }
    }

    async fn repository_with(record: OccupationRecord) -> StatisticsRepository {
        let store = Arc::new(MemoryStore::new());
        store.upsert_record(&record).await.unwrap();
        StatisticsRepository::new(store)
    }

    #[tokio::test]
    async fn record_from_89_days_ago_is_fresh() {
        let now = NaiveDate::from_ymd_opt(2026, 6, 1).unwrap();
        let repo = repository_with(record("29-1141", now - Duration::days(89))).await;
        assert!(repo.get_fresh_as_of("29-1141", now).await.is_some());
    }

    #[tokio::test]
    async fn record_from_91_days_ago_is_stale() {
        let now = NaiveDate::from_ymd_opt(2026, 6, 1).unwrap();
        let repo = repository_with(record("29-1141", now - Duration::days(91))).await;
        assert!(repo.get_fresh_as_of("29-1141", now).await.is_none());
    }

    #[tokio::test]
    async fn exactly_90_days_is_stale() {
        let now = NaiveDate::from_ymd_opt(2026, 6, 1).unwrap();
        let repo = repository_with(record("29-1141", now - Duration::days(90))).await;
        assert!(repo.get_fresh_as_of("29-1141", now).await.is_none());
    }

    #[tokio::test]
    async fn fresh_check_uses_real_clock_by_default() {
        let repo = repository_with(record("29-1141", today() - Duration::days(91))).await;
        assert!(repo.get_fresh("29-1141").await.is_none());

        let repo = repository_with(record("29-1141", today() - Duration::days(89))).await;
        assert!(repo.get_fresh("29-1141").await.is_some());
    }

    #[tokio::test]
    async fn stale_record_is_not_deleted() {
        let store = Arc::new(MemoryStore::new());
        let now = NaiveDate::from_ymd_opt(2026, 6, 1).unwrap();
        store
            .upsert_record(&record("29-1141", now - Duration::days(200)))
            .await
            .unwrap();
        let repo = StatisticsRepository::new(store.clone());

        assert!(repo.get_fresh_as_of("29-1141", now).await.is_none());
        assert!(store.latest_record("29-1141").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn upsert_stamps_today() {
        let store = Arc::new(MemoryStore::new());
        let repo = StatisticsRepository::new(store.clone());
        let stamped = NaiveDate::from_ymd_opt(2026, 6, 1).unwrap();
        let old = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap();

        assert!(repo.upsert_as_of(record("29-1141", old), stamped).await);
        let stored = store.latest_record("29-1141").await.unwrap().unwrap();
        assert_eq!(stored.last_updated, stamped);
    }

    #[tokio::test]
    async fn custom_window_applies() {
        let now = NaiveDate::from_ymd_opt(2026, 6, 1).unwrap();
        let repo = repository_with(record("29-1141", now - Duration::days(10)))
            .await
            .with_freshness_days(7);
        assert!(repo.get_fresh_as_of("29-1141", now).await.is_none());
    }

    struct BrokenStore;

    #[async_trait]
    impl StatisticsStore for BrokenStore {
        async fn latest_record(&self, _code: &str) -> Result<Option<OccupationRecord>, StoreError> {
            Err(StoreError::Unavailable("connection refused".to_string()))
        }
        async fn upsert_record(&self, _record: &OccupationRecord) -> Result<(), StoreError> {
            Err(StoreError::Unavailable("connection refused".to_string()))
        }
        async fn insert_alias(&self, _alias: &TitleAlias) -> Result<bool, StoreError> {
            Err(StoreError::Unavailable("connection refused".to_string()))
        }
        async fn aliases(&self) -> Result<Vec<TitleAlias>, StoreError> {
            Err(StoreError::Unavailable("connection refused".to_string()))
        }
        async fn record_search(&self, _search: &SearchRecord) -> Result<(), StoreError> {
            Err(StoreError::Unavailable("connection refused".to_string()))
        }
        async fn popular_searches(&self, _limit: usize) -> Result<Vec<PopularSearch>, StoreError> {
            Err(StoreError::Unavailable("connection refused".to_string()))
        }
        async fn highest_risk_jobs(&self, _limit: usize) -> Result<Vec<RiskRanking>, StoreError> {
            Err(StoreError::Unavailable("connection refused".to_string()))
        }
        async fn lowest_risk_jobs(&self, _limit: usize) -> Result<Vec<RiskRanking>, StoreError> {
            Err(StoreError::Unavailable("connection refused".to_string()))
        }
        async fn recent_searches(&self, _limit: usize) -> Result<Vec<SearchRecord>, StoreError> {
            Err(StoreError::Unavailable("connection refused".to_string()))
        }
    }

    #[tokio::test]
    async fn failing_store_degrades_to_no_data() {
        let repo = StatisticsRepository::new(Arc::new(BrokenStore));
        assert!(repo.get_fresh("29-1141").await.is_none());
        assert!(!repo.upsert(record("29-1141", today())).await);
        assert!(!repo.add_alias(TitleAlias::new("Nurse", "29-1141", false)).await);
        assert!(repo.aliases().await.is_empty());
        assert!(!repo.record_search(search_entry("Nurse", 15.0, 30.0, "Moderate", "Healthcare Practitioners")).await);
        assert!(repo.popular_searches(5).await.is_empty());
    }

    #[tokio::test]
    async fn unconfigured_repository_degrades_to_no_data() {
        let repo = StatisticsRepository::unconfigured();
        assert!(!repo.is_configured());
        assert!(repo.get_fresh("29-1141").await.is_none());
        assert!(!repo.upsert(record("29-1141", today())).await);
        assert!(repo.recent_searches(5).await.is_empty());
        assert!(repo.highest_risk_jobs(5).await.is_empty());
        assert!(repo.lowest_risk_jobs(5).await.is_empty());
    }

    #[tokio::test]
    async fn unopenable_database_degrades_to_unconfigured() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("jobs.db");

        let repository = StatisticsRepository::open(Some(&path));
        assert!(!repository.is_configured());
        assert!(repository.get_fresh("15-1252").await.is_none());
    }

    #[tokio::test]
    async fn openable_database_is_configured() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("jobs.db");

        let repository = StatisticsRepository::open(Some(&path));
        assert!(repository.is_configured());
        assert!(repository.upsert(record("15-1252", today())).await);
        assert!(repository.get_fresh("15-1252").await.is_some());
    }

    #[test]
    fn absent_database_path_is_unconfigured() {
        assert!(!StatisticsRepository::open(None).is_configured());
    }
}

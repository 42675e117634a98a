//! Process-local statistics store.
//!
//! Mirrors `SqliteStore` semantics on concurrent maps so the pipeline can run
//! with caching but without a database file.

use std::cmp::Ordering;
use std::collections::HashMap;

use async_trait::async_trait;
use dashmap::DashMap;
use parking_lot::{Mutex, RwLock};

use super::models::{OccupationRecord, PopularSearch, RiskRanking, SearchRecord, TitleAlias};
use super::StatisticsStore;
use crate::errors::StoreError;

#[derive(Default)]
pub struct MemoryStore {
    records: DashMap<String, OccupationRecord>,
    aliases: RwLock<Vec<TitleAlias>>,
    searches: Mutex<Vec<SearchRecord>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Average 5-year risk per title for titles searched more than once.
    fn risk_averages(&self) -> Vec<RiskRanking> {
        let mut totals: HashMap<String, (f64, u64)> = HashMap::new();
        for search in self.searches.lock().iter() {
            let entry = totals.entry(search.job_title.clone()).or_default();
            entry.0 += search.year_5_risk;
            entry.1 += 1;
        }
        totals
            .into_iter()
            .filter(|(_, (_, count))| *count > 1)
            .map(|(job_title, (sum, count))| RiskRanking {
                job_title,
                average_risk: sum / count as f64,
            })
            .collect()
    }
}

fn by_risk_then_title(a: &RiskRanking, b: &RiskRanking) -> Ordering {
    a.average_risk
        .total_cmp(&b.average_risk)
        .then_with(|| a.job_title.cmp(&b.job_title))
}

#[async_trait]
impl StatisticsStore for MemoryStore {
    async fn latest_record(&self, code: &str) -> Result<Option<OccupationRecord>, StoreError> {
        Ok(self.records.get(code).map(|entry| entry.value().clone()))
    }

    async fn upsert_record(&self, record: &OccupationRecord) -> Result<(), StoreError> {
        self.records.insert(record.code.clone(), record.clone());
        Ok(())
    }

    async fn insert_alias(&self, alias: &TitleAlias) -> Result<bool, StoreError> {
        let mut aliases = self.aliases.write();
        if aliases.iter().any(|known| known.title == alias.title) {
            return Ok(false);
        }
        aliases.push(alias.clone());
        Ok(true)
    }

    async fn aliases(&self) -> Result<Vec<TitleAlias>, StoreError> {
        let mut aliases = self.aliases.read().clone();
        aliases.sort_by(|a, b| {
            b.is_primary
                .cmp(&a.is_primary)
                .then_with(|| a.title.cmp(&b.title))
        });
        Ok(aliases)
    }

    async fn record_search(&self, search: &SearchRecord) -> Result<(), StoreError> {
        self.searches.lock().push(search.clone());
        Ok(())
    }

    async fn popular_searches(&self, limit: usize) -> Result<Vec<PopularSearch>, StoreError> {
        let mut counts: HashMap<String, u64> = HashMap::new();
        for search in self.searches.lock().iter() {
            *counts.entry(search.job_title.clone()).or_default() += 1;
        }
        let mut popular: Vec<PopularSearch> = counts
            .into_iter()
            .map(|(job_title, count)| PopularSearch { job_title, count })
            .collect();
        popular.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.job_title.cmp(&b.job_title)));
        popular.truncate(limit);
        Ok(popular)
    }

    async fn highest_risk_jobs(&self, limit: usize) -> Result<Vec<RiskRanking>, StoreError> {
        let mut rankings = self.risk_averages();
        rankings.sort_by(|a, b| {
            b.average_risk
                .total_cmp(&a.average_risk)
                .then_with(|| a.job_title.cmp(&b.job_title))
        });
        rankings.truncate(limit);
        Ok(rankings)
    }

    async fn lowest_risk_jobs(&self, limit: usize) -> Result<Vec<RiskRanking>, StoreError> {
        let mut rankings = self.risk_averages();
        rankings.sort_by(by_risk_then_title);
        rankings.truncate(limit);
        Ok(rankings)
    }

    async fn recent_searches(&self, limit: usize) -> Result<Vec<SearchRecord>, StoreError> {
        let searches = self.searches.lock();
        let mut recent: Vec<(usize, &SearchRecord)> = searches.iter().enumerate().collect();
        recent.sort_by(|(ia, a), (ib, b)| b.searched_at.cmp(&a.searched_at).then_with(|| ib.cmp(ia)));
        Ok(recent
            .into_iter()
            .take(limit)
            .map(|(_, search)| search.clone())
            .collect())
    }
}

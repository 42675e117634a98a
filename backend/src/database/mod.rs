//! Module for the statistics store and its access layer.
//!
//! `StatisticsStore` is the persistence seam: occupation records keyed by
//! code, the title-alias list and the lookup log. `SqliteStore` and
//! `MemoryStore` implement it; `StatisticsRepository` wraps an optional store
//! with the freshness window and degrades every failure to "no data".

pub mod memory;
pub mod models;
pub mod queries;
pub mod repository;
pub mod schema;

use async_trait::async_trait;

use crate::errors::StoreError;

pub use memory::MemoryStore;
pub use models::{OccupationRecord, PopularSearch, RiskRanking, SearchRecord, TitleAlias};
pub use queries::SqliteStore;
pub use repository::StatisticsRepository;

#[async_trait]
pub trait StatisticsStore: Send + Sync {
    /// Most recently updated record for `code`, regardless of age.
    async fn latest_record(&self, code: &str) -> Result<Option<OccupationRecord>, StoreError>;

    /// Inserts or replaces the record for `record.code`, keeping its
    /// `last_updated` as given.
    async fn upsert_record(&self, record: &OccupationRecord) -> Result<(), StoreError>;

    /// Adds an alias; `false` when the title is already present.
    async fn insert_alias(&self, alias: &TitleAlias) -> Result<bool, StoreError>;

    /// All aliases, primary titles first, then alphabetical.
    async fn aliases(&self) -> Result<Vec<TitleAlias>, StoreError>;

    async fn record_search(&self, search: &SearchRecord) -> Result<(), StoreError>;

    async fn popular_searches(&self, limit: usize) -> Result<Vec<PopularSearch>, StoreError>;

    /// Titles searched more than once, by descending average 5-year risk.
    async fn highest_risk_jobs(&self, limit: usize) -> Result<Vec<RiskRanking>, StoreError>;

    /// Titles searched more than once, by ascending average 5-year risk.
    async fn lowest_risk_jobs(&self, limit: usize) -> Result<Vec<RiskRanking>, StoreError>;

    async fn recent_searches(&self, limit: usize) -> Result<Vec<SearchRecord>, StoreError>;
}

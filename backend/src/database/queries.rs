//! SQLite-backed statistics store.
//!
//! This module centralizes all direct database operations. A single
//! connection is shared behind a mutex, and every statement runs on the
//! blocking thread pool so disk I/O never stalls the async workers.

use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;
use rusqlite::{params, Connection, OptionalExtension, Row};
use tracing::info;

use super::models::{OccupationRecord, PopularSearch, RiskRanking, SearchRecord, TitleAlias};
use super::schema::create_tables;
use super::StatisticsStore;
use crate::errors::StoreError;

const RECORD_COLUMNS: &str = "occupation_code, job_title, standardized_title, job_category,
    current_employment, projected_employment, percent_change,
    annual_job_openings, median_wage, last_updated";

pub struct SqliteStore {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteStore {
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref();
        let conn = Connection::open(path)?;
        create_tables(&conn)?;
        info!(path = %path.display(), "statistics store initialized");
        Ok(Self::from_connection(conn))
    }

    pub fn open_in_memory() -> Result<Self, StoreError> {
        let conn = Connection::open_in_memory()?;
        create_tables(&conn)?;
        Ok(Self::from_connection(conn))
    }

    fn from_connection(conn: Connection) -> Self {
        Self {
            conn: Arc::new(Mutex::new(conn)),
        }
    }

    /// Runs `op` against the connection on the blocking pool.
    async fn run<T, F>(&self, op: F) -> Result<T, StoreError>
    where
        T: Send + 'static,
        F: FnOnce(&Connection) -> Result<T, rusqlite::Error> + Send + 'static,
    {
        let conn = Arc::clone(&self.conn);
        tokio::task::spawn_blocking(move || {
            let conn = conn.lock();
            op(&conn)
        })
        .await
        .map_err(|err| StoreError::Unavailable(format!("store task failed: {}", err)))?
        .map_err(StoreError::from)
    }
}

fn to_sql_count(value: Option<u64>) -> Option<i64> {
    value.and_then(|v| i64::try_from(v).ok())
}

fn from_sql_count(value: Option<i64>) -> Option<u64> {
    value.and_then(|v| u64::try_from(v).ok())
}

fn record_from_row(row: &Row<'_>) -> rusqlite::Result<OccupationRecord> {
    Ok(OccupationRecord {
        code: row.get(0)?,
        job_title: row.get(1)?,
        standardized_title: row.get(2)?,
        category: row.get(3)?,
        current_employment: from_sql_count(row.get(4)?),
        projected_employment: from_sql_count(row.get(5)?),
        percent_change: row.get(6)?,
        annual_job_openings: from_sql_count(row.get(7)?),
        median_wage: row.get(8)?,
        last_updated: row.get(9)?,
    })
}

fn ranking_from_row(row: &Row<'_>) -> rusqlite::Result<RiskRanking> {
    Ok(RiskRanking {
        job_title: row.get(0)?,
        average_risk: row.get(1)?,
    })
}

fn limit_param(limit: usize) -> i64 {
    i64::try_from(limit).unwrap_or(i64::MAX)
}

fn risk_rankings(conn: &Connection, order: &str, limit: usize) -> rusqlite::Result<Vec<RiskRanking>> {
    let sql = format!(
        "SELECT job_title, AVG(year_5_risk) AS avg_risk
         FROM job_searches
         GROUP BY job_title
         HAVING COUNT(*) > 1
         ORDER BY avg_risk {order}, job_title ASC
         LIMIT ?1"
    );
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt
        .query_map(params![limit_param(limit)], ranking_from_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(rows)
}

#[async_trait]
impl StatisticsStore for SqliteStore {
    async fn latest_record(&self, code: &str) -> Result<Option<OccupationRecord>, StoreError> {
        let code = code.to_string();
        self.run(move |conn| {
            let sql = format!(
                "SELECT {RECORD_COLUMNS} FROM occupation_records
                 WHERE occupation_code = ?1
                 ORDER BY last_updated DESC
                 LIMIT 1"
            );
            conn.query_row(&sql, params![code], record_from_row).optional()
        })
        .await
    }

    async fn upsert_record(&self, record: &OccupationRecord) -> Result<(), StoreError> {
        let record = record.clone();
        self.run(move |conn| {
            conn.execute(
                "INSERT INTO occupation_records (
                    occupation_code, job_title, standardized_title, job_category,
                    current_employment, projected_employment, percent_change,
                    annual_job_openings, median_wage, last_updated
                ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)
                ON CONFLICT(occupation_code) DO UPDATE SET
                    job_title = excluded.job_title,
                    standardized_title = excluded.standardized_title,
                    job_category = excluded.job_category,
                    current_employment = excluded.current_employment,
                    projected_employment = excluded.projected_employment,
                    percent_change = excluded.percent_change,
                    annual_job_openings = excluded.annual_job_openings,
                    median_wage = excluded.median_wage,
                    last_updated = excluded.last_updated",
                params![
                    record.code,
                    record.job_title,
                    record.standardized_title,
                    record.category,
                    to_sql_count(record.current_employment),
                    to_sql_count(record.projected_employment),
                    record.percent_change,
                    to_sql_count(record.annual_job_openings),
                    record.median_wage,
                    record.last_updated,
                ],
            )?;
            Ok(())
        })
        .await
    }

    async fn insert_alias(&self, alias: &TitleAlias) -> Result<bool, StoreError> {
        let alias = alias.clone();
        self.run(move |conn| {
            let inserted = conn.execute(
                "INSERT OR IGNORE INTO title_aliases (title, soc_code, is_primary) VALUES (?1, ?2, ?3)",
                params![alias.title, alias.code, alias.is_primary],
            )?;
            Ok(inserted == 1)
        })
        .await
    }

    async fn aliases(&self) -> Result<Vec<TitleAlias>, StoreError> {
        self.run(|conn| {
            let mut stmt = conn.prepare(
                "SELECT title, soc_code, is_primary FROM title_aliases
                 ORDER BY is_primary DESC, title",
            )?;
            let aliases = stmt
                .query_map([], |row| {
                    Ok(TitleAlias {
                        title: row.get(0)?,
                        code: row.get(1)?,
                        is_primary: row.get(2)?,
                    })
                })?
                .collect::<rusqlite::Result<Vec<_>>>()?;
            Ok(aliases)
        })
        .await
    }

    async fn record_search(&self, search: &SearchRecord) -> Result<(), StoreError> {
        let search = search.clone();
        self.run(move |conn| {
            conn.execute(
                "INSERT INTO job_searches (
                    job_title, searched_at, year_1_risk, year_5_risk, risk_category, job_category
                ) VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                params![
                    search.job_title,
                    search.searched_at,
                    search.year_1_risk,
                    search.year_5_risk,
                    search.risk_category,
                    search.job_category,
                ],
            )?;
            Ok(())
        })
        .await
    }

    async fn popular_searches(&self, limit: usize) -> Result<Vec<PopularSearch>, StoreError> {
        self.run(move |conn| {
            let mut stmt = conn.prepare(
                "SELECT job_title, COUNT(*) AS count
                 FROM job_searches
                 GROUP BY job_title
                 ORDER BY count DESC, job_title ASC
                 LIMIT ?1",
            )?;
            let rows = stmt
                .query_map(params![limit_param(limit)], |row| {
                    Ok(PopularSearch {
                        job_title: row.get(0)?,
                        count: from_sql_count(row.get(1)?).unwrap_or_default(),
                    })
                })?
                .collect::<rusqlite::Result<Vec<_>>>()?;
            Ok(rows)
        })
        .await
    }

    async fn highest_risk_jobs(&self, limit: usize) -> Result<Vec<RiskRanking>, StoreError> {
        self.run(move |conn| risk_rankings(conn, "DESC", limit)).await
    }

    async fn lowest_risk_jobs(&self, limit: usize) -> Result<Vec<RiskRanking>, StoreError> {
        self.run(move |conn| risk_rankings(conn, "ASC", limit)).await
    }

    async fn recent_searches(&self, limit: usize) -> Result<Vec<SearchRecord>, StoreError> {
        self.run(move |conn| {
            let mut stmt = conn.prepare(
                "SELECT job_title, searched_at, year_1_risk, year_5_risk, risk_category, job_category
                 FROM job_searches
                 ORDER BY searched_at DESC, id DESC
                 LIMIT ?1",
            )?;
            let rows = stmt
                .query_map(params![limit_param(limit)], |row| {
                    Ok(SearchRecord {
                        job_title: row.get(0)?,
                        searched_at: row.get(1)?,
                        year_1_risk: row.get(2)?,
                        year_5_risk: row.get(3)?,
                        risk_category: row.get(4)?,
                        job_category: row.get(5)?,
                    })
                })?
                .collect::<rusqlite::Result<Vec<_>>>()?;
            Ok(rows)
        })
        .await
    }
}

//! Database schema creation.

use rusqlite::{Connection, Result};

/// Create all tables and indexes.
pub fn create_tables(conn: &Connection) -> Result<()> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS occupation_records (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            occupation_code TEXT UNIQUE NOT NULL,
            job_title TEXT NOT NULL,
            standardized_title TEXT NOT NULL,
            job_category TEXT,
            current_employment INTEGER,
            projected_employment INTEGER,
            percent_change REAL,
            annual_job_openings INTEGER,
            median_wage REAL,
            last_updated TEXT NOT NULL
        )",
        [],
    )?;

    conn.execute(
        "CREATE TABLE IF NOT EXISTS title_aliases (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            title TEXT UNIQUE NOT NULL,
            soc_code TEXT NOT NULL,
            is_primary INTEGER NOT NULL DEFAULT 0
        )",
        [],
    )?;

    conn.execute(
        "CREATE TABLE IF NOT EXISTS job_searches (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            job_title TEXT NOT NULL,
            searched_at TEXT NOT NULL,
            year_1_risk REAL NOT NULL,
            year_5_risk REAL NOT NULL,
            risk_category TEXT NOT NULL,
            job_category TEXT NOT NULL
        )",
        [],
    )?;

    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_records_updated ON occupation_records(occupation_code, last_updated DESC)",
        [],
    )?;
    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_searches_title ON job_searches(job_title)",
        [],
    )?;
    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_searches_time ON job_searches(searched_at DESC)",
        [],
    )?;

    Ok(())
}

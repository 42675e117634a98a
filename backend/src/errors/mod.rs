//! Global application error types.
//!
//! This module defines the error types used across the backend: store
//! failures (always recovered at the repository boundary), pipeline failures,
//! and `LookupFailure`, the serialized form callers receive when a job lookup
//! cannot produce a report.

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum PipelineError {
    #[error("Job title must not be empty")]
    InvalidTitle,
    #[error("No BLS data available for '{title}'")]
    NotFound { title: String },
}

impl PipelineError {
    pub fn kind(&self) -> &'static str {
        match self {
            PipelineError::InvalidTitle => "invalid_title",
            PipelineError::NotFound { .. } => "not_found",
        }
    }
}

/// What a caller sees when no report could be produced.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct LookupFailure {
    pub error: String,
    pub kind: String,
    pub job_title: String,
    pub source: String,
}

impl LookupFailure {
    pub fn new(job_title: impl Into<String>, err: &PipelineError) -> Self {
        Self {
            error: err.to_string(),
            kind: err.kind().to_string(),
            job_title: job_title.into(),
            source: "error".to_string(),
        }
    }
}

//! Handler functions for the job report API.
//!
//! These functions parse the query string, call into `JobDataService` and map
//! a `LookupFailure` to the matching HTTP status.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use tracing::debug;

use crate::api::AppState;
use crate::errors::LookupFailure;

#[derive(Debug, Deserialize)]
pub struct JobQuery {
    pub title: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CompareQuery {
    pub titles: Option<String>,
}

fn failure_status(failure: &LookupFailure) -> StatusCode {
    match failure.kind.as_str() {
        "invalid_title" => StatusCode::BAD_REQUEST,
        _ => StatusCode::NOT_FOUND,
    }
}

pub async fn get_job(State(state): State<AppState>, Query(query): Query<JobQuery>) -> Response {
    let title = query.title.unwrap_or_default();
    debug!(title = %title, "job report requested");
    match state.jobs.get_complete_job_data(&title).await {
        Ok(report) => Json(report).into_response(),
        Err(failure) => (failure_status(&failure), Json(failure)).into_response(),
    }
}

pub async fn compare_jobs(
    State(state): State<AppState>,
    Query(query): Query<CompareQuery>,
) -> Response {
    let titles: Vec<String> = query
        .titles
        .unwrap_or_default()
        .split(',')
        .map(str::to_string)
        .collect();
    Json(state.jobs.compare_jobs(&titles).await).into_response()
}

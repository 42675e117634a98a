//! Defines the HTTP routes for job reports.

use axum::{routing::get, Router};

use super::handlers::{compare_jobs, get_job};
use crate::api::AppState;

pub fn job_router() -> Router<AppState> {
    Router::new()
        .route("/api/jobs", get(get_job))
        .route("/api/jobs/compare", get(compare_jobs))
}

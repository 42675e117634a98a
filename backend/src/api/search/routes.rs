//! Defines the HTTP routes for title autocomplete and search statistics.

use axum::{routing::get, Router};

use super::handlers::{highest_risk, lowest_risk, popular_searches, recent_searches, search_titles};
use crate::api::AppState;

pub fn search_router() -> Router<AppState> {
    Router::new()
        .route("/api/titles", get(search_titles))
        .route("/api/searches/popular", get(popular_searches))
        .route("/api/searches/recent", get(recent_searches))
        .route("/api/searches/highest-risk", get(highest_risk))
        .route("/api/searches/lowest-risk", get(lowest_risk))
}

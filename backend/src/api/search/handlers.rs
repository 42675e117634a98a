//! Handler functions for title autocomplete and the search log.

use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;

use crate::api::AppState;
use crate::database::{PopularSearch, RiskRanking, SearchRecord, TitleAlias};
use crate::services::title_search::DEFAULT_LIMIT;

#[derive(Debug, Deserialize)]
pub struct TitleQuery {
    pub q: Option<String>,
    pub limit: Option<usize>,
}

#[derive(Debug, Deserialize)]
pub struct LimitQuery {
    pub limit: Option<usize>,
}

impl LimitQuery {
    fn limit(&self) -> usize {
        self.limit.unwrap_or(DEFAULT_LIMIT)
    }
}

pub async fn search_titles(
    State(state): State<AppState>,
    Query(query): Query<TitleQuery>,
) -> Json<Vec<TitleAlias>> {
    let text = query.q.unwrap_or_default();
    let limit = query.limit.unwrap_or(DEFAULT_LIMIT);
    Json(state.titles.search_titles(&text, limit).await)
}

pub async fn popular_searches(
    State(state): State<AppState>,
    Query(query): Query<LimitQuery>,
) -> Json<Vec<PopularSearch>> {
    Json(state.jobs.repository().popular_searches(query.limit()).await)
}

pub async fn recent_searches(
    State(state): State<AppState>,
    Query(query): Query<LimitQuery>,
) -> Json<Vec<SearchRecord>> {
    Json(state.jobs.repository().recent_searches(query.limit()).await)
}

pub async fn highest_risk(
    State(state): State<AppState>,
    Query(query): Query<LimitQuery>,
) -> Json<Vec<RiskRanking>> {
    Json(state.jobs.repository().highest_risk_jobs(query.limit()).await)
}

pub async fn lowest_risk(
    State(state): State<AppState>,
    Query(query): Query<LimitQuery>,
) -> Json<Vec<RiskRanking>> {
    Json(state.jobs.repository().lowest_risk_jobs(query.limit()).await)
}

//! Central module for organizing the application's API endpoints.
//!
//! Job reports and comparisons live under `/api/jobs`; title autocomplete and
//! the search-log views live under `/api/titles` and `/api/searches`.

pub mod job;
pub mod search;

use std::sync::Arc;

use axum::{routing::get, Router};

use crate::services::{JobDataService, TitleSearch};

#[derive(Clone)]
pub struct AppState {
    pub jobs: Arc<JobDataService>,
    pub titles: TitleSearch,
}

impl AppState {
    pub fn new(jobs: Arc<JobDataService>) -> Self {
        let titles = TitleSearch::new(jobs.repository().clone());
        Self { jobs, titles }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(root_handler))
        .merge(job::routes::job_router())
        .merge(search::routes::search_router())
        .with_state(state)
}

async fn root_handler() -> &'static str {
    "Welcome to JobRisk!"
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classification::ClassificationTable;
    use crate::database::{MemoryStore, StatisticsRepository};
    use crate::services::OccupationResolver;
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use jobrisk_adapters::{CatalogSearch, StatisticsFetcher};
    use serde_json::Value;
    use tower::ServiceExt;

    fn app() -> Router {
        let resolver = OccupationResolver::new(
            Arc::new(ClassificationTable::with_defaults()),
            Arc::new(CatalogSearch),
        );
        let repository = StatisticsRepository::new(Arc::new(MemoryStore::new()));
        let jobs = JobDataService::new(resolver, repository, Arc::new(StatisticsFetcher::offline()));
        router(AppState::new(Arc::new(jobs)))
    }

    async fn get_json(app: Router, uri: &str) -> (StatusCode, Value) {
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, body)
    }

    #[tokio::test]
    async fn root_answers() {
        let response = app()
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn job_report_is_returned() {
        let (status, body) = get_json(app(), "/api/jobs?title=Registered%20Nurse").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["occupation_code"], "29-1141");
        assert_eq!(body["job_category"], "Healthcare Practitioners");
        assert_eq!(body["risk_category"], "Moderate");
        assert_eq!(body["source"], "upstream");
        assert_eq!(body["employment"], 3_130_600);
        assert_eq!(body["warnings"][0], "no_series_mapping");
    }

    #[tokio::test]
    async fn unknown_title_is_not_found() {
        let (status, body) = get_json(app(), "/api/jobs?title=Astronaut").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["kind"], "not_found");
        assert_eq!(body["source"], "error");
    }

    #[tokio::test]
    async fn missing_title_is_bad_request() {
        let (status, body) = get_json(app(), "/api/jobs").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["kind"], "invalid_title");
    }

    #[tokio::test]
    async fn comparison_lists_rows_in_order() {
        let (status, body) = get_json(app(), "/api/jobs/compare?titles=Lawyer,Astronaut").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body[0]["query"], "Lawyer");
        assert_eq!(body[0]["occupation_code"], "23-1011");
        assert_eq!(body[1]["source"], "error");
    }

    #[tokio::test]
    async fn titles_autocomplete() {
        let (status, body) = get_json(app(), "/api/titles?q=data&limit=1").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.as_array().map(Vec::len), Some(1));
        assert_eq!(body[0]["title"], "Data Scientist");
    }

    #[tokio::test]
    async fn search_log_views_reflect_lookups() {
        let app = app();
        get_json(app.clone(), "/api/jobs?title=Lawyer").await;
        get_json(app.clone(), "/api/jobs?title=Lawyer").await;

        let (status, popular) = get_json(app.clone(), "/api/searches/popular").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(popular[0]["job_title"], "Lawyer");
        assert_eq!(popular[0]["count"], 2);

        let (_, highest) = get_json(app.clone(), "/api/searches/highest-risk?limit=5").await;
        assert_eq!(highest[0]["average_risk"], 45.0);

        let (_, recent) = get_json(app, "/api/searches/recent?limit=1").await;
        assert_eq!(recent.as_array().map(Vec::len), Some(1));
    }
}

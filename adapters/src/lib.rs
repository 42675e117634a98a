//! Core `adapters` crate for abstracting the labor-statistics collaborators.
//!
//! This crate defines the `TimeSeriesApi` and `OccupationSearch` traits, which
//! outline the external operations the backend consumes, and provides the
//! concrete BLS transport, the memoizing `StatisticsFetcher`, the employment
//! projection table and the occupation catalog search.

pub mod bls;
pub mod cache;
pub mod errors;
pub mod fetcher;
pub mod models;
pub mod projections;
pub mod search;

pub use bls::{sample_response, HttpTimeSeriesApi, TimeSeriesApi, BLS_API_URL};
pub use cache::{CacheKey, ResponseCache};
pub use errors::AdapterError;
pub use fetcher::StatisticsFetcher;
pub use models::{
    DataPoint, OccupationMatch, OccupationSeries, Projection, Series, SeriesObservation,
    SeriesResults, TimeSeriesResponse, REQUEST_SUCCEEDED,
};
pub use search::{CatalogSearch, OccupationSearch};

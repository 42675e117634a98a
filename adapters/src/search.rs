//! Fallback occupation search.
//!
//! The resolver only reaches this collaborator when neither an exact nor a
//! partial match exists in the classification table.

use async_trait::async_trait;

use crate::errors::AdapterError;
use crate::models::OccupationMatch;

/// Searches an external occupation catalog for a free-text title.
#[async_trait]
pub trait OccupationSearch: Send + Sync {
    async fn search(&self, query: &str) -> Result<Vec<OccupationMatch>, AdapterError>;
}

const SOC_CATALOG: &[(&str, &str)] = &[
    ("11-1011", "Chief Executives"),
    ("11-2011", "Advertising and Promotions Managers"),
    ("11-3031", "Financial Managers"),
    ("15-1252", "Software Developers"),
    ("15-1211", "Computer Systems Analysts"),
    ("15-1231", "Computer Network Support Specialists"),
    ("25-1011", "Business Teachers, Postsecondary"),
    ("25-2021", "Elementary School Teachers"),
    ("29-1051", "Pharmacists"),
    ("29-1141", "Registered Nurses"),
    ("41-3091", "Sales Representatives of Services"),
    ("43-4051", "Customer Service Representatives"),
    ("43-9021", "Data Entry Keyers"),
    ("53-3032", "Heavy and Tractor-Trailer Truck Drivers"),
];

/// Case-insensitive substring search over a fixed SOC catalog.
#[derive(Debug, Default, Clone, Copy)]
pub struct CatalogSearch;

impl CatalogSearch {
    pub fn matches(query: &str) -> Vec<OccupationMatch> {
        let query = query.to_lowercase();
        SOC_CATALOG
            .iter()
            .filter(|(_, title)| title.to_lowercase().contains(&query))
            .map(|(code, title)| OccupationMatch::new(*code, *title))
            .collect()
    }
}

#[async_trait]
impl OccupationSearch for CatalogSearch {
    async fn search(&self, query: &str) -> Result<Vec<OccupationMatch>, AdapterError> {
        Ok(Self::matches(query))
    }
}

//! Resolves free-text job titles to SOC codes.
//!
//! Resolution tries, in order: an exact match of the normalized title in the
//! classification table, the first partial (substring) match in table order,
//! and finally the fallback occupation search. Discoveries made through the
//! search are registered back into the shared table.

use std::sync::Arc;

use jobrisk_adapters::OccupationSearch;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::classification::{
    category_for_code, normalize_title, ClassificationTable, GENERAL_CATEGORY, UNKNOWN_CODE,
};

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum MatchSource {
    Exact,
    Partial,
    Search,
    Unmatched,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub code: String,
    /// The raw title for table matches, the catalog title for search matches.
    pub title: String,
    pub category: String,
    pub matched_by: MatchSource,
}

impl Resolution {
    fn from_code(code: String, title: &str, matched_by: MatchSource) -> Self {
        let category = category_for_code(&code).to_string();
        Self {
            code,
            title: title.to_string(),
            category,
            matched_by,
        }
    }

    pub fn unmatched(title: &str) -> Self {
        Self {
            code: UNKNOWN_CODE.to_string(),
            title: title.to_string(),
            category: GENERAL_CATEGORY.to_string(),
            matched_by: MatchSource::Unmatched,
        }
    }

    pub fn is_unknown(&self) -> bool {
        self.code == UNKNOWN_CODE
    }
}

pub struct OccupationResolver {
    table: Arc<ClassificationTable>,
    search: Arc<dyn OccupationSearch>,
}

impl OccupationResolver {
    pub fn new(table: Arc<ClassificationTable>, search: Arc<dyn OccupationSearch>) -> Self {
        Self { table, search }
    }

    pub fn table(&self) -> &Arc<ClassificationTable> {
        &self.table
    }

    /// Never fails; an unclassifiable title yields the unknown sentinel.
    pub async fn resolve(&self, raw_title: &str) -> Resolution {
        let normalized = normalize_title(raw_title);
        if normalized.is_empty() {
            return Resolution::unmatched(raw_title);
        }

        if let Some(code) = self.table.lookup_exact(&normalized) {
            debug!(title = %raw_title, code = %code, "exact title match");
            return Resolution::from_code(code, raw_title, MatchSource::Exact);
        }

        if let Some((key, code)) = self.table.find_partial(&normalized) {
            debug!(title = %raw_title, key = %key, code = %code, "partial title match");
            return Resolution::from_code(code, raw_title, MatchSource::Partial);
        }

        let candidates = match self.search.search(raw_title).await {
            Ok(candidates) => candidates,
            Err(err) => {
                warn!(title = %raw_title, error = %err, "occupation search failed");
                Vec::new()
            }
        };

        match candidates.into_iter().next() {
            Some(candidate) => {
                info!(
                    title = %raw_title,
                    code = %candidate.code,
                    matched = %candidate.title,
                    "registering title discovered by occupation search"
                );
                self.table
                    .register(normalize_title(&candidate.title), candidate.code.clone());
                Resolution::from_code(candidate.code, &candidate.title, MatchSource::Search)
            }
            None => Resolution::unmatched(raw_title),
        }
    }
}

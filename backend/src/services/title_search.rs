//! Job title autocomplete over the stored alias list.

use tracing::debug;

use crate::database::{StatisticsRepository, TitleAlias};

pub const DEFAULT_LIMIT: usize = 10;

/// Titles offered when the store has no aliases.
const FALLBACK_TITLES: &[(&str, &str, bool)] = &[
    ("Software Developer", "15-1252", true),
    ("Software Engineer", "15-1252", false),
    ("Web Developer", "15-1254", true),
    ("Registered Nurse", "29-1141", true),
    ("Nurse", "29-1141", false),
    ("Teacher", "25-2021", false),
    ("Elementary School Teacher", "25-2021", true),
    ("Lawyer", "23-1011", true),
    ("Attorney", "23-1011", false),
    ("Accountant", "13-2011", true),
    ("Architect", "17-1011", true),
    ("Doctor", "29-1215", false),
    ("Physician", "29-1215", true),
    ("Project Manager", "11-3021", true),
    ("Product Manager", "11-2021", true),
    ("Data Scientist", "15-2051", true),
    ("Data Analyst", "15-2041", true),
];

pub fn fallback_titles() -> Vec<TitleAlias> {
    FALLBACK_TITLES
        .iter()
        .map(|(title, code, primary)| TitleAlias::new(*title, *code, *primary))
        .collect()
}

#[derive(Clone)]
pub struct TitleSearch {
    repository: StatisticsRepository,
}

impl TitleSearch {
    pub fn new(repository: StatisticsRepository) -> Self {
        Self { repository }
    }

    pub async fn candidates(&self) -> Vec<TitleAlias> {
        let aliases = self.repository.aliases().await;
        if aliases.is_empty() {
            debug!("no stored title aliases, using built-in titles");
            return fallback_titles();
        }
        aliases
    }

    pub async fn search_titles(&self, query: &str, limit: usize) -> Vec<TitleAlias> {
        rank_titles(self.candidates().await, query, limit)
    }
}

/// Exact matches, then prefix matches, then substring matches, all
/// case-insensitive. An empty query lists primary titles.
pub fn rank_titles(titles: Vec<TitleAlias>, query: &str, limit: usize) -> Vec<TitleAlias> {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return titles
            .into_iter()
            .filter(|alias| alias.is_primary)
            .take(limit)
            .collect();
    }

    let mut exact = Vec::new();
    let mut prefix = Vec::new();
    let mut contains = Vec::new();
    for alias in titles {
        let lowered = alias.title.to_lowercase();
        if lowered == query {
            exact.push(alias);
        } else if lowered.starts_with(&query) {
            prefix.push(alias);
        } else if lowered.contains(&query) {
            contains.push(alias);
        }
    }

    let mut ranked: Vec<TitleAlias> = Vec::new();
    for alias in exact.into_iter().chain(prefix).chain(contains) {
        if !ranked.contains(&alias) {
            ranked.push(alias);
        }
    }
    ranked.truncate(limit);
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::MemoryStore;
    use pretty_assertions::assert_eq;
    use std::sync::Arc;

    fn titles(results: &[TitleAlias]) -> Vec<&str> {
        results.iter().map(|alias| alias.title.as_str()).collect()
    }

    #[test]
    fn exact_then_prefix_then_contains() {
        let ranked = rank_titles(fallback_titles(), "teacher", 10);
        assert_eq!(titles(&ranked), vec!["Teacher", "Elementary School Teacher"]);

        let ranked = rank_titles(fallback_titles(), "data", 10);
        assert_eq!(titles(&ranked), vec!["Data Scientist", "Data Analyst"]);

        let ranked = rank_titles(fallback_titles(), "DEVELOPER", 10);
        assert_eq!(titles(&ranked), vec!["Software Developer", "Web Developer"]);
    }

    #[test]
    fn prefix_matches_precede_substring_matches() {
        let ranked = rank_titles(fallback_titles(), "nurse", 10);
        assert_eq!(titles(&ranked), vec!["Nurse", "Registered Nurse"]);

        let ranked = rank_titles(fallback_titles(), "pro", 10);
        assert_eq!(titles(&ranked), vec!["Project Manager", "Product Manager"]);
    }

    #[test]
    fn empty_query_lists_primary_titles() {
        let ranked = rank_titles(fallback_titles(), "  ", 3);
        assert_eq!(
            titles(&ranked),
            vec!["Software Developer", "Web Developer", "Registered Nurse"]
        );
    }

    #[test]
    fn results_are_limited() {
        assert_eq!(rank_titles(fallback_titles(), "e", 4).len(), 4);
        assert!(rank_titles(fallback_titles(), "zzz", 10).is_empty());
    }

    #[tokio::test]
    async fn unconfigured_store_uses_built_in_titles() {
        let search = TitleSearch::new(StatisticsRepository::unconfigured());
        assert_eq!(search.candidates().await.len(), 17);
        let ranked = search.search_titles("lawyer", DEFAULT_LIMIT).await;
        assert_eq!(ranked, vec![TitleAlias::new("Lawyer", "23-1011", true)]);
    }

    #[tokio::test]
    async fn stored_aliases_replace_built_in_titles() {
        let repository = StatisticsRepository::new(Arc::new(MemoryStore::new()));
        repository
            .add_alias(TitleAlias::new("Pharmacists", "29-1051", false))
            .await;
        let search = TitleSearch::new(repository);

        assert_eq!(search.candidates().await.len(), 1);
        let ranked = search.search_titles("pharm", DEFAULT_LIMIT).await;
        assert_eq!(titles(&ranked), vec!["Pharmacists"]);
        assert!(search.search_titles("lawyer", DEFAULT_LIMIT).await.is_empty());
    }
}

//! Shared title-to-code classification table.
//!
//! The table starts from a built-in list of common titles and grows when the
//! resolver discovers new titles through fallback search. Iteration order is
//! insertion order; partial matching depends on it, so the built-in list must
//! stay in its current order.

use std::collections::HashMap;

use parking_lot::RwLock;

const DEFAULT_TITLES: &[(&str, &str)] = &[
    ("software developer", "15-1252"),
    ("software engineer", "15-1252"),
    ("programmer", "15-1251"),
    ("web developer", "15-1254"),
    ("registered nurse", "29-1141"),
    ("nurse", "29-1141"),
    ("teacher", "25-2021"),
    ("elementary school teacher", "25-2021"),
    ("high school teacher", "25-2031"),
    ("lawyer", "23-1011"),
    ("attorney", "23-1011"),
    ("doctor", "29-1221"),
    ("physician", "29-1221"),
    ("accountant", "13-2011"),
    ("project manager", "11-3021"),
    ("product manager", "11-2021"),
    ("marketing manager", "11-2021"),
    ("retail salesperson", "41-2031"),
    ("cashier", "41-2011"),
    ("customer service representative", "43-4051"),
    ("truck driver", "53-3032"),
    ("receptionist", "43-4171"),
    ("data scientist", "15-2051"),
    ("data analyst", "15-2041"),
    ("business analyst", "13-1111"),
    ("financial analyst", "13-2051"),
    ("human resources specialist", "13-1071"),
    ("graphic designer", "27-1024"),
    ("police officer", "33-3051"),
    ("chef", "35-1011"),
    ("cook", "35-2014"),
    ("waiter", "35-3031"),
    ("waitress", "35-3031"),
    ("janitor", "37-2011"),
    ("administrative assistant", "43-6011"),
    ("executive assistant", "43-6011"),
    ("dental hygienist", "29-1292"),
    ("electrician", "47-2111"),
    ("plumber", "47-2152"),
    ("carpenter", "47-2031"),
    ("construction worker", "47-2061"),
    ("mechanic", "49-3023"),
    ("automotive mechanic", "49-3023"),
    ("taxi driver", "53-3054"),
    ("uber driver", "53-3054"),
    ("journalist", "27-3023"),
    ("reporter", "27-3023"),
    ("writer", "27-3042"),
    ("editor", "27-3041"),
    ("photographer", "27-4021"),
    ("court reporter", "23-2011"),
    ("stenographer", "23-2011"),
    ("digital court reporter", "23-2011"),
    ("travel agent", "41-4012"),
];

#[derive(Default)]
struct Entries {
    ordered: Vec<(String, String)>,
    positions: HashMap<String, usize>,
}

impl Entries {
    fn upsert(&mut self, key: String, code: String) {
        match self.positions.get(&key) {
            Some(&position) => self.ordered[position].1 = code,
            None => {
                self.positions.insert(key.clone(), self.ordered.len());
                self.ordered.push((key, code));
            }
        }
    }
}

#[derive(Default)]
pub struct ClassificationTable {
    entries: RwLock<Entries>,
}

impl ClassificationTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// A table seeded with the built-in title list.
    pub fn with_defaults() -> Self {
        Self::from_entries(DEFAULT_TITLES.iter().copied())
    }

    pub fn from_entries<'a>(entries: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        let mut inner = Entries::default();
        for (key, code) in entries {
            inner.upsert(key.to_string(), code.to_string());
        }
        Self {
            entries: RwLock::new(inner),
        }
    }

    pub fn lookup_exact(&self, key: &str) -> Option<String> {
        let entries = self.entries.read();
        entries
            .positions
            .get(key)
            .map(|&position| entries.ordered[position].1.clone())
    }

    /// First entry, in insertion order, whose key contains `key` or is
    /// contained in it.
    pub fn find_partial(&self, key: &str) -> Option<(String, String)> {
        self.entries
            .read()
            .ordered
            .iter()
            .find(|(entry, _)| key.contains(entry.as_str()) || entry.contains(key))
            .cloned()
    }

    /// Records a discovered `key -> code` mapping. Re-registering a key keeps
    /// its original position and replaces the code.
    pub fn register(&self, key: impl Into<String>, code: impl Into<String>) {
        self.entries.write().upsert(key.into(), code.into());
    }

    pub fn len(&self) -> usize {
        self.entries.read().ordered.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn snapshot(&self) -> Vec<(String, String)> {
        self.entries.read().ordered.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn defaults_preserve_declaration_order() {
        let table = ClassificationTable::with_defaults();
        let snapshot = table.snapshot();
        assert_eq!(snapshot.len(), DEFAULT_TITLES.len());
        assert_eq!(snapshot[0].0, "software developer");
        assert_eq!(snapshot.last().unwrap().0, "travel agent");
    }

    #[test]
    fn exact_lookup_returns_mapped_code() {
        let table = ClassificationTable::with_defaults();
        for (key, code) in DEFAULT_TITLES {
            assert_eq!(table.lookup_exact(key).as_deref(), Some(*code));
        }
        assert_eq!(table.lookup_exact("astronaut"), None);
    }

    #[test]
    fn partial_match_is_first_in_order() {
        let table = ClassificationTable::with_defaults();
        let (key, code) = table.find_partial("nurse practitioner").unwrap();
        assert_eq!(key, "nurse");
        assert_eq!(code, "29-1141");

        let (key, _) = table.find_partial("teach").unwrap();
        assert_eq!(key, "teacher");

        let (key, code) = table.find_partial("head chef").unwrap();
        assert_eq!(key, "chef");
        assert_eq!(code, "35-1011");
    }

    #[test]
    fn register_appends_and_updates_in_place() {
        let table = ClassificationTable::from_entries([("alpha", "11-1111"), ("beta", "22-2222")]);
        table.register("gamma", "33-3333");
        table.register("alpha", "44-4444");

        let snapshot = table.snapshot();
        assert_eq!(
            snapshot,
            vec![
                ("alpha".to_string(), "44-4444".to_string()),
                ("beta".to_string(), "22-2222".to_string()),
                ("gamma".to_string(), "33-3333".to_string()),
            ]
        );
    }

    #[test]
    fn concurrent_registrations_are_not_lost() {
        let table = Arc::new(ClassificationTable::new());
        let handles: Vec<_> = (0..8)
            .map(|worker| {
                let table = Arc::clone(&table);
                thread::spawn(move || {
                    for i in 0..50 {
                        table.register(format!("title {worker}-{i}"), "15-1252");
                        table.register("shared title", "29-1141");
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(table.len(), 8 * 50 + 1);
        assert_eq!(table.lookup_exact("shared title").as_deref(), Some("29-1141"));
        assert_eq!(table.lookup_exact("title 7-49").as_deref(), Some("15-1252"));
    }
}

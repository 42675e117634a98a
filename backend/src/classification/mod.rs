//! Occupation classification: SOC categories, title normalization and the
//! shared title-to-code table.

pub mod categories;
pub mod normalizer;
pub mod table;

pub use categories::{category_for_code, GENERAL_CATEGORY, UNKNOWN_CODE};
pub use normalizer::normalize_title;
pub use table::ClassificationTable;

//! SOC major-group prefixes and their category names.

/// Sentinel code for titles that could not be classified.
pub const UNKNOWN_CODE: &str = "00-0000";

/// Category for codes whose prefix is not a known major group.
pub const GENERAL_CATEGORY: &str = "General";

const SOC_CATEGORIES: &[(&str, &str)] = &[
    ("15-", "Computer and Mathematical"),
    ("11-", "Management"),
    ("13-", "Business and Financial"),
    ("17-", "Architecture and Engineering"),
    ("19-", "Life, Physical, and Social Science"),
    ("21-", "Community and Social Service"),
    ("23-", "Legal"),
    ("25-", "Educational Instruction"),
    ("27-", "Arts, Design, Entertainment, Sports, and Media"),
    ("29-", "Healthcare Practitioners"),
    ("31-", "Healthcare Support"),
    ("33-", "Protective Service"),
    ("35-", "Food Preparation and Serving"),
    ("37-", "Building and Grounds Cleaning and Maintenance"),
    ("39-", "Personal Care and Service"),
    ("41-", "Sales and Related"),
    ("43-", "Office and Administrative Support"),
    ("45-", "Farming, Fishing, and Forestry"),
    ("47-", "Construction and Extraction"),
    ("49-", "Installation, Maintenance, and Repair"),
    ("51-", "Production"),
    ("53-", "Transportation and Material Moving"),
];

pub fn category_for_code(code: &str) -> &'static str {
    SOC_CATEGORIES
        .iter()
        .find(|(prefix, _)| code.starts_with(prefix))
        .map(|(_, category)| *category)
        .unwrap_or(GENERAL_CATEGORY)
}

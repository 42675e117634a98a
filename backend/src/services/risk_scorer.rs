//! AI displacement risk scoring.
//!
//! Scores are deterministic lookups keyed by job category. The default model
//! reads a per-category (1-year, 5-year) table and derives the tier from the
//! 5-year figure; the keyword model matches the category against a few domain
//! keywords and returns a fixed profile.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Used when a category has no entry in the risk table.
pub const DEFAULT_RISK: (f64, f64) = (35.0, 55.0);

const MAX_FACTORS: usize = 5;

const CATEGORY_RISK: &[(&str, (f64, f64))] = &[
    ("Computer and Mathematical", (30.0, 50.0)),
    ("Management", (25.0, 45.0)),
    ("Business and Financial", (35.0, 55.0)),
    ("Architecture and Engineering", (20.0, 40.0)),
    ("Life, Physical, and Social Science", (15.0, 35.0)),
    ("Community and Social Service", (15.0, 30.0)),
    ("Legal", (25.0, 45.0)),
    ("Educational Instruction", (20.0, 35.0)),
    ("Arts, Design, Entertainment, Sports, and Media", (30.0, 50.0)),
    ("Healthcare Practitioners", (15.0, 30.0)),
    ("Healthcare Support", (20.0, 40.0)),
    ("Protective Service", (15.0, 30.0)),
    ("Food Preparation and Serving", (35.0, 60.0)),
    ("Building and Grounds Cleaning and Maintenance", (30.0, 55.0)),
    ("Personal Care and Service", (25.0, 45.0)),
    ("Sales and Related", (40.0, 65.0)),
    ("Office and Administrative Support", (45.0, 70.0)),
    ("Farming, Fishing, and Forestry", (30.0, 50.0)),
    ("Construction and Extraction", (20.0, 40.0)),
    ("Installation, Maintenance, and Repair", (25.0, 45.0)),
    ("Production", (40.0, 65.0)),
    ("Transportation and Material Moving", (35.0, 60.0)),
];

const GENERIC_RISK_FACTORS: &[&str] = &[
    "Routine data processing tasks can be automated",
    "Predictable decision-making components can be handled by AI",
    "Standardized documentation and reporting can be automated",
    "Basic customer interactions can be managed by AI systems",
];

const CATEGORY_RISK_FACTORS: &[(&str, &[&str])] = &[
    (
        "Computer and Mathematical",
        &[
            "Code generation AI can produce routine programming solutions",
            "Automated testing and debugging reduces manual work",
            "Basic website and application development increasingly automated",
            "Technical documentation can be generated by AI",
        ],
    ),
    (
        "Management",
        &[
            "AI tools can handle resource allocation and scheduling",
            "Performance monitoring and reporting can be automated",
            "Basic project tracking requires less human oversight",
            "Standard communication can be drafted by AI",
        ],
    ),
    (
        "Business and Financial",
        &[
            "Financial analysis and modeling increasingly automated",
            "Transaction processing and auditing can be handled by AI",
            "Market research data collection and basic analysis automated",
            "Standard financial reporting can be generated by AI",
        ],
    ),
    (
        "Legal",
        &[
            "Document review and contract analysis increasingly automated",
            "Legal research can be accelerated with AI assistance",
            "Standard legal document generation handled by AI",
            "Case outcome prediction becoming more automated",
        ],
    ),
    (
        "Educational Instruction",
        &[
            "Basic content delivery can be automated through online platforms",
            "Standardized assessment and grading increasingly automated",
            "Administrative tasks can be handled by AI systems",
            "Some tutoring functions can be performed by AI",
        ],
    ),
    (
        "Healthcare Practitioners",
        &[
            "Administrative tasks and documentation increasingly automated",
            "Basic diagnostic assistance provided by AI",
            "Patient scheduling and management can be automated",
            "Some monitoring functions can be performed by AI systems",
        ],
    ),
];

const GENERIC_PROTECTIVE_FACTORS: &[&str] = &[
    "Complex decision-making in ambiguous situations",
    "Creative problem-solving in unpredictable environments",
    "Building relationships and emotional intelligence",
    "Adaptability to changing circumstances and requirements",
];

const CATEGORY_PROTECTIVE_FACTORS: &[(&str, &[&str])] = &[
    (
        "Computer and Mathematical",
        &[
            "Advanced systems architecture and design",
            "Novel algorithm development and implementation",
            "Complex integration of disparate technologies",
            "Innovative problem-solving in unique technical contexts",
        ],
    ),
    (
        "Management",
        &[
            "Strategic leadership and organizational vision",
            "Complex stakeholder relationship management",
            "Change management in ambiguous environments",
            "Cultivating team culture and interpersonal dynamics",
        ],
    ),
    (
        "Business and Financial",
        &[
            "Complex strategic financial planning",
            "Contextual business judgment requiring broad knowledge",
            "Negotiation and persuasion in high-stakes situations",
            "Novel market opportunity identification",
        ],
    ),
    (
        "Legal",
        &[
            "Complex legal strategy development",
            "Persuasive courtroom advocacy",
            "Nuanced client counseling in ambiguous situations",
            "Novel legal theory development",
        ],
    ),
    (
        "Educational Instruction",
        &[
            "Personalized teaching adapted to individual student needs",
            "Creating engaging learning environments",
            "Mentoring and developing student potential",
            "Addressing complex behavioral and learning challenges",
        ],
    ),
    (
        "Healthcare Practitioners",
        &[
            "Complex clinical judgment in uncertain situations",
            "Empathetic patient care requiring emotional intelligence",
            "Physical assessment and intervention skills",
            "Integrated treatment planning for complex cases",
        ],
    ),
];

const LOWER_RISK_OUTLOOK: &str = "While certain routine aspects of the role may be automated, the core functions requiring human judgment, creativity, and interpersonal skills remain difficult to replace with AI.";
const HIGHER_RISK_OUTLOOK: &str = "Many aspects of this role involve predictable, routine tasks that are increasingly being automated by AI systems.";
const RESILIENCE_ADVICE: &str = "Professionals in this field can increase their resilience by developing skills in areas that complement AI rather than compete with it.";

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum RiskTier {
    Low,
    Moderate,
    High,
    #[serde(rename = "Very High")]
    VeryHigh,
}

impl RiskTier {
    /// Tier for a 5-year risk score. Each boundary belongs to the higher tier.
    pub fn from_score(year_5_risk: f64) -> Self {
        if year_5_risk < 30.0 {
            RiskTier::Low
        } else if year_5_risk < 50.0 {
            RiskTier::Moderate
        } else if year_5_risk < 70.0 {
            RiskTier::High
        } else {
            RiskTier::VeryHigh
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RiskTier::Low => "Low",
            RiskTier::Moderate => "Moderate",
            RiskTier::High => "High",
            RiskTier::VeryHigh => "Very High",
        }
    }

    /// Lower-case qualifier used in prose.
    pub fn qualifier(&self) -> &'static str {
        match self {
            RiskTier::Low => "low",
            RiskTier::Moderate => "moderate",
            RiskTier::High => "high",
            RiskTier::VeryHigh => "very high",
        }
    }

    pub fn is_elevated(&self) -> bool {
        matches!(self, RiskTier::High | RiskTier::VeryHigh)
    }
}

impl fmt::Display for RiskTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct RiskAssessment {
    pub year_1_risk: f64,
    pub year_5_risk: f64,
    pub tier: RiskTier,
    pub risk_factors: Vec<String>,
    pub protective_factors: Vec<String>,
    pub analysis: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum RiskModel {
    #[default]
    Category,
    Keyword,
}

impl FromStr for RiskModel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "category" => Ok(RiskModel::Category),
            "keyword" => Ok(RiskModel::Keyword),
            other => Err(format!("unknown risk model '{}'", other)),
        }
    }
}

impl RiskModel {
    pub fn assess(&self, title: &str, category: &str) -> RiskAssessment {
        match self {
            RiskModel::Category => score(title, category),
            RiskModel::Keyword => score_by_keywords(title, category),
        }
    }
}

fn lookup<T: Copy>(table: &[(&str, T)], category: &str) -> Option<T> {
    table
        .iter()
        .find(|(name, _)| *name == category)
        .map(|(_, value)| *value)
}

pub fn category_risk(category: &str) -> (f64, f64) {
    lookup(CATEGORY_RISK, category).unwrap_or(DEFAULT_RISK)
}

/// Category-specific factors followed by generic ones, at most five.
fn combine_factors(specific: Option<&[&str]>, generic: &[&str]) -> Vec<String> {
    specific
        .unwrap_or(&[])
        .iter()
        .chain(generic)
        .take(MAX_FACTORS)
        .map(|factor| factor.to_string())
        .collect()
}

pub fn risk_factors(category: &str) -> Vec<String> {
    combine_factors(lookup(CATEGORY_RISK_FACTORS, category), GENERIC_RISK_FACTORS)
}

pub fn protective_factors(category: &str) -> Vec<String> {
    combine_factors(
        lookup(CATEGORY_PROTECTIVE_FACTORS, category),
        GENERIC_PROTECTIVE_FACTORS,
    )
}

pub fn narrative(title: &str, tier: RiskTier) -> String {
    let outlook = if tier.is_elevated() {
        HIGHER_RISK_OUTLOOK
    } else {
        LOWER_RISK_OUTLOOK
    };
    format!(
        "The role of {} faces a {} risk of AI displacement. {} {}",
        title,
        tier.qualifier(),
        outlook,
        RESILIENCE_ADVICE
    )
}

pub fn score(title: &str, category: &str) -> RiskAssessment {
    let (year_1_risk, year_5_risk) = category_risk(category);
    let tier = RiskTier::from_score(year_5_risk);

    RiskAssessment {
        year_1_risk,
        year_5_risk,
        tier,
        risk_factors: risk_factors(category),
        protective_factors: protective_factors(category),
        analysis: narrative(title, tier),
    }
}

struct KeywordProfile {
    keywords: &'static [&'static str],
    year_1_risk: f64,
    year_5_risk: f64,
    tier: RiskTier,
    risk_factors: [&'static str; 3],
    protective_factors: [&'static str; 3],
}

const KEYWORD_PROFILES: &[KeywordProfile] = &[
    KeywordProfile {
        keywords: &["Computer", "Technology"],
        year_1_risk: 15.0,
        year_5_risk: 35.0,
        tier: RiskTier::Moderate,
        risk_factors: ["AI code generation tools", "Automated testing", "Low-code platforms"],
        protective_factors: ["Complex problem solving", "System architecture", "Creative solutions"],
    },
    KeywordProfile {
        keywords: &["Healthcare", "Medical"],
        year_1_risk: 10.0,
        year_5_risk: 25.0,
        tier: RiskTier::Low,
        risk_factors: ["Administrative automation", "AI diagnostics", "Remote monitoring"],
        protective_factors: ["Patient care", "Human empathy", "Clinical judgment"],
    },
    KeywordProfile {
        keywords: &["Education", "Teaching"],
        year_1_risk: 15.0,
        year_5_risk: 30.0,
        tier: RiskTier::Low,
        risk_factors: ["AI lesson planning", "Automated grading", "Educational software"],
        protective_factors: ["Student relationships", "Classroom management", "Personalized instruction"],
    },
    KeywordProfile {
        keywords: &["Management", "Business"],
        year_1_risk: 25.0,
        year_5_risk: 50.0,
        tier: RiskTier::Moderate,
        risk_factors: ["Project automation", "AI scheduling", "Reporting automation"],
        protective_factors: ["Strategic thinking", "Leadership", "Stakeholder management"],
    },
];

const FALLBACK_PROFILE: KeywordProfile = KeywordProfile {
    keywords: &[],
    year_1_risk: 20.0,
    year_5_risk: 40.0,
    tier: RiskTier::Moderate,
    risk_factors: ["Task automation", "AI optimization", "Process digitization"],
    protective_factors: ["Human judgment", "Interpersonal skills", "Adaptability"],
};

/// Keyword-matched profile; the profile's published tier is kept as is.
pub fn score_by_keywords(title: &str, category: &str) -> RiskAssessment {
    let profile = KEYWORD_PROFILES
        .iter()
        .find(|profile| profile.keywords.iter().any(|kw| category.contains(kw)))
        .unwrap_or(&FALLBACK_PROFILE);

    RiskAssessment {
        year_1_risk: profile.year_1_risk,
        year_5_risk: profile.year_5_risk,
        tier: profile.tier,
        risk_factors: profile.risk_factors.iter().map(|f| f.to_string()).collect(),
        protective_factors: profile
            .protective_factors
            .iter()
            .map(|f| f.to_string())
            .collect(),
        analysis: narrative(title, profile.tier),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn tier_boundaries_belong_to_the_higher_tier() {
        assert_eq!(RiskTier::from_score(29.999), RiskTier::Low);
        assert_eq!(RiskTier::from_score(30.0), RiskTier::Moderate);
        assert_eq!(RiskTier::from_score(49.999), RiskTier::Moderate);
        assert_eq!(RiskTier::from_score(50.0), RiskTier::High);
        assert_eq!(RiskTier::from_score(69.999), RiskTier::High);
        assert_eq!(RiskTier::from_score(70.0), RiskTier::VeryHigh);
        assert_eq!(RiskTier::from_score(0.0), RiskTier::Low);
        assert_eq!(RiskTier::from_score(100.0), RiskTier::VeryHigh);
    }

    #[test]
    fn unknown_category_uses_default_pair() {
        let assessment = score("Astronaut", "General");
        assert_eq!((assessment.year_1_risk, assessment.year_5_risk), (35.0, 55.0));
        assert_eq!(assessment.tier, RiskTier::High);
        assert_eq!(category_risk("Underwater Basket Weaving"), DEFAULT_RISK);
    }

    #[test]
    fn default_pair_tier_follows_the_thresholds() {
        // 55 sits in [50, 70), so the fallback reads as High, never Moderate
        assert_eq!(RiskTier::from_score(DEFAULT_RISK.1), RiskTier::High);
        let assessment = score("Astronaut", "General");
        assert!(assessment.analysis.starts_with("The role of Astronaut faces a high risk"));
        assert!(assessment.analysis.contains(HIGHER_RISK_OUTLOOK));
    }

    #[test]
    fn known_categories_read_the_table() {
        let nurse = score("Registered Nurse", "Healthcare Practitioners");
        assert_eq!((nurse.year_1_risk, nurse.year_5_risk), (15.0, 30.0));
        assert_eq!(nurse.tier, RiskTier::Moderate);

        let clerk = score("Receptionist", "Office and Administrative Support");
        assert_eq!(clerk.tier, RiskTier::VeryHigh);
    }

    #[test]
    fn specific_factors_come_first_and_are_capped_at_five() {
        let assessment = score("Lawyer", "Legal");
        assert_eq!(assessment.risk_factors.len(), 5);
        assert_eq!(
            assessment.risk_factors[0],
            "Document review and contract analysis increasingly automated"
        );
        assert_eq!(
            assessment.risk_factors[4],
            "Routine data processing tasks can be automated"
        );
        assert_eq!(assessment.protective_factors.len(), 5);
        assert_eq!(assessment.protective_factors[0], "Complex legal strategy development");
    }

    #[test]
    fn categories_without_specific_factors_get_generic_four() {
        let assessment = score("Cook", "Food Preparation and Serving");
        assert_eq!(assessment.risk_factors.len(), 4);
        assert_eq!(assessment.protective_factors.len(), 4);
        assert_eq!(
            assessment.protective_factors,
            GENERIC_PROTECTIVE_FACTORS
                .iter()
                .map(|f| f.to_string())
                .collect::<Vec<_>>()
        );
    }

    #[test]
    fn narrative_for_lower_tiers() {
        let assessment = score("Registered Nurse", "Healthcare Practitioners");
        assert_eq!(
            assessment.analysis,
            "The role of Registered Nurse faces a moderate risk of AI displacement. \
             While certain routine aspects of the role may be automated, the core functions \
             requiring human judgment, creativity, and interpersonal skills remain difficult to \
             replace with AI. Professionals in this field can increase their resilience by \
             developing skills in areas that complement AI rather than compete with it."
        );
    }

    #[test]
    fn narrative_for_elevated_tiers() {
        let text = narrative("Cashier", RiskTier::VeryHigh);
        assert!(text.starts_with("The role of Cashier faces a very high risk of AI displacement. "));
        assert!(text.contains(HIGHER_RISK_OUTLOOK));
        assert!(text.ends_with(RESILIENCE_ADVICE));
        assert!(!text.contains(LOWER_RISK_OUTLOOK));
    }

    #[test]
    fn scoring_is_deterministic() {
        assert_eq!(score("Writer", "Arts, Design, Entertainment, Sports, and Media"),
                   score("Writer", "Arts, Design, Entertainment, Sports, and Media"));
    }

    #[test]
    fn keyword_model_matches_in_order() {
        let tech = score_by_keywords("Developer", "Computer and Mathematical");
        assert_eq!((tech.year_1_risk, tech.year_5_risk), (15.0, 35.0));
        assert_eq!(tech.risk_factors.len(), 3);

        let health = score_by_keywords("Nurse", "Healthcare Support");
        assert_eq!(health.tier, RiskTier::Low);

        let teaching = score_by_keywords("Teacher", "Educational Instruction");
        assert_eq!(teaching.year_5_risk, 30.0);
        assert_eq!(teaching.tier, RiskTier::Low);

        let business = score_by_keywords("Analyst", "Business and Financial");
        assert_eq!(business.protective_factors[0], "Strategic thinking");

        let other = score_by_keywords("Plumber", "Construction and Extraction");
        assert_eq!((other.year_1_risk, other.year_5_risk), (20.0, 40.0));
        assert_eq!(other.risk_factors, vec!["Task automation", "AI optimization", "Process digitization"]);
    }

    #[test]
    fn model_parses_and_dispatches() {
        assert_eq!("Keyword".parse::<RiskModel>().unwrap(), RiskModel::Keyword);
        assert_eq!(" category ".parse::<RiskModel>().unwrap(), RiskModel::Category);
        assert!("neural".parse::<RiskModel>().is_err());
        assert_eq!(
            RiskModel::Category.assess("Lawyer", "Legal"),
            score("Lawyer", "Legal")
        );
    }

    #[test]
    fn tier_serializes_with_display_names() {
        assert_eq!(serde_json::to_value(RiskTier::VeryHigh).unwrap(), "Very High");
        assert_eq!(RiskTier::Moderate.to_string(), "Moderate");
    }
}

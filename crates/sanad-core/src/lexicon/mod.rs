//! Lexicon Store
//!
//! Keyword and phrase lists shared by the crisis detector, the cultural
//! validator and the evaluation suites. A lexicon never changes after it
//! is built; components hold it behind an `Arc`.
//!
//! The built-in lexicon covers the Omani dialect. A replacement can be
//! loaded from TOML:
//!
//! ```toml
//! crisis_keywords = ["انتحار", "أموت"]
//! default_tier = "low"
//!
//! [[severity]]
//! keyword = "انتحار"
//! tier = "very_high"
//!
//! [expressions]
//! greetings = ["شلونك؟"]
//! religious_context = ["بإذن الله"]
//!
//! [[inappropriate]]
//! phrase = "هذا عيب"
//! concern = "cultural_insensitivity"
//! ```

mod omani;

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap, HashSet};
use std::path::Path;
use tracing::{debug, info};

// ============================================================================
// Severity Tier
// ============================================================================

/// Severity weight attached to a crisis keyword
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum SeverityTier {
    /// Unlisted keywords
    #[default]
    Low,
    /// Exhaustion with life
    Medium,
    /// Ending life
    High,
    /// Direct suicide references and death wishes
    VeryHigh,
}

impl SeverityTier {
    /// Integer score contributed by a keyword in this tier
    #[must_use]
    pub const fn score(self) -> u8 {
        match self {
            Self::Low => 4,
            Self::Medium => 6,
            Self::High => 8,
            Self::VeryHigh => 10,
        }
    }
}

/// Explicit tier assignment for one keyword
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeverityRule {
    /// Keyword, exactly as it appears in the crisis list
    pub keyword: String,
    /// Tier assigned to it
    pub tier: SeverityTier,
}

// ============================================================================
// Expressions
// ============================================================================

/// Category of culturally authentic expressions
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExpressionCategory {
    /// Greetings
    Greetings,
    /// Supportive expressions
    SupportiveExpressions,
    /// Empathetic responses
    EmpatheticResponses,
    /// Encouragement
    Encouragement,
    /// Religious context
    ReligiousContext,
    /// Local dialect terms
    LocalTerms,
}

impl ExpressionCategory {
    /// All categories in scan order
    pub const ALL: [ExpressionCategory; 6] = [
        Self::Greetings,
        Self::SupportiveExpressions,
        Self::EmpatheticResponses,
        Self::Encouragement,
        Self::ReligiousContext,
        Self::LocalTerms,
    ];

    /// Snake-case name
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Greetings => "greetings",
            Self::SupportiveExpressions => "supportive_expressions",
            Self::EmpatheticResponses => "empathetic_responses",
            Self::Encouragement => "encouragement",
            Self::ReligiousContext => "religious_context",
            Self::LocalTerms => "local_terms",
        }
    }
}

/// Why a phrase is considered inappropriate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConcernGroup {
    /// Guilt or punishment framed religiously
    ReligiousInsensitivity,
    /// Shaming
    CulturalInsensitivity,
    /// Gender stereotypes
    GenderInsensitivity,
    /// Attacks on the user's family
    FamilyDisrespect,
    /// Diagnoses or prescriptions
    MedicalAdvice,
}

/// A phrase a reply must never contain
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InappropriatePhrase {
    /// Phrase text
    pub phrase: String,
    /// Concern group
    pub concern: ConcernGroup,
}

// ============================================================================
// Lexicon
// ============================================================================

/// Immutable keyword and phrase store
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Lexicon {
    crisis_keywords: Vec<String>,
    #[serde(default)]
    default_tier: SeverityTier,
    #[serde(default)]
    severity: Vec<SeverityRule>,
    #[serde(default)]
    expressions: BTreeMap<ExpressionCategory, Vec<String>>,
    #[serde(default)]
    inappropriate: Vec<InappropriatePhrase>,
    #[serde(skip)]
    tiers: HashMap<String, SeverityTier>,
}

impl Default for Lexicon {
    fn default() -> Self {
        Self::omani()
    }
}

impl Lexicon {
    /// Built-in Omani-dialect lexicon
    #[must_use]
    pub fn omani() -> Self {
        let mut lexicon = Self {
            crisis_keywords: omani::CRISIS_KEYWORDS
                .iter()
                .map(|s| (*s).to_string())
                .collect(),
            severity: omani::SEVERITY_TABLE
                .iter()
                .map(|(keyword, tier)| SeverityRule {
                    keyword: (*keyword).to_string(),
                    tier: *tier,
                })
                .collect(),
            default_tier: SeverityTier::Low,
            expressions: omani::EXPRESSIONS
                .iter()
                .map(|(category, phrases)| {
                    (*category, phrases.iter().map(|s| (*s).to_string()).collect())
                })
                .collect(),
            inappropriate: omani::INAPPROPRIATE
                .iter()
                .map(|(phrase, concern)| InappropriatePhrase {
                    phrase: (*phrase).to_string(),
                    concern: *concern,
                })
                .collect(),
            tiers: HashMap::new(),
        };
        lexicon.index_tiers();
        lexicon
    }

    fn index_tiers(&mut self) {
        self.tiers = self
            .severity
            .iter()
            .map(|rule| (rule.keyword.clone(), rule.tier))
            .collect();
    }

    /// Parse and validate a lexicon from TOML text
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let mut lexicon: Self =
            toml::from_str(text).map_err(|e| Error::Lexicon(e.to_string()))?;
        lexicon.validate()?;
        lexicon.index_tiers();
        Ok(lexicon)
    }

    /// Load a lexicon from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|e| Error::Lexicon(format!("{}: {}", path.display(), e)))?;
        let lexicon = Self::from_toml_str(&text)?;
        info!(
            path = %path.display(),
            keywords = lexicon.crisis_keywords.len(),
            "Loaded crisis lexicon"
        );
        Ok(lexicon)
    }

    /// Reject lexicons the detector and validator cannot work with
    pub fn validate(&self) -> Result<()> {
        if self.crisis_keywords.is_empty() {
            return Err(Error::Lexicon("crisis keyword list is empty".to_string()));
        }

        let mut seen = HashSet::new();
        for keyword in &self.crisis_keywords {
            if keyword.trim().is_empty() {
                return Err(Error::Lexicon("empty crisis keyword".to_string()));
            }
            if !seen.insert(keyword.as_str()) {
                return Err(Error::Lexicon(format!("duplicate crisis keyword: {}", keyword)));
            }
        }

        let mut ruled = HashSet::new();
        for rule in &self.severity {
            if !seen.contains(rule.keyword.as_str()) {
                return Err(Error::Lexicon(format!(
                    "severity rule for unknown keyword: {}",
                    rule.keyword
                )));
            }
            if !ruled.insert(rule.keyword.as_str()) {
                return Err(Error::Lexicon(format!(
                    "duplicate severity rule: {}",
                    rule.keyword
                )));
            }
        }

        for (category, phrases) in &self.expressions {
            if phrases.iter().any(|p| p.trim().is_empty()) {
                return Err(Error::Lexicon(format!(
                    "empty phrase in category {}",
                    category.as_str()
                )));
            }
        }

        if self.inappropriate.iter().any(|p| p.phrase.trim().is_empty()) {
            return Err(Error::Lexicon("empty inappropriate phrase".to_string()));
        }

        debug!(
            keywords = self.crisis_keywords.len(),
            rules = self.severity.len(),
            "Lexicon validated"
        );
        Ok(())
    }

    /// Crisis keywords in match order
    #[must_use]
    pub fn crisis_keywords(&self) -> &[String] {
        &self.crisis_keywords
    }

    /// Tier for a keyword; unlisted keywords get the default tier
    #[must_use]
    pub fn tier_of(&self, keyword: &str) -> SeverityTier {
        self.tiers.get(keyword).copied().unwrap_or(self.default_tier)
    }

    /// Phrases for one category (empty if the category is absent)
    #[must_use]
    pub fn expressions(&self, category: ExpressionCategory) -> &[String] {
        self.expressions
            .get(&category)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Inappropriate phrases
    #[must_use]
    pub fn inappropriate(&self) -> &[InappropriatePhrase] {
        &self.inappropriate
    }

    /// Every expression phrase contained in `text`.
    ///
    /// Categories overlap, so a phrase listed under two categories is
    /// returned twice.
    #[must_use]
    pub fn expression_hits<'a>(&'a self, text: &str) -> Vec<&'a str> {
        self.expressions
            .values()
            .flatten()
            .filter(|phrase| text.contains(phrase.as_str()))
            .map(String::as_str)
            .collect()
    }

    /// Number of religious-context phrases contained in `text`
    #[must_use]
    pub fn religious_hits(&self, text: &str) -> usize {
        self.expressions(ExpressionCategory::ReligiousContext)
            .iter()
            .filter(|phrase| text.contains(phrase.as_str()))
            .count()
    }

    /// Inappropriate phrases contained in `text`, in lexicon order
    #[must_use]
    pub fn inappropriate_hits<'a>(&'a self, text: &str) -> Vec<&'a InappropriatePhrase> {
        self.inappropriate
            .iter()
            .filter(|p| text.contains(p.phrase.as_str()))
            .collect()
    }
}

#[cfg(test)]
mod tests;

//! Cultural Validation
//!
//! Advisory scoring of a reply for Omani cultural fit. The score is a
//! metric only: nothing here blocks or rewrites a reply.

use crate::lexicon::Lexicon;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

const AUTHENTICITY_SATURATION: f64 = 3.0;
const RELIGIOUS_SATURATION: f64 = 2.0;

const AUTHENTICITY_WEIGHT: f64 = 0.4;
const RELIGIOUS_WEIGHT: f64 = 0.3;
const APPROPRIATENESS_WEIGHT: f64 = 0.3;

/// Conversational context a reply is judged in
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationContext {
    /// Everyday support
    #[default]
    General,
    /// Spiritual topics
    Spiritual,
    /// Explicitly religious topics
    Religious,
    /// Any other free-form label
    Other(String),
}

impl ValidationContext {
    /// Whether missing religious expressions should be flagged
    #[must_use]
    pub fn expects_religious_framing(&self) -> bool {
        matches!(self, Self::Spiritual | Self::Religious)
    }
}

impl From<&str> for ValidationContext {
    fn from(label: &str) -> Self {
        match label {
            "General" => Self::General,
            "Spiritual" => Self::Spiritual,
            "Religious" => Self::Religious,
            _ => Self::Other(label.to_string()),
        }
    }
}

impl fmt::Display for ValidationContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::General => f.write_str("General"),
            Self::Spiritual => f.write_str("Spiritual"),
            Self::Religious => f.write_str("Religious"),
            Self::Other(label) => f.write_str(label),
        }
    }
}

/// Scores for one reply
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationResult {
    /// Weighted combination of the three components
    pub overall_score: f64,
    /// `min(expression hits / 3, 1)`
    pub omani_authenticity: f64,
    /// `min(religious hits / 2, 1)`
    pub religious_sensitivity: f64,
    /// False iff any inappropriate phrase was found
    pub cultural_appropriateness: bool,
    /// Inappropriate phrases found, in lexicon order
    pub inappropriate_content: Vec<String>,
    /// Expressions found (with repeats across categories)
    pub found_expressions: Vec<String>,
    /// Missing element labels
    pub missing_elements: Vec<String>,
    /// Suggested improvements
    pub recommendations: Vec<String>,
}

/// Stateless validator over a shared lexicon
#[derive(Debug, Clone)]
pub struct CulturalValidator {
    lexicon: Arc<Lexicon>,
}

impl Default for CulturalValidator {
    fn default() -> Self {
        Self::new(Arc::new(Lexicon::omani()))
    }
}

impl CulturalValidator {
    /// Create a validator over a lexicon
    #[must_use]
    pub fn new(lexicon: Arc<Lexicon>) -> Self {
        Self { lexicon }
    }

    /// Score a reply
    #[must_use]
    pub fn validate(&self, reply: &str, context: &ValidationContext) -> ValidationResult {
        let inappropriate_content: Vec<String> = self
            .lexicon
            .inappropriate_hits(reply)
            .into_iter()
            .map(|p| p.phrase.clone())
            .collect();
        let cultural_appropriateness = inappropriate_content.is_empty();

        let found_expressions: Vec<String> = self
            .lexicon
            .expression_hits(reply)
            .into_iter()
            .map(str::to_string)
            .collect();
        let omani_authenticity =
            (found_expressions.len() as f64 / AUTHENTICITY_SATURATION).min(1.0);

        let religious_sensitivity =
            (self.lexicon.religious_hits(reply) as f64 / RELIGIOUS_SATURATION).min(1.0);

        let mut missing_elements = Vec::new();
        let mut recommendations = Vec::new();

        if omani_authenticity < 0.5 {
            missing_elements.push("Authentic Omani expressions".to_string());
            recommendations.push("Add expressions like: شلونك، ما عليك، بإذن الله".to_string());
        }

        if religious_sensitivity < 0.3 && context.expects_religious_framing() {
            missing_elements.push("Islamic context".to_string());
            recommendations.push("Add appropriate religious expressions".to_string());
        }

        if !cultural_appropriateness {
            recommendations.push("Remove culturally inappropriate expressions".to_string());
        }

        let appropriateness = if cultural_appropriateness { 1.0 } else { 0.0 };
        let overall_score = omani_authenticity * AUTHENTICITY_WEIGHT
            + religious_sensitivity * RELIGIOUS_WEIGHT
            + appropriateness * APPROPRIATENESS_WEIGHT;

        ValidationResult {
            overall_score,
            omani_authenticity,
            religious_sensitivity,
            cultural_appropriateness,
            inappropriate_content,
            found_expressions,
            missing_elements,
            recommendations,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    fn validator() -> CulturalValidator {
        CulturalValidator::default()
    }

    #[test]
    fn test_authentic_reply() {
        let result = validator().validate(
            "شلونك؟ أفهم مشاعرك، ما عليك، بإذن الله الأمور راح تتحسن",
            &ValidationContext::General,
        );

        assert!(result.cultural_appropriateness);
        assert_eq!(result.found_expressions.len(), 5);
        assert!((result.omani_authenticity - 1.0).abs() < EPS);
        assert!((result.religious_sensitivity - 0.5).abs() < EPS);
        assert!((result.overall_score - 0.85).abs() < EPS);
        assert!(result.recommendations.is_empty());
    }

    #[test]
    fn test_shaming_reply() {
        let result = validator().validate(
            "حرام عليك تحس كذا، هذا عيب منك",
            &ValidationContext::General,
        );

        assert!(!result.cultural_appropriateness);
        assert_eq!(result.inappropriate_content.len(), 2);
        assert!(result.overall_score.abs() < EPS);
        assert!(result
            .recommendations
            .contains(&"Remove culturally inappropriate expressions".to_string()));
        assert!(result
            .missing_elements
            .contains(&"Authentic Omani expressions".to_string()));
    }

    #[test]
    fn test_spiritual_reply_saturates() {
        let result = validator().validate(
            "الله يعينك في هذا الوقت الصعب، توكل على الله وكله راح يكون زين",
            &ValidationContext::Spiritual,
        );

        assert!((result.omani_authenticity - 1.0).abs() < EPS);
        assert!((result.religious_sensitivity - 1.0).abs() < EPS);
        assert!((result.overall_score - 1.0).abs() < EPS);
    }

    #[test]
    fn test_english_reply_scores_appropriateness_only() {
        let result = validator().validate(
            "I understand your feelings, everything will be okay",
            &ValidationContext::General,
        );

        assert!((result.overall_score - 0.3).abs() < EPS);
        assert_eq!(result.missing_elements, vec!["Authentic Omani expressions"]);
    }

    #[test]
    fn test_religious_context_flags_missing_islamic_framing() {
        let result = validator().validate("خذ وقتك", &ValidationContext::Religious);
        assert!(result.missing_elements.contains(&"Islamic context".to_string()));

        let result = validator().validate("خذ وقتك", &ValidationContext::General);
        assert!(!result.missing_elements.contains(&"Islamic context".to_string()));
    }

    #[test]
    fn test_scores_never_exceed_one() {
        let reply = "شلونك؟ ما عليك بإذن الله إن شاء الله الله يعينك توكل على الله الله معك وايد زين";
        let result = validator().validate(reply, &ValidationContext::Spiritual);

        assert!(result.omani_authenticity <= 1.0);
        assert!(result.religious_sensitivity <= 1.0);
        assert!(result.overall_score <= 1.0 + EPS);
    }

    #[test]
    fn test_context_from_label() {
        assert_eq!(ValidationContext::from("Spiritual"), ValidationContext::Spiritual);
        assert_eq!(ValidationContext::from("Religious"), ValidationContext::Religious);
        assert_eq!(
            ValidationContext::from("Family"),
            ValidationContext::Other("Family".to_string())
        );
        assert_eq!(ValidationContext::from("Family").to_string(), "Family");
    }

    #[test]
    fn test_context_labels_match_exactly() {
        for label in ["spiritual", " Religious ", "RELIGIOUS"] {
            let context = ValidationContext::from(label);
            assert!(!context.expects_religious_framing(), "{label:?} treated as religious");
        }

        let reply = "أفهم مشاعرك وأنا هنا معاك";
        let loose = validator().validate(reply, &ValidationContext::from("spiritual"));
        let exact = validator().validate(reply, &ValidationContext::from("Spiritual"));
        assert!(loose.recommendations.len() < exact.recommendations.len());
    }
}

//! Crisis Detection
//!
//! Keyword-based detection of suicidal or self-harm language in
//! Omani-dialect utterances:
//! - Literal, case-sensitive substring matching against the lexicon
//! - Severity is the maximum tier among matched keywords, not a sum
//! - Any match at all is treated as a crisis
//!
//! Detection is pure and deterministic. Figurative speech such as
//! "أموت من الضحك" still matches; the accuracy suite counts these as
//! false positives rather than the detector trying to guess intent.

use crate::lexicon::Lexicon;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use tracing::{debug, warn};

/// Fixed message returned instead of a generated reply when a crisis is
/// detected.
pub const EMERGENCY_SCRIPT: &str = "\
أسمع أنك تمر بوقت صعب جداً، وأريدك تعرف إني هنا معاك. سلامتك أهم شيء في الدنيا.

أرجوك تواصل فوراً مع:
📞 خط الطوارئ: 999
📞 خط الدعم النفسي: +968-2205-5555
📞 خط الأمل: +968-2205-6666

حياتك ثمينة وايد، وفي ناس كثير يقدرون يساعدونك الحين. ما تتردد تطلب المساعدة.";

const URGENT_GUIDANCE: &str = "\
أسمع إنك تمر بوقت صعب جداً، وسلامتك أهم شي.
تواصل الحين مع:
- خط الطوارئ: 999
- خط الدعم النفسي: +968-2205-5555
- خط الأمل: +968-2205-6666
حياتك غالية، وفي ناس يقدرون يساعدونك الحين. طلب المساعدة قوة مو ضعف.";

const COUNSELLING_GUIDANCE: &str = "\
أفهم إنك تمر بفترة صعبة، وهذا يصير أحياناً.
أنصحك تتكلم مع:
- أخصائي نفسي
- إمام المسجد أو مرشد ديني
- شخص تثق فيه من الأهل أو الرفاق
خط الدعم النفسي: +968-2205-5555
تذكر إن طلب المساعدة قوة، وبإذن الله الأمور راح تتحسن.";

const SUPPORTIVE_LINE: &str = "أفهم شعورك، وأنا هنا عشان أساعدك. شلون أقدر أساعدك اليوم؟";

// ============================================================================
// Severity Level
// ============================================================================

/// Coarse label derived from the severity score
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum SeverityLevel {
    /// Score below 4
    Low,
    /// Score 4-5
    Medium,
    /// Score 6-7
    High,
    /// Score 8 and above
    #[serde(rename = "Very High")]
    VeryHigh,
}

impl SeverityLevel {
    /// Step function from score to level
    #[must_use]
    pub const fn from_score(score: u8) -> Self {
        match score {
            8.. => Self::VeryHigh,
            6..=7 => Self::High,
            4..=5 => Self::Medium,
            _ => Self::Low,
        }
    }

    /// Display label
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
            Self::VeryHigh => "Very High",
        }
    }
}

impl fmt::Display for SeverityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Detection Result
// ============================================================================

/// Outcome of scanning one utterance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectionResult {
    /// True iff at least one keyword matched
    pub is_crisis: bool,
    /// Matched keywords, in lexicon order
    pub detected_keywords: Vec<String>,
    /// 0 when nothing matched, otherwise the highest matched tier score
    pub severity_score: u8,
    /// Label derived from `severity_score`
    pub severity_level: SeverityLevel,
    /// `severity_score / 10`, capped at 1.0
    pub confidence: f64,
}

impl DetectionResult {
    /// Result for an utterance with no matches
    #[must_use]
    pub fn clear() -> Self {
        Self {
            is_crisis: false,
            detected_keywords: Vec::new(),
            severity_score: 0,
            severity_level: SeverityLevel::Low,
            confidence: 0.0,
        }
    }
}

// ============================================================================
// Crisis Detector
// ============================================================================

/// Stateless crisis detector over a shared lexicon
#[derive(Debug, Clone)]
pub struct CrisisDetector {
    lexicon: Arc<Lexicon>,
}

impl Default for CrisisDetector {
    fn default() -> Self {
        Self::new(Arc::new(Lexicon::omani()))
    }
}

impl CrisisDetector {
    /// Create a detector over a lexicon
    #[must_use]
    pub fn new(lexicon: Arc<Lexicon>) -> Self {
        Self { lexicon }
    }

    /// Lexicon in use
    #[must_use]
    pub fn lexicon(&self) -> &Lexicon {
        &self.lexicon
    }

    /// Scan an utterance for crisis keywords
    #[must_use]
    pub fn detect(&self, utterance: &str) -> DetectionResult {
        let mut detected_keywords = Vec::new();
        let mut severity_score = 0u8;

        for keyword in self.lexicon.crisis_keywords() {
            if utterance.contains(keyword.as_str()) {
                detected_keywords.push(keyword.clone());
                severity_score = severity_score.max(self.lexicon.tier_of(keyword).score());
            }
        }

        if detected_keywords.is_empty() {
            debug!("No crisis keywords matched");
            return DetectionResult::clear();
        }

        let severity_score = severity_score.min(10);
        let severity_level = SeverityLevel::from_score(severity_score);
        // every tier scores at least 4, so a match is always a crisis
        let is_crisis = severity_score >= 4;

        warn!(
            keywords = detected_keywords.len(),
            severity_score,
            severity_level = %severity_level,
            "Crisis language detected"
        );

        DetectionResult {
            is_crisis,
            detected_keywords,
            severity_score,
            severity_level,
            confidence: (f64::from(severity_score) / 10.0).min(1.0),
        }
    }
}

/// Guidance text matched to a severity level
#[must_use]
pub fn crisis_guidance(level: SeverityLevel) -> &'static str {
    match level {
        SeverityLevel::VeryHigh | SeverityLevel::High => URGENT_GUIDANCE,
        SeverityLevel::Medium => COUNSELLING_GUIDANCE,
        SeverityLevel::Low => SUPPORTIVE_LINE,
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn detector() -> CrisisDetector {
        CrisisDetector::default()
    }

    #[test]
    fn test_direct_death_wish() {
        let result = detector().detect("أريد أموت");

        assert!(result.is_crisis);
        assert_eq!(result.severity_score, 10);
        assert_eq!(result.severity_level, SeverityLevel::VeryHigh);
        assert_eq!(result.severity_level.as_str(), "Very High");
        assert_eq!(result.confidence, 1.0);
        assert_eq!(result.detected_keywords, vec!["أريد أموت", "أموت"]);
    }

    #[test]
    fn test_everyday_tiredness_is_not_crisis() {
        let result = detector().detect("أنا متعب من العمل");

        assert!(!result.is_crisis);
        assert!(result.detected_keywords.is_empty());
        assert_eq!(result.severity_score, 0);
        assert_eq!(result.severity_level, SeverityLevel::Low);
        assert_eq!(result.confidence, 0.0);
    }

    #[test]
    fn test_figurative_death_is_flagged_at_default_tier() {
        let result = detector().detect("أموت من الضحك");

        assert!(result.is_crisis);
        assert_eq!(result.detected_keywords, vec!["أموت"]);
        assert_eq!(result.severity_score, 4);
        assert_eq!(result.severity_level, SeverityLevel::Medium);
        assert!((result.confidence - 0.4).abs() < 1e-9);
    }

    #[test]
    fn test_max_aggregation_not_sum() {
        // Medium (6) + High (8) + Low (4)
        let result = detector().detect("تعبت من الحياة، ما عاد فيني أعيش");

        assert_eq!(result.severity_score, 8);
        assert_eq!(result.severity_level, SeverityLevel::VeryHigh);
        assert!(result.detected_keywords.len() >= 3);
    }

    #[test]
    fn test_exhaustion_tier() {
        let result = detector().detect("انتهيت، ما عاد عندي أمل");

        assert_eq!(result.severity_score, 6);
        assert_eq!(result.severity_level, SeverityLevel::High);
        assert_eq!(result.detected_keywords, vec!["انتهيت", "ما عاد عندي أمل"]);
    }

    #[test]
    fn test_detection_is_deterministic() {
        let detector = detector();
        let text = "خلاص تعبت، أريد أخلص";
        assert_eq!(detector.detect(text), detector.detect(text));
    }

    #[test]
    fn test_severity_monotonic_in_matches() {
        let detector = detector();
        let base = detector.detect("خلاص تعبت");
        let more = detector.detect("خلاص تعبت، أريد أنهي حياتي");

        assert!(more.severity_score >= base.severity_score);
        assert!(more.detected_keywords.len() > base.detected_keywords.len());
    }

    #[test]
    fn test_invariants_hold_across_inputs() {
        let detector = detector();
        for text in [
            "",
            "شلونك؟",
            "أبي أموت من هذا الألم",
            "أموت من الجوع",
            "الشغل يتعبني وايد",
        ] {
            let result = detector.detect(text);
            assert_eq!(result.is_crisis, !result.detected_keywords.is_empty());
            assert_eq!(
                result.severity_level,
                SeverityLevel::from_score(result.severity_score)
            );
            assert!(result.confidence <= 1.0);
        }
    }

    #[test]
    fn test_level_thresholds() {
        assert_eq!(SeverityLevel::from_score(0), SeverityLevel::Low);
        assert_eq!(SeverityLevel::from_score(3), SeverityLevel::Low);
        assert_eq!(SeverityLevel::from_score(4), SeverityLevel::Medium);
        assert_eq!(SeverityLevel::from_score(6), SeverityLevel::High);
        assert_eq!(SeverityLevel::from_score(8), SeverityLevel::VeryHigh);
        assert_eq!(SeverityLevel::from_score(10), SeverityLevel::VeryHigh);
    }

    #[test]
    fn test_level_serializes_as_label() {
        let json = serde_json::to_string(&SeverityLevel::VeryHigh).unwrap();
        assert_eq!(json, "\"Very High\"");
    }

    #[test]
    fn test_emergency_script_contains_hotlines() {
        assert!(EMERGENCY_SCRIPT.contains("999"));
        assert!(EMERGENCY_SCRIPT.contains("+968-2205-5555"));
        assert!(EMERGENCY_SCRIPT.contains("+968-2205-6666"));
    }

    #[test]
    fn test_guidance_tiers() {
        let urgent = crisis_guidance(SeverityLevel::VeryHigh);
        assert!(urgent.contains("999") && urgent.contains("+968-2205-6666"));
        assert_eq!(crisis_guidance(SeverityLevel::High), urgent);

        let counselling = crisis_guidance(SeverityLevel::Medium);
        assert!(counselling.contains("+968-2205-5555"));
        assert!(!counselling.contains("999"));

        assert!(!crisis_guidance(SeverityLevel::Low).contains("+968"));
    }
}

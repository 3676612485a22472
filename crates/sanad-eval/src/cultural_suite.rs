//! Cultural validation suite

use crate::corpus::CulturalCase;
use crate::stats::mean;
use sanad_core::{CulturalValidator, ValidationContext, ValidationResult};
use serde::{Deserialize, Serialize};
use tracing::info;

/// A case passes when its overall score is strictly closer than this
pub const SCORE_TOLERANCE: f64 = 0.3;

/// Outcome for one reference reply
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CulturalCaseResult {
    /// Reply text
    pub reply: String,
    /// Context it was judged in
    pub context: ValidationContext,
    /// Expected overall score
    pub expected_score: f64,
    /// Validator output
    pub validation: ValidationResult,
    /// `|overall - expected| < SCORE_TOLERANCE`
    pub passed: bool,
}

/// Aggregates
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CulturalSummary {
    /// Number of cases
    pub total_tests: usize,
    /// Cases within tolerance
    pub passed_tests: usize,
    /// Percentage passed
    pub success_rate: f64,
    /// Mean overall score
    pub average_score: f64,
}

/// Full suite report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CulturalReport {
    /// Per-case rows
    pub results: Vec<CulturalCaseResult>,
    /// Aggregates
    pub summary: CulturalSummary,
}

/// Score every case with `validator`
#[must_use]
pub fn run_cultural_suite(validator: &CulturalValidator, cases: &[CulturalCase]) -> CulturalReport {
    let results: Vec<CulturalCaseResult> = cases
        .iter()
        .map(|case| {
            let validation = validator.validate(&case.reply, &case.context);
            let passed = (validation.overall_score - case.expected_score).abs() < SCORE_TOLERANCE;
            CulturalCaseResult {
                reply: case.reply.clone(),
                context: case.context.clone(),
                expected_score: case.expected_score,
                validation,
                passed,
            }
        })
        .collect();

    let passed_tests = results.iter().filter(|r| r.passed).count();
    let scores: Vec<f64> = results.iter().map(|r| r.validation.overall_score).collect();
    let summary = CulturalSummary {
        total_tests: results.len(),
        passed_tests,
        success_rate: if results.is_empty() {
            0.0
        } else {
            passed_tests as f64 / results.len() as f64 * 100.0
        },
        average_score: mean(&scores),
    };

    info!(
        passed = summary.passed_tests,
        total = summary.total_tests,
        average_score = summary.average_score,
        "Cultural suite finished"
    );

    CulturalReport { results, summary }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::corpus::cultural_cases;

    #[test]
    fn test_reference_cases_all_pass() {
        let report = run_cultural_suite(&CulturalValidator::default(), &cultural_cases());

        assert_eq!(report.summary.passed_tests, 4);
        assert!((report.summary.success_rate - 100.0).abs() < 1e-9);
        assert!((report.summary.average_score - 0.5375).abs() < 1e-9);

        let scores: Vec<f64> = report
            .results
            .iter()
            .map(|r| r.validation.overall_score)
            .collect();
        assert!((scores[0] - 0.85).abs() < 1e-9);
        assert!((scores[1] - 1.0).abs() < 1e-9);
        assert_eq!(scores[2], 0.0);
        assert!((scores[3] - 0.3).abs() < 1e-9);
    }

    #[test]
    fn test_out_of_tolerance_fails() {
        let case = CulturalCase {
            reply: "حرام عليك تحس كذا".to_string(),
            context: ValidationContext::General,
            expected_score: 0.9,
        };
        let report = run_cultural_suite(&CulturalValidator::default(), &[case]);

        assert!(!report.results[0].passed);
        assert_eq!(report.summary.passed_tests, 0);
        assert_eq!(report.summary.success_rate, 0.0);
    }

    #[test]
    fn test_empty_suite() {
        let report = run_cultural_suite(&CulturalValidator::default(), &[]);
        assert_eq!(report.summary, CulturalSummary::default());
    }
}

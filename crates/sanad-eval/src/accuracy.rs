//! Crisis detection accuracy suite
//!
//! Runs the detector over a labelled corpus and reports the confusion
//! matrix with derived rates. Any ratio whose denominator is zero is 0.

use crate::corpus::CrisisCase;
use sanad_core::{CrisisDetector, SeverityLevel};
use serde::{Deserialize, Serialize};
use tracing::info;

/// Confusion-matrix cell a case fell into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Classification {
    /// Crisis, detected
    #[serde(rename = "True Positive")]
    TruePositive,
    /// Not a crisis, not detected
    #[serde(rename = "True Negative")]
    TrueNegative,
    /// Not a crisis, detected
    #[serde(rename = "False Positive")]
    FalsePositive,
    /// Crisis, missed
    #[serde(rename = "False Negative")]
    FalseNegative,
}

impl Classification {
    /// Classify one prediction
    #[must_use]
    pub const fn of(expected: bool, detected: bool) -> Self {
        match (expected, detected) {
            (true, true) => Self::TruePositive,
            (false, false) => Self::TrueNegative,
            (false, true) => Self::FalsePositive,
            (true, false) => Self::FalseNegative,
        }
    }

    /// Display label
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::TruePositive => "True Positive",
            Self::TrueNegative => "True Negative",
            Self::FalsePositive => "False Positive",
            Self::FalseNegative => "False Negative",
        }
    }
}

/// Detector outcome for one case
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaseResult {
    /// Utterance
    pub text: String,
    /// Label
    pub expected: bool,
    /// Detector verdict
    pub detected: bool,
    /// Confusion-matrix cell
    pub classification: Classification,
    /// Detected severity label
    pub severity: SeverityLevel,
    /// Detector confidence
    pub confidence: f64,
    /// Matched keywords
    pub keywords: Vec<String>,
}

/// Confusion matrix and derived rates
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AccuracyMetrics {
    /// (TP + TN) / total
    pub accuracy: f64,
    /// TP / (TP + FP)
    pub precision: f64,
    /// TP / (TP + FN)
    pub recall: f64,
    /// Harmonic mean of precision and recall
    pub f1_score: f64,
    /// True positives
    pub true_positives: usize,
    /// True negatives
    pub true_negatives: usize,
    /// False positives
    pub false_positives: usize,
    /// False negatives
    pub false_negatives: usize,
}

/// Corpus-level summary
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AccuracySummary {
    /// Number of cases
    pub total_tests: usize,
    /// Cases labelled crisis
    pub crisis_cases: usize,
    /// Cases labelled non-crisis
    pub non_crisis_cases: usize,
    /// Same as recall
    pub detection_rate: f64,
    /// FP / (FP + TN)
    pub false_alarm_rate: f64,
}

/// Full accuracy report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccuracyReport {
    /// Per-case rows, in corpus order
    pub results: Vec<CaseResult>,
    /// Confusion matrix and rates
    pub metrics: AccuracyMetrics,
    /// Summary
    pub summary: AccuracySummary,
}

impl AccuracyReport {
    /// Cases the detector got wrong
    pub fn misclassified(&self) -> impl Iterator<Item = &CaseResult> {
        self.results.iter().filter(|r| r.expected != r.detected)
    }
}

fn ratio(numerator: usize, denominator: usize) -> f64 {
    if denominator == 0 {
        0.0
    } else {
        numerator as f64 / denominator as f64
    }
}

/// Run the detector over `cases`
#[must_use]
pub fn run_crisis_accuracy(detector: &CrisisDetector, cases: &[CrisisCase]) -> AccuracyReport {
    let mut metrics = AccuracyMetrics::default();

    let results: Vec<CaseResult> = cases
        .iter()
        .map(|case| {
            let detection = detector.detect(&case.text);
            let classification = Classification::of(case.expected, detection.is_crisis);
            match classification {
                Classification::TruePositive => metrics.true_positives += 1,
                Classification::TrueNegative => metrics.true_negatives += 1,
                Classification::FalsePositive => metrics.false_positives += 1,
                Classification::FalseNegative => metrics.false_negatives += 1,
            }
            CaseResult {
                text: case.text.clone(),
                expected: case.expected,
                detected: detection.is_crisis,
                classification,
                severity: detection.severity_level,
                confidence: detection.confidence,
                keywords: detection.detected_keywords,
            }
        })
        .collect();

    let tp = metrics.true_positives;
    let tn = metrics.true_negatives;
    let fp = metrics.false_positives;
    let fn_ = metrics.false_negatives;

    metrics.accuracy = ratio(tp + tn, cases.len());
    metrics.precision = ratio(tp, tp + fp);
    metrics.recall = ratio(tp, tp + fn_);
    metrics.f1_score = if metrics.precision + metrics.recall > 0.0 {
        2.0 * metrics.precision * metrics.recall / (metrics.precision + metrics.recall)
    } else {
        0.0
    };

    let summary = AccuracySummary {
        total_tests: cases.len(),
        crisis_cases: cases.iter().filter(|c| c.expected).count(),
        non_crisis_cases: cases.iter().filter(|c| !c.expected).count(),
        detection_rate: metrics.recall,
        false_alarm_rate: ratio(fp, fp + tn),
    };

    info!(
        total = summary.total_tests,
        accuracy = metrics.accuracy,
        false_positives = fp,
        false_negatives = fn_,
        "Crisis accuracy suite finished"
    );

    AccuracyReport {
        results,
        metrics,
        summary,
    }
}

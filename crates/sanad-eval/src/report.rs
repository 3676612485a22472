//! Report rendering and persistence

use crate::accuracy::AccuracyReport;
use crate::cultural_suite::CulturalReport;
use crate::error::Result;
use crate::load::{LoadReport, StressReport};
use crate::performance::PerformanceReport;
use crate::stats::Stats;
use serde::Serialize;
use std::fmt::Write;
use std::path::Path;
use tracing::info;

/// Markdown rendering of a report
pub trait MarkdownReport {
    /// Render as a Markdown document
    fn to_markdown(&self) -> String;
}

/// Write `report` as pretty JSON, creating parent directories
pub fn write_json<T: Serialize>(path: impl AsRef<Path>, report: &T) -> Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, serde_json::to_string_pretty(report)?)?;
    info!(path = %path.display(), "Report saved");
    Ok(())
}

fn stats_line(out: &mut String, label: &str, stats: &Stats) {
    let _ = writeln!(
        out,
        "| {label} | {:.2} | {:.2} | {:.2} | {:.2} | {:.2} | {:.2} | {:.2} |",
        stats.mean, stats.median, stats.min, stats.max, stats.p50, stats.p95, stats.p99
    );
}

fn stats_table(out: &mut String, rows: &[(&str, &Stats)]) {
    out.push_str("| Metric | Mean | Median | Min | Max | p50 | p95 | p99 |\n");
    out.push_str("|---|---|---|---|---|---|---|---|\n");
    for (label, stats) in rows {
        stats_line(out, label, stats);
    }
}

fn bullet_section(out: &mut String, title: &str, prefix: &str, items: &[String]) {
    if items.is_empty() {
        return;
    }
    let _ = writeln!(out, "\n## {title}");
    for item in items {
        let _ = writeln!(out, "- {prefix}{item}");
    }
}

impl MarkdownReport for LoadReport {
    fn to_markdown(&self) -> String {
        let mut out = String::from("# Load Test Report - Sanad Voice\n\n");

        let s = &self.summary;
        out.push_str("## Test Summary\n");
        let _ = writeln!(out, "- Concurrent Users: {}", s.concurrent_users);
        let _ = writeln!(out, "- Total Interactions: {}", s.total_interactions);
        let _ = writeln!(out, "- Test Duration: {:.2} seconds", s.test_duration_secs);
        let _ = writeln!(out, "- Success Rate: {:.1}%", s.success_rate);
        let _ = writeln!(out, "- Finished: {}", s.timestamp.to_rfc3339());

        let m = &self.metrics;
        out.push_str("\n## Performance Metrics\n\n");
        stats_table(
            &mut out,
            &[
                ("Total turn", &m.total_turn_time),
                ("Thinking", &m.thinking_time),
                ("STT", &m.stt_time),
                ("AI response", &m.ai_response_time),
                ("TTS", &m.tts_time),
            ],
        );
        let _ = writeln!(
            out,
            "\nTotal turn standard deviation: {:.2} seconds",
            m.total_turn_time.std_dev
        );

        let c = &self.concurrency;
        out.push_str("\n## Concurrency Analysis\n");
        let _ = writeln!(out, "- Interactions per Second: {:.2}", c.interactions_per_second);
        let _ = writeln!(out, "- System Utilization: {:.1}%", c.system_utilization);
        let _ = writeln!(
            out,
            "- Average Session Duration: {:.2} seconds",
            c.average_session_duration
        );

        out.push_str("\n## User Type Analysis\n");
        for (user_type, stats) in &self.user_types {
            let _ = writeln!(out, "\n### {user_type}");
            let _ = writeln!(out, "- Interaction Count: {}", stats.count);
            let _ = writeln!(out, "- Average Response Time: {:.2} seconds", stats.avg_turn_time);
            let _ = writeln!(out, "- Average Thinking Time: {:.2} seconds", stats.avg_thinking_time);
        }

        bullet_section(&mut out, "Performance Issues", "Warning: ", &self.issues);
        bullet_section(&mut out, "Recommendations", "Suggestion: ", &self.recommendations);

        if !self.detailed_results.is_empty() {
            out.push_str("\n## First Turns\n\n");
            out.push_str("| User | Type | Turn | Thinking | STT | AI | TTS | Total |\n");
            out.push_str("|---|---|---|---|---|---|---|---|\n");
            for t in &self.detailed_results {
                let _ = writeln!(
                    out,
                    "| {} | {} | {} | {:.2} | {:.2} | {:.2} | {:.2} | {:.2} |",
                    t.user_id,
                    t.user_type,
                    t.turn,
                    t.thinking_time,
                    t.stt_time,
                    t.ai_response_time,
                    t.tts_time,
                    t.total_turn_time
                );
            }
        }

        out
    }
}

impl MarkdownReport for StressReport {
    fn to_markdown(&self) -> String {
        let mut out = String::from("# Stress Test Report - Sanad Voice\n\n");

        out.push_str("| Users | Mean Turn | Max Turn | Interactions/s | Utilization |\n");
        out.push_str("|---|---|---|---|---|\n");
        for level in &self.levels {
            let _ = writeln!(
                out,
                "| {} | {:.2} | {:.2} | {:.2} | {:.1}% |",
                level.users,
                level.mean_turn_time,
                level.max_turn_time,
                level.interactions_per_second,
                level.system_utilization
            );
        }

        out.push_str("\n## Findings\n");
        let _ = writeln!(out, "- Max stable users: {}", self.max_stable_users);
        let _ = writeln!(
            out,
            "- Performance degradation point: {} users",
            self.degradation_point
        );
        if let Some(users) = self.stopped_at {
            let _ = writeln!(out, "- Stopped early at {users} users");
        }

        out
    }
}

impl MarkdownReport for PerformanceReport {
    fn to_markdown(&self) -> String {
        let mut out = String::from("# Performance Report - Sanad Voice\n\n");

        let s = &self.summary;
        out.push_str("## Test Summary\n");
        let _ = writeln!(out, "- Total Tests: {}", s.total_tests);
        let _ = writeln!(out, "- Passed: {}", s.passed_tests);
        let _ = writeln!(out, "- Failed: {}", s.failed_tests);
        let _ = writeln!(out, "- Success Rate: {:.1}%", s.success_rate);
        let _ = writeln!(out, "- Average Expression Density: {:.2}/1.0", s.average_density);

        if let Some(m) = &self.metrics {
            out.push_str("\n## Latency (seconds)\n\n");
            stats_table(
                &mut out,
                &[
                    ("STT", &m.stt),
                    ("Generation", &m.generation),
                    ("TTS", &m.tts),
                    ("Total", &m.total),
                ],
            );
        }

        let r = &self.crisis_routing;
        out.push_str("\n## Cultural Analysis\n");
        let _ = writeln!(
            out,
            "- Crisis Routing: {}/{} expected crises ({:.1}%), {} turns routed in total",
            r.expected_routed,
            r.expected,
            r.routing_rate * 100.0,
            r.routed
        );
        let _ = writeln!(out, "- Normal Reply Density: {:.2}/1.0", self.normal_density);

        out.push_str("\n## Scenarios\n\n");
        out.push_str("| Scenario | Type | Total | Density | Status |\n");
        out.push_str("|---|---|---|---|---|\n");
        for result in &self.results {
            let _ = writeln!(
                out,
                "| {} | {} | {:.2} | {:.2} | {} |",
                result.name,
                result.response_type.as_str(),
                result.total_latency,
                result.density,
                if result.meets_requirement { "PASS" } else { "FAIL" }
            );
        }

        bullet_section(&mut out, "Recommendations", "", &self.recommendations);
        out
    }
}

impl MarkdownReport for AccuracyReport {
    fn to_markdown(&self) -> String {
        let mut out = String::from("# Crisis Detection Accuracy\n\n");

        let m = &self.metrics;
        let _ = writeln!(out, "- Accuracy: {:.1}%", m.accuracy * 100.0);
        let _ = writeln!(out, "- Precision: {:.1}%", m.precision * 100.0);
        let _ = writeln!(out, "- Recall: {:.1}%", m.recall * 100.0);
        let _ = writeln!(out, "- F1: {:.3}", m.f1_score);
        let _ = writeln!(
            out,
            "- False Alarm Rate: {:.1}%",
            self.summary.false_alarm_rate * 100.0
        );
        let _ = writeln!(
            out,
            "- TP {} / TN {} / FP {} / FN {}",
            m.true_positives, m.true_negatives, m.false_positives, m.false_negatives
        );

        out.push_str("\n| Text | Expected | Detected | Result | Severity | Keywords |\n");
        out.push_str("|---|---|---|---|---|---|\n");
        for r in &self.results {
            let _ = writeln!(
                out,
                "| {} | {} | {} | {} | {} | {} |",
                r.text,
                r.expected,
                r.detected,
                r.classification.as_str(),
                r.severity,
                r.keywords.join("، ")
            );
        }
        out
    }
}

impl MarkdownReport for CulturalReport {
    fn to_markdown(&self) -> String {
        let mut out = String::from("# Cultural Validation\n\n");

        let s = &self.summary;
        let _ = writeln!(out, "- Passed: {}/{}", s.passed_tests, s.total_tests);
        let _ = writeln!(out, "- Success Rate: {:.1}%", s.success_rate);
        let _ = writeln!(out, "- Average Score: {:.3}", s.average_score);

        out.push_str("\n| Reply | Context | Expected | Score | Status |\n");
        out.push_str("|---|---|---|---|---|\n");
        for r in &self.results {
            let _ = writeln!(
                out,
                "| {} | {} | {:.2} | {:.2} | {} |",
                r.reply,
                r.context,
                r.expected_score,
                r.validation.overall_score,
                if r.passed { "PASS" } else { "FAIL" }
            );
        }
        out
    }
}

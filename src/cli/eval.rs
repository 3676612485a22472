//! Evaluation CLI commands
//!
//! `sanad eval {crisis|cultural|performance}`, `sanad load-test`,
//! `sanad stress-test`. Reports print as Markdown (or JSON with `--json`)
//! and can be saved under `eval.report_dir`.

use super::{OutputArgs, Suite};
use crate::config::{load_config, load_lexicon, EvalConfig};
use anyhow::{Context, Result};
use chrono::Utc;
use sanad_core::{CrisisDetector, CulturalValidator};
use sanad_eval::{
    crisis_cases, cultural_cases, run_crisis_accuracy, run_cultural_suite, scenarios, write_json,
    LoadConfig, LoadTester, MarkdownReport, ScenarioSuite, StressConfig, StressTester,
};
use serde::Serialize;
use std::path::Path;

fn emit<R: Serialize + MarkdownReport>(
    name: &str,
    report: &R,
    output: &OutputArgs,
    eval: &EvalConfig,
) -> Result<()> {
    if output.json {
        println!("{}", serde_json::to_string_pretty(report)?);
    } else {
        println!("{}", report.to_markdown());
    }

    if output.save {
        let file = format!("{}-{}.json", name, Utc::now().format("%Y%m%d-%H%M%S"));
        let path = Path::new(&eval.report_dir).join(file);
        write_json(&path, report)
            .with_context(|| format!("Failed to save report to {}", path.display()))?;
        eprintln!("Saved {}", path.display());
    }
    Ok(())
}

/// `sanad eval <suite>`
pub fn run_suite(suite: Suite, output: &OutputArgs) -> Result<()> {
    let config = load_config()?;
    let lexicon = load_lexicon(&config.crisis)?;

    match suite {
        Suite::Crisis => {
            let report = run_crisis_accuracy(&CrisisDetector::new(lexicon), &crisis_cases());
            emit("crisis-accuracy", &report, output, &config.eval)
        }
        Suite::Cultural => {
            let report = run_cultural_suite(&CulturalValidator::new(lexicon), &cultural_cases());
            emit("cultural", &report, output, &config.eval)
        }
        Suite::Performance => {
            let report = ScenarioSuite::new(lexicon).run(&scenarios());
            emit("performance", &report, output, &config.eval)
        }
    }
}

/// `sanad load-test`
pub async fn run_load(
    users: usize,
    turns: usize,
    time_scale: Option<f64>,
    seed: Option<u64>,
    output: &OutputArgs,
) -> Result<()> {
    let config = load_config()?;

    let mut load = LoadConfig::default()
        .with_users(users)
        .with_session_length(turns)
        .with_time_scale(time_scale.unwrap_or(config.eval.time_scale));
    load.seed = seed.or_else(|| config.eval.seed());

    let report = LoadTester::new(load).run().await?;
    emit("load-test", &report, output, &config.eval)
}

/// `sanad stress-test`
pub async fn run_stress(
    max_users: usize,
    time_scale: Option<f64>,
    seed: Option<u64>,
    output: &OutputArgs,
) -> Result<()> {
    let config = load_config()?;

    let mut stress = StressConfig::default()
        .with_max_users(max_users)
        .with_time_scale(time_scale.unwrap_or(config.eval.time_scale));
    stress.seed = seed.or_else(|| config.eval.seed());

    let report = StressTester::new(stress).run().await?;
    emit("stress-test", &report, output, &config.eval)
}

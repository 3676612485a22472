//! CLI module for Sanad
//!
//! Provides commands:
//! - `chat`: text conversation with the support assistant
//! - `voice`: spoken turns from WAV files
//! - `detect` / `validate`: run the crisis detector or cultural validator once
//! - `eval`, `load-test`, `stress-test`: evaluation harness

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

pub mod analyze;
pub mod chat;
pub mod eval;
pub mod voice;

/// Sanad support assistant CLI
#[derive(Parser, Debug)]
#[command(name = "sanad")]
#[command(about = "Omani-dialect voice support assistant")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Text conversation (type /clear to reset, /quit to leave)
    Chat,
    /// Run spoken turns from WAV files
    Voice {
        /// WAV files, one turn each
        #[arg(required = true)]
        files: Vec<PathBuf>,
        /// Do not play reply audio
        #[arg(long)]
        no_playback: bool,
    },
    /// Check an utterance for crisis language
    Detect {
        /// Utterance text
        text: String,
        #[arg(long)]
        json: bool,
    },
    /// Score a reply for Omani cultural fit
    Validate {
        /// Reply text
        text: String,
        /// General, Spiritual, Religious or any label
        #[arg(long, default_value = "General")]
        context: String,
        #[arg(long)]
        json: bool,
    },
    /// Run an evaluation suite
    Eval {
        #[arg(value_enum)]
        suite: Suite,
        #[command(flatten)]
        output: OutputArgs,
    },
    /// Simulate concurrent users
    LoadTest {
        #[arg(long, default_value_t = 5)]
        users: usize,
        /// Turns per session
        #[arg(long, default_value_t = 5)]
        turns: usize,
        /// Sleep multiplier (default from config)
        #[arg(long)]
        time_scale: Option<f64>,
        #[arg(long)]
        seed: Option<u64>,
        #[command(flatten)]
        output: OutputArgs,
    },
    /// Progressive load until performance degrades
    StressTest {
        #[arg(long, default_value_t = 15)]
        max_users: usize,
        /// Sleep multiplier (default from config)
        #[arg(long)]
        time_scale: Option<f64>,
        #[arg(long)]
        seed: Option<u64>,
        #[command(flatten)]
        output: OutputArgs,
    },
}

/// Evaluation suites
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Suite {
    /// Crisis detection accuracy
    Crisis,
    /// Cultural validation
    Cultural,
    /// Scenario latency model
    Performance,
}

/// Report output options
#[derive(clap::Args, Debug, Clone, Default)]
pub struct OutputArgs {
    /// Print JSON instead of Markdown
    #[arg(long)]
    pub json: bool,
    /// Also save JSON under eval.report_dir
    #[arg(long)]
    pub save: bool,
}

/// Run the CLI command
pub async fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Some(Commands::Chat) => chat::run().await,
        Some(Commands::Voice { files, no_playback }) => voice::run(files, no_playback).await,
        Some(Commands::Detect { text, json }) => analyze::detect(&text, json),
        Some(Commands::Validate {
            text,
            context,
            json,
        }) => analyze::validate(&text, &context, json),
        Some(Commands::Eval { suite, output }) => eval::run_suite(suite, &output),
        Some(Commands::LoadTest {
            users,
            turns,
            time_scale,
            seed,
            output,
        }) => eval::run_load(users, turns, time_scale, seed, &output).await,
        Some(Commands::StressTest {
            max_users,
            time_scale,
            seed,
            output,
        }) => eval::run_stress(max_users, time_scale, seed, &output).await,
        None => {
            let mut cmd = <Cli as clap::CommandFactory>::command();
            cmd.print_help()?;
            println!();
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_eval() {
        let cli = Cli::try_parse_from(["sanad", "eval", "crisis", "--json"]).unwrap();
        match cli.command {
            Some(Commands::Eval { suite, output }) => {
                assert_eq!(suite, Suite::Crisis);
                assert!(output.json);
                assert!(!output.save);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_load_test_defaults() {
        let cli = Cli::try_parse_from(["sanad", "load-test", "--seed", "4"]).unwrap();
        match cli.command {
            Some(Commands::LoadTest {
                users,
                turns,
                time_scale,
                seed,
                ..
            }) => {
                assert_eq!((users, turns), (5, 5));
                assert!(time_scale.is_none());
                assert_eq!(seed, Some(4));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_voice_requires_files() {
        assert!(Cli::try_parse_from(["sanad", "voice"]).is_err());
    }
}

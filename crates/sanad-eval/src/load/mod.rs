//! Load and stress simulation
//!
//! Each simulated user is an independent tokio task that walks through a
//! short session: think, speak, wait for transcription, generation and
//! synthesis. Stage durations are drawn from fixed ranges; sleeps are
//! multiplied by `time_scale` (0 disables sleeping). Reported times are
//! always in simulated seconds.
//!
//! Results depend on the RNG and are for capacity planning only.

use crate::error::Result;
use crate::stats::{mean, Stats};
use chrono::{DateTime, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::ops::RangeInclusive;
use std::time::Duration;
use tokio::time::Instant;
use tracing::{debug, info, warn};

/// Turns kept verbatim in a load report
const DETAILED_TURNS: usize = 10;

const STT_RANGE: RangeInclusive<f64> = 0.5..=2.0;
const AI_RANGE: RangeInclusive<f64> = 1.5..=4.0;
const TTS_RANGE: RangeInclusive<f64> = 0.3..=1.5;

// ============================================================================
// User Types
// ============================================================================

/// Simulated user profile
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum UserType {
    /// Hesitant, medium pauses
    #[serde(rename = "General Anxiety")]
    GeneralAnxiety,
    /// Long pauses
    #[serde(rename = "Family Issues")]
    FamilyIssues,
    /// Short pauses
    #[serde(rename = "Work Stress")]
    WorkStress,
    /// Short pauses
    #[serde(rename = "University Student")]
    UniversityStudent,
}

impl UserType {
    /// Every profile
    pub const ALL: [UserType; 4] = [
        UserType::GeneralAnxiety,
        UserType::FamilyIssues,
        UserType::WorkStress,
        UserType::UniversityStudent,
    ];

    /// Display label
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::GeneralAnxiety => "General Anxiety",
            Self::FamilyIssues => "Family Issues",
            Self::WorkStress => "Work Stress",
            Self::UniversityStudent => "University Student",
        }
    }

    /// Seconds spent thinking and speaking before each turn
    #[must_use]
    pub fn thinking_range(&self) -> RangeInclusive<f64> {
        match self {
            Self::GeneralAnxiety => 3.0..=10.0,
            Self::FamilyIssues => 5.0..=15.0,
            Self::WorkStress | Self::UniversityStudent => 2.0..=8.0,
        }
    }
}

impl fmt::Display for UserType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Configuration
// ============================================================================

/// Load test parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoadConfig {
    /// Concurrent simulated users
    #[serde(default = "default_users")]
    pub users: usize,
    /// Turns per session
    #[serde(default = "default_session_length")]
    pub session_length: usize,
    /// Multiplier applied to every sleep
    #[serde(default = "default_time_scale")]
    pub time_scale: f64,
    /// RNG seed; random when absent
    #[serde(default)]
    pub seed: Option<u64>,
}

fn default_users() -> usize {
    5
}

fn default_session_length() -> usize {
    5
}

fn default_time_scale() -> f64 {
    1.0
}

impl Default for LoadConfig {
    fn default() -> Self {
        Self {
            users: default_users(),
            session_length: default_session_length(),
            time_scale: default_time_scale(),
            seed: None,
        }
    }
}

impl LoadConfig {
    /// Set the number of users
    #[must_use]
    pub fn with_users(mut self, users: usize) -> Self {
        self.users = users;
        self
    }

    /// Set the turns per session
    #[must_use]
    pub fn with_session_length(mut self, turns: usize) -> Self {
        self.session_length = turns;
        self
    }

    /// Set the sleep multiplier
    #[must_use]
    pub fn with_time_scale(mut self, scale: f64) -> Self {
        self.time_scale = scale;
        self
    }

    /// Seed the RNG
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

// ============================================================================
// Records
// ============================================================================

/// One simulated turn
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TurnRecord {
    /// Session index
    pub user_id: usize,
    /// Profile of the session
    pub user_type: UserType,
    /// Turn index within the session
    pub turn: usize,
    /// Seconds
    pub thinking_time: f64,
    /// Seconds
    pub stt_time: f64,
    /// Seconds
    pub ai_response_time: f64,
    /// Seconds
    pub tts_time: f64,
    /// Sum of the four stages
    pub total_turn_time: f64,
}

#[derive(Debug, Clone)]
struct SessionRecord {
    duration: f64,
    turns: Vec<TurnRecord>,
}

/// Load test headline numbers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoadSummary {
    /// Concurrent users
    pub concurrent_users: usize,
    /// Turns completed
    pub total_interactions: usize,
    /// Simulated test duration (longest session)
    pub test_duration_secs: f64,
    /// Real elapsed time
    pub wall_clock_secs: f64,
    /// Percentage of turns that completed
    pub success_rate: f64,
    /// When the test finished
    pub timestamp: DateTime<Utc>,
}

/// Per-stage distributions
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LoadMetrics {
    /// Whole turn including thinking
    pub total_turn_time: Stats,
    /// Thinking and speaking
    pub thinking_time: Stats,
    /// Transcription
    pub stt_time: Stats,
    /// Generation
    pub ai_response_time: Stats,
    /// Synthesis
    pub tts_time: Stats,
}

/// Throughput and utilisation
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConcurrencyAnalysis {
    /// Concurrent users
    pub concurrent_users: usize,
    /// Simulated seconds
    pub total_test_duration: f64,
    /// Turns completed
    pub total_interactions: usize,
    /// Turns per simulated second
    pub interactions_per_second: f64,
    /// Mean session length in simulated seconds
    pub average_session_duration: f64,
    /// Sum of turn times over test duration, as a percentage
    pub system_utilization: f64,
}

/// Aggregates for one user profile
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserTypeStats {
    /// Turns by users of this profile
    pub count: usize,
    /// Mean turn time
    pub avg_turn_time: f64,
    /// Mean thinking time
    pub avg_thinking_time: f64,
}

/// Full load test report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoadReport {
    /// Headline numbers
    pub summary: LoadSummary,
    /// Stage distributions
    pub metrics: LoadMetrics,
    /// Throughput
    pub concurrency: ConcurrencyAnalysis,
    /// Keyed by profile label
    pub user_types: BTreeMap<String, UserTypeStats>,
    /// Thresholds crossed
    pub issues: Vec<String>,
    /// Suggested follow-ups
    pub recommendations: Vec<String>,
    /// First turns, for reference
    pub detailed_results: Vec<TurnRecord>,
}

impl LoadReport {
    fn from_sessions(
        users: usize,
        sessions: &[SessionRecord],
        test_duration_secs: f64,
        wall_clock_secs: f64,
    ) -> Self {
        let turns: Vec<&TurnRecord> = sessions.iter().flat_map(|s| &s.turns).collect();
        let column = |f: fn(&TurnRecord) -> f64| turns.iter().map(|t| f(t)).collect::<Vec<f64>>();
        let turn_times = column(|t| t.total_turn_time);

        let metrics = LoadMetrics {
            total_turn_time: Stats::from_samples(&turn_times).unwrap_or_default(),
            thinking_time: Stats::from_samples(&column(|t| t.thinking_time)).unwrap_or_default(),
            stt_time: Stats::from_samples(&column(|t| t.stt_time)).unwrap_or_default(),
            ai_response_time: Stats::from_samples(&column(|t| t.ai_response_time))
                .unwrap_or_default(),
            tts_time: Stats::from_samples(&column(|t| t.tts_time)).unwrap_or_default(),
        };

        let (interactions_per_second, system_utilization) = if test_duration_secs > 0.0 {
            (
                turns.len() as f64 / test_duration_secs,
                turn_times.iter().sum::<f64>() / test_duration_secs * 100.0,
            )
        } else {
            (0.0, 0.0)
        };
        let session_durations: Vec<f64> = sessions.iter().map(|s| s.duration).collect();
        let concurrency = ConcurrencyAnalysis {
            concurrent_users: users,
            total_test_duration: test_duration_secs,
            total_interactions: turns.len(),
            interactions_per_second,
            average_session_duration: mean(&session_durations),
            system_utilization,
        };

        let mut by_type: BTreeMap<UserType, Vec<&TurnRecord>> = BTreeMap::new();
        for turn in turns.iter().copied() {
            by_type.entry(turn.user_type).or_default().push(turn);
        }
        let user_types = by_type
            .into_iter()
            .map(|(user_type, records)| {
                let turn_times: Vec<f64> = records.iter().map(|t| t.total_turn_time).collect();
                let thinking: Vec<f64> = records.iter().map(|t| t.thinking_time).collect();
                (
                    user_type.as_str().to_string(),
                    UserTypeStats {
                        count: records.len(),
                        avg_turn_time: mean(&turn_times),
                        avg_thinking_time: mean(&thinking),
                    },
                )
            })
            .collect();

        let mut issues = Vec::new();
        if metrics.total_turn_time.mean > 20.0 {
            issues.push("Average response time exceeds 20 seconds".to_string());
        }
        if metrics.total_turn_time.max > 30.0 {
            issues.push("Maximum response time exceeds 30 seconds".to_string());
        }
        if concurrency.system_utilization > 80.0 {
            issues.push("System utilization is very high".to_string());
        }

        let mut recommendations = Vec::new();
        if metrics.ai_response_time.mean > 5.0 {
            recommendations.push("Improve AI response generation speed".to_string());
        }
        if metrics.stt_time.mean > 3.0 {
            recommendations.push("Improve speech-to-text processing".to_string());
        }
        if concurrency.interactions_per_second < 1.0 {
            recommendations.push("Improve system concurrency handling".to_string());
        }

        Self {
            summary: LoadSummary {
                concurrent_users: users,
                total_interactions: turns.len(),
                test_duration_secs,
                wall_clock_secs,
                success_rate: 100.0,
                timestamp: Utc::now(),
            },
            metrics,
            concurrency,
            user_types,
            issues,
            recommendations,
            detailed_results: turns.into_iter().take(DETAILED_TURNS).cloned().collect(),
        }
    }
}

// ============================================================================
// Load Tester
// ============================================================================

/// Sleep for `secs` of simulated time; delays that do not fit a `Duration`
/// (infinite or overflowing scales) are skipped
async fn pace(secs: f64, time_scale: f64) {
    if time_scale <= 0.0 || time_scale.is_nan() {
        return;
    }
    match Duration::try_from_secs_f64(secs * time_scale) {
        Ok(delay) => tokio::time::sleep(delay).await,
        Err(e) => warn!(secs, time_scale, error = %e, "Unrepresentable delay, not sleeping"),
    }
}

async fn simulate_session(
    user_id: usize,
    session_length: usize,
    time_scale: f64,
    mut rng: StdRng,
) -> SessionRecord {
    let user_type = UserType::ALL[rng.gen_range(0..UserType::ALL.len())];
    let mut turns = Vec::with_capacity(session_length);

    for turn in 0..session_length {
        let thinking_time = rng.gen_range(user_type.thinking_range());
        let stt_time = rng.gen_range(STT_RANGE);
        let ai_response_time = rng.gen_range(AI_RANGE);
        let tts_time = rng.gen_range(TTS_RANGE);

        for stage in [thinking_time, stt_time, ai_response_time, tts_time] {
            pace(stage, time_scale).await;
        }

        turns.push(TurnRecord {
            user_id,
            user_type,
            turn,
            thinking_time,
            stt_time,
            ai_response_time,
            tts_time,
            total_turn_time: thinking_time + stt_time + ai_response_time + tts_time,
        });
    }

    let duration: f64 = turns.iter().map(|t| t.total_turn_time).sum();
    debug!(user_id, user_type = %user_type, duration, "Simulated session finished");
    SessionRecord { duration, turns }
}

/// Concurrent session simulator
#[derive(Debug, Clone, Default)]
pub struct LoadTester {
    config: LoadConfig,
}

impl LoadTester {
    /// Create a tester
    #[must_use]
    pub fn new(config: LoadConfig) -> Self {
        Self { config }
    }

    /// Parameters in use
    #[must_use]
    pub fn config(&self) -> &LoadConfig {
        &self.config
    }

    fn rng_for(&self, user_id: usize) -> StdRng {
        match self.config.seed {
            Some(seed) => StdRng::seed_from_u64(seed.wrapping_add(user_id as u64)),
            None => StdRng::from_entropy(),
        }
    }

    /// Run every session concurrently and analyse the turns
    pub async fn run(&self) -> Result<LoadReport> {
        let users = self.config.users.max(1);
        let session_length = self.config.session_length.max(1);
        info!(
            users,
            session_length,
            time_scale = self.config.time_scale,
            "Starting load test"
        );

        let started = Instant::now();
        let handles: Vec<_> = (0..users)
            .map(|user_id| {
                tokio::spawn(simulate_session(
                    user_id,
                    session_length,
                    self.config.time_scale,
                    self.rng_for(user_id),
                ))
            })
            .collect();

        let mut sessions = Vec::with_capacity(users);
        for joined in futures::future::join_all(handles).await {
            sessions.push(joined?);
        }
        let wall_clock_secs = started.elapsed().as_secs_f64();

        let test_duration = sessions.iter().map(|s| s.duration).fold(0.0, f64::max);
        let report = LoadReport::from_sessions(users, &sessions, test_duration, wall_clock_secs);

        info!(
            interactions = report.summary.total_interactions,
            mean_turn_time = report.metrics.total_turn_time.mean,
            issues = report.issues.len(),
            "Load test finished"
        );
        Ok(report)
    }
}

// ============================================================================
// Stress Tester
// ============================================================================

/// Level above which a stress run stops early
const STOP_MEAN_SECS: f64 = 25.0;
/// Level above which performance is no longer stable
const STABLE_MEAN_SECS: f64 = 20.0;
/// Ratio to the first level that counts as degradation
const DEGRADATION_FACTOR: f64 = 1.5;

/// Stress test parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StressConfig {
    /// Highest user count tried
    pub max_users: usize,
    /// Turns per session at every level
    pub session_length: usize,
    /// Multiplier applied to every sleep
    pub time_scale: f64,
    /// Pause between levels in simulated seconds
    pub pause_secs: f64,
    /// RNG seed; random when absent
    pub seed: Option<u64>,
}

impl Default for StressConfig {
    fn default() -> Self {
        Self {
            max_users: 15,
            session_length: 3,
            time_scale: 1.0,
            pause_secs: 2.0,
            seed: None,
        }
    }
}

impl StressConfig {
    /// Set the highest user count
    #[must_use]
    pub fn with_max_users(mut self, max_users: usize) -> Self {
        self.max_users = max_users;
        self
    }

    /// Set the sleep multiplier
    #[must_use]
    pub fn with_time_scale(mut self, scale: f64) -> Self {
        self.time_scale = scale;
        self
    }

    /// Seed the RNG
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

/// Outcome of one user count
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StressLevel {
    /// Concurrent users
    pub users: usize,
    /// Mean turn time
    pub mean_turn_time: f64,
    /// Longest turn
    pub max_turn_time: f64,
    /// Turns per simulated second
    pub interactions_per_second: f64,
    /// Utilisation percentage
    pub system_utilization: f64,
}

impl StressLevel {
    fn from_report(users: usize, report: &LoadReport) -> Self {
        Self {
            users,
            mean_turn_time: report.metrics.total_turn_time.mean,
            max_turn_time: report.metrics.total_turn_time.max,
            interactions_per_second: report.concurrency.interactions_per_second,
            system_utilization: report.concurrency.system_utilization,
        }
    }
}

/// Full stress test report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StressReport {
    /// Levels run, in order
    pub levels: Vec<StressLevel>,
    /// Level at which the run stopped early
    pub stopped_at: Option<usize>,
    /// Highest user count with stable performance
    pub max_stable_users: usize,
    /// User count where performance started degrading
    pub degradation_point: usize,
    /// When the test finished
    pub timestamp: DateTime<Utc>,
}

/// First level whose mean exceeds 20s, minus 2 (at least 1); else the last level
#[must_use]
pub fn max_stable_users(levels: &[StressLevel]) -> usize {
    levels
        .iter()
        .find(|l| l.mean_turn_time > STABLE_MEAN_SECS)
        .map(|l| l.users.saturating_sub(2).max(1))
        .or_else(|| levels.last().map(|l| l.users))
        .unwrap_or(1)
}

/// First level whose mean exceeds 1.5x the first level's; else the last level
#[must_use]
pub fn degradation_point(levels: &[StressLevel]) -> usize {
    let Some(baseline) = levels.first().map(|l| l.mean_turn_time) else {
        return 1;
    };
    levels
        .iter()
        .find(|l| l.mean_turn_time > baseline * DEGRADATION_FACTOR)
        .or(levels.last())
        .map_or(1, |l| l.users)
}

/// Progressive load: 1, 3, 5, ... users up to `max_users`
#[derive(Debug, Clone, Default)]
pub struct StressTester {
    config: StressConfig,
}

impl StressTester {
    /// Create a tester
    #[must_use]
    pub fn new(config: StressConfig) -> Self {
        Self { config }
    }

    /// Run levels until `max_users` or until the mean turn time exceeds 25s
    pub async fn run(&self) -> Result<StressReport> {
        info!(max_users = self.config.max_users, "Starting stress test");

        let mut levels = Vec::new();
        let mut stopped_at = None;

        for users in (1..=self.config.max_users.max(1)).step_by(2) {
            let mut config = LoadConfig::default()
                .with_users(users)
                .with_session_length(self.config.session_length)
                .with_time_scale(self.config.time_scale);
            config.seed = self.config.seed.map(|s| s.wrapping_mul(1_000).wrapping_add(users as u64));

            let report = LoadTester::new(config).run().await?;
            let level = StressLevel::from_report(users, &report);
            info!(
                users,
                mean_turn_time = level.mean_turn_time,
                "Stress level finished"
            );

            let overloaded = level.mean_turn_time > STOP_MEAN_SECS;
            levels.push(level);
            if overloaded {
                warn!(users, "Performance degradation detected, stopping");
                stopped_at = Some(users);
                break;
            }

            pace(self.config.pause_secs, self.config.time_scale).await;
        }

        Ok(StressReport {
            max_stable_users: max_stable_users(&levels),
            degradation_point: degradation_point(&levels),
            levels,
            stopped_at,
            timestamp: Utc::now(),
        })
    }
}

//! Sanad Eval - Evaluation Harness
//!
//! Offline checks for the assistant's decision logic and capacity:
//! - Accuracy: crisis detector against a labelled Omani corpus
//! - Cultural: validator scores for reference replies
//! - Performance: deterministic latency model over voice scenarios
//! - Load: concurrent simulated sessions and progressive stress levels
//!
//! Functional suites are deterministic. Load and stress results depend on
//! the RNG and only inform capacity planning.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod accuracy;
pub mod corpus;
pub mod cultural_suite;
pub mod error;
pub mod load;
pub mod performance;
pub mod report;
pub mod stats;

pub use accuracy::{run_crisis_accuracy, AccuracyReport, Classification};
pub use corpus::{crisis_cases, cultural_cases, scenarios, CrisisCase, CulturalCase, Scenario};
pub use cultural_suite::{run_cultural_suite, CulturalReport};
pub use error::{Error, Result};
pub use load::{LoadConfig, LoadReport, LoadTester, StressConfig, StressReport, StressTester};
pub use performance::{PerformanceReport, ScenarioSuite};
pub use report::{write_json, MarkdownReport};
pub use stats::Stats;

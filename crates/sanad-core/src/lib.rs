//! Sanad Core - Crisis Detection and Response Arbitration
//!
//! This crate holds the logic that decides what the assistant says back:
//! - Lexicon: Omani-dialect crisis keywords, severity tiers, expression lists
//! - Crisis: keyword-based crisis detection with severity scoring
//! - Cultural: advisory scoring of replies for Omani cultural fit
//! - Conversation: rolling history and prompt assembly
//! - Session: the per-user arbiter that routes each turn

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod conversation;
pub mod crisis;
pub mod cultural;
pub mod error;
pub mod lexicon;
pub mod session;

pub use conversation::{
    ConversationHistory, ConversationTurn, PromptBuilder, ResponseType, DEFAULT_HISTORY_WINDOW,
    FALLBACK_REPLY, SYSTEM_PROMPT,
};
pub use crisis::{
    crisis_guidance, CrisisDetector, DetectionResult, SeverityLevel, EMERGENCY_SCRIPT,
};
pub use cultural::{CulturalValidator, ValidationContext, ValidationResult};
pub use error::{format_error_for_cli, Error, Result, UserFriendlyError};
pub use lexicon::{
    ConcernGroup, ExpressionCategory, InappropriatePhrase, Lexicon, SeverityRule, SeverityTier,
};
pub use session::{TherapistSession, TurnOutcome};

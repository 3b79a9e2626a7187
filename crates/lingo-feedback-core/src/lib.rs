//! Core library for lingo-feedback.
//!
//! Scores a learner's response in a language-tutoring conversation and
//! produces structured feedback: five metrics in `[0, 1]` (accuracy,
//! fluency, pronunciation, vocabulary, grammar), improvement suggestions and
//! a weighted overall score.
//!
//! # Modules
//!
//! - [`feedback`] - Evaluation pipeline and report types
//! - [`analysis`] - Analyzed-text representation and the built-in analyzer
//! - [`language`] - Supported languages and model selection
//! - [`session`] - Per-user tutor sessions
//! - [`config`] - Configuration loading and management
//! - [`error`] - Error types and result aliases
//!
//! # Quick Start
//!
//! ```
//! use lingo_feedback_core::FeedbackAnalyzer;
//!
//! let report = FeedbackAnalyzer::new("en")
//!     .evaluate("I like pizza and I like pasta.", None)
//!     .unwrap();
//! assert!((0.0..=1.0).contains(&report.overall_score));
//! ```
#![deny(unsafe_code)]

pub mod analysis;
pub mod config;
pub mod dictionaries;
pub mod error;
pub mod feedback;
pub mod language;
pub mod lexicon;
pub mod session;
pub mod text;

/// Default maximum response size in bytes (5 MiB).
pub const DEFAULT_MAX_INPUT_BYTES: usize = 5 * 1024 * 1024;

pub use analysis::{AnalyzedText, RuleBasedAnalyzer, TextAnalyzer};
pub use config::{Config, ConfigLoader, ConfigSources, LogLevel};
pub use error::{
    AnalysisError, AnalysisResult, ConfigError, ConfigResult, SessionError, SessionResult,
};
pub use feedback::{FeedbackAnalyzer, FeedbackReport, MetricSet, Suggestion, SuggestionType};
pub use language::{DEFAULT_LANGUAGE, LANGUAGE_MODELS, Language, ModelSelection, select_model};
pub use session::{SessionStore, SessionSummary, TutorProfile, TutorSession};

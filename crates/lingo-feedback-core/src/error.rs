//! Error types for lingo-feedback-core.

use thiserror::Error;

/// Errors that can occur when working with configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to deserialize configuration.
    #[error("invalid configuration: {0}")]
    Deserialize(#[from] Box<figment::Error>),

    /// Configuration file not found after searching all locations.
    #[error("no configuration file found")]
    NotFound,
}

/// Result type alias using [`ConfigError`].
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Errors that can occur while analyzing or scoring a response.
///
/// Unsupported languages and empty responses are deliberately absent: the
/// former fall back to the default language model, the latter score 0.0 on
/// the length-based metrics.
#[derive(Error, Debug)]
pub enum AnalysisError {
    /// A pre-analyzed document violates the token/sentence invariants.
    #[error("malformed analysis: {0}")]
    MalformedAnalysis(String),

    /// The text analysis provider failed.
    ///
    /// [`TextAnalyzer`](crate::analysis::TextAnalyzer) implementations
    /// backed by an external pipeline report their failures with this
    /// variant; [`FeedbackAnalyzer`](crate::feedback::FeedbackAnalyzer)
    /// returns it to the caller unchanged.
    #[error("text analysis failed: {0}")]
    Provider(String),

    /// The response exceeds the configured size limit.
    #[error("input too large: {size} bytes (limit: {limit} bytes)")]
    InputTooLarge {
        /// Size of the rejected input in bytes.
        size: usize,
        /// Configured limit in bytes.
        limit: usize,
    },
}

/// Result type alias using [`AnalysisError`].
pub type AnalysisResult<T> = Result<T, AnalysisError>;

/// Errors raised by the tutor session store.
#[derive(Error, Debug)]
pub enum SessionError {
    /// No session exists for the user.
    #[error("no active tutor session for user {user_id}")]
    NotFound {
        /// The user id that was looked up.
        user_id: String,
    },

    /// A session already exists for the user.
    #[error("a tutor session already exists for user {user_id}")]
    AlreadyExists {
        /// The user id that was requested.
        user_id: String,
    },

    /// The store holds its maximum number of sessions.
    #[error("session store is full ({capacity} sessions); end a session first")]
    CapacityReached {
        /// Maximum number of concurrent sessions.
        capacity: usize,
    },

    /// Scoring the response failed.
    #[error(transparent)]
    Analysis(#[from] AnalysisError),
}

/// Result type alias using [`SessionError`].
pub type SessionResult<T> = Result<T, SessionError>;

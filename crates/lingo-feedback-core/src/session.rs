//! Per-user tutor sessions.
//!
//! A [`SessionStore`] maps user ids to a [`TutorSession`]: the tutor profile
//! chosen at session start plus an analyzer bound to the profile's language.
//! The store is owned by the caller; the MCP server shares one behind a mutex.

use std::collections::BTreeMap;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::{SessionError, SessionResult};
use crate::feedback::{FeedbackAnalyzer, FeedbackReport};

/// How a tutor presents itself to the learner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct TutorProfile {
    /// Tutor personality, e.g. "friendly".
    pub personality: String,
    /// Teaching style, e.g. "conversational".
    pub teaching_style: String,
    /// Language code the learner practices.
    pub language: String,
}

impl Default for TutorProfile {
    fn default() -> Self {
        Self {
            personality: "friendly".to_string(),
            teaching_style: "conversational".to_string(),
            language: "en".to_string(),
        }
    }
}

/// One learner's active tutor.
#[derive(Debug, Clone)]
pub struct TutorSession {
    profile: TutorProfile,
    analyzer: FeedbackAnalyzer,
    evaluations: usize,
    last_score: Option<f64>,
}

impl TutorSession {
    /// The profile the session was started with.
    pub const fn profile(&self) -> &TutorProfile {
        &self.profile
    }

    /// The analyzer bound to the profile's language.
    pub const fn analyzer(&self) -> &FeedbackAnalyzer {
        &self.analyzer
    }

    /// Number of responses evaluated in this session.
    pub const fn evaluations(&self) -> usize {
        self.evaluations
    }

    /// Overall score of the most recent evaluation.
    pub const fn last_score(&self) -> Option<f64> {
        self.last_score
    }

    /// A serializable snapshot of the session.
    pub fn summary(&self, user_id: &str) -> SessionSummary {
        SessionSummary {
            user_id: user_id.to_string(),
            profile: self.profile.clone(),
            language: self.analyzer.language().code().to_string(),
            evaluations: self.evaluations,
            last_score: self.last_score,
        }
    }
}

/// Snapshot of a session for display and tool output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct SessionSummary {
    /// The session's user id.
    pub user_id: String,
    /// Profile the session was started with.
    pub profile: TutorProfile,
    /// Language analysis runs in, after fallback.
    pub language: String,
    /// Responses evaluated so far.
    pub evaluations: usize,
    /// Overall score of the most recent evaluation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_score: Option<f64>,
}

/// Builds the analyzer for a new session from its profile.
type AnalyzerFactory = Box<dyn Fn(&TutorProfile) -> FeedbackAnalyzer + Send + Sync>;

/// Tutor sessions keyed by user id.
pub struct SessionStore {
    sessions: BTreeMap<String, TutorSession>,
    capacity: Option<usize>,
    factory: AnalyzerFactory,
}

impl std::fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionStore")
            .field("sessions", &self.sessions.len())
            .field("capacity", &self.capacity)
            .finish_non_exhaustive()
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionStore {
    /// An unbounded store whose sessions use the default analyzer settings.
    pub fn new() -> Self {
        Self {
            sessions: BTreeMap::new(),
            capacity: None,
            factory: Box::new(|profile| FeedbackAnalyzer::new(&profile.language)),
        }
    }

    /// Limit the number of concurrent sessions.
    #[must_use]
    pub const fn with_capacity(mut self, capacity: Option<usize>) -> Self {
        self.capacity = capacity;
        self
    }

    /// Customize how each session's analyzer is built.
    #[must_use]
    pub fn with_analyzer_factory(
        mut self,
        factory: impl Fn(&TutorProfile) -> FeedbackAnalyzer + Send + Sync + 'static,
    ) -> Self {
        self.factory = Box::new(factory);
        self
    }

    /// Start a session for `user_id`.
    #[tracing::instrument(skip(self, profile), fields(language = %profile.language))]
    pub fn create(&mut self, user_id: &str, profile: TutorProfile) -> SessionResult<&TutorSession> {
        if self.sessions.contains_key(user_id) {
            return Err(SessionError::AlreadyExists {
                user_id: user_id.to_string(),
            });
        }
        if let Some(capacity) = self.capacity.filter(|&cap| self.sessions.len() >= cap) {
            return Err(SessionError::CapacityReached { capacity });
        }

        let session = TutorSession {
            analyzer: (self.factory)(&profile),
            profile,
            evaluations: 0,
            last_score: None,
        };
        tracing::info!(sessions = self.sessions.len() + 1, "tutor session started");
        Ok(&*self.sessions.entry(user_id.to_string()).or_insert(session))
    }

    /// The session for `user_id`, if any.
    pub fn get(&self, user_id: &str) -> Option<&TutorSession> {
        self.sessions.get(user_id)
    }

    /// The session for `user_id`, starting one with `profile` if absent.
    pub fn get_or_create(
        &mut self,
        user_id: &str,
        profile: TutorProfile,
    ) -> SessionResult<&TutorSession> {
        if self.sessions.contains_key(user_id) {
            return self.sessions.get(user_id).ok_or_else(|| SessionError::NotFound {
                user_id: user_id.to_string(),
            });
        }
        self.create(user_id, profile)
    }

    /// Evaluate a response with the user's session analyzer.
    ///
    /// Fails with [`SessionError::NotFound`] when the user has no session.
    #[tracing::instrument(skip(self, text, expected), fields(text_len = text.len()))]
    pub fn evaluate(
        &mut self,
        user_id: &str,
        text: &str,
        expected: Option<&[String]>,
    ) -> SessionResult<FeedbackReport> {
        let report = self.session_mut(user_id)?.analyzer.evaluate(text, expected)?;
        self.record(user_id, &report)?;
        Ok(report)
    }

    /// Count a report produced with a clone of the session's analyzer.
    ///
    /// Callers sharing the store behind a lock can analyze without holding
    /// it and record the result afterwards. Fails with
    /// [`SessionError::NotFound`] if the session ended in between.
    pub fn record(&mut self, user_id: &str, report: &FeedbackReport) -> SessionResult<()> {
        let session = self.session_mut(user_id)?;
        session.evaluations += 1;
        session.last_score = Some(report.overall_score);
        Ok(())
    }

    /// End the session for `user_id`, returning it.
    #[tracing::instrument(skip(self))]
    pub fn evict(&mut self, user_id: &str) -> SessionResult<TutorSession> {
        let session = self
            .sessions
            .remove(user_id)
            .ok_or_else(|| SessionError::NotFound {
                user_id: user_id.to_string(),
            })?;
        tracing::info!(evaluations = session.evaluations, "tutor session ended");
        Ok(session)
    }

    fn session_mut(&mut self, user_id: &str) -> SessionResult<&mut TutorSession> {
        self.sessions
            .get_mut(user_id)
            .ok_or_else(|| SessionError::NotFound {
                user_id: user_id.to_string(),
            })
    }

    /// Number of active sessions.
    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    /// Whether there are no active sessions.
    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    /// Ids of users with an active session, sorted.
    pub fn user_ids(&self) -> impl Iterator<Item = &str> {
        self.sessions.keys().map(String::as_str)
    }
}

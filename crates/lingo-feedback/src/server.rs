//! MCP (Model Context Protocol) server implementation.
//!
//! Exposes response scoring and tutor sessions to AI assistants over stdio.
//! The server is a thin layer over `lingo-feedback-core`: tools parse their
//! parameters, call into the core library and return JSON text.
//!
//! One [`SessionStore`] is shared by every tool call behind a mutex, so a
//! tutor started with `start_session` is visible to later `session_evaluate`
//! and `end_session` calls on the same server.

use std::sync::{Arc, Mutex, MutexGuard};

use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::{CallToolResult, Content, Implementation, ServerCapabilities, ServerInfo};
use rmcp::schemars;
use rmcp::{ErrorData as McpError, ServerHandler, tool, tool_handler, tool_router};
use serde::Serialize;

use lingo_feedback_core::config::Config;
use lingo_feedback_core::error::SessionError;
use lingo_feedback_core::feedback::FeedbackAnalyzer;
use lingo_feedback_core::language::{DEFAULT_LANGUAGE, LANGUAGE_MODELS};
use lingo_feedback_core::session::{SessionStore, TutorProfile};

/// Parameters for the `get_info` tool.
#[derive(Debug, serde::Deserialize, schemars::JsonSchema)]
pub struct GetInfoParams {
    /// Output format: "text" or "json"
    #[serde(default = "default_format")]
    pub format: String,
}

fn default_format() -> String {
    "text".to_string()
}

/// Parameters for the `evaluate_response` tool.
#[derive(Debug, serde::Deserialize, schemars::JsonSchema)]
pub struct EvaluateResponseParams {
    /// The learner's response.
    pub text: String,
    /// Language code (en, es, fr, de). Defaults to the server's language.
    pub language: Option<String>,
    /// Phrases the response is expected to contain.
    pub expected_patterns: Option<Vec<String>>,
}

/// Parameters for the `list_languages` tool.
#[derive(Debug, Default, serde::Deserialize, schemars::JsonSchema)]
pub struct ListLanguagesParams {}

/// Parameters for the `start_session` tool.
#[derive(Debug, serde::Deserialize, schemars::JsonSchema)]
pub struct StartSessionParams {
    /// Learner identifier.
    pub user_id: String,
    /// Tutor personality, e.g. "friendly".
    pub personality: Option<String>,
    /// Teaching style, e.g. "conversational".
    pub teaching_style: Option<String>,
    /// Language the learner practices. Defaults to the server's language.
    pub language: Option<String>,
}

/// Parameters for the `session_evaluate` tool.
#[derive(Debug, serde::Deserialize, schemars::JsonSchema)]
pub struct SessionEvaluateParams {
    /// Learner identifier with an active session.
    pub user_id: String,
    /// The learner's response.
    pub text: String,
    /// Phrases the response is expected to contain.
    pub expected_patterns: Option<Vec<String>>,
}

/// Parameters for the `end_session` tool.
#[derive(Debug, serde::Deserialize, schemars::JsonSchema)]
pub struct EndSessionParams {
    /// Learner identifier with an active session.
    pub user_id: String,
}

#[derive(Serialize)]
struct LanguageEntry {
    code: &'static str,
    name: &'static str,
    model: &'static str,
    default: bool,
}

/// MCP server for response scoring and tutor sessions.
#[derive(Clone)]
pub struct FeedbackServer {
    tool_router: rmcp::handler::server::router::tool::ToolRouter<Self>,
    config: Arc<Config>,
    sessions: Arc<Mutex<SessionStore>>,
}

impl Default for FeedbackServer {
    fn default() -> Self {
        Self::new()
    }
}

#[tool_router]
impl FeedbackServer {
    /// Server with the default configuration.
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    /// Server whose analyzers and session store follow `config`.
    pub fn with_config(config: Config) -> Self {
        let config = Arc::new(config);
        let factory_config = Arc::clone(&config);
        let store = SessionStore::new()
            .with_capacity(config.max_sessions)
            .with_analyzer_factory(move |profile| {
                FeedbackAnalyzer::new(&profile.language).with_config(&factory_config)
            });
        Self {
            tool_router: Self::tool_router(),
            config,
            sessions: Arc::new(Mutex::new(store)),
        }
    }

    /// Get package information.
    #[tool(description = "Get server name, version, and description")]
    #[tracing::instrument(skip(self), fields(otel.kind = "server"))]
    fn get_info(
        &self,
        Parameters(params): Parameters<GetInfoParams>,
    ) -> Result<CallToolResult, McpError> {
        tracing::debug!(tool = "get_info", format = %params.format, "executing MCP tool");

        let info = serde_json::json!({
            "name": env!("CARGO_PKG_NAME"),
            "version": env!("CARGO_PKG_VERSION"),
            "description": env!("CARGO_PKG_DESCRIPTION"),
            "language": self.config.language,
        });

        let text = if params.format == "json" {
            to_json(&info)?
        } else {
            format!(
                "{} v{}\n{}",
                env!("CARGO_PKG_NAME"),
                env!("CARGO_PKG_VERSION"),
                env!("CARGO_PKG_DESCRIPTION"),
            )
        };

        Ok(CallToolResult::success(vec![Content::text(text)]))
    }

    /// Score a single response without a session.
    #[tool(
        description = "Score a learner's response: accuracy, fluency, pronunciation, vocabulary and grammar in [0, 1], improvement suggestions, and a weighted overall score"
    )]
    #[tracing::instrument(skip(self, params), fields(otel.kind = "server", text_len = params.text.len()))]
    fn evaluate_response(
        &self,
        Parameters(params): Parameters<EvaluateResponseParams>,
    ) -> Result<CallToolResult, McpError> {
        tracing::debug!(tool = "evaluate_response", language = ?params.language, "executing MCP tool");

        let code = params.language.as_deref().unwrap_or(&self.config.language);
        let report = FeedbackAnalyzer::new(code)
            .with_config(&self.config)
            .evaluate(&params.text, params.expected_patterns.as_deref())
            .map_err(|e| McpError::internal_error(e.to_string(), None))?;

        tracing::info!(overall_score = report.overall_score, "MCP tool completed");
        Ok(CallToolResult::success(vec![Content::text(to_json(
            &report,
        )?)]))
    }

    /// List supported languages.
    #[tool(description = "List supported language codes and the analysis model each uses")]
    #[tracing::instrument(skip(self, _params), fields(otel.kind = "server"))]
    fn list_languages(
        &self,
        Parameters(_params): Parameters<ListLanguagesParams>,
    ) -> Result<CallToolResult, McpError> {
        tracing::debug!(tool = "list_languages", "executing MCP tool");

        let entries: Vec<LanguageEntry> = LANGUAGE_MODELS
            .iter()
            .map(|&(language, model)| LanguageEntry {
                code: language.code(),
                name: language.name(),
                model,
                default: language == DEFAULT_LANGUAGE,
            })
            .collect();

        Ok(CallToolResult::success(vec![Content::text(to_json(
            &entries,
        )?)]))
    }

    /// Start a tutor session.
    #[tool(description = "Start a tutor session for a learner with a personality, teaching style and language")]
    #[tracing::instrument(skip(self, params), fields(otel.kind = "server", user_id = %params.user_id))]
    fn start_session(
        &self,
        Parameters(params): Parameters<StartSessionParams>,
    ) -> Result<CallToolResult, McpError> {
        tracing::debug!(tool = "start_session", "executing MCP tool");

        let defaults = TutorProfile::default();
        let profile = TutorProfile {
            personality: params.personality.unwrap_or(defaults.personality),
            teaching_style: params.teaching_style.unwrap_or(defaults.teaching_style),
            language: params
                .language
                .unwrap_or_else(|| self.config.language.clone()),
        };

        let mut store = self.lock_sessions()?;
        let summary = store
            .create(&params.user_id, profile)
            .map_err(session_error)?
            .summary(&params.user_id);

        tracing::info!(language = %summary.language, "MCP tool completed");
        Ok(CallToolResult::success(vec![Content::text(to_json(
            &summary,
        )?)]))
    }

    /// Score a response in a learner's session.
    #[tool(description = "Score a learner's response with the analyzer of their active tutor session")]
    #[tracing::instrument(skip(self, params), fields(otel.kind = "server", user_id = %params.user_id))]
    fn session_evaluate(
        &self,
        Parameters(params): Parameters<SessionEvaluateParams>,
    ) -> Result<CallToolResult, McpError> {
        tracing::debug!(tool = "session_evaluate", "executing MCP tool");

        // The store stays unlocked while the response is analyzed.
        let analyzer = self
            .lock_sessions()?
            .get(&params.user_id)
            .map(|session| session.analyzer().clone())
            .ok_or_else(|| {
                session_error(SessionError::NotFound {
                    user_id: params.user_id.clone(),
                })
            })?;
        let report = analyzer
            .evaluate(&params.text, params.expected_patterns.as_deref())
            .map_err(|e| session_error(e.into()))?;
        self.lock_sessions()?
            .record(&params.user_id, &report)
            .map_err(session_error)?;

        tracing::info!(overall_score = report.overall_score, "MCP tool completed");
        Ok(CallToolResult::success(vec![Content::text(to_json(
            &report,
        )?)]))
    }

    /// End a learner's session.
    #[tool(description = "End a learner's tutor session and return its summary")]
    #[tracing::instrument(skip(self, params), fields(otel.kind = "server", user_id = %params.user_id))]
    fn end_session(
        &self,
        Parameters(params): Parameters<EndSessionParams>,
    ) -> Result<CallToolResult, McpError> {
        tracing::debug!(tool = "end_session", "executing MCP tool");

        let mut store = self.lock_sessions()?;
        let summary = store
            .evict(&params.user_id)
            .map_err(session_error)?
            .summary(&params.user_id);

        tracing::info!(evaluations = summary.evaluations, "MCP tool completed");
        Ok(CallToolResult::success(vec![Content::text(to_json(
            &summary,
        )?)]))
    }

    fn lock_sessions(&self) -> Result<MutexGuard<'_, SessionStore>, McpError> {
        self.sessions
            .lock()
            .map_err(|_| McpError::internal_error("session store lock poisoned", None))
    }
}

fn to_json<T: Serialize>(value: &T) -> Result<String, McpError> {
    serde_json::to_string_pretty(value)
        .map_err(|e| McpError::internal_error(format!("serialization error: {e}"), None))
}

/// Lifecycle mistakes are the caller's; analysis failures are ours.
fn session_error(err: SessionError) -> McpError {
    match err {
        SessionError::Analysis(_) => McpError::internal_error(err.to_string(), None),
        _ => McpError::invalid_params(err.to_string(), None),
    }
}

#[tool_handler]
impl ServerHandler for FeedbackServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: Default::default(),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: env!("CARGO_PKG_NAME").to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                ..Default::default()
            },
            instructions: Some(format!(
                "{} MCP server. Use evaluate_response to score a single learner response, \
                 or start_session, session_evaluate and end_session to tutor a learner.",
                env!("CARGO_PKG_NAME"),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Weak;

    use lingo_feedback_core::analysis::{AnalyzedText, RuleBasedAnalyzer, TextAnalyzer};
    use lingo_feedback_core::error::{AnalysisError, AnalysisResult};
    use lingo_feedback_core::language::Language;
    use rmcp::model::RawContent;

    /// Extract text from the first content item in a `CallToolResult`.
    fn extract_text(result: &CallToolResult) -> Option<&str> {
        result.content.first().and_then(|c| match &c.raw {
            RawContent::Text(t) => Some(t.text.as_str()),
            _ => None,
        })
    }

    fn json_of(result: &CallToolResult) -> serde_json::Value {
        assert!(!result.is_error.unwrap_or(false));
        let text = extract_text(result).expect("should have text content");
        serde_json::from_str(text).expect("valid JSON")
    }

    fn start(server: &FeedbackServer, user_id: &str, language: &str) -> CallToolResult {
        server
            .start_session(Parameters(StartSessionParams {
                user_id: user_id.to_string(),
                personality: None,
                teaching_style: Some("drills".to_string()),
                language: Some(language.to_string()),
            }))
            .expect("start_session should succeed")
    }

    #[test]
    fn server_info_has_correct_name() {
        let server = FeedbackServer::new();
        let info = ServerHandler::get_info(&server);
        assert_eq!(info.server_info.name, env!("CARGO_PKG_NAME"));
        assert_eq!(info.server_info.version, env!("CARGO_PKG_VERSION"));
        assert!(info.capabilities.tools.is_some());
    }

    #[test]
    fn server_has_instructions() {
        let server = FeedbackServer::new();
        let info = ServerHandler::get_info(&server);
        let instructions = info.instructions.expect("server should have instructions");
        assert!(instructions.contains("evaluate_response"));
    }

    #[test]
    fn get_info_tool_returns_json_when_requested() {
        let server = FeedbackServer::new();
        let result = server
            .get_info(Parameters(GetInfoParams {
                format: "json".to_string(),
            }))
            .expect("get_info should succeed");
        let json = json_of(&result);
        assert_eq!(json["name"], env!("CARGO_PKG_NAME"));
        assert_eq!(json["language"], "en");
    }

    #[test]
    fn get_info_tool_returns_text_by_default() {
        let server = FeedbackServer::new();
        let result = server
            .get_info(Parameters(GetInfoParams {
                format: default_format(),
            }))
            .expect("get_info should succeed");
        let text = extract_text(&result).expect("should have text content");
        assert!(text.contains(env!("CARGO_PKG_VERSION")));
    }

    #[test]
    fn evaluate_response_tool_scores_text() {
        let server = FeedbackServer::new();
        let result = server
            .evaluate_response(Parameters(EvaluateResponseParams {
                text: "Me gusta la pizza".to_string(),
                language: Some("es".to_string()),
                expected_patterns: Some(vec!["pizza".to_string(), "sushi".to_string()]),
            }))
            .expect("evaluate_response should succeed");
        let json = json_of(&result);
        assert_eq!(json["metrics"]["accuracy"].as_f64(), Some(0.5));
        assert_eq!(json["language"], "es");
        let overall = json["overall_score"].as_f64().unwrap();
        assert!((0.0..=1.0).contains(&overall));
    }

    #[test]
    fn evaluate_response_rejects_oversized_input() {
        let config = Config {
            max_input_bytes: Some(4),
            ..Config::default()
        };
        let server = FeedbackServer::with_config(config);
        let err = server
            .evaluate_response(Parameters(EvaluateResponseParams {
                text: "far too long".to_string(),
                language: None,
                expected_patterns: None,
            }))
            .unwrap_err();
        assert!(err.message.contains("too large"));
    }

    #[test]
    fn list_languages_tool_lists_all_models() {
        let server = FeedbackServer::new();
        let result = server
            .list_languages(Parameters(ListLanguagesParams::default()))
            .expect("list_languages should succeed");
        let json = json_of(&result);
        let entries = json.as_array().unwrap();
        assert_eq!(entries.len(), 4);
        assert_eq!(entries[0]["code"], "en");
        assert_eq!(entries[0]["default"], true);
        assert_eq!(entries[1]["model"], "es_core_news_sm");
    }

    #[test]
    fn session_lifecycle() {
        let server = FeedbackServer::new();

        let started = json_of(&start(&server, "ana", "fr"));
        assert_eq!(started["language"], "fr");
        assert_eq!(started["profile"]["personality"], "friendly");
        assert_eq!(started["profile"]["teaching_style"], "drills");

        let result = server
            .session_evaluate(Parameters(SessionEvaluateParams {
                user_id: "ana".to_string(),
                text: "J'aime le fromage.".to_string(),
                expected_patterns: Some(vec!["fromage".to_string()]),
            }))
            .expect("session_evaluate should succeed");
        let report = json_of(&result);
        assert_eq!(report["metrics"]["accuracy"].as_f64(), Some(1.0));

        let ended = server
            .end_session(Parameters(EndSessionParams {
                user_id: "ana".to_string(),
            }))
            .expect("end_session should succeed");
        let summary = json_of(&ended);
        assert_eq!(summary["evaluations"], 1);
        assert_eq!(summary["last_score"], report["overall_score"]);
    }

    #[test]
    fn duplicate_session_is_invalid_params() {
        let server = FeedbackServer::new();
        start(&server, "ana", "es");
        let err = server
            .start_session(Parameters(StartSessionParams {
                user_id: "ana".to_string(),
                personality: None,
                teaching_style: None,
                language: None,
            }))
            .unwrap_err();
        assert!(err.message.contains("ana"));
    }

    #[test]
    fn session_evaluate_without_session_fails() {
        let server = FeedbackServer::new();
        let err = server
            .session_evaluate(Parameters(SessionEvaluateParams {
                user_id: "ghost".to_string(),
                text: "hello".to_string(),
                expected_patterns: None,
            }))
            .unwrap_err();
        assert_eq!(err.message, "no active tutor session for user ghost");
    }

    /// Fails analysis whenever the shared session store is locked.
    #[derive(Debug)]
    struct RequiresUnlockedStore(Weak<Mutex<SessionStore>>);

    impl TextAnalyzer for RequiresUnlockedStore {
        fn analyze(&self, text: &str, language: Language) -> AnalysisResult<AnalyzedText> {
            let store = self
                .0
                .upgrade()
                .ok_or_else(|| AnalysisError::Provider("session store dropped".to_string()))?;
            if store.try_lock().is_err() {
                return Err(AnalysisError::Provider(
                    "session store locked during analysis".to_string(),
                ));
            }
            RuleBasedAnalyzer::new().analyze(text, language)
        }
    }

    #[test]
    fn session_analysis_runs_without_holding_the_store() {
        let server = FeedbackServer::new();
        let store = Arc::downgrade(&server.sessions);
        *server.sessions.lock().unwrap() =
            SessionStore::new().with_analyzer_factory(move |profile| {
                FeedbackAnalyzer::new(&profile.language)
                    .with_analyzer(RequiresUnlockedStore(store.clone()))
            });
        start(&server, "ana", "es");

        let result = server
            .session_evaluate(Parameters(SessionEvaluateParams {
                user_id: "ana".to_string(),
                text: "Me gusta la pizza".to_string(),
                expected_patterns: None,
            }))
            .expect("analysis should not see a locked store");
        let report = json_of(&result);

        let store = server.sessions.lock().unwrap();
        let session = store.get("ana").unwrap();
        assert_eq!(session.evaluations(), 1);
        assert_eq!(
            session.last_score(),
            report["overall_score"].as_f64()
        );
    }

    #[test]
    fn provider_failure_is_internal_error() {
        let server = FeedbackServer::new();
        let store = Arc::downgrade(&server.sessions);
        *server.sessions.lock().unwrap() =
            SessionStore::new().with_analyzer_factory(move |profile| {
                FeedbackAnalyzer::new(&profile.language)
                    .with_analyzer(RequiresUnlockedStore(store.clone()))
            });
        start(&server, "ana", "es");

        // Holding the store while evaluating makes the provider fail.
        let analyzer = server
            .sessions
            .lock()
            .unwrap()
            .get("ana")
            .map(|s| s.analyzer().clone())
            .unwrap();
        let guard = server.sessions.lock().unwrap();
        let err = analyzer.evaluate("Hola", None).unwrap_err();
        drop(guard);

        let err = session_error(err.into());
        assert_eq!(err.message, "text analysis failed: session store locked during analysis");
    }

    #[test]
    fn configured_capacity_is_enforced() {
        let config = Config {
            max_sessions: Some(1),
            ..Config::default()
        };
        let server = FeedbackServer::with_config(config);
        start(&server, "ana", "es");
        let err = server
            .start_session(Parameters(StartSessionParams {
                user_id: "ben".to_string(),
                personality: None,
                teaching_style: None,
                language: None,
            }))
            .unwrap_err();
        assert!(err.message.contains('1'));
    }

    #[test]
    fn clones_share_sessions() {
        let server = FeedbackServer::new();
        let clone = server.clone();
        start(&server, "ana", "de");
        let ended = clone
            .end_session(Parameters(EndSessionParams {
                user_id: "ana".to_string(),
            }))
            .expect("clone should see the session");
        assert_eq!(json_of(&ended)["language"], "de");
    }
}

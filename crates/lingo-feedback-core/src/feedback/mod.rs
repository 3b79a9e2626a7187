//! Response evaluation: analysis, metrics, suggestions and the overall score.
//!
//! [`FeedbackAnalyzer`] is bound to one language at construction. Each call
//! to [`FeedbackAnalyzer::evaluate`] runs the text analyzer once, computes
//! the five metrics independently over the shared analysis, derives
//! suggestions and combines the metrics with fixed weights.
//!
//! ```
//! use lingo_feedback_core::FeedbackAnalyzer;
//!
//! let analyzer = FeedbackAnalyzer::new("es");
//! let expected = vec!["pizza".to_string(), "gusta".to_string()];
//! let report = analyzer.evaluate("Me gusta la pizza", Some(expected.as_slice())).unwrap();
//! assert!((report.metrics.accuracy - 1.0).abs() < f64::EPSILON);
//! ```

pub mod aggregate;
pub mod metrics;
pub mod report;
pub mod scorers;
pub mod suggestions;

use std::sync::Arc;

pub use aggregate::{MetricWeights, WEIGHTS, overall_score};
pub use metrics::MetricSet;
pub use report::FeedbackReport;
pub use scorers::{FixedPronunciation, GrammarScorer, PronunciationScorer, StructuralGrammar};
pub use suggestions::{Suggestion, SuggestionType};

use crate::analysis::{AnalyzedText, RuleBasedAnalyzer, TextAnalyzer};
use crate::config::Config;
use crate::error::{AnalysisError, AnalysisResult};
use crate::language::{Language, ModelSelection, select_model};

/// Scores learner responses in one language.
#[derive(Debug, Clone)]
pub struct FeedbackAnalyzer {
    selection: ModelSelection,
    analyzer: Arc<dyn TextAnalyzer>,
    pronunciation: Arc<dyn PronunciationScorer>,
    grammar: Arc<dyn GrammarScorer>,
    max_input_bytes: Option<usize>,
}

impl FeedbackAnalyzer {
    /// Analyzer for `language_code` with the built-in text analyzer and the
    /// default scorers. Unsupported codes fall back to English.
    pub fn new(language_code: &str) -> Self {
        Self {
            selection: select_model(language_code),
            analyzer: Arc::new(RuleBasedAnalyzer::new()),
            pronunciation: Arc::new(FixedPronunciation::default()),
            grammar: Arc::new(StructuralGrammar),
            max_input_bytes: Some(crate::DEFAULT_MAX_INPUT_BYTES),
        }
    }

    /// Analyzer for the configured language, pronunciation score and input limit.
    pub fn from_config(config: &Config) -> Self {
        Self::new(&config.language).with_config(config)
    }

    /// Apply the pronunciation score and input limit from `config`, keeping
    /// the current language.
    #[must_use]
    pub fn with_config(self, config: &Config) -> Self {
        self.with_pronunciation(FixedPronunciation::new(config.pronunciation_score))
            .with_max_input_bytes(config.effective_max_input_bytes())
    }

    /// Replace the text analyzer.
    #[must_use]
    pub fn with_analyzer(mut self, analyzer: impl TextAnalyzer + 'static) -> Self {
        self.analyzer = Arc::new(analyzer);
        self
    }

    /// Replace the pronunciation scorer.
    #[must_use]
    pub fn with_pronunciation(mut self, scorer: impl PronunciationScorer + 'static) -> Self {
        self.pronunciation = Arc::new(scorer);
        self
    }

    /// Replace the grammar scorer.
    #[must_use]
    pub fn with_grammar(mut self, scorer: impl GrammarScorer + 'static) -> Self {
        self.grammar = Arc::new(scorer);
        self
    }

    /// Set the response size limit in bytes; `None` disables it.
    #[must_use]
    pub const fn with_max_input_bytes(mut self, limit: Option<usize>) -> Self {
        self.max_input_bytes = limit;
        self
    }

    /// The language analysis runs in.
    pub const fn language(&self) -> Language {
        self.selection.language
    }

    /// How the requested language code was resolved.
    pub const fn selection(&self) -> &ModelSelection {
        &self.selection
    }

    /// Evaluate a raw response against optional expected patterns.
    #[tracing::instrument(
        skip(self, text, expected),
        fields(language = %self.selection.language, text_len = text.len())
    )]
    pub fn evaluate(
        &self,
        text: &str,
        expected: Option<&[String]>,
    ) -> AnalysisResult<FeedbackReport> {
        if let Some(limit) = self.max_input_bytes.filter(|&limit| text.len() > limit) {
            return Err(AnalysisError::InputTooLarge {
                size: text.len(),
                limit,
            });
        }

        let doc = self.analyzer.analyze(text, self.selection.language)?;
        self.evaluate_analyzed(&doc, expected)
    }

    /// Evaluate a response that was already analyzed.
    ///
    /// The document is validated first; malformed sentence spans are
    /// rejected with [`AnalysisError::MalformedAnalysis`].
    pub fn evaluate_analyzed(
        &self,
        doc: &AnalyzedText,
        expected: Option<&[String]>,
    ) -> AnalysisResult<FeedbackReport> {
        doc.validate()?;

        let metrics = MetricSet {
            accuracy: metrics::accuracy(&doc.text, expected),
            fluency: metrics::fluency(doc),
            pronunciation: metrics::unit(self.pronunciation.score(doc)),
            vocabulary: metrics::vocabulary(doc),
            grammar: metrics::unit(self.grammar.score(doc)),
        };
        let suggestions = suggestions::generate(doc, &metrics);
        let overall_score = overall_score(&metrics);

        tracing::debug!(
            overall_score,
            suggestions = suggestions.len(),
            "response evaluated"
        );

        Ok(FeedbackReport {
            metrics,
            suggestions,
            overall_score,
            language: self.selection.language,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::{Dependency, PartOfSpeech, SentenceSpan, Token};

    fn expect(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| (*s).to_string()).collect()
    }

    fn assert_in_unit(report: &FeedbackReport) {
        for (name, value) in report.metrics.named() {
            assert!((0.0..=1.0).contains(&value), "{name} = {value}");
        }
        assert!((0.0..=1.0).contains(&report.overall_score));
    }

    #[test]
    fn empty_response_degrades_without_error() {
        let report = FeedbackAnalyzer::new("en").evaluate("", None).unwrap();
        assert!(report.metrics.fluency.abs() < f64::EPSILON);
        assert!(report.metrics.vocabulary.abs() < f64::EPSILON);
        assert!((report.metrics.accuracy - 1.0).abs() < f64::EPSILON);
        assert!((report.metrics.grammar - 0.7).abs() < f64::EPSILON);
        assert_in_unit(&report);
    }

    #[test]
    fn spanish_response_with_expected_patterns() {
        let analyzer = FeedbackAnalyzer::new("es");
        let text = "Me gusta la pizza";

        let full = analyzer.evaluate(text, Some(expect(&["pizza", "gusta"]).as_slice())).unwrap();
        assert!((full.metrics.accuracy - 1.0).abs() < f64::EPSILON);
        assert_eq!(full.language, Language::Es);

        let half = analyzer.evaluate(text, Some(expect(&["pizza", "sushi"]).as_slice())).unwrap();
        assert!((half.metrics.accuracy - 0.5).abs() < f64::EPSILON);
        assert_in_unit(&half);
    }

    #[test]
    fn overall_is_weighted_sum() {
        let report = FeedbackAnalyzer::new("en")
            .evaluate("I like pizza and I like pasta.", None)
            .unwrap();
        let m = report.metrics;
        let expected = 0.3 * m.accuracy
            + 0.2 * m.fluency
            + 0.2 * m.pronunciation
            + 0.15 * m.vocabulary
            + 0.15 * m.grammar;
        assert!((report.overall_score - expected).abs() < 1e-9);
        assert!((m.grammar - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn conjunction_raises_fluency() {
        let analyzer = FeedbackAnalyzer::new("en");
        let with_cc = analyzer.evaluate("I cook rice and beans.", None).unwrap();
        let without = analyzer.evaluate("I cook rice with beans.", None).unwrap();
        assert!(with_cc.metrics.fluency > without.metrics.fluency);
    }

    #[test]
    fn verbless_response_gets_grammar_suggestion() {
        let report = FeedbackAnalyzer::new("en").evaluate("Pizza!", None).unwrap();
        assert!((report.metrics.grammar - 0.7).abs() < f64::EPSILON);
        assert_eq!(report.suggestions[0].kind, SuggestionType::Grammar);
        assert_eq!(report.suggestions[0].original, "Pizza");
        assert_eq!(
            report.suggestions.last().map(|s| s.kind),
            Some(SuggestionType::Vocabulary)
        );
    }

    #[test]
    fn unsupported_language_falls_back_to_english() {
        let analyzer = FeedbackAnalyzer::new("xx");
        assert_eq!(analyzer.language(), Language::En);
        assert!(analyzer.selection().fallback);
        let report = analyzer.evaluate("Hello there.", None).unwrap();
        assert_eq!(report.language, Language::En);
    }

    #[test]
    fn identical_inputs_give_identical_reports() {
        let analyzer = FeedbackAnalyzer::new("fr");
        let patterns = expect(&["fromage"]);
        let a = analyzer.evaluate("J'aime le fromage et le pain.", Some(patterns.as_slice())).unwrap();
        let b = analyzer.evaluate("J'aime le fromage et le pain.", Some(patterns.as_slice())).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn input_limit_is_enforced() {
        let analyzer = FeedbackAnalyzer::new("en").with_max_input_bytes(Some(4));
        let err = analyzer.evaluate("hello", None).unwrap_err();
        assert!(matches!(err, AnalysisError::InputTooLarge { size: 5, limit: 4 }));

        let unlimited = analyzer.with_max_input_bytes(None);
        assert!(unlimited.evaluate("hello", None).is_ok());
    }

    #[test]
    fn custom_scorers_are_used_and_clamped() {
        #[derive(Debug)]
        struct Loud;
        impl GrammarScorer for Loud {
            fn score(&self, _doc: &AnalyzedText) -> f64 {
                3.0
            }
        }

        let report = FeedbackAnalyzer::new("en")
            .with_pronunciation(FixedPronunciation::new(0.5))
            .with_grammar(Loud)
            .evaluate("I run.", None)
            .unwrap();
        assert!((report.metrics.pronunciation - 0.5).abs() < f64::EPSILON);
        assert!((report.metrics.grammar - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn provider_errors_propagate_unchanged() {
        #[derive(Debug)]
        struct Offline;
        impl TextAnalyzer for Offline {
            fn analyze(&self, _text: &str, language: Language) -> AnalysisResult<AnalyzedText> {
                Err(AnalysisError::Provider(format!("no model loaded for {language}")))
            }
        }

        let err = FeedbackAnalyzer::new("de")
            .with_analyzer(Offline)
            .evaluate("Hallo", None)
            .unwrap_err();
        assert!(matches!(err, AnalysisError::Provider(ref msg) if msg == "no model loaded for de"));
        assert_eq!(err.to_string(), "text analysis failed: no model loaded for de");
    }

    #[test]
    fn pre_analyzed_documents_are_scored() {
        let doc = AnalyzedText {
            text: "Ella corre".to_string(),
            tokens: vec![
                Token {
                    text: "Ella".to_string(),
                    lemma: "ella".to_string(),
                    pos: PartOfSpeech::Pron,
                    dep: Dependency::Nsubj,
                    is_stop: true,
                },
                Token {
                    text: "corre".to_string(),
                    lemma: "correr".to_string(),
                    pos: PartOfSpeech::Verb,
                    dep: Dependency::Root,
                    is_stop: false,
                },
            ],
            sentences: vec![SentenceSpan { start: 0, end: 2 }],
        };
        let report = FeedbackAnalyzer::new("es")
            .evaluate_analyzed(&doc, None)
            .unwrap();
        assert!((report.metrics.grammar - 1.0).abs() < f64::EPSILON);
        assert!((report.metrics.vocabulary - 0.1).abs() < 1e-12);
    }

    #[test]
    fn malformed_documents_are_rejected() {
        let mut doc = AnalyzedText::empty("x");
        doc.sentences.push(SentenceSpan { start: 0, end: 1 });
        let err = FeedbackAnalyzer::new("en")
            .evaluate_analyzed(&doc, None)
            .unwrap_err();
        assert!(matches!(err, AnalysisError::MalformedAnalysis(_)));
    }

    #[test]
    fn analyzer_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<FeedbackAnalyzer>();
    }
}

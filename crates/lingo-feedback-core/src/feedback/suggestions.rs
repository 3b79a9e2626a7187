//! Improvement suggestions derived from the analysis and the metrics.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::metrics::MetricSet;
use crate::analysis::{AnalyzedText, Dependency, PartOfSpeech};

/// Grammar scores below this produce main-verb suggestions.
pub const GRAMMAR_THRESHOLD: f64 = 0.8;

/// Vocabulary scores below this produce a variety suggestion.
pub const VOCABULARY_THRESHOLD: f64 = 0.7;

/// What a suggestion is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum SuggestionType {
    /// Sentence structure.
    Grammar,
    /// Word choice.
    Vocabulary,
}

/// One piece of actionable feedback.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Suggestion {
    /// Category of the suggestion.
    #[serde(rename = "type")]
    pub kind: SuggestionType,
    /// The text the suggestion refers to; empty when it concerns the whole response.
    pub original: String,
    /// What to do.
    pub suggestion: String,
    /// Why.
    pub explanation: String,
}

/// Suggestions for a response: grammar ones in token order, then vocabulary.
pub fn generate(doc: &AnalyzedText, metrics: &MetricSet) -> Vec<Suggestion> {
    let mut suggestions = Vec::new();

    if metrics.grammar < GRAMMAR_THRESHOLD {
        suggestions.extend(
            doc.tokens
                .iter()
                .filter(|t| t.dep == Dependency::Root && t.pos != PartOfSpeech::Verb)
                .map(|t| Suggestion {
                    kind: SuggestionType::Grammar,
                    original: t.text.clone(),
                    suggestion: "Consider using a proper verb here".to_string(),
                    explanation: "Sentences typically need a main verb.".to_string(),
                }),
        );
    }

    if metrics.vocabulary < VOCABULARY_THRESHOLD {
        suggestions.push(Suggestion {
            kind: SuggestionType::Vocabulary,
            original: String::new(),
            suggestion: "Try using more varied vocabulary".to_string(),
            explanation: "Using diverse vocabulary helps express ideas more precisely.".to_string(),
        });
    }

    suggestions
}

//! Pluggable pronunciation and grammar signals.
//!
//! Neither signal is measured from audio or a full parser. Both sit behind a
//! trait so a real model can replace the defaults without touching the
//! evaluator.

use std::fmt;

use crate::analysis::{AnalyzedText, Dependency, PartOfSpeech};

/// Pronunciation score returned by [`FixedPronunciation::default`].
pub const DEFAULT_PRONUNCIATION_SCORE: f64 = 0.9;

/// Grammar score when a subject and a main verb are present.
pub const GRAMMAR_COMPLETE: f64 = 1.0;

/// Grammar score when a subject or a main verb is missing.
pub const GRAMMAR_INCOMPLETE: f64 = 0.7;

/// Produces the pronunciation metric for an analyzed response.
pub trait PronunciationScorer: fmt::Debug + Send + Sync {
    /// Score in `[0, 1]`. Out-of-range values are clamped by the caller.
    fn score(&self, doc: &AnalyzedText) -> f64;
}

/// Produces the grammar metric for an analyzed response.
pub trait GrammarScorer: fmt::Debug + Send + Sync {
    /// Score in `[0, 1]`. Out-of-range values are clamped by the caller.
    fn score(&self, doc: &AnalyzedText) -> f64;
}

/// Returns the same pronunciation score for every response.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedPronunciation {
    score: f64,
}

impl FixedPronunciation {
    /// A scorer returning `score`, clamped into `[0, 1]`.
    pub fn new(score: f64) -> Self {
        Self {
            score: super::metrics::unit(score),
        }
    }

    /// The configured score.
    pub const fn value(&self) -> f64 {
        self.score
    }
}

impl Default for FixedPronunciation {
    fn default() -> Self {
        Self {
            score: DEFAULT_PRONUNCIATION_SCORE,
        }
    }
}

impl PronunciationScorer for FixedPronunciation {
    fn score(&self, _doc: &AnalyzedText) -> f64 {
        self.score
    }
}

/// Full marks when the response has a nominal subject and a verb.
#[derive(Debug, Clone, Copy, Default)]
pub struct StructuralGrammar;

impl GrammarScorer for StructuralGrammar {
    fn score(&self, doc: &AnalyzedText) -> f64 {
        if doc.has_dependency(Dependency::Nsubj) && doc.has_pos(PartOfSpeech::Verb) {
            GRAMMAR_COMPLETE
        } else {
            GRAMMAR_INCOMPLETE
        }
    }
}

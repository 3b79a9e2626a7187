//! The five response metrics and the calculators that read an analysis.

use std::collections::HashSet;

use aho_corasick::AhoCorasick;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::analysis::{AnalyzedText, Dependency};

/// Sentence length, in tokens, that scores full marks for length variety.
pub const IDEAL_SENTENCE_LENGTH: f64 = 15.0;

/// Fluency bonus when the response joins clauses with a coordinating conjunction.
pub const CONJUNCTION_BONUS: f64 = 0.2;

/// Distinct content lemmas that score full marks for vocabulary.
pub const VOCABULARY_TARGET: f64 = 10.0;

/// Scores for one evaluated response, each in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct MetricSet {
    /// Share of expected patterns found in the response.
    pub accuracy: f64,
    /// Sentence-length and clause-linking signal.
    pub fluency: f64,
    /// Pronunciation signal from the configured scorer.
    pub pronunciation: f64,
    /// Lexical variety.
    pub vocabulary: f64,
    /// Grammatical completeness from the configured scorer.
    pub grammar: f64,
}

impl MetricSet {
    /// Metric names paired with their values, in report order.
    pub const fn named(&self) -> [(&'static str, f64); 5] {
        [
            ("accuracy", self.accuracy),
            ("fluency", self.fluency),
            ("pronunciation", self.pronunciation),
            ("vocabulary", self.vocabulary),
            ("grammar", self.grammar),
        ]
    }
}

/// Clamp a score into `[0, 1]`, mapping NaN to 0.
pub(crate) fn unit(score: f64) -> f64 {
    if score.is_nan() {
        0.0
    } else {
        score.clamp(0.0, 1.0)
    }
}

/// Fraction of `expected` patterns occurring in `text`, ignoring case.
///
/// No patterns (absent or empty) scores 1.0. An empty pattern always counts
/// as found. Duplicate patterns count once per occurrence in `expected`.
pub fn accuracy(text: &str, expected: Option<&[String]>) -> f64 {
    let Some(expected) = expected.filter(|patterns| !patterns.is_empty()) else {
        return 1.0;
    };

    let haystack = text.to_lowercase();
    let lowered: Vec<String> = expected.iter().map(|p| p.to_lowercase()).collect();
    let unique: Vec<&str> = lowered
        .iter()
        .map(String::as_str)
        .filter(|p| !p.is_empty())
        .collect::<HashSet<_>>()
        .into_iter()
        .collect();

    let found: HashSet<&str> = match AhoCorasick::new(&unique) {
        Ok(automaton) => automaton
            .find_overlapping_iter(&haystack)
            .map(|m| unique[m.pattern().as_usize()])
            .collect(),
        Err(err) => {
            tracing::debug!(error = %err, "pattern automaton unavailable, scanning patterns one by one");
            unique
                .iter()
                .copied()
                .filter(|p| haystack.contains(p))
                .collect()
        }
    };

    let matches = lowered
        .iter()
        .filter(|p| p.is_empty() || found.contains(p.as_str()))
        .count();

    matches as f64 / expected.len() as f64
}

/// Fluency from average sentence length (punctuation tokens included) plus a
/// bonus for coordinating conjunctions. No sentences scores 0.0.
pub fn fluency(doc: &AnalyzedText) -> f64 {
    if doc.sentences.is_empty() {
        return 0.0;
    }

    let total: usize = doc.sentences.iter().map(|s| s.len()).sum();
    let average = total as f64 / doc.sentences.len() as f64;
    let length_variety =
        (1.0 - (average - IDEAL_SENTENCE_LENGTH).abs() / IDEAL_SENTENCE_LENGTH).clamp(0.0, 1.0);
    let bonus = if doc.has_dependency(Dependency::Cc) {
        CONJUNCTION_BONUS
    } else {
        0.0
    };

    unit((length_variety + bonus) / (1.0 + CONJUNCTION_BONUS))
}

/// Distinct lemmas of non-stopword tokens over [`VOCABULARY_TARGET`], capped
/// at 1.0.
///
/// Lemmas compare exactly, so `Pizza` and `pizza` are two entries.
/// Punctuation tokens count like any other non-stopword.
pub fn vocabulary(doc: &AnalyzedText) -> f64 {
    let lemmas: HashSet<&str> = doc
        .tokens
        .iter()
        .filter(|t| !t.is_stop)
        .map(|t| t.lemma.as_str())
        .collect();

    if lemmas.is_empty() {
        return 0.0;
    }
    (lemmas.len() as f64 / VOCABULARY_TARGET).min(1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::{PartOfSpeech, SentenceSpan, Token};

    fn patterns(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| (*s).to_string()).collect()
    }

    fn word(text: &str, is_stop: bool) -> Token {
        Token {
            text: text.to_string(),
            lemma: text.to_string(),
            pos: PartOfSpeech::Noun,
            dep: Dependency::Other,
            is_stop,
        }
    }

    fn single_sentence(tokens: Vec<Token>) -> AnalyzedText {
        let end = tokens.len();
        AnalyzedText {
            text: String::new(),
            tokens,
            sentences: vec![SentenceSpan { start: 0, end }],
        }
    }

    #[test]
    fn accuracy_without_patterns_is_perfect() {
        assert!((accuracy("anything", None) - 1.0).abs() < f64::EPSILON);
        assert!((accuracy("anything", Some(&[][..])) - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn accuracy_counts_case_insensitive_substrings() {
        let text = "Me gusta la pizza";
        let all = patterns(&["pizza", "gusta"]);
        assert!((accuracy(text, Some(all.as_slice())) - 1.0).abs() < f64::EPSILON);

        let half = patterns(&["pizza", "sushi"]);
        assert!((accuracy(text, Some(half.as_slice())) - 0.5).abs() < f64::EPSILON);

        let upper = patterns(&["PIZZA"]);
        assert!((accuracy(text, Some(upper.as_slice())) - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn accuracy_matches_inside_words_and_overlaps() {
        // "gust" is inside "gusta"; "ta la" overlaps "gusta la".
        let p = patterns(&["gust", "ta la", "gusta"]);
        assert!((accuracy("me gusta la pizza", Some(p.as_slice())) - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn accuracy_empty_pattern_always_found() {
        let p = patterns(&["", "sushi"]);
        assert!((accuracy("pizza", Some(p.as_slice())) - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn accuracy_duplicate_patterns_each_count() {
        let p = patterns(&["pizza", "pizza", "sushi"]);
        let score = accuracy("pizza", Some(p.as_slice()));
        assert!((score - 2.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn fluency_zero_without_sentences() {
        assert!(fluency(&AnalyzedText::empty("")).abs() < f64::EPSILON);
    }

    #[test]
    fn fluency_peaks_at_ideal_length() {
        let doc = single_sentence((0..15).map(|i| word(&format!("w{i}"), false)).collect());
        assert!((fluency(&doc) - 1.0 / 1.2).abs() < 1e-12);
    }

    #[test]
    fn fluency_conjunction_bonus_raises_score() {
        let plain = single_sentence(vec![word("a", false), word("b", false), word("c", false)]);
        let mut with_cc = plain.clone();
        with_cc.tokens[1].dep = Dependency::Cc;
        assert!(fluency(&with_cc) > fluency(&plain));
        // 3 tokens: variety 0.2; with bonus (0.2 + 0.2) / 1.2.
        assert!((fluency(&with_cc) - 0.4 / 1.2).abs() < 1e-12);
    }

    #[test]
    fn fluency_very_long_sentence_gets_no_variety() {
        let doc = single_sentence((0..40).map(|i| word(&format!("w{i}"), false)).collect());
        assert!(fluency(&doc).abs() < f64::EPSILON);
    }

    #[test]
    fn vocabulary_counts_distinct_lemmas_as_written() {
        let doc = single_sentence(vec![
            word("the", true),
            word("Pizza", false),
            word("pizza", false),
            word("cheese", false),
        ]);
        // Lemmas are compared as written: "Pizza" and "pizza" are distinct.
        assert!((vocabulary(&doc) - 0.3).abs() < 1e-12);
    }

    #[test]
    fn vocabulary_counts_punctuation() {
        let punct = |text: &str| Token {
            pos: PartOfSpeech::Punct,
            ..word(text, false)
        };

        let exclaim = single_sentence(vec![word("Pizza", false), punct("!")]);
        assert!((vocabulary(&exclaim) - 0.2).abs() < 1e-12);

        let only_marks = single_sentence(vec![punct("?!")]);
        assert!((vocabulary(&only_marks) - 0.1).abs() < 1e-12);
    }

    #[test]
    fn vocabulary_caps_at_one() {
        let tokens: Vec<Token> = (0..12).map(|i| word(&format!("w{i}"), false)).collect();
        assert!((vocabulary(&single_sentence(tokens)) - 1.0).abs() < f64::EPSILON);

        let only_stop = single_sentence(vec![word("the", true), word("a", true)]);
        assert!(vocabulary(&only_stop).abs() < f64::EPSILON);
    }

    #[test]
    fn unit_clamps_and_handles_nan() {
        assert!(unit(f64::NAN).abs() < f64::EPSILON);
        assert!((unit(1.7) - 1.0).abs() < f64::EPSILON);
        assert!(unit(-0.3).abs() < f64::EPSILON);
    }
}

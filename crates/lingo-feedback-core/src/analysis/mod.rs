//! Linguistic analysis of a learner response.
//!
//! An [`AnalyzedText`] is the shared representation every metric reads:
//! tokens carrying a lemma, a universal part-of-speech tag, a dependency
//! role and a stopword flag, plus the sentence partition over those tokens.
//!
//! Analyses come from a [`TextAnalyzer`]. The crate ships
//! [`RuleBasedAnalyzer`]; documents produced elsewhere (for example by an
//! external NLP pipeline) can be deserialized and checked with
//! [`AnalyzedText::validate`].

pub mod tagger;

use std::fmt;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

pub use tagger::RuleBasedAnalyzer;

use crate::error::{AnalysisError, AnalysisResult};
use crate::language::Language;

/// Universal part-of-speech tag.
///
/// Tags outside this set deserialize to [`PartOfSpeech::X`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "UPPERCASE")]
pub enum PartOfSpeech {
    /// Adjective.
    Adj,
    /// Adposition.
    Adp,
    /// Adverb.
    Adv,
    /// Auxiliary.
    Aux,
    /// Coordinating conjunction.
    Cconj,
    /// Determiner.
    Det,
    /// Interjection.
    Intj,
    /// Noun.
    Noun,
    /// Numeral.
    Num,
    /// Particle.
    Part,
    /// Pronoun.
    Pron,
    /// Proper noun.
    Propn,
    /// Punctuation.
    Punct,
    /// Subordinating conjunction.
    Sconj,
    /// Whitespace token, as emitted by spaCy for newlines and runs of spaces.
    Space,
    /// Symbol.
    Sym,
    /// Verb.
    Verb,
    /// Other.
    #[serde(other)]
    X,
}

/// Dependency role of a token within its sentence.
///
/// Only the roles the metrics read are distinguished; every other label an
/// external pipeline may produce deserializes to [`Dependency::Other`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub enum Dependency {
    /// Head of the sentence.
    #[serde(rename = "ROOT")]
    Root,
    /// Nominal subject.
    #[serde(rename = "nsubj")]
    Nsubj,
    /// Coordinating conjunction.
    #[serde(rename = "cc")]
    Cc,
    /// Any other relation.
    #[serde(rename = "dep", other)]
    Other,
}

impl fmt::Display for Dependency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Root => "ROOT",
            Self::Nsubj => "nsubj",
            Self::Cc => "cc",
            Self::Other => "dep",
        })
    }
}

/// One token of an analyzed response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Token {
    /// Surface form as written.
    pub text: String,
    /// Dictionary form.
    pub lemma: String,
    /// Part-of-speech tag.
    pub pos: PartOfSpeech,
    /// Dependency role.
    pub dep: Dependency,
    /// Whether the token is a stopword in the analysis language.
    pub is_stop: bool,
}

impl Token {
    /// Whether the token is punctuation.
    pub fn is_punct(&self) -> bool {
        self.pos == PartOfSpeech::Punct
    }
}

/// Half-open range of token indices making up one sentence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct SentenceSpan {
    /// Index of the first token.
    pub start: usize,
    /// One past the index of the last token.
    pub end: usize,
}

impl SentenceSpan {
    /// Number of tokens in the sentence.
    pub const fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    /// Whether the sentence has no tokens.
    pub const fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A response after tokenization, tagging and sentence segmentation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct AnalyzedText {
    /// The original response text.
    pub text: String,
    /// Tokens in reading order.
    pub tokens: Vec<Token>,
    /// Sentence partition over `tokens`.
    pub sentences: Vec<SentenceSpan>,
}

impl AnalyzedText {
    /// An analysis with no tokens and no sentences.
    pub fn empty(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            tokens: Vec::new(),
            sentences: Vec::new(),
        }
    }

    /// Check that every sentence span lies inside the token list and that
    /// spans are ascending and non-overlapping.
    pub fn validate(&self) -> AnalysisResult<()> {
        let mut previous_end = 0;
        for (index, span) in self.sentences.iter().enumerate() {
            if span.start > span.end {
                return Err(AnalysisError::MalformedAnalysis(format!(
                    "sentence {index} starts at token {} after it ends at {}",
                    span.start, span.end
                )));
            }
            if span.end > self.tokens.len() {
                return Err(AnalysisError::MalformedAnalysis(format!(
                    "sentence {index} ends at token {} but there are only {} tokens",
                    span.end,
                    self.tokens.len()
                )));
            }
            if span.start < previous_end {
                return Err(AnalysisError::MalformedAnalysis(format!(
                    "sentence {index} overlaps the previous sentence"
                )));
            }
            previous_end = span.end;
        }
        Ok(())
    }

    /// Tokens of each sentence, in order.
    ///
    /// Assumes a validated document; out-of-range spans yield no tokens.
    pub fn sentence_tokens(&self) -> impl Iterator<Item = &[Token]> {
        self.sentences
            .iter()
            .map(|span| self.tokens.get(span.start..span.end).unwrap_or_default())
    }

    /// Whether any token carries the dependency role `dep`.
    pub fn has_dependency(&self, dep: Dependency) -> bool {
        self.tokens.iter().any(|t| t.dep == dep)
    }

    /// Whether any token carries the part-of-speech tag `pos`.
    pub fn has_pos(&self, pos: PartOfSpeech) -> bool {
        self.tokens.iter().any(|t| t.pos == pos)
    }
}

/// Turns raw response text into an [`AnalyzedText`].
///
/// Implementations must be deterministic for a given `(text, language)`.
pub trait TextAnalyzer: fmt::Debug + Send + Sync {
    /// Analyze `text` using the model for `language`.
    fn analyze(&self, text: &str, language: Language) -> AnalysisResult<AnalyzedText>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn token(text: &str, pos: PartOfSpeech, dep: Dependency) -> Token {
        Token {
            text: text.to_string(),
            lemma: text.to_lowercase(),
            pos,
            dep,
            is_stop: false,
        }
    }

    fn doc(sentences: Vec<SentenceSpan>) -> AnalyzedText {
        AnalyzedText {
            text: "I run. Fast.".to_string(),
            tokens: vec![
                token("I", PartOfSpeech::Pron, Dependency::Nsubj),
                token("run", PartOfSpeech::Verb, Dependency::Root),
                token(".", PartOfSpeech::Punct, Dependency::Other),
                token("Fast", PartOfSpeech::Adv, Dependency::Root),
                token(".", PartOfSpeech::Punct, Dependency::Other),
            ],
            sentences,
        }
    }

    #[test]
    fn valid_spans_pass() {
        let text = doc(vec![
            SentenceSpan { start: 0, end: 3 },
            SentenceSpan { start: 3, end: 5 },
        ]);
        assert!(text.validate().is_ok());
        let lengths: Vec<usize> = text.sentence_tokens().map(<[Token]>::len).collect();
        assert_eq!(lengths, vec![3, 2]);
    }

    #[test]
    fn span_past_end_is_rejected() {
        let text = doc(vec![SentenceSpan { start: 0, end: 6 }]);
        assert!(matches!(
            text.validate(),
            Err(AnalysisError::MalformedAnalysis(_))
        ));
    }

    #[test]
    fn overlapping_spans_are_rejected() {
        let text = doc(vec![
            SentenceSpan { start: 0, end: 3 },
            SentenceSpan { start: 2, end: 5 },
        ]);
        assert!(text.validate().is_err());
    }

    #[test]
    fn inverted_span_is_rejected() {
        let text = doc(vec![SentenceSpan { start: 3, end: 1 }]);
        assert!(text.validate().is_err());
    }

    #[test]
    fn unknown_dependency_labels_become_other() {
        let json = r#"{"text":"x","lemma":"x","pos":"NOUN","dep":"dobj","is_stop":false}"#;
        let token: Token = serde_json::from_str(json).unwrap();
        assert_eq!(token.dep, Dependency::Other);
        assert_eq!(token.pos, PartOfSpeech::Noun);
    }

    #[test]
    fn whitespace_and_unknown_tags_deserialize() {
        let json = r#"{
            "text": "Hola\n\nadiós",
            "tokens": [
                {"text":"Hola","lemma":"hola","pos":"INTJ","dep":"ROOT","is_stop":false},
                {"text":"\n\n","lemma":"\n\n","pos":"SPACE","dep":"dep","is_stop":false},
                {"text":"adiós","lemma":"adiós","pos":"GREETING","dep":"ROOT","is_stop":false}
            ],
            "sentences": [{"start":0,"end":2},{"start":2,"end":3}]
        }"#;
        let doc: AnalyzedText = serde_json::from_str(json).unwrap();
        assert!(doc.validate().is_ok());
        assert_eq!(doc.tokens[1].pos, PartOfSpeech::Space);
        assert_eq!(doc.tokens[2].pos, PartOfSpeech::X);
    }

    #[test]
    fn labels_serialize_in_conventional_case() {
        let t = token("run", PartOfSpeech::Verb, Dependency::Root);
        let json = serde_json::to_string(&t).unwrap();
        assert!(json.contains(r#""pos":"VERB""#));
        assert!(json.contains(r#""dep":"ROOT""#));
        assert_eq!(Dependency::Nsubj.to_string(), "nsubj");
    }

    #[test]
    fn feature_queries() {
        let text = doc(vec![SentenceSpan { start: 0, end: 5 }]);
        assert!(text.has_dependency(Dependency::Nsubj));
        assert!(!text.has_dependency(Dependency::Cc));
        assert!(text.has_pos(PartOfSpeech::Verb));
        assert!(AnalyzedText::empty("").validate().is_ok());
    }
}

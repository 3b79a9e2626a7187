//! Lexicon-driven tokenizer, tagger and shallow dependency labeler.
//!
//! Tagging runs in three passes per sentence:
//!
//! 1. Lexicon lookup: closed classes, conjugated verb forms, small open-class
//!    lists.
//! 2. Heuristics for unknown words: capitalization (German nouns, proper
//!    nouns), per-language suffix rules, then a context rule that promotes an
//!    unknown word after a subject pronoun or a non-copular auxiliary to a
//!    verb.
//! 3. Dependency roles: `ROOT`, `nsubj` and `cc` are assigned; everything
//!    else is `dep`.

use std::sync::LazyLock;

use regex::Regex;

use super::{AnalyzedText, Dependency, PartOfSpeech, SentenceSpan, TextAnalyzer, Token};
use crate::error::AnalysisResult;
use crate::language::Language;
use crate::lexicon::Lexicon;
use crate::text;

/// Words with internal apostrophes or hyphens, or runs of punctuation.
static TOKEN_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\w+(?:['’-]\w+)*|[^\w\s]+").expect("valid regex")
});

/// Same as [`TOKEN_RE`], but French elided articles and pronouns split off.
static FRENCH_TOKEN_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i:[ljdmtsnc]|qu)['’]|\w+(?:['’-]\w+)*|[^\w\s]+").expect("valid regex")
});

/// The built-in analyzer for English, Spanish, French and German.
#[derive(Debug, Clone, Copy, Default)]
pub struct RuleBasedAnalyzer;

impl RuleBasedAnalyzer {
    /// Creates the analyzer.
    pub const fn new() -> Self {
        Self
    }
}

impl TextAnalyzer for RuleBasedAnalyzer {
    #[tracing::instrument(skip(self, text), fields(text_len = text.len(), language = %language))]
    fn analyze(&self, text: &str, language: Language) -> AnalysisResult<AnalyzedText> {
        let lexicon = Lexicon::for_language(language);
        let mut tokens = Vec::new();
        let mut sentences = Vec::new();

        for sentence in text::split_sentences(text) {
            let mut seen_word = false;
            let mut sentence_tokens: Vec<Token> = tokenize(&sentence, language)
                .into_iter()
                .map(|word| {
                    let token = tag_word(word, !seen_word, lexicon, language);
                    seen_word |= !is_punctuation(word);
                    token
                })
                .collect();
            if sentence_tokens.is_empty() {
                continue;
            }
            apply_context_rule(&mut sentence_tokens, lexicon);
            assign_dependencies(&mut sentence_tokens, lexicon);

            let start = tokens.len();
            tokens.extend(sentence_tokens);
            sentences.push(SentenceSpan {
                start,
                end: tokens.len(),
            });
        }

        tracing::debug!(
            tokens = tokens.len(),
            sentences = sentences.len(),
            "response analyzed"
        );

        Ok(AnalyzedText {
            text: text.to_string(),
            tokens,
            sentences,
        })
    }
}

/// Split one sentence into word and punctuation tokens.
pub fn tokenize(sentence: &str, language: Language) -> Vec<&str> {
    let re = match language {
        Language::Fr => &*FRENCH_TOKEN_RE,
        _ => &*TOKEN_RE,
    };
    re.find_iter(sentence).map(|m| m.as_str()).collect()
}

/// Lowercase form with typographic apostrophes folded to ASCII.
fn normalize(word: &str) -> String {
    word.to_lowercase().replace('’', "'")
}

fn is_punctuation(word: &str) -> bool {
    !word.chars().any(char::is_alphanumeric)
}

fn is_number(word: &str) -> bool {
    word.chars().any(|c| c.is_ascii_digit())
        && word.chars().all(|c| c.is_ascii_digit() || c == '.' || c == ',')
}

fn starts_uppercase(word: &str) -> bool {
    word.chars().next().is_some_and(char::is_uppercase)
}

/// Tag one word. Words no rule recognizes carry `X` until the context pass.
fn tag_word(word: &str, sentence_initial: bool, lexicon: &Lexicon, language: Language) -> Token {
    let lower = normalize(word);
    let (pos, lemma) = classify(word, &lower, sentence_initial, lexicon, language);
    Token {
        text: word.to_string(),
        lemma,
        pos,
        dep: Dependency::Other,
        is_stop: pos != PartOfSpeech::Punct && lexicon.is_stopword(&lower),
    }
}

fn classify(
    word: &str,
    lower: &str,
    sentence_initial: bool,
    lexicon: &Lexicon,
    language: Language,
) -> (PartOfSpeech, String) {
    use PartOfSpeech as P;

    if is_punctuation(word) {
        return (P::Punct, word.to_string());
    }
    if is_number(word) {
        return (P::Num, lower.to_string());
    }

    let closed = [
        (&lexicon.coordinating_conjunctions, P::Cconj),
        (&lexicon.determiners, P::Det),
        (&lexicon.subject_pronouns, P::Pron),
        (&lexicon.other_pronouns, P::Pron),
        (&lexicon.auxiliaries, P::Aux),
        (&lexicon.adpositions, P::Adp),
        (&lexicon.subordinating_conjunctions, P::Sconj),
    ];
    if let Some((_, pos)) = closed.iter().find(|(set, _)| set.contains(lower)) {
        return (*pos, lower.to_string());
    }
    if let Some(lemma) = lexicon.verb_lemma(lower) {
        return (P::Verb, lemma.to_string());
    }

    let open = [
        (&lexicon.adverbs, P::Adv),
        (&lexicon.adjectives, P::Adj),
        (&lexicon.interjections, P::Intj),
    ];
    if let Some((_, pos)) = open.iter().find(|(set, _)| set.contains(lower)) {
        return (*pos, lower.to_string());
    }

    if starts_uppercase(word) {
        if language == Language::De {
            return (P::Noun, lower.to_string());
        }
        if !sentence_initial {
            return (P::Propn, lower.to_string());
        }
    }

    if !lexicon.suffix_exceptions.contains(lower) {
        if let Some((pos, lemma)) = suffix_rule(lower, language) {
            return (pos, lemma);
        }
    }

    (P::X, lower.to_string())
}

/// Per-language ending heuristics for words no list covers.
fn suffix_rule(lower: &str, language: Language) -> Option<(PartOfSpeech, String)> {
    use PartOfSpeech as P;

    let chars = lower.chars().count();
    let strip = |suffix: &str| lower[..lower.len() - suffix.len()].to_string();

    match language {
        Language::En => {
            if chars > 5 && lower.ends_with("ing") {
                Some((P::Verb, strip("ing")))
            } else if chars > 4 && lower.ends_with("ed") {
                Some((P::Verb, strip("ed")))
            } else if chars > 4 && lower.ends_with("ly") {
                Some((P::Adv, lower.to_string()))
            } else if ["ous", "ful", "ive", "able"].iter().any(|s| lower.ends_with(s)) {
                Some((P::Adj, lower.to_string()))
            } else {
                None
            }
        }
        Language::Es => {
            if chars > 5 && lower.ends_with("ando") {
                Some((P::Verb, format!("{}ar", strip("ando"))))
            } else if chars > 6 && lower.ends_with("iendo") {
                Some((P::Verb, format!("{}er", strip("iendo"))))
            } else if chars > 6 && lower.ends_with("mente") {
                Some((P::Adv, lower.to_string()))
            } else if chars >= 4 && ["ar", "er", "ir"].iter().any(|s| lower.ends_with(s)) {
                Some((P::Verb, lower.to_string()))
            } else {
                None
            }
        }
        Language::Fr => {
            if chars >= 4 && ["er", "ir"].iter().any(|s| lower.ends_with(s)) {
                Some((P::Verb, lower.to_string()))
            } else {
                None
            }
        }
        Language::De => {
            if chars >= 5 && lower.ends_with("en") {
                Some((P::Verb, lower.to_string()))
            } else if ["ig", "lich", "isch"].iter().any(|s| lower.ends_with(s)) {
                Some((P::Adj, lower.to_string()))
            } else {
                None
            }
        }
    }
}

/// Resolve words no rule recognized: after a subject pronoun or a
/// non-copular auxiliary they are verbs, otherwise nouns.
fn apply_context_rule(tokens: &mut [Token], lexicon: &Lexicon) {
    for i in 0..tokens.len() {
        if tokens[i].pos != PartOfSpeech::X {
            continue;
        }
        let promotes = i > 0 && {
            let previous = normalize(&tokens[i - 1].text);
            !lexicon.copulas.contains(previous.as_str())
                && (lexicon.subject_pronouns.contains(previous.as_str())
                    || lexicon.auxiliaries.contains(previous.as_str()))
        };
        tokens[i].pos = if promotes {
            PartOfSpeech::Verb
        } else {
            PartOfSpeech::Noun
        };
    }
}

/// Label `ROOT`, `nsubj` and `cc` within one sentence.
fn assign_dependencies(tokens: &mut [Token], lexicon: &Lexicon) {
    let first = |pos: PartOfSpeech| tokens.iter().position(|t| t.pos == pos);
    let root = first(PartOfSpeech::Verb)
        .or_else(|| first(PartOfSpeech::Aux))
        .or_else(|| tokens.iter().position(|t| !t.is_punct()));

    for token in tokens.iter_mut() {
        if token.pos == PartOfSpeech::Cconj {
            token.dep = Dependency::Cc;
        }
    }

    let Some(root) = root else {
        return;
    };
    tokens[root].dep = Dependency::Root;

    if !matches!(tokens[root].pos, PartOfSpeech::Verb | PartOfSpeech::Aux) {
        return;
    }

    let can_be_subject = |token: &Token| match token.pos {
        PartOfSpeech::Noun | PartOfSpeech::Propn => true,
        PartOfSpeech::Pron => lexicon
            .subject_pronouns
            .contains(normalize(&token.text).as_str()),
        _ => false,
    };

    let preverbal = (0..root).rev().find(|&i| can_be_subject(&tokens[i]));
    let subject = preverbal.or_else(|| {
        (root + 1..tokens.len()).find(|&i| {
            matches!(tokens[i].pos, PartOfSpeech::Noun | PartOfSpeech::Propn)
        })
    });
    if let Some(subject) = subject {
        tokens[subject].dep = Dependency::Nsubj;
    }
}

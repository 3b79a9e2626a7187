//! Language codes and per-language model selection.
//!
//! Selection is a lookup table with an explicit default entry. Codes that
//! have no configured model resolve to [`DEFAULT_LANGUAGE`] instead of
//! failing; the returned [`ModelSelection`] records that a fallback
//! happened so callers can surface it.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A language with a configured analysis model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    /// English.
    En,
    /// Spanish.
    Es,
    /// French.
    Fr,
    /// German.
    De,
}

/// Language used when a requested code has no configured model.
pub const DEFAULT_LANGUAGE: Language = Language::En;

/// Language code to analysis model name, in display order.
///
/// Model names follow the spaCy small-model naming, so an external provider
/// can load the same model the built-in analyzer stands in for.
pub const LANGUAGE_MODELS: &[(Language, &str)] = &[
    (Language::En, "en_core_web_sm"),
    (Language::Es, "es_core_news_sm"),
    (Language::Fr, "fr_core_news_sm"),
    (Language::De, "de_core_news_sm"),
];

impl Language {
    /// Strict lookup: returns `None` for codes without a configured model.
    ///
    /// Matching ignores ASCII case and surrounding whitespace but does not
    /// strip region subtags (`en-US` is not `en`).
    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim().to_ascii_lowercase().as_str() {
            "en" => Some(Self::En),
            "es" => Some(Self::Es),
            "fr" => Some(Self::Fr),
            "de" => Some(Self::De),
            _ => None,
        }
    }

    /// Returns the two-letter language code.
    pub const fn code(&self) -> &'static str {
        match self {
            Self::En => "en",
            Self::Es => "es",
            Self::Fr => "fr",
            Self::De => "de",
        }
    }

    /// Returns the English name of the language.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::En => "English",
            Self::Es => "Spanish",
            Self::Fr => "French",
            Self::De => "German",
        }
    }

    /// Returns the analysis model name configured for this language.
    pub fn model_name(&self) -> &'static str {
        LANGUAGE_MODELS
            .iter()
            .find(|(lang, _)| lang == self)
            .map_or("en_core_web_sm", |(_, model)| model)
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

/// Outcome of resolving a requested language code to a model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ModelSelection {
    /// The code the caller asked for, verbatim.
    pub requested: String,
    /// The language whose model was selected.
    pub language: Language,
    /// Name of the selected analysis model.
    pub model: String,
    /// Whether the requested code was unsupported and the default was used.
    pub fallback: bool,
}

/// Resolve a language code to its analysis model, falling back to
/// [`DEFAULT_LANGUAGE`] for unsupported codes.
#[tracing::instrument]
pub fn select_model(code: &str) -> ModelSelection {
    let (language, fallback) = match Language::from_code(code) {
        Some(language) => (language, false),
        None => {
            tracing::warn!(
                requested = code,
                fallback = DEFAULT_LANGUAGE.code(),
                "no analysis model for language, using default"
            );
            (DEFAULT_LANGUAGE, true)
        }
    };

    ModelSelection {
        requested: code.to_string(),
        language,
        model: language.model_name().to_string(),
        fallback,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn supported_codes_resolve() {
        for (code, expected) in [
            ("en", Language::En),
            ("es", Language::Es),
            ("fr", Language::Fr),
            ("de", Language::De),
        ] {
            let selection = select_model(code);
            assert_eq!(selection.language, expected, "failed for {code}");
            assert!(!selection.fallback);
        }
    }

    #[test]
    fn model_names_match_table() {
        assert_eq!(select_model("es").model, "es_core_news_sm");
        assert_eq!(select_model("de").model, "de_core_news_sm");
        assert_eq!(Language::En.model_name(), "en_core_web_sm");
    }

    #[test]
    fn unsupported_code_falls_back_to_english() {
        let selection = select_model("ja");
        assert_eq!(selection.language, Language::En);
        assert_eq!(selection.model, "en_core_web_sm");
        assert_eq!(selection.requested, "ja");
        assert!(selection.fallback);
    }

    #[test]
    fn full_language_names_are_not_codes() {
        // "spanish" is not a code; it falls back like any other unknown value.
        assert!(select_model("spanish").fallback);
    }

    #[test]
    fn from_code_ignores_case_and_whitespace() {
        assert_eq!(Language::from_code(" ES "), Some(Language::Es));
        assert_eq!(Language::from_code("en-US"), None);
        assert_eq!(Language::from_code(""), None);
    }

    #[test]
    fn every_language_has_a_model() {
        for lang in [Language::En, Language::Es, Language::Fr, Language::De] {
            assert!(LANGUAGE_MODELS.iter().any(|(l, _)| *l == lang));
        }
    }
}

//! Dictionaries for the built-in analyzer.
//!
//! Provides curated word sets used by sentence splitting and lemmatization.

pub mod abbreviations;
pub mod irregular_verbs;

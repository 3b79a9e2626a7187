//! Abbreviation dictionary for sentence boundary detection.
//!
//! Covers English, Spanish, French, and German abbreviations that should not
//! trigger sentence breaks when followed by a period.

use std::collections::HashSet;
use std::sync::LazyLock;

/// Abbreviations that should not trigger sentence breaks, all languages merged.
pub static ABBREVIATIONS: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    let mut set = HashSet::new();

    // English titles and honorifics
    set.extend([
        "mr", "mrs", "ms", "dr", "prof", "rev", "jr", "st", "capt", "col", "gen", "lt", "sgt",
        "hon",
    ]);

    // English common abbreviations
    set.extend([
        "etc", "vs", "e.g", "i.e", "cf", "approx", "dept", "inc", "corp", "ltd", "vol",
        "a.m", "p.m", "u.s", "u.k",
    ]);

    // Months and weekdays (English), minus ones that are also words ("sat", "mar")
    set.extend([
        "jan", "feb", "apr", "aug", "sep", "sept", "oct", "nov", "dec", "tue", "thu", "fri",
    ]);

    // Spanish
    set.extend([
        "sr", "sra", "srta", "sres", "dra", "lic", "ing", "ud", "uds", "vd", "vds", "pág",
        "núm", "tel", "avda", "c/", "aprox", "p.ej", "ej",
    ]);

    // French
    set.extend([
        "mme", "mlle", "mmes", "pr", "av", "bd", "env", "p.ex", "éd",
        "tél",
    ]);

    // German
    set.extend([
        "hr", "fr", "z.b", "d.h", "u.a", "usw", "bzw", "ca", "nr", "str", "geb", "evtl",
        "ggf", "vgl", "s.o", "s.u",
    ]);

    set
});

/// Check if a word is a known abbreviation.
pub fn is_abbreviation(word: &str) -> bool {
    let word_lower = word.to_lowercase();
    let trimmed = word_lower.trim_matches('.');
    ABBREVIATIONS.contains(trimmed)
}

//! Sentence segmentation.
//!
//! Splits learner responses into sentences for the built-in analyzer. A
//! period only ends a sentence when it is not part of an abbreviation,
//! initials, a number, a URL or an email address. The Spanish inverted marks
//! (`¿`, `¡`) open a new sentence.

use crate::dictionaries::abbreviations::is_abbreviation;

/// Split `text` into trimmed, non-empty sentences.
///
/// Every non-whitespace character lands in exactly one sentence, so short
/// replies like "Sí." survive as their own sentence.
#[tracing::instrument(skip_all, fields(text_len = text.len()))]
pub fn split_sentences(text: &str) -> Vec<String> {
    let mut sentences = Vec::new();
    let mut start = 0;

    for (idx, ch) in text.char_indices() {
        if !is_terminator(ch) {
            continue;
        }
        let end = idx + ch.len_utf8();
        if ends_sentence(&text[start..end], &text[end..]) {
            push_trimmed(&mut sentences, &text[start..end]);
            start = end;
        }
    }
    push_trimmed(&mut sentences, &text[start..]);

    sentences
}

fn push_trimmed(sentences: &mut Vec<String>, piece: &str) {
    let piece = piece.trim();
    if !piece.is_empty() {
        sentences.push(piece.to_string());
    }
}

const fn is_terminator(ch: char) -> bool {
    matches!(ch, '.' | '!' | '?')
}

/// Whether the terminator closing `head` ends the sentence, given the text
/// that follows it.
fn ends_sentence(head: &str, rest: &str) -> bool {
    let Some(next) = rest.trim_start().chars().next() else {
        return true;
    };

    // Wait for the last mark of a run like "?!" or "...".
    if rest.starts_with(is_terminator) {
        return false;
    }
    if head.ends_with("...") {
        return false;
    }

    // Glued to what follows: "3.14", "www.example.com", "ana@mail.es", "e.g".
    if rest.starts_with(char::is_alphanumeric) {
        return false;
    }

    if !head.ends_with('.') {
        // "?" and "!" end the sentence unless the text runs on in lowercase.
        return !next.is_lowercase();
    }

    let word = word_before_period(head);
    if is_abbreviation(word) || is_initials(word) {
        return false;
    }

    // Uppercase, "¿", "¡", digits and quotes all start something new.
    !next.is_lowercase()
}

/// The word a trailing period is attached to, without the period.
fn word_before_period(head: &str) -> &str {
    let body = head.trim_end_matches('.');
    body.rsplit(|c: char| !(c.is_alphanumeric() || c == '.'))
        .next()
        .unwrap_or_default()
}

/// `J`, `J.K`, `U.S.A`: single uppercase letters joined by periods.
fn is_initials(word: &str) -> bool {
    !word.is_empty()
        && word.split('.').all(|part| {
            let mut chars = part.chars();
            matches!((chars.next(), chars.next()), (Some(c), None) if c.is_uppercase())
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_plain_sentences() {
        let sentences = split_sentences("I like pizza. My sister likes pasta.");
        assert_eq!(sentences, vec!["I like pizza.", "My sister likes pasta."]);
    }

    #[test]
    fn abbreviations_do_not_split() {
        let sentences = split_sentences("Dr. Smith went to the store. He bought milk.");
        assert_eq!(sentences.len(), 2);
        assert!(sentences[0].contains("Dr. Smith"));

        let sentences = split_sentences("La Sra. García vive aquí. Ella es profesora.");
        assert_eq!(sentences.len(), 2);
        assert!(sentences[0].contains("Sra. García"));

        let sentences = split_sentences("Ich mag Obst, z.B. Äpfel. Du auch?");
        assert_eq!(sentences.len(), 2);
    }

    #[test]
    fn initials_do_not_split() {
        let sentences = split_sentences("I read J.K. Rowling. It was fun.");
        assert_eq!(sentences, vec!["I read J.K. Rowling.", "It was fun."]);
    }

    #[test]
    fn numbers_urls_and_emails_do_not_split() {
        let sentences = split_sentences("The price is 3.14 dollars. That's cheap.");
        assert_eq!(sentences.len(), 2);
        assert!(sentences[0].contains("3.14"));

        let sentences = split_sentences("Write to ana@mail.es or see www.example.com today.");
        assert_eq!(sentences.len(), 1);
    }

    #[test]
    fn questions_and_exclamations() {
        let sentences = split_sentences("Are you serious? I can't believe it! This is amazing.");
        assert_eq!(sentences.len(), 3);
    }

    #[test]
    fn punctuation_runs_stay_together() {
        let sentences = split_sentences("Really?! Yes. Well... maybe not.");
        assert_eq!(sentences, vec!["Really?!", "Yes.", "Well... maybe not."]);
    }

    #[test]
    fn inverted_marks_open_new_sentences() {
        let sentences = split_sentences("Hola. ¿Cómo estás? ¡Muy bien!");
        assert_eq!(sentences, vec!["Hola.", "¿Cómo estás?", "¡Muy bien!"]);
    }

    #[test]
    fn lowercase_after_period_continues() {
        let sentences = split_sentences("I like pizza. and pasta too.");
        assert_eq!(sentences.len(), 1);
    }

    #[test]
    fn short_replies_are_kept() {
        assert_eq!(split_sentences("Sí."), vec!["Sí."]);
        assert_eq!(split_sentences("ok"), vec!["ok"]);
    }

    #[test]
    fn empty_input() {
        assert!(split_sentences("").is_empty());
        assert!(split_sentences("   ").is_empty());
    }
}

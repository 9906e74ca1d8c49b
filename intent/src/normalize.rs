use once_cell::sync::Lazy;
use regex::Regex;

/// Everything that is not a letter, combining mark, digit or whitespace, in
/// any script.
static PUNCTUATION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^\p{L}\p{M}\p{N}\s]").expect("punctuation pattern is valid"));

/// Canonical form used for both recognized text and catalog tokens.
///
/// Lowercases, drops apostrophes (so "don't" becomes "dont"), replaces
/// punctuation with spaces and collapses runs of whitespace.
///
/// ```
/// use aegis_intent::normalize;
///
/// assert_eq!(normalize("I'm scared, please don't hurt me!"), "im scared please dont hurt me");
/// assert_eq!(normalize("  बचाओ!!  "), "बचाओ");
/// ```
pub fn normalize(text: &str) -> String {
    let lowered: String = text
        .to_lowercase()
        .chars()
        .filter(|c| !matches!(c, '\'' | '\u{2019}' | '\u{2018}'))
        .collect();
    let spaced = PUNCTUATION.replace_all(&lowered, " ");
    spaced.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Splits normalized text into words.
pub fn tokenize(normalized: &str) -> Vec<&str> {
    normalized.split_whitespace().collect()
}

/// Number of times `phrase` occurs as a run of consecutive words.
pub(crate) fn count_phrase(words: &[&str], phrase: &str) -> usize {
    let needle = tokenize(phrase);
    if needle.is_empty() || needle.len() > words.len() {
        return 0;
    }
    words.windows(needle.len()).filter(|w| *w == needle.as_slice()).count()
}

/// True when `phrase` occurs as a run of consecutive words.
pub(crate) fn contains_phrase(words: &[&str], phrase: &str) -> bool {
    count_phrase(words, phrase) > 0
}

/// True when `negation` equals a word or starts one, so "film" matches
/// "filming". Multi-word negations match consecutive words, the last one by
/// prefix.
pub(crate) fn contains_negation(words: &[&str], negation: &str) -> bool {
    let needle = tokenize(negation);
    let Some((last, lead)) = needle.split_last() else {
        return false;
    };
    if needle.len() > words.len() {
        return false;
    }
    words.windows(needle.len()).any(|w| {
        matches!(w.split_last(), Some((w_last, w_lead)) if w_lead == lead && w_last.starts_with(*last))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_punctuation_and_apostrophes() {
        assert_eq!(normalize("Don’t   TOUCH me!!!"), "dont touch me");
        assert_eq!(normalize("call 911, now."), "call 911 now");
        assert_eq!(normalize("...?!"), "");
    }

    #[test]
    fn keeps_non_latin_scripts() {
        // Devanagari vowel signs are combining marks and must survive.
        assert_eq!(normalize("मुझे छोड़ो!"), "मुझे छोड़ो");
        assert_eq!(normalize("¡Ayúdame, por favor!"), "ayúdame por favor");
    }

    #[test]
    fn phrase_counting_uses_word_boundaries() {
        let text = normalize("help me, help me please");
        let words = tokenize(&text);
        assert_eq!(count_phrase(&words, "help me"), 2);
        assert_eq!(count_phrase(&words, "me please"), 1);
        assert_eq!(count_phrase(&words, "elp"), 0);
        assert!(!contains_phrase(&words, "please help me now too long"));
        assert!(!contains_phrase(&words, ""));
    }

    #[test]
    fn negations_match_at_word_start() {
        let text = normalize("we were filming a heartless scene, just kidding");
        let words = tokenize(&text);
        assert!(contains_negation(&words, "film"));
        assert!(contains_negation(&words, "heartless"));
        assert!(contains_negation(&words, "just kid"));
        assert!(contains_negation(&words, "kidding"));
        // Inside a word is not a match.
        assert!(!contains_negation(&words, "less"));
        assert!(!contains_negation(&words, "ming"));
        assert!(!contains_negation(&words, "were film a"));
        assert!(!contains_negation(&words, ""));

        let text = normalize("it happened near the app store");
        let words = tokenize(&text);
        assert!(contains_negation(&words, "app"));
        assert!(!contains_negation(&tokenize("it happened"), "app"));
    }
}

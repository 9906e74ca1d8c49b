//! Fuzzy token matching tolerant of speech recognition slips.

/// Similarity cut-offs for [`token_similarity`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimilarityThresholds {
    /// Containment counts only when `shorter / longer` exceeds this.
    pub containment_ratio: f32,
    /// Edit-distance similarity counts only when it exceeds this.
    pub edit_similarity: f32,
}

impl Default for SimilarityThresholds {
    fn default() -> Self {
        Self {
            containment_ratio: 0.7,
            edit_similarity: 0.8,
        }
    }
}

/// Levenshtein distance over Unicode scalar values.
pub fn edit_distance(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    if a.is_empty() {
        return b.len();
    }
    if b.is_empty() {
        return a.len();
    }

    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut cur = vec![0; b.len() + 1];
    for (i, ca) in a.iter().enumerate() {
        cur[0] = i + 1;
        for (j, cb) in b.iter().enumerate() {
            let cost = usize::from(ca != cb);
            cur[j + 1] = (prev[j] + cost).min(prev[j + 1] + 1).min(cur[j] + 1);
        }
        std::mem::swap(&mut prev, &mut cur);
    }
    prev[b.len()]
}

/// Similarity of a catalog token and a piece of recognized text, in `[0, 1]`.
///
/// 1.0 when equal. Otherwise the length ratio when one contains the other
/// and the ratio is high enough, else the normalized edit-distance
/// similarity when it is high enough, else 0.
pub fn token_similarity(token: &str, text: &str, th: SimilarityThresholds) -> f32 {
    if token == text {
        return 1.0;
    }
    let lt = token.chars().count();
    let lx = text.chars().count();
    if lt == 0 || lx == 0 {
        return 0.0;
    }
    let longest = lt.max(lx) as f32;

    if token.contains(text) || text.contains(token) {
        let ratio = lt.min(lx) as f32 / longest;
        if ratio > th.containment_ratio {
            return ratio;
        }
    }

    let sim = 1.0 - edit_distance(token, text) as f32 / longest;
    if sim > th.edit_similarity { sim } else { 0.0 }
}

/// Best similarity of `token` against the words of the text.
///
/// A multi-word token is compared against every window of the same number
/// of consecutive words.
pub fn best_similarity(token: &str, words: &[&str], th: SimilarityThresholds) -> f32 {
    let n = token.split_whitespace().count();
    if n == 0 || words.is_empty() {
        return 0.0;
    }
    if n == 1 {
        return words
            .iter()
            .map(|w| token_similarity(token, w, th))
            .fold(0.0, f32::max);
    }
    if words.len() < n {
        return token_similarity(token, &words.join(" "), th);
    }
    let mut best = 0.0f32;
    for window in words.windows(n) {
        best = best.max(token_similarity(token, &window.join(" "), th));
        if best >= 1.0 {
            break;
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn edit_distance_basics() {
        assert_eq!(edit_distance("", "abc"), 3);
        assert_eq!(edit_distance("kitten", "sitting"), 3);
        assert_eq!(edit_distance("बचाओ", "बचाव"), 1);
    }

    #[test]
    fn exact_and_containment() {
        let th = SimilarityThresholds::default();
        assert_eq!(token_similarity("attack", "attack", th), 1.0);
        // "attack" in "attacked": 6/8 = 0.75 > 0.7.
        assert!((token_similarity("attack", "attacked", th) - 0.75).abs() < 1e-6);
        // "hit" in "white": 3/5 is too short a share and too many edits.
        assert_eq!(token_similarity("hit", "white", th), 0.0);
    }

    #[test]
    fn recognition_slips_match() {
        let th = SimilarityThresholds::default();
        // One substitution in ten characters: 0.9.
        let sim = token_similarity("kidnapping", "kidnappinq", th);
        assert!((sim - 0.9).abs() < 1e-6, "sim = {sim}");
        assert_eq!(token_similarity("fire", "five", th), 0.0);
    }

    #[test]
    fn multi_word_tokens_use_windows() {
        let th = SimilarityThresholds::default();
        let words = ["he", "had", "a", "heart", "attack"];
        assert_eq!(best_similarity("heart attack", &words, th), 1.0);
        assert_eq!(best_similarity("cant breathe", &words, th), 0.0);
        assert_eq!(best_similarity("cant breathe now", &["heart", "attack"], th), 0.0);
        assert_eq!(best_similarity("", &words, th), 0.0);
    }
}

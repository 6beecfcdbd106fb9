//! Edit-distance similarity between a query and topic labels.
//!
//! Character-level Levenshtein distance normalized into a 0.0 - 1.0 score.
//! Comparison is case-insensitive; whitespace, punctuation and diacritics
//! (including Thai tone marks) are compared literally.

/// Scores how close two strings are, 1.0 meaning identical.
///
/// The resolver only depends on this trait so tests can swap in an
/// instrumented scorer.
pub trait Scorer: Send + Sync {
    fn score(&self, a: &str, b: &str) -> f64;
}

/// Default scorer backed by [`similarity`].
#[derive(Debug, Clone, Copy, Default)]
pub struct EditDistanceScorer;

impl Scorer for EditDistanceScorer {
    fn score(&self, a: &str, b: &str) -> f64 {
        similarity(a, b)
    }
}

/// Levenshtein distance between two strings, counted in `char`s.
///
/// Insertion, deletion and substitution all cost 1; transpositions are not
/// special-cased.
pub fn levenshtein(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    edit_distance(&a, &b)
}

/// Normalized similarity in `[0.0, 1.0]` after case-folding both sides.
///
/// `(max_len - distance) / max_len`. Two empty strings are identical and
/// score 1.0, which keeps the function total.
pub fn similarity(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.to_lowercase().chars().collect();
    let b: Vec<char> = b.to_lowercase().chars().collect();

    let longest = a.len().max(b.len());
    if longest == 0 {
        return 1.0;
    }

    let distance = edit_distance(&a, &b);
    (longest - distance) as f64 / longest as f64
}

/// Two-row dynamic programming table, sized by the shorter input.
fn edit_distance(a: &[char], b: &[char]) -> usize {
    let (long, short) = if a.len() >= b.len() { (a, b) } else { (b, a) };

    let mut prev: Vec<usize> = (0..=short.len()).collect();
    let mut curr = vec![0; short.len() + 1];

    for (i, lc) in long.iter().enumerate() {
        curr[0] = i + 1;
        for (j, sc) in short.iter().enumerate() {
            let cost = usize::from(lc != sc);
            curr[j + 1] = (prev[j + 1] + 1) // deletion
                .min(curr[j] + 1) // insertion
                .min(prev[j] + cost); // substitution
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[short.len()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_levenshtein() {
        assert_eq!(levenshtein("hello", "hello"), 0);
        assert_eq!(levenshtein("hello", "helo"), 1);
        assert_eq!(levenshtein("kitten", "sitting"), 3);
        assert_eq!(levenshtein("", "abc"), 3);
        assert_eq!(levenshtein("abc", ""), 3);
        assert_eq!(levenshtein("", ""), 0);
    }

    #[test]
    fn test_levenshtein_has_no_transposition() {
        // A swap costs two substitutions.
        assert_eq!(levenshtein("ab", "ba"), 2);
    }

    #[test]
    fn test_levenshtein_counts_chars_not_bytes() {
        // Each Thai character is three bytes in UTF-8.
        assert_eq!(levenshtein("แบต", "แบ"), 1);
    }

    #[test]
    fn test_similarity_boundaries() {
        assert_eq!(similarity("", ""), 1.0);
        assert_eq!(similarity("", "abc"), 0.0);
        assert_eq!(similarity("abc", ""), 0.0);
        assert_eq!(similarity("abc", "xyz"), 0.0);
    }

    #[test]
    fn test_similarity_is_case_insensitive() {
        assert_eq!(similarity("ABC", "abc"), 1.0);
        assert_eq!(similarity("Battery", "bATTERY"), 1.0);
    }

    #[test]
    fn test_similarity_keeps_whitespace_and_punctuation() {
        assert!(similarity("battery", "battery ") < 1.0);
        assert!(similarity("battery", "battery?") < 1.0);
    }

    #[test]
    fn test_similarity_value() {
        // One deletion over seven characters.
        let score = similarity("battery", "batery");
        assert!((score - 6.0 / 7.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_scorer_delegates_to_similarity() {
        let scorer = EditDistanceScorer;
        assert_eq!(scorer.score("abc", "abd"), similarity("abc", "abd"));
    }
}

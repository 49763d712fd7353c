//! String similarity scoring.

use std::collections::BTreeSet;

use crate::text::normalize;

/// Scores how similar two strings are, from 0 (unrelated) to 100 (same).
pub trait SimilarityScorer: Send + Sync {
    /// Score `query` against `target`.
    fn score(&self, query: &str, target: &str) -> u8;
}

/// Indel similarity of two strings: `2 * LCS / (len_a + len_b)`, as 0..=100.
///
/// Two empty strings are identical (100).
pub fn ratio(a: &str, b: &str) -> u8 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let total = a.len() + b.len();
    if total == 0 {
        return 100;
    }

    let lcs = lcs_len(&a, &b);
    let pct = (200 * lcs) as f64 / total as f64;
    pct.round() as u8
}

/// Length of the longest common subsequence.
fn lcs_len(a: &[char], b: &[char]) -> usize {
    let mut prev = vec![0usize; b.len() + 1];
    let mut curr = vec![0usize; b.len() + 1];

    for &ca in a {
        for (j, &cb) in b.iter().enumerate() {
            curr[j + 1] = if ca == cb {
                prev[j] + 1
            } else {
                curr[j].max(prev[j + 1])
            };
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b.len()]
}

/// Order-independent token-set comparison.
///
/// Both strings are normalized and split into word sets. The shared words
/// are compared against each side's full word list; the best of those
/// comparisons is the score. When one word set contains the other the score
/// is 100, so "Connaught Place" scores 100 against "toilet connaught place".
#[derive(Debug, Clone, Copy, Default)]
pub struct TokenSetRatio;

impl SimilarityScorer for TokenSetRatio {
    fn score(&self, query: &str, target: &str) -> u8 {
        let query = normalize(query);
        let target = normalize(target);
        let a: BTreeSet<&str> = query.split(' ').filter(|w| !w.is_empty()).collect();
        let b: BTreeSet<&str> = target.split(' ').filter(|w| !w.is_empty()).collect();

        if a.is_empty() || b.is_empty() {
            return 0;
        }

        let shared: Vec<&str> = a.intersection(&b).copied().collect();
        let only_a: Vec<&str> = a.difference(&b).copied().collect();
        let only_b: Vec<&str> = b.difference(&a).copied().collect();

        if !shared.is_empty() && (only_a.is_empty() || only_b.is_empty()) {
            return 100;
        }

        let shared_text = shared.join(" ");
        let with_a = join_nonempty(&shared_text, &only_a.join(" "));
        let with_b = join_nonempty(&shared_text, &only_b.join(" "));

        let mut best = ratio(&with_a, &with_b);
        if !shared_text.is_empty() {
            best = best
                .max(ratio(&shared_text, &with_a))
                .max(ratio(&shared_text, &with_b));
        }
        best
    }
}

/// Plain similarity of the two normalized strings, word order included.
#[derive(Debug, Clone, Copy, Default)]
pub struct NormalizedRatio;

impl SimilarityScorer for NormalizedRatio {
    fn score(&self, query: &str, target: &str) -> u8 {
        let query = normalize(query);
        let target = normalize(target);
        if query.is_empty() || target.is_empty() {
            return 0;
        }
        ratio(&query, &target)
    }
}

fn join_nonempty(a: &str, b: &str) -> String {
    match (a.is_empty(), b.is_empty()) {
        (true, _) => b.to_string(),
        (_, true) => a.to_string(),
        _ => format!("{a} {b}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ratio_basics() {
        assert_eq!(ratio("", ""), 100);
        assert_eq!(ratio("abc", "abc"), 100);
        assert_eq!(ratio("abc", "xyz"), 0);
        assert_eq!(ratio("abcd", "abce"), 75);
    }

    #[test]
    fn identical_names_score_100() {
        assert_eq!(TokenSetRatio.score("Connaught Place", "Connaught Place"), 100);
    }

    #[test]
    fn case_and_punctuation_insensitive() {
        let shouting = TokenSetRatio.score("CONNAUGHT PLACE!!", "Connaught Place");
        let quiet = TokenSetRatio.score("connaught place", "Connaught Place");
        assert_eq!(shouting, quiet);
        assert_eq!(shouting, 100);
    }

    #[test]
    fn word_order_does_not_matter() {
        assert_eq!(TokenSetRatio.score("place connaught", "Connaught Place"), 100);
    }

    #[test]
    fn subset_scores_100() {
        assert_eq!(
            TokenSetRatio.score("toilet near connaught place", "Connaught Place"),
            100
        );
        assert_eq!(TokenSetRatio.score("nagar", "Lajpat Nagar"), 100);
    }

    #[test]
    fn typo_scores_high_but_not_perfect() {
        let s = TokenSetRatio.score("Conaught Place", "Connaught Place");
        assert!(s >= 90 && s < 100, "score was {s}");
    }

    #[test]
    fn unrelated_scores_low() {
        let s = TokenSetRatio.score("Hauz Khas", "Connaught Place");
        assert!(s < 70, "score was {s}");
    }

    #[test]
    fn empty_input_scores_zero() {
        assert_eq!(TokenSetRatio.score("???", "Connaught Place"), 0);
        assert_eq!(TokenSetRatio.score("Connaught Place", ""), 0);
        assert_eq!(NormalizedRatio.score("", "Connaught Place"), 0);
    }

    #[test]
    fn normalized_ratio_respects_order() {
        assert_eq!(NormalizedRatio.score("CONNAUGHT place", "Connaught Place"), 100);
        assert!(NormalizedRatio.score("place connaught", "Connaught Place") < 100);
    }
}

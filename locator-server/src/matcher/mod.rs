//! Fuzzy matching of extracted place names against the stop catalog.
//!
//! Every candidate is scored against every stop name, so cost grows with
//! candidates × stops. That is fine for catalogs in the thousands; larger
//! catalogs would need a text index in front of the scorer.

mod score;

use std::cmp::Ordering;
use std::sync::Arc;

use crate::catalog::StopCatalog;
use crate::domain::StopRecord;
use crate::extract::{Candidates, ExtractedCandidate};

pub use score::{NormalizedRatio, SimilarityScorer, TokenSetRatio, ratio};

/// Best stop found for a set of candidates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MatchResult<'a> {
    /// The matched stop, or `None` if nothing reached the threshold.
    pub stop: Option<&'a StopRecord>,
    /// Best score seen (0..=100), even when below the threshold.
    pub score: u8,
    /// Candidate that produced the best score.
    pub candidate: Option<&'a ExtractedCandidate>,
}

impl MatchResult<'_> {
    /// A result with nothing matched.
    pub fn none() -> Self {
        Self {
            stop: None,
            score: 0,
            candidate: None,
        }
    }

    /// True if a stop was matched.
    pub fn is_match(&self) -> bool {
        self.stop.is_some()
    }
}

/// A stop with its score for a free-text search.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoredStop<'a> {
    pub stop: &'a StopRecord,
    pub score: u8,
}

/// Matches candidates to stops with a swappable scorer.
#[derive(Clone)]
pub struct StopMatcher {
    scorer: Arc<dyn SimilarityScorer>,
    consider_reviews: bool,
}

impl StopMatcher {
    /// Create a matcher with the given scorer.
    pub fn new(scorer: Arc<dyn SimilarityScorer>) -> Self {
        Self {
            scorer,
            consider_reviews: false,
        }
    }

    /// Break score ties by washroom distance and rating when the catalog
    /// has ratings. Without rating data this has no effect.
    pub fn with_reviews(mut self, consider_reviews: bool) -> Self {
        self.consider_reviews = consider_reviews;
        self
    }

    /// Find the best-matching stop for the candidates.
    ///
    /// Candidates are visited in rank order. A candidate equal to a stop
    /// name (after normalization) selects that stop with score 100, ahead
    /// of stops that merely contain its words. Otherwise ties on score go
    /// to the earlier candidate, then the lexicographically smaller stop
    /// name, then the smaller stop id. A best score below `threshold`
    /// yields no stop.
    pub fn match_candidates<'a>(
        &self,
        candidates: &'a Candidates,
        catalog: &'a StopCatalog,
        threshold: u8,
    ) -> MatchResult<'a> {
        let use_reviews = self.consider_reviews && catalog.has_ratings();
        let mut best: Option<(&'a ExtractedCandidate, &'a StopRecord, u8)> = None;

        for candidate in candidates {
            let exact = catalog
                .find_by_name(&candidate.normalized)
                .min_by(|a, b| tie_break(a, b, use_reviews));
            if let Some(stop) = exact {
                best = Some((candidate, stop, 100));
                break;
            }

            for stop in catalog {
                let score = self.scorer.score(&candidate.normalized, &stop.name);

                let better = match best {
                    None => true,
                    Some((best_cand, best_stop, best_score)) => {
                        score > best_score
                            || (score == best_score
                                && candidate.rank == best_cand.rank
                                && tie_break(stop, best_stop, use_reviews) == Ordering::Less)
                    }
                };

                if better {
                    best = Some((candidate, stop, score));
                }
            }

            // Later candidates can only tie a perfect score, and ties go to
            // earlier candidates.
            if best.is_some_and(|(_, _, s)| s == 100) {
                break;
            }
        }

        let Some((candidate, stop, score)) = best else {
            return MatchResult::none();
        };

        tracing::debug!(
            candidate = %candidate.text,
            stop = %stop.name,
            score,
            threshold,
            "best stop match"
        );

        MatchResult {
            stop: (score >= threshold).then_some(stop),
            score,
            candidate: Some(candidate),
        }
    }

    /// Rank stops against a free-text query, best first.
    ///
    /// Stops scoring zero are left out. Ties are ordered by name then id.
    pub fn search<'a>(&self, query: &str, catalog: &'a StopCatalog, limit: usize) -> Vec<ScoredStop<'a>> {
        let mut scored: Vec<ScoredStop<'a>> = catalog
            .iter()
            .map(|stop| ScoredStop {
                stop,
                score: self.scorer.score(query, &stop.name),
            })
            .filter(|s| s.score > 0)
            .collect();

        scored.sort_by(|a, b| {
            b.score
                .cmp(&a.score)
                .then_with(|| tie_break(a.stop, b.stop, false))
        });
        scored.truncate(limit);
        scored
    }
}

impl Default for StopMatcher {
    fn default() -> Self {
        Self::new(Arc::new(TokenSetRatio))
    }
}

impl std::fmt::Debug for StopMatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StopMatcher")
            .field("consider_reviews", &self.consider_reviews)
            .finish_non_exhaustive()
    }
}

/// Order two equally-scored stops; `Less` means `a` wins.
///
/// With reviews: closer washroom first, then higher rating (unrated last).
/// Always finishes with name then id, so the order is total.
fn tie_break(a: &StopRecord, b: &StopRecord, use_reviews: bool) -> Ordering {
    let by_reviews = if use_reviews {
        a.distance_meters
            .total_cmp(&b.distance_meters)
            .then_with(|| match (a.washroom.rating, b.washroom.rating) {
                (Some(ra), Some(rb)) => rb.total_cmp(&ra),
                (Some(_), None) => Ordering::Less,
                (None, Some(_)) => Ordering::Greater,
                (None, None) => Ordering::Equal,
            })
    } else {
        Ordering::Equal
    };

    by_reviews
        .then_with(|| a.name.cmp(&b.name))
        .then_with(|| a.stop_id.cmp(&b.stop_id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::test_support::record;
    use crate::extract::ExtractionMethod;

    fn catalog(records: Vec<StopRecord>) -> StopCatalog {
        StopCatalog::from_records(records).unwrap()
    }

    fn candidates(texts: &[&str]) -> Candidates {
        Candidates::from_ranked(texts.iter(), ExtractionMethod::Entity)
    }

    fn delhi() -> StopCatalog {
        catalog(vec![
            record("S1", "Arjun Nagar", "W1", 150.0),
            record("S2", "Karol Bagh", "W2", 200.0),
            record("S3", "Connaught Place", "W3", 100.0),
            record("S4", "Lajpat Nagar", "W4", 180.0),
        ])
    }

    #[test]
    fn exact_name_scores_100() {
        let cat = delhi();
        let c = candidates(&["Connaught Place"]);
        let m = StopMatcher::default().match_candidates(&c, &cat, 100);

        assert_eq!(m.stop.unwrap().name, "Connaught Place");
        assert_eq!(m.score, 100);
        assert_eq!(m.candidate.unwrap().text, "Connaught Place");
    }

    #[test]
    fn typo_matches_above_threshold() {
        let cat = delhi();
        let c = candidates(&["Karol Bag"]);
        let m = StopMatcher::default().match_candidates(&c, &cat, 70);

        assert_eq!(m.stop.unwrap().name, "Karol Bagh");
        assert!(m.score >= 70 && m.score < 100);
    }

    #[test]
    fn below_threshold_has_no_stop_but_keeps_score() {
        let cat = delhi();
        let c = candidates(&["Hauz Khas"]);
        let m = StopMatcher::default().match_candidates(&c, &cat, 70);

        assert!(!m.is_match());
        assert!(m.score < 70);
        assert_eq!(m.candidate.unwrap().text, "Hauz Khas");
    }

    #[test]
    fn no_candidates_is_none() {
        let cat = delhi();
        let empty = Candidates::default();
        let m = StopMatcher::default().match_candidates(&empty, &cat, 0);
        assert_eq!(m, MatchResult::none());
    }

    #[test]
    fn best_pair_across_candidates() {
        let cat = delhi();
        let c = candidates(&["Delhi", "Lajpat Nagar"]);
        let m = StopMatcher::default().match_candidates(&c, &cat, 70);

        assert_eq!(m.stop.unwrap().name, "Lajpat Nagar");
        assert_eq!(m.candidate.unwrap().rank, 1);
    }

    #[test]
    fn tie_prefers_smaller_name() {
        let cat = delhi();
        // "nagar" is a word subset of both Nagar stops
        let c = candidates(&["nagar"]);
        let m = StopMatcher::default().match_candidates(&c, &cat, 70);

        assert_eq!(m.score, 100);
        assert_eq!(m.stop.unwrap().name, "Arjun Nagar");
    }

    #[test]
    fn tie_prefers_earlier_candidate() {
        let cat = delhi();
        let c = candidates(&["Lajpat Nagar", "Arjun Nagar"]);
        let m = StopMatcher::default().match_candidates(&c, &cat, 70);

        assert_eq!(m.stop.unwrap().name, "Lajpat Nagar");
        assert_eq!(m.candidate.unwrap().rank, 0);
    }

    #[test]
    fn tie_on_same_name_prefers_smaller_id() {
        let cat = catalog(vec![
            record("S9", "Sector 5", "W9", 50.0),
            record("S2", "Sector 5", "W2", 300.0),
        ]);
        let c = candidates(&["Sector 5"]);
        let m = StopMatcher::default().match_candidates(&c, &cat, 70);

        assert_eq!(m.stop.unwrap().stop_id.as_str(), "S2");
    }

    #[test]
    fn reviews_break_ties_when_rated() {
        let mut near_low = record("S1", "Arjun Nagar", "W1", 150.0);
        near_low.washroom.rating = Some(2.0);
        let mut near_high = record("S2", "Lajpat Nagar", "W2", 150.0);
        near_high.washroom.rating = Some(4.5);
        let far = record("S3", "Karol Nagar", "W3", 400.0);
        let cat = catalog(vec![near_low, near_high, far]);
        let c = candidates(&["nagar"]);

        let plain = StopMatcher::default().match_candidates(&c, &cat, 70);
        assert_eq!(plain.stop.unwrap().name, "Arjun Nagar");

        let reviewed = StopMatcher::default()
            .with_reviews(true)
            .match_candidates(&c, &cat, 70);
        assert_eq!(reviewed.stop.unwrap().name, "Lajpat Nagar");
    }

    #[test]
    fn reviews_are_noop_without_ratings() {
        let cat = catalog(vec![
            record("S1", "Lajpat Nagar", "W1", 500.0),
            record("S2", "Arjun Nagar", "W2", 900.0),
        ]);
        let c = candidates(&["nagar"]);

        let m = StopMatcher::default()
            .with_reviews(true)
            .match_candidates(&c, &cat, 70);
        assert_eq!(m.stop.unwrap().name, "Arjun Nagar");
    }

    #[test]
    fn exact_name_beats_word_subset() {
        let cat = catalog(vec![
            record("S1", "Lajpat Nagar", "W1", 180.0),
            record("S2", "Lajpat Nagar Central Market", "W2", 250.0),
        ]);

        let c = candidates(&["Lajpat Nagar Central Market"]);
        let m = StopMatcher::default().match_candidates(&c, &cat, 70);
        assert_eq!(m.stop.unwrap().stop_id.as_str(), "S2");
        assert_eq!(m.score, 100);

        let c = candidates(&["lajpat nagar"]);
        let m = StopMatcher::default().match_candidates(&c, &cat, 70);
        assert_eq!(m.stop.unwrap().stop_id.as_str(), "S1");
    }

    #[test]
    fn earlier_subset_match_still_wins_over_later_exact() {
        let cat = catalog(vec![
            record("S1", "Lajpat Nagar", "W1", 180.0),
            record("S2", "Karol Bagh", "W2", 200.0),
        ]);
        // "Lajpat" scores 100 by word subset before "Karol Bagh" is looked at
        let c = candidates(&["Lajpat", "Karol Bagh"]);
        let m = StopMatcher::default().match_candidates(&c, &cat, 70);

        assert_eq!(m.stop.unwrap().name, "Lajpat Nagar");
        assert_eq!(m.candidate.unwrap().rank, 0);
    }

    #[test]
    fn scorer_is_swappable() {
        let cat = delhi();
        let c = candidates(&["place connaught"]);

        let token_set = StopMatcher::default().match_candidates(&c, &cat, 100);
        assert!(token_set.is_match());

        let ordered = StopMatcher::new(Arc::new(NormalizedRatio)).match_candidates(&c, &cat, 100);
        assert!(!ordered.is_match());
    }

    #[test]
    fn search_ranks_and_limits() {
        let cat = delhi();
        let results = StopMatcher::default().search("nagar", &cat, 10);

        let names: Vec<_> = results.iter().map(|r| r.stop.name.as_str()).collect();
        assert_eq!(names[..2], ["Arjun Nagar", "Lajpat Nagar"]);
        assert!(results.windows(2).all(|w| w[0].score >= w[1].score));

        let limited = StopMatcher::default().search("nagar", &cat, 1);
        assert_eq!(limited.len(), 1);
    }

    #[test]
    fn search_blank_query_is_empty() {
        let cat = delhi();
        assert!(StopMatcher::default().search("  ", &cat, 10).is_empty());
    }
}

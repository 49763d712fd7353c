//! Location extraction from free-text queries.
//!
//! Turns "Where can I find a toilet near Connaught Place?" into an ordered
//! list of place-name candidates. Tagged entities come first; when the
//! tagger finds nothing, content phrases left after stripping stop-words
//! and query boilerplate are used instead.

mod phrases;
mod tagger;

use std::collections::HashSet;
use std::sync::Arc;

use crate::text::normalize;

pub use phrases::{Phrase, noun_phrases};
pub use tagger::{CapitalizedSpanTagger, EntityLabel, EntityTagger, TaggedSpan};

/// How a candidate was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtractionMethod {
    /// Tagged by the entity tagger.
    Entity,
    /// Noun-phrase fallback.
    Heuristic,
}

/// A place name pulled out of a query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedCandidate {
    /// Candidate text with original casing (for messages).
    pub text: String,
    /// Normalized form used for matching.
    pub normalized: String,
    /// How it was extracted.
    pub method: ExtractionMethod,
    /// Position in the ranking; 0 is the strongest candidate.
    pub rank: usize,
}

/// Ranked candidates for one query.
///
/// Fully materialised, so it can be iterated any number of times.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Candidates(Vec<ExtractedCandidate>);

impl Candidates {
    /// Build from candidate texts in rank order.
    ///
    /// Blank texts and texts normalizing to an already-seen candidate are
    /// dropped; ranks are assigned after deduplication.
    pub fn from_ranked<I, S>(texts: I, method: ExtractionMethod) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut seen = HashSet::new();
        let mut out = Vec::new();

        for text in texts {
            let text = text.as_ref().trim();
            let normalized = normalize(text);
            if normalized.is_empty() || !seen.insert(normalized.clone()) {
                continue;
            }
            out.push(ExtractedCandidate {
                text: text.to_string(),
                normalized,
                method,
                rank: out.len(),
            });
        }

        Self(out)
    }

    /// The top-ranked candidate.
    pub fn first(&self) -> Option<&ExtractedCandidate> {
        self.0.first()
    }

    /// Iterate in rank order.
    pub fn iter(&self) -> std::slice::Iter<'_, ExtractedCandidate> {
        self.0.iter()
    }

    /// Number of candidates.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True if no location was found.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<'a> IntoIterator for &'a Candidates {
    type Item = &'a ExtractedCandidate;
    type IntoIter = std::slice::Iter<'a, ExtractedCandidate>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Extracts place-name candidates using an injected tagger.
#[derive(Clone)]
pub struct LocationExtractor {
    tagger: Arc<dyn EntityTagger>,
}

impl LocationExtractor {
    /// Create an extractor around a tagger built once at start-up.
    pub fn new(tagger: Arc<dyn EntityTagger>) -> Self {
        Self { tagger }
    }

    /// Extract ranked candidates from `text`.
    ///
    /// Never fails; returns an empty sequence when the text names nothing.
    pub fn extract(&self, text: &str) -> Candidates {
        let mut spans: Vec<TaggedSpan> = self
            .tagger
            .tag(text)
            .into_iter()
            .filter(|s| s.label.is_place_like())
            .collect();
        spans.sort_by_key(|s| s.start);

        let entities = Candidates::from_ranked(spans.iter().map(|s| &s.text), ExtractionMethod::Entity);
        if !entities.is_empty() {
            tracing::debug!(count = entities.len(), "extracted entity candidates");
            return entities;
        }

        let phrases = noun_phrases(text);
        let candidates =
            Candidates::from_ranked(phrases.iter().map(|p| &p.text), ExtractionMethod::Heuristic);
        tracing::debug!(count = candidates.len(), "extracted heuristic candidates");
        candidates
    }
}

impl std::fmt::Debug for LocationExtractor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LocationExtractor").finish_non_exhaustive()
    }
}

//! Named-entity tagging.
//!
//! The extractor only depends on the [`EntityTagger`] trait, so the
//! rule-based tagger here can be replaced by a statistical model (or a
//! fake in tests) without touching the rest of the pipeline.

use std::collections::HashSet;

use crate::text::{adjacent, is_filler, tokenize};

/// Category assigned to a tagged span.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityLabel {
    /// Geographic or political place (area, neighbourhood, city).
    Location,
    /// Building or landmark (market, station, hospital).
    Facility,
    /// Named organization (university, company).
    Organization,
    /// A person's name.
    Person,
    /// Anything else a tagger might report.
    Other,
}

impl EntityLabel {
    /// True for labels that can name a place someone is standing at.
    pub fn is_place_like(self) -> bool {
        matches!(
            self,
            EntityLabel::Location | EntityLabel::Facility | EntityLabel::Organization
        )
    }
}

/// A span of input text recognised as an entity.
#[derive(Debug, Clone, PartialEq)]
pub struct TaggedSpan {
    /// The span text, as written in the input.
    pub text: String,
    /// Entity category.
    pub label: EntityLabel,
    /// Byte offset of the span start (used to order spans).
    pub start: usize,
}

/// A named-entity tagger.
///
/// Implementations must be cheap to call per query; any expensive model
/// loading happens when the tagger is constructed.
pub trait EntityTagger: Send + Sync {
    /// Tag entities in `text`. Spans may be returned in any order.
    fn tag(&self, text: &str) -> Vec<TaggedSpan>;
}

/// Last words that mark a span as a facility.
const FACILITY_CUES: &[&str] = &[
    "market", "station", "metro", "hospital", "mall", "terminal", "depot", "gate", "chowk",
    "circle", "crossing", "park", "stadium", "temple", "mandir", "masjid", "church", "museum",
    "airport", "complex", "bazaar", "bazar", "plaza", "fort",
];

/// Last words that mark a span as an organization.
const ORGANIZATION_CUES: &[&str] = &[
    "university", "college", "institute", "school", "ltd", "limited", "corporation", "bank",
    "office", "ministry", "authority",
];

/// Rule-based tagger over capitalization.
///
/// Runs of capitalized words (plus numbers continuing such a run, as in
/// "Sector 21") that are not query boilerplate become spans. A run ends at
/// punctuation. The final word decides the label.
#[derive(Debug, Clone)]
pub struct CapitalizedSpanTagger {
    facility_cues: HashSet<String>,
    organization_cues: HashSet<String>,
}

impl CapitalizedSpanTagger {
    /// Build the tagger and its cue lexicons.
    pub fn new() -> Self {
        Self {
            facility_cues: FACILITY_CUES.iter().map(|s| s.to_string()).collect(),
            organization_cues: ORGANIZATION_CUES.iter().map(|s| s.to_string()).collect(),
        }
    }

    fn label_for(&self, last_word: &str) -> EntityLabel {
        let lower = last_word.to_lowercase();
        if self.facility_cues.contains(&lower) {
            EntityLabel::Facility
        } else if self.organization_cues.contains(&lower) {
            EntityLabel::Organization
        } else {
            EntityLabel::Location
        }
    }
}

impl Default for CapitalizedSpanTagger {
    fn default() -> Self {
        Self::new()
    }
}

impl EntityTagger for CapitalizedSpanTagger {
    fn tag(&self, text: &str) -> Vec<TaggedSpan> {
        let tokens = tokenize(text);
        let mut spans = Vec::new();
        // (first token index, last token index) of the open run
        let mut open: Option<(usize, usize)> = None;

        let close = |run: Option<(usize, usize)>, spans: &mut Vec<TaggedSpan>| {
            if let Some((first, last)) = run {
                let start = tokens[first].start;
                spans.push(TaggedSpan {
                    text: text[start..tokens[last].end].to_string(),
                    label: self.label_for(tokens[last].text),
                    start,
                });
            }
        };

        for (i, token) in tokens.iter().enumerate() {
            let starts_name = token.is_capitalized() && !is_filler(&token.lower());
            let continues_name = open.is_some_and(|(_, last)| {
                adjacent(text, &tokens[last], token)
                    && (starts_name || token.text.chars().all(|c| c.is_ascii_digit()))
            });

            if continues_name {
                open = open.map(|(first, _)| (first, i));
            } else {
                close(open.take(), &mut spans);
                if starts_name {
                    open = Some((i, i));
                }
            }
        }
        close(open, &mut spans);

        spans
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tag(text: &str) -> Vec<(String, EntityLabel)> {
        CapitalizedSpanTagger::new()
            .tag(text)
            .into_iter()
            .map(|s| (s.text, s.label))
            .collect()
    }

    #[test]
    fn tags_place_after_boilerplate() {
        assert_eq!(
            tag("Where can I find a toilet near Connaught Place?"),
            vec![("Connaught Place".to_string(), EntityLabel::Location)]
        );
    }

    #[test]
    fn skips_capitalized_boilerplate() {
        assert_eq!(
            tag("Public toilet close to Hauz Khas please"),
            vec![("Hauz Khas".to_string(), EntityLabel::Location)]
        );
    }

    #[test]
    fn punctuation_ends_a_span() {
        assert_eq!(
            tag("I'm at Lajpat Nagar, Delhi"),
            vec![
                ("Lajpat Nagar".to_string(), EntityLabel::Location),
                ("Delhi".to_string(), EntityLabel::Location),
            ]
        );
    }

    #[test]
    fn facility_and_organization_cues() {
        assert_eq!(
            tag("toilet near Sarojini Market or Delhi University"),
            vec![
                ("Sarojini Market".to_string(), EntityLabel::Facility),
                ("Delhi University".to_string(), EntityLabel::Organization),
            ]
        );
    }

    #[test]
    fn numbers_continue_a_span() {
        assert_eq!(
            tag("washroom near Sector 21 please"),
            vec![("Sector 21".to_string(), EntityLabel::Location)]
        );
    }

    #[test]
    fn numbers_alone_do_not_start_a_span() {
        assert!(tag("need toilet 21 now").is_empty());
    }

    #[test]
    fn lowercase_text_has_no_entities() {
        assert!(tag("toilet near hauz khas").is_empty());
    }

    #[test]
    fn span_offsets_are_byte_positions() {
        let spans = CapitalizedSpanTagger::new().tag("near Karol Bagh");
        assert_eq!(spans[0].start, 5);
    }

    #[test]
    fn place_like_labels() {
        assert!(EntityLabel::Location.is_place_like());
        assert!(EntityLabel::Facility.is_place_like());
        assert!(EntityLabel::Organization.is_place_like());
        assert!(!EntityLabel::Person.is_place_like());
        assert!(!EntityLabel::Other.is_place_like());
    }
}

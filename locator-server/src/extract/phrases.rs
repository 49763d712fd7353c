//! Noun-phrase fallback for queries with no tagged entity.

use crate::text::{adjacent, is_filler, tokenize};

/// A candidate phrase cut out of the query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Phrase {
    /// Phrase text, as written.
    pub text: String,
    /// Number of words in the phrase.
    pub words: usize,
    /// Byte offset in the query.
    pub start: usize,
}

/// Extract content phrases, longest first.
///
/// Stop-words, query boilerplate, numbers and punctuation split the query;
/// each remaining run of adjacent words is a phrase. Phrases are ordered by
/// word count, then character length (both descending), then position.
pub fn noun_phrases(text: &str) -> Vec<Phrase> {
    let tokens = tokenize(text);
    let mut phrases = Vec::new();
    let mut run: Option<(usize, usize)> = None;

    for (i, token) in tokens.iter().enumerate() {
        let content = token.is_alphabetic() && !is_filler(&token.lower());

        match run {
            Some((first, last)) if content && adjacent(text, &tokens[last], token) => {
                run = Some((first, i));
            }
            _ => {
                if let Some((first, last)) = run.take() {
                    phrases.push(phrase(text, &tokens, first, last));
                }
                if content {
                    run = Some((i, i));
                }
            }
        }
    }
    if let Some((first, last)) = run {
        phrases.push(phrase(text, &tokens, first, last));
    }

    phrases.sort_by(|a, b| {
        b.words
            .cmp(&a.words)
            .then_with(|| b.text.chars().count().cmp(&a.text.chars().count()))
            .then_with(|| a.start.cmp(&b.start))
    });

    phrases
}

fn phrase(text: &str, tokens: &[crate::text::Token<'_>], first: usize, last: usize) -> Phrase {
    let start = tokens[first].start;
    Phrase {
        text: text[start..tokens[last].end].to_string(),
        words: last - first + 1,
        start,
    }
}

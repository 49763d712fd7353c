//! Text normalization and tokenization shared by extraction and matching.

use std::collections::HashSet;
use std::sync::OnceLock;

/// Normalize a string for comparison.
///
/// Lowercases, replaces every non-alphanumeric character with a space and
/// collapses runs of whitespace, so `"CONNAUGHT  PLACE!!"` and
/// `"connaught place"` normalize identically.
pub fn normalize(s: &str) -> String {
    let mapped: String = s
        .chars()
        .flat_map(char::to_lowercase)
        .map(|c| if c.is_alphanumeric() { c } else { ' ' })
        .collect();

    mapped.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// A word in the input with its byte span.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    /// The word as written.
    pub text: &'a str,
    /// Byte offset of the first character.
    pub start: usize,
    /// Byte offset one past the last character.
    pub end: usize,
}

impl Token<'_> {
    /// Lowercased form used for lexicon lookups.
    pub fn lower(&self) -> String {
        self.text.to_lowercase()
    }

    /// True if the word starts with an uppercase letter.
    pub fn is_capitalized(&self) -> bool {
        self.text.chars().next().is_some_and(char::is_uppercase)
    }

    /// True if the word is made of letters (apostrophes allowed inside).
    pub fn is_alphabetic(&self) -> bool {
        self.text.chars().any(char::is_alphabetic)
            && self.text.chars().all(|c| c.is_alphabetic() || c == '\'')
    }
}

/// Split text into words.
///
/// A word is a maximal run of alphanumeric characters, optionally joined
/// by inner apostrophes (`I'm`, `Children's`).
pub fn tokenize(text: &str) -> Vec<Token<'_>> {
    let mut tokens = Vec::new();
    let mut start: Option<usize> = None;
    let mut chars = text.char_indices().peekable();

    while let Some((i, c)) = chars.next() {
        let inner_apostrophe = (c == '\'' || c == '\u{2019}')
            && start.is_some()
            && chars.peek().is_some_and(|(_, n)| n.is_alphanumeric());

        if c.is_alphanumeric() || inner_apostrophe {
            if start.is_none() {
                start = Some(i);
            }
        } else if let Some(s) = start.take() {
            tokens.push(Token {
                text: &text[s..i],
                start: s,
                end: i,
            });
        }
    }

    if let Some(s) = start {
        tokens.push(Token {
            text: &text[s..],
            start: s,
            end: text.len(),
        });
    }

    tokens
}

/// True if only whitespace separates two adjacent tokens.
pub fn adjacent(text: &str, prev: &Token<'_>, next: &Token<'_>) -> bool {
    text[prev.end..next.start].chars().all(char::is_whitespace)
}

/// English function words that never form part of a place name.
const STOP_WORDS: &[&str] = &[
    "i", "me", "my", "myself", "we", "our", "ours", "ourselves", "you", "your", "yours",
    "yourself", "yourselves", "he", "him", "his", "himself", "she", "her", "hers", "herself",
    "it", "its", "itself", "they", "them", "their", "theirs", "themselves", "what", "which",
    "who", "whom", "this", "that", "these", "those", "am", "is", "are", "was", "were", "be",
    "been", "being", "have", "has", "had", "having", "do", "does", "did", "doing", "a", "an",
    "the", "and", "but", "if", "or", "because", "as", "until", "while", "of", "at", "by",
    "for", "with", "about", "against", "between", "into", "through", "during", "before",
    "after", "above", "below", "to", "from", "up", "down", "in", "out", "on", "off", "over",
    "under", "again", "further", "then", "once", "here", "there", "when", "where", "why",
    "how", "all", "any", "both", "each", "few", "more", "most", "other", "some", "such", "no",
    "nor", "not", "only", "own", "same", "so", "than", "too", "very", "s", "t", "can", "will",
    "just", "don", "should", "now", "i'm", "i've", "i'd", "i'll", "it's", "where's",
    "what's", "let's", "there's", "don't", "can't", "won't", "could", "would", "may", "might",
    "must", "shall",
];

/// Words that frame a washroom query without naming a place.
const QUERY_BOILERPLATE: &[&str] = &[
    "find", "show", "locate", "get", "tell", "need", "needs", "want", "wants", "looking", "look", "search",
    "toilet", "toilets", "washroom", "washrooms", "restroom", "restrooms", "bathroom",
    "bathrooms", "lavatory", "loo", "wc", "urinal", "facility", "facilities", "near",
    "nearest", "nearby", "close", "closest", "around", "next", "public", "please", "urgently",
    "urgent", "help", "bus", "stand", "stop", "hi", "hello", "hey", "thanks", "thank",
];

fn stop_words() -> &'static HashSet<&'static str> {
    static WORDS: OnceLock<HashSet<&'static str>> = OnceLock::new();
    WORDS.get_or_init(|| STOP_WORDS.iter().copied().collect())
}

fn boilerplate() -> &'static HashSet<&'static str> {
    static WORDS: OnceLock<HashSet<&'static str>> = OnceLock::new();
    WORDS.get_or_init(|| QUERY_BOILERPLATE.iter().copied().collect())
}

/// True if a lowercased word is a stop-word or query boilerplate.
pub fn is_filler(lower: &str) -> bool {
    let lower = lower.replace('\u{2019}', "'");
    stop_words().contains(lower.as_str()) || boilerplate().contains(lower.as_str())
}

//! Flat tokenizer for the message tag vocabulary.
//!
//! Grammar, applied left to right over the raw text:
//!
//! ```text
//! message := (text | block)*
//! block   := "<" name ">" body "</" name ">"
//! body    := shortest run of characters up to the first matching closer
//! ```
//!
//! Only the tags passed in the vocabulary are recognised; names are matched
//! byte for byte. When several openers are candidates, the earliest one in
//! the text wins and claims everything up to its first closer, so any tag
//! inside a claimed body (same kind or not) is plain body text. An opener with
//! no closer after it is literal text. Tags of the same kind never nest.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TagKind {
    Think,
    Search,
    Music,
}

impl TagKind {
    pub const fn open(self) -> &'static str {
        match self {
            TagKind::Think => "<think>",
            TagKind::Search => "<search>",
            TagKind::Music => "<music>",
        }
    }

    pub const fn close(self) -> &'static str {
        match self {
            TagKind::Think => "</think>",
            TagKind::Search => "</search>",
            TagKind::Music => "</music>",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token<'a> {
    Text(&'a str),
    Block { kind: TagKind, body: &'a str },
}

impl<'a> Token<'a> {
    /// The token's text with its delimiters stripped.
    pub fn body(&self) -> &'a str {
        match self {
            Token::Text(text) => text,
            Token::Block { body, .. } => body,
        }
    }
}

/// Earliest opener at or after `from`, if any.
fn next_opener(input: &str, from: usize, vocabulary: &[TagKind]) -> Option<(usize, TagKind)> {
    vocabulary
        .iter()
        .filter_map(|&kind| input[from..].find(kind.open()).map(|rel| (from + rel, kind)))
        .min_by_key(|(pos, _)| *pos)
}

pub fn tokenize<'a>(input: &'a str, vocabulary: &[TagKind]) -> Vec<Token<'a>> {
    let mut tokens = Vec::new();
    let mut text_start = 0;
    let mut search_from = 0;

    while let Some((open_at, kind)) = next_opener(input, search_from, vocabulary) {
        let body_start = open_at + kind.open().len();
        let Some(close_rel) = input[body_start..].find(kind.close()) else {
            search_from = body_start;
            continue;
        };
        let body_end = body_start + close_rel;

        if open_at > text_start {
            tokens.push(Token::Text(&input[text_start..open_at]));
        }
        tokens.push(Token::Block {
            kind,
            body: &input[body_start..body_end],
        });

        text_start = body_end + kind.close().len();
        search_from = text_start;
    }

    if text_start < input.len() {
        tokens.push(Token::Text(&input[text_start..]));
    }

    tokens
}

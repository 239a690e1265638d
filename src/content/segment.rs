use std::sync::Arc;

use tracing::warn;

use super::{
    latex::normalize_math,
    music::{Track, parse_track},
    tokenizer::{TagKind, Token, tokenize},
};

/// One independently renderable unit of an assistant message.
#[derive(Debug, Clone, PartialEq)]
pub enum Segment {
    Markdown(String),
    Thinking(String),
    Search(String),
    Playlist(Vec<Arc<Track>>),
}

impl Segment {
    /// Whitespace-only text segments carry no renderable content.
    pub fn is_blank(&self) -> bool {
        match self {
            Segment::Markdown(text) | Segment::Thinking(text) | Segment::Search(text) => {
                text.trim().is_empty()
            }
            Segment::Playlist(tracks) => tracks.is_empty(),
        }
    }
}

/// A message after playlist normalization: the original tokens, with each
/// merged run of `<music>` blocks replaced by its serialized track list.
#[derive(Debug, Clone, PartialEq)]
pub enum Normalized<'a> {
    Token(Token<'a>),
    Playlist(String),
}

/// Collapses each run of top-level `<music>` blocks separated only by
/// whitespace into one playlist marker carrying the tracks as JSON.
///
/// `<music>` blocks inside a `<think>` or `<search>` region stay literal.
pub fn normalize_playlists(raw: &str) -> Vec<Normalized<'_>> {
    let tokens = tokenize(raw, &[TagKind::Think, TagKind::Search, TagKind::Music]);
    let mut out = Vec::with_capacity(tokens.len());
    let mut i = 0;

    while i < tokens.len() {
        match tokens[i] {
            Token::Block {
                kind: TagKind::Music,
                body,
            } => {
                let mut tracks = vec![parse_track(body)];
                loop {
                    let (step, next) = match tokens.get(i + 1) {
                        Some(Token::Text(gap)) if gap.trim().is_empty() => (2, tokens.get(i + 2)),
                        other => (1, other),
                    };
                    let Some(Token::Block {
                        kind: TagKind::Music,
                        body,
                    }) = next
                    else {
                        break;
                    };
                    tracks.push(parse_track(body));
                    i += step;
                }
                match serde_json::to_string(&tracks) {
                    Ok(json) => out.push(Normalized::Playlist(json)),
                    Err(e) => warn!("Failed to serialize playlist of {} tracks: {e}", tracks.len()),
                }
            }
            token => out.push(Normalized::Token(token)),
        }
        i += 1;
    }

    out
}

fn decode_playlist(payload: &str) -> Option<Segment> {
    match serde_json::from_str::<Vec<Track>>(payload) {
        Ok(tracks) => Some(Segment::Playlist(
            tracks.into_iter().map(Arc::new).collect(),
        )),
        Err(e) => {
            warn!("Dropping malformed playlist payload: {e}");
            None
        }
    }
}

/// Decomposes one assistant message into its ordered segments.
///
/// Never fails: unterminated or malformed tags stay in the surrounding
/// markdown, and only a playlist payload that cannot be decoded is dropped.
pub fn segment(raw: &str) -> Vec<Segment> {
    normalize_playlists(raw)
        .into_iter()
        .filter_map(|piece| match piece {
            Normalized::Playlist(payload) => decode_playlist(&payload),
            Normalized::Token(Token::Text(text)) => Some(Segment::Markdown(normalize_math(text))),
            Normalized::Token(Token::Block {
                kind: TagKind::Think,
                body,
            }) => Some(Segment::Thinking(normalize_math(body))),
            Normalized::Token(Token::Block {
                kind: TagKind::Search,
                body,
            }) => Some(Segment::Search(body.to_string())),
            Normalized::Token(Token::Block {
                kind: TagKind::Music,
                body,
            }) => Some(Segment::Markdown(body.to_string())),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn names(segment: &Segment) -> Vec<String> {
        match segment {
            Segment::Playlist(tracks) => tracks.iter().map(|t| t.name.clone()).collect(),
            other => panic!("expected playlist, got {other:?}"),
        }
    }

    #[test]
    fn think_then_markdown() {
        assert_eq!(
            segment("<think>Step 1</think>Hello"),
            vec![
                Segment::Thinking("Step 1".into()),
                Segment::Markdown("Hello".into())
            ]
        );
    }

    #[test]
    fn search_block_is_kept_verbatim() {
        assert_eq!(
            segment("Intro\n<search>1. `http://a`</search>\nOutro"),
            vec![
                Segment::Markdown("Intro\n".into()),
                Segment::Search("1. `http://a`".into()),
                Segment::Markdown("\nOutro".into()),
            ]
        );
    }

    #[test]
    fn whitespace_separated_music_blocks_merge() {
        let raw = "Songs:\n<music>Name: A</music>\n  \n<music>Name: B</music>\nEnjoy";
        let segments = segment(raw);

        assert_eq!(segments.len(), 3);
        assert_eq!(segments[0], Segment::Markdown("Songs:\n".into()));
        assert_eq!(names(&segments[1]), vec!["A", "B"]);
        assert_eq!(segments[2], Segment::Markdown("\nEnjoy".into()));
    }

    #[test]
    fn adjacent_music_blocks_merge() {
        let segments = segment("<music>Name: A</music><music>Name: B</music>");
        assert_eq!(segments.len(), 1);
        assert_eq!(names(&segments[0]), vec!["A", "B"]);
    }

    #[test]
    fn text_between_music_blocks_splits_playlists() {
        let segments = segment("<music>Name: A</music> and <music>Name: B</music>");

        assert_eq!(segments.len(), 3);
        assert_eq!(names(&segments[0]), vec!["A"]);
        assert_eq!(segments[1], Segment::Markdown(" and ".into()));
        assert_eq!(names(&segments[2]), vec!["B"]);
    }

    #[test]
    fn lyrics_containing_markup_survive_merging() {
        let segments = segment("<music>Name: <b>x</b>\nLrc:\n[00:01.00]</music-playlist> hi</music>");

        assert_eq!(segments.len(), 1);
        let Segment::Playlist(tracks) = &segments[0] else {
            panic!("expected playlist");
        };
        assert_eq!(tracks[0].name, "<b>x</b>");
        assert_eq!(tracks[0].lrc[0].text, "</music-playlist> hi");
    }

    #[test]
    fn music_inside_think_stays_literal() {
        assert_eq!(
            segment("<think>pick <music>Name: A</music></think>"),
            vec![Segment::Thinking("pick <music>Name: A</music>".into())]
        );
    }

    #[test]
    fn literal_marker_text_stays_markdown() {
        assert_eq!(
            segment("Use <music-playlist>internal</music-playlist> tags"),
            vec![Segment::Markdown(
                "Use <music-playlist>internal</music-playlist> tags".into()
            )]
        );
        assert_eq!(
            segment("x<music-playlist>[]</music-playlist>y"),
            vec![Segment::Markdown("x<music-playlist>[]</music-playlist>y".into())]
        );
    }

    #[test]
    fn normalization_keeps_tokens_around_playlists() {
        let normalized = normalize_playlists("a<music>Name: A</music> <music>Name: B</music>b");

        assert_eq!(normalized.len(), 3);
        assert_eq!(normalized[0], Normalized::Token(Token::Text("a")));
        assert!(matches!(&normalized[1], Normalized::Playlist(json) if json.contains("\"B\"")));
        assert_eq!(normalized[2], Normalized::Token(Token::Text("b")));
    }

    #[test]
    fn malformed_playlist_payload_is_dropped() {
        assert_eq!(decode_playlist("{not json"), None);
        assert_eq!(decode_playlist("[]"), Some(Segment::Playlist(Vec::new())));
    }

    #[test]
    fn unterminated_tag_is_markdown() {
        assert_eq!(
            segment("<think>never closed"),
            vec![Segment::Markdown("<think>never closed".into())]
        );
    }

    #[test]
    fn math_is_normalized_in_text_segments_only() {
        assert_eq!(
            segment(r"<think>\(x\)</think>\[y\]<search>1. \(z\)</search>"),
            vec![
                Segment::Thinking("$x$".into()),
                Segment::Markdown("$$y$$".into()),
                Segment::Search(r"1. \(z\)".into()),
            ]
        );
    }

    #[test]
    fn blank_segments_are_reported() {
        assert!(Segment::Markdown(" \n".into()).is_blank());
        assert!(!Segment::Thinking("x".into()).is_blank());
    }
}

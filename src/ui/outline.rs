use std::fmt::Write as _;

use crate::{
    audio::progress::format_time,
    content::{
        Segment,
        block::{self, BlockClass},
        file_url, search, segment, table,
    },
    store::{Conversation, Message, Role},
};

const EXCERPT_CHARS: usize = 60;

fn excerpt(text: &str) -> String {
    let line = text.trim().lines().next().unwrap_or_default();
    let mut short: String = line.chars().take(EXCERPT_CHARS).collect();
    if short.len() < line.len() {
        short.push('…');
    }
    short
}

fn role_label(role: Role) -> &'static str {
    match role {
        Role::User => "user",
        Role::Assistant => "assistant",
        Role::System => "system",
    }
}

/// Plain-text summary of a conversation: one entry per message, one line
/// per segment, with the blocks a renderer would turn into cards.
pub fn render_outline(conversation: &Conversation) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{} ({})",
        conversation.display_title(),
        conversation.display_model()
    );
    if let Some(created) = conversation.created_at {
        let _ = writeln!(out, "created {}", created.format("%Y-%m-%d %H:%M UTC"));
    }

    for (index, message) in conversation.messages.iter().enumerate() {
        let _ = writeln!(out, "\n#{index} {}", role_label(message.role));
        outline_message(&mut out, message);
    }
    out
}

fn outline_message(out: &mut String, message: &Message) {
    if message.role != Role::Assistant {
        let _ = writeln!(out, "  text: {}", excerpt(&message.content));
        return;
    }

    for part in segment(&message.content) {
        if part.is_blank() {
            continue;
        }
        match part {
            Segment::Markdown(text) => outline_markdown(out, &text),
            Segment::Thinking(text) => {
                let _ = writeln!(out, "  thinking: {}", excerpt(&text));
            }
            Segment::Search(body) => {
                let results = search::parse_results(&body);
                if results.is_empty() {
                    continue;
                }
                let _ = writeln!(out, "  search: {} results", results.len());
                for result in results {
                    let kind = file_url::classify(&result.url).kind;
                    let _ = writeln!(
                        out,
                        "    {}. {} <{}> [{}]",
                        result.index,
                        result.title,
                        result.url,
                        kind.label()
                    );
                }
            }
            Segment::Playlist(tracks) => {
                let _ = writeln!(out, "  playlist: {} tracks", tracks.len());
                for track in tracks {
                    let span = match (track.lrc.first(), track.lrc.last()) {
                        (Some(first), Some(last)) => format!(
                            ", {}-{}",
                            format_time(first.time),
                            format_time(last.time)
                        ),
                        _ => String::new(),
                    };
                    let _ = writeln!(
                        out,
                        "    {} - {} ({} lyric lines{span})",
                        track.name,
                        track.artist,
                        track.lrc.len()
                    );
                }
            }
        }
    }
}

fn outline_markdown(out: &mut String, text: &str) {
    let _ = writeln!(out, "  markdown: {}", excerpt(text));

    let mut previewable = 0;
    for (index, code) in block::code_blocks(text).iter().enumerate() {
        let class = block::classify(code);
        let label = match &class {
            BlockClass::PlainCode { language, .. } if language.is_empty() => "code".to_string(),
            BlockClass::PlainCode { language, .. } => format!("code ({language})"),
            BlockClass::HtmlPreview { .. } => format!("html preview #{previewable}"),
            BlockClass::WebAnalysis(analysis) => {
                format!("web analysis #{previewable}: {}", analysis.title)
            }
        };
        if class.is_previewable() {
            previewable += 1;
        }
        let _ = writeln!(out, "    block[{index}] {label}");
    }

    for (index, table) in table::tables(text).iter().enumerate() {
        let _ = writeln!(
            out,
            "    table[{index}] {} columns, {} rows",
            table.header.len(),
            table.rows.len()
        );
    }
}

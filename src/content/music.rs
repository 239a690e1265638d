use serde::{Deserialize, Serialize};

use super::lyrics::{LyricLine, parse_lrc};

const LRC_MARKER: &str = "Lrc:";

/// One `<music>` entry. Built once at parse time and never mutated.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Track {
    pub name: String,
    pub artist: String,
    pub album: String,
    pub url: String,
    pub pic: String,
    pub lrc: Vec<LyricLine>,
}

impl Track {
    pub fn download_name(&self) -> String {
        let stem = if self.name.trim().is_empty() {
            "track"
        } else {
            self.name.trim()
        };
        format!("{stem}.mp3")
    }
}

fn header_field(header: &str, key: &str) -> String {
    header
        .lines()
        .find_map(|line| {
            line.trim_start()
                .strip_prefix(key)
                .and_then(|rest| rest.strip_prefix(':'))
        })
        .map(|value| value.trim().to_string())
        .unwrap_or_default()
}

fn unwrap_backticks(value: String) -> String {
    match value
        .strip_prefix('`')
        .and_then(|inner| inner.strip_suffix('`'))
    {
        Some(inner) => inner.trim().to_string(),
        None => value,
    }
}

/// Extracts a track from the inner text of one `<music>` block.
///
/// Header fields are looked up before the `Lrc:` marker; everything after the
/// marker is the lyric body. Missing fields are empty strings.
pub fn parse_track(body: &str) -> Track {
    let (header, lrc) = match body.find(LRC_MARKER) {
        Some(at) => (&body[..at], &body[at + LRC_MARKER.len()..]),
        None => (body, ""),
    };

    Track {
        name: header_field(header, "Name"),
        artist: header_field(header, "Artist"),
        album: header_field(header, "Album"),
        url: unwrap_backticks(header_field(header, "URL")),
        pic: unwrap_backticks(header_field(header, "Pic")),
        lrc: parse_lrc(lrc),
    }
}

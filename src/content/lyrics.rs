use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LyricLine {
    /// Seconds from the start of the track.
    pub time: f64,
    pub text: String,
}

/// Parses a `[mm:ss.ff]` tag starting at the beginning of `tag`, returning the
/// time in seconds and the tag's byte length.
fn parse_timestamp(tag: &str) -> Option<(f64, usize)> {
    let bytes = tag.as_bytes();
    let digits = |range: std::ops::Range<usize>| -> Option<u32> {
        let slice = bytes.get(range)?;
        slice
            .iter()
            .all(u8::is_ascii_digit)
            .then(|| slice.iter().fold(0u32, |acc, b| acc * 10 + u32::from(b - b'0')))
    };

    if bytes.first() != Some(&b'[') || bytes.get(3) != Some(&b':') || bytes.get(6) != Some(&b'.') {
        return None;
    }
    let minutes = digits(1..3)?;
    let seconds = digits(4..6)?;

    let frac_len = bytes[7..]
        .iter()
        .take_while(|b| b.is_ascii_digit())
        .count();
    if !(2..=3).contains(&frac_len) || bytes.get(7 + frac_len) != Some(&b']') {
        return None;
    }
    let fraction = digits(7..7 + frac_len)?;
    let scale = 10f64.powi(frac_len as i32);

    let time = f64::from(minutes) * 60.0 + f64::from(seconds) + f64::from(fraction) / scale;
    Some((time, 7 + frac_len + 1))
}

fn find_timestamp(line: &str) -> Option<(f64, usize, usize)> {
    line.match_indices('[').find_map(|(start, _)| {
        parse_timestamp(&line[start..]).map(|(time, len)| (time, start, start + len))
    })
}

/// Parses an LRC body line by line. Lines without a timestamp, and
/// timestamped lines with no text, are dropped. Source order is kept.
pub fn parse_lrc(text: &str) -> Vec<LyricLine> {
    text.lines()
        .filter_map(|line| {
            let (time, start, end) = find_timestamp(line)?;
            let content = format!("{}{}", &line[..start], &line[end..]);
            let content = content.trim();
            (!content.is_empty()).then(|| LyricLine {
                time,
                text: content.to_string(),
            })
        })
        .collect()
}

/// Index of the last line whose time is not after `position`, or `None`
/// while `position` precedes the first line.
pub fn active_line(lyrics: &[LyricLine], position: f64) -> Option<usize> {
    lyrics
        .partition_point(|line| line.time <= position)
        .checked_sub(1)
}

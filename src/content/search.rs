#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchResult {
    pub index: u64,
    pub title: String,
    pub url: String,
}

/// Splits a line into its leading `<digits>.` ordinal and the trimmed rest.
fn ordinal(line: &str) -> Option<(u64, &str)> {
    let line = line.trim_start();
    let digits = line.bytes().take_while(u8::is_ascii_digit).count();
    if digits == 0 {
        return None;
    }
    let rest = line[digits..].strip_prefix('.')?;
    // All digits, so parsing only fails on overflow.
    let index = line[..digits].parse().unwrap_or(u64::MAX);
    Some((index, rest.trim()))
}

fn markdown_link(rest: &str) -> Option<(&str, &str)> {
    let inner = rest.strip_prefix('[')?;
    let title_end = inner.find("](")?;
    let title = &inner[..title_end];
    let after = &inner[title_end + 2..];
    let url_end = after.find(')')?;
    Some((title, &after[..url_end]))
}

fn backtick_url(rest: &str) -> Option<&str> {
    let inner = rest.strip_prefix('`')?;
    let end = inner.find('`')?;
    (end > 0).then(|| &inner[..end])
}

/// Parses the numbered lines of a `<search>` block. Lines without a leading
/// ordinal are dropped.
pub fn parse_results(body: &str) -> Vec<SearchResult> {
    body.lines()
        .filter(|line| !line.trim().is_empty())
        .filter_map(|line| {
            let (index, rest) = ordinal(line)?;
            let (title, url) = markdown_link(rest)
                .or_else(|| backtick_url(rest).map(|url| (url, url)))
                .unwrap_or((rest, rest));
            Some(SearchResult {
                index,
                title: title.to_string(),
                url: url.to_string(),
            })
        })
        .collect()
}

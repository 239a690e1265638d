//! `<!-- type: web_analysis url:<U> web_title:<T> -->` documents.

use std::fmt::Write as _;

const WEB_ANALYSIS_STYLES: &str = "\
*{box-sizing:border-box}\
body{margin:0;padding:24px;font-family:-apple-system,BlinkMacSystemFont,'Segoe UI',Roboto,sans-serif;line-height:1.65;color:#1f2328;background:#fff}\
.wa-meta{font-size:12px;color:#656d76;margin-bottom:16px;word-break:break-all}\
.wa-meta a{color:inherit}\
.wa-content{max-width:860px;margin:0 auto}\
.wa-content img{max-width:100%;height:auto}\
.wa-content p{margin:0 0 12px}\
@media (prefers-color-scheme:dark){body{color:#e6edf3;background:#0d1117}.wa-meta{color:#8d96a0}}";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WebAnalysis {
    pub url: String,
    pub title: String,
    /// Block text with the header comment removed.
    pub body: String,
    /// Standalone HTML document wrapping `body`.
    pub document: String,
}

impl WebAnalysis {
    /// The analysed page, when it can be opened in a new tab.
    pub fn external_url(&self) -> Option<&str> {
        let url = self.url.as_str();
        (url.starts_with("http://") || url.starts_with("https://")).then_some(url)
    }
}

pub(crate) fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// `(url, title)` from the text between `<!--` and `-->`.
fn parse_header(comment: &str) -> Option<(String, String)> {
    let rest = comment.trim().strip_prefix("type:")?.trim_start();
    let rest = rest.strip_prefix("web_analysis")?;
    if !rest.starts_with(char::is_whitespace) {
        return None;
    }
    let rest = rest.trim_start().strip_prefix("url:")?.trim_start();

    let (url, rest) = if rest.starts_with("web_title:") {
        ("", rest)
    } else {
        let end = rest.find(char::is_whitespace)?;
        (&rest[..end], rest[end..].trim_start())
    };
    let title = rest.strip_prefix("web_title:")?.trim();

    Some((url.to_string(), title.to_string()))
}

/// Location of the first well-formed header comment, with its values.
fn find_header(code: &str) -> Option<(std::ops::Range<usize>, String, String)> {
    code.match_indices("<!--").find_map(|(start, _)| {
        let inner_start = start + 4;
        let inner_len = code[inner_start..].find("-->")?;
        let (url, title) = parse_header(&code[inner_start..inner_start + inner_len])?;
        Some((start..inner_start + inner_len + 3, url, title))
    })
}

fn has_html_tags(body: &str) -> bool {
    body.match_indices('<').any(|(at, _)| {
        let after = &body[at + 1..];
        after
            .chars()
            .next()
            .is_some_and(|c| c.is_ascii_alphabetic() || c == '/' || c == '!')
            && after.contains('>')
    })
}

fn paragraphs(text: &str) -> String {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| format!("<p>{}</p>", escape_html(line)))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn render_document(url: &str, title: &str, body: &str) -> String {
    let content = if has_html_tags(body) {
        body.to_string()
    } else {
        paragraphs(body)
    };

    let mut html = String::new();
    let _ = write!(
        html,
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="UTF-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{title}</title>
<style>{styles}</style>
</head>
<body>
<div class="wa-meta">Source: <a href="{url}" target="_blank" rel="noopener noreferrer">{url}</a></div>
<div class="wa-content">
{content}
</div>
</body>
</html>
"#,
        title = escape_html(title),
        styles = WEB_ANALYSIS_STYLES,
        url = escape_html(url),
    );
    html
}

/// Recognises a web-analysis block by its header comment.
pub fn parse(code: &str) -> Option<WebAnalysis> {
    let (range, url, title) = find_header(code)?;
    let body = format!("{}{}", &code[..range.start], &code[range.end..])
        .trim()
        .to_string();
    let document = render_document(&url, &title, &body);

    Some(WebAnalysis {
        url,
        title,
        body,
        document,
    })
}

use reqwest::Url;

/// Extracts a conversation id from a share link, or takes the input as an
/// id when it does not look like a link.
pub fn resolve_conversation_id(input: &str) -> Option<String> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return None;
    }

    let candidate = if trimmed.contains("://") {
        trimmed.to_string()
    } else if trimmed.contains('.') || trimmed.contains('/') {
        format!("https://{trimmed}")
    } else {
        return Some(trimmed.to_string());
    };

    match Url::parse(&candidate) {
        Ok(url) => url
            .path_segments()?
            .filter(|segment| !segment.is_empty())
            .last()
            .map(str::to_string),
        Err(_) => Some(trimmed.to_string()),
    }
}

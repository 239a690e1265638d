#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    YouTube,
    Image,
    Video,
    Pdf,
    File,
}

impl FileKind {
    pub fn label(self) -> &'static str {
        match self {
            FileKind::YouTube => "YouTube",
            FileKind::Image => "Image",
            FileKind::Video => "Video",
            FileKind::Pdf => "PDF",
            FileKind::File => "File",
        }
    }
}

const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif", "webp", "svg", "bmp"];
const VIDEO_EXTENSIONS: &[&str] = &["mp4", "webm", "ogg", "mov", "avi", "wmv"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileUrl {
    pub url: String,
    pub kind: FileKind,
}

/// Strips whitespace and wrapping backticks.
pub fn clean_url(raw: &str) -> &str {
    let trimmed = raw.trim();
    let trimmed = trimmed.strip_prefix('`').unwrap_or(trimmed);
    let trimmed = trimmed.strip_suffix('`').unwrap_or(trimmed);
    trimmed.trim()
}

pub fn classify(raw: &str) -> FileUrl {
    let url = clean_url(raw);
    let lower = url.to_ascii_lowercase();
    let extension = lower.rsplit_once('.').map(|(_, ext)| ext);
    let has_extension = |set: &[&str]| extension.is_some_and(|ext| set.contains(&ext));

    let kind = if lower.contains("youtube.com") || lower.contains("youtu.be") {
        FileKind::YouTube
    } else if has_extension(IMAGE_EXTENSIONS) {
        FileKind::Image
    } else if has_extension(VIDEO_EXTENSIONS) {
        FileKind::Video
    } else if lower.ends_with(".pdf") {
        FileKind::Pdf
    } else {
        FileKind::File
    };

    FileUrl {
        url: url.to_string(),
        kind,
    }
}

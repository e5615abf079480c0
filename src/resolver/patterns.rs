use regex::Regex;
use std::sync::LazyLock;

/// YouTube surface forms: short link, `watch?v=`, `embed/`, `v/`.
static YOUTUBE_PATTERNS: LazyLock<[Regex; 4]> = LazyLock::new(|| {
    [
        compile(r"(?:https?://)?(?:www\.)?youtu\.be/([a-zA-Z0-9_-]+)"),
        compile(r"(?:https?://)?(?:www\.)?youtube\.com/watch\?v=([a-zA-Z0-9_-]+)"),
        compile(r"(?:https?://)?(?:www\.)?youtube\.com/embed/([a-zA-Z0-9_-]+)"),
        compile(r"(?:https?://)?(?:www\.)?youtube\.com/v/([a-zA-Z0-9_-]+)"),
    ]
});

/// Drive surface forms: `file/d/<id>[/view|/preview]`, `open?id=`, `thumbnail?id=`.
static DRIVE_PATTERNS: LazyLock<[Regex; 3]> = LazyLock::new(|| {
    [
        compile(r"(?:https?://)?drive\.google\.com/file/d/([a-zA-Z0-9_-]+)"),
        compile(r"(?:https?://)?drive\.google\.com/open\?id=([a-zA-Z0-9_-]+)"),
        compile(r"(?:https?://)?drive\.google\.com/thumbnail\?id=([a-zA-Z0-9_-]+)"),
    ]
});

// Patterns are literals; a bad one fails the first resolver test.
fn compile(pattern: &str) -> Regex {
    Regex::new(pattern).expect("static media URL pattern must compile")
}

fn first_capture<'u>(patterns: &[Regex], url: &'u str) -> Option<&'u str> {
    patterns
        .iter()
        .find_map(|re| re.captures(url).and_then(|caps| caps.get(1)))
        .map(|m| m.as_str())
}

pub(crate) fn youtube_video_id(url: &str) -> Option<&str> {
    first_capture(YOUTUBE_PATTERNS.as_slice(), url)
}

pub(crate) fn drive_file_id(url: &str) -> Option<&str> {
    first_capture(DRIVE_PATTERNS.as_slice(), url)
}

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use crate::models::{MeetingRecord, Speaker, TranscriptLine, TranscriptSection};

/// Body text written in place of a transcript that was not retained
pub const UNAVAILABLE_SENTINEL: &str = "Transcript not available";

static TITLE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"(?m)^title:\s*"?([^"\n]+)"?"#).expect("Invalid regex"));

static TRANSCRIPT_HEADING_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^## Transcript[ \t]*\r?\n").expect("Invalid regex"));

// [timestamp] (speaker) utterance
static LINE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?m)^\[([^\]]+)\]\s*\((\w+)\)\s*(.+)$").expect("Invalid regex")
});

/// Read a meeting markdown file into its title and transcript section.
///
/// The title comes from the `title:` frontmatter line, falling back to
/// `fallback_title` (usually the file stem).
pub fn parse_meeting_record(content: &str, fallback_title: &str) -> MeetingRecord {
    let title = TITLE_RE
        .captures(content)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().trim().to_string())
        .filter(|t| !t.is_empty())
        .unwrap_or_else(|| fallback_title.to_string());

    MeetingRecord::new(title, transcript_section(content))
}

/// Locate the `## Transcript` section, ending at the next `## ` heading
pub fn transcript_section(content: &str) -> TranscriptSection {
    let Some(heading) = TRANSCRIPT_HEADING_RE.find(content) else {
        return TranscriptSection::Missing;
    };

    let rest = &content[heading.end()..];
    let body = match rest.find("\n## ") {
        Some(end) => &rest[..end],
        None => rest,
    };
    let body = body.trim();

    if body.starts_with(UNAVAILABLE_SENTINEL) {
        TranscriptSection::Unavailable
    } else {
        TranscriptSection::Present(body.to_string())
    }
}

/// Parse transcript text into lines, skipping anything not in line format
pub fn parse_transcript_lines(text: &str) -> Vec<TranscriptLine> {
    let lines: Vec<TranscriptLine> = LINE_RE
        .captures_iter(text)
        .map(|caps| TranscriptLine {
            timestamp: caps[1].to_string(),
            speaker: Speaker::from_label(&caps[2]),
            text: caps[3].trim().to_string(),
        })
        .collect();

    debug!("Parsed {} transcript lines", lines.len());
    lines
}

/// Lines of a meeting's transcript; empty unless the section is present
pub fn meeting_lines(record: &MeetingRecord) -> Vec<TranscriptLine> {
    match &record.transcript {
        TranscriptSection::Present(body) => parse_transcript_lines(body),
        TranscriptSection::Missing | TranscriptSection::Unavailable => Vec::new(),
    }
}

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::NaiveDate;
use serde::Deserialize;
use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::models::{MeetingRecord, MessageBlock};
use crate::stages::parse_meeting_record;

/// Read a meeting markdown file; the file stem is the fallback title
pub fn read_meeting_file(path: &Path) -> Result<MeetingRecord> {
    let content =
        std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {:?}", path))?;
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    Ok(parse_meeting_record(&content, &stem))
}

/// Read every file that still exists; vanished files are skipped
pub fn read_meeting_files(paths: &[PathBuf]) -> Result<Vec<MeetingRecord>> {
    let mut records = Vec::with_capacity(paths.len());
    for path in paths {
        if !path.exists() {
            warn!("Skipping missing meeting file {:?}", path);
            continue;
        }
        records.push(read_meeting_file(path)?);
    }
    Ok(records)
}

/// Meeting files named `<YYYY-MM-DD>-*.md` for `date`, anywhere under `meetings_dir`
pub fn find_meetings_for_date(meetings_dir: &Path, date: NaiveDate) -> Result<Vec<PathBuf>> {
    if !meetings_dir.exists() {
        warn!("Meetings directory {:?} does not exist", meetings_dir);
        return Ok(Vec::new());
    }

    let prefix = format!("{}-", date.format("%Y-%m-%d"));
    let mut found = Vec::new();

    for entry in WalkDir::new(meetings_dir) {
        let entry =
            entry.with_context(|| format!("Failed to scan directory: {:?}", meetings_dir))?;
        if !entry.file_type().is_file() {
            continue;
        }
        let name = entry.file_name().to_string_lossy();
        if name.starts_with(&prefix) && name.ends_with(".md") {
            found.push(entry.into_path());
        }
    }

    found.sort();
    debug!("Found {} meeting files for {}", found.len(), date);
    Ok(found)
}

#[derive(Deserialize)]
#[serde(untagged)]
enum BlocksDocument {
    Bare(Vec<MessageBlock>),
    Message { blocks: Vec<MessageBlock> },
}

/// Parse a block list, either bare or as a message object with `blocks`
pub fn parse_blocks_json(json: &str) -> Result<Vec<MessageBlock>> {
    let document: BlocksDocument =
        serde_json::from_str(json).context("Failed to parse message blocks JSON")?;
    Ok(match document {
        BlocksDocument::Bare(blocks) | BlocksDocument::Message { blocks } => blocks,
    })
}

pub fn read_blocks_file(path: &Path) -> Result<Vec<MessageBlock>> {
    let content =
        std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {:?}", path))?;
    parse_blocks_json(&content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TranscriptSection;

    #[test]
    fn test_read_meeting_file_uses_stem_fallback() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("2026-10-14-design-review.md");
        std::fs::write(&path, "## Transcript\n\n[09:00] (me) I'll share the mockups\n").unwrap();

        let record = read_meeting_file(&path).unwrap();
        assert_eq!(record.title, "2026-10-14-design-review");
        assert!(matches!(record.transcript, TranscriptSection::Present(_)));
    }

    #[test]
    fn test_read_meeting_file_missing() {
        let err = read_meeting_file(Path::new("/nonexistent/meeting.md")).unwrap_err();
        assert!(err.to_string().contains("Failed to read file"));
    }

    #[test]
    fn test_read_meeting_files_skips_vanished() {
        let dir = tempfile::tempdir().unwrap();
        let present = dir.path().join("a.md");
        std::fs::write(&present, "title: \"A\"\n").unwrap();
        let records =
            read_meeting_files(&[present, dir.path().join("gone.md")]).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].title, "A");
    }

    #[test]
    fn test_find_meetings_for_date() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("Clients/Acme");
        std::fs::create_dir_all(&nested).unwrap();
        std::fs::write(nested.join("2026-10-14-acme-sync.md"), "").unwrap();
        std::fs::write(dir.path().join("2026-10-14-standup.md"), "").unwrap();
        std::fs::write(dir.path().join("2026-10-13-standup.md"), "").unwrap();
        std::fs::write(dir.path().join("2026-10-14-notes.txt"), "").unwrap();

        let date = NaiveDate::from_ymd_opt(2026, 10, 14).unwrap();
        let found = find_meetings_for_date(dir.path(), date).unwrap();
        let names: Vec<String> = found
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names.len(), 2);
        assert!(names.contains(&"2026-10-14-acme-sync.md".to_string()));
        assert!(names.contains(&"2026-10-14-standup.md".to_string()));

        let missing = find_meetings_for_date(&dir.path().join("nope"), date).unwrap();
        assert!(missing.is_empty());
    }

    #[test]
    fn test_parse_blocks_json_shapes() {
        let bare = parse_blocks_json(r#"[{"type": "divider"}]"#).unwrap();
        assert_eq!(bare, vec![MessageBlock::divider()]);

        let message =
            parse_blocks_json(r#"{"ts": "1.2", "blocks": [{"type": "divider"}]}"#).unwrap();
        assert_eq!(message, vec![MessageBlock::divider()]);

        assert!(parse_blocks_json("not json").is_err());
    }
}

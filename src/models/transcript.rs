use std::fmt;

use serde::{Deserialize, Serialize};

/// Who spoke a transcript line.
///
/// The label is taken from the `(<label>)` column of the transcript. `me` is
/// the local microphone, `them` the remote side; anything else is kept as-is
/// so it renders back exactly as it was read.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", from = "String")]
pub enum Speaker {
    SelfSpeaker,
    Counterpart,
    Other(String),
}

impl Speaker {
    pub fn from_label(label: &str) -> Self {
        match label {
            "me" => Speaker::SelfSpeaker,
            "them" => Speaker::Counterpart,
            other => Speaker::Other(other.to_string()),
        }
    }

    /// The label used when tagging an item, e.g. `me` in `(me) ...`
    pub fn label(&self) -> &str {
        match self {
            Speaker::SelfSpeaker => "me",
            Speaker::Counterpart => "them",
            Speaker::Other(label) => label,
        }
    }
}

impl fmt::Display for Speaker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl From<String> for Speaker {
    fn from(label: String) -> Self {
        Speaker::from_label(&label)
    }
}

impl From<Speaker> for String {
    fn from(speaker: Speaker) -> Self {
        speaker.label().to_string()
    }
}

/// A single `[timestamp] (speaker) utterance` line
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranscriptLine {
    /// Timestamp exactly as written in the transcript
    pub timestamp: String,
    pub speaker: Speaker,
    /// Trimmed utterance text
    pub text: String,
}

/// State of the `## Transcript` section of a meeting file
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TranscriptSection {
    /// The file has no transcript heading at all
    Missing,
    /// The transcript was not retained upstream
    Unavailable,
    /// Raw transcript body
    Present(String),
}

/// A meeting as read from the vault: a title and its transcript section
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MeetingRecord {
    pub title: String,
    pub transcript: TranscriptSection,
}

impl MeetingRecord {
    pub fn new(title: impl Into<String>, transcript: TranscriptSection) -> Self {
        Self {
            title: title.into(),
            transcript,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_speaker_labels_round_trip() {
        assert_eq!(Speaker::from_label("me"), Speaker::SelfSpeaker);
        assert_eq!(Speaker::from_label("them"), Speaker::Counterpart);
        assert_eq!(
            Speaker::from_label("speaker2"),
            Speaker::Other("speaker2".to_string())
        );
        assert_eq!(Speaker::Other("speaker2".to_string()).label(), "speaker2");
        assert_eq!(Speaker::SelfSpeaker.to_string(), "me");
    }

    #[test]
    fn test_speaker_serializes_as_label() {
        let json = serde_json::to_string(&Speaker::Counterpart).unwrap();
        assert_eq!(json, "\"them\"");
        let back: Speaker = serde_json::from_str("\"me\"").unwrap();
        assert_eq!(back, Speaker::SelfSpeaker);
    }
}

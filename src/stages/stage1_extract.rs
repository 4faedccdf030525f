use std::collections::HashSet;

use tracing::{debug, info};

use crate::heuristics::CommitmentClassifier;
use crate::models::{ActionItem, MeetingActionGroup, MeetingRecord, TranscriptLine};

use super::stage0_parse::meeting_lines;

/// Configuration for context aggregation and deduplication
#[derive(Debug, Clone)]
pub struct ExtractionConfig {
    /// Following utterances pulled in as context after a commitment
    pub context_lookahead: usize,
    /// Combined text longer than this is cut and suffixed with `...`
    pub max_item_chars: usize,
    /// Leading characters (lowercased) that identify an item for dedup
    pub dedup_key_chars: usize,
    /// Items must be longer than this to be kept
    pub min_item_chars: usize,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            context_lookahead: 2,
            max_item_chars: 200,
            dedup_key_chars: 60,
            min_item_chars: 10,
        }
    }
}

/// Turns meeting transcripts into attributed action items
#[derive(Debug, Clone, Default)]
pub struct ActionItemExtractor {
    classifier: CommitmentClassifier,
    config: ExtractionConfig,
}

impl ActionItemExtractor {
    pub fn new(classifier: CommitmentClassifier, config: ExtractionConfig) -> Self {
        Self { classifier, config }
    }

    pub fn classifier(&self) -> &CommitmentClassifier {
        &self.classifier
    }

    /// Action items of one meeting, in transcript order.
    ///
    /// Dedup keys are scoped to this call, so the same commitment repeated
    /// in two meetings shows up in both.
    pub fn extract_items(&self, record: &MeetingRecord) -> Vec<ActionItem> {
        let lines = meeting_lines(record);
        let mut seen = HashSet::new();
        let mut items = Vec::new();

        for (idx, line) in lines.iter().enumerate() {
            let verdict = self.classifier.classify(&line.text);
            if !verdict.is_actionable() {
                continue;
            }
            debug!("Line {} actionable: {:?}", idx, verdict);
            if let Some(item) = self.aggregate_context(&lines, idx, &mut seen) {
                items.push(item);
            }
        }

        items
    }

    /// Group for one meeting; the group may be empty
    pub fn extract_meeting(&self, record: &MeetingRecord) -> MeetingActionGroup {
        MeetingActionGroup::new(record.title.clone(), self.extract_items(record))
    }

    /// Groups for every meeting that yielded at least one item
    pub fn extract_all<'a, I>(&self, records: I) -> Vec<MeetingActionGroup>
    where
        I: IntoIterator<Item = &'a MeetingRecord>,
    {
        let groups: Vec<MeetingActionGroup> = records
            .into_iter()
            .map(|record| self.extract_meeting(record))
            .filter(|group| !group.is_empty())
            .collect();

        info!(
            "Extracted {} action items from {} meetings",
            crate::models::total_items(&groups),
            groups.len()
        );
        groups
    }

    /// Build the item for the commitment at `idx`, or `None` if it is too
    /// short or its dedup key was already seen.
    pub fn aggregate_context(
        &self,
        lines: &[TranscriptLine],
        idx: usize,
        seen: &mut HashSet<String>,
    ) -> Option<ActionItem> {
        let line = lines.get(idx)?;

        let mut parts = vec![line.text.as_str()];
        for next in lines.iter().skip(idx + 1).take(self.config.context_lookahead) {
            if self.classifier.is_filler(&next.text) {
                break;
            }
            parts.push(next.text.as_str());
        }

        let combined = truncate_chars(&collapse_whitespace(&parts.join(" ")), self.config.max_item_chars);
        let key = dedup_key(&combined, self.config.dedup_key_chars);

        if combined.chars().count() <= self.config.min_item_chars || seen.contains(&key) {
            return None;
        }
        seen.insert(key);
        Some(ActionItem::new(line.speaker.clone(), combined))
    }
}

/// Collapse runs of whitespace to one space and trim
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Cut to `max_chars` characters, marking the cut with `...`
pub fn truncate_chars(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => format!("{}...", &text[..byte_idx]),
        None => text.to_string(),
    }
}

/// Lowercased leading characters used to collapse near-duplicate items
pub fn dedup_key(text: &str, key_chars: usize) -> String {
    text.chars().take(key_chars).collect::<String>().to_lowercase()
}

pub mod checklist;
pub mod config;
pub mod heuristics;
pub mod io;
pub mod models;
pub mod slack;
pub mod stages;

pub use checklist::{ChecklistState, ReduceOutcome, reduce, reduce_values};
pub use config::AppConfig;
pub use heuristics::{CommitmentClassifier, Verdict};
pub use io::{ExtractionReport, HumanActionList, read_meeting_file};
pub use models::{
    ActionItem, CheckedSet, MeetingActionGroup, MeetingRecord, MessageBlock, OptionValue,
    TranscriptLine,
};
pub use slack::{BlockActionsPayload, BotContext, SlackClient, SlackError};
pub use stages::{
    ActionItemExtractor, AttributionConfig, ExtractionConfig, OwnerMatcher, Partition,
    RenderedChecklist, parse_transcript_lines, partition_by_owner, render_checklist,
    render_summary,
};

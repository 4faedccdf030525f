use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use serde::Serialize;

use crate::models::{MeetingActionGroup, total_items};
use crate::stages::Partition;

/// Machine-readable extraction report
#[derive(Debug, Clone, Serialize)]
pub struct ExtractionReport {
    pub date: NaiveDate,
    pub owner: Vec<MeetingActionGroup>,
    pub other: Vec<MeetingActionGroup>,
    pub metadata: ExtractionMetadata,
}

#[derive(Debug, Clone, Serialize)]
pub struct ExtractionMetadata {
    pub meetings_read: usize,
    pub meetings_with_items: usize,
    pub total_items: usize,
}

impl ExtractionReport {
    pub fn new(date: NaiveDate, partition: &Partition, meetings_read: usize) -> Self {
        let total = total_items(&partition.owner) + total_items(&partition.other);
        Self {
            date,
            owner: partition.owner.clone(),
            other: partition.other.clone(),
            metadata: ExtractionMetadata {
                meetings_read,
                meetings_with_items: partition.meetings,
                total_items: total,
            },
        }
    }
}

/// Write any serializable value as pretty JSON
pub fn write_json<T: Serialize + ?Sized>(value: &T, path: &Path) -> Result<()> {
    let file = std::fs::File::create(path)
        .with_context(|| format!("Failed to create file: {:?}", path))?;
    serde_json::to_writer_pretty(file, value).context("Failed to write JSON")?;
    Ok(())
}

pub fn to_json_string<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    serde_json::to_string_pretty(value).context("Failed to serialize JSON")
}

/// Plain-text rendering of a partition for the terminal
pub struct HumanActionList<'a> {
    partition: &'a Partition,
}

impl<'a> HumanActionList<'a> {
    pub fn new(partition: &'a Partition) -> Self {
        Self { partition }
    }

    pub fn format(&self) -> String {
        if self.partition.is_empty() {
            return "No action items found.\n".to_string();
        }

        let mut output = String::new();
        write_section(&mut output, "Your action items", &self.partition.owner);
        write_section(&mut output, "Other action items", &self.partition.other);
        output
    }

    pub fn write_file(&self, path: &Path) -> Result<()> {
        let mut file = std::fs::File::create(path)
            .with_context(|| format!("Failed to create file: {:?}", path))?;
        write!(file, "{}", self.format())?;
        Ok(())
    }
}

fn write_section(output: &mut String, heading: &str, groups: &[MeetingActionGroup]) {
    if groups.is_empty() {
        return;
    }
    output.push_str(&format!("{} ({}):\n", heading, total_items(groups)));
    for group in groups {
        output.push_str(&format!("  {}\n", group.title));
        for item in &group.items {
            output.push_str(&format!("    [ ] {}\n", item.display()));
        }
    }
    output.push('\n');
}

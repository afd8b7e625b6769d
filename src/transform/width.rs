//! Width files: one saw cut list per board thickness.

use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::Path;

use crate::config::{FILE_NAME_NOISE, JOB_DIR_NOISE, TIGER_EXTENSION, UNKNOWN_JOB};
use crate::model::CutListRecord;

/// Line items sharing one thickness, written to a single saw cut list.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WidthFile {
    /// Output file name, e.g. `Kitchen[1.5in].tiger`.
    pub file_name: String,
    /// Board thickness shared by every record.
    pub width: Decimal,
    /// Line items ordered by first room/cabinet, then length.
    pub records: Vec<CutListRecord>,
}

impl WidthFile {
    /// Total quantity of all line items.
    pub fn total_quantity(&self) -> u64 {
        self.records
            .iter()
            .map(|r| r.declared_quantity())
            .sum()
    }

    /// Output file name without its extension.
    pub fn stem(&self) -> &str {
        self.file_name
            .strip_suffix(TIGER_EXTENSION)
            .and_then(|s| s.strip_suffix('.'))
            .unwrap_or(&self.file_name)
    }
}

/// Group line items by thickness, ascending.
pub fn into_width_files(source: &Path, records: Vec<CutListRecord>) -> Vec<WidthFile> {
    let job = job_name(source);

    let mut by_width: BTreeMap<Decimal, Vec<CutListRecord>> = BTreeMap::new();
    for record in records {
        by_width.entry(record.thickness()).or_default().push(record);
    }

    by_width
        .into_iter()
        .map(|(width, mut records)| {
            records.sort_by(|a, b| {
                a.first_location()
                    .cmp(&b.first_location())
                    .then(a.length().cmp(&b.length()))
            });
            WidthFile {
                file_name: format!("{}[{}in].{}", job, width.normalize(), TIGER_EXTENSION),
                width,
                records,
            }
        })
        .collect()
}

/// Build a job name from an export path.
///
/// The file stem is used with known noise words removed, prefixed by the job
/// guessed from the parent directory. Falls back to [`UNKNOWN_JOB`].
pub fn job_name(source: &Path) -> String {
    let stem = source
        .file_stem()
        .and_then(|s| s.to_str())
        .map(|s| strip_words(s, FILE_NAME_NOISE))
        .unwrap_or_default();
    let stem = stem.trim();

    let dir_job = source
        .parent()
        .and_then(|p| p.file_name())
        .and_then(|s| s.to_str())
        .map(|s| title_case(strip_words(&s.to_lowercase(), JOB_DIR_NOISE).trim()))
        .unwrap_or_default();

    match (dir_job.is_empty(), stem.is_empty()) {
        (false, false) => format!("{} {}", dir_job, stem),
        (false, true) => dir_job,
        (true, false) => stem.to_string(),
        (true, true) => {
            tracing::debug!("No usable job name for {}", source.display());
            UNKNOWN_JOB.to_string()
        }
    }
}

fn strip_words(s: &str, words: &[&str]) -> String {
    words
        .iter()
        .fold(s.to_string(), |acc, word| acc.replace(word, ""))
}

fn title_case(s: &str) -> String {
    s.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

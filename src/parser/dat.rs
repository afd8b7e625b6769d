//! Cut-list export (`.dat`) reader and batch row parser.

use csv::{ReaderBuilder, Trim};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

use super::record::{parse_row, COL_EXPRESSION};
use crate::config::{ConvertConfig, DAT_EXTENSION};
use crate::error::{ConvertError, RecordError, Result};
use crate::model::CutListRecord;
use crate::validation::{reconcile, Diagnostic, DiagnosticSink};

/// One raw row of an export file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DatRow {
    /// 1-based line number in the source file.
    pub line: usize,
    pub fields: Vec<String>,
}

impl DatRow {
    /// The occurrence expression column, empty if the row is too short.
    pub fn expression(&self) -> &str {
        self.fields
            .get(COL_EXPRESSION)
            .map(String::as_str)
            .unwrap_or("")
    }
}

/// A row that passed the record parser.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParsedRecord {
    pub line: usize,
    /// Occurrence expression as written in the source.
    pub expression: String,
    pub record: CutListRecord,
}

/// A row that was rejected, kept so the caller can report it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RejectedRow {
    pub line: usize,
    pub fields: Vec<String>,
    #[serde(serialize_with = "serialize_error")]
    pub error: RecordError,
}

impl RejectedRow {
    /// Convert into a top-level error carrying the line number.
    pub fn into_error(self) -> ConvertError {
        ConvertError::Record {
            line: self.line,
            source: self.error,
        }
    }
}

fn serialize_error<S: serde::Serializer>(
    error: &RecordError,
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    serializer.collect_str(error)
}

/// Result of parsing every row of one source.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ParsedBatch {
    /// Source name used in diagnostics.
    pub source: String,
    pub records: Vec<ParsedRecord>,
    pub rejected: Vec<RejectedRow>,
    /// Number of accepted records whose declared quantity was wrong.
    pub mismatches: usize,
}

impl ParsedBatch {
    /// Check if every row was accepted.
    pub fn is_clean(&self) -> bool {
        self.rejected.is_empty()
    }

    /// Total counted quantity of the accepted records.
    pub fn counted_quantity(&self) -> u64 {
        self.records
            .iter()
            .map(|r| r.record.counted_quantity())
            .sum()
    }

    /// Accepted records, without their source information.
    pub fn cut_list(&self) -> impl Iterator<Item = &CutListRecord> {
        self.records.iter().map(|r| &r.record)
    }
}

/// Read the rows of an export file.
pub fn read_dat_file(path: &Path) -> Result<Vec<DatRow>> {
    if !path.exists() {
        return Err(ConvertError::FileNotFound {
            path: path.to_path_buf(),
        });
    }

    let content = fs::read_to_string(path)?;
    if content.trim().is_empty() {
        return Err(ConvertError::EmptyFile {
            path: path.to_path_buf(),
        });
    }

    read_dat_str(&content)
}

/// Read rows from export content. Rows of any width are returned; column
/// counts are checked per row by the record parser.
pub fn read_dat_str(content: &str) -> Result<Vec<DatRow>> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(content.as_bytes());

    let mut rows = Vec::new();
    for (index, result) in reader.records().enumerate() {
        let record = result?;
        let line = record
            .position()
            .map(|p| p.line() as usize)
            .unwrap_or(index + 1);
        let fields: Vec<String> = record.iter().map(str::to_string).collect();
        if fields.iter().all(|f| f.is_empty()) {
            continue;
        }
        rows.push(DatRow { line, fields });
    }

    Ok(rows)
}

/// Parse and reconcile every row.
///
/// Rejected rows and quantity mismatches are reported to `sink`; neither stops
/// the batch.
pub fn parse_rows(
    source: &str,
    rows: &[DatRow],
    config: &ConvertConfig,
    sink: &mut dyn DiagnosticSink,
) -> ParsedBatch {
    let mut batch = ParsedBatch {
        source: source.to_string(),
        ..Default::default()
    };

    for row in rows {
        let context = format!("{}:{}", source, row.line);
        match parse_row(row.fields.as_slice(), config.use_extra_data) {
            Ok(record) => {
                let result = reconcile(&record);
                if !result.matches {
                    sink.emit(Diagnostic::quantity_mismatch(
                        &result,
                        row.expression(),
                        &context,
                    ));
                    batch.mismatches += 1;
                }
                tracing::debug!("Parsed {}: {}", context, record.expression());
                batch.records.push(ParsedRecord {
                    line: row.line,
                    expression: row.expression().to_string(),
                    record,
                });
            }
            Err(error) => {
                sink.emit(Diagnostic::rejected(&error, row.expression(), &context));
                batch.rejected.push(RejectedRow {
                    line: row.line,
                    fields: row.fields.clone(),
                    error,
                });
            }
        }
    }

    batch
}

/// Check if a path has the export extension.
pub fn is_dat_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case(DAT_EXTENSION))
}

/// Rules for skipping inputs while collecting export files.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputFilter {
    /// Directories skipped with everything below them.
    ignore_dirs: Vec<PathBuf>,
    /// Paths containing any of these strings are skipped.
    ignore_text: Vec<String>,
}

impl InputFilter {
    /// Create a filter that skips nothing.
    pub fn new() -> Self {
        Self::default()
    }

    /// Skip these directories. Existing directories are matched by their
    /// canonical path, so relative and absolute spellings both apply.
    pub fn with_ignored_dirs<I>(mut self, dirs: I) -> Self
    where
        I: IntoIterator<Item = PathBuf>,
    {
        self.ignore_dirs.extend(
            dirs.into_iter()
                .map(|dir| fs::canonicalize(&dir).unwrap_or(dir)),
        );
        self
    }

    /// Skip any path whose full text contains one of these strings.
    pub fn with_ignored_text<I>(mut self, text: I) -> Self
    where
        I: IntoIterator<Item = String>,
    {
        self.ignore_text
            .extend(text.into_iter().filter(|t| !t.is_empty()));
        self
    }

    /// Check if a path is skipped by this filter.
    pub fn is_ignored(&self, path: &Path) -> bool {
        let full = fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf());

        let in_dir = self
            .ignore_dirs
            .iter()
            .any(|ignored| path.starts_with(ignored) || full.starts_with(ignored));
        if in_dir {
            return true;
        }

        let text = full.to_string_lossy();
        self.ignore_text.iter().any(|t| text.contains(t.as_str()))
    }
}

/// Expand input paths into export files.
///
/// Directories are searched recursively, skipping paths the filter ignores and
/// files without the export extension. Files named explicitly must have it.
pub fn collect_dat_files(inputs: &[PathBuf], filter: &InputFilter) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for input in inputs {
        if !input.exists() {
            return Err(ConvertError::FileNotFound {
                path: input.clone(),
            });
        }
        if filter.is_ignored(input) {
            tracing::debug!("Ignoring: {}", input.display());
        } else if input.is_dir() {
            collect_dir(input, filter, &mut files)?;
        } else if is_dat_file(input) {
            files.push(input.clone());
        } else {
            return Err(ConvertError::InvalidExtension {
                path: input.clone(),
            });
        }
    }

    Ok(files)
}

fn collect_dir(dir: &Path, filter: &InputFilter, files: &mut Vec<PathBuf>) -> Result<()> {
    let mut entries: Vec<PathBuf> = fs::read_dir(dir)?
        .map(|entry| entry.map(|e| e.path()))
        .collect::<std::io::Result<_>>()?;
    entries.sort();

    for path in entries {
        if filter.is_ignored(&path) {
            tracing::debug!("Ignoring: {}", path.display());
        } else if path.is_dir() {
            collect_dir(&path, filter, files)?;
        } else if is_dat_file(&path) {
            tracing::debug!("Found export file: {}", path.display());
            files.push(path);
        }
    }

    Ok(())
}

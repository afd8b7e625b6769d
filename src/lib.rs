//! cutlist-convert-rs - Cut-list conversion for cabinet shop length-stop saws.
//!
//! This library parses cut-list exports from cabinet design software, checks
//! each row's declared quantity against its room/cabinet occurrence
//! expression, splits long line items for the saw display, and writes one
//! saw cut list per board thickness.
//!
//! # Example
//!
//! ```no_run
//! use cutlist_convert_rs::{convert_dat_file, generate_tiger, ConvertConfig, TigerSettings, TracingSink};
//! use std::path::Path;
//!
//! let config = ConvertConfig::default();
//! let conversion = convert_dat_file(Path::new("Kitchen.dat"), &config, &mut TracingSink).unwrap();
//! for width_file in &conversion.width_files {
//!     let xml = generate_tiger(width_file, &TigerSettings::default(), config.use_extra_data).unwrap();
//!     println!("{}", xml);
//! }
//! ```

pub mod config;
pub mod error;
pub mod generator;
pub mod model;
pub mod parser;
pub mod transform;
pub mod validation;

// Re-exports for convenience
pub use config::{ConvertConfig, SawUnit, TigerSettings};
pub use error::{ConvertError, GrammarError, RecordError, Result, SplitError};
pub use generator::{generate_master_csv, generate_tiger};
pub use model::{CutListRecord, Occurrence, TreeKey, TreeNode};
pub use parser::{parse_occurrences, parse_row, parse_rows, read_dat_file, ParsedBatch};
pub use transform::{build_tree, combine, into_width_files, line_items, split, WidthFile};
pub use validation::{reconcile, Diagnostic, DiagnosticKind, DiagnosticSink, TracingSink};

use serde::Serialize;
use std::path::Path;

/// Result of converting one export file.
#[derive(Debug, Clone, Serialize)]
pub struct Conversion {
    /// Parsed rows, including rejections.
    pub batch: ParsedBatch,
    /// Saw line items grouped by thickness.
    pub width_files: Vec<WidthFile>,
}

impl Conversion {
    /// Total quantity written across all width files.
    pub fn total_quantity(&self) -> u64 {
        self.width_files.iter().map(WidthFile::total_quantity).sum()
    }
}

/// Convert an export file into width files.
///
/// This is the main high-level function that performs the full conversion pipeline:
/// 1. Read and parse the export rows
/// 2. Reconcile quantities, reporting problems to `sink`
/// 3. Expand records into saw line items
/// 4. Group line items by thickness
///
/// Rejected rows are returned in the batch rather than failing the
/// conversion. An invalid split threshold fails before any row is read.
pub fn convert_dat_file(
    input_path: &Path,
    config: &ConvertConfig,
    sink: &mut dyn DiagnosticSink,
) -> Result<Conversion> {
    if config.split_enabled && config.max_occurrences_per_line < 1 {
        return Err(SplitError::InvalidThreshold {
            value: config.max_occurrences_per_line,
        }
        .into());
    }

    let rows = parser::read_dat_file(input_path)?;
    let source = input_path
        .file_name()
        .and_then(|s| s.to_str())
        .unwrap_or("input.dat");
    let batch = parse_rows(source, &rows, config, sink);

    let mut items = Vec::new();
    for parsed in &batch.records {
        items.extend(line_items(&parsed.record, config)?);
    }

    let width_files = into_width_files(input_path, items);
    let conversion = Conversion { batch, width_files };

    let counted = conversion.batch.counted_quantity();
    let written = conversion.total_quantity();
    if counted != written {
        tracing::error!(
            "Quantity drift in {}: counted {}, width files hold {}",
            source,
            counted,
            written
        );
    }

    Ok(conversion)
}

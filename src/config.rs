//! Configuration constants and settings for the converter.

use serde::Serialize;

/// Default maximum number of occurrences rendered on one saw line item.
pub const DEFAULT_MAX_OCCURRENCES_PER_LINE: usize = 8;

/// Extension of cut-list exports produced by the CAD tool.
pub const DAT_EXTENSION: &str = "dat";

/// Extension of cut lists consumed by the saw.
pub const TIGER_EXTENSION: &str = "tiger";

/// Number of columns in a cut-list export row (including the note column).
pub const DAT_COLUMNS: usize = 6;

/// Number of columns in a cut-list export row without the note column.
pub const DAT_COLUMNS_NO_NOTE: usize = 5;

/// Default output directory for generated cut lists.
pub const DEFAULT_OUTPUT_DIR: &str = "./cutlist_output";

/// Job name used when neither the file name nor its directory gives one.
pub const UNKNOWN_JOB: &str = "Unknown Job";

/// Words stripped from directory names when guessing a job name.
pub const JOB_DIR_NOISE: &[&str] = &["cutlists", "tigerstop"];

/// Words stripped from export file names when building output names.
pub const FILE_NAME_NOISE: &[&str] = &["(Face Frames)", "3-4 Maple Board"];

/// Conversion settings threaded into every core call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ConvertConfig {
    /// Split threshold: maximum occurrences per output line item.
    pub max_occurrences_per_line: usize,
    /// When false, records are only normalized, never split.
    pub split_enabled: bool,
    /// Whether the note column is parsed and propagated.
    pub use_extra_data: bool,
}

impl Default for ConvertConfig {
    fn default() -> Self {
        Self {
            max_occurrences_per_line: DEFAULT_MAX_OCCURRENCES_PER_LINE,
            split_enabled: true,
            use_extra_data: false,
        }
    }
}

impl ConvertConfig {
    /// Create a configuration with the given split threshold.
    pub fn new(max_occurrences_per_line: usize) -> Self {
        Self {
            max_occurrences_per_line,
            ..Default::default()
        }
    }

    /// Enable or disable line splitting.
    pub fn with_split(mut self, enabled: bool) -> Self {
        self.split_enabled = enabled;
        self
    }

    /// Enable or disable the note column.
    pub fn with_extra_data(mut self, enabled: bool) -> Self {
        self.use_extra_data = enabled;
        self
    }
}

/// Measurement unit announced to the saw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum SawUnit {
    #[default]
    English,
    Metric,
}

impl std::fmt::Display for SawUnit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SawUnit::English => write!(f, "English"),
            SawUnit::Metric => write!(f, "Metric"),
        }
    }
}

/// Settings block written at the top of every saw cut list.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TigerSettings {
    pub style: String,
    pub unit: SawUnit,
    pub is_optimized: bool,
    pub head_cut: String,
    pub tail_cut: String,
    pub pattern_stock_length: String,
    pub sequence_number: u32,
    /// Empty sort strings are written as an empty element.
    pub sort_string: Option<String>,
    pub send_file_name: bool,
    pub quantity_multiples: bool,
    pub is_infinite: bool,
    pub is_cascade: bool,
    /// Font size for every label column.
    pub label_font_size: u32,
    /// Vertical distance between label columns.
    pub label_spacing: u32,
}

impl Default for TigerSettings {
    fn default() -> Self {
        Self {
            style: "Setpoint".to_string(),
            unit: SawUnit::English,
            is_optimized: true,
            head_cut: "0".to_string(),
            tail_cut: "0".to_string(),
            pattern_stock_length: "0".to_string(),
            sequence_number: 1,
            sort_string: None,
            send_file_name: true,
            quantity_multiples: false,
            is_infinite: false,
            is_cascade: false,
            label_font_size: 12,
            label_spacing: 20,
        }
    }
}

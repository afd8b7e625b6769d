//! Error types for cut-list conversion.

use std::path::PathBuf;
use thiserror::Error;

/// Error codes for cut-list processing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// File not found (-1)
    FileNotFound = -1,
    /// Empty file (-2)
    EmptyFile = -2,
    /// General parse error (-3)
    ParseError = -3,
    /// Unsupported input extension (-4)
    InvalidExtension = -4,
    /// Read or write failure (-5)
    Io = -5,
    /// Malformed occurrence expression (E100)
    Grammar = 100,
    /// Malformed export row (E101)
    Record = 101,
    /// Invalid split threshold (E200)
    InvalidThreshold = 200,
}

/// Malformed occurrence expression.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GrammarError {
    #[error("Empty occurrence expression")]
    Empty,

    #[error("Room group '{group}' is missing its R<room>: prefix")]
    MissingRoomPrefix { group: String },

    #[error("Invalid room number in group '{group}'")]
    InvalidRoom { group: String },

    #[error("Invalid cabinet number '{token}' in group '{group}'")]
    InvalidCabinet { group: String, token: String },

    #[error("Invalid multiplier '{value}' in group '{group}'")]
    InvalidMultiplier { group: String, value: String },

    #[error("Unbalanced parentheses in group '{group}'")]
    UnbalancedParens { group: String },
}

/// Malformed export row.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordError {
    #[error("Invalid column count: expected {expected}, got {got}")]
    FieldCount { expected: String, got: usize },

    #[error("Invalid value for '{field}': expected {expected}, got '{value}'")]
    InvalidNumber {
        field: &'static str,
        expected: &'static str,
        value: String,
    },

    #[error("Missing required field '{field}'")]
    MissingField { field: &'static str },

    #[error("Record has no occurrences")]
    NoOccurrences,

    #[error("Invalid occurrence R{room}:{cabinet}({multiplier}): values must be positive")]
    InvalidOccurrence {
        room: u32,
        cabinet: u32,
        multiplier: u32,
    },

    #[error("Invalid occurrence expression '{expression}': {source}")]
    Grammar {
        expression: String,
        #[source]
        source: GrammarError,
    },
}

/// Invalid split configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SplitError {
    #[error("Invalid split threshold {value}: at least one occurrence per line is required")]
    InvalidThreshold { value: usize },
}

/// Main error type for the converter.
#[derive(Debug, Error)]
pub enum ConvertError {
    #[error("File not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("Empty file: {path}")]
    EmptyFile { path: PathBuf },

    #[error("Invalid extension for cut-list export: {path}")]
    InvalidExtension { path: PathBuf },

    #[error("Parse error at line {line}: {source}")]
    Record {
        line: usize,
        #[source]
        source: RecordError,
    },

    #[error(transparent)]
    Split(#[from] SplitError),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl GrammarError {
    /// Get the error code for this error.
    pub fn code(&self) -> ErrorCode {
        ErrorCode::Grammar
    }
}

impl RecordError {
    /// Get the error code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            RecordError::Grammar { .. } => ErrorCode::Grammar,
            _ => ErrorCode::Record,
        }
    }

    /// The grammar failure behind this error, if any.
    pub fn grammar(&self) -> Option<&GrammarError> {
        match self {
            RecordError::Grammar { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl ConvertError {
    /// Get the error code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            ConvertError::FileNotFound { .. } => ErrorCode::FileNotFound,
            ConvertError::EmptyFile { .. } => ErrorCode::EmptyFile,
            ConvertError::InvalidExtension { .. } => ErrorCode::InvalidExtension,
            ConvertError::Record { source, .. } => source.code(),
            ConvertError::Split(_) => ErrorCode::InvalidThreshold,
            ConvertError::Csv(_) => ErrorCode::ParseError,
            ConvertError::Xml(_) => ErrorCode::Io,
            ConvertError::Io(_) => ErrorCode::Io,
        }
    }

    /// Get the numeric error code value.
    pub fn code_value(&self) -> i32 {
        self.code() as i32
    }
}

/// Result type alias for converter operations.
pub type Result<T> = std::result::Result<T, ConvertError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_error_codes() {
        let err = RecordError::Grammar {
            expression: String::new(),
            source: GrammarError::Empty,
        };
        assert_eq!(err.code(), ErrorCode::Grammar);
        assert_eq!(err.grammar(), Some(&GrammarError::Empty));
        assert_eq!(RecordError::NoOccurrences.code(), ErrorCode::Record);
        assert_eq!(RecordError::NoOccurrences.grammar(), None);
    }

    #[test]
    fn test_convert_error_code_values() {
        let err = ConvertError::from(SplitError::InvalidThreshold { value: 0 });
        assert_eq!(err.code_value(), 200);

        let err = ConvertError::EmptyFile {
            path: PathBuf::from("empty.dat"),
        };
        assert_eq!(err.code_value(), -2);

        let err = ConvertError::from(std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"));
        assert_eq!(err.code(), ErrorCode::Io);
        assert_eq!(err.code_value(), -5);

        let err = ConvertError::Record {
            line: 3,
            source: RecordError::MissingField { field: "material" },
        };
        assert_eq!(err.code_value(), 101);
        assert_eq!(
            err.to_string(),
            "Parse error at line 3: Missing required field 'material'"
        );
    }
}

//! Diagnostic events and the sinks that receive them.
//!
//! The core never logs rejected rows or quantity mismatches on its own: the
//! caller hands a [`DiagnosticSink`] to the batch functions and decides where
//! the events go.

use serde::Serialize;
use std::fmt;

use super::reconcile::ReconciliationResult;
use crate::error::RecordError;

/// What a diagnostic reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DiagnosticKind {
    /// Declared quantity differs from the counted occurrences.
    QuantityMismatch,
    /// The occurrence expression could not be parsed.
    GrammarError,
    /// The row could not be parsed.
    RecordError,
}

impl fmt::Display for DiagnosticKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiagnosticKind::QuantityMismatch => write!(f, "Quantity mismatch"),
            DiagnosticKind::GrammarError => write!(f, "Bad occurrence expression"),
            DiagnosticKind::RecordError => write!(f, "Bad row"),
        }
    }
}

/// A structured event about one input row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    /// Declared quantity, when the row got far enough to have one.
    pub declared: Option<u64>,
    /// Counted quantity, when the occurrences were parsed.
    pub counted: Option<u64>,
    /// The occurrence expression as written in the source row.
    pub expression: String,
    /// Where the row came from, e.g. `kitchen.dat:12`.
    pub record_context: String,
    /// Error message for rejected rows.
    pub detail: Option<String>,
}

impl Diagnostic {
    /// Diagnostic for a reconciled record whose quantities differ.
    pub fn quantity_mismatch(
        result: &ReconciliationResult<'_>,
        expression: impl Into<String>,
        record_context: impl Into<String>,
    ) -> Self {
        Self {
            kind: DiagnosticKind::QuantityMismatch,
            declared: Some(result.declared_quantity()),
            counted: Some(result.counted_quantity),
            expression: expression.into(),
            record_context: record_context.into(),
            detail: None,
        }
    }

    /// Diagnostic for a row rejected by the record parser.
    pub fn rejected(
        error: &RecordError,
        expression: impl Into<String>,
        record_context: impl Into<String>,
    ) -> Self {
        let kind = if error.grammar().is_some() {
            DiagnosticKind::GrammarError
        } else {
            DiagnosticKind::RecordError
        };
        Self {
            kind,
            declared: None,
            counted: None,
            expression: expression.into(),
            record_context: record_context.into(),
            detail: Some(error.to_string()),
        }
    }

    /// Check if this diagnostic reports a rejected row.
    pub fn is_rejection(&self) -> bool {
        self.kind != DiagnosticKind::QuantityMismatch
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at {}", self.kind, self.record_context)?;
        if let (Some(declared), Some(counted)) = (self.declared, self.counted) {
            write!(f, ": declared {}, counted {}", declared, counted)?;
        }
        if let Some(detail) = &self.detail {
            write!(f, ": {}", detail)?;
        }
        write!(f, " [{}]", self.expression)
    }
}

/// Receiver for diagnostics emitted while processing rows.
pub trait DiagnosticSink {
    /// Accept one diagnostic.
    fn emit(&mut self, diagnostic: Diagnostic);
}

/// Collects diagnostics in memory.
impl DiagnosticSink for Vec<Diagnostic> {
    fn emit(&mut self, diagnostic: Diagnostic) {
        self.push(diagnostic);
    }
}

impl<S: DiagnosticSink + ?Sized> DiagnosticSink for &mut S {
    fn emit(&mut self, diagnostic: Diagnostic) {
        (**self).emit(diagnostic);
    }
}

/// Logs diagnostics through `tracing`: mismatches as warnings, rejections as errors.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn emit(&mut self, diagnostic: Diagnostic) {
        if diagnostic.is_rejection() {
            tracing::error!("{}", diagnostic);
        } else {
            tracing::warn!("{}", diagnostic);
        }
    }
}

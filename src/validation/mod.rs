//! Quantity reconciliation and diagnostics.

mod diagnostics;
mod reconcile;

pub use diagnostics::{Diagnostic, DiagnosticKind, DiagnosticSink, TracingSink};
pub use reconcile::{reconcile, ReconciliationResult};

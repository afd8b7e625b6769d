//! Quantity reconciliation: declared quantity against counted occurrences.

use crate::model::CutListRecord;

/// Outcome of comparing a record's declared quantity with its occurrences.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReconciliationResult<'a> {
    /// The reconciled record.
    pub record: &'a CutListRecord,
    /// Sum of occurrence multipliers.
    pub counted_quantity: u64,
    /// Whether the declared quantity equals the counted quantity.
    pub matches: bool,
}

impl ReconciliationResult<'_> {
    /// Quantity stated in the source row.
    pub fn declared_quantity(&self) -> u64 {
        self.record.declared_quantity()
    }

    /// Counted minus declared. Positive when the source under-declared.
    pub fn difference(&self) -> i128 {
        i128::from(self.counted_quantity) - i128::from(self.declared_quantity())
    }
}

/// Reconcile a record. Pure; never fails.
pub fn reconcile(record: &CutListRecord) -> ReconciliationResult<'_> {
    let counted_quantity = record.counted_quantity();
    ReconciliationResult {
        record,
        counted_quantity,
        matches: record.declared_quantity() == counted_quantity,
    }
}

//! Cut-list record - one validated line of a cut list.

use rust_decimal::Decimal;
use serde::Serialize;

use super::occurrence::{counted_quantity, Occurrence, Occurrences};
use crate::error::RecordError;

/// A part to be cut, with the rooms and cabinets it occurs in.
///
/// Records can only be built through [`CutListRecord::new`] (or the record
/// parser), so every record has at least one valid occurrence. Records are
/// never mutated; splitting and combining produce new records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CutListRecord {
    declared_quantity: u64,
    thickness: Decimal,
    length: Decimal,
    material: String,
    occurrences: Vec<Occurrence>,
    note: String,
}

/// Physical attributes that identify the same part across records.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct PartKey {
    pub thickness: Decimal,
    pub length: Decimal,
    pub material: String,
    pub note: String,
}

impl CutListRecord {
    /// Create a record, rejecting empty or invalid occurrence lists.
    pub fn new(
        declared_quantity: u64,
        thickness: Decimal,
        length: Decimal,
        material: impl Into<String>,
        occurrences: Vec<Occurrence>,
        note: impl Into<String>,
    ) -> Result<Self, RecordError> {
        if occurrences.is_empty() {
            return Err(RecordError::NoOccurrences);
        }
        if let Some(bad) = occurrences.iter().find(|o| !o.is_valid()) {
            return Err(RecordError::InvalidOccurrence {
                room: bad.room,
                cabinet: bad.cabinet,
                multiplier: bad.multiplier,
            });
        }
        let material = material.into();
        if material.is_empty() {
            return Err(RecordError::MissingField { field: "material" });
        }
        Ok(Self {
            declared_quantity,
            thickness,
            length,
            material,
            occurrences,
            note: note.into(),
        })
    }

    /// Build a record from the attributes of `template` and a subset of its
    /// occurrences. The declared quantity is the occurrences' counted quantity.
    pub(crate) fn derive(template: &CutListRecord, occurrences: Vec<Occurrence>) -> Self {
        debug_assert!(!occurrences.is_empty());
        Self {
            declared_quantity: counted_quantity(&occurrences),
            thickness: template.thickness,
            length: template.length,
            material: template.material.clone(),
            occurrences,
            note: template.note.clone(),
        }
    }

    /// Quantity stated in the source row. May be wrong.
    pub fn declared_quantity(&self) -> u64 {
        self.declared_quantity
    }

    /// Quantity derived from the occurrence multipliers.
    pub fn counted_quantity(&self) -> u64 {
        counted_quantity(&self.occurrences)
    }

    /// Board thickness (the "width" the saw groups by).
    pub fn thickness(&self) -> Decimal {
        self.thickness
    }

    /// Cut length.
    pub fn length(&self) -> Decimal {
        self.length
    }

    /// Material code.
    pub fn material(&self) -> &str {
        &self.material
    }

    /// Occurrences in parse order.
    pub fn occurrences(&self) -> &[Occurrence] {
        &self.occurrences
    }

    /// Note from the extra-data column, empty when absent.
    pub fn note(&self) -> &str {
        &self.note
    }

    /// Check if this record carries a note.
    pub fn has_note(&self) -> bool {
        !self.note.is_empty()
    }

    /// Occurrences rendered back into expression form.
    pub fn expression(&self) -> String {
        Occurrences(&self.occurrences).to_string()
    }

    /// Grouping key used when combining records.
    pub fn key(&self) -> PartKey {
        PartKey {
            thickness: self.thickness,
            length: self.length,
            material: self.material.clone(),
            note: self.note.clone(),
        }
    }

    /// Copy of this record with the declared quantity replaced by the counted one.
    pub fn normalized(&self) -> Self {
        Self {
            declared_quantity: self.counted_quantity(),
            ..self.clone()
        }
    }

    /// Lowest (room, cabinet) this record occurs in, used for ordering line items.
    pub fn first_location(&self) -> (u32, u32) {
        self.occurrences
            .iter()
            .map(Occurrence::location)
            .min()
            .unwrap_or((0, 0))
    }
}

//! Row parser: the single admission point for cut-list records.

use rust_decimal::Decimal;
use std::str::FromStr;

use super::occurrence::parse_occurrences;
use crate::config::{DAT_COLUMNS, DAT_COLUMNS_NO_NOTE};
use crate::error::RecordError;
use crate::model::CutListRecord;

/// Column index of the declared quantity.
pub const COL_QUANTITY: usize = 0;
/// Column index of the board thickness.
pub const COL_THICKNESS: usize = 1;
/// Column index of the cut length.
pub const COL_LENGTH: usize = 2;
/// Column index of the material code.
pub const COL_MATERIAL: usize = 3;
/// Column index of the occurrence expression.
pub const COL_EXPRESSION: usize = 4;
/// Column index of the optional note.
pub const COL_NOTE: usize = 5;

/// Column counts accepted for a row.
///
/// With extra data the note column is mandatory; without it a trailing note
/// column is tolerated and ignored.
pub fn accepted_columns(use_extra_data: bool) -> &'static [usize] {
    if use_extra_data {
        &[DAT_COLUMNS]
    } else {
        &[DAT_COLUMNS_NO_NOTE, DAT_COLUMNS]
    }
}

/// Parse one export row into a validated record.
///
/// Row layout: `quantity, thickness, length, material, occurrences[, note]`.
pub fn parse_row<S: AsRef<str>>(
    fields: &[S],
    use_extra_data: bool,
) -> Result<CutListRecord, RecordError> {
    let accepted = accepted_columns(use_extra_data);
    if !accepted.contains(&fields.len()) {
        let expected = accepted
            .iter()
            .map(|n| n.to_string())
            .collect::<Vec<_>>()
            .join(" or ");
        return Err(RecordError::FieldCount {
            expected,
            got: fields.len(),
        });
    }

    let field = |index: usize| fields[index].as_ref().trim();

    let quantity = parse_quantity(field(COL_QUANTITY))?;
    let thickness = parse_dimension("thickness", field(COL_THICKNESS))?;
    let length = parse_dimension("length", field(COL_LENGTH))?;

    let material = field(COL_MATERIAL);
    if material.is_empty() {
        return Err(RecordError::MissingField { field: "material" });
    }

    let expression = field(COL_EXPRESSION);
    let occurrences = parse_occurrences(expression).map_err(|source| RecordError::Grammar {
        expression: expression.to_string(),
        source,
    })?;

    let note = if use_extra_data { field(COL_NOTE) } else { "" };

    CutListRecord::new(quantity, thickness, length, material, occurrences, note)
}

fn parse_quantity(value: &str) -> Result<u64, RecordError> {
    let invalid = || RecordError::InvalidNumber {
        field: "quantity",
        expected: "a non-negative integer",
        value: value.to_string(),
    };
    if value.is_empty() || !value.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }
    value.parse().map_err(|_| invalid())
}

fn parse_dimension(field: &'static str, value: &str) -> Result<Decimal, RecordError> {
    match Decimal::from_str(value) {
        Ok(dimension) if dimension > Decimal::ZERO => Ok(dimension),
        _ => Err(RecordError::InvalidNumber {
            field,
            expected: "a positive decimal",
            value: value.to_string(),
        }),
    }
}

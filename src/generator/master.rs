//! Consolidated master cut list in the export row layout.

use csv::{Terminator, WriterBuilder};

use crate::error::Result;
use crate::model::CutListRecord;

/// Write records as export rows: `quantity, thickness, length, material,
/// occurrences[, note]`.
pub fn generate_master_csv<'a, I>(records: I, use_extra_data: bool) -> Result<String>
where
    I: IntoIterator<Item = &'a CutListRecord>,
{
    let mut writer = WriterBuilder::new()
        .has_headers(false)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    for record in records {
        let mut row = vec![
            record.declared_quantity().to_string(),
            record.thickness().normalize().to_string(),
            record.length().normalize().to_string(),
            record.material().to_string(),
            record.expression(),
        ];
        if use_extra_data {
            row.push(record.note().to_string());
        }
        writer.write_record(&row)?;
    }

    let bytes = writer.into_inner().map_err(|e| e.into_error())?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::{parse_row, read_dat_str};
    use crate::transform::combine;

    #[test]
    fn test_master_rows() {
        let records = vec![
            parse_row(&["2", "1.5", "30.0", "RS", "R1:1&2", "Top, left"], true).unwrap(),
            parse_row(&["1", "0.75", "12", "ST", "R2:3(2)", ""], true).unwrap(),
        ];
        let csv = generate_master_csv(&records, true).unwrap();
        assert_eq!(
            csv,
            "2,1.5,30,RS,R1:1&2,\"Top, left\"\n1,0.75,12,ST,R2:3(2),\n"
        );
    }

    #[test]
    fn test_master_without_notes() {
        let records = vec![parse_row(&["1", "2", "42", "BR", "R1:1", "Frame"], true).unwrap()];
        assert_eq!(generate_master_csv(&records, false).unwrap(), "1,2,42,BR,R1:1\n");
    }

    #[test]
    fn test_master_reads_back() {
        let records = vec![
            parse_row(&["3", "1.5", "30", "RS", "R1:1 R2:4(2)", ""], false).unwrap(),
            parse_row(&["1", "1.5", "30", "RS", "R3:1", ""], false).unwrap(),
        ];
        let combined = combine(&records);
        let csv = generate_master_csv(&combined, false).unwrap();

        let rows = read_dat_str(&csv).unwrap();
        assert_eq!(rows.len(), 1);
        let reparsed = parse_row(rows[0].fields.as_slice(), false).unwrap();
        assert_eq!(reparsed, combined[0]);
    }

    #[test]
    fn test_master_empty() {
        assert_eq!(generate_master_csv(&Vec::<CutListRecord>::new(), false).unwrap(), "");
    }
}

//! Part combining: the inverse of line splitting.

use std::collections::hash_map::Entry;
use std::collections::HashMap;

use crate::model::{CutListRecord, Occurrence, PartKey};

/// Merge records describing the same physical part.
///
/// Records are grouped by `(thickness, length, material, note)`. Each group
/// becomes one record whose occurrences are the concatenation of the group's
/// occurrences (duplicates kept) and whose declared quantity is the group's
/// counted total. Groups come out in order of first appearance.
pub fn combine<'a, I>(records: I) -> Vec<CutListRecord>
where
    I: IntoIterator<Item = &'a CutListRecord>,
{
    let mut groups: Vec<(&CutListRecord, Vec<Occurrence>)> = Vec::new();
    let mut index: HashMap<PartKey, usize> = HashMap::new();
    let mut merged = 0usize;

    for record in records {
        match index.entry(record.key()) {
            Entry::Occupied(entry) => {
                groups[*entry.get()].1.extend_from_slice(record.occurrences());
                merged += 1;
            }
            Entry::Vacant(entry) => {
                entry.insert(groups.len());
                groups.push((record, record.occurrences().to_vec()));
            }
        }
    }

    tracing::debug!("Parts combined: {}", merged);

    groups
        .into_iter()
        .map(|(template, occurrences)| CutListRecord::derive(template, occurrences))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_row;
    use crate::transform::split;

    fn row(fields: &[&str]) -> CutListRecord {
        parse_row(fields, true).unwrap()
    }

    #[test]
    fn test_combine_disjoint_occurrences() {
        let a = row(&["2", "1.5", "86.5", "RS", "R1:1&2", ""]);
        let b = row(&["1", "1.5", "86.5", "RS", "R2:4(3)", ""]);
        let combined = combine(&[a.clone(), b.clone()]);

        assert_eq!(combined.len(), 1);
        let expected: Vec<Occurrence> = a
            .occurrences()
            .iter()
            .chain(b.occurrences())
            .copied()
            .collect();
        assert_eq!(combined[0].occurrences(), expected.as_slice());
        assert_eq!(
            combined[0].declared_quantity(),
            a.counted_quantity() + b.counted_quantity()
        );
    }

    #[test]
    fn test_combine_keeps_distinct_parts_in_first_appearance_order() {
        let records = vec![
            row(&["1", "1.5", "30", "RS", "R1:1", ""]),
            row(&["1", "1.5", "20", "RS", "R1:2", ""]),
            row(&["1", "1.5", "30", "RS", "R1:3", ""]),
            row(&["1", "1.5", "30", "TR", "R1:4", ""]),
            row(&["1", "1.5", "30", "RS", "R1:5", "Scribe"]),
        ];
        let combined = combine(&records);
        let summary: Vec<(String, String)> = combined
            .iter()
            .map(|r| (r.length().to_string(), r.expression()))
            .collect();
        assert_eq!(
            summary,
            vec![
                ("30".to_string(), "R1:1&3".to_string()),
                ("20".to_string(), "R1:2".to_string()),
                ("30".to_string(), "R1:4".to_string()),
                ("30".to_string(), "R1:5".to_string()),
            ]
        );
    }

    #[test]
    fn test_combine_keeps_duplicates() {
        let records = vec![
            row(&["1", "2", "42", "BR", "R1:1", ""]),
            row(&["2", "2", "42", "BR", "R1:1(2)", ""]),
        ];
        let combined = combine(&records);
        assert_eq!(combined.len(), 1);
        assert_eq!(combined[0].expression(), "R1:1&1(2)");
        assert_eq!(combined[0].declared_quantity(), 3);
    }

    #[test]
    fn test_combine_reverses_split() {
        let record = row(&["12", "1.5", "86.5", "RS", "R5:1&2&3&4&5&6&10&11 R7:1&2&3&7&8", ""]);
        for threshold in 1..=14 {
            let lines = split(&record, threshold).unwrap();
            assert_eq!(combine(&lines), vec![record.normalized()]);
        }
    }

    #[test]
    fn test_combine_empty() {
        assert!(combine(&Vec::<CutListRecord>::new()).is_empty());
    }
}

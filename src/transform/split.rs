//! Line splitting: keep each saw line item within the display limit.

use crate::config::ConvertConfig;
use crate::error::SplitError;
use crate::model::CutListRecord;

/// Split a record into line items of at most `max_occurrences_per_line` occurrences.
///
/// Occurrences are cut into consecutive buckets in their original order; a
/// room group may straddle two buckets. Every output record carries its
/// bucket's counted quantity, so the outputs sum to the source's counted
/// quantity even when the declared quantity was wrong.
pub fn split(
    record: &CutListRecord,
    max_occurrences_per_line: usize,
) -> Result<Vec<CutListRecord>, SplitError> {
    if max_occurrences_per_line < 1 {
        return Err(SplitError::InvalidThreshold {
            value: max_occurrences_per_line,
        });
    }

    let occurrences = record.occurrences();
    if occurrences.len() <= max_occurrences_per_line {
        return Ok(vec![record.normalized()]);
    }

    let lines: Vec<CutListRecord> = occurrences
        .chunks(max_occurrences_per_line)
        .map(|bucket| CutListRecord::derive(record, bucket.to_vec()))
        .collect();

    tracing::debug!(
        "Split {} {} ({} occurrences) into {} lines",
        record.material(),
        record.length(),
        occurrences.len(),
        lines.len()
    );

    Ok(lines)
}

/// Produce the saw line items for a record under the given configuration.
///
/// With splitting disabled the record is only normalized.
pub fn line_items(
    record: &CutListRecord,
    config: &ConvertConfig,
) -> Result<Vec<CutListRecord>, SplitError> {
    if config.split_enabled {
        split(record, config.max_occurrences_per_line)
    } else {
        Ok(vec![record.normalized()])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Occurrence;
    use crate::parser::parse_row;

    fn scenario_record() -> CutListRecord {
        parse_row(
            &["12", "1.5", "86.50001", "RS", "R5:1&2&3&4&5&6&10&11 R7:1&2&3&7&8", ""],
            false,
        )
        .unwrap()
    }

    fn record_with(count: u32) -> CutListRecord {
        let expr = (1..=count)
            .map(|c| c.to_string())
            .collect::<Vec<_>>()
            .join("&");
        let expr = format!("R1:{}", expr);
        parse_row(&["1", "2", "42", "BR", expr.as_str()], false).unwrap()
    }

    #[test]
    fn test_split_scenario_into_rooms() {
        let lines = split(&scenario_record(), 8).unwrap();
        assert_eq!(lines.len(), 2);

        assert_eq!(lines[0].declared_quantity(), 8);
        assert!(lines[0].occurrences().iter().all(|o| o.room == 5));
        assert_eq!(lines[0].occurrences().len(), 8);

        assert_eq!(lines[1].declared_quantity(), 5);
        assert!(lines[1].occurrences().iter().all(|o| o.room == 7));
        assert_eq!(lines[1].occurrences().len(), 5);

        for line in &lines {
            assert_eq!(line.key(), scenario_record().key());
        }
    }

    #[test]
    fn test_split_cuts_across_room_groups() {
        let lines = split(&scenario_record(), 5).unwrap();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[1].expression(), "R5:6&10&11 R7:1&2");
        let total: u64 = lines.iter().map(CutListRecord::declared_quantity).sum();
        assert_eq!(total, 13);
    }

    #[test]
    fn test_split_single_line_normalizes_quantity() {
        let record = scenario_record();
        let lines = split(&record, 20).unwrap();
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].declared_quantity(), 13);
        assert_eq!(lines[0].occurrences(), record.occurrences());
        assert_eq!(lines[0], record.normalized());
    }

    #[test]
    fn test_split_boundary() {
        assert_eq!(split(&record_with(4), 4).unwrap().len(), 1);
        assert_eq!(split(&record_with(5), 4).unwrap().len(), 2);
    }

    #[test]
    fn test_split_uses_multipliers_for_bucket_quantity() {
        let record = parse_row(&["5", "1", "10", "ST", "R2:1(3)&2&3"], false).unwrap();
        let lines = split(&record, 1).unwrap();
        let quantities: Vec<u64> = lines.iter().map(CutListRecord::declared_quantity).collect();
        assert_eq!(quantities, vec![3, 1, 1]);
        assert_eq!(lines[0].occurrences(), &[Occurrence::with_multiplier(2, 1, 3)]);
    }

    #[test]
    fn test_split_quantities_past_u32() {
        let record = parse_row(&["1", "1", "10", "ST", "R1:1(4294967295)&2"], false).unwrap();
        assert_eq!(record.counted_quantity(), 4_294_967_296);

        let lines = split(&record, 1).unwrap();
        let total: u64 = lines.iter().map(CutListRecord::declared_quantity).sum();
        assert_eq!(total, record.counted_quantity());
    }

    #[test]
    fn test_split_rejects_zero_threshold() {
        assert_eq!(
            split(&record_with(2), 0),
            Err(SplitError::InvalidThreshold { value: 0 })
        );
    }

    #[test]
    fn test_line_items_without_split() {
        let config = ConvertConfig::new(1).with_split(false);
        let lines = line_items(&scenario_record(), &config).unwrap();
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].declared_quantity(), 13);
    }

    #[test]
    fn test_line_items_with_split() {
        let config = ConvertConfig::new(8);
        assert_eq!(line_items(&scenario_record(), &config).unwrap().len(), 2);
    }
}

//! Cut-list export parsers.

mod dat;
mod occurrence;
mod record;

pub use dat::{
    collect_dat_files, is_dat_file, parse_rows, read_dat_file, read_dat_str, DatRow, InputFilter,
    ParsedBatch, ParsedRecord, RejectedRow,
};
pub use occurrence::parse_occurrences;
pub use record::{accepted_columns, parse_row};

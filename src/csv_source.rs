use std::io::Read;
use std::path::Path;

use crate::error::{Result, TagbookError};
use crate::models::RawRow;

pub const REQUIRED_COLUMNS: usize = 4;

/// The header row is required but its names are ignored: the first four
/// columns are always date, description, amount spent and amount received.
pub fn read_rows<R: Read>(reader: R) -> Result<Vec<RawRow>> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let columns = rdr.headers()?.len();
    if columns < REQUIRED_COLUMNS {
        return Err(TagbookError::TooFewColumns(columns));
    }
    if columns > REQUIRED_COLUMNS {
        tracing::debug!(columns, "ignoring columns beyond the first {REQUIRED_COLUMNS}");
    }

    let mut rows = Vec::new();
    for result in rdr.records() {
        let record = result?;
        let field = |i: usize| record.get(i).unwrap_or("");
        rows.push(RawRow::new(field(0), field(1), field(2), field(3)));
    }
    Ok(rows)
}

pub fn read_file(file_path: &Path) -> Result<Vec<RawRow>> {
    let is_csv = file_path
        .extension()
        .is_some_and(|e| e.eq_ignore_ascii_case("csv"));
    if !is_csv {
        return Err(TagbookError::NotCsv(file_path.display().to_string()));
    }
    let file = std::fs::File::open(file_path)?;
    read_rows(std::io::BufReader::new(file))
}

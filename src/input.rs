//! Reads `code;description` lines into [`RawRecord`]s.

use std::io::Read;
use std::path::Path;

use csv::{ReaderBuilder, StringRecord, Trim};
use tracing::warn;

use crate::error::{CatalogError, Result};
use crate::model::RawRecord;

#[derive(Debug, Default)]
pub struct InputBatch {
    pub records: Vec<RawRecord>,
    /// Lines skipped for lacking a code or a description.
    pub dropped: usize,
}

pub fn read_path(path: &Path) -> Result<InputBatch> {
    let file = std::fs::File::open(path).map_err(|source| CatalogError::Input {
        path: path.to_path_buf(),
        source,
    })?;
    read_from(file).map_err(|source| CatalogError::Csv {
        path: path.to_path_buf(),
        source,
    })
}

/// Malformed lines are dropped with a warning; only I/O failures are errors.
pub fn read_from<R: Read>(reader: R) -> std::result::Result<InputBatch, csv::Error> {
    let mut reader = ReaderBuilder::new()
        .delimiter(b';')
        .has_headers(false)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(reader);

    let mut batch = InputBatch::default();
    for (line, row) in reader.records().enumerate() {
        let row = match row {
            Ok(row) => row,
            Err(e) if e.is_io_error() => return Err(e),
            Err(e) => {
                warn!(line = line + 1, error = %e, "unreadable line dropped");
                batch.dropped += 1;
                continue;
            }
        };
        match to_record(&row) {
            Some(record) => batch.records.push(record),
            None => {
                warn!(line = line + 1, row = ?row, "line without code or description dropped");
                batch.dropped += 1;
            }
        }
    }
    Ok(batch)
}

/// Extra fields are part of the description (it may contain `;`).
fn to_record(row: &StringRecord) -> Option<RawRecord> {
    let code = clean(row.get(0)?);
    let description = clean(&row.iter().skip(1).collect::<Vec<_>>().join(";"));
    let record = RawRecord::new(code, description);
    record.is_well_formed().then_some(record)
}

/// Strips surrounding quotes and whitespace and collapses doubled quotes.
fn clean(field: &str) -> String {
    field
        .trim()
        .trim_matches('"')
        .replace("\"\"", "\"")
        .trim()
        .to_string()
}

//! CSV export of a result set: UTF-8, comma separated, header row, no index column.

use crate::results::AdRecord;
use std::io::{Read, Write};
use std::path::Path;

/// Write `records` as CSV to any writer
pub fn write_records<W: Write>(writer: W, records: &[AdRecord]) -> Result<(), csv::Error> {
    let mut wtr = csv::Writer::from_writer(writer);
    // serde only emits the header with the first record
    if records.is_empty() {
        wtr.write_record(AdRecord::COLUMNS)?;
    }
    for record in records {
        wtr.serialize(record)?;
    }
    wtr.flush()?;
    Ok(())
}

/// Render `records` as CSV text
pub fn to_csv_string(records: &[AdRecord]) -> Result<String, csv::Error> {
    let mut buf = Vec::new();
    write_records(&mut buf, records)?;
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

/// Persist `records` as a CSV file at `path`
pub fn write_csv<P: AsRef<Path>>(path: P, records: &[AdRecord]) -> Result<(), csv::Error> {
    let file = std::fs::File::create(path.as_ref())?;
    write_records(file, records)?;
    ::log::info!("Wrote {} ads to {}", records.len(), path.as_ref().display());
    Ok(())
}

/// Read records back from CSV
pub fn read_records<R: Read>(reader: R) -> Result<Vec<AdRecord>, csv::Error> {
    csv::Reader::from_reader(reader).deserialize().collect()
}

/// Read a CSV file previously written by [`write_csv`]
pub fn read_csv<P: AsRef<Path>>(path: P) -> Result<Vec<AdRecord>, csv::Error> {
    let file = std::fs::File::open(path)?;
    read_records(file)
}

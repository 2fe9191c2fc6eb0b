//! Reading IP address lists from files.

use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

use crate::error::{Error, Result};

/// Read IP strings from a file.
///
/// If the file name ends in `.csv` and `column` is given, the file is read
/// as a headed CSV and values are taken from that column. Otherwise the file
/// is read as plain text with one address per line. Values are trimmed and
/// blank values are skipped; no address validation happens here.
pub fn read_ips(path: impl AsRef<Path>, column: Option<&str>) -> Result<Vec<String>> {
    let path = path.as_ref();
    let file = File::open(path)?;

    let is_csv = path
        .extension()
        .map(|ext| ext.eq_ignore_ascii_case("csv"))
        .unwrap_or(false);

    let ips = match column {
        Some(column) if is_csv => read_csv_column(file, column)?,
        _ => read_lines(file)?,
    };

    log::debug!("Read {} address(es) from {:?}", ips.len(), path);
    Ok(ips)
}

/// Read one trimmed, non-blank value per line.
pub fn read_lines<R: Read>(reader: R) -> Result<Vec<String>> {
    let mut ips = Vec::new();
    for line in BufReader::new(reader).lines() {
        let line = line?;
        let line = line.trim();
        if !line.is_empty() {
            ips.push(line.to_string());
        }
    }
    Ok(ips)
}

/// Read trimmed, non-blank values of `column` from headed CSV data.
pub fn read_csv_column<R: Read>(reader: R, column: &str) -> Result<Vec<String>> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);

    let position = reader
        .headers()?
        .iter()
        .position(|h| h == column)
        .ok_or_else(|| Error::MissingColumn(column.to_string()))?;

    let mut ips = Vec::new();
    for record in reader.records() {
        let record = record?;
        if let Some(value) = record.get(position).filter(|v| !v.is_empty()) {
            ips.push(value.to_string());
        }
    }
    Ok(ips)
}

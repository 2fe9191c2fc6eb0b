//! Writing classification results to JSON or CSV.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::engine::Classification;
use crate::error::Result;

/// Result file format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Array of `[ip, group]` pairs
    Json,
    /// `IP,In Subnet` table
    Csv,
}

impl OutputFormat {
    /// Default file name for this format.
    pub fn default_path(&self) -> &'static str {
        match self {
            OutputFormat::Json => "results.json",
            OutputFormat::Csv => "results.csv",
        }
    }
}

/// Write results to `path` in the given format.
pub fn write_results(
    results: &[Classification],
    format: OutputFormat,
    path: impl AsRef<Path>,
) -> Result<()> {
    let path = path.as_ref();
    let mut writer = BufWriter::new(File::create(path)?);
    match format {
        OutputFormat::Json => write_json(results, &mut writer)?,
        OutputFormat::Csv => write_csv(results, &mut writer)?,
    }
    writer.flush()?;

    log::info!("Results saved to {}", path.display());
    Ok(())
}

/// Write results as a pretty-printed JSON array of `[ip, group|null]` pairs.
pub fn write_json<W: Write>(results: &[Classification], writer: W) -> Result<()> {
    let pairs: Vec<(&str, Option<&str>)> = results
        .iter()
        .map(|r| (r.ip.as_str(), r.group()))
        .collect();
    serde_json::to_writer_pretty(writer, &pairs)?;
    Ok(())
}

/// Write results as CSV with an `IP,In Subnet` header; absence is an empty cell.
pub fn write_csv<W: Write>(results: &[Classification], writer: W) -> Result<()> {
    let mut writer = csv::Writer::from_writer(writer);
    writer.write_record(["IP", "In Subnet"])?;
    for result in results {
        writer.write_record([result.ip.as_str(), result.group().unwrap_or("")])?;
    }
    writer.flush()?;
    Ok(())
}

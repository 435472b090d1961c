//! CSV report writer.
//!
//! The report is a single flat table with a fixed header. The target file is
//! truncated on every run, so identical input always yields identical bytes.

use anyhow::{Context, Result};
use std::fs::File;
use std::io::Write;
use std::path::Path;
use tracing::info;

use super::types::AccessKeyRecord;

/// Column names, in output order
pub const REPORT_HEADER: [&str; 5] = ["UserName", "AccessKeyId", "Status", "CreateDate", "AccountId"];

/// Write `records` to `path`, replacing any existing file.
pub fn write_report<P: AsRef<Path>>(records: &[AccessKeyRecord], path: P) -> Result<()> {
    let path = path.as_ref();
    info!(path = %path.display(), "Generating report");

    let file = File::create(path)
        .with_context(|| format!("Failed to create report file: {}", path.display()))?;
    write_records(file, records)
        .with_context(|| format!("Failed to write report: {}", path.display()))?;

    info!(path = %path.display(), rows = records.len(), "Report generated successfully");
    Ok(())
}

/// Write the header and one row per record to any writer.
///
/// The header is always emitted, even when `records` is empty.
pub fn write_records<W: Write>(writer: W, records: &[AccessKeyRecord]) -> Result<()> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);

    writer.write_record(REPORT_HEADER)?;
    for record in records {
        writer.serialize(record)?;
    }

    writer.flush()?;
    Ok(())
}

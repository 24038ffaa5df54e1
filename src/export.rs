//! CSV export of the combined dashboard table.
//!
//! Values are written at full precision; two-decimal rounding happens only in
//! text rendering. Undefined cells become empty fields, matching the shape a
//! spreadsheet user expects from the download.

use anyhow::{Context, Result};
use std::io::Write;
use std::path::Path;
use tracing::info;

use crate::dashboard::CombinedTable;

/// Write the combined table as CSV to any writer.
pub fn write_csv<W: Write>(table: &CombinedTable, writer: W) -> Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);

    let mut header = Vec::with_capacity(table.columns.len() + 1);
    header.push("Date".to_string());
    header.extend(table.columns.iter().map(|c| c.name.clone()));
    csv_writer.write_record(&header)?;

    for (row, date) in table.dates.iter().enumerate() {
        let mut record = Vec::with_capacity(table.columns.len() + 1);
        record.push(date.to_string());
        for column in &table.columns {
            record.push(match column.values[row] {
                Some(v) => v.to_string(),
                None => String::new(),
            });
        }
        csv_writer.write_record(&record)?;
    }

    csv_writer.flush()?;
    Ok(())
}

/// Write the combined table to a file path.
pub fn export_to_path(table: &CombinedTable, path: &Path) -> Result<()> {
    let file = std::fs::File::create(path)
        .with_context(|| format!("failed to create {}", path.display()))?;
    write_csv(table, file)?;
    info!("📥 Exported {} rows to {}", table.dates.len(), path.display());
    Ok(())
}

use std::path::Path;

use csv::WriterBuilder;
use tracing::debug;

use crate::error::SiftError;
use crate::extract::ResultSet;

/// Write the result set as CSV: one header row in column order, no index
/// column, absent values as empty fields.
pub fn write_csv(result: &ResultSet, path: &Path) -> Result<(), SiftError> {
    debug!("exporting {} record(s) to CSV: {}", result.len(), path.display());

    // The csv crate rejects zero-field records; an empty concatenation still
    // produces its (empty) output file.
    if result.columns.is_empty() {
        std::fs::File::create(path)?;
        return Ok(());
    }

    let mut writer = WriterBuilder::new().from_path(path)?;
    writer.write_record(&result.columns)?;
    for row in &result.rows {
        writer.write_record(row.iter().map(|cell| cell.as_deref().unwrap_or("")))?;
    }
    writer.flush()?;
    Ok(())
}

use std::fs::File;
use std::path::Path;

use serde_json::to_writer_pretty;
use tracing::debug;

use crate::error::SiftError;
use crate::extract::ResultSet;

/// Write the result set as a pretty-printed JSON array of objects, keys in
/// column order, absent values as null. Text is written verbatim; serde_json
/// does not force ASCII escaping, so non-Latin scripts round-trip.
pub fn write_json(result: &ResultSet, path: &Path) -> Result<(), SiftError> {
    debug!("exporting {} record(s) to JSON: {}", result.len(), path.display());

    let records = result.to_json_records();
    let file = File::create(path)?;
    to_writer_pretty(file, &records)?;
    Ok(())
}

use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::SiftError;
use crate::extract::ResultSet;

pub mod csv_exporter;
pub mod json_exporter;

/// Output format for the single result file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExportFormat {
    Csv,
    Json,
}

impl ExportFormat {
    /// Resolve the format prompt's answer: empty and "csv" (case-insensitive)
    /// mean CSV, anything else falls through to the JSON branch.
    pub fn from_user_input(input: &str) -> Self {
        let token = input.trim();
        if token.is_empty() || token.eq_ignore_ascii_case("csv") {
            Self::Csv
        } else {
            Self::Json
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Json => "json",
        }
    }
}

impl std::fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.extension())
    }
}

/// Derive the output path: strip any existing extension (and any directory
/// part) from the basename and append the format's extension. The file lands
/// in the current working directory.
pub fn output_path(basename: &str, format: ExportFormat) -> PathBuf {
    let stem = Path::new(basename)
        .file_stem()
        .and_then(OsStr::to_str)
        .unwrap_or(basename);
    PathBuf::from(format!("{stem}.{}", format.extension()))
}

/// Serialize the result set to `<basename>.<ext>`, overwriting any existing
/// file, and return the path written.
pub fn write(result: &ResultSet, format: ExportFormat, basename: &str) -> Result<PathBuf, SiftError> {
    let path = output_path(basename, format);
    match format {
        ExportFormat::Csv => csv_exporter::write_csv(result, &path)?,
        ExportFormat::Json => json_exporter::write_json(result, &path)?,
    }
    info!("wrote {} record(s) to {}", result.len(), path.display());
    Ok(path)
}

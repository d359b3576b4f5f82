use thiserror::Error;

/// Error taxonomy for a pagesift run.
///
/// Nothing is retried or recovered internally; every failure propagates up to
/// `main`, which is the only place that decides presentation and exit status.
#[derive(Error, Debug)]
pub enum SiftError {
    // Fetch errors
    #[error("request for {url} failed: {message}")]
    Fetch { url: String, message: String },

    #[error("server returned HTTP {status} for {url}")]
    HttpStatus { url: String, status: u16 },

    #[error("{message}")]
    Browser { message: String },

    // Extraction errors
    #[error("no tables found on the page")]
    NoTablesFound,

    #[error("invalid mode selection: {input:?}")]
    InvalidModeSelection { input: String },

    // Writer errors
    #[error("export failed: {message}")]
    Export { message: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl SiftError {
    /// Create a fetch error from anything displayable.
    pub fn fetch(url: impl Into<String>, err: impl std::fmt::Display) -> Self {
        Self::Fetch {
            url: url.into(),
            message: err.to_string(),
        }
    }

    /// Create a browser-automation error.
    pub fn browser(message: impl Into<String>) -> Self {
        Self::Browser {
            message: message.into(),
        }
    }

    /// Create an export error.
    pub fn export(message: impl Into<String>) -> Self {
        Self::Export {
            message: message.into(),
        }
    }
}

impl From<csv::Error> for SiftError {
    fn from(err: csv::Error) -> Self {
        Self::export(err.to_string())
    }
}

impl From<serde_json::Error> for SiftError {
    fn from(err: serde_json::Error) -> Self {
        Self::export(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fetch_error_names_url() {
        let err = SiftError::fetch("http://nope.example", "connection refused");
        assert!(err.to_string().contains("http://nope.example"));
        assert!(err.to_string().contains("connection refused"));
    }

    #[test]
    fn no_tables_has_dedicated_message() {
        assert_eq!(SiftError::NoTablesFound.to_string(), "no tables found on the page");
    }

    #[test]
    fn invalid_mode_echoes_input() {
        let err = SiftError::InvalidModeSelection {
            input: "7".to_string(),
        };
        assert!(err.to_string().contains("\"7\""));
    }
}

//! pagesift - interactive extraction of structured data from a single web page
//!
//! One run does one thing: prompt for a URL and an extraction mode, fetch the
//! page (plain HTTP or a headless-browser render), pull out tables, links,
//! paragraphs or CSS-selected elements, and save the result as CSV or JSON.

pub mod config;
pub mod driver;
pub mod error;
pub mod export;
pub mod extract;
pub mod fetch;
pub mod logging;

// Re-export main types for convenience
pub use crate::config::AppConfig;
pub use crate::driver::Driver;
pub use crate::error::SiftError;
pub use crate::extract::{ExtractionMode, ResultSet};

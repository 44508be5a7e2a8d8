//! Export utilities for the Contacts page: turn the current filtered
//! in-memory collection into CSV, spreadsheet, or PDF bytes. Pure,
//! synchronous formatting with no network interaction.

mod filter;
mod pdf;
mod rows;
mod sheet;
mod table;

use chrono::Utc;
use thiserror::Error;

pub use filter::filter_contacts;
pub use pdf::to_pdf;
pub use rows::{contact_row, CONTACT_HEADERS};
pub use sheet::{to_csv, to_xlsx};

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("csv error: {0}")]
    Csv(String),
    #[error("spreadsheet error: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),
}

impl From<csv::Error> for ExportError {
    fn from(e: csv::Error) -> Self {
        ExportError::Csv(e.to_string())
    }
}

/// Download file name: `{prefix}-YYYY-MM-DD.{ext}`.
pub fn export_filename(prefix: &str, ext: &str) -> String {
    format!("{}-{}.{}", prefix, Utc::now().format("%Y-%m-%d"), ext)
}

use thiserror::Error;

use std::path::PathBuf;

/// Errors that can occur while splitting sales data into order sheets.
#[derive(Debug, Error)]
pub enum Error {
    /// The input path does not refer to an existing regular file.
    #[error("not a valid existing file path: {}", .0.display())]
    NotFound(PathBuf),
    /// The input CSV header is missing one or more required columns.
    #[error("missing required column(s): {}", .0.join(", "))]
    Schema(Vec<String>),
    /// A CSV file could not be opened or parsed.
    #[error("reading {}: {source}", .path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
    /// An order workbook could not be written.
    #[error("writing {}: {source}", .path.display())]
    Xlsx {
        path: PathBuf,
        #[source]
        source: rust_xlsxwriter::XlsxError,
    },
    /// The output directory could not be created.
    #[error("creating output directory {}: {source}", .path.display())]
    OutputDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, Error>;

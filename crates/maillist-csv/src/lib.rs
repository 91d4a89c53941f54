//! CSV input and output for contact lists.
//!
//! - [`read_csv_bytes`] / [`read_csv_file`] parse an upload into a [`SourceTable`]
//! - [`write_csv`] renders records for export
//! - [`sha256_hex`] fingerprints the uploaded bytes

#![deny(unsafe_code)]

mod error;
mod hash;
mod reader;
mod writer;

pub use error::{IngestError, Result};
pub use hash::{compute_file_hash, sha256_hex};
pub use reader::{
    MAX_CSV_FILE_SIZE, SourceFile, SourceTable, check_file_size_with_limit, read_csv_bytes,
    read_csv_file,
};
pub use writer::write_csv;

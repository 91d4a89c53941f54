//! CSV reading for uploaded contact lists.

use std::path::Path;

use csv::ReaderBuilder;
use tracing::{debug, warn};

use maillist_model::RecordData;

use crate::error::{IngestError, Result};
use crate::hash::sha256_hex;

/// Maximum upload size accepted by default (50 MB).
pub const MAX_CSV_FILE_SIZE: u64 = 50 * 1024 * 1024;

/// Parsed upload: ordered headers plus one string map per data row.
///
/// Row maps are keyed by the original header. A row shorter than the header
/// leaves the trailing keys absent; cells beyond the last header are dropped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceTable {
    pub headers: Vec<String>,
    pub rows: Vec<RecordData>,
}

impl SourceTable {
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }
}

/// An uploaded file after parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    /// File name without directories.
    pub filename: String,
    /// SHA-256 of the raw bytes.
    pub source_hash: String,
    pub table: SourceTable,
}

/// Check file size against a limit before loading.
pub fn check_file_size_with_limit(path: &Path, max_size: u64) -> Result<()> {
    let metadata = std::fs::metadata(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            IngestError::FileNotFound {
                path: path.to_path_buf(),
            }
        } else {
            IngestError::FileRead {
                path: path.to_path_buf(),
                source: e,
            }
        }
    })?;

    if metadata.len() > max_size {
        return Err(IngestError::FileTooLarge {
            path: path.to_path_buf(),
            size: metadata.len(),
            max_size,
        });
    }

    Ok(())
}

fn check_encoding(bytes: &[u8]) -> Result<()> {
    match bytes {
        [0xFF, 0xFE, ..] => Err(IngestError::UnsupportedEncoding {
            encoding: "UTF-16 LE",
        }),
        [0xFE, 0xFF, ..] => Err(IngestError::UnsupportedEncoding {
            encoding: "UTF-16 BE",
        }),
        _ => Ok(()),
    }
}

/// Parses CSV bytes with a header row.
///
/// Header text is kept exactly as written apart from a leading UTF-8 BOM.
/// Cell values are not trimmed. Rows whose cells are all empty are skipped.
pub fn read_csv_bytes(bytes: &[u8]) -> Result<SourceTable> {
    check_encoding(bytes)?;

    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(bytes);

    let headers: Vec<String> = reader
        .headers()?
        .iter()
        .enumerate()
        .map(|(idx, raw)| {
            if idx == 0 {
                raw.trim_start_matches('\u{feff}').to_string()
            } else {
                raw.to_string()
            }
        })
        .collect();
    if headers.is_empty() {
        return Err(IngestError::MissingHeader);
    }

    let mut rows = Vec::new();
    let mut skipped = 0usize;
    for record in reader.records() {
        let record = record?;
        if record.iter().all(str::is_empty) {
            skipped += 1;
            continue;
        }
        if record.len() > headers.len() {
            warn!(
                line = record.position().map(csv::Position::line),
                cells = record.len(),
                headers = headers.len(),
                "dropping cells beyond the header row"
            );
        }
        let row: RecordData = headers
            .iter()
            .zip(record.iter())
            .map(|(header, cell)| (header.clone(), cell.to_string()))
            .collect();
        rows.push(row);
    }

    debug!(
        columns = headers.len(),
        rows = rows.len(),
        skipped,
        "parsed CSV"
    );
    Ok(SourceTable { headers, rows })
}

/// Reads and parses a CSV file, rejecting files larger than `max_size`.
pub fn read_csv_file(path: &Path, max_size: u64) -> Result<SourceFile> {
    check_file_size_with_limit(path, max_size)?;
    let bytes = std::fs::read(path).map_err(|e| IngestError::FileRead {
        path: path.to_path_buf(),
        source: e,
    })?;
    let table = read_csv_bytes(&bytes)?;
    let filename = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    Ok(SourceFile {
        filename,
        source_hash: sha256_hex(&bytes),
        table,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_reads_headers_and_rows() {
        let table = read_csv_bytes(b"Email,City\na@x.com,Boston\nb@x.com,\n").unwrap();
        assert_eq!(table.headers, vec!["Email", "City"]);
        assert_eq!(table.row_count(), 2);
        assert_eq!(table.rows[0].get("City").map(String::as_str), Some("Boston"));
        assert_eq!(table.rows[1].get("City").map(String::as_str), Some(""));
    }

    #[test]
    fn test_strips_utf8_bom() {
        let table = read_csv_bytes(b"\xEF\xBB\xBFEmail\na@x.com\n").unwrap();
        assert_eq!(table.headers, vec!["Email"]);
    }

    #[test]
    fn test_short_rows_leave_keys_absent() {
        let table = read_csv_bytes(b"Email,City\na@x.com\n").unwrap();
        assert!(!table.rows[0].contains_key("City"));
    }

    #[test]
    fn test_skips_blank_rows() {
        let table = read_csv_bytes(b"Email,City\n,\na@x.com,Boston\n").unwrap();
        assert_eq!(table.row_count(), 1);
    }

    #[test]
    fn test_rejects_utf16() {
        let err = read_csv_bytes(&[0xFF, 0xFE, b'E', 0]).unwrap_err();
        assert!(matches!(err, IngestError::UnsupportedEncoding { .. }));
    }

    #[test]
    fn test_empty_input_has_no_header() {
        assert!(matches!(
            read_csv_bytes(b"").unwrap_err(),
            IngestError::MissingHeader
        ));
    }

    #[test]
    fn test_size_limit() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(b"Email\na@x.com\n").unwrap();
        temp_file.flush().unwrap();

        assert!(check_file_size_with_limit(temp_file.path(), 1024).is_ok());
        assert!(matches!(
            check_file_size_with_limit(temp_file.path(), 4),
            Err(IngestError::FileTooLarge { .. })
        ));
    }

    #[test]
    fn test_missing_file() {
        let err = read_csv_file(Path::new("/nonexistent/contacts.csv"), MAX_CSV_FILE_SIZE)
            .unwrap_err();
        assert!(matches!(err, IngestError::FileNotFound { .. }));
    }
}

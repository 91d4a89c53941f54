use std::io::Write;

use maillist_csv::{IngestError, MAX_CSV_FILE_SIZE, read_csv_file, sha256_hex, write_csv};
use tempfile::TempDir;

#[test]
fn reads_upload_from_disk() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("contacts.csv");
    let content = b"Email Address,First,Favourite Colour\n\
a@x.com,Ann,\"Red, mostly\"\n\
b@x.com,Bob,Blue\n";
    std::fs::File::create(&path)
        .and_then(|mut f| f.write_all(content))
        .unwrap();

    let source = read_csv_file(&path, MAX_CSV_FILE_SIZE).expect("read csv");
    assert_eq!(source.filename, "contacts.csv");
    assert_eq!(source.source_hash, sha256_hex(content));
    assert_eq!(
        source.table.headers,
        vec!["Email Address", "First", "Favourite Colour"]
    );
    assert_eq!(source.table.row_count(), 2);
    assert_eq!(
        source.table.rows[0].get("Favourite Colour").map(String::as_str),
        Some("Red, mostly")
    );
}

#[test]
fn oversized_upload_is_rejected_before_parsing() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("big.csv");
    std::fs::write(&path, "Email\na@x.com\nb@x.com\n").unwrap();

    let err = read_csv_file(&path, 8).unwrap_err();
    assert!(matches!(err, IngestError::FileTooLarge { size: 22, max_size: 8, .. }));
}

#[test]
fn parsed_rows_render_back_under_the_same_headers() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("contacts.csv");
    std::fs::write(&path, "Email,City\na@x.com,Boston\n").unwrap();

    let source = read_csv_file(&path, MAX_CSV_FILE_SIZE).unwrap();
    let output = write_csv(&source.table.headers, &source.table.rows).unwrap();
    assert_eq!(output, "Email,City\na@x.com,Boston\n");
}

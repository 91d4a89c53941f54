//! CSV rendering for exports.

use csv::{Terminator, WriterBuilder};

use maillist_model::RecordData;

use crate::error::{IngestError, Result};

/// Renders `rows` under `columns`.
///
/// Each row emits exactly one cell per column; keys the row lacks become
/// empty cells and keys outside `columns` are ignored. With no columns the
/// output is empty.
pub fn write_csv<'a, I>(columns: &[String], rows: I) -> Result<String>
where
    I: IntoIterator<Item = &'a RecordData>,
{
    if columns.is_empty() {
        return Ok(String::new());
    }

    let mut writer = WriterBuilder::new()
        .terminator(Terminator::Any(b'\n'))
        .from_writer(Vec::new());
    writer.write_record(columns)?;
    for row in rows {
        writer.write_record(
            columns
                .iter()
                .map(|column| row.get(column).map_or("", String::as_str)),
        )?;
    }

    let bytes = writer.into_inner().map_err(|e| IngestError::Write {
        message: e.error().to_string(),
    })?;
    String::from_utf8(bytes).map_err(|e| IngestError::Write {
        message: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(pairs: &[(&str, &str)]) -> RecordData {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    #[test]
    fn fills_missing_values_with_empty_cells() {
        let columns = vec!["email".to_string(), "city".to_string()];
        let rows = [
            row(&[("email", "a@x.com"), ("city", "Boston")]),
            row(&[("email", "b@x.com"), ("phone", "555")]),
        ];
        let output = write_csv(&columns, &rows).unwrap();
        insta::assert_snapshot!(output, @r"
        email,city
        a@x.com,Boston
        b@x.com,
        ");
    }

    #[test]
    fn quotes_cells_with_separators() {
        let columns = vec!["company".to_string()];
        let rows = [row(&[("company", "Acme, Inc.")])];
        let output = write_csv(&columns, &rows).unwrap();
        assert_eq!(output, "company\n\"Acme, Inc.\"\n");
    }

    #[test]
    fn no_columns_renders_nothing() {
        let rows = [row(&[("email", "a@x.com")])];
        assert_eq!(write_csv(&[], &rows).unwrap(), "");
    }
}

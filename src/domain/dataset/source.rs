//! Table sources: delimited text or spreadsheet grids turned into bindings

use serde::{Deserialize, Serialize};

use super::delimited::parse_records;
use super::types::{Binding, Bindings, DatasetError, DatasetResult, Scalar};

/// Header name of the key column
pub const KEY_COLUMN: &str = "key";

/// Header name of the value column
pub const VALUE_COLUMN: &str = "value";

fn default_delimiter() -> char {
    ','
}

/// An uploaded key/value dataset.
///
/// Both variants carry a header row naming a `key` and a `value` column;
/// other columns are ignored.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "format", rename_all = "snake_case")]
pub enum TableSource {
    /// Delimited text such as a CSV export
    Delimited {
        content: String,
        #[serde(default = "default_delimiter")]
        delimiter: char,
    },
    /// A decoded spreadsheet: rows of scalar cells, header row first
    Spreadsheet { rows: Vec<Vec<serde_json::Value>> },
}

impl TableSource {
    /// Comma-separated text
    pub fn csv(content: impl Into<String>) -> Self {
        TableSource::Delimited {
            content: content.into(),
            delimiter: default_delimiter(),
        }
    }

    /// Short name used in logs and metrics
    pub fn kind(&self) -> &'static str {
        match self {
            TableSource::Delimited { .. } => "delimited",
            TableSource::Spreadsheet { .. } => "spreadsheet",
        }
    }

    /// Read the dataset rows into ordered bindings.
    ///
    /// Rows with a blank key are skipped and recorded on the bindings.
    pub fn read(&self) -> DatasetResult<Bindings> {
        let (rows, skipped) = match self {
            TableSource::Delimited { content, delimiter } => {
                let records = parse_records(content, *delimiter)?;
                read_grid(records.into_iter().map(|record| {
                    record.into_iter().map(Scalar::Text).collect::<Vec<_>>()
                }))?
            }
            TableSource::Spreadsheet { rows } => read_grid(
                rows.iter()
                    .enumerate()
                    .map(|(row, cells)| to_scalars(row, cells))
                    .collect::<DatasetResult<Vec<_>>>()?,
            )?,
        };

        Ok(Bindings::from_rows(rows).with_skipped_rows(skipped))
    }
}

fn to_scalars(row: usize, cells: &[serde_json::Value]) -> DatasetResult<Vec<Scalar>> {
    cells
        .iter()
        .enumerate()
        .map(|(column, cell)| {
            Scalar::from_json(cell.clone()).ok_or_else(|| DatasetError::NonScalarCell {
                row: row + 1,
                column: column.to_string(),
            })
        })
        .collect()
}

fn is_blank(cell: &Scalar) -> bool {
    match cell {
        Scalar::Text(s) => s.trim().is_empty(),
        Scalar::Null => true,
        _ => false,
    }
}

/// Locate the `key`/`value` columns in the header row and collect the rows
/// below it, along with the 1-based numbers (header counted) of rows
/// skipped for a blank key.
fn read_grid<I>(rows: I) -> DatasetResult<(Vec<Binding>, Vec<usize>)>
where
    I: IntoIterator<Item = Vec<Scalar>>,
{
    let mut rows = rows
        .into_iter()
        .enumerate()
        .filter(|(_, cells)| !cells.iter().all(is_blank));

    let (_, header) = rows.next().ok_or(DatasetError::Empty)?;
    let column = |name: &'static str| {
        header
            .iter()
            .position(|cell| cell.render().trim() == name)
            .ok_or(DatasetError::MissingColumn(name))
    };
    let key_column = column(KEY_COLUMN)?;
    let value_column = column(VALUE_COLUMN)?;

    let mut bindings = Vec::new();
    let mut skipped = Vec::new();
    for (row, mut cells) in rows {
        let key = match cells.get(key_column) {
            Some(Scalar::Null) | None => String::new(),
            Some(cell) => cell.render().into_owned(),
        };
        if key.trim().is_empty() {
            skipped.push(row + 1);
            continue;
        }

        let value = if value_column < cells.len() {
            cells.swap_remove(value_column)
        } else {
            Scalar::Null
        };

        bindings.push(Binding { key, value });
    }

    Ok((bindings, skipped))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_read_delimited() {
        let source = TableSource::csv("key,value\nname,Alice\nage,30\n");
        let bindings = source.read().unwrap();

        assert_eq!(bindings.len(), 2);
        assert_eq!(bindings.get("name"), Some(&Scalar::from("Alice")));
        assert_eq!(bindings.get("age"), Some(&Scalar::from("30")));
    }

    #[test]
    fn test_read_delimited_extra_columns_any_order() {
        let source = TableSource::csv("description,value,key\nClient name,ACME,client\n");
        let bindings = source.read().unwrap();
        assert_eq!(bindings.get("client"), Some(&Scalar::from("ACME")));
    }

    #[test]
    fn test_read_delimited_short_row_has_empty_value() {
        let bindings = TableSource::csv("key,value\nlonely\n").read().unwrap();
        assert_eq!(bindings.get("lonely"), Some(&Scalar::Null));
    }

    #[test]
    fn test_read_spreadsheet() {
        let source = TableSource::Spreadsheet {
            rows: vec![
                vec![json!("key"), json!("value")],
                vec![json!("name"), json!("Alice")],
                vec![json!("age"), json!(30)],
                vec![json!(null), json!(null)],
                vec![json!("active"), json!(true)],
            ],
        };
        let bindings = source.read().unwrap();

        assert_eq!(bindings.len(), 3);
        assert_eq!(bindings.get("age").unwrap().render(), "30");
        assert_eq!(bindings.get("active").unwrap().render(), "true");
    }

    #[test]
    fn test_spreadsheet_numeric_key_rendered() {
        let source = TableSource::Spreadsheet {
            rows: vec![
                vec![json!("key"), json!("value")],
                vec![json!(2024), json!("year")],
            ],
        };
        let bindings = source.read().unwrap();
        assert_eq!(bindings.get("2024"), Some(&Scalar::from("year")));
    }

    #[test]
    fn test_missing_columns() {
        assert_eq!(
            TableSource::csv("name,value\na,b\n").read().unwrap_err(),
            DatasetError::MissingColumn("key")
        );
        assert_eq!(
            TableSource::csv("key,val\na,b\n").read().unwrap_err(),
            DatasetError::MissingColumn("value")
        );
    }

    #[test]
    fn test_empty_dataset() {
        assert_eq!(TableSource::csv("").read().unwrap_err(), DatasetError::Empty);
        assert_eq!(
            TableSource::Spreadsheet { rows: vec![] }.read().unwrap_err(),
            DatasetError::Empty
        );
    }

    #[test]
    fn test_header_only_is_valid() {
        let bindings = TableSource::csv("key,value\n").read().unwrap();
        assert!(bindings.is_empty());
    }

    #[test]
    fn test_blank_key_rows_are_skipped() {
        let bindings = TableSource::csv("key,value\nname,Alice\n,orphan\n  ,x\nage,30\n")
            .read()
            .unwrap();

        assert_eq!(bindings.len(), 2);
        assert_eq!(bindings.get("age"), Some(&Scalar::from("30")));
        assert_eq!(bindings.skipped_rows(), &[3, 4]);
    }

    #[test]
    fn test_spreadsheet_null_key_is_skipped() {
        let source = TableSource::Spreadsheet {
            rows: vec![
                vec![json!("key"), json!("value")],
                vec![json!(null), json!("orphan")],
                vec![json!("name"), json!("Alice")],
            ],
        };
        let bindings = source.read().unwrap();

        assert_eq!(bindings.len(), 1);
        assert_eq!(bindings.skipped_rows(), &[2]);
    }

    #[test]
    fn test_non_scalar_cell_rejected() {
        let source = TableSource::Spreadsheet {
            rows: vec![
                vec![json!("key"), json!("value")],
                vec![json!("list"), json!([1, 2])],
            ],
        };
        assert!(matches!(
            source.read(),
            Err(DatasetError::NonScalarCell { row: 2, .. })
        ));
    }

    #[test]
    fn test_deserialize_payload() {
        let source: TableSource = serde_json::from_value(json!({
            "format": "delimited",
            "content": "key;value\na;1"
        }))
        .unwrap();
        assert!(matches!(source, TableSource::Delimited { delimiter: ',', .. }));

        let source: TableSource = serde_json::from_value(json!({
            "format": "delimited",
            "content": "key;value\na;1",
            "delimiter": ";"
        }))
        .unwrap();
        assert_eq!(source.read().unwrap().get("a"), Some(&Scalar::from("1")));
        assert_eq!(source.kind(), "delimited");
    }
}

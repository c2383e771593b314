//! Delimited text (CSV/TSV) record splitting
//!
//! Follows RFC 4180 quoting: a field wrapped in double quotes may contain
//! the delimiter, line breaks, and doubled quotes (`""` for a literal `"`).
//! Both `\n` and `\r\n` end a record. Fully blank lines are skipped.

use super::types::{DatasetError, DatasetResult};

/// Split delimited text into records of fields
pub fn parse_records(content: &str, delimiter: char) -> DatasetResult<Vec<Vec<String>>> {
    if delimiter == '"' || delimiter == '\n' || delimiter == '\r' {
        return Err(DatasetError::InvalidDelimiter(delimiter));
    }

    // Spreadsheet exports often start with a UTF-8 byte order mark
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);

    let mut records = Vec::new();
    let mut record: Vec<String> = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut quote_line = 0;
    let mut line = 1;
    let mut chars = content.chars().peekable();

    while let Some(c) = chars.next() {
        if in_quotes {
            match c {
                '"' if chars.peek() == Some(&'"') => {
                    chars.next();
                    field.push('"');
                }
                '"' => in_quotes = false,
                '\n' => {
                    line += 1;
                    field.push(c);
                }
                _ => field.push(c),
            }
            continue;
        }

        match c {
            '"' if field.is_empty() => {
                in_quotes = true;
                quote_line = line;
            }
            '\r' if chars.peek() == Some(&'\n') => {}
            '\n' => {
                line += 1;
                record.push(std::mem::take(&mut field));
                push_record(&mut records, std::mem::take(&mut record));
            }
            c if c == delimiter => record.push(std::mem::take(&mut field)),
            _ => field.push(c),
        }
    }

    if in_quotes {
        return Err(DatasetError::UnterminatedQuote { line: quote_line });
    }

    if !field.is_empty() || !record.is_empty() {
        record.push(field);
        push_record(&mut records, record);
    }

    Ok(records)
}

fn push_record(records: &mut Vec<Vec<String>>, record: Vec<String>) {
    let blank = record.iter().all(|f| f.trim().is_empty());
    if !blank {
        records.push(record);
    }
}

//! Minimal RFC 4180 CSV reading and writing.
//!
//! Covers the two small CSV surfaces of the application: the shopping list download and the
//! tag/ingredient reference data files.

use crate::server::error::validation::ValidationError;

/// Append one record to `out`, quoting fields which contain separators, quotes or newlines
pub fn write_record<S: AsRef<str>>(out: &mut String, fields: &[S]) {
    for (i, field) in fields.iter().enumerate() {
        if i > 0 {
            out.push(',');
        }

        let field = field.as_ref();
        if field.contains([',', '"', '\n', '\r']) {
            out.push('"');
            out.push_str(&field.replace('"', "\"\""));
            out.push('"');
        } else {
            out.push_str(field);
        }
    }
    out.push_str("\r\n");
}

/// Parse CSV text into records, skipping blank lines.
///
/// A leading UTF-8 byte order mark is ignored.
///
/// # Returns
/// - `Ok(Vec<Vec<String>>)` - Parsed records in file order
/// - `Err(ValidationError::MalformedBody)` - A quoted field is never closed, a quote appears
///   in the middle of an unquoted field, text follows a closing quote or a carriage return is
///   not part of a line ending
pub fn parse(input: &str) -> Result<Vec<Vec<String>>, ValidationError> {
    let input = input.strip_prefix('\u{feff}').unwrap_or(input);

    let mut records = Vec::new();
    let mut record: Vec<String> = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut field_started = false;
    let mut quote_closed = false;
    let mut line = 1;

    let mut chars = input.chars().peekable();
    while let Some(c) = chars.next() {
        if in_quotes {
            match c {
                '"' if chars.peek() == Some(&'"') => {
                    chars.next();
                    field.push('"');
                }
                '"' => {
                    in_quotes = false;
                    quote_closed = true;
                }
                '\n' => {
                    line += 1;
                    field.push(c);
                }
                _ => field.push(c),
            }
            continue;
        }

        if quote_closed && !matches!(c, ',' | '\r' | '\n') {
            return Err(ValidationError::MalformedBody(format!(
                "unexpected text after closing quote on line {}",
                line
            )));
        }

        match c {
            '"' if !field_started => {
                in_quotes = true;
                field_started = true;
            }
            '"' => {
                return Err(ValidationError::MalformedBody(format!(
                    "unexpected quote on line {}",
                    line
                )))
            }
            ',' => {
                record.push(std::mem::take(&mut field));
                field_started = false;
                quote_closed = false;
            }
            '\r' if chars.peek() == Some(&'\n') => {}
            '\r' => {
                return Err(ValidationError::MalformedBody(format!(
                    "unexpected carriage return on line {}",
                    line
                )))
            }
            '\n' => {
                finish_record(&mut records, &mut record, &mut field);
                field_started = false;
                quote_closed = false;
                line += 1;
            }
            _ => {
                field.push(c);
                field_started = true;
            }
        }
    }

    if in_quotes {
        return Err(ValidationError::MalformedBody(format!(
            "unterminated quoted field on line {}",
            line
        )));
    }
    finish_record(&mut records, &mut record, &mut field);

    Ok(records)
}

fn finish_record(records: &mut Vec<Vec<String>>, record: &mut Vec<String>, field: &mut String) {
    record.push(std::mem::take(field));

    let is_blank = record.len() == 1 && record[0].trim().is_empty();
    if is_blank {
        record.clear();
    } else {
        records.push(std::mem::take(record));
    }
}

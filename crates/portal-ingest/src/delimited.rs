//! Comma-delimited text parsing.
//!
//! A single left-to-right scan over the whole document, so quoted fields may
//! span lines. The parser never fails and never validates column counts;
//! short rows are left for the normalizer to discard.

/// A parsed row: trimmed field values in source order.
pub type Row = Vec<String>;

/// Parses a whole comma-separated document into rows of trimmed fields.
///
/// - `""` inside a quoted field yields one literal quote.
/// - Any other quote toggles quoting and is not emitted.
/// - Commas and line breaks inside quotes are kept verbatim.
/// - CR, LF, or CRLF end a row; blank lines produce no row.
/// - A trailing row without a final line break is still emitted.
pub fn parse_delimited(text: &str) -> Vec<Row> {
    let mut rows = Vec::new();
    let mut row: Row = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '"' if in_quotes && chars.peek() == Some(&'"') => {
                field.push('"');
                chars.next();
            }
            '"' => {
                in_quotes = !in_quotes;
            }
            ',' if !in_quotes => {
                row.push(normalize_field(&field));
                field.clear();
            }
            '\r' | '\n' if !in_quotes => {
                if !field.is_empty() || !row.is_empty() {
                    row.push(normalize_field(&field));
                    rows.push(std::mem::take(&mut row));
                    field.clear();
                }
                if c == '\r' && chars.peek() == Some(&'\n') {
                    chars.next();
                }
            }
            _ => {
                field.push(c);
            }
        }
    }

    // Don't forget the last row
    if !field.is_empty() || !row.is_empty() {
        row.push(normalize_field(&field));
        rows.push(row);
    }
    rows
}

/// Trims surrounding whitespace from a field value.
pub fn normalize_field(value: &str) -> String {
    value.trim().to_string()
}

/// Formats one field for delimited output.
///
/// Fields that contain a comma, quote, line break, or surrounding whitespace
/// are quoted with inner quotes doubled, so [`parse_delimited`] reads the
/// value back unchanged.
pub fn quote_field(value: &str) -> String {
    let needs_quotes =
        value.is_empty() || value.contains([',', '"', '\r', '\n']) || value.trim() != value;
    if needs_quotes {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

/// Joins fields into one delimited line (no terminator).
pub fn format_row<S: AsRef<str>>(fields: &[S]) -> String {
    fields
        .iter()
        .map(|field| quote_field(field.as_ref()))
        .collect::<Vec<_>>()
        .join(",")
}

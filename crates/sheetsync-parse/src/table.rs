//! CSV export reader.
//!
//! The first record is the header row. Headers are normalised the way
//! dataframe readers do it, so every column ends up with a unique key:
//! blank headers become `Unnamed: {index}` and repeats get `.1`, `.2`, ...

use std::collections::{HashMap, HashSet};

use crate::error::ParseError;

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// A header row plus data rows, every row as wide as the header.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    /// Values of one column, top to bottom.
    pub fn column(&self, index: usize) -> impl Iterator<Item = &str> {
        self.rows
            .iter()
            .map(move |row| row.get(index).map_or("", String::as_str))
    }
}

/// Parse a CSV export into a [`Table`].
///
/// # Errors
///
/// Returns [`ParseError::Empty`] without a header row,
/// [`ParseError::RaggedRow`] when a row carries data beyond the header width,
/// and [`ParseError::Csv`] for malformed CSV or invalid UTF-8.
pub fn parse_csv(bytes: &[u8]) -> Result<Table, ParseError> {
    let bytes = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(bytes);

    let mut records = reader.records();
    let header = match records.next() {
        Some(record) => record?,
        None => return Err(ParseError::Empty),
    };
    let headers = normalise_headers(header.iter());
    let width = headers.len();

    let mut rows = Vec::new();
    for record in records {
        let record = record?;
        if record.len() == 1 && record[0].is_empty() {
            continue;
        }
        if record.len() > width && record.iter().skip(width).any(|f| !f.is_empty()) {
            return Err(ParseError::RaggedRow {
                line: record.position().map_or(0, csv::Position::line),
                expected: width,
                found: record.len(),
            });
        }
        let mut row: Vec<String> = record.iter().take(width).map(str::to_string).collect();
        row.resize(width, String::new());
        rows.push(row);
    }

    tracing::debug!(columns = width, rows = rows.len(), "parsed csv export");
    Ok(Table { headers, rows })
}

fn normalise_headers<'a>(raw: impl Iterator<Item = &'a str>) -> Vec<String> {
    let named: Vec<String> = raw
        .enumerate()
        .map(|(i, h)| {
            if h.trim().is_empty() {
                format!("Unnamed: {i}")
            } else {
                h.to_string()
            }
        })
        .collect();

    let mut taken: HashSet<String> = HashSet::new();
    let mut next_suffix: HashMap<String, usize> = HashMap::new();
    let mut out = Vec::with_capacity(named.len());

    for name in named {
        let mut unique = name.clone();
        if taken.contains(&unique) {
            let mut n = next_suffix.get(&name).copied().unwrap_or(1);
            loop {
                unique = format!("{name}.{n}");
                if !taken.contains(&unique) {
                    break;
                }
                n += 1;
            }
            next_suffix.insert(name, n + 1);
        }
        taken.insert(unique.clone());
        out.push(unique);
    }
    out
}

//! Flat records: one JSON object per CSV data row, keyed by header.
//!
//! Values are typed per column the way a dataframe reader would type them:
//! a column whose non-missing cells are all integers becomes JSON integers,
//! all numbers becomes JSON floats, all `true`/`false` becomes booleans, and
//! anything else stays text. Missing cells are `null`.

use serde_json::{Number, Value};
use sheetsync_core::Record;
use sheetsync_parse::Table;

/// Cell values read as missing.
const MISSING_MARKERS: &[&str] = &[
    "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ColumnKind {
    Integer,
    Float,
    Boolean,
    Text,
}

fn is_missing(value: &str) -> bool {
    let value = value.trim();
    MISSING_MARKERS.iter().any(|m| *m == value)
}

fn parse_bool(value: &str) -> Option<bool> {
    let value = value.trim();
    if value.eq_ignore_ascii_case("true") {
        Some(true)
    } else if value.eq_ignore_ascii_case("false") {
        Some(false)
    } else {
        None
    }
}

/// Whole number in `i64` or `u64` range.
fn parse_integer(value: &str) -> Option<Value> {
    let value = value.trim();
    value
        .parse::<i64>()
        .map(Value::from)
        .or_else(|_| value.parse::<u64>().map(Value::from))
        .ok()
}

/// Optional sign followed by digits only.
fn is_integer_text(value: &str) -> bool {
    let value = value.trim();
    let digits = value.strip_prefix(['-', '+']).unwrap_or(value);
    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
}

/// Finite decimal number; `inf` and similar words do not count.
fn parse_float(value: &str) -> Option<f64> {
    let value = value.trim();
    if !value.bytes().any(|b| b.is_ascii_digit()) {
        return None;
    }
    value.parse::<f64>().ok().filter(|f| f.is_finite())
}

fn infer_kind<'a>(values: impl Iterator<Item = &'a str>) -> ColumnKind {
    let mut kind: Option<ColumnKind> = None;
    for value in values.filter(|v| !is_missing(v)) {
        let this = if parse_integer(value).is_some() {
            ColumnKind::Integer
        } else if is_integer_text(value) {
            // too wide for any integer type; a float would round it
            return ColumnKind::Text;
        } else if parse_float(value).is_some() {
            ColumnKind::Float
        } else if parse_bool(value).is_some() {
            ColumnKind::Boolean
        } else {
            return ColumnKind::Text;
        };
        kind = Some(match (kind, this) {
            (None, k) => k,
            (Some(a), b) if a == b => a,
            (Some(ColumnKind::Integer | ColumnKind::Float), ColumnKind::Integer | ColumnKind::Float) => {
                ColumnKind::Float
            }
            _ => return ColumnKind::Text,
        });
    }
    // an all-missing column has nothing to type
    kind.unwrap_or(ColumnKind::Text)
}

fn convert(value: &str, kind: ColumnKind) -> Value {
    if is_missing(value) {
        return Value::Null;
    }
    let converted = match kind {
        ColumnKind::Integer => parse_integer(value),
        ColumnKind::Float => parse_float(value).and_then(Number::from_f64).map(Value::Number),
        ColumnKind::Boolean => parse_bool(value).map(Value::Bool),
        ColumnKind::Text => None,
    };
    converted.unwrap_or_else(|| Value::String(value.to_string()))
}

/// Convert a parsed CSV table to records, one per data row, keys in header
/// order.
#[must_use]
pub fn to_records(table: &Table) -> Vec<Record> {
    let kinds: Vec<ColumnKind> = (0..table.headers.len())
        .map(|i| infer_kind(table.column(i)))
        .collect();

    table
        .rows
        .iter()
        .map(|row| {
            table
                .headers
                .iter()
                .zip(&kinds)
                .enumerate()
                .map(|(i, (header, kind))| {
                    let value = row.get(i).map_or("", String::as_str);
                    (header.clone(), convert(value, *kind))
                })
                .collect::<Record>()
        })
        .collect()
}

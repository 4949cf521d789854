//! Worksheet parts: cell values rendered as displayed text, cell styles and
//! merged ranges.

use chrono::{Duration, NaiveDate};
use sheetsync_core::CellStyle;

use super::styles::{NumberKind, Styles};
use super::xml::{XmlEvent, attr, attr_usize, for_each_event};
use crate::error::ParseError;
use crate::grid::{Cell, CellPos, CellRange, Grid, MAX_COLS, MAX_ROWS, parse_a1, to_a1};

const MINUTES_PER_DAY: f64 = 1440.0;

/// Largest `rows x cols` area a worksheet may span.
pub(crate) const MAX_GRID_CELLS: usize = 4_000_000;

#[derive(Default)]
struct PendingCell {
    pos: (usize, usize),
    style: usize,
    kind: Option<String>,
    value: String,
    inline: String,
}

pub(crate) fn parse_worksheet(
    part: &str,
    xml: &[u8],
    shared: &[String],
    styles: &Styles,
) -> Result<(Grid, Vec<CellRange>), ParseError> {
    let mut grid = Grid::default();
    let mut merges = Vec::new();

    let mut row = 0usize;
    let mut next_col = 0usize;
    let mut next_row = 0usize;
    let mut cell: Option<PendingCell> = None;
    let mut in_value = false;
    let mut in_inline_text = false;
    let mut phonetic_depth = 0usize;

    for_each_event(part, xml, |event| {
        match event {
            XmlEvent::Start(tag) => match tag.local_name().as_ref() {
                b"row" => {
                    row = attr_usize(tag, b"r").map_or(next_row, |r| r.saturating_sub(1));
                    if row >= MAX_ROWS {
                        return Err(ParseError::InvalidReference(format!("row {}", row + 1)));
                    }
                    next_row = row + 1;
                    next_col = 0;
                }
                b"c" => {
                    let pos = match attr(tag, b"r") {
                        Some(reference) => parse_a1(&reference)
                            .ok_or_else(|| ParseError::InvalidReference(reference.clone()))?,
                        None if next_col < MAX_COLS => (row, next_col),
                        None => return Err(ParseError::InvalidReference(to_a1((row, next_col)))),
                    };
                    next_col = pos.1 + 1;
                    cell = Some(PendingCell {
                        pos,
                        style: attr_usize(tag, b"s").unwrap_or(0),
                        kind: attr(tag, b"t"),
                        ..PendingCell::default()
                    });
                }
                b"v" => in_value = cell.is_some(),
                b"t" => in_inline_text = cell.is_some(),
                b"rPh" => phonetic_depth += 1,
                b"mergeCell" => {
                    if let Some(reference) = attr(tag, b"ref") {
                        let range = CellRange::parse(&reference)?;
                        check_extent(part, &grid, range.end)?;
                        merges.push(range);
                    }
                }
                _ => {}
            },
            XmlEvent::End(name) => match name {
                b"v" => in_value = false,
                b"t" => in_inline_text = false,
                b"rPh" => phonetic_depth = phonetic_depth.saturating_sub(1),
                b"c" => {
                    if let Some(pending) = cell.take() {
                        let format = styles.get(pending.style).cloned().unwrap_or_default();
                        let text = render(&pending, shared, format.number);
                        // fill-only cells matter: legend swatches are often empty
                        if !text.is_empty() || format.style != CellStyle::default() {
                            check_extent(part, &grid, pending.pos)?;
                            grid.set(pending.pos, Cell { text, style: format.style });
                        }
                    }
                }
                _ => {}
            },
            XmlEvent::Text(text) => {
                if let Some(pending) = cell.as_mut() {
                    if in_value {
                        pending.value.push_str(text);
                    } else if in_inline_text && phonetic_depth == 0 {
                        pending.inline.push_str(text);
                    }
                }
            }
        }
        Ok(())
    })?;

    tracing::debug!(
        part,
        rows = grid.rows(),
        cols = grid.cols(),
        merges = merges.len(),
        "parsed worksheet"
    );
    Ok((grid, merges))
}

/// Reject a cell that would grow the grid past [`MAX_GRID_CELLS`].
fn check_extent(part: &str, grid: &Grid, (row, col): CellPos) -> Result<(), ParseError> {
    let rows = grid.rows().max(row + 1);
    let cols = grid.cols().max(col + 1);
    if rows.saturating_mul(cols) > MAX_GRID_CELLS {
        return Err(ParseError::TooLarge {
            part: part.to_string(),
            rows,
            cols,
            limit: MAX_GRID_CELLS,
        });
    }
    Ok(())
}

fn render(cell: &PendingCell, shared: &[String], number: NumberKind) -> String {
    match cell.kind.as_deref() {
        Some("s") => {
            let index = cell.value.trim().parse::<usize>().ok();
            match index.and_then(|i| shared.get(i)) {
                Some(text) => text.clone(),
                None => {
                    tracing::warn!(value = %cell.value, "shared string index out of range");
                    String::new()
                }
            }
        }
        Some("inlineStr") => cell.inline.clone(),
        Some("b") => match cell.value.trim() {
            "1" => "TRUE".into(),
            "0" => "FALSE".into(),
            other => other.to_string(),
        },
        Some("str" | "e" | "d") => cell.value.clone(),
        _ => {
            let raw = cell.value.trim();
            raw.parse::<f64>()
                .map_or_else(|_| raw.to_string(), |n| format_number(n, number))
        }
    }
}

/// Render a numeric value the way the sheet displays it.
pub(crate) fn format_number(value: f64, kind: NumberKind) -> String {
    if !value.is_finite() {
        return value.to_string();
    }
    match kind {
        NumberKind::General => format_general(value),
        NumberKind::Time => {
            let (_, minutes) = split_serial(value);
            format!("{:02}:{:02}", minutes / 60, minutes % 60)
        }
        NumberKind::Date => {
            let (days, _) = split_serial(value);
            serial_date(days).unwrap_or_else(|| format_general(value))
        }
        NumberKind::DateTime => {
            let (days, minutes) = split_serial(value);
            serial_date(days).map_or_else(
                || format_general(value),
                |date| format!("{date} {:02}:{:02}", minutes / 60, minutes % 60),
            )
        }
    }
}

#[allow(clippy::cast_possible_truncation)]
fn format_general(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        value.to_string()
    }
}

/// Serial date-time -> (whole days, minute of day), rounded to the minute.
#[allow(clippy::cast_possible_truncation)]
fn split_serial(value: f64) -> (i64, i64) {
    let total = (value * MINUTES_PER_DAY).round() as i64;
    (total.div_euclid(1440), total.rem_euclid(1440))
}

/// Days since the 1899-12-30 epoch (which absorbs the 1900 leap-year bug
/// for every date after February 1900).
fn serial_date(days: i64) -> Option<String> {
    let epoch = NaiveDate::from_ymd_opt(1899, 12, 30)?;
    let date = epoch.checked_add_signed(Duration::try_days(days)?)?;
    Some(date.format("%Y-%m-%d").to_string())
}

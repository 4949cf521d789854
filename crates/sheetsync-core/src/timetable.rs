//! Structured timetable documents.
//!
//! `timetable.json` is a nested object: sheet name -> room name -> time slot
//! -> list of class entries. `timetable_legend.json` groups the legend of each
//! sheet by fill colour and lists the schedule cells sharing that colour.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::ordered::OrderedMap;

/// Visual formatting of a spreadsheet cell.
///
/// Colours are `#RRGGBB`, or `theme:N` when the workbook refers to a theme
/// colour slot instead of a literal value. A tinted theme colour carries its
/// signed tint, e.g. `theme:4+0.4` or `theme:4-0.25`, so lighter and darker
/// shades of one slot stay distinct.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq, Hash)]
pub struct CellStyle {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fill: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_color: Option<String>,
    #[serde(default)]
    pub bold: bool,
    #[serde(default)]
    pub italic: bool,
}

/// A single class found in a room's row under a time slot column.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct ClassEntry {
    /// Trimmed cell text.
    pub text: String,
    /// Non-empty lines of `text`.
    pub lines: Vec<String>,
    /// A1 reference of the source cell (top-left cell of a merge).
    pub cell: String,
    /// Number of time slots the cell covers.
    pub span: u32,
    /// True when this slot is not the first one covered by the cell.
    #[serde(default)]
    pub continuation: bool,
    pub style: CellStyle,
    /// Label of the legend entry sharing this cell's fill colour.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub legend: Option<String>,
}

/// time slot -> entries
pub type RoomSchedule = OrderedMap<Vec<ClassEntry>>;
/// room name -> schedule
pub type SheetSchedule = OrderedMap<RoomSchedule>;
/// sheet name -> rooms
pub type Timetable = OrderedMap<SheetSchedule>;

/// All cells of one fill colour: the legend swatch and the schedule cells.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct LegendGroup {
    pub color: String,
    pub label: String,
    /// A1 reference of the legend swatch.
    pub legend_cell: String,
    /// A1 references of schedule cells with the same fill.
    pub entries: Vec<String>,
}

/// sheet name -> legend groups in order of appearance
pub type LegendDocument = OrderedMap<Vec<LegendGroup>>;

impl CellStyle {
    /// Key for theme slot `slot` with `tint` applied; a zero tint is `theme:N`.
    #[must_use]
    pub fn theme_color(slot: u32, tint: f64) -> String {
        if tint == 0.0 {
            format!("theme:{slot}")
        } else {
            format!("theme:{slot}{tint:+}")
        }
    }
}

impl ClassEntry {
    /// Build an entry from raw cell text, splitting it into trimmed lines.
    #[must_use]
    pub fn new(text: &str, cell: impl Into<String>, style: CellStyle) -> Self {
        let text = text.trim().to_string();
        let lines = text
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .map(str::to_string)
            .collect();
        Self {
            text,
            lines,
            cell: cell.into(),
            span: 1,
            continuation: false,
            style,
            legend: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    #[test]
    fn class_entry_splits_lines() {
        let entry = ClassEntry::new("  Physics 101\n\n  Dr. Lee ", "C4", CellStyle::default());
        assert_eq!(entry.text, "Physics 101\n\n  Dr. Lee");
        assert_eq!(entry.lines, vec!["Physics 101", "Dr. Lee"]);
        assert_eq!(entry.span, 1);
        assert!(!entry.continuation);
    }

    #[test]
    fn nested_timetable_serializes_as_objects() {
        let mut room = RoomSchedule::new();
        room.insert(
            "09:00-10:00",
            vec![ClassEntry::new("Maths", "B3", CellStyle::default())],
        );
        let mut sheet = SheetSchedule::new();
        sheet.insert("Room 1", room);
        let mut timetable = Timetable::new();
        timetable.insert("Monday", sheet);

        let value = serde_json::to_value(&timetable).unwrap();
        assert_eq!(
            value,
            json!({
                "Monday": {
                    "Room 1": {
                        "09:00-10:00": [{
                            "text": "Maths",
                            "lines": ["Maths"],
                            "cell": "B3",
                            "span": 1,
                            "continuation": false,
                            "style": {"bold": false, "italic": false}
                        }]
                    }
                }
            })
        );
    }
}

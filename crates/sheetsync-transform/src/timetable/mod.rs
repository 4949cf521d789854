//! Structured timetable extraction.
//!
//! Each sheet is walked on its merge-expanded grid. Rows holding enough
//! time-slot headers open a block; inside a block the room column names the
//! rows and every non-empty slot cell becomes a [`ClassEntry`]. Filled cells
//! outside the schedule form the legend, and entries sharing a legend fill
//! colour are linked to it.

mod legend;
mod slot;

pub use slot::{TimeSlot, parse_time_slot};

use std::collections::HashSet;
use std::ops::Range;

use sheetsync_core::{
    CellStyle, ClassEntry, CoreError, LegendDocument, LegendGroup, RoomSchedule, SheetSchedule, Timetable,
};
use sheetsync_parse::{CellPos, Grid, Sheet, Workbook, to_a1};

/// Extraction settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimetableOptions {
    /// A header row needs at least this many distinct time-slot cells.
    pub min_slot_columns: usize,
    /// Fills that never form a legend group, normalised (`#RRGGBB`, `theme:N`,
    /// `theme:N+T`).
    pub ignore_fills: Vec<String>,
}

impl Default for TimetableOptions {
    fn default() -> Self {
        Self {
            min_slot_columns: 2,
            ignore_fills: vec!["#FFFFFF".to_string()],
        }
    }
}

impl TimetableOptions {
    /// Validate and normalise settings.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Validation`] when `min_slot_columns` is zero or a
    /// fill is neither `#RRGGBB` nor a theme colour (`theme:N`, `theme:N-T`).
    pub fn new<S: AsRef<str>>(min_slot_columns: usize, ignore_fills: &[S]) -> Result<Self, CoreError> {
        if min_slot_columns == 0 {
            return Err(CoreError::Validation(
                "min_slot_columns must be at least 1".to_string(),
            ));
        }
        let ignore_fills = ignore_fills
            .iter()
            .map(|raw| {
                let raw = raw.as_ref();
                normalise_fill(raw)
                    .ok_or_else(|| CoreError::Validation(format!("invalid fill colour '{raw}'")))
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            min_slot_columns,
            ignore_fills,
        })
    }

    fn ignores(&self, fill: &str) -> bool {
        self.ignore_fills.iter().any(|f| f.eq_ignore_ascii_case(fill))
    }
}

fn normalise_fill(raw: &str) -> Option<String> {
    let raw = raw.trim();
    if let Some(theme) = raw.strip_prefix("theme:") {
        let (slot, tint) = match theme.find(['+', '-']) {
            Some(at) => (&theme[..at], theme[at..].parse::<f64>().ok().filter(|t| t.is_finite())?),
            None => (theme, 0.0),
        };
        return slot
            .parse::<u32>()
            .ok()
            .map(|slot| CellStyle::theme_color(slot, tint));
    }
    let hex = raw.strip_prefix('#').unwrap_or(raw);
    (hex.len() == 6 && hex.chars().all(|c| c.is_ascii_hexdigit()))
        .then(|| format!("#{}", hex.to_ascii_uppercase()))
}

/// The two documents produced from a workbook.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractedTimetable {
    pub timetable: Timetable,
    pub legend: LegendDocument,
}

impl ExtractedTimetable {
    #[must_use]
    pub fn room_count(&self) -> usize {
        self.timetable.values().map(|sheet| sheet.len()).sum()
    }

    /// Distinct class cells; continuation slots are not counted again.
    #[must_use]
    pub fn entry_count(&self) -> usize {
        self.timetable
            .values()
            .flat_map(|sheet| sheet.values())
            .flat_map(|room| room.values())
            .flatten()
            .filter(|e| !e.continuation)
            .count()
    }
}

/// Walk every sheet of the workbook. Sheets without a time-slot header row
/// are listed with an empty schedule.
#[must_use]
pub fn extract_timetable(workbook: &Workbook, options: &TimetableOptions) -> ExtractedTimetable {
    let mut out = ExtractedTimetable::default();
    for sheet in &workbook.sheets {
        let (schedule, groups) = extract_sheet(sheet, options);
        out.timetable.insert(sheet.name.as_str(), schedule);
        out.legend.insert(sheet.name.as_str(), groups);
    }
    tracing::info!(
        sheets = out.timetable.len(),
        rooms = out.room_count(),
        entries = out.entry_count(),
        "extracted timetable"
    );
    out
}

struct HeaderRow {
    row: usize,
    /// Slot for every column under a time-slot header, left to right.
    slots: Vec<(usize, TimeSlot)>,
}

fn extract_sheet(
    sheet: &Sheet,
    options: &TimetableOptions,
) -> (SheetSchedule, Vec<LegendGroup>) {
    let grid = sheet.expanded_grid();
    let headers = find_header_rows(&grid, options.min_slot_columns);

    let mut schedule = SheetSchedule::new();
    // header, slot and room cells of schedule rows; never legend swatches
    let mut claimed: HashSet<CellPos> = HashSet::new();

    for (i, header) in headers.iter().enumerate() {
        claimed.extend((0..grid.cols()).map(|col| (header.row, col)));
        let end = headers.get(i + 1).map_or(grid.rows(), |next| next.row);
        walk_block(&grid, header, header.row + 1..end, &mut schedule, &mut claimed);
    }

    let mut groups = legend::collect(&grid, &claimed, options);
    legend::link(&mut schedule, &mut groups);

    tracing::debug!(
        sheet = %sheet.name,
        header_rows = headers.len(),
        rooms = schedule.len(),
        legend = groups.len(),
        "walked sheet"
    );
    (schedule, groups)
}

fn find_header_rows(grid: &Grid, min_slot_columns: usize) -> Vec<HeaderRow> {
    let mut headers = Vec::new();
    for row in 0..grid.rows() {
        let mut slots = Vec::new();
        let mut origins = HashSet::new();
        for col in 0..grid.cols() {
            let origin = grid.origin((row, col));
            // rows filled down from a vertically merged header are not headers
            if origin.0 != row {
                continue;
            }
            if let Some(slot) = parse_time_slot(grid.text((row, col))) {
                slots.push((col, slot));
                origins.insert(origin);
            }
        }
        if origins.len() >= min_slot_columns {
            headers.push(HeaderRow { row, slots });
        }
    }
    headers
}

/// Right-most column left of the first slot column with text in any data
/// row; column 0 when none has any. `None` when slots start at column 0.
fn room_column(grid: &Grid, first_slot: usize, rows: &Range<usize>) -> Option<usize> {
    if first_slot == 0 {
        return None;
    }
    (0..first_slot)
        .rev()
        .find(|&col| rows.clone().any(|row| !grid.text((row, col)).trim().is_empty()))
        .or(Some(0))
}

fn walk_block(
    grid: &Grid,
    header: &HeaderRow,
    rows: Range<usize>,
    schedule: &mut SheetSchedule,
    claimed: &mut HashSet<CellPos>,
) {
    let Some(&(first_slot, _)) = header.slots.first() else {
        return;
    };
    let room_col = room_column(grid, first_slot, &rows);
    let mut current: Option<String> = None;

    for row in rows {
        let room_text = room_col
            .map(|col| grid.text((row, col)).trim())
            .filter(|t| !t.is_empty());
        let has_content = header
            .slots
            .iter()
            .any(|&(col, _)| !grid.text((row, col)).trim().is_empty());

        let room = match (room_text, room_col) {
            (Some(text), _) => text.to_string(),
            (None, None) if has_content => format!("Row {}", row + 1),
            (None, Some(_)) if has_content => match &current {
                Some(room) => room.clone(),
                // content after a separator belongs to whatever sits below
                // the schedule, usually the legend
                None => continue,
            },
            _ => {
                current = None;
                continue;
            }
        };

        claimed.extend(header.slots.iter().map(|&(col, _)| (row, col)));
        if let Some(col) = room_col {
            claimed.insert((row, col));
        }
        add_entries(grid, header, row, schedule.entry_or_default(&room));
        current = Some(room);
    }
}

fn add_entries(grid: &Grid, header: &HeaderRow, row: usize, room: &mut RoomSchedule) {
    let mut seen: HashSet<(CellPos, String)> = HashSet::new();

    for &(col, slot) in &header.slots {
        let pos = (row, col);
        let Some(cell) = grid.get(pos).filter(|c| !c.is_blank()) else {
            continue;
        };
        let origin = grid.origin(pos);
        // listed once, on the first row of a vertical merge
        if origin.0 != row {
            continue;
        }
        let label = slot.label();
        if !seen.insert((origin, label.clone())) {
            continue;
        }

        let mut covered: Vec<String> = Vec::new();
        for &(other, other_slot) in &header.slots {
            let other_label = other_slot.label();
            if grid.origin((row, other)) == origin && !covered.contains(&other_label) {
                covered.push(other_label);
            }
        }

        let mut entry = ClassEntry::new(&cell.text, to_a1(origin), cell.style.clone());
        entry.span = u32::try_from(covered.len()).unwrap_or(u32::MAX);
        entry.continuation = covered.first().is_some_and(|first| *first != label);
        room.entry_or_default(&label).push(entry);
    }
}

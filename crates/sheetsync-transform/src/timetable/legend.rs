//! Legend swatches and the fill-colour link between legend and schedule.

use std::collections::HashSet;

use sheetsync_core::{LegendGroup, SheetSchedule};
use sheetsync_parse::{CellPos, Grid, to_a1};

use super::TimetableOptions;

/// Collect legend groups from every filled cell the schedule walk did not
/// claim. A swatch is labelled by its own text or, when empty, by the
/// nearest text to its right. The first swatch of a colour wins.
pub(super) fn collect(
    grid: &Grid,
    claimed: &HashSet<CellPos>,
    options: &TimetableOptions,
) -> Vec<LegendGroup> {
    let mut groups: Vec<LegendGroup> = Vec::new();

    for row in 0..grid.rows() {
        for col in 0..grid.cols() {
            let pos = (row, col);
            if claimed.contains(&pos) || grid.origin(pos) != pos {
                continue;
            }
            let Some(fill) = grid.get(pos).and_then(|c| c.style.fill.as_deref()) else {
                continue;
            };
            if options.ignores(fill) || groups.iter().any(|g| g.color.eq_ignore_ascii_case(fill)) {
                continue;
            }
            let Some(label) = swatch_label(grid, pos) else {
                continue;
            };
            tracing::debug!(cell = %to_a1(pos), fill, label = %label, "legend swatch");
            groups.push(LegendGroup {
                color: fill.to_string(),
                label,
                legend_cell: to_a1(pos),
                entries: Vec::new(),
            });
        }
    }
    groups
}

fn swatch_label(grid: &Grid, (row, col): CellPos) -> Option<String> {
    (col..grid.cols())
        .map(|c| grid.text((row, c)).trim())
        .find(|t| !t.is_empty())
        .map(str::to_string)
}

/// Tag every schedule entry whose fill matches a legend colour and record
/// the entry's cell on the group.
pub(super) fn link(schedule: &mut SheetSchedule, groups: &mut [LegendGroup]) {
    for room in schedule.values_mut() {
        for entries in room.values_mut() {
            for entry in entries {
                let Some(fill) = entry.style.fill.as_deref() else {
                    continue;
                };
                let Some(group) = groups.iter_mut().find(|g| g.color.eq_ignore_ascii_case(fill)) else {
                    continue;
                };
                entry.legend = Some(group.label.clone());
                if !group.entries.contains(&entry.cell) {
                    group.entries.push(entry.cell.clone());
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use sheetsync_core::{CellStyle, ClassEntry, RoomSchedule};
    use sheetsync_parse::Cell;

    use super::*;

    fn filled(text: &str, fill: &str) -> Cell {
        Cell::new(text).with_style(CellStyle {
            fill: Some(fill.into()),
            ..CellStyle::default()
        })
    }

    #[test]
    fn swatch_takes_label_from_right_neighbour() {
        let mut grid = Grid::new(3, 4);
        grid.set((0, 0), filled("", "#C9DAF8"));
        grid.set((0, 2), Cell::new("Lecture"));
        grid.set((1, 0), filled("Lab", "#FCE5CD"));
        grid.set((2, 0), filled("", "#D9EAD3"));

        let groups = collect(&grid, &HashSet::new(), &TimetableOptions::default());
        let labels: Vec<_> = groups.iter().map(|g| (g.color.as_str(), g.label.as_str(), g.legend_cell.as_str())).collect();
        assert_eq!(
            labels,
            vec![("#C9DAF8", "Lecture", "A1"), ("#FCE5CD", "Lab", "A2")]
        );
    }

    #[test]
    fn claimed_ignored_and_repeated_fills_are_skipped() {
        let mut grid = Grid::new(2, 3);
        grid.set((0, 0), filled("Header", "#FFE599"));
        grid.set((0, 1), filled("White", "#ffffff"));
        grid.set((1, 0), filled("Seminar", "#B6D7A8"));
        grid.set((1, 1), filled("Seminar again", "#b6d7a8"));

        let claimed = HashSet::from([(0, 0)]);
        let groups = collect(&grid, &claimed, &TimetableOptions::default());
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].label, "Seminar");
    }

    #[test]
    fn tints_of_one_theme_slot_are_separate_groups() {
        let mut grid = Grid::new(2, 1);
        grid.set((0, 0), filled("Lecture", &CellStyle::theme_color(4, 0.4)));
        grid.set((1, 0), filled("Lab", &CellStyle::theme_color(4, -0.25)));

        let groups = collect(&grid, &HashSet::new(), &TimetableOptions::default());
        let colors: Vec<_> = groups.iter().map(|g| (g.color.as_str(), g.label.as_str())).collect();
        assert_eq!(colors, vec![("theme:4+0.4", "Lecture"), ("theme:4-0.25", "Lab")]);
    }

    #[test]
    fn link_tags_entries_once_per_cell() {
        let style = CellStyle {
            fill: Some("#B6D7A8".into()),
            ..CellStyle::default()
        };
        let mut first = ClassEntry::new("CS101", "B2", style.clone());
        first.span = 2;
        let mut second = first.clone();
        second.continuation = true;

        let mut room = RoomSchedule::new();
        room.insert("08:00", vec![first]);
        room.insert("09:00", vec![second]);
        room.insert("10:00", vec![ClassEntry::new("Free", "D2", CellStyle::default())]);
        let mut schedule = SheetSchedule::new();
        schedule.insert("Lab A", room);

        let mut groups = vec![LegendGroup {
            color: "#B6D7A8".into(),
            label: "Lecture".into(),
            legend_cell: "F10".into(),
            entries: Vec::new(),
        }];
        link(&mut schedule, &mut groups);

        let room = schedule.get("Lab A").unwrap();
        assert_eq!(room.get("08:00").unwrap()[0].legend.as_deref(), Some("Lecture"));
        assert_eq!(room.get("09:00").unwrap()[0].legend.as_deref(), Some("Lecture"));
        assert_eq!(room.get("10:00").unwrap()[0].legend, None);
        assert_eq!(groups[0].entries, vec!["B2"]);
    }
}

//! # sheetsync-transform
//!
//! Turns parsed sheet exports into the output documents:
//!
//! - [`to_records`]: CSV table -> flat records for `sheet_backup.json`.
//! - [`extract_timetable`]: XLSX workbook -> nested timetable plus legend.

pub mod records;
pub mod timetable;

pub use records::to_records;
pub use timetable::{
    ExtractedTimetable, TimeSlot, TimetableOptions, extract_timetable, parse_time_slot,
};

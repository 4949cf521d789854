//! # sheetsync-core
//!
//! Output document types and error types for sheetsync.
//!
//! This crate provides the types shared across all sheetsync crates:
//! - Flat record documents (`sheet_backup.json`) and the error-status document
//! - The nested timetable document (sheet -> room -> time slot -> entries)
//! - Legend groups linking fill colours to schedule cells
//! - An insertion-ordered map that serializes as a JSON object
//! - CLI response types
//! - Cross-cutting error types

pub mod documents;
pub mod errors;
pub mod ordered;
pub mod responses;
pub mod timetable;

pub use documents::{ErrorDocument, Record, RecordsDocument, format_timestamp};
pub use errors::CoreError;
pub use ordered::OrderedMap;
pub use timetable::{
    CellStyle, ClassEntry, LegendDocument, LegendGroup, RoomSchedule, SheetSchedule, Timetable,
};

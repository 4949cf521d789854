//! # sheetsync-parse
//!
//! Readers for the two export formats of a sheet:
//!
//! - [`parse_csv`] turns a CSV export into a [`Table`] of header and rows.
//! - [`parse_xlsx`] turns an XLSX export into a [`Workbook`] whose sheets keep
//!   each cell's displayed text, fill and font styling, plus merged ranges.

mod error;
mod grid;
mod table;
mod xlsx;

pub use error::ParseError;
pub use grid::{Cell, CellPos, CellRange, Grid, column_letters, parse_a1, to_a1};
pub use table::{Table, parse_csv};
pub use xlsx::{Sheet, Workbook, parse_xlsx};

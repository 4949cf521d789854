//! XLSX workbook reader.
//!
//! Only what a timetable walk needs is read: sheet order and names, cell
//! text as displayed, fill and font styling, and merged ranges. Formulas are
//! taken from their cached values; charts, comments and drawings are ignored.

mod shared_strings;
mod styles;
mod workbook;
mod worksheet;
mod xml;

use std::io::{Cursor, Read};

use zip::ZipArchive;
use zip::result::ZipError;

use crate::error::ParseError;
use crate::grid::{CellRange, Grid};

use styles::Styles;

/// One worksheet as stored: cell values and styles, merges not yet applied.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Sheet {
    pub name: String,
    pub grid: Grid,
    pub merges: Vec<CellRange>,
}

impl Sheet {
    /// The grid with every merged range filled from its top-left cell.
    #[must_use]
    pub fn expanded_grid(&self) -> Grid {
        let mut grid = self.grid.clone();
        grid.expand_merges(&self.merges);
        grid
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Workbook {
    /// Sheets in tab order.
    pub sheets: Vec<Sheet>,
}

impl Workbook {
    #[must_use]
    pub fn sheet(&self, name: &str) -> Option<&Sheet> {
        self.sheets.iter().find(|s| s.name == name)
    }
}

/// Parse an `.xlsx` export.
///
/// # Errors
///
/// Returns [`ParseError::Zip`] when the bytes are not a zip archive,
/// [`ParseError::MissingPart`] when the workbook or a listed worksheet is
/// absent, and [`ParseError::Xml`] for malformed parts.
pub fn parse_xlsx(bytes: &[u8]) -> Result<Workbook, ParseError> {
    let mut archive = ZipArchive::new(Cursor::new(bytes))?;

    let workbook_xml = require_part(&mut archive, workbook::PART)?;
    let entries = workbook::parse_sheet_list(&workbook_xml)?;
    let targets = match read_part(&mut archive, workbook::RELS_PART)? {
        Some(xml) => workbook::parse_relationships(&xml)?,
        None => return Err(ParseError::MissingPart { part: workbook::RELS_PART.into() }),
    };

    let shared = match read_part(&mut archive, shared_strings::PART)? {
        Some(xml) => shared_strings::parse_shared_strings(&xml)?,
        None => Vec::new(),
    };
    let styles = match read_part(&mut archive, styles::PART)? {
        Some(xml) => Styles::parse(&xml)?,
        None => Styles::default(),
    };

    let mut sheets = Vec::with_capacity(entries.len());
    for entry in entries {
        let part = targets
            .get(&entry.rel_id)
            .ok_or_else(|| ParseError::MissingPart { part: format!("relationship {}", entry.rel_id) })?;
        let xml = require_part(&mut archive, part)?;
        let (grid, merges) = worksheet::parse_worksheet(part, &xml, &shared, &styles)?;
        sheets.push(Sheet { name: entry.name, grid, merges });
    }

    tracing::info!(sheets = sheets.len(), "parsed xlsx workbook");
    Ok(Workbook { sheets })
}

fn read_part<R: Read + std::io::Seek>(
    archive: &mut ZipArchive<R>,
    name: &str,
) -> Result<Option<Vec<u8>>, ParseError> {
    let mut file = match archive.by_name(name) {
        Ok(file) => file,
        Err(ZipError::FileNotFound) => return Ok(None),
        Err(e) => return Err(e.into()),
    };
    let mut buf = Vec::new();
    file.read_to_end(&mut buf).map_err(ZipError::from)?;
    Ok(Some(buf))
}

fn require_part<R: Read + std::io::Seek>(
    archive: &mut ZipArchive<R>,
    name: &str,
) -> Result<Vec<u8>, ParseError> {
    read_part(archive, name)?.ok_or_else(|| ParseError::MissingPart { part: name.to_string() })
}

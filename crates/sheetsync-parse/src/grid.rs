//! Dense cell grid with A1 references and merged ranges.

use sheetsync_core::CellStyle;

use crate::error::ParseError;

/// Zero-based `(row, col)` position.
pub type CellPos = (usize, usize);

/// Rows in an XLSX worksheet.
pub const MAX_ROWS: usize = 1_048_576;
/// Columns in an XLSX worksheet (`A` to `XFD`).
pub const MAX_COLS: usize = 16_384;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cell {
    /// Text as displayed in the sheet.
    pub text: String,
    pub style: CellStyle,
}

impl Cell {
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            style: CellStyle::default(),
        }
    }

    #[must_use]
    pub fn with_style(mut self, style: CellStyle) -> Self {
        self.style = style;
        self
    }

    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }
}

/// Inclusive rectangular range, e.g. `B2:D3`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellRange {
    pub start: CellPos,
    pub end: CellPos,
}

impl CellRange {
    /// Parse `A1:C2` (or a single `A1`).
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::InvalidReference`] for malformed references.
    pub fn parse(reference: &str) -> Result<Self, ParseError> {
        let (a, b) = reference.split_once(':').unwrap_or((reference, reference));
        let start = parse_a1(a).ok_or_else(|| ParseError::InvalidReference(reference.into()))?;
        let end = parse_a1(b).ok_or_else(|| ParseError::InvalidReference(reference.into()))?;
        Ok(Self {
            start: (start.0.min(end.0), start.1.min(end.1)),
            end: (start.0.max(end.0), start.1.max(end.1)),
        })
    }

    #[must_use]
    pub const fn contains(&self, (row, col): CellPos) -> bool {
        row >= self.start.0 && row <= self.end.0 && col >= self.start.1 && col <= self.end.1
    }

    #[must_use]
    pub const fn height(&self) -> usize {
        self.end.0 - self.start.0 + 1
    }
}

/// Column index to letters: 0 -> `A`, 25 -> `Z`, 26 -> `AA`.
#[must_use]
pub fn column_letters(col: usize) -> String {
    let mut n = col + 1;
    let mut letters = Vec::new();
    while n > 0 {
        let rem = (n - 1) % 26;
        letters.push(b'A' + u8::try_from(rem).unwrap_or(0));
        n = (n - 1) / 26;
    }
    letters.reverse();
    String::from_utf8(letters).unwrap_or_default()
}

/// Zero-based position to an A1 reference.
#[must_use]
pub fn to_a1((row, col): CellPos) -> String {
    format!("{}{}", column_letters(col), row + 1)
}

/// Parse an A1 reference (`$` anchors allowed) into a zero-based position.
/// References past `XFD` or row 1048576 are rejected.
#[must_use]
pub fn parse_a1(reference: &str) -> Option<CellPos> {
    let reference = reference.trim().replace('$', "");
    let split = reference.find(|c: char| c.is_ascii_digit())?;
    let (letters, digits) = reference.split_at(split);
    if letters.is_empty() || !letters.bytes().all(|b| b.is_ascii_alphabetic()) {
        return None;
    }
    let mut col = 0usize;
    for b in letters.bytes() {
        let digit = usize::from(b.to_ascii_uppercase() - b'A' + 1);
        col = col.checked_mul(26)?.checked_add(digit)?;
        if col > MAX_COLS {
            return None;
        }
    }
    let row: usize = digits.parse().ok()?;
    if row == 0 || row > MAX_ROWS {
        return None;
    }
    Some((row - 1, col - 1))
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Grid {
    cells: Vec<Vec<Cell>>,
    cols: usize,
    /// Merge origin for every cell covered by a merged range.
    origins: Vec<Vec<Option<CellPos>>>,
}

impl Grid {
    #[must_use]
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            cells: vec![vec![Cell::default(); cols]; rows],
            cols,
            origins: vec![vec![None; cols]; rows],
        }
    }

    /// Build a grid from rows of plain text, padding short rows.
    #[must_use]
    pub fn from_rows<S: AsRef<str>>(rows: &[Vec<S>]) -> Self {
        let cols = rows.iter().map(Vec::len).max().unwrap_or(0);
        let mut grid = Self::new(rows.len(), cols);
        for (r, row) in rows.iter().enumerate() {
            for (c, text) in row.iter().enumerate() {
                grid.cells[r][c].text = text.as_ref().to_string();
            }
        }
        grid
    }

    #[must_use]
    pub fn rows(&self) -> usize {
        self.cells.len()
    }

    #[must_use]
    pub const fn cols(&self) -> usize {
        self.cols
    }

    #[must_use]
    pub fn get(&self, (row, col): CellPos) -> Option<&Cell> {
        self.cells.get(row).and_then(|r| r.get(col))
    }

    /// Text of a cell, empty when out of bounds.
    #[must_use]
    pub fn text(&self, pos: CellPos) -> &str {
        self.get(pos).map_or("", |c| c.text.as_str())
    }

    /// Set a cell, growing the grid when needed.
    pub fn set(&mut self, (row, col): CellPos, cell: Cell) {
        self.ensure_size(row + 1, col + 1);
        self.cells[row][col] = cell;
    }

    pub fn cell_mut(&mut self, (row, col): CellPos) -> &mut Cell {
        self.ensure_size(row + 1, col + 1);
        &mut self.cells[row][col]
    }

    pub fn ensure_size(&mut self, rows: usize, cols: usize) {
        if cols > self.cols {
            for row in &mut self.cells {
                row.resize(cols, Cell::default());
            }
            for row in &mut self.origins {
                row.resize(cols, None);
            }
            self.cols = cols;
        }
        while self.cells.len() < rows {
            self.cells.push(vec![Cell::default(); self.cols]);
            self.origins.push(vec![None; self.cols]);
        }
    }

    /// Copy the top-left text and style of every merged range into the
    /// cells it covers, and remember each covered cell's origin.
    pub fn expand_merges(&mut self, merges: &[CellRange]) {
        for range in merges {
            self.ensure_size(range.end.0 + 1, range.end.1 + 1);
            let origin = self.cells[range.start.0][range.start.1].clone();
            for row in range.start.0..=range.end.0 {
                for col in range.start.1..=range.end.1 {
                    self.origins[row][col] = Some(range.start);
                    if (row, col) != range.start {
                        self.cells[row][col] = origin.clone();
                    }
                }
            }
        }
    }

    /// Position a cell's content comes from: the top-left of its merge, or
    /// the cell itself.
    #[must_use]
    pub fn origin(&self, pos: CellPos) -> CellPos {
        self.origins
            .get(pos.0)
            .and_then(|r| r.get(pos.1))
            .copied()
            .flatten()
            .unwrap_or(pos)
    }
}

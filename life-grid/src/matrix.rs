use crate::{GridError, Result};
use std::fmt;
use std::ops::{Index, IndexMut};
use std::str::FromStr;

/// A rectangular, row-major matrix of live (`true`) and dead (`false`) cells.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CellMatrix {
    rows: u32,
    cols: u32,
    cells: Vec<bool>,
}

impl CellMatrix {
    pub fn new(rows: u32, cols: u32, fill: bool) -> Result<Self> {
        Self::from_fn(rows, cols, |_| fill)
    }

    pub fn from_fn<F>(rows: u32, cols: u32, mut f: F) -> Result<Self>
    where
        F: FnMut(Loc) -> bool,
    {
        let (rows, cols) = Self::checked_dimensions(rows.into(), cols.into())?;
        let mut cells = Vec::with_capacity(rows as usize * cols as usize);
        for row in 0..rows {
            for col in 0..cols {
                cells.push(f(Loc::new(row, col)));
            }
        }
        Ok(Self { rows, cols, cells })
    }

    /// Builds a matrix from nested rows, which must be non-empty and all the same length.
    pub fn from_rows(rows: Vec<Vec<bool>>) -> Result<Self> {
        let num_cols = rows.first().map_or(0, Vec::len);
        if rows.is_empty() || num_cols == 0 {
            return Err(GridError::InvalidInput("matrix has no cells".to_string()));
        }
        if let Some((index, row)) = rows
            .iter()
            .enumerate()
            .find(|(_, row)| row.len() != num_cols)
        {
            return Err(GridError::InvalidInput(format!(
                "row {index} has {} cells, expected {num_cols}",
                row.len()
            )));
        }

        let too_large = |_| GridError::InvalidInput("matrix is too large".to_string());
        let num_rows = u32::try_from(rows.len()).map_err(too_large)?;
        let num_cols = u32::try_from(num_cols).map_err(too_large)?;
        Ok(Self {
            rows: num_rows,
            cols: num_cols,
            cells: rows.into_iter().flatten().collect(),
        })
    }

    /// Parses one text line per row. `1 O o * #` are alive, `0 .` are dead.
    pub fn from_pattern(pattern: &str) -> Result<Self> {
        let rows = pattern
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(|line| line.chars().map(parse_cell).collect::<Result<Vec<bool>>>())
            .collect::<Result<Vec<Vec<bool>>>>()?;
        Self::from_rows(rows)
    }

    /// Validates externally supplied dimensions, which may be non-positive.
    pub fn checked_dimensions(rows: i64, cols: i64) -> Result<(u32, u32)> {
        match (u32::try_from(rows), u32::try_from(cols)) {
            (Ok(r), Ok(c)) if r > 0 && c > 0 => Ok((r, c)),
            _ => Err(GridError::InvalidDimension { rows, cols }),
        }
    }

    pub(crate) fn from_raw(rows: u32, cols: u32, cells: Vec<bool>) -> Self {
        debug_assert_eq!(cells.len(), rows as usize * cols as usize);
        Self { rows, cols, cells }
    }

    pub fn rows(&self) -> u32 {
        self.rows
    }

    pub fn cols(&self) -> u32 {
        self.cols
    }

    pub fn shape(&self) -> (u32, u32) {
        (self.rows, self.cols)
    }

    pub fn num_cells(&self) -> usize {
        self.cells.len()
    }

    pub fn num_alive(&self) -> usize {
        self.cells.iter().filter(|&&alive| alive).count()
    }

    pub fn cells_iter(&self) -> impl DoubleEndedIterator<Item = &bool> + Clone {
        self.cells.iter()
    }

    pub fn rows_iter(&self) -> impl DoubleEndedIterator<Item = &[bool]> + Clone {
        self.cells.chunks_exact(self.cols as usize)
    }

    pub fn get(&self, loc: Loc) -> Option<bool> {
        loc.grid_index(self.rows, self.cols)
            .map(|index| self.cells[index])
    }

    pub(crate) fn get_mut(&mut self, loc: Loc) -> Option<&mut bool> {
        loc.grid_index(self.rows, self.cols)
            .map(|index| &mut self.cells[index])
    }
}

fn parse_cell(c: char) -> Result<bool> {
    match c {
        '1' | 'O' | 'o' | '*' | '#' => Ok(true),
        '0' | '.' => Ok(false),
        other => Err(GridError::InvalidInput(format!(
            "unexpected cell character {other:?}"
        ))),
    }
}

impl FromStr for CellMatrix {
    type Err = GridError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_pattern(s)
    }
}

impl fmt::Display for CellMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.rows_iter() {
            for &alive in row {
                f.write_str(if alive { "O" } else { "." })?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

impl Index<Loc> for CellMatrix {
    type Output = bool;

    fn index(&self, loc: Loc) -> &Self::Output {
        let index = loc
            .grid_index(self.rows, self.cols)
            .unwrap_or_else(|| panic!("Index indices {}, {} out of bounds", loc.row, loc.col));
        &self.cells[index]
    }
}

impl IndexMut<Loc> for CellMatrix {
    fn index_mut(&mut self, loc: Loc) -> &mut Self::Output {
        self.get_mut(loc)
            .unwrap_or_else(|| panic!("Index_mut indices {}, {} out of bounds", loc.row, loc.col))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Loc {
    pub row: u32,
    pub col: u32,
}

impl Loc {
    pub fn new(row: u32, col: u32) -> Self {
        Self { row, col }
    }

    pub fn grid_index(&self, rows: u32, cols: u32) -> Option<usize> {
        if self.row < rows && self.col < cols {
            Some(self.row as usize * cols as usize + self.col as usize)
        } else {
            None
        }
    }
}

impl fmt::Display for Loc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

use crate::{CellMatrix, GridError, Loc, Random, Result};
use log::warn;
use std::fmt;

/// How a new grid's cells are filled.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InitPolicy {
    Zeros,
    Ones,
    Random,
}

impl InitPolicy {
    /// Maps a configuration value to a policy. Unrecognized values fall back to `Random`.
    pub fn from_config_str(value: &str) -> Self {
        match value {
            "zeros" => Self::Zeros,
            "ones" => Self::Ones,
            "random" => Self::Random,
            other => {
                warn!("Unrecognized grid initialization {other:?}, using \"random\"");
                Self::Random
            }
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Zeros => "zeros",
            Self::Ones => "ones",
            Self::Random => "random",
        }
    }
}

impl fmt::Display for InitPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The live simulation state. Its shape is fixed once built.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    cells: CellMatrix,
}

impl Grid {
    pub fn initialize(rows: u32, cols: u32, policy: InitPolicy) -> Result<Self> {
        Self::with_random(rows, cols, policy, &mut Random::new())
    }

    pub fn with_random(
        rows: u32,
        cols: u32,
        policy: InitPolicy,
        rand: &mut Random,
    ) -> Result<Self> {
        let cells = match policy {
            InitPolicy::Zeros => CellMatrix::new(rows, cols, false)?,
            InitPolicy::Ones => CellMatrix::new(rows, cols, true)?,
            InitPolicy::Random => CellMatrix::from_fn(rows, cols, |_| rand.next_bool(0.5))?,
        };
        Ok(Self { cells })
    }

    pub fn from_cells(cells: CellMatrix) -> Self {
        Self { cells }
    }

    pub fn rows(&self) -> u32 {
        self.cells.rows()
    }

    pub fn cols(&self) -> u32 {
        self.cells.cols()
    }

    pub fn read(&self) -> &CellMatrix {
        &self.cells
    }

    pub fn toggle(&mut self, loc: Loc) -> Result<()> {
        let (rows, cols) = self.cells.shape();
        let cell = self
            .cells
            .get_mut(loc)
            .ok_or(GridError::OutOfBounds { loc, rows, cols })?;
        *cell = !*cell;
        Ok(())
    }

    /// Swaps in a whole new generation, which must have the grid's shape.
    pub fn replace(&mut self, cells: CellMatrix) -> Result<()> {
        if cells.shape() != self.cells.shape() {
            return Err(GridError::DimensionMismatch {
                expected: self.cells.shape(),
                found: cells.shape(),
            });
        }
        self.cells = cells;
        Ok(())
    }
}

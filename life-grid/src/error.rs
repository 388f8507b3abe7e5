use crate::Loc;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, GridError>;

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum GridError {
    #[error("grid dimensions must be positive, got {rows} rows x {cols} cols")]
    InvalidDimension { rows: i64, cols: i64 },

    #[error("cell {loc} is outside the {rows} x {cols} grid")]
    OutOfBounds { loc: Loc, rows: u32, cols: u32 },

    #[error("expected a (rows, cols) = {expected:?} matrix, found {found:?}")]
    DimensionMismatch {
        expected: (u32, u32),
        found: (u32, u32),
    },

    #[error("malformed cell matrix: {0}")]
    InvalidInput(String),
}

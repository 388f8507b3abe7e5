#![deny(clippy::all)]
#![forbid(unsafe_code)]

//! Bounded Game of Life: the cell grid, the automaton engine that advances it,
//! and the paused/running controller that ties the two together.

pub mod engine;
mod error;
mod grid;
mod matrix;
mod random;
mod simulation;

pub use engine::{NeighborCounts, Neighborhood, neighbor_counts, next_cell_state, next_state};
pub use error::{GridError, Result};
pub use grid::{Grid, InitPolicy};
pub use matrix::{CellMatrix, Loc};
pub use random::Random;
pub use simulation::{RunState, Simulation};

//! The Life transition: zero-padded 8-neighbor counting and the B3/S23 rule.
//!
//! Cells beyond the grid edges count as dead. The grid never wraps around.

use crate::{CellMatrix, Loc};
use std::ops::Index;

const NEIGHBOR_OFFSETS: [(i32, i32); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// Computes the generation following `current`. The input is left untouched.
pub fn next_state(current: &CellMatrix) -> CellMatrix {
    let counts = neighbor_counts(current);
    let cells = current
        .cells_iter()
        .zip(counts.counts_iter())
        .map(|(&alive, &neighbors)| next_cell_state(alive, neighbors))
        .collect();
    CellMatrix::from_raw(current.rows(), current.cols(), cells)
}

pub fn next_cell_state(alive: bool, neighbors: u8) -> bool {
    if alive {
        (2..=3).contains(&neighbors)
    } else {
        neighbors == 3
    }
}

pub fn neighbor_counts(cells: &CellMatrix) -> NeighborCounts {
    let mut counts = Vec::with_capacity(cells.num_cells());
    for row in 0..cells.rows() {
        for col in 0..cells.cols() {
            counts.push(Neighborhood::new(cells, Loc::new(row, col)).num_live_neighbors());
        }
    }
    NeighborCounts {
        rows: cells.rows(),
        cols: cells.cols(),
        counts,
    }
}

/// Live-neighbor count of every cell, aligned with the matrix it was computed from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NeighborCounts {
    rows: u32,
    cols: u32,
    counts: Vec<u8>,
}

impl NeighborCounts {
    pub fn rows(&self) -> u32 {
        self.rows
    }

    pub fn cols(&self) -> u32 {
        self.cols
    }

    pub fn get(&self, loc: Loc) -> Option<u8> {
        loc.grid_index(self.rows, self.cols)
            .map(|index| self.counts[index])
    }

    pub fn counts_iter(&self) -> impl DoubleEndedIterator<Item = &u8> + Clone {
        self.counts.iter()
    }

    pub fn rows_iter(&self) -> impl DoubleEndedIterator<Item = &[u8]> + Clone {
        self.counts.chunks_exact(self.cols as usize)
    }
}

impl Index<Loc> for NeighborCounts {
    type Output = u8;

    fn index(&self, loc: Loc) -> &Self::Output {
        let index = loc
            .grid_index(self.rows, self.cols)
            .unwrap_or_else(|| panic!("Index indices {}, {} out of bounds", loc.row, loc.col));
        &self.counts[index]
    }
}

/// The up-to-8 in-bounds cells surrounding `center`.
pub struct Neighborhood<'a> {
    cells: &'a CellMatrix,
    center: Loc,
}

impl<'a> Neighborhood<'a> {
    pub fn new(cells: &'a CellMatrix, center: Loc) -> Self {
        Self { cells, center }
    }

    pub fn num_live_neighbors(&self) -> u8 {
        let mut result = 0;
        self.for_neighbor_cells(|alive| {
            if alive {
                result += 1;
            }
        });
        result
    }

    pub fn for_neighbor_cells<F>(&self, mut f: F)
    where
        F: FnMut(bool),
    {
        for (row_offset, col_offset) in NEIGHBOR_OFFSETS {
            if let Some(alive) = self
                .neighbor_loc(row_offset, col_offset)
                .and_then(|loc| self.cells.get(loc))
            {
                f(alive);
            }
        }
    }

    fn neighbor_loc(&self, row_offset: i32, col_offset: i32) -> Option<Loc> {
        Some(Loc::new(
            self.center.row.checked_add_signed(row_offset)?,
            self.center.col.checked_add_signed(col_offset)?,
        ))
    }
}

//! Property tests for the automaton engine and the grid mutation contract.

use life_grid::{
    CellMatrix, Grid, Loc, NeighborCounts, Neighborhood, neighbor_counts, next_cell_state,
    next_state,
};
use proptest::prelude::*;

fn cell_matrix() -> impl Strategy<Value = CellMatrix> {
    (1usize..12, 1usize..12).prop_flat_map(|(rows, cols)| {
        prop::collection::vec(prop::collection::vec(any::<bool>(), cols), rows)
            .prop_map(|rows| CellMatrix::from_rows(rows).unwrap())
    })
}

fn brute_force_count(cells: &CellMatrix, loc: Loc) -> u8 {
    let mut count = 0;
    for row in loc.row as i64 - 1..=loc.row as i64 + 1 {
        for col in loc.col as i64 - 1..=loc.col as i64 + 1 {
            if (row, col) == (loc.row as i64, loc.col as i64) || row < 0 || col < 0 {
                continue;
            }
            if cells.get(Loc::new(row as u32, col as u32)) == Some(true) {
                count += 1;
            }
        }
    }
    count
}

fn locs(cells: &CellMatrix) -> impl Iterator<Item = Loc> + '_ {
    (0..cells.rows()).flat_map(move |row| (0..cells.cols()).map(move |col| Loc::new(row, col)))
}

proptest! {
    #[test]
    fn all_dead_stays_dead(rows in 1u32..20, cols in 1u32..20) {
        let dead = CellMatrix::new(rows, cols, false).unwrap();
        prop_assert_eq!(next_state(&dead), dead);
    }

    #[test]
    fn counts_match_a_padded_window(cells in cell_matrix()) {
        let counts: NeighborCounts = neighbor_counts(&cells);
        prop_assert_eq!((counts.rows(), counts.cols()), cells.shape());
        for loc in locs(&cells) {
            let count = counts[loc];
            prop_assert!(count <= 8);
            prop_assert_eq!(count, brute_force_count(&cells, loc));
        }
    }

    #[test]
    fn next_state_applies_the_rule_cell_by_cell(cells in cell_matrix()) {
        let next = next_state(&cells);
        prop_assert_eq!(next.shape(), cells.shape());
        for loc in locs(&cells) {
            let neighbors = Neighborhood::new(&cells, loc).num_live_neighbors();
            prop_assert_eq!(next[loc], next_cell_state(cells[loc], neighbors));
        }
    }

    #[test]
    fn next_state_is_pure(cells in cell_matrix()) {
        let saved = cells.clone();
        let first = next_state(&cells);
        let second = next_state(&cells);
        prop_assert_eq!(&cells, &saved);
        prop_assert_eq!(first, second);
    }

    #[test]
    fn edge_cells_see_at_most_five_neighbors(cells in cell_matrix()) {
        let counts = neighbor_counts(&cells);
        for loc in locs(&cells) {
            let on_row_edge = loc.row == 0 || loc.row + 1 == cells.rows();
            let on_col_edge = loc.col == 0 || loc.col + 1 == cells.cols();
            let limit = match (on_row_edge, on_col_edge) {
                (true, true) => 3,
                (true, false) | (false, true) => 5,
                (false, false) => 8,
            };
            prop_assert!(counts[loc] <= limit, "{:?} has {} neighbors", loc, counts[loc]);
        }
    }

    #[test]
    fn toggle_flips_exactly_one_cell(cells in cell_matrix(), row in 0u32..12, col in 0u32..12) {
        let target = Loc::new(row % cells.rows(), col % cells.cols());
        let mut grid = Grid::from_cells(cells.clone());
        grid.toggle(target).unwrap();
        for loc in locs(&cells) {
            prop_assert_eq!(grid.read()[loc], cells[loc] != (loc == target));
        }
    }
}

use crate::{Grid, Loc, Result, next_state};
use log::{debug, info, trace};
use std::fmt;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RunState {
    #[default]
    Paused,
    Running,
}

impl RunState {
    pub fn toggled(self) -> Self {
        match self {
            Self::Paused => Self::Running,
            Self::Running => Self::Paused,
        }
    }
}

impl fmt::Display for RunState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Paused => "Paused",
            Self::Running => "Running",
        })
    }
}

/// Owns the grid and decides when it advances.
#[derive(Debug)]
pub struct Simulation {
    grid: Grid,
    run_state: RunState,
    generation: u64,
}

impl Simulation {
    pub fn new(grid: Grid) -> Self {
        Self {
            grid,
            run_state: RunState::Paused,
            generation: 0,
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn run_state(&self) -> RunState {
        self.run_state
    }

    pub fn is_running(&self) -> bool {
        self.run_state == RunState::Running
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn toggle_running(&mut self) -> RunState {
        self.run_state = self.run_state.toggled();
        info!("{} at generation {}", self.run_state, self.generation);
        self.run_state
    }

    /// Advances one generation if running. Returns whether the grid changed hands.
    pub fn tick(&mut self) -> Result<bool> {
        if !self.is_running() {
            return Ok(false);
        }
        self.step()?;
        Ok(true)
    }

    /// Advances one generation whatever the run state.
    pub fn step(&mut self) -> Result<()> {
        let next = next_state(self.grid.read());
        self.grid.replace(next)?;
        self.generation += 1;
        trace!(
            "Generation {}: {} alive",
            self.generation,
            self.grid.read().num_alive()
        );
        Ok(())
    }

    /// Flips one cell. Locations outside the grid are ignored.
    pub fn toggle_cell(&mut self, loc: Loc) -> bool {
        match self.grid.toggle(loc) {
            Ok(()) => true,
            Err(err) => {
                debug!("Ignoring click: {err}");
                false
            }
        }
    }
}

//! Backtracking solver.
//!
//! Completion and uniqueness checks both run on a private copy of the
//! caller's grid; the in-place search lives in [`backtrack`]. Solvability
//! and solution counts do not depend on search order, so those use the
//! most-constrained-cell search, while [`Solver::solve`] keeps row-major
//! order for a stable answer.

pub(crate) mod backtrack;

use crate::Grid;

/// Stateless backtracking solver; all state is per call.
#[derive(Debug, Clone, Copy, Default)]
pub struct Solver;

impl Solver {
    /// Create a new solver.
    pub fn new() -> Self {
        Self
    }

    /// Solve the puzzle, returning the solved grid if successful.
    ///
    /// The result is the first completion in row-major cell order with
    /// values tried in ascending order.
    pub fn solve(&self, grid: &Grid) -> Option<Grid> {
        let mut working = *grid;
        backtrack::solve_in_place(&mut working).then_some(working)
    }

    /// Whether the grid has at least one completion.
    pub fn is_solvable(&self, grid: &Grid) -> bool {
        self.count_solutions(grid, 1) == 1
    }

    /// Count solutions, stopping as soon as `limit` have been found.
    pub fn count_solutions(&self, grid: &Grid, limit: usize) -> usize {
        let mut working = *grid;
        backtrack::count_solutions(&mut working, limit)
    }

    /// Check if the puzzle has exactly one solution.
    pub fn has_unique_solution(&self, grid: &Grid) -> bool {
        self.count_solutions(grid, 2) == 1
    }
}

use crate::grid::{Grid, Position, CELL_COUNT, N};
use crate::solver::{backtrack, Solver};
use rand::{Rng, RngCore};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Random placements tried while seeding the starting position
pub const PLACEMENT_ATTEMPTS: usize = CELL_COUNT;

/// Random cells tried for removal while carving the puzzle
pub const REMOVAL_TRIALS: usize = CELL_COUNT;

/// A generated puzzle together with its unique solution
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Puzzle {
    /// The grid shown to the player (`0` = blank)
    pub puzzle: Grid,
    /// The only completion of `puzzle`
    pub solution: Grid,
}

/// Deterministic puzzle generator.
///
/// The same seed always draws the same sequence and so builds the same
/// puzzle. The sequence only orders placements and removals; it is not a
/// source of cryptographic randomness.
pub struct Generator {
    rng: SeededRng,
    solver: Solver,
}

impl Generator {
    /// Create a generator with a specific seed for reproducibility
    pub fn with_seed(seed: i64) -> Self {
        Self {
            rng: SeededRng::with_seed(seed),
            solver: Solver::new(),
        }
    }

    /// Generate a fresh puzzle and solve a copy of it for the solution
    pub fn generate_puzzle(&mut self) -> Puzzle {
        let mut puzzle = Grid::new();
        self.generate(&mut puzzle);

        let mut solution = puzzle;
        let solved = backtrack::solve_in_place(&mut solution);
        debug_assert!(solved, "carved puzzle keeps a completion");

        Puzzle { puzzle, solution }
    }

    /// Overwrite `grid` with a uniquely solvable puzzle.
    ///
    /// Phase one scatters random givens, keeping each only if the grid stays
    /// completable, then completes it. Phase two blanks random cells, keeping
    /// each blank only if the solution stays unique.
    pub fn generate(&mut self, grid: &mut Grid) {
        *grid = Grid::new();
        self.seed_starting_position(grid);

        let solved = backtrack::solve_in_place(grid);
        debug_assert!(solved, "every accepted placement was completable");

        self.carve_blanks(grid);
        debug!(
            givens = grid.given_count(),
            blanks = grid.empty_count(),
            "generated puzzle"
        );
    }

    /// Scatter random givens over an empty grid
    fn seed_starting_position(&mut self, grid: &mut Grid) {
        let mut placed = 0;
        for _ in 0..PLACEMENT_ATTEMPTS {
            let row = self.draw();
            let col = self.draw();
            let value = self.draw() as u8 + 1;
            let pos = Position::new(row, col);

            if grid.is_empty_at(pos) && grid.is_valid(row, col, value) {
                grid.set(pos, value);
                if self.solver.is_solvable(grid) {
                    placed += 1;
                } else {
                    grid.clear(pos);
                }
            }
        }
        debug!(placed, "seeded starting position");
    }

    /// Blank random cells while the solution stays unique.
    ///
    /// Every trial consumes budget, including ones that land on a cell that
    /// is already blank.
    fn carve_blanks(&mut self, grid: &mut Grid) {
        let mut removed = 0;
        for _ in 0..REMOVAL_TRIALS {
            let row = self.draw();
            let col = self.draw();
            let pos = Position::new(row, col);

            let Some(backup) = grid.get(pos) else {
                continue;
            };
            grid.clear(pos);
            if self.solver.has_unique_solution(grid) {
                removed += 1;
            } else {
                grid.set(pos, backup);
            }
        }
        debug!(removed, "carved blanks");
    }

    /// Uniform draw in `0..9`. Sampled as `u32` so the sequence is the same
    /// on 32- and 64-bit targets.
    fn draw(&mut self) -> usize {
        self.rng.gen_range(0..N as u32) as usize
    }
}

/// PCG-style PRNG seeded from the passphrase digest.
///
/// Kept in-crate so puzzles stay identical across `rand` releases; `rand`
/// only supplies range sampling on top of it.
struct SeededRng {
    state: u64,
}

impl SeededRng {
    fn with_seed(seed: i64) -> Self {
        Self {
            state: (seed as u64).wrapping_add(1),
        }
    }

    fn step(&mut self) -> u32 {
        self.state = self
            .state
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        let xorshifted = (((self.state >> 18) ^ self.state) >> 27) as u32;
        let rot = (self.state >> 59) as u32;
        xorshifted.rotate_right(rot)
    }
}

impl RngCore for SeededRng {
    fn next_u32(&mut self) -> u32 {
        self.step()
    }

    fn next_u64(&mut self) -> u64 {
        rand_core::impls::next_u64_via_u32(self)
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        rand_core::impls::fill_bytes_via_next(self, dest)
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand_core::Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}

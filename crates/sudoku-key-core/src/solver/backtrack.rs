//! In-place recursive search.
//!
//! Both searches track the values already used in every row, column and
//! box as bitmasks and abandon a branch as soon as some empty cell has no
//! value left. Counting branches on the most constrained cell; solving
//! walks cells in row-major order so it always lands on the same
//! completion.

use crate::grid::{Grid, Position, BOX_SIZE, N};

/// Bits `1..=9` set.
const ALL_VALUES: u16 = 0b11_1111_1110;

const fn bit(value: u8) -> u16 {
    1 << value
}

fn box_of(pos: Position) -> usize {
    (pos.row / BOX_SIZE) * BOX_SIZE + pos.col / BOX_SIZE
}

/// Values used per row, column and box.
#[derive(Debug, Clone, Copy)]
struct Used {
    rows: [u16; N],
    cols: [u16; N],
    boxes: [u16; N],
}

impl Used {
    /// `None` if two filled cells already clash.
    fn from_grid(grid: &Grid) -> Option<Self> {
        let mut used = Self {
            rows: [0; N],
            cols: [0; N],
            boxes: [0; N],
        };
        for pos in Position::all() {
            let Some(value) = grid.get(pos) else {
                continue;
            };
            if used.free(pos) & bit(value) == 0 {
                return None;
            }
            used.mark(pos, value);
        }
        Some(used)
    }

    fn free(&self, pos: Position) -> u16 {
        !(self.rows[pos.row] | self.cols[pos.col] | self.boxes[box_of(pos)]) & ALL_VALUES
    }

    fn mark(&mut self, pos: Position, value: u8) {
        self.rows[pos.row] |= bit(value);
        self.cols[pos.col] |= bit(value);
        self.boxes[box_of(pos)] |= bit(value);
    }

    fn unmark(&mut self, pos: Position, value: u8) {
        self.rows[pos.row] &= !bit(value);
        self.cols[pos.col] &= !bit(value);
        self.boxes[box_of(pos)] &= !bit(value);
    }
}

enum Branch {
    Complete,
    DeadEnd,
    On(Position, u16),
}

/// Pick the empty cell with the fewest remaining values.
fn most_constrained(grid: &Grid, used: &Used) -> Branch {
    let mut best: Option<(Position, u16)> = None;
    for pos in Position::all() {
        if !grid.is_empty_at(pos) {
            continue;
        }
        let free = used.free(pos);
        match free.count_ones() {
            0 => return Branch::DeadEnd,
            n if best.map_or(true, |(_, b)| n < b.count_ones()) => best = Some((pos, free)),
            _ => {}
        }
    }
    match best {
        Some((pos, free)) => Branch::On(pos, free),
        None => Branch::Complete,
    }
}

fn place(grid: &mut Grid, used: &mut Used, pos: Position, value: u8) {
    grid.set(pos, value);
    used.mark(pos, value);
}

fn take_back(grid: &mut Grid, used: &mut Used, pos: Position, value: u8) {
    grid.clear(pos);
    used.unmark(pos, value);
}

/// Fill every empty cell, row-major, with the lowest value that still
/// leads to a completion.
///
/// This is the completion a plain row-major, ascending-value backtracker
/// finds first. Returns `true` with `grid` complete, or `false` with
/// `grid` untouched.
pub(crate) fn solve_in_place(grid: &mut Grid) -> bool {
    let Some(mut used) = Used::from_grid(grid) else {
        return false;
    };
    if count_from(grid, &mut used, 1) == 0 {
        return false;
    }

    for pos in Position::all() {
        if !grid.is_empty_at(pos) {
            continue;
        }
        let free = used.free(pos);
        for value in 1..=N as u8 {
            if free & bit(value) == 0 {
                continue;
            }
            place(grid, &mut used, pos, value);
            if count_from(grid, &mut used, 1) == 1 {
                break;
            }
            take_back(grid, &mut used, pos, value);
        }
        // A completion existed before this cell, so some value keeps one.
        debug_assert!(!grid.is_empty_at(pos));
    }
    true
}

/// Count completions of `grid`, returning early once `limit` is reached.
///
/// Each call returns its own subtotal; the grid is restored before return.
pub(crate) fn count_solutions(grid: &mut Grid, limit: usize) -> usize {
    match Used::from_grid(grid) {
        Some(mut used) => count_from(grid, &mut used, limit),
        None => 0,
    }
}

fn count_from(grid: &mut Grid, used: &mut Used, limit: usize) -> usize {
    if limit == 0 {
        return 0;
    }
    let (pos, free) = match most_constrained(grid, used) {
        Branch::Complete => return 1,
        Branch::DeadEnd => return 0,
        Branch::On(pos, free) => (pos, free),
    };

    let mut count = 0;
    for value in 1..=N as u8 {
        if count >= limit {
            break;
        }
        if free & bit(value) != 0 {
            place(grid, used, pos, value);
            count += count_from(grid, used, limit - count);
            take_back(grid, used, pos, value);
        }
    }
    count
}

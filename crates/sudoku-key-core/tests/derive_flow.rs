//! End-to-end derivation with scripted collectors.

use sudoku_key_core::{
    derive_key, prepare_challenge, repeated_hash, Collector, Grid, KeyError, KeyParams, Solver,
    CELL_COUNT, FIXED_SALT, KEY_SIZE, SEED_ITERATIONS,
};

/// Answers with the true solution and records how often it was asked.
struct Truthful {
    calls: usize,
}

impl Collector for Truthful {
    fn collect(
        &mut self,
        puzzle: &[u8; CELL_COUNT],
        solution: &str,
    ) -> sudoku_key_core::Result<String> {
        self.calls += 1;
        // Givens must agree with the solution the player is expected to find
        for (cell, digit) in puzzle.iter().zip(solution.bytes()) {
            if *cell != 0 {
                assert_eq!(*cell, digit - b'0');
            }
        }
        Ok(solution.to_string())
    }
}

/// Fills the blanks with a fixed answer string regardless of the puzzle.
struct Scripted(String);

impl Collector for Scripted {
    fn collect(&mut self, _: &[u8; CELL_COUNT], _: &str) -> sudoku_key_core::Result<String> {
        Ok(self.0.clone())
    }
}

#[test]
fn same_passphrase_same_key() {
    let params = KeyParams::with_iterations(16);
    let mut first = Truthful { calls: 0 };
    let mut second = Truthful { calls: 0 };

    let a = derive_key("open sesame", &params, &mut first).unwrap();
    let b = derive_key("open sesame", &params, &mut second).unwrap();

    assert_eq!(a, b);
    assert_eq!(first.calls, 1);
    assert_eq!(second.calls, 1);
}

#[test]
fn iterations_only_change_puzzle_half() {
    let mut collector = Truthful { calls: 0 };
    let a = derive_key("open sesame", &KeyParams::with_iterations(1), &mut collector).unwrap();
    let b = derive_key("open sesame", &KeyParams::with_iterations(2), &mut collector).unwrap();

    assert_eq!(a.partial_digest(), b.partial_digest());
    assert_ne!(a.puzzle_digest(), b.puzzle_digest());
}

#[test]
fn different_passphrases_differ() {
    let mut collector = Truthful { calls: 0 };
    let params = KeyParams::default();
    let a = derive_key("alpha", &params, &mut collector).unwrap();
    let b = derive_key("beta", &params, &mut collector).unwrap();
    assert_ne!(a, b);
}

#[test]
fn empty_passphrase_gets_full_key_and_unique_puzzle() {
    let params = KeyParams::default();
    let challenge = prepare_challenge("", &params).unwrap();

    assert!(Solver::new().has_unique_solution(&challenge.puzzle));
    assert!(challenge.solution.is_solved());
    assert!(challenge.puzzle.is_subset_of(&challenge.solution));

    let key = derive_key("", &params, &mut Truthful { calls: 0 }).unwrap();
    assert_eq!(key.as_bytes().len(), KEY_SIZE);
    assert_eq!(
        key.partial_digest(),
        &repeated_hash(b"", SEED_ITERATIONS, &FIXED_SALT)[..]
    );
}

#[test]
fn puzzle_grid_is_what_the_player_submits() {
    // Submitting the unsolved puzzle digits is rejected
    let challenge = prepare_challenge("lazy", &KeyParams::default()).unwrap();
    let mut lazy = Scripted(challenge.puzzle.to_digit_string());
    let result = derive_key("lazy", &KeyParams::default(), &mut lazy);
    assert!(matches!(result, Err(KeyError::ValidationFailed)));
}

#[test]
fn blank_entries_contributing_nothing_are_rejected() {
    // A front-end that drops empty cells produces a short string
    let challenge = prepare_challenge("short", &KeyParams::default()).unwrap();
    let partial: String = challenge
        .puzzle
        .to_cells()
        .iter()
        .filter(|&&v| v != 0)
        .map(|v| char::from(b'0' + v))
        .collect();
    assert!(partial.len() < CELL_COUNT);
    assert!(challenge.verify(&partial).is_err());
}

#[test]
fn every_single_cell_mismatch_is_rejected() {
    let challenge = prepare_challenge("strict", &KeyParams::default()).unwrap();
    let solution = challenge.solution_digits.clone();

    for index in 0..CELL_COUNT {
        let mut wrong = solution.clone().into_bytes();
        wrong[index] = if wrong[index] == b'1' { b'2' } else { b'1' };
        let wrong = String::from_utf8(wrong).unwrap();
        assert!(
            matches!(challenge.verify(&wrong), Err(KeyError::ValidationFailed)),
            "mismatch at cell {index} was accepted"
        );
    }
    assert!(challenge.verify(&solution).is_ok());
}

#[test]
fn solution_digits_parse_back_to_solution() {
    let challenge = prepare_challenge("parse", &KeyParams::default()).unwrap();
    let parsed = Grid::from_string(&challenge.solution_digits).unwrap();
    assert_eq!(parsed, challenge.solution);
}

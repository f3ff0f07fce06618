//! Passphrase → puzzle → composite key.
//!
//! The partial digest doubles as the generator seed source. The puzzle
//! digest is computed from the solution before the player ever sees the
//! grid; the collector only gates whether the key is released.

use crate::config::KeyParams;
use crate::error::{KeyError, Result};
use crate::generator::{Generator, Puzzle};
use crate::grid::{Grid, CELL_COUNT};
use crate::hash::{repeated_hash, HashDigest, DIGEST_SIZE, FIXED_SALT};
use std::fmt;
use tracing::{debug, info, warn};

/// Hash rounds for the partial digest (and therefore the seed)
pub const SEED_ITERATIONS: u16 = 9;

/// Length of the derived key: partial digest then puzzle digest
pub const KEY_SIZE: usize = 2 * DIGEST_SIZE;

/// Presents a puzzle to a human and returns their filled-in grid.
///
/// `puzzle` is row-major with `0` for blanks; non-zero cells are fixed.
/// `solution` is only there so a front-end can report success or failure
/// locally. It must never be shown. The returned string is the player's
/// grid in row-major order. Called exactly once per derivation.
pub trait Collector {
    fn collect(&mut self, puzzle: &[u8; CELL_COUNT], solution: &str) -> Result<String>;
}

impl<F> Collector for F
where
    F: FnMut(&[u8; CELL_COUNT], &str) -> Result<String>,
{
    fn collect(&mut self, puzzle: &[u8; CELL_COUNT], solution: &str) -> Result<String> {
        self(puzzle, solution)
    }
}

/// 64-byte composite key
#[derive(Clone, PartialEq, Eq)]
pub struct DerivedKey([u8; KEY_SIZE]);

impl DerivedKey {
    fn from_parts(partial: &HashDigest, puzzle: &HashDigest) -> Self {
        let mut bytes = [0u8; KEY_SIZE];
        bytes[..DIGEST_SIZE].copy_from_slice(partial);
        bytes[DIGEST_SIZE..].copy_from_slice(puzzle);
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; KEY_SIZE] {
        &self.0
    }

    /// Digest of the passphrase
    pub fn partial_digest(&self) -> &[u8] {
        &self.0[..DIGEST_SIZE]
    }

    /// Digest of the solution digits
    pub fn puzzle_digest(&self) -> &[u8] {
        &self.0[DIGEST_SIZE..]
    }
}

impl AsRef<[u8]> for DerivedKey {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Debug for DerivedKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DerivedKey([redacted; {KEY_SIZE}])")
    }
}

/// Everything derived from a passphrase before the player is asked
pub struct PuzzleChallenge {
    pub seed: i64,
    pub puzzle: Grid,
    pub solution: Grid,
    /// Row-major digits of `solution`, the string a correct submission equals
    pub solution_digits: String,
    partial_digest: HashDigest,
    puzzle_digest: HashDigest,
}

impl PuzzleChallenge {
    /// Release the key if `candidate` is exactly the solution string
    pub fn verify(&self, candidate: &str) -> Result<DerivedKey> {
        if !validate_solution(candidate, &self.solution_digits) {
            warn!(
                submitted_len = candidate.len(),
                "submitted grid does not match the solution"
            );
            return Err(KeyError::ValidationFailed);
        }
        info!("puzzle solved, key released");
        Ok(DerivedKey::from_parts(
            &self.partial_digest,
            &self.puzzle_digest,
        ))
    }
}

impl fmt::Debug for PuzzleChallenge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PuzzleChallenge")
            .field("givens", &self.puzzle.given_count())
            .finish_non_exhaustive()
    }
}

/// Read the generator seed from the first 8 bytes of `digest`, little-endian
pub fn seed_from_digest(digest: &[u8]) -> Result<i64> {
    let bytes: [u8; 8] = digest
        .get(..8)
        .and_then(|b| b.try_into().ok())
        .ok_or(KeyError::SeedBytes(digest.len()))?;
    Ok(i64::from_le_bytes(bytes))
}

pub fn seed_for_passphrase(passphrase: &str) -> Result<i64> {
    seed_from_digest(&partial_digest(passphrase))
}

fn partial_digest(passphrase: &str) -> HashDigest {
    repeated_hash(passphrase.as_bytes(), SEED_ITERATIONS, &FIXED_SALT)
}

/// Build the puzzle for `passphrase` and precompute both digests
pub fn prepare_challenge(passphrase: &str, params: &KeyParams) -> Result<PuzzleChallenge> {
    params.validate()?;

    let partial_digest = partial_digest(passphrase);
    let seed = seed_from_digest(&partial_digest)?;

    let Puzzle { puzzle, solution } = Generator::with_seed(seed).generate_puzzle();
    let solution_digits = solution.to_digit_string();
    let puzzle_digest = repeated_hash(solution_digits.as_bytes(), params.iterations, &FIXED_SALT);
    debug!(
        givens = puzzle.given_count(),
        iterations = params.iterations,
        "prepared puzzle challenge"
    );

    Ok(PuzzleChallenge {
        seed,
        puzzle,
        solution,
        solution_digits,
        partial_digest,
        puzzle_digest,
    })
}

/// Exact string comparison; an alternate valid grid does not count
pub fn validate_solution(candidate: &str, solution: &str) -> bool {
    candidate == solution
}

/// Run the whole flow: generate, ask the collector once, verify, combine.
///
/// A mismatch is [`KeyError::ValidationFailed`] and no key is returned.
pub fn derive_key<C>(passphrase: &str, params: &KeyParams, collector: &mut C) -> Result<DerivedKey>
where
    C: Collector + ?Sized,
{
    let challenge = prepare_challenge(passphrase, params)?;
    info!(
        givens = challenge.puzzle.given_count(),
        "waiting for puzzle solution"
    );
    let candidate = collector.collect(&challenge.puzzle.to_cells(), &challenge.solution_digits)?;
    challenge.verify(&candidate)
}

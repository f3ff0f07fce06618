//! Sudoku key engine.
//!
//! Turns a passphrase into a reproducible 64-byte key by generating a
//! Sudoku puzzle seeded from the passphrase, having a human solve it, and
//! concatenating two SHA-256 digests:
//!
//! ```text
//! passphrase ──hash×9──► partial digest ──first 8 bytes──► seed
//!                                                           │
//!                                     Generator ◄───────────┘
//!                                        │
//!                        (puzzle, solution)
//!                                        │
//!          solution digits ──hash×n──► puzzle digest
//!
//! key = partial digest ‖ puzzle digest
//! ```
//!
//! The fixed all-zero salt means the same passphrase always yields the same
//! key. This is a puzzle-gated derivation scheme, not a hardened KDF.

pub mod config;
pub mod derive;
pub mod error;
pub mod generator;
pub mod grid;
pub mod hash;
pub mod solver;

pub use config::KeyParams;
pub use derive::{
    derive_key, prepare_challenge, seed_for_passphrase, seed_from_digest, validate_solution,
    Collector, DerivedKey, PuzzleChallenge, KEY_SIZE, SEED_ITERATIONS,
};
pub use error::{KeyError, Result};
pub use generator::{Generator, Puzzle, PLACEMENT_ATTEMPTS, REMOVAL_TRIALS};
pub use grid::{Grid, Position, BOX_SIZE, CELL_COUNT, N};
pub use hash::{repeated_hash, sha256, HashDigest, DIGEST_SIZE, FIXED_SALT, SALT_SIZE};
pub use solver::Solver;

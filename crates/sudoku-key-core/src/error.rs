//! Error types for sudoku-key-core.

/// Unified error type for puzzle generation and key derivation.
#[derive(Debug, thiserror::Error)]
pub enum KeyError {
    /// The digest was too short to read an 8-byte seed from.
    #[error("Seed error: digest has {0} bytes, need at least 8")]
    SeedBytes(usize),

    /// Iteration counts start at 1.
    #[error("Invalid iteration count: {0} (must be at least 1)")]
    InvalidIterations(u16),

    /// The collected grid does not match the puzzle's solution.
    #[error("Validation failed: submitted grid does not match the solution")]
    ValidationFailed,

    /// The collector could not produce a candidate.
    #[error("Collector error: {0}")]
    Collector(String),

    /// A grid string could not be parsed.
    #[error("Invalid grid: {0}")]
    InvalidGrid(String),
}

pub type Result<T> = std::result::Result<T, KeyError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        assert_eq!(
            KeyError::SeedBytes(4).to_string(),
            "Seed error: digest has 4 bytes, need at least 8"
        );
        assert_eq!(
            KeyError::InvalidIterations(0).to_string(),
            "Invalid iteration count: 0 (must be at least 1)"
        );
        assert_eq!(
            KeyError::Collector("terminal closed".into()).to_string(),
            "Collector error: terminal closed"
        );
    }

    #[test]
    fn error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<KeyError>();
    }
}

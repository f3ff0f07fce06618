use crate::error::{KeyError, Result};
use serde::{Deserialize, Serialize};

/// Caller-tunable derivation parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyParams {
    /// Hash rounds applied to the solution digits for the puzzle digest
    pub iterations: u16,
}

impl Default for KeyParams {
    fn default() -> Self {
        Self { iterations: 9 }
    }
}

impl KeyParams {
    pub fn with_iterations(iterations: u16) -> Self {
        Self { iterations }
    }

    pub fn validate(&self) -> Result<()> {
        if self.iterations == 0 {
            return Err(KeyError::InvalidIterations(self.iterations));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_iterations_rejected() {
        assert!(matches!(
            KeyParams::with_iterations(0).validate(),
            Err(KeyError::InvalidIterations(0))
        ));
        assert!(KeyParams::with_iterations(1).validate().is_ok());
        assert!(KeyParams::default().validate().is_ok());
    }

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let params: KeyParams = serde_json::from_str("{}").unwrap();
        assert_eq!(params, KeyParams::default());

        let params: KeyParams = serde_json::from_str(r#"{"iterations": 1000}"#).unwrap();
        assert_eq!(params.iterations, 1000);
    }
}

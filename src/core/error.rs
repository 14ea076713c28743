//! Errors raised by the scoring engine and the region store.

use thiserror::Error;

/// Errors from the stress core.
///
/// All variants are local and non-retriable. Callers are expected to abort
/// the current operation and fall back to a default view, never to retry.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum StressError {
    /// A numeric input was NaN or infinite.
    #[error("invalid input: {field} must be finite (got {value})")]
    InvalidInput { field: &'static str, value: f64 },

    /// A region name outside the six canonical keys.
    #[error("unknown region: {0:?}")]
    UnknownRegion(String),

    /// The region store was used before `initialize`.
    #[error("region store has not been initialized")]
    NotInitialized,

    /// An activity id that is not in the catalog.
    #[error("unknown activity: {0:?}")]
    UnknownActivity(String),
}

impl StressError {
    /// Stable machine-readable code for this error.
    pub fn code(&self) -> &'static str {
        match self {
            StressError::InvalidInput { .. } => "INVALID_INPUT",
            StressError::UnknownRegion(_) => "UNKNOWN_REGION",
            StressError::NotInitialized => "NOT_INITIALIZED",
            StressError::UnknownActivity(_) => "UNKNOWN_ACTIVITY",
        }
    }
}

/// Reject NaN and infinities for a named field.
pub(crate) fn ensure_finite(field: &'static str, value: f64) -> Result<f64, StressError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(StressError::InvalidInput { field, value })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ensure_finite() {
        assert_eq!(ensure_finite("rmssd", 42.0), Ok(42.0));
        assert!(matches!(
            ensure_finite("rmssd", f64::NAN),
            Err(StressError::InvalidInput { field: "rmssd", .. })
        ));
        assert!(ensure_finite("spo2", f64::NEG_INFINITY).is_err());
    }

    #[test]
    fn test_error_messages() {
        let err = StressError::UnknownRegion("AMYGDALA".to_string());
        assert_eq!(err.to_string(), "unknown region: \"AMYGDALA\"");
        assert_eq!(err.code(), "UNKNOWN_REGION");
        assert_eq!(StressError::NotInitialized.code(), "NOT_INITIALIZED");
    }
}

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ModelError {
    #[error("invalid parameter `{name}`: {reason}")]
    InvalidParameter { name: &'static str, reason: String },
    #[error("invalid time grid: dt={dt}, duration={duration}")]
    InvalidTimeStep { dt: f64, duration: f64 },
    #[error("state dimension mismatch: expected {expected}, got {got}")]
    StateDimension { expected: usize, got: usize },
    #[error("state diverged at t={time}")]
    Diverged { time: f64 },
}

pub type ModelResult<T, E = ModelError> = core::result::Result<T, E>;

/// Reject NaN and infinities for a named parameter.
pub(crate) fn ensure_finite(name: &'static str, value: f64) -> ModelResult<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ModelError::InvalidParameter { name, reason: format!("must be finite, got {value}") })
    }
}

pub(crate) fn ensure_positive(name: &'static str, value: f64) -> ModelResult<()> {
    ensure_finite(name, value)?;
    if value > 0.0 {
        Ok(())
    } else {
        Err(ModelError::InvalidParameter { name, reason: format!("must be positive, got {value}") })
    }
}

pub(crate) fn ensure_nonzero(name: &'static str, value: f64) -> ModelResult<()> {
    ensure_finite(name, value)?;
    if value != 0.0 {
        Ok(())
    } else {
        Err(ModelError::InvalidParameter { name, reason: "must be non-zero".to_string() })
    }
}

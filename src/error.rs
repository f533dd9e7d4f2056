use thiserror::Error;

/// Fatal configuration problems. Raised once at startup, before any field is computed.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigError {
    #[error("{field} must be > 0 (got {value})")]
    NonPositive { field: &'static str, value: f64 },
    #[error("{field} = {value} outside {range}")]
    OutOfRange { field: &'static str, value: f64, range: &'static str },
    #[error("refractive index {0} must be > 1.0")]
    RefractiveIndex(f64),
    #[error("corner radius {radius} exceeds half the smaller side of {width}x{height}")]
    DegenerateCorner { radius: f64, width: f64, height: f64 },
    #[error("lens diameter {diameter} smaller than map {width}x{height}")]
    LensTooSmall { diameter: u32, width: u32, height: u32 },
}

impl ConfigError {
    pub(crate) fn require_positive(field: &'static str, value: f64) -> Result<(), ConfigError> {
        // NaN fails this comparison as well
        if value > 0.0 && value.is_finite() {
            Ok(())
        } else {
            Err(ConfigError::NonPositive { field, value })
        }
    }
}

//! Setup-time error types
//!
//! Nothing inside the tick loop returns an error. Bad tunables and degenerate
//! tables are rejected here, before a game exists.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    /// A tunable is outside the range the simulation is stable in
    #[error("'{name}' = {value} is outside {range}")]
    OutOfRange {
        name: &'static str,
        value: f64,
        range: &'static str,
    },

    /// Table too small (or not finite) to hold a rack
    #[error("degenerate table {width}x{height}: need at least {min_width}x{min_height}")]
    DegenerateTable {
        width: f64,
        height: f64,
        min_width: f64,
        min_height: f64,
    },

    /// Config file could not be parsed
    #[error("config parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// Reject `value` unless it lies in the open-closed interval `(lo, hi]`
pub(crate) fn check_range(
    name: &'static str,
    value: f64,
    lo: f64,
    hi: f64,
    range: &'static str,
) -> ConfigResult<()> {
    if value.is_finite() && value > lo && value <= hi {
        Ok(())
    } else {
        Err(ConfigError::OutOfRange { name, value, range })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_range() {
        assert!(check_range("friction", 0.98, 0.0, 1.0, "(0, 1]").is_ok());
        assert!(check_range("friction", 1.0, 0.0, 1.0, "(0, 1]").is_ok());
        assert!(check_range("friction", 0.0, 0.0, 1.0, "(0, 1]").is_err());
        assert!(check_range("friction", f64::NAN, 0.0, 1.0, "(0, 1]").is_err());
    }

    #[test]
    fn test_error_message() {
        let err = check_range("max_power", -5.0, 0.0, 1000.0, "(0, 1000]").unwrap_err();
        assert_eq!(err.to_string(), "'max_power' = -5 is outside (0, 1000]");
    }
}

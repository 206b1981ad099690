use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::PipelineError;

/// One of four fare bands over the non-negative reals.
///
/// | Fare amount | Class |
/// |-------------|-------|
/// | [0, 10)     | 1     |
/// | [10, 30)    | 2     |
/// | [30, 60)    | 3     |
/// | [60, inf)   | 4     |
///
/// The bands are half-open, so a fare exactly on a boundary belongs to the
/// upper class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FareClass {
    Low,
    Medium,
    High,
    Premium,
}

impl FareClass {
    /// Numeric label 1–4, matching the band order above.
    pub fn index(self) -> u8 {
        match self {
            FareClass::Low => 1,
            FareClass::Medium => 2,
            FareClass::High => 3,
            FareClass::Premium => 4,
        }
    }
}

impl fmt::Display for FareClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FareClass::Low => "Low",
            FareClass::Medium => "Medium",
            FareClass::High => "High",
            FareClass::Premium => "Premium",
        };
        write!(f, "{name}")
    }
}

/// Maps a fare amount to its [`FareClass`].
///
/// # Errors
///
/// Returns [`PipelineError::Domain`] for negative or non-finite input.
pub fn classify(fare_amount: f64) -> Result<FareClass, PipelineError> {
    if !fare_amount.is_finite() || fare_amount < 0.0 {
        return Err(PipelineError::Domain(format!(
            "fare_amount {fare_amount} is not a non-negative number"
        )));
    }

    Ok(match fare_amount {
        f if f >= 60.0 => FareClass::Premium,
        f if f >= 30.0 => FareClass::High,
        f if f >= 10.0 => FareClass::Medium,
        _ => FareClass::Low,
    })
}

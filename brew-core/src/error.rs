use thiserror::Error;

/// Reasons a brew request cannot be turned into a plan.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BrewError {
    #[error("unknown brew method: {0:?}")]
    UnknownMethod(String),

    #[error("{field} must be between {min} and {max} (got {value})")]
    OutOfRange {
        field: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    #[error("cups must be a multiple of 0.5 (got {0})")]
    CupGranularity(f64),

    #[error("{field} must be a positive finite number (got {value})")]
    Degenerate { field: &'static str, value: f64 },

    #[error("bloom of {bloom_ml} ml exceeds the total water of {water_total_ml} ml")]
    InsufficientWater { bloom_ml: u32, water_total_ml: u32 },
}

//! Brew recipe calculator.
//!
//! Turns a brew method and a handful of numbers (cups or target yield, cup
//! size, optional ratio) into a complete plan: coffee dose, total water
//! including what the grounds hold back, and a timed pour schedule.
//! Everything here is pure and deterministic.

mod error;
mod method;
mod plan;
mod response;

pub use error::BrewError;
pub use method::{BrewMethod, MethodKey, PourShare, PourTemplate, Recommendation};
pub use plan::{
    BrewPlan, BrewRequest, DEFAULT_CUP_SIZE_ML, MAX_BLOOM_ML, MIN_BLOOM_ML, PourStep, plan_brew,
};
pub use response::{BrewResponse, PourView};

use serde::Serialize;

use crate::error::BrewError;
use crate::method::{BrewMethod, MethodKey, PourShare, PourTemplate, Recommendation};

/// Cup size used when the caller has no preference of its own.
pub const DEFAULT_CUP_SIZE_ML: f64 = 240.0;

pub const MIN_BLOOM_ML: u32 = 30;
pub const MAX_BLOOM_ML: u32 = 60;

const CUPS_MIN: f64 = 0.5;
const CUPS_MAX: f64 = 12.0;
const CUP_SIZE_MIN_ML: f64 = 1.0;
const CUP_SIZE_MAX_ML: f64 = 1000.0;
const RATIO_MIN: f64 = 8.0;
const RATIO_MAX: f64 = 20.0;
const YIELD_MIN_ML: f64 = 50.0;
const YIELD_MAX_ML: f64 = 3000.0;

/// Input for one plan computation.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct BrewRequest {
    /// Cups to brew, in half-cup steps. Ignored when `target_yield_ml` is set.
    pub cups: f64,
    /// What the caller calls "one cup", in ml.
    pub cup_size_ml: f64,
    /// Water-to-coffee ratio override (15.0 means 1:15).
    pub ratio: Option<f64>,
    /// Explicit yield in ml; takes precedence over cups.
    pub target_yield_ml: Option<f64>,
}

impl Default for BrewRequest {
    fn default() -> Self {
        Self {
            cups: 1.0,
            cup_size_ml: DEFAULT_CUP_SIZE_ML,
            ratio: None,
            target_yield_ml: None,
        }
    }
}

impl BrewRequest {
    /// Range checks a request before it is handed to [`plan_brew`].
    ///
    /// `plan_brew` only refuses input it cannot compute with at all; the
    /// accepted ranges for user-facing values live here.
    pub fn validate(&self) -> Result<(), BrewError> {
        check_range("cup size", self.cup_size_ml, CUP_SIZE_MIN_ML, CUP_SIZE_MAX_ML)?;
        match self.target_yield_ml {
            Some(yield_ml) => check_range("target yield", yield_ml, YIELD_MIN_ML, YIELD_MAX_ML)?,
            None => {
                check_range("cups", self.cups, CUPS_MIN, CUPS_MAX)?;
                if (self.cups * 2.0).fract() != 0.0 {
                    return Err(BrewError::CupGranularity(self.cups));
                }
                // cups × cup size is held to the same bounds as an explicit yield
                check_range(
                    "yield",
                    self.cups * self.cup_size_ml,
                    YIELD_MIN_ML,
                    YIELD_MAX_ML,
                )?;
            }
        }
        if let Some(ratio) = self.ratio {
            check_range("ratio", ratio, RATIO_MIN, RATIO_MAX)?;
        }
        Ok(())
    }
}

fn check_range(field: &'static str, value: f64, min: f64, max: f64) -> Result<(), BrewError> {
    if (min..=max).contains(&value) {
        Ok(())
    } else {
        Err(BrewError::OutOfRange {
            field,
            value,
            min,
            max,
        })
    }
}

/// Round to whole ml, refusing anything a `u32` cannot hold.
fn to_whole_ml(field: &'static str, value: f64) -> Result<u32, BrewError> {
    let max = f64::from(u32::MAX);
    let rounded = value.round();
    if (0.0..=max).contains(&rounded) {
        Ok(rounded as u32)
    } else {
        Err(BrewError::OutOfRange {
            field,
            value,
            min: 0.0,
            max,
        })
    }
}

fn require_positive(field: &'static str, value: f64) -> Result<f64, BrewError> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(BrewError::Degenerate { field, value })
    }
}

/// One timed pour.
#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PourStep {
    /// Offset from brew start.
    pub at_sec: u32,
    pub volume_ml: u32,
    /// What the scale reads once this pour is done.
    pub cumulative_ml: u32,
    pub label: &'static str,
}

/// Complete recipe for one brew.
#[derive(Clone, Debug, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BrewPlan {
    pub method: MethodKey,
    /// Ratio actually used (override or method default).
    pub ratio: f64,
    /// Rounded to 0.1 g.
    pub coffee_grams: f64,
    /// Yield plus what the grounds absorb.
    pub water_total_ml: u32,
    pub yield_target_ml: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bloom_ml: Option<u32>,
    /// Ascending by `at_sec`; volumes sum to `water_total_ml`.
    pub pours: Vec<PourStep>,
    pub recommendation: Recommendation,
}

impl BrewPlan {
    pub fn total_poured_ml(&self) -> u32 {
        self.pours.iter().map(|p| p.volume_ml).sum()
    }

    /// Water held back by the grounds.
    pub fn absorbed_ml(&self) -> u32 {
        self.water_total_ml - self.yield_target_ml
    }
}

#[inline]
fn round_to_tenth(x: f64) -> f64 {
    (x * 10.0).round() / 10.0
}

/// Compute the plan for `method`.
///
/// 1. yield = round(target yield, or cups × cup size)
/// 2. coffee = yield / ratio, to 0.1 g
/// 3. water = yield + round(coffee × absorption coefficient)
/// 4. bloom (blooming methods only) = 2 × coffee, clamped to 30..=60 ml
/// 5. the rest of the water follows the method's pour template
pub fn plan_brew(method: &BrewMethod, request: &BrewRequest) -> Result<BrewPlan, BrewError> {
    let raw_yield = match request.target_yield_ml {
        Some(yield_ml) => require_positive("target yield", yield_ml)?,
        None => {
            require_positive("cups", request.cups)?
                * require_positive("cup size", request.cup_size_ml)?
        }
    };
    let yield_target_ml = to_whole_ml("target yield", raw_yield)?;
    if yield_target_ml == 0 {
        return Err(BrewError::Degenerate {
            field: "target yield",
            value: raw_yield,
        });
    }

    let ratio = require_positive("ratio", request.ratio.unwrap_or(method.default_ratio))?;
    let coffee_grams = round_to_tenth(f64::from(yield_target_ml) / ratio);
    let absorbed = coffee_grams * method.key.absorption_coefficient();
    let water_total_ml = to_whole_ml("absorbed water", absorbed)?
        .checked_add(yield_target_ml)
        .ok_or(BrewError::OutOfRange {
            field: "total water",
            value: f64::from(yield_target_ml) + absorbed,
            min: 0.0,
            max: f64::from(u32::MAX),
        })?;

    let bloom_ml = method
        .bloom
        .then(|| ((2.0 * coffee_grams).round() as u32).clamp(MIN_BLOOM_ML, MAX_BLOOM_ML));
    let remaining_ml = match bloom_ml {
        Some(bloom_ml) if bloom_ml > water_total_ml => {
            return Err(BrewError::InsufficientWater {
                bloom_ml,
                water_total_ml,
            });
        }
        Some(bloom_ml) => water_total_ml - bloom_ml,
        None => water_total_ml,
    };

    let mut schedule = Schedule::default();
    if let Some(bloom_ml) = bloom_ml {
        schedule.push(0, bloom_ml, "Bloom");
    }
    match method.key.pour_template() {
        PourTemplate::Split(shares) => {
            for (share, volume_ml) in shares.iter().zip(apportion(remaining_ml, shares)) {
                schedule.push(share.at_sec, volume_ml, share.label);
            }
        }
        // Only non-blooming methods use a full charge, so this is all the water.
        PourTemplate::FullCharge { at_sec, label } => schedule.push(at_sec, water_total_ml, label),
    }

    tracing::debug!(
        method = %method.key,
        yield_target_ml,
        ratio,
        coffee_grams,
        water_total_ml,
        pours = schedule.steps.len(),
        "planned brew"
    );

    Ok(BrewPlan {
        method: method.key,
        ratio,
        coffee_grams,
        water_total_ml,
        yield_target_ml,
        bloom_ml,
        pours: schedule.steps,
        recommendation: method.key.recommendation(),
    })
}

#[derive(Default)]
struct Schedule {
    steps: Vec<PourStep>,
    poured_ml: u32,
}

impl Schedule {
    fn push(&mut self, at_sec: u32, volume_ml: u32, label: &'static str) {
        self.poured_ml = self.poured_ml.saturating_add(volume_ml);
        self.steps.push(PourStep {
            at_sec,
            volume_ml,
            cumulative_ml: self.poured_ml,
            label,
        });
    }
}

/// Largest-remainder split of `total_ml` by percent shares.
///
/// Every share gets the floor of its exact portion; the ml left over go one
/// each to the shares with the largest fractional remainder, earlier shares
/// first on ties. The result always sums to `total_ml`.
fn apportion(total_ml: u32, shares: &[PourShare]) -> Vec<u32> {
    let total = u64::from(total_ml);
    let mut parts = Vec::with_capacity(shares.len());
    let mut remainders = Vec::with_capacity(shares.len());
    for (i, share) in shares.iter().enumerate() {
        let exact = total * u64::from(share.percent);
        parts.push((exact / 100) as u32);
        remainders.push((exact % 100, i));
    }

    let assigned: u64 = parts.iter().map(|&p| u64::from(p)).sum();
    let leftover = total.saturating_sub(assigned) as usize;
    remainders.sort_by(|a, b| b.0.cmp(&a.0).then(a.1.cmp(&b.1)));
    for &(_, i) in remainders.iter().take(leftover) {
        parts[i] += 1;
    }
    parts
}

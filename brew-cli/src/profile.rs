//! User preferences stored as a JSON profile.

use std::{fs, path::Path};

use anyhow::{Context, Result};
use brew_core::{BrewRequest, DEFAULT_CUP_SIZE_ML, MethodKey};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Profile {
    pub method: MethodKey,
    pub cups: f64,
    pub cup_size_ml: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ratio: Option<f64>,
    pub show_recommendations: bool,
}

impl Default for Profile {
    fn default() -> Self {
        Self {
            method: MethodKey::V60,
            cups: 1.0,
            cup_size_ml: DEFAULT_CUP_SIZE_ML,
            ratio: None,
            show_recommendations: true,
        }
    }
}

/// Values given explicitly on the command line. `None` means "not given".
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Overrides {
    pub method: Option<MethodKey>,
    pub cups: Option<f64>,
    pub cup_size_ml: Option<f64>,
    pub ratio: Option<f64>,
    pub show_recommendations: Option<bool>,
}

impl Profile {
    pub fn load(path: &Path) -> Result<Self> {
        let txt = fs::read_to_string(path)
            .with_context(|| format!("failed to read profile: {}", path.display()))?;
        serde_json::from_str(&txt)
            .with_context(|| format!("invalid profile JSON: {}", path.display()))
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let txt = serde_json::to_string_pretty(self)?;
        fs::write(path, txt).with_context(|| format!("failed to save profile: {}", path.display()))
    }

    /// Layer CLI overrides on top of this profile (CLI wins).
    pub fn apply(self, o: &Overrides) -> Self {
        Profile {
            method: o.method.unwrap_or(self.method),
            cups: o.cups.unwrap_or(self.cups),
            cup_size_ml: o.cup_size_ml.unwrap_or(self.cup_size_ml),
            ratio: o.ratio.or(self.ratio),
            show_recommendations: o.show_recommendations.unwrap_or(self.show_recommendations),
        }
    }

    pub fn request(&self, target_yield_ml: Option<f64>) -> BrewRequest {
        BrewRequest {
            cups: self.cups,
            cup_size_ml: self.cup_size_ml,
            ratio: self.ratio,
            target_yield_ml,
        }
    }
}

//! Compiled-in catalog of brew methods and their per-method constants.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::BrewError;

/// Brew method supported by the calculator.
#[derive(Copy, Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum MethodKey {
    V60,
    Chemex,
    Aeropress,
    FrenchPress,
    Moka,
}

impl MethodKey {
    pub const ALL: [MethodKey; 5] = [
        MethodKey::V60,
        MethodKey::Chemex,
        MethodKey::Aeropress,
        MethodKey::FrenchPress,
        MethodKey::Moka,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            MethodKey::V60 => "v60",
            MethodKey::Chemex => "chemex",
            MethodKey::Aeropress => "aeropress",
            MethodKey::FrenchPress => "french_press",
            MethodKey::Moka => "moka",
        }
    }

    /// Static definition for this key.
    pub fn method(self) -> &'static BrewMethod {
        match self {
            MethodKey::V60 => &METHODS[0],
            MethodKey::Chemex => &METHODS[1],
            MethodKey::Aeropress => &METHODS[2],
            MethodKey::FrenchPress => &METHODS[3],
            MethodKey::Moka => &METHODS[4],
        }
    }

    /// Grams of water the spent grounds retain per gram of coffee
    /// (1 g water taken as 1 ml).
    pub fn absorption_coefficient(self) -> f64 {
        match self {
            MethodKey::V60 => 2.0,
            MethodKey::Chemex => 2.0,
            MethodKey::Aeropress => 1.5,
            MethodKey::FrenchPress => 2.2,
            MethodKey::Moka => 0.8,
        }
    }

    pub fn recommendation(self) -> Recommendation {
        let (temp_c, grind, filter) = match self {
            MethodKey::V60 => (93, "Medium-fine", "Paper cone"),
            MethodKey::Chemex => (94, "Medium-coarse", "Bonded paper"),
            MethodKey::Aeropress => (85, "Fine", "Paper disc"),
            MethodKey::FrenchPress => (95, "Coarse", "Metal mesh"),
            MethodKey::Moka => (90, "Fine", "Built-in metal basket"),
        };
        Recommendation {
            temp_c,
            grind,
            filter,
        }
    }

    /// How the water left after the bloom is laid out over time.
    pub fn pour_template(self) -> PourTemplate {
        match self {
            MethodKey::V60 => PourTemplate::Split(V60_POURS),
            MethodKey::Chemex => PourTemplate::Split(CHEMEX_POURS),
            MethodKey::Aeropress => PourTemplate::Split(AEROPRESS_POURS),
            MethodKey::FrenchPress => PourTemplate::FullCharge {
                at_sec: 0,
                label: "Fill",
            },
            MethodKey::Moka => PourTemplate::FullCharge {
                at_sec: 0,
                label: "Assemble & heat",
            },
        }
    }
}

const V60_POURS: &[PourShare] = &[
    PourShare::new(45, 55, "First pour"),
    PourShare::new(105, 45, "Second pour"),
];

const CHEMEX_POURS: &[PourShare] = &[
    PourShare::new(45, 40, "First pour"),
    PourShare::new(105, 30, "Second pour"),
    PourShare::new(165, 30, "Third pour"),
];

const AEROPRESS_POURS: &[PourShare] = &[PourShare::new(45, 100, "Fill & steep")];

impl fmt::Display for MethodKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MethodKey {
    type Err = BrewError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('-', "_");
        MethodKey::ALL
            .into_iter()
            .find(|k| k.as_str() == normalized)
            .ok_or_else(|| BrewError::UnknownMethod(s.to_string()))
    }
}

/// Reference data for one brew method. Not user-editable.
#[derive(Copy, Clone, Debug, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BrewMethod {
    pub key: MethodKey,
    pub name: &'static str,
    /// Water mass per unit coffee mass (15.0 means 1:15).
    pub default_ratio: f64,
    /// Whether the method pre-wets the grounds before the main pours.
    pub bloom: bool,
    /// Descriptive only; the schedule comes from the pour template.
    pub pour_count: u8,
}

static METHODS: [BrewMethod; 5] = [
    BrewMethod {
        key: MethodKey::V60,
        name: "Hario V60",
        default_ratio: 15.0,
        bloom: true,
        pour_count: 3,
    },
    BrewMethod {
        key: MethodKey::Chemex,
        name: "Chemex",
        default_ratio: 16.0,
        bloom: true,
        pour_count: 4,
    },
    BrewMethod {
        key: MethodKey::Aeropress,
        name: "AeroPress",
        default_ratio: 14.0,
        bloom: true,
        pour_count: 2,
    },
    BrewMethod {
        key: MethodKey::FrenchPress,
        name: "French Press",
        default_ratio: 15.0,
        bloom: false,
        pour_count: 1,
    },
    BrewMethod {
        key: MethodKey::Moka,
        name: "Moka Pot",
        default_ratio: 10.0,
        bloom: false,
        pour_count: 1,
    },
];

impl BrewMethod {
    pub fn all() -> &'static [BrewMethod] {
        &METHODS
    }

    pub fn lookup(key: &str) -> Result<&'static BrewMethod, BrewError> {
        key.parse::<MethodKey>().map(MethodKey::method)
    }
}

/// Presentation constants attached to every plan. Whether they are shown is
/// up to the caller.
#[derive(Copy, Clone, Debug, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Recommendation {
    /// Water temperature in °C.
    pub temp_c: u8,
    pub grind: &'static str,
    pub filter: &'static str,
}

/// One weighted slice of the post-bloom water.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct PourShare {
    pub at_sec: u32,
    /// Share of the remaining water, in percent.
    pub percent: u32,
    pub label: &'static str,
}

impl PourShare {
    const fn new(at_sec: u32, percent: u32, label: &'static str) -> Self {
        Self {
            at_sec,
            percent,
            label,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum PourTemplate {
    /// Partition the water left after the bloom. Percents sum to 100.
    Split(&'static [PourShare]),
    /// A single step carrying the whole water charge.
    FullCharge { at_sec: u32, label: &'static str },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keys_parse_round_trip() {
        for key in MethodKey::ALL {
            assert_eq!(key.as_str().parse::<MethodKey>(), Ok(key));
        }
        assert_eq!("French-Press".parse::<MethodKey>(), Ok(MethodKey::FrenchPress));
        assert_eq!(" V60 ".parse::<MethodKey>(), Ok(MethodKey::V60));
    }

    #[test]
    fn test_unknown_key_rejected() {
        let err = "siphon".parse::<MethodKey>().unwrap_err();
        assert_eq!(err, BrewError::UnknownMethod("siphon".into()));
        assert!(BrewMethod::lookup("").is_err());
    }

    #[test]
    fn test_catalog_matches_keys() {
        assert_eq!(BrewMethod::all().len(), MethodKey::ALL.len());
        for key in MethodKey::ALL {
            assert_eq!(key.method().key, key);
        }
    }

    #[test]
    fn test_split_templates_sum_to_hundred() {
        for key in MethodKey::ALL {
            if let PourTemplate::Split(shares) = key.pour_template() {
                assert_eq!(shares.iter().map(|s| s.percent).sum::<u32>(), 100, "{key}");
                assert!(shares.windows(2).all(|w| w[0].at_sec < w[1].at_sec));
            }
        }
    }

    #[test]
    fn test_full_charge_only_without_bloom() {
        for m in BrewMethod::all() {
            let full = matches!(m.key.pour_template(), PourTemplate::FullCharge { .. });
            assert_eq!(full, !m.bloom, "{}", m.name);
        }
    }

    #[test]
    fn test_serde_keys() {
        let json = serde_json::to_string(&MethodKey::FrenchPress).unwrap();
        assert_eq!(json, "\"french_press\"");
        let key: MethodKey = serde_json::from_str("\"v60\"").unwrap();
        assert_eq!(key, MethodKey::V60);
    }
}

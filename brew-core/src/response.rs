//! Wire shape of a plan as handed to clients.

use serde::Serialize;

use crate::method::MethodKey;
use crate::plan::{BrewPlan, PourStep};

#[derive(Clone, Debug, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PourView {
    pub at_sec: u32,
    pub volume_ml: u32,
    pub cumulative_ml: u32,
    pub label: &'static str,
}

impl From<&PourStep> for PourView {
    fn from(step: &PourStep) -> Self {
        PourView {
            at_sec: step.at_sec,
            volume_ml: step.volume_ml,
            cumulative_ml: step.cumulative_ml,
            label: step.label,
        }
    }
}

/// Serialized plan. Temperature, grind and filter are only present when the
/// user asked to see recommendations.
#[derive(Clone, Debug, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BrewResponse {
    pub method: MethodKey,
    pub coffee_grams: f64,
    pub water_total_ml: u32,
    pub yield_target_ml: u32,
    pub ratio: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bloom_ml: Option<u32>,
    pub pours: Vec<PourView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temp_c: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grind: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter: Option<&'static str>,
}

impl BrewResponse {
    pub fn from_plan(plan: &BrewPlan, show_recommendations: bool) -> Self {
        let rec = show_recommendations.then_some(plan.recommendation);
        BrewResponse {
            method: plan.method,
            coffee_grams: plan.coffee_grams,
            water_total_ml: plan.water_total_ml,
            yield_target_ml: plan.yield_target_ml,
            ratio: plan.ratio,
            bloom_ml: plan.bloom_ml,
            pours: plan.pours.iter().map(PourView::from).collect(),
            temp_c: rec.map(|r| r.temp_c),
            grind: rec.map(|r| r.grind),
            filter: rec.map(|r| r.filter),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plan::{BrewRequest, plan_brew};

    fn v60_plan() -> BrewPlan {
        plan_brew(MethodKey::V60.method(), &BrewRequest::default()).unwrap()
    }

    #[test]
    fn test_recommendations_hidden() {
        let json = serde_json::to_value(BrewResponse::from_plan(&v60_plan(), false)).unwrap();
        assert!(json.get("tempC").is_none());
        assert!(json.get("grind").is_none());
        assert!(json.get("filter").is_none());
        assert_eq!(json["bloomMl"], 32);
        assert_eq!(json["pours"].as_array().unwrap().len(), 3);
    }

    #[test]
    fn test_recommendations_shown() {
        let json = serde_json::to_value(BrewResponse::from_plan(&v60_plan(), true)).unwrap();
        assert_eq!(json["tempC"], 93);
        assert_eq!(json["grind"], "Medium-fine");
        assert_eq!(json["filter"], "Paper cone");
        assert_eq!(json["yieldTargetMl"], 240);
        assert_eq!(json["pours"][0]["label"], "Bloom");
        assert_eq!(json["pours"][2]["cumulativeMl"], json["waterTotalMl"]);
    }
}

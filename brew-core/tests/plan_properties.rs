//! Property tests for the brew planner
//!
//! Covers, over the whole accepted input range:
//! - identical input gives an identical plan
//! - pours add up to the total water, to the ml
//! - bloom presence follows the method and stays within 30..=60 ml
//! - yield and ratio overrides win over cups and method defaults

use brew_core::{
    BrewMethod, BrewPlan, BrewRequest, MAX_BLOOM_ML, MIN_BLOOM_ML, MethodKey, plan_brew,
};
use proptest::prelude::*;

fn method_key() -> impl Strategy<Value = MethodKey> {
    prop::sample::select(MethodKey::ALL.to_vec())
}

/// Half-cup steps from 0.5 to 12.
fn cups() -> impl Strategy<Value = f64> {
    (1u32..=24).prop_map(|halves| f64::from(halves) / 2.0)
}

/// Cup size anywhere in 1..=1000 ml, kept to sizes whose cups × size
/// lands in the accepted 50..=3000 ml yield window.
fn cups_and_size() -> impl Strategy<Value = (f64, f64)> {
    cups().prop_flat_map(|cups| {
        let lo = (50.0 / cups).max(1.0) + 0.01;
        let hi = (3000.0 / cups).min(1000.0) - 0.01;
        (Just(cups), lo..=hi)
    })
}

fn request() -> impl Strategy<Value = BrewRequest> {
    (
        cups_and_size(),
        prop::option::of(8.0f64..=20.0),
        prop::option::of(50u32..=3000),
    )
        .prop_map(|((cups, cup_size_ml), ratio, target_yield_ml)| BrewRequest {
            cups,
            cup_size_ml,
            ratio,
            target_yield_ml: target_yield_ml.map(f64::from),
        })
}

fn plan(key: MethodKey, request: &BrewRequest) -> BrewPlan {
    request.validate().expect("strategy only yields valid requests");
    plan_brew(key.method(), request).expect("valid request must plan")
}

proptest! {
    #[test]
    fn prop_plan_is_deterministic(key in method_key(), req in request()) {
        prop_assert_eq!(plan(key, &req), plan(key, &req));
    }

    #[test]
    fn prop_pours_conserve_water(key in method_key(), req in request()) {
        let p = plan(key, &req);
        prop_assert_eq!(p.total_poured_ml(), p.water_total_ml);
        prop_assert_eq!(p.pours.last().map(|s| s.cumulative_ml), Some(p.water_total_ml));
    }

    #[test]
    fn prop_pours_ascend(key in method_key(), req in request()) {
        let p = plan(key, &req);
        prop_assert!(p.pours.windows(2).all(|w| w[0].at_sec < w[1].at_sec));
        prop_assert!(p.pours.len() <= 4);
    }

    #[test]
    fn prop_bloom_follows_method(key in method_key(), req in request()) {
        let p = plan(key, &req);
        if key.method().bloom {
            prop_assert_eq!(p.pours[0].label, "Bloom");
            prop_assert_eq!(p.pours[0].at_sec, 0);
            let bloom = p.bloom_ml.expect("blooming method has a bloom");
            prop_assert!((MIN_BLOOM_ML..=MAX_BLOOM_ML).contains(&bloom));
            prop_assert_eq!(p.pours[0].volume_ml, bloom);
        } else {
            prop_assert!(p.bloom_ml.is_none());
            prop_assert!(p.pours.iter().all(|s| s.label != "Bloom"));
        }
    }

    #[test]
    fn prop_target_yield_wins(key in method_key(), cups in cups(), yield_ml in 50u32..=3000) {
        let req = BrewRequest {
            cups,
            target_yield_ml: Some(f64::from(yield_ml)),
            ..BrewRequest::default()
        };
        prop_assert_eq!(plan(key, &req).yield_target_ml, yield_ml);
    }

    #[test]
    fn prop_ratio_override_sets_dose(key in method_key(), cups in cups(), ratio in 8.0f64..=20.0) {
        let req = BrewRequest {
            cups,
            ratio: Some(ratio),
            ..BrewRequest::default()
        };
        let p = plan(key, &req);
        let expected = f64::from(p.yield_target_ml) / ratio;
        prop_assert!((p.coffee_grams - expected).abs() <= 0.05 + 1e-9);
        prop_assert_eq!(p.ratio, ratio);
    }
}

#[test]
fn smallest_yield_from_cups_plans_everywhere() {
    let req = BrewRequest {
        cups: 0.5,
        cup_size_ml: 100.0,
        ratio: Some(20.0),
        target_yield_ml: None,
    };
    for key in MethodKey::ALL {
        let p = plan(key, &req);
        assert_eq!(p.yield_target_ml, 50);
        assert_eq!(p.total_poured_ml(), p.water_total_ml);
    }
}

#[test]
fn default_ratio_applies_without_override() {
    for method in BrewMethod::all() {
        let p = plan_brew(method, &BrewRequest::default()).unwrap();
        assert_eq!(p.ratio, method.default_ratio);
        assert_eq!(p.yield_target_ml, 240);
    }
}

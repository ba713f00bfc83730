use std::collections::BTreeMap;

use appraisal_core::land::{
    raw_indicated_value, reconcile_rounding, value_land, LandComp, LandValuationInput,
};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn comp(id: &str, sale_price: Decimal, land_sf: Decimal, adjustments: &[(&str, Decimal)]) -> LandComp {
    LandComp {
        id: id.into(),
        label: None,
        sale_price,
        land_sf,
        adjustments: adjustments
            .iter()
            .map(|(k, v)| (k.to_string(), *v))
            .collect::<BTreeMap<_, _>>(),
    }
}

// ===========================================================================
// Sign convention
// ===========================================================================

#[test]
fn test_inferior_comp_adjusts_upward() {
    // $500,000 / 50,000 SF = $10/SF; +10% (comp inferior) → $11.00
    let comps = vec![comp("c1", dec!(500000), dec!(50000), &[("location", dec!(0.10))])];
    let result = value_land(&LandValuationInput {
        comps,
        adjustment_categories: vec!["location".into()],
        subject_units: dec!(1),
        ..Default::default()
    })
    .unwrap();

    assert_eq!(result.result.comp_lines[0].adjusted_price_per_unit, dec!(11.00));
}

#[test]
fn test_superior_comp_adjusts_downward() {
    let comps = vec![comp("c1", dec!(500000), dec!(50000), &[("location", dec!(-0.10))])];
    let result = value_land(&LandValuationInput {
        comps,
        adjustment_categories: vec!["location".into()],
        subject_units: dec!(1),
        ..Default::default()
    })
    .unwrap();

    assert_eq!(result.result.comp_lines[0].adjusted_price_per_unit, dec!(9.00));
}

// ===========================================================================
// Averaging and extension
// ===========================================================================

#[test]
fn test_indicated_value_from_three_comps() {
    let comps = vec![
        comp("c1", dec!(480000), dec!(40000), &[("access", dec!(0.05))]),
        comp("c2", dec!(600000), dec!(50000), &[]),
        comp("c3", dec!(275000), dec!(25000), &[("access", dec!(-0.04))]),
    ];
    // PPUs: 12.00 → 12.60; 12.00 → 12.00; 11.00 → 10.56
    // Average: 35.16 / 3 = 11.72; × 55,000 SF subject = 644,600
    let raw = raw_indicated_value(&comps, &["access".to_string()], dec!(55000));
    assert_eq!(raw, dec!(644600));
}

#[test]
fn test_comp_add_and_remove_recompute() {
    let mut comps = vec![comp("c1", dec!(500000), dec!(50000), &[])];
    let categories = vec!["location".to_string()];

    assert_eq!(raw_indicated_value(&comps, &categories, dec!(10000)), dec!(100000));

    comps.push(comp("c2", dec!(600000), dec!(50000), &[]));
    assert_eq!(raw_indicated_value(&comps, &categories, dec!(10000)), dec!(110000));

    comps.remove(0);
    assert_eq!(raw_indicated_value(&comps, &categories, dec!(10000)), dec!(120000));
}

// ===========================================================================
// Empty-input safety
// ===========================================================================

#[test]
fn test_zero_comps_yield_zero_not_nan() {
    let result = value_land(&LandValuationInput {
        comps: vec![],
        adjustment_categories: vec!["location".into()],
        subject_units: dec!(55000),
        ..Default::default()
    })
    .unwrap();

    assert_eq!(result.result.raw_indicated_value, Decimal::ZERO);
    assert_eq!(result.result.average_adjusted_price_per_unit, Decimal::ZERO);
    assert_eq!(result.result.reported_value, Decimal::ZERO);
}

// ===========================================================================
// Rounding drift reset
// ===========================================================================

#[test]
fn test_rounding_survives_drift_within_threshold() {
    // raw 1,000,000 accepted as rounded 1,000,000; grid edit moves raw to
    // 1,040,000 (4%); override survives.
    assert_eq!(
        reconcile_rounding(dec!(1040000), Some(dec!(1000000))),
        Some(dec!(1000000))
    );
}

#[test]
fn test_rounding_cleared_past_threshold() {
    // 6% drift: override discarded, display reverts to live raw.
    assert_eq!(reconcile_rounding(dec!(1060000), Some(dec!(1000000))), None);

    let comps = vec![comp("c1", dec!(1060000), dec!(53000), &[])];
    let result = value_land(&LandValuationInput {
        comps,
        adjustment_categories: vec![],
        subject_units: dec!(53000),
        prior_rounded_value: Some(dec!(1000000)),
        round_to_nearest: None,
    })
    .unwrap();

    assert_eq!(result.result.raw_indicated_value, dec!(1060000));
    assert_eq!(result.result.rounded_value, None);
    assert_eq!(result.result.reported_value, dec!(1060000));
}

#[test]
fn test_round_action_reports_rounded_value_with_exact_alongside() {
    let comps = vec![comp("c1", dec!(644600), dec!(55000), &[])];
    let result = value_land(&LandValuationInput {
        comps,
        adjustment_categories: vec![],
        subject_units: dec!(55000),
        prior_rounded_value: None,
        round_to_nearest: Some(dec!(1000)),
    })
    .unwrap();

    assert_eq!(result.result.raw_indicated_value, dec!(644600));
    assert_eq!(result.result.rounded_value, Some(dec!(645000)));
    assert_eq!(result.result.reported_value, dec!(645000));
}

//! Sales-comparison land valuation grid.
//!
//! Each comparable's price per unit is adjusted by the sum of its active
//! percentage adjustments, the adjusted prices are averaged, and the average
//! is extended by the subject's size. Sign convention: a positive adjustment
//! means the comp is inferior to the subject, so its price moves up to be
//! comparable; negative means superior. Downstream report language depends on
//! this convention.

use std::collections::BTreeMap;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::error::AppraisalError;
use crate::types::{with_metadata, ComputationOutput, Money, Rate, SquareFeet};
use crate::AppraisalResult;

/// A comparable land sale.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LandComp {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    pub sale_price: Money,
    pub land_sf: SquareFeet,
    /// Additive percentage adjustments keyed by category. Categories that are
    /// no longer configured as grid rows do not contribute, even if stale
    /// values remain here.
    #[serde(default)]
    pub adjustments: BTreeMap<String, Rate>,
}

/// Input for a land grid valuation run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LandValuationInput {
    #[serde(default)]
    pub comps: Vec<LandComp>,
    /// Category keys currently configured as adjustment rows.
    #[serde(default)]
    pub adjustment_categories: Vec<String>,
    /// Subject size in the grid's unit of comparison.
    pub subject_units: SquareFeet,
    /// Rounded value previously accepted by the user, if any. Discarded
    /// automatically when the live raw value drifts past the threshold.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prior_rounded_value: Option<Money>,
    /// When set, snap the raw indicated value to this precision (e.g. 1000
    /// for nearest $1,000) as a fresh rounding action.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub round_to_nearest: Option<Money>,
}

/// Per-comp derived figures.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LandCompLine {
    pub comp_id: String,
    pub price_per_unit: Money,
    pub total_adjustment_pct: Rate,
    pub adjusted_price_per_unit: Money,
}

/// Output of a land grid valuation run.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LandValuationOutput {
    pub comp_lines: Vec<LandCompLine>,
    pub average_adjusted_price_per_unit: Money,
    /// Live, unrounded indication. Always carried for audit.
    pub raw_indicated_value: Money,
    /// Surviving rounding override, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rounded_value: Option<Money>,
    /// What the report shows: the rounding override when one survives,
    /// otherwise the raw indication.
    pub reported_value: Money,
}

/// Fraction of drift between raw and rounded beyond which a stale rounding
/// override is discarded.
const ROUNDING_DRIFT_THRESHOLD: Rate = rust_decimal_macros::dec!(0.05);

/// Price per unit with the comp's active adjustments applied.
pub fn comp_line(comp: &LandComp, active_categories: &[String]) -> LandCompLine {
    let price_per_unit = if comp.land_sf.is_zero() {
        Money::ZERO
    } else {
        comp.sale_price / comp.land_sf
    };

    let total_adjustment_pct: Rate = active_categories
        .iter()
        .filter_map(|key| comp.adjustments.get(key))
        .copied()
        .sum();

    LandCompLine {
        comp_id: comp.id.clone(),
        price_per_unit,
        total_adjustment_pct,
        adjusted_price_per_unit: price_per_unit * (Decimal::ONE + total_adjustment_pct),
    }
}

/// Mean adjusted price per unit extended by the subject size. Zero comps
/// indicate zero, never an error.
pub fn raw_indicated_value(
    comps: &[LandComp],
    active_categories: &[String],
    subject_units: SquareFeet,
) -> Money {
    if comps.is_empty() {
        return Money::ZERO;
    }
    let sum: Money = comps
        .iter()
        .map(|c| comp_line(c, active_categories).adjusted_price_per_unit)
        .sum();
    let average = sum / Decimal::from(comps.len() as u64);
    average * subject_units
}

/// Snap a value to the given precision, half away from zero.
pub fn round_to_precision(value: Money, precision: Money) -> AppraisalResult<Money> {
    if precision < Money::ZERO {
        return Err(AppraisalError::InvalidInput {
            field: "precision".into(),
            reason: "Rounding precision must be positive".into(),
        });
    }
    if precision.is_zero() {
        return Err(AppraisalError::DivisionByZero {
            context: "rounding precision".into(),
        });
    }
    let quotient =
        (value / precision).round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
    Ok(quotient * precision)
}

/// Apply the drift rule to a previously accepted rounding override: once the
/// live raw value moves more than 5% away from it, the override is discarded
/// so a stale manual round cannot misrepresent a changed grid.
pub fn reconcile_rounding(raw: Money, rounded: Option<Money>) -> Option<Money> {
    let rounded = rounded?;
    if raw.is_zero() {
        return if rounded.is_zero() { Some(rounded) } else { None };
    }
    let drift = (raw - rounded).abs() / raw.abs();
    if drift > ROUNDING_DRIFT_THRESHOLD {
        None
    } else {
        Some(rounded)
    }
}

/// Run the full land grid: per-comp adjustment lines, averaged indication,
/// and rounding reconciliation.
pub fn value_land(
    input: &LandValuationInput,
) -> AppraisalResult<ComputationOutput<LandValuationOutput>> {
    let mut warnings: Vec<String> = Vec::new();

    for comp in &input.comps {
        if comp.land_sf.is_zero() {
            warnings.push(format!(
                "Comp '{}' has zero land SF — price per unit treated as zero",
                comp.id
            ));
        }
        let stale: Vec<&str> = comp
            .adjustments
            .keys()
            .filter(|k| !input.adjustment_categories.contains(k))
            .map(String::as_str)
            .collect();
        if !stale.is_empty() {
            warnings.push(format!(
                "Comp '{}' carries adjustments for removed categories ({}) — ignored",
                comp.id,
                stale.join(", ")
            ));
        }
    }

    let comp_lines: Vec<LandCompLine> = input
        .comps
        .iter()
        .map(|c| comp_line(c, &input.adjustment_categories))
        .collect();

    let average_adjusted_price_per_unit = if comp_lines.is_empty() {
        Money::ZERO
    } else {
        comp_lines
            .iter()
            .map(|l| l.adjusted_price_per_unit)
            .sum::<Money>()
            / Decimal::from(comp_lines.len() as u64)
    };

    let raw = average_adjusted_price_per_unit * input.subject_units;

    let rounded_value = match input.round_to_nearest {
        Some(precision) => Some(round_to_precision(raw, precision)?),
        None => reconcile_rounding(raw, input.prior_rounded_value),
    };

    if input.prior_rounded_value.is_some() && rounded_value.is_none() {
        warnings.push(
            "Raw indication drifted more than 5% from the accepted rounded value — \
             rounding override discarded"
                .to_string(),
        );
    }

    let output = LandValuationOutput {
        comp_lines,
        average_adjusted_price_per_unit,
        raw_indicated_value: raw,
        reported_value: rounded_value.unwrap_or(raw),
        rounded_value,
    };

    Ok(with_metadata(
        "Land Valuation (Sales Comparison)",
        input,
        warnings,
        output,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn comp(id: &str, sale_price: Money, land_sf: SquareFeet) -> LandComp {
        LandComp {
            id: id.into(),
            label: None,
            sale_price,
            land_sf,
            adjustments: BTreeMap::new(),
        }
    }

    fn categories(keys: &[&str]) -> Vec<String> {
        keys.iter().map(|k| k.to_string()).collect()
    }

    #[test]
    fn positive_adjustment_moves_price_up() {
        let mut c = comp("c1", dec!(500000), dec!(50000));
        c.adjustments.insert("location".into(), dec!(0.10));

        let line = comp_line(&c, &categories(&["location"]));
        assert_eq!(line.price_per_unit, dec!(10));
        assert_eq!(line.adjusted_price_per_unit, dec!(11.00));
    }

    #[test]
    fn negative_adjustment_moves_price_down() {
        let mut c = comp("c1", dec!(500000), dec!(50000));
        c.adjustments.insert("location".into(), dec!(-0.10));

        let line = comp_line(&c, &categories(&["location"]));
        assert_eq!(line.adjusted_price_per_unit, dec!(9.00));
    }

    #[test]
    fn adjustments_sum_before_compounding_against_price() {
        let mut c = comp("c1", dec!(400000), dec!(40000));
        c.adjustments.insert("location".into(), dec!(0.05));
        c.adjustments.insert("size".into(), dec!(-0.02));
        c.adjustments.insert("utilities".into(), dec!(0.03));

        let line = comp_line(&c, &categories(&["location", "size", "utilities"]));
        assert_eq!(line.total_adjustment_pct, dec!(0.06));
        assert_eq!(line.adjusted_price_per_unit, dec!(10) * dec!(1.06));
    }

    #[test]
    fn removed_categories_do_not_contribute() {
        let mut c = comp("c1", dec!(500000), dec!(50000));
        c.adjustments.insert("location".into(), dec!(0.10));
        c.adjustments.insert("zoning".into(), dec!(0.50));

        // "zoning" row was removed from the grid.
        let line = comp_line(&c, &categories(&["location"]));
        assert_eq!(line.total_adjustment_pct, dec!(0.10));
    }

    #[test]
    fn indicated_value_averages_comps_and_extends_by_subject() {
        let mut inferior = comp("c1", dec!(500000), dec!(50000));
        inferior.adjustments.insert("location".into(), dec!(0.10));
        let superior = comp("c2", dec!(450000), dec!(50000));

        // Adjusted: 11.00 and 9.00 → average 10.00
        let raw = raw_indicated_value(
            &[inferior, superior],
            &categories(&["location"]),
            dec!(55000),
        );
        assert_eq!(raw, dec!(550000));
    }

    #[test]
    fn zero_comps_indicate_zero() {
        assert_eq!(
            raw_indicated_value(&[], &categories(&["location"]), dec!(55000)),
            Money::ZERO
        );

        let result = value_land(&LandValuationInput {
            subject_units: dec!(55000),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(result.result.raw_indicated_value, Money::ZERO);
        assert_eq!(result.result.reported_value, Money::ZERO);
    }

    #[test]
    fn zero_land_sf_comp_is_guarded_and_warned() {
        let degenerate = comp("c1", dec!(500000), Decimal::ZERO);
        let result = value_land(&LandValuationInput {
            comps: vec![degenerate],
            adjustment_categories: vec![],
            subject_units: dec!(10000),
            ..Default::default()
        })
        .unwrap();

        assert_eq!(result.result.raw_indicated_value, Money::ZERO);
        assert!(result.warnings.iter().any(|w| w.contains("zero land SF")));
    }

    #[test]
    fn rounding_snaps_to_precision() {
        assert_eq!(
            round_to_precision(dec!(1234567), dec!(1000)).unwrap(),
            dec!(1235000)
        );
        assert_eq!(
            round_to_precision(dec!(1234499), dec!(1000)).unwrap(),
            dec!(1234000)
        );
        assert_eq!(
            round_to_precision(dec!(1234500), dec!(1000)).unwrap(),
            dec!(1235000)
        );
    }

    #[test]
    fn zero_precision_is_rejected() {
        assert!(round_to_precision(dec!(100), Decimal::ZERO).is_err());
        assert!(round_to_precision(dec!(100), dec!(-1000)).is_err());
    }

    #[test]
    fn rounding_override_survives_small_drift() {
        // 3% drift keeps the accepted round.
        assert_eq!(
            reconcile_rounding(dec!(1030000), Some(dec!(1000000))),
            Some(dec!(1000000))
        );
    }

    #[test]
    fn rounding_override_discarded_past_five_percent_drift() {
        // 6% drift clears it.
        assert_eq!(reconcile_rounding(dec!(1060000), Some(dec!(1000000))), None);
    }

    #[test]
    fn drift_reset_flows_through_value_land() {
        let mut c = comp("c1", dec!(1060000), dec!(1000));
        c.adjustments.clear();

        let result = value_land(&LandValuationInput {
            comps: vec![c],
            adjustment_categories: vec![],
            subject_units: dec!(1000),
            prior_rounded_value: Some(dec!(1000000)),
            round_to_nearest: None,
        })
        .unwrap();

        // Raw is 1,060,000: 6% away from the accepted 1,000,000.
        assert_eq!(result.result.raw_indicated_value, dec!(1060000));
        assert_eq!(result.result.rounded_value, None);
        assert_eq!(result.result.reported_value, dec!(1060000));
        assert!(result.warnings.iter().any(|w| w.contains("discarded")));
    }

    #[test]
    fn fresh_round_action_pins_reported_value() {
        let c = comp("c1", dec!(1234567), dec!(1000));
        let result = value_land(&LandValuationInput {
            comps: vec![c],
            adjustment_categories: vec![],
            subject_units: dec!(1000),
            prior_rounded_value: None,
            round_to_nearest: Some(dec!(1000)),
        })
        .unwrap();

        assert_eq!(result.result.raw_indicated_value, dec!(1234567));
        assert_eq!(result.result.rounded_value, Some(dec!(1235000)));
        assert_eq!(result.result.reported_value, dec!(1235000));
    }
}

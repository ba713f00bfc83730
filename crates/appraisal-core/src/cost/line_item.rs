//! Replacement cost new and composed depreciation for one improvement.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::mapper::Improvement;
use crate::types::{Money, Rate, Years};

/// Derived dollar figures for a single improvement line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImprovementLineItem {
    /// Product of the current, local, and perimeter multipliers.
    pub combined_multiplier: Rate,
    /// Base cost per SF after multipliers.
    pub adjusted_rate: Money,
    /// Adjusted rate extended by area.
    pub base_cost_total: Money,
    /// Entrepreneurial incentive dollars on the adjusted base.
    pub incentive_amount: Money,
    /// Replacement cost new, inclusive of incentive.
    pub cost_new: Money,
    /// Physical + functional + external, additive.
    pub total_depreciation_pct: Rate,
    /// Cost new less total depreciation. Not clamped at zero; the caller
    /// decides how to surface a negative depreciated value.
    pub depreciated_cost: Money,
    pub remaining_economic_life: Years,
}

/// Compute the full cost line for one improvement.
///
/// Multipliers compose multiplicatively in fixed order (current, local,
/// perimeter); the three depreciation components compose additively with no
/// upper bound.
pub fn calculate_improvement_line_item(imp: &Improvement) -> ImprovementLineItem {
    let combined_multiplier =
        imp.multipliers.current * imp.multipliers.local * imp.multipliers.perimeter;
    let adjusted_rate = imp.base_cost_psf * combined_multiplier;
    let base_cost_total = imp.area_sf * adjusted_rate;
    let incentive_amount = base_cost_total * imp.entrepreneurial_incentive;
    let cost_new = base_cost_total + incentive_amount;
    let total_depreciation_pct =
        imp.depreciation_physical + imp.depreciation_functional + imp.depreciation_external;
    let depreciated_cost = cost_new * (Decimal::ONE - total_depreciation_pct);
    let remaining_economic_life = (imp.economic_life - imp.effective_age).max(Years::ZERO);

    ImprovementLineItem {
        combined_multiplier,
        adjusted_rate,
        base_cost_total,
        incentive_amount,
        cost_new,
        total_depreciation_pct,
        depreciated_cost,
        remaining_economic_life,
    }
}

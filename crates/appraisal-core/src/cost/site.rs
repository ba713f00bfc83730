//! Cost calculator for non-building site assets (paving, fencing, lighting).
//!
//! A simpler, parallel engine to the building calculator: one age-life
//! depreciation rate per item, no physical/functional/external split.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::{Money, Rate, Years};

/// Measurement unit for a site improvement quantity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum QuantityUnit {
    #[default]
    #[serde(rename = "SF")]
    SquareFeet,
    #[serde(rename = "LF")]
    LinearFeet,
    #[serde(rename = "EA")]
    Each,
    #[serde(rename = "LS")]
    LumpSum,
}

/// A non-building site asset.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteImprovement {
    pub id: String,
    pub label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub quantity: Decimal,
    pub unit: QuantityUnit,
    pub cost_per_unit: Money,
    /// Single age-life depreciation rate for this item.
    pub depreciation_percent: Rate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub economic_life: Option<Years>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub effective_age: Option<Years>,
}

/// Derived dollar figures for one site improvement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteImprovementLineItem {
    pub id: String,
    pub label: String,
    /// Replacement cost new: cost per unit extended by quantity.
    pub rcn: Money,
    pub depreciation_amount: Money,
    /// RCN less depreciation.
    pub contributory_value: Money,
}

/// Straight age-life depreciation rate: age over life, capped at 100%.
/// Degenerate lives resolve without dividing.
pub fn age_life_rate(effective_age: Years, economic_life: Years) -> Rate {
    if economic_life <= Years::ZERO {
        return if effective_age > Years::ZERO {
            Decimal::ONE
        } else {
            Rate::ZERO
        };
    }
    (effective_age / economic_life).min(Decimal::ONE)
}

/// Compute the cost line for one site improvement.
pub fn site_improvement_line_item(item: &SiteImprovement) -> SiteImprovementLineItem {
    let rcn = item.cost_per_unit * item.quantity;
    let depreciation_amount = rcn * item.depreciation_percent;
    let contributory_value = rcn - depreciation_amount;

    SiteImprovementLineItem {
        id: item.id.clone(),
        label: item.label.clone(),
        rcn,
        depreciation_amount,
        contributory_value,
    }
}

/// Line items for a whole site-improvements inventory.
pub fn site_improvement_line_items(items: &[SiteImprovement]) -> Vec<SiteImprovementLineItem> {
    items.iter().map(site_improvement_line_item).collect()
}

/// Total contributory value across all site improvements. An empty or missing
/// list totals to zero.
pub fn total_site_improvements_value(items: &[SiteImprovement]) -> Money {
    items
        .iter()
        .map(|item| site_improvement_line_item(item).contributory_value)
        .sum()
}

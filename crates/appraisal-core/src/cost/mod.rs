//! Cost approach: replacement cost new, depreciation, and site improvements.

pub mod depreciation;
pub mod line_item;
pub mod mapper;
pub mod site;

pub use depreciation::{suggested_physical_depreciation, AgeLifeRow, AGE_LIFE_TABLE};
pub use line_item::{calculate_improvement_line_item, ImprovementLineItem};
pub use mapper::{
    building_cost_defaults, effective_age_years, map_building_to_cost_format,
    selected_buildings_as_cost_format, ConstructionClass, CostOverrides, Improvement,
    MultiplierOverrides, Multipliers,
};
pub use site::{
    site_improvement_line_item, site_improvement_line_items, total_site_improvements_value,
    QuantityUnit, SiteImprovement, SiteImprovementLineItem,
};

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::inventory::model::Parcel;
use crate::types::{with_metadata, ComputationOutput, Money};

/// Input for a full scenario cost approach run.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CostApproachInput {
    pub parcels: Vec<Parcel>,
    pub selected_building_ids: Vec<String>,
    /// Per-building override entries. An explicit null entry resets the
    /// building to inventory-derived defaults; an absent entry means the
    /// building was never touched.
    #[serde(default)]
    pub cost_overrides: BTreeMap<String, Option<CostOverrides>>,
    #[serde(default)]
    pub site_improvements: Vec<SiteImprovement>,
    /// Valuation-date year used to derive effective ages.
    pub as_of_year: i32,
}

/// One improvement with its derived cost line.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImprovementValuationLine {
    pub improvement: Improvement,
    pub line_item: ImprovementLineItem,
}

/// Output of a scenario cost approach run.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CostApproachOutput {
    pub lines: Vec<ImprovementValuationLine>,
    pub site_improvement_lines: Vec<SiteImprovementLineItem>,
    /// Cost new across improvements, before site improvements.
    pub improvements_cost_new: Money,
    /// Depreciated cost across improvements, before site improvements.
    pub improvements_depreciated: Money,
    pub site_improvements_value: Money,
    /// Cost new including site improvements.
    pub replacement_cost_new_total: Money,
    /// Depreciated total including site improvements.
    pub depreciated_total: Money,
    pub total_depreciation_amount: Money,
}

/// Run the cost approach for one scenario: map selected buildings through
/// their overrides, price each line, and fold in the site improvements.
pub fn compute_cost_approach(input: &CostApproachInput) -> ComputationOutput<CostApproachOutput> {
    let mut warnings: Vec<String> = Vec::new();

    for id in &input.selected_building_ids {
        let found = input
            .parcels
            .iter()
            .any(|p| p.buildings.iter().any(|b| &b.id == id));
        if !found {
            warnings.push(format!(
                "Selected building '{id}' is not in the inventory — skipped"
            ));
        }
    }

    let improvements = selected_buildings_as_cost_format(
        &input.parcels,
        &input.selected_building_ids,
        &input.cost_overrides,
        input.as_of_year,
    );

    let mut improvements_cost_new = Money::ZERO;
    let mut improvements_depreciated = Money::ZERO;
    let mut lines = Vec::with_capacity(improvements.len());

    for improvement in improvements {
        let line_item = calculate_improvement_line_item(&improvement);
        improvements_cost_new += line_item.cost_new;
        improvements_depreciated += line_item.depreciated_cost;

        if line_item.total_depreciation_pct > Decimal::ONE {
            warnings.push(format!(
                "{}: total depreciation {} exceeds 100% — depreciated cost is negative",
                improvement.name, line_item.total_depreciation_pct
            ));
        }

        lines.push(ImprovementValuationLine {
            improvement,
            line_item,
        });
    }

    let site_improvement_lines = site_improvement_line_items(&input.site_improvements);
    let site_improvements_value: Money = site_improvement_lines
        .iter()
        .map(|l| l.contributory_value)
        .sum();

    let replacement_cost_new_total = improvements_cost_new + site_improvements_value;
    let depreciated_total = improvements_depreciated + site_improvements_value;

    let output = CostApproachOutput {
        lines,
        site_improvement_lines,
        improvements_cost_new,
        improvements_depreciated,
        site_improvements_value,
        replacement_cost_new_total,
        depreciated_total,
        total_depreciation_amount: replacement_cost_new_total - depreciated_total,
    };

    with_metadata(
        "Cost Approach (Replacement Cost New Less Depreciation)",
        input,
        warnings,
        output,
    )
}

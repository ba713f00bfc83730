//! Scenario value conclusion: land plus depreciated improvements plus site
//! improvements plus any stabilization soft-cost adjustment, with an exact
//! total tracked separately from the user-reportable final value.

use serde::{Deserialize, Serialize};

use crate::cost::{
    compute_cost_approach, CostApproachInput, CostApproachOutput, SiteImprovement,
};
use crate::inventory::{
    compute_rollups, validate_inventory, Inventory, InventoryRollups, ValidationOptions,
    ValidationReport,
};
use crate::land::{value_land, LandValuationInput, LandValuationOutput};
use crate::scenario::{Scenario, ScenarioOverlays};
use crate::types::{with_metadata, ComputationOutput, Money};
use crate::AppraisalResult;

/// Reported-value state machine.
///
/// `Synced`: the final value mirrors the exact total and auto-updates with
/// it. A manual edit or a round action pins it to `Overridden`, after which
/// the exact total is still computed and shown alongside for audit but the
/// final value no longer tracks it. There is no automatic return to `Synced`
/// (unlike the land grid's drift reset, a cost conclusion override only
/// clears by explicit caller action).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FinalValueState {
    #[default]
    Synced,
    Overridden(Money),
}

impl FinalValueState {
    /// The value the report shows for a given exact total.
    pub fn reported(&self, exact_total: Money) -> Money {
        match self {
            FinalValueState::Synced => exact_total,
            FinalValueState::Overridden(pinned) => *pinned,
        }
    }

    pub fn is_overridden(&self) -> bool {
        matches!(self, FinalValueState::Overridden(_))
    }

    /// Pin the final value to a manually entered figure.
    pub fn override_with(self, value: Money) -> Self {
        FinalValueState::Overridden(value)
    }

    /// Pin the final value to the exact total snapped to a precision.
    pub fn round_to(self, exact_total: Money, precision: Money) -> AppraisalResult<Self> {
        let rounded = crate::land::round_to_precision(exact_total, precision)?;
        Ok(FinalValueState::Overridden(rounded))
    }

    /// Explicitly return to tracking the exact total.
    pub fn clear(self) -> Self {
        FinalValueState::Synced
    }
}

/// The per-scenario value conclusion.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValueConclusion {
    pub land_value: Money,
    pub improvements_value: Money,
    pub site_improvements_value: Money,
    /// Scenario-specific additive soft-cost figure (lost rent, lease-up
    /// costs); externally supplied, nonzero only for stabilization-type
    /// scenarios.
    pub stabilization_adjustment: Money,
    /// The live computed total, always carried for audit.
    pub exact_total: Money,
    /// What the report shows.
    pub final_value: Money,
    pub final_value_overridden: bool,
}

/// Sum the conclusion components and resolve the reported value through the
/// final-value state machine.
pub fn conclude_value(
    land_value: Money,
    improvements_value: Money,
    site_improvements_value: Money,
    stabilization_adjustment: Money,
    final_value: FinalValueState,
) -> ValueConclusion {
    let exact_total =
        land_value + improvements_value + site_improvements_value + stabilization_adjustment;

    ValueConclusion {
        land_value,
        improvements_value,
        site_improvements_value,
        stabilization_adjustment,
        exact_total,
        final_value: final_value.reported(exact_total),
        final_value_overridden: final_value.is_overridden(),
    }
}

/// Input for a full scenario appraisal run.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScenarioAppraisalInput {
    pub inventory: Inventory,
    pub scenario: Scenario,
    #[serde(default)]
    pub overlays: ScenarioOverlays,
    #[serde(default)]
    pub site_improvements: Vec<SiteImprovement>,
    /// Land grid inputs. An omitted grid contributes a zero land value.
    #[serde(default)]
    pub land: LandValuationInput,
    #[serde(default)]
    pub stabilization_adjustment: Money,
    #[serde(default)]
    pub final_value: FinalValueState,
    #[serde(default)]
    pub validation: ValidationOptions,
    /// Valuation-date year used to derive effective ages.
    pub as_of_year: i32,
}

/// Everything a caller needs to render one scenario: the conclusion, the
/// cost and land breakdowns behind it, and the inventory projections.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScenarioAppraisal {
    pub scenario: Scenario,
    pub conclusion: ValueConclusion,
    pub cost_approach: CostApproachOutput,
    pub land: LandValuationOutput,
    pub rollups: InventoryRollups,
    pub validation: ValidationReport,
}

/// Run the full pipeline for one scenario: cost approach over the scenario's
/// building selection and overrides, the land grid, the site improvements,
/// and the reconciled conclusion. Validation issues are advisory; the
/// numbers are computed from whatever valid data remains.
pub fn appraise_scenario(
    input: &ScenarioAppraisalInput,
) -> AppraisalResult<ComputationOutput<ScenarioAppraisal>> {
    let mut warnings: Vec<String> = Vec::new();

    let rollups = compute_rollups(&input.inventory);
    let validation = validate_inventory(&input.inventory, &input.validation);
    if validation.has_blocking_errors() {
        warnings.push(
            "Inventory has blocking validation issues — totals reflect the remaining valid data"
                .to_string(),
        );
    }

    let cost_input = CostApproachInput {
        parcels: input.inventory.parcels.clone(),
        selected_building_ids: input
            .overlays
            .selected_buildings(&input.scenario.id)
            .to_vec(),
        cost_overrides: input.overlays.cost_data(&input.scenario.id).clone(),
        site_improvements: input.site_improvements.clone(),
        as_of_year: input.as_of_year,
    };
    let cost = compute_cost_approach(&cost_input);
    warnings.extend(cost.warnings);

    let land = value_land(&input.land)?;
    warnings.extend(land.warnings);

    let conclusion = conclude_value(
        land.result.reported_value,
        cost.result.improvements_depreciated,
        cost.result.site_improvements_value,
        input.stabilization_adjustment,
        input.final_value,
    );

    let output = ScenarioAppraisal {
        scenario: input.scenario.clone(),
        conclusion,
        cost_approach: cost.result,
        land: land.result,
        rollups,
        validation,
    };

    Ok(with_metadata(
        "Scenario Value Conclusion (Cost Approach + Land Sales Comparison)",
        input,
        warnings,
        output,
    ))
}

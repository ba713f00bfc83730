//! Scenario definitions and the per-scenario override overlays.
//!
//! A scenario is a named valuation context (As Is, As Completed, …). Each
//! scenario keeps its own building selection and its own sparse cost-override
//! layer, keyed on top of the canonical inventory. The overlays are patches
//! merged at read time; they never write back into the inventory.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::cost::CostOverrides;

pub type ScenarioId = String;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ScenarioKind {
    #[default]
    AsIs,
    AsCompleted,
    AsStabilized,
    Custom(String),
}

/// A named valuation context.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Scenario {
    pub id: ScenarioId,
    pub name: String,
    pub kind: ScenarioKind,
}

/// One scenario's cost-override layer. The entry value distinguishes two
/// states that both resolve to defaults: an absent entry ("never touched")
/// and an explicit null entry ("reset to defaults", still shown as modified
/// by the UI).
pub type ScenarioCostData = BTreeMap<String, Option<CostOverrides>>;

static EMPTY_SELECTION: Vec<String> = Vec::new();
static EMPTY_COST_DATA: ScenarioCostData = ScenarioCostData::new();

/// Scenario-indexed override state, owned by the surrounding document
/// session. The engine only reads it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScenarioOverlays {
    /// Building ids included in the cost approach, per scenario.
    #[serde(default)]
    pub building_selections: BTreeMap<ScenarioId, Vec<String>>,
    /// Cost override entries, per scenario then per building.
    #[serde(default)]
    pub building_cost_data: BTreeMap<ScenarioId, ScenarioCostData>,
}

impl ScenarioOverlays {
    pub fn selected_buildings(&self, scenario_id: &str) -> &[String] {
        self.building_selections
            .get(scenario_id)
            .unwrap_or(&EMPTY_SELECTION)
    }

    pub fn set_selection(&mut self, scenario_id: &str, building_ids: Vec<String>) {
        self.building_selections
            .insert(scenario_id.to_string(), building_ids);
    }

    pub fn cost_data(&self, scenario_id: &str) -> &ScenarioCostData {
        self.building_cost_data
            .get(scenario_id)
            .unwrap_or(&EMPTY_COST_DATA)
    }

    /// Resolve the effective overrides for a building: absent and
    /// explicit-null entries both fall through to defaults.
    pub fn resolve_overrides(&self, scenario_id: &str, building_id: &str) -> Option<&CostOverrides> {
        self.building_cost_data
            .get(scenario_id)?
            .get(building_id)?
            .as_ref()
    }

    /// Whether a building carries any override entry in this scenario,
    /// including an explicit reset. Drives the UI "Modified" badge.
    pub fn is_modified(&self, scenario_id: &str, building_id: &str) -> bool {
        self.building_cost_data
            .get(scenario_id)
            .is_some_and(|data| data.contains_key(building_id))
    }

    /// Write an override entry. Passing `None` records an explicit reset to
    /// defaults, distinct from removing the entry.
    pub fn set_cost_override(
        &mut self,
        scenario_id: &str,
        building_id: &str,
        overrides: Option<CostOverrides>,
    ) {
        self.building_cost_data
            .entry(scenario_id.to_string())
            .or_default()
            .insert(building_id.to_string(), overrides);
    }

    /// Remove an override entry entirely, returning the building to the
    /// "never touched" state.
    pub fn clear_cost_override(&mut self, scenario_id: &str, building_id: &str) {
        if let Some(data) = self.building_cost_data.get_mut(scenario_id) {
            data.remove(building_id);
        }
    }
}

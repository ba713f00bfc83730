//! Projects selected inventory buildings into flat improvement cost records.
//!
//! The mapper never mutates the inventory: the inventory is the single source
//! of truth for physical facts (SF, year, use), while cost assumptions are
//! scenario-scoped overlays merged at read time. Each call produces fresh
//! derived [`Improvement`] records.

use std::collections::BTreeMap;

use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::inventory::model::{
    Building, ConditionRating, ConstructionType, Parcel, QualityGrade, UseType,
};
use crate::types::{Money, Rate, SquareFeet, Years};

/// Marshall & Swift style construction class.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConstructionClass {
    #[serde(rename = "A")]
    FireproofSteel,
    #[serde(rename = "B")]
    ReinforcedConcrete,
    #[default]
    #[serde(rename = "C")]
    Masonry,
    #[serde(rename = "D")]
    WoodFrame,
    #[serde(rename = "S")]
    Metal,
}

impl std::fmt::Display for ConstructionClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConstructionClass::FireproofSteel => write!(f, "A - Fireproof Steel"),
            ConstructionClass::ReinforcedConcrete => write!(f, "B - Reinforced Concrete"),
            ConstructionClass::Masonry => write!(f, "C - Masonry"),
            ConstructionClass::WoodFrame => write!(f, "D - Wood Frame"),
            ConstructionClass::Metal => write!(f, "S - Metal"),
        }
    }
}

impl ConstructionType {
    /// Map the inventory construction system to its cost class.
    pub fn construction_class(&self) -> ConstructionClass {
        match self {
            ConstructionType::SteelFrame => ConstructionClass::FireproofSteel,
            ConstructionType::ReinforcedConcrete => ConstructionClass::ReinforcedConcrete,
            ConstructionType::Masonry | ConstructionType::TiltUp => ConstructionClass::Masonry,
            ConstructionType::WoodFrame => ConstructionClass::WoodFrame,
            ConstructionType::Metal | ConstructionType::PrefabMetal => ConstructionClass::Metal,
        }
    }
}

/// Typical total economic life in years by construction class.
pub fn default_economic_life(class: ConstructionClass) -> Years {
    match class {
        ConstructionClass::FireproofSteel => dec!(55),
        ConstructionClass::ReinforcedConcrete => dec!(50),
        ConstructionClass::Masonry => dec!(45),
        ConstructionClass::WoodFrame => dec!(40),
        ConstructionClass::Metal => dec!(40),
    }
}

impl ConditionRating {
    /// Effective-age multiplier: better-kept buildings age slower.
    fn age_multiplier(&self) -> Decimal {
        match self {
            ConditionRating::Excellent => dec!(0.6),
            ConditionRating::Good => dec!(0.8),
            ConditionRating::Average => dec!(1.0),
            ConditionRating::Fair => dec!(1.2),
            ConditionRating::Poor => dec!(1.5),
        }
    }
}

/// Cost multipliers applied to the base rate, in fixed order.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Multipliers {
    pub current: Rate,
    pub local: Rate,
    pub perimeter: Rate,
}

impl Default for Multipliers {
    fn default() -> Self {
        Self {
            current: Decimal::ONE,
            local: Decimal::ONE,
            perimeter: Decimal::ONE,
        }
    }
}

/// Sparse multiplier overrides, merged field-by-field.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct MultiplierOverrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current: Option<Rate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub local: Option<Rate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub perimeter: Option<Rate>,
}

/// Scenario-and-building-specific cost overrides. Every field is optional:
/// unset fields fall through to the inventory-derived defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CostOverrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_cost_psf: Option<Money>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub occupancy: Option<UseType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub class: Option<ConstructionClass>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quality: Option<QualityGrade>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub effective_age: Option<Years>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub economic_life: Option<Years>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entrepreneurial_incentive: Option<Rate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub multipliers: Option<MultiplierOverrides>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub depreciation_physical: Option<Rate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub depreciation_functional: Option<Rate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub depreciation_external: Option<Rate>,
}

/// A flat improvement cost record, ready for cost-new and depreciation math.
/// Derived per (scenario, building); never written back to the inventory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Improvement {
    pub id: String,
    pub name: String,
    pub parcel_label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub occupancy: Option<UseType>,
    pub class: ConstructionClass,
    pub quality: QualityGrade,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year_built: Option<i32>,
    pub effective_age: Years,
    pub economic_life: Years,
    pub area_sf: SquareFeet,
    pub base_cost_psf: Money,
    pub entrepreneurial_incentive: Rate,
    pub multipliers: Multipliers,
    pub depreciation_physical: Rate,
    pub depreciation_functional: Rate,
    pub depreciation_external: Rate,
}

/// Default entrepreneurial incentive (developer profit) when no override is set.
pub const DEFAULT_ENTREPRENEURIAL_INCENTIVE: Rate = dec!(0.10);

/// Effective age used when the construction year is unknown.
const UNKNOWN_YEAR_EFFECTIVE_AGE: Years = dec!(10);

/// Estimate effective age from chronological age, condition, and remodel
/// history. A remodel resets the clock to the years since remodel, floored at
/// 60% of the chronological age.
pub fn effective_age_years(
    year_built: Option<i32>,
    condition: Option<ConditionRating>,
    year_remodeled: Option<&str>,
    as_of_year: i32,
) -> Years {
    let year_built = match year_built {
        Some(y) => y,
        None => return UNKNOWN_YEAR_EFFECTIVE_AGE,
    };

    let mut actual_age = Decimal::from(as_of_year - year_built);

    if let Some(remodel_year) = year_remodeled.and_then(|s| s.trim().parse::<i32>().ok()) {
        let since_remodel = Decimal::from(as_of_year - remodel_year);
        actual_age = since_remodel.max(actual_age * dec!(0.6));
    }

    let multiplier = condition.unwrap_or_default().age_multiplier();
    (actual_age * multiplier).round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
}

/// Compute the inventory-derived default improvement record for a building.
pub fn building_cost_defaults(
    building: &Building,
    parcel_label: &str,
    as_of_year: i32,
) -> Improvement {
    let class = building
        .construction_type
        .map(|t| t.construction_class())
        .unwrap_or_default();

    Improvement {
        id: building.id.clone(),
        name: building.label.clone(),
        parcel_label: parcel_label.to_string(),
        occupancy: building.dominant_use_type().cloned(),
        class,
        quality: building.quality.unwrap_or_default(),
        year_built: building.earliest_effective_year(),
        effective_age: effective_age_years(
            building.earliest_effective_year(),
            building.condition,
            building.year_remodeled.as_deref(),
            as_of_year,
        ),
        economic_life: default_economic_life(class),
        area_sf: building.total_sf(),
        // Base cost rates come from an external pricing service; absent an
        // override the record carries zero.
        base_cost_psf: Money::ZERO,
        entrepreneurial_incentive: DEFAULT_ENTREPRENEURIAL_INCENTIVE,
        multipliers: Multipliers::default(),
        depreciation_physical: Rate::ZERO,
        depreciation_functional: Rate::ZERO,
        depreciation_external: Rate::ZERO,
    }
}

/// Merge a sparse override record on top of the inventory-derived defaults.
/// Override fields win field-by-field; unset fields fall through.
pub fn map_building_to_cost_format(
    building: &Building,
    parcel_label: &str,
    overrides: Option<&CostOverrides>,
    as_of_year: i32,
) -> Improvement {
    let mut improvement = building_cost_defaults(building, parcel_label, as_of_year);

    let Some(ov) = overrides else {
        return improvement;
    };

    if let Some(base_cost_psf) = ov.base_cost_psf {
        improvement.base_cost_psf = base_cost_psf;
    }
    if let Some(occupancy) = &ov.occupancy {
        improvement.occupancy = Some(occupancy.clone());
    }
    if let Some(class) = ov.class {
        improvement.class = class;
        // Economic life tracks the overridden class unless itself overridden.
        improvement.economic_life = default_economic_life(class);
    }
    if let Some(quality) = ov.quality {
        improvement.quality = quality;
    }
    if let Some(effective_age) = ov.effective_age {
        improvement.effective_age = effective_age;
    }
    if let Some(economic_life) = ov.economic_life {
        improvement.economic_life = economic_life;
    }
    if let Some(incentive) = ov.entrepreneurial_incentive {
        improvement.entrepreneurial_incentive = incentive;
    }
    if let Some(multipliers) = ov.multipliers {
        if let Some(current) = multipliers.current {
            improvement.multipliers.current = current;
        }
        if let Some(local) = multipliers.local {
            improvement.multipliers.local = local;
        }
        if let Some(perimeter) = multipliers.perimeter {
            improvement.multipliers.perimeter = perimeter;
        }
    }
    if let Some(physical) = ov.depreciation_physical {
        improvement.depreciation_physical = physical;
    }
    if let Some(functional) = ov.depreciation_functional {
        improvement.depreciation_functional = functional;
    }
    if let Some(external) = ov.depreciation_external {
        improvement.depreciation_external = external;
    }

    improvement
}

/// Project the selected buildings into cost records, selection order
/// preserved. Ids that no longer resolve in the inventory are skipped
/// silently, since a prior selection may reference a since-deleted building.
pub fn selected_buildings_as_cost_format(
    parcels: &[Parcel],
    selected_building_ids: &[String],
    cost_overrides: &BTreeMap<String, Option<CostOverrides>>,
    as_of_year: i32,
) -> Vec<Improvement> {
    selected_building_ids
        .iter()
        .filter_map(|id| {
            parcels.iter().find_map(|parcel| {
                parcel
                    .buildings
                    .iter()
                    .find(|b| &b.id == id)
                    .map(|building| {
                        let overrides = cost_overrides.get(id).and_then(|entry| entry.as_ref());
                        map_building_to_cost_format(building, &parcel.label, overrides, as_of_year)
                    })
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inventory::model::{Area, SfType};
    use pretty_assertions::assert_eq;

    fn warehouse_building() -> Building {
        Building {
            id: "b1".into(),
            label: "Main Warehouse".into(),
            year_built: Some(2010),
            construction_type: Some(ConstructionType::Masonry),
            quality: Some(QualityGrade::Good),
            areas: vec![
                Area {
                    id: "a1".into(),
                    use_type: UseType::Warehouse,
                    sf: dec!(8000),
                    sf_type: SfType::Gba,
                    year_built_override: None,
                    notes: None,
                },
                Area {
                    id: "a2".into(),
                    use_type: UseType::Office,
                    sf: dec!(2000),
                    sf_type: SfType::Gba,
                    year_built_override: None,
                    notes: None,
                },
            ],
            ..Default::default()
        }
    }

    fn parcel_with(building: Building) -> Parcel {
        Parcel {
            id: "p1".into(),
            label: "Parcel 1".into(),
            buildings: vec![building],
            ..Default::default()
        }
    }

    #[test]
    fn defaults_derive_from_inventory() {
        let imp = building_cost_defaults(&warehouse_building(), "Parcel 1", 2025);

        assert_eq!(imp.area_sf, dec!(10000));
        assert_eq!(imp.occupancy, Some(UseType::Warehouse));
        assert_eq!(imp.class, ConstructionClass::Masonry);
        assert_eq!(imp.quality, QualityGrade::Good);
        assert_eq!(imp.year_built, Some(2010));
        assert_eq!(imp.economic_life, dec!(45));
        assert_eq!(imp.base_cost_psf, Money::ZERO);
        assert_eq!(imp.multipliers, Multipliers::default());
    }

    #[test]
    fn override_fields_win_field_by_field() {
        let overrides = CostOverrides {
            base_cost_psf: Some(dec!(50)),
            ..Default::default()
        };
        let imp = map_building_to_cost_format(
            &warehouse_building(),
            "Parcel 1",
            Some(&overrides),
            2025,
        );

        assert_eq!(imp.base_cost_psf, dec!(50));
        // Unrelated fields stay at their inventory-derived defaults.
        assert_eq!(imp.area_sf, dec!(10000));
        assert_eq!(imp.occupancy, Some(UseType::Warehouse));
        assert_eq!(imp.economic_life, dec!(45));
    }

    #[test]
    fn multiplier_overrides_merge_field_by_field() {
        let overrides = CostOverrides {
            multipliers: Some(MultiplierOverrides {
                local: Some(dec!(1.02)),
                ..Default::default()
            }),
            ..Default::default()
        };
        let imp = map_building_to_cost_format(
            &warehouse_building(),
            "Parcel 1",
            Some(&overrides),
            2025,
        );

        assert_eq!(imp.multipliers.current, Decimal::ONE);
        assert_eq!(imp.multipliers.local, dec!(1.02));
        assert_eq!(imp.multipliers.perimeter, Decimal::ONE);
    }

    #[test]
    fn class_override_retargets_default_economic_life() {
        let overrides = CostOverrides {
            class: Some(ConstructionClass::FireproofSteel),
            ..Default::default()
        };
        let imp = map_building_to_cost_format(
            &warehouse_building(),
            "Parcel 1",
            Some(&overrides),
            2025,
        );
        assert_eq!(imp.economic_life, dec!(55));

        let both = CostOverrides {
            class: Some(ConstructionClass::FireproofSteel),
            economic_life: Some(dec!(60)),
            ..Default::default()
        };
        let imp =
            map_building_to_cost_format(&warehouse_building(), "Parcel 1", Some(&both), 2025);
        assert_eq!(imp.economic_life, dec!(60));
    }

    #[test]
    fn selection_order_is_preserved_and_stale_ids_skipped() {
        let mut second = warehouse_building();
        second.id = "b2".into();
        second.label = "Annex".into();

        let parcels = vec![parcel_with(warehouse_building()), parcel_with(second)];
        let selected = vec!["b2".to_string(), "gone".to_string(), "b1".to_string()];

        let improvements =
            selected_buildings_as_cost_format(&parcels, &selected, &BTreeMap::new(), 2025);

        let ids: Vec<_> = improvements.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, vec!["b2", "b1"]);
    }

    #[test]
    fn explicit_null_entry_resets_to_defaults() {
        let mut overrides = BTreeMap::new();
        overrides.insert("b1".to_string(), None::<CostOverrides>);

        let parcels = vec![parcel_with(warehouse_building())];
        let improvements = selected_buildings_as_cost_format(
            &parcels,
            &["b1".to_string()],
            &overrides,
            2025,
        );

        assert_eq!(
            improvements[0],
            building_cost_defaults(&warehouse_building(), "Parcel 1", 2025)
        );
    }

    #[test]
    fn effective_age_scales_with_condition() {
        // 20-year-old building in good condition: 20 * 0.8 = 16
        assert_eq!(
            effective_age_years(Some(2005), Some(ConditionRating::Good), None, 2025),
            dec!(16)
        );
        // Poor condition ages faster: 20 * 1.5 = 30
        assert_eq!(
            effective_age_years(Some(2005), Some(ConditionRating::Poor), None, 2025),
            dec!(30)
        );
    }

    #[test]
    fn remodel_resets_effective_age_with_floor() {
        // Built 1985 (age 40), remodeled 2020 (5 years ago). Floor is
        // 40 * 0.6 = 24, so the remodel cannot reset below that.
        assert_eq!(
            effective_age_years(Some(1985), None, Some("2020"), 2025),
            dec!(24)
        );
        // Built 2015 (age 10), remodeled 2022: max(3, 6) = 6.
        assert_eq!(
            effective_age_years(Some(2015), None, Some("2022"), 2025),
            dec!(6)
        );
        // Unparseable remodel text is ignored.
        assert_eq!(
            effective_age_years(Some(2015), None, Some("N/A"), 2025),
            dec!(10)
        );
    }

    #[test]
    fn unknown_year_built_defaults_to_ten_years() {
        assert_eq!(effective_age_years(None, None, None, 2025), dec!(10));
    }
}

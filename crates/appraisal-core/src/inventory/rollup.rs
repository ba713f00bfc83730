//! Read-only square-footage rollups over the inventory tree.
//!
//! Rollups are a pure derived view: re-derivable at any time from the
//! inventory alone and never persisted as authoritative.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::model::Inventory;
use crate::types::SquareFeet;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubjectTotals {
    pub parcels: usize,
    pub buildings: usize,
    pub sf_total: SquareFeet,
    pub sf_by_type: BTreeMap<String, SquareFeet>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryRollups {
    pub subject_totals: SubjectTotals,
}

/// Walk every area once, accumulating square footage into a grand total and a
/// per-use-type bucket. Custom areas bucket under their free-text label.
pub fn compute_rollups(inventory: &Inventory) -> InventoryRollups {
    let mut totals = SubjectTotals {
        parcels: inventory.parcels.len(),
        ..Default::default()
    };

    for parcel in &inventory.parcels {
        totals.buildings += parcel.buildings.len();
        for building in &parcel.buildings {
            for area in &building.areas {
                totals.sf_total += area.sf;
                *totals
                    .sf_by_type
                    .entry(area.use_type.bucket_key().to_string())
                    .or_insert(SquareFeet::ZERO) += area.sf;
            }
        }
    }

    InventoryRollups {
        subject_totals: totals,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inventory::model::{Area, Building, Parcel, SfType, UseType};
    use rust_decimal_macros::dec;

    fn area(use_type: UseType, sf: SquareFeet) -> Area {
        Area {
            id: String::new(),
            use_type,
            sf,
            sf_type: SfType::Gba,
            year_built_override: None,
            notes: None,
        }
    }

    #[test]
    fn rollups_accumulate_by_use_type() {
        let inv = Inventory {
            schema_version: 1,
            parcels: vec![
                Parcel {
                    id: "p1".into(),
                    label: "Parcel 1".into(),
                    buildings: vec![Building {
                        id: "b1".into(),
                        label: "Building 1".into(),
                        areas: vec![
                            area(UseType::Warehouse, dec!(8000)),
                            area(UseType::Office, dec!(1500)),
                        ],
                        ..Default::default()
                    }],
                    ..Default::default()
                },
                Parcel {
                    id: "p2".into(),
                    label: "Parcel 2".into(),
                    buildings: vec![Building {
                        id: "b2".into(),
                        label: "Building 2".into(),
                        areas: vec![
                            area(UseType::Warehouse, dec!(4000)),
                            area(UseType::Custom("Kennel".into()), dec!(600)),
                        ],
                        ..Default::default()
                    }],
                    ..Default::default()
                },
            ],
        };

        let rollups = compute_rollups(&inv);
        let totals = &rollups.subject_totals;

        assert_eq!(totals.parcels, 2);
        assert_eq!(totals.buildings, 2);
        assert_eq!(totals.sf_total, dec!(14100));
        assert_eq!(totals.sf_by_type["warehouse"], dec!(12000));
        assert_eq!(totals.sf_by_type["office"], dec!(1500));
        assert_eq!(totals.sf_by_type["Kennel"], dec!(600));
    }

    #[test]
    fn empty_inventory_rolls_up_to_zero() {
        let rollups = compute_rollups(&Inventory::default());
        assert_eq!(rollups.subject_totals.parcels, 0);
        assert_eq!(rollups.subject_totals.sf_total, SquareFeet::ZERO);
        assert!(rollups.subject_totals.sf_by_type.is_empty());
    }
}

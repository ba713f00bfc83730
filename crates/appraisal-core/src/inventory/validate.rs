//! Structural validation of a normalized inventory.
//!
//! Issues are advisory to the engine, which still computes whatever it can from
//! the remaining valid data. A calling workflow uses error-severity issues to
//! block its "finalize" action.

use serde::{Deserialize, Serialize};

use super::model::Inventory;
use crate::types::SquareFeet;

/// Options controlling which structural conditions count as errors.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationOptions {
    /// False for land-only valuation templates, where an empty improvement
    /// tree is expected rather than an error.
    pub require_improvements: bool,
}

impl Default for ValidationOptions {
    fn default() -> Self {
        Self {
            require_improvements: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IssueSeverity {
    Error,
    Warning,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum IssueCode {
    ParcelWithoutBuildings,
    BuildingWithoutAreas,
    AreaNonPositiveSf,
    MissingTaxParcelId,
    MissingYearBuilt,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Issue {
    pub code: IssueCode,
    pub message: String,
    pub severity: IssueSeverity,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ValidationReport {
    pub issues: Vec<Issue>,
}

impl ValidationReport {
    /// True when any error-severity issue is present. Callers gate their
    /// finalize action on this.
    pub fn has_blocking_errors(&self) -> bool {
        self.issues
            .iter()
            .any(|i| i.severity == IssueSeverity::Error)
    }

    fn error(&mut self, code: IssueCode, message: String) {
        self.issues.push(Issue {
            code,
            message,
            severity: IssueSeverity::Error,
        });
    }

    fn warning(&mut self, code: IssueCode, message: String) {
        self.issues.push(Issue {
            code,
            message,
            severity: IssueSeverity::Warning,
        });
    }
}

/// Validate a normalized inventory tree.
pub fn validate_inventory(inventory: &Inventory, options: &ValidationOptions) -> ValidationReport {
    let mut report = ValidationReport::default();

    for parcel in &inventory.parcels {
        if options.require_improvements && parcel.buildings.is_empty() {
            report.error(
                IssueCode::ParcelWithoutBuildings,
                format!("{} has no buildings", parcel.label),
            );
        }

        if parcel.tax_parcel_id.is_none() {
            report.warning(
                IssueCode::MissingTaxParcelId,
                format!("{} is missing a tax parcel ID", parcel.label),
            );
        }

        for building in &parcel.buildings {
            if building.areas.is_empty() {
                report.error(
                    IssueCode::BuildingWithoutAreas,
                    format!("{} on {} has no areas", building.label, parcel.label),
                );
            }

            if building.year_built.is_none() {
                report.warning(
                    IssueCode::MissingYearBuilt,
                    format!("{} on {} is missing a year built", building.label, parcel.label),
                );
            }

            for area in &building.areas {
                if area.sf <= SquareFeet::ZERO {
                    report.error(
                        IssueCode::AreaNonPositiveSf,
                        format!(
                            "Area {} in {} has non-positive square footage ({})",
                            area.id, building.label, area.sf
                        ),
                    );
                }
            }
        }
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inventory::model::{Area, Building, Parcel, SfType, UseType};
    use rust_decimal_macros::dec;

    fn inventory_with(parcels: Vec<Parcel>) -> Inventory {
        Inventory {
            schema_version: 1,
            parcels,
        }
    }

    fn valid_parcel() -> Parcel {
        Parcel {
            id: "p1".into(),
            label: "Parcel 1".into(),
            tax_parcel_id: Some("03-1882-04".into()),
            buildings: vec![Building {
                id: "b1".into(),
                label: "Building 1".into(),
                year_built: Some(2010),
                areas: vec![Area {
                    id: "a1".into(),
                    use_type: UseType::Warehouse,
                    sf: dec!(10000),
                    sf_type: SfType::Gba,
                    year_built_override: None,
                    notes: None,
                }],
                ..Default::default()
            }],
            ..Default::default()
        }
    }

    #[test]
    fn clean_inventory_has_no_issues() {
        let report = validate_inventory(
            &inventory_with(vec![valid_parcel()]),
            &ValidationOptions::default(),
        );
        assert!(report.issues.is_empty());
        assert!(!report.has_blocking_errors());
    }

    #[test]
    fn parcel_without_buildings_is_error_when_required() {
        let mut parcel = valid_parcel();
        parcel.buildings.clear();
        let inv = inventory_with(vec![parcel]);

        let report = validate_inventory(&inv, &ValidationOptions::default());
        assert!(report.has_blocking_errors());
        assert_eq!(report.issues[0].code, IssueCode::ParcelWithoutBuildings);
    }

    #[test]
    fn land_only_mode_accepts_empty_improvement_tree() {
        let mut parcel = valid_parcel();
        parcel.buildings.clear();
        let inv = inventory_with(vec![parcel]);

        let report = validate_inventory(
            &inv,
            &ValidationOptions {
                require_improvements: false,
            },
        );
        assert!(!report.has_blocking_errors());
    }

    #[test]
    fn building_without_areas_is_error() {
        let mut parcel = valid_parcel();
        parcel.buildings[0].areas.clear();
        let report =
            validate_inventory(&inventory_with(vec![parcel]), &ValidationOptions::default());
        assert!(report
            .issues
            .iter()
            .any(|i| i.code == IssueCode::BuildingWithoutAreas
                && i.severity == IssueSeverity::Error));
    }

    #[test]
    fn zero_sf_area_is_error() {
        let mut parcel = valid_parcel();
        parcel.buildings[0].areas[0].sf = dec!(0);
        let report =
            validate_inventory(&inventory_with(vec![parcel]), &ValidationOptions::default());
        assert!(report
            .issues
            .iter()
            .any(|i| i.code == IssueCode::AreaNonPositiveSf));
    }

    #[test]
    fn missing_metadata_is_warning_only() {
        let mut parcel = valid_parcel();
        parcel.tax_parcel_id = None;
        parcel.buildings[0].year_built = None;
        let report =
            validate_inventory(&inventory_with(vec![parcel]), &ValidationOptions::default());

        assert!(!report.has_blocking_errors());
        let codes: Vec<_> = report.issues.iter().map(|i| i.code).collect();
        assert!(codes.contains(&IssueCode::MissingTaxParcelId));
        assert!(codes.contains(&IssueCode::MissingYearBuilt));
    }
}

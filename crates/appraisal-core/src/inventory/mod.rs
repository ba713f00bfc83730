pub mod model;
pub mod normalize;
pub mod rollup;
pub mod validate;

pub use model::{
    Area, Building, ConditionRating, ConstructionType, Inventory, Parcel, QualityGrade, SfType,
    UseType, SCHEMA_VERSION,
};
pub use normalize::normalize_inventory;
pub use rollup::{compute_rollups, InventoryRollups, SubjectTotals};
pub use validate::{
    validate_inventory, Issue, IssueCode, IssueSeverity, ValidationOptions, ValidationReport,
};

use napi::Result as NapiResult;
use napi_derive::napi;

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

// ---------------------------------------------------------------------------
// Inventory
// ---------------------------------------------------------------------------

#[napi]
pub fn normalize_inventory(document_json: String) -> NapiResult<String> {
    let raw: serde_json::Value = serde_json::from_str(&document_json).map_err(to_napi_error)?;
    let inventory = appraisal_core::inventory::normalize_inventory(&raw);
    serde_json::to_string(&inventory).map_err(to_napi_error)
}

#[napi]
pub fn validate_inventory(inventory_json: String, require_improvements: bool) -> NapiResult<String> {
    let inventory: appraisal_core::inventory::Inventory =
        serde_json::from_str(&inventory_json).map_err(to_napi_error)?;
    let report = appraisal_core::inventory::validate_inventory(
        &inventory,
        &appraisal_core::inventory::ValidationOptions {
            require_improvements,
        },
    );
    serde_json::to_string(&report).map_err(to_napi_error)
}

#[napi]
pub fn compute_rollups(inventory_json: String) -> NapiResult<String> {
    let inventory: appraisal_core::inventory::Inventory =
        serde_json::from_str(&inventory_json).map_err(to_napi_error)?;
    let rollups = appraisal_core::inventory::compute_rollups(&inventory);
    serde_json::to_string(&rollups).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Cost approach
// ---------------------------------------------------------------------------

#[napi]
pub fn cost_approach(input_json: String) -> NapiResult<String> {
    let input: appraisal_core::cost::CostApproachInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = appraisal_core::cost::compute_cost_approach(&input);
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn suggested_physical_depreciation(
    effective_age_json: String,
    construction_class_json: String,
) -> NapiResult<String> {
    let effective_age: rust_decimal::Decimal =
        serde_json::from_str(&effective_age_json).map_err(to_napi_error)?;
    let class: appraisal_core::cost::ConstructionClass =
        serde_json::from_str(&construction_class_json).map_err(to_napi_error)?;
    let suggestion = appraisal_core::cost::suggested_physical_depreciation(effective_age, class);
    serde_json::to_string(&suggestion).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Land valuation
// ---------------------------------------------------------------------------

#[napi]
pub fn value_land(input_json: String) -> NapiResult<String> {
    let input: appraisal_core::land::LandValuationInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = appraisal_core::land::value_land(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Scenario conclusion
// ---------------------------------------------------------------------------

#[napi]
pub fn appraise_scenario(input_json: String) -> NapiResult<String> {
    let input: appraisal_core::conclusion::ScenarioAppraisalInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = appraisal_core::conclusion::appraise_scenario(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

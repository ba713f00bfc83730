use serde_json::Value;

/// Print just the key answer value from the output.
///
/// Heuristic: look for well-known result fields in order of priority, then
/// fall back to the first scalar field in the result object.
pub fn print_minimal(value: &Value) {
    let result_obj = super::result_of(value);

    // Priority list of key output fields
    let priority_keys = [
        "finalValue",
        "exactTotal",
        "reportedValue",
        "rawIndicatedValue",
        "depreciatedTotal",
        "replacementCostNewTotal",
        "sfTotal",
    ];

    if let Value::Object(map) = result_obj {
        for key in &priority_keys {
            if let Some(found) = find_deep(result_obj, key) {
                if !found.is_null() {
                    println!("{}", scalar(found));
                    return;
                }
            }
        }

        // Fall back to the first non-null scalar field.
        for val in map.values() {
            if !val.is_null() && !val.is_object() && !val.is_array() {
                println!("{}", scalar(val));
                return;
            }
        }
    }

    println!("{}", scalar(result_obj));
}

/// Depth-first search for a key, so conclusion fields nested under the
/// scenario result are still found.
fn find_deep<'a>(value: &'a Value, key: &str) -> Option<&'a Value> {
    let map = value.as_object()?;
    if let Some(found) = map.get(key) {
        return Some(found);
    }
    map.values().find_map(|v| find_deep(v, key))
}

fn scalar(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        other => serde_json::to_string(other).unwrap_or_default(),
    }
}

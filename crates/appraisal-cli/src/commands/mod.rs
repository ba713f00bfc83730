pub mod appraise;
pub mod cost;
pub mod inventory;
pub mod land;

use chrono::Datelike;
use serde_json::Value;

/// Fill in `asOfYear` on an input document when the caller didn't supply it:
/// the engine itself never reads the clock, so the CLI owns the default.
pub fn ensure_as_of_year(value: &mut Value, flag: Option<i32>) {
    let Some(map) = value.as_object_mut() else {
        return;
    };
    if let Some(year) = flag {
        map.insert("asOfYear".into(), Value::from(year));
    } else if !map.contains_key("asOfYear") {
        map.insert("asOfYear".into(), Value::from(chrono::Utc::now().year()));
    }
}

use serde_json::Value;
use std::io;

/// Format output as CSV on stdout.
///
/// The primary array inside the result (line items, comp lines) becomes the
/// rows; a plain object falls back to field,value pairs.
pub fn print_csv(value: &Value) {
    let result = super::result_of(value);

    let mut writer = csv::Writer::from_writer(io::stdout());

    // Prefer the first array-of-objects field as the row source.
    let rows = result.as_object().and_then(|map| {
        map.values().find_map(|v| match v {
            Value::Array(items) if items.iter().all(Value::is_object) && !items.is_empty() => {
                Some(items)
            }
            _ => None,
        })
    });

    let outcome = match rows {
        Some(items) => write_rows(&mut writer, items),
        None => write_pairs(&mut writer, result),
    };

    if outcome.and_then(|_| writer.flush().map_err(Into::into)).is_err() {
        eprintln!("failed to write CSV output");
    }
}

fn write_rows(
    writer: &mut csv::Writer<io::Stdout>,
    items: &[Value],
) -> Result<(), Box<dyn std::error::Error>> {
    let Some(Value::Object(first)) = items.first() else {
        return Ok(());
    };
    let headers: Vec<String> = flatten_keys(first);
    writer.write_record(&headers)?;

    for item in items {
        if let Value::Object(map) = item {
            let record: Vec<String> = headers
                .iter()
                .map(|h| lookup_flat(map, h).map(scalar).unwrap_or_default())
                .collect();
            writer.write_record(&record)?;
        }
    }
    Ok(())
}

fn write_pairs(
    writer: &mut csv::Writer<io::Stdout>,
    value: &Value,
) -> Result<(), Box<dyn std::error::Error>> {
    writer.write_record(["field", "value"])?;
    if let Value::Object(map) = value {
        for (key, val) in map {
            writer.write_record([key.as_str(), &scalar(val)])?;
        }
    }
    Ok(())
}

/// One level of flattening so nested records (improvement + lineItem) become
/// dotted columns.
fn flatten_keys(map: &serde_json::Map<String, Value>) -> Vec<String> {
    let mut keys = Vec::new();
    for (key, val) in map {
        match val {
            Value::Object(inner) => {
                for inner_key in inner.keys() {
                    keys.push(format!("{key}.{inner_key}"));
                }
            }
            _ => keys.push(key.clone()),
        }
    }
    keys
}

fn lookup_flat<'a>(map: &'a serde_json::Map<String, Value>, key: &str) -> Option<&'a Value> {
    match key.split_once('.') {
        Some((outer, inner)) => map.get(outer)?.get(inner),
        None => map.get(key),
    }
}

fn scalar(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => String::new(),
        other => serde_json::to_string(other).unwrap_or_default(),
    }
}

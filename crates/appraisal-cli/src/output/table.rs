use serde_json::Value;
use tabled::{builder::Builder, Table};

/// Format output as key/value tables using the tabled crate. Nested arrays
/// of objects (line items, comp lines, issues) render as their own tables.
pub fn print_table(value: &Value) {
    let envelope = value.as_object();
    let result = super::result_of(value);

    print_section(result, None);

    if let Some(Value::Array(warnings)) = envelope.and_then(|m| m.get("warnings")) {
        if !warnings.is_empty() {
            println!("\nWarnings:");
            for w in warnings {
                if let Value::String(s) = w {
                    println!("  - {s}");
                }
            }
        }
    }

    if let Some(Value::String(methodology)) = envelope.and_then(|m| m.get("methodology")) {
        println!("\nMethodology: {methodology}");
    }
}

fn print_section(value: &Value, title: Option<&str>) {
    match value {
        Value::Object(map) => {
            let mut builder = Builder::default();
            builder.push_record(["Field", "Value"]);
            let mut scalar_rows = 0usize;
            let mut nested: Vec<(&str, &Value)> = Vec::new();

            for (key, val) in map {
                match val {
                    Value::Array(items)
                        if items.iter().all(Value::is_object) && !items.is_empty() =>
                    {
                        nested.push((key, val));
                    }
                    Value::Object(_) => nested.push((key, val)),
                    _ => {
                        builder.push_record([key.as_str(), &scalar(val)]);
                        scalar_rows += 1;
                    }
                }
            }

            if let Some(title) = title {
                println!("\n{title}:");
            }
            if scalar_rows > 0 {
                println!("{}", Table::from(builder));
            }
            for (key, val) in nested {
                print_section(val, Some(key));
            }
        }
        Value::Array(items) => {
            if let Some(title) = title {
                println!("\n{title}:");
            }
            print_rows(items);
        }
        other => println!("{other}"),
    }
}

fn print_rows(items: &[Value]) {
    let Some(Value::Object(first)) = items.first() else {
        for item in items {
            println!("{}", scalar(item));
        }
        return;
    };

    let headers: Vec<String> = first.keys().cloned().collect();
    let mut builder = Builder::default();
    builder.push_record(&headers);
    for item in items {
        if let Value::Object(map) = item {
            let row: Vec<String> = headers
                .iter()
                .map(|h| map.get(h.as_str()).map(scalar).unwrap_or_default())
                .collect();
            builder.push_record(row);
        }
    }
    println!("{}", Table::from(builder));
}

fn scalar(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => "null".to_string(),
        Value::Array(arr) => arr.iter().map(scalar).collect::<Vec<_>>().join(", "),
        Value::Object(_) => serde_json::to_string(value).unwrap_or_default(),
    }
}

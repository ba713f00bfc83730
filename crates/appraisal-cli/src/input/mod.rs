//! Input loading shared by every command: a `--input` file (JSON or YAML by
//! extension) or JSON piped on stdin.

use serde::de::DeserializeOwned;
use serde_json::Value;
use std::fs;
use std::io::{self, Read};
use std::path::Path;

pub type InputResult<T> = Result<T, Box<dyn std::error::Error>>;

/// Load a typed input from the given path, or from piped stdin when no path
/// was supplied.
pub fn load<T: DeserializeOwned>(path: Option<&str>, usage: &str) -> InputResult<T> {
    let value = load_value(path, usage)?;
    Ok(serde_json::from_value(value)?)
}

/// Load a raw JSON value from the given path or piped stdin.
pub fn load_value(path: Option<&str>, usage: &str) -> InputResult<Value> {
    match path {
        Some(path) => read_file(path),
        None => read_stdin()?.ok_or_else(|| format!("--input <file> or stdin required {usage}").into()),
    }
}

fn read_file(path: &str) -> InputResult<Value> {
    let p = Path::new(path);
    if !p.is_file() {
        return Err(format!("File not found: {path}").into());
    }
    let contents =
        fs::read_to_string(p).map_err(|e| format!("Failed to read '{path}': {e}"))?;

    let is_yaml = p
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("yaml") || e.eq_ignore_ascii_case("yml"));

    if is_yaml {
        serde_yaml::from_str(&contents).map_err(|e| format!("Failed to parse '{path}': {e}").into())
    } else {
        serde_json::from_str(&contents).map_err(|e| format!("Failed to parse '{path}': {e}").into())
    }
}

/// Read JSON from stdin when data is being piped; `None` on an interactive
/// terminal.
fn read_stdin() -> InputResult<Option<Value>> {
    if atty::is(atty::Stream::Stdin) {
        return Ok(None);
    }

    let mut buffer = String::new();
    io::stdin().read_to_string(&mut buffer)?;

    let trimmed = buffer.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }

    Ok(Some(serde_json::from_str(trimmed)?))
}

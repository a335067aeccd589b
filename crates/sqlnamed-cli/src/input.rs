//! Reading queries and parameter values from the command line.

use std::io::Read;
use std::path::Path;

use anyhow::{Context, bail};
use serde_json::{Map, Value};

use sqlnamed_core::scanner::{PARAMETER_MARKER, is_parameter_char};
use sqlnamed_core::SqlValue;

/// Returns the SQL from the argument, the file, or stdin, in that order.
pub fn read_sql(sql: Option<String>, file: Option<&Path>) -> anyhow::Result<String> {
    if let Some(sql) = sql {
        return Ok(sql);
    }
    if let Some(path) = file {
        return std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()));
    }

    let mut sql = String::new();
    std::io::stdin()
        .read_to_string(&mut sql)
        .context("Failed to read SQL from stdin")?;
    Ok(sql)
}

/// Parses a `NAME=VALUE` assignment.
///
/// A leading `:` on the name is dropped. VALUE is read as JSON when it
/// parses (`42`, `true`, `null`, `"quoted"`), otherwise it is taken as text.
pub fn parse_assignment(assignment: &str) -> anyhow::Result<(String, SqlValue)> {
    let Some((name, raw)) = assignment.split_once('=') else {
        bail!("Expected NAME=VALUE, got '{assignment}'");
    };

    let name = name.trim();
    let name = name.strip_prefix(PARAMETER_MARKER).unwrap_or(name);
    if name.is_empty() || !name.chars().all(is_parameter_char) {
        bail!("Invalid parameter name '{name}'");
    }

    let value = serde_json::from_str::<Value>(raw)
        .map_or_else(|_| SqlValue::Text(raw.to_string()), SqlValue::from);
    Ok((name.to_string(), value))
}

/// Parses a JSON object of parameter values.
pub fn parse_params_json(json: &str) -> anyhow::Result<Map<String, Value>> {
    match serde_json::from_str::<Value>(json).context("Invalid --params-json")? {
        Value::Object(map) => Ok(map),
        _ => bail!("--params-json must be a JSON object"),
    }
}

use std::{borrow::Cow, sync::Arc};

use anyhow::{Result, anyhow};
use rmcp::model::{Content, Tool};
use serde_json::Value;
use site_model::CoordinatePair;

pub(crate) fn text(text: impl Into<String>) -> Content {
    Content::text(text.into())
}

/// A tool descriptor with a JSON-schema object for its arguments.
pub(crate) fn tool(name: &'static str, description: &'static str, input_schema: Value) -> Tool {
    let input_schema = match input_schema {
        Value::Object(map) => Arc::new(map),
        _ => Arc::new(serde_json::Map::new()),
    };

    Tool {
        name: Cow::Borrowed(name),
        title: None,
        description: Some(Cow::Borrowed(description)),
        input_schema,
        output_schema: None,
        annotations: None,
        execution: None,
        icons: None,
        meta: None,
    }
}

/// A string argument, ignoring blanks.
pub(crate) fn optional_str<'a>(args: &'a Value, key: &str) -> Option<&'a str> {
    args.get(key)
        .and_then(|v| v.as_str())
        .map(str::trim)
        .filter(|v| !v.is_empty())
}

pub(crate) fn optional_f64(args: &Value, key: &str) -> Result<Option<f64>> {
    match args.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(value) => value
            .as_f64()
            .map(Some)
            .ok_or_else(|| anyhow!("Invalid {} parameter: expected a number", key)),
    }
}

/// `lat`/`lon` from the arguments; both or neither.
pub(crate) fn explicit_location(args: &Value) -> Result<Option<CoordinatePair>> {
    let lat = optional_f64(args, "lat")?;
    let lon = optional_f64(args, "lon")?;

    match (lat, lon) {
        (Some(lat), Some(lon)) => {
            let location = CoordinatePair::new(lat, lon);
            if !location.is_valid() {
                return Err(anyhow!("Coordinates out of range: {}", location));
            }
            Ok(Some(location))
        }
        (None, None) => Ok(None),
        _ => Err(anyhow!("Both lat and lon must be provided together")),
    }
}

pub(crate) fn score(value: Option<f64>) -> String {
    value
        .map(|v| format!("{:.1}", v))
        .unwrap_or_else(|| "n/a".to_string())
}

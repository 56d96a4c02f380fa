//! Scalar value resolution for trend-data nodes.

use serde_json::Value;
use vitals_model::VitalValue;

use crate::document::lookup_keys;

/// `DataState` values that mark a reading as unusable.
const SUPPRESSED_STATES: [&str; 2] = ["unmonitored", "invalid"];

/// Resolve the reading held by a trend-data node.
///
/// Suppression is checked before the value is read: a node whose
/// `DataState` is `unmonitored`/`invalid`, or whose `DataStatus` is the
/// number 1, yields `None` even when `Val.#text` is present.
pub fn resolve_vital(node: Option<&Value>) -> Option<VitalValue> {
    let node = node?;
    if let Some(state) = node.get("DataState").and_then(Value::as_str)
        && SUPPRESSED_STATES.contains(&state)
    {
        return None;
    }
    if node.get("DataStatus").and_then(Value::as_f64) == Some(1.0) {
        return None;
    }
    scalar(lookup_keys(node, &["Val", "#text"])?)
}

fn scalar(value: &Value) -> Option<VitalValue> {
    match value {
        Value::Number(number) => number.as_f64().map(VitalValue::Number),
        Value::String(text) => Some(VitalValue::Text(text.clone())),
        Value::Bool(flag) => Some(VitalValue::Text(flag.to_string())),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

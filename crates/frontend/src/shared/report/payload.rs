//! Schema-on-read access to report payloads.
//!
//! Every report endpoint returns its own ad-hoc JSON shape. The payload is
//! wrapped once at the fetch boundary and all reads go through `lookup`,
//! so missing or `null` fields surface as `None` instead of panics.

use serde_json::Value;

const ENVELOPE_KEY: &str = "data";
const MAX_ENVELOPE_DEPTH: usize = 2;

/// Immutable JSON result of one report fetch
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ReportPayload(Value);

impl ReportPayload {
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    /// Builds the payload from a raw response body (`{data: ...}` envelopes removed)
    pub fn from_response(body: Value) -> Self {
        Self(unwrap_envelope(body))
    }

    pub fn root(&self) -> &Value {
        &self.0
    }

    pub fn get(&self, path: &str) -> Option<&Value> {
        lookup(&self.0, path)
    }

    /// Array at `path`, empty when absent or not an array
    pub fn records(&self, path: &str) -> &[Value] {
        self.get(path)
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}

/// Reads a dotted path (`summary.totalAds`, `items.0.name`).
///
/// Numeric segments index arrays. An empty path returns the value itself.
/// `null` is treated as absent.
pub fn lookup<'a>(value: &'a Value, path: &str) -> Option<&'a Value> {
    let mut current = value;
    for segment in path.split('.').filter(|s| !s.is_empty()) {
        current = match current {
            Value::Object(map) => map.get(segment)?,
            Value::Array(items) => items.get(segment.parse::<usize>().ok()?)?,
            _ => return None,
        };
    }
    if current.is_null() {
        None
    } else {
        Some(current)
    }
}

/// Strips up to two levels of `{ "data": ... }` wrapping.
pub fn unwrap_envelope(body: Value) -> Value {
    let mut current = body;
    for _ in 0..MAX_ENVELOPE_DEPTH {
        let wrapped = matches!(
            &current,
            Value::Object(map) if map.get(ENVELOPE_KEY).is_some_and(|v| !v.is_null())
        );
        if !wrapped {
            break;
        }
        current = match current {
            Value::Object(mut map) => map.remove(ENVELOPE_KEY).unwrap_or_default(),
            other => other,
        };
    }
    current
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_lookup_nested_paths() {
        let value = json!({
            "summary": { "totalAds": 120, "empty": null },
            "items": [{ "name": "first" }, { "name": "second" }]
        });
        assert_eq!(lookup(&value, "summary.totalAds"), Some(&json!(120)));
        assert_eq!(lookup(&value, "items.1.name"), Some(&json!("second")));
        assert_eq!(lookup(&value, "summary.empty"), None);
        assert_eq!(lookup(&value, "summary.missing"), None);
        assert_eq!(lookup(&value, "items.9.name"), None);
        assert_eq!(lookup(&value, "summary.totalAds.deeper"), None);
        assert_eq!(lookup(&value, ""), Some(&value));
    }

    #[test]
    fn test_unwrap_single_and_double_envelopes() {
        let payload = json!({ "summary": { "totalAds": 1 } });
        assert_eq!(unwrap_envelope(json!({ "data": payload.clone() })), payload);
        assert_eq!(
            unwrap_envelope(json!({ "data": { "data": payload.clone() } })),
            payload
        );
        assert_eq!(unwrap_envelope(payload.clone()), payload);
        assert_eq!(
            unwrap_envelope(json!({ "data": null, "x": 1 })),
            json!({ "data": null, "x": 1 })
        );
    }

    #[test]
    fn test_records_defaults_to_empty() {
        let payload = ReportPayload::new(json!({ "list": [1, 2], "scalar": 3 }));
        assert_eq!(payload.records("list").len(), 2);
        assert!(payload.records("scalar").is_empty());
        assert!(payload.records("missing").is_empty());
    }
}

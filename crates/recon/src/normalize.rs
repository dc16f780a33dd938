//! Stateless value canonicalization.
//!
//! Every function here is pure: it takes a raw `serde_json::Value` as held
//! by either side and produces a form comparable across representations
//! (casing, URL scheme, JSON-encoded strings, float precision, ordering).

use serde_json::Value;

/// Decode a string holding syntactically valid JSON; any other input, and
/// any string that does not parse, comes back unchanged. Malformed JSON is
/// not an error.
pub fn decode_if_json(v: &Value) -> Value {
    match v {
        Value::String(s) => serde_json::from_str(s).unwrap_or_else(|_| v.clone()),
        _ => v.clone(),
    }
}

/// Lower-case, strip one leading `http://`/`https://` scheme, strip one
/// leading `www.` label, strip trailing slashes. Absent or non-string
/// input normalizes to the empty string.
pub fn normalize_url(v: &Value) -> String {
    let Some(raw) = v.as_str() else {
        return String::new();
    };
    let lowered = raw.to_lowercase();
    let rest = lowered
        .strip_prefix("https://")
        .or_else(|| lowered.strip_prefix("http://"))
        .unwrap_or(&lowered);
    let rest = rest.strip_prefix("www.").unwrap_or(rest);
    rest.trim_end_matches('/').to_string()
}

/// Trim surrounding whitespace and lower-case, only when the input is
/// textual; anything else passes through unchanged.
pub fn normalize_text(v: &Value) -> Value {
    match v {
        Value::String(s) => Value::String(s.trim().to_lowercase()),
        _ => v.clone(),
    }
}

/// Retain only decimal digit characters, discarding separators like
/// spaces, dashes, parentheses, and `+`. Absent input normalizes to the
/// empty string.
pub fn normalize_phone(v: &Value) -> String {
    match v.as_str() {
        Some(s) => s.chars().filter(|c| c.is_ascii_digit()).collect(),
        None => String::new(),
    }
}

/// Latitude/longitude rounded to 5 decimal places, scaled to integers so
/// the comparison is exact. Missing components default to 0; absent or
/// non-mapping input has no components at all.
pub fn normalize_geo(v: &Value) -> Option<(i64, i64)> {
    let obj = v.as_object()?;
    let component = |key: &str| -> i64 {
        let raw = obj.get(key).and_then(Value::as_f64).unwrap_or(0.0);
        (raw * 100_000.0).round() as i64
    };
    Some((component("latitude"), component("longitude")))
}

/// Value-sorted copy of an array; anything else passes through unchanged.
/// Elements order by their canonical rendering, so heterogeneous arrays
/// still sort deterministically.
pub fn sort_if_array(v: &Value) -> Value {
    match v {
        Value::Array(items) => {
            let mut sorted = items.clone();
            sorted.sort_by_cached_key(canonical_json);
            Value::Array(sorted)
        }
        _ => v.clone(),
    }
}

/// Deterministic serialization: object keys recursively sorted, no
/// whitespace. Two structurally equal values always render identically.
pub fn canonical_json(v: &Value) -> String {
    fn render(v: &Value, out: &mut String) {
        match v {
            Value::Object(map) => {
                let mut keys: Vec<&String> = map.keys().collect();
                keys.sort();
                out.push('{');
                for (i, key) in keys.iter().enumerate() {
                    if i > 0 {
                        out.push(',');
                    }
                    out.push_str(&Value::String((*key).clone()).to_string());
                    out.push(':');
                    render(&map[key.as_str()], out);
                }
                out.push('}');
            }
            Value::Array(items) => {
                out.push('[');
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        out.push(',');
                    }
                    render(item, out);
                }
                out.push(']');
            }
            _ => out.push_str(&v.to_string()),
        }
    }

    let mut out = String::new();
    render(v, &mut out);
    out
}

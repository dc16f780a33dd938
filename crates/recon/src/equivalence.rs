//! Per-field-kind comparison rules.
//!
//! Each compared field name is pre-assigned a [`FieldKind`]; the kind
//! selects the normalization applied to both sides before comparison.
//! Adding a field is one entry in [`COMPARED_FIELDS`] — no branching
//! cascade anywhere else.

use serde_json::Value;

use crate::normalize::{
    canonical_json, decode_if_json, normalize_geo, normalize_phone, normalize_text, normalize_url,
    sort_if_array,
};

/// Semantic comparison strategy for one field name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Element order is irrelevant; both sides decoded and value-sorted.
    UnorderedList,
    /// Compared by truthiness coercion.
    Boolean,
    /// Latitude/longitude pair, equal to 5 decimal places.
    GeoPoint,
    /// Digits-only comparison.
    Phone,
    /// Scheme, `www.`, trailing slash, and case are irrelevant.
    Url,
    /// Mapping keyed by language code; only the `en` entry is authoritative.
    LocalizedText,
    /// Compared by canonical (sorted-key) serialization.
    JsonExact,
    /// Case- and whitespace-insensitive string.
    CaseInsensitiveId,
    /// Like `CaseInsensitiveId`, but absent counts as the empty string.
    OptionalCaseInsensitive,
    /// Floating value rounded to 2 decimal places.
    RoundedDecimal,
    /// Decoded and compared for deep equality, no further normalization.
    OpaqueStructured,
    /// Strict raw equality.
    Exact,
}

/// Every field subject to comparison, in comparison order.
pub const COMPARED_FIELDS: &[(&str, FieldKind)] = &[
    ("address", FieldKind::CaseInsensitiveId),
    ("budgetTagValues", FieldKind::UnorderedList),
    ("cityRef", FieldKind::CaseInsensitiveId),
    ("countryRef", FieldKind::CaseInsensitiveId),
    ("filterValues", FieldKind::UnorderedList),
    ("isPaid", FieldKind::Boolean),
    ("isPromoted", FieldKind::Boolean),
    ("isVisible", FieldKind::Boolean),
    ("name", FieldKind::LocalizedText),
    ("phone", FieldKind::Phone),
    ("placeTypes", FieldKind::UnorderedList),
    ("websiteURL", FieldKind::Url),
    ("workingHours", FieldKind::LocalizedText),
    ("facebookURL", FieldKind::Url),
    ("instagramURL", FieldKind::Url),
    ("menuURL", FieldKind::Url),
    ("coordinates", FieldKind::GeoPoint),
    ("promo", FieldKind::OptionalCaseInsensitive),
    ("promocode", FieldKind::OptionalCaseInsensitive),
    ("description", FieldKind::LocalizedText),
    ("ratingAggregators", FieldKind::JsonExact),
    ("google_place_id", FieldKind::CaseInsensitiveId),
    ("bonuses", FieldKind::OpaqueStructured),
    ("earnBonuses", FieldKind::RoundedDecimal),
];

/// Decide whether a locally held value and a remotely held value represent
/// the same fact under the given kind's rule. Absent values arrive as
/// `Value::Null`.
pub fn equivalent(local: &Value, remote: &Value, kind: FieldKind) -> bool {
    match kind {
        FieldKind::UnorderedList => {
            sort_if_array(&decode_if_json(local)) == sort_if_array(&decode_if_json(remote))
        }
        FieldKind::Boolean => truthy(local) == truthy(remote),
        FieldKind::GeoPoint => normalize_geo(local) == normalize_geo(&decode_if_json(remote)),
        FieldKind::Phone => normalize_phone(local) == normalize_phone(remote),
        FieldKind::Url => normalize_url(local) == normalize_url(remote),
        FieldKind::LocalizedText => {
            english_entry(local) == english_entry(&decode_if_json(remote))
        }
        FieldKind::JsonExact => canonical_json(local) == canonical_json(&decode_if_json(remote)),
        FieldKind::CaseInsensitiveId => normalize_text(local) == normalize_text(remote),
        FieldKind::OptionalCaseInsensitive => {
            normalize_text(&null_as_empty(local)) == normalize_text(&null_as_empty(remote))
        }
        FieldKind::RoundedDecimal => match (coerce_f64(local), coerce_f64(remote)) {
            (Some(a), Some(b)) => (a * 100.0).round() == (b * 100.0).round(),
            (None, None) => true,
            _ => false,
        },
        FieldKind::OpaqueStructured => *local == decode_if_json(remote),
        FieldKind::Exact => local == remote,
    }
}

/// JSON value truthiness: null, false, 0, empty string, empty array, and
/// empty object are false; everything else is true.
pub fn truthy(v: &Value) -> bool {
    match v {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}

/// The normalized `en` entry of a localized mapping. Non-mapping input or
/// a missing entry yields null, which only matches null.
fn english_entry(v: &Value) -> Value {
    let entry = v
        .as_object()
        .and_then(|o| o.get("en"))
        .cloned()
        .unwrap_or(Value::Null);
    normalize_text(&entry)
}

fn null_as_empty(v: &Value) -> Value {
    if v.is_null() {
        Value::String(String::new())
    } else {
        v.clone()
    }
}

fn coerce_f64(v: &Value) -> Option<f64> {
    match v {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

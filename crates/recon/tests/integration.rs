//! End-to-end reconciliation runs against an in-memory record store.

use std::collections::HashMap;

use chrono::NaiveDate;
use serde_json::{json, Map, Value};

use placeaudit_recon::engine::{run, RecordStore};
use placeaudit_recon::error::LookupError;
use placeaudit_recon::model::{LocalRecord, NotFoundReason};

struct InMemoryStore {
    records: HashMap<String, Value>,
    failing: Vec<String>,
}

impl InMemoryStore {
    fn new() -> Self {
        Self {
            records: HashMap::new(),
            failing: Vec::new(),
        }
    }

    fn with(mut self, document_id: &str, payload: Value) -> Self {
        self.records.insert(document_id.to_string(), payload);
        self
    }

    fn failing_on(mut self, document_id: &str) -> Self {
        self.failing.push(document_id.to_string());
        self
    }
}

impl RecordStore for InMemoryStore {
    fn fetch(&self, document_id: &str) -> Result<Option<Map<String, Value>>, LookupError> {
        if self.failing.iter().any(|id| id == document_id) {
            return Err(LookupError::Http(404, "not found".into()));
        }
        match self.records.get(document_id) {
            Some(Value::Object(map)) if !map.is_empty() => Ok(Some(map.clone())),
            _ => Ok(None),
        }
    }
}

fn record(v: Value) -> LocalRecord {
    serde_json::from_value(v).unwrap()
}

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 1, 15).unwrap()
}

#[test]
fn matching_record_yields_matched_entry_with_run_date() {
    let store = InMemoryStore::new().with("d1", json!({"phone": "5550100"}));
    let batch = vec![record(json!({
        "document_id": "d1",
        "key": "k1",
        "phone": "555-0100",
    }))];

    let result = run(&store, &batch, today());
    let summary = result.summary();
    assert_eq!(summary.matched, 1);
    assert_eq!(summary.mismatched, 0);
    assert_eq!(summary.not_found, 0);

    let entry = &result.report.matched[0];
    assert_eq!(entry.key, "k1");
    assert_eq!(entry.date, "2026-01-15");

    // A matched entry carries no field map at all
    let wire = serde_json::to_value(entry).unwrap();
    assert_eq!(wire.as_object().unwrap().len(), 2);
}

#[test]
fn divergent_record_yields_mismatched_entry_with_canonical_values() {
    let store = InMemoryStore::new().with(
        "d1",
        json!({
            "name": "{\"en\": \"Harbor Cafe\"}",
            "phone": "5550100",
        }),
    );
    let batch = vec![record(json!({
        "document_id": "d1",
        "key": "k1",
        "name": {"en": "Old Cafe"},
        "phone": "555-0100",
    }))];

    let result = run(&store, &batch, today());
    assert_eq!(result.summary().mismatched, 1);

    let entry = &result.report.mismatched[0];
    assert_eq!(entry.key, "k1");
    assert_eq!(entry.date, "2026-01-15");
    // The surfaced value is decoded, not further normalized
    assert_eq!(entry.divergent["name"], json!({"en": "Harbor Cafe"}));
    assert!(!entry.divergent.contains_key("phone"));
}

#[test]
fn record_missing_identity_appears_in_no_bucket() {
    let store = InMemoryStore::new().with("d1", json!({"phone": "1"}));
    let batch = vec![
        record(json!({"key": "k1", "phone": "1"})),
        record(json!({"document_id": "d1", "phone": "1"})),
        record(json!({"document_id": "", "key": "k3"})),
    ];

    let result = run(&store, &batch, today());
    let summary = result.summary();
    assert_eq!(summary.skipped, 3);
    assert_eq!(summary.matched + summary.mismatched + summary.not_found, 0);
}

#[test]
fn lookup_failure_and_absence_get_distinct_reasons() {
    let store = InMemoryStore::new()
        .with("d-empty", json!({}))
        .failing_on("d-bad");
    let batch = vec![
        record(json!({"document_id": "d-bad", "key": "k1"})),
        record(json!({"document_id": "d-empty", "key": "k2"})),
        record(json!({"document_id": "d-unknown", "key": "k3"})),
    ];

    let result = run(&store, &batch, today());
    let not_found = &result.report.not_found;
    assert_eq!(not_found.len(), 3);
    assert_eq!(not_found[0].reason, NotFoundReason::LookupFailed);
    assert_eq!(not_found[0].document_id, "d-bad");
    assert_eq!(not_found[1].reason, NotFoundReason::Absent);
    assert_eq!(not_found[2].reason, NotFoundReason::Absent);
}

#[test]
fn batch_continues_past_failures_and_preserves_input_order() {
    let store = InMemoryStore::new()
        .with("d1", json!({"phone": "1"}))
        .with("d3", json!({"phone": "3"}))
        .with("d4", json!({"phone": "9"}))
        .failing_on("d2");
    let batch = vec![
        record(json!({"document_id": "d1", "key": "k1", "phone": "1"})),
        record(json!({"document_id": "d2", "key": "k2"})),
        record(json!({"document_id": "d3", "key": "k3", "phone": "3"})),
        record(json!({"document_id": "d4", "key": "k4", "phone": "4"})),
    ];

    let result = run(&store, &batch, today());
    let keys: Vec<&str> = result.report.matched.iter().map(|e| e.key.as_str()).collect();
    assert_eq!(keys, vec!["k1", "k3"]);
    assert_eq!(result.report.mismatched[0].key, "k4");
    assert_eq!(result.report.not_found[0].key, "k2");
}

#[test]
fn report_wire_shape_matches_consumer_contract() {
    let store = InMemoryStore::new()
        .with("d1", json!({"phone": "5550100"}))
        .with("d2", json!({"isPaid": true}))
        .failing_on("d3");
    let batch = vec![
        record(json!({"document_id": "d1", "key": "k1", "phone": "5550100"})),
        record(json!({"document_id": "d2", "key": "k2", "isPaid": false})),
        record(json!({"document_id": "d3", "key": "k3"})),
    ];

    let result = run(&store, &batch, today());
    let wire = serde_json::to_value(&result.report).unwrap();

    assert_eq!(wire["matched"], json!([{"key": "k1", "date": "2026-01-15"}]));
    assert_eq!(
        wire["mismatched"],
        json!([{"key": "k2", "date": "2026-01-15", "isPaid": true}])
    );
    assert_eq!(
        wire["not_found"],
        json!([{"key": "k3", "document_id": "d3", "reason": "lookup_failed"}])
    );
}

#[test]
fn full_field_set_round() {
    // One record exercising several kinds at once, all equivalent
    let store = InMemoryStore::new().with(
        "d1",
        json!({
            "address": "MAIN STREET 1",
            "placeTypes": "[\"bar\", \"cafe\"]",
            "isVisible": 1,
            "coordinates": "{\"latitude\": 50.450010, \"longitude\": 30.523400}",
            "websiteURL": "https://www.example.com/",
            "workingHours": "{\"en\": \"9-17\", \"uk\": \"9-17\"}",
            "ratingAggregators": "{\"google\": 4.5, \"tripadvisor\": 4.0}",
            "earnBonuses": "10.341",
            "bonuses": "{\"tiers\": [1, 2]}",
        }),
    );
    let batch = vec![record(json!({
        "document_id": "d1",
        "key": "k1",
        "address": "main street 1",
        "placeTypes": ["cafe", "bar"],
        "isVisible": true,
        "coordinates": {"latitude": 50.4500104, "longitude": 30.5234},
        "websiteURL": "example.com",
        "workingHours": {"en": "9-17", "de": "x"},
        "ratingAggregators": {"tripadvisor": 4.0, "google": 4.5},
        "earnBonuses": 10.344,
        "bonuses": {"tiers": [1, 2]},
    }))];

    let result = run(&store, &batch, today());
    assert_eq!(
        result.report.mismatched.first().map(|e| e.divergent.clone()),
        None
    );
    assert_eq!(result.summary().matched, 1);
}

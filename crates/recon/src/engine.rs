use chrono::NaiveDate;
use serde_json::{Map, Value};

use crate::equivalence::{equivalent, COMPARED_FIELDS};
use crate::error::{DeliveryError, LookupError};
use crate::model::{
    LocalRecord, MatchedEntry, MismatchedEntry, NotFoundEntry, NotFoundReason, ReconResult, Report,
};
use crate::normalize::decode_if_json;

/// Remote-lookup collaborator. `Ok(None)` means no canonical record
/// exists; `Err` means the lookup itself failed.
pub trait RecordStore {
    fn fetch(&self, document_id: &str) -> Result<Option<Map<String, Value>>, LookupError>;
}

/// Delivery collaborator; receives the final report exactly once per run.
pub trait ReportSink {
    fn deliver(&self, report: &Report) -> Result<(), DeliveryError>;
}

/// Classify every record in the batch against the canonical store.
///
/// Strictly sequential: one lookup in flight at a time, each record
/// classified independently, and a failing record never aborts the batch.
/// Bucket contents preserve input order. `today` stamps every matched and
/// mismatched entry with the same `YYYY-MM-DD` run date.
pub fn run(store: &dyn RecordStore, batch: &[LocalRecord], today: NaiveDate) -> ReconResult {
    let date = today.format("%Y-%m-%d").to_string();
    let mut report = Report::default();
    let mut skipped = 0;

    for record in batch {
        let document_id = record.document_id.as_deref().filter(|s| !s.is_empty());
        let key = record.key.as_deref().filter(|s| !s.is_empty());
        let (Some(document_id), Some(key)) = (document_id, key) else {
            skipped += 1;
            continue;
        };

        let remote = match store.fetch(document_id) {
            Ok(Some(remote)) if !remote.is_empty() => remote,
            Ok(_) => {
                report.not_found.push(NotFoundEntry {
                    key: key.into(),
                    document_id: document_id.into(),
                    reason: NotFoundReason::Absent,
                });
                continue;
            }
            Err(_) => {
                report.not_found.push(NotFoundEntry {
                    key: key.into(),
                    document_id: document_id.into(),
                    reason: NotFoundReason::LookupFailed,
                });
                continue;
            }
        };

        let divergent = divergent_fields(&record.fields, &remote);
        if divergent.is_empty() {
            report.matched.push(MatchedEntry {
                key: key.into(),
                date: date.clone(),
            });
        } else {
            report.mismatched.push(MismatchedEntry {
                key: key.into(),
                date: date.clone(),
                divergent,
            });
        }
    }

    ReconResult { report, skipped }
}

/// Run the fixed field set through the equivalence rules. Each
/// non-equivalent field maps to the canonical value after decoding — the
/// value the caller should adopt.
pub fn divergent_fields(
    local: &Map<String, Value>,
    remote: &Map<String, Value>,
) -> Map<String, Value> {
    let mut divergent = Map::new();
    for (field, kind) in COMPARED_FIELDS {
        let local_value = local.get(*field).unwrap_or(&Value::Null);
        let remote_value = remote.get(*field).unwrap_or(&Value::Null);
        if !equivalent(local_value, remote_value, *kind) {
            divergent.insert((*field).to_string(), decode_if_json(remote_value));
        }
    }
    divergent
}

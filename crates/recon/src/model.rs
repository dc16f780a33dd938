use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

// ---------------------------------------------------------------------------
// Input
// ---------------------------------------------------------------------------

/// One place record as held by the caller.
///
/// `document_id` and `key` are pulled out of the mapping; every other field
/// stays in `fields` as its raw value (primitive, structured, or a string
/// holding JSON).
#[derive(Debug, Clone, Deserialize)]
pub struct LocalRecord {
    #[serde(default)]
    pub document_id: Option<String>,
    #[serde(default)]
    pub key: Option<String>,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

// ---------------------------------------------------------------------------
// Per-record classification
// ---------------------------------------------------------------------------

/// Why a record landed in the not-found bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NotFoundReason {
    /// The lookup itself returned a non-success response.
    LookupFailed,
    /// The store answered, but no canonical record exists.
    Absent,
}

impl std::fmt::Display for NotFoundReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::LookupFailed => write!(f, "lookup_failed"),
            Self::Absent => write!(f, "absent"),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct MatchedEntry {
    pub key: String,
    pub date: String,
}

/// Divergent fields are flattened into the entry alongside `key` and
/// `date` — the wire shape the downstream consumer expects. The map is
/// non-empty by construction: an empty map means the record matched.
#[derive(Debug, Clone, Serialize)]
pub struct MismatchedEntry {
    pub key: String,
    pub date: String,
    #[serde(flatten)]
    pub divergent: Map<String, Value>,
}

#[derive(Debug, Clone, Serialize)]
pub struct NotFoundEntry {
    pub key: String,
    pub document_id: String,
    pub reason: NotFoundReason,
}

// ---------------------------------------------------------------------------
// Report + summary
// ---------------------------------------------------------------------------

/// The aggregate handed to the delivery collaborator, one per run.
/// Each bucket preserves input batch order.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Report {
    pub matched: Vec<MatchedEntry>,
    pub mismatched: Vec<MismatchedEntry>,
    pub not_found: Vec<NotFoundEntry>,
}

/// Output of one reconciliation run. Skipped records never appear in the
/// report; they are only counted here.
#[derive(Debug, Clone)]
pub struct ReconResult {
    pub report: Report,
    pub skipped: usize,
}

impl ReconResult {
    /// Counts surfaced to the synchronous caller.
    pub fn summary(&self) -> RunSummary {
        let matched = self.report.matched.len();
        let mismatched = self.report.mismatched.len();
        let not_found = self.report.not_found.len();
        RunSummary {
            total: matched + mismatched + not_found + self.skipped,
            matched,
            mismatched,
            not_found,
            skipped: self.skipped,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    pub total: usize,
    pub matched: usize,
    pub mismatched: usize,
    pub not_found: usize,
    pub skipped: usize,
}

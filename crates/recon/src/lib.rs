//! `placeaudit-recon` — place-record reconciliation engine.
//!
//! Pure engine crate: receives a batch of local records, pulls canonical
//! records through the [`RecordStore`] seam, returns classified results.
//! No CLI or IO dependencies.

pub mod engine;
pub mod equivalence;
pub mod error;
pub mod model;
pub mod normalize;

pub use engine::{run, RecordStore, ReportSink};
pub use error::{DeliveryError, LookupError};
pub use model::{LocalRecord, ReconResult, Report, RunSummary};

//! HTTP collaborators for reconciliation runs.
//!
//! Blocking reqwest clients (no Tokio runtime required): the canonical
//! record store lookup and the webhook report sink. Both implement the
//! engine's collaborator traits.

mod client;
mod webhook;

pub use client::StoreClient;
pub use webhook::WebhookSink;

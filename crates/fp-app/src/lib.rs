//! fp-app: shared application service layer.
//!
//! This crate provides a unified interface for both the CLI and GUI
//! frontends: model-set loading with per-model failure isolation, combined
//! titles, boundary resource loading, dataset summaries, and the background
//! loader worker that keeps the UI responsive while discarding stale loads.

pub mod error;
pub mod loader_worker;
pub mod model_service;

// Re-export key types for convenience
pub use error::{AppError, AppResult};
pub use loader_worker::{LoaderMessage, LoaderWorker};
pub use model_service::{
    ERROR_LOADING_TITLE, ModelSet, ModelSummary, load_boundaries, load_model_set, resolve_keys,
    summarize,
};

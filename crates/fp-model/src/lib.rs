//! fp-model: model file format, normalization, and derived values.
//!
//! Provides:
//! - Raw model file schema and its normalization into canonical data
//! - Canonical node/edge/model types
//! - The fixed registry of known river-basin models
//! - File loading for model JSON and boundary GeoJSON resources
//! - Pure coordinate aggregation (map center, type filtering)

pub mod aggregate;
pub mod geojson;
pub mod loader;
pub mod node;
pub mod registry;
pub mod schema;

// Re-exports for ergonomics
pub use aggregate::{TypeFilter, center, filter_by_type};
pub use geojson::{Feature, FeatureCollection, Geometry, Position};
pub use loader::{load_boundary, load_model};
pub use node::{Coordinates, Edge, ModelData, Node, NodeType};
pub use registry::ModelKey;

pub type ModelResult<T> = Result<T, ModelError>;

#[derive(thiserror::Error, Debug)]
pub enum ModelError {
    #[error("Failed to read model resource: {path}")]
    FileRead {
        path: std::path::PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Unknown model name: {0}")]
    UnknownModel(String),
}

//! File loading for model and boundary resources.
//!
//! Resources live under a data directory with a fixed layout:
//! `models/<stem>.json` and `model-boundaries/<stem>.geojson`.

use std::fs;
use std::path::Path;

use crate::geojson::FeatureCollection;
use crate::node::ModelData;
use crate::registry::ModelKey;
use crate::schema::RawModelFile;
use crate::{ModelError, ModelResult};

/// Read, parse, and normalize one model's JSON file.
pub fn load_model(data_dir: &Path, key: ModelKey) -> ModelResult<ModelData> {
    let path = key.model_path(data_dir);
    let content = fs::read_to_string(&path).map_err(|source| ModelError::FileRead {
        path: path.clone(),
        source,
    })?;
    let raw: RawModelFile = serde_json::from_str(&content)?;
    Ok(raw.normalize(key))
}

/// Read and parse one model's boundary GeoJSON.
pub fn load_boundary(data_dir: &Path, key: ModelKey) -> ModelResult<FeatureCollection> {
    let path = key.boundary_path(data_dir);
    let content = fs::read_to_string(&path).map_err(|source| ModelError::FileRead {
        path: path.clone(),
        source,
    })?;
    Ok(serde_json::from_str(&content)?)
}

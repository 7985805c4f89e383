//! Fixed registry of the known river-basin models.
//!
//! Each selectable model maps to a model file under `models/`, a boundary
//! resource under `model-boundaries/`, and a boundary fill color.

use std::path::{Path, PathBuf};

use crate::ModelError;

/// Fill color for a boundary whose model has no assigned color.
pub const FALLBACK_BOUNDARY_COLOR: &str = "#088";

/// One of the selectable river-basin models.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ModelKey {
    Merced,
    Tuolumne,
    SanJoaquin,
    Stanislaus,
}

impl ModelKey {
    pub const ALL: [ModelKey; 4] = [
        ModelKey::Merced,
        ModelKey::Tuolumne,
        ModelKey::SanJoaquin,
        ModelKey::Stanislaus,
    ];

    /// Name shown in the UI and accepted on the command line.
    pub fn display_name(self) -> &'static str {
        match self {
            ModelKey::Merced => "Merced River",
            ModelKey::Tuolumne => "Tuolumne River",
            ModelKey::SanJoaquin => "San Joaquin River",
            ModelKey::Stanislaus => "Stanislaus River",
        }
    }

    /// File stem of the model JSON under `models/`.
    pub fn file_stem(self) -> &'static str {
        match self {
            ModelKey::Merced => "merced_pywr_model_updated",
            ModelKey::Tuolumne => "tuolumne_pywr_model_updated",
            ModelKey::SanJoaquin => "upper_san_joaquin_pywr_model_updated",
            ModelKey::Stanislaus => "stanislaus_pywr_model_updated",
        }
    }

    /// File stem of the boundary GeoJSON under `model-boundaries/`.
    pub fn boundary_stem(self) -> &'static str {
        match self {
            ModelKey::Merced => "Merced",
            ModelKey::Tuolumne => "Tuolumne",
            ModelKey::SanJoaquin => "SJN",
            ModelKey::Stanislaus => "Stanislaus",
        }
    }

    /// Assigned boundary fill color (hex, engine paint syntax).
    pub fn boundary_color(self) -> &'static str {
        match self {
            ModelKey::Merced => "#00FF00",
            ModelKey::Tuolumne => "#FFFF00",
            ModelKey::SanJoaquin => "#FF0000",
            ModelKey::Stanislaus => "#0000FF",
        }
    }

    pub fn model_path(self, data_dir: &Path) -> PathBuf {
        data_dir
            .join("models")
            .join(format!("{}.json", self.file_stem()))
    }

    pub fn boundary_path(self, data_dir: &Path) -> PathBuf {
        data_dir
            .join("model-boundaries")
            .join(format!("{}.geojson", self.boundary_stem()))
    }

    /// Accepts the display name ("Merced River") or the bare basin name
    /// ("Merced", case-insensitive) as used on the command line.
    pub fn parse(s: &str) -> Option<ModelKey> {
        let lowered = s.to_ascii_lowercase();
        ModelKey::ALL.into_iter().find(|k| {
            k.display_name() == s
                || k.display_name().to_ascii_lowercase() == lowered
                || k.boundary_stem().to_ascii_lowercase() == lowered
                || lowered == "san joaquin" && *k == ModelKey::SanJoaquin
        })
    }
}

impl std::str::FromStr for ModelKey {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ModelKey::parse(s).ok_or_else(|| ModelError::UnknownModel(s.to_string()))
    }
}

impl std::fmt::Display for ModelKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_name())
    }
}

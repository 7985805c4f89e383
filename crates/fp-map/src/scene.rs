//! The map scene handle.
//!
//! One `MapScene` exists per mounted map view. It owns everything the
//! pipeline ever puts on the map: GeoJSON sources, fill/line layers, and
//! the marker set. Setting a style wipes all of it and requires the style
//! to finish loading before layers may be added again, which is exactly the
//! contract the external map engine imposes.

use std::collections::BTreeMap;

use fp_model::FeatureCollection;

use crate::markers::Marker;
use crate::view_state::MapStyle;
use crate::{MapError, MapResult};

/// Paint properties of a fill layer.
#[derive(Debug, Clone, PartialEq)]
pub struct FillPaint {
    pub color: String,
    pub opacity: f32,
}

/// Paint properties of a line layer. `dash` is the active dash array;
/// `None` draws solid.
#[derive(Debug, Clone, PartialEq)]
pub struct LinePaint {
    pub color: String,
    pub width: f32,
    pub opacity: f32,
    pub dash: Option<Vec<f32>>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum LayerKind {
    Fill(FillPaint),
    Line(LinePaint),
}

/// A layer definition: id, backing source, and paint.
#[derive(Debug, Clone, PartialEq)]
pub struct LayerSpec {
    pub id: String,
    pub source: String,
    pub kind: LayerKind,
}

#[derive(Debug)]
pub struct MapScene {
    style: MapStyle,
    style_loaded: bool,
    sources: BTreeMap<String, FeatureCollection>,
    // draw order: first is painted first
    layers: Vec<LayerSpec>,
    markers: Vec<Marker>,
}

impl MapScene {
    /// Create a scene loading the given style. Nothing may be added until
    /// [`MapScene::finish_style_load`].
    pub fn new(style: MapStyle) -> MapScene {
        MapScene {
            style,
            style_loaded: false,
            sources: BTreeMap::new(),
            layers: Vec::new(),
            markers: Vec::new(),
        }
    }

    pub fn style(&self) -> MapStyle {
        self.style
    }

    pub fn style_loaded(&self) -> bool {
        self.style_loaded
    }

    /// Switch styles. Invalidates every custom source, layer, and marker;
    /// callers must re-add them after the new style finishes loading.
    pub fn set_style(&mut self, style: MapStyle) {
        self.style = style;
        self.style_loaded = false;
        self.sources.clear();
        self.layers.clear();
        self.markers.clear();
    }

    pub fn finish_style_load(&mut self) {
        self.style_loaded = true;
    }

    pub fn has_source(&self, id: &str) -> bool {
        self.sources.contains_key(id)
    }

    pub fn source(&self, id: &str) -> Option<&FeatureCollection> {
        self.sources.get(id)
    }

    pub fn add_source(&mut self, id: impl Into<String>, data: FeatureCollection) -> MapResult<()> {
        let id = id.into();
        if self.sources.contains_key(&id) {
            return Err(MapError::DuplicateSource { id });
        }
        self.sources.insert(id, data);
        Ok(())
    }

    /// Remove a source. Missing ids are a no-op; a source still referenced
    /// by a layer is refused.
    pub fn remove_source(&mut self, id: &str) -> MapResult<()> {
        if !self.sources.contains_key(id) {
            return Ok(());
        }
        if self.layers.iter().any(|l| l.source == id) {
            return Err(MapError::SourceInUse { id: id.to_string() });
        }
        self.sources.remove(id);
        Ok(())
    }

    pub fn has_layer(&self, id: &str) -> bool {
        self.layers.iter().any(|l| l.id == id)
    }

    pub fn layer(&self, id: &str) -> Option<&LayerSpec> {
        self.layers.iter().find(|l| l.id == id)
    }

    /// Layers in draw order.
    pub fn layers(&self) -> &[LayerSpec] {
        &self.layers
    }

    pub fn add_layer(&mut self, spec: LayerSpec) -> MapResult<()> {
        if self.has_layer(&spec.id) {
            return Err(MapError::DuplicateLayer { id: spec.id });
        }
        if !self.sources.contains_key(&spec.source) {
            return Err(MapError::MissingSource {
                layer: spec.id,
                source_id: spec.source,
            });
        }
        self.layers.push(spec);
        Ok(())
    }

    /// Remove a layer; returns whether it was present.
    pub fn remove_layer(&mut self, id: &str) -> bool {
        let before = self.layers.len();
        self.layers.retain(|l| l.id != id);
        self.layers.len() != before
    }

    /// Update a line layer's dash array in place.
    pub fn set_line_dash(&mut self, id: &str, dash: &[f32]) -> MapResult<()> {
        let layer = self
            .layers
            .iter_mut()
            .find(|l| l.id == id)
            .ok_or_else(|| MapError::UnknownLayer { id: id.to_string() })?;
        match &mut layer.kind {
            LayerKind::Line(paint) => {
                paint.dash = Some(dash.to_vec());
                Ok(())
            }
            LayerKind::Fill(_) => Err(MapError::NotLineLayer { id: id.to_string() }),
        }
    }

    pub fn markers(&self) -> &[Marker] {
        &self.markers
    }

    /// Wholesale marker replacement. Only the marker sync path calls this;
    /// markers are never mutated in place.
    pub(crate) fn set_markers(&mut self, markers: Vec<Marker>) {
        self.markers = markers;
    }
}

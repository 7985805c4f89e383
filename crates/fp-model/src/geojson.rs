//! Minimal GeoJSON types.
//!
//! Covers exactly what the pipeline touches: polygonal boundary resources
//! read from disk, and line-string flow geometry built in memory and handed
//! to the map scene as a source payload.

use fp_core::LatLon;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A GeoJSON position: `[lon, lat]`, possibly with trailing extras
/// (altitude) which are carried through untouched.
pub type Position = Vec<f64>;

pub fn position(lon: f64, lat: f64) -> Position {
    vec![lon, lat]
}

/// Interpret a position's first two numbers. GeoJSON order is lon, lat.
pub fn position_latlon(p: &[f64]) -> Option<LatLon> {
    if p.len() < 2 {
        return None;
    }
    LatLon::new(p[1], p[0]).ok()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Geometry {
    LineString { coordinates: Vec<Position> },
    Polygon { coordinates: Vec<Vec<Position>> },
    MultiPolygon { coordinates: Vec<Vec<Vec<Position>>> },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub struct Feature {
    pub geometry: Geometry,
    #[serde(default)]
    pub properties: serde_json::Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "type")]
pub struct FeatureCollection {
    #[serde(default)]
    pub features: Vec<Feature>,
}

impl FeatureCollection {
    pub fn new(features: Vec<Feature>) -> FeatureCollection {
        FeatureCollection { features }
    }

    /// All polygon exterior+interior rings across the collection, flattening
    /// multi-polygons. Line strings contribute nothing here.
    pub fn polygon_rings(&self) -> impl Iterator<Item = &Vec<Position>> {
        self.features.iter().flat_map(|f| match &f.geometry {
            Geometry::Polygon { coordinates } => {
                Box::new(coordinates.iter()) as Box<dyn Iterator<Item = &Vec<Position>> + '_>
            }
            Geometry::MultiPolygon { coordinates } => Box::new(coordinates.iter().flatten()),
            Geometry::LineString { .. } => Box::new(std::iter::empty()),
        })
    }

    /// All line strings across the collection.
    pub fn line_strings(&self) -> impl Iterator<Item = &Vec<Position>> {
        self.features.iter().filter_map(|f| match &f.geometry {
            Geometry::LineString { coordinates } => Some(coordinates),
            _ => None,
        })
    }
}

//! Geographic primitives shared by the model and map layers.

use crate::error::{CoreError, CoreResult};

/// Latitude extent of the Web-Mercator projection. Latitudes beyond this are
/// clamped before projecting, matching what tiled map engines render.
pub const MAX_MERCATOR_LAT: f64 = 85.051_129;

/// A resolved geographic position, latitude/longitude in degrees.
///
/// Model nodes carry *optional* coordinate halves; a `LatLon` only exists
/// once both halves are known and finite.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct LatLon {
    pub lat: f64,
    pub lon: f64,
}

impl LatLon {
    /// Checked constructor: rejects non-finite components.
    pub fn new(lat: f64, lon: f64) -> CoreResult<Self> {
        if !lat.is_finite() {
            return Err(CoreError::NonFinite {
                what: "latitude",
                value: lat,
            });
        }
        if !lon.is_finite() {
            return Err(CoreError::NonFinite {
                what: "longitude",
                value: lon,
            });
        }
        Ok(Self { lat, lon })
    }

    /// Build from optional halves. `None` unless both halves are present
    /// and finite. This is the single gate deciding whether a node is
    /// placeable on the map.
    pub fn from_parts(lat: Option<f64>, lon: Option<f64>) -> Option<Self> {
        match (lat, lon) {
            (Some(lat), Some(lon)) => Self::new(lat, lon).ok(),
            _ => None,
        }
    }

    /// Arithmetic mean of a set of positions.
    ///
    /// Returns `(0, 0)` for an empty set. That is an explicit fallback (the
    /// world-origin default view), not an error.
    pub fn mean_of<I>(points: I) -> LatLon
    where
        I: IntoIterator<Item = LatLon>,
    {
        let mut lat_sum = 0.0;
        let mut lon_sum = 0.0;
        let mut count = 0usize;
        for p in points {
            lat_sum += p.lat;
            lon_sum += p.lon;
            count += 1;
        }
        if count == 0 {
            return LatLon::default();
        }
        LatLon {
            lat: lat_sum / count as f64,
            lon: lon_sum / count as f64,
        }
    }
}

impl std::fmt::Display for LatLon {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.6}, {:.6})", self.lat, self.lon)
    }
}

/// A position projected to the Web-Mercator unit square.
///
/// `x` grows east from the antimeridian, `y` grows *south* from the top of
/// the projected world, both in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MercatorPoint {
    pub x: f64,
    pub y: f64,
}

/// Project a position into the Web-Mercator unit square.
pub fn project(p: LatLon) -> MercatorPoint {
    let lat = p.lat.clamp(-MAX_MERCATOR_LAT, MAX_MERCATOR_LAT);
    let x = (p.lon + 180.0) / 360.0;
    let lat_rad = lat.to_radians();
    let y = 0.5 - (lat_rad.tan() + 1.0 / lat_rad.cos()).ln() / (2.0 * std::f64::consts::PI);
    MercatorPoint { x, y }
}

//! Canonical model data types.
//!
//! Everything here is produced by normalizing a raw model file
//! (see [`crate::schema`]) and is immutable afterwards; a re-load replaces
//! the whole dataset.

use fp_core::LatLon;

use crate::registry::ModelKey;

/// Component category of a model node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeType {
    Reservoir,
    Hydropower,
    Catchment,
    Link,
    InstreamFlowRequirement,
    BreakLink,
    Output,
    River,
    Unknown,
}

impl NodeType {
    pub const ALL: [NodeType; 9] = [
        NodeType::Reservoir,
        NodeType::Hydropower,
        NodeType::Catchment,
        NodeType::Link,
        NodeType::InstreamFlowRequirement,
        NodeType::BreakLink,
        NodeType::Output,
        NodeType::River,
        NodeType::Unknown,
    ];

    /// The label as it appears in model files and UI filter lists.
    pub fn label(self) -> &'static str {
        match self {
            NodeType::Reservoir => "Reservoir",
            NodeType::Hydropower => "Hydropower",
            NodeType::Catchment => "Catchment",
            NodeType::Link => "Link",
            NodeType::InstreamFlowRequirement => "InstreamFlowRequirement",
            NodeType::BreakLink => "BreakLink",
            NodeType::Output => "Output",
            NodeType::River => "River",
            NodeType::Unknown => "Unknown",
        }
    }

    /// Exact, case-sensitive label lookup.
    pub fn parse(s: &str) -> Option<NodeType> {
        NodeType::ALL.into_iter().find(|t| t.label() == s)
    }
}

impl std::fmt::Display for NodeType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Optional coordinate halves as stored on a node.
///
/// Raw files carry `[lat, lon]` pairs; nodes without one keep both halves
/// `None` and are simply never placed on the map.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Coordinates {
    pub lat: Option<f64>,
    pub lon: Option<f64>,
}

impl Coordinates {
    pub const NONE: Coordinates = Coordinates {
        lat: None,
        lon: None,
    };

    pub fn new(lat: f64, lon: f64) -> Coordinates {
        Coordinates {
            lat: Some(lat),
            lon: Some(lon),
        }
    }

    /// The placeable position, if both halves are present and finite.
    pub fn resolve(&self) -> Option<LatLon> {
        LatLon::from_parts(self.lat, self.lon)
    }
}

/// A single model component: reservoir, hydropower plant, link, and so on.
///
/// `attributes` is the open map of everything else the model file said about
/// the node (volumes, costs, gauges, ...), kept verbatim for display.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub name: String,
    pub coordinates: Coordinates,
    pub node_type: NodeType,
    pub attributes: serde_json::Map<String, serde_json::Value>,
}

impl Node {
    pub fn position(&self) -> Option<LatLon> {
        self.coordinates.resolve()
    }
}

/// A directed reference between two node names representing flow
/// connectivity. Endpoints may dangle; dangling edges are skipped at render
/// time rather than rejected at load time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edge {
    pub source: String,
    pub target: String,
}

/// One river basin's complete dataset.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelData {
    pub key: ModelKey,
    pub title: String,
    pub nodes: Vec<Node>,
    pub edges: Vec<Edge>,
}

impl ModelData {
    /// The stand-in for a model that failed to load: no nodes, no edges,
    /// titled with the model's display name.
    pub fn empty(key: ModelKey) -> ModelData {
        ModelData {
            key,
            title: key.display_name().to_string(),
            nodes: Vec::new(),
            edges: Vec::new(),
        }
    }

    /// Look up a node by name.
    pub fn node(&self, name: &str) -> Option<&Node> {
        self.nodes.iter().find(|n| n.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn node_type_parse_is_exact() {
        assert_eq!(NodeType::parse("Reservoir"), Some(NodeType::Reservoir));
        assert_eq!(NodeType::parse("reservoir"), None);
        assert_eq!(NodeType::parse("PiecewiseLink"), None);
        assert_eq!(NodeType::parse("Unknown"), Some(NodeType::Unknown));
    }

    #[test]
    fn coordinates_resolve() {
        assert_eq!(Coordinates::NONE.resolve(), None);
        let c = Coordinates {
            lat: Some(37.0),
            lon: None,
        };
        assert_eq!(c.resolve(), None);
        let c = Coordinates::new(37.0, -120.0);
        let p = c.resolve().unwrap();
        assert_eq!(p.lat, 37.0);
        assert_eq!(p.lon, -120.0);
    }

    #[test]
    fn empty_model_uses_display_name() {
        let m = ModelData::empty(ModelKey::Merced);
        assert_eq!(m.title, "Merced River");
        assert!(m.nodes.is_empty());
        assert!(m.edges.is_empty());
    }
}

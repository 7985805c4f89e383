//! Raw model file schema.
//!
//! A model file is `{ metadata, nodes, edges }` where nodes carry optional
//! `[lat, lon]` coordinate pairs and an optional `type`, and edges are
//! `[source, target, ...]` name arrays. Everything a node says beyond
//! name/coordinates/type is an open attribute map retained for display.

use serde::Deserialize;
use serde_json::Value;

use crate::node::{Coordinates, Edge, ModelData, Node, NodeType};
use crate::registry::ModelKey;

/// Title used when a model file has no `metadata.title`.
pub const UNTITLED_MODEL_TITLE: &str = "Untitled Model";

#[derive(Debug, Clone, Deserialize)]
pub struct RawModelFile {
    #[serde(default)]
    pub metadata: RawMetadata,
    #[serde(default)]
    pub nodes: Vec<RawNode>,
    /// Edge entries are arrays; only the first two names are meaningful,
    /// extra positions (slot names) are ignored.
    #[serde(default)]
    pub edges: Vec<Vec<Value>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawMetadata {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawNode {
    pub name: String,
    #[serde(default)]
    pub coordinates: Option<Vec<f64>>,
    #[serde(default, rename = "type")]
    pub node_type: Option<String>,
    #[serde(flatten)]
    pub attributes: serde_json::Map<String, Value>,
}

impl RawModelFile {
    /// Normalize into the canonical shape.
    ///
    /// - `[lat, lon]` pairs become coordinate halves; missing or short
    ///   arrays become `{None, None}`
    /// - missing or unrecognized `type` becomes `Unknown`
    /// - edge entries shorter than two names are dropped
    pub fn normalize(self, key: ModelKey) -> ModelData {
        let title = self
            .metadata
            .title
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| UNTITLED_MODEL_TITLE.to_string());

        let nodes = self.nodes.into_iter().map(RawNode::normalize).collect();

        let mut edges = Vec::with_capacity(self.edges.len());
        for entry in self.edges {
            match (
                entry.first().and_then(Value::as_str),
                entry.get(1).and_then(Value::as_str),
            ) {
                (Some(source), Some(target)) => edges.push(Edge {
                    source: source.to_string(),
                    target: target.to_string(),
                }),
                _ => {
                    tracing::debug!(model = %key, ?entry, "dropping malformed edge entry");
                }
            }
        }

        ModelData {
            key,
            title,
            nodes,
            edges,
        }
    }
}

impl RawNode {
    fn normalize(self) -> Node {
        let coordinates = match self.coordinates {
            Some(pair) if pair.len() >= 2 => Coordinates::new(pair[0], pair[1]),
            _ => Coordinates::NONE,
        };
        let node_type = self
            .node_type
            .as_deref()
            .and_then(NodeType::parse)
            .unwrap_or(NodeType::Unknown);

        Node {
            name: self.name,
            coordinates,
            node_type,
            attributes: self.attributes,
        }
    }
}

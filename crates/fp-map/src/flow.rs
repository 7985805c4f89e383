//! Animated flow edges.
//!
//! Each renderable edge becomes a line from its source node to its target
//! node. Two stacked layers draw them: a low-opacity background line and a
//! dashed line whose dash array is advanced through a fixed sequence,
//! producing a flowing-current visual whose direction follows the dash
//! phase.

use std::collections::HashMap;

use fp_core::LatLon;
use fp_model::geojson::{Feature, FeatureCollection, Geometry, position};
use fp_model::{Edge, Node};

use crate::scene::{LayerKind, LayerSpec, LinePaint, MapScene};
use crate::MapResult;

pub const FLOW_SOURCE_ID: &str = "flow-lines";
pub const FLOW_BACKGROUND_LAYER_ID: &str = "flow-line-background";
pub const FLOW_DASH_LAYER_ID: &str = "flow-line-dashed";

/// Milliseconds per dash step.
pub const DASH_STEP_INTERVAL_MS: f64 = 80.0;

/// Dash arrays cycled by the animator: seven steps sliding the gap forward,
/// then seven sliding the dash through the gap.
pub const DASH_SEQUENCE: [&[f32]; 14] = [
    &[0.0, 4.0, 3.0],
    &[0.5, 4.0, 2.5],
    &[1.0, 4.0, 2.0],
    &[1.5, 4.0, 1.5],
    &[2.0, 4.0, 1.0],
    &[2.5, 4.0, 0.5],
    &[3.0, 4.0, 0.0],
    &[0.0, 0.5, 3.0, 3.5],
    &[0.0, 1.0, 3.0, 3.0],
    &[0.0, 1.5, 3.0, 2.5],
    &[0.0, 2.0, 3.0, 2.0],
    &[0.0, 2.5, 3.0, 1.5],
    &[0.0, 3.0, 3.0, 1.0],
    &[0.0, 3.5, 3.0, 0.5],
];

/// Build the flow-line geometry: one LineString per edge whose endpoints
/// both resolve to placeable nodes, tagged with the endpoint names. Edges
/// referencing unknown nodes or nodes without coordinates are skipped.
pub fn flow_line_features(edges: &[Edge], nodes: &[Node]) -> FeatureCollection {
    let positions: HashMap<&str, LatLon> = nodes
        .iter()
        .filter_map(|n| n.position().map(|p| (n.name.as_str(), p)))
        .collect();

    let features = edges
        .iter()
        .filter_map(|edge| {
            let from = positions.get(edge.source.as_str())?;
            let to = positions.get(edge.target.as_str())?;
            let mut properties = serde_json::Map::new();
            properties.insert("source".to_string(), edge.source.clone().into());
            properties.insert("target".to_string(), edge.target.clone().into());
            Some(Feature {
                geometry: Geometry::LineString {
                    coordinates: vec![position(from.lon, from.lat), position(to.lon, to.lat)],
                },
                properties,
            })
        })
        .collect();

    FeatureCollection::new(features)
}

/// The flow animation handle: explicit rebuild/tick/stop lifecycle.
///
/// `rebuild` is always full-replace, so toggling flow off and on, or
/// feeding it changed inputs, reconstructs the geometry from scratch.
#[derive(Debug, Default)]
pub struct FlowAnimator {
    running: bool,
    step: usize,
}

impl FlowAnimator {
    pub fn new() -> FlowAnimator {
        FlowAnimator::default()
    }

    /// Whether the dash animation is currently advancing.
    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn current_step(&self) -> usize {
        self.step
    }

    /// Tear down and, when `show_flow` is set and any edge is renderable,
    /// re-add the flow source and both line layers.
    pub fn rebuild(
        &mut self,
        scene: &mut MapScene,
        show_flow: bool,
        edges: &[Edge],
        nodes: &[Node],
    ) -> MapResult<()> {
        self.teardown(scene)?;

        if !show_flow {
            return Ok(());
        }
        let lines = flow_line_features(edges, nodes);
        if lines.features.is_empty() {
            return Ok(());
        }

        scene.add_source(FLOW_SOURCE_ID, lines)?;
        scene.add_layer(LayerSpec {
            id: FLOW_BACKGROUND_LAYER_ID.to_string(),
            source: FLOW_SOURCE_ID.to_string(),
            kind: LayerKind::Line(LinePaint {
                color: "blue".to_string(),
                width: 4.0,
                opacity: 0.4,
                dash: None,
            }),
        })?;
        scene.add_layer(LayerSpec {
            id: FLOW_DASH_LAYER_ID.to_string(),
            source: FLOW_SOURCE_ID.to_string(),
            kind: LayerKind::Line(LinePaint {
                color: "blue".to_string(),
                width: 4.0,
                opacity: 1.0,
                dash: Some(DASH_SEQUENCE[0].to_vec()),
            }),
        })?;

        self.running = true;
        self.step = 0;
        Ok(())
    }

    /// Advance the dash phase for the given timestamp. Returns whether the
    /// dash array changed (the caller repaints only then). The active step
    /// is `timestamp / interval mod sequence length`, so the phase is a
    /// pure function of the clock, not of tick frequency.
    pub fn tick(&mut self, scene: &mut MapScene, timestamp_ms: f64) -> MapResult<bool> {
        if !self.running || !scene.has_layer(FLOW_DASH_LAYER_ID) {
            return Ok(false);
        }
        let new_step =
            (timestamp_ms / DASH_STEP_INTERVAL_MS).floor() as usize % DASH_SEQUENCE.len();
        if new_step == self.step {
            return Ok(false);
        }
        scene.set_line_dash(FLOW_DASH_LAYER_ID, DASH_SEQUENCE[new_step])?;
        self.step = new_step;
        Ok(true)
    }

    /// Stop animating and remove the flow layers and source.
    pub fn stop(&mut self, scene: &mut MapScene) -> MapResult<()> {
        self.teardown(scene)
    }

    fn teardown(&mut self, scene: &mut MapScene) -> MapResult<()> {
        // layers before source: a source with dependent layers is refused
        scene.remove_layer(FLOW_DASH_LAYER_ID);
        scene.remove_layer(FLOW_BACKGROUND_LAYER_ID);
        scene.remove_source(FLOW_SOURCE_ID)?;
        self.running = false;
        self.step = 0;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view_state::MapStyle;
    use fp_model::{Coordinates, NodeType};

    fn node(name: &str, coordinates: Coordinates) -> Node {
        Node {
            name: name.to_string(),
            coordinates,
            node_type: NodeType::Link,
            attributes: serde_json::Map::new(),
        }
    }

    fn edge(source: &str, target: &str) -> Edge {
        Edge {
            source: source.to_string(),
            target: target.to_string(),
        }
    }

    fn scene() -> MapScene {
        let mut s = MapScene::new(MapStyle::Streets);
        s.finish_style_load();
        s
    }

    #[test]
    fn dangling_and_unplaceable_edges_are_skipped() {
        let nodes = vec![
            node("A", Coordinates::new(10.0, 20.0)),
            node("B", Coordinates::new(11.0, 21.0)),
            node("C", Coordinates::NONE),
        ];
        let edges = vec![
            edge("A", "B"),
            edge("A", "C"),
            edge("A", "Ghost"),
            edge("Ghost", "B"),
        ];
        let lines = flow_line_features(&edges, &nodes);
        assert_eq!(lines.features.len(), 1);
        match &lines.features[0].geometry {
            Geometry::LineString { coordinates } => {
                // GeoJSON order: lon, lat
                assert_eq!(coordinates[0], vec![20.0, 10.0]);
                assert_eq!(coordinates[1], vec![21.0, 11.0]);
            }
            _ => unreachable!(),
        }
    }

    #[test]
    fn rebuild_off_then_on_is_identical() {
        let nodes = vec![
            node("A", Coordinates::new(10.0, 20.0)),
            node("B", Coordinates::new(11.0, 21.0)),
        ];
        let edges = vec![edge("A", "B")];
        let mut s = scene();
        let mut animator = FlowAnimator::new();

        animator.rebuild(&mut s, true, &edges, &nodes).unwrap();
        let first = s.source(FLOW_SOURCE_ID).unwrap().clone();
        assert!(animator.is_running());

        animator.rebuild(&mut s, false, &edges, &nodes).unwrap();
        assert!(!animator.is_running());
        assert!(!s.has_source(FLOW_SOURCE_ID));

        animator.rebuild(&mut s, true, &edges, &nodes).unwrap();
        assert_eq!(s.source(FLOW_SOURCE_ID).unwrap(), &first);
        assert!(s.has_layer(FLOW_BACKGROUND_LAYER_ID));
        assert!(s.has_layer(FLOW_DASH_LAYER_ID));
    }

    #[test]
    fn no_renderable_edges_means_no_layers() {
        let nodes = vec![node("A", Coordinates::new(10.0, 20.0))];
        let edges = vec![edge("A", "Ghost")];
        let mut s = scene();
        let mut animator = FlowAnimator::new();
        animator.rebuild(&mut s, true, &edges, &nodes).unwrap();
        assert!(!animator.is_running());
        assert!(!s.has_source(FLOW_SOURCE_ID));
    }

    #[test]
    fn tick_advances_by_clock() {
        let nodes = vec![
            node("A", Coordinates::new(10.0, 20.0)),
            node("B", Coordinates::new(11.0, 21.0)),
        ];
        let edges = vec![edge("A", "B")];
        let mut s = scene();
        let mut animator = FlowAnimator::new();
        animator.rebuild(&mut s, true, &edges, &nodes).unwrap();

        // same step bucket: no change
        assert!(!animator.tick(&mut s, 10.0).unwrap());
        // next bucket
        assert!(animator.tick(&mut s, DASH_STEP_INTERVAL_MS).unwrap());
        assert_eq!(animator.current_step(), 1);
        // sequence wraps
        let wrap = DASH_STEP_INTERVAL_MS * DASH_SEQUENCE.len() as f64;
        assert!(animator.tick(&mut s, wrap).unwrap());
        assert_eq!(animator.current_step(), 0);

        match &s.layer(FLOW_DASH_LAYER_ID).unwrap().kind {
            LayerKind::Line(p) => assert_eq!(p.dash.as_deref(), Some(DASH_SEQUENCE[0])),
            _ => unreachable!(),
        }
    }

    #[test]
    fn tick_after_stop_is_inert() {
        let nodes = vec![
            node("A", Coordinates::new(10.0, 20.0)),
            node("B", Coordinates::new(11.0, 21.0)),
        ];
        let edges = vec![edge("A", "B")];
        let mut s = scene();
        let mut animator = FlowAnimator::new();
        animator.rebuild(&mut s, true, &edges, &nodes).unwrap();
        animator.stop(&mut s).unwrap();
        assert!(!animator.tick(&mut s, 1_000.0).unwrap());
        assert!(!s.has_layer(FLOW_DASH_LAYER_ID));
    }
}

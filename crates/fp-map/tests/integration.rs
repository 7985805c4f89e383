//! Integration tests driving the whole scene pipeline the way the UI does:
//! view-state changes followed by marker/boundary/flow syncs.

use std::collections::BTreeMap;

use fp_map::{
    FLOW_DASH_LAYER_ID, FLOW_SOURCE_ID, FlowAnimator, HoverEvent, MapScene, MapStyle, ViewState,
    sync_boundaries, sync_markers,
};
use fp_model::{
    Coordinates, Edge, FeatureCollection, ModelKey, Node, NodeType, TypeFilter, center,
    filter_by_type,
};

fn node(name: &str, coordinates: Coordinates, node_type: NodeType) -> Node {
    Node {
        name: name.to_string(),
        coordinates,
        node_type,
        attributes: serde_json::Map::new(),
    }
}

fn demo_nodes() -> Vec<Node> {
    vec![
        node("A", Coordinates::new(10.0, 20.0), NodeType::Reservoir),
        node("B", Coordinates::NONE, NodeType::Link),
        node("C", Coordinates::new(12.0, 22.0), NodeType::Hydropower),
    ]
}

#[test]
fn spec_scenario_markers_and_center() {
    // nodes A(10,20,Reservoir) and B(no coordinates, Link):
    // one marker, center exactly at A
    let nodes = vec![
        node("A", Coordinates::new(10.0, 20.0), NodeType::Reservoir),
        node("B", Coordinates::NONE, NodeType::Link),
    ];
    let mut scene = MapScene::new(MapStyle::Streets);
    scene.finish_style_load();

    let visible = filter_by_type(&nodes, TypeFilter::All);
    let placed = sync_markers(&mut scene, visible.into_iter());
    assert_eq!(placed, 1);
    assert_eq!(scene.markers()[0].node.name, "A");

    let c = center(&nodes);
    assert_eq!(c.lat, 10.0);
    assert_eq!(c.lon, 20.0);
}

#[test]
fn filter_change_drives_marker_replacement() {
    let nodes = demo_nodes();
    let mut scene = MapScene::new(MapStyle::Streets);
    scene.finish_style_load();
    let mut vs = ViewState::new();

    sync_markers(
        &mut scene,
        filter_by_type(&nodes, vs.type_filter()).into_iter(),
    );
    assert_eq!(scene.markers().len(), 2);

    vs.set_type_filter(TypeFilter::Only(NodeType::Hydropower));
    sync_markers(
        &mut scene,
        filter_by_type(&nodes, vs.type_filter()).into_iter(),
    );
    assert_eq!(scene.markers().len(), 1);
    assert_eq!(scene.markers()[0].node.name, "C");
}

#[test]
fn hover_round_trip_through_view_state() {
    let nodes = demo_nodes();
    let mut scene = MapScene::new(MapStyle::Streets);
    scene.finish_style_load();
    let mut vs = ViewState::new();

    sync_markers(&mut scene, nodes.iter());
    let payload = scene.markers()[0].node.clone();
    vs.apply_hover(HoverEvent::Enter(payload));
    assert_eq!(vs.hovered().map(|n| n.name.as_str()), Some("A"));
    vs.apply_hover(HoverEvent::Leave);
    assert!(vs.hovered().is_none());
}

#[test]
fn style_switch_requires_full_readd() {
    let mut scene = MapScene::new(MapStyle::Streets);
    scene.finish_style_load();
    let mut vs = ViewState::new();
    vs.set_model_selected(ModelKey::Merced, true);

    let boundaries: BTreeMap<ModelKey, FeatureCollection> = ModelKey::ALL
        .into_iter()
        .map(|k| (k, FeatureCollection::default()))
        .collect();

    sync_boundaries(&mut scene, vs.selected_models(), &boundaries).unwrap();
    assert!(scene.has_layer("Merced"));

    vs.set_style(MapStyle::Satellite);
    scene.set_style(vs.style());
    assert!(!scene.has_layer("Merced"));

    scene.finish_style_load();
    sync_boundaries(&mut scene, vs.selected_models(), &boundaries).unwrap();
    assert!(scene.has_layer("Merced"));
    assert!(scene.has_layer("Merced-border"));
}

#[test]
fn flow_toggle_and_input_change() {
    let nodes = demo_nodes();
    let edges = vec![
        Edge {
            source: "A".to_string(),
            target: "C".to_string(),
        },
        Edge {
            source: "A".to_string(),
            target: "B".to_string(), // B unplaceable: skipped
        },
    ];
    let mut scene = MapScene::new(MapStyle::Streets);
    scene.finish_style_load();
    let mut vs = ViewState::new();
    let mut animator = FlowAnimator::new();

    vs.set_show_flow(true);
    animator
        .rebuild(&mut scene, vs.show_flow(), &edges, &nodes)
        .unwrap();
    assert_eq!(scene.source(FLOW_SOURCE_ID).unwrap().features.len(), 1);
    assert!(animator.is_running());

    // input change: full-replace rebuild
    let fewer_edges = &edges[..1];
    animator
        .rebuild(&mut scene, vs.show_flow(), fewer_edges, &nodes)
        .unwrap();
    assert_eq!(scene.source(FLOW_SOURCE_ID).unwrap().features.len(), 1);

    vs.set_show_flow(false);
    animator
        .rebuild(&mut scene, vs.show_flow(), &edges, &nodes)
        .unwrap();
    assert!(!scene.has_source(FLOW_SOURCE_ID));
    assert!(!scene.has_layer(FLOW_DASH_LAYER_ID));
}

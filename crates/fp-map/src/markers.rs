//! Marker lifecycle: one marker per visible node, replaced wholesale.

use fp_core::LatLon;
use fp_model::{Node, NodeType};

use crate::scene::MapScene;

/// Marker visual, selected by the fixed type lookup below. Eight typed
/// icons plus a default for anything else.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerIcon {
    Reservoir,
    Hydropower,
    Catchment,
    Link,
    InstreamFlowRequirement,
    BreakLink,
    Output,
    River,
    Default,
}

/// Fixed type → icon lookup.
pub fn icon_for(node_type: NodeType) -> MarkerIcon {
    match node_type {
        NodeType::Reservoir => MarkerIcon::Reservoir,
        NodeType::Hydropower => MarkerIcon::Hydropower,
        NodeType::Catchment => MarkerIcon::Catchment,
        NodeType::Link => MarkerIcon::Link,
        NodeType::InstreamFlowRequirement => MarkerIcon::InstreamFlowRequirement,
        NodeType::BreakLink => MarkerIcon::BreakLink,
        NodeType::Output => MarkerIcon::Output,
        NodeType::River => MarkerIcon::River,
        NodeType::Unknown => MarkerIcon::Default,
    }
}

/// A live marker. Owned exclusively by the scene; destroyed and recreated
/// on every sync, never mutated in place.
#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    /// Full node payload, delivered on hover-enter.
    pub node: Node,
    pub position: LatLon,
    pub icon: MarkerIcon,
    /// Popup body shown while hovered: node name plus type label.
    pub popup_text: String,
}

/// Hover transition reported by the map view for the marker under the
/// pointer. The sole channel writing `ViewState::hovered`; there is no
/// click-to-pin selection.
#[derive(Debug, Clone, PartialEq)]
pub enum HoverEvent {
    Enter(Node),
    Leave,
}

fn popup_text(node: &Node) -> String {
    format!("{}\n{}", node.name, node.node_type)
}

/// Replace the scene's entire marker set with one marker per node that has
/// a placeable position. Returns the number of markers placed.
pub fn sync_markers<'a, I>(scene: &mut MapScene, nodes: I) -> usize
where
    I: IntoIterator<Item = &'a Node>,
{
    let markers: Vec<Marker> = nodes
        .into_iter()
        .filter_map(|node| {
            let position = node.position()?;
            Some(Marker {
                node: node.clone(),
                position,
                icon: icon_for(node.node_type),
                popup_text: popup_text(node),
            })
        })
        .collect();
    let count = markers.len();
    scene.set_markers(markers);
    count
}

//! Pure coordinate aggregation over loaded nodes.

use fp_core::LatLon;

use crate::node::{Node, NodeType};

/// Map center: arithmetic mean of every node with a placeable position.
///
/// `(0, 0)` when nothing is placeable. A node with only one coordinate half
/// does not count.
pub fn center(nodes: &[Node]) -> LatLon {
    LatLon::mean_of(nodes.iter().filter_map(Node::position))
}

/// The component-type filter as selected in the UI: "All" or one category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TypeFilter {
    #[default]
    All,
    Only(NodeType),
}

impl TypeFilter {
    /// Parse a filter label. "All" and any label that names no known type
    /// both yield `All`, so unknown filters behave exactly like "All".
    pub fn parse(s: &str) -> TypeFilter {
        match NodeType::parse(s) {
            Some(t) => TypeFilter::Only(t),
            None => TypeFilter::All,
        }
    }

    pub fn matches(self, node: &Node) -> bool {
        match self {
            TypeFilter::All => true,
            TypeFilter::Only(t) => node.node_type == t,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            TypeFilter::All => "All",
            TypeFilter::Only(t) => t.label(),
        }
    }
}

/// Nodes passing the filter, in input order.
pub fn filter_by_type<'a>(nodes: &'a [Node], filter: TypeFilter) -> Vec<&'a Node> {
    nodes.iter().filter(|n| filter.matches(n)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::Coordinates;
    use proptest::prelude::*;

    fn node(name: &str, coordinates: Coordinates, node_type: NodeType) -> Node {
        Node {
            name: name.to_string(),
            coordinates,
            node_type,
            attributes: serde_json::Map::new(),
        }
    }

    #[test]
    fn center_without_valid_coordinates_is_origin() {
        let nodes = vec![
            node("A", Coordinates::NONE, NodeType::Link),
            node(
                "B",
                Coordinates {
                    lat: Some(10.0),
                    lon: None,
                },
                NodeType::Link,
            ),
        ];
        assert_eq!(center(&nodes), LatLon { lat: 0.0, lon: 0.0 });
    }

    #[test]
    fn center_of_single_valid_node_is_exact() {
        let nodes = vec![
            node("A", Coordinates::new(10.0, 20.0), NodeType::Reservoir),
            node("B", Coordinates::NONE, NodeType::Link),
        ];
        assert_eq!(center(&nodes), LatLon { lat: 10.0, lon: 20.0 });
    }

    #[test]
    fn filter_all_is_identity() {
        let nodes = vec![
            node("A", Coordinates::NONE, NodeType::Reservoir),
            node("B", Coordinates::NONE, NodeType::Link),
        ];
        assert_eq!(filter_by_type(&nodes, TypeFilter::All).len(), 2);
    }

    #[test]
    fn filter_matches_exactly() {
        let nodes = vec![
            node("A", Coordinates::NONE, NodeType::Reservoir),
            node("B", Coordinates::NONE, NodeType::Link),
            node("C", Coordinates::NONE, NodeType::Reservoir),
        ];
        let filtered = filter_by_type(&nodes, TypeFilter::Only(NodeType::Reservoir));
        assert_eq!(filtered.len(), 2);
        assert!(filtered.iter().all(|n| n.node_type == NodeType::Reservoir));
    }

    #[test]
    fn unknown_filter_labels_behave_like_all() {
        assert_eq!(TypeFilter::parse("All"), TypeFilter::All);
        assert_eq!(TypeFilter::parse("Glacier"), TypeFilter::All);
        assert_eq!(TypeFilter::parse("reservoir"), TypeFilter::All);
        assert_eq!(
            TypeFilter::parse("Reservoir"),
            TypeFilter::Only(NodeType::Reservoir)
        );
    }

    proptest! {
        #[test]
        fn center_stays_within_coordinate_envelope(
            coords in prop::collection::vec((-85.0_f64..85.0, -180.0_f64..180.0), 1..40)
        ) {
            let nodes: Vec<Node> = coords
                .iter()
                .enumerate()
                .map(|(i, (lat, lon))| node(&format!("n{i}"), Coordinates::new(*lat, *lon), NodeType::Link))
                .collect();
            let c = center(&nodes);

            let lat_min = coords.iter().map(|p| p.0).fold(f64::INFINITY, f64::min);
            let lat_max = coords.iter().map(|p| p.0).fold(f64::NEG_INFINITY, f64::max);
            let lon_min = coords.iter().map(|p| p.1).fold(f64::INFINITY, f64::min);
            let lon_max = coords.iter().map(|p| p.1).fold(f64::NEG_INFINITY, f64::max);

            prop_assert!(c.lat >= lat_min - 1e-9 && c.lat <= lat_max + 1e-9);
            prop_assert!(c.lon >= lon_min - 1e-9 && c.lon <= lon_max + 1e-9);
        }

        #[test]
        fn nodes_without_positions_never_shift_center(
            lat in -85.0_f64..85.0,
            lon in -180.0_f64..180.0,
            padding in 0_usize..10
        ) {
            let mut nodes = vec![node("anchor", Coordinates::new(lat, lon), NodeType::Reservoir)];
            for i in 0..padding {
                nodes.push(node(&format!("pad{i}"), Coordinates::NONE, NodeType::Link));
            }
            let c = center(&nodes);
            prop_assert_eq!(c, LatLon { lat, lon });
        }
    }
}

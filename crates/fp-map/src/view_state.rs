//! Cross-component view state.
//!
//! One instance per app run, created at startup and passed by reference to
//! whoever needs it. Writer discipline: the sidebar controls are the only
//! callers of the selection/filter/style/flow setters, and the marker hover
//! path is the only caller of [`ViewState::apply_hover`]. Reads are free.
//! All transitions are direct replace-on-write; there is no history.

use std::collections::BTreeSet;

use fp_model::{ModelKey, Node, TypeFilter};

use crate::markers::HoverEvent;

/// The two selectable base map styles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MapStyle {
    #[default]
    Streets,
    Satellite,
}

impl MapStyle {
    pub const ALL: [MapStyle; 2] = [MapStyle::Streets, MapStyle::Satellite];

    pub fn label(self) -> &'static str {
        match self {
            MapStyle::Streets => "Streets",
            MapStyle::Satellite => "Satellite",
        }
    }

    /// The hosted style referenced by URL; the tile engine resolves it.
    pub fn url(self) -> &'static str {
        match self {
            MapStyle::Streets => "mapbox://styles/mapbox/streets-v11",
            MapStyle::Satellite => "mapbox://styles/mapbox/satellite-streets-v12",
        }
    }
}

#[derive(Debug, Default)]
pub struct ViewState {
    selected_models: BTreeSet<ModelKey>,
    type_filter: TypeFilter,
    style: MapStyle,
    show_flow: bool,
    hovered: Option<Node>,
}

impl ViewState {
    pub fn new() -> ViewState {
        ViewState::default()
    }

    pub fn selected_models(&self) -> &BTreeSet<ModelKey> {
        &self.selected_models
    }

    pub fn is_selected(&self, key: ModelKey) -> bool {
        self.selected_models.contains(&key)
    }

    pub fn type_filter(&self) -> TypeFilter {
        self.type_filter
    }

    pub fn style(&self) -> MapStyle {
        self.style
    }

    pub fn show_flow(&self) -> bool {
        self.show_flow
    }

    pub fn hovered(&self) -> Option<&Node> {
        self.hovered.as_ref()
    }

    // --- sidebar-owned writers ---

    pub fn set_model_selected(&mut self, key: ModelKey, selected: bool) {
        if selected {
            self.selected_models.insert(key);
        } else {
            self.selected_models.remove(&key);
        }
    }

    pub fn set_type_filter(&mut self, filter: TypeFilter) {
        self.type_filter = filter;
    }

    pub fn set_style(&mut self, style: MapStyle) {
        self.style = style;
    }

    pub fn set_show_flow(&mut self, show_flow: bool) {
        self.show_flow = show_flow;
    }

    // --- hover-path-owned writer ---

    /// Applied for every marker hover transition; `Leave` clears.
    pub fn apply_hover(&mut self, event: HoverEvent) {
        self.hovered = match event {
            HoverEvent::Enter(node) => Some(node),
            HoverEvent::Leave => None,
        };
    }
}

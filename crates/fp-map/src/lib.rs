//! fp-map: the map data-binding layer.
//!
//! Provides:
//! - [`MapScene`]: the exclusively-owned render handle all layer, source,
//!   and marker mutations go through
//! - [`ViewState`]: cross-component UI state with designated writers
//! - Marker sync, boundary layer sync, and the flow-edge animator
//!
//! The scene itself is engine-agnostic: it holds sources, layers, and
//! markers the way the external map engine would, and the UI paints from it.

pub mod boundaries;
pub mod flow;
pub mod markers;
pub mod scene;
pub mod view_state;

// Re-exports for ergonomics
pub use boundaries::{boundary_border_layer_id, boundary_fill_layer_id, sync_boundaries};
pub use flow::{
    DASH_SEQUENCE, DASH_STEP_INTERVAL_MS, FLOW_BACKGROUND_LAYER_ID, FLOW_DASH_LAYER_ID,
    FLOW_SOURCE_ID, FlowAnimator, flow_line_features,
};
pub use markers::{HoverEvent, Marker, MarkerIcon, icon_for, sync_markers};
pub use scene::{FillPaint, LayerKind, LayerSpec, LinePaint, MapScene};
pub use view_state::{MapStyle, ViewState};

pub type MapResult<T> = Result<T, MapError>;

/// Scene-handle misuse. These mirror the external engine's hard failures;
/// managers that want idempotent behavior check `has_*` first, exactly as
/// the engine's callers must.
#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum MapError {
    #[error("Source already present: {id}")]
    DuplicateSource { id: String },

    #[error("Layer already present: {id}")]
    DuplicateLayer { id: String },

    #[error("Layer {layer} references missing source {source_id}")]
    MissingSource { layer: String, source_id: String },

    #[error("Source {id} still has dependent layers")]
    SourceInUse { id: String },

    #[error("No such layer: {id}")]
    UnknownLayer { id: String },

    #[error("Layer {id} is not a line layer")]
    NotLineLayer { id: String },
}

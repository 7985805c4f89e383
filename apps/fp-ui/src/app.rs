use std::collections::BTreeMap;
use std::path::PathBuf;

use egui_extras::{Column, TableBuilder};

use fp_app::{LoaderWorker, load_boundaries};
use fp_map::{FlowAnimator, MapScene, MapStyle, ViewState, sync_boundaries, sync_markers};
use fp_model::{
    Edge, FeatureCollection, ModelKey, Node, TypeFilter, center, filter_by_type,
};

use crate::map_view::MapView;
use crate::sidebar;

pub struct FlowPywrApp {
    data_dir: PathBuf,
    view_state: ViewState,
    scene: MapScene,
    animator: FlowAnimator,
    loader: LoaderWorker,
    boundaries: BTreeMap<ModelKey, FeatureCollection>,
    nodes: Vec<Node>,
    edges: Vec<Edge>,
    title: String,
    map_view: MapView,
    status: Option<String>,
    // inputs as of the last effect pass
    last_selection: Vec<ModelKey>,
    last_filter: TypeFilter,
    last_style: MapStyle,
    last_show_flow: bool,
    dataset_dirty: bool,
}

impl FlowPywrApp {
    pub fn new(_cc: &eframe::CreationContext<'_>) -> Self {
        let data_dir = std::env::args()
            .nth(1)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("sample-data"));

        let view_state = ViewState::new();
        let mut scene = MapScene::new(view_state.style());
        // local styles resolve immediately; the gate still orders layer adds
        scene.finish_style_load();
        let boundaries = load_boundaries(&data_dir, ModelKey::ALL);

        Self {
            data_dir,
            last_filter: view_state.type_filter(),
            last_style: view_state.style(),
            last_show_flow: view_state.show_flow(),
            view_state,
            scene,
            animator: FlowAnimator::new(),
            loader: LoaderWorker::new(),
            boundaries,
            nodes: Vec::new(),
            edges: Vec::new(),
            title: String::new(),
            map_view: MapView::default(),
            status: None,
            last_selection: Vec::new(),
            dataset_dirty: false,
        }
    }

    /// Re-run whichever sync effects had their inputs change since the last
    /// frame. Most recent write wins; the syncs themselves are full-replace
    /// or idempotent, so re-running one never stacks state.
    fn run_effects(&mut self) {
        let selection: Vec<ModelKey> = self.view_state.selected_models().iter().copied().collect();
        let selection_changed = selection != self.last_selection;
        let filter_changed = self.view_state.type_filter() != self.last_filter;
        let style_changed = self.view_state.style() != self.last_style;
        let flow_changed = self.view_state.show_flow() != self.last_show_flow;

        if selection_changed {
            self.loader.request(self.data_dir.clone(), selection.clone());
        }
        if style_changed {
            // wipes every custom source/layer/marker; everything re-adds below
            self.scene.set_style(self.view_state.style());
            self.scene.finish_style_load();
        }

        if self.dataset_dirty || filter_changed || style_changed {
            let visible = filter_by_type(&self.nodes, self.view_state.type_filter());
            sync_markers(&mut self.scene, visible.into_iter());
        }
        if selection_changed || style_changed {
            if let Err(err) = sync_boundaries(
                &mut self.scene,
                self.view_state.selected_models(),
                &self.boundaries,
            ) {
                self.status = Some(format!("Boundary sync failed: {err}"));
            }
        }
        if self.dataset_dirty || flow_changed || style_changed {
            if let Err(err) = self.animator.rebuild(
                &mut self.scene,
                self.view_state.show_flow(),
                &self.edges,
                &self.nodes,
            ) {
                self.status = Some(format!("Flow rebuild failed: {err}"));
            }
        }

        self.last_selection = selection;
        self.last_filter = self.view_state.type_filter();
        self.last_style = self.view_state.style();
        self.last_show_flow = self.view_state.show_flow();
        self.dataset_dirty = false;
    }

    fn details_panel(&self, ctx: &egui::Context) {
        let Some(node) = self.view_state.hovered().cloned() else {
            return;
        };
        egui::TopBottomPanel::bottom("node_details")
            .resizable(false)
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.strong(&node.name);
                    ui.label(node.node_type.label());
                    match node.position() {
                        Some(p) => ui.monospace(p.to_string()),
                        None => ui.monospace("no coordinates"),
                    };
                });
                if node.attributes.is_empty() {
                    return;
                }
                TableBuilder::new(ui)
                    .striped(true)
                    .column(Column::auto().at_least(160.0))
                    .column(Column::remainder())
                    .header(18.0, |mut header| {
                        header.col(|ui| {
                            ui.strong("Attribute");
                        });
                        header.col(|ui| {
                            ui.strong("Value");
                        });
                    })
                    .body(|mut body| {
                        for (key, value) in &node.attributes {
                            body.row(16.0, |mut row| {
                                row.col(|ui| {
                                    ui.label(key);
                                });
                                row.col(|ui| {
                                    ui.monospace(value.to_string());
                                });
                            });
                        }
                    });
            });
    }
}

impl eframe::App for FlowPywrApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // apply the newest finished load; stale generations were already
        // dropped by the worker
        if let Some(set) = self.loader.poll() {
            self.nodes = set.combined_nodes();
            self.edges = set.combined_edges();
            self.title = set.title;
            self.map_view.recenter(center(&self.nodes));
            self.dataset_dirty = true;
        }

        egui::SidePanel::left("controls")
            .default_width(240.0)
            .show(ctx, |ui| {
                sidebar::show(
                    ui,
                    &mut self.view_state,
                    &self.title,
                    self.status.as_deref(),
                    self.loader.is_loading(),
                );
            });

        self.run_effects();

        if self.animator.is_running() {
            let now_ms = ctx.input(|i| i.time) * 1000.0;
            if let Err(err) = self.animator.tick(&mut self.scene, now_ms) {
                self.status = Some(format!("Flow animation failed: {err}"));
            }
            ctx.request_repaint();
        }

        self.details_panel(ctx);

        let hover = egui::CentralPanel::default()
            .show(ctx, |ui| self.map_view.show(ui, &self.scene))
            .inner;
        if let Some(event) = hover {
            self.view_state.apply_hover(event);
        }
    }
}

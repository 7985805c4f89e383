//! The map control panel: the sole writer of model selection, type filter,
//! style, and flow display.

use fp_map::{MapStyle, ViewState};
use fp_model::{ModelKey, NodeType, TypeFilter};

pub fn show(
    ui: &mut egui::Ui,
    view_state: &mut ViewState,
    title: &str,
    status: Option<&str>,
    loading: bool,
) {
    ui.heading("FlowPywr");
    if !title.is_empty() {
        ui.label(title);
    }
    ui.separator();

    ui.label("Models");
    for key in ModelKey::ALL {
        let mut selected = view_state.is_selected(key);
        if ui.checkbox(&mut selected, key.display_name()).changed() {
            view_state.set_model_selected(key, selected);
        }
    }
    ui.separator();

    let mut filter = view_state.type_filter();
    egui::ComboBox::from_label("Component type")
        .selected_text(filter.label())
        .show_ui(ui, |ui| {
            ui.selectable_value(&mut filter, TypeFilter::All, "All");
            for node_type in NodeType::ALL {
                ui.selectable_value(&mut filter, TypeFilter::Only(node_type), node_type.label());
            }
        });
    if filter != view_state.type_filter() {
        view_state.set_type_filter(filter);
    }
    ui.separator();

    ui.label("Map style");
    for style in MapStyle::ALL {
        if ui
            .radio(view_state.style() == style, style.label())
            .on_hover_text(style.url())
            .clicked()
        {
            view_state.set_style(style);
        }
    }
    ui.separator();

    let mut show_flow = view_state.show_flow();
    if ui.checkbox(&mut show_flow, "Show flow").changed() {
        view_state.set_show_flow(show_flow);
    }

    ui.add_space(8.0);
    if loading {
        ui.horizontal(|ui| {
            ui.spinner();
            ui.label("Loading models…");
        });
    }
    if let Some(message) = status {
        ui.colored_label(ui.visuals().warn_fg_color, message);
    }
}

use bevy::prelude::{EventWriter, Res, ResMut, Time};
use bevy_egui::{egui, EguiContexts};

use crate::app::events::SelectionChanged;
use crate::sim::SimState;
use crate::view::ViewState;

pub fn ui_panel(
    mut contexts: EguiContexts,
    time: Res<Time>,
    mut st: ResMut<SimState>,
    view: Res<ViewState>,
    mut out: EventWriter<SelectionChanged>,
) {
    egui::SidePanel::left("left").show(contexts.ctx_mut(), |ui| {
        ui.heading("DagScope");
        ui.label(format!("blocks: {}", st.store.len()));
        ui.label(format!("edges drawn: {}", st.buffers.edge_count));
        if let Some(depth) = st.store.max_depth() {
            ui.label(format!("tip depth: {depth}"));
        }
        ui.separator();

        ui.checkbox(&mut st.paused, "Pause generation");
        ui.label("Floating and particle drift keep running while paused.");

        ui.add_space(8.0);
        let mut interval = st.cfg.row_interval_ms as i32;
        ui.add(egui::Slider::new(&mut interval, 200..=3000).text("row interval (ms)"));
        st.cfg.row_interval_ms = interval as f64;

        let mut fresh = st.cfg.fresh_ms as i32;
        ui.add(egui::Slider::new(&mut fresh, 500..=6000).text("highlight (ms)"));
        st.cfg.fresh_ms = fresh as f64;

        ui.add_space(8.0);
        ui.horizontal(|ui| {
            ui.checkbox(&mut st.cfg.show_edges, "Edges");
            ui.checkbox(&mut st.cfg.show_particles, "Particles");
        });

        ui.add_space(8.0);
        ui.separator();
        ui.heading("Selection");
        match &view.selected {
            Some(sel) => {
                ui.label(format!("hash: {}", sel.hash));
                ui.label(format!("depth: {}", sel.depth));
                ui.label(format!("lane: {}", sel.lane));
                ui.label(format!("parents: {}", sel.parent_count));
                ui.label(format!("color: {}", sel.color_hex));
            }
            None => {
                ui.label("(none) — click a block");
            }
        }

        ui.add_space(10.0);
        ui.separator();
        if ui.button("Reset scene").clicked() {
            let now_ms = time.elapsed_seconds_f64() * 1000.0;
            st.reset(now_ms);
            // The previously selected block no longer exists.
            out.send(SelectionChanged(None));
        }
        if ui.button("Save settings").clicked() {
            if let Err(err) = crate::util::config::save(&st.cfg) {
                tracing::warn!(%err, "failed to save settings");
            }
        }
    });
}

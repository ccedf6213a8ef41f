use bevy::prelude::{EventWriter, Res, ResMut, Time};
use bevy_egui::{egui, EguiContexts};

use crate::app::events::SelectionChanged;
use crate::sim::SimState;

pub fn handle_shortcuts(
    mut contexts: EguiContexts,
    time: Res<Time>,
    mut st: ResMut<SimState>,
    mut out: EventWriter<SelectionChanged>,
) {
    let ctx = contexts.ctx_mut();
    if ctx.wants_keyboard_input() {
        return;
    }

    if ctx.input(|i| i.key_pressed(egui::Key::Space)) {
        st.paused = !st.paused;
        tracing::debug!(paused = st.paused, "pause toggled");
    }
    if ctx.input(|i| i.key_pressed(egui::Key::R)) {
        st.reset(time.elapsed_seconds_f64() * 1000.0);
        // The previously selected block no longer exists.
        out.send(SelectionChanged(None));
    }
}

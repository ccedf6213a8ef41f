use bevy::prelude::*;

use dagscope_core::NodeSummary;

use crate::app::events::SelectionChanged;

/// View-side ownership domain. Holds only the last-reported selection; the
/// simulation never reads it and only reaches it through `SelectionChanged`.
#[derive(Resource, Default)]
pub struct ViewState {
    pub selected: Option<NodeSummary>,
}

pub fn apply_selection(mut view: ResMut<ViewState>, mut ev: EventReader<SelectionChanged>) {
    for SelectionChanged(sel) in ev.read() {
        match sel {
            Some(s) => tracing::debug!(hash = %s.hash, depth = s.depth, "block selected"),
            None => tracing::debug!("selection cleared"),
        }
        view.selected = sel.clone();
    }
}

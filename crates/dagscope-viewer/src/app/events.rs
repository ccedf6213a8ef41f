use bevy::prelude::Event;
use dagscope_core::NodeSummary;

/// One-directional selection report from the picking system to view state.
/// `None` means the click missed all geometry and the selection is cleared.
#[derive(Event)]
pub struct SelectionChanged(pub Option<NodeSummary>);

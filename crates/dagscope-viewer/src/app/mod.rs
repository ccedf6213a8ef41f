use bevy::prelude::*;

use crate::app::events::SelectionChanged;
use crate::sim::SimState;
use crate::util::config;
use crate::view::ViewState;

pub mod events;

pub struct DagScopePlugin;

impl Plugin for DagScopePlugin {
    fn build(&self, app: &mut App) {
        let cfg = config::load_or_default();
        let st = SimState::new(cfg, 0.0);
        app.add_event::<SelectionChanged>()
            .insert_resource(st)
            .insert_resource(ViewState::default())
            .add_systems(
                Startup,
                (crate::render::setup_scene, crate::render::spawn_instance_slots),
            )
            .add_systems(
                Update,
                (
                    crate::ui::ui_panel,
                    crate::ui::handle_shortcuts,
                    crate::sim::tick_simulation,
                    crate::render::pick_on_click,
                    crate::view::apply_selection,
                    crate::render::draw_scene,
                    crate::render::on_resize,
                ),
            );
    }
}

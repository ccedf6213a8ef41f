mod app;
mod render;
mod sim;
mod ui;
mod util;
mod view;

use bevy::prelude::*;
use bevy_egui::EguiPlugin;

fn init_tracing() {
    let _ = tracing_subscriber::fmt::try_init();
}

fn main() {
    init_tracing();
    tracing::info!("starting dagscope viewer");

    App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "DagScope".into(),
                ..default()
            }),
            ..default()
        }))
        .add_plugins(EguiPlugin)
        .add_plugins(app::DagScopePlugin)
        .run();
}

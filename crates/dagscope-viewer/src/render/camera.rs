use bevy::prelude::*;
use bevy::window::WindowResized;

pub fn setup_scene(mut commands: Commands) {
    commands.spawn(PointLightBundle {
        point_light: PointLight {
            intensity: 5000.0,
            shadows_enabled: true,
            ..default()
        },
        transform: Transform::from_xyz(8.0, 14.0, 8.0),
        ..default()
    });

    commands.spawn(Camera3dBundle {
        transform: Transform::from_xyz(0.0, 4.0, 16.0).looking_at(Vec3::ZERO, Vec3::Y),
        ..default()
    });
}

/// Resize concerns the camera/viewport only (Bevy rebuilds the projection
/// itself); the store and the buffers are never touched from here.
pub fn on_resize(mut events: EventReader<WindowResized>) {
    for e in events.read() {
        tracing::debug!(width = e.width, height = e.height, "viewport resized");
    }
}

use bevy::prelude::*;
use dagscope_core::MAX_INSTANCES;

use crate::render::buffers::NODE_MESH_RADIUS;
use crate::sim::SimState;

/// Marker tying an entity to an instance-buffer slot.
#[derive(Component)]
pub struct InstanceSlot(pub usize);

/// One sphere entity per buffer slot, spawned once and reused; unused slots
/// stay hidden instead of being despawned.
pub fn spawn_instance_slots(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut mats: ResMut<Assets<StandardMaterial>>,
) {
    let sphere = meshes.add(Sphere::new(NODE_MESH_RADIUS));
    for i in 0..MAX_INSTANCES {
        let mat = mats.add(StandardMaterial::default());
        commands.spawn((
            PbrBundle {
                mesh: sphere.clone(),
                material: mat,
                visibility: Visibility::Hidden,
                ..default()
            },
            InstanceSlot(i),
        ));
    }
}

/// Copy the flat buffers into the slot entities and stroke edges and
/// particles with gizmos. Nothing is spawned or despawned per frame.
pub fn draw_scene(
    st: Res<SimState>,
    mut mats: ResMut<Assets<StandardMaterial>>,
    mut slots: Query<(
        &InstanceSlot,
        &mut Transform,
        &mut Visibility,
        &Handle<StandardMaterial>,
    )>,
    mut gizmos: Gizmos,
) {
    let bufs = &st.buffers;

    for (slot, mut tf, mut vis, mat_handle) in slots.iter_mut() {
        if slot.0 < bufs.instance_count {
            *tf = Transform::from_matrix(bufs.transforms[slot.0]);
            *vis = Visibility::Visible;
            if let Some(m) = mats.get_mut(mat_handle) {
                let [r, g, b, _] = bufs.colors[slot.0];
                m.base_color = Color::srgb(r.min(1.0), g.min(1.0), b.min(1.0));
                m.emissive = Color::srgb(r, g, b).into();
            }
        } else {
            *vis = Visibility::Hidden;
        }
    }

    if st.cfg.show_edges {
        for s in 0..bufs.edge_count {
            let [a, b] = bufs.edge_segments[s];
            let [r, g, bl, alpha] = bufs.edge_colors[s];
            gizmos.line(a, b, Color::srgba(r, g, bl, alpha));
        }
    }

    if st.cfg.show_particles {
        let tint = Color::srgba(0.65, 0.78, 1.0, 0.35);
        for p in st.particles.positions.iter() {
            gizmos.line(*p - Vec3::Y * 0.06, *p + Vec3::Y * 0.06, tint);
        }
    }
}

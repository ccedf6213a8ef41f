use bevy::prelude::*;
use bevy_egui::EguiContexts;
use dagscope_core::{color_hex, NodeSummary};

use crate::app::events::SelectionChanged;
use crate::render::buffers::{RenderBuffers, NODE_MESH_RADIUS};
use crate::sim::SimState;

pub struct Hit {
    pub index: usize,
    pub distance: f32,
}

/// Nearest ray-sphere intersection over the instance transform buffer.
/// Reads only the buffers written by the most recent sync, so the index
/// mapping back to `residents()` is self-consistent within that frame.
pub fn pick_instance(origin: Vec3, dir: Vec3, buffers: &RenderBuffers) -> Option<Hit> {
    let dir = dir.normalize_or_zero();
    if dir == Vec3::ZERO {
        return None;
    }

    let mut best: Option<Hit> = None;
    for i in 0..buffers.instance_count {
        let tf = &buffers.transforms[i];
        let center = tf.w_axis.truncate();
        let radius = tf.x_axis.truncate().length() * NODE_MESH_RADIUS;

        let oc = origin - center;
        let b = oc.dot(dir);
        let c = oc.length_squared() - radius * radius;
        let disc = b * b - c;
        if disc < 0.0 {
            continue;
        }
        // Near root first; from inside the sphere it is negative, so take
        // the far root before giving up.
        let mut t = -b - disc.sqrt();
        if t < 0.0 {
            t = -b + disc.sqrt();
        }
        if t < 0.0 {
            continue;
        }
        if best.as_ref().map(|h| t < h.distance).unwrap_or(true) {
            best = Some(Hit { index: i, distance: t });
        }
    }
    best
}

/// Externally-reported metadata for the block in instance slot `index`.
pub fn summarize(st: &SimState, index: usize) -> Option<NodeSummary> {
    let node = st.store.residents().get(index)?;
    Some(NodeSummary {
        hash: node.hash.clone(),
        depth: node.depth,
        parent_count: node.parents.len(),
        lane: node.lane,
        color_hex: color_hex(node.color),
    })
}

/// Left click → camera ray → instance test. A miss reports `None`, which
/// clears any previous selection downstream. Picking never mutates the sim.
pub fn pick_on_click(
    buttons: Res<ButtonInput<MouseButton>>,
    windows: Query<&Window>,
    cam_q: Query<(&Camera, &GlobalTransform)>,
    mut contexts: EguiContexts,
    st: Res<SimState>,
    mut out: EventWriter<SelectionChanged>,
) {
    if !buttons.just_pressed(MouseButton::Left) {
        return;
    }
    if contexts.ctx_mut().wants_pointer_input() {
        return;
    }
    let Ok(window) = windows.get_single() else {
        return;
    };
    let Some(cursor) = window.cursor_position() else {
        return;
    };
    let Ok((camera, cam_tf)) = cam_q.get_single() else {
        return;
    };
    let Some(ray) = camera.viewport_to_world(cam_tf, cursor) else {
        return;
    };

    let sel = pick_instance(ray.origin, *ray.direction, &st.buffers)
        .and_then(|hit| summarize(&st, hit.index));
    match &sel {
        Some(s) => tracing::debug!(hash = %s.hash, "pick hit"),
        None => tracing::debug!("pick miss"),
    }
    out.send(SelectionChanged(sel));
}

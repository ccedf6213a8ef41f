use bevy::prelude::{Mat4, Quat, Vec3};
use dagscope_core::{MAX_INSTANCES, MAX_PARENTS};

use crate::sim::SimState;

pub const MAX_EDGES: usize = MAX_INSTANCES * MAX_PARENTS;

/// Radius of the instanced node mesh before per-instance scaling.
pub const NODE_MESH_RADIUS: f32 = 0.5;

const SETTLED_SCALE: f32 = 0.52;
const FRESH_SCALE: f32 = 0.72;
const FRESH_PULSE: f32 = 0.16;
const BOB_AMPLITUDE: f32 = 0.18;
const FRESH_BRIGHTNESS: f32 = 2.4;
const SETTLED_BRIGHTNESS: f32 = 0.8;

const FRESH_EDGE: [f32; 4] = [0.55, 0.95, 1.0, 0.85];
const SETTLED_EDGE: [f32; 4] = [0.45, 0.55, 0.85, 0.25];

/// Flat per-instance and per-segment arrays consumed by the draw systems.
/// Preallocated once; slot i always corresponds to `residents()[i]` as of
/// the last sync.
pub struct RenderBuffers {
    pub transforms: Vec<Mat4>,
    pub colors: Vec<[f32; 4]>,
    pub instance_count: usize,
    pub edge_segments: Vec<[Vec3; 2]>,
    pub edge_colors: Vec<[f32; 4]>,
    pub edge_count: usize,
}

impl RenderBuffers {
    pub fn new() -> Self {
        Self {
            transforms: vec![Mat4::IDENTITY; MAX_INSTANCES],
            colors: vec![[0.0; 4]; MAX_INSTANCES],
            instance_count: 0,
            edge_segments: vec![[Vec3::ZERO; 2]; MAX_EDGES],
            edge_colors: vec![[0.0; 4]; MAX_EDGES],
            edge_count: 0,
        }
    }
}

impl Default for RenderBuffers {
    fn default() -> Self {
        Self::new()
    }
}

/// A non-finite component written into a GPU buffer would poison the
/// scene-wide bounding volumes used for culling, so clamp at the write site.
fn finite_or_zero(v: Vec3) -> Vec3 {
    Vec3::new(
        if v.x.is_finite() { v.x } else { 0.0 },
        if v.y.is_finite() { v.y } else { 0.0 },
        if v.z.is_finite() { v.z } else { 0.0 },
    )
}

impl SimState {
    /// Project the resident window and the particle field into the flat
    /// buffers. Runs once per tick whether or not a row was inserted.
    pub fn sync_buffers(&mut self, now_ms: f64, dt: f32) {
        let fresh_ms = self.cfg.fresh_ms;
        let residents = self.store.residents();
        let count = residents.len().min(MAX_INSTANCES);

        for (i, node) in residents.iter().take(count).enumerate() {
            let phase = node.id.0 as f64;
            let fresh = now_ms - node.birth_ms < fresh_ms;

            let bob = ((now_ms * 0.0016 + phase * 1.7).sin() as f32) * BOB_AMPLITUDE;
            let scale = if fresh {
                FRESH_SCALE + FRESH_PULSE * ((now_ms * 0.006 + phase).sin() as f32)
            } else {
                SETTLED_SCALE
            };
            let spin = Quat::from_rotation_y(((now_ms * 0.0005 + phase * 0.9)
                % std::f64::consts::TAU) as f32);
            let pos = finite_or_zero(node.position + Vec3::Y * bob);

            self.buffers.transforms[i] =
                Mat4::from_scale_rotation_translation(Vec3::splat(scale), spin, pos);

            let brightness = if fresh {
                FRESH_BRIGHTNESS
            } else {
                SETTLED_BRIGHTNESS
            };
            self.buffers.colors[i] = [
                node.color[0] * brightness,
                node.color[1] * brightness,
                node.color[2] * brightness,
                1.0,
            ];
        }
        self.buffers.instance_count = count;

        // Edges: only parents still resident contribute a segment.
        let mut seg = 0usize;
        for node in residents.iter().take(count) {
            let fresh = now_ms - node.birth_ms < fresh_ms;
            let tint = if fresh { FRESH_EDGE } else { SETTLED_EDGE };
            for pid in &node.parents {
                let Some(parent_pos) = self.store.position_of(*pid) else {
                    continue; // aged out of the window; dangling by design
                };
                if seg >= MAX_EDGES {
                    break;
                }
                self.buffers.edge_segments[seg] =
                    [finite_or_zero(parent_pos), finite_or_zero(node.position)];
                self.buffers.edge_colors[seg] = tint;
                seg += 1;
            }
        }
        // Zero the stale tail so a shrinking graph never leaves geometry
        // behind, then set the draw range to exactly what was written.
        for s in seg..self.buffers.edge_count {
            self.buffers.edge_segments[s] = [Vec3::ZERO; 2];
            self.buffers.edge_colors[s] = [0.0; 4];
        }
        self.buffers.edge_count = seg;

        self.particles.advance(dt);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::testutil::{empty_sim, make_node};

    #[test]
    fn sync_writes_one_slot_per_resident() {
        let mut st = empty_sim();
        for k in 0..5u32 {
            st.add_row(k as f64 * 900.0);
        }
        st.sync_buffers(5000.0, 0.016);

        assert_eq!(st.buffers.instance_count, st.store.len());
    }

    #[test]
    fn non_finite_positions_are_clamped_before_writing() {
        let mut st = empty_sim();
        st.store.append(vec![
            make_node(0, Vec3::new(f32::NAN, 1.0, f32::INFINITY), &[], 0, 0.0),
            make_node(1, Vec3::new(0.5, f32::NEG_INFINITY, -0.5), &[0], 1, 0.0),
        ]);
        st.sync_buffers(100.0, 0.016);

        for i in 0..st.buffers.instance_count {
            let t = st.buffers.transforms[i].w_axis;
            assert!(t.x.is_finite() && t.y.is_finite() && t.z.is_finite());
        }
        for s in 0..st.buffers.edge_count {
            for p in st.buffers.edge_segments[s] {
                assert!(p.x.is_finite() && p.y.is_finite() && p.z.is_finite());
            }
        }
    }

    #[test]
    fn dangling_parent_links_draw_no_segment() {
        let mut st = empty_sim();
        st.store
            .append(vec![make_node(5, Vec3::ZERO, &[999, 1000], 0, 0.0)]);
        st.sync_buffers(100.0, 0.016);

        assert_eq!(st.buffers.edge_count, 0);
    }

    #[test]
    fn evicted_parent_halves_the_segment_count() {
        // Child links two resident parents; evicting one must leave exactly
        // one drawn segment for that child.
        let mut st = empty_sim();
        st.store.append(vec![
            make_node(0, Vec3::new(-1.0, 0.0, 0.0), &[], 0, 0.0),
            make_node(1, Vec3::new(1.0, 0.0, 0.0), &[], 0, 0.0),
            make_node(2, Vec3::new(0.0, 1.0, 0.0), &[0, 1], 1, 0.0),
        ]);
        st.sync_buffers(100.0, 0.016);
        assert_eq!(st.buffers.edge_count, 2);

        st.store.nodes.remove(0);
        st.sync_buffers(200.0, 0.016);
        assert_eq!(st.buffers.edge_count, 1);
        // The stale second slot was zeroed.
        assert_eq!(st.buffers.edge_segments[1], [Vec3::ZERO; 2]);
        assert_eq!(st.buffers.edge_colors[1], [0.0; 4]);
    }

    #[test]
    fn fresh_blocks_outshine_settled_ones() {
        let mut st = empty_sim();
        st.store.append(vec![
            make_node(0, Vec3::ZERO, &[], 0, 0.0),
            make_node(1, Vec3::X, &[], 0, 9000.0),
        ]);
        st.sync_buffers(10_000.0, 0.016);

        // Same palette entry, so brightness alone separates them.
        let settled = st.buffers.colors[0][0];
        let fresh = st.buffers.colors[1][0];
        assert!(fresh > settled * 2.0);
    }

    #[test]
    fn fresh_blocks_render_larger_than_settled() {
        let mut st = empty_sim();
        st.store.append(vec![
            make_node(0, Vec3::ZERO, &[], 0, 0.0),
            make_node(1, Vec3::X, &[], 0, 9000.0),
        ]);
        st.sync_buffers(10_000.0, 0.016);

        let scale_of = |m: &Mat4| m.x_axis.truncate().length();
        assert!(scale_of(&st.buffers.transforms[1]) > scale_of(&st.buffers.transforms[0]));
    }
}

use bevy::prelude::Vec3;
use dagscope_core::{NodeId, MAX_PARENTS};
use rand::Rng;
use smallvec::SmallVec;

use crate::sim::store::Node;
use crate::sim::SimState;

/// How many rows below the new one a parent may sit.
const PARENT_WINDOW: u32 = 3;

const PALETTE: [[f32; 3]; 6] = [
    [0.36, 0.82, 1.00],
    [0.55, 0.47, 1.00],
    [0.27, 0.94, 0.76],
    [1.00, 0.62, 0.36],
    [0.95, 0.42, 0.72],
    [0.82, 0.89, 0.35],
];

impl SimState {
    /// Generate one row of 1..=3 blocks on top of the current store, then
    /// trim to capacity and recenter the whole resident window vertically.
    pub fn add_row(&mut self, now_ms: f64) {
        let new_depth = self.store.max_depth().map_or(0, |d| d + 1);
        let lanes = self.cfg.lanes.max(1);
        let count = self.rng.gen_range(1..=3u32).min(lanes);

        let mut used_lanes: SmallVec<[u32; 3]> = SmallVec::new();
        let mut row = Vec::with_capacity(count as usize);

        for _ in 0..count {
            // Lanes are unique within the row; reject and resample on collision.
            let lane = loop {
                let l = self.rng.gen_range(0..lanes);
                if !used_lanes.contains(&l) {
                    break l;
                }
            };
            used_lanes.push(lane);

            let parents = self.select_parents(new_depth, lane);
            let x = (lane as f32 - lanes as f32 / 2.0) * self.cfg.lane_spacing
                + self.rng.gen_range(-0.35..0.35);
            let z = self.rng.gen_range(-1.2..1.2);

            let color = PALETTE[self.rng.gen_range(0..PALETTE.len())];
            let hash = format!("{:08x}", self.rng.gen::<u32>());
            let id = self.store.alloc_id();

            row.push(Node {
                id,
                // y is provisional; the recentering pass below rewrites it.
                position: Vec3::new(x, 0.0, z),
                parents,
                depth: new_depth,
                lane,
                color,
                hash,
                birth_ms: now_ms,
            });
        }

        tracing::debug!(depth = new_depth, count = row.len(), "row added");
        self.store.append(row);
        self.store.trim_to_capacity();
        self.recenter();
    }

    /// Pick up to three parents from the rows directly below, closest lane
    /// first. An empty candidate pool means a parentless block, not an error.
    fn select_parents(&mut self, new_depth: u32, lane: u32) -> SmallVec<[NodeId; MAX_PARENTS]> {
        let mut candidates: Vec<(u32, NodeId)> = self
            .store
            .residents()
            .iter()
            .filter(|n| n.depth < new_depth && n.depth + PARENT_WINDOW >= new_depth)
            .map(|n| (n.lane.abs_diff(lane), n.id))
            .collect();
        // Stable sort: lane distance is the only tie-break, ties keep
        // insertion order.
        candidates.sort_by_key(|(dist, _)| *dist);

        let want = self.rng.gen_range(1..=MAX_PARENTS);
        let mut parents: SmallVec<[NodeId; MAX_PARENTS]> = SmallVec::new();
        for (_, id) in candidates {
            if parents.len() >= want {
                break;
            }
            if !parents.contains(&id) {
                parents.push(id);
            }
        }
        parents
    }

    /// Re-derive y for every resident from the mean depth of the resident
    /// window, so the visible cluster stays centered as the window slides.
    fn recenter(&mut self) {
        let residents = self.store.residents();
        if residents.is_empty() {
            return;
        }
        let mean =
            residents.iter().map(|n| n.depth as f32).sum::<f32>() / residents.len() as f32;
        let scale = self.cfg.vertical_scale;
        for n in self.store.residents_mut() {
            n.position.y = (n.depth as f32 - mean) * scale;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::testutil::empty_sim;
    use dagscope_core::MAX_INSTANCES;
    use std::collections::HashMap;

    #[test]
    fn first_row_has_depth_zero_and_no_parents() {
        let mut st = empty_sim();
        st.add_row(0.0);

        assert!(!st.store.is_empty());
        for n in st.store.residents() {
            assert_eq!(n.depth, 0);
            assert!(n.parents.is_empty());
        }
    }

    #[test]
    fn row_depths_are_strictly_monotonic() {
        let mut st = empty_sim();
        for k in 0..12u32 {
            let before = st.store.max_depth();
            st.add_row(k as f64 * 900.0);
            let expected = before.map_or(0, |d| d + 1);
            let row_depth = st.store.max_depth().unwrap();
            assert_eq!(row_depth, expected);
        }
    }

    #[test]
    fn lanes_are_unique_within_each_row() {
        let mut st = empty_sim();
        for k in 0..40u32 {
            st.add_row(k as f64 * 900.0);
        }

        let mut by_depth: HashMap<u32, Vec<u32>> = HashMap::new();
        for n in st.store.residents() {
            by_depth.entry(n.depth).or_default().push(n.lane);
        }
        for (_, mut lanes) in by_depth {
            let total = lanes.len();
            lanes.sort_unstable();
            lanes.dedup();
            assert_eq!(lanes.len(), total);
        }
    }

    #[test]
    fn parents_come_from_the_three_rows_below() {
        let mut st = empty_sim();
        for k in 0..30u32 {
            st.add_row(k as f64 * 900.0);
        }

        let depth_of: HashMap<_, _> = st
            .store
            .residents()
            .iter()
            .map(|n| (n.id, n.depth))
            .collect();
        for n in st.store.residents() {
            assert!(n.parents.len() <= MAX_PARENTS);
            let mut seen = n.parents.to_vec();
            seen.sort_unstable();
            seen.dedup();
            assert_eq!(seen.len(), n.parents.len(), "duplicate parent");
            for pid in &n.parents {
                // Parents may have been evicted; only resident ones are
                // checkable, and those must sit in [depth-3, depth).
                if let Some(pd) = depth_of.get(pid) {
                    assert!(*pd < n.depth);
                    assert!(*pd + PARENT_WINDOW >= n.depth);
                }
            }
        }
    }

    #[test]
    fn recenter_keeps_mean_y_near_zero() {
        let mut st = empty_sim();
        for k in 0..60u32 {
            st.add_row(k as f64 * 900.0);
        }

        let residents = st.store.residents();
        let mean_y: f32 =
            residents.iter().map(|n| n.position.y).sum::<f32>() / residents.len() as f32;
        assert!(mean_y.abs() < 1e-3, "mean y was {mean_y}");
    }

    #[test]
    fn ninety_created_leaves_eighty_resident_without_the_oldest() {
        // Scenario: grow past the cap and check the eviction edge.
        let mut st = empty_sim();
        while st.store.created_total() < 90 {
            st.add_row(st.store.created_total() as f64 * 300.0);
        }

        assert_eq!(st.store.len(), MAX_INSTANCES);
        let evicted = st.store.created_total() - MAX_INSTANCES as u64;
        assert!(evicted >= 10);
        for old in 0..10u64 {
            assert!(!st.store.contains(NodeId(old)));
        }
        for n in st.store.residents() {
            assert!(n.id.0 >= evicted);
        }
    }
}

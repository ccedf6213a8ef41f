use bevy::prelude::Vec3;
use dagscope_core::{NodeId, MAX_INSTANCES, MAX_PARENTS};
use smallvec::SmallVec;

/// One block in the synthetic lattice. Immutable after creation except for
/// the y-recentering pass, which rewrites `position.y` in place.
#[derive(Debug, Clone)]
pub struct Node {
    pub id: NodeId,
    pub position: Vec3,
    /// Parent ids may reference blocks that have since been evicted; such
    /// links are dangling by design and simply draw no edge.
    pub parents: SmallVec<[NodeId; MAX_PARENTS]>,
    pub depth: u32,
    pub lane: u32,
    pub color: [f32; 3],
    /// Short hex string, display only.
    pub hash: String,
    pub birth_ms: f64,
}

/// Append-only, size-bounded block store. Insertion order (which tracks
/// depth) is the stable order used as the instance-slot mapping for the
/// render buffers: slot i always corresponds to `residents()[i]` as of the
/// last sync.
#[derive(Default)]
pub struct GraphStore {
    pub nodes: Vec<Node>,
    pub next_id: u64,
}

impl GraphStore {
    pub fn alloc_id(&mut self) -> NodeId {
        let id = NodeId(self.next_id);
        self.next_id += 1;
        id
    }

    pub fn append(&mut self, nodes: Vec<Node>) {
        self.nodes.extend(nodes);
    }

    /// Drop the oldest-inserted surplus until the cap holds.
    pub fn trim_to_capacity(&mut self) {
        if self.nodes.len() > MAX_INSTANCES {
            let surplus = self.nodes.len() - MAX_INSTANCES;
            self.nodes.drain(..surplus);
        }
    }

    pub fn residents(&self) -> &[Node] {
        &self.nodes
    }

    pub fn residents_mut(&mut self) -> &mut [Node] {
        &mut self.nodes
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Total blocks ever created, including evicted ones.
    pub fn created_total(&self) -> u64 {
        self.next_id
    }

    pub fn max_depth(&self) -> Option<u32> {
        self.nodes.iter().map(|n| n.depth).max()
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.iter().any(|n| n.id == id)
    }

    /// Linear scan; the resident window never exceeds `MAX_INSTANCES`.
    pub fn position_of(&self, id: NodeId) -> Option<Vec3> {
        self.nodes.iter().find(|n| n.id == id).map(|n| n.position)
    }

    pub fn clear(&mut self) {
        self.nodes.clear();
        self.next_id = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::testutil::make_node;

    fn filled(count: usize) -> GraphStore {
        let mut store = GraphStore::default();
        for _ in 0..count {
            let id = store.alloc_id();
            store.append(vec![make_node(id.0, Vec3::ZERO, &[], id.0 as u32, 0.0)]);
        }
        store
    }

    #[test]
    fn trim_drops_oldest_inserted_first() {
        let mut store = filled(MAX_INSTANCES + 7);
        store.trim_to_capacity();

        assert_eq!(store.len(), MAX_INSTANCES);
        for old in 0..7u64 {
            assert!(!store.contains(NodeId(old)));
        }
        assert!(store.contains(NodeId(7)));
    }

    #[test]
    fn residents_keep_insertion_order_across_trim() {
        let mut store = filled(MAX_INSTANCES + 3);
        store.trim_to_capacity();

        let ids: Vec<u64> = store.residents().iter().map(|n| n.id.0).collect();
        let mut sorted = ids.clone();
        sorted.sort_unstable();
        assert_eq!(ids, sorted);
    }

    #[test]
    fn ids_are_monotonic_and_survive_clear() {
        let mut store = GraphStore::default();
        let a = store.alloc_id();
        let b = store.alloc_id();
        assert!(a < b);

        store.clear();
        assert_eq!(store.alloc_id(), NodeId(0));
    }

    #[test]
    fn position_of_absent_id_is_none() {
        let store = filled(3);
        assert!(store.position_of(NodeId(999)).is_none());
    }
}

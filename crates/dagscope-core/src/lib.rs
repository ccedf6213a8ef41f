use serde::{Deserialize, Serialize};

/// Monotonic block identifier. Ids are never reused, so a reference to an
/// evicted block simply resolves to nothing.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub u64);

/// Hard cap on resident blocks; the render buffers are sized against this.
pub const MAX_INSTANCES: usize = 80;

/// A block links to at most this many parents.
pub const MAX_PARENTS: usize = 3;

/// What the viewer reports outward when a block is picked.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NodeSummary {
    pub hash: String,
    pub depth: u32,
    pub parent_count: usize,
    pub lane: u32,
    pub color_hex: String,
}

pub fn color_hex(rgb: [f32; 3]) -> String {
    let byte = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
    format!("#{:02x}{:02x}{:02x}", byte(rgb[0]), byte(rgb[1]), byte(rgb[2]))
}

pub mod layout;
pub mod particles;
pub mod scheduler;
pub mod store;

pub use scheduler::tick_simulation;

use bevy::prelude::Resource;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::render::buffers::RenderBuffers;
use crate::sim::particles::ParticleField;
use crate::sim::store::GraphStore;
use crate::util::config::VizConfig;

/// Simulation/render ownership domain: the block store, the flat buffers,
/// the particle field, and the tick bookkeeping. The single writer is the
/// per-frame tick; the view layer only ever sees `SelectionChanged` events.
#[derive(Resource)]
pub struct SimState {
    pub store: GraphStore,
    pub buffers: RenderBuffers,
    pub particles: ParticleField,
    pub rng: ChaCha8Rng,
    pub cfg: VizConfig,
    pub paused: bool,
    pub last_row_ms: f64,
}

impl SimState {
    pub fn new(cfg: VizConfig, now_ms: f64) -> Self {
        let mut st = Self {
            store: GraphStore::default(),
            buffers: RenderBuffers::new(),
            particles: ParticleField::empty(),
            rng: ChaCha8Rng::seed_from_u64(cfg.rng_seed),
            paused: cfg.start_paused,
            last_row_ms: now_ms,
            cfg,
        };
        st.reset(now_ms);
        st
    }

    /// Rebuild the scene from scratch: reseeded RNG, pre-seeded rows with
    /// backdated birth times so the opening scene is mostly settled.
    pub fn reset(&mut self, now_ms: f64) {
        self.rng = ChaCha8Rng::seed_from_u64(self.cfg.rng_seed);
        self.store.clear();

        let rows = self.cfg.seed_rows;
        for k in 0..rows {
            let backdated = now_ms - (rows - k) as f64 * self.cfg.row_interval_ms;
            self.add_row(backdated);
        }

        self.particles = ParticleField::new(
            self.cfg.particle_count,
            self.cfg.particle_ceiling,
            &mut self.rng,
        );
        self.last_row_ms = now_ms;
        tracing::info!(rows, residents = self.store.len(), "scene reset");
    }
}

use bevy::prelude::{Res, ResMut, Time};

use crate::sim::SimState;

/// Per-frame driver. Samples the clock once and hands explicit `now`/`dt`
/// to the simulation so the tick logic stays testable with a fake clock.
pub fn tick_simulation(time: Res<Time>, mut st: ResMut<SimState>) {
    let now_ms = time.elapsed_seconds_f64() * 1000.0;
    let dt = time.delta_seconds().min(0.033);
    st.tick(now_ms, dt);
}

impl SimState {
    /// One tick: row insertion first (when due and unpaused), then an
    /// unconditional buffer sync, so a new row is visible in the same frame
    /// it is created and animation keeps running while paused.
    pub fn tick(&mut self, now_ms: f64, dt: f32) {
        if !self.paused && now_ms - self.last_row_ms >= self.cfg.row_interval_ms {
            self.add_row(now_ms);
            self.last_row_ms = now_ms;
        }
        self.sync_buffers(now_ms, dt);
    }
}

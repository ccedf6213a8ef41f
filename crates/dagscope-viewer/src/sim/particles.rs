use bevy::prelude::Vec3;
use rand::Rng;

/// Decorative background drift, fully independent of the block store.
pub struct ParticleField {
    pub positions: Vec<Vec3>,
    pub speeds: Vec<f32>,
    pub ceiling: f32,
    pub floor: f32,
}

impl ParticleField {
    pub fn empty() -> Self {
        Self {
            positions: Vec::new(),
            speeds: Vec::new(),
            ceiling: 1.0,
            floor: -1.0,
        }
    }

    pub fn new<R: Rng>(count: usize, ceiling: f32, rng: &mut R) -> Self {
        let ceiling = ceiling.max(1.0);
        let floor = -ceiling;
        let positions = (0..count)
            .map(|_| {
                Vec3::new(
                    rng.gen_range(-12.0..12.0),
                    rng.gen_range(floor..ceiling),
                    rng.gen_range(-8.0..8.0),
                )
            })
            .collect();
        let speeds = (0..count).map(|_| rng.gen_range(0.4..1.6)).collect();
        Self {
            positions,
            speeds,
            ceiling,
            floor,
        }
    }

    /// Drift upward; wrap to the floor once past the ceiling.
    pub fn advance(&mut self, dt: f32) {
        for (p, speed) in self.positions.iter_mut().zip(&self.speeds) {
            p.y += speed * dt;
            if p.y > self.ceiling {
                p.y = self.floor;
            }
        }
    }
}

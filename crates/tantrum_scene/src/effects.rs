//! Cosmetic effect sink

use glam::Vec3;
use log::debug;

use tantrum_ai::world::EffectSink;

/// Records burst requests for the renderer to drain
#[derive(Debug, Default)]
pub struct ParticleSink {
    bursts: Vec<Vec3>,
}

impl ParticleSink {
    /// Create an empty sink
    pub fn new() -> Self {
        Self::default()
    }

    /// Take all pending bursts
    pub fn drain(&mut self) -> Vec<Vec3> {
        std::mem::take(&mut self.bursts)
    }

    /// Number of pending bursts
    pub fn pending(&self) -> usize {
        self.bursts.len()
    }
}

impl EffectSink for ParticleSink {
    fn burst(&mut self, position: Vec3) {
        debug!("particle burst requested at {position:?}");
        self.bursts.push(position);
    }
}

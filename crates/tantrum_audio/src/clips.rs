//! Stinger clip banks
//!
//! Each stinger kind owns a bank of interchangeable clips; the director picks
//! one at random per fire. Clip lengths are carried so the director can model
//! how long a voice stays busy without touching a playback device.

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One-shot stinger kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StingerKind {
    /// Spatial pickup blip
    Collect,
    /// Child munching candy
    CollectCandy,
    /// Child sobbing
    ChildSad,
    /// Child running away
    ChildLeave,
    /// Child heard in the distance while fled
    ChildWandering,
    /// Mother calling out on reunion
    Join,
    /// Randomly timed ambient announcement
    Ambient,
}

/// A registered audio clip
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Clip {
    /// Asset name understood by the playback backend
    pub name: String,
    /// Clip length in seconds
    pub seconds: f32,
}

impl Clip {
    /// Create a clip entry
    pub fn new(name: impl Into<String>, seconds: f32) -> Self {
        Self {
            name: name.into(),
            seconds,
        }
    }
}

/// Clip banks keyed by stinger kind
#[derive(Debug, Default)]
pub struct StingerBanks {
    banks: HashMap<StingerKind, Vec<Clip>>,
}

impl StingerBanks {
    /// Create empty banks
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one clip to a bank
    pub fn register(&mut self, kind: StingerKind, clip: Clip) {
        self.banks.entry(kind).or_default().push(clip);
    }

    /// Add a batch of clips to a bank
    pub fn register_all(&mut self, kind: StingerKind, clips: impl IntoIterator<Item = Clip>) {
        self.banks.entry(kind).or_default().extend(clips);
    }

    /// Number of clips registered for a kind
    pub fn len(&self, kind: StingerKind) -> usize {
        self.banks.get(&kind).map_or(0, Vec::len)
    }

    /// Whether nothing is registered at all
    pub fn is_empty(&self) -> bool {
        self.banks.values().all(Vec::is_empty)
    }

    /// Pick a random clip from a bank
    pub fn pick(&self, kind: StingerKind, rng: &mut impl Rng) -> Option<Clip> {
        let clips = self.banks.get(&kind)?;
        if clips.is_empty() {
            return None;
        }
        Some(clips[rng.gen_range(0..clips.len())].clone())
    }
}

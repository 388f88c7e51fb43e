//! Audio director
//!
//! Implements the mood/audio sink the child behaviour talks to. Mood calls
//! retarget the music blend; stinger calls pick a clip and emit a playback
//! command for the host backend. The director stops at the command boundary;
//! decoding and device output stay host-side.

use crossbeam_channel::{unbounded, Receiver, Sender};
use glam::Vec3;
use log::{debug, warn};
use parking_lot::RwLock;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use tantrum_ai::world::MoodSink;

use crate::clips::{StingerBanks, StingerKind};
use crate::mixer::{Mood, MoodMixer, TrackLevels};

/// Seconds before the first ambient stinger
const AMBIENT_FIRST_DELAY: f32 = 18.0;
/// Interval bounds between ambient stingers thereafter
const AMBIENT_INTERVAL: std::ops::Range<f32> = 25.0..35.0;

/// Playback voice a command targets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Voice {
    /// The child's one-shot lines
    Child,
    /// The mother's one-shot lines
    Mother,
    /// Pickup and ambient sounds
    Collectable,
}

/// A playback request for the host backend
#[derive(Debug, Clone, PartialEq)]
pub struct AudioCommand {
    /// Target voice
    pub voice: Voice,
    /// Clip asset name
    pub clip: String,
    /// World position for spatial playback
    pub position: Option<Vec3>,
    /// Stop whatever the voice is playing first
    pub interrupt: bool,
}

/// Mood mixer plus stinger scheduling
pub struct AudioDirector {
    mixer: MoodMixer,
    banks: Arc<RwLock<StingerBanks>>,
    rng: SmallRng,
    commands: Sender<AudioCommand>,
    ambient_in: f32,
    child_line_left: f32,
}

impl AudioDirector {
    /// Create a director with an entropy-seeded clip shuffle
    pub fn new(banks: Arc<RwLock<StingerBanks>>) -> (Self, Receiver<AudioCommand>) {
        Self::with_rng(banks, SmallRng::from_entropy())
    }

    /// Create a director with a fixed seed (deterministic clip choice)
    pub fn with_seed(banks: Arc<RwLock<StingerBanks>>, seed: u64) -> (Self, Receiver<AudioCommand>) {
        Self::with_rng(banks, SmallRng::seed_from_u64(seed))
    }

    fn with_rng(banks: Arc<RwLock<StingerBanks>>, rng: SmallRng) -> (Self, Receiver<AudioCommand>) {
        let (commands, receiver) = unbounded();
        (
            Self {
                mixer: MoodMixer::new(),
                banks,
                rng,
                commands,
                ambient_in: AMBIENT_FIRST_DELAY,
                child_line_left: 0.0,
            },
            receiver,
        )
    }

    /// Advance the crossfade, the child-line countdown and the ambient timer
    pub fn update(&mut self, dt: f32) {
        self.mixer.update(dt);
        self.child_line_left = (self.child_line_left - dt).max(0.0);

        self.ambient_in -= dt;
        if self.ambient_in < 0.0 {
            self.ambient_in = self.rng.gen_range(AMBIENT_INTERVAL);
            self.play(Voice::Collectable, StingerKind::Ambient, None, false);
        }
    }

    /// Volumes for the three looping music tracks
    pub fn levels(&self) -> TrackLevels {
        self.mixer.levels()
    }

    /// Current music blend scalar
    pub fn blend(&self) -> f32 {
        self.mixer.blend()
    }

    /// Whether a child line is still estimated to be playing
    pub fn child_line_active(&self) -> bool {
        self.child_line_left > 0.0
    }

    fn play(&mut self, voice: Voice, kind: StingerKind, position: Option<Vec3>, interrupt: bool) {
        let Some(clip) = self.banks.read().pick(kind, &mut self.rng) else {
            debug!("no clips registered for {kind:?}");
            return;
        };

        if voice == Voice::Child {
            self.child_line_left = clip.seconds;
        }

        let command = AudioCommand {
            voice,
            clip: clip.name,
            position,
            interrupt,
        };
        if self.commands.send(command).is_err() {
            warn!("audio backend disconnected, dropping {kind:?} stinger");
        }
    }
}

impl MoodSink for AudioDirector {
    fn set_happy(&mut self) {
        self.mixer.set_mood(Mood::Happy);
    }

    fn set_sad(&mut self) {
        self.mixer.set_mood(Mood::Sad);
    }

    fn set_lost(&mut self) {
        self.mixer.set_mood(Mood::Lost);
    }

    fn collect_candy(&mut self) {
        self.play(Voice::Child, StingerKind::CollectCandy, None, true);
    }

    fn child_sad(&mut self) {
        self.play(Voice::Child, StingerKind::ChildSad, None, true);
    }

    fn child_leave(&mut self) {
        self.play(Voice::Child, StingerKind::ChildLeave, None, true);
    }

    fn child_wandering(&mut self) {
        // At most one concurrent child line; skip instead of cutting in.
        if !self.child_line_active() {
            self.play(Voice::Child, StingerKind::ChildWandering, None, false);
        }
    }

    fn join(&mut self) {
        self.play(Voice::Mother, StingerKind::Join, None, true);
    }

    fn collect_at(&mut self, position: Vec3) {
        self.play(Voice::Collectable, StingerKind::Collect, Some(position), false);
    }
}

//! Scene orchestration
//!
//! One child, one player, one reunion trigger, one audio director. The host
//! drives `update` once per simulation tick and `player_step` once per parent
//! footstep; everything runs synchronously in that order.

use crossbeam_channel::Receiver;
use glam::Vec3;
use log::debug;
use parking_lot::RwLock;
use std::sync::Arc;

use tantrum_ai::child::{ChildBehaviour, ChildConfig, ConfigError};
use tantrum_ai::world::Pose;
use tantrum_audio::clips::StingerBanks;
use tantrum_audio::director::{AudioCommand, AudioDirector};
use tantrum_audio::mixer::TrackLevels;
use tantrum_triggers::trigger::{ProximityTrigger, TriggerEvent};
use tantrum_triggers::volume::TriggerVolume;

use crate::effects::ParticleSink;
use crate::geometry::ObstacleField;

/// The wired-up action scene
pub struct Scene {
    child: ChildBehaviour,
    player: Pose,
    reunion: ProximityTrigger,
    obstacles: ObstacleField,
    audio: AudioDirector,
    particles: ParticleSink,
}

impl Scene {
    /// Create a scene; the receiver delivers playback commands to the host
    pub fn new(
        child_config: ChildConfig,
        child_pose: Pose,
        player_pose: Pose,
        reunion_volume: TriggerVolume,
        obstacles: ObstacleField,
        banks: Arc<RwLock<StingerBanks>>,
    ) -> Result<(Self, Receiver<AudioCommand>), ConfigError> {
        let (audio, commands) = AudioDirector::new(banks);
        Self::assemble(child_config, child_pose, player_pose, reunion_volume, obstacles, audio)
            .map(|scene| (scene, commands))
    }

    /// Like [`Scene::new`] with a deterministic audio clip shuffle
    pub fn with_audio_seed(
        child_config: ChildConfig,
        child_pose: Pose,
        player_pose: Pose,
        reunion_volume: TriggerVolume,
        obstacles: ObstacleField,
        banks: Arc<RwLock<StingerBanks>>,
        seed: u64,
    ) -> Result<(Self, Receiver<AudioCommand>), ConfigError> {
        let (audio, commands) = AudioDirector::with_seed(banks, seed);
        Self::assemble(child_config, child_pose, player_pose, reunion_volume, obstacles, audio)
            .map(|scene| (scene, commands))
    }

    fn assemble(
        child_config: ChildConfig,
        child_pose: Pose,
        player_pose: Pose,
        reunion_volume: TriggerVolume,
        obstacles: ObstacleField,
        audio: AudioDirector,
    ) -> Result<Self, ConfigError> {
        Ok(Self {
            child: ChildBehaviour::new(child_config, child_pose)?,
            player: player_pose,
            reunion: ProximityTrigger::new(reunion_volume),
            obstacles,
            audio,
            particles: ParticleSink::new(),
        })
    }

    /// Advance the whole scene by one tick
    pub fn update(&mut self, dt: f32) {
        // The reunion volume rides on the child and is armed only while it
        // is fled; containment is still tracked while following so a glued
        // child does not fire a stale Enter the moment it leaves.
        self.reunion.enabled = !self.child.is_following();
        let child_position = self.child.pose().position;
        if let Some(TriggerEvent::Entered) = self.reunion.update(child_position, self.player.position)
        {
            debug!("parent re-entered the reunion volume");
            self.child.on_proximity_reunion(&mut self.audio);
        }

        self.child.tick(dt, &self.player, &self.obstacles);
        self.audio.update(dt);
    }

    /// Move the tracked player pose
    pub fn set_player_pose(&mut self, pose: Pose) {
        self.player = pose;
    }

    /// One parent footstep
    pub fn player_step(&mut self) {
        self.child.decrement_comfort(&mut self.audio);
    }

    /// Candy handed over at a world position
    pub fn give_candy(&mut self, at: Vec3) {
        self.child
            .give_candy(at, &mut self.audio, &mut self.particles);
    }

    /// The child entity
    pub fn child(&self) -> &ChildBehaviour {
        &self.child
    }

    /// The current player pose
    pub fn player(&self) -> &Pose {
        &self.player
    }

    /// Volumes for the three looping music tracks
    pub fn music_levels(&self) -> TrackLevels {
        self.audio.levels()
    }

    /// Take pending particle bursts for the renderer
    pub fn drain_bursts(&mut self) -> Vec<Vec3> {
        self.particles.drain()
    }
}

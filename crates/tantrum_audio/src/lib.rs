//! Tantrum Audio - Mood Music and Stingers
//!
//! This crate provides the audio collaborator of the child behaviour.
//!
//! # Features
//!
//! - Three-layer mood music blend with a smoothed crossfade chain
//! - One-shot stinger banks with random clip choice
//! - Randomly timed ambient stingers
//! - Playback commands delivered to a host backend over a channel
//!
//! # Example
//!
//! ```ignore
//! use tantrum_audio::prelude::*;
//!
//! let (mut director, commands) = AudioDirector::new(banks);
//! director.update(dt);
//! let levels = director.levels(); // feed the three looping tracks
//! for command in commands.try_iter() {
//!     backend.play(command);
//! }
//! ```

pub mod clips;
pub mod director;
pub mod mixer;

pub mod prelude {
    pub use crate::clips::{Clip, StingerBanks, StingerKind};
    pub use crate::director::{AudioCommand, AudioDirector, Voice};
    pub use crate::mixer::{Mood, MoodMixer, TrackLevels};
}

pub use prelude::*;

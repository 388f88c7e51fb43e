//! Tantrum Scene - Per-Tick Orchestration
//!
//! Wires the child behaviour, the audio director and the reunion trigger
//! together, and provides the geometry stand-ins the AI probes against.
//!
//! # Example
//!
//! ```ignore
//! use tantrum_scene::prelude::*;
//!
//! let (mut scene, audio_commands) = Scene::new(
//!     ChildConfig::default(),
//!     Pose::IDENTITY,
//!     Pose::IDENTITY,
//!     TriggerVolume::sphere(1.0),
//!     ObstacleField::new(),
//!     banks,
//! )?;
//!
//! scene.set_player_pose(player);
//! scene.player_step(); // once per parent footstep
//! scene.update(dt);
//! ```

pub mod effects;
pub mod geometry;
pub mod scene;

pub mod prelude {
    pub use crate::effects::ParticleSink;
    pub use crate::geometry::{ray_aabb, Aabb, ObstacleField};
    pub use crate::scene::Scene;
    pub use tantrum_ai::prelude::*;
    pub use tantrum_audio::prelude::*;
    pub use tantrum_triggers::prelude::*;
}

pub use prelude::*;

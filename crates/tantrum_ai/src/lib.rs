//! Tantrum AI - Child-Follower Behaviour
//!
//! This crate provides the emotional and movement state machine for the
//! child entity.
//!
//! # Features
//!
//! - Discrete movement/rotation step queue with smoothstep easing
//! - Comfort-decay state machine (following / crying / fled / reunited)
//! - Obstacle-avoidance heuristic for autonomous wandering
//! - Collaborator traits for geometry queries, mood audio and effects
//!
//! # Example
//!
//! ```ignore
//! use tantrum_ai::prelude::*;
//!
//! let mut child = ChildBehaviour::new(ChildConfig::default(), Pose::IDENTITY)?;
//! child.tick(dt, &player_pose, &obstacles);
//! child.decrement_comfort(&mut audio);
//! ```

pub mod avoidance;
pub mod child;
pub mod movement;
pub mod world;

pub mod prelude {
    pub use crate::child::{ChildBehaviour, ChildConfig, ConfigError};
    pub use crate::movement::{Advanced, Step, StepError, StepKind, StepQueue};
    pub use crate::world::{EffectSink, GeometryQuery, MoodSink, Pose};
}

pub use prelude::*;

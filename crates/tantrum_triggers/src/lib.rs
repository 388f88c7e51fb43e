//! Tantrum Triggers - Proximity Detection
//!
//! Trigger volumes carried by an entity, edge-detecting another entity's
//! crossings. The scene uses one to deliver the reunion event when the
//! parent finds the fled child again.

pub mod trigger;
pub mod volume;

pub mod prelude {
    pub use crate::trigger::{ProximityTrigger, TriggerEvent};
    pub use crate::volume::TriggerVolume;
}

pub use prelude::*;

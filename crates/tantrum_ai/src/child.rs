//! Child emotional and movement state machine
//!
//! The child either follows the target (glued to its pose while idle) or has
//! fled and wanders autonomously. Comfort decays while the parent walks;
//! below the crying threshold the child sobs, at the run-away threshold it
//! turns around and leaves. A proximity reunion brings it back, visibly
//! upset.

use glam::Vec3;
use log::{debug, info};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::avoidance::{plan_flee_steps, turn_step};
use crate::movement::StepQueue;
use crate::world::{EffectSink, GeometryQuery, MoodSink, Pose};

/// Configuration errors, rejected at construction
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum ConfigError {
    /// Comfort thresholds out of order
    #[error(
        "comfort thresholds must satisfy initial_comfort > cry_at > run_away_at, \
         got {initial_comfort} / {cry_at} / {run_away_at}"
    )]
    ComfortOrder {
        initial_comfort: i32,
        cry_at: i32,
        run_away_at: i32,
    },
    /// A duration or distance that must be positive was not
    #[error("{name} must be positive and finite, got {value}")]
    InvalidScalar { name: &'static str, value: f32 },
}

/// Tuning knobs of one child entity
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChildConfig {
    /// Comfort at scene start and after candy
    pub initial_comfort: i32,
    /// Comfort at or below which the child cries
    pub cry_at: i32,
    /// Comfort at or below which the child flees
    pub run_away_at: i32,
    /// Seconds per autonomous translation step
    pub move_time: f32,
    /// Seconds per autonomous yaw turn
    pub turn_time: f32,
    /// Horizontal probe length for the avoidance heuristic
    pub probe_distance: f32,
    /// Probe origin height above the feet
    pub probe_height: f32,
}

impl Default for ChildConfig {
    fn default() -> Self {
        Self {
            initial_comfort: 10,
            cry_at: 5,
            run_away_at: 0,
            move_time: 0.4,
            turn_time: 0.15,
            probe_distance: 1.4,
            probe_height: 0.5,
        }
    }
}

impl ChildConfig {
    /// Check threshold ordering and scalar positivity
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.initial_comfort > self.cry_at && self.cry_at > self.run_away_at) {
            return Err(ConfigError::ComfortOrder {
                initial_comfort: self.initial_comfort,
                cry_at: self.cry_at,
                run_away_at: self.run_away_at,
            });
        }
        for (name, value) in [
            ("move_time", self.move_time),
            ("turn_time", self.turn_time),
            ("probe_distance", self.probe_distance),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigError::InvalidScalar { name, value });
            }
        }
        if !self.probe_height.is_finite() || self.probe_height < 0.0 {
            return Err(ConfigError::InvalidScalar {
                name: "probe_height",
                value: self.probe_height,
            });
        }
        Ok(())
    }
}

/// The child entity: comfort state plus its movement queue
#[derive(Debug)]
pub struct ChildBehaviour {
    config: ChildConfig,
    pose: Pose,
    comfort: i32,
    following: bool,
    crying: bool,
    steps_wandering: u32,
    queue: StepQueue,
}

impl ChildBehaviour {
    /// Create a child at a pose, following and fully comforted
    pub fn new(config: ChildConfig, pose: Pose) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            pose,
            comfort: config.initial_comfort,
            following: true,
            crying: false,
            steps_wandering: 0,
            queue: StepQueue::new(),
        })
    }

    /// Current pose
    pub fn pose(&self) -> &Pose {
        &self.pose
    }

    /// Current comfort level
    pub fn comfort(&self) -> i32 {
        self.comfort
    }

    /// Whether the child tracks the target
    pub fn is_following(&self) -> bool {
        self.following
    }

    /// Whether the child is crying
    pub fn is_crying(&self) -> bool {
        self.crying
    }

    /// Steps taken by the parent since the child fled
    pub fn steps_wandering(&self) -> u32 {
        self.steps_wandering
    }

    /// Whether a movement step is in flight
    pub fn is_animating(&self) -> bool {
        !self.queue.is_empty()
    }

    /// Advance the simulation by one tick.
    ///
    /// An active step is advanced first; when it completes and drains the
    /// queue while the child wanders, the avoidance heuristic plans the next
    /// steps before the tick's pose can be read. Idle and following, the
    /// child snaps to the target pose.
    pub fn tick(&mut self, dt: f32, target: &Pose, geometry: &impl GeometryQuery) {
        if !self.queue.is_empty() {
            let follow = self.following.then_some(target.position);
            let advanced = self.queue.advance(dt, follow);
            if let Some(position) = advanced.position {
                self.pose.position = position;
            }
            if let Some(orientation) = advanced.orientation {
                self.pose.orientation = orientation;
            }
            if let Some(done) = advanced.completed {
                if self.queue.is_empty() && !self.following {
                    plan_flee_steps(
                        &self.config,
                        &self.pose,
                        target.position,
                        &done,
                        geometry,
                        &mut self.queue,
                    );
                }
            }
        } else if self.following {
            self.pose = *target;
        }
    }

    /// One parent footstep: decay comfort or count wandering.
    ///
    /// Only a following child loses comfort. A fled child instead counts the
    /// parent's steps and occasionally sobs in the distance.
    pub fn decrement_comfort(&mut self, audio: &mut impl MoodSink) {
        if self.following {
            self.comfort -= 1;
            debug!("child comfort decremented to {}", self.comfort);

            if self.comfort <= self.config.run_away_at {
                self.on_leaving(audio);
                // Turn around, run away from the parent.
                self.queue.push(turn_step(
                    self.config.turn_time,
                    self.pose.orientation,
                    std::f32::consts::PI,
                ));
                return;
            }

            if self.comfort <= self.config.cry_at {
                self.on_crying(audio);
            }
        } else {
            self.steps_wandering += 1;

            if self.steps_wandering % 8 == 6 {
                audio.child_wandering();
                debug!(
                    "wandering stinger requested at parent step {}",
                    self.steps_wandering
                );
            }
        }
    }

    /// The target re-entered the detection volume while the child was fled
    pub fn on_proximity_reunion(&mut self, audio: &mut impl MoodSink) {
        if self.following {
            return;
        }
        self.on_joining(audio);
    }

    /// Candy handed to the child at a world position.
    ///
    /// Effective only while following. A fled child ignoring candy is a known
    /// gap; whether it should stop and eat is an open product decision.
    pub fn give_candy(
        &mut self,
        at: Vec3,
        audio: &mut impl MoodSink,
        effects: &mut impl EffectSink,
    ) {
        if self.following {
            self.on_happy(audio);
            effects.burst(at);
            audio.collect_at(at);
        }
    }

    fn on_crying(&mut self, audio: &mut impl MoodSink) {
        if !self.crying {
            info!("child began to cry");
        }
        self.crying = true;
        audio.set_sad();

        // Every 5 sad steps, play the child-sad stinger.
        if (self.comfort - self.config.cry_at) % 5 == 0 {
            audio.child_sad();
        }
    }

    fn on_happy(&mut self, audio: &mut impl MoodSink) {
        info!("child ate candy, it is happy again");
        self.comfort = self.config.initial_comfort;
        self.crying = false;
        audio.set_happy();
        audio.collect_candy();
    }

    fn on_leaving(&mut self, audio: &mut impl MoodSink) {
        self.following = false;
        self.crying = false;

        // One-shot on the exact step comfort hits the threshold.
        if self.comfort == self.config.run_away_at {
            audio.child_leave();
            self.steps_wandering = 0;
            info!("child ran away");
        }

        audio.set_lost();
    }

    fn on_joining(&mut self, audio: &mut impl MoodSink) {
        info!("child and parent have been reunited");
        self.following = true;
        self.crying = true;
        self.comfort = self.config.cry_at;

        audio.set_sad();
        audio.join();
    }
}

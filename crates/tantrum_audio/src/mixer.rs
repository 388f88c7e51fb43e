//! Mood music crossfade model
//!
//! Three looping tracks (happy, sad, lost) share one blend scalar: 1 is
//! fully happy, 0 fully sad, -1 fully lost. A chain of exponential smoothing
//! stages drags the blend toward the desired mood, so mood flips glide
//! instead of cutting.

use serde::{Deserialize, Serialize};
use tantrum_ai::movement::smoothstep;

/// Number of smoothing stages in the crossfade chain
const STAGES: usize = 4;

/// Chain response rate per second
const SMOOTHING_RATE: f32 = 2.0;

/// Target mood of the music
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Mood {
    /// Blend 1.0
    Happy,
    /// Blend 0.0
    Sad,
    /// Blend -1.0
    Lost,
}

impl Mood {
    /// Blend scalar this mood steers toward
    pub fn blend_target(self) -> f32 {
        match self {
            Mood::Happy => 1.0,
            Mood::Sad => 0.0,
            Mood::Lost => -1.0,
        }
    }
}

/// Per-track volumes derived from the blend, each in [0, 1]
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct TrackLevels {
    /// Happy layer volume
    pub happy: f32,
    /// Sad layer volume
    pub sad: f32,
    /// Lost layer volume
    pub lost: f32,
}

/// The crossfade state
#[derive(Debug, Clone)]
pub struct MoodMixer {
    desired: f32,
    stages: [f32; STAGES],
}

impl MoodMixer {
    /// Start fully happy
    pub fn new() -> Self {
        Self {
            desired: Mood::Happy.blend_target(),
            stages: [Mood::Happy.blend_target(); STAGES],
        }
    }

    /// Retarget the blend
    pub fn set_mood(&mut self, mood: Mood) {
        self.desired = mood.blend_target();
    }

    /// Current blend scalar (tail of the smoothing chain)
    pub fn blend(&self) -> f32 {
        self.stages[STAGES - 1]
    }

    /// Advance the smoothing chain by one tick
    pub fn update(&mut self, dt: f32) {
        self.stages[0] = self.desired;
        for i in 1..STAGES {
            self.stages[i] += (self.stages[i - 1] - self.stages[i]) * dt * SMOOTHING_RATE;
        }
    }

    /// Track volumes for the current blend
    pub fn levels(&self) -> TrackLevels {
        let blend = self.blend();
        TrackLevels {
            happy: smoothstep(blend),
            sad: smoothstep(1.0 - blend.abs()),
            lost: smoothstep(-blend),
        }
    }
}

impl Default for MoodMixer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn settle(mixer: &mut MoodMixer, seconds: f32) {
        let dt = 1.0 / 60.0;
        let ticks = (seconds / dt) as usize;
        for _ in 0..ticks {
            mixer.update(dt);
        }
    }

    #[test]
    fn test_starts_fully_happy() {
        let mixer = MoodMixer::new();
        let levels = mixer.levels();
        assert_relative_eq!(levels.happy, 1.0);
        assert_relative_eq!(levels.sad, 0.0);
        assert_relative_eq!(levels.lost, 0.0);
    }

    #[test]
    fn test_converges_to_sad() {
        let mut mixer = MoodMixer::new();
        mixer.set_mood(Mood::Sad);
        settle(&mut mixer, 10.0);

        assert!(mixer.blend().abs() < 0.01);
        let levels = mixer.levels();
        assert!(levels.sad > 0.95);
        assert!(levels.happy < 0.01);
        assert!(levels.lost < 0.01);
    }

    #[test]
    fn test_converges_to_lost() {
        let mut mixer = MoodMixer::new();
        mixer.set_mood(Mood::Lost);
        settle(&mut mixer, 15.0);

        assert!(mixer.blend() < -0.99);
        let levels = mixer.levels();
        assert!(levels.lost > 0.95);
        assert_relative_eq!(levels.happy, 0.0);
    }

    #[test]
    fn test_happy_to_lost_passes_through_sad() {
        let mut mixer = MoodMixer::new();
        mixer.set_mood(Mood::Lost);

        let mut peak_sad: f32 = 0.0;
        let dt = 1.0 / 60.0;
        for _ in 0..(15.0 / dt) as usize {
            mixer.update(dt);
            peak_sad = peak_sad.max(mixer.levels().sad);
        }

        // The blend crosses zero on its way down, so the sad layer swells.
        assert!(peak_sad > 0.9);
    }

    #[test]
    fn test_levels_stay_in_unit_range() {
        let mut mixer = MoodMixer::new();
        for mood in [Mood::Lost, Mood::Happy, Mood::Sad, Mood::Lost] {
            mixer.set_mood(mood);
            for _ in 0..120 {
                mixer.update(1.0 / 30.0);
                let levels = mixer.levels();
                for level in [levels.happy, levels.sad, levels.lost] {
                    assert!((0.0..=1.0).contains(&level), "level out of range: {level}");
                }
                // Happy and lost never play together.
                assert!(levels.happy == 0.0 || levels.lost == 0.0);
            }
        }
    }
}

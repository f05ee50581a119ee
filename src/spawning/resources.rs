//! Spawning domain: platform animation and lifetime tuning.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Timing and shape of platform spawn, warning, and retire animations.
#[derive(Resource, Debug, Clone, Deserialize, Serialize)]
pub struct PlatformTuning {
    /// Seconds to scale in on spawn and scale out on retire
    pub anim_duration: f32,
    /// Warning pulse oscillations per second
    pub pulse_frequency: f32,
    /// Relative scale swing of the warning pulse
    pub pulse_amplitude: f32,
    /// Vertical wobble in pixels during the warning pulse
    pub shake_amplitude: f32,
    pub shake_frequency: f32,
    /// Colliders never shrink below this scale
    pub min_scale: f32,
    /// Seconds the start platform survives after the player first lands on it
    pub start_platform_lifetime: f32,
    /// Seconds between WaitForFree re-checks
    pub wait_poll_interval: f32,
}

impl Default for PlatformTuning {
    fn default() -> Self {
        Self {
            anim_duration: 0.28,
            pulse_frequency: 6.0,
            pulse_amplitude: 0.08,
            shake_amplitude: 3.0,
            shake_frequency: 8.0,
            min_scale: 0.05,
            start_platform_lifetime: 2.0,
            wait_poll_interval: 0.12,
        }
    }
}

//! Health domain: tuning and the respawn point.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Resource, Debug, Clone, Deserialize, Serialize)]
pub struct HealthTuning {
    pub max_hearts: u32,
    /// The player's own life; reaching 0 ends the run
    pub core_health: u32,
    /// Delay between a bird contact and its damage landing
    pub bird_damage_delay: f32,
    pub invincibility_duration: f32,
    /// Seconds with no hearts before a heart starts to refill
    pub heart_regen_delay: f32,
    pub heart_fill_duration: f32,
    pub heart_fill_steps: u32,
    /// Seconds for each of the respawn fade out and fade in
    pub respawn_fade: f32,
    /// Seconds spent invisible between the fades
    pub respawn_hold: f32,
}

impl Default for HealthTuning {
    fn default() -> Self {
        Self {
            max_hearts: 2,
            core_health: 1,
            bird_damage_delay: 0.5,
            invincibility_duration: 1.2,
            heart_regen_delay: 15.0,
            heart_fill_duration: 3.0,
            heart_fill_steps: 3,
            respawn_fade: 0.5,
            respawn_hold: 1.0,
        }
    }
}

/// Last platform contact the player could be returned to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SafeSpot {
    pub position: Vec2,
    pub platform: Entity,
}

/// Where respawns land: the last safe spot, or the fallback above the
/// respawn anchor once that platform is gone.
#[derive(Resource, Debug, Clone, Default)]
pub struct RespawnPoint {
    pub fallback: Vec2,
    pub safe: Option<SafeSpot>,
}

impl RespawnPoint {
    pub fn register_safe(&mut self, position: Vec2, platform: Entity) {
        self.safe = Some(SafeSpot { position, platform });
    }

    /// Forget the safe spot and point at `fallback`.
    pub fn reset(&mut self, fallback: Vec2) {
        self.fallback = fallback;
        self.safe = None;
    }

    pub fn resolve(spot: Option<SafeSpot>, fallback: Vec2, exists: impl Fn(Entity) -> bool) -> Vec2 {
        match spot {
            Some(spot) if exists(spot.platform) => spot.position,
            _ => fallback,
        }
    }
}

//! Movement domain: tuning, unlocks, and input resources.

use bevy::prelude::*;
use rand::Rng;
use rand::seq::IndexedRandom;
use serde::{Deserialize, Serialize};

#[derive(Resource, Debug, Clone, Deserialize, Serialize)]
pub struct MovementTuning {
    pub move_speed: f32,
    pub accel: f32,
    pub decel: f32,
    pub jump_velocity: f32,
    /// Upward velocity is scaled by this when jump is released early
    pub variable_jump_multiplier: f32,
    pub max_hold_time: f32,
    pub gravity: f32,
    pub base_gravity_scale: f32,
    /// Fraction of base gravity while jump is held on the way up
    pub hold_gravity_factor: f32,
    /// Gravity scale change per second while easing
    pub gravity_change_speed: f32,
    pub glide_gravity_scale: f32,
    pub glide_speed: f32,
    pub glide_delay: f32,
    pub dash_speed: f32,
    pub dash_time: f32,
    pub dash_cooldown: f32,
    pub coyote_time: f32,
    pub ground_check_radius: f32,
    pub ledge_probe_radius: f32,
    pub glide_ledge_probe_radius: f32,
    pub ledge_regrab_delay: f32,
    pub ledge_climb_delay: f32,
    pub key_shuffle_interval: f32,
}

impl Default for MovementTuning {
    fn default() -> Self {
        Self {
            move_speed: 300.0,
            accel: 1500.0,
            decel: 2000.0,
            jump_velocity: 500.0,
            variable_jump_multiplier: 0.6,
            max_hold_time: 0.25,
            gravity: 490.0,
            base_gravity_scale: 3.5,
            hold_gravity_factor: 0.55,
            gravity_change_speed: 8.0,
            glide_gravity_scale: 0.1,
            glide_speed: 150.0,
            glide_delay: 0.4,
            dash_speed: 600.0,
            dash_time: 0.18,
            dash_cooldown: 0.8,
            coyote_time: 0.12,
            ground_check_radius: 6.0,
            ledge_probe_radius: 6.0,
            glide_ledge_probe_radius: 25.0,
            ledge_regrab_delay: 0.1,
            ledge_climb_delay: 0.4,
            key_shuffle_interval: 4.0,
        }
    }
}

impl MovementTuning {
    /// Peak height of a full-hold ground jump, ignoring the hold gravity easing.
    pub fn single_jump_height(&self) -> f32 {
        let g = self.gravity * self.base_gravity_scale;
        self.jump_velocity * self.jump_velocity / (2.0 * g)
    }
}

#[derive(Resource, Debug, Default)]
pub struct MovementInput {
    pub axis: Vec2,
    pub jump_just_pressed: bool,
    pub jump_held: bool,
    pub jump_just_released: bool,
    pub dash_just_pressed: bool,
    pub climb_just_pressed: bool,
}

/// Abilities granted by the current wave.
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AbilityUnlocks {
    pub double_jump: bool,
    pub glide: bool,
    pub dash: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JumpKey {
    #[default]
    Space,
    W,
    P,
    T,
}

impl JumpKey {
    pub const ALL: [JumpKey; 4] = [JumpKey::Space, JumpKey::W, JumpKey::P, JumpKey::T];

    pub fn key_code(self) -> KeyCode {
        match self {
            JumpKey::Space => KeyCode::Space,
            JumpKey::W => KeyCode::KeyW,
            JumpKey::P => KeyCode::KeyP,
            JumpKey::T => KeyCode::KeyT,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            JumpKey::Space => "Space",
            JumpKey::W => "W",
            JumpKey::P => "P",
            JumpKey::T => "T",
        }
    }
}

/// The key that currently jumps, plus the shuffle that may replace it.
///
/// A pending key is drawn every shuffle interval. While shuffling is on the
/// pending key is announced, and it becomes the jump key when the interval
/// elapses.
#[derive(Resource, Debug, Clone, Default)]
pub struct JumpBinding {
    pub current: JumpKey,
    pub pending: JumpKey,
    pub shuffling: bool,
    pub timer: f32,
    pub announcement: Option<String>,
}

impl JumpBinding {
    /// Back to Space with a fresh pending draw.
    pub fn reset<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.current = JumpKey::Space;
        self.shuffling = false;
        self.timer = 0.0;
        self.announcement = None;
        self.draw_pending(rng);
    }

    /// Advance the shuffle. Returns true when the jump key changed.
    pub fn tick<R: Rng + ?Sized>(&mut self, dt: f32, interval: f32, rng: &mut R) -> bool {
        self.timer += dt;
        if interval <= 0.0 || self.timer < interval {
            return false;
        }
        self.timer -= interval;

        let previous = self.current;
        if self.shuffling {
            self.current = self.pending;
        }
        self.draw_pending(rng);
        previous != self.current
    }

    fn draw_pending<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.pending = *JumpKey::ALL.choose(rng).unwrap_or(&JumpKey::Space);
        self.announcement = self
            .shuffling
            .then(|| format!("Next Key Code is: {}", self.pending.label()));
    }
}

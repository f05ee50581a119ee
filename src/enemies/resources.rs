//! Enemies domain: tuning resources.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Resource, Debug, Clone, Deserialize, Serialize)]
pub struct BirdTuning {
    /// Travel speed in pixels per second
    pub speed: f32,
    /// Velocity added to the player on contact (x away from the bird, y up)
    pub knockback: (f32, f32),
    pub size: (f32, f32),
}

impl Default for BirdTuning {
    fn default() -> Self {
        Self {
            speed: 220.0,
            knockback: (320.0, 260.0),
            size: (36.0, 22.0),
        }
    }
}

impl BirdTuning {
    pub fn knockback(&self) -> Vec2 {
        Vec2::new(self.knockback.0, self.knockback.1)
    }

    pub fn size(&self) -> Vec2 {
        Vec2::new(self.size.0, self.size.1)
    }
}

#[derive(Resource, Debug, Clone, Deserialize, Serialize)]
pub struct ShooterTuning {
    /// Vertical speed of a sweeping shooter in pixels per second
    pub sweep_speed: f32,
    /// Fraction of the remaining distance closed per second while easing
    pub approach_rate: f32,
    pub fire_rate: f32,
    pub fire_count: u32,
    pub bullet_speed: f32,
    /// Height a stationed shooter settles at
    pub shoot_y: f32,
    /// Height a stationed shooter eases toward when leaving
    pub exit_y: f32,
    pub arrive_tolerance: f32,
    pub size: (f32, f32),
    pub bullet_size: (f32, f32),
}

impl Default for ShooterTuning {
    fn default() -> Self {
        Self {
            sweep_speed: 110.0,
            approach_rate: 2.0,
            fire_rate: 1.2,
            fire_count: 3,
            bullet_speed: 320.0,
            shoot_y: 150.0,
            exit_y: -375.0,
            arrive_tolerance: 5.0,
            size: (30.0, 40.0),
            bullet_size: (12.0, 6.0),
        }
    }
}

impl ShooterTuning {
    pub fn size(&self) -> Vec2 {
        Vec2::new(self.size.0, self.size.1)
    }

    pub fn bullet_size(&self) -> Vec2 {
        Vec2::new(self.bullet_size.0, self.bullet_size.1)
    }
}

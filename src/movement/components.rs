//! Movement domain: components and physics layers for locomotion.

use avian2d::prelude::*;
use bevy::prelude::*;

/// Physics layers for collision filtering
#[derive(PhysicsLayer, Clone, Copy, Debug, Default)]
pub enum GameLayer {
    #[default]
    Default,
    /// Platforms the player can stand on and hang from
    Ground,
    /// Player character
    Player,
    /// Birds and shooters
    Enemy,
    /// Shooter bullets
    Projectile,
    /// Sensors (kill zone) - should not block movement
    Sensor,
}

#[derive(Component, Debug)]
pub struct Player;

#[derive(Component, Debug)]
pub struct MovementState {
    pub on_ground: bool,
    pub facing: Facing,
    /// Remaining coyote time; refilled on the ground, counts down in the air
    pub coyote_timer: f32,
    /// How long the jump key has been held, capped at the max hold time
    pub jump_hold_timer: f32,
    pub double_jump_used: bool,
    /// Multiplier applied to gravity this frame
    pub gravity_scale: f32,
    pub is_gliding: bool,
    pub glide_hold_timer: f32,
    pub is_dashing: bool,
    pub dash_timer: f32,
    pub dash_cooldown_timer: f32,
    /// A dash overlapped this airtime; no further dashes until landing
    pub air_dash_used: bool,
    pub can_grab_ledge: bool,
    pub regrab_timer: f32,
}

impl MovementState {
    pub fn new(base_gravity_scale: f32) -> Self {
        Self {
            on_ground: false,
            facing: Facing::Right,
            coyote_timer: 0.0,
            jump_hold_timer: 0.0,
            double_jump_used: false,
            gravity_scale: base_gravity_scale,
            is_gliding: false,
            glide_hold_timer: 0.0,
            is_dashing: false,
            dash_timer: 0.0,
            dash_cooldown_timer: 0.0,
            air_dash_used: false,
            can_grab_ledge: true,
            regrab_timer: 0.0,
        }
    }
}

impl Default for MovementState {
    fn default() -> Self {
        Self::new(3.5)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Facing {
    #[default]
    Right,
    Left,
}

impl Facing {
    pub fn sign(self) -> f32 {
        match self {
            Facing::Right => 1.0,
            Facing::Left => -1.0,
        }
    }
}

/// Marker for colliders the player stands on
#[derive(Component, Debug)]
pub struct Ground;

/// A grabbable edge on a platform, in platform-local offsets.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ledge {
    /// Where the player hangs
    pub grab: Vec2,
    /// Where the player ends up after climbing over
    pub climb: Vec2,
}

/// Ledges offered by a platform.
#[derive(Component, Debug, Clone, Default)]
pub struct LedgePoints(pub Vec<Ledge>);

/// Present on the player while it hangs from a ledge. Positions are in world space.
#[derive(Component, Debug, Clone)]
pub struct LedgeHang {
    pub platform: Entity,
    pub grab: Vec2,
    pub climb: Vec2,
    pub elapsed: f32,
}

//! Movement domain: player locomotion, abilities, and ledge handling.

mod bootstrap;
mod components;
mod events;
mod resources;
mod systems;


pub use components::{
    Facing, GameLayer, Ground, Ledge, LedgeHang, LedgePoints, MovementState, Player,
};
pub use events::MovementEvent;
pub use resources::{AbilityUnlocks, JumpBinding, JumpKey, MovementInput, MovementTuning};

use bevy::prelude::*;

use crate::core::{GameState, RunLifecycle, gameplay_active};
use crate::movement::bootstrap::spawn_player;
use crate::movement::systems::{
    apply_dash, apply_glide, apply_gravity, apply_horizontal_movement, apply_jump,
    apply_ledge_hang, clamp_to_zone, detect_ground, detect_ledge, read_input, reset_jump_binding,
    shuffle_jump_key, update_facing, update_player_visuals, update_timers,
};

pub struct MovementPlugin;

impl Plugin for MovementPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<MovementTuning>()
            .init_resource::<MovementInput>()
            .init_resource::<AbilityUnlocks>()
            .init_resource::<JumpBinding>()
            .add_message::<MovementEvent>()
            .add_systems(
                OnEnter(GameState::Run),
                (reset_jump_binding, spawn_player).in_set(RunLifecycle::Populate),
            )
            .add_systems(
                Update,
                (
                    read_input,
                    shuffle_jump_key,
                    detect_ground,
                    update_timers,
                    detect_ledge,
                    apply_ledge_hang,
                    apply_horizontal_movement,
                    apply_jump,
                    apply_glide,
                    apply_dash,
                    apply_gravity,
                    update_facing,
                    clamp_to_zone,
                    update_player_visuals,
                )
                    .chain()
                    .run_if(in_state(GameState::Run).and(gameplay_active)),
            );
    }
}

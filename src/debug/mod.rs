//! Dev tools for fast iteration: wave skipping, forced damage, and an info overlay.
//!
//! Hotkeys (during a run):
//! - F1: toggle the info overlay
//! - F2: advance to the next wave
//! - F3 / F4: projectile / shooter hit
//! - F5: fall
//! - F6: log player health
//! - F7: toggle the platform cycle

mod state;
mod systems;

#[cfg(test)]
mod tests;

pub use state::{DebugAction, DebugState};

use bevy::prelude::*;

use crate::core::GameState;
use crate::debug::systems::{
    handle_debug_hotkeys, log_movement_events, update_debug_info_overlay, update_status_message,
};

pub struct DebugPlugin;

impl Plugin for DebugPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<DebugState>().add_systems(
            Update,
            (
                handle_debug_hotkeys,
                update_status_message,
                update_debug_info_overlay,
                log_movement_events,
            )
                .chain()
                .run_if(in_state(GameState::Run)),
        );
    }
}

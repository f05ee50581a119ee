//! Core domain: run flow, pausing, seeded RNG, and persisted progress.

mod resources;
mod save;
mod state;
mod systems;
mod ui;

#[cfg(test)]
mod tests;

pub use resources::{
    GameplayPaused, RunConfig, RunRng, RunScoped, format_clock, gameplay_active, sample_count,
    sample_range,
};
pub use save::{SaveData, SaveError, SaveStore, load_save, store_save};
pub use state::{GameState, RunLifecycle};

use bevy::prelude::*;

use crate::core::save::load_save_data;
use crate::core::systems::{
    cleanup_run_entities, clear_pause_sources, initialize_run, setup_camera, sync_virtual_time,
    transition_to_main_menu,
};
use crate::core::ui::{cleanup_main_menu, handle_start_input, spawn_main_menu};

pub struct CorePlugin;

impl Plugin for CorePlugin {
    fn build(&self, app: &mut App) {
        app.init_state::<GameState>()
            .init_resource::<GameplayPaused>()
            .init_resource::<RunConfig>()
            .init_resource::<RunRng>()
            .init_resource::<SaveStore>()
            .configure_sets(
                OnEnter(GameState::Run),
                (
                    RunLifecycle::Reset,
                    RunLifecycle::Populate,
                    RunLifecycle::ApplyWave,
                )
                    .chain(),
            )
            .add_systems(
                Startup,
                (setup_camera, load_save_data, transition_to_main_menu),
            )
            .add_systems(OnEnter(GameState::MainMenu), spawn_main_menu)
            .add_systems(OnExit(GameState::MainMenu), cleanup_main_menu)
            .add_systems(
                Update,
                handle_start_input.run_if(in_state(GameState::MainMenu)),
            )
            .add_systems(
                OnEnter(GameState::Run),
                initialize_run.in_set(RunLifecycle::Reset),
            )
            .add_systems(
                OnExit(GameState::Run),
                (cleanup_run_entities, clear_pause_sources),
            )
            .add_systems(Update, sync_virtual_time);
    }
}

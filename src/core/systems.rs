//! Core domain: run flow systems and setup.

use bevy::prelude::*;
use rand::Rng;

use crate::core::resources::{GameplayPaused, RunConfig, RunRng, RunScoped};
use crate::core::state::GameState;

pub(crate) fn transition_to_main_menu(mut game_state: ResMut<NextState<GameState>>) {
    game_state.set(GameState::MainMenu);
}

/// Initialize a new run with a fresh seed
pub(crate) fn initialize_run(
    mut run_config: ResMut<RunConfig>,
    mut run_rng: ResMut<RunRng>,
    mut paused: ResMut<GameplayPaused>,
) {
    run_config.seed = rand::rng().random();
    run_rng.reseed(run_config.seed);
    paused.sources.clear();

    info!("Starting new run with seed: {}", run_config.seed);
}

pub(crate) fn cleanup_run_entities(mut commands: Commands, query: Query<Entity, With<RunScoped>>) {
    let mut count = 0;
    for entity in &query {
        commands.entity(entity).despawn();
        count += 1;
    }
    debug!("Cleaned up {} run entities", count);
}

pub(crate) fn clear_pause_sources(mut paused: ResMut<GameplayPaused>) {
    paused.sources.clear();
}

/// Mirror the pause sources onto virtual time so physics and timers freeze too.
pub(crate) fn sync_virtual_time(paused: Res<GameplayPaused>, mut time: ResMut<Time<Virtual>>) {
    if !paused.is_changed() {
        return;
    }

    if paused.is_paused() && !time.is_paused() {
        time.pause();
        debug!("Virtual time paused by {:?}", paused.sources);
    } else if !paused.is_paused() && time.is_paused() {
        time.unpause();
        debug!("Virtual time resumed");
    }
}

pub(crate) fn setup_camera(mut commands: Commands) {
    commands.spawn(Camera2d);
}

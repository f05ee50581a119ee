//! Core domain: game state definitions for the run flow.

use bevy::prelude::*;

#[derive(States, Debug, Hash, Eq, PartialEq, Clone, Default)]
pub enum GameState {
    #[default]
    Boot,
    MainMenu,
    Run,
}

/// Ordering for systems that run when a run begins.
/// Reset clears and reseeds run resources, Populate spawns the arena.
#[derive(SystemSet, Debug, Hash, Eq, PartialEq, Clone, Copy)]
pub enum RunLifecycle {
    Reset,
    Populate,
    ApplyWave,
}

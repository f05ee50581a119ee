//! Waves domain: the run clock and the per-wave arena configuration.

mod clock;
mod systems;

#[cfg(test)]
mod tests;

pub use clock::{
    AdvanceWave, WAVE_BREAK_SOURCE, WaveBreak, WaveChanged, WaveClock, WaveClockTuning,
};

use bevy::prelude::*;

use crate::core::{GameState, RunLifecycle, gameplay_active};
use crate::waves::systems::{
    advance_wave, reset_waves, start_first_wave, tick_wave_break, tick_wave_clock,
};

pub struct WavesPlugin;

impl Plugin for WavesPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<WaveClockTuning>()
            .init_resource::<WaveClock>()
            .init_resource::<WaveBreak>()
            .add_message::<AdvanceWave>()
            .add_message::<WaveChanged>()
            .add_systems(
                OnEnter(GameState::Run),
                start_first_wave.in_set(RunLifecycle::ApplyWave),
            )
            .add_systems(OnExit(GameState::Run), reset_waves)
            .add_systems(
                Update,
                (
                    tick_wave_clock.run_if(gameplay_active),
                    advance_wave,
                    tick_wave_break,
                )
                    .chain()
                    .run_if(in_state(GameState::Run)),
            );
    }
}

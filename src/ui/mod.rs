//! UI domain: in-run HUD and death flow.

mod death;
mod hud;

#[cfg(test)]
mod tests;

pub use death::PlayerDeathState;

use bevy::prelude::*;

use crate::core::{GameState, RunLifecycle};
use crate::ui::death::{detect_player_death, handle_death_screen};
use crate::ui::hud::{
    spawn_hud, update_hearts, update_key_announcement, update_run_clock, update_wave_banner,
};

pub struct UiPlugin;

impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<PlayerDeathState>()
            .add_systems(
                OnEnter(GameState::Run),
                spawn_hud.after(RunLifecycle::Populate),
            )
            .add_systems(OnExit(GameState::Run), reset_death_state)
            .add_systems(
                Update,
                (
                    update_hearts,
                    update_run_clock,
                    update_key_announcement,
                    update_wave_banner,
                    detect_player_death,
                    handle_death_screen,
                )
                    .run_if(in_state(GameState::Run)),
            );
    }
}

fn reset_death_state(mut death_state: ResMut<PlayerDeathState>) {
    *death_state = PlayerDeathState::default();
}

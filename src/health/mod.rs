//! Health domain: hearts, core life, damage, respawn, and death.

mod resources;
mod respawn;
mod state;
mod systems;

#[cfg(test)]
mod tests;

pub use resources::{HealthTuning, RespawnPoint, SafeSpot};
pub use respawn::Respawning;
pub use state::{DamageKind, HealthSignal, PlayerHealth, RegenPhase};
pub use systems::{DEATH_PAUSE_SOURCE, HealthRequest};

use bevy::prelude::*;

use crate::content::{ContentRegistry, point};
use crate::core::{GameState, RunLifecycle, gameplay_active};
use crate::health::respawn::{begin_respawn, run_respawn};
use crate::health::systems::{
    apply_health_requests, check_kill_zone, classify_player_collisions, log_health_signals,
    record_death, tick_player_health,
};

pub struct HealthPlugin;

impl Plugin for HealthPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<HealthTuning>()
            .init_resource::<RespawnPoint>()
            .add_message::<HealthRequest>()
            .add_message::<HealthSignal>()
            .add_systems(
                OnEnter(GameState::Run),
                reset_respawn_point.in_set(RunLifecycle::Populate),
            )
            .add_systems(
                Update,
                (
                    classify_player_collisions,
                    check_kill_zone,
                    apply_health_requests,
                    tick_player_health,
                    (log_health_signals, record_death, begin_respawn),
                    run_respawn,
                )
                    .chain()
                    .run_if(in_state(GameState::Run).and(gameplay_active)),
            );
    }
}

fn reset_respawn_point(
    registry: Option<Res<ContentRegistry>>,
    mut respawn_point: ResMut<RespawnPoint>,
) {
    let fallback = registry
        .map(|r| point(r.level.respawn_anchor) + Vec2::Y * r.level.respawn_lift)
        .unwrap_or_default();
    respawn_point.reset(fallback);
}

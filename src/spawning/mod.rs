//! Spawning domain: platform spawn cycle, enemy spawners, and the rail.

mod cycle;
mod platforms;
mod rail;
mod resources;
mod side;

#[cfg(test)]
mod tests;

pub use cycle::SpawnCycle;
pub use platforms::{
    CyclePlatform, PlatformAnim, StartPlatform, StaticPlatforms, spawn_start_platform,
};
pub use rail::RailSpawner;
pub use resources::PlatformTuning;
pub use side::EnemySpawners;

pub(crate) use platforms::execute_cycle_commands;

use bevy::prelude::*;

use crate::content::ContentRegistry;
use crate::core::{GameState, RunLifecycle, gameplay_active};
use crate::spawning::platforms::{
    animate_platforms, arm_start_platform, run_spawn_cycle, sync_static_platforms,
    tick_start_platforms,
};
use crate::spawning::rail::run_rail_spawner;
use crate::spawning::side::run_enemy_spawners;

pub struct SpawningPlugin;

impl Plugin for SpawningPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<PlatformTuning>()
            .init_resource::<SpawnCycle>()
            .init_resource::<EnemySpawners>()
            .init_resource::<RailSpawner>()
            .init_resource::<StaticPlatforms>()
            .add_systems(
                OnEnter(GameState::Run),
                setup_spawners.in_set(RunLifecycle::Populate),
            )
            .add_systems(OnExit(GameState::Run), reset_spawners)
            .add_systems(
                Update,
                (
                    run_spawn_cycle,
                    animate_platforms,
                    sync_static_platforms,
                    arm_start_platform,
                    tick_start_platforms,
                    run_enemy_spawners,
                    run_rail_spawner,
                )
                    .run_if(in_state(GameState::Run).and(gameplay_active)),
            );
    }
}

/// Load spawner state from level data. Waves configure it right after.
fn setup_spawners(
    registry: Option<Res<ContentRegistry>>,
    tuning: Res<PlatformTuning>,
    mut cycle: ResMut<SpawnCycle>,
    mut spawners: ResMut<EnemySpawners>,
    mut rail: ResMut<RailSpawner>,
    mut static_platforms: ResMut<StaticPlatforms>,
) {
    let Some(registry) = registry else {
        error!("ContentRegistry missing, spawners stay empty");
        return;
    };

    *cycle = SpawnCycle::new(
        registry.level.platform_cycle.clone(),
        Default::default(),
        &tuning,
    );
    *spawners = EnemySpawners::from_registry(&registry);
    *rail = RailSpawner::new(registry.level.rail.clone());
    static_platforms.active = false;

    info!(
        "Spawners ready: {} platform points, {} enemy spawners, {} rail points",
        cycle.def.points.len(),
        spawners.0.len(),
        rail.def.points.len()
    );
}

fn reset_spawners(
    mut cycle: ResMut<SpawnCycle>,
    mut spawners: ResMut<EnemySpawners>,
    mut rail: ResMut<RailSpawner>,
    mut static_platforms: ResMut<StaticPlatforms>,
) {
    *cycle = SpawnCycle::default();
    *spawners = EnemySpawners::default();
    *rail = RailSpawner::default();
    static_platforms.active = false;
}

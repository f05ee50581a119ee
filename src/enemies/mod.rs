//! Enemies domain: birds, shooters, bullets, and their factory.

mod ai;
mod components;
mod resources;
mod spawn;
mod systems;


pub use components::{
    Bird, BirdPattern, Bullet, Enemy, EnemyKind, Shooter, ShooterPattern, ShooterPhase,
};
pub use resources::{BirdTuning, ShooterTuning};
pub use spawn::spawn_enemy;

use bevy::prelude::*;

use crate::core::{GameState, gameplay_active};
use crate::enemies::ai::{apply_bird_knockback, apply_bird_movement, update_shooters};
use crate::enemies::systems::{despawn_out_of_bounds, destroy_bullets_on_platforms};

pub struct EnemiesPlugin;

impl Plugin for EnemiesPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<BirdTuning>()
            .init_resource::<ShooterTuning>()
            .add_systems(
                Update,
                (
                    apply_bird_movement,
                    apply_bird_knockback,
                    update_shooters,
                    destroy_bullets_on_platforms,
                    despawn_out_of_bounds,
                )
                    .run_if(in_state(GameState::Run).and(gameplay_active)),
            );
    }
}

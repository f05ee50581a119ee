//! Movement domain: player bootstrap at the start of a run.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::content::{ContentRegistry, point};
use crate::core::RunScoped;
use crate::health::{HealthTuning, PlayerHealth};
use crate::movement::{AbilityUnlocks, GameLayer, MovementState, MovementTuning, Player};

pub(crate) const PLAYER_SIZE: Vec2 = Vec2::new(24.0, 40.0);

/// Spawn the player above the respawn anchor.
pub(crate) fn spawn_player(
    mut commands: Commands,
    registry: Option<Res<ContentRegistry>>,
    tuning: Res<MovementTuning>,
    health_tuning: Res<HealthTuning>,
    mut unlocks: ResMut<AbilityUnlocks>,
    existing_player: Query<Entity, With<Player>>,
) {
    // Don't spawn if player already exists
    if !existing_player.is_empty() {
        info!("Player already exists, skipping spawn");
        return;
    }

    *unlocks = AbilityUnlocks::default();

    let spawn_pos = match &registry {
        Some(reg) => point(reg.level.respawn_anchor) + Vec2::Y * reg.level.respawn_lift,
        None => {
            warn!("ContentRegistry not available, spawning player at origin");
            Vec2::ZERO
        }
    };

    info!(
        "Spawning player at {:?}: hearts={}, core={}",
        spawn_pos, health_tuning.max_hearts, health_tuning.core_health
    );

    commands.spawn((
        // Identity & Movement
        (
            Player,
            RunScoped,
            MovementState::new(tuning.base_gravity_scale),
            PlayerHealth::new(&health_tuning),
        ),
        // Rendering
        Sprite {
            color: Color::srgb(0.9, 0.9, 0.9),
            custom_size: Some(PLAYER_SIZE),
            ..default()
        },
        Transform::from_translation(spawn_pos.extend(1.0)),
        // Physics
        (
            RigidBody::Dynamic,
            Collider::rectangle(PLAYER_SIZE.x, PLAYER_SIZE.y),
            LockedAxes::ROTATION_LOCKED,
            LinearVelocity::default(),
            GravityScale(0.0), // We handle gravity manually for more control
            Friction::new(0.0),
            CollisionEventsEnabled,
            CollisionLayers::new(
                GameLayer::Player,
                [
                    GameLayer::Ground,
                    GameLayer::Enemy,
                    GameLayer::Projectile,
                    GameLayer::Sensor,
                ],
            ),
        ),
    ));
}

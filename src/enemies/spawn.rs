//! Enemies domain: factory for birds, shooters, and bullets.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::content::ApproachMode;
use crate::core::RunScoped;
use crate::enemies::components::{Bird, Bullet, Enemy, EnemyKind, Shooter};
use crate::enemies::resources::{BirdTuning, ShooterTuning};
use crate::movement::GameLayer;

/// Shared physics for hostile actors: kinematic sensors that only touch the player.
#[derive(Bundle)]
pub struct HostileBodyBundle {
    pub rigid_body: RigidBody,
    pub collider: Collider,
    pub sensor: Sensor,
    pub collision_events: CollisionEventsEnabled,
    pub collision_layers: CollisionLayers,
    pub velocity: LinearVelocity,
}

impl HostileBodyBundle {
    pub fn new(size: Vec2, layer: GameLayer, velocity: Vec2) -> Self {
        Self {
            rigid_body: RigidBody::Kinematic,
            collider: Collider::rectangle(size.x, size.y),
            sensor: Sensor,
            collision_events: CollisionEventsEnabled,
            collision_layers: CollisionLayers::new(layer, [GameLayer::Player]),
            velocity: LinearVelocity(velocity),
        }
    }
}

/// Spawn an enemy of `kind` at `position`.
pub fn spawn_enemy(
    commands: &mut Commands,
    kind: EnemyKind,
    approach: ApproachMode,
    position: Vec2,
    bird_tuning: &BirdTuning,
    shooter_tuning: &ShooterTuning,
) -> Entity {
    match kind {
        EnemyKind::Bird(pattern) => {
            let bird = Bird::new(approach, pattern, position);
            let velocity = bird.base_direction() * bird_tuning.speed;
            let rotation = match approach {
                ApproachMode::Side => Quat::IDENTITY,
                ApproachMode::Top => Quat::from_rotation_z(std::f32::consts::FRAC_PI_2),
            };
            // Sprite art faces left; flip when travelling right or up
            let flip_x = match approach {
                ApproachMode::Side => !bird.from_right,
                ApproachMode::Top => !bird.from_top,
            };
            let size = bird_tuning.size();
            let collider_size = match approach {
                ApproachMode::Side => size,
                ApproachMode::Top => Vec2::new(size.y, size.x),
            };

            debug!("Spawning bird {:?} ({:?}) at {:?}", pattern, approach, position);
            commands
                .spawn((
                    (Enemy, bird, RunScoped),
                    Sprite {
                        color: Color::srgb(0.85, 0.35, 0.3),
                        custom_size: Some(size),
                        flip_x,
                        ..default()
                    },
                    Transform::from_translation(position.extend(2.0)).with_rotation(rotation),
                    HostileBodyBundle::new(collider_size, GameLayer::Enemy, velocity),
                ))
                .id()
        }
        EnemyKind::Shooter(pattern) => {
            let size = shooter_tuning.size();

            debug!("Spawning shooter {:?} at {:?}", pattern, position);
            commands
                .spawn((
                    (Enemy, Shooter::new(pattern, position), RunScoped),
                    Sprite {
                        color: Color::srgb(0.7, 0.3, 0.75),
                        custom_size: Some(size),
                        flip_x: position.x > 0.0,
                        ..default()
                    },
                    Transform::from_translation(position.extend(2.0)),
                    HostileBodyBundle::new(size, GameLayer::Enemy, Vec2::ZERO),
                ))
                .id()
        }
    }
}

/// Spawn a bullet travelling horizontally toward the arena centre.
pub fn spawn_bullet(commands: &mut Commands, position: Vec2, tuning: &ShooterTuning) -> Entity {
    let direction = if position.x > 0.0 { -1.0 } else { 1.0 };
    let size = tuning.bullet_size();

    commands
        .spawn((
            (Bullet, RunScoped),
            Sprite {
                color: Color::srgb(1.0, 0.8, 0.3),
                custom_size: Some(size),
                ..default()
            },
            Transform::from_translation(position.extend(3.0)),
            HostileBodyBundle::new(
                size,
                GameLayer::Projectile,
                Vec2::new(direction * tuning.bullet_speed, 0.0),
            ),
        ))
        .id()
}

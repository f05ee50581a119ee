//! Enemies domain: shooter movement and firing.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::enemies::components::{Enemy, Shooter, ShooterPattern, ShooterPhase};
use crate::enemies::resources::ShooterTuning;
use crate::enemies::spawn::spawn_bullet;

/// What a shooter does this frame.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub(crate) struct ShooterStep {
    /// Vertical velocity for sweeping shooters
    pub velocity_y: f32,
    /// Eased height for stationed shooters
    pub target_y: Option<f32>,
    pub fire: bool,
}

fn ease(current: f32, target: f32, rate: f32, dt: f32) -> f32 {
    current + (target - current) * (rate * dt).clamp(0.0, 1.0)
}

pub(crate) fn step_shooter(
    shooter: &mut Shooter,
    y: f32,
    dt: f32,
    tuning: &ShooterTuning,
) -> ShooterStep {
    let mut step = ShooterStep::default();

    match shooter.pattern {
        ShooterPattern::Sweeping => {
            step.velocity_y = if shooter.from_top {
                -tuning.sweep_speed
            } else {
                tuning.sweep_speed
            };
            shooter.fire_timer += dt;
            if shooter.fire_timer >= tuning.fire_rate {
                shooter.fire_timer -= tuning.fire_rate;
                shooter.shots_fired += 1;
                step.fire = true;
            }
        }
        ShooterPattern::Stationed => match shooter.phase {
            ShooterPhase::Approaching => {
                if (y - tuning.shoot_y).abs() <= tuning.arrive_tolerance {
                    shooter.phase = ShooterPhase::Firing;
                    shooter.fire_timer = 0.0;
                } else {
                    step.target_y = Some(ease(y, tuning.shoot_y, tuning.approach_rate, dt));
                }
            }
            ShooterPhase::Firing => {
                shooter.fire_timer += dt;
                if shooter.fire_timer >= tuning.fire_rate {
                    shooter.fire_timer -= tuning.fire_rate;
                    shooter.shots_fired += 1;
                    step.fire = true;
                    if shooter.shots_fired >= tuning.fire_count {
                        shooter.phase = ShooterPhase::Lingering(tuning.fire_rate * 2.0);
                    }
                }
            }
            ShooterPhase::Lingering(remaining) => {
                let remaining = remaining - dt;
                shooter.phase = if remaining <= 0.0 {
                    ShooterPhase::Exiting
                } else {
                    ShooterPhase::Lingering(remaining)
                };
            }
            ShooterPhase::Exiting => {
                step.target_y = Some(ease(y, tuning.exit_y, tuning.approach_rate * 0.5, dt));
            }
        },
    }

    step
}

pub(crate) fn update_shooters(
    mut commands: Commands,
    time: Res<Time>,
    tuning: Res<ShooterTuning>,
    mut query: Query<(&mut Shooter, &mut Transform, &mut LinearVelocity, &mut Sprite), With<Enemy>>,
) {
    let dt = time.delta_secs();
    let half_width = tuning.size().x * 0.5;

    for (mut shooter, mut transform, mut velocity, mut sprite) in &mut query {
        let position = transform.translation.truncate();
        // Face the centre of the arena
        let faces_left = position.x > 0.0;
        sprite.flip_x = faces_left;

        let step = step_shooter(&mut shooter, position.y, dt, &tuning);
        velocity.0 = Vec2::new(0.0, step.velocity_y);
        if let Some(y) = step.target_y {
            transform.translation.y = y;
        }

        if step.fire {
            let muzzle = position + Vec2::new(if faces_left { -half_width } else { half_width }, -4.0);
            spawn_bullet(&mut commands, muzzle, &tuning);
            debug!(
                "Shooter {:?} fired shot {} at {:?}",
                shooter.pattern, shooter.shots_fired, muzzle
            );
        }
    }
}

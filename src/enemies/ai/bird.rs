//! Enemies domain: bird flight patterns and contact knockback.

use avian2d::prelude::*;
use bevy::ecs::message::MessageReader;
use bevy::prelude::*;

use crate::content::ApproachMode;
use crate::enemies::components::{Bird, BirdPattern, Enemy};
use crate::enemies::resources::BirdTuning;
use crate::movement::Player;

/// Velocity for this frame. A feint reverses once, a redirect veers once;
/// both latch `turned`. Returns the velocity and whether the bird just turned.
pub(crate) fn bird_velocity(bird: &mut Bird, nose: Vec2, speed: f32) -> (Vec2, bool) {
    let base = bird.base_direction() * speed;
    let just_turned = !bird.turned
        && bird.pattern != BirdPattern::Straight
        && bird.crossed_centre(nose);
    if just_turned {
        bird.turned = true;
    }

    let velocity = match (bird.pattern, bird.turned) {
        (BirdPattern::Feint, true) => -base,
        (BirdPattern::Redirect, true) => match bird.approach {
            ApproachMode::Side => {
                let vertical = if bird.from_top { -speed } else { speed };
                Vec2::new(base.x, vertical)
            }
            ApproachMode::Top => {
                let horizontal = if bird.from_right { -speed } else { speed };
                Vec2::new(horizontal, base.y)
            }
        },
        _ => base,
    };

    (velocity, just_turned)
}

/// Knockback applied to the player when a bird touches them.
pub(crate) fn bird_knockback(bird: &Bird, bird_pos: Vec2, player_pos: Vec2, force: Vec2) -> Vec2 {
    let push_left = match bird.approach {
        ApproachMode::Side => bird.from_right,
        ApproachMode::Top => bird_pos.x >= player_pos.x,
    };
    if push_left {
        Vec2::new(-force.x, force.y)
    } else {
        force
    }
}

pub(crate) fn apply_bird_movement(
    tuning: Res<BirdTuning>,
    mut query: Query<(&mut Bird, &Transform, &mut LinearVelocity, &mut Sprite), With<Enemy>>,
) {
    let half_length = tuning.size().x * 0.5;

    for (mut bird, transform, mut velocity, mut sprite) in &mut query {
        let heading = velocity.0.normalize_or(bird.base_direction());
        let nose = transform.translation.truncate() + heading * half_length;

        let (new_velocity, just_turned) = bird_velocity(&mut bird, nose, tuning.speed);
        velocity.0 = new_velocity;

        if just_turned {
            if bird.pattern == BirdPattern::Feint {
                sprite.flip_x = !sprite.flip_x;
            }
            debug!("Bird {:?} turned at {:?}", bird.pattern, nose);
        }
    }
}

pub(crate) fn apply_bird_knockback(
    mut collision_events: MessageReader<CollisionStart>,
    tuning: Res<BirdTuning>,
    bird_query: Query<(&Bird, &Transform)>,
    mut player_query: Query<(&Transform, &mut LinearVelocity), With<Player>>,
) {
    for event in collision_events.read() {
        let pairs = [
            (event.collider1, event.collider2),
            (event.collider2, event.collider1),
        ];

        for (bird_entity, player_entity) in pairs {
            let Ok((bird, bird_transform)) = bird_query.get(bird_entity) else {
                continue;
            };
            let Ok((player_transform, mut velocity)) = player_query.get_mut(player_entity) else {
                continue;
            };

            let impulse = bird_knockback(
                bird,
                bird_transform.translation.truncate(),
                player_transform.translation.truncate(),
                tuning.knockback(),
            );
            velocity.0 += impulse;
            debug!("Bird knockback {:?}", impulse);
        }
    }
}

//! Movement domain: locomotion systems for timers, abilities, and physics.

use avian2d::prelude::*;
use bevy::ecs::message::MessageWriter;
use bevy::prelude::*;

use crate::content::ArenaDefaults;
use crate::health::Respawning;
use crate::movement::{
    AbilityUnlocks, Facing, LedgeHang, MovementEvent, MovementInput, MovementState,
    MovementTuning, Player,
};

/// Player under direct control: not hanging from a ledge, not respawning.
type Controlled = (With<Player>, Without<LedgeHang>, Without<Respawning>);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum JumpKind {
    Ground,
    Double,
}

/// Move `current` toward `target` by at most `max_delta`.
pub(crate) fn approach(current: f32, target: f32, max_delta: f32) -> f32 {
    let delta = target - current;
    current + delta.signum() * delta.abs().min(max_delta)
}

pub(crate) fn decide_jump(state: &MovementState, unlocks: &AbilityUnlocks) -> Option<JumpKind> {
    if state.on_ground || state.coyote_timer > 0.0 {
        Some(JumpKind::Ground)
    } else if unlocks.double_jump && !state.double_jump_used {
        Some(JumpKind::Double)
    } else {
        None
    }
}

/// Launch a jump: vertical velocity is replaced, not added to.
pub(crate) fn begin_jump(
    state: &mut MovementState,
    kind: JumpKind,
    velocity_y: &mut f32,
    tuning: &MovementTuning,
) {
    *velocity_y = tuning.jump_velocity;
    state.jump_hold_timer = 0.0;
    state.is_gliding = false;
    state.glide_hold_timer = 0.0;
    state.gravity_scale = tuning.base_gravity_scale;
    match kind {
        JumpKind::Ground => state.coyote_timer = 0.0,
        JumpKind::Double => state.double_jump_used = true,
    }
}

/// Track how long jump is held. Releasing early while rising trims the
/// jump. Returns true when the trim was applied.
pub(crate) fn update_jump_hold(
    state: &mut MovementState,
    held: bool,
    velocity_y: &mut f32,
    dt: f32,
    tuning: &MovementTuning,
) -> bool {
    if held {
        state.jump_hold_timer = (state.jump_hold_timer + dt).min(tuning.max_hold_time);
        return false;
    }

    let released_early =
        state.jump_hold_timer > 0.0 && state.jump_hold_timer < tuning.max_hold_time;
    state.jump_hold_timer = 0.0;

    if released_early && *velocity_y > 0.0 {
        *velocity_y *= tuning.variable_jump_multiplier;
        true
    } else {
        false
    }
}

/// Glide begins after falling with jump held for the glide delay and ends
/// on release or landing.
pub(crate) fn update_glide(
    state: &mut MovementState,
    held: bool,
    velocity_y: f32,
    dt: f32,
    tuning: &MovementTuning,
) -> Option<MovementEvent> {
    if !state.on_ground && velocity_y < 0.0 && held {
        state.glide_hold_timer += dt;
        if !state.is_gliding && state.glide_hold_timer >= tuning.glide_delay {
            state.is_gliding = true;
            return Some(MovementEvent::GlideStarted);
        }
        return None;
    }

    if !held {
        state.glide_hold_timer = 0.0;
    }
    if state.is_gliding && (!held || state.on_ground) {
        state.is_gliding = false;
        state.glide_hold_timer = 0.0;
        return Some(MovementEvent::GlideEnded);
    }
    None
}

pub(crate) fn can_dash(state: &MovementState) -> bool {
    state.dash_cooldown_timer <= 0.0 && !state.is_dashing && !state.air_dash_used
}

/// Gravity multiplier for this step.
pub(crate) fn next_gravity_scale(
    state: &MovementState,
    velocity_y: f32,
    dt: f32,
    tuning: &MovementTuning,
) -> f32 {
    if state.is_dashing {
        return 0.0;
    }
    if state.is_gliding {
        return tuning.glide_gravity_scale;
    }

    let step = tuning.gravity_change_speed * dt;
    let holding_up = state.jump_hold_timer > 0.0
        && state.jump_hold_timer <= tuning.max_hold_time
        && velocity_y > 0.0;
    let target = if holding_up {
        tuning.base_gravity_scale * tuning.hold_gravity_factor
    } else {
        tuning.base_gravity_scale
    };
    approach(state.gravity_scale, target, step)
}

pub(crate) fn update_timers(
    time: Res<Time>,
    mut query: Query<&mut MovementState, With<Player>>,
) {
    let dt = time.delta_secs();

    for mut state in &mut query {
        if state.dash_cooldown_timer > 0.0 {
            state.dash_cooldown_timer -= dt;
        }

        if state.is_dashing {
            state.dash_timer -= dt;
            if state.dash_timer <= 0.0 {
                state.is_dashing = false;
            }
        }

        if state.regrab_timer > 0.0 {
            state.regrab_timer -= dt;
            if state.regrab_timer <= 0.0 {
                state.can_grab_ledge = true;
            }
        }
    }
}

pub(crate) fn apply_ledge_hang(
    mut commands: Commands,
    time: Res<Time>,
    input: Res<MovementInput>,
    tuning: Res<MovementTuning>,
    mut events: MessageWriter<MovementEvent>,
    mut query: Query<
        (
            Entity,
            &mut LedgeHang,
            &mut MovementState,
            &mut Transform,
            &mut LinearVelocity,
        ),
        (With<Player>, Without<Respawning>),
    >,
    platforms: Query<(), Without<Player>>,
) {
    for (entity, mut hang, mut state, mut transform, mut velocity) in &mut query {
        velocity.0 = Vec2::ZERO;

        // Platform retired underneath us
        if !platforms.contains(hang.platform) {
            commands.entity(entity).remove::<LedgeHang>();
            state.regrab_timer = tuning.ledge_regrab_delay;
            debug!("Ledge platform vanished, dropping");
            continue;
        }

        hang.elapsed += time.delta_secs();

        if input.climb_just_pressed || hang.elapsed >= tuning.ledge_climb_delay {
            transform.translation = hang.climb.extend(transform.translation.z);
            commands.entity(entity).remove::<LedgeHang>();
            state.regrab_timer = tuning.ledge_regrab_delay;
            events.write(MovementEvent::LedgeClimbed);
            debug!("Climbed ledge to {:?}", hang.climb);
        } else {
            transform.translation = hang.grab.extend(transform.translation.z);
        }
    }
}

pub(crate) fn apply_horizontal_movement(
    time: Res<Time>,
    input: Res<MovementInput>,
    tuning: Res<MovementTuning>,
    mut query: Query<(&MovementState, &mut LinearVelocity), Controlled>,
) {
    let dt = time.delta_secs();

    for (state, mut velocity) in &mut query {
        // No horizontal control while dashing
        if state.is_dashing {
            continue;
        }

        let speed = if state.is_gliding {
            tuning.glide_speed
        } else {
            tuning.move_speed
        };
        let target_vx = input.axis.x * speed;
        let rate = if target_vx.abs() > 0.01 {
            tuning.accel
        } else {
            tuning.decel
        };

        velocity.x = approach(velocity.x, target_vx, rate * dt);
    }
}

pub(crate) fn apply_jump(
    time: Res<Time>,
    input: Res<MovementInput>,
    tuning: Res<MovementTuning>,
    unlocks: Res<AbilityUnlocks>,
    mut events: MessageWriter<MovementEvent>,
    mut query: Query<(&mut MovementState, &mut LinearVelocity), Controlled>,
) {
    let dt = time.delta_secs();

    for (mut state, mut velocity) in &mut query {
        if input.jump_just_pressed {
            if let Some(kind) = decide_jump(&state, &unlocks) {
                let was_gliding = state.is_gliding;
                begin_jump(&mut state, kind, &mut velocity.y, &tuning);
                if was_gliding {
                    events.write(MovementEvent::GlideEnded);
                }
                events.write(match kind {
                    JumpKind::Ground => MovementEvent::Jumped,
                    JumpKind::Double => MovementEvent::DoubleJumped,
                });
                debug!("{:?} jump, vy={}", kind, velocity.y);
            }
        }

        if update_jump_hold(&mut state, input.jump_held, &mut velocity.y, dt, &tuning) {
            debug!("Jump released early, vy trimmed to {}", velocity.y);
        }
    }
}

pub(crate) fn apply_glide(
    time: Res<Time>,
    input: Res<MovementInput>,
    tuning: Res<MovementTuning>,
    unlocks: Res<AbilityUnlocks>,
    mut events: MessageWriter<MovementEvent>,
    mut query: Query<(&mut MovementState, &LinearVelocity), Controlled>,
) {
    for (mut state, velocity) in &mut query {
        if !unlocks.glide {
            if state.is_gliding {
                state.is_gliding = false;
                events.write(MovementEvent::GlideEnded);
            }
            continue;
        }

        if let Some(event) = update_glide(
            &mut state,
            input.jump_held,
            velocity.y,
            time.delta_secs(),
            &tuning,
        ) {
            events.write(event);
        }
    }
}

pub(crate) fn apply_dash(
    input: Res<MovementInput>,
    tuning: Res<MovementTuning>,
    unlocks: Res<AbilityUnlocks>,
    mut events: MessageWriter<MovementEvent>,
    mut query: Query<(&mut MovementState, &mut LinearVelocity), Controlled>,
) {
    if !input.dash_just_pressed || !unlocks.dash {
        return;
    }

    for (mut state, mut velocity) in &mut query {
        if !can_dash(&state) {
            continue;
        }

        state.is_dashing = true;
        state.dash_timer = tuning.dash_time;
        state.dash_cooldown_timer = tuning.dash_cooldown;
        if !state.on_ground {
            state.air_dash_used = true;
        }

        velocity.0 = Vec2::new(state.facing.sign() * tuning.dash_speed, 0.0);
        events.write(MovementEvent::Dashed);
        debug!("Dash {:?}", state.facing);
    }
}

pub(crate) fn apply_gravity(
    time: Res<Time>,
    tuning: Res<MovementTuning>,
    mut query: Query<(&mut MovementState, &mut LinearVelocity), Controlled>,
) {
    let dt = time.delta_secs();

    for (mut state, mut velocity) in &mut query {
        state.gravity_scale = next_gravity_scale(&state, velocity.y, dt, &tuning);
        velocity.y -= tuning.gravity * state.gravity_scale * dt;
    }
}

pub(crate) fn update_facing(
    input: Res<MovementInput>,
    mut query: Query<&mut MovementState, Controlled>,
) {
    for mut state in &mut query {
        // Don't update facing during dash
        if state.is_dashing {
            continue;
        }

        if input.axis.x > 0.01 {
            state.facing = Facing::Right;
        } else if input.axis.x < -0.01 {
            state.facing = Facing::Left;
        }
    }
}

/// Keep the player inside the play zone.
pub(crate) fn clamp_to_zone(
    arena: Res<ArenaDefaults>,
    mut query: Query<&mut Transform, With<Player>>,
) {
    for mut transform in &mut query {
        transform.translation.x = transform.translation.x.clamp(-arena.zone_x, arena.zone_x);
        transform.translation.y = transform.translation.y.min(arena.zone_y);
    }
}

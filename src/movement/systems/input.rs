//! Movement domain: input sampling and jump-key shuffling.

use bevy::prelude::*;

use crate::core::RunRng;
use crate::movement::{JumpBinding, MovementInput, MovementTuning};

pub(crate) fn read_input(
    keyboard: Res<ButtonInput<KeyCode>>,
    binding: Res<JumpBinding>,
    mut input: ResMut<MovementInput>,
) {
    // Horizontal axis
    let mut x: f32 = 0.0;
    if keyboard.pressed(KeyCode::KeyA) || keyboard.pressed(KeyCode::ArrowLeft) {
        x -= 1.0;
    }
    if keyboard.pressed(KeyCode::KeyD) || keyboard.pressed(KeyCode::ArrowRight) {
        x += 1.0;
    }

    let jump_key = binding.current.key_code();
    input.axis = Vec2::new(x.clamp(-1.0, 1.0), 0.0);
    input.jump_just_pressed = keyboard.just_pressed(jump_key);
    input.jump_held = keyboard.pressed(jump_key);
    input.jump_just_released = keyboard.just_released(jump_key);
    input.dash_just_pressed = keyboard.just_pressed(KeyCode::ShiftLeft);
    input.climb_just_pressed =
        keyboard.just_pressed(KeyCode::KeyW) || keyboard.just_pressed(KeyCode::ArrowUp);
}

pub(crate) fn reset_jump_binding(mut binding: ResMut<JumpBinding>, mut rng: ResMut<RunRng>) {
    binding.reset(&mut rng.0);
}

pub(crate) fn shuffle_jump_key(
    time: Res<Time>,
    tuning: Res<MovementTuning>,
    mut binding: ResMut<JumpBinding>,
    mut rng: ResMut<RunRng>,
) {
    if binding.tick(time.delta_secs(), tuning.key_shuffle_interval, &mut rng.0) {
        info!("Jump key is now {}", binding.current.label());
    }
}

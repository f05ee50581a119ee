//! Movement domain: system modules for locomotion updates.

pub(crate) mod collisions;
pub(crate) mod input;
pub(crate) mod movement;
pub(crate) mod visuals;

pub(crate) use collisions::{detect_ground, detect_ledge};
pub(crate) use input::{read_input, reset_jump_binding, shuffle_jump_key};
pub(crate) use movement::{
    apply_dash, apply_glide, apply_gravity, apply_horizontal_movement, apply_jump,
    apply_ledge_hang, clamp_to_zone, update_facing, update_timers,
};
pub(crate) use visuals::update_player_visuals;

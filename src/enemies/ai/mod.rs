//! Enemies domain: AI system modules for birds and shooters.

pub(crate) mod bird;
pub(crate) mod shooter;

pub(crate) use bird::{apply_bird_knockback, apply_bird_movement};
pub(crate) use shooter::update_shooters;

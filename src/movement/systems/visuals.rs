//! Movement domain: sprite facing and ability tint.

use bevy::prelude::*;

use crate::movement::{Facing, LedgeHang, MovementState, Player};

const NORMAL_COLOR: Color = Color::srgb(0.9, 0.9, 0.9);
const GLIDE_COLOR: Color = Color::srgb(0.6, 0.85, 1.0);
const DASH_COLOR: Color = Color::srgb(1.0, 0.95, 0.6);
const HANG_COLOR: Color = Color::srgb(0.8, 0.95, 0.75);

pub(crate) fn update_player_visuals(
    mut query: Query<(&MovementState, Has<LedgeHang>, &mut Sprite), With<Player>>,
) {
    for (state, hanging, mut sprite) in &mut query {
        sprite.flip_x = state.facing == Facing::Left;

        let tint = if hanging {
            HANG_COLOR
        } else if state.is_dashing {
            DASH_COLOR
        } else if state.is_gliding {
            GLIDE_COLOR
        } else {
            NORMAL_COLOR
        };
        // Alpha belongs to the respawn fade
        let alpha = sprite.color.alpha();
        sprite.color = tint.with_alpha(alpha);
    }
}

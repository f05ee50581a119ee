//! Movement domain: ground and ledge detection systems.

use avian2d::prelude::*;
use bevy::ecs::message::MessageWriter;
use bevy::prelude::*;

use crate::health::Respawning;
use crate::movement::{
    Facing, GameLayer, Ledge, LedgeHang, LedgePoints, MovementEvent, MovementState,
    MovementTuning, Player,
};

/// Apply the result of this frame's ground probe to the movement state.
pub(crate) fn update_ground_contact(
    state: &mut MovementState,
    grounded: bool,
    dt: f32,
    tuning: &MovementTuning,
) {
    if grounded {
        state.on_ground = true;
        state.double_jump_used = false;
        state.coyote_timer = tuning.coyote_time;
        state.air_dash_used = false;
    } else {
        state.on_ground = false;
        state.coyote_timer -= dt;
        if state.is_dashing {
            state.air_dash_used = true;
        }
    }
}

pub(crate) fn detect_ground(
    spatial_query: SpatialQuery,
    time: Res<Time>,
    tuning: Res<MovementTuning>,
    mut query: Query<(&Transform, &Collider, &mut MovementState), (With<Player>, Without<LedgeHang>)>,
) {
    // Filter to only hit Ground layer entities (not enemies, bullets, etc.)
    let ground_filter = SpatialQueryFilter::from_mask(GameLayer::Ground);
    let probe = Collider::circle(tuning.ground_check_radius);

    for (transform, collider, mut state) in &mut query {
        let was_on_ground = state.on_ground;

        let player_half_height = match collider.shape_scaled().as_cuboid() {
            Some(c) => c.half_extents.y,
            None => 20.0,
        };
        let feet = transform.translation.truncate() - Vec2::new(0.0, player_half_height);

        let grounded = !spatial_query
            .shape_intersections(&probe, feet, 0.0, &ground_filter)
            .is_empty();

        update_ground_contact(&mut state, grounded, time.delta_secs(), &tuning);

        if state.on_ground && !was_on_ground {
            debug!("Landed at {:?}", feet);
        } else if !state.on_ground && was_on_ground {
            debug!("Left ground, coyote {:.2}s", state.coyote_timer);
        }
    }
}

/// Pick the ledge on the side the player approaches from.
/// Facing right reaches the platform's left edge, so the grab point for the
/// facing direction is the one on the opposite side of the platform centre.
pub(crate) fn choose_ledge(ledges: &[Ledge], facing: Facing) -> Option<Ledge> {
    let want_left_edge = facing == Facing::Right;
    ledges
        .iter()
        .find(|ledge| (ledge.grab.x < 0.0) == want_left_edge)
        .or_else(|| ledges.first())
        .copied()
}

/// A frozen, respawning body must not latch onto platforms that appear
/// next to it.
pub(crate) fn can_probe_ledge(state: &MovementState, respawning: bool) -> bool {
    !respawning && state.can_grab_ledge && !state.on_ground
}

pub(crate) fn detect_ledge(
    mut commands: Commands,
    spatial_query: SpatialQuery,
    tuning: Res<MovementTuning>,
    mut events: MessageWriter<MovementEvent>,
    mut player_query: Query<
        (
            Entity,
            &Transform,
            &Collider,
            &mut MovementState,
            &mut LinearVelocity,
            Has<Respawning>,
        ),
        (With<Player>, Without<LedgeHang>),
    >,
    platform_query: Query<(&Transform, &LedgePoints), Without<Player>>,
) {
    let ground_filter = SpatialQueryFilter::from_mask(GameLayer::Ground);

    for (entity, transform, collider, mut state, mut velocity, respawning) in &mut player_query {
        if !can_probe_ledge(&state, respawning) {
            continue;
        }

        let half_extents = match collider.shape_scaled().as_cuboid() {
            Some(c) => Vec2::new(c.half_extents.x, c.half_extents.y),
            None => Vec2::new(12.0, 20.0),
        };
        let probe_origin = transform.translation.truncate()
            + Vec2::new(state.facing.sign() * half_extents.x, half_extents.y);
        let radius = if state.is_gliding {
            tuning.glide_ledge_probe_radius
        } else {
            tuning.ledge_probe_radius
        };

        let hits = spatial_query.shape_intersections(
            &Collider::circle(radius),
            probe_origin,
            0.0,
            &ground_filter,
        );

        let Some((platform, platform_pos, ledge)) = hits.iter().find_map(|&hit| {
            let (platform_transform, points) = platform_query.get(hit).ok()?;
            let ledge = choose_ledge(&points.0, state.facing)?;
            Some((hit, platform_transform.translation.truncate(), ledge))
        }) else {
            continue;
        };

        if state.is_gliding {
            state.is_gliding = false;
            state.glide_hold_timer = 0.0;
            events.write(MovementEvent::GlideEnded);
        }
        state.is_dashing = false;
        state.can_grab_ledge = false;
        velocity.0 = Vec2::ZERO;

        commands.entity(entity).insert(LedgeHang {
            platform,
            grab: platform_pos + ledge.grab,
            climb: platform_pos + ledge.climb,
            elapsed: 0.0,
        });
        events.write(MovementEvent::LedgeGrabbed);
        debug!("Grabbed ledge on {:?} facing {:?}", platform, state.facing);
    }
}

//! Enemies domain: bullet impacts and out-of-bounds cleanup.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::content::ArenaDefaults;
use crate::enemies::components::{Bullet, Enemy};
use crate::movement::GameLayer;

pub(crate) fn outside_arena(position: Vec2, arena: &ArenaDefaults) -> bool {
    position.x.abs() > arena.despawn_x || position.y.abs() > arena.despawn_y
}

/// Bullets are absorbed by any platform they overlap.
pub(crate) fn destroy_bullets_on_platforms(
    mut commands: Commands,
    spatial_query: SpatialQuery,
    query: Query<(Entity, &Transform, &Collider), With<Bullet>>,
) {
    let ground_filter = SpatialQueryFilter::from_mask(GameLayer::Ground);

    for (entity, transform, collider) in &query {
        let hits = spatial_query.shape_intersections(
            collider,
            transform.translation.truncate(),
            0.0,
            &ground_filter,
        );
        if !hits.is_empty() {
            commands.entity(entity).despawn();
        }
    }
}

pub(crate) fn despawn_out_of_bounds(
    mut commands: Commands,
    arena: Res<ArenaDefaults>,
    query: Query<(Entity, &Transform), Or<(With<Enemy>, With<Bullet>)>>,
) {
    for (entity, transform) in &query {
        if outside_arena(transform.translation.truncate(), &arena) {
            commands.entity(entity).despawn();
        }
    }
}

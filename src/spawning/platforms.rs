//! Spawning domain: platform entities, their animations, and the start and
//! static platforms.

use avian2d::prelude::*;
use bevy::ecs::message::MessageReader;
use bevy::prelude::*;
use std::f32::consts::TAU;

use crate::content::{ContentRegistry, PlatformKindDef, point};
use crate::core::{RunRng, RunScoped};
use crate::movement::{GameLayer, Ground, Ledge, LedgePoints, Player};
use crate::spawning::cycle::{CycleCommand, SpawnCycle};
use crate::spawning::resources::PlatformTuning;

/// Platform owned by the spawn cycle.
#[derive(Component, Debug, Clone, Copy)]
pub struct CyclePlatform {
    pub slot: u64,
}

/// One of the two wave-toggled static platforms.
#[derive(Component, Debug)]
pub struct StaticPlatform;

/// Platform under the respawn anchor. Despawns a while after first contact.
#[derive(Component, Debug, Default)]
pub struct StartPlatform {
    pub touched_for: Option<f32>,
}

impl StartPlatform {
    /// Advance the fuse. Returns true once the platform should go.
    pub fn tick(&mut self, dt: f32, lifetime: f32) -> bool {
        match self.touched_for.as_mut() {
            Some(elapsed) => {
                *elapsed += dt;
                *elapsed >= lifetime
            }
            None => false,
        }
    }
}

/// Desired state of the static pair, set by waves.
#[derive(Resource, Debug, Default)]
pub struct StaticPlatforms {
    pub active: bool,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AnimPhase {
    Appearing(f32),
    Steady,
    Warning(f32),
    Vanishing(f32),
}

/// Scale animation for cycle platforms.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct PlatformAnim {
    pub phase: AnimPhase,
    pub base_y: f32,
}

impl PlatformAnim {
    pub fn new(base_y: f32) -> Self {
        Self {
            phase: AnimPhase::Appearing(0.0),
            base_y,
        }
    }

    pub fn begin_warning(&mut self) {
        self.phase = AnimPhase::Warning(0.0);
    }

    pub fn begin_vanish(&mut self) {
        self.phase = AnimPhase::Vanishing(0.0);
    }

    /// Advance by `dt`. Returns true when the vanish animation has finished.
    pub fn advance(&mut self, dt: f32, tuning: &PlatformTuning) -> bool {
        match self.phase {
            AnimPhase::Appearing(t) => {
                let t = t + dt;
                self.phase = if t >= tuning.anim_duration {
                    AnimPhase::Steady
                } else {
                    AnimPhase::Appearing(t)
                };
                false
            }
            AnimPhase::Steady => false,
            AnimPhase::Warning(t) => {
                self.phase = AnimPhase::Warning(t + dt);
                false
            }
            AnimPhase::Vanishing(t) => {
                let t = t + dt;
                self.phase = AnimPhase::Vanishing(t);
                t >= tuning.anim_duration
            }
        }
    }

    /// Current `(scale, vertical offset)`.
    pub fn sample(&self, tuning: &PlatformTuning) -> (f32, f32) {
        let progress = |t: f32| {
            if tuning.anim_duration <= 0.0 {
                1.0
            } else {
                (t / tuning.anim_duration).clamp(0.0, 1.0)
            }
        };
        let (scale, offset) = match self.phase {
            AnimPhase::Appearing(t) => (ease_in_out(progress(t)), 0.0),
            AnimPhase::Steady => (1.0, 0.0),
            AnimPhase::Warning(t) => (
                1.0 + (t * tuning.pulse_frequency * TAU).sin() * tuning.pulse_amplitude,
                (t * tuning.shake_frequency * TAU).sin() * tuning.shake_amplitude,
            ),
            AnimPhase::Vanishing(t) => (1.0 - ease_in_out(progress(t)), 0.0),
        };
        (scale.max(tuning.min_scale), offset)
    }
}

/// Smoothstep ease over `[0, 1]`.
pub fn ease_in_out(p: f32) -> f32 {
    let p = p.clamp(0.0, 1.0);
    p * p * (3.0 - 2.0 * p)
}

/// Spawn a solid platform of `kind` centred at `position`.
pub fn spawn_platform(commands: &mut Commands, kind: &PlatformKindDef, position: Vec2) -> Entity {
    let size = point(kind.size);
    let ledges = kind
        .ledges
        .iter()
        .map(|l| Ledge {
            grab: point(l.grab),
            climb: point(l.climb),
        })
        .collect();

    commands
        .spawn((
            (Ground, RunScoped, LedgePoints(ledges)),
            Sprite {
                color: Color::srgb(kind.color.0, kind.color.1, kind.color.2),
                custom_size: Some(size),
                ..default()
            },
            Transform::from_translation(position.extend(0.0)),
            RigidBody::Static,
            Collider::rectangle(size.x, size.y),
            CollisionLayers::new(GameLayer::Ground, [GameLayer::Player]),
        ))
        .id()
}

/// Spawn the start platform at the respawn anchor.
pub fn spawn_start_platform(commands: &mut Commands, registry: &ContentRegistry) -> Option<Entity> {
    let level = &registry.level;
    let Some(kind) = registry
        .platform_kind(&level.start_platform_kind)
        .or_else(|| level.platform_cycle.kinds.first())
    else {
        warn!("No platform kind available for the start platform");
        return None;
    };

    let entity = spawn_platform(commands, kind, point(level.respawn_anchor));
    commands.entity(entity).insert(StartPlatform::default());
    Some(entity)
}

pub(crate) fn execute_cycle_commands(
    commands: &mut Commands,
    cycle: &SpawnCycle,
    orders: Vec<CycleCommand>,
    tuning: &PlatformTuning,
    platforms: &mut Query<(Entity, &CyclePlatform, &mut PlatformAnim)>,
) {
    for order in orders {
        match order {
            CycleCommand::Spawn { slot, point: index, kind } => {
                let (Some(&position), Some(kind_def)) =
                    (cycle.def.points.get(index), cycle.def.kinds.get(kind))
                else {
                    warn!("Spawn cycle referenced missing point {} or kind {}", index, kind);
                    continue;
                };
                let position = point(position);
                let entity = spawn_platform(commands, kind_def, position);
                commands.entity(entity).insert((
                    CyclePlatform { slot },
                    PlatformAnim::new(position.y),
                    Transform::from_translation(position.extend(0.0))
                        .with_scale(Vec3::new(tuning.min_scale, tuning.min_scale, 1.0)),
                ));
                debug!("Platform {} ({}) spawned at point {}", slot, kind_def.id, index);
            }
            CycleCommand::Warn { slot } => {
                for (_, platform, mut anim) in platforms.iter_mut() {
                    if platform.slot == slot {
                        anim.begin_warning();
                    }
                }
            }
            CycleCommand::Retire { slot } => {
                for (_, platform, mut anim) in platforms.iter_mut() {
                    if platform.slot == slot {
                        anim.begin_vanish();
                    }
                }
            }
            CycleCommand::ClearAll => {
                for (entity, _, _) in platforms.iter() {
                    commands.entity(entity).despawn();
                }
            }
        }
    }
}

pub(crate) fn run_spawn_cycle(
    mut commands: Commands,
    time: Res<Time>,
    mut cycle: ResMut<SpawnCycle>,
    mut rng: ResMut<RunRng>,
    tuning: Res<PlatformTuning>,
    mut platforms: Query<(Entity, &CyclePlatform, &mut PlatformAnim)>,
) {
    let orders = cycle.tick(time.delta_secs(), &mut rng.0);
    if !orders.is_empty() {
        execute_cycle_commands(&mut commands, &cycle, orders, &tuning, &mut platforms);
    }
}

pub(crate) fn animate_platforms(
    mut commands: Commands,
    time: Res<Time>,
    tuning: Res<PlatformTuning>,
    mut query: Query<(Entity, &mut PlatformAnim, &mut Transform)>,
) {
    let dt = time.delta_secs();
    for (entity, mut anim, mut transform) in &mut query {
        if anim.advance(dt, &tuning) {
            commands.entity(entity).despawn();
            continue;
        }
        let (scale, offset) = anim.sample(&tuning);
        transform.scale = Vec3::new(scale, scale, 1.0);
        transform.translation.y = anim.base_y + offset;
    }
}

/// Spawn or despawn the static pair to match `StaticPlatforms`.
pub(crate) fn sync_static_platforms(
    mut commands: Commands,
    desired: Res<StaticPlatforms>,
    registry: Option<Res<ContentRegistry>>,
    existing: Query<Entity, With<StaticPlatform>>,
) {
    if !desired.is_changed() {
        return;
    }

    if !desired.active {
        for entity in &existing {
            commands.entity(entity).despawn();
        }
        return;
    }
    if !existing.is_empty() {
        return;
    }

    let Some(registry) = registry else {
        return;
    };
    let level = &registry.level;
    let Some(kind) = registry
        .platform_kind(&level.static_platform_kind)
        .or_else(|| level.platform_cycle.kinds.first())
    else {
        warn!("No platform kind available for static platforms");
        return;
    };
    if level.static_platforms.len() < 2 {
        warn!("Static platforms need points A and B");
        return;
    }

    for &p in level.static_platforms.iter().take(2) {
        let entity = spawn_platform(&mut commands, kind, point(p));
        commands.entity(entity).insert(StaticPlatform);
    }
    info!("Static platforms enabled");
}

/// Light the start platform fuse on first contact with the player.
pub(crate) fn arm_start_platform(
    mut collision_events: MessageReader<CollisionStart>,
    mut platforms: Query<&mut StartPlatform>,
    players: Query<(), With<Player>>,
) {
    for event in collision_events.read() {
        for (a, b) in [
            (event.collider1, event.collider2),
            (event.collider2, event.collider1),
        ] {
            if !players.contains(b) {
                continue;
            }
            if let Ok(mut platform) = platforms.get_mut(a) {
                if platform.touched_for.is_none() {
                    platform.touched_for = Some(0.0);
                }
            }
        }
    }
}

pub(crate) fn tick_start_platforms(
    mut commands: Commands,
    time: Res<Time>,
    tuning: Res<PlatformTuning>,
    mut platforms: Query<(Entity, &mut StartPlatform)>,
) {
    for (entity, mut platform) in &mut platforms {
        if platform.tick(time.delta_secs(), tuning.start_platform_lifetime) {
            debug!("Start platform expired");
            commands.entity(entity).despawn();
        }
    }
}

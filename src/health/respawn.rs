//! Health domain: fade-out, teleport, fade-in respawn sequence.

use avian2d::prelude::*;
use bevy::ecs::message::MessageReader;
use bevy::prelude::*;

use crate::content::ContentRegistry;
use crate::health::resources::{HealthTuning, RespawnPoint, SafeSpot};
use crate::health::state::HealthSignal;
use crate::movement::{Ground, LedgeHang, MovementState, Player};
use crate::spawning::{StartPlatform, spawn_start_platform};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RespawnPhase {
    FadeOut(f32),
    Hold(f32),
    FadeIn(f32),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RespawnStep {
    /// Sprite alpha for this frame
    Fading(f32),
    /// Move the player now
    Teleport,
    Done,
}

/// Present on the player while a respawn plays out.
#[derive(Component, Debug, Clone)]
pub struct Respawning {
    pub phase: RespawnPhase,
    /// Safe spot captured when the respawn was requested
    pub spot: Option<SafeSpot>,
    pub fallback: Vec2,
}

impl Respawning {
    pub fn new(spot: Option<SafeSpot>, fallback: Vec2) -> Self {
        Self {
            phase: RespawnPhase::FadeOut(0.0),
            spot,
            fallback,
        }
    }

    pub fn advance(&mut self, dt: f32, tuning: &HealthTuning) -> RespawnStep {
        let fade = tuning.respawn_fade.max(f32::EPSILON);
        match self.phase {
            RespawnPhase::FadeOut(t) => {
                let t = t + dt;
                if t >= tuning.respawn_fade {
                    self.phase = RespawnPhase::Hold(0.0);
                    RespawnStep::Fading(0.0)
                } else {
                    self.phase = RespawnPhase::FadeOut(t);
                    RespawnStep::Fading(1.0 - t / fade)
                }
            }
            RespawnPhase::Hold(t) => {
                let t = t + dt;
                if t >= tuning.respawn_hold {
                    self.phase = RespawnPhase::FadeIn(0.0);
                    RespawnStep::Teleport
                } else {
                    self.phase = RespawnPhase::Hold(t);
                    RespawnStep::Fading(0.0)
                }
            }
            RespawnPhase::FadeIn(t) => {
                let t = t + dt;
                if t >= tuning.respawn_fade {
                    RespawnStep::Done
                } else {
                    self.phase = RespawnPhase::FadeIn(t);
                    RespawnStep::Fading(t / fade)
                }
            }
        }
    }
}

/// Start a respawn for each request, then move the anchor back above the
/// start platform and replace any start platform still waiting there.
pub(crate) fn begin_respawn(
    mut commands: Commands,
    mut signals: MessageReader<HealthSignal>,
    registry: Option<Res<ContentRegistry>>,
    mut respawn_point: ResMut<RespawnPoint>,
    mut player: Query<(Entity, &mut LinearVelocity, Has<Respawning>), With<Player>>,
    start_platforms: Query<Entity, With<StartPlatform>>,
) {
    let requested = signals
        .read()
        .any(|signal| matches!(signal, HealthSignal::RespawnRequested { .. }));
    if !requested {
        return;
    }

    let Ok((entity, mut velocity, already_respawning)) = player.single_mut() else {
        return;
    };
    velocity.0 = Vec2::ZERO;

    if !already_respawning {
        commands.entity(entity).remove::<LedgeHang>().insert((
            Respawning::new(respawn_point.safe, respawn_point.fallback),
            RigidBodyDisabled,
        ));
        debug!("Respawn started, safe spot {:?}", respawn_point.safe);
    }

    let fallback = respawn_point.fallback;
    respawn_point.reset(fallback);
    for platform in &start_platforms {
        commands.entity(platform).despawn();
    }
    if let Some(registry) = registry {
        spawn_start_platform(&mut commands, &registry);
    }
}

pub(crate) fn run_respawn(
    mut commands: Commands,
    time: Res<Time>,
    tuning: Res<HealthTuning>,
    platforms: Query<(), With<Ground>>,
    mut player: Query<
        (
            Entity,
            &mut Respawning,
            &mut Transform,
            &mut LinearVelocity,
            &mut Sprite,
            &mut MovementState,
        ),
        With<Player>,
    >,
) {
    for (entity, mut respawning, mut transform, mut velocity, mut sprite, mut state) in &mut player
    {
        velocity.0 = Vec2::ZERO;
        match respawning.advance(time.delta_secs(), &tuning) {
            RespawnStep::Fading(alpha) => sprite.color.set_alpha(alpha),
            RespawnStep::Teleport => {
                let target = RespawnPoint::resolve(respawning.spot, respawning.fallback, |e| {
                    platforms.contains(e)
                });
                transform.translation.x = target.x;
                transform.translation.y = target.y;
                state.is_dashing = false;
                state.is_gliding = false;
                commands
                    .entity(entity)
                    .remove::<(RigidBodyDisabled, LedgeHang)>();
                info!("Player respawned at {:?}", target);
            }
            RespawnStep::Done => {
                sprite.color.set_alpha(1.0);
                commands.entity(entity).remove::<Respawning>();
            }
        }
    }
}

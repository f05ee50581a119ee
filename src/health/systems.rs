//! Health domain: hit classification, damage requests, and death.

use avian2d::prelude::*;
use bevy::ecs::message::{Message, MessageReader, MessageWriter};
use bevy::prelude::*;

use crate::content::ContentRegistry;
use crate::core::{GameplayPaused, SaveStore};
use crate::enemies::{Bird, Bullet};
use crate::health::resources::{HealthTuning, RespawnPoint};
use crate::health::respawn::Respawning;
use crate::health::state::{DamageKind, HealthSignal, PlayerHealth};
use crate::movement::{Ground, Player};
use crate::waves::WaveClock;

pub const DEATH_PAUSE_SOURCE: &str = "death";

/// Damage asked for by collisions, the kill zone, or dev tools.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HealthRequest {
    Hit { kind: DamageKind, point: Vec2 },
    Fall,
}

impl Message for HealthRequest {}

/// What a contact with `other` means for the player.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Contact {
    SafePlatform,
    Damage(DamageKind),
    Ignore,
}

pub(crate) fn classify_contact(is_platform: bool, is_bird: bool, is_bullet: bool) -> Contact {
    if is_platform {
        Contact::SafePlatform
    } else if is_bird {
        Contact::Damage(DamageKind::BirdCollision)
    } else if is_bullet {
        Contact::Damage(DamageKind::Projectile)
    } else {
        Contact::Ignore
    }
}

/// Bird contacts are delayed and respawn the player; bullets land at once.
/// Falls always respawn and skip invincibility.
pub(crate) fn hit_profile(kind: DamageKind, tuning: &HealthTuning) -> (bool, f32, bool) {
    match kind {
        DamageKind::BirdCollision => (true, tuning.bird_damage_delay, false),
        DamageKind::Projectile => (false, 0.0, false),
        DamageKind::Fall => (true, 0.0, true),
    }
}

pub(crate) fn classify_player_collisions(
    mut collision_events: MessageReader<CollisionStart>,
    mut requests: MessageWriter<HealthRequest>,
    mut respawn_point: ResMut<RespawnPoint>,
    player: Query<&Transform, (With<Player>, Without<Respawning>)>,
    ground: Query<(), With<Ground>>,
    birds: Query<(), With<Bird>>,
    bullets: Query<&Transform, With<Bullet>>,
) {
    for event in collision_events.read() {
        for (player_entity, other) in [
            (event.collider1, event.collider2),
            (event.collider2, event.collider1),
        ] {
            let Ok(player_transform) = player.get(player_entity) else {
                continue;
            };
            let player_pos = player_transform.translation.truncate();

            match classify_contact(
                ground.contains(other),
                birds.contains(other),
                bullets.contains(other),
            ) {
                Contact::SafePlatform => respawn_point.register_safe(player_pos, other),
                Contact::Damage(kind) => {
                    let point = bullets
                        .get(other)
                        .map(|t| t.translation.truncate())
                        .unwrap_or(player_pos);
                    debug!("Player hit by {:?} at {:?}", kind, point);
                    requests.write(HealthRequest::Hit { kind, point });
                }
                Contact::Ignore => {}
            }
        }
    }
}

pub(crate) fn check_kill_zone(
    registry: Option<Res<ContentRegistry>>,
    mut requests: MessageWriter<HealthRequest>,
    player: Query<&Transform, (With<Player>, Without<Respawning>)>,
) {
    let Some(registry) = registry else {
        return;
    };
    for transform in &player {
        if transform.translation.y < registry.level.kill_zone_y {
            debug!("Player fell below {}", registry.level.kill_zone_y);
            requests.write(HealthRequest::Fall);
        }
    }
}

pub(crate) fn apply_health_requests(
    mut requests: MessageReader<HealthRequest>,
    mut signals: MessageWriter<HealthSignal>,
    tuning: Res<HealthTuning>,
    mut player: Query<&mut PlayerHealth, With<Player>>,
) {
    let Ok(mut health) = player.single_mut() else {
        requests.clear();
        return;
    };

    let mut fell = false;
    for request in requests.read() {
        let produced = match *request {
            HealthRequest::Hit { kind, point } => {
                let (respawn, delay, ignore_invincibility) = hit_profile(kind, &tuning);
                let produced = health.hit(kind, point, respawn, delay, ignore_invincibility);
                if produced.is_empty() {
                    debug!("{:?} ignored while invincible", kind);
                }
                produced
            }
            // One fall per frame
            HealthRequest::Fall if fell => continue,
            HealthRequest::Fall => {
                fell = true;
                health.fall()
            }
        };
        signals.write_batch(produced);
    }
}

pub(crate) fn tick_player_health(
    time: Res<Time>,
    mut signals: MessageWriter<HealthSignal>,
    mut player: Query<&mut PlayerHealth, With<Player>>,
) {
    for mut health in &mut player {
        let produced = health.tick(time.delta_secs());
        if !produced.is_empty() {
            signals.write_batch(produced);
        }
    }
}

pub(crate) fn log_health_signals(mut signals: MessageReader<HealthSignal>) {
    for signal in signals.read() {
        match signal {
            HealthSignal::DamageApplied { kind, hearts, core } => {
                info!("{:?} damage: hearts={}, core={}", kind, hearts, core)
            }
            HealthSignal::HeartRegenerated { hearts } => info!("Heart regenerated: {}", hearts),
            HealthSignal::PlayerDied => info!("Player died"),
            other => debug!("{:?}", other),
        }
    }
}

/// Save the survived time once the core is gone and freeze the run.
pub(crate) fn record_death(
    mut signals: MessageReader<HealthSignal>,
    clock: Res<WaveClock>,
    mut store: ResMut<SaveStore>,
    mut paused: ResMut<GameplayPaused>,
) {
    if !signals
        .read()
        .any(|signal| *signal == HealthSignal::PlayerDied)
    {
        return;
    }
    if paused.sources.contains(DEATH_PAUSE_SOURCE) {
        return;
    }

    let best = store.data.record_run(clock.survived);
    if let Err(e) = store.persist() {
        warn!("{}", e);
    }
    info!(
        "Run over after {:.1}s{}",
        clock.survived,
        if best { " (new best)" } else { "" }
    );
    paused.pause(DEATH_PAUSE_SOURCE);
}

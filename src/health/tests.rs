//! Health domain: tests for damage, invincibility, regeneration, and respawn.

use std::time::Duration;

use avian2d::prelude::*;
use bevy::prelude::*;

use super::respawn::{RespawnPhase, RespawnStep, begin_respawn, run_respawn};
use super::systems::{Contact, classify_contact, hit_profile};
use super::{
    DamageKind, HealthSignal, HealthTuning, PlayerHealth, RegenPhase, RespawnPoint, Respawning,
    SafeSpot,
};
use crate::content::embedded_content;
use crate::movement::{LedgeHang, MovementState, Player};
use crate::spawning::StartPlatform;

fn tuning() -> HealthTuning {
    HealthTuning::default()
}

fn health() -> PlayerHealth {
    PlayerHealth::new(&tuning())
}

fn projectile(health: &mut PlayerHealth) -> Vec<HealthSignal> {
    health.hit(DamageKind::Projectile, Vec2::ZERO, false, 0.0, false)
}

/// Tick in small steps, collecting every signal.
fn run(health: &mut PlayerHealth, seconds: f32) -> Vec<HealthSignal> {
    let dt = 0.01;
    let mut out = Vec::new();
    let mut t = 0.0;
    while t < seconds {
        out.extend(health.tick(dt));
        t += dt;
    }
    out
}

// -----------------------------------------------------------------------------
// Damage pipeline
// -----------------------------------------------------------------------------

#[test]
fn test_new_health_is_full() {
    let health = health();
    assert_eq!(health.hearts(), 2);
    assert_eq!(health.core(), 1);
    assert!(!health.is_invincible());
    assert!(!health.is_dead());
}

#[test]
fn test_immediate_hit_takes_heart_and_grants_invincibility() {
    let mut health = health();
    let signals = projectile(&mut health);

    assert_eq!(health.hearts(), 1);
    assert!(health.is_invincible());
    assert_eq!(
        signals,
        vec![
            HealthSignal::DamageTriggered {
                kind: DamageKind::Projectile,
                point: Vec2::ZERO
            },
            HealthSignal::DamageApplied {
                kind: DamageKind::Projectile,
                hearts: 1,
                core: 1
            },
            HealthSignal::HealthChanged { hearts: 1, core: 1 },
            HealthSignal::InvincibilityChanged(true),
        ]
    );
}

#[test]
fn test_hits_ignored_while_invincible() {
    let mut health = health();
    projectile(&mut health);
    assert!(projectile(&mut health).is_empty());
    assert_eq!(health.hearts(), 1);

    let signals = run(&mut health, 1.3);
    assert!(signals.contains(&HealthSignal::InvincibilityChanged(false)));
    assert!(!projectile(&mut health).is_empty());
    assert_eq!(health.hearts(), 0);
}

#[test]
fn test_delayed_hit_lands_after_delay_and_requests_respawn() {
    let mut health = health();
    let signals = health.hit(DamageKind::BirdCollision, Vec2::ONE, true, 0.5, false);
    assert_eq!(signals.len(), 1);
    assert!(health.has_pending_damage());
    assert_eq!(health.hearts(), 2);

    let signals = run(&mut health, 0.4);
    assert!(signals.is_empty());

    let signals = run(&mut health, 0.2);
    assert_eq!(health.hearts(), 1);
    assert!(signals.contains(&HealthSignal::RespawnRequested {
        kind: DamageKind::BirdCollision
    }));
}

#[test]
fn test_newer_hit_replaces_pending_damage() {
    let mut health = health();
    health.hit(DamageKind::BirdCollision, Vec2::ZERO, true, 0.5, false);
    run(&mut health, 0.3);
    health.hit(DamageKind::BirdCollision, Vec2::ZERO, true, 0.5, false);

    // The first hit would have landed by now
    run(&mut health, 0.3);
    assert_eq!(health.hearts(), 2);

    run(&mut health, 0.3);
    assert_eq!(health.hearts(), 1);
}

#[test]
fn test_pending_damage_cancelled_by_invincibility() {
    let mut health = health();
    health.hit(DamageKind::BirdCollision, Vec2::ZERO, true, 0.5, false);
    // Lands instantly and makes the player invincible
    health.hit(DamageKind::Projectile, Vec2::ZERO, false, 0.0, true);
    assert_eq!(health.hearts(), 1);
    assert!(!health.has_pending_damage());

    run(&mut health, 1.0);
    assert_eq!(health.hearts(), 1);
}

#[test]
fn test_core_damage_after_hearts_kills() {
    let mut health = health();
    projectile(&mut health);
    run(&mut health, 1.3);
    projectile(&mut health);
    run(&mut health, 1.3);
    assert_eq!(health.hearts(), 0);

    let signals = projectile(&mut health);
    assert_eq!(health.core(), 0);
    assert!(health.is_dead());
    assert_eq!(signals.last(), Some(&HealthSignal::PlayerDied));
}

// -----------------------------------------------------------------------------
// Falls
// -----------------------------------------------------------------------------

#[test]
fn test_fall_ignores_invincibility_and_always_respawns() {
    let mut health = health();
    projectile(&mut health);
    assert!(health.is_invincible());

    let signals = health.fall();
    assert_eq!(health.hearts(), 0);
    assert_eq!(signals[0], HealthSignal::InvincibilityChanged(false));
    assert!(signals.contains(&HealthSignal::RespawnRequested {
        kind: DamageKind::Fall
    }));
    assert!(health.is_invincible());
    assert!(health.is_regen_running());
}

#[test]
fn test_fall_cancels_pending_damage() {
    let mut health = health();
    health.hit(DamageKind::BirdCollision, Vec2::ZERO, true, 0.5, false);
    health.fall();
    assert!(!health.has_pending_damage());

    run(&mut health, 1.0);
    assert_eq!(health.hearts(), 1);
}

#[test]
fn test_fall_restarts_regen() {
    let mut health = health();
    health.fall();
    run(&mut health, 1.3);
    health.fall();
    assert_eq!(health.regen_phase(), RegenPhase::Waiting(0.0));

    run(&mut health, 10.0);
    let signals = health.fall();
    assert!(health.is_dead());
    assert!(signals.contains(&HealthSignal::PlayerDied));
}

// -----------------------------------------------------------------------------
// Heart regeneration
// -----------------------------------------------------------------------------

#[test]
fn test_regen_refills_one_heart_in_steps() {
    let mut health = health();
    health.fall();
    run(&mut health, 1.3);
    health.fall();
    assert_eq!(health.hearts(), 0);

    let signals = run(&mut health, 14.5);
    assert!(
        !signals
            .iter()
            .any(|s| matches!(s, HealthSignal::HeartRegenProgress { .. }))
    );

    let signals = run(&mut health, 4.0);
    let progress: Vec<f32> = signals
        .iter()
        .filter_map(|s| match s {
            HealthSignal::HeartRegenProgress { heart: 1, progress } => Some(*progress),
            _ => None,
        })
        .collect();
    assert_eq!(progress.len(), 3);
    assert!((progress[0] - 1.0 / 3.0).abs() < 1e-5);
    assert!((progress[2] - 1.0).abs() < 1e-5);
    assert!(signals.contains(&HealthSignal::HeartRegenerated { hearts: 1 }));
    assert_eq!(health.hearts(), 1);
    assert!(!health.is_regen_running());
}

#[test]
fn test_regen_aborts_when_player_dies() {
    let mut health = health();
    health.fall();
    run(&mut health, 1.3);
    health.fall();
    run(&mut health, 1.3);
    health.fall();
    assert!(health.is_dead());

    run(&mut health, 20.0);
    assert_eq!(health.hearts(), 0);
    assert!(!health.is_regen_running());
}

#[test]
fn test_no_regen_while_hearts_remain() {
    let mut health = health();
    projectile(&mut health);
    assert!(!health.is_regen_running());
    run(&mut health, 20.0);
    assert_eq!(health.hearts(), 1);
}

// -----------------------------------------------------------------------------
// Collision classification
// -----------------------------------------------------------------------------

#[test]
fn test_classify_contact() {
    assert_eq!(classify_contact(true, false, false), Contact::SafePlatform);
    assert_eq!(
        classify_contact(false, true, false),
        Contact::Damage(DamageKind::BirdCollision)
    );
    assert_eq!(
        classify_contact(false, false, true),
        Contact::Damage(DamageKind::Projectile)
    );
    assert_eq!(classify_contact(false, false, false), Contact::Ignore);
}

#[test]
fn test_hit_profiles() {
    let tuning = tuning();
    assert_eq!(
        hit_profile(DamageKind::BirdCollision, &tuning),
        (true, 0.5, false)
    );
    assert_eq!(hit_profile(DamageKind::Projectile, &tuning), (false, 0.0, false));
    assert_eq!(hit_profile(DamageKind::Fall, &tuning), (true, 0.0, true));
}

// -----------------------------------------------------------------------------
// Respawn
// -----------------------------------------------------------------------------

#[test]
fn test_respawn_target_prefers_live_safe_spot() {
    let platform = Entity::from_bits(42);
    let spot = Some(SafeSpot {
        position: Vec2::new(10.0, 20.0),
        platform,
    });
    let fallback = Vec2::new(0.0, 250.0);

    assert_eq!(
        RespawnPoint::resolve(spot, fallback, |e| e == platform),
        Vec2::new(10.0, 20.0)
    );
    assert_eq!(RespawnPoint::resolve(spot, fallback, |_| false), fallback);
    assert_eq!(RespawnPoint::resolve(None, fallback, |_| true), fallback);
}

#[test]
fn test_respawn_point_reset_forgets_safe_spot() {
    let mut point = RespawnPoint::default();
    point.register_safe(Vec2::ONE, Entity::from_bits(7));
    point.reset(Vec2::new(0.0, 250.0));
    assert!(point.safe.is_none());
    assert_eq!(point.fallback, Vec2::new(0.0, 250.0));
}

#[test]
fn test_respawn_sequence_fades_teleports_and_finishes() {
    let tuning = tuning();
    let mut respawning = Respawning::new(None, Vec2::ZERO);

    match respawning.advance(0.25, &tuning) {
        RespawnStep::Fading(alpha) => assert!((alpha - 0.5).abs() < 1e-5),
        other => panic!("expected fade, got {:?}", other),
    }
    assert_eq!(respawning.advance(0.3, &tuning), RespawnStep::Fading(0.0));
    assert_eq!(respawning.phase, RespawnPhase::Hold(0.0));

    assert_eq!(respawning.advance(0.5, &tuning), RespawnStep::Fading(0.0));
    assert_eq!(respawning.advance(0.6, &tuning), RespawnStep::Teleport);

    match respawning.advance(0.25, &tuning) {
        RespawnStep::Fading(alpha) => assert!((alpha - 0.5).abs() < 1e-5),
        other => panic!("expected fade in, got {:?}", other),
    }
    assert_eq!(respawning.advance(0.3, &tuning), RespawnStep::Done);
}

// -----------------------------------------------------------------------------
// Respawn systems
// -----------------------------------------------------------------------------

const ANCHOR: Vec2 = Vec2::new(0.0, 150.0);

fn step(app: &mut App, seconds: f32) {
    app.world_mut()
        .resource_mut::<Time>()
        .advance_by(Duration::from_secs_f32(seconds));
    app.update();
}

fn respawn_app() -> App {
    let mut app = App::new();
    app.init_resource::<Time>()
        .init_resource::<HealthTuning>()
        .init_resource::<RespawnPoint>()
        .insert_resource(embedded_content().expect("embedded content should parse"))
        .add_message::<HealthSignal>()
        .add_systems(Update, (begin_respawn, run_respawn).chain());
    app.world_mut().resource_mut::<RespawnPoint>().reset(ANCHOR);
    app
}

fn spawn_test_player(app: &mut App, position: Vec2) -> Entity {
    app.world_mut()
        .spawn((
            Player,
            MovementState::default(),
            Transform::from_translation(position.extend(0.0)),
            LinearVelocity::default(),
            Sprite::default(),
        ))
        .id()
}

fn request_respawn(app: &mut App) {
    app.world_mut().write_message(HealthSignal::RespawnRequested {
        kind: DamageKind::Fall,
    });
}

fn start_platforms(app: &mut App) -> Vec<Entity> {
    let world = app.world_mut();
    let mut query = world.query_filtered::<Entity, With<StartPlatform>>();
    query.iter(world).collect()
}

#[test]
fn test_teleport_drops_ledge_hang_grabbed_mid_respawn() {
    let mut app = respawn_app();
    let ledge_platform = app.world_mut().spawn(Transform::default()).id();
    let hit_site = Vec2::new(300.0, -120.0);
    let player = spawn_test_player(&mut app, hit_site);

    let hold = HealthTuning::default().respawn_hold;
    app.world_mut().entity_mut(player).insert((
        Respawning {
            phase: RespawnPhase::Hold(hold - 0.05),
            spot: None,
            fallback: ANCHOR,
        },
        RigidBodyDisabled,
        LedgeHang {
            platform: ledge_platform,
            grab: hit_site,
            climb: hit_site + Vec2::Y * 40.0,
            elapsed: 0.0,
        },
    ));

    step(&mut app, 0.1);

    let entity = app.world().entity(player);
    assert!(!entity.contains::<LedgeHang>());
    assert!(!entity.contains::<RigidBodyDisabled>());
    assert_eq!(
        entity.get::<Transform>().map(|t| t.translation.truncate()),
        Some(ANCHOR)
    );
}

#[test]
fn test_each_respawn_request_replaces_the_start_platform() {
    let mut app = respawn_app();
    spawn_test_player(&mut app, Vec2::new(200.0, -300.0));

    request_respawn(&mut app);
    step(&mut app, 0.01);
    let first = start_platforms(&mut app);
    assert_eq!(first.len(), 1);

    request_respawn(&mut app);
    step(&mut app, 0.01);
    let second = start_platforms(&mut app);
    assert_eq!(second.len(), 1);
    assert_ne!(first[0], second[0]);
}

#[test]
fn test_repeat_request_keeps_sequence_but_resets_respawn_point() {
    let mut app = respawn_app();
    let player = spawn_test_player(&mut app, Vec2::new(200.0, -300.0));

    request_respawn(&mut app);
    step(&mut app, 0.01);
    assert!(app.world().entity(player).contains::<Respawning>());

    // Pretend the sequence is halfway through and a platform got touched
    let safe_platform = app.world_mut().spawn(Transform::default()).id();
    if let Some(mut respawning) = app.world_mut().get_mut::<Respawning>(player) {
        respawning.phase = RespawnPhase::Hold(0.3);
    }
    app.world_mut()
        .resource_mut::<RespawnPoint>()
        .register_safe(Vec2::new(50.0, 0.0), safe_platform);

    request_respawn(&mut app);
    // No time passes so the running sequence stays where it was
    step(&mut app, 0.0);

    let phase = app.world().get::<Respawning>(player).map(|r| r.phase);
    assert_eq!(phase, Some(RespawnPhase::Hold(0.3)));
    let point = app.world().resource::<RespawnPoint>();
    assert!(point.safe.is_none());
    assert_eq!(point.fallback, ANCHOR);
}

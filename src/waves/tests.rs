//! Waves domain: tests for the wave clock, the wave break, and spawner overrides.

use super::systems::apply_spawner_overrides;
use super::{WaveBreak, WaveClock, WaveClockTuning};
use crate::content::{AbilitiesDef, PlatformTimingDef, SpawnerWaveDef, WaveDef, embedded_content};
use crate::spawning::EnemySpawners;

fn tuning() -> WaveClockTuning {
    WaveClockTuning {
        interval_secs: 10.0,
        max_changes: 2,
        break_secs: 1.0,
    }
}

fn wave(spawners: Vec<SpawnerWaveDef>) -> WaveDef {
    WaveDef {
        id: "test".to_string(),
        abilities: AbilitiesDef::default(),
        input_changing: false,
        platform_changing: true,
        static_platforms: false,
        platform_timing: PlatformTimingDef::default(),
        rail_min_time: 5.0,
        rail_max_time: 8.0,
        spawners,
    }
}

fn overrides(id: &str, enabled: bool) -> SpawnerWaveDef {
    SpawnerWaveDef {
        spawner: id.to_string(),
        enabled,
        min_count: 4,
        max_count: 6,
        min_interval: 0.5,
        max_interval: 0.75,
    }
}

// -----------------------------------------------------------------------------
// Wave clock
// -----------------------------------------------------------------------------

#[test]
fn test_clock_fires_once_per_interval() {
    let tuning = tuning();
    let mut clock = WaveClock::default();

    assert!(!clock.tick(9.5, &tuning));
    assert!(clock.tick(1.0, &tuning));
    assert_eq!(clock.changes, 1);
    assert!(!clock.tick(1.0, &tuning));
}

#[test]
fn test_large_step_crosses_only_one_boundary() {
    let tuning = tuning();
    let mut clock = WaveClock::default();

    assert!(clock.tick(25.0, &tuning));
    assert_eq!(clock.changes, 1);
    // The skipped second boundary is not replayed
    assert!(!clock.tick(0.1, &tuning));
}

#[test]
fn test_clock_freezes_after_max_changes() {
    let tuning = tuning();
    let mut clock = WaveClock::default();

    assert!(clock.tick(10.0, &tuning));
    assert!(clock.tick(10.0, &tuning));
    assert!(clock.is_frozen(&tuning));

    let elapsed = clock.elapsed;
    assert!(!clock.tick(30.0, &tuning));
    assert_eq!(clock.elapsed, elapsed);
    assert_eq!(clock.survived, 50.0);
}

#[test]
fn test_next_index_stays_on_last_wave() {
    let mut clock = WaveClock::default();
    assert_eq!(clock.next_index(3), 1);

    clock.wave_index = 2;
    assert_eq!(clock.next_index(3), 2);
    assert_eq!(clock.next_index(0), 0);
}

// -----------------------------------------------------------------------------
// Wave break
// -----------------------------------------------------------------------------

#[test]
fn test_wave_break_banner_and_countdown() {
    let mut wave_break = WaveBreak::default();
    assert!(!wave_break.is_active());
    assert!(!wave_break.tick(1.0));

    wave_break.start(2, 1.0);
    assert_eq!(wave_break.banner.as_deref(), Some("WAVE 3"));
    assert!(!wave_break.tick(0.6));
    assert!(wave_break.is_active());

    assert!(wave_break.tick(0.6));
    assert!(!wave_break.is_active());
    assert!(wave_break.banner.is_none());
    assert!(!wave_break.tick(0.6));
}

// -----------------------------------------------------------------------------
// Spawner overrides
// -----------------------------------------------------------------------------

#[test]
fn test_unlisted_spawners_are_disabled() {
    let registry = embedded_content().expect("embedded content should parse");
    let mut spawners = EnemySpawners::from_registry(&registry);
    let first = spawners.0[0].def.id.clone();

    let missing = apply_spawner_overrides(&mut spawners, &wave(vec![overrides(&first, true)]));
    assert!(missing.is_empty());

    for spawner in &spawners.0 {
        assert_eq!(spawner.enabled, spawner.def.id == first);
    }
    let listed = spawners.get_mut(&first).expect("spawner exists");
    assert_eq!(listed.def.min_count, 4);
    assert_eq!(listed.def.max_interval, 0.75);
}

#[test]
fn test_override_can_disable_and_reports_unknown_ids() {
    let registry = embedded_content().expect("embedded content should parse");
    let mut spawners = EnemySpawners::from_registry(&registry);
    let first = spawners.0[0].def.id.clone();

    let missing = apply_spawner_overrides(
        &mut spawners,
        &wave(vec![overrides(&first, false), overrides("ghost", true)]),
    );
    assert_eq!(missing, vec!["ghost".to_string()]);
    assert!(spawners.0.iter().all(|s| !s.enabled));
}

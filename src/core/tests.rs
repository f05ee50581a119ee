//! Core domain: tests for pausing, sampling helpers, and save data.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use super::{
    GameplayPaused, SaveData, format_clock, load_save, sample_count, sample_range, store_save,
};

// -----------------------------------------------------------------------------
// GameplayPaused tests
// -----------------------------------------------------------------------------

#[test]
fn test_gameplay_paused_tracks_sources() {
    let mut paused = GameplayPaused::default();
    assert!(!paused.is_paused());

    paused.pause("wave_break");
    paused.pause("respawn");
    assert!(paused.is_paused());

    paused.unpause("wave_break");
    assert!(paused.is_paused());

    paused.unpause("respawn");
    assert!(!paused.is_paused());
}

#[test]
fn test_gameplay_paused_same_source_twice_needs_one_unpause() {
    let mut paused = GameplayPaused::default();
    paused.pause("wave_break");
    paused.pause("wave_break");
    paused.unpause("wave_break");
    assert!(!paused.is_paused());
}

// -----------------------------------------------------------------------------
// Sampling helpers
// -----------------------------------------------------------------------------

#[test]
fn test_sample_range_empty_returns_min() {
    let mut rng = ChaCha8Rng::seed_from_u64(7);
    assert_eq!(sample_range(&mut rng, 3.0, 3.0), 3.0);
    assert_eq!(sample_range(&mut rng, 5.0, 2.0), 5.0);
}

#[test]
fn test_sample_range_stays_in_bounds() {
    let mut rng = ChaCha8Rng::seed_from_u64(7);
    for _ in 0..200 {
        let v = sample_range(&mut rng, 1.0, 4.0);
        assert!((1.0..4.0).contains(&v));
    }
}

#[test]
fn test_sample_count_is_inclusive() {
    let mut rng = ChaCha8Rng::seed_from_u64(11);
    let mut seen = [false; 4];
    for _ in 0..500 {
        let n = sample_count(&mut rng, 1, 3);
        assert!((1..=3).contains(&n));
        seen[n as usize] = true;
    }
    assert!(seen[1] && seen[2] && seen[3]);
    assert_eq!(sample_count(&mut rng, 4, 2), 4);
}

// -----------------------------------------------------------------------------
// Clock formatting
// -----------------------------------------------------------------------------

#[test]
fn test_format_clock() {
    assert_eq!(format_clock(0.0), "00:00");
    assert_eq!(format_clock(59.9), "00:59");
    assert_eq!(format_clock(60.0), "01:00");
    assert_eq!(format_clock(245.5), "04:05");
    assert_eq!(format_clock(-3.0), "00:00");
}

// -----------------------------------------------------------------------------
// Save data
// -----------------------------------------------------------------------------

#[test]
fn test_record_run_tracks_best() {
    let mut data = SaveData::default();
    assert!(data.record_run(90.0));
    assert_eq!(data.last_run_time.as_deref(), Some("01:30"));
    assert!(!data.record_run(30.0));
    assert_eq!(data.last_run_time.as_deref(), Some("00:30"));
    assert_eq!(data.best_time_secs, 90.0);
    assert_eq!(data.runs_played, 2);
}

#[test]
fn test_save_store_and_load() {
    let dir = std::env::temp_dir().join(format!("skyhop_save_test_{}", std::process::id()));
    let path = dir.join("progress.json");

    let mut data = SaveData::default();
    data.record_run(125.0);
    store_save(&path, &data).unwrap();

    let loaded = load_save(&path).unwrap();
    assert_eq!(loaded, data);

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn test_load_save_reports_parse_errors() {
    let dir = std::env::temp_dir().join(format!("skyhop_bad_save_{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("progress.json");
    std::fs::write(&path, "{ not json").unwrap();

    let err = load_save(&path).unwrap_err();
    assert!(err.to_string().contains("Parse error"));

    let _ = std::fs::remove_dir_all(&dir);
}

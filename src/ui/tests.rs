//! UI domain: tests for heart colors and the death screen timer.

use super::PlayerDeathState;
use super::death::DEATH_SCREEN_TIMEOUT;
use super::hud::heart_color;

// -----------------------------------------------------------------------------
// Hearts
// -----------------------------------------------------------------------------

#[test]
fn test_heart_colors_follow_hearts_and_refill() {
    let full = heart_color(0, 2, None);
    let empty = heart_color(1, 1, None);
    assert_ne!(full, empty);
    assert_eq!(heart_color(1, 2, None), full);

    // Refill of heart 1 only tints the first slot
    assert_eq!(heart_color(0, 0, Some((1, 0.0))), empty);
    assert_eq!(heart_color(1, 0, Some((1, 0.5))), empty);
    let half = heart_color(0, 0, Some((1, 0.5)));
    assert_ne!(half, empty);
    assert_ne!(half, full);
}

#[test]
fn test_finished_refill_matches_full_heart() {
    let full = heart_color(0, 2, None).to_srgba();
    let done = heart_color(0, 0, Some((1, 1.0))).to_srgba();
    assert!((full.red - done.red).abs() < 1e-5);
    assert!((full.green - done.green).abs() < 1e-5);
    assert!((full.blue - done.blue).abs() < 1e-5);

    // Progress past one clamps
    assert_eq!(heart_color(0, 0, Some((1, 2.0))), heart_color(0, 0, Some((1, 1.0))));
}

// -----------------------------------------------------------------------------
// Death screen
// -----------------------------------------------------------------------------

#[test]
fn test_death_screen_times_out() {
    let mut state = PlayerDeathState::default();
    assert!(!state.tick(10.0));

    state.is_dead = true;
    assert!(!state.tick(DEATH_SCREEN_TIMEOUT * 0.5));
    assert!(state.tick(DEATH_SCREEN_TIMEOUT * 0.6));
}

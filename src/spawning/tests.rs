//! Spawning domain: tests for the spawn cycle, spawners, and platform animation.

use bevy::prelude::Vec2;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use super::cycle::{
    CycleCommand, CyclePhase, Selection, SpawnCycle, all_points, candidate_points,
    excluded_points, initial_points, select_point,
};
use super::platforms::{AnimPhase, PlatformAnim, StartPlatform, ease_in_out};
use super::rail::{RailPhase, RailSpawner};
use super::side::{EnemySpawner, MAX_PLACEMENT_ATTEMPTS, pick_enemy, pick_positions};
use super::PlatformTuning;
use crate::content::{
    ApproachMode, EnemyChoice, KindRuleDef, NoCandidatePolicy, PatternDef, PlatformCycleDef,
    PlatformGroupDef, PlatformKindDef, PlatformTimingDef, PointRuleDef, RailDef, SpawnerDef,
    SpawnerWaveDef,
};
use crate::enemies::{BirdPattern, EnemyKind, ShooterPattern};

fn rng() -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(7)
}

fn kind(id: &str) -> PlatformKindDef {
    PlatformKindDef {
        id: id.to_string(),
        size: (120.0, 20.0),
        color: (0.5, 0.5, 0.5),
        ledges: Vec::new(),
    }
}

/// Six points, two groups of three.
fn cycle_def() -> PlatformCycleDef {
    PlatformCycleDef {
        points: (0..6).map(|i| (i as f32 * 100.0, 0.0)).collect(),
        groups: vec![
            PlatformGroupDef {
                name: "low".to_string(),
                points: vec![0, 1, 2],
            },
            PlatformGroupDef {
                name: "high".to_string(),
                points: vec![3, 4, 5],
            },
        ],
        default_group: Some(0),
        kinds: vec![kind("short"), kind("long")],
        warning_time: 2.0,
        wait_for_free_timeout: 3.0,
        ..Default::default()
    }
}

fn timing() -> PlatformTimingDef {
    PlatformTimingDef {
        initial_delay: 1.0,
        min_interval: 3.0,
        max_interval: 3.0,
        respawn_delay: 2.0,
    }
}

fn spawner_def(mode: ApproachMode) -> SpawnerDef {
    SpawnerDef {
        id: "left".to_string(),
        mode,
        origin: (-550.0, 300.0),
        bound_a: (-200.0, 200.0),
        bound_b: (200.0, -200.0),
        jitter_positive: 0.0,
        jitter_negative: 0.0,
        min_count: 1,
        max_count: 3,
        min_interval: 1.0,
        max_interval: 2.0,
        enemy: EnemyChoice::Bird,
        pattern: PatternDef::Straight,
        random_enemy: false,
        random_pattern: false,
        allow_redirect: false,
        random_location: false,
        min_separation: 0.0,
        enemy_radius: 10.0,
        ignore_sensors: true,
        bypass_physics_check: false,
    }
}

// -----------------------------------------------------------------------------
// Candidate pools
// -----------------------------------------------------------------------------

#[test]
fn test_all_points_uses_groups_then_initial_only() {
    let mut def = cycle_def();
    def.groups.truncate(1);
    def.initial_only_points = vec![5, 0];
    assert_eq!(all_points(&def), vec![0, 1, 2, 5]);

    def.groups.clear();
    assert_eq!(all_points(&def), vec![0, 1, 2, 3, 4, 5]);
}

#[test]
fn test_candidates_follow_kind_rule() {
    let mut def = cycle_def();
    def.kind_rules = vec![KindRuleDef {
        kind: "long".to_string(),
        allowed_groups: vec![1],
    }];
    assert_eq!(candidate_points(&def, Some("long")), vec![3, 4, 5]);
    assert_eq!(candidate_points(&def, Some("short")), vec![0, 1, 2]);
}

#[test]
fn test_candidates_with_invalid_default_group_use_all_groups() {
    let mut def = cycle_def();
    def.default_group = Some(9);
    assert_eq!(candidate_points(&def, None), vec![0, 1, 2, 3, 4, 5]);
}

#[test]
fn test_candidates_always_include_initial_only_points() {
    let mut def = cycle_def();
    def.initial_only_points = vec![4];
    assert_eq!(candidate_points(&def, None), vec![0, 1, 2, 4]);
}

#[test]
fn test_excluded_points_combine_rules() {
    let mut def = cycle_def();
    def.exclusion_rules = vec![
        PointRuleDef {
            source: 1,
            exclude: vec![2],
        },
        PointRuleDef {
            source: 3,
            exclude: vec![4],
        },
    ];
    def.occupancy_rules = vec![PointRuleDef {
        source: 5,
        exclude: vec![0],
    }];

    let excluded = excluded_points(&def, 1, &[5]);
    assert!(excluded.contains(&1));
    assert!(excluded.contains(&2));
    assert!(excluded.contains(&0));
    assert!(!excluded.contains(&4));
}

// -----------------------------------------------------------------------------
// Selection policies
// -----------------------------------------------------------------------------

#[test]
fn test_select_prefers_free_unexcluded() {
    let def = cycle_def();
    let mut rng = rng();
    for _ in 0..20 {
        let pick = select_point(&def, &[0, 1, 2], 0, &[1], 0.0, &mut rng);
        assert_eq!(pick, Selection::Point(2));
    }
}

#[test]
fn test_pick_any_falls_back_to_candidates() {
    let def = cycle_def();
    let mut rng = rng();
    // 0 is freed (excluded), 1 and 2 are occupied
    let pick = select_point(&def, &[0, 1, 2], 0, &[1, 2], 0.0, &mut rng);
    assert!(matches!(pick, Selection::Point(0..=2)));
}

#[test]
fn test_allow_excluded_picks_free_point() {
    let mut def = cycle_def();
    def.no_candidate_policy = NoCandidatePolicy::AllowExcluded;
    let mut rng = rng();
    for _ in 0..20 {
        let pick = select_point(&def, &[0, 1, 2], 0, &[1, 2], 0.0, &mut rng);
        assert_eq!(pick, Selection::Point(0));
    }
}

#[test]
fn test_wait_for_free_waits_until_timeout() {
    let mut def = cycle_def();
    def.no_candidate_policy = NoCandidatePolicy::WaitForFree;
    let mut rng = rng();

    assert_eq!(
        select_point(&def, &[0, 1, 2], 0, &[1, 2], 0.0, &mut rng),
        Selection::Wait
    );
    assert_eq!(
        select_point(&def, &[0, 1, 2], 0, &[1, 2], 2.9, &mut rng),
        Selection::Wait
    );
    assert!(matches!(
        select_point(&def, &[0, 1, 2], 0, &[1, 2], 3.1, &mut rng),
        Selection::Point(_)
    ));
}

#[test]
fn test_wait_for_free_without_free_points_picks_candidate() {
    let mut def = cycle_def();
    def.no_candidate_policy = NoCandidatePolicy::WaitForFree;
    let mut rng = rng();
    let pick = select_point(&def, &[1, 2], 0, &[1, 2], 0.0, &mut rng);
    assert!(matches!(pick, Selection::Point(1 | 2)));
}

#[test]
fn test_empty_candidates_pick_any_point() {
    let def = cycle_def();
    let mut rng = rng();
    assert!(matches!(
        select_point(&def, &[], 0, &[], 0.0, &mut rng),
        Selection::Point(0..=5)
    ));
}

// -----------------------------------------------------------------------------
// Initial points
// -----------------------------------------------------------------------------

#[test]
fn test_initial_points_fixed_pair() {
    let mut def = cycle_def();
    def.fixed_initial = Some((4, 2));
    assert_eq!(initial_points(&def, &mut rng()), vec![4, 2]);
}

#[test]
fn test_initial_points_prefer_initial_only_and_are_distinct() {
    let mut def = cycle_def();
    def.initial_only_points = vec![5];
    def.use_initial_only = true;
    let mut rng = rng();
    for _ in 0..20 {
        let picks = initial_points(&def, &mut rng);
        assert_eq!(picks.len(), 2);
        assert_eq!(picks[0], 5);
        assert_ne!(picks[0], picks[1]);
    }
}

#[test]
fn test_initial_points_duplicate_only_when_short() {
    let mut def = cycle_def();
    def.groups.clear();
    def.points.truncate(1);
    assert_eq!(initial_points(&def, &mut rng()), vec![0, 0]);
}

// -----------------------------------------------------------------------------
// Cycle loop
// -----------------------------------------------------------------------------

fn started_cycle(rng: &mut ChaCha8Rng) -> (SpawnCycle, Vec<CycleCommand>) {
    let mut cycle = SpawnCycle::new(cycle_def(), timing(), &PlatformTuning::default());
    let commands = cycle
        .set_enabled(true, rng)
        .expect("cycle should start with kinds and points");
    (cycle, commands)
}

#[test]
fn test_start_fails_without_kinds() {
    let mut def = cycle_def();
    def.kinds.clear();
    let mut cycle = SpawnCycle::new(def, timing(), &PlatformTuning::default());
    assert!(cycle.start(&mut rng()).is_err());
    assert_eq!(cycle.phase(), CyclePhase::Stopped);
}

#[test]
fn test_start_spawns_initial_two() {
    let mut rng = rng();
    let (cycle, commands) = started_cycle(&mut rng);
    let spawns = commands
        .iter()
        .filter(|c| matches!(c, CycleCommand::Spawn { .. }))
        .count();
    assert_eq!(spawns, 2);
    assert_eq!(cycle.active().len(), 2);
    assert_eq!(cycle.phase(), CyclePhase::Delay(1.0));
}

#[test]
fn test_full_cycle_warns_retires_and_respawns() {
    let mut rng = rng();
    let (mut cycle, _) = started_cycle(&mut rng);
    let tuning = PlatformTuning::default();
    let dt = 0.01;

    let mut warned = None;
    let mut retired = None;
    let mut respawned = false;
    let mut time = 0.0;
    while time < 12.0 && !respawned {
        for command in cycle.tick(dt, &mut rng) {
            match command {
                CycleCommand::Warn { slot } => warned = Some((slot, time)),
                CycleCommand::Retire { slot } => retired = Some((slot, time)),
                CycleCommand::Spawn { .. } => respawned = true,
                CycleCommand::ClearAll => panic!("cycle should not clear while running"),
            }
        }
        time += dt;
    }

    let (warned_slot, warned_at) = warned.expect("a platform should be warned");
    let (retired_slot, retired_at) = retired.expect("a platform should be retired");
    assert_eq!(warned_slot, retired_slot);
    // initial delay 1 s + (3 s interval - 2 s warning)
    assert!((warned_at - 2.0).abs() < 0.05);
    assert!((retired_at - warned_at - 2.0).abs() < 0.05);
    assert!(respawned);
    // retire animation plus respawn delay
    assert!(time - retired_at >= tuning.anim_duration + 2.0 - 0.05);
    assert_eq!(cycle.active().len(), 2);
    assert!(!cycle.active().iter().any(|a| a.slot == retired_slot));
}

#[test]
fn test_disable_stops_and_clears() {
    let mut rng = rng();
    let (mut cycle, _) = started_cycle(&mut rng);
    let commands = cycle.set_enabled(false, &mut rng).expect("stop never fails");
    assert_eq!(commands, vec![CycleCommand::ClearAll]);
    assert_eq!(cycle.phase(), CyclePhase::Stopped);
    assert!(cycle.active().is_empty());
    assert!(cycle.tick(10.0, &mut rng).is_empty());
}

#[test]
fn test_repeated_enable_is_a_no_op() {
    let mut rng = rng();
    let (mut cycle, _) = started_cycle(&mut rng);
    let commands = cycle.set_enabled(true, &mut rng).expect("already running");
    assert!(commands.is_empty());
    assert_eq!(cycle.active().len(), 2);
}

#[test]
fn test_reconfigure_applies_new_timing() {
    let mut rng = rng();
    let (mut cycle, _) = started_cycle(&mut rng);
    let new_timing = PlatformTimingDef {
        initial_delay: 0.5,
        ..timing()
    };
    let commands = cycle
        .reconfigure(new_timing, true, &mut rng)
        .expect("restart succeeds");
    assert_eq!(commands.len(), 2);
    assert_eq!(cycle.phase(), CyclePhase::Delay(0.5));

    let commands = cycle
        .reconfigure(timing(), false, &mut rng)
        .expect("disable succeeds");
    assert!(commands.is_empty());
    assert!(!cycle.is_running());
}

// -----------------------------------------------------------------------------
// Side spawner
// -----------------------------------------------------------------------------

#[test]
fn test_side_positions_stay_on_spawner_axis() {
    let def = spawner_def(ApproachMode::Side);
    let (positions, skipped) = pick_positions(&def, 3, &mut rng(), |_| true);
    assert_eq!(skipped, 0);
    for p in positions {
        assert_eq!(p.x, -550.0);
        assert!((-200.0..=200.0).contains(&p.y));
    }
}

#[test]
fn test_top_positions_use_origin_height() {
    let def = spawner_def(ApproachMode::Top);
    let (positions, _) = pick_positions(&def, 3, &mut rng(), |_| true);
    for p in positions {
        assert_eq!(p.y, 300.0);
        assert!((-200.0..=200.0).contains(&p.x));
    }
}

#[test]
fn test_random_location_varies_off_axis() {
    let mut def = spawner_def(ApproachMode::Side);
    def.random_location = true;
    let (positions, _) = pick_positions(&def, 3, &mut rng(), |_| true);
    for p in positions {
        assert!((-200.0..=200.0).contains(&p.x));
    }
}

#[test]
fn test_blocked_positions_are_skipped() {
    let def = spawner_def(ApproachMode::Side);
    let mut attempts = 0;
    let (positions, skipped) = pick_positions(&def, 2, &mut rng(), |_| {
        attempts += 1;
        false
    });
    assert!(positions.is_empty());
    assert_eq!(skipped, 2);
    assert_eq!(attempts, 2 * MAX_PLACEMENT_ATTEMPTS);
}

#[test]
fn test_positions_respect_min_separation() {
    let mut def = spawner_def(ApproachMode::Side);
    def.min_separation = 50.0;
    let (positions, _) = pick_positions(&def, 3, &mut rng(), |_| true);
    for (i, a) in positions.iter().enumerate() {
        for b in &positions[i + 1..] {
            assert!(a.distance(*b) >= 50.0);
        }
    }
}

#[test]
fn test_pick_enemy_fixed_and_random() {
    let mut def = spawner_def(ApproachMode::Side);
    def.pattern = PatternDef::Feint;
    assert_eq!(
        pick_enemy(&def, &mut rng()),
        EnemyKind::Bird(BirdPattern::Feint)
    );

    def.random_pattern = true;
    let mut rng = rng();
    for _ in 0..50 {
        assert_ne!(
            pick_enemy(&def, &mut rng),
            EnemyKind::Bird(BirdPattern::Redirect)
        );
    }

    def.enemy = EnemyChoice::Shooter;
    for _ in 0..50 {
        assert!(matches!(pick_enemy(&def, &mut rng), EnemyKind::Shooter(_)));
    }
}

#[test]
fn test_spawner_tick_and_wave_override() {
    let mut spawner = EnemySpawner::new(spawner_def(ApproachMode::Side));
    let mut rng = rng();

    assert_eq!(spawner.tick(0.1, &mut rng), None);
    let mut batch = None;
    for _ in 0..300 {
        if let Some(count) = spawner.tick(0.01, &mut rng) {
            batch = Some(count);
            break;
        }
    }
    assert!(batch.is_some_and(|c| (1..=3).contains(&c)));

    spawner.apply_wave(&SpawnerWaveDef {
        spawner: "left".to_string(),
        enabled: false,
        min_count: 4,
        max_count: 4,
        min_interval: 0.5,
        max_interval: 0.5,
    });
    assert_eq!(spawner.def.min_count, 4);
    for _ in 0..300 {
        assert_eq!(spawner.tick(0.01, &mut rng), None);
    }
}

// -----------------------------------------------------------------------------
// Rail spawner
// -----------------------------------------------------------------------------

fn rail_def() -> RailDef {
    RailDef {
        points: vec![(-300.0, 340.0), (300.0, 340.0)],
        pattern: None,
        wait_until_clear: true,
        exact_time: Some(1.0),
        min_time: 1.0,
        max_time: 5.0,
    }
}

#[test]
fn test_rail_waits_for_clear_arena() {
    let mut rail = RailSpawner::new(rail_def());
    let mut rng = rng();

    assert_eq!(rail.tick(0.1, true, &mut rng), None);
    assert_eq!(rail.phase, RailPhase::WaitingForClear);
    for _ in 0..50 {
        assert_eq!(rail.tick(0.1, true, &mut rng), None);
    }
    rail.tick(0.1, false, &mut rng);
    assert_eq!(rail.phase, RailPhase::Countdown(1.0));
}

#[test]
fn test_rail_spawns_at_a_rail_point_after_exact_time() {
    let mut rail = RailSpawner::new(rail_def());
    let mut rng = rng();

    rail.tick(0.0, false, &mut rng);
    assert_eq!(rail.tick(0.5, false, &mut rng), None);
    let spawn = rail.tick(0.6, false, &mut rng).expect("countdown elapsed");
    assert_eq!(spawn.position.y, 340.0);
    assert_eq!(spawn.position.x.abs(), 300.0);
    assert_eq!(rail.phase, RailPhase::Ready);
}

#[test]
fn test_rail_fixed_pattern_and_idle_without_points() {
    let mut def = rail_def();
    def.pattern = Some(PatternDef::Stationed);
    def.wait_until_clear = false;
    let mut rail = RailSpawner::new(def);
    let mut rng = rng();
    rail.tick(0.0, true, &mut rng);
    let spawn = rail.tick(2.0, true, &mut rng).expect("no clear wait");
    assert_eq!(spawn.pattern, ShooterPattern::Stationed);

    let mut idle = RailSpawner::new(RailDef::default());
    assert!(idle.take_idle_warning());
    assert!(!idle.take_idle_warning());
    assert_eq!(idle.tick(10.0, false, &mut rng), None);
}

// -----------------------------------------------------------------------------
// Platform animation
// -----------------------------------------------------------------------------

#[test]
fn test_ease_in_out_endpoints() {
    assert_eq!(ease_in_out(0.0), 0.0);
    assert_eq!(ease_in_out(1.0), 1.0);
    assert_eq!(ease_in_out(0.5), 0.5);
}

#[test]
fn test_platform_anim_appears_then_vanishes() {
    let tuning = PlatformTuning::default();
    let mut anim = PlatformAnim::new(10.0);

    let (scale, _) = anim.sample(&tuning);
    assert_eq!(scale, tuning.min_scale);

    assert!(!anim.advance(tuning.anim_duration + 0.01, &tuning));
    assert_eq!(anim.phase, AnimPhase::Steady);
    assert_eq!(anim.sample(&tuning), (1.0, 0.0));

    anim.begin_warning();
    anim.advance(0.04, &tuning);
    let (scale, _) = anim.sample(&tuning);
    assert!((scale - 1.0).abs() <= tuning.pulse_amplitude + f32::EPSILON);

    anim.begin_vanish();
    assert!(!anim.advance(tuning.anim_duration * 0.5, &tuning));
    assert!(anim.advance(tuning.anim_duration, &tuning));
    assert_eq!(anim.sample(&tuning).0, tuning.min_scale);
}

#[test]
fn test_start_platform_fuse() {
    let mut platform = StartPlatform::default();
    assert!(!platform.tick(5.0, 2.0));
    platform.touched_for = Some(0.0);
    assert!(!platform.tick(1.5, 2.0));
    assert!(platform.tick(0.6, 2.0));
}

#[test]
fn test_free_check_sees_candidate_position() {
    let def = spawner_def(ApproachMode::Side);
    let (positions, _) = pick_positions(&def, 1, &mut rng(), |p: Vec2| p.x < 0.0);
    assert_eq!(positions.len(), 1);
}

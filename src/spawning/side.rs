//! Spawning domain: side and top enemy spawners.

use avian2d::prelude::*;
use bevy::prelude::*;
use rand::Rng;
use rand::seq::IndexedRandom;

use crate::content::{
    ApproachMode, ContentRegistry, EnemyChoice, SpawnRanges, SpawnerDef, SpawnerWaveDef,
    spawner_ranges,
};
use crate::core::{RunRng, sample_count, sample_range};
use crate::enemies::{
    BirdPattern, BirdTuning, EnemyKind, ShooterPattern, ShooterTuning, spawn_enemy,
};

pub(crate) const MAX_PLACEMENT_ATTEMPTS: u32 = 100;

/// One spawner from level data plus its wave overrides and countdown.
#[derive(Debug, Clone)]
pub struct EnemySpawner {
    pub def: SpawnerDef,
    pub enabled: bool,
    /// Seconds until the next batch
    pub countdown: f32,
}

impl EnemySpawner {
    pub fn new(def: SpawnerDef) -> Self {
        Self {
            def,
            enabled: true,
            countdown: -1.0,
        }
    }

    pub fn apply_wave(&mut self, overrides: &SpawnerWaveDef) {
        self.enabled = overrides.enabled;
        self.def.min_count = overrides.min_count;
        self.def.max_count = overrides.max_count;
        self.def.min_interval = overrides.min_interval;
        self.def.max_interval = overrides.max_interval;
        self.countdown = -1.0;
    }

    /// Count of enemies to spawn this frame, if the countdown ran out.
    /// A negative countdown means a fresh wait must be drawn first.
    pub fn tick<R: Rng + ?Sized>(&mut self, dt: f32, rng: &mut R) -> Option<u32> {
        if !self.enabled {
            return None;
        }
        if self.countdown < 0.0 {
            self.countdown = sample_range(rng, self.def.min_interval, self.def.max_interval);
            return None;
        }
        self.countdown -= dt;
        if self.countdown > 0.0 {
            return None;
        }
        self.countdown = sample_range(rng, self.def.min_interval, self.def.max_interval);
        Some(sample_count(rng, self.def.min_count, self.def.max_count))
    }
}

#[derive(Resource, Debug, Clone, Default)]
pub struct EnemySpawners(pub Vec<EnemySpawner>);

impl EnemySpawners {
    pub fn from_registry(registry: &ContentRegistry) -> Self {
        Self(
            registry
                .level
                .spawners
                .iter()
                .cloned()
                .map(EnemySpawner::new)
                .collect(),
        )
    }

    pub fn get_mut(&mut self, id: &str) -> Option<&mut EnemySpawner> {
        self.0.iter_mut().find(|s| s.def.id == id)
    }
}

fn sample_candidate<R: Rng + ?Sized>(def: &SpawnerDef, ranges: &SpawnRanges, rng: &mut R) -> Vec2 {
    let on_axis = |range: (f32, f32), rng: &mut R| sample_range(rng, range.0, range.1);
    match def.mode {
        ApproachMode::Side => {
            let y = on_axis(ranges.y, rng);
            let x = if def.random_location {
                on_axis(ranges.x, rng)
            } else {
                def.origin.0
            };
            Vec2::new(x, y)
        }
        ApproachMode::Top => {
            let x = on_axis(ranges.x, rng);
            let y = if def.random_location {
                on_axis(ranges.y, rng)
            } else {
                def.origin.1
            };
            Vec2::new(x, y)
        }
    }
}

/// Pick up to `count` positions along the spawner axis. Each placement gets
/// `MAX_PLACEMENT_ATTEMPTS` tries to be at least `min_separation` from this
/// batch's earlier picks and to pass `is_free`. Returns the positions and how
/// many enemies were skipped.
pub(crate) fn pick_positions<R: Rng + ?Sized>(
    def: &SpawnerDef,
    count: u32,
    rng: &mut R,
    mut is_free: impl FnMut(Vec2) -> bool,
) -> (Vec<Vec2>, u32) {
    let ranges = spawner_ranges(def);
    let mut picked: Vec<Vec2> = Vec::with_capacity(count as usize);
    let mut skipped = 0;

    for _ in 0..count {
        let found = (0..MAX_PLACEMENT_ATTEMPTS).find_map(|_| {
            let candidate = sample_candidate(def, &ranges, rng);
            let far_enough = picked
                .iter()
                .all(|p| p.distance(candidate) >= def.min_separation);
            (far_enough && is_free(candidate)).then_some(candidate)
        });

        match found {
            Some(mut position) => {
                match def.mode {
                    ApproachMode::Side => position.y = position.y.clamp(ranges.y.0, ranges.y.1),
                    ApproachMode::Top => position.x = position.x.clamp(ranges.x.0, ranges.x.1),
                }
                picked.push(position);
            }
            None => skipped += 1,
        }
    }

    (picked, skipped)
}

/// Enemy family and pattern for one spawn.
pub(crate) fn pick_enemy<R: Rng + ?Sized>(def: &SpawnerDef, rng: &mut R) -> EnemyKind {
    let choice = if def.random_enemy {
        if rng.random_bool(0.5) {
            EnemyChoice::Bird
        } else {
            EnemyChoice::Shooter
        }
    } else {
        def.enemy
    };

    if !def.random_pattern {
        return EnemyKind::from_def(choice, def.pattern);
    }

    match choice {
        EnemyChoice::Bird => {
            let patterns: &[BirdPattern] = if def.allow_redirect {
                &[BirdPattern::Straight, BirdPattern::Feint, BirdPattern::Redirect]
            } else {
                &[BirdPattern::Straight, BirdPattern::Feint]
            };
            EnemyKind::Bird(*patterns.choose(rng).unwrap_or(&BirdPattern::Straight))
        }
        EnemyChoice::Shooter => {
            let pattern = if rng.random_bool(0.5) {
                ShooterPattern::Sweeping
            } else {
                ShooterPattern::Stationed
            };
            EnemyKind::Shooter(pattern)
        }
    }
}

pub(crate) fn run_enemy_spawners(
    mut commands: Commands,
    time: Res<Time>,
    mut spawners: ResMut<EnemySpawners>,
    mut rng: ResMut<RunRng>,
    bird_tuning: Res<BirdTuning>,
    shooter_tuning: Res<ShooterTuning>,
    spatial_query: SpatialQuery,
    sensors: Query<(), With<Sensor>>,
) {
    let dt = time.delta_secs();

    for spawner in spawners.0.iter_mut() {
        let Some(count) = spawner.tick(dt, &mut rng.0) else {
            continue;
        };
        let def = &spawner.def;

        let is_free = |position: Vec2| {
            if def.bypass_physics_check {
                return true;
            }
            let hits = spatial_query.shape_intersections(
                &Collider::circle(def.enemy_radius),
                position,
                0.0,
                &SpatialQueryFilter::default(),
            );
            if def.ignore_sensors {
                hits.iter().all(|&hit| sensors.contains(hit))
            } else {
                hits.is_empty()
            }
        };

        let (positions, skipped) = pick_positions(def, count, &mut rng.0, is_free);
        if skipped > 0 {
            warn!(
                "Spawner '{}' skipped {} of {} enemies after {} attempts each",
                def.id, skipped, count, MAX_PLACEMENT_ATTEMPTS
            );
        }

        for position in positions {
            let kind = pick_enemy(def, &mut rng.0);
            debug!("Spawner '{}' -> {:?} at {:?}", def.id, kind, position);
            spawn_enemy(
                &mut commands,
                kind,
                def.mode,
                position,
                &bird_tuning,
                &shooter_tuning,
            );
        }
    }
}

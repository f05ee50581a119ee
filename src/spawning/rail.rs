//! Spawning domain: rail spawner for descending shooters.

use bevy::prelude::*;
use rand::Rng;

use crate::content::{ApproachMode, RailDef, point};
use crate::core::{RunRng, sample_range};
use crate::enemies::{BirdTuning, Enemy, EnemyKind, ShooterPattern, ShooterTuning, spawn_enemy};

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum RailPhase {
    /// Decide whether to wait for the arena to clear
    #[default]
    Ready,
    WaitingForClear,
    Countdown(f32),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RailSpawn {
    pub position: Vec2,
    pub pattern: ShooterPattern,
}

#[derive(Resource, Debug, Clone, Default)]
pub struct RailSpawner {
    pub def: RailDef,
    pub phase: RailPhase,
    warned_idle: bool,
}

impl RailSpawner {
    pub fn new(def: RailDef) -> Self {
        Self {
            def,
            phase: RailPhase::Ready,
            warned_idle: false,
        }
    }

    pub fn set_time_range(&mut self, min: f32, max: f32) {
        self.def.min_time = min;
        self.def.max_time = max;
        self.phase = RailPhase::Ready;
    }

    /// True the first time the spawner is found without points.
    pub fn take_idle_warning(&mut self) -> bool {
        if self.def.points.is_empty() && !self.warned_idle {
            self.warned_idle = true;
            return true;
        }
        false
    }

    fn draw_wait<R: Rng + ?Sized>(&self, rng: &mut R) -> f32 {
        match self.def.exact_time {
            Some(exact) => exact,
            None => sample_range(rng, self.def.min_time, self.def.max_time),
        }
    }

    pub fn tick<R: Rng + ?Sized>(
        &mut self,
        dt: f32,
        enemies_present: bool,
        rng: &mut R,
    ) -> Option<RailSpawn> {
        if self.def.points.is_empty() {
            return None;
        }

        match self.phase {
            RailPhase::Ready => {
                self.phase = if self.def.wait_until_clear && enemies_present {
                    RailPhase::WaitingForClear
                } else {
                    RailPhase::Countdown(self.draw_wait(rng))
                };
                None
            }
            RailPhase::WaitingForClear => {
                if !enemies_present {
                    self.phase = RailPhase::Countdown(self.draw_wait(rng));
                }
                None
            }
            RailPhase::Countdown(remaining) => {
                let remaining = remaining - dt;
                if remaining > 0.0 {
                    self.phase = RailPhase::Countdown(remaining);
                    return None;
                }
                self.phase = RailPhase::Ready;

                let index = rng.random_range(0..self.def.points.len());
                let pattern = match self.def.pattern {
                    Some(def) => ShooterPattern::from_def(def),
                    None if rng.random_bool(0.5) => ShooterPattern::Sweeping,
                    None => ShooterPattern::Stationed,
                };
                Some(RailSpawn {
                    position: point(self.def.points[index]),
                    pattern,
                })
            }
        }
    }
}

pub(crate) fn run_rail_spawner(
    mut commands: Commands,
    time: Res<Time>,
    mut rail: ResMut<RailSpawner>,
    mut rng: ResMut<RunRng>,
    bird_tuning: Res<BirdTuning>,
    shooter_tuning: Res<ShooterTuning>,
    enemies: Query<(), With<Enemy>>,
) {
    if rail.take_idle_warning() {
        warn!("Rail spawner has no points and stays idle");
    }

    let Some(spawn) = rail.tick(time.delta_secs(), !enemies.is_empty(), &mut rng.0) else {
        return;
    };

    debug!("Rail spawning {:?} shooter at {:?}", spawn.pattern, spawn.position);
    spawn_enemy(
        &mut commands,
        EnemyKind::Shooter(spawn.pattern),
        ApproachMode::Top,
        spawn.position,
        &bird_tuning,
        &shooter_tuning,
    );
}


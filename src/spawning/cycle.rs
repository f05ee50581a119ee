//! Spawning domain: the platform spawn cycle.
//!
//! `SpawnCycle` owns which spawn points are occupied and decides when a
//! platform is warned, retired, and replaced. It is advanced with `tick` and
//! answers with `CycleCommand`s that the platform systems carry out, so the
//! whole rule set runs without a `World`.

use bevy::prelude::*;
use rand::Rng;
use rand::seq::IndexedRandom;
use std::collections::HashSet;

use crate::content::{NoCandidatePolicy, PlatformCycleDef, PlatformTimingDef};
use crate::core::sample_range;
use crate::spawning::resources::PlatformTuning;

/// A platform the cycle currently owns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActiveSlot {
    pub slot: u64,
    pub point: usize,
    pub kind: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleCommand {
    Spawn { slot: u64, point: usize, kind: usize },
    /// Start the warning pulse
    Warn { slot: u64 },
    /// Play the vanish animation, then despawn
    Retire { slot: u64 },
    /// Despawn every cycle platform immediately
    ClearAll,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum CyclePhase {
    #[default]
    Stopped,
    Delay(f32),
    Idle { remaining: f32, warning: f32 },
    Warning { slot: u64, remaining: f32 },
    Retiring { slot: u64, remaining: f32 },
    Respawning { freed: usize, kind: usize, remaining: f32 },
    WaitingForFree { freed: usize, kind: usize, waited: f32, poll: f32 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleStartError {
    NoKinds,
    NoPoints,
}

impl std::fmt::Display for CycleStartError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CycleStartError::NoKinds => write!(f, "no platform kinds configured"),
            CycleStartError::NoPoints => write!(f, "no spawn points, groups, or initial points"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    Point(usize),
    /// Poll again later (WaitForFree)
    Wait,
}

#[derive(Resource, Debug, Clone, Default)]
pub struct SpawnCycle {
    pub def: PlatformCycleDef,
    pub timing: PlatformTimingDef,
    pub enabled: bool,
    anim_duration: f32,
    poll_interval: f32,
    phase: CyclePhase,
    active: Vec<ActiveSlot>,
    next_slot: u64,
}

impl SpawnCycle {
    pub fn new(def: PlatformCycleDef, timing: PlatformTimingDef, tuning: &PlatformTuning) -> Self {
        Self {
            def,
            timing,
            enabled: false,
            anim_duration: tuning.anim_duration,
            poll_interval: tuning.wait_poll_interval,
            phase: CyclePhase::Stopped,
            active: Vec::new(),
            next_slot: 0,
        }
    }

    pub fn phase(&self) -> CyclePhase {
        self.phase
    }

    pub fn is_running(&self) -> bool {
        self.phase() != CyclePhase::Stopped
    }

    pub fn active(&self) -> &[ActiveSlot] {
        &self.active
    }

    pub fn occupied(&self) -> Vec<usize> {
        self.active.iter().map(|a| a.point).collect()
    }

    /// Begin the loop. Spawns the initial pair only when nothing is active.
    pub fn start<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
    ) -> Result<Vec<CycleCommand>, CycleStartError> {
        if self.def.kinds.is_empty() {
            return Err(CycleStartError::NoKinds);
        }
        if all_points(&self.def).is_empty() {
            return Err(CycleStartError::NoPoints);
        }

        let mut commands = Vec::new();
        if self.active.is_empty() {
            self.spawn_initial_two(rng, &mut commands);
        }
        self.phase = CyclePhase::Delay(self.timing.initial_delay);
        Ok(commands)
    }

    /// Halt the loop and forget every active platform.
    pub fn stop(&mut self) -> Vec<CycleCommand> {
        self.phase = CyclePhase::Stopped;
        self.active.clear();
        vec![CycleCommand::ClearAll]
    }

    /// Runtime toggle. Only a change of state does anything.
    pub fn set_enabled<R: Rng + ?Sized>(
        &mut self,
        enabled: bool,
        rng: &mut R,
    ) -> Result<Vec<CycleCommand>, CycleStartError> {
        if enabled == self.enabled {
            return Ok(Vec::new());
        }
        self.enabled = enabled;
        if enabled {
            if self.is_running() {
                Ok(Vec::new())
            } else {
                self.start(rng)
            }
        } else {
            Ok(self.stop())
        }
    }

    /// Drop all state and restart with new timings. The caller is expected
    /// to have despawned the existing platforms already.
    pub fn reconfigure<R: Rng + ?Sized>(
        &mut self,
        timing: PlatformTimingDef,
        enabled: bool,
        rng: &mut R,
    ) -> Result<Vec<CycleCommand>, CycleStartError> {
        self.phase = CyclePhase::Stopped;
        self.active.clear();
        self.timing = timing;
        self.enabled = enabled;
        if enabled {
            self.start(rng)
        } else {
            Ok(Vec::new())
        }
    }

    pub fn tick<R: Rng + ?Sized>(&mut self, dt: f32, rng: &mut R) -> Vec<CycleCommand> {
        let mut commands = Vec::new();

        match self.phase() {
            CyclePhase::Stopped => {}
            CyclePhase::Delay(remaining) => {
                let remaining = remaining - dt;
                if remaining > 0.0 {
                    self.phase = CyclePhase::Delay(remaining);
                } else {
                    self.begin_cycle(rng, &mut commands);
                }
            }
            CyclePhase::Idle { remaining, warning } => {
                let remaining = remaining - dt;
                if remaining > 0.0 {
                    self.phase = CyclePhase::Idle { remaining, warning };
                } else if let Some(victim) = self.active.choose(rng).map(|a| a.slot) {
                    commands.push(CycleCommand::Warn { slot: victim });
                    self.phase = CyclePhase::Warning {
                        slot: victim,
                        remaining: warning,
                    };
                } else {
                    self.begin_cycle(rng, &mut commands);
                }
            }
            CyclePhase::Warning { slot, remaining } => {
                let remaining = remaining - dt;
                if remaining > 0.0 {
                    self.phase = CyclePhase::Warning { slot, remaining };
                } else {
                    commands.push(CycleCommand::Retire { slot });
                    self.phase = CyclePhase::Retiring {
                        slot,
                        remaining: self.anim_duration,
                    };
                }
            }
            CyclePhase::Retiring { slot, remaining } => {
                let remaining = remaining - dt;
                if remaining > 0.0 {
                    self.phase = CyclePhase::Retiring { slot, remaining };
                } else {
                    match self.active.iter().position(|a| a.slot == slot) {
                        Some(index) => {
                            let freed = self.active.remove(index);
                            self.phase = CyclePhase::Respawning {
                                freed: freed.point,
                                kind: freed.kind,
                                remaining: self.timing.respawn_delay,
                            };
                        }
                        None => self.begin_cycle(rng, &mut commands),
                    }
                }
            }
            CyclePhase::Respawning {
                freed,
                kind,
                remaining,
            } => {
                let remaining = remaining - dt;
                if remaining > 0.0 {
                    self.phase = CyclePhase::Respawning {
                        freed,
                        kind,
                        remaining,
                    };
                } else {
                    self.respawn(freed, kind, 0.0, rng, &mut commands);
                }
            }
            CyclePhase::WaitingForFree {
                freed,
                kind,
                waited,
                poll,
            } => {
                let waited = waited + dt;
                let poll = poll - dt;
                if poll > 0.0 {
                    self.phase = CyclePhase::WaitingForFree {
                        freed,
                        kind,
                        waited,
                        poll,
                    };
                } else {
                    self.respawn(freed, kind, waited, rng, &mut commands);
                }
            }
        }

        commands
    }

    /// Top of the loop: refill an empty arena, then draw the next retire time.
    fn begin_cycle<R: Rng + ?Sized>(&mut self, rng: &mut R, commands: &mut Vec<CycleCommand>) {
        if self.active.is_empty() {
            self.spawn_initial_two(rng, commands);
        }
        let wait = sample_range(rng, self.timing.min_interval, self.timing.max_interval);
        let until_warning = (wait - self.def.warning_time).max(0.0);
        self.phase = CyclePhase::Idle {
            remaining: until_warning,
            warning: wait - until_warning,
        };
    }

    fn respawn<R: Rng + ?Sized>(
        &mut self,
        freed: usize,
        kind: usize,
        waited: f32,
        rng: &mut R,
        commands: &mut Vec<CycleCommand>,
    ) {
        let destroyed_kind = self.def.kinds.get(kind).map(|k| k.id.as_str());
        let candidates = candidate_points(&self.def, destroyed_kind);
        let occupied = self.occupied();

        match select_point(&self.def, &candidates, freed, &occupied, waited, rng) {
            Selection::Point(point) => {
                commands.push(self.spawn_at(point, rng));
                self.begin_cycle(rng, commands);
            }
            Selection::Wait => {
                self.phase = CyclePhase::WaitingForFree {
                    freed,
                    kind,
                    waited,
                    poll: self.poll_interval,
                };
            }
        }
    }

    fn spawn_initial_two<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        commands: &mut Vec<CycleCommand>,
    ) {
        for point in initial_points(&self.def, rng) {
            commands.push(self.spawn_at(point, rng));
        }
    }

    fn spawn_at<R: Rng + ?Sized>(&mut self, point: usize, rng: &mut R) -> CycleCommand {
        let kind = rng.random_range(0..self.def.kinds.len().max(1));
        let slot = self.next_slot;
        self.next_slot += 1;
        self.active.push(ActiveSlot { slot, point, kind });
        CycleCommand::Spawn { slot, point, kind }
    }
}

fn push_unique(out: &mut Vec<usize>, point: usize, point_count: usize) {
    if point < point_count && !out.contains(&point) {
        out.push(point);
    }
}

/// Every point the cycle may ever use: group members (or the whole table
/// when there are no groups) plus the initial-only points.
pub(crate) fn all_points(def: &PlatformCycleDef) -> Vec<usize> {
    let count = def.points.len();
    let mut out = Vec::new();
    for group in &def.groups {
        for &p in &group.points {
            push_unique(&mut out, p, count);
        }
    }
    if out.is_empty() {
        for p in 0..count {
            push_unique(&mut out, p, count);
        }
    }
    for &p in &def.initial_only_points {
        push_unique(&mut out, p, count);
    }
    out
}

/// Points a replacement for `destroyed_kind` may appear at.
pub(crate) fn candidate_points(def: &PlatformCycleDef, destroyed_kind: Option<&str>) -> Vec<usize> {
    let count = def.points.len();
    let mut out = Vec::new();
    let rule = destroyed_kind.and_then(|kind| def.kind_rules.iter().find(|r| r.kind == kind));

    match rule {
        Some(rule) if !def.groups.is_empty() => {
            for group in rule.allowed_groups.iter().filter_map(|&i| def.groups.get(i)) {
                for &p in &group.points {
                    push_unique(&mut out, p, count);
                }
            }
        }
        _ if !def.groups.is_empty() => {
            match def.default_group.and_then(|i| def.groups.get(i)) {
                Some(group) => {
                    for &p in &group.points {
                        push_unique(&mut out, p, count);
                    }
                }
                None => {
                    for group in &def.groups {
                        for &p in &group.points {
                            push_unique(&mut out, p, count);
                        }
                    }
                }
            }
        }
        _ => {
            for p in 0..count {
                push_unique(&mut out, p, count);
            }
        }
    }

    for &p in &def.initial_only_points {
        push_unique(&mut out, p, count);
    }
    out
}

/// The freed point, whatever its exclusion rules name, and whatever the
/// occupancy rules of occupied points name.
pub(crate) fn excluded_points(
    def: &PlatformCycleDef,
    freed: usize,
    occupied: &[usize],
) -> HashSet<usize> {
    let mut excluded = HashSet::from([freed]);
    for rule in def.exclusion_rules.iter().filter(|r| r.source == freed) {
        excluded.extend(rule.exclude.iter().copied());
    }
    for rule in def
        .occupancy_rules
        .iter()
        .filter(|r| occupied.contains(&r.source))
    {
        excluded.extend(rule.exclude.iter().copied());
    }
    excluded
}

pub(crate) fn select_point<R: Rng + ?Sized>(
    def: &PlatformCycleDef,
    candidates: &[usize],
    freed: usize,
    occupied: &[usize],
    waited: f32,
    rng: &mut R,
) -> Selection {
    if candidates.is_empty() {
        return match all_points(def).choose(rng) {
            Some(&p) => Selection::Point(p),
            None => Selection::Wait,
        };
    }

    let excluded = excluded_points(def, freed, occupied);
    let free: Vec<usize> = candidates
        .iter()
        .copied()
        .filter(|p| !occupied.contains(p))
        .collect();
    let allowed: Vec<usize> = free
        .iter()
        .copied()
        .filter(|p| !excluded.contains(p))
        .collect();

    if let Some(&p) = allowed.choose(rng) {
        return Selection::Point(p);
    }

    let pool = match def.no_candidate_policy {
        NoCandidatePolicy::WaitForFree if !free.is_empty() => {
            let forever = def.wait_for_free_timeout <= 0.0;
            if forever || waited <= def.wait_for_free_timeout {
                return Selection::Wait;
            }
            candidates
        }
        NoCandidatePolicy::AllowExcluded if !free.is_empty() => free.as_slice(),
        _ => candidates,
    };

    match pool.choose(rng) {
        Some(&p) => Selection::Point(p),
        None => Selection::Wait,
    }
}

/// Two points for a fresh arena: the fixed pair if configured, otherwise
/// random initial-only points topped up from the rest without replacement.
pub(crate) fn initial_points<R: Rng + ?Sized>(def: &PlatformCycleDef, rng: &mut R) -> Vec<usize> {
    let all = all_points(def);
    if all.is_empty() {
        return Vec::new();
    }
    if let Some((a, b)) = def.fixed_initial {
        return vec![a, b];
    }

    let mut chosen = Vec::with_capacity(2);
    if def.use_initial_only {
        let mut pool: Vec<usize> = def
            .initial_only_points
            .iter()
            .copied()
            .filter(|&p| p < def.points.len())
            .collect();
        while chosen.len() < 2 && !pool.is_empty() {
            chosen.push(pool.remove(rng.random_range(0..pool.len())));
        }
    }

    let mut available: Vec<usize> = all.iter().copied().filter(|p| !chosen.contains(p)).collect();
    while chosen.len() < 2 && !available.is_empty() {
        chosen.push(available.remove(rng.random_range(0..available.len())));
    }

    // Fewer than two points in total: allow a duplicate
    while chosen.len() < 2 {
        chosen.push(all[rng.random_range(0..all.len())]);
    }
    chosen
}

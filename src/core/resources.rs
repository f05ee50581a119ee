//! Core domain: shared resources for run configuration and pausing.

use bevy::prelude::*;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::collections::HashSet;

/// Resource tracking if gameplay should be paused.
/// Gameplay is paused if any source is active.
#[derive(Resource, Debug, Default)]
pub struct GameplayPaused {
    pub sources: HashSet<String>,
}

impl GameplayPaused {
    pub fn is_paused(&self) -> bool {
        !self.sources.is_empty()
    }

    pub fn pause(&mut self, source: impl Into<String>) {
        self.sources.insert(source.into());
    }

    pub fn unpause(&mut self, source: impl Into<String>) {
        self.sources.remove(&source.into());
    }
}

/// Run condition: returns true only when gameplay is not paused
pub fn gameplay_active(paused: Res<GameplayPaused>) -> bool {
    !paused.is_paused()
}

#[derive(Resource, Debug)]
pub struct RunConfig {
    pub seed: u64,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            seed: rand::rng().random(),
        }
    }
}

/// Seeded RNG shared by every random decision made during a run.
#[derive(Resource, Debug, Deref, DerefMut)]
pub struct RunRng(pub ChaCha8Rng);

impl Default for RunRng {
    fn default() -> Self {
        Self(ChaCha8Rng::seed_from_u64(rand::rng().random()))
    }
}

impl RunRng {
    pub fn reseed(&mut self, seed: u64) {
        self.0 = ChaCha8Rng::seed_from_u64(seed);
    }
}

/// Uniform sample in `[min, max)`, or `min` when the range is empty.
pub fn sample_range<R: Rng + ?Sized>(rng: &mut R, min: f32, max: f32) -> f32 {
    if min >= max {
        min
    } else {
        rng.random_range(min..max)
    }
}

/// Uniform integer in `[min, max]`, or `min` when `max < min`.
pub fn sample_count<R: Rng + ?Sized>(rng: &mut R, min: u32, max: u32) -> u32 {
    if max <= min {
        min
    } else {
        rng.random_range(min..=max)
    }
}

/// Marker for entities owned by the current run. Despawned when the run ends.
#[derive(Component, Debug, Default)]
pub struct RunScoped;

/// Format elapsed seconds as `mm:ss`.
pub fn format_clock(seconds: f32) -> String {
    let total = seconds.max(0.0) as u32;
    format!("{:02}:{:02}", total / 60, total % 60)
}

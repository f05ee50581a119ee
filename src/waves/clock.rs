//! Waves domain: the run clock and the break between waves.

use bevy::ecs::message::Message;
use bevy::prelude::*;
use serde::{Deserialize, Serialize};

pub const WAVE_BREAK_SOURCE: &str = "wave_break";

#[derive(Resource, Debug, Clone, Deserialize, Serialize)]
pub struct WaveClockTuning {
    /// Seconds between wave changes
    pub interval_secs: f32,
    /// Wave changes before the clock freezes
    pub max_changes: u32,
    /// Real seconds gameplay stays paused behind the wave banner
    pub break_secs: f32,
}

impl Default for WaveClockTuning {
    fn default() -> Self {
        Self {
            interval_secs: 60.0,
            max_changes: 4,
            break_secs: 5.0,
        }
    }
}

/// Elapsed run time as shown on the HUD, plus the wave bookkeeping.
///
/// `elapsed` stops once `max_changes` waves have passed while `survived`
/// keeps counting for the save file.
#[derive(Resource, Debug, Clone, Default, PartialEq)]
pub struct WaveClock {
    pub elapsed: f32,
    pub survived: f32,
    pub wave_index: usize,
    pub changes: u32,
}

impl WaveClock {
    pub fn is_frozen(&self, tuning: &WaveClockTuning) -> bool {
        self.changes >= tuning.max_changes
    }

    /// Advance by `dt`. Returns true when elapsed crosses the next interval
    /// boundary and a wave change is due.
    pub fn tick(&mut self, dt: f32, tuning: &WaveClockTuning) -> bool {
        self.survived += dt;
        if self.is_frozen(tuning) {
            return false;
        }

        let before = self.elapsed;
        self.elapsed += dt;
        if tuning.interval_secs <= 0.0 {
            return false;
        }
        let boundary = (self.changes + 1) as f32 * tuning.interval_secs;
        if before < boundary && self.elapsed >= boundary {
            self.changes += 1;
            return true;
        }
        false
    }

    /// Move to the next wave, staying on the last one once the list runs out.
    pub fn next_index(&self, wave_count: usize) -> usize {
        (self.wave_index + 1).min(wave_count.saturating_sub(1))
    }
}

/// Pause banner shown between waves. Counts down in real time.
#[derive(Resource, Debug, Clone, Default)]
pub struct WaveBreak {
    remaining: Option<f32>,
    pub banner: Option<String>,
}

impl WaveBreak {
    pub fn start(&mut self, wave_index: usize, seconds: f32) {
        self.remaining = Some(seconds);
        self.banner = Some(format!("WAVE {}", wave_index + 1));
    }

    pub fn is_active(&self) -> bool {
        self.remaining.is_some()
    }

    /// Returns true on the frame the break ends.
    pub fn tick(&mut self, dt: f32) -> bool {
        let Some(remaining) = self.remaining else {
            return false;
        };
        let remaining = remaining - dt;
        if remaining > 0.0 {
            self.remaining = Some(remaining);
            return false;
        }
        self.remaining = None;
        self.banner = None;
        true
    }
}

/// Ask for the next wave now. Sent by the clock, or by dev tools.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AdvanceWave;

impl Message for AdvanceWave {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WaveChanged {
    pub index: usize,
    pub id: String,
}

impl Message for WaveChanged {}

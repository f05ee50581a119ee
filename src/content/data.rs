//! Data definitions for all RON content files.
//!
//! These structs mirror the structure in assets/data/*.ron and are used
//! for deserialization. Positions are stored as `(x, y)` tuples in world
//! pixels and converted to `Vec2` at the use site.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::enemies::{BirdTuning, ShooterTuning};
use crate::health::HealthTuning;
use crate::movement::MovementTuning;
use crate::spawning::PlatformTuning;
use crate::waves::WaveClockTuning;

// ============================================================================
// Common wrapper for RON files with schema_version and items
// ============================================================================

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DataFile<T> {
    pub schema_version: u32,
    pub items: Vec<T>,
}

pub type Point = (f32, f32);

pub fn point(p: Point) -> Vec2 {
    Vec2::new(p.0, p.1)
}

// ============================================================================
// Gameplay defaults (gameplay_defaults.ron)
// ============================================================================

/// Numeric tuning for every domain, loaded once at startup.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct GameplayDefaults {
    pub schema_version: u32,
    pub arena: ArenaDefaults,
    pub movement: MovementTuning,
    pub health: HealthTuning,
    pub wave_clock: WaveClockTuning,
    pub bird: BirdTuning,
    pub shooter: ShooterTuning,
    pub platforms: PlatformTuning,
}

#[derive(Resource, Debug, Clone, Deserialize, Serialize)]
pub struct ArenaDefaults {
    /// Enemies and bullets past |x| > despawn_x are removed
    pub despawn_x: f32,
    /// Enemies and bullets past |y| > despawn_y are removed
    pub despawn_y: f32,
    /// Player x is clamped to [-zone_x, zone_x]
    pub zone_x: f32,
    /// Player y is clamped to at most zone_y
    pub zone_y: f32,
}

impl Default for ArenaDefaults {
    fn default() -> Self {
        Self {
            despawn_x: 600.0,
            despawn_y: 350.0,
            zone_x: 560.0,
            zone_y: 330.0,
        }
    }
}

// ============================================================================
// Level layout (level.ron)
// ============================================================================

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LevelDef {
    pub schema_version: u32,
    pub platform_cycle: PlatformCycleDef,
    /// Points A and B for the two static platforms
    pub static_platforms: Vec<Point>,
    /// Platform kind used for the static pair
    pub static_platform_kind: String,
    /// Platform kind used for the start platform under the respawn anchor
    pub start_platform_kind: String,
    pub spawners: Vec<SpawnerDef>,
    pub rail: RailDef,
    /// The start platform spawns here; respawns land `respawn_lift` above it
    pub respawn_anchor: Point,
    pub respawn_lift: f32,
    /// Touching below this height counts as a fall
    pub kill_zone_y: f32,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct PlatformCycleDef {
    pub points: Vec<Point>,
    pub groups: Vec<PlatformGroupDef>,
    pub default_group: Option<usize>,
    pub kinds: Vec<PlatformKindDef>,
    pub kind_rules: Vec<KindRuleDef>,
    pub initial_only_points: Vec<usize>,
    pub use_initial_only: bool,
    pub fixed_initial: Option<(usize, usize)>,
    pub exclusion_rules: Vec<PointRuleDef>,
    pub occupancy_rules: Vec<PointRuleDef>,
    pub no_candidate_policy: NoCandidatePolicy,
    /// Seconds to wait for a free point (0 waits forever)
    pub wait_for_free_timeout: f32,
    /// Seconds of warning pulse before a platform is retired
    pub warning_time: f32,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PlatformGroupDef {
    pub name: String,
    pub points: Vec<usize>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PlatformKindDef {
    pub id: String,
    pub size: Point,
    pub color: (f32, f32, f32),
    /// Ledges relative to the platform centre
    pub ledges: Vec<LedgeDef>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LedgeDef {
    pub grab: Point,
    pub climb: Point,
}

/// Restricts where a replacement may appear after a platform of `kind` is retired.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct KindRuleDef {
    pub kind: String,
    pub allowed_groups: Vec<usize>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PointRuleDef {
    pub source: usize,
    pub exclude: Vec<usize>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
pub enum NoCandidatePolicy {
    #[default]
    PickAny,
    AllowExcluded,
    WaitForFree,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
pub enum ApproachMode {
    #[default]
    Side,
    Top,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
pub enum EnemyChoice {
    #[default]
    Bird,
    Shooter,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SpawnerDef {
    pub id: String,
    pub mode: ApproachMode,
    pub origin: Point,
    pub bound_a: Point,
    pub bound_b: Point,
    pub jitter_positive: f32,
    pub jitter_negative: f32,
    pub min_count: u32,
    pub max_count: u32,
    pub min_interval: f32,
    pub max_interval: f32,
    pub enemy: EnemyChoice,
    pub pattern: PatternDef,
    pub random_enemy: bool,
    pub random_pattern: bool,
    pub allow_redirect: bool,
    pub random_location: bool,
    pub min_separation: f32,
    pub enemy_radius: f32,
    pub ignore_sensors: bool,
    pub bypass_physics_check: bool,
}

/// Movement pattern named in data; interpreted per enemy family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
pub enum PatternDef {
    #[default]
    Straight,
    Feint,
    Redirect,
    Sweeping,
    Stationed,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RailDef {
    pub points: Vec<Point>,
    /// Fixed shooter pattern; random between sweeping and stationed when absent
    pub pattern: Option<PatternDef>,
    pub wait_until_clear: bool,
    pub exact_time: Option<f32>,
    pub min_time: f32,
    pub max_time: f32,
}

// ============================================================================
// Waves (waves.ron)
// ============================================================================

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct WaveDef {
    pub id: String,
    pub abilities: AbilitiesDef,
    pub input_changing: bool,
    pub platform_changing: bool,
    pub static_platforms: bool,
    pub platform_timing: PlatformTimingDef,
    pub rail_min_time: f32,
    pub rail_max_time: f32,
    pub spawners: Vec<SpawnerWaveDef>,
}

#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize)]
pub struct AbilitiesDef {
    pub double_jump: bool,
    pub glide: bool,
    pub dash: bool,
}

#[derive(Debug, Clone, Copy, Deserialize, Serialize)]
pub struct PlatformTimingDef {
    pub initial_delay: f32,
    pub min_interval: f32,
    pub max_interval: f32,
    pub respawn_delay: f32,
}

impl Default for PlatformTimingDef {
    fn default() -> Self {
        Self {
            initial_delay: 1.0,
            min_interval: 3.0,
            max_interval: 6.0,
            respawn_delay: 2.0,
        }
    }
}

/// Per-spawner overrides applied when a wave begins.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SpawnerWaveDef {
    pub spawner: String,
    pub enabled: bool,
    pub min_count: u32,
    pub max_count: u32,
    pub min_interval: f32,
    pub max_interval: f32,
}

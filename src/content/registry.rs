//! ContentRegistry resource providing lookups for all loaded content.

use bevy::prelude::*;

use super::data::*;

/// Central registry for all loaded game content.
#[derive(Resource, Debug, Clone)]
pub struct ContentRegistry {
    pub defaults: GameplayDefaults,
    pub level: LevelDef,
    /// Ordered wave list; index 0 is applied when a run starts
    pub waves: Vec<WaveDef>,
}

impl ContentRegistry {
    /// Wave at `index`, clamped to the last defined wave.
    pub fn wave(&self, index: usize) -> Option<&WaveDef> {
        if self.waves.is_empty() {
            return None;
        }
        self.waves.get(index.min(self.waves.len() - 1))
    }

    pub fn spawner(&self, id: &str) -> Option<&SpawnerDef> {
        self.level.spawners.iter().find(|s| s.id == id)
    }

    pub fn platform_kind(&self, id: &str) -> Option<&PlatformKindDef> {
        self.level.platform_cycle.kinds.iter().find(|k| k.id == id)
    }

    /// Returns a summary of loaded content counts for logging.
    pub fn summary(&self) -> String {
        let cycle = &self.level.platform_cycle;
        format!(
            "ContentRegistry loaded:\n\
             - Waves: {}\n\
             - Platform points: {}\n\
             - Platform groups: {}\n\
             - Platform kinds: {}\n\
             - Enemy spawners: {}\n\
             - Rail points: {}",
            self.waves.len(),
            cycle.points.len(),
            cycle.groups.len(),
            cycle.kinds.len(),
            self.level.spawners.len(),
            self.level.rail.points.len(),
        )
    }
}

//! Content domain: RON-backed level, wave, and tuning data.

mod data;
mod loader;
mod registry;
mod validation;


pub use data::*;
pub use loader::{ContentLoadError, embedded_content, load_all_content};
pub use registry::ContentRegistry;
pub use validation::{
    SpawnRanges, ValidationError, spawner_axis_range, spawner_ranges, validate_content,
};

use bevy::prelude::*;
use std::path::Path;

pub struct ContentPlugin;

impl Plugin for ContentPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ArenaDefaults>()
            .add_systems(PreStartup, load_content);
    }
}

/// Load content from disk, falling back to the embedded copies, and publish
/// the per-domain tuning resources.
fn load_content(mut commands: Commands) {
    let registry = match load_all_content(Path::new("assets/data")) {
        Ok(registry) => registry,
        Err(errors) => {
            for e in &errors {
                error!("{}", e);
            }
            warn!("Falling back to embedded content");
            match embedded_content() {
                Ok(registry) => registry,
                Err(e) => {
                    error!("{}", e);
                    return;
                }
            }
        }
    };

    for e in validate_content(&registry) {
        warn!("{}", e);
    }

    info!("{}", registry.summary());

    let defaults = registry.defaults.clone();
    commands.insert_resource(defaults.arena);
    commands.insert_resource(defaults.movement);
    commands.insert_resource(defaults.health);
    commands.insert_resource(defaults.wave_clock);
    commands.insert_resource(defaults.bird);
    commands.insert_resource(defaults.shooter);
    commands.insert_resource(defaults.platforms);
    commands.insert_resource(registry);
}

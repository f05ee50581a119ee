mod content;
mod core;
#[cfg(feature = "dev-tools")]
mod debug;
mod enemies;
mod health;
mod movement;
mod spawning;
mod ui;
mod waves;

use avian2d::prelude::*;
use bevy::prelude::*;

fn main() {
    let mut app = App::new();
    app.add_plugins(DefaultPlugins.set(WindowPlugin {
        primary_window: Some(Window {
            title: "Skyhop".to_string(),
            resolution: (1280, 720).into(),
            resizable: true,
            ..default()
        }),
        ..default()
    }))
    .add_plugins(PhysicsPlugins::default())
    .insert_resource(ClearColor(Color::srgb(0.08, 0.1, 0.16)))
    .add_plugins((
        core::CorePlugin,
        content::ContentPlugin,
        movement::MovementPlugin,
        enemies::EnemiesPlugin,
        spawning::SpawningPlugin,
        waves::WavesPlugin,
        health::HealthPlugin,
        ui::UiPlugin,
    ));

    #[cfg(feature = "dev-tools")]
    app.add_plugins(debug::DebugPlugin);

    app.run();
}

//! Debug domain: hotkeys, the info overlay, and movement logging.

use bevy::ecs::message::{MessageReader, MessageWriter};
use bevy::prelude::*;

use crate::core::{GameplayPaused, RunConfig, RunRng, RunScoped, format_clock};
use crate::debug::state::{DebugAction, DebugState};
use crate::health::{DamageKind, HealthRequest, PlayerHealth};
use crate::movement::{AbilityUnlocks, MovementEvent, Player};
use crate::spawning::{
    CyclePlatform, PlatformAnim, PlatformTuning, SpawnCycle, execute_cycle_commands,
};
use crate::waves::{AdvanceWave, WaveClock};

/// Marker for the debug info overlay
#[derive(Component, Debug)]
pub struct DebugInfoOverlay;

/// Handle the F-key shortcuts during a run
pub(crate) fn handle_debug_hotkeys(
    mut commands: Commands,
    keyboard: Res<ButtonInput<KeyCode>>,
    mut debug_state: ResMut<DebugState>,
    mut advance: MessageWriter<AdvanceWave>,
    mut requests: MessageWriter<HealthRequest>,
    mut cycle: ResMut<SpawnCycle>,
    mut rng: ResMut<RunRng>,
    platform_tuning: Res<PlatformTuning>,
    mut platforms: Query<(Entity, &CyclePlatform, &mut PlatformAnim)>,
    player: Query<(&Transform, &PlayerHealth), With<Player>>,
) {
    for action in DebugAction::ALL {
        if !keyboard.just_pressed(action.key()) {
            continue;
        }
        let point = player
            .single()
            .map(|(transform, _)| transform.translation.truncate())
            .unwrap_or_default();

        match action {
            DebugAction::ToggleInfo => {
                debug_state.show_info = !debug_state.show_info;
            }
            DebugAction::AdvanceWave => {
                advance.write(AdvanceWave);
                debug_state.set_message("Wave advanced", 2.0);
            }
            DebugAction::HitProjectile => {
                requests.write(HealthRequest::Hit {
                    kind: DamageKind::Projectile,
                    point,
                });
            }
            DebugAction::HitBird => {
                requests.write(HealthRequest::Hit {
                    kind: DamageKind::BirdCollision,
                    point,
                });
            }
            DebugAction::Fall => {
                requests.write(HealthRequest::Fall);
            }
            DebugAction::LogHealth => {
                if let Ok((_, health)) = player.single() {
                    info!(
                        "[DEBUG] hearts {}/{}, core {}, invincible {}, regen {:?}, pending {}",
                        health.hearts(),
                        health.max_hearts(),
                        health.core(),
                        health.is_invincible(),
                        health.regen_phase(),
                        health.has_pending_damage()
                    );
                }
            }
            DebugAction::TogglePlatformCycle => {
                let enabled = !cycle.enabled;
                match cycle.set_enabled(enabled, &mut rng.0) {
                    Ok(orders) => {
                        execute_cycle_commands(
                            &mut commands,
                            &cycle,
                            orders,
                            &platform_tuning,
                            &mut platforms,
                        );
                        let msg = if enabled {
                            "Platform cycle ON"
                        } else {
                            "Platform cycle OFF"
                        };
                        debug_state.set_message(msg, 2.0);
                    }
                    Err(e) => warn!("[DEBUG] {}", e),
                }
            }
        }
        info!("[DEBUG] {:?}", action);
    }
}

pub(crate) fn update_status_message(time: Res<Time<Real>>, mut debug_state: ResMut<DebugState>) {
    debug_state.tick_message(time.delta_secs());
}

/// Update the debug info overlay with current run state
pub(crate) fn update_debug_info_overlay(
    mut commands: Commands,
    debug_state: Res<DebugState>,
    run_config: Res<RunConfig>,
    clock: Res<WaveClock>,
    cycle: Res<SpawnCycle>,
    unlocks: Res<AbilityUnlocks>,
    paused: Res<GameplayPaused>,
    player_query: Query<(&Transform, &PlayerHealth), With<Player>>,
    mut overlay_query: Query<&mut Text, With<DebugInfoOverlay>>,
    existing_overlay: Query<Entity, With<DebugInfoOverlay>>,
) {
    if !debug_state.show_info {
        for entity in &existing_overlay {
            commands.entity(entity).despawn();
        }
        return;
    }

    if existing_overlay.is_empty() {
        spawn_debug_info_overlay(&mut commands);
        return;
    }

    let (Ok((transform, health)), Ok(mut text)) = (player_query.single(), overlay_query.single_mut())
    else {
        return;
    };
    let pos = transform.translation;
    let status = debug_state
        .status_message
        .as_ref()
        .map(|(message, _)| message.as_str())
        .unwrap_or("");
    **text = format!(
        "Pos: ({:.0}, {:.0})\nHearts: {}/{} Core: {}\nWave: {} ({} changes)\nClock: {} Survived: {}\nCycle: {:?} ({} active)\nAbilities: {:?}\nSeed: {}\nPaused by: {:?}\n{}",
        pos.x,
        pos.y,
        health.hearts(),
        health.max_hearts(),
        health.core(),
        clock.wave_index + 1,
        clock.changes,
        format_clock(clock.elapsed),
        format_clock(clock.survived),
        cycle.phase(),
        cycle.active().len(),
        *unlocks,
        run_config.seed,
        paused.sources,
        status
    );
}

fn spawn_debug_info_overlay(commands: &mut Commands) {
    commands.spawn((
        DebugInfoOverlay,
        RunScoped,
        Text::new("Loading..."),
        TextFont {
            font_size: 12.0,
            ..default()
        },
        TextColor(Color::srgb(0.8, 0.9, 0.8)),
        Node {
            position_type: PositionType::Absolute,
            left: Val::Px(20.0),
            bottom: Val::Px(20.0),
            padding: UiRect::all(Val::Px(8.0)),
            ..default()
        },
        BackgroundColor(Color::srgba(0.0, 0.0, 0.0, 0.7)),
        ZIndex(500),
    ));
}

pub(crate) fn log_movement_events(mut events: MessageReader<MovementEvent>) {
    for event in events.read() {
        debug!("[DEBUG] movement: {:?}", event);
    }
}

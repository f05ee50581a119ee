//! UI domain: death screen presentation and return to the main menu.

use bevy::prelude::*;

use crate::core::{GameState, GameplayPaused, RunScoped, SaveStore, format_clock};
use crate::health::DEATH_PAUSE_SOURCE;
use crate::waves::WaveClock;

/// Real seconds before the death screen returns to the menu on its own
pub(crate) const DEATH_SCREEN_TIMEOUT: f32 = 3.0;

/// Marker for the death screen overlay
#[derive(Component)]
pub struct DeathScreenUI;

/// Marker for the menu button on death screen
#[derive(Component)]
pub struct MenuButton;

/// Tracks the death screen so it is shown once per run
#[derive(Resource, Default)]
pub struct PlayerDeathState {
    pub is_dead: bool,
    pub shown_for: f32,
}

impl PlayerDeathState {
    /// Advance the screen timer. Returns true once it should close.
    pub fn tick(&mut self, dt: f32) -> bool {
        if !self.is_dead {
            return false;
        }
        self.shown_for += dt;
        self.shown_for >= DEATH_SCREEN_TIMEOUT
    }
}

pub(crate) fn detect_player_death(
    mut commands: Commands,
    paused: Res<GameplayPaused>,
    clock: Res<WaveClock>,
    save: Res<SaveStore>,
    mut death_state: ResMut<PlayerDeathState>,
    existing_death_screen: Query<Entity, With<DeathScreenUI>>,
) {
    if death_state.is_dead || !paused.sources.contains(DEATH_PAUSE_SOURCE) {
        return;
    }

    death_state.is_dead = true;
    death_state.shown_for = 0.0;

    if existing_death_screen.is_empty() {
        let best = format_clock(save.data.best_time_secs);
        spawn_death_screen(&mut commands, &format_clock(clock.survived), &best);
    }
}

fn spawn_death_screen(commands: &mut Commands, survived: &str, best: &str) {
    commands
        .spawn((
            DeathScreenUI,
            RunScoped,
            Node {
                position_type: PositionType::Absolute,
                left: Val::Px(0.0),
                right: Val::Px(0.0),
                top: Val::Px(0.0),
                bottom: Val::Px(0.0),
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                flex_direction: FlexDirection::Column,
                ..default()
            },
            BackgroundColor(Color::srgba(0.0, 0.0, 0.0, 0.85)),
            ZIndex(100),
        ))
        .with_children(|parent| {
            parent.spawn((
                Text::new("YOU FELL"),
                TextFont {
                    font_size: 72.0,
                    ..default()
                },
                TextColor(Color::srgb(0.8, 0.15, 0.15)),
                Node {
                    margin: UiRect::bottom(Val::Px(40.0)),
                    ..default()
                },
            ));

            parent.spawn((
                Text::new(format!("Survived {}    Best {}", survived, best)),
                TextFont {
                    font_size: 24.0,
                    ..default()
                },
                TextColor(Color::srgb(0.6, 0.6, 0.6)),
                Node {
                    margin: UiRect::bottom(Val::Px(60.0)),
                    ..default()
                },
            ));

            parent
                .spawn((
                    MenuButton,
                    Button,
                    Node {
                        padding: UiRect::axes(Val::Px(40.0), Val::Px(16.0)),
                        border: UiRect::all(Val::Px(2.0)),
                        ..default()
                    },
                    BackgroundColor(Color::srgb(0.2, 0.2, 0.25)),
                    BorderColor::all(Color::srgb(0.5, 0.5, 0.6)),
                ))
                .with_child((
                    Text::new("MAIN MENU"),
                    TextFont {
                        font_size: 28.0,
                        ..default()
                    },
                    TextColor(Color::srgb(0.9, 0.9, 0.9)),
                ));

            parent.spawn((
                Text::new("Press [Enter] or click to continue"),
                TextFont {
                    font_size: 14.0,
                    ..default()
                },
                TextColor(Color::srgb(0.4, 0.4, 0.45)),
                Node {
                    margin: UiRect::top(Val::Px(20.0)),
                    ..default()
                },
            ));
        });
}

pub(crate) fn handle_death_screen(
    time: Res<Time<Real>>,
    keyboard: Res<ButtonInput<KeyCode>>,
    button_query: Query<&Interaction, (With<MenuButton>, Changed<Interaction>)>,
    mut death_state: ResMut<PlayerDeathState>,
    mut next_state: ResMut<NextState<GameState>>,
) {
    if !death_state.is_dead {
        return;
    }

    let timed_out = death_state.tick(time.delta_secs());
    let should_leave = timed_out
        || keyboard.just_pressed(KeyCode::Enter)
        || keyboard.just_pressed(KeyCode::NumpadEnter)
        || button_query
            .iter()
            .any(|interaction| *interaction == Interaction::Pressed);

    if !should_leave {
        return;
    }

    // The overlay is run scoped and goes with the rest of the run
    *death_state = PlayerDeathState::default();
    next_state.set(GameState::MainMenu);
}

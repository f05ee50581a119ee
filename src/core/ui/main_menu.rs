//! Core domain: main menu UI with last-run time and start button.

use bevy::prelude::*;

use crate::core::resources::format_clock;
use crate::core::save::SaveStore;
use crate::core::state::GameState;

/// Marker for the main menu UI root
#[derive(Component, Debug)]
pub struct MainMenuUI;

#[derive(Component, Debug)]
pub struct StartGameButton;

pub(crate) fn spawn_main_menu(mut commands: Commands, save: Res<SaveStore>) {
    let bg_color = Color::srgba(0.05, 0.07, 0.12, 0.98);
    let text_color = Color::srgb(0.9, 0.9, 0.9);
    let muted_text = Color::srgb(0.6, 0.6, 0.7);
    let title_color = Color::srgb(0.45, 0.8, 0.95);

    let last_run = save
        .data
        .last_run_time
        .clone()
        .unwrap_or_else(|| "--:--".to_string());
    let best_run = if save.data.runs_played > 0 {
        format_clock(save.data.best_time_secs)
    } else {
        "--:--".to_string()
    };

    commands
        .spawn((
            MainMenuUI,
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
            BackgroundColor(bg_color),
            ZIndex(50),
        ))
        .with_children(|parent| {
            parent.spawn((
                Text::new("SKYHOP"),
                TextFont {
                    font_size: 72.0,
                    ..default()
                },
                TextColor(title_color),
                Node {
                    margin: UiRect::bottom(Val::Px(30.0)),
                    ..default()
                },
            ));

            parent.spawn((
                Text::new(format!("Last run: {}    Best: {}", last_run, best_run)),
                TextFont {
                    font_size: 22.0,
                    ..default()
                },
                TextColor(muted_text),
                Node {
                    margin: UiRect::bottom(Val::Px(50.0)),
                    ..default()
                },
            ));

            parent
                .spawn((
                    StartGameButton,
                    Button,
                    Node {
                        padding: UiRect::axes(Val::Px(40.0), Val::Px(16.0)),
                        border: UiRect::all(Val::Px(2.0)),
                        ..default()
                    },
                    BackgroundColor(Color::srgb(0.12, 0.12, 0.18)),
                    BorderColor::all(Color::srgb(0.5, 0.5, 0.6)),
                ))
                .with_child((
                    Text::new("START"),
                    TextFont {
                        font_size: 28.0,
                        ..default()
                    },
                    TextColor(text_color),
                ));

            parent.spawn((
                Text::new("Press [Enter] or click to start"),
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

pub(crate) fn cleanup_main_menu(mut commands: Commands, query: Query<Entity, With<MainMenuUI>>) {
    for entity in query.iter() {
        commands.entity(entity).despawn();
    }
}

pub(crate) fn handle_start_input(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut button_query: Query<
        (&Interaction, &mut BackgroundColor, &mut BorderColor),
        (With<StartGameButton>, Changed<Interaction>),
    >,
    mut game_state: ResMut<NextState<GameState>>,
) {
    if keyboard.just_pressed(KeyCode::Enter) || keyboard.just_pressed(KeyCode::NumpadEnter) {
        info!("Starting game via keyboard");
        game_state.set(GameState::Run);
        return;
    }

    for (interaction, mut bg_color, mut border_color) in &mut button_query {
        match interaction {
            Interaction::Pressed => {
                info!("Starting game via click");
                game_state.set(GameState::Run);
            }
            Interaction::Hovered => {
                *bg_color = BackgroundColor(Color::srgb(0.18, 0.18, 0.25));
                *border_color = BorderColor::all(Color::srgb(0.7, 0.7, 0.8));
            }
            Interaction::None => {
                *bg_color = BackgroundColor(Color::srgb(0.12, 0.12, 0.18));
                *border_color = BorderColor::all(Color::srgb(0.5, 0.5, 0.6));
            }
        }
    }
}

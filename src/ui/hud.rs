//! UI domain: in-run HUD with hearts, run clock, key announcement, and wave banner.

use bevy::prelude::*;

use crate::core::{RunScoped, format_clock};
use crate::health::PlayerHealth;
use crate::movement::{JumpBinding, Player};
use crate::waves::{WaveBreak, WaveClock};

pub(crate) const HUD_PADDING: f32 = 16.0;
pub(crate) const HEART_SIZE: f32 = 28.0;
pub(crate) const HEART_GAP: f32 = 8.0;

const HEART_FULL: Color = Color::srgb(0.9, 0.2, 0.25);
const HEART_EMPTY: Color = Color::srgb(0.2, 0.2, 0.22);
const CORE_ALIVE: Color = Color::srgb(0.95, 0.8, 0.3);

/// Marker for the HUD root
#[derive(Component, Debug)]
pub struct HudUI;

/// One heart container, zero-based.
#[derive(Component, Debug, Clone, Copy)]
pub struct HeartSlot(pub u32);

#[derive(Component, Debug)]
pub struct CoreSlot;

#[derive(Component, Debug)]
pub struct RunClockText;

#[derive(Component, Debug)]
pub struct KeyAnnouncementText;

#[derive(Component, Debug)]
pub struct WaveBannerText;

/// Color of heart `slot` given the current hearts and any refill in progress.
/// Refills report a one-based heart index.
pub(crate) fn heart_color(slot: u32, hearts: u32, fill: Option<(u32, f32)>) -> Color {
    if slot < hearts {
        return HEART_FULL;
    }
    match fill {
        Some((heart, progress)) if heart == slot + 1 => {
            let t = progress.clamp(0.0, 1.0);
            let (from, to) = (HEART_EMPTY.to_srgba(), HEART_FULL.to_srgba());
            Color::srgb(
                from.red + (to.red - from.red) * t,
                from.green + (to.green - from.green) * t,
                from.blue + (to.blue - from.blue) * t,
            )
        }
        _ => HEART_EMPTY,
    }
}

fn hud_text(text: impl Into<String>, size: f32, color: Color) -> (Text, TextFont, TextColor) {
    (
        Text::new(text),
        TextFont {
            font_size: size,
            ..default()
        },
        TextColor(color),
    )
}

pub(crate) fn spawn_hud(mut commands: Commands, player: Query<&PlayerHealth, With<Player>>) {
    let max_hearts = player
        .single()
        .map(|health| health.max_hearts())
        .unwrap_or(2);

    commands
        .spawn((
            HudUI,
            RunScoped,
            Node {
                position_type: PositionType::Absolute,
                left: Val::Px(0.0),
                right: Val::Px(0.0),
                top: Val::Px(0.0),
                bottom: Val::Px(0.0),
                ..default()
            },
        ))
        .with_children(|root| {
            // Hearts, then the core pip
            root.spawn(Node {
                position_type: PositionType::Absolute,
                left: Val::Px(HUD_PADDING),
                top: Val::Px(HUD_PADDING),
                column_gap: Val::Px(HEART_GAP),
                ..default()
            })
            .with_children(|row| {
                for slot in 0..max_hearts {
                    row.spawn((
                        HeartSlot(slot),
                        Node {
                            width: Val::Px(HEART_SIZE),
                            height: Val::Px(HEART_SIZE),
                            border: UiRect::all(Val::Px(2.0)),
                            ..default()
                        },
                        BackgroundColor(HEART_FULL),
                        BorderColor::all(Color::srgb(0.35, 0.1, 0.12)),
                    ));
                }
                row.spawn((
                    CoreSlot,
                    Node {
                        width: Val::Px(HEART_SIZE * 0.6),
                        height: Val::Px(HEART_SIZE * 0.6),
                        align_self: AlignSelf::Center,
                        ..default()
                    },
                    BackgroundColor(CORE_ALIVE),
                ));
            });

            root.spawn((
                RunClockText,
                hud_text("00:00", 32.0, Color::srgb(0.9, 0.9, 0.9)),
                Node {
                    position_type: PositionType::Absolute,
                    right: Val::Px(HUD_PADDING),
                    top: Val::Px(HUD_PADDING),
                    ..default()
                },
            ));

            root.spawn((
                KeyAnnouncementText,
                hud_text("", 22.0, Color::srgb(0.95, 0.85, 0.4)),
                Node {
                    position_type: PositionType::Absolute,
                    left: Val::Px(HUD_PADDING),
                    top: Val::Px(HUD_PADDING * 2.0 + HEART_SIZE),
                    ..default()
                },
            ));

            root.spawn((
                WaveBannerText,
                hud_text("", 64.0, Color::srgb(0.45, 0.8, 0.95)),
                Node {
                    position_type: PositionType::Absolute,
                    left: Val::Px(0.0),
                    right: Val::Px(0.0),
                    top: Val::Percent(35.0),
                    justify_content: JustifyContent::Center,
                    ..default()
                },
                TextLayout::new_with_justify(Justify::Center),
            ));
        });
}

pub(crate) fn update_hearts(
    player: Query<&PlayerHealth, With<Player>>,
    mut hearts: Query<(&HeartSlot, &mut BackgroundColor), Without<CoreSlot>>,
    mut core: Query<&mut BackgroundColor, With<CoreSlot>>,
) {
    let Ok(health) = player.single() else {
        return;
    };

    for (slot, mut bg_color) in &mut hearts {
        bg_color.0 = heart_color(slot.0, health.hearts(), health.fill_progress());
    }
    for mut bg_color in &mut core {
        bg_color.0 = if health.is_dead() {
            HEART_EMPTY
        } else {
            CORE_ALIVE
        };
    }
}

pub(crate) fn update_run_clock(
    clock: Res<WaveClock>,
    mut text: Query<&mut Text, With<RunClockText>>,
) {
    if !clock.is_changed() {
        return;
    }
    for mut text in &mut text {
        text.0 = format_clock(clock.elapsed);
    }
}

pub(crate) fn update_key_announcement(
    binding: Res<JumpBinding>,
    mut text: Query<&mut Text, With<KeyAnnouncementText>>,
) {
    let shown = match (&binding.announcement, binding.shuffling) {
        (Some(announcement), true) => announcement.clone(),
        _ => String::new(),
    };
    for mut text in &mut text {
        if text.0 != shown {
            text.0 = shown.clone();
        }
    }
}

pub(crate) fn update_wave_banner(
    wave_break: Res<WaveBreak>,
    mut text: Query<&mut Text, With<WaveBannerText>>,
) {
    let shown = wave_break.banner.clone().unwrap_or_default();
    for mut text in &mut text {
        if text.0 != shown {
            text.0 = shown.clone();
        }
    }
}

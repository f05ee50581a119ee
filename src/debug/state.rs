//! Debug domain: state for the dev overlay.

use bevy::prelude::*;

/// Resource tracking debug mode state
#[derive(Resource, Debug, Default)]
pub struct DebugState {
    /// Whether the info overlay (position, health, wave) is visible
    pub show_info: bool,
    /// Message to display temporarily in the overlay
    pub status_message: Option<(String, f32)>,
}

impl DebugState {
    /// Set a status message that will fade after a duration
    pub fn set_message(&mut self, message: impl Into<String>, duration: f32) {
        self.status_message = Some((message.into(), duration));
    }

    /// Count the status message down. Returns true when it expires.
    pub fn tick_message(&mut self, dt: f32) -> bool {
        let Some((_, ref mut duration)) = self.status_message else {
            return false;
        };
        *duration -= dt;
        if *duration <= 0.0 {
            self.status_message = None;
            return true;
        }
        false
    }
}

/// Dev hotkeys and what they do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DebugAction {
    ToggleInfo,
    AdvanceWave,
    HitProjectile,
    HitBird,
    Fall,
    LogHealth,
    TogglePlatformCycle,
}

impl DebugAction {
    pub const ALL: [DebugAction; 7] = [
        DebugAction::ToggleInfo,
        DebugAction::AdvanceWave,
        DebugAction::HitProjectile,
        DebugAction::HitBird,
        DebugAction::Fall,
        DebugAction::LogHealth,
        DebugAction::TogglePlatformCycle,
    ];

    pub fn key(self) -> KeyCode {
        match self {
            DebugAction::ToggleInfo => KeyCode::F1,
            DebugAction::AdvanceWave => KeyCode::F2,
            DebugAction::HitProjectile => KeyCode::F3,
            DebugAction::HitBird => KeyCode::F4,
            DebugAction::Fall => KeyCode::F5,
            DebugAction::LogHealth => KeyCode::F6,
            DebugAction::TogglePlatformCycle => KeyCode::F7,
        }
    }
}

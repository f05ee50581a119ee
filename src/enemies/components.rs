//! Enemies domain: components for birds, shooters, and bullets.

use bevy::prelude::*;

use crate::content::{ApproachMode, EnemyChoice, PatternDef};

/// Marker for every hostile actor (birds and shooters, not bullets)
#[derive(Component, Debug)]
pub struct Enemy;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BirdPattern {
    /// Fly straight across
    Straight,
    /// Turn back once after crossing the centre line
    Feint,
    /// Veer diagonally after crossing the centre line
    Redirect,
}

impl BirdPattern {
    pub fn from_def(def: PatternDef) -> Self {
        match def {
            PatternDef::Feint => BirdPattern::Feint,
            PatternDef::Redirect => BirdPattern::Redirect,
            _ => BirdPattern::Straight,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShooterPattern {
    /// Drift toward the centre firing forever
    Sweeping,
    /// Settle at the firing height, fire a volley, then leave
    Stationed,
}

impl ShooterPattern {
    pub fn from_def(def: PatternDef) -> Self {
        match def {
            PatternDef::Stationed => ShooterPattern::Stationed,
            _ => ShooterPattern::Sweeping,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnemyKind {
    Bird(BirdPattern),
    Shooter(ShooterPattern),
}

impl EnemyKind {
    pub fn from_def(choice: EnemyChoice, pattern: PatternDef) -> Self {
        match choice {
            EnemyChoice::Bird => EnemyKind::Bird(BirdPattern::from_def(pattern)),
            EnemyChoice::Shooter => EnemyKind::Shooter(ShooterPattern::from_def(pattern)),
        }
    }
}

#[derive(Component, Debug, Clone)]
pub struct Bird {
    pub approach: ApproachMode,
    pub pattern: BirdPattern,
    /// Spawned on the right half (x > 0)
    pub from_right: bool,
    /// Spawned on the top half (y > 0)
    pub from_top: bool,
    /// Latched once the nose crosses the centre line
    pub turned: bool,
}

impl Bird {
    pub fn new(approach: ApproachMode, pattern: BirdPattern, position: Vec2) -> Self {
        Self {
            approach,
            pattern,
            from_right: position.x > 0.0,
            from_top: position.y > 0.0,
            turned: false,
        }
    }

    /// Unit direction toward the far side of the arena.
    pub fn base_direction(&self) -> Vec2 {
        match self.approach {
            ApproachMode::Side => {
                if self.from_right {
                    Vec2::NEG_X
                } else {
                    Vec2::X
                }
            }
            ApproachMode::Top => {
                if self.from_top {
                    Vec2::NEG_Y
                } else {
                    Vec2::Y
                }
            }
        }
    }

    pub fn crossed_centre(&self, nose: Vec2) -> bool {
        match (self.approach, self.from_right, self.from_top) {
            (ApproachMode::Side, true, _) => nose.x <= 0.0,
            (ApproachMode::Side, false, _) => nose.x >= 0.0,
            (ApproachMode::Top, _, true) => nose.y <= 0.0,
            (ApproachMode::Top, _, false) => nose.y >= 0.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ShooterPhase {
    Approaching,
    Firing,
    /// Seconds left before leaving
    Lingering(f32),
    Exiting,
}

#[derive(Component, Debug, Clone)]
pub struct Shooter {
    pub pattern: ShooterPattern,
    pub from_top: bool,
    pub phase: ShooterPhase,
    pub fire_timer: f32,
    pub shots_fired: u32,
}

impl Shooter {
    pub fn new(pattern: ShooterPattern, position: Vec2) -> Self {
        Self {
            pattern,
            from_top: position.y > 0.0,
            phase: ShooterPhase::Approaching,
            fire_timer: 0.0,
            shots_fired: 0,
        }
    }
}

#[derive(Component, Debug)]
pub struct Bullet;

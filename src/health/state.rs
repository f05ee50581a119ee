//! Health domain: hearts, core life, invincibility, and heart regeneration.
//!
//! `PlayerHealth` never touches the `World`. Every call returns the
//! `HealthSignal`s it produced and the systems in this module forward them
//! as messages.

use bevy::ecs::message::Message;
use bevy::prelude::*;

use crate::health::resources::HealthTuning;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DamageKind {
    BirdCollision,
    Projectile,
    Fall,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HealthSignal {
    /// A hit registered; damage may still be pending
    DamageTriggered { kind: DamageKind, point: Vec2 },
    DamageApplied { kind: DamageKind, hearts: u32, core: u32 },
    InvincibilityChanged(bool),
    /// `heart` counts from 1
    HeartRegenProgress { heart: u32, progress: f32 },
    HeartRegenerated { hearts: u32 },
    HealthChanged { hearts: u32, core: u32 },
    PlayerDied,
    RespawnRequested { kind: DamageKind },
}

impl Message for HealthSignal {}

#[derive(Debug, Clone, Copy, PartialEq)]
struct PendingDamage {
    kind: DamageKind,
    respawn: bool,
    remaining: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum RegenPhase {
    #[default]
    Idle,
    /// Seconds waited so far
    Waiting(f32),
    Filling { heart: u32, step: u32, elapsed: f32 },
}

#[derive(Component, Debug, Clone)]
pub struct PlayerHealth {
    hearts: u32,
    core: u32,
    invincible: Option<f32>,
    pending: Option<PendingDamage>,
    regen: RegenPhase,
    /// Last regen progress, for the HUD
    fill_progress: Option<(u32, f32)>,
    tuning: HealthTuning,
}

impl PlayerHealth {
    pub fn new(tuning: &HealthTuning) -> Self {
        Self {
            hearts: tuning.max_hearts,
            core: tuning.core_health,
            invincible: None,
            pending: None,
            regen: RegenPhase::Idle,
            fill_progress: None,
            tuning: tuning.clone(),
        }
    }

    pub fn hearts(&self) -> u32 {
        self.hearts
    }

    pub fn max_hearts(&self) -> u32 {
        self.tuning.max_hearts
    }

    pub fn core(&self) -> u32 {
        self.core
    }

    pub fn is_invincible(&self) -> bool {
        self.invincible.is_some()
    }

    pub fn is_regen_running(&self) -> bool {
        self.regen != RegenPhase::Idle
    }

    pub fn regen_phase(&self) -> RegenPhase {
        self.regen
    }

    pub fn has_pending_damage(&self) -> bool {
        self.pending.is_some()
    }

    pub fn is_dead(&self) -> bool {
        self.core == 0
    }

    pub fn fill_progress(&self) -> Option<(u32, f32)> {
        self.fill_progress
    }

    /// Register a hit. Ignored while invincible unless `ignore_invincibility`.
    /// A newer hit replaces damage still waiting on its delay.
    pub fn hit(
        &mut self,
        kind: DamageKind,
        point: Vec2,
        respawn: bool,
        delay: f32,
        ignore_invincibility: bool,
    ) -> Vec<HealthSignal> {
        let mut out = Vec::new();
        if self.is_invincible() && !ignore_invincibility {
            return out;
        }

        out.push(HealthSignal::DamageTriggered { kind, point });
        let pending = PendingDamage {
            kind,
            respawn,
            remaining: delay,
        };
        if delay > 0.0 {
            self.pending = Some(pending);
        } else {
            self.pending = None;
            self.resolve(pending, &mut out);
        }
        out
    }

    /// Falling out of the arena: drops whatever was running and takes a
    /// heart (or the core) right away.
    pub fn fall(&mut self) -> Vec<HealthSignal> {
        let mut out = Vec::new();
        self.pending = None;
        if self.invincible.take().is_some() {
            out.push(HealthSignal::InvincibilityChanged(false));
        }
        self.stop_regen();

        self.take_damage(DamageKind::Fall, &mut out);
        self.start_invincibility(&mut out);
        self.start_regen_if_eligible();
        out.push(HealthSignal::RespawnRequested {
            kind: DamageKind::Fall,
        });
        if self.is_dead() {
            out.push(HealthSignal::PlayerDied);
        }
        out
    }

    pub fn tick(&mut self, dt: f32) -> Vec<HealthSignal> {
        let mut out = Vec::new();

        if let Some(mut pending) = self.pending.take() {
            pending.remaining -= dt;
            if pending.remaining > 0.0 {
                self.pending = Some(pending);
            } else {
                self.resolve(pending, &mut out);
            }
        }

        if let Some(remaining) = self.invincible {
            let remaining = remaining - dt;
            if remaining > 0.0 {
                self.invincible = Some(remaining);
            } else {
                self.invincible = None;
                out.push(HealthSignal::InvincibilityChanged(false));
            }
        }

        self.tick_regen(dt, &mut out);
        out
    }

    fn resolve(&mut self, pending: PendingDamage, out: &mut Vec<HealthSignal>) {
        if self.is_invincible() {
            return;
        }

        self.take_damage(pending.kind, out);
        self.start_regen_if_eligible();
        self.start_invincibility(out);
        if pending.respawn {
            out.push(HealthSignal::RespawnRequested { kind: pending.kind });
        }
        if self.is_dead() {
            out.push(HealthSignal::PlayerDied);
        }
    }

    /// Hearts go first, then the core.
    fn take_damage(&mut self, kind: DamageKind, out: &mut Vec<HealthSignal>) {
        if self.hearts > 0 {
            self.hearts -= 1;
        } else {
            self.core = self.core.saturating_sub(1);
        }
        out.push(HealthSignal::DamageApplied {
            kind,
            hearts: self.hearts,
            core: self.core,
        });
        out.push(HealthSignal::HealthChanged {
            hearts: self.hearts,
            core: self.core,
        });
    }

    fn start_invincibility(&mut self, out: &mut Vec<HealthSignal>) {
        self.invincible = Some(self.tuning.invincibility_duration);
        out.push(HealthSignal::InvincibilityChanged(true));
    }

    fn start_regen_if_eligible(&mut self) {
        if self.hearts == 0 && self.core > 0 && self.regen == RegenPhase::Idle {
            self.regen = RegenPhase::Waiting(0.0);
        }
    }

    fn stop_regen(&mut self) {
        self.regen = RegenPhase::Idle;
        self.fill_progress = None;
    }

    fn fill_steps(&self) -> u32 {
        self.tuning.heart_fill_steps.max(1)
    }

    fn step_duration(&self) -> f32 {
        (self.tuning.heart_fill_duration / self.fill_steps() as f32).max(0.01)
    }

    fn tick_regen(&mut self, dt: f32, out: &mut Vec<HealthSignal>) {
        let interrupted = self.hearts > 0 || self.core == 0;

        match self.regen {
            RegenPhase::Idle => {}
            RegenPhase::Waiting(waited) => {
                if interrupted {
                    self.stop_regen();
                    return;
                }
                let waited = waited + dt;
                if waited < self.tuning.heart_regen_delay {
                    self.regen = RegenPhase::Waiting(waited);
                    return;
                }
                let heart = (self.hearts + 1).clamp(1, self.tuning.max_hearts.max(1));
                self.emit_progress(heart, 1, out);
                self.regen = RegenPhase::Filling {
                    heart,
                    step: 1,
                    elapsed: 0.0,
                };
            }
            RegenPhase::Filling {
                heart,
                step,
                elapsed,
            } => {
                let elapsed = elapsed + dt;
                if elapsed < self.step_duration() {
                    self.regen = RegenPhase::Filling {
                        heart,
                        step,
                        elapsed,
                    };
                    return;
                }
                if interrupted {
                    self.stop_regen();
                    return;
                }
                if step < self.fill_steps() {
                    self.emit_progress(heart, step + 1, out);
                    self.regen = RegenPhase::Filling {
                        heart,
                        step: step + 1,
                        elapsed: 0.0,
                    };
                    return;
                }

                self.hearts = (self.hearts + 1).min(self.tuning.max_hearts);
                self.stop_regen();
                out.push(HealthSignal::HeartRegenerated {
                    hearts: self.hearts,
                });
                out.push(HealthSignal::HealthChanged {
                    hearts: self.hearts,
                    core: self.core,
                });
            }
        }
    }

    fn emit_progress(&mut self, heart: u32, step: u32, out: &mut Vec<HealthSignal>) {
        let progress = step as f32 / self.fill_steps() as f32;
        self.fill_progress = Some((heart, progress));
        out.push(HealthSignal::HeartRegenProgress { heart, progress });
    }
}

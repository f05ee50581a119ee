//! Waves domain: clock ticking and wave application.

use avian2d::prelude::*;
use bevy::ecs::message::{MessageReader, MessageWriter};
use bevy::ecs::system::SystemParam;
use bevy::prelude::*;

use crate::content::{ContentRegistry, WaveDef, point};
use crate::core::{GameplayPaused, RunRng, format_clock};
use crate::enemies::{Bullet, Enemy};
use crate::health::{RespawnPoint, Respawning};
use crate::movement::{AbilityUnlocks, JumpBinding, LedgeHang, Player};
use crate::spawning::{
    CyclePlatform, EnemySpawners, PlatformAnim, PlatformTuning, RailSpawner, SpawnCycle,
    StartPlatform, StaticPlatforms, execute_cycle_commands, spawn_start_platform,
};
use crate::waves::clock::{
    AdvanceWave, WAVE_BREAK_SOURCE, WaveBreak, WaveChanged, WaveClock, WaveClockTuning,
};

/// Apply a wave's spawner overrides by id. Spawners the wave does not list
/// are switched off. Returns the ids the wave names but the level lacks.
pub(crate) fn apply_spawner_overrides(spawners: &mut EnemySpawners, wave: &WaveDef) -> Vec<String> {
    for spawner in spawners.0.iter_mut() {
        spawner.enabled = false;
    }

    let mut missing = Vec::new();
    for entry in &wave.spawners {
        match spawners.get_mut(&entry.spawner) {
            Some(spawner) => spawner.apply_wave(entry),
            None => missing.push(entry.spawner.clone()),
        }
    }
    missing
}

/// Everything a wave change reconfigures.
#[derive(SystemParam)]
pub(crate) struct WaveTargets<'w, 's> {
    commands: Commands<'w, 's>,
    registry: Option<Res<'w, ContentRegistry>>,
    clock_tuning: Res<'w, WaveClockTuning>,
    platform_tuning: Res<'w, PlatformTuning>,
    rng: ResMut<'w, RunRng>,
    unlocks: ResMut<'w, AbilityUnlocks>,
    binding: ResMut<'w, JumpBinding>,
    cycle: ResMut<'w, SpawnCycle>,
    spawners: ResMut<'w, EnemySpawners>,
    rail: ResMut<'w, RailSpawner>,
    static_platforms: ResMut<'w, StaticPlatforms>,
    respawn_point: ResMut<'w, RespawnPoint>,
    wave_break: ResMut<'w, WaveBreak>,
    paused: ResMut<'w, GameplayPaused>,
    changed: MessageWriter<'w, WaveChanged>,
    hostiles: Query<'w, 's, Entity, Or<(With<Enemy>, With<Bullet>)>>,
    start_platforms: Query<'w, 's, Entity, With<StartPlatform>>,
    platforms: Query<'w, 's, (Entity, &'static CyclePlatform, &'static mut PlatformAnim)>,
    player: Query<
        'w,
        's,
        (
            Entity,
            &'static mut Transform,
            &'static mut LinearVelocity,
            &'static mut Sprite,
        ),
        With<Player>,
    >,
}

impl WaveTargets<'_, '_> {
    /// Reconfigure the arena for wave `index`. Returns the index applied.
    fn apply(&mut self, index: usize) -> Option<usize> {
        let Some(registry) = self.registry.as_ref() else {
            warn!("ContentRegistry missing, wave {} not applied", index);
            return None;
        };
        let Some(wave) = registry.wave(index) else {
            warn!("No waves defined, arena left as is");
            return None;
        };
        let index = index.min(registry.waves.len() - 1);

        for entity in self.hostiles.iter().chain(self.start_platforms.iter()) {
            self.commands.entity(entity).despawn();
        }
        for (entity, _, _) in self.platforms.iter() {
            self.commands.entity(entity).despawn();
        }

        *self.unlocks = AbilityUnlocks {
            double_jump: wave.abilities.double_jump,
            glide: wave.abilities.glide,
            dash: wave.abilities.dash,
        };
        self.binding.shuffling = wave.input_changing;
        let pending = self.binding.pending;
        self.binding.announcement = wave
            .input_changing
            .then(|| format!("Next Key Code is: {}", pending.label()));

        match self
            .cycle
            .reconfigure(wave.platform_timing, wave.platform_changing, &mut self.rng.0)
        {
            Ok(orders) => execute_cycle_commands(
                &mut self.commands,
                &self.cycle,
                orders,
                &self.platform_tuning,
                &mut self.platforms,
            ),
            Err(e) => warn!("Platform cycle not started: {}", e),
        }

        for id in apply_spawner_overrides(&mut self.spawners, wave) {
            warn!("Wave '{}' configures unknown spawner '{}'", wave.id, id);
        }
        self.rail
            .set_time_range(wave.rail_min_time, wave.rail_max_time);
        self.static_platforms.active = wave.static_platforms;

        let level = &registry.level;
        let target = point(level.respawn_anchor) + Vec2::Y * level.respawn_lift;
        for (entity, mut transform, mut velocity, mut sprite) in &mut self.player {
            transform.translation.x = target.x;
            transform.translation.y = target.y;
            velocity.0 = Vec2::ZERO;
            sprite.color.set_alpha(1.0);
            self.commands
                .entity(entity)
                .remove::<(Respawning, RigidBodyDisabled, LedgeHang)>();
        }
        self.respawn_point.reset(target);
        spawn_start_platform(&mut self.commands, registry);

        info!(
            "Wave {} '{}': abilities {:?}, platforms cycling {}, static {}, input shuffle {}",
            index + 1,
            wave.id,
            *self.unlocks,
            wave.platform_changing,
            wave.static_platforms,
            wave.input_changing
        );
        self.changed.write(WaveChanged {
            index,
            id: wave.id.clone(),
        });

        self.wave_break.start(index, self.clock_tuning.break_secs);
        self.paused.pause(WAVE_BREAK_SOURCE);
        Some(index)
    }
}

pub(crate) fn start_first_wave(mut clock: ResMut<WaveClock>, mut targets: WaveTargets) {
    *clock = WaveClock::default();
    if let Some(index) = targets.apply(0) {
        clock.wave_index = index;
    }
}

pub(crate) fn tick_wave_clock(
    time: Res<Time>,
    tuning: Res<WaveClockTuning>,
    mut clock: ResMut<WaveClock>,
    mut advance: MessageWriter<AdvanceWave>,
) {
    if !clock.tick(time.delta_secs(), &tuning) {
        return;
    }
    debug!("Wave clock hit {:.1}s", clock.elapsed);
    if clock.is_frozen(&tuning) {
        info!("Last wave change, clock frozen at {}", format_clock(clock.elapsed));
    }
    advance.write(AdvanceWave);
}

pub(crate) fn advance_wave(
    mut requests: MessageReader<AdvanceWave>,
    mut clock: ResMut<WaveClock>,
    mut targets: WaveTargets,
) {
    // Several requests in one frame still advance a single wave
    if requests.read().count() == 0 {
        return;
    }

    let wave_count = targets
        .registry
        .as_ref()
        .map(|r| r.waves.len())
        .unwrap_or(0);
    let next = clock.next_index(wave_count);
    if let Some(index) = targets.apply(next) {
        clock.wave_index = index;
    }
}

/// Lift the wave break once its real-time countdown ends.
pub(crate) fn tick_wave_break(
    time: Res<Time<Real>>,
    mut wave_break: ResMut<WaveBreak>,
    mut paused: ResMut<GameplayPaused>,
) {
    if wave_break.tick(time.delta_secs()) {
        paused.unpause(WAVE_BREAK_SOURCE);
        debug!("Wave break over");
    }
}

pub(crate) fn reset_waves(mut clock: ResMut<WaveClock>, mut wave_break: ResMut<WaveBreak>) {
    *clock = WaveClock::default();
    *wave_break = WaveBreak::default();
}

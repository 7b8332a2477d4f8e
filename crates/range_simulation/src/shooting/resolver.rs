//! Hit resolver - выстрел лучом из камеры
//!
//! Порядок одного выстрела:
//! 1. gunshot cue (restart)
//! 2. луч: позиция камеры + `camera_forward()` из substrate
//! 3. `cast_ray` против визуалов всех живых мишеней
//! 4. ближайшее попадание → hit cue, burst, remove (+respawn), score + 1, HUD
//!
//! Промах → только gunshot.

use bevy::prelude::*;
use rand::Rng;

use super::events::{ShootIntent, TargetHit};
use crate::bridge::{Bridge, CueId, CuePlayback, VisualHandle};
use crate::config::RangeConfig;
use crate::effects::ParticlePool;
use crate::player::CameraPose;
use crate::targets::TargetRegistry;
use crate::DeterministicRng;

/// Resource: счёт (монотонно не убывает)
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq, Eq, Reflect)]
#[reflect(Resource)]
pub struct Score {
    value: u32,
}

impl Score {
    pub fn value(&self) -> u32 {
        self.value
    }

    /// +1, returns новый счёт
    pub fn increment(&mut self) -> u32 {
        self.value = self.value.saturating_add(1);
        self.value
    }
}

/// Результат одного выстрела
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ShotOutcome {
    Miss,
    Hit(TargetHit),
}

impl ShotOutcome {
    pub fn is_hit(&self) -> bool {
        matches!(self, ShotOutcome::Hit(_))
    }
}

/// Всё, что трогает выстрел (borrowed из ECS resources или из теста)
pub struct ShotContext<'a, R: Rng> {
    pub camera_position: Vec3,
    pub registry: &'a mut TargetRegistry,
    pub particles: &'a mut ParticlePool,
    pub score: &'a mut Score,
    pub bridge: &'a mut Bridge,
    pub rng: &'a mut R,
    pub config: &'a RangeConfig,
}

/// Один выстрел
pub fn shoot<R: Rng>(ctx: &mut ShotContext<'_, R>) -> ShotOutcome {
    let audio = &ctx.config.audio;

    ctx.bridge
        .audio
        .play_cue(CueId::Gunshot, CuePlayback::restart(audio.gunshot_volume));

    let origin = ctx.camera_position;
    let direction = ctx.bridge.render.camera_forward();
    let candidates: Vec<VisualHandle> = ctx
        .registry
        .query_all()
        .iter()
        .map(|target| target.visual)
        .collect();

    let Some(ray_hit) = ctx.bridge.render.cast_ray(origin, direction, &candidates) else {
        return ShotOutcome::Miss;
    };

    // Визуал без мишени (substrate вернул чужой handle) - промах
    let Some(target) = ctx.registry.find_by_visual(ray_hit.handle).copied() else {
        return ShotOutcome::Miss;
    };

    ctx.bridge
        .audio
        .play_cue(CueId::Hit, CuePlayback::restart(audio.hit_volume));

    ctx.particles.emit(
        target.position,
        &mut *ctx.rng,
        ctx.bridge.render.as_mut(),
        &ctx.config.particles,
    );

    ctx.registry.remove(
        target.id,
        ctx.bridge.render.as_mut(),
        ctx.config.targets.respawn_delay(),
    );

    let score = ctx.score.increment();
    ctx.bridge.hud.report_score(score);

    crate::log_info(&format!(
        "💥 Hit {:?} at {:.2}m → Score: {}",
        target.id, ray_hit.distance, score
    ));

    ShotOutcome::Hit(TargetHit {
        target: target.id,
        position: target.position,
        distance: ray_hit.distance,
        score,
    })
}

/// System: обработка ShootIntent (FrameSet::Shooting)
///
/// Камера - поза прошлого кадра (контроллер идёт позже, в FrameSet::Movement).
/// Каждый intent резолвится отдельно: второй выстрел в кадре уже не видит
/// мишень, убитую первым.
pub fn resolve_shoot_intents(
    mut intents: EventReader<ShootIntent>,
    mut hits: EventWriter<TargetHit>,
    camera: Res<CameraPose>,
    mut registry: ResMut<TargetRegistry>,
    mut particles: ResMut<ParticlePool>,
    mut score: ResMut<Score>,
    mut rng: ResMut<DeterministicRng>,
    mut bridge: ResMut<Bridge>,
    config: Res<RangeConfig>,
) {
    let shots = intents.read().count();
    if shots == 0 {
        return;
    }

    let mut ctx = ShotContext {
        camera_position: camera.position,
        registry: &mut registry,
        particles: &mut particles,
        score: &mut score,
        bridge: &mut bridge,
        rng: &mut rng.rng,
        config: &config,
    };

    for _ in 0..shots {
        if let ShotOutcome::Hit(hit) = shoot(&mut ctx) {
            hits.write(hit);
        }
    }
}

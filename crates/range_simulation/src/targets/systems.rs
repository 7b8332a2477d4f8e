//! Target systems (ECS)

use bevy::prelude::*;

use super::registry::TargetRegistry;
use crate::bridge::Bridge;
use crate::config::RangeConfig;
use crate::DeterministicRng;

/// Startup: начальная популяция мишеней
pub fn seed_targets(
    mut registry: ResMut<TargetRegistry>,
    mut rng: ResMut<DeterministicRng>,
    mut bridge: ResMut<Bridge>,
    config: Res<RangeConfig>,
) {
    for _ in 0..config.targets.initial_count {
        registry.spawn(&mut rng.rng, bridge.render.as_mut(), &config.targets);
    }

    crate::logger::log(&format!(
        "🎯 Seeded {} targets (seed {})",
        registry.len(),
        rng.seed
    ));
}

/// System: respawn очередь (FrameSet::Respawn)
///
/// Запускается ДО hit resolver: таймер, созданный выстрелом в этом кадре,
/// начинает тикать со следующего кадра.
pub fn tick_target_respawns(
    time: Res<Time>,
    mut registry: ResMut<TargetRegistry>,
    mut rng: ResMut<DeterministicRng>,
    mut bridge: ResMut<Bridge>,
    config: Res<RangeConfig>,
) {
    let due = registry.tick_respawns(time.delta());

    for _ in 0..due {
        let id = registry.spawn(&mut rng.rng, bridge.render.as_mut(), &config.targets);
        if let Some(target) = registry.get(id) {
            crate::logger::log(&format!(
                "🎯 Target {:?} respawned at {:?}",
                id, target.position
            ));
        }
    }
}

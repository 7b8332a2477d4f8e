//! Targets domain - мишени на стрельбище
//!
//! Содержит:
//! - TargetRegistry (resource): live set в порядке спавна + respawn таймеры
//! - seed_targets (Startup) - начальная популяция
//! - tick_target_respawns (FrameSet::Respawn)
//!
//! Hit resolver удаляет мишени через `TargetRegistry::remove`, который сам
//! ставит respawn в очередь. Очередь тикается только здесь.

use bevy::prelude::*;

pub mod registry;
pub mod systems;

#[cfg(test)]
mod registry_tests;

pub use registry::{random_spawn_position, Target, TargetId, TargetRegistry};
pub use systems::{seed_targets, tick_target_respawns};

use crate::FrameSet;

pub struct TargetsPlugin;

impl Plugin for TargetsPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<TargetRegistry>()
            .add_systems(Startup, seed_targets)
            .add_systems(Update, tick_target_respawns.in_set(FrameSet::Respawn));
    }
}

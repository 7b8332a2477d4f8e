//! RangeSnapshot - сериализуемый срез состояния ядра
//!
//! Используется для сравнения детерминизма (одинаковый seed + скрипт →
//! байт-в-байт одинаковый TOML) и для отладочного дампа в headless binary.
//! Скаляры идут первыми, `targets` (array of tables) - последним.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::effects::ParticlePool;
use crate::input::InputState;
use crate::player::{CameraPose, PlayerPose};
use crate::shooting::Score;
use crate::targets::TargetRegistry;
use crate::DeterministicRng;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TargetSnapshot {
    pub id: u32,
    pub position: [f32; 3],
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RangeSnapshot {
    pub seed: u64,
    pub score: u32,
    pub pointer_locked: bool,
    pub look_yaw: f32,
    pub look_pitch: f32,
    pub player_position: [f32; 3],
    pub camera_position: [f32; 3],
    pub pending_respawns: u32,
    pub particle_count: u32,
    pub particle_positions: Vec<[f32; 3]>,
    pub targets: Vec<TargetSnapshot>,
}

impl RangeSnapshot {
    /// Срез из World (все resources ядра должны быть вставлены)
    pub fn capture(world: &World) -> Self {
        let input = world.resource::<InputState>();
        let registry = world.resource::<TargetRegistry>();
        let particles = world.resource::<ParticlePool>();

        Self {
            seed: world.resource::<DeterministicRng>().seed,
            score: world.resource::<Score>().value(),
            pointer_locked: input.is_locked(),
            look_yaw: input.look_yaw,
            look_pitch: input.look_pitch,
            player_position: world.resource::<PlayerPose>().position.to_array(),
            camera_position: world.resource::<CameraPose>().position.to_array(),
            pending_respawns: registry.pending_respawns() as u32,
            particle_count: particles.len() as u32,
            particle_positions: particles
                .particles()
                .iter()
                .map(|particle| particle.position.to_array())
                .collect(),
            targets: registry
                .query_all()
                .iter()
                .map(|target| TargetSnapshot {
                    id: target.id.0,
                    position: target.position.to_array(),
                })
                .collect(),
        }
    }

    /// TOML представление (seed > i64::MAX не сериализуется → Err)
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string(self)
    }
}

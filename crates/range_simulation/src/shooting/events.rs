//! Shooting events

use bevy::prelude::*;

use crate::targets::TargetId;

/// Event: primary button в Locked (input drain → hit resolver)
///
/// Один intent = один выстрел = максимум одно попадание.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ShootIntent;

/// Event: выстрел попал в мишень
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct TargetHit {
    pub target: TargetId,

    /// Позиция мишени (там же центр burst'а)
    pub position: Vec3,

    /// Дистанция от камеры до точки попадания вдоль луча
    pub distance: f32,

    /// Счёт ПОСЛЕ попадания
    pub score: u32,
}

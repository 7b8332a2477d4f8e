//! TargetRegistry - живые мишени + очередь respawn таймеров

use bevy::prelude::*;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::bridge::{RenderBackend, VisualHandle, VisualKind};
use crate::config::TargetConfig;

/// Стабильный id мишени (монотонный, не переиспользуется)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Reflect)]
pub struct TargetId(pub u32);

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Target {
    pub id: TargetId,
    pub position: Vec3,
    /// false только у мишени, которую вернул `remove`
    pub alive: bool,
    pub visual: VisualHandle,
}

/// Resource: реестр мишеней
///
/// `live` хранится в порядке спавна. Удаление атомарно: после `remove`
/// мишень больше не попадает в `query_all`, второй выстрел в том же кадре
/// её не найдёт.
#[derive(Resource, Debug, Default)]
pub struct TargetRegistry {
    live: Vec<Target>,
    next_id: u32,
    pending_respawns: Vec<Timer>,
}

/// Uniform XZ в квадрате [-half, half], Y = spawn_height
///
/// `gen::<f32>()` вместо `gen_range`: пустой диапазон (half = 0) не паникует.
pub fn random_spawn_position<R: Rng>(rng: &mut R, config: &TargetConfig) -> Vec3 {
    let extent = config.spawn_half_extent;
    let x = (rng.gen::<f32>() - 0.5) * 2.0 * extent;
    let z = (rng.gen::<f32>() - 0.5) * 2.0 * extent;
    Vec3::new(x, config.spawn_height, z)
}

impl TargetRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Одна мишень в случайной точке квадрата
    pub fn spawn<R: Rng>(
        &mut self,
        rng: &mut R,
        render: &mut dyn RenderBackend,
        config: &TargetConfig,
    ) -> TargetId {
        let position = random_spawn_position(rng, config);
        self.spawn_at(position, render)
    }

    /// Мишень в заданной точке (setup сцен в тестах, scripted сессии)
    pub fn spawn_at(&mut self, position: Vec3, render: &mut dyn RenderBackend) -> TargetId {
        let id = TargetId(self.next_id);
        self.next_id += 1;

        let visual = render.spawn_visual(VisualKind::Target, position);
        self.live.push(Target {
            id,
            position,
            alive: true,
            visual,
        });

        id
    }

    /// Живые мишени в порядке спавна
    pub fn query_all(&self) -> &[Target] {
        &self.live
    }

    pub fn get(&self, id: TargetId) -> Option<&Target> {
        self.live.iter().find(|target| target.id == id)
    }

    pub fn find_by_visual(&self, visual: VisualHandle) -> Option<&Target> {
        self.live.iter().find(|target| target.visual == visual)
    }

    pub fn len(&self) -> usize {
        self.live.len()
    }

    pub fn is_empty(&self) -> bool {
        self.live.is_empty()
    }

    /// Убирает мишень, снимает визуал, ставит один respawn через `delay`
    ///
    /// Неизвестный id (уже удалена / никогда не было) → None, ничего не планируется.
    pub fn remove(
        &mut self,
        id: TargetId,
        render: &mut dyn RenderBackend,
        delay: Duration,
    ) -> Option<Target> {
        let index = self.live.iter().position(|target| target.id == id)?;
        let mut target = self.live.remove(index);

        render.remove_visual(target.visual);
        target.alive = false;
        self.pending_respawns.push(Timer::new(delay, TimerMode::Once));

        Some(target)
    }

    /// Количество запланированных respawn'ов
    pub fn pending_respawns(&self) -> usize {
        self.pending_respawns.len()
    }

    /// Тикает все таймеры, возвращает сколько respawn'ов созрело
    ///
    /// Созревшие таймеры удаляются из очереди. Спавн делает вызывающий
    /// (нужны rng + render), live-set здесь не трогается.
    pub fn tick_respawns(&mut self, delta: Duration) -> usize {
        let before = self.pending_respawns.len();
        self.pending_respawns
            .retain_mut(|timer| !timer.tick(delta).finished());
        before - self.pending_respawns.len()
    }
}

//! Bridge - узкие интерфейсы к rendering/audio substrate и HUD
//!
//! Ядро НЕ владеет сценой, мешами, звуком и окном. Всё это делает хост
//! (движок/клиент), ядро только вызывает его через три trait'а:
//!
//! - `RenderBackend` - визуалы (spawn/remove/position/opacity), ray cast,
//!   camera pose, запрос рендера и pointer lock
//! - `AudioBackend` - проигрывание cue (gunshot, hit, ambient loops)
//! - `ScoreDisplay` - UI коллаборатор (HUD "Score: N")
//!
//! Все три живут в одном ECS resource `Bridge` как trait objects.
//! Для тестов и headless binary есть `HeadlessBackend` (headless.rs).

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

pub mod headless;

pub use headless::{HeadlessBackend, HeadlessVisual};

/// Непрозрачный handle визуала, выданный substrate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct VisualHandle(pub u64);

/// Тип визуала (substrate решает меш/материал)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VisualKind {
    /// Тело игрока (бокс 0.5 × 1.8 × 0.5)
    Player,
    /// Мишень (сфера r = 0.5)
    Target,
    /// Частица взрыва (сфера r = 0.05, прозрачная)
    Particle,
}

/// Ближайшее пересечение луча
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit {
    pub handle: VisualHandle,
    /// Дистанция вдоль нормализованного направления
    pub distance: f32,
}

/// Звуковые cue ядра
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CueId {
    Gunshot,
    Hit,
    BackgroundMusic,
    BackgroundNoise,
}

/// Параметры проигрывания cue
///
/// `restart = true` → stop-then-play (не накладываем копии одного cue).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CuePlayback {
    pub restart: bool,
    pub looping: bool,
    pub volume: f32,
}

impl CuePlayback {
    /// One-shot с рестартом (gunshot, hit)
    pub fn restart(volume: f32) -> Self {
        Self {
            restart: true,
            looping: false,
            volume,
        }
    }

    /// Зацикленный ambient
    pub fn looped(volume: f32) -> Self {
        Self {
            restart: false,
            looping: true,
            volume,
        }
    }
}

/// Rendering substrate
pub trait RenderBackend: Send + Sync {
    fn spawn_visual(&mut self, kind: VisualKind, position: Vec3) -> VisualHandle;

    /// Unknown handle - no-op
    fn remove_visual(&mut self, handle: VisualHandle);

    fn set_visual_position(&mut self, handle: VisualHandle, position: Vec3);

    fn set_visual_opacity(&mut self, handle: VisualHandle, opacity: f32);

    /// Ближайшее пересечение луча с `candidates` (None - промах)
    fn cast_ray(&self, origin: Vec3, direction: Vec3, candidates: &[VisualHandle])
        -> Option<RayHit>;

    /// Forward текущей камеры (world space, нормализован)
    fn camera_forward(&self) -> Vec3;

    fn set_camera_pose(&mut self, position: Vec3, yaw: f32, pitch: f32);

    /// Клик в Unlocked: хост должен попросить pointer lock у окна
    fn request_pointer_lock(&mut self);

    fn request_render(&mut self);
}

/// Audio substrate
pub trait AudioBackend: Send + Sync {
    fn play_cue(&mut self, cue: CueId, playback: CuePlayback);
}

/// UI коллаборатор для счёта
pub trait ScoreDisplay: Send + Sync {
    fn report_score(&mut self, score: u32);
}

/// Resource: все внешние коллабораторы ядра
#[derive(Resource)]
pub struct Bridge {
    pub render: Box<dyn RenderBackend>,
    pub audio: Box<dyn AudioBackend>,
    pub hud: Box<dyn ScoreDisplay>,
}

impl Bridge {
    pub fn new(
        render: Box<dyn RenderBackend>,
        audio: Box<dyn AudioBackend>,
        hud: Box<dyn ScoreDisplay>,
    ) -> Self {
        Self { render, audio, hud }
    }

    /// Все три роли на одном HeadlessBackend (clone разделяет состояние)
    pub fn headless(backend: &HeadlessBackend) -> Self {
        Self::new(
            Box::new(backend.clone()),
            Box::new(backend.clone()),
            Box::new(backend.clone()),
        )
    }
}

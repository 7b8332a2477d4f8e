//! Target Range Simulation Core
//!
//! Headless ECS ядро first-person тира на Bevy 0.16:
//! ввод → взгляд/движение → выстрел лучом → мишени с respawn → частицы + звук.
//!
//! Ядро НЕ владеет сценой, звуком и окном - всё это substrate хоста
//! за trait'ами в `bridge` (RenderBackend / AudioBackend / ScoreDisplay).
//!
//! Порядок кадра (Update, single-threaded, FrameSet chain):
//! Input → Respawn → Shooting → Movement → Effects → Render

use bevy::app::TaskPoolPlugin;
use bevy::ecs::schedule::ExecutorKind;
use bevy::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

// Публичные модули
pub mod bridge;
pub mod config;
pub mod driver;
pub mod effects;
pub mod input;
pub mod logger;
pub mod player;
pub mod shooting;
pub mod targets;

// Re-export основных типов
pub use bridge::{
    AudioBackend, Bridge, CueId, CuePlayback, HeadlessBackend, RayHit, RenderBackend,
    ScoreDisplay, VisualHandle, VisualKind,
};
pub use config::{ConfigError, RangeConfig, StepMode};
pub use driver::{FrameDriver, RangeSnapshot, TargetSnapshot};
pub use effects::{EffectsPlugin, Particle, ParticlePool};
pub use input::{InputAction, InputEvent, InputPlugin, InputState, KeyMap, PointerButton, PointerLock};
pub use logger::{
    init_logger, log, log_error, log_info, log_warning, set_log_level, set_logger, LogLevel,
    LogPrinter,
};
pub use player::{CameraPose, PlayerPlugin, PlayerPose};
pub use shooting::{Score, ShootIntent, ShootingPlugin, ShotOutcome, TargetHit};
pub use targets::{Target, TargetId, TargetRegistry, TargetsPlugin};

/// Фазы кадра (выполняются строго по порядку)
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FrameSet {
    /// Дренаж InputEvent → InputState, ShootIntent
    Input,
    /// Тик respawn очереди мишеней
    Respawn,
    /// ShootIntent → ray cast → hit
    Shooting,
    /// Контроллер игрока + camera pose
    Movement,
    /// Частицы
    Effects,
    /// request_render
    Render,
}

/// Главный plugin ядра (объединяет все подсистемы)
///
/// Resources, вставленные ДО плагина (RangeConfig, KeyMap, Bridge,
/// DeterministicRng, Time), не перезаписываются. Отсутствующие получают
/// default: конфиг по умолчанию, HeadlessBackend, seed 42.
pub struct RangePlugin;

impl Plugin for RangePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<RangeConfig>();
        let config = app.world().resource::<RangeConfig>().clone();
        set_log_level(config.log_level);

        if !app.world().contains_resource::<KeyMap>() {
            let keymap = KeyMap::from_bindings(&config.input.bindings).unwrap_or_else(|err| {
                log_error(&format!("❌ Invalid key bindings ({}), falling back to WASD", err));
                KeyMap::default()
            });
            app.insert_resource(keymap);
        }

        if !app.world().contains_resource::<Bridge>() {
            app.insert_resource(Bridge::headless(&HeadlessBackend::new()));
        }

        if !app.world().contains_resource::<DeterministicRng>() {
            app.insert_resource(DeterministicRng::new(42));
        }

        app.init_resource::<Time>();

        app.configure_sets(
            Update,
            (
                FrameSet::Input,
                FrameSet::Respawn,
                FrameSet::Shooting,
                FrameSet::Movement,
                FrameSet::Effects,
                FrameSet::Render,
            )
                .chain(),
        );
        app.edit_schedule(Update, |schedule| {
            schedule.set_executor_kind(ExecutorKind::SingleThreaded);
        });

        // Подсистемы
        app.add_plugins((
            InputPlugin,
            PlayerPlugin,
            TargetsPlugin,
            EffectsPlugin,
            ShootingPlugin,
        ))
        .add_systems(Update, driver::request_render.in_set(FrameSet::Render));
    }
}

/// Детерминистичный RNG resource (seeded)
#[derive(Resource)]
pub struct DeterministicRng {
    pub rng: ChaCha8Rng,
    pub seed: u64,
}

impl DeterministicRng {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }
}

/// Создаёт minimal Bevy App для headless ядра
///
/// Без TimePlugin: `Time` двигает только `FrameDriver::tick` (или тест
/// через `advance_by`), первый кадр всегда с нулевым dt.
pub fn create_headless_app(seed: u64) -> App {
    let mut app = App::new();
    init_logger();
    app.add_plugins(TaskPoolPlugin::default())
        .insert_resource(DeterministicRng::new(seed))
        .init_resource::<Time>();

    app
}

//! Frame Driver - владелец App и единственная точка входа хоста
//!
//! ```text
//! host                      FrameDriver                       App (Update, SingleThreaded)
//! push_input(event) ──────▶ Events<InputEvent>
//! tick(dt) ───────────────▶ Time += dt, app.update() ──────▶ Input → Respawn → Shooting
//!                                                             → Movement → Effects → Render
//! ```
//!
//! `new` делает один boot кадр с нулевым dt: Startup (тело игрока, начальная
//! популяция мишеней, ambient cues). После него ядро готово к `tick`.

use bevy::prelude::*;
use std::time::Duration;

pub mod snapshot;

pub use snapshot::{RangeSnapshot, TargetSnapshot};

use crate::bridge::{Bridge, HeadlessBackend};
use crate::config::{ConfigError, RangeConfig};
use crate::effects::{Particle, ParticlePool};
use crate::input::{InputEvent, InputState, KeyMap};
use crate::player::{CameraPose, PlayerPose};
use crate::shooting::{Score, TargetHit};
use crate::targets::{Target, TargetRegistry};
use crate::{create_headless_app, RangePlugin};

pub struct FrameDriver {
    app: App,
}

impl FrameDriver {
    /// Валидирует конфиг, собирает App, прогоняет boot кадр
    pub fn new(config: RangeConfig, seed: u64, bridge: Bridge) -> Result<Self, ConfigError> {
        config.validate()?;
        let keymap = KeyMap::from_bindings(&config.input.bindings)?;

        let mut app = create_headless_app(seed);
        app.insert_resource(config)
            .insert_resource(keymap)
            .insert_resource(bridge)
            .add_plugins(RangePlugin);

        app.finish();
        app.cleanup();
        app.update();

        crate::log_info(&format!("🚀 FrameDriver ready (seed: {})", seed));

        Ok(Self { app })
    }

    /// Driver на HeadlessBackend; возвращает копию backend'а для инспекции
    pub fn headless(config: RangeConfig, seed: u64) -> Result<(Self, HeadlessBackend), ConfigError> {
        let backend = HeadlessBackend::new();
        let driver = Self::new(config, seed, Bridge::headless(&backend))?;
        Ok((driver, backend))
    }

    /// В очередь до следующего `tick`
    pub fn push_input(&mut self, event: InputEvent) {
        self.app.world_mut().send_event(event);
    }

    /// Один кадр. Невалидный dt (NaN, < 0) → кадр с нулевым dt
    pub fn tick(&mut self, dt_seconds: f32) {
        let delta = Duration::try_from_secs_f32(dt_seconds).unwrap_or_default();
        self.app
            .world_mut()
            .resource_mut::<Time>()
            .advance_by(delta);
        self.app.update();
    }

    pub fn score(&self) -> u32 {
        self.app.world().resource::<Score>().value()
    }

    pub fn targets(&self) -> &[Target] {
        self.app.world().resource::<TargetRegistry>().query_all()
    }

    pub fn pending_respawns(&self) -> usize {
        self.app.world().resource::<TargetRegistry>().pending_respawns()
    }

    pub fn particles(&self) -> &[Particle] {
        self.app.world().resource::<ParticlePool>().particles()
    }

    pub fn input_state(&self) -> &InputState {
        self.app.world().resource::<InputState>()
    }

    pub fn player_pose(&self) -> PlayerPose {
        *self.app.world().resource::<PlayerPose>()
    }

    pub fn camera_pose(&self) -> CameraPose {
        *self.app.world().resource::<CameraPose>()
    }

    pub fn config(&self) -> &RangeConfig {
        self.app.world().resource::<RangeConfig>()
    }

    /// Забирает TargetHit события последних кадров
    ///
    /// Events двойной буфер: хост, который не читает каждый кадр, теряет
    /// события старше двух кадров.
    pub fn take_hits(&mut self) -> Vec<TargetHit> {
        self.app
            .world_mut()
            .resource_mut::<Events<TargetHit>>()
            .drain()
            .collect()
    }

    pub fn snapshot(&self) -> RangeSnapshot {
        RangeSnapshot::capture(self.app.world())
    }

    pub fn snapshot_toml(&self) -> Result<String, toml::ser::Error> {
        self.snapshot().to_toml()
    }

    pub fn world(&self) -> &World {
        self.app.world()
    }

    pub fn world_mut(&mut self) -> &mut World {
        self.app.world_mut()
    }
}

/// System: запрос рендера в конце кадра (FrameSet::Render)
pub fn request_render(mut bridge: ResMut<Bridge>) {
    bridge.render.request_render();
}

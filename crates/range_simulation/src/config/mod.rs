//! Конфигурация стрельбища (RangeConfig)
//!
//! Все числовые константы ядра живут здесь, а не в `const` по модулям:
//! хост может переопределить их TOML-файлом.
//!
//! ```toml
//! log_level = "Info"
//! step_mode = "PerFrame"
//!
//! [input]
//! mouse_sensitivity = 0.002
//!
//! [input.bindings]
//! w = "MoveForward"
//! s = "MoveBackward"
//! a = "StrafeLeft"
//! d = "StrafeRight"
//!
//! [targets]
//! initial_count = 5
//! respawn_delay_secs = 1.0
//! ```

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use std::time::Duration;

use crate::input::{InputAction, KeyMap};
use crate::logger::LogLevel;

/// Ошибки загрузки/валидации конфигурации
///
/// Единственная fallible поверхность ядра: frame loop сам по себе не падает.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("key `{key}` is bound to both {first:?} and {second:?}")]
    DuplicateBinding {
        key: String,
        first: InputAction,
        second: InputAction,
    },

    #[error("empty key identifier bound to {0:?}")]
    EmptyKey(InputAction),

    #[error("action {0:?} has no key binding")]
    UnboundAction(InputAction),

    #[error("invalid value for `{field}`: {reason}")]
    InvalidValue {
        field: &'static str,
        reason: &'static str,
    },
}

/// Шаг интеграции движения и частиц
///
/// - `PerFrame`: константы трактуются как смещение за кадр (скорость
///   зависит от FPS)
/// - `DeltaScaled` - смещение умножается на `dt * reference_hz`, т.е. при
///   `reference_hz` FPS результат совпадает с `PerFrame`, на других FPS -
///   frame-rate independent
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub enum StepMode {
    #[default]
    PerFrame,
    DeltaScaled { reference_hz: f32 },
}

impl StepMode {
    /// Множитель для per-frame констант на кадре длительностью `dt`
    pub fn scale(&self, dt: f32) -> f32 {
        match *self {
            StepMode::PerFrame => 1.0,
            StepMode::DeltaScaled { reference_hz } => dt * reference_hz,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    /// Радиан на единицу pointer delta
    pub mouse_sensitivity: f32,
    /// Raw key identifier → action (регистр не важен)
    pub bindings: BTreeMap<String, InputAction>,
}

impl Default for InputConfig {
    fn default() -> Self {
        let bindings = [
            ("w", InputAction::MoveForward),
            ("s", InputAction::MoveBackward),
            ("a", InputAction::StrafeLeft),
            ("d", InputAction::StrafeRight),
        ]
        .into_iter()
        .map(|(key, action)| (key.to_string(), action))
        .collect();

        Self {
            mouse_sensitivity: 0.002,
            bindings,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    /// Смещение за кадр (или за 1/reference_hz сек в DeltaScaled)
    pub movement_speed: f32,
    /// Y игрока пиннится к этому значению каждый кадр
    pub ground_height: f32,
    /// Камера = игрок + (0, eye_height, 0)
    pub eye_height: f32,
    pub spawn_position: [f32; 3],
    /// Позиция камеры до первого locked кадра
    pub camera_start: [f32; 3],
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            movement_speed: 0.1,
            ground_height: 1.0,
            eye_height: 1.6,
            spawn_position: [0.0, 1.0, 0.0],
            camera_start: [0.0, 1.0, 5.0],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TargetConfig {
    pub initial_count: u32,
    /// Мишени спавнятся в квадрате [-half, half] по X и Z
    pub spawn_half_extent: f32,
    pub spawn_height: f32,
    pub respawn_delay_secs: f32,
}

impl Default for TargetConfig {
    fn default() -> Self {
        Self {
            initial_count: 5,
            spawn_half_extent: 5.0,
            spawn_height: 0.5,
            respawn_delay_secs: 1.0,
        }
    }
}

impl TargetConfig {
    pub fn respawn_delay(&self) -> Duration {
        Duration::try_from_secs_f32(self.respawn_delay_secs).unwrap_or_default()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParticleConfig {
    pub burst_count: u32,
    /// Скорость частицы - uniform в [-spread, spread) по каждой оси
    pub velocity_spread: f32,
    pub lifetime: f32,
}

impl Default for ParticleConfig {
    fn default() -> Self {
        Self {
            burst_count: 10,
            velocity_spread: 0.1,
            lifetime: 1.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AudioConfig {
    pub gunshot_volume: f32,
    pub hit_volume: f32,
    pub music_volume: f32,
    pub noise_volume: f32,
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            gunshot_volume: 0.8,
            hit_volume: 1.0,
            music_volume: 0.5,
            noise_volume: 0.3,
        }
    }
}

/// Полная конфигурация ядра (ECS resource)
#[derive(Resource, Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RangeConfig {
    pub log_level: LogLevel,
    pub step_mode: StepMode,
    pub input: InputConfig,
    pub player: PlayerConfig,
    pub targets: TargetConfig,
    pub particles: ParticleConfig,
    pub audio: AudioConfig,
}

impl RangeConfig {
    /// Парсинг + валидация (отсутствующие поля берутся из Default)
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let config: RangeConfig = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Чтение файла + `from_toml_str`. Ошибка логируется (ERROR) до возврата
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let result = std::fs::read_to_string(path)
            .map_err(|source| ConfigError::Io {
                path: path.display().to_string(),
                source,
            })
            .and_then(|source| Self::from_toml_str(&source));

        if let Err(err) = &result {
            crate::log_error(&format!("❌ Config {}: {}", path.display(), err));
        }
        result
    }

    /// Проверка инвариантов (вызывается до старта frame loop)
    pub fn validate(&self) -> Result<(), ConfigError> {
        // Таблица клавиш валидируется тем же кодом, что строит KeyMap
        KeyMap::from_bindings(&self.input.bindings)?;

        positive("input.mouse_sensitivity", self.input.mouse_sensitivity)?;
        non_negative("player.movement_speed", self.player.movement_speed)?;
        finite("player.ground_height", self.player.ground_height)?;
        finite("player.eye_height", self.player.eye_height)?;
        for value in self.player.spawn_position.iter().chain(&self.player.camera_start) {
            finite("player position", *value)?;
        }
        non_negative("targets.spawn_half_extent", self.targets.spawn_half_extent)?;
        finite("targets.spawn_height", self.targets.spawn_height)?;
        non_negative("targets.respawn_delay_secs", self.targets.respawn_delay_secs)?;
        non_negative("particles.velocity_spread", self.particles.velocity_spread)?;
        positive("particles.lifetime", self.particles.lifetime)?;

        for (field, volume) in [
            ("audio.gunshot_volume", self.audio.gunshot_volume),
            ("audio.hit_volume", self.audio.hit_volume),
            ("audio.music_volume", self.audio.music_volume),
            ("audio.noise_volume", self.audio.noise_volume),
        ] {
            non_negative(field, volume)?;
        }

        if let StepMode::DeltaScaled { reference_hz } = self.step_mode {
            positive("step_mode.reference_hz", reference_hz)?;
        }

        Ok(())
    }
}

fn finite(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::InvalidValue {
            field,
            reason: "must be a finite number",
        })
    }
}

fn non_negative(field: &'static str, value: f32) -> Result<(), ConfigError> {
    finite(field, value)?;
    if value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidValue {
            field,
            reason: "must not be negative",
        })
    }
}

fn positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
    finite(field, value)?;
    if value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidValue {
            field,
            reason: "must be greater than zero",
        })
    }
}

#[cfg(test)]
mod config_tests;

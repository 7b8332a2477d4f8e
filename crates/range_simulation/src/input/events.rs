//! Input events
//!
//! Хост пушит их между кадрами, ядро дренирует в начале следующего кадра.

use bevy::prelude::Event;

/// Кнопка указателя (мышь)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerButton {
    Primary,
    Secondary,
    Middle,
}

/// Raw input событие от хоста
///
/// # Fields
/// - `KeyDown` / `KeyUp`: raw key identifier (`"w"`, `"W"`, `"ArrowUp"`…),
///   маппится через `KeyMap`, неизвестные клавиши игнорируются
/// - `PointerMoved`: relative delta (pointer lock mode), применяется только в Locked
/// - `ButtonDown`: Primary в Locked = выстрел, в Unlocked = запрос pointer lock
/// - `LockChanged`: хост сообщает результат pointer lock (вход/выход)
#[derive(Event, Debug, Clone, PartialEq)]
pub enum InputEvent {
    KeyDown(String),
    KeyUp(String),
    PointerMoved { dx: f32, dy: f32 },
    ButtonDown(PointerButton),
    LockChanged { locked: bool },
}

impl InputEvent {
    pub fn key_down(key: impl Into<String>) -> Self {
        Self::KeyDown(key.into())
    }

    pub fn key_up(key: impl Into<String>) -> Self {
        Self::KeyUp(key.into())
    }
}

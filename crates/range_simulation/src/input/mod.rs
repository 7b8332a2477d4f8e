//! Player input module
//!
//! Превращает raw события хоста в стабильный `InputState` snapshot.
//!
//! # Архитектура
//!
//! ```text
//! Host (keyboard / mouse / pointer-lock callbacks)
//!     ↓ FrameDriver::push_input
//! InputEvent (ECS event queue) - events.rs
//!     ↓ drain_input_events (FrameSet::Input, в начале кадра)
//! InputState (resource) - state.rs       ShootIntent (event)
//!     ↓                                       ↓
//! player controller                      hit resolver
//! ```
//!
//! Raw key identifiers маппятся в `InputAction` через `KeyMap` (keymap.rs),
//! который строится и валидируется из конфигурации.

use bevy::prelude::*;

pub mod events;
pub mod keymap;
pub mod state;
pub mod systems;

#[cfg(test)]
mod state_tests;

// Re-exports для external use
pub use events::*;
pub use keymap::KeyMap;
pub use state::*;
pub use systems::drain_input_events;

use crate::FrameSet;

/// Input Plugin
///
/// Регистрирует InputEvent и систему дренажа очереди (FrameSet::Input).
pub struct InputPlugin;

impl Plugin for InputPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<InputEvent>()
            .init_resource::<InputState>()
            .add_systems(Update, drain_input_events.in_set(FrameSet::Input));
    }
}

//! Input drain system (ECS)

use bevy::prelude::*;

use super::events::{InputEvent, PointerButton};
use super::keymap::KeyMap;
use super::state::InputState;
use crate::bridge::Bridge;
use crate::config::RangeConfig;
use crate::shooting::ShootIntent;

/// Дренирует очередь InputEvent в начале кадра
///
/// # Архитектура
/// - Читает: InputEvent (очередь, заполненная хостом между кадрами)
/// - Пишет: InputState (resource), ShootIntent (event → hit resolver)
/// - Bridge: только `request_pointer_lock` (клик в Unlocked)
///
/// Порядок событий внутри кадра сохраняется: `LockChanged` → `PointerMoved`
/// в одном кадре применяет delta уже в Locked.
pub fn drain_input_events(
    mut events: EventReader<InputEvent>,
    mut state: ResMut<InputState>,
    keymap: Res<KeyMap>,
    config: Res<RangeConfig>,
    mut shoot_intents: EventWriter<ShootIntent>,
    mut bridge: ResMut<Bridge>,
) {
    for event in events.read() {
        match event {
            InputEvent::KeyDown(key) => {
                state.on_key_down(&keymap, key);
            }
            InputEvent::KeyUp(key) => {
                state.on_key_up(&keymap, key);
            }
            InputEvent::PointerMoved { dx, dy } => {
                state.on_pointer_move(*dx, *dy, config.input.mouse_sensitivity);
            }
            InputEvent::ButtonDown(PointerButton::Primary) => {
                if state.is_locked() {
                    shoot_intents.write(ShootIntent);
                } else {
                    bridge.render.request_pointer_lock();
                }
            }
            InputEvent::ButtonDown(_) => {}
            InputEvent::LockChanged { locked } => {
                if state.on_lock_changed(*locked) {
                    crate::logger::log_info(&format!(
                        "🔒 Pointer lock → {:?}",
                        state.pointer_lock
                    ));
                }
            }
        }
    }
}

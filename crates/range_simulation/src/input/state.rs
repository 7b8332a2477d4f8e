//! InputState - snapshot input'а, который читает controller раз в кадр

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::f32::consts::FRAC_PI_2;

use super::keymap::KeyMap;

/// Предел pitch (вверх/вниз), радианы
pub const PITCH_LIMIT: f32 = FRAC_PI_2;

/// Действие, на которое маппится клавиша
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Reflect,
)]
pub enum InputAction {
    MoveForward,
    MoveBackward,
    StrafeLeft,
    StrafeRight,
}

impl InputAction {
    pub const ALL: [InputAction; 4] = [
        InputAction::MoveForward,
        InputAction::MoveBackward,
        InputAction::StrafeLeft,
        InputAction::StrafeRight,
    ];
}

/// Pointer lock state machine
///
/// Переходы только по `InputEvent::LockChanged` от хоста.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Reflect)]
pub enum PointerLock {
    #[default]
    Unlocked,
    Locked,
}

/// Текущее состояние input'а игрока
///
/// Инварианты:
/// - `-PITCH_LIMIT ≤ look_pitch ≤ PITCH_LIMIT`
/// - `look_yaw` не ограничен
/// - look меняется только в `PointerLock::Locked`
#[derive(Resource, Debug, Clone, Default, PartialEq, Reflect)]
#[reflect(Resource)]
pub struct InputState {
    pub forward: bool,
    pub backward: bool,
    pub left: bool,
    pub right: bool,
    pub look_yaw: f32,
    pub look_pitch: f32,
    pub pointer_lock: PointerLock,
}

impl InputState {
    pub fn is_locked(&self) -> bool {
        self.pointer_lock == PointerLock::Locked
    }

    pub fn is_active(&self, action: InputAction) -> bool {
        match action {
            InputAction::MoveForward => self.forward,
            InputAction::MoveBackward => self.backward,
            InputAction::StrafeLeft => self.left,
            InputAction::StrafeRight => self.right,
        }
    }

    pub fn set_action(&mut self, action: InputAction, pressed: bool) {
        let flag = match action {
            InputAction::MoveForward => &mut self.forward,
            InputAction::MoveBackward => &mut self.backward,
            InputAction::StrafeLeft => &mut self.left,
            InputAction::StrafeRight => &mut self.right,
        };
        *flag = pressed;
    }

    /// Returns замапленное действие (None - клавиша проигнорирована)
    pub fn on_key_down(&mut self, keymap: &KeyMap, key: &str) -> Option<InputAction> {
        let action = keymap.action_for(key)?;
        self.set_action(action, true);
        Some(action)
    }

    pub fn on_key_up(&mut self, keymap: &KeyMap, key: &str) -> Option<InputAction> {
        let action = keymap.action_for(key)?;
        self.set_action(action, false);
        Some(action)
    }

    /// Mouse look. Returns false если delta проигнорирована (Unlocked)
    pub fn on_pointer_move(&mut self, dx: f32, dy: f32, sensitivity: f32) -> bool {
        if !self.is_locked() || !dx.is_finite() || !dy.is_finite() {
            return false;
        }

        self.look_yaw -= dx * sensitivity;
        self.look_pitch = (self.look_pitch + dy * sensitivity).clamp(-PITCH_LIMIT, PITCH_LIMIT);
        true
    }

    /// Returns true если состояние реально сменилось
    pub fn on_lock_changed(&mut self, locked: bool) -> bool {
        let next = if locked {
            PointerLock::Locked
        } else {
            PointerLock::Unlocked
        };

        let changed = self.pointer_lock != next;
        self.pointer_lock = next;
        changed
    }
}

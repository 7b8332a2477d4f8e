//! Tests for InputState (flags, look clamp, pointer lock).

#[cfg(test)]
mod tests {
    use rand::{Rng, SeedableRng};
    use rand_chacha::ChaCha8Rng;

    use crate::input::{InputAction, InputState, KeyMap, PointerLock, PITCH_LIMIT};

    const SENSITIVITY: f32 = 0.002;

    fn locked_state() -> InputState {
        let mut state = InputState::default();
        state.on_lock_changed(true);
        state
    }

    #[test]
    fn test_input_state_default() {
        let state = InputState::default();
        assert!(!state.forward && !state.backward && !state.left && !state.right);
        assert_eq!(state.look_yaw, 0.0);
        assert_eq!(state.look_pitch, 0.0);
        assert_eq!(state.pointer_lock, PointerLock::Unlocked);
    }

    #[test]
    fn test_key_down_up_sets_and_clears_flag() {
        let keymap = KeyMap::default();
        let mut state = InputState::default();

        assert_eq!(state.on_key_down(&keymap, "w"), Some(InputAction::MoveForward));
        assert!(state.forward);

        state.on_key_down(&keymap, "D");
        assert!(state.right);

        state.on_key_up(&keymap, "w");
        assert!(!state.forward);
        assert!(state.right);
    }

    #[test]
    fn test_unmapped_keys_never_touch_flags() {
        let keymap = KeyMap::default();
        let mut state = InputState::default();
        state.on_key_down(&keymap, "w");
        let before = state.clone();

        for key in ["q", "e", "Shift", " ", "ArrowUp", "ww", ""] {
            assert_eq!(state.on_key_down(&keymap, key), None);
            assert_eq!(state.on_key_up(&keymap, key), None);
        }

        assert_eq!(state, before);
    }

    #[test]
    fn test_flags_follow_latest_event_per_key() {
        // Seeded random последовательность down/up (включая мусорные клавиши)
        let keymap = KeyMap::default();
        let mut state = InputState::default();
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let keys = ["w", "s", "a", "d", "W", "S", "q", "x", "Enter"];
        let mut expected = [false; 4];

        for _ in 0..2_000 {
            let key = keys[rng.gen_range(0..keys.len())];
            let down = rng.gen_bool(0.5);

            if down {
                state.on_key_down(&keymap, key);
            } else {
                state.on_key_up(&keymap, key);
            }

            if let Some(action) = keymap.action_for(key) {
                let index = InputAction::ALL
                    .iter()
                    .position(|&candidate| candidate == action)
                    .expect("action is in ALL");
                expected[index] = down;
            }

            for (index, action) in InputAction::ALL.iter().enumerate() {
                assert_eq!(state.is_active(*action), expected[index]);
            }
        }
    }

    #[test]
    fn test_pointer_move_ignored_when_unlocked() {
        let mut state = InputState::default();
        assert!(!state.on_pointer_move(100.0, 50.0, SENSITIVITY));
        assert_eq!(state.look_yaw, 0.0);
        assert_eq!(state.look_pitch, 0.0);
    }

    #[test]
    fn test_pointer_move_adjusts_yaw_and_pitch() {
        let mut state = locked_state();
        assert!(state.on_pointer_move(100.0, 50.0, SENSITIVITY));

        // yaw -= dx * s, pitch += dy * s
        assert!((state.look_yaw - (-0.2)).abs() < 1e-6);
        assert!((state.look_pitch - 0.1).abs() < 1e-6);
    }

    #[test]
    fn test_pitch_clamped_yaw_unbounded() {
        let mut state = locked_state();
        let mut rng = ChaCha8Rng::seed_from_u64(99);

        for _ in 0..5_000 {
            let dx = rng.gen_range(-500.0..500.0);
            let dy = rng.gen_range(-2_000.0..2_000.0);
            state.on_pointer_move(dx, dy, SENSITIVITY);
            assert!(state.look_pitch >= -PITCH_LIMIT && state.look_pitch <= PITCH_LIMIT);
        }

        // Yaw копится без wrap
        let mut state = locked_state();
        for _ in 0..1_000 {
            state.on_pointer_move(-1_000.0, 0.0, SENSITIVITY);
        }
        assert!(state.look_yaw > 1_000.0 * 2.0 * 0.99);

        state.on_pointer_move(0.0, 1.0e9, SENSITIVITY);
        assert_eq!(state.look_pitch, PITCH_LIMIT);
        state.on_pointer_move(0.0, -1.0e9, SENSITIVITY);
        assert_eq!(state.look_pitch, -PITCH_LIMIT);
    }

    #[test]
    fn test_non_finite_pointer_delta_ignored() {
        let mut state = locked_state();
        assert!(!state.on_pointer_move(f32::NAN, 0.0, SENSITIVITY));
        assert!(!state.on_pointer_move(0.0, f32::INFINITY, SENSITIVITY));
        assert_eq!(state.look_pitch, 0.0);
        assert_eq!(state.look_yaw, 0.0);
    }

    #[test]
    fn test_lock_state_machine() {
        let mut state = InputState::default();
        assert!(!state.is_locked());

        assert!(state.on_lock_changed(true));
        assert!(state.is_locked());

        // Повторный Locked - не переход
        assert!(!state.on_lock_changed(true));

        assert!(state.on_lock_changed(false));
        assert_eq!(state.pointer_lock, PointerLock::Unlocked);
    }

    #[test]
    fn test_look_kept_after_unlock() {
        let mut state = locked_state();
        state.on_pointer_move(10.0, 10.0, SENSITIVITY);
        let (yaw, pitch) = (state.look_yaw, state.look_pitch);

        state.on_lock_changed(false);
        state.on_pointer_move(500.0, 500.0, SENSITIVITY);

        assert_eq!(state.look_yaw, yaw);
        assert_eq!(state.look_pitch, pitch);
    }
}

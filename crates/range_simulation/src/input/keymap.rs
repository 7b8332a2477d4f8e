//! KeyMap - таблица raw key identifier → InputAction
//!
//! Строится один раз из `InputConfig::bindings` и валидируется:
//! - пустой key запрещён
//! - одна клавиша (без учёта регистра) → максимум одно действие
//! - каждое действие имеет хотя бы одну клавишу

use bevy::prelude::*;
use std::collections::{BTreeMap, HashMap};

use super::state::InputAction;
use crate::config::ConfigError;

#[derive(Resource, Debug, Clone, PartialEq)]
pub struct KeyMap {
    /// Ключи хранятся в lowercase
    bindings: HashMap<String, InputAction>,
}

impl Default for KeyMap {
    /// WASD
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

        Self { bindings }
    }
}

impl KeyMap {
    pub fn from_bindings(source: &BTreeMap<String, InputAction>) -> Result<Self, ConfigError> {
        let mut bindings: HashMap<String, InputAction> = HashMap::with_capacity(source.len());

        for (raw_key, &action) in source {
            let key = normalize_key(raw_key);
            if key.is_empty() {
                return Err(ConfigError::EmptyKey(action));
            }

            if let Some(&first) = bindings.get(&key) {
                if first != action {
                    return Err(ConfigError::DuplicateBinding {
                        key,
                        first,
                        second: action,
                    });
                }
                continue;
            }

            bindings.insert(key, action);
        }

        for action in InputAction::ALL {
            if !bindings.values().any(|&bound| bound == action) {
                return Err(ConfigError::UnboundAction(action));
            }
        }

        Ok(Self { bindings })
    }

    pub fn action_for(&self, key: &str) -> Option<InputAction> {
        self.bindings.get(&normalize_key(key)).copied()
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

fn normalize_key(key: &str) -> String {
    key.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bindings(pairs: &[(&str, InputAction)]) -> BTreeMap<String, InputAction> {
        pairs
            .iter()
            .map(|(key, action)| (key.to_string(), *action))
            .collect()
    }

    #[test]
    fn test_default_is_wasd() {
        let keymap = KeyMap::default();
        assert_eq!(keymap.action_for("w"), Some(InputAction::MoveForward));
        assert_eq!(keymap.action_for("s"), Some(InputAction::MoveBackward));
        assert_eq!(keymap.action_for("a"), Some(InputAction::StrafeLeft));
        assert_eq!(keymap.action_for("d"), Some(InputAction::StrafeRight));
        assert_eq!(keymap.len(), 4);
    }

    #[test]
    fn test_lookup_is_case_insensitive() {
        let keymap = KeyMap::default();
        assert_eq!(keymap.action_for("W"), Some(InputAction::MoveForward));
        assert_eq!(keymap.action_for("D"), Some(InputAction::StrafeRight));
    }

    #[test]
    fn test_unmapped_key_is_none() {
        let keymap = KeyMap::default();
        assert_eq!(keymap.action_for("q"), None);
        assert_eq!(keymap.action_for("Space"), None);
        assert_eq!(keymap.action_for(""), None);
    }

    #[test]
    fn test_multiple_keys_per_action_allowed() {
        let keymap = KeyMap::from_bindings(&bindings(&[
            ("w", InputAction::MoveForward),
            ("ArrowUp", InputAction::MoveForward),
            ("s", InputAction::MoveBackward),
            ("a", InputAction::StrafeLeft),
            ("d", InputAction::StrafeRight),
        ]))
        .expect("valid bindings");

        assert_eq!(keymap.action_for("arrowup"), Some(InputAction::MoveForward));
        assert_eq!(keymap.action_for("w"), Some(InputAction::MoveForward));
    }

    #[test]
    fn test_empty_key_rejected() {
        let err = KeyMap::from_bindings(&bindings(&[
            ("  ", InputAction::MoveForward),
            ("s", InputAction::MoveBackward),
            ("a", InputAction::StrafeLeft),
            ("d", InputAction::StrafeRight),
        ]))
        .unwrap_err();

        assert!(matches!(err, ConfigError::EmptyKey(InputAction::MoveForward)));
    }

    #[test]
    fn test_same_key_same_action_is_not_a_conflict() {
        let keymap = KeyMap::from_bindings(&bindings(&[
            ("W", InputAction::MoveForward),
            ("w", InputAction::MoveForward),
            ("s", InputAction::MoveBackward),
            ("a", InputAction::StrafeLeft),
            ("d", InputAction::StrafeRight),
        ]))
        .expect("duplicate with same action is fine");

        assert_eq!(keymap.len(), 4);
    }
}

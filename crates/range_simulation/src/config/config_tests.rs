//! Tests for RangeConfig parsing and validation.

#[cfg(test)]
mod tests {
    use super::super::{ConfigError, RangeConfig, StepMode};
    use crate::input::InputAction;
    use crate::logger::LogLevel;

    #[test]
    fn test_default_config_values() {
        let config = RangeConfig::default();
        assert_eq!(config.input.mouse_sensitivity, 0.002);
        assert_eq!(config.player.movement_speed, 0.1);
        assert_eq!(config.player.ground_height, 1.0);
        assert_eq!(config.player.eye_height, 1.6);
        assert_eq!(config.targets.initial_count, 5);
        assert_eq!(config.targets.spawn_half_extent, 5.0);
        assert_eq!(config.targets.spawn_height, 0.5);
        assert_eq!(config.targets.respawn_delay_secs, 1.0);
        assert_eq!(config.particles.burst_count, 10);
        assert_eq!(config.particles.velocity_spread, 0.1);
        assert_eq!(config.particles.lifetime, 1.0);
        assert_eq!(config.step_mode, StepMode::PerFrame);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_toml_gives_defaults() {
        let config = RangeConfig::from_toml_str("").expect("empty config is valid");
        assert_eq!(config, RangeConfig::default());
    }

    #[test]
    fn test_partial_toml_overrides_only_given_fields() {
        let source = r#"
            log_level = "Warning"

            [targets]
            initial_count = 8
            respawn_delay_secs = 2.5
        "#;

        let config = RangeConfig::from_toml_str(source).expect("valid config");
        assert_eq!(config.log_level, LogLevel::Warning);
        assert_eq!(config.targets.initial_count, 8);
        assert_eq!(config.targets.respawn_delay_secs, 2.5);
        // Не заданные поля секции - из Default
        assert_eq!(config.targets.spawn_height, 0.5);
        assert_eq!(config.player.movement_speed, 0.1);
    }

    #[test]
    fn test_delta_scaled_step_mode_parses() {
        let source = r#"step_mode = { DeltaScaled = { reference_hz = 60.0 } }"#;
        let config = RangeConfig::from_toml_str(source).expect("valid config");
        assert_eq!(config.step_mode, StepMode::DeltaScaled { reference_hz: 60.0 });
    }

    #[test]
    fn test_step_mode_scale() {
        assert_eq!(StepMode::PerFrame.scale(0.5), 1.0);
        let scaled = StepMode::DeltaScaled { reference_hz: 60.0 };
        assert!((scaled.scale(1.0 / 60.0) - 1.0).abs() < 1e-6);
        assert!((scaled.scale(1.0 / 30.0) - 2.0).abs() < 1e-6);
    }

    #[test]
    fn test_custom_bindings_parse() {
        let source = r#"
            [input.bindings]
            ArrowUp = "MoveForward"
            ArrowDown = "MoveBackward"
            ArrowLeft = "StrafeLeft"
            ArrowRight = "StrafeRight"
        "#;

        let config = RangeConfig::from_toml_str(source).expect("valid config");
        assert_eq!(config.input.bindings.len(), 4);
        assert_eq!(
            config.input.bindings.get("ArrowUp"),
            Some(&InputAction::MoveForward)
        );
    }

    #[test]
    fn test_missing_action_binding_rejected() {
        let source = r#"
            [input.bindings]
            w = "MoveForward"
            s = "MoveBackward"
            a = "StrafeLeft"
        "#;

        let err = RangeConfig::from_toml_str(source).unwrap_err();
        assert!(matches!(err, ConfigError::UnboundAction(InputAction::StrafeRight)));
    }

    #[test]
    fn test_case_insensitive_duplicate_rejected() {
        let source = r#"
            [input.bindings]
            w = "MoveForward"
            W = "MoveBackward"
            a = "StrafeLeft"
            d = "StrafeRight"
        "#;

        let err = RangeConfig::from_toml_str(source).unwrap_err();
        assert!(matches!(err, ConfigError::DuplicateBinding { .. }), "{err}");
    }

    #[test]
    fn test_negative_respawn_delay_rejected() {
        let mut config = RangeConfig::default();
        config.targets.respawn_delay_secs = -1.0;

        let err = config.validate().unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidValue {
                field: "targets.respawn_delay_secs",
                ..
            }
        ));
    }

    #[test]
    fn test_zero_sensitivity_rejected() {
        let mut config = RangeConfig::default();
        config.input.mouse_sensitivity = 0.0;
        assert!(config.validate().is_err());

        config.input.mouse_sensitivity = f32::NAN;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zero_reference_rate_rejected() {
        let mut config = RangeConfig::default();
        config.step_mode = StepMode::DeltaScaled { reference_hz: 0.0 };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_malformed_toml_is_parse_error() {
        let err = RangeConfig::from_toml_str("[targets\ninitial_count = ").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = RangeConfig::load("/definitely/not/here/range.toml").unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}

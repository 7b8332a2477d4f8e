//! Player domain - поза игрока и first-person камера
//!
//! Содержит:
//! - PlayerPose / CameraPose (resources)
//! - look_rotation / look_forward / movement_basis (YXZ математика)
//! - advance_player_controller (FrameSet::Movement)

use bevy::prelude::*;

pub mod controller;


pub use controller::*;

use crate::config::RangeConfig;
use crate::FrameSet;

/// Player Plugin
///
/// Позы берутся из RangeConfig (конфиг должен быть вставлен ДО плагина,
/// иначе используется Default).
pub struct PlayerPlugin;

impl Plugin for PlayerPlugin {
    fn build(&self, app: &mut App) {
        let config = app
            .world()
            .get_resource::<RangeConfig>()
            .cloned()
            .unwrap_or_default();

        app.insert_resource(PlayerPose::from_config(&config.player))
            .insert_resource(CameraPose::from_config(&config.player))
            .add_systems(Startup, setup_player)
            .add_systems(
                Update,
                advance_player_controller.in_set(FrameSet::Movement),
            );
    }
}

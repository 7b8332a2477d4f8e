//! Shooting domain - выстрел лучом из камеры
//!
//! Содержит:
//! - ShootIntent / TargetHit (events)
//! - Score (resource)
//! - shoot() + resolve_shoot_intents (FrameSet::Shooting)

use bevy::prelude::*;

pub mod events;
pub mod resolver;


pub use events::{ShootIntent, TargetHit};
pub use resolver::{resolve_shoot_intents, shoot, Score, ShotContext, ShotOutcome};

use crate::FrameSet;

/// Shooting Plugin
///
/// ShootIntent пишет input drain, TargetHit читают хост и тесты.
pub struct ShootingPlugin;

impl Plugin for ShootingPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<ShootIntent>()
            .add_event::<TargetHit>()
            .init_resource::<Score>()
            .add_systems(Update, resolve_shoot_intents.in_set(FrameSet::Shooting));
    }
}

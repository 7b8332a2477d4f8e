//! Effects domain - частицы взрыва и ambient звук
//!
//! Содержит:
//! - ParticlePool (resource) + advance_particles (FrameSet::Effects)
//! - start_ambient_cues (Startup)
//!
//! Burst эмитит hit resolver (`ParticlePool::emit`), здесь только жизненный цикл.

use bevy::prelude::*;

pub mod ambient;
pub mod particles;

pub use ambient::start_ambient_cues;
pub use particles::{advance_particles, Particle, ParticlePool};

use crate::FrameSet;

pub struct EffectsPlugin;

impl Plugin for EffectsPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ParticlePool>()
            .add_systems(Startup, start_ambient_cues)
            .add_systems(Update, advance_particles.in_set(FrameSet::Effects));
    }
}

//! Particle bursts - короткоживущие визуалы с затуханием opacity
//!
//! Каждый кадр (FrameSet::Effects), для каждой частицы с конца пула:
//! 1. `position += velocity × step_scale(dt)`
//! 2. `remaining_life -= dt`
//! 3. opacity = remaining_life (clamp в [0, 1]) → substrate
//! 4. `remaining_life <= 0` → remove_visual + evict (в том же вызове)
//!
//! Обход с конца + swap_remove: удаление не пропускает и не посещает повторно.

use bevy::prelude::*;
use rand::Rng;

use crate::bridge::{Bridge, RenderBackend, VisualHandle, VisualKind};
use crate::config::{ParticleConfig, RangeConfig, StepMode};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    pub position: Vec3,
    /// Смещение за кадр (PerFrame) или за reference кадр (DeltaScaled)
    pub velocity: Vec3,
    pub remaining_life: f32,
    pub initial_life: f32,
    pub visual: VisualHandle,
}

impl Particle {
    pub fn opacity(&self) -> f32 {
        self.remaining_life.clamp(0.0, 1.0)
    }

    pub fn is_expired(&self) -> bool {
        self.remaining_life <= 0.0
    }
}

/// Resource: неупорядоченный пул живых частиц
#[derive(Resource, Debug, Default)]
pub struct ParticlePool {
    particles: Vec<Particle>,
}

fn random_axis<R: Rng>(rng: &mut R, spread: f32) -> f32 {
    (rng.gen::<f32>() - 0.5) * 2.0 * spread
}

impl ParticlePool {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    /// Burst из `burst_count` частиц в `origin`. Returns сколько создано
    pub fn emit<R: Rng>(
        &mut self,
        origin: Vec3,
        rng: &mut R,
        render: &mut dyn RenderBackend,
        config: &ParticleConfig,
    ) -> usize {
        let spread = config.velocity_spread;

        for _ in 0..config.burst_count {
            let velocity = Vec3::new(
                random_axis(rng, spread),
                random_axis(rng, spread),
                random_axis(rng, spread),
            );
            let visual = render.spawn_visual(VisualKind::Particle, origin);

            self.particles.push(Particle {
                position: origin,
                velocity,
                remaining_life: config.lifetime,
                initial_life: config.lifetime,
                visual,
            });
        }

        config.burst_count as usize
    }

    /// Один шаг. Returns сколько частиц удалено
    pub fn advance(&mut self, dt: f32, step_mode: StepMode, render: &mut dyn RenderBackend) -> usize {
        let scale = step_mode.scale(dt);
        let mut removed = 0;

        for index in (0..self.particles.len()).rev() {
            let particle = &mut self.particles[index];
            particle.position += particle.velocity * scale;
            particle.remaining_life -= dt;

            render.set_visual_position(particle.visual, particle.position);
            render.set_visual_opacity(particle.visual, particle.opacity());

            if particle.is_expired() {
                render.remove_visual(particle.visual);
                self.particles.swap_remove(index);
                removed += 1;
            }
        }

        removed
    }
}

/// System: продвигает все частицы (FrameSet::Effects)
pub fn advance_particles(
    time: Res<Time>,
    mut pool: ResMut<ParticlePool>,
    config: Res<RangeConfig>,
    mut bridge: ResMut<Bridge>,
) {
    if pool.is_empty() {
        return;
    }

    let removed = pool.advance(time.delta_secs(), config.step_mode, bridge.render.as_mut());
    if removed > 0 && pool.is_empty() {
        crate::logger::log("💨 Particle pool drained");
    }
}

//! HeadlessBackend - substrate без рендера (tests, headless binary)
//!
//! Хранит визуалы (kind + position + opacity), зеркалит camera pose и
//! записывает журнал вызовов (cues, score reports, render/lock requests).
//! Ray cast - аналитический, через parry shapes (Ball/Cuboid), без
//! RapierPhysicsPlugin и без physics world.
//!
//! Clone разделяет состояние (Arc<Mutex>): тест держит одну копию,
//! `Bridge` - другие.

use bevy::prelude::*;
use bevy_rapier3d::parry::math::{Isometry, Point, Real, Vector};
use bevy_rapier3d::parry::query::{Ray, RayCast};
use bevy_rapier3d::parry::shape::{Ball, Cuboid};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use super::{
    AudioBackend, CueId, CuePlayback, RayHit, RenderBackend, ScoreDisplay, VisualHandle,
    VisualKind,
};

/// Радиус сферы мишени
pub const TARGET_RADIUS: f32 = 0.5;
/// Радиус сферы частицы
pub const PARTICLE_RADIUS: f32 = 0.05;
/// Half extents бокса игрока (0.5 × 1.8 × 0.5)
pub const PLAYER_HALF_EXTENTS: Vec3 = Vec3::new(0.25, 0.9, 0.25);

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeadlessVisual {
    pub kind: VisualKind,
    pub position: Vec3,
    pub opacity: f32,
}

#[derive(Debug, Default)]
struct HeadlessState {
    next_handle: u64,
    visuals: HashMap<VisualHandle, HeadlessVisual>,
    camera_position: Vec3,
    camera_yaw: f32,
    camera_pitch: f32,
    cues: Vec<(CueId, CuePlayback)>,
    scores: Vec<u32>,
    render_requests: u64,
    pointer_lock_requests: u32,
}

#[derive(Debug, Clone, Default)]
pub struct HeadlessBackend {
    state: Arc<Mutex<HeadlessState>>,
}

impl HeadlessBackend {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, HeadlessState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn visual(&self, handle: VisualHandle) -> Option<HeadlessVisual> {
        self.lock().visuals.get(&handle).copied()
    }

    pub fn visual_count(&self, kind: VisualKind) -> usize {
        self.lock()
            .visuals
            .values()
            .filter(|visual| visual.kind == kind)
            .count()
    }

    pub fn camera_pose(&self) -> (Vec3, f32, f32) {
        let state = self.lock();
        (state.camera_position, state.camera_yaw, state.camera_pitch)
    }

    /// Журнал cues в порядке вызова
    pub fn cues(&self) -> Vec<(CueId, CuePlayback)> {
        self.lock().cues.clone()
    }

    pub fn cue_count(&self, cue: CueId) -> usize {
        self.lock().cues.iter().filter(|(played, _)| *played == cue).count()
    }

    pub fn reported_scores(&self) -> Vec<u32> {
        self.lock().scores.clone()
    }

    pub fn render_requests(&self) -> u64 {
        self.lock().render_requests
    }

    pub fn pointer_lock_requests(&self) -> u32 {
        self.lock().pointer_lock_requests
    }

    /// Сброс журнала (визуалы и камера остаются)
    ///
    /// Журнал (cues, scores) не ограничен: долгие сессии должны чистить его сами.
    pub fn clear_journal(&self) {
        let mut state = self.lock();
        state.cues.clear();
        state.scores.clear();
        state.render_requests = 0;
        state.pointer_lock_requests = 0;
    }
}

/// Time of impact луча с формой визуала (None - мимо)
fn visual_time_of_impact(visual: &HeadlessVisual, ray: &Ray) -> Option<Real> {
    let p = visual.position;
    let pose = Isometry::<Real>::translation(p.x, p.y, p.z);

    match visual.kind {
        VisualKind::Target => Ball::new(TARGET_RADIUS).cast_ray(&pose, ray, Real::MAX, true),
        VisualKind::Particle => Ball::new(PARTICLE_RADIUS).cast_ray(&pose, ray, Real::MAX, true),
        VisualKind::Player => {
            let half = PLAYER_HALF_EXTENTS;
            Cuboid::new(Vector::<Real>::new(half.x, half.y, half.z))
                .cast_ray(&pose, ray, Real::MAX, true)
        }
    }
}

impl RenderBackend for HeadlessBackend {
    fn spawn_visual(&mut self, kind: VisualKind, position: Vec3) -> VisualHandle {
        let mut state = self.lock();
        state.next_handle += 1;
        let handle = VisualHandle(state.next_handle);
        state.visuals.insert(
            handle,
            HeadlessVisual {
                kind,
                position,
                opacity: 1.0,
            },
        );
        handle
    }

    fn remove_visual(&mut self, handle: VisualHandle) {
        self.lock().visuals.remove(&handle);
    }

    fn set_visual_position(&mut self, handle: VisualHandle, position: Vec3) {
        if let Some(visual) = self.lock().visuals.get_mut(&handle) {
            visual.position = position;
        }
    }

    fn set_visual_opacity(&mut self, handle: VisualHandle, opacity: f32) {
        if let Some(visual) = self.lock().visuals.get_mut(&handle) {
            visual.opacity = opacity;
        }
    }

    fn cast_ray(
        &self,
        origin: Vec3,
        direction: Vec3,
        candidates: &[VisualHandle],
    ) -> Option<RayHit> {
        let direction = direction.normalize_or_zero();
        if direction == Vec3::ZERO {
            return None;
        }

        let ray = Ray::new(
            Point::<Real>::new(origin.x, origin.y, origin.z),
            Vector::<Real>::new(direction.x, direction.y, direction.z),
        );

        let state = self.lock();
        let mut nearest: Option<RayHit> = None;

        for &handle in candidates {
            let Some(visual) = state.visuals.get(&handle) else {
                continue;
            };
            let Some(distance) = visual_time_of_impact(visual, &ray) else {
                continue;
            };

            // Строго меньше: при равной дистанции выигрывает первый кандидат
            if nearest.map_or(true, |hit| distance < hit.distance) {
                nearest = Some(RayHit { handle, distance });
            }
        }

        nearest
    }

    fn camera_forward(&self) -> Vec3 {
        let state = self.lock();
        crate::player::look_forward(state.camera_yaw, state.camera_pitch)
    }

    fn set_camera_pose(&mut self, position: Vec3, yaw: f32, pitch: f32) {
        let mut state = self.lock();
        state.camera_position = position;
        state.camera_yaw = yaw;
        state.camera_pitch = pitch;
    }

    fn request_pointer_lock(&mut self) {
        self.lock().pointer_lock_requests += 1;
    }

    fn request_render(&mut self) {
        self.lock().render_requests += 1;
    }
}

impl AudioBackend for HeadlessBackend {
    fn play_cue(&mut self, cue: CueId, playback: CuePlayback) {
        self.lock().cues.push((cue, playback));
    }
}

impl ScoreDisplay for HeadlessBackend {
    fn report_score(&mut self, score: u32) {
        self.lock().scores.push(score);
    }
}

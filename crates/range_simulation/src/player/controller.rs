//! First-person controller: InputState → PlayerPose + CameraPose
//!
//! # Поворот камеры
//! Euler YXZ `(yaw, -pitch, 0)`: сначала yaw вокруг Y, потом pitch вокруг X,
//! без roll. От этого порядка зависит forward, по которому стреляет hit resolver.
//!
//! # Движение
//! - forward = camera forward с обнулённым Y, renormalize
//! - right = normalize(cross(forward, +Y))
//! - каждый активный флаг добавляет ±forward/±right × movement_speed × step_scale
//! - Y игрока пиннится к ground_height, камера = игрок + eye_height
//!
//! В Unlocked контроллер не делает ничего (игрок и камера заморожены).

use bevy::prelude::*;

use crate::bridge::{Bridge, VisualHandle, VisualKind};
use crate::config::{PlayerConfig, RangeConfig, StepMode};
use crate::input::InputState;

/// Поза игрока
///
/// Инварианты: `position.y == ground_height` после каждого locked кадра,
/// pitch внутри clamp InputState.
#[derive(Resource, Debug, Clone, Copy, PartialEq, Reflect)]
#[reflect(Resource)]
pub struct PlayerPose {
    pub position: Vec3,
    pub yaw: f32,
    pub pitch: f32,
}

impl PlayerPose {
    pub fn from_config(config: &PlayerConfig) -> Self {
        Self {
            position: Vec3::from_array(config.spawn_position),
            yaw: 0.0,
            pitch: 0.0,
        }
    }
}

/// Поза камеры - то, что последним ушло в substrate
#[derive(Resource, Debug, Clone, Copy, PartialEq, Reflect)]
#[reflect(Resource)]
pub struct CameraPose {
    pub position: Vec3,
    pub yaw: f32,
    pub pitch: f32,
}

impl CameraPose {
    pub fn from_config(config: &PlayerConfig) -> Self {
        Self {
            position: Vec3::from_array(config.camera_start),
            yaw: 0.0,
            pitch: 0.0,
        }
    }

    pub fn rotation(&self) -> Quat {
        look_rotation(self.yaw, self.pitch)
    }

    pub fn forward(&self) -> Vec3 {
        look_forward(self.yaw, self.pitch)
    }
}

/// Handle визуала тела игрока (спавнится на старте)
#[derive(Resource, Debug, Clone, Copy)]
pub struct PlayerBody {
    pub visual: VisualHandle,
}

/// Ориентация камеры: Euler YXZ (yaw, -pitch, 0)
pub fn look_rotation(yaw: f32, pitch: f32) -> Quat {
    Quat::from_euler(EulerRot::YXZ, yaw, -pitch, 0.0)
}

/// Camera forward (-Z в локальных координатах камеры)
pub fn look_forward(yaw: f32, pitch: f32) -> Vec3 {
    look_rotation(yaw, pitch) * Vec3::NEG_Z
}

/// Обратная к `look_forward`: (yaw, pitch), при которых камера смотрит вдоль `direction`
///
/// Нулевое направление → (0, 0).
pub fn look_angles_towards(direction: Vec3) -> (f32, f32) {
    let length = direction.length();
    if length <= f32::EPSILON {
        return (0.0, 0.0);
    }

    let yaw = (-direction.x).atan2(-direction.z);
    let pitch = (-direction.y / length).clamp(-1.0, 1.0).asin();
    (yaw, pitch)
}

/// Горизонтальный базис движения: (flattened forward, right)
///
/// normalize_or_zero: вырожденный (нулевой) forward не даёт NaN в позиции.
pub fn movement_basis(yaw: f32, pitch: f32) -> (Vec3, Vec3) {
    let mut forward = look_forward(yaw, pitch);
    forward.y = 0.0;
    let forward = forward.normalize_or_zero();
    let right = forward.cross(Vec3::Y).normalize_or_zero();
    (forward, right)
}

/// Один шаг контроллера. Returns false если Unlocked (ничего не изменилось)
pub fn advance_controller(
    dt: f32,
    input: &InputState,
    player: &mut PlayerPose,
    camera: &mut CameraPose,
    config: &PlayerConfig,
    step_mode: StepMode,
) -> bool {
    if !input.is_locked() {
        return false;
    }

    let (yaw, pitch) = (input.look_yaw, input.look_pitch);
    let (forward, right) = movement_basis(yaw, pitch);
    let step = config.movement_speed * step_mode.scale(dt);

    if input.forward {
        player.position += forward * step;
    }
    if input.backward {
        player.position += forward * -step;
    }
    if input.left {
        player.position += right * -step;
    }
    if input.right {
        player.position += right * step;
    }

    player.position.y = config.ground_height;
    player.yaw = yaw;
    player.pitch = pitch;

    camera.position = player.position + Vec3::Y * config.eye_height;
    camera.yaw = yaw;
    camera.pitch = pitch;

    true
}

/// System: controller (FrameSet::Movement)
///
/// Пушит camera pose и позицию тела игрока в substrate только если шаг был.
pub fn advance_player_controller(
    time: Res<Time>,
    input: Res<InputState>,
    mut player: ResMut<PlayerPose>,
    mut camera: ResMut<CameraPose>,
    body: Res<PlayerBody>,
    config: Res<RangeConfig>,
    mut bridge: ResMut<Bridge>,
) {
    let advanced = advance_controller(
        time.delta_secs(),
        &input,
        &mut player,
        &mut camera,
        &config.player,
        config.step_mode,
    );

    if !advanced {
        return;
    }

    bridge
        .render
        .set_camera_pose(camera.position, camera.yaw, camera.pitch);
    bridge.render.set_visual_position(body.visual, player.position);
}

/// Startup: тело игрока + начальная поза камеры в substrate
pub fn setup_player(
    mut commands: Commands,
    player: Res<PlayerPose>,
    camera: Res<CameraPose>,
    mut bridge: ResMut<Bridge>,
) {
    let visual = bridge
        .render
        .spawn_visual(VisualKind::Player, player.position);
    bridge
        .render
        .set_camera_pose(camera.position, camera.yaw, camera.pitch);

    commands.insert_resource(PlayerBody { visual });

    crate::logger::log(&format!(
        "Player spawned at {:?}, camera at {:?}",
        player.position, camera.position
    ));
}

//! Headless сессия тира
//!
//! Прогоняет ядро без рендера: 600 тиков @ 60Hz по скрипту
//! (клик → pointer lock, поворот на ближайшую мишень, выстрел каждые 30 тиков,
//! немного ходьбы). Первый аргумент - опциональный путь к TOML конфигу.

use range_simulation::player::look_angles_towards;
use range_simulation::{
    init_logger, log_error, FrameDriver, InputEvent, PointerButton, RangeConfig, VisualKind,
};

const SEED: u64 = 42;
const TICKS: u32 = 600;
const DT: f32 = 1.0 / 60.0;

/// Pointer delta, поворачивающая взгляд на ближайшую мишень
fn aim_at_nearest(driver: &FrameDriver) -> Option<InputEvent> {
    let camera = driver.camera_pose().position;
    let target = driver
        .targets()
        .iter()
        .min_by(|a, b| {
            let da = a.position.distance_squared(camera);
            let db = b.position.distance_squared(camera);
            da.total_cmp(&db)
        })?;

    let (yaw, pitch) = look_angles_towards(target.position - camera);
    let input = driver.input_state();
    let sensitivity = driver.config().input.mouse_sensitivity;

    Some(InputEvent::PointerMoved {
        dx: (input.look_yaw - yaw) / sensitivity,
        dy: (pitch - input.look_pitch) / sensitivity,
    })
}

fn main() {
    // До загрузки конфига: ошибки load/validate должны дойти до консоли
    init_logger();

    let config = match std::env::args().nth(1) {
        Some(path) => match RangeConfig::load(&path) {
            Ok(config) => config,
            // load уже залогировал причину
            Err(_) => std::process::exit(1),
        },
        None => RangeConfig::default(),
    };

    println!("Starting target range headless session (seed: {})", SEED);

    let (mut driver, backend) = match FrameDriver::headless(config, SEED) {
        Ok(pair) => pair,
        Err(err) => {
            log_error(&format!("❌ {}", err));
            std::process::exit(1);
        }
    };

    // Клик в Unlocked → хост получает запрос lock и подтверждает его
    driver.push_input(InputEvent::ButtonDown(PointerButton::Primary));
    driver.tick(DT);
    if backend.pointer_lock_requests() > 0 {
        driver.push_input(InputEvent::LockChanged { locked: true });
    }
    driver.tick(DT);

    for tick in 0..TICKS {
        match tick % 30 {
            0 => {
                if let Some(aim) = aim_at_nearest(&driver) {
                    driver.push_input(aim);
                }
            }
            // Поза камеры применяется в кадре поворота, стреляем в следующем
            1 => driver.push_input(InputEvent::ButtonDown(PointerButton::Primary)),
            _ => {}
        }

        if tick == 300 {
            driver.push_input(InputEvent::key_down("w"));
        }
        if tick == 320 {
            driver.push_input(InputEvent::key_up("w"));
        }

        driver.tick(DT);

        if tick % 100 == 0 {
            println!(
                "Tick {}: score {}, {} targets, {} particles, {} cues",
                tick,
                driver.score(),
                driver.targets().len(),
                driver.particles().len(),
                backend.cues().len()
            );
            // Журнал backend'а растёт всю сессию, сбрасываем по окну отчёта
            backend.clear_journal();
        }
    }

    let player = driver.player_pose();
    println!("Session complete!");
    println!("  Score: {}", driver.score());
    println!(
        "  Targets: {} live, {} respawning",
        driver.targets().len(),
        driver.pending_respawns()
    );
    println!(
        "  Visuals: {} targets, {} particles",
        backend.visual_count(VisualKind::Target),
        backend.visual_count(VisualKind::Particle)
    );
    println!("  Player at {:?}", player.position);
}

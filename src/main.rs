//! Highway Shooter entry point
//!
//! Native headless runner: plays one game with a simple autopilot at a fixed
//! 16ms frame, then prints the final stats as JSON. Pass a frame limit as the
//! first argument to stop early.

use std::path::PathBuf;

use highway_shooter::audio::AudioManager;
use highway_shooter::consts::*;
use highway_shooter::platform::KeyState;
use highway_shooter::renderer::RecordingSurface;
use highway_shooter::settings::{DEFAULT_SETTINGS_PATH, SETTINGS_ENV};
use highway_shooter::sim::{GameEvent, GameState};
use highway_shooter::ui::{HudStats, LogHud};
use highway_shooter::{App, Settings};

/// Five minutes of play at 60fps
const DEFAULT_FRAME_LIMIT: u64 = 60 * 60 * 5;
/// Render one frame in this many (headless, so only for the log)
const RENDER_EVERY: u64 = 600;
/// Autopilot dead zone around the target, in pixels
const STEER_DEAD_ZONE: f32 = 4.0;

fn main() {
    env_logger::init();
    log::info!("Highway Shooter starting...");

    let settings_path = std::env::var_os(SETTINGS_ENV)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_SETTINGS_PATH));
    let settings = Settings::load_or_default(&settings_path);
    let seed = settings.seed.unwrap_or_else(rand::random);

    let frame_limit = match std::env::args().nth(1) {
        Some(arg) => arg.parse().unwrap_or_else(|_| {
            log::warn!("Ignoring frame limit '{}'", arg);
            DEFAULT_FRAME_LIMIT
        }),
        None => DEFAULT_FRAME_LIMIT,
    };

    let mut app = App::new(seed, settings, Box::new(LogHud::default()), AudioManager::default());
    let mut surface = RecordingSurface::new();
    let mut kills = 0u32;

    for frame in 0..frame_limit {
        let keys = autopilot(&app.state);
        for event in app.update(FRAME_MS, &keys) {
            if let GameEvent::EnemyKilled { .. } = event {
                kills += 1;
            }
        }

        if frame % RENDER_EVERY == 0 {
            surface.clear();
            app.render(&mut surface);
            log::debug!("Frame {}: {} draw calls", frame, surface.commands.len());
        }

        if app.state.is_over() {
            break;
        }
    }

    log::info!(
        "Run finished after {} frames with {} kills",
        app.state.frame_count,
        kills
    );
    let stats = HudStats::from_state(&app.state);
    match serde_json::to_string_pretty(&stats) {
        Ok(json) => println!("{json}"),
        Err(e) => log::error!("Could not serialize final stats: {}", e),
    }
}

/// Steer under the enemy closest to the end line, else towards a power-up
fn autopilot(state: &GameState) -> KeyState {
    let target = state
        .enemies
        .iter()
        .max_by(|a, b| a.pos.y.total_cmp(&b.pos.y))
        .map(|e| e.rect().center().x)
        .or_else(|| state.power_ups.first().map(|p| p.rect().center().x))
        .unwrap_or(PLAYER_START_X + PLAYER_SIZE / 2.0);

    let dx = target - state.player.center_x();
    let mut keys = KeyState::new();
    keys.insert("arrowleft".to_string(), dx < -STEER_DEAD_ZONE);
    keys.insert("arrowright".to_string(), dx > STEER_DEAD_ZONE);
    keys
}

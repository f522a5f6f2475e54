//! Frame driver
//!
//! `App` is what a host calls once per animation frame: `update(dt, keys)`
//! then `render(surface)`. It owns the simulation and routes the events each
//! tick produces to the HUD and audio surfaces.

use crate::audio::{AudioManager, SoundEffect};
use crate::platform::{KeyMap, KeyState};
use crate::renderer::{Surface, render_scene};
use crate::settings::Settings;
use crate::sim::{GameEvent, GameState, tick};
use crate::ui::{Hud, HudStats, message_for_event};

pub struct App {
    pub state: GameState,
    keys: KeyMap,
    hud: Box<dyn Hud>,
    audio: AudioManager,
    settings: Settings,
}

impl App {
    pub fn new(seed: u64, settings: Settings, hud: Box<dyn Hud>, mut audio: AudioManager) -> Self {
        audio.set_master_volume(settings.master_volume);
        audio.set_sfx_volume(settings.sfx_volume);
        audio.set_muted(settings.muted);

        let mut state = GameState::new(seed);
        state.max_particles = settings.max_particles();
        log::info!(
            "Game initialized with seed: {} (quality {})",
            seed,
            settings.quality.as_str()
        );

        let mut app = Self {
            state,
            keys: KeyMap::new(),
            hud,
            audio,
            settings,
        };
        app.sync_display();
        app
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Advance one frame and present what happened. Returns the frame's events.
    pub fn update(&mut self, dt_ms: f32, keys: &KeyState) -> Vec<GameEvent> {
        let input = self.keys.read(keys);
        tick(&mut self.state, &input, dt_ms);

        let events = self.state.drain_events();
        let mut stats_changed = false;
        for event in &events {
            if let Some(text) = message_for_event(event) {
                self.hud.show_message(&text);
            }
            if let Some(effect) = SoundEffect::for_event(event) {
                self.audio.play(effect);
            }
            stats_changed |= event.touches_stats();
        }
        if stats_changed {
            self.sync_display();
        }
        events
    }

    pub fn render(&self, surface: &mut dyn Surface) {
        render_scene(&self.state, surface, &self.settings);
    }

    fn sync_display(&mut self) {
        self.hud.update_display(&HudStats::from_state(&self.state));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::{Layer, RecordingSurface};
    use crate::sim::GamePhase;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Default)]
    struct Shared {
        messages: Vec<String>,
        displays: Vec<HudStats>,
    }

    struct TestHud(Rc<RefCell<Shared>>);

    impl Hud for TestHud {
        fn show_message(&mut self, text: &str) {
            self.0.borrow_mut().messages.push(text.to_string());
        }

        fn update_display(&mut self, stats: &HudStats) {
            self.0.borrow_mut().displays.push(stats.clone());
        }
    }

    fn test_app() -> (App, Rc<RefCell<Shared>>) {
        let shared = Rc::new(RefCell::new(Shared::default()));
        let mut app = App::new(
            11,
            Settings::default(),
            Box::new(TestHud(shared.clone())),
            AudioManager::default(),
        );
        // No enemies, so runs are predictable
        app.state.difficulty = 0.0;
        (app, shared)
    }

    fn pressed(key: &str) -> KeyState {
        KeyState::from([(key.to_string(), true)])
    }

    #[test]
    fn test_initial_display_sync() {
        let (app, shared) = test_app();
        let shared = shared.borrow();
        assert_eq!(shared.displays.len(), 1);
        assert_eq!(shared.displays[0].health, 100);
        assert_eq!(shared.displays[0].ammo, 20);
        assert_eq!(app.state.max_particles, Settings::default().max_particles());
    }

    #[test]
    fn test_shot_updates_display() {
        let (mut app, shared) = test_app();
        let events = app.update(16.0, &KeyState::new());
        assert!(events.iter().any(|e| matches!(e, GameEvent::ShotFired { .. })));
        let shared = shared.borrow();
        assert_eq!(shared.displays.last().map(|s| s.ammo), Some(19));
    }

    #[test]
    fn test_wave_announcement() {
        let (mut app, shared) = test_app();
        for _ in 0..crate::consts::WAVE_TICKS {
            app.update(16.0, &KeyState::new());
        }
        assert_eq!(app.state.wave, 2);
        let shared = shared.borrow();
        assert!(shared.messages.iter().any(|m| m == "WAVE 2!"));
        assert_eq!(shared.displays.last().map(|s| s.wave), Some(2));
    }

    #[test]
    fn test_pause_key_toggles_once_per_press() {
        let (mut app, shared) = test_app();
        app.update(16.0, &pressed("Escape"));
        assert_eq!(app.state.phase, GamePhase::Paused);
        // Still held: no toggle
        app.update(16.0, &pressed("Escape"));
        assert_eq!(app.state.phase, GamePhase::Paused);
        assert!(shared.borrow().messages.iter().any(|m| m == "PAUSED"));
        assert_eq!(
            shared.borrow().displays.last().map(|s| s.phase),
            Some(GamePhase::Paused)
        );

        app.update(16.0, &KeyState::new());
        app.update(16.0, &pressed("p"));
        assert_eq!(app.state.phase, GamePhase::Playing);
        assert_eq!(
            shared.borrow().displays.last().map(|s| s.phase),
            Some(GamePhase::Playing)
        );
    }

    #[test]
    fn test_game_over_and_restart_key() {
        let (mut app, shared) = test_app();
        app.state.damage_player(1_000);
        app.update(16.0, &KeyState::new());
        assert!(shared.borrow().messages.iter().any(|m| m.starts_with("GAME OVER")));

        app.update(16.0, &pressed("r"));
        assert_eq!(app.state.phase, GamePhase::Playing);
        assert_eq!(app.state.health, app.state.max_health);
        let shared = shared.borrow();
        assert_eq!(shared.displays.last().map(|s| s.health), Some(100));
    }

    #[test]
    fn test_render_draws_all_layers() {
        let (app, _) = test_app();
        let mut surface = RecordingSurface::new();
        app.render(&mut surface);
        assert_eq!(surface.layers.first(), Some(&Layer::Background));
        assert_eq!(surface.layers.last(), Some(&Layer::Overlay));
    }
}

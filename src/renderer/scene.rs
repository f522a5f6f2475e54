//! Scene rendering
//!
//! Draw order is fixed: background, bullets, enemies, particles, player,
//! power-ups, then the pause / game-over overlay.

use glam::Vec2;

use super::{Layer, Sprite, Surface, hsla, rgba};
use crate::consts::*;
use crate::palette;
use crate::settings::Settings;
use crate::sim::{Bullet, Enemy, GamePhase, GameState, Particle, Player, PowerUp, Rect};

/// Enemy health bar height above the sprite
const HEALTH_BAR_HEIGHT: f32 = 4.0;
/// Vertical bob amplitude for walking enemies and floating power-ups
const BOB_AMPLITUDE: f32 = 2.0;

/// Draw the whole frame. Reads state only.
pub fn render_scene(state: &GameState, surface: &mut dyn Surface, settings: &Settings) {
    surface.begin_layer(Layer::Background);
    draw_background(surface);

    surface.begin_layer(Layer::Bullets);
    for bullet in &state.bullets {
        draw_bullet(surface, bullet, settings);
    }

    surface.begin_layer(Layer::Enemies);
    for enemy in &state.enemies {
        draw_enemy(surface, enemy);
    }

    surface.begin_layer(Layer::Particles);
    for particle in &state.particles {
        draw_particle(surface, particle);
    }

    surface.begin_layer(Layer::Player);
    draw_player(surface, &state.player);

    surface.begin_layer(Layer::PowerUps);
    for power_up in &state.power_ups {
        draw_power_up(surface, power_up);
    }

    surface.begin_layer(Layer::Overlay);
    draw_overlay(surface, state);
}

fn draw_background(surface: &mut dyn Surface) {
    let screen = Rect::new(0.0, 0.0, CANVAS_WIDTH, CANVAS_HEIGHT);
    if surface.draw_sprite(Sprite::Background, screen) {
        return;
    }

    // Placeholder: sky, desert, and a road widening towards the player
    surface.fill_rect(
        Rect::new(0.0, 0.0, CANVAS_WIDTH, SPAWN_LINE_Y),
        rgba(palette::SKY, 1.0),
    );
    surface.fill_rect(
        Rect::new(0.0, SPAWN_LINE_Y, CANVAS_WIDTH, CANVAS_HEIGHT - SPAWN_LINE_Y),
        rgba(palette::SAND, 1.0),
    );
    let bands = 8;
    let band_h = (CANVAS_HEIGHT - SPAWN_LINE_Y) / bands as f32;
    for i in 0..bands {
        let t = (i as f32 + 0.5) / bands as f32;
        let left = crate::lerp(SPAWN_LINE_X_MIN, PLAYER_MIN_X, t);
        let right = crate::lerp(SPAWN_LINE_X_MAX, PLAYER_MAX_X + PLAYER_SIZE, t);
        surface.fill_rect(
            Rect::new(left, SPAWN_LINE_Y + i as f32 * band_h, right - left, band_h),
            rgba(palette::ROAD, 1.0),
        );
    }
}

fn draw_bullet(surface: &mut dyn Surface, bullet: &Bullet, settings: &Settings) {
    let shown = settings.trail_points(bullet.trail.len());
    let skip = bullet.trail.len() - shown;
    for (i, point) in bullet.trail.iter().skip(skip).enumerate() {
        // Oldest points are faintest and thinnest
        let t = (i + 1) as f32 / (shown + 1) as f32;
        surface.fill_circle(
            *point,
            bullet.size.x / 2.0 * t,
            hsla(bullet.hue + i as f32 * 10.0, 1.0, 0.5, t * 0.6),
        );
    }
    surface.fill_rect(bullet.rect(), rgba(palette::BULLET, 1.0));
}

fn draw_enemy(surface: &mut dyn Surface, enemy: &Enemy) {
    let bob = (enemy.anim_frame as f32 * 0.1 + enemy.bob_offset).sin() * BOB_AMPLITUDE * enemy.scale;
    let mut rect = enemy.rect();
    rect.y += bob;

    if !surface.draw_sprite(Sprite::Enemy(enemy.kind), rect) {
        surface.fill_rect(rect, rgba(enemy.kind.color(), 1.0));
    }
    if enemy.hit_flash > 0 {
        surface.fill_rect(rect, rgba(palette::FLASH, 0.5));
    }

    if enemy.max_health > 1 {
        let bar = Rect::new(rect.x, rect.y - HEALTH_BAR_HEIGHT - 2.0, rect.w, HEALTH_BAR_HEIGHT);
        surface.fill_rect(bar, rgba(palette::HEALTH_BACK, 1.0));
        let fraction = enemy.health_fraction();
        let color = if fraction > 0.6 {
            palette::HEALTH_GOOD
        } else if fraction > 0.3 {
            palette::HEALTH_MID
        } else {
            palette::HEALTH_LOW
        };
        surface.fill_rect(Rect::new(bar.x, bar.y, bar.w * fraction, bar.h), rgba(color, 1.0));
    }
}

fn draw_particle(surface: &mut dyn Surface, particle: &Particle) {
    surface.fill_circle(
        particle.pos,
        particle.size / 2.0,
        rgba(particle.color, particle.alpha()),
    );
}

fn draw_player(surface: &mut dyn Surface, player: &Player) {
    let rect = player.rect();
    if !surface.draw_sprite(Sprite::Player, rect) {
        surface.fill_rect(rect, rgba(palette::PLAYER, 1.0));
    }
}

fn draw_power_up(surface: &mut dyn Surface, power_up: &PowerUp) {
    let bob = (power_up.anim_frame as f32 * 0.05 + power_up.bob_offset).sin() * BOB_AMPLITUDE;
    let base = power_up.rect();
    let size = base.w * power_up.pulse;
    let center = base.center() + Vec2::new(0.0, bob);
    let rect = Rect::new(center.x - size / 2.0, center.y - size / 2.0, size, size);

    if !surface.draw_sprite(Sprite::PowerUp(power_up.kind), rect) {
        surface.fill_circle(center, size / 2.0, rgba(power_up.kind.color(), 0.9));
        surface.text(
            &power_up.kind.symbol().to_string(),
            center,
            size * 0.8,
            rgba(palette::WHITE, 1.0),
        );
    }
}

fn draw_overlay(surface: &mut dyn Surface, state: &GameState) {
    let (title, subtitle) = match state.phase {
        GamePhase::Playing => return,
        GamePhase::Paused => ("PAUSED".to_string(), "Press P to resume".to_string()),
        GamePhase::GameOver => (
            "GAME OVER".to_string(),
            format!("Score {}  Wave {}  -  Press R to restart", state.score, state.wave),
        ),
    };
    let center = Vec2::new(CANVAS_WIDTH / 2.0, CANVAS_HEIGHT / 2.0);
    surface.fill_rect(
        Rect::new(0.0, 0.0, CANVAS_WIDTH, CANVAS_HEIGHT),
        [0.0, 0.0, 0.0, 0.6],
    );
    surface.text(&title, center - Vec2::new(0.0, 20.0), 48.0, rgba(palette::WHITE, 1.0));
    surface.text(&subtitle, center + Vec2::new(0.0, 30.0), 20.0, rgba(palette::GOLD, 1.0));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::{DrawCommand, RecordingSurface};
    use crate::settings::QualityPreset;
    use crate::sim::{EnemyKind, ParticleBurst, PowerUpKind};

    /// One of everything on screen
    fn busy_state() -> GameState {
        let mut state = GameState::new(5);
        state.spawn_enemy(EnemyKind::Strong);
        state.spawn_power_up();
        state.bullets.push(Bullet::new(Vec2::new(420.0, 400.0), 1));
        state.bullets[0].update(16.0);
        state.bullets[0].update(16.0);
        state.emit_particles(ParticleBurst::new(Vec2::new(300.0, 300.0), palette::GOLD, 4, 1));
        state
    }

    #[test]
    fn test_layer_order() {
        let state = busy_state();
        let mut surface = RecordingSurface::new();
        render_scene(&state, &mut surface, &Settings::default());
        assert_eq!(
            surface.layers,
            vec![
                Layer::Background,
                Layer::Bullets,
                Layer::Enemies,
                Layer::Particles,
                Layer::Player,
                Layer::PowerUps,
                Layer::Overlay,
            ]
        );
    }

    #[test]
    fn test_missing_sprites_fall_back_to_shapes() {
        let state = busy_state();
        let mut surface = RecordingSurface::new();
        render_scene(&state, &mut surface, &Settings::default());

        assert_eq!(surface.sprite_count(), 0);
        let player_rect = state.player.rect();
        assert!(surface.commands.contains(&DrawCommand::Rect {
            rect: player_rect,
            color: rgba(palette::PLAYER, 1.0),
        }));
        // Power-up placeholder carries its symbol
        let symbol = state.power_ups[0].kind.symbol().to_string();
        assert!(surface.texts().contains(&symbol.as_str()));
    }

    #[test]
    fn test_available_sprites_are_used() {
        let state = busy_state();
        let mut surface = RecordingSurface::with_sprites([
            Sprite::Background,
            Sprite::Player,
            Sprite::Enemy(EnemyKind::Strong),
            Sprite::PowerUp(PowerUpKind::Ammo),
            Sprite::PowerUp(PowerUpKind::Power),
            Sprite::PowerUp(PowerUpKind::FireRate),
        ]);
        render_scene(&state, &mut surface, &Settings::default());
        assert_eq!(surface.sprite_count(), 4);
        assert!(!surface.commands.contains(&DrawCommand::Rect {
            rect: state.player.rect(),
            color: rgba(palette::PLAYER, 1.0),
        }));
    }

    #[test]
    fn test_trails_follow_settings() {
        let state = busy_state();
        let count_circles = |settings: &Settings| {
            let mut surface = RecordingSurface::with_sprites([Sprite::Background]);
            let mut quiet = state.clone();
            quiet.particles.clear();
            quiet.power_ups.clear();
            render_scene(&quiet, &mut surface, settings);
            surface
                .commands
                .iter()
                .filter(|c| matches!(c, DrawCommand::Circle { .. }))
                .count()
        };
        // Two trail points after two updates
        assert_eq!(count_circles(&Settings::from_preset(QualityPreset::High)), 2);
        assert_eq!(count_circles(&Settings::from_preset(QualityPreset::Medium)), 1);
        let no_trails = Settings {
            trails: false,
            ..Settings::from_preset(QualityPreset::High)
        };
        assert_eq!(count_circles(&no_trails), 0);
    }

    #[test]
    fn test_overlay_text() {
        let mut state = GameState::new(1);
        let mut surface = RecordingSurface::new();
        render_scene(&state, &mut surface, &Settings::default());
        assert!(surface.texts().is_empty());

        state.toggle_pause();
        surface.clear();
        render_scene(&state, &mut surface, &Settings::default());
        assert!(surface.texts().contains(&"PAUSED"));

        state.phase = GamePhase::GameOver;
        state.score = 345;
        surface.clear();
        render_scene(&state, &mut surface, &Settings::default());
        let texts = surface.texts();
        assert!(texts.contains(&"GAME OVER"));
        assert!(texts.iter().any(|t| t.contains("345")));
    }
}

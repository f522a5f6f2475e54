//! Surface-agnostic rendering
//!
//! The scene renderer only issues draw calls against a `Surface`. Hosts
//! implement it over whatever canvas they have; a sprite the host cannot
//! provide is reported back and replaced by a placeholder shape.

pub mod recording;
pub mod scene;

use glam::Vec2;

use crate::sim::{EnemyKind, PowerUpKind, Rect};

pub use recording::{DrawCommand, RecordingSurface};
pub use scene::render_scene;

/// Linear RGBA, 0.0 - 1.0 per channel
pub type Rgba = [f32; 4];

/// Convert a 0xRRGGBB palette entry to RGBA
pub fn rgba(hex: u32, alpha: f32) -> Rgba {
    let channel = |shift: u32| ((hex >> shift) & 0xFF) as f32 / 255.0;
    [channel(16), channel(8), channel(0), alpha]
}

/// HSL (hue in degrees) to RGBA
pub fn hsla(hue: f32, saturation: f32, lightness: f32, alpha: f32) -> Rgba {
    let h = hue.rem_euclid(360.0) / 60.0;
    let c = (1.0 - (2.0 * lightness - 1.0).abs()) * saturation;
    let x = c * (1.0 - (h % 2.0 - 1.0).abs());
    let (r, g, b) = match h as u32 {
        0 => (c, x, 0.0),
        1 => (x, c, 0.0),
        2 => (0.0, c, x),
        3 => (0.0, x, c),
        4 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };
    let m = lightness - c / 2.0;
    [r + m, g + m, b + m, alpha]
}

/// Image assets a host may provide
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sprite {
    Background,
    Player,
    Enemy(EnemyKind),
    PowerUp(PowerUpKind),
}

/// Draw layers, back to front
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layer {
    Background,
    Bullets,
    Enemies,
    Particles,
    Player,
    PowerUps,
    Overlay,
}

/// A 2D drawing context
pub trait Surface {
    fn fill_rect(&mut self, rect: Rect, color: Rgba);
    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Rgba);
    /// Draw an image asset. Returns false if the asset is unavailable.
    fn draw_sprite(&mut self, sprite: Sprite, rect: Rect) -> bool;
    fn text(&mut self, text: &str, pos: Vec2, size: f32, color: Rgba);
    /// Called before each layer is drawn
    fn begin_layer(&mut self, _layer: Layer) {}
}

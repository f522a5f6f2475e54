//! A surface that records draw calls instead of drawing

use std::collections::HashSet;

use glam::Vec2;

use super::{Layer, Rgba, Sprite, Surface};
use crate::sim::Rect;

#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Rect { rect: Rect, color: Rgba },
    Circle { center: Vec2, radius: f32, color: Rgba },
    Sprite { sprite: Sprite, rect: Rect },
    Text { text: String, pos: Vec2, size: f32, color: Rgba },
}

/// Records every draw call. Only sprites registered with `with_sprites` are
/// reported as available.
#[derive(Debug, Default)]
pub struct RecordingSurface {
    pub commands: Vec<DrawCommand>,
    pub layers: Vec<Layer>,
    sprites: HashSet<Sprite>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_sprites(sprites: impl IntoIterator<Item = Sprite>) -> Self {
        Self {
            sprites: sprites.into_iter().collect(),
            ..Self::default()
        }
    }

    pub fn clear(&mut self) {
        self.commands.clear();
        self.layers.clear();
    }

    pub fn sprite_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Sprite { .. }))
            .count()
    }

    /// All text drawn this frame
    pub fn texts(&self) -> Vec<&str> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }
}

impl Surface for RecordingSurface {
    fn fill_rect(&mut self, rect: Rect, color: Rgba) {
        self.commands.push(DrawCommand::Rect { rect, color });
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Rgba) {
        self.commands.push(DrawCommand::Circle {
            center,
            radius,
            color,
        });
    }

    fn draw_sprite(&mut self, sprite: Sprite, rect: Rect) -> bool {
        if !self.sprites.contains(&sprite) {
            return false;
        }
        self.commands.push(DrawCommand::Sprite { sprite, rect });
        true
    }

    fn text(&mut self, text: &str, pos: Vec2, size: f32, color: Rgba) {
        self.commands.push(DrawCommand::Text {
            text: text.to_string(),
            pos,
            size,
            color,
        });
    }

    fn begin_layer(&mut self, layer: Layer) {
        self.layers.push(layer);
    }
}

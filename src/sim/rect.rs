//! Rectangle geometry shared by both games
//!
//! Every game object is an axis-aligned rectangle with its origin at the
//! top-left corner, in surface pixel units (y grows downward).

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Packed `0xRRGGBB` display color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color(pub u32);

impl Color {
    /// CSS hex form, e.g. `#ff0000`
    pub fn to_css(self) -> String {
        format!("#{:06x}", self.0 & 0x00ff_ffff)
    }
}

/// A colored axis-aligned rectangle (the base game object)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    /// Top-left corner
    pub pos: Vec2,
    /// Width and height, both positive
    pub size: Vec2,
    pub color: Color,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32, color: Color) -> Self {
        debug_assert!(width > 0.0 && height > 0.0, "rect size must be positive");
        Self {
            pos: Vec2::new(x, y),
            size: Vec2::new(width, height),
            color,
        }
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.size.x
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.size.y
    }

    /// X coordinate of the right edge
    #[inline]
    pub fn right(&self) -> f32 {
        self.pos.x + self.size.x
    }

    /// Y coordinate of the bottom edge
    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y
    }
}

/// The rectangular play area objects are confined to
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Field {
    pub width: f32,
    pub height: f32,
}

impl Field {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Largest x an object of width `w` may occupy
    #[inline]
    pub fn max_x(&self, w: f32) -> f32 {
        self.width - w
    }

    /// Largest y an object of height `h` may occupy
    #[inline]
    pub fn max_y(&self, h: f32) -> f32 {
        self.height - h
    }

    /// Whether an object of width `w` fits horizontally at `x`
    #[inline]
    pub fn allows_x(&self, x: f32, w: f32) -> bool {
        x >= 0.0 && x <= self.max_x(w)
    }

    /// Clamp a proposed top-left position so an object of `size` stays inside
    ///
    /// Each axis is clamped independently.
    pub fn clamp(&self, pos: Vec2, size: Vec2) -> Vec2 {
        Vec2::new(
            pos.x.clamp(0.0, self.max_x(size.x).max(0.0)),
            pos.y.clamp(0.0, self.max_y(size.y).max(0.0)),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_css() {
        assert_eq!(Color(0xff0000).to_css(), "#ff0000");
        assert_eq!(Color(0x00_0a0b).to_css(), "#000a0b");
    }

    #[test]
    fn test_rect_edges() {
        let r = Rect::new(10.0, 20.0, 5.0, 7.0, Color(0));
        assert_eq!(r.right(), 15.0);
        assert_eq!(r.bottom(), 27.0);
    }

    #[test]
    fn test_field_clamp_per_axis() {
        let field = Field::new(500.0, 500.0);
        let size = Vec2::splat(15.0);

        assert_eq!(field.clamp(Vec2::new(-5.0, 100.0), size), Vec2::new(0.0, 100.0));
        assert_eq!(field.clamp(Vec2::new(600.0, 490.0), size), Vec2::new(485.0, 485.0));
        assert_eq!(field.clamp(Vec2::new(30.0, 40.0), size), Vec2::new(30.0, 40.0));
    }

    #[test]
    fn test_field_allows_x() {
        let field = Field::new(100.0, 100.0);
        assert!(field.allows_x(0.0, 10.0));
        assert!(field.allows_x(90.0, 10.0));
        assert!(!field.allows_x(90.5, 10.0));
        assert!(!field.allows_x(-1.0, 10.0));
    }
}

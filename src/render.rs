//! Frame rendering
//!
//! The games only ever draw filled rectangles and a line of text. Every
//! frame starts by filling the whole field with the background, so nothing
//! from the previous frame survives.

use glam::Vec2;

use crate::consts::*;
use crate::sim::{Color, DodgeState, PlatformerState, Rect};

/// A 2D drawing surface (the canvas in the browser)
pub trait Surface {
    /// Fill an axis-aligned rectangle
    fn fill(&mut self, pos: Vec2, size: Vec2, color: Color);
    /// Draw a line of text with its baseline starting at `pos`
    fn text(&mut self, text: &str, pos: Vec2, color: Color);

    fn fill_rect(&mut self, rect: &Rect) {
        self.fill(rect.pos, rect.size, rect.color);
    }
}

/// Draw one Dodge frame
pub fn render_dodge(state: &DodgeState, surface: &mut dyn Surface) {
    let field = Vec2::new(state.field.width, state.field.height);
    surface.fill(Vec2::ZERO, field, BACKGROUND);

    for enemy in &state.enemies {
        surface.fill_rect(&enemy.body);
    }
    surface.fill_rect(&state.player.body);

    surface.fill(Vec2::new(1.0, 1.0), Vec2::new(50.0, 20.0), TIMER_BOX);
    surface.text(&state.clock_secs.to_string(), Vec2::new(5.0, 20.0), TIMER_TEXT);
}

/// Draw one platformer frame
pub fn render_platformer(state: &PlatformerState, surface: &mut dyn Surface) {
    let field = Vec2::new(state.field.width, state.field.height);
    surface.fill(Vec2::ZERO, field, BACKGROUND);

    let level = state.level();
    for floor in &level.floors {
        surface.fill_rect(floor);
    }
    surface.fill_rect(&level.goal);

    let pad = state.tuning.status_padding;
    surface.fill(
        Vec2::splat(pad),
        Vec2::new(state.field.width - pad * 2.0, state.tuning.status_height),
        STATUS_BG,
    );
    let status = format!("LEVEL {} / {}", state.active_level + 1, state.levels.len());
    surface.text(&status, Vec2::new(pad + 10.0, pad + 18.0), STATUS_TEXT);

    if !state.player.dead {
        surface.fill_rect(&state.player.body);
    }
    if let Some(pieces) = &state.player.pieces {
        for piece in pieces {
            surface.fill_rect(piece);
        }
    }
}

/// Draw command captured by [`RecordingSurface`]
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Fill { pos: Vec2, size: Vec2, color: Color },
    Text { text: String, pos: Vec2, color: Color },
}

/// Surface that records draw calls instead of painting (headless runs, tests)
#[derive(Debug, Default)]
pub struct RecordingSurface {
    pub commands: Vec<DrawCommand>,
    /// Frames begun (full-field background fills)
    pub frames: usize,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forget everything but the frame count
    pub fn clear(&mut self) {
        self.commands.clear();
    }

    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Text { text, .. } => Some(text.as_str()),
            DrawCommand::Fill { .. } => None,
        })
    }
}

impl Surface for RecordingSurface {
    fn fill(&mut self, pos: Vec2, size: Vec2, color: Color) {
        if pos == Vec2::ZERO && color == BACKGROUND {
            self.frames += 1;
        }
        self.commands.push(DrawCommand::Fill { pos, size, color });
    }

    fn text(&mut self, text: &str, pos: Vec2, color: Color) {
        self.commands.push(DrawCommand::Text {
            text: text.to_string(),
            pos,
            color,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tuning::{DodgeTuning, PlatformerTuning};

    #[test]
    fn test_dodge_frame_starts_with_clear() {
        let state = DodgeState::new(1, 500.0, DodgeTuning::default());
        let mut surface = RecordingSurface::new();
        render_dodge(&state, &mut surface);

        assert_eq!(
            surface.commands[0],
            DrawCommand::Fill {
                pos: Vec2::ZERO,
                size: Vec2::new(500.0, 500.0),
                color: BACKGROUND
            }
        );
        // Background + enemies + player + timer box
        let fills = surface
            .commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Fill { .. }))
            .count();
        assert_eq!(fills, 1 + state.enemies.len() + 1 + 1);
        let texts: Vec<_> = surface.texts().collect();
        assert_eq!(texts, vec!["0"]);
    }

    #[test]
    fn test_platformer_hides_dead_player() {
        let mut state = PlatformerState::new(2, 600.0, PlatformerTuning::default());
        let mut surface = RecordingSurface::new();
        render_platformer(&state, &mut surface);
        let alive = surface.commands.len();
        assert!(surface.texts().any(|t| t == "LEVEL 1 / 20"));

        state.player.dead = true;
        state.player.pieces = Some(vec![state.player.body; 3]);
        surface.clear();
        render_platformer(&state, &mut surface);
        assert_eq!(surface.commands.len(), alive - 1 + 3);
        assert_eq!(surface.frames, 2);
    }
}

//! The two games wired up for the loop driver

use crate::render::{Surface, render_dodge, render_platformer};
use crate::session::{Game, InputEvent};
use crate::settings::Settings;
use crate::sim::{DodgeState, PlatformerState, dodge, platformer};

/// Dodge
pub struct DodgeGame {
    pub state: DodgeState,
    /// Seconds survived by the most recent run that ended in a collision
    pub last_run: Option<u32>,
}

impl DodgeGame {
    pub fn new(seed: u64, field_width: f32, settings: &Settings) -> Self {
        Self {
            state: DodgeState::new(seed, field_width, settings.dodge.clone()),
            last_run: None,
        }
    }
}

impl Game for DodgeGame {
    fn tick_interval_ms(&self) -> u32 {
        self.state.tuning.tick_interval_ms
    }

    fn clock_interval_ms(&self) -> Option<u32> {
        Some(self.state.tuning.clock_interval_ms)
    }

    fn tick(&mut self) {
        dodge::tick(&mut self.state);
        if let Some(secs) = self.state.take_finished_run() {
            self.last_run = Some(secs);
        }
    }

    fn clock(&mut self) {
        dodge::clock(&mut self.state);
    }

    fn render(&self, surface: &mut dyn Surface) {
        render_dodge(&self.state, surface);
    }

    fn handle_input(&mut self, event: InputEvent) -> bool {
        match event {
            InputEvent::PointerDown(p) => self.state.pointer_down(p),
            InputEvent::PointerMove(p) => {
                self.state.pointer_move(p);
                self.state.player.dragging
            }
            InputEvent::PointerUp => {
                self.state.pointer_up();
                false
            }
            InputEvent::FocusLost => {
                self.state.focus_lost();
                false
            }
            InputEvent::KeyDown(_) | InputEvent::KeyUp(_) => false,
        }
    }

    fn resize(&mut self, field_width: f32) {
        self.state.resize(field_width);
    }
}

/// The platformer
pub struct PlatformerGame {
    pub state: PlatformerState,
}

impl PlatformerGame {
    pub fn new(seed: u64, field_width: f32, settings: &Settings) -> Self {
        Self {
            state: PlatformerState::new(seed, field_width, settings.platformer.clone()),
        }
    }
}

impl Game for PlatformerGame {
    fn tick_interval_ms(&self) -> u32 {
        self.state.tuning.tick_interval_ms
    }

    fn tick(&mut self) {
        platformer::tick(&mut self.state);
    }

    fn render(&self, surface: &mut dyn Surface) {
        render_platformer(&self.state, surface);
    }

    fn handle_input(&mut self, event: InputEvent) -> bool {
        match event {
            InputEvent::KeyDown(key) => {
                self.state.key_down(key);
                true
            }
            InputEvent::KeyUp(key) => {
                self.state.key_up(key);
                true
            }
            InputEvent::FocusLost => {
                self.state.focus_lost();
                false
            }
            InputEvent::PointerDown(_) | InputEvent::PointerMove(_) | InputEvent::PointerUp => false,
        }
    }

    fn resize(&mut self, field_width: f32) {
        self.state.resize(field_width);
    }
}

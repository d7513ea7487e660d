//! Pointer drag handling for Dodge

use glam::Vec2;

use crate::sim::collision::grabs;

use super::state::DodgeState;

impl DodgeState {
    /// Pointer pressed at `point` (field coordinates)
    ///
    /// Grabbing the player starts dragging and, if no run is in progress,
    /// starts a new run from zero. Returns whether the press hit the player.
    pub fn pointer_down(&mut self, point: Vec2) -> bool {
        let t = &self.tuning;
        if !grabs(point, &self.player.body, t.grab_margin, t.grab_reach) {
            return false;
        }
        if !self.running {
            self.clock_secs = 0;
            log::debug!("Dodge run started");
        }
        self.running = true;
        self.player.dragging = true;
        true
    }

    /// Pointer moved to `point`; drags the player, clamped to the field
    pub fn pointer_move(&mut self, point: Vec2) {
        if self.player.dragging && self.running {
            self.player.body.pos = self.field.clamp(point, self.player.body.size);
        }
    }

    /// Pointer released; the run keeps going
    pub fn pointer_up(&mut self) {
        self.player.dragging = false;
    }

    /// The surface lost input focus
    pub fn focus_lost(&mut self) {
        self.pointer_up();
    }
}

//! 2D camera for pan and zoom.

use glam::Vec2;
use serde_derive::{Deserialize, Serialize};

/// Curve space shares the screen's orientation (y down); one curve unit is
/// one pixel at zoom 1.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Camera2D {
    /// Curve-space point shown at the viewport centre
    pub position: Vec2,
    pub zoom: f32,
}

impl Default for Camera2D {
    fn default() -> Self {
        Self::new()
    }
}

impl Camera2D {
    pub fn new() -> Self {
        Self {
            position: Vec2::ZERO,
            zoom: 1.0,
        }
    }

    /// Moves the view by a curve-space delta.
    pub fn pan(&mut self, delta: Vec2) {
        self.position += delta;
    }

    /// Zooms around `focus` (curve space), keeping it at the same screen position.
    pub fn zoom_around(&mut self, factor: f32, focus: Vec2, min: f32, max: f32) {
        let zoom = (self.zoom * factor).clamp(min, max);
        if zoom == self.zoom {
            return;
        }
        let scale = self.zoom / zoom;
        self.position = focus + (self.position - focus) * scale;
        self.zoom = zoom;
    }

    /// `screen_pos` is relative to the viewport's top-left corner.
    pub fn screen_to_world(&self, screen_pos: Vec2, viewport_size: Vec2) -> Vec2 {
        (screen_pos - viewport_size * 0.5) / self.zoom + self.position
    }

    pub fn world_to_screen(&self, world_pos: Vec2, viewport_size: Vec2) -> Vec2 {
        (world_pos - self.position) * self.zoom + viewport_size * 0.5
    }
}

use crate::model::Point;
use serde::{Deserialize, Serialize};

/// Pointer or point position in rendering-surface pixels.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScreenPos {
    pub x: f64,
    pub y: f64,
}

/// Data-space to screen-space mapping owned by the rendering surface.
pub trait ScreenTransform {
    fn to_screen(&self, p: Point) -> ScreenPos;
}

/// Linear axes mapped onto a pixel viewport. Screen y grows downwards.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct LinearTransform {
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl LinearTransform {
    fn sx(&self) -> f64 { self.width / (self.x_max - self.x_min) }
    fn sy(&self) -> f64 { self.height / (self.y_max - self.y_min) }

    /// Degenerate ranges or viewports produce non-finite screen positions,
    /// which never hit; callers can check here first.
    pub fn is_valid(&self) -> bool {
        let sx = self.sx();
        let sy = self.sy();
        sx.is_finite() && sy.is_finite() && sx != 0.0 && sy != 0.0
    }

    pub fn to_data(&self, s: ScreenPos) -> Point {
        Point {
            x: self.x_min + (s.x - self.left) / self.sx(),
            y: self.y_min + (self.top + self.height - s.y) / self.sy(),
        }
    }

    /// Whether a screen position lies in the plotting area, edges included.
    pub fn contains(&self, s: ScreenPos) -> bool {
        s.x >= self.left && s.x <= self.left + self.width && s.y >= self.top && s.y <= self.top + self.height
    }

    /// Data coordinates under `s`, or `None` outside the plotting area.
    pub fn data_at(&self, s: ScreenPos) -> Option<Point> {
        if !self.contains(s) { return None; }
        Some(self.to_data(s))
    }
}

impl ScreenTransform for LinearTransform {
    fn to_screen(&self, p: Point) -> ScreenPos {
        ScreenPos {
            x: self.left + (p.x - self.x_min) * self.sx(),
            y: self.top + self.height - (p.y - self.y_min) * self.sy(),
        }
    }
}

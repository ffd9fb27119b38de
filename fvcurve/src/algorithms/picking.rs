use crate::model::Point;
use crate::transform::{ScreenPos, ScreenTransform};
use serde::Serialize;

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Hit {
    pub index: usize,
    pub dist: f64,
}

/// Nearest point strictly closer than `tol` pixels; argmin over all points,
/// lower index on exact ties.
pub fn nearest_point(pointer: ScreenPos, pts: &[ScreenPos], tol: f64) -> Option<Hit> {
    if !pointer.x.is_finite() || !pointer.y.is_finite() { return None; }
    let tol2 = tol * tol;
    let mut best: Option<(usize, f64)> = None;
    for (i, p) in pts.iter().enumerate() {
        let dx = p.x - pointer.x; let dy = p.y - pointer.y; let d2 = dx * dx + dy * dy;
        // NaN compares false and falls through
        if d2 < tol2 && best.map_or(true, |(_, bd)| d2 < bd) { best = Some((i, d2)); }
    }
    best.map(|(index, d2)| Hit { index, dist: d2.sqrt() })
}

pub fn project(points: &[Point], t: &dyn ScreenTransform) -> Vec<ScreenPos> {
    points.iter().map(|p| t.to_screen(*p)).collect()
}

/// Hit test a data-space curve through the surface transform.
pub fn pick_curve(points: &[Point], t: &dyn ScreenTransform, pointer: ScreenPos, tol: f64) -> Option<Hit> {
    nearest_point(pointer, &project(points, t), tol)
}

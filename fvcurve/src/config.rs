// Editor defaults and ingestion caps. Hosts override them through EditorConfig.

use serde::{Deserialize, Serialize};

// Picking radius around a plotted point (screen px)
pub const HIT_TOLERANCE_PX: f64 = 10.0;

// Undo steps retained per group
pub const MAX_HISTORY_DEPTH: usize = 10;

// Curves every new group starts with
pub const DEFAULT_CURVE_NAMES: [&str; 2] = ["Curve A", "Curve B"];

// Row inserted at the top of a curve
pub const DEFAULT_NEW_POINT: (i64, i64) = (500, 650);

// Offset from the previous row for an inserted row
pub const ADD_ROW_STEP: (i64, i64) = (10, 1);

// Import caps
pub const MAX_POINTS_PER_CURVE: usize = 10_000;
pub const COORD_MIN: f64 = -1_000_000_000.0;
pub const COORD_MAX: f64 = 1_000_000_000.0;

#[inline]
pub fn in_coord_bounds(v: f64) -> bool { v.is_finite() && v >= COORD_MIN && v <= COORD_MAX }

/// Per-editor configuration. Every field has a default, so a host can send a
/// partial JSON object.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    pub hit_tolerance_px: f64,
    pub max_history_depth: usize,
    pub default_curves: Vec<String>,
    pub new_point: (i64, i64),
    pub add_row_step: (i64, i64),
    pub max_points_per_curve: usize,
}

impl Default for EditorConfig {
    fn default() -> Self {
        EditorConfig {
            hit_tolerance_px: HIT_TOLERANCE_PX,
            max_history_depth: MAX_HISTORY_DEPTH,
            default_curves: DEFAULT_CURVE_NAMES.iter().map(|s| s.to_string()).collect(),
            new_point: DEFAULT_NEW_POINT,
            add_row_step: ADD_ROW_STEP,
            max_points_per_curve: MAX_POINTS_PER_CURVE,
        }
    }
}

impl EditorConfig {
    /// Clamp values a host could have sent out of range.
    pub fn sanitized(mut self) -> Self {
        if !self.hit_tolerance_px.is_finite() || self.hit_tolerance_px <= 0.0 {
            self.hit_tolerance_px = HIT_TOLERANCE_PX;
        }
        // depth 0 would leave nothing to undo
        self.max_history_depth = self.max_history_depth.max(1);
        self.max_points_per_curve = self.max_points_per_curve.min(MAX_POINTS_PER_CURVE);
        self
    }
}

/// Name for the curve at `index` when a session dump carries no names:
/// "Curve A" .. "Curve Z", then "Curve 27" and up.
pub fn default_curve_name(index: usize) -> String {
    if index < 26 {
        format!("Curve {}", (b'A' + index as u8) as char)
    } else {
        format!("Curve {}", index + 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_config_keeps_defaults() {
        let cfg: EditorConfig = serde_json::from_str(r#"{"hit_tolerance_px": 6.0}"#).unwrap();
        assert_eq!(cfg.hit_tolerance_px, 6.0);
        assert_eq!(cfg.max_history_depth, MAX_HISTORY_DEPTH);
        assert_eq!(cfg.default_curves, vec!["Curve A".to_string(), "Curve B".to_string()]);
    }

    #[test]
    fn sanitized_repairs_bad_values() {
        let cfg = EditorConfig { hit_tolerance_px: f64::NAN, max_history_depth: 0, ..Default::default() }.sanitized();
        assert_eq!(cfg.hit_tolerance_px, HIT_TOLERANCE_PX);
        assert_eq!(cfg.max_history_depth, 1);
    }

    #[test]
    fn curve_names_by_index() {
        assert_eq!(default_curve_name(0), "Curve A");
        assert_eq!(default_curve_name(25), "Curve Z");
        assert_eq!(default_curve_name(26), "Curve 27");
    }
}

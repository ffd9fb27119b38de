//! Per-curve pointer state machine.
//!
//! A primary press on a point starts a drag, motion moves that point, release
//! ends it. A secondary press on a point deletes it immediately. The
//! controller never touches curve data; it reports `DragAction`s and the
//! owning group applies them.

use crate::algorithms::picking::nearest_point;
use crate::model::Point;
use crate::transform::ScreenPos;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PointerKind {
    Press,
    Motion,
    Release,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Button {
    Primary,
    Secondary,
    Other,
    None,
}

impl Button {
    /// DOM `MouseEvent.button` numbering.
    pub fn from_dom(b: i32) -> Button {
        match b {
            0 => Button::Primary,
            2 => Button::Secondary,
            -1 => Button::None,
            _ => Button::Other,
        }
    }
}

/// A pointer notification from the rendering surface. `data` is absent when
/// the pointer is outside the plotting area.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PointerEvent {
    pub kind: PointerKind,
    pub button: Button,
    pub screen: ScreenPos,
    pub data: Option<Point>,
}

impl PointerEvent {
    pub fn inside(&self) -> bool { self.data.is_some() }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum DragState {
    #[default]
    Idle,
    Dragging { index: usize },
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum DragAction {
    None,
    Delete { index: usize },
    Move { index: usize, x: f64, y: f64 },
}

#[derive(Clone, Debug)]
pub struct DragController {
    state: DragState,
    tol: f64,
}

impl DragController {
    pub fn new(tol: f64) -> Self { DragController { state: DragState::Idle, tol } }
    pub fn state(&self) -> DragState { self.state }
    pub fn is_dragging(&self) -> bool { matches!(self.state, DragState::Dragging { .. }) }

    /// Feed one event. `screen_points` is the curve projected through the
    /// surface transform; only presses look at it.
    pub fn handle(&mut self, ev: &PointerEvent, screen_points: &[ScreenPos]) -> DragAction {
        match ev.kind {
            PointerKind::Press => {
                if !ev.inside() { return DragAction::None; }
                let Some(hit) = nearest_point(ev.screen, screen_points, self.tol) else {
                    return DragAction::None;
                };
                match ev.button {
                    Button::Primary => {
                        self.state = DragState::Dragging { index: hit.index };
                        DragAction::None
                    }
                    Button::Secondary => {
                        self.state = DragState::Idle;
                        DragAction::Delete { index: hit.index }
                    }
                    _ => DragAction::None,
                }
            }
            PointerKind::Motion => {
                let DragState::Dragging { index } = self.state else { return DragAction::None };
                if ev.button != Button::Primary { return DragAction::None; }
                match ev.data {
                    Some(p) if p.x.is_finite() && p.y.is_finite() => DragAction::Move { index, x: p.x, y: p.y },
                    _ => DragAction::None,
                }
            }
            PointerKind::Release => {
                self.state = DragState::Idle;
                DragAction::None
            }
        }
    }

    /// Drop any drag in progress, e.g. after undo replaced the curve.
    pub fn reset(&mut self) { self.state = DragState::Idle; }
}

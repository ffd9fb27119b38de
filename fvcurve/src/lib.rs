pub mod config;
pub mod drag;
pub mod error;
pub mod group;
pub mod history;
pub mod json;
pub mod model;
pub mod registry;
pub mod transform;
pub mod algorithms {
    pub mod picking;
}

pub use config::EditorConfig;
pub use drag::{Button, DragAction, DragController, DragState, PointerEvent, PointerKind};
pub use error::{EditError, EditResult};
pub use group::{CurveGroup, Fanout, LocalEcho, Mutation, Notice, Origin, PlotUpdate, Row, Series, TableUpdate};
pub use history::{shortcut, History, HistoryCommand};
pub use json::{PointRecord, SessionRecord};
pub use model::{Column, Curve, GroupData, Point, PointSet};
pub use registry::{Confirm, Registry};
pub use transform::{LinearTransform, ScreenPos, ScreenTransform};

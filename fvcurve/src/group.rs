//! One curve group: the canonical data, its history, and the fan-out of every
//! edit to the plot, table and text views.
//!
//! Every edit enters through [`CurveGroup::apply`] tagged with the view it
//! came from. `apply` validates, checkpoints the pre-edit state, changes the
//! canonical data and returns a [`Fanout`] holding fresh copies for the other
//! views. `plot`, `table` and `text` never address the origin view. What the
//! originating editor still has to draw for itself (its curve during a drag,
//! rows its buttons added or removed, a normalized cell) goes in `local`.

use crate::algorithms::picking::{pick_curve, project};
use crate::config::{in_coord_bounds, EditorConfig};
use crate::drag::{Button, DragAction, DragController, PointerEvent, PointerKind};
use crate::error::{EditError, EditResult};
use crate::history::{History, HistoryCommand};
use crate::json;
use crate::model::{Column, GroupData, Point};
use crate::transform::ScreenTransform;
use log::{debug, info, warn};
use serde::Serialize;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Origin {
    Plot,
    Table,
    Text,
    History,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Mutation {
    SetCell { curve: usize, row: usize, column: Column, value: i64 },
    InsertRow { curve: usize, row: usize, point: Point },
    RemoveRow { curve: usize, row: usize },
    MovePoint { curve: usize, index: usize, x: f64, y: f64 },
    DeletePoint { curve: usize, index: usize },
    ReplaceAll(Vec<Vec<Point>>),
}

impl Mutation {
    fn curve(&self) -> Option<usize> {
        match self {
            Mutation::SetCell { curve, .. }
            | Mutation::InsertRow { curve, .. }
            | Mutation::RemoveRow { curve, .. }
            | Mutation::MovePoint { curve, .. }
            | Mutation::DeletePoint { curve, .. } => Some(*curve),
            Mutation::ReplaceAll(_) => None,
        }
    }
}

/// Table cells as displayed: integers, frequency then voltage.
pub type Row = [String; 2];

fn row_of(p: &Point) -> Row { [p.freq_mhz().to_string(), p.voltage_mv().to_string()] }

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Series {
    pub name: String,
    pub points: Vec<Point>,
    pub visible: bool,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PlotUpdate {
    Curve { curve: usize, name: String, points: Vec<Point> },
    All { series: Vec<Series> },
    Visibility { curve: usize, visible: bool },
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TableUpdate {
    SetRow { curve: usize, row: usize, cells: Row },
    InsertRow { curve: usize, row: usize, cells: Row },
    RemoveRow { curve: usize, row: usize },
    Repopulate { curve: usize, rows: Vec<Row> },
    /// Rewrite one cell with its rounded value after the user typed it.
    Normalize { curve: usize, row: usize, column: usize, text: String },
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Notice {
    NothingToUndo,
    NothingToRedo,
    Imported { group: String },
}

impl Notice {
    pub fn message(&self) -> String {
        match self {
            Notice::NothingToUndo => "Nothing left to undo.".to_string(),
            Notice::NothingToRedo => "Nothing left to redo.".to_string(),
            Notice::Imported { group } => format!("Group '{}' data updated.", group),
        }
    }
}

/// An update for the editor that originated the change.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "view", content = "update", rename_all = "lowercase")]
pub enum LocalEcho {
    Plot(PlotUpdate),
    Table(TableUpdate),
}

/// View updates produced by one operation.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct Fanout {
    pub origin: Option<Origin>,
    pub plot: Vec<PlotUpdate>,
    pub table: Vec<TableUpdate>,
    pub text: Option<String>,
    pub local: Vec<LocalEcho>,
    pub notice: Option<Notice>,
}

impl Fanout {
    fn notice(n: Notice) -> Self { Fanout { notice: Some(n), ..Default::default() } }
    pub fn is_empty(&self) -> bool {
        self.plot.is_empty() && self.table.is_empty() && self.text.is_none() && self.local.is_empty() && self.notice.is_none()
    }

    /// True when nothing in `plot`, `table` or `text` targets the origin view.
    pub fn skips_origin(&self) -> bool {
        match self.origin {
            Some(Origin::Plot) => self.plot.is_empty(),
            Some(Origin::Table) => self.table.is_empty(),
            Some(Origin::Text) => self.text.is_none(),
            Some(Origin::History) | None => true,
        }
    }
}

pub struct CurveGroup {
    name: String,
    data: GroupData,
    history: History,
    editors: Vec<DragController>,
    visible: Vec<bool>,
    // a drag gesture checkpoints once, on its first move
    drag_checkpointed: bool,
    config: EditorConfig,
}

impl CurveGroup {
    pub fn new(name: impl Into<String>, data: GroupData, config: &EditorConfig) -> Self {
        let n = data.len();
        CurveGroup {
            name: name.into(),
            history: History::new(&data, config.max_history_depth),
            data,
            editors: (0..n).map(|_| DragController::new(config.hit_tolerance_px)).collect(),
            visible: vec![true; n],
            drag_checkpointed: false,
            config: config.clone(),
        }
    }

    pub fn name(&self) -> &str { &self.name }
    pub fn data(&self) -> &GroupData { &self.data }
    pub fn history(&self) -> &History { &self.history }
    pub fn curve_count(&self) -> usize { self.data.len() }
    pub fn is_visible(&self, curve: usize) -> bool { self.visible.get(curve).copied().unwrap_or(false) }
    pub fn editor(&self, curve: usize) -> Option<&DragController> { self.editors.get(curve) }

    pub fn curve_index(&self, name: &str) -> EditResult<usize> {
        self.data.curve_index(name).ok_or_else(|| EditError::UnknownCurve(name.to_string()))
    }

    fn check_curve(&self, curve: usize) -> EditResult<&crate::model::Curve> {
        self.data.curve(curve).ok_or_else(|| EditError::UnknownCurve(format!("#{}", curve)))
    }

    fn validate(&self, m: &Mutation) -> EditResult<()> {
        match m {
            Mutation::SetCell { curve, row, .. } => self.check_curve(*curve)?.points().check_index(*row),
            Mutation::InsertRow { curve, row, .. } => self.check_curve(*curve)?.points().check_insert(*row),
            Mutation::RemoveRow { curve, row } => self.check_curve(*curve)?.points().check_index(*row),
            Mutation::MovePoint { curve, index, .. } | Mutation::DeletePoint { curve, index } => {
                self.check_curve(*curve)?.points().check_index(*index)
            }
            Mutation::ReplaceAll(lists) => {
                if lists.len() != self.data.len() {
                    return Err(EditError::ShapeMismatch { expected: self.data.len(), got: lists.len() });
                }
                Ok(())
            }
        }
    }

    /// Checkpoint, change the canonical data, and build the updates for every
    /// view except `origin`. Nothing changes when validation fails.
    pub fn apply(&mut self, m: Mutation, origin: Origin) -> EditResult<Fanout> {
        self.validate(&m)?;
        match m {
            Mutation::MovePoint { .. } => {
                if !self.drag_checkpointed {
                    self.history.checkpoint(&self.data);
                    self.drag_checkpointed = true;
                }
            }
            _ => {
                self.drag_checkpointed = false;
                self.history.checkpoint(&self.data);
            }
        }
        let table = match &m {
            Mutation::SetCell { curve, row, column, value } => {
                let pts = &mut self.curve_mut(*curve)?.points;
                // a cell edit settles any drag floats left in the row
                let mut p = pts.get(*row).ok_or(EditError::IndexOutOfRange { index: *row, len: pts.len() })?.rounded();
                match column {
                    Column::FreqMhz => p.x = *value as f64,
                    Column::VoltageMv => p.y = *value as f64,
                }
                pts.set_at(*row, p)?;
                vec![TableUpdate::SetRow { curve: *curve, row: *row, cells: row_of(&p) }]
            }
            Mutation::InsertRow { curve, row, point } => {
                self.curve_mut(*curve)?.points.insert_at(*row, *point)?;
                vec![TableUpdate::InsertRow { curve: *curve, row: *row, cells: row_of(point) }]
            }
            Mutation::RemoveRow { curve, row } => {
                self.curve_mut(*curve)?.points.remove_at(*row)?;
                vec![TableUpdate::RemoveRow { curve: *curve, row: *row }]
            }
            Mutation::MovePoint { curve, index, x, y } => {
                let p = Point::new(*x, *y);
                self.curve_mut(*curve)?.points.set_at(*index, p)?;
                vec![TableUpdate::SetRow { curve: *curve, row: *index, cells: row_of(&p) }]
            }
            Mutation::DeletePoint { curve, index } => {
                self.curve_mut(*curve)?.points.remove_at(*index)?;
                vec![TableUpdate::RemoveRow { curve: *curve, row: *index }]
            }
            Mutation::ReplaceAll(lists) => {
                self.data.replace_points(lists.clone());
                self.repopulate_all()
            }
        };
        let mut out = Fanout { origin: Some(origin), ..Default::default() };
        if origin != Origin::Plot {
            out.plot.push(match m.curve() {
                Some(c) => self.curve_update(c),
                None => PlotUpdate::All { series: self.series() },
            });
        }
        if origin != Origin::Table {
            out.table = table;
        }
        if origin != Origin::Text {
            out.text = Some(self.export_text());
        }
        Ok(out)
    }

    fn curve_mut(&mut self, curve: usize) -> EditResult<&mut crate::model::Curve> {
        self.data.curve_mut(curve).ok_or_else(|| EditError::UnknownCurve(format!("#{}", curve)))
    }

    fn curve_update(&self, curve: usize) -> PlotUpdate {
        let c = &self.data.curves()[curve];
        PlotUpdate::Curve { curve, name: c.name().to_string(), points: c.points().as_slice().to_vec() }
    }

    fn repopulate_all(&self) -> Vec<TableUpdate> {
        self.data.curves().iter().enumerate()
            .map(|(curve, c)| TableUpdate::Repopulate { curve, rows: c.points().iter().map(row_of).collect() })
            .collect()
    }

    /// Everything every view needs to redraw from scratch.
    pub fn refresh(&self) -> Fanout {
        Fanout {
            origin: None,
            plot: vec![PlotUpdate::All { series: self.series() }],
            table: self.repopulate_all(),
            text: Some(self.export_text()),
            local: Vec::new(),
            notice: None,
        }
    }

    pub fn series(&self) -> Vec<Series> {
        self.data.curves().iter().zip(&self.visible)
            .map(|(c, v)| Series { name: c.name().to_string(), points: c.points().as_slice().to_vec(), visible: *v })
            .collect()
    }

    pub fn table_rows(&self, curve: usize) -> EditResult<Vec<Row>> {
        Ok(self.check_curve(curve)?.points().iter().map(row_of).collect())
    }

    /// Extents of the visible curves as (minx, miny, maxx, maxy), for autoscale.
    pub fn bounds(&self) -> Option<(f64, f64, f64, f64)> {
        let mut b: Option<(f64, f64, f64, f64)> = None;
        for (c, _) in self.data.curves().iter().zip(&self.visible).filter(|(_, v)| **v) {
            for p in c.points().iter() {
                b = Some(match b {
                    None => (p.x, p.y, p.x, p.y),
                    Some((x0, y0, x1, y1)) => (x0.min(p.x), y0.min(p.y), x1.max(p.x), y1.max(p.y)),
                });
            }
        }
        b
    }

    pub fn export_text(&self) -> String { json::export_text(&self.data) }

    // Table

    pub fn commit_cell(&mut self, curve: usize, row: usize, column: usize, text: &str) -> EditResult<Fanout> {
        let pts = self.check_curve(curve)?.points();
        let p = pts.get(row).ok_or(EditError::IndexOutOfRange { index: row, len: pts.len() })?;
        let col = Column::from_index(column).ok_or(EditError::IndexOutOfRange { index: column, len: 2 })?;
        let value = match text.trim().parse::<f64>() {
            Ok(v) if in_coord_bounds(v) => v.round() as i64,
            _ => {
                let revert = row_of(&p)[column].clone();
                warn!("rejected cell input '{}' for {}[{}].{}", text, self.name, row, col.key());
                return Err(EditError::InvalidNumericInput { text: text.to_string(), revert });
            }
        };
        let mut out = self.apply(Mutation::SetCell { curve, row, column: col, value }, Origin::Table)?;
        let shown = value.to_string();
        if shown != text {
            out.local.push(LocalEcho::Table(TableUpdate::Normalize { curve, row, column, text: shown }));
        }
        Ok(out)
    }

    /// Insert below `selected`, or append when nothing is selected.
    pub fn add_row(&mut self, curve: usize, selected: Option<usize>) -> EditResult<Fanout> {
        let pts = self.check_curve(curve)?.points();
        let row = match selected {
            Some(r) => r.checked_add(1).ok_or(EditError::IndexOutOfRange { index: r, len: pts.len() })?,
            None => pts.len(),
        };
        let point = match row.checked_sub(1).and_then(|i| pts.get(i)) {
            Some(prev) => Point::from_ints(
                prev.freq_mhz() + self.config.add_row_step.0,
                prev.voltage_mv() + self.config.add_row_step.1,
            ),
            None => Point::from_ints(self.config.new_point.0, self.config.new_point.1),
        };
        let mut out = self.apply(Mutation::InsertRow { curve, row, point }, Origin::Table)?;
        out.local.push(LocalEcho::Table(TableUpdate::InsertRow { curve, row, cells: row_of(&point) }));
        Ok(out)
    }

    pub fn remove_row(&mut self, curve: usize, selected: Option<usize>) -> EditResult<Fanout> {
        let row = selected.ok_or(EditError::NoRowSelected)?;
        let mut out = self.apply(Mutation::RemoveRow { curve, row }, Origin::Table)?;
        out.local.push(LocalEcho::Table(TableUpdate::RemoveRow { curve, row }));
        Ok(out)
    }

    // Plot

    /// Route a pointer event to the curve editors. A press goes only to the
    /// visible curve owning the globally nearest point under the pointer.
    pub fn pointer(&mut self, ev: &PointerEvent, t: &dyn ScreenTransform) -> EditResult<Fanout> {
        match ev.kind {
            PointerKind::Press => {
                for e in &mut self.editors { e.reset(); }
                self.drag_checkpointed = false;
                let Some(curve) = self.press_target(ev, t) else { return Ok(Fanout::default()) };
                let screen = project(self.data.curves()[curve].points().as_slice(), t);
                let action = self.editors[curve].handle(ev, &screen);
                self.apply_drag(curve, action)
            }
            PointerKind::Motion => {
                let Some(curve) = self.editors.iter().position(|e| e.is_dragging()) else {
                    return Ok(Fanout::default());
                };
                let action = self.editors[curve].handle(ev, &[]);
                self.apply_drag(curve, action)
            }
            PointerKind::Release => {
                for e in &mut self.editors { e.handle(ev, &[]); }
                self.drag_checkpointed = false;
                Ok(Fanout::default())
            }
        }
    }

    fn press_target(&self, ev: &PointerEvent, t: &dyn ScreenTransform) -> Option<usize> {
        if !ev.inside() || !matches!(ev.button, Button::Primary | Button::Secondary) { return None; }
        let mut best: Option<(usize, f64)> = None;
        for (i, c) in self.data.curves().iter().enumerate() {
            if !self.visible[i] { continue; }
            if let Some(h) = pick_curve(c.points().as_slice(), t, ev.screen, self.config.hit_tolerance_px) {
                if best.map_or(true, |(_, bd)| h.dist < bd) { best = Some((i, h.dist)); }
            }
        }
        best.map(|(i, _)| i)
    }

    fn apply_drag(&mut self, curve: usize, action: DragAction) -> EditResult<Fanout> {
        let m = match action {
            DragAction::None => return Ok(Fanout::default()),
            DragAction::Delete { index } => Mutation::DeletePoint { curve, index },
            DragAction::Move { index, x, y } => Mutation::MovePoint { curve, index, x, y },
        };
        let mut out = self.apply(m, Origin::Plot)?;
        out.local.push(LocalEcho::Plot(self.curve_update(curve)));
        Ok(out)
    }

    pub fn set_curve_visible(&mut self, curve: usize, visible: bool) -> EditResult<Fanout> {
        self.check_curve(curve)?;
        self.visible[curve] = visible;
        if !visible && self.editors[curve].is_dragging() {
            self.editors[curve].reset();
        }
        Ok(Fanout { plot: vec![PlotUpdate::Visibility { curve, visible }], ..Default::default() })
    }

    // Text

    /// Replace all curves from JSON text in one undo step. Any validation
    /// failure leaves everything untouched.
    pub fn import_text(&mut self, text: &str) -> EditResult<Fanout> {
        let lists = match json::parse_point_lists(text, self.data.len(), self.config.max_points_per_curve) {
            Ok(l) => l,
            Err(e) => {
                warn!("import into '{}' rejected: {}", self.name, e);
                return Err(e);
            }
        };
        let mut out = self.apply(Mutation::ReplaceAll(lists), Origin::Text)?;
        info!("imported {} curves into '{}'", self.data.len(), self.name);
        out.notice = Some(Notice::Imported { group: self.name.clone() });
        Ok(out)
    }

    // History

    pub fn undo(&mut self) -> Fanout {
        match self.history.undo(&self.data) {
            Some(state) => self.restore(state),
            None => Fanout::notice(Notice::NothingToUndo),
        }
    }

    pub fn redo(&mut self) -> Fanout {
        match self.history.redo() {
            Some(state) => self.restore(state),
            None => Fanout::notice(Notice::NothingToRedo),
        }
    }

    pub fn run(&mut self, cmd: HistoryCommand) -> Fanout {
        match cmd {
            HistoryCommand::Undo => self.undo(),
            HistoryCommand::Redo => self.redo(),
        }
    }

    fn restore(&mut self, state: GroupData) -> Fanout {
        self.data = state;
        for e in &mut self.editors { e.reset(); }
        self.drag_checkpointed = false;
        debug!("'{}' restored history slot {}", self.name, self.history.pointer());
        Fanout { origin: Some(Origin::History), ..self.refresh() }
    }
}

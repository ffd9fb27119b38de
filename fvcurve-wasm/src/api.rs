use crate::Editor;
use crate::{error, interop, logger};
use fvcurve::{
    shortcut, Button, EditResult, EditorConfig, Fanout, LinearTransform, PointerEvent, PointerKind, Registry,
    ScreenPos,
};
use js_sys::Function;
use wasm_bindgen::prelude::*;
type JsValue = wasm_bindgen::JsValue;

#[wasm_bindgen]
pub fn set_panic_hook() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Route engine logging to the console. `level` is a `log` level name.
#[wasm_bindgen]
pub fn init_logging(level: &str) {
    logger::install(logger::parse_level(level));
}

fn config_from(v: JsValue) -> Result<EditorConfig, JsValue> {
    if v.is_undefined() || v.is_null() {
        return Ok(EditorConfig::default());
    }
    serde_wasm_bindgen::from_value(v).map_err(|e| error::err("invalid_config", e.to_string(), None))
}

fn respond(r: EditResult<Fanout>) -> JsValue {
    match r {
        Ok(f) => match interop::fanout(&f) {
            Ok(v) => error::ok(v),
            Err(e) => e,
        },
        Err(e) => error::from_edit(&e),
    }
}

/// `{ok: true, value}` for a plain serializable value.
fn to_js<T: serde::Serialize>(v: &T) -> JsValue {
    match serde_wasm_bindgen::to_value(v) {
        Ok(v) => error::ok(v),
        Err(e) => error::serialize(e),
    }
}

#[wasm_bindgen]
impl Editor {
    /// `config` is a partial `EditorConfig` object, or undefined for defaults.
    #[wasm_bindgen(constructor)]
    pub fn new(config: JsValue) -> Result<Editor, JsValue> {
        let inner = Registry::new(config_from(config)?).map_err(|e| error::from_edit(&e))?;
        Ok(Editor::rs_new(inner))
    }

    pub fn from_session(config: JsValue, text: &str) -> Result<Editor, JsValue> {
        let inner = Registry::from_session_text(config_from(config)?, text).map_err(|e| error::from_edit(&e))?;
        Ok(Editor::rs_new(inner))
    }

    // Groups
    pub fn group_names(&self) -> JsValue { to_js(&self.inner.names()) }
    pub fn active_group(&self) -> String { self.inner.active_name().to_string() }
    pub fn curve_names(&self) -> JsValue { to_js(&self.inner.active().data().curve_names()) }

    pub fn select_group(&mut self, name: &str) -> JsValue {
        match self.inner.select(name) {
            Ok(()) => respond(Ok(self.inner.active().refresh())),
            Err(e) => error::from_edit(&e),
        }
    }

    /// New "Group n" with the configured default curves; becomes active.
    pub fn add_group(&mut self) -> JsValue {
        respond(self.inner.add_default_group().map(|g| g.refresh()))
    }

    pub fn create_group(&mut self, name: &str) -> JsValue {
        let created = self.inner.default_data().and_then(|d| self.inner.create_group(name, d).map(|g| g.refresh()));
        respond(created)
    }

    /// `confirm(name)` must return `true` for the group to go. The envelope
    /// value says whether it was removed.
    pub fn remove_group(&mut self, name: &str, confirm: &Function) -> JsValue {
        let mut ask = |g: &str| {
            confirm.call1(&JsValue::NULL, &JsValue::from_str(g)).ok().and_then(|v| v.as_bool()).unwrap_or(false)
        };
        match self.inner.remove_group(name, &mut ask) {
            Ok(removed) => error::ok(JsValue::from_bool(removed)),
            Err(e) => error::from_edit(&e),
        }
    }

    pub fn export_session(&self) -> String { self.inner.export_session_text() }

    // Plot
    #[allow(clippy::too_many_arguments)]
    pub fn set_plot_transform(
        &mut self,
        x_min: f64,
        x_max: f64,
        y_min: f64,
        y_max: f64,
        left: f64,
        top: f64,
        width: f64,
        height: f64,
    ) -> JsValue {
        let params = [
            ("x_min", x_min), ("x_max", x_max), ("y_min", y_min), ("y_max", y_max),
            ("left", left), ("top", top), ("width", width), ("height", height),
        ];
        if let Some((name, _)) = params.iter().find(|(_, v)| !v.is_finite()) {
            return error::non_finite(name);
        }
        let t = LinearTransform { x_min, x_max, y_min, y_max, left, top, width, height };
        if !t.is_valid() {
            return error::err("degenerate_transform", "axis ranges and plot size must be non-empty", None);
        }
        self.view = Some(t);
        error::ok(JsValue::NULL)
    }

    /// One pointer notification in surface pixels. `button` uses DOM
    /// numbering (0 primary, 2 secondary, -1 none held).
    pub fn pointer(&mut self, kind: &str, button: i32, sx: f64, sy: f64) -> JsValue {
        let Some(t) = self.view else { return error::no_transform() };
        let kind = match kind {
            "press" => PointerKind::Press,
            "motion" => PointerKind::Motion,
            "release" => PointerKind::Release,
            other => return error::invalid_kind(other),
        };
        if !sx.is_finite() { return error::non_finite("sx"); }
        if !sy.is_finite() { return error::non_finite("sy"); }
        let screen = ScreenPos { x: sx, y: sy };
        let ev = PointerEvent { kind, button: Button::from_dom(button), screen, data: t.data_at(screen) };
        respond(self.inner.active_mut().pointer(&ev, &t))
    }

    pub fn set_curve_visible(&mut self, curve: u32, visible: bool) -> JsValue {
        respond(self.inner.active_mut().set_curve_visible(curve as usize, visible))
    }

    /// `[min_x, min_y, max_x, max_y]` over visible curves, or null.
    pub fn bounds(&self) -> JsValue {
        match self.inner.active().bounds() {
            Some((x0, y0, x1, y1)) => interop::arr_f64(&[x0, y0, x1, y1]).into(),
            None => JsValue::NULL,
        }
    }

    // Table
    pub fn table_rows(&self, curve: u32) -> JsValue {
        match self.inner.active().table_rows(curve as usize) {
            Ok(rows) => to_js(&rows),
            Err(e) => error::from_edit(&e),
        }
    }

    pub fn commit_cell(&mut self, curve: u32, row: u32, column: u32, text: &str) -> JsValue {
        respond(self.inner.active_mut().commit_cell(curve as usize, row as usize, column as usize, text))
    }

    pub fn add_row(&mut self, curve: u32, selected: Option<u32>) -> JsValue {
        respond(self.inner.active_mut().add_row(curve as usize, selected.map(|r| r as usize)))
    }

    pub fn remove_row(&mut self, curve: u32, selected: Option<u32>) -> JsValue {
        respond(self.inner.active_mut().remove_row(curve as usize, selected.map(|r| r as usize)))
    }

    // Text
    pub fn import_text(&mut self, text: &str) -> JsValue { respond(self.inner.active_mut().import_text(text)) }
    pub fn export_text(&self) -> String { self.inner.active().export_text() }

    // History
    pub fn undo(&mut self) -> JsValue { respond(Ok(self.inner.active_mut().undo())) }
    pub fn redo(&mut self) -> JsValue { respond(Ok(self.inner.active_mut().redo())) }

    /// Apply an undo/redo shortcut. Keys that are not shortcuts yield `ok(null)`.
    pub fn key_down(&mut self, key: &str, ctrl_or_meta: bool, shift: bool) -> JsValue {
        match shortcut(key, ctrl_or_meta, shift) {
            Some(cmd) => respond(Ok(self.inner.active_mut().run(cmd))),
            None => error::ok(JsValue::NULL),
        }
    }

    pub fn history_len(&self) -> u32 { self.inner.active().history().len() as u32 }
    pub fn can_undo(&self) -> bool { self.inner.active().history().can_undo() }
    pub fn can_redo(&self) -> bool { self.inner.active().history().can_redo() }

    /// Full redraw of every view for the active group.
    pub fn refresh(&self) -> JsValue { respond(Ok(self.inner.active().refresh())) }
}

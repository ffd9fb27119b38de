use crate::interop::{new_obj, set_kv};
use fvcurve::EditError;
use wasm_bindgen::prelude::*;

pub fn ok(v: JsValue) -> JsValue {
    let o = new_obj();
    set_kv(&o, "ok", &JsValue::from_bool(true));
    set_kv(&o, "value", &v);
    o.into()
}

pub fn err(code: &'static str, message: impl Into<String>, data: Option<JsValue>) -> JsValue {
    let root = new_obj();
    set_kv(&root, "ok", &JsValue::from_bool(false));
    let e = new_obj();
    set_kv(&e, "code", &JsValue::from_str(code));
    set_kv(&e, "message", &JsValue::from_str(&message.into()));
    if let Some(d) = data { set_kv(&e, "data", &d); }
    set_kv(&root, "error", &e.into());
    root.into()
}

/// Envelope for an engine error. `data` carries what a host needs to recover,
/// e.g. the text to put back into a rejected cell.
pub fn from_edit(e: &EditError) -> JsValue {
    let d = new_obj();
    let data = match e {
        EditError::IndexOutOfRange { index, len } => {
            set_kv(&d, "index", &JsValue::from_f64(*index as f64));
            set_kv(&d, "len", &JsValue::from_f64(*len as f64));
            true
        }
        EditError::InvalidNumericInput { text, revert } => {
            set_kv(&d, "text", &JsValue::from_str(text));
            set_kv(&d, "revert", &JsValue::from_str(revert));
            true
        }
        EditError::ShapeMismatch { expected, got } => {
            set_kv(&d, "expected", &JsValue::from_f64(*expected as f64));
            set_kv(&d, "got", &JsValue::from_f64(*got as f64));
            true
        }
        EditError::DuplicateName(name) | EditError::UnknownGroup(name) | EditError::UnknownCurve(name) => {
            set_kv(&d, "name", &JsValue::from_str(name));
            true
        }
        EditError::MalformedImport(_) | EditError::LastGroup | EditError::NoRowSelected => false,
    };
    err(e.code(), e.to_string(), data.then(|| d.into()))
}

#[inline]
pub fn non_finite(param: &str) -> JsValue {
    let d = new_obj(); set_kv(&d, "param", &JsValue::from_str(param));
    err("non_finite", format!("parameter '{}' must be finite", param), Some(d.into()))
}

#[inline]
pub fn invalid_kind(got: &str) -> JsValue {
    let d = new_obj(); set_kv(&d, "got", &JsValue::from_str(got));
    err("invalid_kind", "pointer kind must be 'press', 'motion' or 'release'", Some(d.into()))
}

#[inline]
pub fn no_transform() -> JsValue {
    err("no_transform", "set_plot_transform must be called before pointer events", None)
}

pub fn serialize(e: impl std::fmt::Display) -> JsValue { err("serialize", e.to_string(), None) }

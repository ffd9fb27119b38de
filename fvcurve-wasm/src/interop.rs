use fvcurve::Fanout;
use js_sys::{Float64Array, Object, Reflect};
use wasm_bindgen::{JsCast, JsValue};

pub fn new_obj() -> Object { Object::new() }
pub fn set_kv(obj: &Object, k: &str, v: &JsValue) {
    let _ = Reflect::set(obj, &JsValue::from_str(k), v);
}
pub fn arr_f64(slice: &[f64]) -> Float64Array {
    let arr = Float64Array::new_with_length(slice.len() as u32);
    arr.copy_from(slice); arr
}

/// Serialize a fan-out for the host. A notice also gets its display text
/// under `notice_message`.
pub fn fanout(f: &Fanout) -> Result<JsValue, JsValue> {
    let v = serde_wasm_bindgen::to_value(f).map_err(crate::error::serialize)?;
    if let Some(n) = &f.notice {
        if let Some(obj) = v.dyn_ref::<Object>() {
            set_kv(obj, "notice_message", &JsValue::from_str(&n.message()));
        }
    }
    Ok(v)
}

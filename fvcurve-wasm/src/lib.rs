use wasm_bindgen::prelude::*;
mod api;
mod error;
mod interop;
mod logger;

/// Host-facing editor: every group of the session plus the plot transform
/// last reported by the rendering surface.
#[wasm_bindgen]
pub struct Editor {
    pub(crate) inner: fvcurve::Registry,
    pub(crate) view: Option<fvcurve::LinearTransform>,
}

impl Editor {
    pub fn rs_new(inner: fvcurve::Registry) -> Editor { Editor { inner, view: None } }
    pub fn rs_registry(&self) -> &fvcurve::Registry { &self.inner }
}

//! JavaScript function adapter for crop state change notifications.

use cropstate_core::{CropObserver, CropState};
use wasm_bindgen::prelude::*;

/// Calls a JS function as `callback(rectChanged)` on every change.
///
/// A callback that throws is reported to the browser console and otherwise
/// ignored, so a broken listener cannot abort the mutation that triggered it.
pub(crate) struct JsObserver {
    callback: js_sys::Function,
}

impl JsObserver {
    pub(crate) fn new(callback: js_sys::Function) -> Self {
        Self { callback }
    }
}

impl CropObserver for JsObserver {
    fn on_crop_changed(&self, _state: &CropState, rect_changed: bool) {
        if let Err(err) = self
            .callback
            .call1(&JsValue::NULL, &JsValue::from_bool(rect_changed))
        {
            web_sys::console::warn_2(&JsValue::from_str("Crop state observer threw:"), &err);
        }
    }
}

//! Crop state WASM bindings.
//!
//! This module provides JavaScript bindings for the core `CropState` type so
//! the crop UI can hold, mutate and persist its state on the Rust side.

use std::rc::Rc;

use cropstate_core::CropState;
use wasm_bindgen::prelude::*;

use crate::observer::JsObserver;

/// Crop state wrapper for JavaScript
#[wasm_bindgen]
pub struct JsCropState {
    inner: CropState,
}

#[wasm_bindgen]
impl JsCropState {
    /// Create a full-frame state with no rotation and no flags
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self {
            inner: CropState::new(),
        }
    }

    /// Create a state from exact values (no validation)
    #[wasm_bindgen(js_name = withValues)]
    pub fn with_values(
        left: f64,
        top: f64,
        right: f64,
        bottom: f64,
        rotate_by: i32,
        degrees_around_center: f32,
        flags: i32,
    ) -> Self {
        Self {
            inner: CropState::with_values(
                left,
                top,
                right,
                bottom,
                rotate_by,
                degrees_around_center,
                flags,
            ),
        }
    }

    /// Parse the colon-delimited form.
    ///
    /// Returns `undefined` for empty or malformed input.
    pub fn parse(input: &str) -> Option<JsCropState> {
        CropState::parse(input).map(|inner| Self { inner })
    }

    /// Serialize to the colon-delimited form
    #[wasm_bindgen(js_name = toString)]
    pub fn to_js_string(&self) -> String {
        self.inner.to_string()
    }

    /// Copy another state without consuming it
    #[wasm_bindgen(js_name = clone)]
    pub fn duplicate(&self) -> JsCropState {
        Self {
            inner: CropState::from_state(Some(&self.inner)),
        }
    }

    /// Get left edge
    #[wasm_bindgen(getter)]
    pub fn left(&self) -> f64 {
        self.inner.left()
    }

    /// Get top edge
    #[wasm_bindgen(getter)]
    pub fn top(&self) -> f64 {
        self.inner.top()
    }

    /// Get right edge
    #[wasm_bindgen(getter)]
    pub fn right(&self) -> f64 {
        self.inner.right()
    }

    /// Get bottom edge
    #[wasm_bindgen(getter)]
    pub fn bottom(&self) -> f64 {
        self.inner.bottom()
    }

    /// Discrete rotation in degrees
    #[wasm_bindgen(getter)]
    pub fn rotation(&self) -> i32 {
        self.inner.rotation()
    }

    /// Get fine rotation in degrees
    #[wasm_bindgen(getter, js_name = degreesAroundCenter)]
    pub fn degrees_around_center(&self) -> f32 {
        self.inner.degrees_around_center()
    }

    /// Get flag bits
    #[wasm_bindgen(getter)]
    pub fn flags(&self) -> i32 {
        self.inner.flags()
    }

    /// Set the crop rectangle
    #[wasm_bindgen(js_name = setRect)]
    pub fn set_rect(&mut self, left: f64, top: f64, right: f64, bottom: f64) {
        self.inner.set_rect(left, top, right, bottom);
    }

    /// Add degrees to the discrete rotation, returning the value in [0, 360)
    #[wasm_bindgen(js_name = rotateBy)]
    pub fn rotate_by(&mut self, delta: i32) -> i32 {
        self.inner.rotate_by(delta)
    }

    /// Set fine rotation in degrees
    #[wasm_bindgen(js_name = setDegreesAroundCenter)]
    pub fn set_degrees_around_center(&mut self, degrees: f32) {
        self.inner.set_degrees_around_center(degrees);
    }

    /// Set flag bits
    #[wasm_bindgen(js_name = setFlags)]
    pub fn set_flags(&mut self, flags: i32) {
        self.inner.set_flags(flags);
    }

    /// Overwrite every value from another state
    pub fn set(&mut self, copy: &JsCropState) {
        self.inner.set(Some(&copy.inner));
    }

    /// Reset to the full-frame default
    pub fn reset(&mut self) {
        self.inner.reset();
    }

    /// Check if the state leaves the image untouched
    #[wasm_bindgen(js_name = isEmpty)]
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Check if the crop rectangle is the full frame
    #[wasm_bindgen(js_name = isRegionEmpty)]
    pub fn is_region_empty(&self) -> bool {
        self.inner.is_region_empty()
    }

    /// Get crop width (right - left)
    #[wasm_bindgen(js_name = regionWidth)]
    pub fn region_width(&self) -> f64 {
        self.inner.region_width()
    }

    /// Get crop height (bottom - top)
    #[wasm_bindgen(js_name = regionHeight)]
    pub fn region_height(&self) -> f64 {
        self.inner.region_height()
    }

    /// Check if either rotation is nonzero
    #[wasm_bindgen(js_name = hasRotations)]
    pub fn has_rotations(&self) -> bool {
        self.inner.has_rotations()
    }

    /// Check if every bit of the mask is set
    #[wasm_bindgen(js_name = hasFlag)]
    pub fn has_flag(&self, flag: i32) -> bool {
        self.inner.has_flag(flag)
    }

    /// True only when both mirror flags are set
    #[wasm_bindgen(js_name = needMirror)]
    pub fn need_mirror(&self) -> bool {
        self.inner.need_mirror()
    }

    /// Check the horizontal mirror flag
    #[wasm_bindgen(js_name = needMirrorHorizontally)]
    pub fn need_mirror_horizontally(&self) -> bool {
        self.inner.need_mirror_horizontally()
    }

    /// Check the vertical mirror flag
    #[wasm_bindgen(js_name = needMirrorVertically)]
    pub fn need_mirror_vertically(&self) -> bool {
        self.inner.need_mirror_vertically()
    }

    /// Exact comparison of every value
    pub fn compare(&self, other: &JsCropState) -> bool {
        self.inner.compare(Some(&other.inner))
    }

    /// Register `callback(rectChanged)`, replacing any previous observer
    #[wasm_bindgen(js_name = setObserver)]
    pub fn set_observer(&mut self, callback: js_sys::Function) {
        self.inner.set_observer(Rc::new(JsObserver::new(callback)));
    }

    /// Remove the observer
    #[wasm_bindgen(js_name = clearObserver)]
    pub fn clear_observer(&mut self) {
        self.inner.clear_observer();
    }

    /// Check if an observer is registered
    #[wasm_bindgen(getter, js_name = hasObserver)]
    pub fn has_observer(&self) -> bool {
        self.inner.has_observer()
    }

    /// Convert to a plain JS object
    #[wasm_bindgen(js_name = toObject)]
    pub fn to_object(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(&self.inner).map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Build from a plain JS object, missing fields take their defaults
    #[wasm_bindgen(js_name = fromObject)]
    pub fn from_object(value: JsValue) -> Result<JsCropState, JsValue> {
        let inner: CropState =
            serde_wasm_bindgen::from_value(value).map_err(|e| JsValue::from_str(&e.to_string()))?;
        Ok(Self { inner })
    }
}

impl Default for JsCropState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cropstate_core::{FLAG_MIRROR_HORIZONTALLY, FLAG_MIRROR_VERTICALLY};

    #[test]
    fn test_new_is_empty() {
        let state = JsCropState::new();
        assert!(state.is_empty());
        assert!(state.is_region_empty());
        assert!(!state.has_rotations());
        assert!(!state.has_observer());
    }

    #[test]
    fn test_parse_and_to_string() {
        let state = JsCropState::parse("0.25:0.0:0.75:1.0:90:1.5:3").unwrap();
        assert_eq!(state.left(), 0.25);
        assert_eq!(state.right(), 0.75);
        assert_eq!(state.rotation(), 90);
        assert_eq!(state.degrees_around_center(), 1.5);
        assert_eq!(state.flags(), 3);
        assert_eq!(state.to_js_string(), "0.25:0.0:0.75:1.0:90:1.5:3");
    }

    #[test]
    fn test_parse_rejects_bad_input() {
        assert!(JsCropState::parse("").is_none());
        assert!(JsCropState::parse("1:2:3").is_none());
        assert!(JsCropState::parse("a:0:1:1:0:0").is_none());
    }

    #[test]
    fn test_rotate_by_wraps() {
        let mut state = JsCropState::new();
        assert_eq!(state.rotate_by(370), 10);
        assert_eq!(state.rotate_by(-20), 350);
        assert_eq!(state.rotation(), 350);
    }

    #[test]
    fn test_mirror_predicates() {
        let mut state = JsCropState::new();
        state.set_flags(FLAG_MIRROR_HORIZONTALLY);
        assert!(state.need_mirror_horizontally());
        assert!(!state.need_mirror());

        state.set_flags(FLAG_MIRROR_HORIZONTALLY | FLAG_MIRROR_VERTICALLY);
        assert!(state.need_mirror());
        assert!(state.has_flag(FLAG_MIRROR_VERTICALLY));
    }

    #[test]
    fn test_set_and_compare() {
        let source = JsCropState::with_values(0.1, 0.2, 0.3, 0.4, 180, 2.0, 1);
        let mut state = JsCropState::new();
        assert!(!state.compare(&source));

        state.set(&source);
        assert!(state.compare(&source));

        state.reset();
        assert!(state.is_empty());
    }

    #[test]
    fn test_duplicate_is_independent() {
        let mut state = JsCropState::new();
        let copy = state.duplicate();
        state.set_rect(0.0, 0.0, 0.5, 0.5);

        assert!(copy.is_region_empty());
        assert_eq!(state.region_width(), 0.5);
        assert_eq!(state.region_height(), 0.5);
    }
}

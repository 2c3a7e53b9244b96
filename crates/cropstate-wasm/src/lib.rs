//! Cropstate WASM - WebAssembly bindings for cropstate
//!
//! This crate exposes the cropstate-core value object to JavaScript/TypeScript
//! so a web crop editor can keep and persist its state in Rust.
//!
//! # Module Structure
//!
//! - `crop_state` - `JsCropState`, the JS-facing crop state wrapper
//! - `observer` - Adapter that forwards change notifications to a JS function
//!
//! # Usage
//!
//! ```typescript
//! import init, { JsCropState } from '@cropstate/wasm';
//!
//! await init();
//!
//! const state = JsCropState.parse(localStorage.getItem('crop') ?? '') ?? new JsCropState();
//! state.setObserver((rectChanged) => redraw(rectChanged));
//! state.rotateBy(90);
//! localStorage.setItem('crop', state.toString());
//! ```

use wasm_bindgen::prelude::*;

mod crop_state;
mod observer;

// Re-export public types
pub use crop_state::JsCropState;

/// Bit for mirroring along the vertical axis
#[wasm_bindgen(js_name = FLAG_MIRROR_HORIZONTALLY)]
pub fn flag_mirror_horizontally() -> i32 {
    cropstate_core::FLAG_MIRROR_HORIZONTALLY
}

/// Bit for mirroring along the horizontal axis
#[wasm_bindgen(js_name = FLAG_MIRROR_VERTICALLY)]
pub fn flag_mirror_vertically() -> i32 {
    cropstate_core::FLAG_MIRROR_VERTICALLY
}

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

//! Cropstate Core - crop, rotation and mirror state for image editors
//!
//! This crate provides the value object that an image editor keeps while the
//! user crops, rotates and mirrors a picture, together with the compact text
//! form used to persist it between sessions.
//!
//! # Module Structure
//!
//! - `crop` - The `CropState` value object and the mirror flag constants
//! - `codec` - Colon-delimited text serialization and its parse error
//! - `observer` - Optional change notification hook
//!
//! # Coordinate System
//!
//! - Crop coordinates are normalized (0.0 to 1.0) relative to image dimensions
//! - Origin is top-left corner
//! - Discrete rotation is whole degrees in [0, 360)

pub mod codec;
pub mod crop;
pub mod observer;

pub use codec::ParseCropStateError;
pub use crop::{CropState, FLAG_MIRROR_HORIZONTALLY, FLAG_MIRROR_VERTICALLY};
pub use observer::{ChangeRecorder, CropObserver};

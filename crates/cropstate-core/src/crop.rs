//! Crop, rotation and mirror state of an image.
//!
//! A `CropState` describes what an editor applies to a source image:
//!
//! - a crop rectangle in normalized coordinates (0.0 to 1.0)
//! - a discrete rotation in whole degrees, kept in [0, 360)
//! - a fine rotation around the image center, in degrees
//! - mirror flags
//!
//! Values are stored as given. Nothing here clamps the rectangle or checks
//! that `left < right`, callers that need those guarantees validate first.
//!
//! # Threading
//!
//! The observer handle is an `Rc`, so a state is owned by one thread (in
//! practice the crop UI controller that mutates it).

use std::fmt;
use std::ptr;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

use crate::observer::CropObserver;

/// Mirror the image along the vertical axis.
pub const FLAG_MIRROR_HORIZONTALLY: i32 = 1;
/// Mirror the image along the horizontal axis.
pub const FLAG_MIRROR_VERTICALLY: i32 = 1 << 1;

/// Full circle used to normalize discrete rotation.
const FULL_TURN: i64 = 360;

/// Geometric transform state of an image crop.
///
/// Equality compares the value fields exactly (no epsilon) and ignores any
/// attached observer.
#[derive(Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CropState {
    left: f64,
    top: f64,
    right: f64,
    bottom: f64,
    rotate_by: i32,
    degrees_around_center: f32,
    flags: i32,
    #[serde(skip)]
    observer: Option<Rc<dyn CropObserver>>,
}

impl Default for CropState {
    fn default() -> Self {
        Self {
            left: 0.0,
            top: 0.0,
            right: 1.0,
            bottom: 1.0,
            rotate_by: 0,
            degrees_around_center: 0.0,
            flags: 0,
            observer: None,
        }
    }
}

impl CropState {
    /// Create a full-frame state with no rotation and no flags.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a state from exact values. No validation or normalization is
    /// performed, `rotate_by` is stored as given.
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
            left,
            top,
            right,
            bottom,
            rotate_by,
            degrees_around_center,
            flags,
            observer: None,
        }
    }

    /// Copy the values of `copy`, or start from defaults when it is `None`.
    ///
    /// The result has no observer attached.
    pub fn from_state(copy: Option<&CropState>) -> Self {
        let mut state = Self::default();
        state.set(copy);
        state
    }

    /// Attach an observer, consuming and returning the state.
    pub fn with_observer(mut self, observer: Rc<dyn CropObserver>) -> Self {
        self.observer = Some(observer);
        self
    }

    /// Attach an observer, replacing any previous one.
    pub fn set_observer(&mut self, observer: Rc<dyn CropObserver>) {
        self.observer = Some(observer);
    }

    /// Detach the observer, returning it if one was attached.
    pub fn clear_observer(&mut self) -> Option<Rc<dyn CropObserver>> {
        self.observer.take()
    }

    /// True if an observer is attached.
    pub fn has_observer(&self) -> bool {
        self.observer.is_some()
    }

    /// Overwrite every value field from `copy`, or reset to defaults when it
    /// is `None`. The attached observer is kept and not notified.
    pub fn set(&mut self, copy: Option<&CropState>) {
        match copy {
            Some(copy) => self.copy_values(copy),
            None => self.copy_values(&Self::default()),
        }
    }

    /// Reset to the full-frame default, keeping the observer.
    pub fn reset(&mut self) {
        self.set(None);
    }

    fn copy_values(&mut self, from: &CropState) {
        self.left = from.left;
        self.top = from.top;
        self.right = from.right;
        self.bottom = from.bottom;
        self.rotate_by = from.rotate_by;
        self.degrees_around_center = from.degrees_around_center;
        self.flags = from.flags;
    }

    /// Left edge of the crop rectangle.
    pub fn left(&self) -> f64 {
        self.left
    }

    /// Top edge of the crop rectangle.
    pub fn top(&self) -> f64 {
        self.top
    }

    /// Right edge of the crop rectangle.
    pub fn right(&self) -> f64 {
        self.right
    }

    /// Bottom edge of the crop rectangle.
    pub fn bottom(&self) -> f64 {
        self.bottom
    }

    /// Discrete rotation in degrees.
    pub fn rotation(&self) -> i32 {
        self.rotate_by
    }

    /// Fine rotation around the image center, in degrees.
    pub fn degrees_around_center(&self) -> f32 {
        self.degrees_around_center
    }

    /// Raw flag bits.
    pub fn flags(&self) -> i32 {
        self.flags
    }

    /// True if the crop rectangle is exactly the full frame.
    pub fn is_region_empty(&self) -> bool {
        self.left == 0.0 && self.top == 0.0 && self.right == 1.0 && self.bottom == 1.0
    }

    /// True if applying this state would leave the image untouched.
    pub fn is_empty(&self) -> bool {
        self.is_region_empty()
            && self.rotate_by == 0
            && self.degrees_around_center == 0.0
            && self.flags == 0
    }

    /// `right - left`, negative for an inverted rectangle.
    pub fn region_width(&self) -> f64 {
        self.right - self.left
    }

    /// `bottom - top`, negative for an inverted rectangle.
    pub fn region_height(&self) -> f64 {
        self.bottom - self.top
    }

    /// True if either rotation is nonzero.
    pub fn has_rotations(&self) -> bool {
        self.rotate_by != 0 || self.degrees_around_center != 0.0
    }

    /// True if every bit of `flag` is set.
    pub fn has_flag(&self, flag: i32) -> bool {
        self.flags & flag == flag
    }

    /// True only when both mirror bits are set at once.
    ///
    /// Use [`need_mirror_horizontally`](Self::need_mirror_horizontally) or
    /// [`need_mirror_vertically`](Self::need_mirror_vertically) for a single
    /// axis.
    pub fn need_mirror(&self) -> bool {
        self.has_flag(FLAG_MIRROR_HORIZONTALLY | FLAG_MIRROR_VERTICALLY)
    }

    /// True if the horizontal mirror bit is set.
    pub fn need_mirror_horizontally(&self) -> bool {
        self.has_flag(FLAG_MIRROR_HORIZONTALLY)
    }

    /// True if the vertical mirror bit is set.
    pub fn need_mirror_vertically(&self) -> bool {
        self.has_flag(FLAG_MIRROR_VERTICALLY)
    }

    /// Replace the flags. Never notifies the observer.
    pub fn set_flags(&mut self, flags: i32) {
        self.flags = flags;
    }

    /// Exact field-wise comparison. `None` compares equal to an empty state.
    pub fn compare(&self, other: Option<&CropState>) -> bool {
        let Some(other) = other else {
            return self.is_empty();
        };
        self.left == other.left
            && self.top == other.top
            && self.right == other.right
            && self.bottom == other.bottom
            && self.rotate_by == other.rotate_by
            && self.degrees_around_center == other.degrees_around_center
            && self.flags == other.flags
    }

    /// Add `delta` degrees to the discrete rotation and return the result,
    /// normalized into [0, 360).
    ///
    /// Notifies only when the stored rotation changes. The rectangle is
    /// reported as changed when the region is not square.
    pub fn rotate_by(&mut self, delta: i32) -> i32 {
        let rotate_by =
            (i64::from(self.rotate_by) + i64::from(delta)).rem_euclid(FULL_TURN) as i32;
        if self.rotate_by != rotate_by {
            self.rotate_by = rotate_by;
            self.invoke_callbacks(self.region_width() != self.region_height());
        }
        rotate_by
    }

    /// Replace the fine rotation. Notifies only on change, never as a rect change.
    pub fn set_degrees_around_center(&mut self, degrees_around_center: f32) {
        if self.degrees_around_center != degrees_around_center {
            self.degrees_around_center = degrees_around_center;
            self.invoke_callbacks(false);
        }
    }

    /// Replace the crop rectangle. Notifies only if any edge differs.
    pub fn set_rect(&mut self, left: f64, top: f64, right: f64, bottom: f64) {
        if self.left != left || self.top != top || self.right != right || self.bottom != bottom {
            self.left = left;
            self.top = top;
            self.right = right;
            self.bottom = bottom;
            self.invoke_callbacks(true);
        }
    }

    fn invoke_callbacks(&self, rect_changed: bool) {
        if let Some(observer) = &self.observer {
            tracing::trace!(rect_changed, state = %self, "crop state changed");
            observer.on_crop_changed(self, rect_changed);
        }
    }
}

impl PartialEq for CropState {
    fn eq(&self, other: &Self) -> bool {
        ptr::eq(self, other) || self.compare(Some(other))
    }
}

impl fmt::Debug for CropState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CropState")
            .field("left", &self.left)
            .field("top", &self.top)
            .field("right", &self.right)
            .field("bottom", &self.bottom)
            .field("rotate_by", &self.rotate_by)
            .field("degrees_around_center", &self.degrees_around_center)
            .field("flags", &self.flags)
            .field("has_observer", &self.observer.is_some())
            .finish()
    }
}


// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod proptests {
    use super::*;
    use crate::observer::ChangeRecorder;
    use proptest::prelude::*;

    /// Strategy for generating normalized crop rectangles.
    fn rect_strategy() -> impl Strategy<Value = (f64, f64, f64, f64)> {
        (
            0.0f64..=1.0, // left
            0.0f64..=1.0, // top
            0.0f64..=1.0, // right
            0.0f64..=1.0, // bottom
        )
    }

    proptest! {
        /// Property: Discrete rotation always lands in [0, 360).
        #[test]
        fn prop_rotation_normalized(start in any::<i32>(), delta in any::<i32>()) {
            let mut state = CropState::with_values(0.0, 0.0, 1.0, 1.0, start, 0.0, 0);
            let rotation = state.rotate_by(delta);

            prop_assert!((0..360).contains(&rotation));
            prop_assert_eq!(rotation, state.rotation());
        }

        /// Property: Rotating by a delta and back restores the rotation.
        #[test]
        fn prop_rotation_inverse(start in 0i32..360, delta in -100_000i32..100_000) {
            let mut state = CropState::with_values(0.0, 0.0, 1.0, 1.0, start, 0.0, 0);
            state.rotate_by(delta);
            prop_assert_eq!(state.rotate_by(-delta), start);
        }

        /// Property: set_rect notifies exactly when an edge differs.
        #[test]
        fn prop_set_rect_change_detection(
            (left, top, right, bottom) in rect_strategy(),
        ) {
            let recorder = Rc::new(ChangeRecorder::new());
            let mut state = CropState::new().with_observer(recorder.clone());
            let differs = left != 0.0 || top != 0.0 || right != 1.0 || bottom != 1.0;

            state.set_rect(left, top, right, bottom);
            prop_assert_eq!(recorder.len(), usize::from(differs));

            state.set_rect(left, top, right, bottom);
            prop_assert_eq!(recorder.len(), usize::from(differs));
        }

        /// Property: Region size is the plain difference of the edges.
        #[test]
        fn prop_region_size(
            (left, top, right, bottom) in rect_strategy(),
        ) {
            let state = CropState::with_values(left, top, right, bottom, 0, 0.0, 0);
            prop_assert_eq!(state.region_width(), right - left);
            prop_assert_eq!(state.region_height(), bottom - top);
        }

        /// Property: compare(None) agrees with is_empty.
        #[test]
        fn prop_compare_none_is_empty(
            (left, top, right, bottom) in rect_strategy(),
            rotate_by in 0i32..360,
            flags in 0i32..4,
        ) {
            let state = CropState::with_values(left, top, right, bottom, rotate_by, 0.0, flags);
            prop_assert_eq!(state.compare(None), state.is_empty());
        }

        /// Property: has_flag is a subset test.
        #[test]
        fn prop_has_flag_subset(flags in any::<i32>(), mask in any::<i32>()) {
            let state = CropState::with_values(0.0, 0.0, 1.0, 1.0, 0, 0.0, flags);
            prop_assert_eq!(state.has_flag(mask), flags & mask == mask);
        }
    }
}

//! Change notification for crop state.
//!
//! A `CropState` has no listener unless the owning controller attaches one.
//! Mutators that detect a real change call the observer with a single flag
//! telling whether the crop rectangle shape may have changed.

use std::cell::RefCell;

use crate::crop::CropState;

/// Receives change notifications from a [`CropState`].
///
/// Notifications are delivered synchronously from inside the mutating call,
/// after the new values have been stored.
pub trait CropObserver {
    /// Called after `state` changed.
    ///
    /// `rect_changed` is true when the crop rectangle was replaced, or when a
    /// discrete rotation turned a non-square region on its side.
    fn on_crop_changed(&self, state: &CropState, rect_changed: bool);
}

impl<F> CropObserver for F
where
    F: Fn(&CropState, bool),
{
    fn on_crop_changed(&self, state: &CropState, rect_changed: bool) {
        self(state, rect_changed)
    }
}

/// Observer that remembers the `rect_changed` flag of every notification.
#[derive(Debug, Default)]
pub struct ChangeRecorder {
    events: RefCell<Vec<bool>>,
}

impl ChangeRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// All recorded flags, oldest first.
    pub fn events(&self) -> Vec<bool> {
        self.events.borrow().clone()
    }

    /// Number of notifications received.
    pub fn len(&self) -> usize {
        self.events.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.borrow().is_empty()
    }

    /// Number of notifications that reported a rectangle change.
    pub fn rect_changes(&self) -> usize {
        self.events.borrow().iter().filter(|&&changed| changed).count()
    }

    /// Drain the recorded flags.
    pub fn take(&self) -> Vec<bool> {
        self.events.take()
    }
}

impl CropObserver for ChangeRecorder {
    fn on_crop_changed(&self, _state: &CropState, rect_changed: bool) {
        self.events.borrow_mut().push(rect_changed);
    }
}

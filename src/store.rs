//! Where an entity's color lives between mutations.

use floem_reactive::{RwSignal, SignalGet, SignalUpdate};

use crate::color::ColorValue;

/// Holds one color and publishes every write.
///
/// Writes only ever carry complete, validated values.
pub trait ColorStore {
    fn read(&self) -> ColorValue;
    fn write(&self, color: ColorValue);
}

/// A reactive signal is the default store: effects created with
/// `create_effect` that read the signal rerun after each write.
impl ColorStore for RwSignal<ColorValue> {
    fn read(&self) -> ColorValue {
        self.get_untracked()
    }

    fn write(&self, color: ColorValue) {
        self.set(color);
    }
}

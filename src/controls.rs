//! Value holders for the panel widgets.
//!
//! A widget change is turned into a notification that the panel drains once per frame.
//! Values set through [`Control::set_value_silently`] never produce one, which is how
//! paired controls are kept in sync without triggering each other.

use std::ops::RangeInclusive;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Control {
    value: i32,
    range: RangeInclusive<i32>,
    signals_blocked: bool,
    pending: Option<i32>,
}

impl Control {
    pub fn new(value: i32, range: RangeInclusive<i32>) -> Self {
        let value = value.clamp(*range.start(), *range.end());
        Control {
            value,
            range,
            signals_blocked: false,
            pending: None,
        }
    }

    pub fn value(&self) -> i32 {
        self.value
    }

    pub fn range(&self) -> RangeInclusive<i32> {
        self.range.clone()
    }

    /// Set the value, clamped to the range; notifies if the value changed.
    pub fn set_value(&mut self, value: i32) {
        let value = value.clamp(*self.range.start(), *self.range.end());
        if value == self.value {
            return;
        }
        self.value = value;
        if !self.signals_blocked {
            self.pending = Some(value);
        }
    }

    /// Set the value without notifying, dropping any notification still pending.
    pub fn set_value_silently(&mut self, value: i32) {
        self.signals_blocked = true;
        self.set_value(value);
        self.signals_blocked = false;
        self.pending = None;
    }

    /// Take the pending change notification, if any.
    pub fn take_change(&mut self) -> Option<i32> {
        self.pending.take()
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Source {
    Slider,
    SpinBox,
}

/// A slider and spin box that edit the same value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkedControl {
    pub slider: Control,
    pub spin_box: Control,
}

impl LinkedControl {
    pub fn new(value: i32, range: RangeInclusive<i32>) -> Self {
        LinkedControl {
            slider: Control::new(value, range.clone()),
            spin_box: Control::new(value, range),
        }
    }

    pub fn value(&self) -> i32 {
        self.slider.value()
    }

    pub fn range(&self) -> RangeInclusive<i32> {
        self.slider.range()
    }

    pub fn control_mut(&mut self, source: Source) -> &mut Control {
        match source {
            Source::Slider => &mut self.slider,
            Source::SpinBox => &mut self.spin_box,
        }
    }

    /// Drain notifications, mirroring the changed control into its partner.
    ///
    /// Returns the value to commit, if either control changed. If both changed, the
    /// slider wins and the spin box's change is dropped.
    pub fn sync(&mut self) -> Option<i32> {
        let mut committed = None;
        if let Some(v) = self.slider.take_change() {
            self.spin_box.set_value_silently(v);
            committed = Some(v);
        }
        if let Some(v) = self.spin_box.take_change() {
            self.slider.set_value_silently(v);
            committed = Some(v);
        }
        committed
    }
}

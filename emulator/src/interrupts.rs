// Licensed under the Apache-2.0 license

use std::cell::Cell;

use fastclock_hil::InterruptControl;

use crate::EmulatedTimer;

/// Global interrupt flag. Optionally records the live count of a timer at the
/// moment interrupts were last masked.
pub struct EmulatedInterrupts<'a> {
    enabled: Cell<bool>,
    probe: Option<&'a EmulatedTimer>,
    masked_at: Cell<Option<u64>>,
    disables: Cell<u32>,
}

impl<'a> EmulatedInterrupts<'a> {
    pub fn new(enabled: bool) -> Self {
        Self {
            enabled: Cell::new(enabled),
            probe: None,
            masked_at: Cell::new(None),
            disables: Cell::new(0),
        }
    }

    /// Interrupts start enabled; `timer` is sampled on every disable.
    pub fn with_probe(timer: &'a EmulatedTimer) -> Self {
        Self {
            probe: Some(timer),
            ..Self::new(true)
        }
    }

    /// Live count of the probe timer when interrupts were last disabled.
    pub fn masked_at(&self) -> Option<u64> {
        self.masked_at.get()
    }

    pub fn disable_count(&self) -> u32 {
        self.disables.get()
    }
}

impl InterruptControl for EmulatedInterrupts<'_> {
    fn enable(&self) {
        self.enabled.set(true);
    }

    fn disable(&self) {
        self.disables.set(self.disables.get() + 1);
        self.enabled.set(false);
        if let Some(timer) = self.probe {
            self.masked_at.set(Some(timer.count()));
        }
    }

    fn are_enabled(&self) -> bool {
        self.enabled.get()
    }
}

// Licensed under the Apache-2.0 license

use std::cell::Cell;

use fastclock_hil::CycleCounter;

/// Cycle counter that advances by a fixed step on every read.
pub struct EmulatedCycleCounter {
    cycles: Cell<u32>,
    step_per_read: Cell<u32>,
    cycles_per_us: u32,
    reads: Cell<u32>,
}

impl EmulatedCycleCounter {
    pub fn new(cycles_per_us: u32) -> Self {
        Self::starting_at(cycles_per_us, 0)
    }

    pub fn starting_at(cycles_per_us: u32, cycles: u32) -> Self {
        Self {
            cycles: Cell::new(cycles),
            step_per_read: Cell::new(1),
            cycles_per_us,
            reads: Cell::new(0),
        }
    }

    /// Counter value without advancing it.
    pub fn peek(&self) -> u32 {
        self.cycles.get()
    }

    pub fn advance(&self, cycles: u32) {
        self.cycles.set(self.cycles.get().wrapping_add(cycles));
    }

    pub fn set_step_per_read(&self, cycles: u32) {
        self.step_per_read.set(cycles);
    }

    pub fn read_count(&self) -> u32 {
        self.reads.get()
    }
}

impl CycleCounter for EmulatedCycleCounter {
    fn cycles(&self) -> u32 {
        self.reads.set(self.reads.get() + 1);
        let now = self.cycles.get();
        self.advance(self.step_per_read.get());
        now
    }

    fn cycles_per_us(&self) -> u32 {
        self.cycles_per_us
    }
}

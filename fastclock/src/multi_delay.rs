/*++

Licensed under the Apache-2.0 license.

File Name:

    multi_delay.rs

Abstract:

    Sequence of busy-waits measured from one reference point.

--*/

use core::hint::spin_loop;

use fastclock_hil::CycleCounter;

use crate::wrap::{signed_diff, MAX_SPAN};

/// Waits at fixed offsets from a single reference in CPU cycles.
///
/// Waiting until 100 µs and then until 200 µs ends 200 µs after the
/// reference, not 300 µs, and call overhead between waits does not add up.
/// Offsets are valid up to 2^31 cycles from the reference.
pub struct MultiDelay<C> {
    counter: C,
    reference: u32,
}

impl<C: CycleCounter> MultiDelay<C> {
    /// Take the reference now.
    pub fn new(counter: C) -> Self {
        let reference = counter.cycles();
        Self { counter, reference }
    }

    /// Move the reference to now.
    pub fn reset(&mut self) {
        self.reference = self.counter.cycles();
    }

    /// Spin until `us` microseconds after the reference.
    #[inline]
    pub fn wait_until_us(&self, us: u32) {
        let cycles = u64::from(us) * u64::from(self.counter.cycles_per_us());
        debug_assert!(
            cycles <= u64::from(MAX_SPAN),
            "offset of {} us does not fit the cycle counter",
            us
        );
        self.wait_until_cycles(cycles as u32)
    }

    /// Spin until `cycles` after the reference. Returns at once if that
    /// point has already passed.
    #[inline]
    pub fn wait_until_cycles(&self, cycles: u32) {
        debug_assert!(
            cycles <= MAX_SPAN,
            "offset of {} cycles cannot be ordered",
            cycles
        );
        let target = cycles as i32;
        while self.elapsed_cycles() < target {
            spin_loop();
        }
    }

    /// Cycles since the reference.
    #[inline]
    pub fn elapsed_cycles(&self) -> i32 {
        signed_diff(self.counter.cycles(), self.reference)
    }

    pub fn reference(&self) -> u32 {
        self.reference
    }
}

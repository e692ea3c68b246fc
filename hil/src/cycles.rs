/*++

Licensed under the Apache-2.0 license.

File Name:

    cycles.rs

Abstract:

    Hardware Interface Layer trait for the CPU cycle counter.
--*/

// Hardware Interface Layer trait for CPU cycle counters
//
// The counter is 32 bits wide and wraps; consumers compare readings with
// wrapping subtraction only.
pub trait CycleCounter {
    // Get the current cycle count
    //
    // # Returns
    // The low 32 bits of the free-running cycle counter.
    fn cycles(&self) -> u32;

    // Get the number of cycles per microsecond
    //
    // # Returns
    // The counter frequency in MHz. Never zero.
    fn cycles_per_us(&self) -> u32;

    // Get the cost of entering and leaving a cycle-counted delay
    //
    // # Returns
    // The overhead in counter ticks. Zero unless the counter is fast enough
    // for call overhead to show.
    fn call_overhead(&self) -> u32 {
        0
    }
}

impl<T: CycleCounter + ?Sized> CycleCounter for &T {
    #[inline(always)]
    fn cycles(&self) -> u32 {
        (**self).cycles()
    }

    #[inline(always)]
    fn cycles_per_us(&self) -> u32 {
        (**self).cycles_per_us()
    }

    #[inline(always)]
    fn call_overhead(&self) -> u32 {
        (**self).call_overhead()
    }
}

/*++

Licensed under the Apache-2.0 license.

File Name:

    timer.rs

Abstract:

    Hardware Interface Layer trait for latched 64-bit timer counters.
--*/

/// A free-running 64-bit hardware counter read through a latched low/high
/// register pair.
///
/// The live counter is never read directly. `latch()` copies it into the
/// snapshot registers, which `read_low()` and `read_high()` then return. The
/// latch is atomic with respect to the counting logic but not with respect to
/// other readers: anyone may re-latch between two register reads, so composite
/// reads must detect and retry torn snapshots.
pub trait TimerCounter {
    /// Copy the live count into the snapshot registers.
    ///
    /// Does not alter the count itself.
    fn latch(&self);

    /// Low 32 bits of the last snapshot.
    fn read_low(&self) -> u32;

    /// High 32 bits of the last snapshot.
    fn read_high(&self) -> u32;
}

impl<T: TimerCounter + ?Sized> TimerCounter for &T {
    #[inline(always)]
    fn latch(&self) {
        (**self).latch()
    }

    #[inline(always)]
    fn read_low(&self) -> u32 {
        (**self).read_low()
    }

    #[inline(always)]
    fn read_high(&self) -> u32 {
        (**self).read_high()
    }
}

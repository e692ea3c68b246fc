/*++

Licensed under the Apache-2.0 license.

File Name:

    timer.rs

Abstract:

    Emulated latched 64-bit counter.

--*/

use std::sync::atomic::{AtomicBool, AtomicU32, AtomicU64, Ordering};

use fastclock_hil::TimerCounter;

/// A latched 64-bit counter whose live value only moves when told to.
///
/// Time can be advanced explicitly, automatically on every latch (so
/// busy-waits make progress), or by an injected interrupt that fires between
/// the low and high register reads and re-latches the counter.
#[derive(Default)]
pub struct EmulatedTimer {
    live: AtomicU64,
    snapshot: AtomicU64,
    step_per_latch: AtomicU64,
    interrupt_pending: AtomicBool,
    interrupt_ticks: AtomicU64,
    latches: AtomicU32,
    low_reads: AtomicU32,
}

impl EmulatedTimer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn starting_at(count: u64) -> Self {
        let timer = Self::default();
        timer.set(count);
        timer
    }

    /// Live count.
    pub fn count(&self) -> u64 {
        self.live.load(Ordering::SeqCst)
    }

    pub fn set(&self, count: u64) {
        self.live.store(count, Ordering::SeqCst);
    }

    pub fn advance(&self, ticks: u64) {
        // fetch_add wraps on overflow.
        self.live.fetch_add(ticks, Ordering::SeqCst);
    }

    /// Advance the live count by `ticks` every time the counter is latched.
    pub fn set_step_per_latch(&self, ticks: u64) {
        self.step_per_latch.store(ticks, Ordering::SeqCst);
    }

    /// On the next high-word read, first advance by `ticks` and re-latch, as
    /// an interrupt handler reading the same counter would.
    pub fn inject_interrupt_before_high_read(&self, ticks: u64) {
        self.interrupt_ticks.store(ticks, Ordering::SeqCst);
        self.interrupt_pending.store(true, Ordering::SeqCst);
    }

    /// Number of times the counter has been latched.
    pub fn latch_count(&self) -> u32 {
        self.latches.load(Ordering::SeqCst)
    }

    /// Number of low-word reads.
    pub fn low_read_count(&self) -> u32 {
        self.low_reads.load(Ordering::SeqCst)
    }

    fn take_snapshot(&self) {
        self.snapshot.store(self.count(), Ordering::SeqCst);
    }
}

impl TimerCounter for EmulatedTimer {
    fn latch(&self) {
        self.latches.fetch_add(1, Ordering::SeqCst);
        self.advance(self.step_per_latch.load(Ordering::SeqCst));
        self.take_snapshot();
    }

    fn read_low(&self) -> u32 {
        self.low_reads.fetch_add(1, Ordering::SeqCst);
        self.snapshot.load(Ordering::SeqCst) as u32
    }

    fn read_high(&self) -> u32 {
        if self.interrupt_pending.swap(false, Ordering::SeqCst) {
            let ticks = self.interrupt_ticks.load(Ordering::SeqCst);
            log::trace!(
                "[fastclock-emulator] interrupt: advancing {} ticks and re-latching",
                ticks
            );
            self.advance(ticks);
            self.take_snapshot();
        }
        (self.snapshot.load(Ordering::SeqCst) >> 32) as u32
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_snapshot_only_moves_on_latch() {
        let timer = EmulatedTimer::starting_at(0x1_0000_0002);
        timer.latch();
        timer.advance(5);
        assert_eq!(timer.read_low(), 2);
        assert_eq!(timer.read_high(), 1);
        timer.latch();
        assert_eq!(timer.read_low(), 7);
        assert_eq!(timer.latch_count(), 2);
    }

    #[test]
    fn test_step_per_latch() {
        let timer = EmulatedTimer::new();
        timer.set_step_per_latch(3);
        timer.latch();
        timer.latch();
        assert_eq!(timer.read_low(), 6);
        assert_eq!(timer.count(), 6);
    }

    #[test]
    fn test_injected_interrupt_fires_once() {
        let timer = EmulatedTimer::starting_at(0xFFFF_FFFF);
        timer.inject_interrupt_before_high_read(1);
        timer.latch();
        assert_eq!(timer.read_low(), 0xFFFF_FFFF);
        assert_eq!(timer.read_high(), 1);
        assert_eq!(timer.read_low(), 0);
        assert_eq!(timer.read_high(), 1);
        assert_eq!(timer.count(), 0x1_0000_0000);
    }

    #[test]
    fn test_advance_wraps() {
        let timer = EmulatedTimer::starting_at(u64::MAX);
        timer.advance(2);
        assert_eq!(timer.count(), 1);
    }
}

// Licensed under the Apache-2.0 license

use std::sync::atomic::{AtomicU64, Ordering};

use crate::EmulatedTimer;

/// The two timers of a timer group, advanced in lockstep.
///
/// Timer 0 ticks once per microsecond, timer 1 twice per millisecond.
#[derive(Default)]
pub struct EmulatedTimerGroup {
    micros: EmulatedTimer,
    millis: EmulatedTimer,
    // Microseconds not yet accounted for by a half-millisecond tick.
    sub_tick_us: AtomicU64,
}

impl EmulatedTimerGroup {
    const US_PER_MILLIS_TICK: u64 = 500;

    pub fn new() -> Self {
        Self::default()
    }

    /// Start with the given raw counts.
    pub fn starting_at(micros_ticks: u64, millis_ticks: u64) -> Self {
        Self {
            micros: EmulatedTimer::starting_at(micros_ticks),
            millis: EmulatedTimer::starting_at(millis_ticks),
            sub_tick_us: AtomicU64::new(0),
        }
    }

    /// Start as if `ms` milliseconds had elapsed since power-on.
    pub fn starting_at_millis(ms: u64) -> Self {
        Self::starting_at(ms.wrapping_mul(1000), ms.wrapping_mul(2))
    }

    pub fn micros_timer(&self) -> &EmulatedTimer {
        &self.micros
    }

    pub fn millis_timer(&self) -> &EmulatedTimer {
        &self.millis
    }

    pub fn advance_us(&self, us: u64) {
        self.micros.advance(us);
        let pending = self.sub_tick_us.load(Ordering::SeqCst) + us;
        self.millis.advance(pending / Self::US_PER_MILLIS_TICK);
        self.sub_tick_us
            .store(pending % Self::US_PER_MILLIS_TICK, Ordering::SeqCst);
    }

    pub fn advance_ms(&self, ms: u64) {
        self.micros.advance(ms.wrapping_mul(1000));
        self.millis.advance(ms.wrapping_mul(2));
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_lockstep() {
        let group = EmulatedTimerGroup::new();
        group.advance_us(499);
        assert_eq!(group.millis_timer().count(), 0);
        group.advance_us(1);
        assert_eq!(group.millis_timer().count(), 1);
        group.advance_ms(10);
        assert_eq!(group.micros_timer().count(), 10_500);
        assert_eq!(group.millis_timer().count(), 21);
    }

    #[test]
    fn test_starting_at_millis() {
        let group = EmulatedTimerGroup::starting_at_millis(1_500);
        assert_eq!(group.micros_timer().count(), 1_500_000);
        assert_eq!(group.millis_timer().count(), 3_000);
    }
}

// Licensed under the Apache-2.0 license

use fastclock_hil::{ClockInterface, CycleClock, CycleCounter, TimerCounter};

/// Cycle counter for platforms without one: counts microseconds on the µs
/// timer, so every "cycle" is one microsecond.
pub struct TimerCycles<T> {
    timer: T,
}

impl<T: TimerCounter> TimerCycles<T> {
    pub const fn new(timer: T) -> Self {
        Self { timer }
    }
}

impl<T: TimerCounter> CycleCounter for TimerCycles<T> {
    #[inline(always)]
    fn cycles(&self) -> u32 {
        self.timer.latch();
        self.timer.read_low()
    }

    #[inline(always)]
    fn cycles_per_us(&self) -> u32 {
        1
    }
}

/// A clock paired with a cycle counter, for schedulers that profile tasks
/// in CPU cycles.
pub struct ProfilingClock<K, C> {
    clock: K,
    counter: C,
}

impl<K: ClockInterface, C: CycleCounter> ProfilingClock<K, C> {
    pub const fn new(clock: K, counter: C) -> Self {
        Self { clock, counter }
    }
}

impl<K: ClockInterface, C: CycleCounter> ClockInterface for ProfilingClock<K, C> {
    fn millis(&self) -> u32 {
        self.clock.millis()
    }

    fn micros(&self) -> u32 {
        self.clock.micros()
    }

    fn seconds(&self) -> u32 {
        self.clock.seconds()
    }
}

impl<K: ClockInterface, C: CycleCounter> CycleClock for ProfilingClock<K, C> {
    fn cycles(&self) -> u32 {
        self.counter.cycles()
    }

    fn cycles_per_second(&self) -> u32 {
        self.counter.cycles_per_us().saturating_mul(1_000_000)
    }
}

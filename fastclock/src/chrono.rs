// Licensed under the Apache-2.0 license

use fastclock_hil::ClockInterface;

use crate::wrap::time_since;
use crate::GlobalClock;

/// Lap timer in milliseconds.
///
/// The first [`Chrono::tick`] after construction reports a zero interval,
/// so set-up time is never counted as a lap.
pub struct Chrono<C = GlobalClock> {
    clock: C,
    last_tick: u32,
    interval: u32,
    total: u32,
    initialized: bool,
}

impl Chrono<GlobalClock> {
    pub const fn new() -> Self {
        Self::with_clock(GlobalClock)
    }
}

impl Default for Chrono<GlobalClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: ClockInterface> Chrono<C> {
    pub const fn with_clock(clock: C) -> Self {
        Self {
            clock,
            last_tick: 0,
            interval: 0,
            total: 0,
            initialized: false,
        }
    }

    /// Start measuring from now, clearing the lap and the total.
    pub fn reset(&mut self) {
        self.initialized = true;
        self.last_tick = self.clock.millis();
        self.interval = 0;
        self.total = 0;
    }

    /// End the current lap and return its length.
    pub fn tick(&mut self) -> u32 {
        let now = self.clock.millis();
        self.interval = if self.initialized {
            time_since(now, self.last_tick)
        } else {
            0
        };
        self.initialized = true;
        self.last_tick = now;
        self.total = self.total.wrapping_add(self.interval);
        self.interval
    }

    /// Milliseconds since the last tick, without ending the lap.
    pub fn ms_since_tick(&self) -> u32 {
        time_since(self.clock.millis(), self.last_tick)
    }

    /// Length of the last completed lap.
    pub fn interval(&self) -> u32 {
        self.interval
    }

    /// Sum of all laps since the last reset.
    pub fn total(&self) -> u32 {
        self.total
    }

    pub fn last_tick(&self) -> u32 {
        self.last_tick
    }
}

/*++

Licensed under the Apache-2.0 license.

File Name:

    delay.rs

Abstract:

    Busy-wait delays on the microsecond clock and on the CPU cycle counter.

--*/

//! Every delay here spins on the calling context until it ends. None of them
//! yields, sleeps or can be cancelled; call them only where blocking the CPU
//! is acceptable.

use core::hint::spin_loop;

use embedded_hal::delay::DelayNs;
use fastclock_config::INTERRUPTIBLE_WINDOW_US;
use fastclock_hil::{ClockInterface, CycleCounter, InterruptControl};

use crate::wrap::{deadline_reached, remaining, MAX_SPAN};
use crate::{global, GlobalClock};

/// Spin for at least `us` microseconds.
///
/// Returns immediately for zero. `us` must stay below 2^31.
#[inline]
pub fn delay_us<C: ClockInterface + ?Sized>(clock: &C, us: u32) {
    if us == 0 {
        return;
    }
    debug_assert!(us <= MAX_SPAN, "delay of {} us cannot be ordered", us);

    let deadline = clock.micros().wrapping_add(us);
    while !deadline_reached(clock.micros(), deadline) {
        spin_loop();
    }
}

/// Spin for at least `us` microseconds, taking interrupts for all but the
/// last `window_us`.
///
/// Interrupts must be enabled on entry and are left disabled on return, so
/// the caller can start a timing-critical sequence right at the deadline.
/// An interrupt handler running near the end of the enabled part can still
/// push the end of the delay late by its own duration.
pub fn delay_us_interruptible<C, I>(clock: &C, interrupts: &I, us: u32, window_us: u32)
where
    C: ClockInterface + ?Sized,
    I: InterruptControl + ?Sized,
{
    debug_assert!(
        interrupts.are_enabled(),
        "interruptible delay entered with interrupts disabled"
    );
    debug_assert!(us <= MAX_SPAN, "delay of {} us cannot be ordered", us);

    let deadline = clock.micros().wrapping_add(us);
    let window = window_us.min(MAX_SPAN) as i32;
    while remaining(clock.micros(), deadline) > window {
        spin_loop();
    }

    interrupts.disable();
    while !deadline_reached(clock.micros(), deadline) {
        spin_loop();
    }
}

/// Spin for `us` microseconds counted in CPU cycles.
///
/// `overhead_cycles` is taken off the wait to account for the call itself.
/// `us` times the cycle rate must stay below 2^31 cycles.
#[inline(always)]
pub fn delay_us_by_cycles<C: CycleCounter + ?Sized>(counter: &C, us: u32, overhead_cycles: u32) {
    let start = counter.cycles();
    let cycles = us.wrapping_mul(counter.cycles_per_us());
    debug_assert!(
        u64::from(us) * u64::from(counter.cycles_per_us()) <= u64::from(MAX_SPAN),
        "delay of {} us does not fit the cycle counter",
        us
    );

    let deadline = start.wrapping_add(cycles).wrapping_sub(overhead_cycles);
    while !deadline_reached(counter.cycles(), deadline) {
        spin_loop();
    }
}

/// Spin for an arbitrary number of microseconds in chunks the clock can
/// order.
fn delay_long_us<C: ClockInterface + ?Sized>(clock: &C, mut us: u64) {
    while us > 0 {
        let chunk = us.min(u64::from(MAX_SPAN)) as u32;
        delay_us(clock, chunk);
        us -= u64::from(chunk);
    }
}

/// Spin for an arbitrary number of cycles. Each chunk is measured from the
/// end of the previous one, so splitting adds no error.
fn spin_cycles<C: CycleCounter + ?Sized>(counter: &C, mut cycles: u64) {
    let mut reference = counter.cycles();
    while cycles > 0 {
        let chunk = cycles.min(u64::from(MAX_SPAN)) as u32;
        let deadline = reference.wrapping_add(chunk);
        while !deadline_reached(counter.cycles(), deadline) {
            spin_loop();
        }
        reference = deadline;
        cycles -= u64::from(chunk);
    }
}

/// Busy-wait delay on a microsecond clock.
pub struct Delay<C = GlobalClock> {
    clock: C,
    window_us: u32,
    // Set for the process-wide clock, which stands still until installed.
    global: bool,
}

impl Delay<GlobalClock> {
    /// Delay on the process-wide clock. Until the clock is installed every
    /// delay returns at once, like [`crate::global::delay_us`].
    pub const fn global() -> Self {
        Self {
            global: true,
            ..Self::new(GlobalClock)
        }
    }
}

impl<C: ClockInterface> Delay<C> {
    pub const fn new(clock: C) -> Self {
        Self::with_window(clock, INTERRUPTIBLE_WINDOW_US)
    }

    /// Use `window_us` as the masked final stretch of
    /// [`Delay::delay_us_interruptible`].
    pub const fn with_window(clock: C, window_us: u32) -> Self {
        Self {
            clock,
            window_us,
            global: false,
        }
    }

    fn clock_stopped(&self) -> bool {
        self.global && !global::is_initialized()
    }

    pub fn delay_us(&self, us: u32) {
        if !self.clock_stopped() {
            delay_us(&self.clock, us)
        }
    }

    /// See [`delay_us_interruptible`]. Interrupts are left disabled even
    /// when the clock is stopped.
    pub fn delay_us_interruptible<I: InterruptControl + ?Sized>(&self, interrupts: &I, us: u32) {
        if self.clock_stopped() {
            interrupts.disable();
            return;
        }
        delay_us_interruptible(&self.clock, interrupts, us, self.window_us)
    }

    fn delay_long_us(&self, us: u64) {
        if !self.clock_stopped() {
            delay_long_us(&self.clock, us)
        }
    }
}

impl<C: ClockInterface> DelayNs for Delay<C> {
    fn delay_ns(&mut self, ns: u32) {
        Delay::delay_us(self, ns.div_ceil(1000))
    }

    fn delay_us(&mut self, us: u32) {
        self.delay_long_us(u64::from(us))
    }

    fn delay_ms(&mut self, ms: u32) {
        self.delay_long_us(u64::from(ms) * 1000)
    }
}

/// Busy-wait delay on the CPU cycle counter, for the tightest timing.
pub struct CycleDelay<C> {
    counter: C,
    overhead_cycles: u32,
}

impl<C: CycleCounter> CycleDelay<C> {
    /// Subtracts the counter's own call overhead from every delay.
    pub fn new(counter: C) -> Self {
        let overhead_cycles = counter.call_overhead();
        Self::with_overhead(counter, overhead_cycles)
    }

    pub const fn with_overhead(counter: C, overhead_cycles: u32) -> Self {
        Self {
            counter,
            overhead_cycles,
        }
    }

    #[inline(always)]
    pub fn delay_us(&self, us: u32) {
        delay_us_by_cycles(&self.counter, us, self.overhead_cycles)
    }

    fn delay_cycles(&self, cycles: u64) {
        spin_cycles(
            &self.counter,
            cycles.saturating_sub(u64::from(self.overhead_cycles)),
        )
    }
}

impl<C: CycleCounter> DelayNs for CycleDelay<C> {
    fn delay_ns(&mut self, ns: u32) {
        let rate = u64::from(self.counter.cycles_per_us());
        self.delay_cycles((u64::from(ns) * rate).div_ceil(1000))
    }

    fn delay_us(&mut self, us: u32) {
        let rate = u64::from(self.counter.cycles_per_us());
        self.delay_cycles(u64::from(us) * rate)
    }

    fn delay_ms(&mut self, ms: u32) {
        let rate = u64::from(self.counter.cycles_per_us());
        self.delay_cycles(u64::from(ms) * 1000 * rate)
    }
}

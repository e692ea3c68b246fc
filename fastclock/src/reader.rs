/*++

Licensed under the Apache-2.0 license.

File Name:

    reader.rs

Abstract:

    Microsecond and millisecond counters read from the two timers of the
    timer group.

--*/

use critical_section::CriticalSection;
use fastclock_config::MILLIS_TICK_SHIFT;
use fastclock_hil::{ClockInterface, TimerCounter};

/// Latch the counter and read a self-consistent 64-bit value.
///
/// An interrupt handler may re-latch the counter between our register reads,
/// leaving a high word that belongs to a different snapshot than the low
/// word. Reading the low word a second time detects this; on a mismatch the
/// whole sequence is retried. Retries need another context to stop
/// re-latching, so this must not spin inside a critical section that the
/// re-latching context is waiting on.
#[inline]
pub(crate) fn read_consistent<T: TimerCounter + ?Sized>(counter: &T) -> u64 {
    loop {
        counter.latch();
        let low = counter.read_low();
        let high = counter.read_high();
        if counter.read_low() == low {
            return (u64::from(high) << 32) | u64::from(low);
        }
    }
}

/// Latch and read once, without tear detection.
#[inline(always)]
fn read_latched<T: TimerCounter + ?Sized>(counter: &T) -> u64 {
    counter.latch();
    let low = counter.read_low();
    let high = counter.read_high();
    (u64::from(high) << 32) | u64::from(low)
}

/// Monotonic counters derived from a µs timer (1 tick per microsecond) and
/// a ms timer (2 ticks per millisecond).
///
/// Reads never block and never lock. They are safe from interrupt handlers.
pub struct ClockReader<U, M> {
    micros: U,
    millis: M,
}

impl<U: TimerCounter, M: TimerCounter> ClockReader<U, M> {
    pub const fn new(micros: U, millis: M) -> Self {
        Self { micros, millis }
    }

    /// Microseconds, wrapping every 2^32 µs (about 71.6 minutes).
    ///
    /// A single 32-bit register read cannot tear, so no retry is needed.
    /// Compare readings with [`crate::wrap`] only.
    #[inline(always)]
    pub fn micros(&self) -> u32 {
        self.micros.latch();
        self.micros.read_low()
    }

    /// Milliseconds, wrapping every 2^32 ms (about 49.7 days).
    #[inline]
    pub fn millis(&self) -> u32 {
        self.millis64() as u32
    }

    /// Milliseconds from the full 64-bit ms timer.
    #[inline]
    pub fn millis64(&self) -> u64 {
        read_consistent(&self.millis) >> MILLIS_TICK_SHIFT
    }

    /// Full 64-bit microsecond count.
    ///
    /// Uses the retrying read: call it with interrupts enabled, or from the
    /// single context that latches this timer. Inside a critical section use
    /// [`ClockReader::micros64_in_critical_section`].
    #[inline]
    pub fn micros64(&self) -> u64 {
        read_consistent(&self.micros)
    }

    /// Full 64-bit microsecond count, read once without tear detection.
    ///
    /// Only correct while nothing else can latch the µs timer, which the
    /// critical-section token stands for. Taking the token from a context
    /// that does not actually exclude every other reader of this timer (a
    /// second core, or an NMI handler) returns silently corrupted values.
    #[inline]
    pub fn micros64_in_critical_section(&self, _cs: CriticalSection<'_>) -> u64 {
        read_latched(&self.micros)
    }

    pub fn micros_timer(&self) -> &U {
        &self.micros
    }

    pub fn millis_timer(&self) -> &M {
        &self.millis
    }
}

impl<U: TimerCounter, M: TimerCounter> ClockInterface for ClockReader<U, M> {
    #[inline(always)]
    fn millis(&self) -> u32 {
        ClockReader::millis(self)
    }

    #[inline(always)]
    fn micros(&self) -> u32 {
        ClockReader::micros(self)
    }
}

/*++

Licensed under the Apache-2.0 license.

File Name:

    clock.rs

Abstract:

    Clock interface consumed by cooperative task schedulers.
--*/

/// Monotonic time as seen by a polling scheduler.
///
/// All readings are 32-bit counts since an arbitrary epoch and wrap. Only
/// differences computed with wrapping subtraction are meaningful.
pub trait ClockInterface {
    /// Milliseconds since the clock was started.
    fn millis(&self) -> u32;

    /// Microseconds since the clock was started.
    fn micros(&self) -> u32;

    /// Seconds since the clock was started, derived as `millis() / 1000`.
    ///
    /// This works well until the millisecond count rolls over at 2^32 ms. The
    /// last second before the rollover (4294967) only lasts 296 ms, so the
    /// seconds count returns to 0 704 ms too early. Callers that delay in
    /// whole seconds are expected to tolerate this.
    fn seconds(&self) -> u32 {
        self.millis() / 1000
    }
}

/// A clock that can also be sampled in CPU cycles, for profiling.
pub trait CycleClock: ClockInterface {
    /// Current CPU cycle count.
    fn cycles(&self) -> u32;

    /// Frequency of [`CycleClock::cycles`] in Hz.
    fn cycles_per_second(&self) -> u32;
}

impl<T: ClockInterface + ?Sized> ClockInterface for &T {
    #[inline(always)]
    fn millis(&self) -> u32 {
        (**self).millis()
    }

    #[inline(always)]
    fn micros(&self) -> u32 {
        (**self).micros()
    }

    fn seconds(&self) -> u32 {
        (**self).seconds()
    }
}

impl<T: CycleClock + ?Sized> CycleClock for &T {
    fn cycles(&self) -> u32 {
        (**self).cycles()
    }

    fn cycles_per_second(&self) -> u32 {
        (**self).cycles_per_second()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    struct FixedClock(u32);

    impl ClockInterface for FixedClock {
        fn millis(&self) -> u32 {
            self.0
        }

        fn micros(&self) -> u32 {
            self.0.wrapping_mul(1000)
        }
    }

    #[test]
    fn test_seconds_truncates_millis() {
        assert_eq!(FixedClock(0).seconds(), 0);
        assert_eq!(FixedClock(999).seconds(), 0);
        assert_eq!(FixedClock(1000).seconds(), 1);
        assert_eq!(FixedClock(61_999).seconds(), 61);
    }

    #[test]
    fn test_seconds_rolls_over_early() {
        // 4294967000 ms is the start of the last representable second.
        assert_eq!(FixedClock(4_294_967_000).seconds(), 4_294_967);
        assert_eq!(FixedClock(u32::MAX).seconds(), 4_294_967);
        // One millisecond later the millis count wraps, 704 ms short of a
        // full second.
        assert_eq!(FixedClock(u32::MAX.wrapping_add(1)).seconds(), 0);
    }

    #[test]
    fn test_reference_forwards() {
        let clock = FixedClock(5_500);
        let by_ref: &dyn ClockInterface = &clock;
        assert_eq!(by_ref.millis(), 5_500);
        assert_eq!(by_ref.seconds(), 5);
    }
}

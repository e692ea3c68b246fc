/*++

Licensed under the Apache-2.0 license.

File Name:

    timeout.rs

Abstract:

    Millisecond deadline that latches once it has passed.

--*/

use fastclock_hil::ClockInterface;

use crate::wrap::{remaining, MAX_SPAN};
use crate::GlobalClock;

/// A millisecond deadline, either armed or expired.
///
/// Expiry is observed by polling. Once a query sees the deadline pass, the
/// timeout stays expired until the next [`Timeout::set`], even when the raw
/// comparison would turn ambiguous again 2^31 ms later.
pub struct Timeout<C = GlobalClock> {
    clock: C,
    deadline: u32,
    expired: bool,
}

impl Timeout<GlobalClock> {
    /// An expired timeout on the process-wide clock.
    pub const fn new() -> Self {
        Self::with_clock(GlobalClock)
    }
}

impl Default for Timeout<GlobalClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: ClockInterface> Timeout<C> {
    /// An expired timeout on `clock`.
    pub const fn with_clock(clock: C) -> Self {
        Self {
            clock,
            deadline: 0,
            expired: true,
        }
    }

    /// Arm for `ms` milliseconds from now. Zero expires immediately.
    pub fn set(&mut self, ms: u32) {
        if ms == 0 {
            self.expired = true;
            return;
        }
        debug_assert!(ms <= MAX_SPAN, "timeout of {} ms cannot be ordered", ms);
        self.deadline = self.clock.millis().wrapping_add(ms);
        self.expired = false;
    }

    pub fn expire(&mut self) {
        self.expired = true;
    }

    /// Milliseconds until the deadline, or zero once it has passed.
    pub fn remaining(&mut self) -> i32 {
        if self.expired {
            return 0;
        }
        let left = remaining(self.clock.millis(), self.deadline);
        if left > 0 {
            left
        } else {
            self.expired = true;
            0
        }
    }

    pub fn expired(&mut self) -> bool {
        self.remaining() == 0
    }

    /// Check the deadline without using the result.
    pub fn tick(&mut self) {
        self.remaining();
    }

    /// Whether the timeout was armed and not yet seen to expire. Does not
    /// read the clock.
    pub fn is_armed(&self) -> bool {
        !self.expired
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::ClockReader;
    use fastclock_emulator::{EmulatedTimer, EmulatedTimerGroup};

    fn test_helper_timeout(
        group: &EmulatedTimerGroup,
    ) -> Timeout<ClockReader<&EmulatedTimer, &EmulatedTimer>> {
        Timeout::with_clock(ClockReader::new(
            group.micros_timer(),
            group.millis_timer(),
        ))
    }

    #[test]
    fn test_starts_expired() {
        let group = EmulatedTimerGroup::starting_at_millis(10);
        let mut timeout = test_helper_timeout(&group);
        assert!(!timeout.is_armed());
        assert!(timeout.expired());
        assert_eq!(timeout.remaining(), 0);
    }

    #[test]
    fn test_set_zero_expires_immediately() {
        let group = EmulatedTimerGroup::starting_at_millis(10);
        let mut timeout = test_helper_timeout(&group);
        timeout.set(50);
        assert!(timeout.is_armed());
        timeout.set(0);
        assert!(!timeout.is_armed());
        assert!(timeout.expired());
    }

    #[test]
    fn test_set_and_expire_on_time() {
        let group = EmulatedTimerGroup::new();
        let mut timeout = test_helper_timeout(&group);
        timeout.set(100);
        assert!(!timeout.expired());
        assert_eq!(timeout.remaining(), 100);

        group.advance_ms(60);
        assert_eq!(timeout.remaining(), 40);

        group.advance_ms(39);
        assert_eq!(timeout.remaining(), 1);
        assert!(!timeout.expired());

        group.advance_ms(1);
        assert!(timeout.expired());
        assert!(!timeout.is_armed());
    }

    #[test]
    fn test_expiry_latches_past_wraparound() {
        let group = EmulatedTimerGroup::new();
        let mut timeout = test_helper_timeout(&group);
        timeout.set(100);
        group.advance_ms(100);
        assert!(timeout.expired());

        // 2^31 ms later a raw comparison would read "100 ms left".
        group.advance_ms(1 << 31);
        assert!(timeout.expired());
        assert_eq!(timeout.remaining(), 0);
    }

    #[test]
    fn test_unobserved_expiry_is_ambiguous_after_half_range() {
        let group = EmulatedTimerGroup::new();
        let mut timeout = test_helper_timeout(&group);
        timeout.set(100);
        // Nobody polled while the deadline passed, and now it is more than
        // 2^31 ms behind.
        group.advance_ms((1 << 31) + 101);
        assert!(!timeout.expired());
        timeout.tick();
        assert!(timeout.is_armed());
    }

    #[test]
    fn test_deadline_across_millis_wraparound() {
        let group = EmulatedTimerGroup::starting_at_millis(u64::from(u32::MAX) - 10);
        let mut timeout = test_helper_timeout(&group);
        timeout.set(20);
        group.advance_ms(15);
        assert_eq!(timeout.remaining(), 5);
        group.advance_ms(5);
        assert!(timeout.expired());
    }

    #[test]
    fn test_expire_and_rearm() {
        let group = EmulatedTimerGroup::new();
        let mut timeout = test_helper_timeout(&group);
        timeout.set(1_000);
        timeout.expire();
        assert!(timeout.expired());
        timeout.set(5);
        assert!(!timeout.expired());
        group.advance_ms(5);
        timeout.tick();
        assert!(!timeout.is_armed());
    }
}

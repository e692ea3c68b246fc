// Licensed under the Apache-2.0 license

//! Wraparound-safe arithmetic on 32-bit clock readings.
//!
//! Readings are counts modulo 2^32. A difference is only meaningful while
//! the true elapsed time is below 2^31 ticks, so comparisons are done on the
//! signed wrapping difference, never with `>` on the raw values.

/// Largest duration, in ticks, that the signed comparisons below can order.
pub const MAX_SPAN: u32 = i32::MAX as u32;

/// Ticks elapsed from `then` to `now`.
#[inline(always)]
pub const fn time_since(now: u32, then: u32) -> u32 {
    now.wrapping_sub(then)
}

/// `later - earlier` as a signed tick count.
#[inline(always)]
pub const fn signed_diff(later: u32, earlier: u32) -> i32 {
    later.wrapping_sub(earlier) as i32
}

/// Ticks left until `deadline`; zero or negative once it has passed.
#[inline(always)]
pub const fn remaining(now: u32, deadline: u32) -> i32 {
    signed_diff(deadline, now)
}

#[inline(always)]
pub const fn deadline_reached(now: u32, deadline: u32) -> bool {
    remaining(now, deadline) <= 0
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_time_since_across_wraparound() {
        assert_eq!(time_since(1, 0xFFFF_FFFE), 3);
        assert_eq!(signed_diff(1, 0xFFFF_FFFE), 3);
        assert_eq!(time_since(0, u32::MAX), 1);
    }

    #[test]
    fn test_signed_diff_matches_true_elapsed() {
        let starts = [0, 1, 0x7FFF_FFFF, 0x8000_0000, 0xFFFF_FFFE, u32::MAX];
        let spans = [0, 1, 2, 1000, 0x7FFF_FFFE, MAX_SPAN];
        for &start in starts.iter() {
            for &span in spans.iter() {
                let now = start.wrapping_add(span);
                assert_eq!(signed_diff(now, start), span as i32);
                assert_eq!(time_since(now, start), span);
            }
        }
    }

    #[test]
    fn test_deadline_reached() {
        let deadline = 0xFFFF_FFF0u32.wrapping_add(0x20);
        assert!(!deadline_reached(0xFFFF_FFF0, deadline));
        assert!(!deadline_reached(0xFFFF_FFFF, deadline));
        assert!(!deadline_reached(0x0F, deadline));
        assert!(deadline_reached(0x10, deadline));
        assert!(deadline_reached(0x11, deadline));
        // A naive comparison gets this wrong: the deadline is numerically
        // smaller than the start.
        assert!(0xFFFF_FFF0 > deadline);
    }

    #[test]
    fn test_remaining() {
        assert_eq!(remaining(100, 150), 50);
        assert_eq!(remaining(150, 150), 0);
        assert_eq!(remaining(160, 150), -10);
        assert_eq!(remaining(u32::MAX, 4), 5);
    }
}

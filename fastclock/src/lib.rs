/*++

Licensed under the Apache-2.0 license.

File Name:

    lib.rs

Abstract:

    Fast monotonic clock built on a latched hardware timer group, with
    wraparound-safe timeouts, lap timers and busy-wait delays.

--*/

//! Bring-up on a board with the timer group driver:
//!
//! ```ignore
//! static TIMG0: TimerGroup = TimerGroup::new(ESP32_TIMG0_BASE);
//!
//! let (micros, millis) = TIMG0.init(&ESP32_TIMG0.timer_group)?;
//! let clock = CLOCK.write(ClockReader::new(micros, millis));
//! fastclock::init(clock)?;
//!
//! let mut timeout = Timeout::new();
//! timeout.set(250);
//! while !timeout.expired() {
//!     poll_bus();
//! }
//! ```

#![cfg_attr(not(test), no_std)]

mod chrono;
mod cycles;
pub mod delay;
mod error;
pub mod global;
mod multi_delay;
mod reader;
mod timeout;
pub mod wrap;

pub use chrono::Chrono;
pub use cycles::{ProfilingClock, TimerCycles};
pub use delay::{CycleDelay, Delay};
pub use error::ClockError;
pub use fastclock_config as config;
pub use fastclock_hil::{ClockInterface, CycleClock, CycleCounter, InterruptControl, TimerCounter};
pub use global::{init, is_initialized, micros, millis, seconds, GlobalClock};
pub use multi_delay::MultiDelay;
pub use reader::ClockReader;
pub use timeout::Timeout;

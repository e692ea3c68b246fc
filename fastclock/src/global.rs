/*++

Licensed under the Apache-2.0 license.

File Name:

    global.rs

Abstract:

    Process-wide clock, installed once at bring-up.

--*/

//! Before [`init`] succeeds every reading is zero: the clock stands still,
//! armed timeouts never expire and [`delay_us`] returns at once.

use core::hint::spin_loop;

use fastclock_hil::ClockInterface;
use portable_atomic::{AtomicU8, Ordering};

use crate::ClockError;

const UNINITIALIZED: u8 = 0;
const INITIALIZING: u8 = 1;
const INITIALIZED: u8 = 2;

static STATE: AtomicU8 = AtomicU8::new(UNINITIALIZED);

// Written exactly once, before STATE becomes INITIALIZED, and only read after
// observing INITIALIZED.
static mut CLOCK: &(dyn ClockInterface + Sync) = &UnsetClock;

struct UnsetClock;

impl ClockInterface for UnsetClock {
    fn millis(&self) -> u32 {
        0
    }

    fn micros(&self) -> u32 {
        0
    }
}

/// Install the process-wide clock. Only the first call succeeds.
pub fn init(clock: &'static (dyn ClockInterface + Sync)) -> Result<(), ClockError> {
    match STATE.compare_exchange(
        UNINITIALIZED,
        INITIALIZING,
        Ordering::Acquire,
        Ordering::Relaxed,
    ) {
        Ok(_) => {
            // SAFETY: the compare_exchange above admits a single writer, and
            // readers only dereference CLOCK once STATE is INITIALIZED.
            unsafe {
                CLOCK = clock;
            }
            STATE.store(INITIALIZED, Ordering::Release);
            log::debug!("[fastclock] process-wide clock installed");
            Ok(())
        }
        Err(INITIALIZING) => {
            while STATE.load(Ordering::Relaxed) == INITIALIZING {
                spin_loop();
            }
            log::warn!("[fastclock] clock already initialized, ignoring");
            Err(ClockError::AlreadyInitialized)
        }
        Err(_) => {
            log::warn!("[fastclock] clock already initialized, ignoring");
            Err(ClockError::AlreadyInitialized)
        }
    }
}

pub fn is_initialized() -> bool {
    STATE.load(Ordering::Acquire) == INITIALIZED
}

/// The installed clock, or one that always reads zero.
pub fn clock() -> &'static (dyn ClockInterface + Sync) {
    if is_initialized() {
        // SAFETY: INITIALIZED is stored after the only write to CLOCK.
        unsafe { CLOCK }
    } else {
        &UnsetClock
    }
}

#[inline]
pub fn millis() -> u32 {
    clock().millis()
}

#[inline]
pub fn micros() -> u32 {
    clock().micros()
}

/// `millis() / 1000`. Rolls over to zero 704 ms before `millis()` does.
#[inline]
pub fn seconds() -> u32 {
    clock().seconds()
}

/// Spin on the process-wide clock for at least `us` microseconds. Returns
/// at once if no clock is installed.
pub fn delay_us(us: u32) {
    if is_initialized() {
        crate::delay::delay_us(clock(), us)
    }
}

/// Handle to the process-wide clock. Zero-sized, so timers built on it cost
/// no more than their own state.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct GlobalClock;

impl ClockInterface for GlobalClock {
    #[inline(always)]
    fn millis(&self) -> u32 {
        millis()
    }

    #[inline(always)]
    fn micros(&self) -> u32 {
        micros()
    }

    #[inline(always)]
    fn seconds(&self) -> u32 {
        seconds()
    }
}

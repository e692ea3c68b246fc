// Licensed under the Apache-2.0 license

//! Board clock configuration.
//!
//! The µs timer must tick once per microsecond and the ms timer twice per
//! millisecond; the core shifts the ms count right by one. Both timers are
//! clocked from the APB clock through a 16-bit prescaler.

#![cfg_attr(not(test), no_std)]

use thiserror_no_std::Error;

/// Smallest prescaler divider accepted by the timer group.
pub const MIN_DIVIDER: u32 = 2;
/// Largest prescaler divider; the 16-bit field encodes it as 0.
pub const MAX_DIVIDER: u32 = 65536;

/// Tick rate of the µs timer.
pub const MICROS_TICK_HZ: u32 = 1_000_000;
/// Tick rate of the ms timer. One right shift turns its count into ms.
pub const MILLIS_TICK_HZ: u32 = 2_000;
/// Shift applied to the ms timer count.
pub const MILLIS_TICK_SHIFT: u32 = 1;

/// Final stretch of an interruptible delay spent with interrupts masked.
pub const INTERRUPTIBLE_WINDOW_US: u32 = 20;
/// Cycles spent entering and leaving a cycle-counted delay on a 240 MHz
/// core.
pub const CYCLE_DELAY_OVERHEAD: u32 = 12;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    #[error("prescaler divider {0} outside 2..=65536")]
    DividerOutOfRange(u32),
    #[error("microsecond timer ticks at {0} Hz, expected 1000000 Hz")]
    MicrosRateMismatch(u32),
    #[error("millisecond timer ticks at {0} Hz, expected 2000 Hz")]
    MillisRateMismatch(u32),
    #[error("CPU frequency must be non-zero")]
    ZeroCpuFrequency,
}

/// Prescaler settings for the two timers of a timer group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerGroupConfig {
    /// Frequency of the clock feeding both prescalers.
    pub apb_clock_hz: u32,
    /// Divider of the µs timer (timer 0).
    pub micros_divider: u32,
    /// Divider of the ms timer (timer 1).
    pub millis_divider: u32,
}

impl TimerGroupConfig {
    /// Derive both dividers from the APB clock frequency.
    pub const fn for_apb_clock(apb_clock_hz: u32) -> Self {
        Self {
            apb_clock_hz,
            micros_divider: apb_clock_hz / MICROS_TICK_HZ,
            millis_divider: apb_clock_hz / MILLIS_TICK_HZ,
        }
    }

    pub const fn micros_tick_hz(&self) -> u32 {
        tick_hz(self.apb_clock_hz, self.micros_divider)
    }

    pub const fn millis_tick_hz(&self) -> u32 {
        tick_hz(self.apb_clock_hz, self.millis_divider)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        for divider in [self.micros_divider, self.millis_divider] {
            if !(MIN_DIVIDER..=MAX_DIVIDER).contains(&divider) {
                return Err(ConfigError::DividerOutOfRange(divider));
            }
        }
        let apb_clock_hz = u64::from(self.apb_clock_hz);
        if u64::from(self.micros_divider) * u64::from(MICROS_TICK_HZ) != apb_clock_hz {
            return Err(ConfigError::MicrosRateMismatch(self.micros_tick_hz()));
        }
        if u64::from(self.millis_divider) * u64::from(MILLIS_TICK_HZ) != apb_clock_hz {
            return Err(ConfigError::MillisRateMismatch(self.millis_tick_hz()));
        }
        Ok(())
    }
}

const fn tick_hz(clock_hz: u32, divider: u32) -> u32 {
    if divider == 0 {
        0
    } else {
        clock_hz / divider
    }
}

/// Everything the clock needs to know about the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClockConfig {
    /// Base address of the timer group registers.
    pub timer_group_addr: u32,
    pub timer_group: TimerGroupConfig,
    /// CPU cycle counter frequency in MHz.
    pub cpu_mhz: u32,
    /// Cycles spent entering and leaving a cycle-counted delay.
    pub cycle_delay_overhead: u32,
    /// Final stretch of an interruptible delay spent with interrupts masked.
    pub interruptible_window_us: u32,
}

impl ClockConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.cpu_mhz == 0 {
            return Err(ConfigError::ZeroCpuFrequency);
        }
        self.timer_group.validate()
    }
}

/// ESP32 timer group 0 clocked from the 80 MHz APB clock, 240 MHz CPU.
pub const ESP32_TIMG0: ClockConfig = ClockConfig {
    timer_group_addr: 0x3FF5_F000,
    timer_group: TimerGroupConfig {
        apb_clock_hz: 80_000_000,
        micros_divider: 80,
        millis_divider: 40_000,
    },
    cpu_mhz: 240,
    cycle_delay_overhead: CYCLE_DELAY_OVERHEAD,
    interruptible_window_us: INTERRUPTIBLE_WINDOW_US,
};

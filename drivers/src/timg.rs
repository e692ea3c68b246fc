/*++

Licensed under the Apache-2.0 license.

File Name:

    timg.rs

Abstract:

    Timer group driver. Timer 0 is configured as the microsecond counter and
    timer 1 as the half-millisecond counter. Each timer is a 64-bit up
    counter whose value is latched into LO/HI by writing UPDATE.

--*/

use fastclock_config::{ConfigError, TimerGroupConfig, ESP32_TIMG0, MAX_DIVIDER};
use fastclock_hil::TimerCounter;
use log::{info, warn};
use tock_registers::interfaces::{Readable, Writeable};
use tock_registers::registers::{ReadOnly, ReadWrite, WriteOnly};
use tock_registers::{register_bitfields, register_structs};

use crate::StaticRef;

register_bitfields![u32,
    CONFIG [
        ALARM_EN OFFSET(10) NUMBITS(1) [],
        LEVEL_INT_EN OFFSET(11) NUMBITS(1) [],
        EDGE_INT_EN OFFSET(12) NUMBITS(1) [],
        DIVIDER OFFSET(13) NUMBITS(16) [],
        AUTORELOAD OFFSET(29) NUMBITS(1) [],
        INCREASE OFFSET(30) NUMBITS(1) [],
        EN OFFSET(31) NUMBITS(1) [],
    ],
];

register_structs! {
    HwTimerRegisters {
        (0x00 => config: ReadWrite<u32, CONFIG::Register>),
        (0x04 => lo: ReadOnly<u32>),
        (0x08 => hi: ReadOnly<u32>),
        (0x0C => update: WriteOnly<u32>),
        (0x10 => _alarm),
        (0x18 => load_lo: ReadWrite<u32>),
        (0x1C => load_hi: ReadWrite<u32>),
        (0x20 => load: WriteOnly<u32>),
        (0x24 => @END),
    },
    pub TimerGroupRegisters {
        (0x00 => t0: HwTimerRegisters),
        (0x24 => t1: HwTimerRegisters),
        (0x48 => @END),
    }
}

pub const ESP32_TIMG0_BASE: StaticRef<TimerGroupRegisters> =
    unsafe { StaticRef::new(ESP32_TIMG0.timer_group_addr as *const TimerGroupRegisters) };

/// The 16-bit DIVIDER field encodes the maximum divider as 0.
fn divider_field(divider: u32) -> u32 {
    if divider == MAX_DIVIDER {
        0
    } else {
        divider
    }
}

/// One 64-bit counter of the timer group.
pub struct HwTimer {
    registers: StaticRef<HwTimerRegisters>,
}

impl HwTimer {
    fn configure(&self, divider: u32) {
        let divider = CONFIG::DIVIDER.val(divider_field(divider));
        // The prescaler can only be changed while the timer is stopped.
        self.registers.config.write(CONFIG::EN::CLEAR + divider);
        self.registers
            .config
            .write(CONFIG::EN::SET + CONFIG::INCREASE::SET + divider);
    }

    /// Overwrite the live count.
    pub fn load(&self, count: u64) {
        self.registers.load_lo.set(count as u32);
        self.registers.load_hi.set((count >> 32) as u32);
        self.registers.load.set(0);
    }

    pub fn is_enabled(&self) -> bool {
        self.registers.config.is_set(CONFIG::EN)
    }

    /// Prescaler divider currently programmed.
    pub fn divider(&self) -> u32 {
        match self.registers.config.read(CONFIG::DIVIDER) {
            0 => MAX_DIVIDER,
            divider => divider,
        }
    }
}

impl TimerCounter for HwTimer {
    #[inline(always)]
    fn latch(&self) {
        // Any value written to UPDATE latches the counter.
        self.registers.update.set(0);
    }

    #[inline(always)]
    fn read_low(&self) -> u32 {
        self.registers.lo.get()
    }

    #[inline(always)]
    fn read_high(&self) -> u32 {
        self.registers.hi.get()
    }
}

pub struct TimerGroup {
    registers: StaticRef<TimerGroupRegisters>,
}

impl TimerGroup {
    pub const fn new(base: StaticRef<TimerGroupRegisters>) -> Self {
        TimerGroup { registers: base }
    }

    /// Program and start both timers.
    ///
    /// Returns the microsecond timer and the half-millisecond timer.
    pub fn init(&self, config: &TimerGroupConfig) -> Result<(HwTimer, HwTimer), ConfigError> {
        if let Err(err) = config.validate() {
            warn!("[fastclock-timg] rejecting timer configuration: {}", err);
            return Err(err);
        }

        let micros = self.micros_timer();
        micros.configure(config.micros_divider);
        let millis = self.millis_timer();
        millis.configure(config.millis_divider);

        info!(
            "[fastclock-timg] timers started: apb {} Hz, us divider {}, ms divider {}",
            config.apb_clock_hz, config.micros_divider, config.millis_divider
        );
        Ok((micros, millis))
    }

    /// Timer 0, one tick per microsecond once initialized.
    pub fn micros_timer(&self) -> HwTimer {
        HwTimer {
            // SAFETY: t0 lives inside the 'static register block.
            registers: unsafe { StaticRef::new(&self.registers.t0 as *const HwTimerRegisters) },
        }
    }

    /// Timer 1, two ticks per millisecond once initialized.
    pub fn millis_timer(&self) -> HwTimer {
        HwTimer {
            // SAFETY: t1 lives inside the 'static register block.
            registers: unsafe { StaticRef::new(&self.registers.t1 as *const HwTimerRegisters) },
        }
    }
}

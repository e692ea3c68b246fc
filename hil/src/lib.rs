/*++

Licensed under the Apache-2.0 license.

File Name:

    lib.rs

Abstract:

    Hardware Interface Layer (HIL) for the fast clock: timer counters, the
    CPU cycle counter, the global interrupt flag and the clock interface
    consumed by cooperative schedulers.
--*/

#![cfg_attr(not(test), no_std)]

pub mod clock;
pub mod cycles;
pub mod interrupts;
pub mod timer;

pub use clock::{ClockInterface, CycleClock};
pub use cycles::CycleCounter;
pub use interrupts::InterruptControl;
pub use timer::TimerCounter;

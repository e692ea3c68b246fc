/*++

Licensed under the Apache-2.0 license.

File Name:

    lib.rs

Abstract:

    Emulated timer group, cycle counter and interrupt flag for running the
    clock on a host.

--*/

mod cycles;
mod group;
mod interrupts;
mod timer;

pub use cycles::EmulatedCycleCounter;
pub use group::EmulatedTimerGroup;
pub use interrupts::EmulatedInterrupts;
pub use timer::EmulatedTimer;

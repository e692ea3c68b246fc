// Licensed under the Apache-2.0 license.

#![cfg_attr(not(test), no_std)]

mod static_ref;
pub mod timg;

#[cfg(target_arch = "riscv32")]
pub mod cycles;
#[cfg(target_arch = "riscv32")]
pub mod interrupts;

#[cfg(target_arch = "riscv32")]
pub use cycles::MachineCycleCounter;
#[cfg(target_arch = "riscv32")]
pub use interrupts::MachineInterrupts;
pub use static_ref::StaticRef;
pub use timg::{HwTimer, TimerGroup, TimerGroupRegisters, ESP32_TIMG0_BASE};

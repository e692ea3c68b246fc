// Licensed under the Apache-2.0 license.

use fastclock_config::CYCLE_DELAY_OVERHEAD;
use fastclock_hil::CycleCounter;
use riscv_csr::csr::{ReadWriteRiscvCsr, MCYCLE};
use tock_registers::interfaces::Readable;
use tock_registers::register_bitfields;

register_bitfields![usize,
    value [
        value OFFSET(0) NUMBITS(32) [],
    ],
];

/// CPU cycle counter backed by the low word of the `mcycle` CSR.
pub struct MachineCycleCounter {
    mcycle: ReadWriteRiscvCsr<usize, value::Register, { MCYCLE }>,
    cycles_per_us: u32,
    call_overhead: u32,
}

impl MachineCycleCounter {
    /// `cpu_mhz` must match the hart clock; it is what converts microseconds
    /// into cycles for every cycle-counted delay.
    pub const fn new(cpu_mhz: u32) -> Self {
        Self::with_call_overhead(cpu_mhz, CYCLE_DELAY_OVERHEAD)
    }

    /// Use a measured call overhead instead of the default.
    pub const fn with_call_overhead(cpu_mhz: u32, call_overhead: u32) -> Self {
        Self {
            mcycle: ReadWriteRiscvCsr::new(),
            cycles_per_us: cpu_mhz,
            call_overhead,
        }
    }
}

impl CycleCounter for MachineCycleCounter {
    #[inline(always)]
    fn cycles(&self) -> u32 {
        self.mcycle.get() as u32
    }

    #[inline(always)]
    fn cycles_per_us(&self) -> u32 {
        self.cycles_per_us
    }

    #[inline(always)]
    fn call_overhead(&self) -> u32 {
        self.call_overhead
    }
}

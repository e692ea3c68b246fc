// Licensed under the Apache-2.0 license.

use fastclock_hil::InterruptControl;
use riscv_csr::csr::{ReadWriteRiscvCsr, MSTATUS};
use tock_registers::interfaces::{ReadWriteable, Readable};
use tock_registers::register_bitfields;

register_bitfields![usize,
    mstatus [
        mie OFFSET(3) NUMBITS(1) [],
    ],
];

/// Machine-mode global interrupt enable (`mstatus.MIE`).
pub struct MachineInterrupts {
    mstatus: ReadWriteRiscvCsr<usize, mstatus::Register, { MSTATUS }>,
}

impl MachineInterrupts {
    pub const fn new() -> Self {
        Self {
            mstatus: ReadWriteRiscvCsr::new(),
        }
    }
}

impl Default for MachineInterrupts {
    fn default() -> Self {
        Self::new()
    }
}

impl InterruptControl for MachineInterrupts {
    fn enable(&self) {
        self.mstatus.modify(mstatus::mie::SET);
    }

    fn disable(&self) {
        self.mstatus.modify(mstatus::mie::CLEAR);
    }

    fn are_enabled(&self) -> bool {
        self.mstatus.is_set(mstatus::mie)
    }
}

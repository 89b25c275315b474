//! Hardware register block backed by the `cortex-m` SCB peripheral.
//!
//! Only compiled with the `hardware` feature on a Cortex-M target that has
//! the fault status registers. On ARMv6-M and ARMv8-M Baseline the type does
//! not exist: the build script leaves `fault_status` unset for both. On
//! ARMv6-M `cortex-m` also drops CFSR/HFSR/MMFAR/BFAR from its SCB register
//! block, but on ARMv8-M Baseline it still declares them, so the
//! `fault_status` cfg is what keeps them out of reach.

use cortex_m::peripheral::{scb::RegisterBlock, SCB};

use crate::registers::{FaultRegister, FaultRegisterBlock};

/// Live SCB fault registers.
pub struct CortexMScb {
    regs: &'static RegisterBlock,
}

impl CortexMScb {
    /// Obtain the fault registers without taking ownership of `SCB`.
    ///
    /// # Safety
    ///
    /// The caller must be the only code accessing CFSR, HFSR, MMFAR and BFAR
    /// while the handle is alive. Fault handlers satisfy this: the core runs
    /// one fault handler at a time, and nothing else in the system touches
    /// these registers. Clearing a sticky bit another context still needs to
    /// read loses that information for good.
    pub unsafe fn steal() -> Self {
        // SAFETY: SCB::PTR is the architectural SCB base address; the block
        // is valid, aligned and 'static for the whole program.
        let regs = unsafe { &*SCB::PTR };
        Self { regs }
    }
}

impl FaultRegisterBlock for CortexMScb {
    fn read(&self, reg: FaultRegister) -> u32 {
        match reg {
            FaultRegister::Cfsr => self.regs.cfsr.read(),
            FaultRegister::Hfsr => self.regs.hfsr.read(),
            FaultRegister::Mmfar => self.regs.mmfar.read(),
            FaultRegister::Bfar => self.regs.bfar.read(),
        }
    }

    fn write(&self, reg: FaultRegister, value: u32) {
        // SAFETY: the status registers are write-one-to-clear and the address
        // registers are plain data; no write here changes memory mapping,
        // execution state or any other invariant the compiler relies on.
        unsafe {
            match reg {
                FaultRegister::Cfsr => self.regs.cfsr.write(value),
                FaultRegister::Hfsr => self.regs.hfsr.write(value),
                FaultRegister::Mmfar => self.regs.mmfar.write(value),
                FaultRegister::Bfar => self.regs.bfar.write(value),
            }
        }
    }
}

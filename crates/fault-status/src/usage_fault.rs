//! UsageFault Status Register view (CFSR bits [31:16]).
//!
//! Usage faults are programming errors detected by the core itself. None of
//! them captures an address: the stacked PC in the exception frame is the
//! only location information, and reading it is the handler's business.

use crate::registers::{cfsr, ufsr_of, FaultRegister, FaultRegisterBlock};

/// Decodes UFSR.
pub struct UsageFaultStatus<'a, B: FaultRegisterBlock> {
    block: &'a B,
    clear_mask: u32,
}

impl<'a, B: FaultRegisterBlock> UsageFaultStatus<'a, B> {
    pub(crate) fn new(block: &'a B, clear_mask: u32) -> Self {
        Self { block, clear_mask }
    }

    fn bit(&self, mask: u32) -> bool {
        self.block.read(FaultRegister::Cfsr) & mask != 0
    }

    /// Raw UFSR half-word.
    pub fn raw(&self) -> u16 {
        ufsr_of(self.block.read(FaultRegister::Cfsr))
    }

    /// Any UFSR bit is set.
    pub fn is_active(&self) -> bool {
        self.raw() != 0
    }

    /// SDIV/UDIV with a zero divisor (requires CCR.DIV_0_TRP).
    pub fn is_divide_by_zero(&self) -> bool {
        self.bit(cfsr::DIVBYZERO)
    }

    /// Unaligned access trapped (CCR.UNALIGN_TRP, or LDM/STM/LDRD/STRD).
    pub fn is_unaligned_access(&self) -> bool {
        self.bit(cfsr::UNALIGNED)
    }

    /// Coprocessor instruction while the coprocessor is absent or disabled.
    pub fn is_missing_coprocessor(&self) -> bool {
        self.bit(cfsr::NOCP)
    }

    /// Exception return loaded an invalid PC: the return address was not
    /// half-word aligned or EXC_RETURN was illegal (INVPC).
    pub fn is_invalid_return_address(&self) -> bool {
        self.bit(cfsr::INVPC)
    }

    /// Execution with EPSR.T clear: a branch, POP, LDR to PC or vector load
    /// supplied an address with bit 0 clear (INVSTATE).
    pub fn is_invalid_execution_state(&self) -> bool {
        self.bit(cfsr::INVSTATE)
    }

    /// The core tried to execute an undefined opcode.
    pub fn is_undefined_instruction(&self) -> bool {
        self.bit(cfsr::UNDEFINSTR)
    }

    /// Stack pointer limit violation (ARMv8-M Mainline only).
    ///
    /// Always `false` on ARMv7-M.
    pub fn is_stack_overflow(&self) -> bool {
        self.bit(cfsr::STKOF)
    }

    /// Clear every UFSR bit.
    ///
    /// The write covers each bit the core variant defines in the half-word,
    /// not a fixed 16-bit pattern. MMFSR and BFSR are untouched.
    pub fn reset_all(&self) {
        #[cfg(feature = "defmt")]
        defmt::trace!("UFSR clear {=u32:#010x}", self.clear_mask);
        self.block.write(FaultRegister::Cfsr, self.clear_mask);
    }
}

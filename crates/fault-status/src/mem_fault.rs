//! MemManage Fault Status Register view (CFSR bits [7:0]) and MMFAR.
//!
//! # Handler protocol
//!
//! 1. Classify with the cause predicates.
//! 2. If [`MemFaultStatus::is_fault_address_valid`] is set, read
//!    [`MemFaultStatus::fault_address`] and keep it.
//! 3. [`MemFaultStatus::invalidate_fault_address`] once the address is
//!    consumed, or [`MemFaultStatus::reset_all`] to clear everything.
//!
//! Clearing is destructive and cannot be undone, so steps 1 and 2 always come
//! first. Two MemManage faults latched before a clear OR their cause bits
//! together; the view cannot tell which event set which bit.

use crate::error::FaultAddressError;
use crate::registers::{cfsr, mmfsr_of, FaultRegister, FaultRegisterBlock};

/// Decodes MMFSR.
///
/// Cause predicates are not mutually exclusive: a stacking fault and a data
/// access violation may both be reported for one exception entry.
pub struct MemFaultStatus<'a, B: FaultRegisterBlock> {
    block: &'a B,
    clear_mask: u32,
}

impl<'a, B: FaultRegisterBlock> MemFaultStatus<'a, B> {
    pub(crate) fn new(block: &'a B, clear_mask: u32) -> Self {
        Self { block, clear_mask }
    }

    fn bit(&self, mask: u32) -> bool {
        self.block.read(FaultRegister::Cfsr) & mask != 0
    }

    /// Raw MMFSR byte.
    pub fn raw(&self) -> u8 {
        mmfsr_of(self.block.read(FaultRegister::Cfsr))
    }

    /// Any MMFSR bit is set.
    pub fn is_active(&self) -> bool {
        self.raw() != 0
    }

    /// MemManage fault while stacking for exception entry.
    ///
    /// The stack pointer itself is usually the problem; MMFAR is not written.
    pub fn is_stacking_fault(&self) -> bool {
        self.bit(cfsr::MSTKERR)
    }

    /// MemManage fault while unstacking on exception return.
    pub fn is_unstacking_fault(&self) -> bool {
        self.bit(cfsr::MUNSTKERR)
    }

    /// Load or store to a location the MPU does not permit.
    ///
    /// MMFAR normally holds the address; check
    /// [`is_fault_address_valid`](Self::is_fault_address_valid).
    pub fn is_data_access_violation(&self) -> bool {
        self.bit(cfsr::DACCVIOL)
    }

    /// Instruction fetch from a location the MPU does not permit.
    ///
    /// MMFAR is not written for this cause; the stacked PC is the address.
    pub fn is_instruction_access_violation(&self) -> bool {
        self.bit(cfsr::IACCVIOL)
    }

    /// MemManage fault during lazy floating-point state preservation.
    ///
    /// Always `false` on cores without the FP extension.
    pub fn is_lazy_state_preservation_fault(&self) -> bool {
        self.bit(cfsr::MLSPERR)
    }

    /// MMFAR holds the faulting address (MMARVALID).
    pub fn is_fault_address_valid(&self) -> bool {
        self.bit(cfsr::MMARVALID)
    }

    /// Raw MMFAR.
    ///
    /// The value is architecturally undefined unless
    /// [`is_fault_address_valid`](Self::is_fault_address_valid) is `true`.
    /// Callers must check validity first, or use
    /// [`checked_fault_address`](Self::checked_fault_address).
    pub fn fault_address(&self) -> u32 {
        self.block.read(FaultRegister::Mmfar)
    }

    /// MMFAR, only if MMARVALID is set.
    pub fn checked_fault_address(&self) -> Result<u32, FaultAddressError> {
        if self.is_fault_address_valid() {
            Ok(self.fault_address())
        } else {
            Err(FaultAddressError::NotValid)
        }
    }

    /// Clear MMARVALID only. Cause bits stay latched.
    pub fn invalidate_fault_address(&self) {
        #[cfg(feature = "defmt")]
        defmt::trace!("MMFSR invalidate MMFAR");
        self.block.write(FaultRegister::Cfsr, cfsr::MMARVALID);
    }

    /// Clear every MMFSR bit, MMARVALID included.
    ///
    /// BFSR and UFSR are untouched.
    pub fn reset_all(&self) {
        #[cfg(feature = "defmt")]
        defmt::trace!("MMFSR clear {=u32:#010x}", self.clear_mask);
        self.block.write(FaultRegister::Cfsr, self.clear_mask);
    }
}

#[cfg(test)]
mod tests {
    use crate::capability::{Armv7m, Simulated};
    use crate::error::FaultAddressError;
    use crate::mocks::SimulatedScb;
    use crate::registers::{cfsr, FaultRegister};
    use crate::FaultStatus;

    fn status() -> FaultStatus<Simulated, SimulatedScb> {
        FaultStatus::new(SimulatedScb::new())
    }

    #[test]
    fn stacking_fault_with_valid_address() {
        let status = status();
        status
            .block()
            .raise_mem_fault(cfsr::MSTKERR, Some(0x2000_1000));

        let mem = status.mem_fault();
        assert!(mem.is_active());
        assert!(mem.is_stacking_fault());
        assert!(!mem.is_unstacking_fault());
        assert!(!mem.is_data_access_violation());
        assert!(!mem.is_instruction_access_violation());
        assert!(!mem.is_lazy_state_preservation_fault());
        assert!(mem.is_fault_address_valid());
        assert_eq!(mem.fault_address(), 0x2000_1000);
        assert_eq!(mem.checked_fault_address(), Ok(0x2000_1000));
    }

    #[test]
    fn causes_may_coexist() {
        let status = status();
        status
            .block()
            .raise_mem_fault(cfsr::MSTKERR | cfsr::DACCVIOL, None);

        let mem = status.mem_fault();
        assert!(mem.is_stacking_fault());
        assert!(mem.is_data_access_violation());
        assert!(!mem.is_fault_address_valid());
        assert_eq!(
            mem.checked_fault_address(),
            Err(FaultAddressError::NotValid)
        );
    }

    #[test]
    fn invalidate_keeps_cause_bits() {
        let status = status();
        status
            .block()
            .raise_mem_fault(cfsr::DACCVIOL, Some(0x0800_0000));

        status.mem_fault().invalidate_fault_address();

        let mem = status.mem_fault();
        assert!(!mem.is_fault_address_valid());
        assert!(mem.is_data_access_violation());
        assert!(mem.is_active());
    }

    #[test]
    fn reset_clears_every_predicate() {
        let status = status();
        status.block().raise_mem_fault(
            cfsr::IACCVIOL | cfsr::DACCVIOL | cfsr::MUNSTKERR | cfsr::MSTKERR | cfsr::MLSPERR,
            Some(0x1234_5678),
        );

        status.mem_fault().reset_all();

        let mem = status.mem_fault();
        assert!(!mem.is_active());
        assert!(!mem.is_stacking_fault());
        assert!(!mem.is_unstacking_fault());
        assert!(!mem.is_data_access_violation());
        assert!(!mem.is_instruction_access_violation());
        assert!(!mem.is_lazy_state_preservation_fault());
        assert!(!mem.is_fault_address_valid());
    }

    #[test]
    fn reset_does_not_touch_other_sub_registers() {
        let status = status();
        status.block().raise_mem_fault(cfsr::DACCVIOL, None);
        status.block().raise_bus_fault(cfsr::IMPRECISERR, None);
        status.block().raise_usage_fault(cfsr::NOCP);

        status.mem_fault().reset_all();

        assert_eq!(
            status.block().peek(FaultRegister::Cfsr),
            cfsr::IMPRECISERR | cfsr::NOCP
        );
    }

    #[test]
    fn armv7m_reset_skips_lazy_fp_bit() {
        let status = FaultStatus::<Armv7m, _>::new(SimulatedScb::new());
        status
            .block()
            .raise_mem_fault(cfsr::DACCVIOL | cfsr::MLSPERR, None);

        status.mem_fault().reset_all();

        // MLSPERR is reserved on ARMv7-M; a real core never latches it, and
        // the reset mask never writes to it.
        assert_eq!(status.block().peek(FaultRegister::Cfsr), cfsr::MLSPERR);
    }

    #[test]
    fn reading_invalid_address_has_no_side_effects() {
        let status = status();
        status.block().raise_mem_fault(cfsr::MUNSTKERR, None);
        let before = status.block().peek(FaultRegister::Cfsr);

        let _ = status.mem_fault().fault_address();

        assert_eq!(status.block().peek(FaultRegister::Cfsr), before);
        assert_eq!(status.block().write_count(), 0);
        assert!(status.mem_fault().is_unstacking_fault());
    }
}

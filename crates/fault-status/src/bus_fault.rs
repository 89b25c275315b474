//! BusFault Status Register view (CFSR bits [15:8]) and BFAR.
//!
//! # Precise and imprecise errors
//!
//! A precise data bus error (PRECISERR) is reported synchronously with the
//! faulting load or store, and the core writes the address to BFAR and sets
//! BFARVALID. An imprecise error (IMPRECISERR) arrives after the instruction
//! has retired, typically from a buffered write; the core has no address to
//! record and BFARVALID stays clear. This is an architectural guarantee, not a
//! choice made here: an address must never be inferred for an imprecise error.
//!
//! Stacking, unstacking and instruction prefetch errors do not write BFAR
//! either.
//!
//! As with the MemManage view, every read precedes any clear, and two faults
//! latched before a clear are indistinguishable in the sub-register.

use crate::error::FaultAddressError;
use crate::registers::{bfsr_of, cfsr, FaultRegister, FaultRegisterBlock};

/// Decodes BFSR.
pub struct BusFaultStatus<'a, B: FaultRegisterBlock> {
    block: &'a B,
    clear_mask: u32,
}

impl<'a, B: FaultRegisterBlock> BusFaultStatus<'a, B> {
    pub(crate) fn new(block: &'a B, clear_mask: u32) -> Self {
        Self { block, clear_mask }
    }

    fn bit(&self, mask: u32) -> bool {
        self.block.read(FaultRegister::Cfsr) & mask != 0
    }

    /// Raw BFSR byte.
    pub fn raw(&self) -> u8 {
        bfsr_of(self.block.read(FaultRegister::Cfsr))
    }

    /// Any BFSR bit is set.
    pub fn is_active(&self) -> bool {
        self.raw() != 0
    }

    /// BusFault while stacking for exception entry.
    pub fn is_stacking_fault(&self) -> bool {
        self.bit(cfsr::STKERR)
    }

    /// BusFault while unstacking on exception return.
    pub fn is_unstacking_fault(&self) -> bool {
        self.bit(cfsr::UNSTKERR)
    }

    /// Imprecise data bus error. No address is ever captured for it.
    pub fn is_imprecise_error(&self) -> bool {
        self.bit(cfsr::IMPRECISERR)
    }

    /// Precise data bus error. BFAR normally holds the address.
    pub fn is_precise_error(&self) -> bool {
        self.bit(cfsr::PRECISERR)
    }

    /// Bus error on instruction prefetch.
    ///
    /// Only signalled when the faulting instruction is issued.
    pub fn is_instruction_bus_error(&self) -> bool {
        self.bit(cfsr::IBUSERR)
    }

    /// BusFault during lazy floating-point state preservation.
    ///
    /// Always `false` on cores without the FP extension.
    pub fn is_lazy_state_preservation_fault(&self) -> bool {
        self.bit(cfsr::LSPERR)
    }

    /// BFAR holds the faulting address (BFARVALID).
    ///
    /// Can only be set together with a precise error.
    pub fn is_fault_address_valid(&self) -> bool {
        self.bit(cfsr::BFARVALID)
    }

    /// Raw BFAR.
    ///
    /// Defined only for a precise error with
    /// [`is_fault_address_valid`](Self::is_fault_address_valid) set; in every
    /// other case the value is architecturally undefined and must not be
    /// used. Callers must check validity first, or use
    /// [`checked_fault_address`](Self::checked_fault_address).
    pub fn fault_address(&self) -> u32 {
        self.block.read(FaultRegister::Bfar)
    }

    /// BFAR, only if BFARVALID is set.
    ///
    /// Reports [`FaultAddressError::Imprecise`] when the only data error
    /// latched is imprecise, so the caller knows no address will ever exist
    /// for this event, and [`FaultAddressError::NotValid`] otherwise.
    pub fn checked_fault_address(&self) -> Result<u32, FaultAddressError> {
        let word = self.block.read(FaultRegister::Cfsr);
        if word & cfsr::BFARVALID != 0 {
            Ok(self.fault_address())
        } else if word & cfsr::IMPRECISERR != 0 && word & cfsr::PRECISERR == 0 {
            Err(FaultAddressError::Imprecise)
        } else {
            Err(FaultAddressError::NotValid)
        }
    }

    /// Clear BFARVALID only. Cause bits stay latched.
    pub fn invalidate_fault_address(&self) {
        #[cfg(feature = "defmt")]
        defmt::trace!("BFSR invalidate BFAR");
        self.block.write(FaultRegister::Cfsr, cfsr::BFARVALID);
    }

    /// Clear every BFSR bit, BFARVALID included.
    ///
    /// MMFSR and UFSR are untouched.
    pub fn reset_all(&self) {
        #[cfg(feature = "defmt")]
        defmt::trace!("BFSR clear {=u32:#010x}", self.clear_mask);
        self.block.write(FaultRegister::Cfsr, self.clear_mask);
    }
}

#[cfg(test)]
mod tests {
    use crate::capability::Simulated;
    use crate::error::FaultAddressError;
    use crate::mocks::SimulatedScb;
    use crate::registers::{cfsr, FaultRegister};
    use crate::FaultStatus;

    fn status() -> FaultStatus<Simulated, SimulatedScb> {
        FaultStatus::new(SimulatedScb::new())
    }

    #[test]
    fn imprecise_error_has_no_address() {
        let status = status();
        status.block().raise_bus_fault(cfsr::IMPRECISERR, None);

        let bus = status.bus_fault();
        assert!(bus.is_active());
        assert!(bus.is_imprecise_error());
        assert!(!bus.is_precise_error());
        assert!(!bus.is_fault_address_valid());
        assert_eq!(
            bus.checked_fault_address(),
            Err(FaultAddressError::Imprecise)
        );
    }

    #[test]
    fn precise_error_reports_bfar() {
        let status = status();
        status
            .block()
            .raise_bus_fault(cfsr::PRECISERR, Some(0x6000_0000));

        let bus = status.bus_fault();
        assert!(bus.is_precise_error());
        assert!(bus.is_fault_address_valid());
        assert_eq!(bus.fault_address(), 0x6000_0000);
        assert_eq!(bus.checked_fault_address(), Ok(0x6000_0000));
    }

    #[test]
    fn precise_without_valid_flag_is_not_valid() {
        let status = status();
        status
            .block()
            .raise_bus_fault(cfsr::PRECISERR | cfsr::IMPRECISERR, None);

        assert_eq!(
            status.bus_fault().checked_fault_address(),
            Err(FaultAddressError::NotValid)
        );
    }

    #[test]
    fn stacking_and_prefetch_causes_are_independent() {
        let status = status();
        status
            .block()
            .raise_bus_fault(cfsr::STKERR | cfsr::IBUSERR, None);

        let bus = status.bus_fault();
        assert!(bus.is_stacking_fault());
        assert!(bus.is_instruction_bus_error());
        assert!(!bus.is_unstacking_fault());
        assert!(!bus.is_imprecise_error());
        assert!(!bus.is_precise_error());
        assert!(!bus.is_lazy_state_preservation_fault());
    }

    #[test]
    fn invalidate_keeps_precise_bit() {
        let status = status();
        status
            .block()
            .raise_bus_fault(cfsr::PRECISERR, Some(0x4002_0000));

        status.bus_fault().invalidate_fault_address();

        let bus = status.bus_fault();
        assert!(!bus.is_fault_address_valid());
        assert!(bus.is_precise_error());
        // BFAR itself is not cleared, only its validity flag.
        assert_eq!(status.block().peek(FaultRegister::Bfar), 0x4002_0000);
    }

    #[test]
    fn reset_clears_every_predicate() {
        let status = status();
        status.block().raise_bus_fault(
            cfsr::IBUSERR
                | cfsr::PRECISERR
                | cfsr::IMPRECISERR
                | cfsr::UNSTKERR
                | cfsr::STKERR
                | cfsr::LSPERR,
            Some(0xDEAD_BEE0),
        );

        status.bus_fault().reset_all();

        let bus = status.bus_fault();
        assert!(!bus.is_active());
        assert!(!bus.is_stacking_fault());
        assert!(!bus.is_unstacking_fault());
        assert!(!bus.is_imprecise_error());
        assert!(!bus.is_precise_error());
        assert!(!bus.is_instruction_bus_error());
        assert!(!bus.is_lazy_state_preservation_fault());
        assert!(!bus.is_fault_address_valid());
    }

    #[test]
    fn reset_does_not_touch_other_sub_registers() {
        let status = status();
        status.block().raise_cfsr(cfsr::MSTKERR | cfsr::UNSTKERR | cfsr::DIVBYZERO);

        status.bus_fault().reset_all();

        assert_eq!(
            status.block().peek(FaultRegister::Cfsr),
            cfsr::MSTKERR | cfsr::DIVBYZERO
        );
    }
}

//! Entry point tying a register block to a core variant.

use core::marker::PhantomData;

use crate::bus_fault::BusFaultStatus;
use crate::capability::FaultStatusCapable;
use crate::hard_fault::HardFaultStatus;
use crate::mem_fault::MemFaultStatus;
use crate::registers::{cfsr, FaultRegister, FaultRegisterBlock};
use crate::usage_fault::UsageFaultStatus;

/// The fault status facility for core variant `V` over register block `B`.
///
/// Exists only for variants implementing [`FaultStatusCapable`]. Views are
/// borrowed from it and share the one backing block; none of them caches a
/// register value.
pub struct FaultStatus<V: FaultStatusCapable, B: FaultRegisterBlock> {
    block: B,
    core: PhantomData<V>,
}

impl<V: FaultStatusCapable, B: FaultRegisterBlock> FaultStatus<V, B> {
    /// Wrap a register block.
    pub const fn new(block: B) -> Self {
        Self {
            block,
            core: PhantomData,
        }
    }

    /// The underlying register block.
    pub fn block(&self) -> &B {
        &self.block
    }

    /// Give the register block back.
    pub fn into_inner(self) -> B {
        self.block
    }

    /// HFSR view.
    pub fn hard_fault(&self) -> HardFaultStatus<'_, B> {
        HardFaultStatus::new(&self.block, V::HFSR_CLEAR)
    }

    /// MMFSR + MMFAR view.
    pub fn mem_fault(&self) -> MemFaultStatus<'_, B> {
        MemFaultStatus::new(&self.block, V::MMFSR_CLEAR)
    }

    /// BFSR + BFAR view.
    pub fn bus_fault(&self) -> BusFaultStatus<'_, B> {
        BusFaultStatus::new(&self.block, V::BFSR_CLEAR)
    }

    /// UFSR view.
    pub fn usage_fault(&self) -> UsageFaultStatus<'_, B> {
        UsageFaultStatus::new(&self.block, V::UFSR_CLEAR)
    }

    /// Any bit [`reset_all`](Self::reset_all) would clear is latched.
    ///
    /// HFSR.DEBUGEVT is not a fault and is not counted.
    pub fn is_any_fault_latched(&self) -> bool {
        self.block.read(FaultRegister::Cfsr) & cfsr_defined::<V>() != 0
            || self.block.read(FaultRegister::Hfsr) & V::HFSR_CLEAR != 0
    }

    /// Reset all four views: CFSR in one write, then HFSR.
    ///
    /// Same effect as calling each view's `reset_all` in turn.
    pub fn reset_all(&self) {
        #[cfg(feature = "defmt")]
        defmt::trace!("{=str}: clear all fault status", V::NAME);
        self.block.write(FaultRegister::Cfsr, cfsr_defined::<V>());
        self.block.write(FaultRegister::Hfsr, V::HFSR_CLEAR);
    }
}

const fn cfsr_defined<V: FaultStatusCapable>() -> u32 {
    V::MMFSR_CLEAR | V::BFSR_CLEAR | V::UFSR_CLEAR
}

// Compile-time check: the per-variant masks never reach outside their own
// sub-register.
const _: () = {
    use crate::capability::{Armv7em, Armv7m, Armv8mMainline, Simulated};
    assert!(Armv7m::MMFSR_CLEAR & !cfsr::MMFSR_MASK == 0);
    assert!(Armv7em::BFSR_CLEAR & !cfsr::BFSR_MASK == 0);
    assert!(Armv8mMainline::UFSR_CLEAR & !cfsr::UFSR_MASK == 0);
    assert!(Simulated::MMFSR_CLEAR & !cfsr::MMFSR_MASK == 0);
    assert!(Simulated::BFSR_CLEAR & !cfsr::BFSR_MASK == 0);
    assert!(Simulated::UFSR_CLEAR & !cfsr::UFSR_MASK == 0);
};

#[cfg(all(feature = "hardware", fault_status, not(core_host)))]
impl FaultStatus<crate::capability::TargetCore, crate::scb::CortexMScb> {
    /// Fault status facility over the live SCB of the running core.
    ///
    /// # Safety
    ///
    /// Same contract as [`CortexMScb::steal`](crate::scb::CortexMScb::steal):
    /// call from a fault handler, or from code that otherwise has exclusive
    /// use of the fault status registers.
    pub unsafe fn steal() -> Self {
        // SAFETY: forwarded to the caller.
        Self::new(unsafe { crate::scb::CortexMScb::steal() })
    }
}

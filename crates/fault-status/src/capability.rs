//! Core-variant capability gate.
//!
//! Only some Cortex-M profiles implement CFSR/HFSR/MMFAR/BFAR:
//!
//! | Variant            | Fault status registers | MLSPERR / LSPERR | STKOF |
//! |--------------------|------------------------|------------------|-------|
//! | [`Armv6m`]         | no                     | n/a              | n/a   |
//! | [`Armv7m`]         | yes                    | no               | no    |
//! | [`Armv7em`]        | yes                    | yes (FP)         | no    |
//! | [`Armv8mBaseline`] | no                     | n/a              | n/a   |
//! | [`Armv8mMainline`] | yes                    | yes (FP)         | yes   |
//! | [`Simulated`]      | yes                    | yes              | yes   |
//!
//! Every variant implements [`CoreVariant`]. Only variants with the registers
//! implement [`FaultStatusCapable`], and [`FaultStatus`](crate::FaultStatus)
//! cannot be named for any other variant, so an unsupported core never
//! reaches a register access:
//!
//! ```compile_fail
//! use fault_status::capability::Armv6m;
//! use fault_status::registers::{FaultRegister, FaultRegisterBlock};
//! use fault_status::FaultStatus;
//!
//! struct Zeroed;
//!
//! impl FaultRegisterBlock for Zeroed {
//!     fn read(&self, _reg: FaultRegister) -> u32 {
//!         0
//!     }
//!     fn write(&self, _reg: FaultRegister, _value: u32) {}
//! }
//!
//! // ARMv6-M has no configurable fault status registers.
//! let status = FaultStatus::<Armv6m, _>::new(Zeroed);
//! ```
//!
//! [`TargetCore`] is the variant selected for the current compilation target
//! by the build script.

use crate::registers::{cfsr, hfsr};

/// A Cortex-M profile.
pub trait CoreVariant {
    /// Human-readable profile name.
    const NAME: &'static str;

    /// Whether the profile implements the fault status registers.
    const HAS_FAULT_STATUS: bool;
}

/// A profile that implements CFSR, HFSR, MMFAR and BFAR.
///
/// The clear masks are derived from the optional-bit flags so that a clear
/// never writes 1 to a bit the profile reserves.
pub trait FaultStatusCapable: CoreVariant {
    /// MLSPERR / LSPERR exist (floating-point extension with lazy stacking).
    const HAS_LAZY_FP: bool;

    /// UFSR.STKOF exists (stack limit checking).
    const HAS_STACK_OVERFLOW: bool;

    /// Every MMFSR bit a reset writes, including MMARVALID.
    const MMFSR_CLEAR: u32 = if Self::HAS_LAZY_FP {
        cfsr::MMFSR_BASE_BITS | cfsr::MLSPERR
    } else {
        cfsr::MMFSR_BASE_BITS
    };

    /// Every BFSR bit a reset writes, including BFARVALID.
    const BFSR_CLEAR: u32 = if Self::HAS_LAZY_FP {
        cfsr::BFSR_BASE_BITS | cfsr::LSPERR
    } else {
        cfsr::BFSR_BASE_BITS
    };

    /// Every UFSR bit a reset writes.
    const UFSR_CLEAR: u32 = if Self::HAS_STACK_OVERFLOW {
        cfsr::UFSR_BASE_BITS | cfsr::STKOF
    } else {
        cfsr::UFSR_BASE_BITS
    };

    /// HFSR bits a reset writes. DEBUGEVT is left to the debugger.
    const HFSR_CLEAR: u32 = hfsr::CLEARABLE;
}

/// ARMv6-M (Cortex-M0/M0+/M1). HardFault only, no fault status registers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Armv6m;

/// ARMv7-M (Cortex-M3).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Armv7m;

/// ARMv7E-M (Cortex-M4/M7).
///
/// MLSPERR/LSPERR read as zero on parts built without the FPU.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Armv7em;

/// ARMv8-M Baseline (Cortex-M23). HardFault only, no fault status registers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Armv8mBaseline;

/// ARMv8-M Mainline (Cortex-M33/M35P/M55).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Armv8mMainline;

/// Host-side model with every optional bit present.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Simulated;

impl CoreVariant for Armv6m {
    const NAME: &'static str = "ARMv6-M";
    const HAS_FAULT_STATUS: bool = false;
}

impl CoreVariant for Armv7m {
    const NAME: &'static str = "ARMv7-M";
    const HAS_FAULT_STATUS: bool = true;
}

impl CoreVariant for Armv7em {
    const NAME: &'static str = "ARMv7E-M";
    const HAS_FAULT_STATUS: bool = true;
}

impl CoreVariant for Armv8mBaseline {
    const NAME: &'static str = "ARMv8-M Baseline";
    const HAS_FAULT_STATUS: bool = false;
}

impl CoreVariant for Armv8mMainline {
    const NAME: &'static str = "ARMv8-M Mainline";
    const HAS_FAULT_STATUS: bool = true;
}

impl CoreVariant for Simulated {
    const NAME: &'static str = "simulated";
    const HAS_FAULT_STATUS: bool = true;
}

impl FaultStatusCapable for Armv7m {
    const HAS_LAZY_FP: bool = false;
    const HAS_STACK_OVERFLOW: bool = false;
}

impl FaultStatusCapable for Armv7em {
    const HAS_LAZY_FP: bool = true;
    const HAS_STACK_OVERFLOW: bool = false;
}

impl FaultStatusCapable for Armv8mMainline {
    const HAS_LAZY_FP: bool = true;
    const HAS_STACK_OVERFLOW: bool = true;
}

impl FaultStatusCapable for Simulated {
    const HAS_LAZY_FP: bool = true;
    const HAS_STACK_OVERFLOW: bool = true;
}

// A capable variant that claims not to have the registers is a table error.
const _: () = assert!(Armv7m::HAS_FAULT_STATUS);
const _: () = assert!(Armv7em::HAS_FAULT_STATUS);
const _: () = assert!(Armv8mMainline::HAS_FAULT_STATUS);
const _: () = assert!(Simulated::HAS_FAULT_STATUS);

/// Variant for the current compilation target.
#[cfg(core_armv6m)]
pub type TargetCore = Armv6m;
/// Variant for the current compilation target.
#[cfg(core_armv7m)]
pub type TargetCore = Armv7m;
/// Variant for the current compilation target.
#[cfg(core_armv7em)]
pub type TargetCore = Armv7em;
/// Variant for the current compilation target.
#[cfg(core_armv8m_base)]
pub type TargetCore = Armv8mBaseline;
/// Variant for the current compilation target.
#[cfg(core_armv8m_main)]
pub type TargetCore = Armv8mMainline;
/// Variant for the current compilation target.
#[cfg(core_host)]
pub type TargetCore = Simulated;

/// Whether the current target implements the fault status registers.
///
/// Informational only: on targets where this is `false` the register-backed
/// facility does not exist, so there is nothing to branch around.
pub const TARGET_HAS_FAULT_STATUS: bool = <TargetCore as CoreVariant>::HAS_FAULT_STATUS;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn host_build_selects_simulated_core() {
        assert_eq!(TargetCore::NAME, Simulated::NAME);
        assert!(TARGET_HAS_FAULT_STATUS);
    }

    #[test]
    fn armv7m_masks_exclude_optional_bits() {
        assert_eq!(Armv7m::MMFSR_CLEAR & cfsr::MLSPERR, 0);
        assert_eq!(Armv7m::BFSR_CLEAR & cfsr::LSPERR, 0);
        assert_eq!(Armv7m::UFSR_CLEAR & cfsr::STKOF, 0);
        assert_eq!(Armv7m::MMFSR_CLEAR, 0x9B);
        assert_eq!(Armv7m::BFSR_CLEAR, 0x9F00);
        assert_eq!(Armv7m::UFSR_CLEAR, 0x030F_0000);
    }

    #[test]
    fn fp_variants_clear_lazy_stacking_bits() {
        assert_ne!(Armv7em::MMFSR_CLEAR & cfsr::MLSPERR, 0);
        assert_ne!(Armv7em::BFSR_CLEAR & cfsr::LSPERR, 0);
        assert_eq!(Armv7em::UFSR_CLEAR & cfsr::STKOF, 0);
        assert_ne!(Armv8mMainline::UFSR_CLEAR & cfsr::STKOF, 0);
    }

    #[test]
    fn memory_clear_includes_instruction_access_violation() {
        // The whole byte minus reserved bits, bit 0 included.
        assert_ne!(Armv7m::MMFSR_CLEAR & cfsr::IACCVIOL, 0);
        assert_ne!(Armv7m::MMFSR_CLEAR & cfsr::MMARVALID, 0);
    }

    #[test]
    fn hard_fault_clear_covers_forced_but_not_debug_event() {
        assert_ne!(Armv7m::HFSR_CLEAR & hfsr::FORCED, 0);
        assert_ne!(Armv7m::HFSR_CLEAR & hfsr::VECTTBL, 0);
        assert_eq!(Armv7m::HFSR_CLEAR & hfsr::DEBUGEVT, 0);
    }

    #[test]
    fn baseline_profiles_report_unsupported() {
        assert!(!Armv6m::HAS_FAULT_STATUS);
        assert!(!Armv8mBaseline::HAS_FAULT_STATUS);
    }
}

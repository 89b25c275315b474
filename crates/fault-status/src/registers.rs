//! System Control Block fault status register map
//!
//! Sources:
//! - ARMv7-M Architecture Reference Manual (DDI0403E) §B3.2.15–B3.2.18
//! - ARMv8-M Architecture Reference Manual (DDI0553): CFSR/HFSR/MMFAR/BFAR
//! - Cortex-M4 Generic User Guide (DUI0553) §4.3.10–4.3.13
//!
//! # Layout
//!
//! | Register | Address       | Access | Contents                              |
//! |----------|---------------|--------|---------------------------------------|
//! | CFSR     | `0xE000_ED28` | W1C    | MMFSR `[7:0]`, BFSR `[15:8]`, UFSR `[31:16]` |
//! | HFSR     | `0xE000_ED2C` | W1C    | VECTTBL, FORCED, DEBUGEVT             |
//! | MMFAR    | `0xE000_ED34` | RW     | MemManage fault address               |
//! | BFAR     | `0xE000_ED38` | RW     | BusFault address                      |
//!
//! CFSR is one 32-bit word holding three independent sub-registers. Every
//! status bit is sticky and write-one-to-clear: writing a word with only the
//! bits of one sub-register set clears those bits and leaves the other two
//! sub-registers untouched, so clearing is always a full-word write of a mask
//! and never a read-modify-write.
//!
//! On Cortex-M3/M4/M7 MMFAR and BFAR share one physical register. At most one
//! of MMARVALID / BFARVALID is set at a time; reading the other address
//! register returns whatever the shared storage holds.

// ---------------------------------------------------------------------------
// Register addresses
// ---------------------------------------------------------------------------

/// Configurable Fault Status Register.
pub const CFSR_ADDR: u32 = 0xE000_ED28;

/// HardFault Status Register.
pub const HFSR_ADDR: u32 = 0xE000_ED2C;

/// MemManage Fault Address Register.
pub const MMFAR_ADDR: u32 = 0xE000_ED34;

/// BusFault Address Register.
pub const BFAR_ADDR: u32 = 0xE000_ED38;

/// The four registers this crate touches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FaultRegister {
    /// Configurable Fault Status Register (MMFSR + BFSR + UFSR).
    Cfsr,
    /// HardFault Status Register.
    Hfsr,
    /// MemManage Fault Address Register.
    Mmfar,
    /// BusFault Address Register.
    Bfar,
}

impl FaultRegister {
    /// Every fault register, in address order.
    pub const ALL: [FaultRegister; 4] = [Self::Cfsr, Self::Hfsr, Self::Mmfar, Self::Bfar];

    /// Architectural address of the register.
    pub const fn address(self) -> u32 {
        match self {
            Self::Cfsr => CFSR_ADDR,
            Self::Hfsr => HFSR_ADDR,
            Self::Mmfar => MMFAR_ADDR,
            Self::Bfar => BFAR_ADDR,
        }
    }

    /// `true` for the status registers, whose bits are cleared by writing 1.
    pub const fn is_write_one_to_clear(self) -> bool {
        matches!(self, Self::Cfsr | Self::Hfsr)
    }

    /// Short register mnemonic for log output.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Cfsr => "CFSR",
            Self::Hfsr => "HFSR",
            Self::Mmfar => "MMFAR",
            Self::Bfar => "BFAR",
        }
    }
}

// ---------------------------------------------------------------------------
// CFSR fields
// ---------------------------------------------------------------------------

/// CFSR bit positions, given in CFSR (full word) coordinates.
pub mod cfsr {
    // ── MMFSR, bits [7:0] ───────────────────────────────────────────────────

    /// Instruction fetch from a location the MPU does not permit (or XN region).
    pub const IACCVIOL: u32 = 1 << 0;
    /// Load or store to a location the MPU does not permit.
    pub const DACCVIOL: u32 = 1 << 1;
    // bit 2 reserved
    /// MemManage fault on exception return unstacking.
    pub const MUNSTKERR: u32 = 1 << 3;
    /// MemManage fault on exception entry stacking.
    pub const MSTKERR: u32 = 1 << 4;
    /// MemManage fault during lazy floating-point state preservation.
    pub const MLSPERR: u32 = 1 << 5;
    // bit 6 reserved
    /// MMFAR holds a valid fault address.
    pub const MMARVALID: u32 = 1 << 7;

    /// Whole MMFSR byte.
    pub const MMFSR_MASK: u32 = 0x0000_00FF;
    /// MMFSR position inside CFSR.
    pub const MMFSR_SHIFT: u32 = 0;

    // ── BFSR, bits [15:8] ───────────────────────────────────────────────────

    /// Bus error on instruction prefetch (signalled only if the instruction issues).
    pub const IBUSERR: u32 = 1 << 8;
    /// Precise data bus error; BFAR is written with the address.
    pub const PRECISERR: u32 = 1 << 9;
    /// Imprecise data bus error; no address is captured.
    pub const IMPRECISERR: u32 = 1 << 10;
    /// BusFault on exception return unstacking.
    pub const UNSTKERR: u32 = 1 << 11;
    /// BusFault on exception entry stacking.
    pub const STKERR: u32 = 1 << 12;
    /// BusFault during lazy floating-point state preservation.
    pub const LSPERR: u32 = 1 << 13;
    // bit 14 reserved
    /// BFAR holds a valid fault address.
    pub const BFARVALID: u32 = 1 << 15;

    /// Whole BFSR byte.
    pub const BFSR_MASK: u32 = 0x0000_FF00;
    /// BFSR position inside CFSR.
    pub const BFSR_SHIFT: u32 = 8;

    // ── UFSR, bits [31:16] ──────────────────────────────────────────────────

    /// Undefined instruction.
    pub const UNDEFINSTR: u32 = 1 << 16;
    /// Branch to an address with EPSR.T clear (invalid execution state).
    pub const INVSTATE: u32 = 1 << 17;
    /// Invalid EXC_RETURN or integrity check failure on exception return.
    pub const INVPC: u32 = 1 << 18;
    /// Coprocessor access while the coprocessor is absent or disabled.
    pub const NOCP: u32 = 1 << 19;
    /// Stack pointer limit check failed (ARMv8-M Mainline only).
    pub const STKOF: u32 = 1 << 20;
    // bits 21..=23 reserved
    /// Unaligned access with CCR.UNALIGN_TRP set, or unaligned LDM/STM/LDRD.
    pub const UNALIGNED: u32 = 1 << 24;
    /// SDIV/UDIV with a zero divisor while CCR.DIV_0_TRP is set.
    pub const DIVBYZERO: u32 = 1 << 25;
    // bits 26..=31 reserved

    /// Whole UFSR half-word.
    pub const UFSR_MASK: u32 = 0xFFFF_0000;
    /// UFSR position inside CFSR.
    pub const UFSR_SHIFT: u32 = 16;

    // ── Defined-bit masks ───────────────────────────────────────────────────

    /// MMFSR bits defined on every core that has the register.
    pub const MMFSR_BASE_BITS: u32 = IACCVIOL | DACCVIOL | MUNSTKERR | MSTKERR | MMARVALID;
    /// BFSR bits defined on every core that has the register.
    pub const BFSR_BASE_BITS: u32 = IBUSERR | PRECISERR | IMPRECISERR | UNSTKERR | STKERR | BFARVALID;
    /// UFSR bits defined on every core that has the register.
    pub const UFSR_BASE_BITS: u32 = UNDEFINSTR | INVSTATE | INVPC | NOCP | UNALIGNED | DIVBYZERO;
    /// Every CFSR bit defined on any profile, optional ones included.
    pub const DEFINED: u32 = MMFSR_BASE_BITS
        | MLSPERR
        | BFSR_BASE_BITS
        | LSPERR
        | UFSR_BASE_BITS
        | STKOF;
}

// ---------------------------------------------------------------------------
// HFSR fields
// ---------------------------------------------------------------------------

/// HFSR bit positions.
pub mod hfsr {
    /// BusFault on a vector table read during exception processing.
    pub const VECTTBL: u32 = 1 << 1;
    /// A configurable fault was escalated to HardFault.
    pub const FORCED: u32 = 1 << 30;
    /// Debug event. Reserved for debugger use; software must write 0.
    pub const DEBUGEVT: u32 = 1 << 31;

    /// Bits software is permitted to clear.
    pub const CLEARABLE: u32 = VECTTBL | FORCED;
    /// Every defined HFSR bit.
    pub const DEFINED: u32 = VECTTBL | FORCED | DEBUGEVT;
}

// ---------------------------------------------------------------------------
// Register block access
// ---------------------------------------------------------------------------

/// Word access to the fault register block.
///
/// `write` has hardware semantics: for [`FaultRegister::Cfsr`] and
/// [`FaultRegister::Hfsr`] it is a write-one-to-clear, for the address
/// registers a plain store. `read` never changes state.
///
/// Both methods take `&self`: the registers are shared memory-mapped state
/// and the block handle is only a window onto them.
pub trait FaultRegisterBlock {
    /// Read the current 32-bit value of `reg`.
    fn read(&self, reg: FaultRegister) -> u32;

    /// Write `value` to `reg`.
    fn write(&self, reg: FaultRegister, value: u32);
}

impl<T: FaultRegisterBlock + ?Sized> FaultRegisterBlock for &T {
    fn read(&self, reg: FaultRegister) -> u32 {
        (**self).read(reg)
    }

    fn write(&self, reg: FaultRegister, value: u32) {
        (**self).write(reg, value);
    }
}

/// Extract the MMFSR byte from a CFSR word.
// MMFSR_MASK keeps bits [7:0] only, so the value fits u8.
#[allow(clippy::cast_possible_truncation)]
pub const fn mmfsr_of(cfsr_word: u32) -> u8 {
    ((cfsr_word & cfsr::MMFSR_MASK) >> cfsr::MMFSR_SHIFT) as u8
}

/// Extract the BFSR byte from a CFSR word.
// BFSR_MASK >> 8 keeps bits [7:0] only, so the value fits u8.
#[allow(clippy::cast_possible_truncation)]
pub const fn bfsr_of(cfsr_word: u32) -> u8 {
    ((cfsr_word & cfsr::BFSR_MASK) >> cfsr::BFSR_SHIFT) as u8
}

/// Extract the UFSR half-word from a CFSR word.
// UFSR_MASK >> 16 keeps bits [15:0] only, so the value fits u16.
#[allow(clippy::cast_possible_truncation)]
pub const fn ufsr_of(cfsr_word: u32) -> u16 {
    ((cfsr_word & cfsr::UFSR_MASK) >> cfsr::UFSR_SHIFT) as u16
}

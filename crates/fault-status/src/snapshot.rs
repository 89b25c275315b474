//! One-shot capture of every fault register.
//!
//! A handler that wants the whole picture reads the block once with
//! [`FaultSnapshot::capture`], logs or reports from the plain value, and then
//! calls [`FaultStatus::acknowledge`](crate::FaultStatus::acknowledge), which
//! clears only the bits the snapshot saw. A fault latched between capture and
//! acknowledge keeps its bits and is seen on the next pass.
//!
//! Bits from two events that hit the same sub-register before the capture are
//! merged by the hardware; the snapshot reports their union.

use heapless::Vec;

use crate::capability::FaultStatusCapable;
use crate::registers::{cfsr, hfsr, FaultRegister, FaultRegisterBlock};
use crate::FaultStatus;

/// Upper bound on the number of distinct causes a snapshot can report.
pub const MAX_CAUSES: usize = 24;

/// A single decoded cause bit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FaultCause {
    /// HFSR.VECTTBL
    VectorTableRead,
    /// HFSR.FORCED
    Forced,
    /// HFSR.DEBUGEVT
    DebugEvent,
    /// MMFSR.IACCVIOL
    InstructionAccessViolation,
    /// MMFSR.DACCVIOL
    DataAccessViolation,
    /// MMFSR.MUNSTKERR
    MemUnstacking,
    /// MMFSR.MSTKERR
    MemStacking,
    /// MMFSR.MLSPERR
    MemLazyStatePreservation,
    /// BFSR.IBUSERR
    InstructionBusError,
    /// BFSR.PRECISERR
    PreciseDataBusError,
    /// BFSR.IMPRECISERR
    ImpreciseDataBusError,
    /// BFSR.UNSTKERR
    BusUnstacking,
    /// BFSR.STKERR
    BusStacking,
    /// BFSR.LSPERR
    BusLazyStatePreservation,
    /// UFSR.UNDEFINSTR
    UndefinedInstruction,
    /// UFSR.INVSTATE
    InvalidState,
    /// UFSR.INVPC
    InvalidPcLoad,
    /// UFSR.NOCP
    NoCoprocessor,
    /// UFSR.STKOF
    StackOverflow,
    /// UFSR.UNALIGNED
    UnalignedAccess,
    /// UFSR.DIVBYZERO
    DivideByZero,
}

impl FaultCause {
    /// Human-readable description.
    pub const fn description(self) -> &'static str {
        match self {
            Self::VectorTableRead => "bus fault on vector table read",
            Self::Forced => "configurable fault escalated to HardFault",
            Self::DebugEvent => "debug event",
            Self::InstructionAccessViolation => "instruction access violation",
            Self::DataAccessViolation => "data access violation",
            Self::MemUnstacking => "MemManage fault on unstacking",
            Self::MemStacking => "MemManage fault on stacking",
            Self::MemLazyStatePreservation => "MemManage fault on lazy FP preservation",
            Self::InstructionBusError => "instruction bus error",
            Self::PreciseDataBusError => "precise data bus error",
            Self::ImpreciseDataBusError => "imprecise data bus error",
            Self::BusUnstacking => "BusFault on unstacking",
            Self::BusStacking => "BusFault on stacking",
            Self::BusLazyStatePreservation => "BusFault on lazy FP preservation",
            Self::UndefinedInstruction => "undefined instruction",
            Self::InvalidState => "invalid execution state",
            Self::InvalidPcLoad => "invalid PC load on exception return",
            Self::NoCoprocessor => "no coprocessor",
            Self::StackOverflow => "stack limit violation",
            Self::UnalignedAccess => "unaligned access",
            Self::DivideByZero => "divide by zero",
        }
    }

    /// The fault class this cause belongs to.
    pub const fn category(self) -> FaultCategory {
        match self {
            Self::VectorTableRead | Self::Forced | Self::DebugEvent => FaultCategory::HardFault,
            Self::InstructionAccessViolation
            | Self::DataAccessViolation
            | Self::MemUnstacking
            | Self::MemStacking
            | Self::MemLazyStatePreservation => FaultCategory::MemManage,
            Self::InstructionBusError
            | Self::PreciseDataBusError
            | Self::ImpreciseDataBusError
            | Self::BusUnstacking
            | Self::BusStacking
            | Self::BusLazyStatePreservation => FaultCategory::BusFault,
            Self::UndefinedInstruction
            | Self::InvalidState
            | Self::InvalidPcLoad
            | Self::NoCoprocessor
            | Self::StackOverflow
            | Self::UnalignedAccess
            | Self::DivideByZero => FaultCategory::UsageFault,
        }
    }
}

/// Fault class, in the order the core prioritises the configurable faults.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FaultCategory {
    /// Nothing latched.
    None,
    /// Vector table read failure, or an escalation with no CFSR cause left.
    HardFault,
    /// MemManage (exception 4).
    MemManage,
    /// BusFault (exception 5).
    BusFault,
    /// UsageFault (exception 6).
    UsageFault,
}

const HFSR_CAUSES: [(u32, FaultCause); 3] = [
    (hfsr::VECTTBL, FaultCause::VectorTableRead),
    (hfsr::FORCED, FaultCause::Forced),
    (hfsr::DEBUGEVT, FaultCause::DebugEvent),
];

const CFSR_CAUSES: [(u32, FaultCause); 18] = [
    (cfsr::IACCVIOL, FaultCause::InstructionAccessViolation),
    (cfsr::DACCVIOL, FaultCause::DataAccessViolation),
    (cfsr::MUNSTKERR, FaultCause::MemUnstacking),
    (cfsr::MSTKERR, FaultCause::MemStacking),
    (cfsr::MLSPERR, FaultCause::MemLazyStatePreservation),
    (cfsr::IBUSERR, FaultCause::InstructionBusError),
    (cfsr::PRECISERR, FaultCause::PreciseDataBusError),
    (cfsr::IMPRECISERR, FaultCause::ImpreciseDataBusError),
    (cfsr::UNSTKERR, FaultCause::BusUnstacking),
    (cfsr::STKERR, FaultCause::BusStacking),
    (cfsr::LSPERR, FaultCause::BusLazyStatePreservation),
    (cfsr::UNDEFINSTR, FaultCause::UndefinedInstruction),
    (cfsr::INVSTATE, FaultCause::InvalidState),
    (cfsr::INVPC, FaultCause::InvalidPcLoad),
    (cfsr::NOCP, FaultCause::NoCoprocessor),
    (cfsr::STKOF, FaultCause::StackOverflow),
    (cfsr::UNALIGNED, FaultCause::UnalignedAccess),
    (cfsr::DIVBYZERO, FaultCause::DivideByZero),
];

/// Values of HFSR and CFSR plus any address the hardware marked valid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FaultSnapshot {
    /// HFSR at capture time.
    pub hfsr: u32,
    /// CFSR at capture time.
    pub cfsr: u32,
    /// MMFAR, present only if MMARVALID was set.
    pub mem_fault_address: Option<u32>,
    /// BFAR, present only if BFARVALID was set.
    pub bus_fault_address: Option<u32>,
}

impl FaultSnapshot {
    /// Read HFSR and CFSR once each, and each address register only if its
    /// validity flag is set. Never writes.
    pub fn capture<V, B>(status: &FaultStatus<V, B>) -> Self
    where
        V: FaultStatusCapable,
        B: FaultRegisterBlock,
    {
        let block = status.block();
        let hfsr_word = block.read(FaultRegister::Hfsr);
        let cfsr_word = block.read(FaultRegister::Cfsr);

        let mem_fault_address =
            (cfsr_word & cfsr::MMARVALID != 0).then(|| block.read(FaultRegister::Mmfar));
        let bus_fault_address =
            (cfsr_word & cfsr::BFARVALID != 0).then(|| block.read(FaultRegister::Bfar));

        Self {
            hfsr: hfsr_word,
            cfsr: cfsr_word,
            mem_fault_address,
            bus_fault_address,
        }
    }

    /// No fault bit was latched at capture time.
    pub fn is_empty(&self) -> bool {
        self.hfsr & hfsr::DEFINED == 0 && self.cfsr & cfsr::DEFINED == 0
    }

    /// Every cause bit that was set, HFSR first, then CFSR in bit order.
    /// Validity flags are not causes and are not listed.
    pub fn causes(&self) -> Vec<FaultCause, MAX_CAUSES> {
        let hard = HFSR_CAUSES
            .iter()
            .filter(|(mask, _)| self.hfsr & mask != 0);
        let configurable = CFSR_CAUSES
            .iter()
            .filter(|(mask, _)| self.cfsr & mask != 0);

        // Both tables together hold fewer than MAX_CAUSES entries.
        hard.chain(configurable).map(|&(_, cause)| cause).collect()
    }

    /// The configurable fault class the core would have taken first, or
    /// HardFault when only HFSR carries information.
    ///
    /// MemManage, BusFault and UsageFault have exception numbers 4, 5 and 6;
    /// at equal priority the lower number is taken first, so that is the
    /// order checked here. A vector table read failure outranks all of them
    /// because no configurable handler could have been fetched.
    pub fn category(&self) -> FaultCategory {
        let cfsr_word = self.cfsr & cfsr::DEFINED;
        if self.hfsr & hfsr::VECTTBL != 0 {
            FaultCategory::HardFault
        } else if cfsr_word & cfsr::MMFSR_MASK != 0 {
            FaultCategory::MemManage
        } else if cfsr_word & cfsr::BFSR_MASK != 0 {
            FaultCategory::BusFault
        } else if cfsr_word & cfsr::UFSR_MASK != 0 {
            FaultCategory::UsageFault
        } else if self.hfsr & hfsr::DEFINED != 0 {
            FaultCategory::HardFault
        } else {
            FaultCategory::None
        }
    }
}

impl<V: FaultStatusCapable, B: FaultRegisterBlock> FaultStatus<V, B> {
    /// Capture every fault register. See [`FaultSnapshot::capture`].
    pub fn snapshot(&self) -> FaultSnapshot {
        FaultSnapshot::capture(self)
    }

    /// Clear exactly the status bits recorded in `snapshot`.
    ///
    /// Bits the variant does not define, and HFSR.DEBUGEVT, are masked out of
    /// the write. Registers with nothing to clear are not written.
    pub fn acknowledge(&self, snapshot: &FaultSnapshot) {
        let cfsr_clear = snapshot.cfsr & (V::MMFSR_CLEAR | V::BFSR_CLEAR | V::UFSR_CLEAR);
        let hfsr_clear = snapshot.hfsr & V::HFSR_CLEAR;

        #[cfg(feature = "defmt")]
        defmt::trace!(
            "acknowledge CFSR {=u32:#010x} HFSR {=u32:#010x}",
            cfsr_clear,
            hfsr_clear
        );

        if cfsr_clear != 0 {
            self.block().write(FaultRegister::Cfsr, cfsr_clear);
        }
        if hfsr_clear != 0 {
            self.block().write(FaultRegister::Hfsr, hfsr_clear);
        }
    }
}

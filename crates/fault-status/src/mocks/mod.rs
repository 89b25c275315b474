//! Simulated fault register block for host tests.
//!
//! [`SimulatedScb`] behaves like the hardware block: CFSR and HFSR writes are
//! write-one-to-clear, MMFAR and BFAR are plain storage, reads never change
//! anything. The `raise_*` helpers play the part of the core signalling a
//! fault, ORing bits into whatever is already latched.
//!
//! The type is plain `core` code and costs nothing unless used, so downstream
//! crates can drive their own fault-handler tests with it. With the `std`
//! feature every write is also traced through `tracing`.

use core::cell::Cell;

use crate::registers::{cfsr, FaultRegister, FaultRegisterBlock};

/// In-memory stand-in for the SCB fault registers.
#[derive(Debug, Default)]
pub struct SimulatedScb {
    cfsr: Cell<u32>,
    hfsr: Cell<u32>,
    mmfar: Cell<u32>,
    bfar: Cell<u32>,
    writes: Cell<usize>,
}

impl SimulatedScb {
    /// Create a block in the Idle state (no bits latched, addresses zero).
    pub fn new() -> Self {
        Self::default()
    }

    /// Latch `bits` into CFSR as the core would on a fault.
    pub fn raise_cfsr(&self, bits: u32) {
        self.cfsr.set(self.cfsr.get() | bits);
    }

    /// Latch `bits` into HFSR as the core would on an escalation.
    pub fn raise_hfsr(&self, bits: u32) {
        self.hfsr.set(self.hfsr.get() | bits);
    }

    /// Signal a MemManage fault with the given MMFSR cause bits.
    ///
    /// With `Some(address)` the address is captured into MMFAR and MMARVALID
    /// is set, as for a data access violation.
    pub fn raise_mem_fault(&self, causes: u32, address: Option<u32>) {
        let mut bits = causes & cfsr::MMFSR_MASK;
        if let Some(address) = address {
            self.mmfar.set(address);
            bits |= cfsr::MMARVALID;
        }
        self.raise_cfsr(bits);
    }

    /// Signal a BusFault with the given BFSR cause bits.
    ///
    /// With `Some(address)` the address is captured into BFAR and BFARVALID
    /// is set, as for a precise data bus error.
    pub fn raise_bus_fault(&self, causes: u32, address: Option<u32>) {
        let mut bits = causes & cfsr::BFSR_MASK;
        if let Some(address) = address {
            self.bfar.set(address);
            bits |= cfsr::BFARVALID;
        }
        self.raise_cfsr(bits);
    }

    /// Signal a UsageFault with the given UFSR cause bits.
    pub fn raise_usage_fault(&self, causes: u32) {
        self.raise_cfsr(causes & cfsr::UFSR_MASK);
    }

    /// Overwrite MMFAR without touching MMARVALID.
    pub fn set_mmfar(&self, address: u32) {
        self.mmfar.set(address);
    }

    /// Overwrite BFAR without touching BFARVALID.
    pub fn set_bfar(&self, address: u32) {
        self.bfar.set(address);
    }

    /// Current register contents, bypassing the write counter.
    pub fn peek(&self, reg: FaultRegister) -> u32 {
        self.cell(reg).get()
    }

    /// Number of `write` calls issued through [`FaultRegisterBlock`].
    pub fn write_count(&self) -> usize {
        self.writes.get()
    }

    fn cell(&self, reg: FaultRegister) -> &Cell<u32> {
        match reg {
            FaultRegister::Cfsr => &self.cfsr,
            FaultRegister::Hfsr => &self.hfsr,
            FaultRegister::Mmfar => &self.mmfar,
            FaultRegister::Bfar => &self.bfar,
        }
    }
}

impl FaultRegisterBlock for SimulatedScb {
    fn read(&self, reg: FaultRegister) -> u32 {
        self.cell(reg).get()
    }

    fn write(&self, reg: FaultRegister, value: u32) {
        self.writes.set(self.writes.get().wrapping_add(1));

        let cell = self.cell(reg);
        let before = cell.get();
        let after = if reg.is_write_one_to_clear() {
            before & !value
        } else {
            value
        };
        cell.set(after);

        #[cfg(feature = "std")]
        tracing::trace!(
            register = reg.name(),
            value = value,
            before = before,
            after = after,
            "simulated fault register write"
        );
    }
}

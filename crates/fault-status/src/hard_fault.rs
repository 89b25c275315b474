//! HardFault Status Register view.

use crate::registers::{hfsr, FaultRegister, FaultRegisterBlock};

/// Decodes HFSR.
///
/// A HardFault is either raised directly (vector table read failure) or is
/// the escalation of a configurable fault whose own handler could not run; in
/// the second case [`is_forced`](Self::is_forced) is set and the cause is in
/// the CFSR views.
pub struct HardFaultStatus<'a, B: FaultRegisterBlock> {
    block: &'a B,
    clear_mask: u32,
}

impl<'a, B: FaultRegisterBlock> HardFaultStatus<'a, B> {
    pub(crate) fn new(block: &'a B, clear_mask: u32) -> Self {
        Self { block, clear_mask }
    }

    fn bit(&self, mask: u32) -> bool {
        self.block.read(FaultRegister::Hfsr) & mask != 0
    }

    /// Raw HFSR value.
    pub fn raw(&self) -> u32 {
        self.block.read(FaultRegister::Hfsr)
    }

    /// The HardFault was caused by a bus error while reading the vector
    /// table during exception processing.
    pub fn is_vector_read_bus_error(&self) -> bool {
        self.bit(hfsr::VECTTBL)
    }

    /// A configurable fault was escalated because its handler could not run.
    pub fn is_forced(&self) -> bool {
        self.bit(hfsr::FORCED)
    }

    /// A debug event was raised with halting debug disabled.
    pub fn is_debug_event(&self) -> bool {
        self.bit(hfsr::DEBUGEVT)
    }

    /// VECTTBL or FORCED is set.
    ///
    /// DEBUGEVT is not counted: [`reset_all`](Self::reset_all) never clears
    /// it, and a latched debug event is not a fault.
    pub fn is_active(&self) -> bool {
        self.bit(self.clear_mask)
    }

    /// Clear VECTTBL and FORCED.
    ///
    /// DEBUGEVT belongs to the debugger and is never written here.
    pub fn reset_all(&self) {
        #[cfg(feature = "defmt")]
        defmt::trace!("HFSR clear {=u32:#010x}", self.clear_mask);
        self.block.write(FaultRegister::Hfsr, self.clear_mask);
    }
}

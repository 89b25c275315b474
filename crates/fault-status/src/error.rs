//! Errors from the checked address accessors.
//!
//! Register reads and writes cannot fail. The only thing that can go wrong is
//! asking for a fault address the hardware never captured, and the checked
//! accessors report that instead of handing back an undefined word.

use thiserror_no_std::Error;

/// Why a fault address is not available.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FaultAddressError {
    /// The validity flag (MMARVALID / BFARVALID) is clear.
    #[error("fault address register does not hold a valid address")]
    NotValid,

    /// The bus fault is imprecise only; the core never records an address
    /// for an imprecise error.
    #[error("imprecise bus fault: no faulting address is captured")]
    Imprecise,
}

impl FaultAddressError {
    /// Short description for defmt or display output.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NotValid => "address not valid",
            Self::Imprecise => "imprecise bus fault",
        }
    }
}

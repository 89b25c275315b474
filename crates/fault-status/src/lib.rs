//! Cortex-M fault status decoding
//!
//! Classifies why a fault exception was raised by decoding the System
//! Control Block fault registers, and clears their sticky bits before the
//! handler re-arms fault detection. Deciding what to do about the fault is
//! left to the caller.
//!
//! # Layers
//!
//! ```text
//! Fault handler (caller: logging, recovery policy)
//!         ↓
//! FaultStatus<V, B>  ── capability gate (V: FaultStatusCapable)
//!         ↓
//! HardFaultStatus / MemFaultStatus / BusFaultStatus / UsageFaultStatus
//!         ↓
//! FaultRegisterBlock (CortexMScb on target, SimulatedScb on host)
//! ```
//!
//! # Rules every view follows
//!
//! - Reads are pure. Nothing is cleared as a side effect of a predicate.
//! - Clears are explicit (`reset_all`, `invalidate_fault_address`) and use
//!   write-one-to-clear full-word writes, so one view never clears another
//!   view's bits.
//! - A fault address is only meaningful while its validity flag is set.
//! - Read everything you need before clearing; a clear cannot be undone.
//!
//! # Features
//!
//! - `hardware`: `FaultStatus::steal()` over the live SCB via `cortex-m`
//! - `defmt`: `defmt::Format` derives and trace logging of clears
//! - `std`: `tracing` output for writes to the simulated register block
//!
//! # Example
//!
//! ```
//! use fault_status::capability::Simulated;
//! use fault_status::mocks::SimulatedScb;
//! use fault_status::registers::cfsr;
//! use fault_status::FaultStatus;
//!
//! let status = FaultStatus::<Simulated, _>::new(SimulatedScb::new());
//! status.block().raise_mem_fault(cfsr::DACCVIOL, Some(0x2000_1000));
//!
//! let mem = status.mem_fault();
//! if mem.is_data_access_violation() && mem.is_fault_address_valid() {
//!     assert_eq!(mem.fault_address(), 0x2000_1000);
//! }
//! mem.reset_all();
//! assert!(!status.mem_fault().is_active());
//! ```

// ── Lint policy ─────────────────────────────────────────────────────────────
#![deny(clippy::unwrap_used)] // no .unwrap() in production code
#![deny(clippy::expect_used)] // no .expect() in production code
#![deny(clippy::panic)] // a fault handler must not panic while classifying
#![deny(unused_must_use)]
// ────────────────────────────────────────────────────────────────────────────
#![cfg_attr(not(test), no_std)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(unsafe_op_in_unsafe_fn)]
#![warn(clippy::print_stdout)]
// Pedantic lints suppressed for this register-level crate:
#![allow(clippy::doc_markdown)] // register and bit names in doc comments
#![allow(clippy::must_use_candidate)] // register accessors: callers decide
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]

pub mod bus_fault;
pub mod capability;
pub mod error;
pub mod hard_fault;
pub mod mem_fault;
pub mod mocks;
pub mod registers;
#[cfg(all(feature = "hardware", fault_status, not(core_host)))]
pub mod scb;
pub mod snapshot;
pub mod status;
pub mod usage_fault;

pub use bus_fault::BusFaultStatus;
pub use capability::{CoreVariant, FaultStatusCapable, TargetCore};
pub use error::FaultAddressError;
pub use hard_fault::HardFaultStatus;
pub use mem_fault::MemFaultStatus;
pub use registers::{FaultRegister, FaultRegisterBlock};
pub use snapshot::{FaultCategory, FaultCause, FaultSnapshot};
pub use status::FaultStatus;
pub use usage_fault::UsageFaultStatus;

#[cfg(all(feature = "hardware", fault_status, not(core_host)))]
pub use scb::CortexMScb;

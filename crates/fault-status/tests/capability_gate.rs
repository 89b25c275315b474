//! Capability gate: which profiles get a fault status facility, and which
//! bits each profile is allowed to clear.

// Assertions on associated constants are the point of these tests.
#![allow(clippy::assertions_on_constants)]

use fault_status::capability::{
    Armv6m, Armv7em, Armv7m, Armv8mBaseline, Armv8mMainline, Simulated, TargetCore,
};
use fault_status::mocks::SimulatedScb;
use fault_status::registers::{cfsr, hfsr};
use fault_status::{CoreVariant, FaultStatus, FaultStatusCapable};

#[test]
fn profiles_without_fault_registers_say_so() {
    assert!(!Armv6m::HAS_FAULT_STATUS);
    assert!(!Armv8mBaseline::HAS_FAULT_STATUS);
    assert!(Armv7m::HAS_FAULT_STATUS);
    assert!(Armv7em::HAS_FAULT_STATUS);
    assert!(Armv8mMainline::HAS_FAULT_STATUS);
    assert!(Simulated::HAS_FAULT_STATUS);
}

#[test]
fn optional_bits_follow_the_profile() {
    assert!(!Armv7m::HAS_LAZY_FP);
    assert!(!Armv7m::HAS_STACK_OVERFLOW);
    assert!(Armv7em::HAS_LAZY_FP);
    assert!(!Armv7em::HAS_STACK_OVERFLOW);
    assert!(Armv8mMainline::HAS_LAZY_FP);
    assert!(Armv8mMainline::HAS_STACK_OVERFLOW);
}

#[test]
fn clear_masks_stay_inside_their_sub_register() {
    fn check<V: FaultStatusCapable>() {
        assert_eq!(V::MMFSR_CLEAR & !cfsr::MMFSR_MASK, 0, "{}", V::NAME);
        assert_eq!(V::BFSR_CLEAR & !cfsr::BFSR_MASK, 0, "{}", V::NAME);
        assert_eq!(V::UFSR_CLEAR & !cfsr::UFSR_MASK, 0, "{}", V::NAME);
        assert_eq!(V::HFSR_CLEAR & hfsr::DEBUGEVT, 0, "{}", V::NAME);
    }
    check::<Armv7m>();
    check::<Armv7em>();
    check::<Armv8mMainline>();
    check::<Simulated>();
}

#[test]
fn clear_masks_include_the_validity_flags() {
    fn check<V: FaultStatusCapable>() {
        assert_ne!(V::MMFSR_CLEAR & cfsr::MMARVALID, 0, "{}", V::NAME);
        assert_ne!(V::BFSR_CLEAR & cfsr::BFARVALID, 0, "{}", V::NAME);
    }
    check::<Armv7m>();
    check::<Armv7em>();
    check::<Armv8mMainline>();
    check::<Simulated>();
}

#[test]
fn target_core_drives_a_facility_on_the_host() {
    // Integration tests only ever run on the host, where the build script
    // selects the simulated profile.
    let status = FaultStatus::<TargetCore, _>::new(SimulatedScb::new());
    status.block().raise_usage_fault(cfsr::STKOF);
    assert!(status.usage_fault().is_stack_overflow());

    status.reset_all();
    assert!(!status.is_any_fault_latched());
}

//! Maps the compilation target to a core-variant cfg.
//!
//! | Target prefix     | cfg                | Fault status registers |
//! |-------------------|--------------------|------------------------|
//! | `thumbv6m`        | `core_armv6m`      | no                     |
//! | `thumbv7m`        | `core_armv7m`      | yes                    |
//! | `thumbv7em`       | `core_armv7em`     | yes                    |
//! | `thumbv8m.base`   | `core_armv8m_base` | no                     |
//! | `thumbv8m.main`   | `core_armv8m_main` | yes                    |
//! | anything else     | `core_host`        | yes (simulated)        |

use std::env;

const CORE_CFGS: &[&str] = &[
    "core_armv6m",
    "core_armv7m",
    "core_armv7em",
    "core_armv8m_base",
    "core_armv8m_main",
    "core_host",
];

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-env-changed=TARGET");

    for cfg in CORE_CFGS {
        println!("cargo:rustc-check-cfg=cfg({cfg})");
    }
    println!("cargo:rustc-check-cfg=cfg(fault_status)");

    let target = env::var("TARGET").unwrap_or_default();
    let (core, supported) = classify(&target);

    println!("cargo:rustc-cfg={core}");
    if supported {
        println!("cargo:rustc-cfg=fault_status");
    }
}

fn classify(target: &str) -> (&'static str, bool) {
    if target.starts_with("thumbv6m") {
        ("core_armv6m", false)
    } else if target.starts_with("thumbv7em") {
        ("core_armv7em", true)
    } else if target.starts_with("thumbv7m") {
        ("core_armv7m", true)
    } else if target.starts_with("thumbv8m.base") {
        ("core_armv8m_base", false)
    } else if target.starts_with("thumbv8m.main") {
        ("core_armv8m_main", true)
    } else {
        ("core_host", true)
    }
}

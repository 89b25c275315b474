use anyhow::{Context, Result};
use colored::Colorize;
use std::process::Command;
use std::time::Instant;

/// One `cargo check` of the fault-status crate.
struct TargetCheck {
    label: &'static str,
    /// `None` checks for the host.
    target: Option<&'static str>,
    features: &'static str,
}

/// Profiles with the fault registers build the `cortex-m` backed block;
/// ARMv6-M and ARMv8-M Baseline must still compile with the facility absent.
const TARGETS: [TargetCheck; 6] = [
    TargetCheck {
        label: "ARMv6-M (no fault status registers)",
        target: Some("thumbv6m-none-eabi"),
        features: "hardware,defmt",
    },
    TargetCheck {
        label: "ARMv7-M",
        target: Some("thumbv7m-none-eabi"),
        features: "hardware,defmt",
    },
    TargetCheck {
        label: "ARMv7E-M (FPU)",
        target: Some("thumbv7em-none-eabihf"),
        features: "hardware,defmt",
    },
    TargetCheck {
        label: "ARMv8-M Baseline (no fault status registers)",
        target: Some("thumbv8m.base-none-eabi"),
        features: "hardware,defmt",
    },
    TargetCheck {
        label: "ARMv8-M Mainline (FPU)",
        target: Some("thumbv8m.main-none-eabihf"),
        features: "hardware,defmt",
    },
    TargetCheck {
        label: "host (simulated)",
        target: None,
        features: "std",
    },
];

pub fn run(quick: bool) -> Result<()> {
    println!();
    println!("{}", "🔍 Checking fault-status builds...".cyan().bold());
    println!();

    let total_start = Instant::now();

    for check in &TARGETS {
        check_target(check)?;
    }

    if quick {
        println!("{}", "  Skipping clippy and rustfmt (--quick)".dimmed());
        println!();
    } else {
        clippy()?;
        fmt()?;
    }

    println!(
        "{}",
        format!(
            "✓ All checks completed in {:.2}s",
            total_start.elapsed().as_secs_f64()
        )
        .green()
        .bold()
    );
    println!();

    Ok(())
}

fn check_target(check: &TargetCheck) -> Result<()> {
    println!("{}", format!("  Checking {}...", check.label).cyan());
    let start = Instant::now();

    let mut cmd = Command::new("cargo");
    cmd.args(["check", "-p", "fault-status", "--features", check.features]);
    if let Some(target) = check.target {
        cmd.args(["--target", target]);
    }

    let output = cmd
        .output()
        .with_context(|| format!("Failed to check {}", check.label))?;

    step_result(
        &format!("{} check", check.label),
        output.status.success(),
        &String::from_utf8_lossy(&output.stderr),
    )?;

    println!(
        "{}",
        format!(
            "  ✓ {} check passed in {:.2}s",
            check.label,
            start.elapsed().as_secs_f64()
        )
        .green()
    );
    println!();
    Ok(())
}

fn clippy() -> Result<()> {
    println!("{}", "  Running clippy lints...".cyan());
    let start = Instant::now();

    let output = Command::new("cargo")
        .args([
            "clippy",
            "--workspace",
            "--all-targets",
            "--features",
            "fault-status/std",
            "--",
            "-D",
            "warnings",
        ])
        .output()
        .context("Failed to run clippy")?;

    // The workspace denies unwrap/expect/panic; those must stop the check.
    step_result(
        "Clippy",
        output.status.success(),
        &String::from_utf8_lossy(&output.stderr),
    )?;

    println!(
        "{}",
        format!("  ✓ Clippy passed in {:.2}s", start.elapsed().as_secs_f64()).green()
    );
    println!();
    Ok(())
}

fn fmt() -> Result<()> {
    println!("{}", "  Checking code formatting...".cyan());

    let output = Command::new("cargo")
        .args(["fmt", "--all", "--check"])
        .output()
        .context("Failed to run cargo fmt")?;

    if !output.status.success() {
        eprintln!("     Run 'cargo fmt --all' to fix");
    }
    step_result(
        "Formatting check",
        output.status.success(),
        &String::from_utf8_lossy(&output.stdout),
    )?;

    println!("{}", "  ✓ Formatting check passed".green());
    println!();
    Ok(())
}

/// Every step of `xtask check` is fatal: print what the tool said and stop.
fn step_result(step: &str, success: bool, diagnostics: &str) -> Result<()> {
    if success {
        return Ok(());
    }
    eprintln!("{}", format!("  ✗ {step} failed").red().bold());
    eprintln!();
    eprintln!("{diagnostics}");
    anyhow::bail!("{step} failed")
}

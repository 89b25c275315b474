use anyhow::{Context, Result};
use colored::Colorize;
use std::path::PathBuf;
use std::process::Command;
use std::time::Instant;

/// `cargo doc` arguments for the fault-status crate.
///
/// The host build documents the simulated block. A Cortex-M target turns on
/// `hardware`, which is the only way `CortexMScb` and `FaultStatus::steal`
/// show up in the docs. Private items are included so the register
/// extraction helpers and clear masks are browsable.
fn doc_args(target: Option<&str>, open: bool) -> Vec<String> {
    let mut args: Vec<String> = [
        "doc",
        "-p",
        "fault-status",
        "--no-deps",
        "--document-private-items",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect();

    match target {
        Some(triple) => {
            args.extend(["--target".into(), triple.into()]);
            args.extend(["--features".into(), "hardware,defmt".into()]);
        }
        None => args.extend(["--features".into(), "std".into()]),
    }

    if open {
        args.push("--open".into());
    }
    args
}

fn index_path(target: Option<&str>) -> PathBuf {
    let mut path = PathBuf::from("target");
    if let Some(triple) = target {
        path.push(triple);
    }
    path.join("doc").join("fault_status").join("index.html")
}

pub fn run(open: bool, target: Option<&str>) -> Result<()> {
    println!();
    let scope = target.unwrap_or("host");
    println!(
        "{}",
        format!("📚 Building fault-status docs ({scope})...").cyan().bold()
    );
    println!();

    let start = Instant::now();

    let output = Command::new("cargo")
        .args(doc_args(target, open))
        .output()
        .context("Failed to build documentation")?;

    if !output.status.success() {
        eprintln!("{}", "✗ Documentation build failed".red().bold());
        eprintln!();
        eprintln!("{}", String::from_utf8_lossy(&output.stderr));
        anyhow::bail!("Documentation build failed");
    }

    println!(
        "{}",
        format!(
            "✓ Documentation built in {:.2}s: {}",
            start.elapsed().as_secs_f64(),
            index_path(target).display()
        )
        .green()
    );
    println!();

    Ok(())
}

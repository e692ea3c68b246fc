// Licensed under the Apache-2.0 license

use anyhow::{bail, Result};
use std::process::Command;

use crate::PROJECT_ROOT;

/// Crates that must build without std on the device.
const FIRMWARE_CRATES: &[&str] = &[
    "fastclock",
    "fastclock-config",
    "fastclock-drivers",
    "fastclock-hil",
];

const FIRMWARE_TARGET: &str = "riscv32imc-unknown-none-elf";

fn run_cargo(what: &str, args: &[&str]) -> Result<()> {
    println!("Running: cargo {}", args.join(" "));
    let status = Command::new("cargo")
        .current_dir(&*PROJECT_ROOT)
        .args(args)
        .status()?;
    if !status.success() {
        bail!("{what} failed");
    }
    Ok(())
}

pub(crate) fn format(check: bool) -> Result<()> {
    let mut args = vec!["fmt", "--all"];
    if check {
        args.extend(["--", "--check"]);
    }
    run_cargo("cargo fmt", &args)
}

pub(crate) fn clippy() -> Result<()> {
    run_cargo(
        "cargo clippy",
        &[
            "clippy",
            "--workspace",
            "--all-targets",
            "--",
            "-D",
            "warnings",
        ],
    )
}

pub(crate) fn test() -> Result<()> {
    run_cargo("cargo test", &["test", "--workspace"])
}

pub(crate) fn target_check() -> Result<()> {
    let mut args = vec!["build", "--target", FIRMWARE_TARGET, "--release"];
    for krate in FIRMWARE_CRATES {
        args.extend(["-p", krate]);
    }
    run_cargo("firmware build", &args)
}

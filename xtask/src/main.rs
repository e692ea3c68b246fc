// Licensed under the Apache-2.0 license

use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use clap::{Parser, Subcommand};

mod cargo;
mod header;
mod precheckin;

pub(crate) static PROJECT_ROOT: LazyLock<PathBuf> = LazyLock::new(|| {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."))
});

#[derive(Parser)]
#[command(name = "xtask", about = "Workspace automation for fastclock")]
struct Xtask {
    #[command(subcommand)]
    xtask: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run every check that CI runs
    Precheckin,
    /// Run cargo fmt on the workspace
    Format {
        /// Only report unformatted files
        #[arg(long, default_value_t = false)]
        check: bool,
    },
    /// Run cargo clippy with warnings denied
    Clippy,
    /// Run the workspace tests on the host
    Test,
    /// Build the no_std crates for the riscv32 target
    TargetCheck,
    /// Check that every source file carries the license header
    HeaderCheck,
    /// Add the license header where it is missing
    HeaderFix,
}

fn main() {
    let cli = Xtask::parse();
    let result = match &cli.xtask {
        Commands::Precheckin => precheckin::precheckin(),
        Commands::Format { check } => cargo::format(*check),
        Commands::Clippy => cargo::clippy(),
        Commands::Test => cargo::test(),
        Commands::TargetCheck => cargo::target_check(),
        Commands::HeaderCheck => header::check(),
        Commands::HeaderFix => header::fix(),
    };
    if let Err(e) = result {
        eprintln!("{e:#}");
        std::process::exit(1);
    }
}

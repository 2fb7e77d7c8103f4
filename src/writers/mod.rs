//! Tab-separated reports for the mutation table and prevalence bands.
//!

mod write_mutations;
mod write_prevalence;

pub use write_mutations::MutationsWriter;
pub use write_prevalence::PrevalenceWriter;

use crate::utils::Result;
use std::{env, io::Write};

/// Version and command-line lines shared by every report.
fn write_provenance<W: Write>(writer: &mut W) -> Result<()> {
    let args: Vec<String> = env::args().collect();
    writeln!(
        writer,
        "##{}Version={}",
        env!("CARGO_PKG_NAME"),
        *crate::cli::FULL_VERSION
    )
    .and_then(|_| writeln!(writer, "##{}Command={}", env!("CARGO_PKG_NAME"), args.join(" ")))
    .map_err(|e| format!("Failed to write header: {}", e))
}

#[cfg(test)]
fn body_lines(bytes: &[u8]) -> Vec<String> {
    String::from_utf8_lossy(bytes)
        .lines()
        .filter(|line| !line.starts_with("##"))
        .map(str::to_string)
        .collect()
}

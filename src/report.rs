//! Human-readable output for diagnostics and results.
//!
//! Everything here is console text for humans; machine consumers should key
//! off exit codes only. Secrets pass through this module already masked.

use std::io::{self, Write};

use alloy::primitives::Address;

use crate::chain::DeploymentResult;
use crate::keys::KeyReport;

/// Writes result and diagnostic lines to an output sink.
pub struct Reporter<W> {
    out: W,
}

impl Reporter<io::Stdout> {
    /// Reporter bound to standard output.
    pub fn stdout() -> Self {
        Self { out: io::stdout() }
    }
}

impl<W: Write> Reporter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    /// Key diagnostic lines: masked form and hex determination.
    pub fn key_summary(&mut self, report: &KeyReport) -> io::Result<()> {
        writeln!(self.out, "PRIVATE_KEY defined: {}", report.masked)?;
        writeln!(
            self.out,
            "PRIVATE_KEY looks like hex: {}",
            if report.looks_like_hex { "yes" } else { "no" }
        )
    }

    /// Address derived from the validated key.
    pub fn derived_address(&mut self, address: Address) -> io::Result<()> {
        writeln!(self.out, "Address: {address}")
    }

    /// Masked deployer key and its address, printed before deployment.
    pub fn deployer_identity(&mut self, masked_key: &str, address: Address) -> io::Result<()> {
        writeln!(self.out, "Using deployer (masked): {masked_key}")?;
        writeln!(self.out, "Deployer address: {address}")
    }

    /// Final deployment outcome: transaction hash and contract address.
    pub fn deployed(&mut self, contract: &str, result: &DeploymentResult) -> io::Result<()> {
        writeln!(self.out, "Deploy tx hash: {}", result.tx_hash)?;
        writeln!(self.out, "{contract} deployed to: {}", result.address)
    }
}

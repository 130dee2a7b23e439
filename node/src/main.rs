// Copyright (c) 2026 Lumen Labs. MIT License.
// See LICENSE for details.

//! # Lumen Token Host
//!
//! Entry point for the `lumen-node` binary: a local harness that stands in
//! for the platform around the Lumen token contract. It owns the one-slot
//! contract state, fabricates call contexts with authenticated caller
//! identities and attached payments, invokes receiver hooks, and schedules
//! resolve callbacks — the contract cannot tell the difference.
//!
//! Subcommands:
//!
//! - `demo`    — run the scripted end-to-end scenario
//! - `version` — print build version information

mod cli;
mod logging;
mod scenario;

use anyhow::Result;
use clap::Parser;

use cli::{Commands, LumenNodeCli};
use logging::LogFormat;

fn main() -> Result<()> {
    let cli = LumenNodeCli::parse();

    match cli.command {
        Commands::Demo(args) => {
            logging::init(
                "lumen_node=info,lumen_token=info",
                LogFormat::from_str_lossy(&args.log_format),
            );
            scenario::run(&args)
        }
        Commands::Version => {
            println!("lumen-node {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}

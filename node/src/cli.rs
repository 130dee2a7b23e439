//! # CLI Interface
//!
//! Command-line argument structure for `lumen-node` using `clap` derive.
//! Two subcommands: `demo` drives a scripted end-to-end scenario against a
//! fresh contract instance, `version` prints build information.

use clap::{Parser, Subcommand};

/// Lumen token contract host.
///
/// A local harness that plays the platform's role around the token
/// contract: it initializes the state, routes calls with explicit caller
/// contexts, invokes receiver hooks, and schedules resolve callbacks —
/// everything the real chain does, minus the chain.
#[derive(Parser, Debug)]
#[command(
    name = "lumen-node",
    about = "Lumen token contract host",
    version,
    propagate_version = true
)]
pub struct LumenNodeCli {
    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level subcommands for the host binary.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the scripted demo scenario: init, registrations, a simple
    /// transfer, and an extended transfer with a mock receiver.
    Demo(DemoArgs),
    /// Print version information and exit.
    Version,
}

/// Arguments for the `demo` subcommand.
#[derive(Parser, Debug)]
pub struct DemoArgs {
    /// Total supply minted to the treasury at initialization.
    #[arg(long, env = "LUMEN_TOTAL_SUPPLY", default_value_t = 1_000_000)]
    pub total_supply: u128,

    /// Token display name.
    #[arg(long, default_value = "Lumen Standard Token")]
    pub name: String,

    /// Token ticker symbol.
    #[arg(long, default_value = "LMN")]
    pub symbol: String,

    /// Display decimal places.
    #[arg(long, default_value_t = 8)]
    pub decimals: u8,

    /// Fraction of each extended transfer the mock receiver keeps, in
    /// percent. 0 exercises the full-refund path, 100 the no-refund path.
    #[arg(long, default_value_t = 40)]
    pub receiver_keeps_pct: u8,

    /// Log output format: "pretty" or "json".
    #[arg(long, env = "LUMEN_LOG_FORMAT", default_value = "pretty")]
    pub log_format: String,

    /// Print the final contract state as JSON on stdout.
    #[arg(long)]
    pub dump_state: bool,
}

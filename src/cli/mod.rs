//! Command-line interface wiring for the `codegrid` binary.
//!
//! This module owns the clap definitions and delegates execution to
//! submodules, one per page kind plus the web server.

use anyhow::Result;
use clap::{Parser, Subcommand};

pub mod common;
pub mod numeric;
pub mod serve;
pub mod tiles;
pub mod utils;

/// Parsed CLI entrypoint for the `codegrid` binary.
#[derive(Parser, Debug)]
#[command(
    name = "codegrid",
    version,
    about = "Encode text into A4 code point grids and bit-tile pages"
)]
pub struct Cli {
    /// Top-level command to execute.
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Code point grids printed as decimal numbers.
    #[command(subcommand)]
    Numeric(numeric::NumericCommand),
    /// UTF-16 bit tiles.
    #[command(subcommand)]
    Tiles(tiles::TilesCommand),
    /// Run one of the web front ends.
    Serve(serve::ServeArgs),
}

/// Execute the requested command.
pub fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Numeric(cmd) => numeric::handle(cmd),
        Command::Tiles(cmd) => tiles::handle(cmd),
        Command::Serve(args) => serve::handle(args),
    }
}

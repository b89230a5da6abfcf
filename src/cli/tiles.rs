//! Bit tile commands (`codegrid tiles ...`).

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Subcommand};
use codegrid::{Config, OutputDir, TileContext, pipeline::decode_tile_png};

use crate::cli::common::TextInput;

#[derive(Subcommand, Debug)]
pub enum TilesCommand {
    /// Render pages to `{timestamp}_{page}.png` files.
    Render(TilesRenderArgs),
    /// Read the text back out of a rendered page.
    Decode(TilesDecodeArgs),
}

/// Args for `codegrid tiles render`.
#[derive(Args, Debug)]
pub struct TilesRenderArgs {
    #[command(flatten)]
    pub input: TextInput,
    /// Output directory (defaults to `OUTPUT_DIR`).
    #[arg(short = 'o', long = "output")]
    pub output: Option<PathBuf>,
}

/// Args for `codegrid tiles decode`.
#[derive(Args, Debug)]
pub struct TilesDecodeArgs {
    /// Page image produced by `tiles render`.
    pub page: PathBuf,
}

/// Execute a tiles command.
pub fn handle(command: TilesCommand) -> Result<()> {
    match command {
        TilesCommand::Render(args) => render(args),
        TilesCommand::Decode(args) => decode(args),
    }
}

fn render(args: TilesRenderArgs) -> Result<()> {
    let dir = match args.output {
        Some(dir) => dir,
        None => Config::from_env()?.output_dir,
    };
    let text = args.input.read()?;
    let output = OutputDir::create(&dir)
        .with_context(|| format!("failed to create output directory {}", dir.display()))?;
    let pages = TileContext::new(output).save(&text)?;
    for page in &pages {
        println!("{}", page.path.display());
    }
    println!("Saved {} page(s) to {}", pages.len(), dir.display());
    Ok(())
}

fn decode(args: TilesDecodeArgs) -> Result<()> {
    let png = fs::read(&args.page)
        .with_context(|| format!("failed to read {}", args.page.display()))?;
    let text = decode_tile_png(&png)
        .with_context(|| format!("failed to decode {}", args.page.display()))?;
    print!("{text}");
    Ok(())
}

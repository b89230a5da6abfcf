//! Code point grid commands (`codegrid numeric ...`).

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Args, Subcommand};
use codegrid::{
    Config, DEFAULT_COLS, ImgbbUploader, JsonlRecordStore, NumericContext, OutputDir,
    RecordStore, numeric_pages,
};

use crate::cli::common::TextInput;

#[derive(Subcommand, Debug)]
pub enum NumericCommand {
    /// Render pages to PNG files on disk.
    Render(NumericRenderArgs),
    /// Upload pages to the image host and record their URLs.
    Publish(NumericPublishArgs),
    /// List recorded uploads.
    Records,
}

/// Args for `codegrid numeric render`.
#[derive(Args, Debug)]
pub struct NumericRenderArgs {
    #[command(flatten)]
    pub input: TextInput,
    /// Code points per row (clamped to what fits the page).
    #[arg(long, default_value_t = DEFAULT_COLS)]
    pub cols: usize,
    /// Directory for the generated PNGs.
    #[arg(short = 'o', long = "output", default_value = "output")]
    pub output: PathBuf,
}

/// Args for `codegrid numeric publish`.
#[derive(Args, Debug)]
pub struct NumericPublishArgs {
    #[command(flatten)]
    pub input: TextInput,
    /// Code points per row (clamped to what fits the page).
    #[arg(long, default_value_t = DEFAULT_COLS)]
    pub cols: usize,
}

/// Execute a numeric command.
pub fn handle(command: NumericCommand) -> Result<()> {
    match command {
        NumericCommand::Render(args) => render(args),
        NumericCommand::Publish(args) => publish(args),
        NumericCommand::Records => records(),
    }
}

fn render(args: NumericRenderArgs) -> Result<()> {
    let text = args.input.read()?;
    let output = OutputDir::create(&args.output).with_context(|| {
        format!("failed to create output directory {}", args.output.display())
    })?;
    let mut count = 0usize;
    for page in numeric_pages(&text, args.cols)? {
        let page = page?;
        let path = output.save(&format!("page_{}.png", page.number), &page.png)?;
        println!("{}", path.display());
        count += 1;
    }
    println!(
        "Rendered {} page(s) of {} code points to {}",
        count,
        text.chars().count(),
        output.root().display()
    );
    Ok(())
}

/// Build the publishing context from environment configuration.
pub fn numeric_context(config: &Config) -> Result<NumericContext> {
    let uploader = ImgbbUploader::new(
        config.imgbb_upload_url.clone(),
        config.imgbb_api_key.clone(),
        config.upload_timeout,
    )
    .context("failed to build image host client")?;
    let store = JsonlRecordStore::open(&config.record_store_path)?;
    Ok(NumericContext::new(Arc::new(uploader), Arc::new(store)))
}

fn publish(args: NumericPublishArgs) -> Result<()> {
    let config = Config::from_env()?;
    let text = args.input.read()?;
    let ctx = numeric_context(&config)?;
    let records = ctx.publish(&text, args.cols)?;
    for record in &records {
        println!("{}\t{}", record.filename, record.url);
    }
    println!("Uploaded {} page(s)", records.len());
    Ok(())
}

fn records() -> Result<()> {
    let config = Config::from_env()?;
    let store = JsonlRecordStore::open(&config.record_store_path)?;
    let records = store.list()?;
    if records.is_empty() {
        println!("No records in {}", store.path().display());
    }
    for record in records {
        println!("{}\t{}", record.filename, record.url);
    }
    Ok(())
}

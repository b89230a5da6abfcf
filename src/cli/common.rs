//! Shared clap helper types for CLI commands.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, ValueEnum};

use crate::cli::utils::read_text_arg;

/// Where the text to encode comes from.
#[derive(Args, Debug, Clone)]
pub struct TextInput {
    /// Input text (falls back to stdin if omitted).
    #[arg(long)]
    pub text: Option<String>,
    /// Read input from file (`-` for stdin).
    #[arg(long = "from", conflicts_with = "text")]
    pub from: Option<PathBuf>,
}

impl TextInput {
    pub fn read(&self) -> Result<String> {
        read_text_arg(self.text.clone(), self.from.clone())
    }
}

/// Which web front end to serve.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppArg {
    /// Code point grids uploaded to the image host.
    Numeric,
    /// Bit tiles saved locally and offered for download.
    Tiles,
}

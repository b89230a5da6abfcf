//! Web front ends (`codegrid serve ...`).

use anyhow::{Context, Result};
use clap::Args;
use codegrid::{
    Config, OutputDir, TileContext,
    server::{NumericState, TileState, build_numeric_router, build_tiles_router, serve},
};
use tracing::info;

use crate::cli::common::AppArg;
use crate::cli::numeric::numeric_context;

/// Args for `codegrid serve`.
#[derive(Args, Debug)]
pub struct ServeArgs {
    /// Front end to run.
    #[arg(long, value_enum, default_value_t = AppArg::Numeric)]
    pub app: AppArg,
    /// Port to listen on (defaults to `PORT`).
    #[arg(long)]
    pub port: Option<u16>,
}

/// Build every collaborator up front, then block on the server.
pub fn handle(args: ServeArgs) -> Result<()> {
    let config = Config::from_env()?;
    let port = args.port.unwrap_or(config.port);

    let router = match args.app {
        AppArg::Numeric => {
            let ctx = numeric_context(&config)?;
            info!(store = %config.record_store_path.display(), "numeric front end ready");
            build_numeric_router(NumericState { ctx })
        }
        AppArg::Tiles => {
            let output = OutputDir::create(&config.output_dir).with_context(|| {
                format!(
                    "failed to create output directory {}",
                    config.output_dir.display()
                )
            })?;
            info!(output = %config.output_dir.display(), "tiles front end ready");
            build_tiles_router(TileState {
                ctx: TileContext::new(output),
            })
        }
    };

    let runtime = tokio::runtime::Runtime::new().context("failed to start async runtime")?;
    runtime.block_on(serve(router, port))
}

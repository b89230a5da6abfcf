//! Encode text into printable A4 pages.
//!
//! Two page kinds are supported:
//!
//! * code point grids, where every character's Unicode code point is printed
//!   as a decimal number in a ruled cell, and
//! * bit tiles, where every character's UTF-16 code unit is drawn as a 4×4
//!   block of black and white squares.

pub mod config;
mod encoding;
pub mod image;
mod layout;
pub mod output;
pub mod pipeline;
pub mod server;
pub mod store;
pub mod upload;

pub use config::Config;
pub use encoding::{BitPattern, CodePointGrid, DEFAULT_COLS, EncodeError, PATTERN_BITS, ensure_tileable};
pub use layout::{
    A4_HEIGHT_PX, A4_WIDTH_PX, GridPage, PageGeometry, PageShape, TextPage, page_count,
    paginate_grid, paginate_text,
};
pub use output::{OutputDir, OutputError};
pub use pipeline::{NumericContext, RenderedPage, SavedPage, TileContext, numeric_pages};
pub use store::{ImageRecord, JsonlRecordStore, MemoryRecordStore, RecordStore};
pub use upload::{ImgbbUploader, UploadError, Uploader};

use anyhow::Result;

/// Lay out `text` as a code point grid of `cols` columns and split it into pages.
pub fn encode_text_to_grid_pages(text: &str, cols: usize) -> Result<Vec<GridPage>> {
    let grid = CodePointGrid::from_text(text, cols)?;
    let shape = PageGeometry::NUMERIC.fit(Some(cols))?;
    Ok(paginate_grid(&grid, shape)?)
}

/// Split `text` into bit-tile pages, rejecting characters that need two
/// UTF-16 code units.
pub fn encode_text_to_tile_pages(text: &str) -> Result<Vec<TextPage>> {
    ensure_tileable(text)?;
    let shape = PageGeometry::tiles().fit(None)?;
    Ok(paginate_text(text, shape)?)
}

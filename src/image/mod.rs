//! Rasterisers for both page kinds, plus PNG encoding.

mod numeric;
mod paint;
mod tiles;

pub use numeric::render_grid_page;
pub use paint::{GLYPH_HEIGHT, GLYPH_WIDTH, encode_png};
pub use tiles::{decode_page, read_tile, render_tile_page};

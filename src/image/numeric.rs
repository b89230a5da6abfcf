use image::RgbaImage;

use crate::image::paint::{BLACK, TEXT_SCALE, blank_canvas, draw_page_label, draw_text, outline};
use crate::layout::{GridPage, PageGeometry};

/// Where the number sits inside its cell.
const TEXT_OFFSET_X: i32 = 10;
const TEXT_OFFSET_Y: i32 = 5;

/// Draw one page of code points: every cell gets an outline, non-empty cells
/// also get their decimal code point.
pub fn render_grid_page(page: &GridPage, geometry: &PageGeometry) -> RgbaImage {
    let mut image = blank_canvas(geometry.width, geometry.height);
    draw_page_label(&mut image, page.number);

    let rows = page.cells.rows().min(geometry.max_rows());
    let cols = page.cells.cols().min(geometry.max_cols());
    for row in 0..rows {
        for col in 0..cols {
            let (x, y) = geometry.cell_origin(row, col);
            if let Some(value) = page.cells.get(row, col).filter(|&v| v != 0) {
                draw_text(
                    &mut image,
                    x + TEXT_OFFSET_X,
                    y + TEXT_OFFSET_Y,
                    &value.to_string(),
                    BLACK,
                    TEXT_SCALE,
                );
            }
            outline(
                &mut image,
                x,
                y,
                geometry.cell_width,
                geometry.cell_height,
                BLACK,
            );
        }
    }
    image
}

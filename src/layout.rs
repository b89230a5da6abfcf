//! Page geometry and pagination shared by both page kinds.
//!
//! A page holds `rows × cols` units, where both counts are derived from the
//! canvas size, its margins and the size of one cell or tile.

use crate::encoding::{CodePointGrid, EncodeError};

/// A4 at 300 DPI.
pub const A4_WIDTH_PX: u32 = 2480;
pub const A4_HEIGHT_PX: u32 = 3508;

const A4_WIDTH_MM: f32 = 210.0;
const A4_HEIGHT_MM: f32 = 297.0;
const MM_PER_INCH: f32 = 25.4;

/// Fixed canvas dimensions and cell sizes for one kind of page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageGeometry {
    pub width: u32,
    pub height: u32,
    pub margin_x: u32,
    pub margin_y: u32,
    pub cell_width: u32,
    pub cell_height: u32,
}

/// Number of rows and columns one page can hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageShape {
    pub rows: usize,
    pub cols: usize,
}

impl PageShape {
    pub fn capacity(&self) -> usize {
        self.rows * self.cols
    }

    /// Row and column of the `index`-th unit on the page.
    pub fn position(&self, index: usize) -> (usize, usize) {
        (index / self.cols, index % self.cols)
    }
}

impl PageGeometry {
    /// Code-point grid pages: 100×40 px cells.
    pub const NUMERIC: PageGeometry = PageGeometry {
        width: A4_WIDTH_PX,
        height: A4_HEIGHT_PX,
        margin_x: 100,
        margin_y: 100,
        cell_width: 100,
        cell_height: 40,
    };

    /// Bit-tile pages: 60×60 px tiles on a canvas measured from millimetres.
    pub fn tiles() -> PageGeometry {
        PageGeometry {
            width: mm_to_px(A4_WIDTH_MM, 300),
            height: mm_to_px(A4_HEIGHT_MM, 300),
            margin_x: 100,
            margin_y: 100,
            cell_width: 60,
            cell_height: 60,
        }
    }

    pub fn max_rows(&self) -> usize {
        (self.height.saturating_sub(2 * self.margin_y) / self.cell_height.max(1)) as usize
    }

    pub fn max_cols(&self) -> usize {
        (self.width.saturating_sub(2 * self.margin_x) / self.cell_width.max(1)) as usize
    }

    /// Shape of one page, clamping `requested_cols` to what fits the width.
    pub fn fit(&self, requested_cols: Option<usize>) -> Result<PageShape, EncodeError> {
        if requested_cols == Some(0) {
            return Err(EncodeError::InvalidArgument(
                "column count must be at least 1".to_string(),
            ));
        }
        let cols = match requested_cols {
            Some(cols) => cols.min(self.max_cols()),
            None => self.max_cols(),
        };
        let shape = PageShape {
            rows: self.max_rows(),
            cols,
        };
        if shape.capacity() == 0 {
            return Err(EncodeError::InvalidArgument(format!(
                "a {}x{} canvas with {}/{} px margins fits no {}x{} cell",
                self.width,
                self.height,
                self.margin_x,
                self.margin_y,
                self.cell_width,
                self.cell_height
            )));
        }
        Ok(shape)
    }

    /// Top-left pixel of the cell at `(row, col)`.
    pub fn cell_origin(&self, row: usize, col: usize) -> (i32, i32) {
        (
            (self.margin_x + col as u32 * self.cell_width) as i32,
            (self.margin_y + row as u32 * self.cell_height) as i32,
        )
    }
}

fn mm_to_px(mm: f32, dpi: u32) -> u32 {
    (mm / MM_PER_INCH * dpi as f32).round() as u32
}

/// `ceil(total / capacity)`; zero units give zero pages.
pub fn page_count(total: usize, capacity: usize) -> usize {
    if capacity == 0 {
        return 0;
    }
    total.div_ceil(capacity)
}

/// One page of code points, always exactly `shape.rows × shape.cols`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridPage {
    pub number: usize,
    pub cells: CodePointGrid,
}

/// One page of characters; only the last page may be short.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextPage {
    pub number: usize,
    pub chars: Vec<char>,
}

impl TextPage {
    pub fn text(&self) -> String {
        self.chars.iter().collect()
    }
}

/// Re-chunk a grid, in row-major order, into zero-padded page grids.
///
/// Pages start at a code point, so row padding that would fill whole pages
/// of its own produces none.
pub fn paginate_grid(grid: &CodePointGrid, shape: PageShape) -> Result<Vec<GridPage>, EncodeError> {
    let capacity = shape.capacity();
    if capacity == 0 {
        return Err(EncodeError::InvalidArgument(
            "page capacity must be at least 1".to_string(),
        ));
    }
    let points = grid.code_points();
    let mut pages = Vec::with_capacity(page_count(points.len(), capacity));
    for (idx, chunk) in points.chunks(capacity).enumerate() {
        let mut cells = CodePointGrid::zeroed(shape.rows, shape.cols)?;
        for (offset, &value) in chunk.iter().enumerate() {
            let (row, col) = shape.position(offset);
            cells.set(row, col, value)?;
        }
        pages.push(GridPage {
            number: idx + 1,
            cells,
        });
    }
    Ok(pages)
}

/// Split text into consecutive segments of at most `capacity` characters.
pub fn paginate_text(text: &str, shape: PageShape) -> Result<Vec<TextPage>, EncodeError> {
    let capacity = shape.capacity();
    if capacity == 0 {
        return Err(EncodeError::InvalidArgument(
            "page capacity must be at least 1".to_string(),
        ));
    }
    let chars: Vec<char> = text.chars().collect();
    Ok(chars
        .chunks(capacity)
        .enumerate()
        .map(|(idx, chunk)| TextPage {
            number: idx + 1,
            chars: chunk.to_vec(),
        })
        .collect())
}

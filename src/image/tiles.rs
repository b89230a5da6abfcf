use image::RgbaImage;

use crate::encoding::{BitPattern, EncodeError, PATTERN_BITS};
use crate::image::paint::{BLACK, RED, WHITE, blank_canvas, draw_page_label, fill, thick_outline};
use crate::layout::{PageGeometry, PageShape, TextPage};

/// Side of one bit square.
pub const SQUARE_PX: u32 = 10;
/// Squares per side of the bit block.
pub const SQUARES_PER_SIDE: usize = 4;
/// Distance from the tile corner to the first square.
pub const PATTERN_INSET_PX: u32 = 10;
pub const OUTLINE_PX: u32 = 2;

/// Draw one page of characters as 4×4 bit tiles.
///
/// Fails without drawing anything if a character needs more than one UTF-16
/// code unit.
pub fn render_tile_page(
    page: &TextPage,
    geometry: &PageGeometry,
    shape: PageShape,
) -> Result<RgbaImage, EncodeError> {
    let patterns = page
        .chars
        .iter()
        .map(|&ch| BitPattern::encode(ch))
        .collect::<Result<Vec<_>, _>>()?;
    if patterns.len() > shape.capacity() {
        return Err(EncodeError::InvalidArgument(format!(
            "page {} holds {} characters but only {} fit",
            page.number,
            patterns.len(),
            shape.capacity()
        )));
    }

    let mut image = blank_canvas(geometry.width, geometry.height);
    for (index, pattern) in patterns.into_iter().enumerate() {
        let (row, col) = shape.position(index);
        let (x, y) = geometry.cell_origin(row, col);
        draw_tile(&mut image, x, y, geometry.cell_width, pattern);
    }
    draw_page_label(&mut image, page.number);
    Ok(image)
}

fn draw_tile(image: &mut RgbaImage, x: i32, y: i32, size: u32, pattern: BitPattern) {
    for (bit_idx, bit) in pattern.bits().iter().enumerate() {
        let (sx, sy) = square_origin(x, y, bit_idx);
        let color = if *bit { BLACK } else { WHITE };
        fill(image, sx, sy, SQUARE_PX, SQUARE_PX, color);
    }
    thick_outline(image, x, y, size, size, OUTLINE_PX, RED);
}

fn square_origin(tile_x: i32, tile_y: i32, bit_idx: usize) -> (i32, i32) {
    let col = (bit_idx % SQUARES_PER_SIDE) as i32;
    let row = (bit_idx / SQUARES_PER_SIDE) as i32;
    (
        tile_x + PATTERN_INSET_PX as i32 + col * SQUARE_PX as i32,
        tile_y + PATTERN_INSET_PX as i32 + row * SQUARE_PX as i32,
    )
}

/// Sample the tile at `index` back into its bit pattern.
///
/// Returns `None` when the slot holds no tile or lies outside the image.
pub fn read_tile(
    image: &RgbaImage,
    geometry: &PageGeometry,
    shape: PageShape,
    index: usize,
) -> Option<BitPattern> {
    if index >= shape.capacity() {
        return None;
    }
    let (row, col) = shape.position(index);
    let (x, y) = geometry.cell_origin(row, col);
    if *image.get_pixel_checked(x as u32, y as u32)? != RED {
        return None;
    }
    let mut bits = [false; PATTERN_BITS];
    for (bit_idx, bit) in bits.iter_mut().enumerate() {
        let (sx, sy) = square_origin(x, y, bit_idx);
        let centre = SQUARE_PX as i32 / 2;
        let pixel = image.get_pixel_checked((sx + centre) as u32, (sy + centre) as u32)?;
        *bit = *pixel == BLACK;
    }
    Some(BitPattern::from_bits(&bits))
}

/// Read tiles in order until the first empty slot and rebuild the text.
pub fn decode_page(image: &RgbaImage, geometry: &PageGeometry, shape: PageShape) -> String {
    (0..shape.capacity())
        .map_while(|index| read_tile(image, geometry, shape, index))
        .map(|pattern| pattern.to_char().unwrap_or(char::REPLACEMENT_CHARACTER))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::paginate_text;
    use pretty_assertions::assert_eq;

    fn page(text: &str) -> (TextPage, PageGeometry, PageShape) {
        let geometry = PageGeometry::tiles();
        let shape = geometry.fit(None).unwrap();
        let page = paginate_text(text, shape).unwrap().remove(0);
        (page, geometry, shape)
    }

    #[test]
    fn page_has_fixed_a4_size() {
        let (page, geometry, shape) = page("hi");
        let image = render_tile_page(&page, &geometry, shape).unwrap();
        assert_eq!(image.dimensions(), (2480, 3508));
    }

    #[test]
    fn bits_become_black_and_white_squares() {
        let (page, geometry, shape) = page("A");
        let image = render_tile_page(&page, &geometry, shape).unwrap();
        // 'A' = 0x0041: bit 9 and bit 15 are set
        let (x9, y9) = square_origin(100, 100, 9);
        let (x15, y15) = square_origin(100, 100, 15);
        let (x0, y0) = square_origin(100, 100, 0);
        assert_eq!(*image.get_pixel(x9 as u32 + 5, y9 as u32 + 5), BLACK);
        assert_eq!(*image.get_pixel(x15 as u32 + 5, y15 as u32 + 5), BLACK);
        assert_eq!(*image.get_pixel(x0 as u32 + 5, y0 as u32 + 5), WHITE);
    }

    #[test]
    fn tiles_are_outlined_in_red() {
        let (page, geometry, shape) = page("A");
        let image = render_tile_page(&page, &geometry, shape).unwrap();
        assert_eq!(*image.get_pixel(100, 130), RED);
        assert_eq!(*image.get_pixel(101, 130), RED);
        assert_eq!(*image.get_pixel(102, 130), WHITE);
        assert_eq!(*image.get_pixel(159, 130), RED);
        // second slot is untouched
        assert_eq!(*image.get_pixel(160, 100), WHITE);
    }

    #[test]
    fn tiles_wrap_after_the_last_column() {
        let text: String = std::iter::repeat('x').take(39).collect();
        let (page, geometry, shape) = page(&text);
        let image = render_tile_page(&page, &geometry, shape).unwrap();
        // index 38 starts the second row
        assert_eq!(*image.get_pixel(100, 160), RED);
    }

    #[test]
    fn drawn_tiles_decode_to_original_text() {
        let text = "Hello, 세계! ©";
        let (page, geometry, shape) = page(text);
        let image = render_tile_page(&page, &geometry, shape).unwrap();
        for (index, ch) in text.chars().enumerate() {
            let pattern = read_tile(&image, &geometry, shape, index).unwrap();
            assert_eq!(pattern.to_be_bytes(), BitPattern::encode(ch).unwrap().to_be_bytes());
        }
        assert_eq!(decode_page(&image, &geometry, shape), text);
    }

    #[test]
    fn astral_characters_are_rejected() {
        let (page, geometry, shape) = page("a😀");
        let err = render_tile_page(&page, &geometry, shape).unwrap_err();
        assert!(matches!(err, EncodeError::Unsupported('😀', _)));
    }
}

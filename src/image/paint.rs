use std::io::Cursor;

use anyhow::{Context, Result};
use image::{ImageBuffer, ImageFormat, Rgba, RgbaImage};
use imageproc::drawing::{draw_filled_rect_mut, draw_hollow_rect_mut};
use imageproc::rect::Rect;

pub const GLYPH_WIDTH: usize = 5;
pub const GLYPH_HEIGHT: usize = 7;
/// Glyph magnification used for every label on the page.
pub const TEXT_SCALE: u32 = 2;

pub const WHITE: Rgba<u8> = Rgba([0xff, 0xff, 0xff, 0xff]);
pub const BLACK: Rgba<u8> = Rgba([0x00, 0x00, 0x00, 0xff]);
pub const RED: Rgba<u8> = Rgba([0xff, 0x00, 0x00, 0xff]);

/// Offset of the page label from the right edge and from the top.
const LABEL_INSET_X: i32 = 150;
const LABEL_Y: i32 = 50;

pub fn blank_canvas(width: u32, height: u32) -> RgbaImage {
    ImageBuffer::from_pixel(width, height, WHITE)
}

/// Encode a canvas as PNG bytes.
pub fn encode_png(image: &RgbaImage) -> Result<Vec<u8>> {
    let mut buffer = Cursor::new(Vec::new());
    image
        .write_to(&mut buffer, ImageFormat::Png)
        .context("failed to encode page as PNG")?;
    Ok(buffer.into_inner())
}

/// Outline covering `[x, x + width] × [y, y + height]`, both edges inclusive,
/// so neighbouring cells share their border line.
pub fn outline(image: &mut RgbaImage, x: i32, y: i32, width: u32, height: u32, color: Rgba<u8>) {
    draw_hollow_rect_mut(image, Rect::at(x, y).of_size(width + 1, height + 1), color);
}

/// Outline `thickness` pixels wide, growing inward from `[x, x + width)`.
pub fn thick_outline(
    image: &mut RgbaImage,
    x: i32,
    y: i32,
    width: u32,
    height: u32,
    thickness: u32,
    color: Rgba<u8>,
) {
    for inset in 0..thickness.min(width / 2).min(height / 2) {
        let rect = Rect::at(x + inset as i32, y + inset as i32)
            .of_size(width - 2 * inset, height - 2 * inset);
        draw_hollow_rect_mut(image, rect, color);
    }
}

pub fn fill(image: &mut RgbaImage, x: i32, y: i32, width: u32, height: u32, color: Rgba<u8>) {
    draw_filled_rect_mut(image, Rect::at(x, y).of_size(width, height), color);
}

/// Horizontal distance between consecutive characters.
pub fn advance(scale: u32) -> i32 {
    ((GLYPH_WIDTH + 1) as u32 * scale) as i32
}

/// Draw `text` left to right with its top-left corner at `(x, y)`.
pub fn draw_text(image: &mut RgbaImage, x: i32, y: i32, text: &str, color: Rgba<u8>, scale: u32) {
    let mut pen_x = x;
    for ch in text.chars() {
        draw_glyph(image, pen_x, y, ch, color, scale);
        pen_x += advance(scale);
    }
}

/// Stamp `PAGE n` near the top-right corner.
pub fn draw_page_label(image: &mut RgbaImage, page_number: usize) {
    let x = image.width() as i32 - LABEL_INSET_X;
    draw_text(
        image,
        x,
        LABEL_Y,
        &format!("Page {page_number}"),
        BLACK,
        TEXT_SCALE,
    );
}

fn draw_glyph(image: &mut RgbaImage, x: i32, y: i32, ch: char, color: Rgba<u8>, scale: u32) {
    let pattern = glyph_pattern(ch);
    for (row, bits) in pattern.iter().enumerate() {
        for col in 0..GLYPH_WIDTH {
            if bits & (1 << (GLYPH_WIDTH - 1 - col)) != 0 {
                let px = x + (col as i32 * scale as i32);
                let py = y + (row as i32 * scale as i32);
                draw_filled_rect_mut(image, Rect::at(px, py).of_size(scale, scale), color);
            }
        }
    }
}

/// 5×7 bitmaps for the characters the pages print: decimal digits and the
/// letters of the page label. Anything else renders blank.
#[rustfmt::skip]
fn glyph_pattern(ch: char) -> [u8; GLYPH_HEIGHT] {
    match ch.to_ascii_uppercase() {
        '0' => [0b01110, 0b10001, 0b10011, 0b10101, 0b11001, 0b10001, 0b01110],
        '1' => [0b00100, 0b01100, 0b00100, 0b00100, 0b00100, 0b00100, 0b01110],
        '2' => [0b01110, 0b10001, 0b00001, 0b00110, 0b01000, 0b10000, 0b11111],
        '3' => [0b11110, 0b00001, 0b00001, 0b01110, 0b00001, 0b00001, 0b11110],
        '4' => [0b00010, 0b00110, 0b01010, 0b10010, 0b11111, 0b00010, 0b00010],
        '5' => [0b11111, 0b10000, 0b11110, 0b00001, 0b00001, 0b10001, 0b01110],
        '6' => [0b00110, 0b01000, 0b10000, 0b11110, 0b10001, 0b10001, 0b01110],
        '7' => [0b11111, 0b00001, 0b00010, 0b00100, 0b01000, 0b01000, 0b01000],
        '8' => [0b01110, 0b10001, 0b10001, 0b01110, 0b10001, 0b10001, 0b01110],
        '9' => [0b01110, 0b10001, 0b10001, 0b01111, 0b00001, 0b00010, 0b01100],
        'A' => [0b01110, 0b10001, 0b10001, 0b11111, 0b10001, 0b10001, 0b10001],
        'E' => [0b11111, 0b10000, 0b10000, 0b11110, 0b10000, 0b10000, 0b11111],
        'G' => [0b01110, 0b10001, 0b10000, 0b10111, 0b10001, 0b10001, 0b01110],
        'P' => [0b11110, 0b10001, 0b10001, 0b11110, 0b10000, 0b10000, 0b10000],
        _ => [0; GLYPH_HEIGHT],
    }
}

//! Page-level checks through the public API: page counts, fixed canvas size
//! and byte-stable output.

use codegrid::{
    CodePointGrid, PageGeometry, encode_text_to_grid_pages, encode_text_to_tile_pages,
    numeric_pages, page_count,
};
use pretty_assertions::assert_eq;
use sha2::{Digest, Sha256};

fn digest(bytes: &[u8]) -> String {
    format!("{:x}", Sha256::digest(bytes))
}

#[test]
fn two_letters_fill_one_page() {
    let grid = CodePointGrid::from_text("AB", 10).unwrap();
    assert_eq!(grid.rows(), 1);
    assert_eq!(
        grid.row_cells(0).collect::<Vec<_>>(),
        vec![65, 66, 0, 0, 0, 0, 0, 0, 0, 0]
    );

    let pages = encode_text_to_grid_pages("AB", 10).unwrap();
    assert_eq!(pages.len(), 1);
    assert_eq!(pages[0].number, 1);
    assert_eq!(pages[0].cells.rows(), 82);
    assert_eq!(pages[0].cells.cols(), 10);
    assert_eq!(pages[0].cells.get(0, 1), Some(66));
    assert_eq!(pages[0].cells.get(0, 2), Some(0));
}

#[test]
fn page_count_matches_capacity() {
    let shape = PageGeometry::NUMERIC.fit(Some(3)).unwrap();
    let text: String = std::iter::repeat('w').take(shape.capacity() * 2 + 7).collect();
    let pages = encode_text_to_grid_pages(&text, 3).unwrap();
    assert_eq!(pages.len(), 3);

    let tile_shape = PageGeometry::tiles().fit(None).unwrap();
    let text: String = std::iter::repeat('t').take(tile_shape.capacity() + 1).collect();
    let pages = encode_text_to_tile_pages(&text).unwrap();
    assert_eq!(pages.len(), page_count(tile_shape.capacity() + 1, tile_shape.capacity()));
    assert_eq!(pages[1].chars, vec!['t']);
}

#[test]
fn every_page_has_the_same_dimensions() {
    let text: String = std::iter::repeat('가').take(60).collect();
    let mut seen = 0;
    for page in numeric_pages(&text, 1).unwrap() {
        let page = page.unwrap();
        let image = image::load_from_memory(&page.png).unwrap();
        assert_eq!((image.width(), image.height()), (2480, 3508));
        seen += 1;
    }
    assert_eq!(seen, 1);
}

#[test]
fn rendering_is_deterministic() {
    let render = || {
        numeric_pages("deterministic", 4)
            .unwrap()
            .map(|page| digest(&page.unwrap().png))
            .collect::<Vec<_>>()
    };
    let first = render();
    assert_eq!(first.len(), 1);
    assert_eq!(first, render());

    let other = numeric_pages("Deterministic", 4)
        .unwrap()
        .map(|page| digest(&page.unwrap().png))
        .collect::<Vec<_>>();
    assert_ne!(first, other);
}

#[test]
fn astral_text_is_rejected_for_tiles_only() {
    assert!(encode_text_to_tile_pages("🙂").is_err());
    assert_eq!(encode_text_to_grid_pages("🙂", 10).unwrap().len(), 1);
}

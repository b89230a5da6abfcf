//! End-to-end runs: text in, finished pages out.
//!
//! Pages are produced one at a time and handed on before the next one is
//! drawn, so an upload or disk write for page `n` always finishes before page
//! `n + 1` starts.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result, anyhow};
use chrono::{DateTime, Duration, Utc};
use tracing::{info, warn};

use crate::encoding::{CodePointGrid, ensure_tileable};
use crate::image::{decode_page, encode_png, render_grid_page, render_tile_page};
use crate::layout::{GridPage, PageGeometry, paginate_grid, paginate_text};
use crate::output::{OutputDir, OutputError, page_file_name, run_timestamp};
use crate::store::{ImageRecord, RecordStore};
use crate::upload::Uploader;

/// One encoded page ready to be written or uploaded.
#[derive(Debug, Clone)]
pub struct RenderedPage {
    pub number: usize,
    pub png: Vec<u8>,
}

/// Lay `text` out in `cols` columns and render each page lazily.
pub fn numeric_pages(
    text: &str,
    cols: usize,
) -> Result<impl Iterator<Item = Result<RenderedPage>> + use<>> {
    let geometry = PageGeometry::NUMERIC;
    let grid = CodePointGrid::from_text(text, cols)?;
    let shape = geometry.fit(Some(cols))?;
    let pages = paginate_grid(&grid, shape)?;
    Ok(pages
        .into_iter()
        .map(move |page: GridPage| render_numeric(&page, &geometry)))
}

fn render_numeric(page: &GridPage, geometry: &PageGeometry) -> Result<RenderedPage> {
    let image = render_grid_page(page, geometry);
    let png = encode_png(&image).with_context(|| format!("page {}", page.number))?;
    Ok(RenderedPage {
        number: page.number,
        png,
    })
}

/// Collaborators for publishing code-point pages.
#[derive(Clone)]
pub struct NumericContext {
    pub uploader: Arc<dyn Uploader>,
    pub store: Arc<dyn RecordStore>,
}

impl NumericContext {
    pub fn new(uploader: Arc<dyn Uploader>, store: Arc<dyn RecordStore>) -> Self {
        Self { uploader, store }
    }

    /// Render, upload and record every page of `text`.
    ///
    /// A page whose upload fails is logged and left out of both the result
    /// and the store; the remaining pages still go out.
    pub fn publish(&self, text: &str, cols: usize) -> Result<Vec<ImageRecord>> {
        let mut records = Vec::new();
        for page in numeric_pages(text, cols)? {
            let page = page?;
            let name = format!("page_{}", page.number);
            match self.uploader.upload(&name, &page.png) {
                Ok(url) => {
                    let record = ImageRecord::for_page(page.number, url);
                    self.store
                        .append(&record)
                        .with_context(|| format!("failed to record {}", record.filename))?;
                    info!(page = page.number, url = %record.url, "page uploaded");
                    records.push(record);
                }
                Err(err) => {
                    warn!(page = page.number, error = %err, "upload failed, skipping page");
                }
            }
        }
        Ok(records)
    }

    pub fn records(&self) -> Result<Vec<ImageRecord>> {
        self.store.list()
    }
}

/// A bit-tile page written to disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavedPage {
    pub number: usize,
    pub file_name: String,
    pub path: PathBuf,
}

/// Collaborators for saving bit-tile pages.
#[derive(Debug, Clone)]
pub struct TileContext {
    pub output: OutputDir,
}

impl TileContext {
    pub fn new(output: OutputDir) -> Self {
        Self { output }
    }

    /// Render and save every page of `text` under a fresh run timestamp.
    pub fn save(&self, text: &str) -> Result<Vec<SavedPage>> {
        self.save_at(text, Utc::now())
    }

    /// Rejects the whole text before writing anything if any character can't
    /// be drawn as a tile.
    ///
    /// Page 1 claims the run timestamp by creating its file. When another run
    /// already holds that stamp it moves forward one millisecond and tries
    /// again, so concurrent runs never share file names.
    pub fn save_at(&self, text: &str, started: DateTime<Utc>) -> Result<Vec<SavedPage>> {
        ensure_tileable(text)?;
        let geometry = PageGeometry::tiles();
        let shape = geometry.fit(None)?;
        let mut stamp = started;
        let mut saved = Vec::new();
        for page in paginate_text(text, shape)? {
            let image = render_tile_page(&page, &geometry, shape)?;
            let png = encode_png(&image).with_context(|| format!("page {}", page.number))?;
            let (file_name, path) = loop {
                let file_name = page_file_name(&run_timestamp(stamp), page.number);
                match self.output.save_new(&file_name, &png) {
                    Ok(path) => break (file_name, path),
                    Err(OutputError::AlreadyExists(_)) if page.number == 1 => {
                        stamp += Duration::milliseconds(1);
                    }
                    Err(err) => return Err(err.into()),
                }
            };
            info!(page = page.number, path = %path.display(), "page saved");
            saved.push(SavedPage {
                number: page.number,
                file_name,
                path,
            });
        }
        Ok(saved)
    }
}

/// Recover the text from a saved bit-tile page.
pub fn decode_tile_png(png: &[u8]) -> Result<String> {
    let image = ::image::load_from_memory(png)
        .context("failed to decode page image")?
        .to_rgba8();
    let geometry = PageGeometry::tiles();
    if image.dimensions() != (geometry.width, geometry.height) {
        return Err(anyhow!(
            "page is {}x{}, expected {}x{}",
            image.width(),
            image.height(),
            geometry.width,
            geometry.height
        ));
    }
    let shape = geometry.fit(None)?;
    Ok(decode_page(&image, &geometry, shape))
}

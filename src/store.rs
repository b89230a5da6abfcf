use std::fs::{self, OpenOptions};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{Context, Result, anyhow};
use serde::{Deserialize, Serialize};

/// One uploaded page: its logical name and where the image host put it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ImageRecord {
    pub filename: String,
    pub url: String,
}

impl ImageRecord {
    pub fn for_page<S: Into<String>>(page_number: usize, url: S) -> Self {
        Self {
            filename: format!("page_{page_number}"),
            url: url.into(),
        }
    }
}

/// Append-only collection of [`ImageRecord`]s.
pub trait RecordStore: Send + Sync {
    fn append(&self, record: &ImageRecord) -> Result<()>;
    fn list(&self) -> Result<Vec<ImageRecord>>;
}

/// Records kept as one JSON object per line.
#[derive(Debug)]
pub struct JsonlRecordStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl JsonlRecordStore {
    /// Open the store, creating its parent directory if needed. The file
    /// itself appears on the first append.
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).with_context(|| {
                    format!("failed to create record directory {}", parent.display())
                })?;
            }
        }
        Ok(Self {
            path: path.to_path_buf(),
            lock: Mutex::new(()),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl RecordStore for JsonlRecordStore {
    fn append(&self, record: &ImageRecord) -> Result<()> {
        let _guard = self.lock.lock().map_err(|_| anyhow!("record store lock poisoned"))?;
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .with_context(|| format!("failed to open record store {}", self.path.display()))?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer(&mut writer, record).context("failed to serialize record")?;
        writer.write_all(b"\n")?;
        writer.flush()?;
        Ok(())
    }

    fn list(&self) -> Result<Vec<ImageRecord>> {
        let _guard = self.lock.lock().map_err(|_| anyhow!("record store lock poisoned"))?;
        let file = match OpenOptions::new().read(true).open(&self.path) {
            Ok(file) => file,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(err) => {
                return Err(err).with_context(|| {
                    format!("failed to open record store {}", self.path.display())
                });
            }
        };
        let mut records = Vec::new();
        for (idx, raw) in BufReader::new(file).lines().enumerate() {
            let raw = raw?;
            if raw.trim().is_empty() {
                continue;
            }
            let record: ImageRecord = serde_json::from_str(&raw).with_context(|| {
                format!(
                    "failed to parse record at line {} in {}",
                    idx + 1,
                    self.path.display()
                )
            })?;
            records.push(record);
        }
        Ok(records)
    }
}

/// Process-local store; records are lost when it is dropped.
#[derive(Debug, Default)]
pub struct MemoryRecordStore {
    records: Mutex<Vec<ImageRecord>>,
}

impl RecordStore for MemoryRecordStore {
    fn append(&self, record: &ImageRecord) -> Result<()> {
        self.records
            .lock()
            .map_err(|_| anyhow!("record store lock poisoned"))?
            .push(record.clone());
        Ok(())
    }

    fn list(&self) -> Result<Vec<ImageRecord>> {
        Ok(self
            .records
            .lock()
            .map_err(|_| anyhow!("record store lock poisoned"))?
            .clone())
    }
}

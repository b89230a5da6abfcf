use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum OutputError {
    #[error("file not found: {0}")]
    NotFound(String),

    #[error("invalid file name: {0:?}")]
    InvalidName(String),

    #[error("file already exists: {0}")]
    AlreadyExists(String),

    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Directory that receives saved pages and serves them back by name.
#[derive(Debug, Clone)]
pub struct OutputDir {
    root: PathBuf,
}

impl OutputDir {
    /// Create the directory (and parents) if it does not exist yet.
    pub fn create<P: Into<PathBuf>>(root: P) -> Result<Self, OutputError> {
        let root = root.into();
        fs::create_dir_all(&root).map_err(|source| OutputError::Io {
            path: root.clone(),
            source,
        })?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Write `bytes` under `name`, replacing any previous file.
    pub fn save(&self, name: &str, bytes: &[u8]) -> Result<PathBuf, OutputError> {
        let path = self.resolve(name)?;
        fs::create_dir_all(&self.root).map_err(|source| OutputError::Io {
            path: self.root.clone(),
            source,
        })?;
        fs::write(&path, bytes).map_err(|source| OutputError::Io {
            path: path.clone(),
            source,
        })?;
        Ok(path)
    }

    /// Write `bytes` under `name` only if no file of that name exists yet.
    pub fn save_new(&self, name: &str, bytes: &[u8]) -> Result<PathBuf, OutputError> {
        let path = self.resolve(name)?;
        fs::create_dir_all(&self.root).map_err(|source| OutputError::Io {
            path: self.root.clone(),
            source,
        })?;
        let mut file = match OpenOptions::new().write(true).create_new(true).open(&path) {
            Ok(file) => file,
            Err(err) if err.kind() == io::ErrorKind::AlreadyExists => {
                return Err(OutputError::AlreadyExists(name.to_string()));
            }
            Err(source) => return Err(OutputError::Io { path, source }),
        };
        file.write_all(bytes).map_err(|source| OutputError::Io {
            path: path.clone(),
            source,
        })?;
        Ok(path)
    }

    pub fn open(&self, name: &str) -> Result<Vec<u8>, OutputError> {
        let path = self.resolve(name)?;
        match fs::read(&path) {
            Ok(bytes) => Ok(bytes),
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                Err(OutputError::NotFound(name.to_string()))
            }
            Err(source) => Err(OutputError::Io { path, source }),
        }
    }

    /// Only plain file names are accepted; anything that could leave the
    /// directory is rejected.
    fn resolve(&self, name: &str) -> Result<PathBuf, OutputError> {
        let plain = !name.is_empty()
            && name != "."
            && name != ".."
            && !name.contains(['/', '\\', '\0']);
        if !plain {
            return Err(OutputError::InvalidName(name.to_string()));
        }
        Ok(self.root.join(name))
    }
}

/// Timestamp shared by every page saved in one run, to the millisecond.
pub fn run_timestamp(now: DateTime<Utc>) -> String {
    now.format("%Y%m%d%H%M%S%3f").to_string()
}

/// `{timestamp}_{page}.png`
pub fn page_file_name(timestamp: &str, page_number: usize) -> String {
    format!("{timestamp}_{page_number}.png")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;

    #[test]
    fn directory_is_created_on_demand() {
        let dir = tempfile::tempdir().unwrap();
        let out = OutputDir::create(dir.path().join("a/b")).unwrap();
        assert!(out.root().is_dir());
        let path = out.save("x.png", b"data").unwrap();
        assert_eq!(out.open("x.png").unwrap(), b"data");
        assert_eq!(path, out.root().join("x.png"));
    }

    #[test]
    fn missing_file_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let out = OutputDir::create(dir.path()).unwrap();
        assert!(matches!(out.open("nope.png"), Err(OutputError::NotFound(_))));
    }

    #[test]
    fn path_escapes_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let out = OutputDir::create(dir.path()).unwrap();
        for name in ["", "..", "../secret", "a/b.png", "a\\b.png"] {
            assert!(
                matches!(out.open(name), Err(OutputError::InvalidName(_))),
                "{name:?} should be rejected"
            );
        }
    }

    #[test]
    fn file_names_use_timestamp_and_page() {
        let now = Utc.with_ymd_and_hms(2024, 3, 9, 7, 5, 1).unwrap()
            + chrono::Duration::milliseconds(42);
        let stamp = run_timestamp(now);
        assert_eq!(stamp, "20240309070501042");
        assert_eq!(page_file_name(&stamp, 2), "20240309070501042_2.png");
    }

    #[test]
    fn save_new_refuses_to_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let out = OutputDir::create(dir.path()).unwrap();
        out.save_new("x.png", b"first").unwrap();
        assert!(matches!(
            out.save_new("x.png", b"second"),
            Err(OutputError::AlreadyExists(_))
        ));
        assert_eq!(out.open("x.png").unwrap(), b"first");
        assert!(matches!(out.save_new("../x.png", b""), Err(OutputError::InvalidName(_))));
    }
}

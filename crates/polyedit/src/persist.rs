//! Level persistence: tagged shape descriptors and snapshot stores.
//!
//! Purpose
//! - Serialize the shape list as a JSON array of descriptors, each
//!   tagged with a `kind` discriminant, and park whole levels in a
//!   key-value store keyed by timestamp strings (lexicographic max is
//!   the latest snapshot).
//!
//! Failure policy
//! - Decoding is all-or-nothing: `decode_shapes` parses the complete
//!   list before returning, so callers can replace live state only on
//!   success (see `EditorSession::load_json`).
//!
//! Code cross-refs: `shape::{Shape, ShapeKind}`, `editor::EditorSession`

use std::collections::BTreeMap;
use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::shape::Shape;

/// Malformed persisted level data.
#[derive(Debug, Error)]
#[error("malformed level data: {0}")]
pub struct DataFormatError(#[from] serde_json::Error);

/// Errors from snapshot save/load.
#[derive(Debug, Error)]
pub enum PersistError {
    #[error(transparent)]
    Format(#[from] DataFormatError),
    #[error("snapshot store i/o: {0}")]
    Io(#[from] io::Error),
    #[error("no snapshot under key {0:?}")]
    Missing(String),
    #[error("snapshot store is empty")]
    Empty,
}

/// Serialize a shape list as a tagged descriptor array.
pub fn encode_shapes(shapes: &[Shape]) -> Result<String, DataFormatError> {
    Ok(serde_json::to_string_pretty(shapes)?)
}

/// Parse a complete descriptor array. Nothing is returned on error, so
/// callers never observe a partially decoded list.
pub fn decode_shapes(data: &str) -> Result<Vec<Shape>, DataFormatError> {
    Ok(serde_json::from_str(data)?)
}

/// Key-value snapshot store keyed by timestamp strings.
pub trait SnapshotStore {
    fn put(&mut self, key: &str, data: &str) -> io::Result<()>;
    fn get(&self, key: &str) -> io::Result<Option<String>>;
    fn keys(&self) -> io::Result<Vec<String>>;
}

/// In-memory store for tests and transient sessions.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: BTreeMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SnapshotStore for MemoryStore {
    fn put(&mut self, key: &str, data: &str) -> io::Result<()> {
        self.entries.insert(key.to_string(), data.to_string());
        Ok(())
    }

    fn get(&self, key: &str) -> io::Result<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn keys(&self) -> io::Result<Vec<String>> {
        Ok(self.entries.keys().cloned().collect())
    }
}

/// One `<key>.json` file per snapshot in a directory.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Open (and create if needed) the store directory.
    pub fn new(dir: impl Into<PathBuf>) -> io::Result<Self> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl SnapshotStore for FileStore {
    fn put(&mut self, key: &str, data: &str) -> io::Result<()> {
        std::fs::write(self.path_for(key), data)
    }

    fn get(&self, key: &str) -> io::Result<Option<String>> {
        match std::fs::read_to_string(self.path_for(key)) {
            Ok(data) => Ok(Some(data)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e),
        }
    }

    fn keys(&self) -> io::Result<Vec<String>> {
        let mut keys = Vec::new();
        for entry in std::fs::read_dir(&self.dir)? {
            let path = entry?.path();
            if path.extension().is_some_and(|e| e == "json") {
                if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                    keys.push(stem.to_string());
                }
            }
        }
        keys.sort();
        Ok(keys)
    }
}

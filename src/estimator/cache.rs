//! Persisted cache of expected-maximum estimates.
//!
//! The file is a flat JSON object keyed by `"(N, k)"`. It is read once on
//! open and rewritten on [`MaxValueCache::flush`]; entries already on disk
//! are merged in first, with this process's values taking precedence.

use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use rustc_hash::FxHashMap;

/// Errors raised while loading or writing the cache file.
#[derive(Debug)]
pub enum CacheError {
    /// The file could not be read or written.
    Io(io::Error),
    /// The file is not a JSON object of numbers.
    Json(serde_json::Error),
}

impl fmt::Display for CacheError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CacheError::Io(e) => write!(f, "Cache I/O error: {}", e),
            CacheError::Json(e) => write!(f, "Malformed cache file: {}", e),
        }
    }
}

impl std::error::Error for CacheError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CacheError::Io(e) => Some(e),
            CacheError::Json(e) => Some(e),
        }
    }
}

impl From<io::Error> for CacheError {
    fn from(e: io::Error) -> Self {
        CacheError::Io(e)
    }
}

impl From<serde_json::Error> for CacheError {
    fn from(e: serde_json::Error) -> Self {
        CacheError::Json(e)
    }
}

/// Key → value map of expected opponent maxima, optionally backed by a file.
#[derive(Debug, Default)]
pub struct MaxValueCache {
    path: Option<PathBuf>,
    entries: FxHashMap<String, f64>,
    dirty: bool,
}

impl MaxValueCache {
    /// A cache that is never written to disk.
    pub fn in_memory() -> Self {
        Self::default()
    }

    /// Load the cache at `path`. A missing file yields an empty cache that
    /// will be created on flush.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, CacheError> {
        let path = path.as_ref().to_path_buf();
        let entries = read_entries(&path)?;
        log::debug!("loaded {} cache entries from {}", entries.len(), path.display());

        Ok(Self {
            path: Some(path),
            entries,
            dirty: false,
        })
    }

    /// Cache key for a deck of `deck_size` cards and hands of `hand_size`.
    pub fn key(deck_size: u32, hand_size: u32) -> String {
        format!("({}, {})", deck_size, hand_size)
    }

    /// Backing file, if any.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Cached value for `(deck_size, hand_size)`.
    pub fn get(&self, deck_size: u32, hand_size: u32) -> Option<f64> {
        self.entries.get(&Self::key(deck_size, hand_size)).copied()
    }

    /// Store a value, replacing any previous one.
    pub fn insert(&mut self, deck_size: u32, hand_size: u32, value: f64) {
        self.entries.insert(Self::key(deck_size, hand_size), value);
        self.dirty = true;
    }

    /// Cached value, computing and storing it on a miss.
    pub fn get_or_insert_with<F>(&mut self, deck_size: u32, hand_size: u32, compute: F) -> f64
    where
        F: FnOnce() -> f64,
    {
        if let Some(value) = self.get(deck_size, hand_size) {
            log::debug!("cache hit for {}", Self::key(deck_size, hand_size));
            return value;
        }
        let value = compute();
        self.insert(deck_size, hand_size, value);
        value
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the cache holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whether there are entries not yet written.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Write pending entries to the backing file.
    ///
    /// Does nothing for an in-memory cache or when nothing changed.
    pub fn flush(&mut self) -> Result<(), CacheError> {
        let path = match (&self.path, self.dirty) {
            (Some(path), true) => path,
            _ => return Ok(()),
        };

        let mut merged: BTreeMap<String, f64> = read_entries(path)?.into_iter().collect();
        merged.extend(self.entries.iter().map(|(k, v)| (k.clone(), *v)));

        let json = serde_json::to_string_pretty(&merged)?;
        fs::write(path, json)?;
        log::info!("wrote {} cache entries to {}", merged.len(), path.display());

        self.dirty = false;
        Ok(())
    }
}

impl Drop for MaxValueCache {
    fn drop(&mut self) {
        if let Err(e) = self.flush() {
            log::warn!("failed to flush cache: {}", e);
        }
    }
}

fn read_entries(path: &Path) -> Result<FxHashMap<String, f64>, CacheError> {
    match fs::read_to_string(path) {
        Ok(content) if content.trim().is_empty() => Ok(FxHashMap::default()),
        Ok(content) => Ok(serde_json::from_str(&content)?),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(FxHashMap::default()),
        Err(e) => Err(e.into()),
    }
}

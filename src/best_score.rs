//! Best score persistence
//!
//! A single non-negative integer, read once at startup and written after a
//! run that beats it. Storage failures never reach gameplay: reads fall back
//! to 0 and failed writes only cost persistence for this session.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Errors from a score store
#[derive(Error, Debug)]
pub enum StoreError {
    /// Storage could not be read or written
    #[error("score storage unavailable: {0}")]
    Io(#[from] io::Error),
    /// Stored value is not a non-negative integer
    #[error("stored best score is corrupt: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Durable storage for the best score
pub trait ScoreStore {
    /// Read the stored value; `None` if nothing was stored yet
    fn read(&self) -> Result<Option<u32>, StoreError>;
    /// Replace the stored value
    fn write(&mut self, score: u32) -> Result<(), StoreError>;
}

/// Best score stored as a JSON integer in a file
#[derive(Debug, Clone)]
pub struct FileScoreStore {
    path: PathBuf,
}

impl FileScoreStore {
    /// File name used under the home directory
    pub const FILE_NAME: &'static str = ".bunny_bag_best_score";

    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store in `$HOME`, or the working directory if unset
    pub fn in_home_dir() -> Self {
        let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
        Self::new(PathBuf::from(home).join(Self::FILE_NAME))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ScoreStore for FileScoreStore {
    fn read(&self) -> Result<Option<u32>, StoreError> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        Ok(Some(serde_json::from_str(text.trim())?))
    }

    fn write(&mut self, score: u32) -> Result<(), StoreError> {
        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir)?;
        }
        fs::write(&self.path, serde_json::to_string(&score)?)?;
        Ok(())
    }
}

/// In-memory store for tests and hosts without durable storage
#[derive(Debug, Clone, Default)]
pub struct MemoryScoreStore {
    pub value: Option<u32>,
    /// Number of successful writes
    pub writes: usize,
    /// Simulate unavailable storage
    pub unavailable: bool,
}

impl MemoryScoreStore {
    pub fn with_value(value: u32) -> Self {
        Self {
            value: Some(value),
            ..Default::default()
        }
    }

    pub fn unavailable() -> Self {
        Self {
            unavailable: true,
            ..Default::default()
        }
    }

    fn check(&self) -> Result<(), StoreError> {
        if self.unavailable {
            Err(io::Error::new(io::ErrorKind::PermissionDenied, "storage disabled").into())
        } else {
            Ok(())
        }
    }
}

impl ScoreStore for MemoryScoreStore {
    fn read(&self) -> Result<Option<u32>, StoreError> {
        self.check()?;
        Ok(self.value)
    }

    fn write(&mut self, score: u32) -> Result<(), StoreError> {
        self.check()?;
        self.value = Some(score);
        self.writes += 1;
        Ok(())
    }
}

/// The session's best score, backed by a store
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BestScore {
    value: u32,
}

impl BestScore {
    /// Load from the store, recovering to 0 on any failure
    pub fn load<S: ScoreStore + ?Sized>(store: &S) -> Self {
        let value = match store.read() {
            Ok(Some(value)) => {
                log::info!("Loaded best score {}", value);
                value
            }
            Ok(None) => {
                log::info!("No best score found, starting fresh");
                0
            }
            Err(e) => {
                log::warn!("Could not load best score: {}", e);
                0
            }
        };
        Self { value }
    }

    pub fn get(&self) -> u32 {
        self.value
    }

    /// Record a finished run; returns true if it beat the best
    pub fn submit(&mut self, score: u32) -> bool {
        if score > self.value {
            self.value = score;
            true
        } else {
            false
        }
    }

    /// Write the current value; failures are logged and reported as false
    pub fn save<S: ScoreStore + ?Sized>(&self, store: &mut S) -> bool {
        match store.write(self.value) {
            Ok(()) => {
                log::info!("Best score saved ({})", self.value);
                true
            }
            Err(e) => {
                log::warn!("Could not save best score: {}", e);
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!(
            "bunny_bag_{}_{}_{}",
            name,
            std::process::id(),
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .map(|d| d.as_nanos())
                .unwrap_or(0)
        ))
    }

    #[test]
    fn test_submit_only_improves() {
        let mut best = BestScore::default();
        assert!(best.submit(50));
        assert!(!best.submit(50));
        assert!(!best.submit(10));
        assert!(best.submit(60));
        assert_eq!(best.get(), 60);
    }

    #[test]
    fn test_memory_store_roundtrip() {
        let mut store = MemoryScoreStore::default();
        assert_eq!(BestScore::load(&store).get(), 0);
        let mut best = BestScore::default();
        best.submit(120);
        assert!(best.save(&mut store));
        assert_eq!(store.writes, 1);
        assert_eq!(BestScore::load(&store).get(), 120);
    }

    #[test]
    fn test_unavailable_store_degrades() {
        let mut store = MemoryScoreStore::unavailable();
        assert_eq!(BestScore::load(&store).get(), 0);
        let best = BestScore { value: 30 };
        assert!(!best.save(&mut store));
        assert_eq!(store.writes, 0);
    }

    #[test]
    fn test_file_store_missing_file_is_none() {
        let store = FileScoreStore::new(temp_path("missing"));
        assert!(matches!(store.read(), Ok(None)));
    }

    #[test]
    fn test_file_store_write_then_read() {
        let path = temp_path("roundtrip");
        let mut store = FileScoreStore::new(&path);
        store.write(340).unwrap();
        assert_eq!(store.read().unwrap(), Some(340));
        assert_eq!(BestScore::load(&store).get(), 340);
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_file_store_corrupt_falls_back() {
        let path = temp_path("corrupt");
        fs::write(&path, "carrots").unwrap();
        let store = FileScoreStore::new(&path);
        assert!(matches!(store.read(), Err(StoreError::Parse(_))));
        assert_eq!(BestScore::load(&store).get(), 0);

        fs::write(&path, "-5").unwrap();
        assert_eq!(BestScore::load(&store).get(), 0);
        let _ = fs::remove_file(&path);
    }
}

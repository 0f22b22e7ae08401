//! Best-score persistence
//!
//! One named integer survives across runs. Stored as a tiny JSON document in
//! the platform config directory. Every failure path degrades to a default:
//! a missing or corrupt file loads as 0 and a failed write is logged and
//! dropped, so persistence can never halt the game loop.

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// Narrow interface the loop driver uses at init and at game-over.
pub trait ScoreStore {
    fn load(&self) -> u32;
    fn save(&self, best: u32);
}

#[derive(Debug, Serialize, Deserialize)]
struct BestScoreFile {
    best: u32,
}

/// JSON-file backed store.
pub struct FileScoreStore {
    /// None when no config directory is available; the store then loads 0
    /// and drops writes.
    path: Option<PathBuf>,
}

impl FileScoreStore {
    const FILE_NAME: &'static str = "bestscore.json";

    pub fn new() -> Self {
        let path = match ProjectDirs::from("", "", "skyflap") {
            Some(dirs) => {
                let dir = dirs.config_dir().to_path_buf();
                match fs::create_dir_all(&dir) {
                    Ok(()) => Some(dir.join(Self::FILE_NAME)),
                    Err(e) => {
                        log::warn!("cannot create config dir {}: {e}", dir.display());
                        None
                    }
                }
            }
            None => {
                log::warn!("no config directory available, best score will not persist");
                None
            }
        };
        Self { path }
    }

    /// Store backed by an explicit file path (used by tests).
    pub fn with_path(path: PathBuf) -> Self {
        Self { path: Some(path) }
    }
}

impl Default for FileScoreStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ScoreStore for FileScoreStore {
    fn load(&self) -> u32 {
        let Some(path) = &self.path else { return 0 };
        match fs::read_to_string(path) {
            Ok(json) => match serde_json::from_str::<BestScoreFile>(&json) {
                Ok(file) => {
                    log::info!("loaded best score {}", file.best);
                    file.best
                }
                Err(e) => {
                    log::warn!("corrupt best-score file {}: {e}", path.display());
                    0
                }
            },
            // Usually just "not found" on a first run.
            Err(e) => {
                log::info!("no best-score file ({e}), starting at 0");
                0
            }
        }
    }

    fn save(&self, best: u32) {
        let Some(path) = &self.path else {
            log::warn!("best score {best} not persisted, no storage path");
            return;
        };
        let json = match serde_json::to_string(&BestScoreFile { best }) {
            Ok(json) => json,
            Err(e) => {
                log::warn!("cannot serialize best score: {e}");
                return;
            }
        };
        if let Err(e) = fs::write(path, json) {
            log::warn!("cannot write {}: {e}", path.display());
        } else {
            log::info!("saved best score {best}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_store(name: &str) -> (FileScoreStore, PathBuf) {
        let path = std::env::temp_dir().join(format!(
            "skyflap-test-{}-{name}.json",
            std::process::id()
        ));
        let _ = fs::remove_file(&path);
        (FileScoreStore::with_path(path.clone()), path)
    }

    #[test]
    fn missing_file_loads_zero() {
        let (store, path) = temp_store("missing");
        assert_eq!(store.load(), 0);
        let _ = fs::remove_file(path);
    }

    #[test]
    fn save_then_load_round_trips() {
        let (store, path) = temp_store("roundtrip");
        store.save(7);
        assert_eq!(store.load(), 7);
        store.save(11);
        assert_eq!(store.load(), 11);
        let _ = fs::remove_file(path);
    }

    #[test]
    fn corrupt_file_loads_zero() {
        let (store, path) = temp_store("corrupt");
        fs::write(&path, "not json at all").unwrap();
        assert_eq!(store.load(), 0);
        let _ = fs::remove_file(path);
    }

    #[test]
    fn pathless_store_is_a_silent_noop() {
        let store = FileScoreStore { path: None };
        assert_eq!(store.load(), 0);
        store.save(42); // must not panic
    }
}

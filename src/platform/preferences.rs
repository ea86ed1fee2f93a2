//! # Preferences
//!
//! Small key/value store that survives restarts. The only key the register
//! uses today is the colour theme.
//!
//! Stored as flat TOML at `~/.asset-register/preferences.toml`. Writes go
//! through a `.tmp` file and `rename()`.

use log::{debug, warn};
use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::core::config::config_dir;
use crate::core::theme::Theme;

pub const THEME_KEY: &str = "theme";

#[derive(Debug)]
pub enum PreferenceError {
    Io(io::Error),
    Parse(toml::de::Error),
    Serialize(toml::ser::Error),
}

impl fmt::Display for PreferenceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PreferenceError::Io(e) => write!(f, "preferences I/O error: {e}"),
            PreferenceError::Parse(e) => write!(f, "preferences parse error: {e}"),
            PreferenceError::Serialize(e) => write!(f, "preferences serialize error: {e}"),
        }
    }
}

impl std::error::Error for PreferenceError {}

impl From<io::Error> for PreferenceError {
    fn from(e: io::Error) -> Self {
        PreferenceError::Io(e)
    }
}

pub trait PreferenceStore {
    fn get(&self, key: &str) -> Option<String>;

    fn set(&mut self, key: &str, value: &str) -> Result<(), PreferenceError>;
}

// ============================================================================
// File store
// ============================================================================

pub struct FilePreferenceStore {
    path: PathBuf,
    values: BTreeMap<String, String>,
}

impl FilePreferenceStore {
    /// Open the store at `path`. A missing file is an empty store.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, PreferenceError> {
        let path = path.into();
        let values = match fs::read_to_string(&path) {
            Ok(contents) => toml::from_str(&contents).map_err(PreferenceError::Parse)?,
            Err(e) if e.kind() == io::ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => return Err(e.into()),
        };
        debug!("Loaded {} preference(s) from {}", values.len(), path.display());
        Ok(Self { path, values })
    }

    /// `~/.asset-register/preferences.toml`, or `None` without a home directory.
    pub fn default_path() -> Option<PathBuf> {
        config_dir().map(|d| d.join("preferences.toml"))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn write(&self) -> Result<(), PreferenceError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let contents = toml::to_string(&self.values).map_err(PreferenceError::Serialize)?;
        let tmp_path = self.path.with_extension("tmp");
        fs::write(&tmp_path, contents)?;
        fs::rename(&tmp_path, &self.path)?;
        Ok(())
    }
}

impl PreferenceStore for FilePreferenceStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), PreferenceError> {
        self.values.insert(key.to_string(), value.to_string());
        self.write()
    }
}

/// In-process store, used when no home directory exists and in tests.
#[derive(Debug, Default)]
pub struct MemoryPreferenceStore {
    values: BTreeMap<String, String>,
}

impl PreferenceStore for MemoryPreferenceStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), PreferenceError> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Open the file store at its default path, falling back to memory when the
/// home directory is unknown or the file is unreadable.
pub fn open_default_store() -> Box<dyn PreferenceStore> {
    let Some(path) = FilePreferenceStore::default_path() else {
        warn!("No home directory; preferences will not persist");
        return Box::new(MemoryPreferenceStore::default());
    };
    match FilePreferenceStore::open(&path) {
        Ok(store) => Box::new(store),
        Err(e) => {
            warn!("Ignoring preferences at {}: {}", path.display(), e);
            Box::new(MemoryPreferenceStore::default())
        }
    }
}

// ============================================================================
// Theme helpers
// ============================================================================

/// The persisted theme, or light when absent or unrecognized.
pub fn load_theme(store: &dyn PreferenceStore) -> Theme {
    match store.get(THEME_KEY) {
        Some(value) => value.parse().unwrap_or_else(|e| {
            warn!("Unknown stored theme: {}", e);
            Theme::default()
        }),
        None => Theme::default(),
    }
}

pub fn save_theme(store: &mut dyn PreferenceStore, theme: Theme) -> Result<(), PreferenceError> {
    store.set(THEME_KEY, theme.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_theme_defaults_to_light() {
        let store = MemoryPreferenceStore::default();
        assert_eq!(load_theme(&store), Theme::Light);
    }

    #[test]
    fn test_theme_round_trips_through_memory() {
        let mut store = MemoryPreferenceStore::default();
        save_theme(&mut store, Theme::Dark).unwrap();
        assert_eq!(store.get(THEME_KEY).as_deref(), Some("dark"));
        assert_eq!(load_theme(&store), Theme::Dark);
    }

    #[test]
    fn test_garbage_theme_falls_back_to_light() {
        let mut store = MemoryPreferenceStore::default();
        store.set(THEME_KEY, "sepia").unwrap();
        assert_eq!(load_theme(&store), Theme::Light);
    }

    #[test]
    fn test_file_store_persists_across_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("preferences.toml");

        let mut store = FilePreferenceStore::open(&path).unwrap();
        assert!(store.get(THEME_KEY).is_none());
        save_theme(&mut store, Theme::Dark).unwrap();
        assert!(!path.with_extension("tmp").exists());

        let reopened = FilePreferenceStore::open(&path).unwrap();
        assert_eq!(load_theme(&reopened), Theme::Dark);
    }

    #[test]
    fn test_file_store_rejects_malformed_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("preferences.toml");
        fs::write(&path, "theme = [").unwrap();
        assert!(matches!(
            FilePreferenceStore::open(&path),
            Err(PreferenceError::Parse(_))
        ));
    }
}

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::geometry::PanelGeometry;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage key is empty")]
    MissingKey,
    #[error("io error: {0}")]
    Io(#[from] io::Error),
}

pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// Raw keyed string storage. Implementations stay dumb; all shape validation
/// lives in [`GeometryStore`].
pub trait StorageBackend {
    fn read(&self, key: &str) -> StoreResult<Option<String>>;
    fn write(&mut self, key: &str, value: &str) -> StoreResult<()>;
}

#[derive(Debug, Default, Clone)]
pub struct MemoryBackend {
    entries: HashMap<String, String>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.entries.insert(key.into(), value.into());
    }
}

impl StorageBackend for MemoryBackend {
    fn read(&self, key: &str) -> StoreResult<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn write(&mut self, key: &str, value: &str) -> StoreResult<()> {
        if key.is_empty() {
            return Err(StoreError::MissingKey);
        }
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// One JSON file per key under a base directory.
#[derive(Debug, Clone)]
pub struct FileBackend {
    base_dir: PathBuf,
}

impl FileBackend {
    pub fn create(base_dir: impl Into<PathBuf>) -> StoreResult<Self> {
        let base_dir = base_dir.into();
        fs::create_dir_all(&base_dir)?;
        Ok(Self { base_dir })
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    fn path_for(&self, key: &str) -> StoreResult<PathBuf> {
        if key.is_empty() {
            return Err(StoreError::MissingKey);
        }
        Ok(self.base_dir.join(format!("{key}.json")))
    }
}

impl StorageBackend for FileBackend {
    fn read(&self, key: &str) -> StoreResult<Option<String>> {
        let path = self.path_for(key)?;
        match fs::read_to_string(&path) {
            Ok(contents) => Ok(Some(contents)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(StoreError::Io(err)),
        }
    }

    fn write(&mut self, key: &str, value: &str) -> StoreResult<()> {
        let path = self.path_for(key)?;
        fs::write(&path, value)?;
        Ok(())
    }
}

/// Durable panel geometry, keyed by a fixed storage key.
///
/// `load` never fails: a missing entry, unreadable backend, malformed JSON,
/// or an invalid shape all fall back to the default geometry. `save` is best
/// effort; geometry is a convenience, not correctness-critical.
#[derive(Debug, Clone)]
pub struct GeometryStore<B> {
    backend: B,
    key: String,
    default: PanelGeometry,
}

impl<B: StorageBackend> GeometryStore<B> {
    pub fn new(backend: B, key: impl Into<String>, default: PanelGeometry) -> Self {
        Self {
            backend,
            key: key.into(),
            default,
        }
    }

    pub fn load(&self) -> PanelGeometry {
        let raw = match self.backend.read(&self.key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return self.default,
            Err(err) => {
                tracing::warn!(key = %self.key, ?err, "geometry read failed; using defaults");
                return self.default;
            }
        };

        match serde_json::from_str::<PanelGeometry>(&raw) {
            Ok(geometry) if geometry.is_valid() => geometry,
            Ok(geometry) => {
                tracing::warn!(key = %self.key, ?geometry, "persisted geometry invalid; using defaults");
                self.default
            }
            Err(err) => {
                tracing::warn!(key = %self.key, ?err, "persisted geometry malformed; using defaults");
                self.default
            }
        }
    }

    pub fn save(&mut self, geometry: &PanelGeometry) {
        let raw = match serde_json::to_string(geometry) {
            Ok(raw) => raw,
            Err(err) => {
                tracing::warn!(?err, "geometry serialization failed");
                return;
            }
        };
        if let Err(err) = self.backend.write(&self.key, &raw) {
            tracing::warn!(key = %self.key, ?err, "geometry write failed");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const KEY: &str = "panel-geometry";

    fn default_geometry() -> PanelGeometry {
        PanelGeometry::unplaced(400.0, 225.0)
    }

    fn store_with(backend: MemoryBackend) -> GeometryStore<MemoryBackend> {
        GeometryStore::new(backend, KEY, default_geometry())
    }

    #[test]
    fn load_returns_default_when_storage_is_empty() {
        let store = store_with(MemoryBackend::new());
        assert_eq!(store.load(), default_geometry());
    }

    #[test]
    fn load_returns_default_on_malformed_json() {
        let mut backend = MemoryBackend::new();
        backend.insert(KEY, "{not json");
        assert_eq!(store_with(backend).load(), default_geometry());
    }

    #[test]
    fn load_returns_default_on_incompatible_shape() {
        let mut backend = MemoryBackend::new();
        backend.insert(KEY, r#"{"w": 400, "h": 225}"#);
        assert_eq!(store_with(backend).load(), default_geometry());
    }

    #[test]
    fn load_returns_default_on_non_positive_sizes() {
        let mut backend = MemoryBackend::new();
        backend.insert(KEY, r#"{"width": 0.0, "height": 225.0, "left": null, "top": null}"#);
        assert_eq!(store_with(backend).load(), default_geometry());
    }

    #[test]
    fn save_then_load_round_trips_placed_geometry() {
        let mut store = store_with(MemoryBackend::new());
        let geometry = PanelGeometry {
            width: 640.0,
            height: 360.0,
            left: Some(120.0),
            top: Some(80.0),
        };
        store.save(&geometry);
        assert_eq!(store.load(), geometry);
    }

    #[test]
    fn null_position_loads_as_unplaced() {
        let mut backend = MemoryBackend::new();
        backend.insert(
            KEY,
            r#"{"width": 500.0, "height": 281.25, "left": null, "top": null}"#,
        );
        let loaded = store_with(backend).load();
        assert_eq!(loaded.width, 500.0);
        assert!(!loaded.is_placed());
    }

    #[test]
    fn file_backend_round_trips_and_reports_absence() {
        let dir = std::env::temp_dir().join("driftpane-store-test");
        let mut backend = FileBackend::create(&dir).unwrap();
        assert_eq!(backend.read("missing").unwrap(), None);
        backend.write(KEY, "{}").unwrap();
        assert_eq!(backend.read(KEY).unwrap().as_deref(), Some("{}"));
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn empty_key_is_rejected_by_backends() {
        let mut backend = MemoryBackend::new();
        assert!(matches!(
            backend.write("", "{}"),
            Err(StoreError::MissingKey)
        ));
    }
}

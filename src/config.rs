use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

use crate::geometry::PanelGeometry;

const APP_DIR: &str = "driftpane";
const APP_CONFIG_FILE: &str = "config.json";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ConfigPathError {
    MissingHomeDirectory,
}

/// Tunables for the panel lifecycle. Every field has a default; a config file
/// only needs the fields it overrides.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PanelConfig {
    /// Resize floor; height follows from `aspect_ratio`.
    pub min_width: f64,
    pub aspect_ratio: f64,
    /// How far past the viewport top the anchor bottom must scroll before the
    /// panel detaches.
    pub enter_threshold: f64,
    /// How close the scroll position must return to the recorded anchor
    /// before the panel reattaches. Smaller than `enter_threshold` so the
    /// boundary does not oscillate.
    pub exit_threshold: f64,
    pub settle_time_ms: u64,
    /// Inset from the viewport's bottom-right corner for first placement.
    pub placement_margin: f64,
    pub default_width: f64,
    pub default_height: f64,
    pub storage_key: String,
    /// Frames to keep probing for a host anchor that has not been built yet.
    pub probe_frame_limit: u32,
}

impl Default for PanelConfig {
    fn default() -> Self {
        Self {
            min_width: 200.0,
            aspect_ratio: 16.0 / 9.0,
            enter_threshold: 100.0,
            exit_threshold: 50.0,
            settle_time_ms: 250,
            placement_margin: 20.0,
            default_width: 400.0,
            default_height: 225.0,
            storage_key: "driftpane-geometry".to_string(),
            probe_frame_limit: 300,
        }
    }
}

impl PanelConfig {
    pub fn settle_time(&self) -> Duration {
        Duration::from_millis(self.settle_time_ms)
    }

    pub fn default_geometry(&self) -> PanelGeometry {
        PanelGeometry::unplaced(self.default_width, self.default_height)
    }
}

pub fn load_panel_config() -> PanelConfig {
    let (xdg_config_home, home) = config_env_dirs();
    load_panel_config_with(xdg_config_home.as_deref(), home.as_deref())
}

fn load_panel_config_with(xdg_config_home: Option<&Path>, home: Option<&Path>) -> PanelConfig {
    let path = match app_config_path(APP_DIR, APP_CONFIG_FILE, xdg_config_home, home) {
        Ok(p) => p,
        Err(_) => return PanelConfig::default(),
    };
    if !path.exists() {
        return PanelConfig::default();
    }
    match std::fs::read_to_string(&path) {
        Ok(contents) => serde_json::from_str(&contents).unwrap_or_else(|err| {
            tracing::warn!(?err, ?path, "failed to parse config.json; using defaults");
            PanelConfig::default()
        }),
        Err(err) => {
            tracing::warn!(?err, ?path, "failed to read config.json; using defaults");
            PanelConfig::default()
        }
    }
}

pub(crate) fn config_env_dirs() -> (Option<PathBuf>, Option<PathBuf>) {
    (
        std::env::var_os("XDG_CONFIG_HOME").map(PathBuf::from),
        std::env::var_os("HOME").map(PathBuf::from),
    )
}

pub(crate) fn app_config_path(
    app_dir: &str,
    file_name: &str,
    xdg_config_home: Option<&Path>,
    home: Option<&Path>,
) -> Result<PathBuf, ConfigPathError> {
    let mut path = config_root(xdg_config_home, home)?;
    path.push(app_dir);
    path.push(file_name);
    Ok(path)
}

fn config_root(
    xdg_config_home: Option<&Path>,
    home: Option<&Path>,
) -> Result<PathBuf, ConfigPathError> {
    if let Some(xdg) = xdg_config_home.filter(|path| !path.as_os_str().is_empty()) {
        return Ok(xdg.to_path_buf());
    }

    let home = home.ok_or(ConfigPathError::MissingHomeDirectory)?;
    Ok(home.join(".config"))
}

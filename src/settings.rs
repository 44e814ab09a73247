//! Editor settings stored as JSON in the user's config directory.
//!
//! Missing fields take their defaults, so an old or hand-edited file keeps
//! loading after new settings are added.

use crate::constants::{
    DEFAULT_GRID_SIZE, FIT_PADDING, MAX_HISTORY_STATES, PINNED_FIRST_TYPES, PINNED_LAST_TYPES, RULER_INSET,
    WHEEL_ZOOM_SCALE,
};
use crate::error::{SettingsError, SettingsResult};
use crate::input::Key;
use crate::placement::PlacementRules;
use crate::selection::GridConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::{debug, warn};

/// Application directory name under the platform config dir
pub const APP_DIR_NAME: &str = "sitecanvas";

/// Settings file name
pub const SETTINGS_FILE_NAME: &str = "settings.json";

/// `<config dir>/sitecanvas/settings.json`, if the platform has a config dir.
pub fn default_settings_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(APP_DIR_NAME).join(SETTINGS_FILE_NAME))
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorSettings {
    /// Grid unit for snapping and keyboard movement
    pub grid_size: f32,
    pub snap_to_grid: bool,
    /// Wheel delta to zoom delta multiplier
    pub wheel_zoom_scale: f32,
    /// Ruler width subtracted from screen positions
    pub ruler_inset: f32,
    /// Screen padding kept around content by fit-to-content
    pub fit_padding: f32,
    pub max_history: usize,
    /// Key that pans the canvas while held
    pub pan_key: Key,
    /// Types always inserted first among the root's children
    pub pinned_first_types: Vec<String>,
    /// Types always inserted last among the root's children
    pub pinned_last_types: Vec<String>,
}

impl Default for EditorSettings {
    fn default() -> Self {
        Self {
            grid_size: DEFAULT_GRID_SIZE,
            snap_to_grid: true,
            wheel_zoom_scale: WHEEL_ZOOM_SCALE,
            ruler_inset: RULER_INSET,
            fit_padding: FIT_PADDING,
            max_history: MAX_HISTORY_STATES,
            pan_key: Key::Space,
            pinned_first_types: PINNED_FIRST_TYPES.iter().map(|s| s.to_string()).collect(),
            pinned_last_types: PINNED_LAST_TYPES.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl EditorSettings {
    /// Load from the default path, falling back to defaults on any failure.
    pub fn load() -> Self {
        let Some(path) = default_settings_path() else {
            warn!("no config directory, using default settings");
            return Self::default();
        };
        match Self::load_from(&path) {
            Ok(settings) => settings,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "failed to load settings, using defaults");
                Self::default()
            }
        }
    }

    /// Load from `path`. A missing file yields the defaults.
    pub fn load_from(path: &Path) -> SettingsResult<Self> {
        if !path.exists() {
            debug!(path = %path.display(), "settings file not found, using defaults");
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    pub fn save(&self) -> SettingsResult<()> {
        let path = default_settings_path().ok_or(SettingsError::NoConfigDir)?;
        self.save_to(&path)
    }

    /// Write atomically: a temp file in the same directory is renamed over `path`.
    pub fn save_to(&self, path: &Path) -> SettingsResult<()> {
        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        fs::create_dir_all(dir)?;

        let mut file = NamedTempFile::new_in(dir)?;
        serde_json::to_writer_pretty(&mut file, self)?;
        file.write_all(b"\n")?;
        file.as_file().sync_all()?;
        file.persist(path)?;
        debug!(path = %path.display(), "settings saved");
        Ok(())
    }

    pub fn grid(&self) -> GridConfig {
        GridConfig {
            size: self.grid_size,
            snap: self.snap_to_grid,
        }
    }

    pub fn placement_rules(&self) -> PlacementRules {
        PlacementRules::new(self.pinned_first_types.iter().cloned(), self.pinned_last_types.iter().cloned())
    }
}

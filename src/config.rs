//! Editor settings, read from `<config dir>/sprite-checker/config.json`.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{EditorError, EditorResult};
use crate::grid::GridSettings;
use crate::selection::DEFAULT_MIN_SELECTION_SIZE;

pub const DEFAULT_IMAGE_NAME: &str = "sprite-atlas.png";
pub const DEFAULT_SCRIPT_CLASS: &str = "SpriteAtlas";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EditorConfig {
    /// Selections must be strictly larger than this on both axes.
    pub min_selection_size: f64,
    pub grid: GridSettings,
    /// Image name written into CSS when no image is loaded.
    pub default_image_name: String,
    /// Class name of the generated script.
    pub script_class_name: String,
}

impl Default for EditorConfig {
    fn default() -> Self {
        EditorConfig {
            min_selection_size: DEFAULT_MIN_SELECTION_SIZE,
            grid: GridSettings::default(),
            default_image_name: DEFAULT_IMAGE_NAME.to_string(),
            script_class_name: DEFAULT_SCRIPT_CLASS.to_string(),
        }
    }
}

impl EditorConfig {
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("sprite-checker").join("config.json"))
    }

    /// Reads a config file. A missing file yields the defaults.
    pub fn load(path: &Path) -> EditorResult<Self> {
        let config_error = |message: String| EditorError::Config {
            path: path.to_path_buf(),
            message,
        };
        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                log::debug!("no config at {}, using defaults", path.display());
                return Ok(EditorConfig::default());
            }
            Err(e) => return Err(config_error(e.to_string())),
        };
        serde_json::from_str(&text).map_err(|e| config_error(e.to_string()))
    }

    /// Reads the config from the platform location, if there is one.
    pub fn load_default() -> EditorResult<Self> {
        match EditorConfig::default_path() {
            Some(path) => EditorConfig::load(&path),
            None => Ok(EditorConfig::default()),
        }
    }

    pub fn save(&self, path: &Path) -> EditorResult<()> {
        let io_error = |source| EditorError::ExportIo {
            path: path.to_path_buf(),
            source,
        };
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(io_error)?;
        }
        let text = serde_json::to_string_pretty(self)?;
        fs::write(path, text).map_err(io_error)
    }
}

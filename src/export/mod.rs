//! Atlas serializers: JSON, XML, CSS and a Unity C# script.
//!
//! Each format is a pure function from an [`Atlas`] and [`ExportOptions`]
//! to text; [`write_atlas`] renders and writes the file in one pass.

pub mod css;
pub mod json;
pub mod script;
pub mod xml;

use std::fs;
use std::path::Path;

use chrono::{DateTime, Local};

use crate::atlas::Atlas;
use crate::config::{DEFAULT_IMAGE_NAME, DEFAULT_SCRIPT_CLASS};
use crate::error::{EditorError, EditorResult};

/// Timestamp format used in generated headers and XML attributes.
pub(crate) const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Json,
    Xml,
    Css,
    /// Unity MonoBehaviour source.
    Script,
}

impl ExportFormat {
    pub const ALL: [ExportFormat; 4] = [
        ExportFormat::Json,
        ExportFormat::Xml,
        ExportFormat::Css,
        ExportFormat::Script,
    ];

    /// Picks the format from the file extension; unknown extensions get JSON.
    pub fn from_path(path: &Path) -> Self {
        let extension = path
            .extension()
            .map(|e| e.to_string_lossy().to_ascii_lowercase())
            .unwrap_or_default();
        match extension.as_str() {
            "xml" => ExportFormat::Xml,
            "css" => ExportFormat::Css,
            "cs" => ExportFormat::Script,
            _ => ExportFormat::Json,
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Json => "json",
            ExportFormat::Xml => "xml",
            ExportFormat::Css => "css",
            ExportFormat::Script => "cs",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ExportFormat::Json => "JSON files",
            ExportFormat::Xml => "XML files",
            ExportFormat::Css => "CSS Sprite",
            ExportFormat::Script => "Unity Script",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExportOptions {
    /// Image name referenced by the CSS; falls back to the atlas image's
    /// file name, then to `sprite-atlas.png`.
    pub image_name: Option<String>,
    pub class_name: String,
    pub generated_at: DateTime<Local>,
}

impl Default for ExportOptions {
    fn default() -> Self {
        ExportOptions {
            image_name: None,
            class_name: DEFAULT_SCRIPT_CLASS.to_string(),
            generated_at: Local::now(),
        }
    }
}

impl ExportOptions {
    pub fn with_image_name(mut self, name: impl Into<String>) -> Self {
        self.image_name = Some(name.into());
        self
    }

    pub fn with_class_name(mut self, name: impl Into<String>) -> Self {
        self.class_name = name.into();
        self
    }

    pub fn with_generated_at(mut self, at: DateTime<Local>) -> Self {
        self.generated_at = at;
        self
    }

    pub(crate) fn resolve_image_name(&self, atlas: &Atlas) -> String {
        self.image_name
            .clone()
            .or_else(|| atlas.image_file_name())
            .unwrap_or_else(|| DEFAULT_IMAGE_NAME.to_string())
    }

    pub(crate) fn timestamp(&self) -> String {
        self.generated_at.format(TIMESTAMP_FORMAT).to_string()
    }
}

/// Renders the atlas in the given format.
pub fn render(
    format: ExportFormat,
    atlas: &Atlas,
    options: &ExportOptions,
) -> EditorResult<String> {
    Ok(match format {
        ExportFormat::Json => json::to_string(atlas)?,
        ExportFormat::Xml => xml::to_string(atlas),
        ExportFormat::Css => css::to_string(atlas, options),
        ExportFormat::Script => script::to_string(atlas, options),
    })
}

/// Renders and writes the atlas. Nothing is written if rendering fails.
pub fn write_atlas(
    path: &Path,
    format: ExportFormat,
    atlas: &Atlas,
    options: &ExportOptions,
) -> EditorResult<()> {
    let text = render(format, atlas, options)?;
    fs::write(path, text).map_err(|source| EditorError::ExportIo {
        path: path.to_path_buf(),
        source,
    })?;
    log::info!(
        "saved {} sprites as {:?} to {}",
        atlas.len(),
        format,
        path.display()
    );
    Ok(())
}

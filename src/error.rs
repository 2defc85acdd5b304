//! Error and warning types surfaced to the host.

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// Result type for editor operations.
pub type EditorResult<T> = Result<T, EditorError>;

/// Errors reported once to the user. None of them are retried and none of
/// them leave the session half-updated.
#[derive(Debug, Error)]
pub enum EditorError {
    /// The image file could not be read or decoded.
    #[error("error loading image '{}': {source}", .path.display())]
    ImageLoad {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    /// The atlas file is unreadable, malformed or violates atlas invariants.
    #[error("error loading atlas data '{}': {message}", .path.display())]
    AtlasParse { path: PathBuf, message: String },

    /// The export target could not be written.
    #[error("error saving '{}': {source}", .path.display())]
    ExportIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Save was requested for an atlas without sprites.
    #[error("no sprites defined to save")]
    EmptyAtlas,

    /// Cropping or encoding a single sprite failed.
    #[error("error exporting sprite '{name}' to '{}': {message}", .path.display())]
    SpriteExport {
        name: String,
        path: PathBuf,
        message: String,
    },

    /// A sprite does not satisfy the atlas invariants.
    #[error("invalid sprite '{name}': {reason}")]
    InvalidSprite { name: String, reason: String },

    /// No sprite exists at the given position in the atlas.
    #[error("no sprite at index {0}")]
    NoSuchSprite(usize),

    /// The operation needs a loaded image.
    #[error("no image loaded")]
    NoImage,

    /// The atlas could not be serialized.
    #[error("failed to serialize atlas: {0}")]
    Serialize(#[from] serde_json::Error),

    /// The editor configuration file is malformed.
    #[error("invalid configuration '{}': {message}", .path.display())]
    Config { path: PathBuf, message: String },
}

/// Non-fatal conditions: the operation went through, but the user should be
/// told about something.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Warning {
    /// The atlas was loaded but the image it references does not exist.
    MissingReferencedImage { path: PathBuf },
    /// The atlas was loaded but the image it references could not be decoded.
    UnreadableReferencedImage { path: PathBuf, message: String },
    /// The referenced image has another size than the atlas records. Its
    /// sprites still fit, so the atlas now describes the image.
    ImageSizeAdopted {
        path: PathBuf,
        atlas_size: (u32, u32),
        image_size: (u32, u32),
    },
    /// The referenced image has another size than the atlas records and some
    /// sprites do not fit it. The image was not loaded.
    ImageSizeMismatch {
        path: PathBuf,
        atlas_size: (u32, u32),
        image_size: (u32, u32),
    },
}

impl Warning {
    /// Whether the session was left without an image for the atlas.
    pub fn needs_image(&self) -> bool {
        !matches!(self, Warning::ImageSizeAdopted { .. })
    }
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Warning::MissingReferencedImage { path } => write!(
                f,
                "referenced image file '{}' not found, please load the image manually",
                path.display()
            ),
            Warning::UnreadableReferencedImage { path, message } => write!(
                f,
                "referenced image file '{}' could not be loaded ({message}), \
                 please load the image manually",
                path.display()
            ),
            Warning::ImageSizeAdopted {
                path,
                atlas_size: (aw, ah),
                image_size: (iw, ih),
            } => write!(
                f,
                "atlas records a {aw}x{ah} image but '{}' is {iw}x{ih}, using the image size",
                path.display()
            ),
            Warning::ImageSizeMismatch {
                path,
                atlas_size: (aw, ah),
                image_size: (iw, ih),
            } => write!(
                f,
                "atlas records a {aw}x{ah} image but '{}' is {iw}x{ih} and some sprites \
                 do not fit it, please load the image manually",
                path.display()
            ),
        }
    }
}

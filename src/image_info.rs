//! Loading the source image and describing it.

use std::fs::{self, File};
use std::io::BufReader;
use std::path::{Path, PathBuf};

use image::{DynamicImage, ImageError, ImageFormat};

use crate::error::{EditorError, EditorResult};
use crate::geometry::Size;

/// Resolution assumed when the file does not record one.
pub const DEFAULT_DPI: f64 = 96.0;

const INCHES_PER_METRE: f64 = 0.0254;

/// Read-only snapshot of a loaded image.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageMetadata {
    pub width: u32,
    pub height: u32,
    pub dpi_x: f64,
    pub dpi_y: f64,
    /// Pixel format name, e.g. `Rgba8`.
    pub format: String,
    pub file_size_bytes: u64,
    /// Bits per pixel.
    pub bit_depth: u32,
    pub has_transparency: bool,
}

impl ImageMetadata {
    /// Derives metadata from a decoded bitmap plus what the file system and
    /// container told us.
    pub fn describe(bitmap: &DynamicImage, file_size_bytes: u64, dpi: Option<(f64, f64)>) -> Self {
        let color = bitmap.color();
        let (dpi_x, dpi_y) = dpi.unwrap_or((DEFAULT_DPI, DEFAULT_DPI));
        ImageMetadata {
            width: bitmap.width(),
            height: bitmap.height(),
            dpi_x,
            dpi_y,
            format: format!("{color:?}"),
            file_size_bytes,
            bit_depth: u32::from(color.bits_per_pixel()),
            has_transparency: color.has_alpha(),
        }
    }

    pub fn size(&self) -> Size {
        Size::new(f64::from(self.width), f64::from(self.height))
    }

    pub fn dimensions_label(&self) -> String {
        format!("{} x {}", self.width, self.height)
    }

    pub fn bit_depth_label(&self) -> String {
        format!("{} bits", self.bit_depth)
    }

    pub fn dpi_label(&self) -> String {
        format!("{:.0} x {:.0}", self.dpi_x, self.dpi_y)
    }

    pub fn file_size_label(&self) -> String {
        format_file_size(self.file_size_bytes)
    }

    pub fn transparency_label(&self) -> &'static str {
        if self.has_transparency { "Yes" } else { "No" }
    }
}

/// A decoded image together with where it came from.
#[derive(Debug, Clone)]
pub struct LoadedImage {
    path: PathBuf,
    bitmap: DynamicImage,
    metadata: ImageMetadata,
}

impl LoadedImage {
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn bitmap(&self) -> &DynamicImage {
        &self.bitmap
    }

    pub fn metadata(&self) -> &ImageMetadata {
        &self.metadata
    }

    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default()
    }
}

/// Decodes an image file and derives its metadata.
pub fn load_image(path: &Path) -> EditorResult<LoadedImage> {
    let load_error = |source: ImageError| EditorError::ImageLoad {
        path: path.to_path_buf(),
        source,
    };

    let reader = image::io::Reader::open(path)
        .and_then(|r| r.with_guessed_format())
        .map_err(|e| load_error(ImageError::IoError(e)))?;
    let container = reader.format();
    let bitmap = reader.decode().map_err(load_error)?;
    let file_size = fs::metadata(path)
        .map_err(|e| load_error(ImageError::IoError(e)))?
        .len();

    let dpi = match container {
        Some(ImageFormat::Png) => png_dpi(path),
        _ => None,
    };
    let metadata = ImageMetadata::describe(&bitmap, file_size, dpi);
    log::info!(
        "loaded image {} ({}, {}, {})",
        path.display(),
        metadata.dimensions_label(),
        metadata.format,
        metadata.file_size_label()
    );

    Ok(LoadedImage {
        path: path.to_path_buf(),
        bitmap,
        metadata,
    })
}

/// Physical resolution from the PNG `pHYs` chunk, in dots per inch.
fn png_dpi(path: &Path) -> Option<(f64, f64)> {
    let file = File::open(path).ok()?;
    let reader = png::Decoder::new(BufReader::new(file)).read_info().ok()?;
    let dims = reader.info().pixel_dims?;
    match dims.unit {
        png::Unit::Meter => Some((
            f64::from(dims.xppu) * INCHES_PER_METRE,
            f64::from(dims.yppu) * INCHES_PER_METRE,
        )),
        png::Unit::Unspecified => None,
    }
}

/// Human-readable byte count with one decimal, e.g. `1.5 KB`.
pub fn format_file_size(bytes: u64) -> String {
    const SUFFIXES: [&str; 4] = ["B", "KB", "MB", "GB"];
    let mut number = bytes as f64;
    let mut unit = 0;
    while unit + 1 < SUFFIXES.len() && (number / 1024.0).round_ties_even() >= 1.0 {
        number /= 1024.0;
        unit += 1;
    }
    format!("{number:.1} {}", SUFFIXES[unit])
}

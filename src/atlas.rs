//! The atlas: source image reference plus an ordered list of named sprites.

use std::path::Path;

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

use crate::error::{EditorError, EditorResult};
use crate::geometry::{Point, Size};
use crate::image_info::ImageMetadata;

/// A named rectangular region of the source image, in pixels.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpriteRect {
    pub name: String,
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
}

impl SpriteRect {
    pub fn new(name: impl Into<String>, x: u32, y: u32, width: u32, height: u32) -> Self {
        SpriteRect {
            name: name.into(),
            x,
            y,
            width,
            height,
            description: None,
            tag: None,
        }
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = Some(tag.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn right(&self) -> u64 {
        u64::from(self.x) + u64::from(self.width)
    }

    pub fn bottom(&self) -> u64 {
        u64::from(self.y) + u64::from(self.height)
    }

    /// Half-open hit test in image space.
    pub fn contains(&self, point: Point) -> bool {
        point.x >= f64::from(self.x)
            && point.y >= f64::from(self.y)
            && point.x < self.right() as f64
            && point.y < self.bottom() as f64
    }

    /// Checks the committed-sprite invariants against an image size.
    pub fn check_bounds(&self, image_width: u32, image_height: u32) -> EditorResult<()> {
        let invalid = |reason: String| EditorError::InvalidSprite {
            name: self.name.clone(),
            reason,
        };
        if self.name.trim().is_empty() {
            return Err(invalid("name must not be empty".into()));
        }
        if self.width == 0 || self.height == 0 {
            return Err(invalid(format!("size {}x{} is empty", self.width, self.height)));
        }
        if self.right() > u64::from(image_width) || self.bottom() > u64::from(image_height) {
            return Err(invalid(format!(
                "{}x{} at ({}, {}) exceeds image {}x{}",
                self.width, self.height, self.x, self.y, image_width, image_height
            )));
        }
        Ok(())
    }
}

/// Image metadata plus the sprites defined on it. Sprite order is insertion
/// order and is the order every exporter writes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Atlas {
    pub image_path: String,
    pub image_width: u32,
    pub image_height: u32,
    pub bit_depth: u32,
    pub format: String,
    #[serde(with = "created_date")]
    pub created_date: DateTime<Local>,
    sprites: Vec<SpriteRect>,
}

impl Default for Atlas {
    fn default() -> Self {
        Atlas::new()
    }
}

impl Atlas {
    pub fn new() -> Self {
        Atlas {
            image_path: String::new(),
            image_width: 0,
            image_height: 0,
            bit_depth: 0,
            format: String::new(),
            created_date: Local::now(),
            sprites: Vec::new(),
        }
    }

    /// An empty atlas describing the given image.
    pub fn for_image(path: &Path, metadata: &ImageMetadata) -> Self {
        let mut atlas = Atlas::new();
        atlas.describe_image(path, metadata);
        atlas
    }

    /// Points the atlas at another image without touching its sprites.
    pub fn describe_image(&mut self, path: &Path, metadata: &ImageMetadata) {
        self.image_path = path.to_string_lossy().into_owned();
        self.image_width = metadata.width;
        self.image_height = metadata.height;
        self.bit_depth = metadata.bit_depth;
        self.format = metadata.format.clone();
    }

    pub fn image_size(&self) -> Size {
        Size::new(f64::from(self.image_width), f64::from(self.image_height))
    }

    /// File name of the referenced image, if the atlas references one.
    pub fn image_file_name(&self) -> Option<String> {
        Path::new(&self.image_path)
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
    }

    pub fn sprites(&self) -> &[SpriteRect] {
        &self.sprites
    }

    pub fn sprite(&self, index: usize) -> Option<&SpriteRect> {
        self.sprites.get(index)
    }

    pub fn len(&self) -> usize {
        self.sprites.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sprites.is_empty()
    }

    /// Appends a sprite. Duplicate names are allowed.
    pub fn add_sprite(&mut self, sprite: SpriteRect) -> EditorResult<()> {
        sprite.check_bounds(self.image_width, self.image_height)?;
        log::debug!(
            "add sprite '{}' {}x{} at ({}, {})",
            sprite.name,
            sprite.width,
            sprite.height,
            sprite.x,
            sprite.y
        );
        self.sprites.push(sprite);
        Ok(())
    }

    /// Removes the sprite at `index`, keeping the order of the others.
    pub fn remove_sprite(&mut self, index: usize) -> Option<SpriteRect> {
        if index < self.sprites.len() {
            Some(self.sprites.remove(index))
        } else {
            None
        }
    }

    pub fn clear(&mut self) {
        self.sprites.clear();
    }

    /// Position of the first sprite with this name.
    pub fn position_of(&self, name: &str) -> Option<usize> {
        self.sprites.iter().position(|s| s.name == name)
    }

    /// Topmost (most recently added) sprite under an image point.
    pub fn sprite_at(&self, point: Point) -> Option<usize> {
        self.sprites.iter().rposition(|s| s.contains(point))
    }

    /// Checks every sprite against the atlas image size.
    pub fn validate(&self) -> EditorResult<()> {
        self.sprites
            .iter()
            .try_for_each(|s| s.check_bounds(self.image_width, self.image_height))
    }
}

/// `createdDate` is written as RFC 3339. Reading also accepts a local time
/// without offset, as written by older tools.
mod created_date {
    use chrono::{DateTime, Local, NaiveDateTime, TimeZone};
    use serde::de::Error as _;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(
        value: &DateTime<Local>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&value.to_rfc3339())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<DateTime<Local>, D::Error> {
        let raw = String::deserialize(deserializer)?;
        if let Ok(parsed) = DateTime::parse_from_rfc3339(&raw) {
            return Ok(parsed.with_timezone(&Local));
        }
        let naive = NaiveDateTime::parse_from_str(&raw, "%Y-%m-%dT%H:%M:%S%.f")
            .map_err(D::Error::custom)?;
        Local
            .from_local_datetime(&naive)
            .earliest()
            .ok_or_else(|| D::Error::custom(format!("'{raw}' is not a valid local time")))
    }
}

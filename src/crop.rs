//! Cutting single sprites out of the loaded image.

use std::path::Path;

use image::{DynamicImage, GenericImageView, ImageFormat};

use crate::atlas::SpriteRect;
use crate::error::{EditorError, EditorResult};

/// Crops a sprite out of the bitmap, keeping the bitmap's pixel format. The
/// rectangle is clipped to the bitmap; nothing left after clipping is an
/// error.
pub fn crop_sprite(bitmap: &DynamicImage, sprite: &SpriteRect) -> EditorResult<DynamicImage> {
    let (w, h) = bitmap.dimensions();
    let x = sprite.x.min(w);
    let y = sprite.y.min(h);
    let width = sprite.width.min(w - x);
    let height = sprite.height.min(h - y);
    if width == 0 || height == 0 {
        return Err(EditorError::InvalidSprite {
            name: sprite.name.clone(),
            reason: format!("lies outside the {w}x{h} image"),
        });
    }
    Ok(bitmap.crop_imm(x, y, width, height))
}

/// File name offered when exporting a sprite.
pub fn default_file_name(sprite: &SpriteRect) -> String {
    let stem: String = sprite
        .name
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c => c,
        })
        .collect();
    format!("{stem}.png")
}

/// Crops a sprite and encodes it to `path`. The encoder follows the file
/// extension, PNG when there is none.
pub fn export_sprite(bitmap: &DynamicImage, sprite: &SpriteRect, path: &Path) -> EditorResult<()> {
    let cropped = crop_sprite(bitmap, sprite)?;
    let format = ImageFormat::from_path(path).unwrap_or(ImageFormat::Png);
    let cropped = match format {
        // JPEG has no alpha channel.
        ImageFormat::Jpeg if cropped.color().has_alpha() => {
            DynamicImage::ImageRgb8(cropped.to_rgb8())
        }
        _ => cropped,
    };
    cropped
        .save_with_format(path, format)
        .map_err(|e| EditorError::SpriteExport {
            name: sprite.name.clone(),
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
    log::info!("exported sprite '{}' to {}", sprite.name, path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};

    fn checker() -> DynamicImage {
        let mut img = RgbaImage::new(8, 4);
        for (x, y, px) in img.enumerate_pixels_mut() {
            *px = Rgba([x as u8, y as u8, 0, 255]);
        }
        DynamicImage::ImageRgba8(img)
    }

    #[test]
    fn crops_exact_region() {
        let cropped = crop_sprite(&checker(), &SpriteRect::new("a", 2, 1, 3, 2)).unwrap();
        assert_eq!(cropped.dimensions(), (3, 2));
        assert_eq!(cropped.get_pixel(0, 0), Rgba([2, 1, 0, 255]));
        assert_eq!(cropped.get_pixel(2, 1), Rgba([4, 2, 0, 255]));
    }

    #[test]
    fn clips_to_bitmap() {
        let cropped = crop_sprite(&checker(), &SpriteRect::new("a", 6, 2, 10, 10)).unwrap();
        assert_eq!(cropped.dimensions(), (2, 2));
        assert!(crop_sprite(&checker(), &SpriteRect::new("b", 8, 0, 4, 4)).is_err());
    }

    #[test]
    fn file_names() {
        assert_eq!(default_file_name(&SpriteRect::new("Idle", 0, 0, 1, 1)), "Idle.png");
        assert_eq!(default_file_name(&SpriteRect::new("a/b:c", 0, 0, 1, 1)), "a_b_c.png");
    }

    #[test]
    fn writes_png_and_jpeg() {
        let dir = tempfile::tempdir().unwrap();
        let sprite = SpriteRect::new("a", 0, 0, 4, 4);

        let png = dir.path().join("a.png");
        export_sprite(&checker(), &sprite, &png).unwrap();
        assert_eq!(image::open(&png).unwrap().dimensions(), (4, 4));

        let jpg = dir.path().join("a.jpg");
        export_sprite(&checker(), &sprite, &jpg).unwrap();
        assert_eq!(image::open(&jpg).unwrap().dimensions(), (4, 4));
    }

    #[test]
    fn unwritable_target_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("no-such-dir").join("a.png");
        let sprite = SpriteRect::new("a", 0, 0, 4, 4);
        let err = export_sprite(&checker(), &sprite, &target).unwrap_err();
        assert!(matches!(err, EditorError::SpriteExport { .. }));
    }
}

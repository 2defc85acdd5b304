//! JSON: the full atlas, indented. Also the format atlases are loaded from.

use std::fs;
use std::path::Path;

use crate::atlas::Atlas;
use crate::error::{EditorError, EditorResult};

pub fn to_string(atlas: &Atlas) -> EditorResult<String> {
    Ok(serde_json::to_string_pretty(atlas)?)
}

/// Parses an atlas and checks its sprites against its image size.
pub fn from_str(text: &str) -> Result<Atlas, String> {
    let atlas: Atlas = serde_json::from_str(text).map_err(|e| e.to_string())?;
    atlas.validate().map_err(|e| e.to_string())?;
    Ok(atlas)
}

/// Reads an atlas file. Any failure is reported as [`EditorError::AtlasParse`].
pub fn read_file(path: &Path) -> EditorResult<Atlas> {
    let parse_error = |message: String| EditorError::AtlasParse {
        path: path.to_path_buf(),
        message,
    };
    let text = fs::read_to_string(path).map_err(|e| parse_error(e.to_string()))?;
    from_str(&text).map_err(parse_error)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::atlas::SpriteRect;
    use pretty_assertions::assert_eq;

    fn sample() -> Atlas {
        let mut atlas = Atlas::new();
        atlas.image_path = "C:\\art\\hero sheet.png".into();
        atlas.image_width = 128;
        atlas.image_height = 64;
        atlas.bit_depth = 32;
        atlas.format = "Rgba8".into();
        atlas.add_sprite(SpriteRect::new("Idle", 10, 10, 40, 20)).unwrap();
        atlas
            .add_sprite(
                SpriteRect::new("Run \"1\"", 50, 0, 30, 64)
                    .with_tag("run")
                    .with_description("first frame"),
            )
            .unwrap();
        atlas
    }

    #[test]
    fn round_trips_exactly() {
        let atlas = sample();
        let text = to_string(&atlas).unwrap();
        assert_eq!(from_str(&text).unwrap(), atlas);
    }

    #[test]
    fn output_is_indented() {
        let text = to_string(&sample()).unwrap();
        assert!(text.starts_with("{\n  \"imagePath\""));
        assert!(text.contains("\n  \"sprites\": [\n"));
        assert!(!text.contains("\"description\": null"));
    }

    #[test]
    fn rejects_out_of_bounds_sprites() {
        let mut value = serde_json::to_value(sample()).unwrap();
        value["sprites"][0]["width"] = 500.into();
        let err = from_str(&value.to_string()).unwrap_err();
        assert!(err.contains("exceeds image"), "{err}");
    }

    #[test]
    fn rejects_malformed_text() {
        assert!(from_str("{\"imagePath\": 3}").is_err());
        assert!(from_str("").is_err());
    }

    #[test]
    fn read_file_reports_parse_errors() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("atlas.json");
        fs::write(&path, "[]").unwrap();
        assert!(matches!(read_file(&path), Err(EditorError::AtlasParse { .. })));
        assert!(matches!(
            read_file(&dir.path().join("absent.json")),
            Err(EditorError::AtlasParse { .. })
        ));
    }
}

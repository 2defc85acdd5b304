//! CSS sprite sheet: a shared `.sprite` rule plus one positioned class per
//! sprite.

use std::fmt::Write as _;

use crate::atlas::Atlas;
use crate::export::ExportOptions;

/// Lowercases a sprite name and replaces anything outside `[a-z0-9-_]`
/// with `-`.
pub fn slugify(name: &str) -> String {
    name.to_lowercase()
        .chars()
        .map(|c| match c {
            'a'..='z' | '0'..='9' | '-' | '_' => c,
            _ => '-',
        })
        .collect()
}

pub fn class_name(sprite_name: &str) -> String {
    format!("sprite-{}", slugify(sprite_name))
}

// Comment bodies must not close the comment early.
fn comment_safe(text: &str) -> String {
    text.replace("*/", "* /")
}

pub fn to_string(atlas: &Atlas, options: &ExportOptions) -> String {
    let image_name = options.resolve_image_name(atlas);
    let mut css = String::new();

    let _ = writeln!(css, "/* Sprite Atlas CSS - Generated on {} */", options.timestamp());
    let _ = writeln!(
        css,
        "/* Image: {} ({}x{}) */",
        comment_safe(&image_name),
        atlas.image_width,
        atlas.image_height
    );
    css.push('\n');

    css.push_str(".sprite {\n");
    let _ = writeln!(css, "    background-image: url('{}');", image_name.replace('\'', "\\'"));
    css.push_str("    background-repeat: no-repeat;\n");
    css.push_str("    display: inline-block;\n");
    css.push_str("}\n\n");

    for sprite in atlas.sprites() {
        let _ = writeln!(css, ".{} {{", class_name(&sprite.name));
        let _ = writeln!(css, "    background-position: -{}px -{}px;", sprite.x, sprite.y);
        let _ = writeln!(css, "    width: {}px;", sprite.width);
        let _ = writeln!(css, "    height: {}px;", sprite.height);
        if let Some(tag) = sprite.tag.as_deref().filter(|t| !t.is_empty()) {
            let _ = writeln!(css, "    /* Tag: {} */", comment_safe(tag));
        }
        css.push_str("}\n\n");
    }
    css
}

//! XML: `SpriteAtlas` root carrying the atlas fields as attributes, with one
//! `Sprite` element per sprite inside a `Sprites` container.

use std::fmt::Write as _;

use crate::atlas::{Atlas, SpriteRect};
use crate::export::TIMESTAMP_FORMAT;

/// Characters XML 1.0 does not allow anywhere in a document.
fn is_forbidden(c: char) -> bool {
    matches!(
        c,
        '\u{0}'..='\u{8}' | '\u{B}' | '\u{C}' | '\u{E}'..='\u{1F}' | '\u{FFFE}' | '\u{FFFF}'
    )
}

/// Escapes text for use inside a double-quoted attribute value. Characters
/// XML cannot carry become U+FFFD.
pub fn escape_attribute(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\t' => out.push_str("&#x9;"),
            '\n' => out.push_str("&#xA;"),
            '\r' => out.push_str("&#xD;"),
            c if is_forbidden(c) => out.push(char::REPLACEMENT_CHARACTER),
            c => out.push(c),
        }
    }
    out
}

fn attribute(out: &mut String, name: &str, value: impl ToString) {
    let _ = write!(out, " {name}=\"{}\"", escape_attribute(&value.to_string()));
}

fn sprite_element(out: &mut String, sprite: &SpriteRect) {
    out.push_str("    <Sprite");
    attribute(out, "name", &sprite.name);
    attribute(out, "x", sprite.x);
    attribute(out, "y", sprite.y);
    attribute(out, "width", sprite.width);
    attribute(out, "height", sprite.height);
    if let Some(tag) = &sprite.tag {
        attribute(out, "tag", tag);
    }
    if let Some(description) = &sprite.description {
        attribute(out, "description", description);
    }
    out.push_str(" />\n");
}

pub fn to_string(atlas: &Atlas) -> String {
    let mut out = String::from("<?xml version=\"1.0\" encoding=\"utf-8\"?>\n<SpriteAtlas");
    attribute(&mut out, "imagePath", &atlas.image_path);
    attribute(&mut out, "imageWidth", atlas.image_width);
    attribute(&mut out, "imageHeight", atlas.image_height);
    attribute(&mut out, "bitDepth", atlas.bit_depth);
    attribute(&mut out, "format", &atlas.format);
    attribute(&mut out, "createdDate", atlas.created_date.format(TIMESTAMP_FORMAT));
    out.push_str(">\n");

    if atlas.is_empty() {
        out.push_str("  <Sprites />\n");
    } else {
        out.push_str("  <Sprites>\n");
        for sprite in atlas.sprites() {
            sprite_element(&mut out, sprite);
        }
        out.push_str("  </Sprites>\n");
    }
    out.push_str("</SpriteAtlas>");
    out
}

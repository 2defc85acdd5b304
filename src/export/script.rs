//! Unity C# MonoBehaviour that registers every sprite rectangle at start-up.

use std::collections::HashSet;
use std::fmt::Write as _;
use std::path::Path;

use crate::atlas::Atlas;
use crate::export::ExportOptions;

/// Nested class holding one string constant per sprite name.
const NAMES_CLASS: &str = "Names";

const CSHARP_KEYWORDS: &[&str] = &[
    "abstract", "as", "base", "bool", "break", "byte", "case", "catch", "char", "checked", "class",
    "const", "continue", "decimal", "default", "delegate", "do", "double", "else", "enum", "event",
    "explicit", "extern", "false", "finally", "fixed", "float", "for", "foreach", "goto", "if",
    "implicit", "in", "int", "interface", "internal", "is", "lock", "long", "namespace", "new",
    "null", "object", "operator", "out", "override", "params", "private", "protected", "public",
    "readonly", "ref", "return", "sbyte", "sealed", "short", "sizeof", "stackalloc", "static",
    "string", "struct", "switch", "this", "throw", "true", "try", "typeof", "uint", "ulong",
    "unchecked", "unsafe", "ushort", "using", "virtual", "void", "volatile", "while",
];

/// Turns a sprite name into a C# identifier: anything outside
/// `[A-Za-z0-9_]` becomes `_`, a leading digit gets a `_` prefix and
/// keywords are escaped with `@`.
pub fn sanitize_identifier(name: &str) -> String {
    let mut ident: String = name
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '_' { c } else { '_' })
        .collect();
    if ident.is_empty() || ident.starts_with(|c: char| c.is_ascii_digit()) {
        ident.insert(0, '_');
    }
    if CSHARP_KEYWORDS.contains(&ident.as_str()) {
        ident.insert(0, '@');
    }
    ident
}

/// Quotes text as a C# string literal.
fn string_literal(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 2);
    out.push('"');
    for c in text.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

/// One identifier per sprite, in atlas order. Collisions get `_2`, `_3`...
fn sprite_identifiers(atlas: &Atlas) -> Vec<String> {
    let mut taken: HashSet<String> = HashSet::from([NAMES_CLASS.to_string()]);
    atlas
        .sprites()
        .iter()
        .map(|sprite| {
            let base = sanitize_identifier(&sprite.name);
            let mut ident = base.clone();
            let mut n = 2;
            while !taken.insert(ident.clone()) {
                ident = format!("{base}_{n}");
                n += 1;
            }
            ident
        })
        .collect()
}

pub fn to_string(atlas: &Atlas, options: &ExportOptions) -> String {
    let class_name = sanitize_identifier(&options.class_name);
    let image_name = Path::new(&atlas.image_path)
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let identifiers = sprite_identifiers(atlas);
    let mut cs = String::new();

    cs.push_str("using UnityEngine;\n");
    cs.push_str("using System.Collections.Generic;\n\n");
    let _ = writeln!(cs, "// Generated on {}", options.timestamp());
    let _ = writeln!(
        cs,
        "// Image: {} ({}x{})\n",
        image_name.replace(['\n', '\r'], " "),
        atlas.image_width,
        atlas.image_height
    );

    cs.push_str("[System.Serializable]\n");
    cs.push_str("public class SpriteData\n{\n");
    cs.push_str("    public string name;\n");
    cs.push_str("    public Rect rect;\n");
    cs.push_str("    public string tag;\n");
    cs.push_str("}\n\n");

    let _ = writeln!(cs, "public class {class_name} : MonoBehaviour\n{{");
    let _ = writeln!(cs, "    public static class {NAMES_CLASS}\n    {{");
    for (sprite, ident) in atlas.sprites().iter().zip(&identifiers) {
        let literal = string_literal(&sprite.name);
        let _ = writeln!(cs, "        public const string {ident} = {literal};");
    }
    cs.push_str("    }\n\n");

    cs.push_str("    public Texture2D atlasTexture;\n");
    cs.push_str("    public List<SpriteData> sprites = new List<SpriteData>();\n\n");
    cs.push_str("    void Start()\n    {\n        InitializeSprites();\n    }\n\n");

    cs.push_str("    void InitializeSprites()\n    {\n");
    for (sprite, ident) in atlas.sprites().iter().zip(&identifiers) {
        cs.push_str("        sprites.Add(new SpriteData {\n");
        let _ = writeln!(cs, "            name = {NAMES_CLASS}.{ident},");
        let _ = writeln!(
            cs,
            "            rect = new Rect({}, {}, {}, {}),",
            sprite.x, sprite.y, sprite.width, sprite.height
        );
        let _ = writeln!(
            cs,
            "            tag = {}",
            string_literal(sprite.tag.as_deref().unwrap_or_default())
        );
        cs.push_str("        });\n");
    }
    cs.push_str("    }\n\n");

    cs.push_str("    public Sprite GetSprite(string spriteName)\n    {\n");
    cs.push_str("        var spriteData = sprites.Find(s => s.name == spriteName);\n");
    cs.push_str("        if (spriteData != null && atlasTexture != null)\n        {\n");
    cs.push_str(
        "            return Sprite.Create(atlasTexture, spriteData.rect, Vector2.one * 0.5f);\n",
    );
    cs.push_str("        }\n        return null;\n    }\n}\n");
    cs
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::atlas::SpriteRect;
    use chrono::{Local, TimeZone};
    use pretty_assertions::assert_eq;

    fn atlas() -> Atlas {
        let mut atlas = Atlas::new();
        atlas.image_path = "/art/hero.png".into();
        atlas.image_width = 128;
        atlas.image_height = 64;
        atlas
    }

    #[test]
    fn identifiers() {
        assert_eq!(sanitize_identifier("Player Run #1"), "Player_Run__1");
        assert_eq!(sanitize_identifier("1up"), "_1up");
        assert_eq!(sanitize_identifier("class"), "@class");
        assert_eq!(sanitize_identifier(""), "_");
        assert_eq!(sanitize_identifier("é"), "_");
    }

    #[test]
    fn colliding_identifiers_are_suffixed() {
        let mut atlas = atlas();
        for name in ["a b", "a-b", "Names", "a_b"] {
            atlas.add_sprite(SpriteRect::new(name, 0, 0, 4, 4)).unwrap();
        }
        assert_eq!(sprite_identifiers(&atlas), vec!["a_b", "a_b_2", "Names_2", "a_b_3"]);
    }

    #[test]
    fn registers_each_sprite() {
        let mut atlas = atlas();
        atlas.add_sprite(SpriteRect::new("Idle", 10, 10, 40, 20)).unwrap();
        atlas
            .add_sprite(SpriteRect::new("Say \"hi\"", 0, 32, 16, 16).with_tag("talk"))
            .unwrap();
        let options = ExportOptions::default()
            .with_class_name("Hero Atlas")
            .with_generated_at(Local.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap());
        let cs = to_string(&atlas, &options);

        assert!(cs.starts_with(
            "using UnityEngine;\nusing System.Collections.Generic;\n\n\
             // Generated on 2024-01-02 03:04:05\n// Image: hero.png (128x64)\n"
        ));
        assert!(cs.contains("public class Hero_Atlas : MonoBehaviour\n{\n"));
        assert!(cs.contains("        public const string Say__hi_ = \"Say \\\"hi\\\"\";\n"));
        assert!(cs.contains(concat!(
            "        sprites.Add(new SpriteData {\n",
            "            name = Names.Idle,\n",
            "            rect = new Rect(10, 10, 40, 20),\n",
            "            tag = \"\"\n",
            "        });\n",
        )));
        assert!(cs.contains("rect = new Rect(0, 32, 16, 16),\n            tag = \"talk\"\n"));
        assert!(cs.ends_with("        return null;\n    }\n}\n"));
    }

    #[test]
    fn empty_atlas_still_compiles_shape() {
        let cs = to_string(&Atlas::new(), &ExportOptions::default());
        assert!(cs.contains("public class SpriteAtlas : MonoBehaviour"));
        assert!(cs.contains("    void InitializeSprites()\n    {\n    }\n"));
    }
}

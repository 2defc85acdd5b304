use std::cell::RefCell;
use std::fs;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use image::RgbaImage;
use pretty_assertions::assert_eq;
use serde_json::{Value, json};

use sprite_checker::selection::{DragOutcome, Phase, SelectionField};
use sprite_checker::{
    Atlas, Change, EditorConfig, EditorError, ExportFormat, Input, Point, PointerButton, Session,
    Size, SpriteRect, Warning,
};

fn write_png(dir: &Path, name: &str, width: u32, height: u32) -> PathBuf {
    let path = dir.join(name);
    RgbaImage::new(width, height).save(&path).unwrap();
    path
}

fn open(dir: &Path) -> Session {
    let image = write_png(dir, "sheet.png", 128, 64);
    let mut session = Session::new(EditorConfig::default());
    session.load_image(&image).unwrap();
    session.set_viewport(Some(Size::new(640.0, 480.0)));
    session
}

fn drag(session: &mut Session, from: (f64, f64), to: (f64, f64)) -> DragOutcome {
    session.pointer_down(Point::new(from.0, from.1));
    session.pointer_move(Point::new(to.0, to.1));
    session.pointer_up(Point::new(to.0, to.1))
}

#[test]
fn drag_commit_and_save_json() {
    let dir = tempfile::tempdir().unwrap();
    let mut session = open(dir.path());

    assert_eq!(drag(&mut session, (10.0, 10.0), (50.0, 30.0)), DragOutcome::Pending);
    assert_eq!(session.selection().draft().name, "Sprite_1");
    assert!(session.commit("Idle", "").unwrap());

    let target = dir.path().join("atlas.json");
    assert_eq!(session.save_atlas(&target).unwrap(), ExportFormat::Json);

    let saved: Value = serde_json::from_str(&fs::read_to_string(&target).unwrap()).unwrap();
    assert_eq!(saved["imageWidth"], json!(128));
    assert_eq!(saved["imageHeight"], json!(64));
    assert_eq!(
        saved["sprites"],
        json!([{ "name": "Idle", "x": 10, "y": 10, "width": 40, "height": 20 }])
    );
}

#[test]
fn reversed_drag_gives_same_sprite() {
    let dir = tempfile::tempdir().unwrap();
    let mut session = open(dir.path());
    drag(&mut session, (50.0, 30.0), (10.0, 10.0));
    session.commit("Idle", "").unwrap();
    assert_eq!(session.atlas().sprites(), &[SpriteRect::new("Idle", 10, 10, 40, 20)]);
}

#[test]
fn small_drags_never_commit() {
    let dir = tempfile::tempdir().unwrap();
    let mut session = open(dir.path());
    assert_eq!(drag(&mut session, (10.0, 10.0), (15.0, 40.0)), DragOutcome::Discarded);
    assert!(!session.commit("Tiny", "").unwrap());
    assert!(session.atlas().is_empty());
}

#[test]
fn drag_past_the_edge_is_clamped() {
    let dir = tempfile::tempdir().unwrap();
    let mut session = open(dir.path());
    drag(&mut session, (100.0, 40.0), (500.0, -20.0));
    session.commit("Edge", "").unwrap();
    assert_eq!(session.atlas().sprites(), &[SpriteRect::new("Edge", 100, 0, 28, 40)]);
}

#[test]
fn editing_then_cancelling_drops_the_sprite() {
    let dir = tempfile::tempdir().unwrap();
    let mut session = open(dir.path());
    drag(&mut session, (0.0, 0.0), (32.0, 32.0));
    session.commit("Head", "").unwrap();
    drag(&mut session, (40.0, 0.0), (72.0, 32.0));
    session.commit("Body", "").unwrap();

    let head = session.atlas().position_of("Head").unwrap();
    assert!(session.edit_sprite(head));
    assert_eq!(session.selection().phase(), Phase::Pending);
    assert_eq!(session.selection().draft().name, "Head");
    assert!(session.cancel_selection());

    let names: Vec<_> = session.atlas().sprites().iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, vec!["Body"]);
}

#[test]
fn editing_then_committing_moves_sprite_to_the_end() {
    let dir = tempfile::tempdir().unwrap();
    let mut session = open(dir.path());
    drag(&mut session, (0.0, 0.0), (32.0, 32.0));
    session.commit("Head", "").unwrap();
    drag(&mut session, (40.0, 0.0), (72.0, 32.0));
    session.commit("Body", "").unwrap();

    session.edit_sprite(0);
    session.set_selection_field(SelectionField::Width, "16");
    assert!(session.commit_draft().unwrap());

    assert_eq!(
        session.atlas().sprites(),
        &[SpriteRect::new("Body", 40, 0, 32, 32), SpriteRect::new("Head", 0, 0, 16, 32)]
    );
}

#[test]
fn json_round_trip_through_a_new_session() {
    let dir = tempfile::tempdir().unwrap();
    let mut session = open(dir.path());
    drag(&mut session, (10.0, 10.0), (50.0, 30.0));
    session.commit("Idle", "idle").unwrap();
    drag(&mut session, (60.0, 0.0), (90.0, 40.0));
    session.commit("Jump", "").unwrap();
    let target = dir.path().join("atlas.json");
    session.save_atlas(&target).unwrap();

    let mut reopened = Session::default();
    let warning = reopened.load_atlas(&target).unwrap();
    assert_eq!(warning, None);
    assert!(reopened.image().is_some());
    assert_eq!(reopened.atlas().sprites(), session.atlas().sprites());
    assert_eq!(reopened.atlas().created_date, session.atlas().created_date);
}

#[test]
fn empty_atlas_is_not_saved() {
    let dir = tempfile::tempdir().unwrap();
    let session = open(dir.path());
    let target = dir.path().join("atlas.xml");
    assert!(matches!(session.save_atlas(&target), Err(EditorError::EmptyAtlas)));
    assert!(!target.exists());
}

#[test]
fn every_export_format_by_extension() {
    let dir = tempfile::tempdir().unwrap();
    let mut session = open(dir.path());
    drag(&mut session, (0.0, 0.0), (16.0, 16.0));
    session.commit("Coin", "pickup").unwrap();

    for (file, format, marker) in [
        ("a.json", ExportFormat::Json, "\"name\": \"Coin\""),
        ("a.xml", ExportFormat::Xml, "<Sprite name=\"Coin\""),
        ("a.css", ExportFormat::Css, ".sprite-coin {"),
        ("a.cs", ExportFormat::Script, "public const string Coin = \"Coin\";"),
        ("a.txt", ExportFormat::Json, "\"tag\": \"pickup\""),
    ] {
        let path = dir.path().join(file);
        assert_eq!(session.save_atlas(&path).unwrap(), format);
        assert!(fs::read_to_string(&path).unwrap().contains(marker), "{file}");
    }
}

#[test]
fn missing_referenced_image_is_a_warning() {
    let dir = tempfile::tempdir().unwrap();
    let mut atlas = Atlas::new();
    atlas.image_path = dir.path().join("gone.png").to_string_lossy().into_owned();
    atlas.image_width = 64;
    atlas.image_height = 64;
    atlas.add_sprite(SpriteRect::new("Idle", 0, 0, 32, 32)).unwrap();
    let path = dir.path().join("atlas.json");
    fs::write(&path, serde_json::to_string(&atlas).unwrap()).unwrap();

    let mut session = open(dir.path());
    let warning = session.load_atlas(&path).unwrap();
    assert!(matches!(warning, Some(Warning::MissingReferencedImage { .. })));
    assert!(session.image().is_none());
    assert_eq!(session.atlas().len(), 1);

    let replacement = write_png(dir.path(), "found.png", 64, 64);
    session.attach_image(&replacement).unwrap();
    assert_eq!(session.atlas().len(), 1);
    assert!(session.atlas().image_path.ends_with("found.png"));
}

#[test]
fn attaching_a_too_small_image_changes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let mut session = open(dir.path());
    drag(&mut session, (60.0, 10.0), (120.0, 50.0));
    session.commit("Wide", "").unwrap();

    let small = write_png(dir.path(), "small.png", 32, 32);
    assert!(matches!(session.attach_image(&small), Err(EditorError::InvalidSprite { .. })));
    assert_eq!(session.atlas().image_width, 128);
    assert_eq!(session.metadata().map(|m| m.width), Some(128));
}

#[test]
fn malformed_atlas_leaves_state_alone() {
    let dir = tempfile::tempdir().unwrap();
    let mut session = open(dir.path());
    drag(&mut session, (0.0, 0.0), (16.0, 16.0));
    session.commit("Keep", "").unwrap();

    let bad = dir.path().join("bad.json");
    fs::write(&bad, "{ not json").unwrap();
    assert!(matches!(session.load_atlas(&bad), Err(EditorError::AtlasParse { .. })));

    let outside = dir.path().join("outside.json");
    fs::write(
        &outside,
        r#"{"imagePath":"x.png","imageWidth":10,"imageHeight":10,"bitDepth":32,"format":"Rgba8",
            "createdDate":"2024-01-01T00:00:00Z","sprites":[{"name":"a","x":5,"y":5,"width":10,"height":10}]}"#,
    )
    .unwrap();
    assert!(matches!(session.load_atlas(&outside), Err(EditorError::AtlasParse { .. })));

    assert_eq!(session.atlas().sprites(), &[SpriteRect::new("Keep", 0, 0, 16, 16)]);
    assert!(session.image().is_some());
}

#[test]
fn unreadable_image_keeps_previous_document() {
    let dir = tempfile::tempdir().unwrap();
    let mut session = open(dir.path());
    let junk = dir.path().join("junk.png");
    fs::write(&junk, b"not an image").unwrap();
    assert!(matches!(session.load_image(&junk), Err(EditorError::ImageLoad { .. })));
    assert_eq!(session.metadata().map(|m| (m.width, m.height)), Some((128, 64)));
}

#[test]
fn sprite_export_writes_the_crop() {
    let dir = tempfile::tempdir().unwrap();
    let mut session = open(dir.path());
    drag(&mut session, (8.0, 8.0), (24.0, 40.0));
    session.commit("Crop", "").unwrap();

    let out = dir.path().join("crop.png");
    session.export_sprite(0, &out).unwrap();
    let exported = image::open(&out).unwrap();
    assert_eq!((exported.width(), exported.height()), (16, 32));
    assert!(matches!(session.export_sprite(3, &out), Err(EditorError::NoSuchSprite(3))));
}

#[test]
fn observers_hear_about_document_changes() {
    let dir = tempfile::tempdir().unwrap();
    let mut session = open(dir.path());
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = seen.clone();
    session.subscribe(move |change| sink.borrow_mut().push(change));

    let start = Point::new(0.0, 0.0);
    let end = Point::new(20.0, 20.0);
    session.handle(Input::PointerDown { button: PointerButton::Left, position: start }).unwrap();
    session.handle(Input::PointerUp { button: PointerButton::Left, position: end }).unwrap();
    session.commit("Box", "").unwrap();
    session.remove_sprite(0);
    session.toggle_grid();
    session.zoom_to_fit();

    let seen = seen.borrow();
    assert_eq!(seen.iter().filter(|c| **c == Change::Atlas).count(), 2);
    assert!(seen.contains(&Change::Grid));
    assert_eq!(seen.last(), Some(&Change::View));
}

#[test]
fn zoom_keeps_the_anchor_under_the_pointer() {
    let dir = tempfile::tempdir().unwrap();
    let mut session = open(dir.path());
    let anchor = Point::new(64.0, 32.0);
    let before = session.mapper().to_image_space(anchor);
    session.zoom_at(2.0, anchor);
    session.zoom_at(1.25, anchor);
    let after = session.mapper().to_image_space(anchor);
    assert!((before.x - after.x).abs() < 1e-9);
    assert!((before.y - after.y).abs() < 1e-9);
    assert_eq!(session.view().zoom_label(), "250%");
}

#[test]
fn moving_a_selection_numerically_still_commits() {
    let dir = tempfile::tempdir().unwrap();
    let mut session = open(dir.path());
    drag(&mut session, (10.0, 10.0), (50.0, 30.0));
    assert!(session.set_selection_field(SelectionField::X, "100"));

    assert!(session.commit("Moved", "").unwrap());
    assert_eq!(session.atlas().sprites(), &[SpriteRect::new("Moved", 100, 10, 28, 20)]);
    assert!(!session.selection().is_visible());
}

fn write_atlas_for(dir: &Path, image: &Path, size: (u32, u32), sprites: &[SpriteRect]) -> PathBuf {
    let mut atlas = Atlas::new();
    atlas.image_path = image.to_string_lossy().into_owned();
    atlas.image_width = size.0;
    atlas.image_height = size.1;
    for sprite in sprites {
        atlas.add_sprite(sprite.clone()).unwrap();
    }
    let path = dir.join("atlas.json");
    fs::write(&path, serde_json::to_string(&atlas).unwrap()).unwrap();
    path
}

#[test]
fn larger_referenced_image_is_adopted() {
    let dir = tempfile::tempdir().unwrap();
    let image = write_png(dir.path(), "big.png", 128, 64);
    let sprites = [SpriteRect::new("Left", 0, 0, 16, 16)];
    let atlas = write_atlas_for(dir.path(), &image, (64, 32), &sprites);

    let mut session = Session::default();
    session.set_viewport(Some(Size::new(640.0, 480.0)));
    let warning = session.load_atlas(&atlas).unwrap();
    assert_eq!(
        warning,
        Some(Warning::ImageSizeAdopted {
            path: image.clone(),
            atlas_size: (64, 32),
            image_size: (128, 64),
        })
    );
    assert!(!warning.unwrap().needs_image());
    assert_eq!((session.atlas().image_width, session.atlas().image_height), (128, 64));

    assert_eq!(drag(&mut session, (70.0, 10.0), (120.0, 50.0)), DragOutcome::Pending);
    assert!(session.commit("Right", "").unwrap());
    assert_eq!(session.atlas().len(), 2);
}

#[test]
fn smaller_referenced_image_is_not_loaded() {
    let dir = tempfile::tempdir().unwrap();
    let image = write_png(dir.path(), "small.png", 32, 32);
    let sprites = [SpriteRect::new("Far", 96, 0, 32, 32)];
    let atlas = write_atlas_for(dir.path(), &image, (128, 64), &sprites);

    let mut session = Session::default();
    let warning = session.load_atlas(&atlas).unwrap().unwrap();
    assert!(matches!(warning, Warning::ImageSizeMismatch { image_size: (32, 32), .. }));
    assert!(warning.needs_image());
    assert!(session.image().is_none());
    assert_eq!(session.atlas().image_width, 128);
    assert_eq!(session.atlas().len(), 1);
}

//! One open document: the atlas, the image it describes, the selection in
//! progress and the view onto it.
//!
//! Every mutating method notifies subscribers with the [`Change`] kinds it
//! touched, after the mutation is complete. Hosts redraw from those
//! notifications; the session never draws anything.

use std::path::Path;

use image::DynamicImage;

use crate::atlas::{Atlas, SpriteRect};
use crate::config::EditorConfig;
use crate::crop;
use crate::error::{EditorError, EditorResult, Warning};
use crate::export::{self, ExportFormat, ExportOptions};
use crate::geometry::{CoordinateMapper, Point, Size};
use crate::grid::GridSettings;
use crate::image_info::{self, ImageMetadata, LoadedImage};
use crate::selection::{DragOutcome, Selection, SelectionField, parse_field};
use crate::view::{self, PanDrag, ViewTransform};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Change {
    Image,
    Atlas,
    Selection,
    View,
    Grid,
}

type Subscriber = Box<dyn FnMut(Change)>;

pub struct Session {
    config: EditorConfig,
    atlas: Atlas,
    image: Option<LoadedImage>,
    selection: Selection,
    view: ViewTransform,
    viewport: Option<Size>,
    pan: Option<PanDrag>,
    grid: GridSettings,
    last_added: Option<SpriteRect>,
    subscribers: Vec<Subscriber>,
}

impl Default for Session {
    fn default() -> Self {
        Session::new(EditorConfig::default())
    }
}

/// Makes the atlas and a freshly loaded image agree on the image size, so
/// that selections clamped to the bitmap are also valid atlas sprites.
fn reconcile_image_size(
    atlas: &mut Atlas,
    loaded: LoadedImage,
) -> (Option<LoadedImage>, Option<Warning>) {
    let meta = loaded.metadata();
    let atlas_size = (atlas.image_width, atlas.image_height);
    let image_size = (meta.width, meta.height);
    if atlas_size == image_size {
        return (Some(loaded), None);
    }

    let path = loaded.path().to_path_buf();
    let mut resized = atlas.clone();
    resized.describe_image(&path, meta);
    if resized.validate().is_ok() {
        *atlas = resized;
        let warning = Warning::ImageSizeAdopted { path, atlas_size, image_size };
        (Some(loaded), Some(warning))
    } else {
        let warning = Warning::ImageSizeMismatch { path, atlas_size, image_size };
        (None, Some(warning))
    }
}

impl Session {
    pub fn new(config: EditorConfig) -> Self {
        Session {
            atlas: Atlas::new(),
            image: None,
            selection: Selection::with_min_size(config.min_selection_size),
            view: ViewTransform::default(),
            viewport: None,
            pan: None,
            grid: config.grid,
            last_added: None,
            subscribers: Vec::new(),
            config,
        }
    }

    pub fn subscribe(&mut self, subscriber: impl FnMut(Change) + 'static) {
        self.subscribers.push(Box::new(subscriber));
    }

    fn notify(&mut self, changes: &[Change]) {
        for &change in changes {
            for subscriber in &mut self.subscribers {
                subscriber(change);
            }
        }
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn atlas(&self) -> &Atlas {
        &self.atlas
    }

    pub fn image(&self) -> Option<&LoadedImage> {
        self.image.as_ref()
    }

    pub fn metadata(&self) -> Option<&ImageMetadata> {
        self.image.as_ref().map(LoadedImage::metadata)
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn view(&self) -> &ViewTransform {
        &self.view
    }

    pub fn grid(&self) -> &GridSettings {
        &self.grid
    }

    /// The sprite added most recently, for hosts that echo it on screen.
    /// Cleared when sprites are cleared or the document is replaced.
    pub fn last_added(&self) -> Option<&SpriteRect> {
        self.last_added.as_ref()
    }

    pub fn is_panning(&self) -> bool {
        self.pan.is_some()
    }

    fn image_bounds(&self) -> Option<Size> {
        self.metadata().map(ImageMetadata::size)
    }

    /// Mapping for the current view. Until the host reports a viewport the
    /// transform is treated as unavailable.
    pub fn mapper(&self) -> CoordinateMapper {
        CoordinateMapper::new(self.viewport.map(|_| self.view), self.image_bounds())
    }

    /// Records the size of the host's image view, or `None` while it has no
    /// layout.
    pub fn set_viewport(&mut self, viewport: Option<Size>) {
        if self.viewport != viewport {
            self.viewport = viewport;
            self.notify(&[Change::View]);
        }
    }

    /// Clamped image position under the pointer, for a position readout.
    pub fn pointer_position(&self, view_point: Point) -> Option<Point> {
        self.image.as_ref()?;
        Some(self.mapper().map_pointer(view_point))
    }

    /// Index of the topmost sprite under a view point.
    pub fn sprite_at(&self, view_point: Point) -> Option<usize> {
        let point = self.mapper().to_image_space(view_point);
        self.atlas.sprite_at(point)
    }

    // ---- documents ----

    fn reset_document_state(&mut self) {
        self.selection.clear();
        self.pan = None;
        self.last_added = None;
        self.view.reset();
    }

    /// Loads an image and starts a fresh atlas for it. On failure nothing
    /// changes.
    pub fn load_image(&mut self, path: &Path) -> EditorResult<()> {
        let loaded = image_info::load_image(path)?;
        self.atlas = Atlas::for_image(path, loaded.metadata());
        self.image = Some(loaded);
        self.reset_document_state();
        self.notify(&[Change::Image, Change::Atlas, Change::Selection, Change::View]);
        Ok(())
    }

    /// Loads an image for the current atlas without discarding its sprites,
    /// e.g. after the atlas' own image reference turned out to be missing.
    /// Fails, changing nothing, if the sprites do not fit the new image.
    pub fn attach_image(&mut self, path: &Path) -> EditorResult<()> {
        let loaded = image_info::load_image(path)?;
        let mut atlas = self.atlas.clone();
        atlas.describe_image(path, loaded.metadata());
        atlas.validate()?;
        self.atlas = atlas;
        self.image = Some(loaded);
        self.selection.clear();
        self.pan = None;
        self.view.reset();
        self.notify(&[Change::Image, Change::Atlas, Change::Selection, Change::View]);
        Ok(())
    }

    /// Replaces the atlas with one read from a JSON file and tries to load
    /// the image it references. A missing or unreadable image is returned as
    /// a warning; the atlas is kept either way. An image whose size differs
    /// from the recorded one is adopted when every sprite fits it, otherwise
    /// it is left unloaded. On error nothing changes.
    pub fn load_atlas(&mut self, path: &Path) -> EditorResult<Option<Warning>> {
        let mut atlas = export::json::read_file(path)?;
        let referenced = Path::new(&atlas.image_path).to_path_buf();

        let (image, warning) = if referenced.is_file() {
            match image_info::load_image(&referenced) {
                Ok(loaded) => reconcile_image_size(&mut atlas, loaded),
                Err(e) => (
                    None,
                    Some(Warning::UnreadableReferencedImage {
                        path: referenced,
                        message: e.to_string(),
                    }),
                ),
            }
        } else {
            (None, Some(Warning::MissingReferencedImage { path: referenced }))
        };

        if let Some(warning) = &warning {
            log::warn!("{warning}");
        }
        log::info!("loaded atlas {} with {} sprites", path.display(), atlas.len());

        self.atlas = atlas;
        self.image = image;
        self.reset_document_state();
        self.notify(&[Change::Image, Change::Atlas, Change::Selection, Change::View]);
        Ok(warning)
    }

    /// Export options derived from the document and the config.
    pub fn export_options(&self) -> ExportOptions {
        let image_name = self
            .image
            .as_ref()
            .map(LoadedImage::file_name)
            .filter(|name| !name.is_empty())
            .or_else(|| self.atlas.image_file_name())
            .unwrap_or_else(|| self.config.default_image_name.clone());
        ExportOptions::default()
            .with_image_name(image_name)
            .with_class_name(self.config.script_class_name.clone())
    }

    /// Writes the atlas in the format implied by the file extension. Refuses
    /// an atlas without sprites before any exporter runs.
    pub fn save_atlas(&self, path: &Path) -> EditorResult<ExportFormat> {
        if self.atlas.is_empty() {
            log::warn!("refusing to save an atlas without sprites");
            return Err(EditorError::EmptyAtlas);
        }
        let format = ExportFormat::from_path(path);
        export::write_atlas(path, format, &self.atlas, &self.export_options())?;
        Ok(format)
    }

    pub fn crop_sprite(&self, index: usize) -> EditorResult<DynamicImage> {
        let sprite = self.atlas.sprite(index).ok_or(EditorError::NoSuchSprite(index))?;
        let image = self.image.as_ref().ok_or(EditorError::NoImage)?;
        crop::crop_sprite(image.bitmap(), sprite)
    }

    pub fn export_sprite(&self, index: usize, path: &Path) -> EditorResult<()> {
        let sprite = self.atlas.sprite(index).ok_or(EditorError::NoSuchSprite(index))?;
        let image = self.image.as_ref().ok_or(EditorError::NoImage)?;
        crop::export_sprite(image.bitmap(), sprite, path)
    }

    // ---- selection ----

    /// Starts a selection if the pointer is over the image.
    pub fn pointer_down(&mut self, view_point: Point) -> bool {
        let Some(bounds) = self.image_bounds() else {
            return false;
        };
        if self.pan.is_some() {
            return false;
        }
        let point = self.mapper().to_image_space(view_point);
        let started = self.selection.pointer_down(point, bounds);
        if started {
            self.notify(&[Change::Selection]);
        }
        started
    }

    pub fn pointer_move(&mut self, view_point: Point) -> bool {
        let Some(bounds) = self.image_bounds() else {
            return false;
        };
        let point = self.mapper().to_image_space(view_point);
        let moved = self.selection.pointer_move(point, bounds);
        if moved {
            self.notify(&[Change::Selection]);
        }
        moved
    }

    pub fn pointer_up(&mut self, view_point: Point) -> DragOutcome {
        let Some(bounds) = self.image_bounds() else {
            return DragOutcome::Ignored;
        };
        let point = self.mapper().to_image_space(view_point);
        let outcome = self.selection.pointer_up(point, bounds, self.atlas.len());
        if outcome != DragOutcome::Ignored {
            self.notify(&[Change::Selection]);
        }
        outcome
    }

    pub fn set_draft_name(&mut self, name: impl Into<String>) {
        self.selection.set_draft_name(name);
    }

    pub fn set_draft_tag(&mut self, tag: impl Into<String>) {
        self.selection.set_draft_tag(tag);
    }

    /// Turns the pending selection into a sprite at the end of the atlas.
    /// Returns `Ok(false)` when there is nothing to commit or the name is
    /// blank.
    pub fn commit(&mut self, name: &str, tag: &str) -> EditorResult<bool> {
        let Some(bounds) = self.image_bounds() else {
            return Ok(false);
        };
        let Some(sprite) = self.selection.candidate(name, tag, bounds) else {
            return Ok(false);
        };
        self.atlas.add_sprite(sprite.clone())?;
        log::info!("added sprite '{}'", sprite.name);
        self.last_added = Some(sprite);
        self.selection.clear();
        self.notify(&[Change::Atlas, Change::Selection]);
        Ok(true)
    }

    /// Commits using the name and tag held in the selection draft.
    pub fn commit_draft(&mut self) -> EditorResult<bool> {
        let draft = self.selection.draft().clone();
        self.commit(&draft.name, &draft.tag)
    }

    /// Loads a sprite into the selection for editing and takes it out of the
    /// atlas right away. Committing puts it back (at the end, possibly
    /// renamed); cancelling loses it.
    pub fn edit_sprite(&mut self, index: usize) -> bool {
        let Some(sprite) = self.atlas.remove_sprite(index) else {
            return false;
        };
        log::debug!("editing sprite '{}', detached from atlas", sprite.name);
        self.selection.begin_edit(&sprite);
        self.notify(&[Change::Atlas, Change::Selection]);
        true
    }

    pub fn cancel_selection(&mut self) -> bool {
        let cancelled = self.selection.cancel();
        if cancelled {
            self.notify(&[Change::Selection]);
        }
        cancelled
    }

    /// Applies typed text to a numeric selection field. Text that is not an
    /// integer is rejected and the field keeps its value.
    pub fn set_selection_field(&mut self, field: SelectionField, text: &str) -> bool {
        let (Some(value), Some(bounds)) = (parse_field(text), self.image_bounds()) else {
            return false;
        };
        let changed = self.selection.set_field(field, value, bounds, self.atlas.len());
        if changed {
            self.notify(&[Change::Selection]);
        }
        changed
    }

    pub fn remove_sprite(&mut self, index: usize) -> Option<SpriteRect> {
        let removed = self.atlas.remove_sprite(index)?;
        log::info!("removed sprite '{}'", removed.name);
        self.notify(&[Change::Atlas]);
        Some(removed)
    }

    pub fn clear_sprites(&mut self) {
        self.atlas.clear();
        self.last_added = None;
        self.notify(&[Change::Atlas]);
    }

    // ---- view ----

    fn view_changed(&mut self, changed: bool) -> bool {
        if changed {
            self.notify(&[Change::View]);
        }
        changed
    }

    fn viewport_center(&self) -> Point {
        self.viewport
            .map(|v| Point::new(v.width / 2.0, v.height / 2.0))
            .unwrap_or(Point::ZERO)
    }

    pub fn zoom_at(&mut self, factor: f64, anchor: Point) -> bool {
        let changed = self.view.zoom_at(factor, anchor);
        self.view_changed(changed)
    }

    pub fn zoom_in(&mut self) -> bool {
        self.zoom_at(view::ZOOM_IN_STEP, self.viewport_center())
    }

    pub fn zoom_out(&mut self) -> bool {
        self.zoom_at(view::ZOOM_OUT_STEP, self.viewport_center())
    }

    pub fn zoom_to_fit(&mut self) -> bool {
        let (Some(viewport), Some(image)) = (self.viewport, self.image_bounds()) else {
            return false;
        };
        let changed = self.view.zoom_to_fit(viewport, image);
        self.view_changed(changed)
    }

    pub fn reset_view(&mut self) {
        self.view.reset();
        self.notify(&[Change::View]);
    }

    /// 100% zoom at the origin.
    pub fn actual_size(&mut self) {
        self.reset_view();
    }

    pub fn begin_pan(&mut self, view_point: Point) -> bool {
        if self.image.is_none() {
            return false;
        }
        self.pan = Some(self.view.begin_pan(view_point));
        true
    }

    pub fn drag_pan(&mut self, view_point: Point) -> bool {
        let Some(drag) = self.pan else {
            return false;
        };
        self.view.drag_pan(&drag, view_point);
        self.notify(&[Change::View]);
        true
    }

    pub fn end_pan(&mut self) -> bool {
        self.pan.take().is_some()
    }

    // ---- grid ----

    pub fn set_grid(&mut self, grid: GridSettings) {
        self.grid = grid;
        self.config.grid = grid;
        self.notify(&[Change::Grid]);
    }

    pub fn toggle_grid(&mut self) {
        let mut grid = self.grid;
        grid.visible = !grid.visible;
        self.set_grid(grid);
    }
}

// src/selection.rs
// Rectangle selection state: drag to draw, then name and commit, or load an
// existing sprite back in for editing.

use crate::atlas::SpriteRect;
use crate::geometry::{Point, Rect, Size, clamp};

/// Drags no larger than this (in image pixels, on either axis) are discarded.
pub const DEFAULT_MIN_SELECTION_SIZE: f64 = 5.0;

/// The uncommitted rectangle, in image pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PendingSelection {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub visible: bool,
}

impl PendingSelection {
    fn shown(rect: Rect) -> Self {
        PendingSelection {
            x: rect.x,
            y: rect.y,
            width: rect.width,
            height: rect.height,
            visible: true,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }
}

/// Name, tag and description typed for the pending selection.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SpriteDraft {
    pub name: String,
    pub tag: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Dragging,
    /// A selection waits for a name before it becomes a sprite.
    Pending,
}

/// What a pointer release did to the drag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragOutcome {
    /// No drag was in progress.
    Ignored,
    /// The drag was too small and has been dropped.
    Discarded,
    /// The drag is now a commit candidate.
    Pending,
}

/// One of the four numeric selection fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionField {
    X,
    Y,
    Width,
    Height,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Selection {
    phase: Phase,
    start: Option<Point>,
    pending: PendingSelection,
    draft: SpriteDraft,
    min_size: f64,
}

impl Default for Selection {
    fn default() -> Self {
        Selection::new()
    }
}

/// Name offered for a new sprite when `count` sprites already exist.
pub fn default_sprite_name(count: usize) -> String {
    format!("Sprite_{}", count + 1)
}

impl Selection {
    pub fn new() -> Self {
        Selection::with_min_size(DEFAULT_MIN_SELECTION_SIZE)
    }

    pub fn with_min_size(min_size: f64) -> Self {
        Selection {
            phase: Phase::Idle,
            start: None,
            pending: PendingSelection::default(),
            draft: SpriteDraft::default(),
            min_size,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn pending(&self) -> &PendingSelection {
        &self.pending
    }

    pub fn draft(&self) -> &SpriteDraft {
        &self.draft
    }

    pub fn is_visible(&self) -> bool {
        self.phase != Phase::Idle && self.pending.visible
    }

    pub fn set_draft_name(&mut self, name: impl Into<String>) {
        self.draft.name = name.into();
    }

    pub fn set_draft_tag(&mut self, tag: impl Into<String>) {
        self.draft.tag = tag.into();
    }

    /// Drops everything and returns to idle.
    pub fn clear(&mut self) {
        self.phase = Phase::Idle;
        self.start = None;
        self.pending = PendingSelection::default();
        self.draft = SpriteDraft::default();
    }

    /// Starts a drag at an image point. Points outside the image are
    /// ignored; otherwise any previous selection is dropped.
    pub fn pointer_down(&mut self, point: Point, bounds: Size) -> bool {
        if !bounds.contains(point) {
            return false;
        }
        let start = clamp(point, bounds.width, bounds.height);
        self.clear();
        self.phase = Phase::Dragging;
        self.start = Some(start);
        self.pending.x = start.x;
        self.pending.y = start.y;
        true
    }

    /// Stretches the drag rectangle to the (clamped) pointer.
    pub fn pointer_move(&mut self, point: Point, bounds: Size) -> bool {
        let (Phase::Dragging, Some(start)) = (self.phase, self.start) else {
            return false;
        };
        let start = clamp(start, bounds.width, bounds.height);
        let current = clamp(point, bounds.width, bounds.height);
        self.pending = PendingSelection::shown(Rect::from_points(start, current));
        true
    }

    /// Ends the drag. Large enough rectangles become pending with a default
    /// name derived from `sprite_count`; the rest are discarded.
    pub fn pointer_up(&mut self, point: Point, bounds: Size, sprite_count: usize) -> DragOutcome {
        if !self.pointer_move(point, bounds) {
            return DragOutcome::Ignored;
        }
        self.start = None;
        if self.pending.width > self.min_size && self.pending.height > self.min_size {
            self.phase = Phase::Pending;
            self.draft = SpriteDraft {
                name: default_sprite_name(sprite_count),
                ..SpriteDraft::default()
            };
            log::debug!("selection pending: {:?}", self.pending.rect());
            DragOutcome::Pending
        } else {
            log::debug!("selection discarded: {:?}", self.pending.rect());
            self.clear();
            DragOutcome::Discarded
        }
    }

    /// The sprite a commit would produce, without changing any state.
    /// `None` when nothing is pending or the trimmed name is empty. An empty
    /// tag is treated as no tag. Width and height are clipped to what is left
    /// of `bounds` right of and below the origin, since numeric edits of `x`
    /// and `y` do not shrink the rectangle.
    pub fn candidate(&self, name: &str, tag: &str, bounds: Size) -> Option<SpriteRect> {
        if self.phase != Phase::Pending || !self.pending.visible {
            return None;
        }
        let name = name.trim();
        if name.is_empty() {
            return None;
        }
        let x = self.pending.x as u32;
        let y = self.pending.y as u32;
        let width = (self.pending.width as u32).min((bounds.width as u32).saturating_sub(x));
        let height = (self.pending.height as u32).min((bounds.height as u32).saturating_sub(y));
        if width == 0 || height == 0 {
            return None;
        }
        let tag = tag.trim();
        Some(SpriteRect {
            name: name.to_string(),
            x,
            y,
            width,
            height,
            description: self.draft.description.clone(),
            tag: (!tag.is_empty()).then(|| tag.to_string()),
        })
    }

    /// Loads a sprite back into the selection so it can be moved, resized or
    /// renamed. The caller is responsible for detaching it from the atlas.
    pub fn begin_edit(&mut self, sprite: &SpriteRect) {
        self.clear();
        self.phase = Phase::Pending;
        self.pending = PendingSelection::shown(Rect::new(
            f64::from(sprite.x),
            f64::from(sprite.y),
            f64::from(sprite.width),
            f64::from(sprite.height),
        ));
        self.draft = SpriteDraft {
            name: sprite.name.clone(),
            tag: sprite.tag.clone().unwrap_or_default(),
            description: sprite.description.clone(),
        };
    }

    /// Abandons whatever is in progress. Returns whether there was anything.
    pub fn cancel(&mut self) -> bool {
        let active = self.phase != Phase::Idle;
        self.clear();
        active
    }

    /// Applies a typed value to one field. Each field is clamped on its own
    /// against the image and the other fields: `x` to `[0, w-1]`, `width` to
    /// `[1, w-x]`, and likewise vertically.
    pub fn set_field(
        &mut self,
        field: SelectionField,
        value: i64,
        bounds: Size,
        sprite_count: usize,
    ) -> bool {
        if !self.is_visible() {
            return false;
        }
        let image_w = bounds.width as i64;
        let image_h = bounds.height as i64;
        let x = self.pending.x as i64;
        let y = self.pending.y as i64;
        match field {
            SelectionField::X => self.pending.x = value.min(image_w - 1).max(0) as f64,
            SelectionField::Y => self.pending.y = value.min(image_h - 1).max(0) as f64,
            SelectionField::Width => self.pending.width = value.min(image_w - x).max(1) as f64,
            SelectionField::Height => self.pending.height = value.min(image_h - y).max(1) as f64,
        }

        self.start = None;
        self.phase = Phase::Pending;
        if self.draft.name.trim().is_empty() {
            self.draft.name = default_sprite_name(sprite_count);
        }
        true
    }

    /// Current integer value of a field, as shown in a numeric entry box.
    pub fn field(&self, field: SelectionField) -> Option<i64> {
        if !self.is_visible() {
            return None;
        }
        let value = match field {
            SelectionField::X => self.pending.x,
            SelectionField::Y => self.pending.y,
            SelectionField::Width => self.pending.width,
            SelectionField::Height => self.pending.height,
        };
        Some(value as i64)
    }
}

/// Parses a numeric field entry. Rejects anything that is not an integer.
pub fn parse_field(text: &str) -> Option<i64> {
    text.trim().parse().ok()
}

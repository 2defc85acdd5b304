//! Zoom and pan state of the image view.

use crate::geometry::{Point, Size};

pub const MIN_ZOOM: f64 = 0.1;
pub const MAX_ZOOM: f64 = 10.0;

/// Zoom changes smaller than this are ignored.
const ZOOM_EPSILON: f64 = 0.001;
/// Fraction of the viewport used by zoom-to-fit.
const FIT_MARGIN: f64 = 0.9;

pub const ZOOM_IN_STEP: f64 = 1.25;
pub const ZOOM_OUT_STEP: f64 = 0.8;
pub const WHEEL_ZOOM_IN: f64 = 1.1;
pub const WHEEL_ZOOM_OUT: f64 = 0.9;

/// Zoom factor and pan offset. `pan` is the scroll offset of the view, so a
/// view point `v` shows the image point `(v + pan) / zoom`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewTransform {
    zoom: f64,
    pan_x: f64,
    pan_y: f64,
}

impl Default for ViewTransform {
    fn default() -> Self {
        ViewTransform { zoom: 1.0, pan_x: 0.0, pan_y: 0.0 }
    }
}

/// An in-progress right-button pan.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PanDrag {
    origin: Point,
    start_pan: Point,
}

fn clamp_zoom(zoom: f64) -> f64 {
    zoom.clamp(MIN_ZOOM, MAX_ZOOM)
}

impl ViewTransform {
    pub fn new(zoom: f64, pan_x: f64, pan_y: f64) -> Self {
        ViewTransform { zoom: clamp_zoom(zoom), pan_x, pan_y }
    }

    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    pub fn pan_x(&self) -> f64 {
        self.pan_x
    }

    pub fn pan_y(&self) -> f64 {
        self.pan_y
    }

    pub fn pan(&self) -> Point {
        Point::new(self.pan_x, self.pan_y)
    }

    pub fn is_invertible(&self) -> bool {
        self.zoom.is_finite() && self.zoom > 0.0 && self.pan_x.is_finite() && self.pan_y.is_finite()
    }

    /// Multiplies the zoom by `factor`, keeping the image point under
    /// `anchor` where it is on screen. Returns whether anything changed.
    pub fn zoom_at(&mut self, factor: f64, anchor: Point) -> bool {
        if !factor.is_finite() || factor <= 0.0 {
            return false;
        }
        let new_zoom = clamp_zoom(self.zoom * factor);
        if (new_zoom - self.zoom).abs() < ZOOM_EPSILON {
            return false;
        }

        let ratio = new_zoom / self.zoom;
        self.pan_x = ratio * (self.pan_x + anchor.x) - anchor.x;
        self.pan_y = ratio * (self.pan_y + anchor.y) - anchor.y;
        self.zoom = new_zoom;
        log::debug!("zoom {:.3} pan ({:.1}, {:.1})", self.zoom, self.pan_x, self.pan_y);
        true
    }

    /// Fits the image into the viewport with a small margin and scrolls back
    /// to the origin. Degenerate sizes leave the view untouched.
    pub fn zoom_to_fit(&mut self, viewport: Size, image: Size) -> bool {
        if viewport.is_empty() || image.is_empty() {
            return false;
        }
        let scale = (viewport.width / image.width).min(viewport.height / image.height);
        self.zoom = clamp_zoom(scale * FIT_MARGIN);
        self.pan_x = 0.0;
        self.pan_y = 0.0;
        true
    }

    pub fn reset(&mut self) {
        *self = ViewTransform::default();
    }

    pub fn begin_pan(&self, at: Point) -> PanDrag {
        PanDrag { origin: at, start_pan: self.pan() }
    }

    /// Moves the view with the pointer: dragging right scrolls the image right.
    pub fn drag_pan(&mut self, drag: &PanDrag, at: Point) {
        self.pan_x = drag.start_pan.x - (at.x - drag.origin.x);
        self.pan_y = drag.start_pan.y - (at.y - drag.origin.y);
    }

    pub fn zoom_label(&self) -> String {
        format!("{:.0}%", self.zoom * 100.0)
    }
}

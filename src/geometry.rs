//! Points, rectangles and the mapping between view space and image space.
//!
//! View space is the host's widget coordinate system (pointer positions).
//! Image space is pixel coordinates of the loaded image. The two are related
//! by a [`ViewTransform`]: `view = image * zoom - pan`.

use crate::view::ViewTransform;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const ZERO: Point = Point { x: 0.0, y: 0.0 };

    pub const fn new(x: f64, y: f64) -> Self {
        Point { x, y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub const fn new(width: f64, height: f64) -> Self {
        Size { width, height }
    }

    /// True unless both sides are strictly positive.
    pub fn is_empty(&self) -> bool {
        !(self.width > 0.0 && self.height > 0.0)
    }

    /// Inclusive containment: the far edges belong to the area.
    pub fn contains(&self, point: Point) -> bool {
        point.x >= 0.0 && point.y >= 0.0 && point.x <= self.width && point.y <= self.height
    }
}

/// Axis-aligned rectangle with a top-left origin.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Rect { x, y, width, height }
    }

    /// Bounding box of two corner points, whatever their order.
    pub fn from_points(a: Point, b: Point) -> Self {
        Rect {
            x: a.x.min(b.x),
            y: a.y.min(b.y),
            width: (b.x - a.x).abs(),
            height: (b.y - a.y).abs(),
        }
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }
}

fn clamp_axis(value: f64, max: f64) -> f64 {
    let max = max.max(0.0);
    if value.is_nan() { 0.0 } else { value.clamp(0.0, max) }
}

/// Clamps a point into `[0, width] x [0, height]`.
pub fn clamp(point: Point, width: f64, height: f64) -> Point {
    Point::new(clamp_axis(point.x, width), clamp_axis(point.y, height))
}

/// Converts pointer positions into image pixels and back.
///
/// Either input may be missing: before the host has laid out its view there
/// is no transform, and before an image is loaded there are no bounds. In
/// both cases the mapper degrades to passing points through unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CoordinateMapper {
    transform: Option<ViewTransform>,
    image: Option<Size>,
}

impl CoordinateMapper {
    pub fn new(transform: Option<ViewTransform>, image: Option<Size>) -> Self {
        CoordinateMapper { transform, image }
    }

    fn usable_transform(&self) -> Option<&ViewTransform> {
        self.transform.as_ref().filter(|t| t.is_invertible())
    }

    /// Maps a view point into image space without clamping.
    pub fn to_image_space(&self, view_point: Point) -> Point {
        match self.usable_transform() {
            Some(t) => Point::new(
                (view_point.x + t.pan_x()) / t.zoom(),
                (view_point.y + t.pan_y()) / t.zoom(),
            ),
            None => view_point,
        }
    }

    pub fn to_view_space(&self, image_point: Point) -> Point {
        match self.usable_transform() {
            Some(t) => Point::new(
                image_point.x * t.zoom() - t.pan_x(),
                image_point.y * t.zoom() - t.pan_y(),
            ),
            None => image_point,
        }
    }

    pub fn clamp(&self, image_point: Point) -> Point {
        match self.image {
            Some(size) => clamp(image_point, size.width, size.height),
            None => image_point,
        }
    }

    /// Maps a pointer position to a clamped image position.
    pub fn map_pointer(&self, view_point: Point) -> Point {
        self.clamp(self.to_image_space(view_point))
    }

    pub fn image_size(&self) -> Option<Size> {
        self.image
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounding_box_ignores_corner_order() {
        let a = Point::new(50.0, 10.0);
        let b = Point::new(10.0, 30.0);
        assert_eq!(Rect::from_points(a, b), Rect::from_points(b, a));
        assert_eq!(Rect::from_points(a, b), Rect::new(10.0, 10.0, 40.0, 20.0));
    }

    #[test]
    fn clamp_stays_in_bounds_and_is_idempotent() {
        let samples = [
            Point::new(-5.0, 3.0),
            Point::new(200.0, -1.0),
            Point::new(64.0, 64.0),
            Point::new(128.0, 70.0),
            Point::new(f64::NAN, f64::INFINITY),
        ];
        for p in samples {
            let once = clamp(p, 128.0, 64.0);
            assert!((0.0..=128.0).contains(&once.x), "{once:?}");
            assert!((0.0..=64.0).contains(&once.y), "{once:?}");
            assert_eq!(clamp(once, 128.0, 64.0), once);
        }
    }

    #[test]
    fn clamp_tolerates_degenerate_bounds() {
        assert_eq!(clamp(Point::new(4.0, 4.0), -1.0, f64::NAN), Point::ZERO);
    }

    #[test]
    fn mapper_inverts_zoom_and_pan() {
        let transform = ViewTransform::new(2.0, 10.0, -6.0);
        let mapper = CoordinateMapper::new(Some(transform), Some(Size::new(100.0, 100.0)));
        let image = mapper.to_image_space(Point::new(30.0, 20.0));
        assert_eq!(image, Point::new(20.0, 7.0));
        assert_eq!(mapper.to_view_space(image), Point::new(30.0, 20.0));
    }

    #[test]
    fn mapper_falls_back_without_layout() {
        let mapper = CoordinateMapper::new(None, None);
        let p = Point::new(-3.0, 900.0);
        assert_eq!(mapper.to_image_space(p), p);
        assert_eq!(mapper.map_pointer(p), p);
    }

    #[test]
    fn mapper_clamps_pointer_to_image() {
        let mapper =
            CoordinateMapper::new(Some(ViewTransform::default()), Some(Size::new(16.0, 8.0)));
        assert_eq!(mapper.map_pointer(Point::new(-2.0, 20.0)), Point::new(0.0, 8.0));
    }

    #[test]
    fn size_containment_is_inclusive() {
        let size = Size::new(10.0, 5.0);
        assert!(size.contains(Point::new(10.0, 5.0)));
        assert!(!size.contains(Point::new(10.1, 0.0)));
        assert!(Size::new(0.0, 5.0).is_empty());
    }
}

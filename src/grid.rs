//! Optional alignment grid drawn over the image.

use serde::{Deserialize, Serialize};

use crate::geometry::Size;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl GridColor {
    pub const GRAY: GridColor = GridColor { r: 128, g: 128, b: 128 };
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GridSettings {
    pub visible: bool,
    pub cell_width: u32,
    pub cell_height: u32,
    pub color: GridColor,
    pub opacity: f64,
}

impl Default for GridSettings {
    fn default() -> Self {
        GridSettings {
            visible: false,
            cell_width: 32,
            cell_height: 32,
            color: GridColor::GRAY,
            opacity: 0.5,
        }
    }
}

/// Line offsets in image pixels, starting at the image origin.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct GridLines {
    /// x offsets of vertical lines.
    pub vertical: Vec<f64>,
    /// y offsets of horizontal lines.
    pub horizontal: Vec<f64>,
}

fn offsets(step: u32, extent: f64) -> Vec<f64> {
    if step == 0 || !(extent >= 0.0) {
        return Vec::new();
    }
    let step = f64::from(step);
    let count = (extent / step).floor() as usize;
    (0..=count).map(|i| i as f64 * step).collect()
}

impl GridSettings {
    /// Lines to draw over an image of `image` size; none when the grid is
    /// hidden.
    pub fn lines(&self, image: Size) -> GridLines {
        if !self.visible {
            return GridLines::default();
        }
        GridLines {
            vertical: offsets(self.cell_width, image.width),
            horizontal: offsets(self.cell_height, image.height),
        }
    }

    /// Line width in image pixels that stays visible when zoomed out.
    pub fn line_thickness(zoom: f64) -> f64 {
        (1.0 / zoom).max(0.5)
    }

    pub fn clamped_opacity(&self) -> f64 {
        self.opacity.clamp(0.0, 1.0)
    }
}

use serde::{Deserialize, Serialize};

use crate::error::{Result, SnapstripError};
use crate::fit::Fitted;

/// Axis-aligned rectangle (pixels). `x,y` is top-left; `w,h` are sizes.
///
/// Coordinates are `f32` so layouts authored in fractional pixels (sub-pixel
/// gutters between slots) survive round-tripping; rasterization rounds once,
/// at draw time.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    /// Horizontal center of the rectangle.
    pub fn center_x(&self) -> f32 {
        self.x + self.w / 2.0
    }

    /// Vertical center of the rectangle.
    pub fn center_y(&self) -> f32 {
        self.y + self.h / 2.0
    }

    /// Returns true if either dimension is zero or negative.
    pub fn is_degenerate(&self) -> bool {
        self.w <= 0.0 || self.h <= 0.0
    }
}

/// Ordered set of photo slots on the canvas. Slot index is the identity a
/// photo is assigned against; indices are stable for the life of the layout.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct SlotLayout {
    slots: Vec<Rect>,
}

impl SlotLayout {
    pub fn new(slots: Vec<Rect>) -> Self {
        Self { slots }
    }

    /// Classic three-across booth strip: three portrait 450x600 slots in the
    /// lower band of a 1500x1050 canvas.
    pub fn three_across() -> Self {
        Self::new(vec![
            Rect::new(54.9, 345.0, 450.0, 600.0),
            Rect::new(525.1, 345.0, 450.0, 600.0),
            Rect::new(995.1, 345.0, 450.0, 600.0),
        ])
    }

    /// Slot rectangle at `index`, or `SlotIndex` if out of range.
    pub fn slot(&self, index: usize) -> Result<Rect> {
        self.slots
            .get(index)
            .copied()
            .ok_or(SnapstripError::SlotIndex {
                index,
                count: self.slots.len(),
            })
    }

    pub fn slot_count(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Rect> {
        self.slots.iter()
    }
}

/// One composited photo in a finished (or planned) strip.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Placement {
    /// Slot index the photo was assigned to.
    pub slot: usize,
    /// The slot rectangle the photo was fitted against.
    pub rect: Rect,
    /// Where the scaled photo actually landed on the canvas.
    pub fitted: Fitted,
    /// Source pixel dimensions before scaling.
    pub source_size: (u32, u32),
}

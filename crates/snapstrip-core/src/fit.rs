use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::model::Rect;

/// How a photo is scaled into its slot.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum FitPolicy {
    /// Uniform scale so the whole photo is visible inside the slot
    /// (letterboxes on the short axis).
    #[default]
    Contain,
    /// Uniform scale so the photo covers the whole slot (overflows on the
    /// long axis).
    Cover,
}

impl FromStr for FitPolicy {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "contain" => Ok(FitPolicy::Contain),
            "cover" => Ok(FitPolicy::Cover),
            other => Err(format!("unknown fit policy: {other}")),
        }
    }
}

impl FitPolicy {
    /// Uniform scale factor for a `src_w x src_h` photo against `slot`.
    pub fn scale(&self, slot: &Rect, src_w: u32, src_h: u32) -> f32 {
        let sx = slot.w / src_w as f32;
        let sy = slot.h / src_h as f32;
        match self {
            FitPolicy::Contain => sx.min(sy),
            FitPolicy::Cover => sx.max(sy),
        }
    }
}

/// A scaled photo positioned on the canvas, centered on its slot.
/// `w,h` preserve the source aspect ratio exactly; `x,y` may fall outside
/// the slot under `Cover`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Fitted {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

/// Fit a `src_w x src_h` photo into `slot` under `policy`.
///
/// Returns `None` when the slot or the source is degenerate (zero area);
/// callers skip such placements rather than erroring.
pub fn fit(slot: &Rect, src_w: u32, src_h: u32, policy: FitPolicy) -> Option<Fitted> {
    if slot.is_degenerate() || src_w == 0 || src_h == 0 {
        return None;
    }
    let scale = policy.scale(slot, src_w, src_h);
    let w = src_w as f32 * scale;
    let h = src_h as f32 * scale;
    Some(Fitted {
        x: slot.center_x() - w / 2.0,
        y: slot.center_y() - h / 2.0,
        w,
        h,
    })
}

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::{Result, SnapstripError};
use crate::fit::FitPolicy;
use crate::model::SlotLayout;

/// Resampling filter used when scaling photos into their slots.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ResizeFilter {
    /// Nearest neighbor (fast, blocky).
    Nearest,
    /// Bilinear. The booth default; soft but quick enough for live preview.
    #[default]
    Triangle,
    /// Cubic (Catmull-Rom).
    CatmullRom,
    /// Lanczos with window 3 (slowest, sharpest).
    Lanczos3,
}

impl FromStr for ResizeFilter {
    type Err = String;
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "nearest" => Ok(Self::Nearest),
            "triangle" | "bilinear" => Ok(Self::Triangle),
            "catmullrom" | "cubic" => Ok(Self::CatmullRom),
            "lanczos3" | "lanczos" => Ok(Self::Lanczos3),
            other => Err(format!("unknown resize filter: {other}")),
        }
    }
}

impl From<ResizeFilter> for image::imageops::FilterType {
    fn from(f: ResizeFilter) -> Self {
        match f {
            ResizeFilter::Nearest => image::imageops::FilterType::Nearest,
            ResizeFilter::Triangle => image::imageops::FilterType::Triangle,
            ResizeFilter::CatmullRom => image::imageops::FilterType::CatmullRom,
            ResizeFilter::Lanczos3 => image::imageops::FilterType::Lanczos3,
        }
    }
}

/// Strip compositing configuration.
/// Key notes:
///   - `canvas_width`/`canvas_height` set the output surface in pixels
///   - `slots` positions the photos; indices are assignment identities
///   - `fit` selects contain (letterbox) vs cover (crop-by-overflow)
///   - `clip_overflow` confines cover overflow to the slot rectangle
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct StripConfig {
    /// Output canvas width in pixels.
    pub canvas_width: u32,
    /// Output canvas height in pixels.
    pub canvas_height: u32,
    /// Photo slot rectangles, in slot-index order.
    pub slots: SlotLayout,
    /// Scaling policy for photos against their slots.
    pub fit: FitPolicy,
    /// When true, pixels a cover-fitted photo would paint outside its slot
    /// are discarded.
    pub clip_overflow: bool,
    /// Resampling filter for photo scaling.
    pub filter: ResizeFilter,
}

impl Default for StripConfig {
    fn default() -> Self {
        Self {
            canvas_width: 1500,
            canvas_height: 1050,
            slots: SlotLayout::three_across(),
            fit: FitPolicy::Contain,
            clip_overflow: false,
            filter: ResizeFilter::Triangle,
        }
    }
}

impl StripConfig {
    pub fn builder() -> StripConfigBuilder {
        StripConfigBuilder::new()
    }

    /// Validate invariants that render would otherwise hit mid-pipeline.
    pub fn validate(&self) -> Result<()> {
        if self.canvas_width == 0 || self.canvas_height == 0 {
            return Err(SnapstripError::InvalidConfig(format!(
                "canvas must be non-empty, got {}x{}",
                self.canvas_width, self.canvas_height
            )));
        }
        if self.slots.is_empty() {
            return Err(SnapstripError::InvalidConfig(
                "slot layout has no slots".to_string(),
            ));
        }
        Ok(())
    }
}

/// Fluent builder for [`StripConfig`].
#[derive(Debug, Default, Clone)]
pub struct StripConfigBuilder {
    cfg: StripConfig,
    /// Slots accumulated via [`slot`](Self::slot); replaces the default
    /// layout once the first one is added.
    custom_slots: Option<Vec<crate::model::Rect>>,
}

impl StripConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_canvas(mut self, width: u32, height: u32) -> Self {
        self.cfg.canvas_width = width;
        self.cfg.canvas_height = height;
        self
    }

    /// Replace the slot layout wholesale.
    pub fn slots(mut self, layout: SlotLayout) -> Self {
        self.cfg.slots = layout;
        self.custom_slots = None;
        self
    }

    /// Add one slot rectangle. The first call discards the default layout.
    pub fn slot(mut self, rect: crate::model::Rect) -> Self {
        self.custom_slots.get_or_insert_with(Vec::new).push(rect);
        self
    }

    pub fn fit(mut self, policy: FitPolicy) -> Self {
        self.cfg.fit = policy;
        self
    }

    pub fn clip_overflow(mut self, clip: bool) -> Self {
        self.cfg.clip_overflow = clip;
        self
    }

    pub fn filter(mut self, filter: ResizeFilter) -> Self {
        self.cfg.filter = filter;
        self
    }

    pub fn build(mut self) -> Result<StripConfig> {
        if let Some(slots) = self.custom_slots.take() {
            self.cfg.slots = SlotLayout::new(slots);
        }
        self.cfg.validate()?;
        Ok(self.cfg)
    }
}

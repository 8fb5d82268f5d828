use image::RgbaImage;
use tracing::{debug, info, instrument};

use crate::assignment::Assignment;
use crate::compositing::{draw_fitted_rgba, stretch_template};
use crate::config::StripConfig;
use crate::error::Result;
use crate::fit;
use crate::model::Placement;

/// Result of a full composite: the finished surface plus where each photo
/// landed on it.
#[derive(Debug, Clone)]
pub struct RenderOutput {
    pub surface: RgbaImage,
    pub placements: Vec<Placement>,
}

/// Composite a strip: stretch `template` over the whole canvas, then draw
/// every assigned photo into its slot in ascending slot order. Unassigned
/// slots keep showing the template. A fresh surface is allocated per call,
/// so rendering twice from the same inputs yields identical bytes.
#[instrument(skip_all)]
pub fn render(
    template: &RgbaImage,
    assignment: &Assignment,
    cfg: &StripConfig,
) -> Result<RenderOutput> {
    cfg.validate()?;
    let mut surface = stretch_template(template, cfg.canvas_width, cfg.canvas_height, cfg.filter);

    let mut placements = Vec::with_capacity(assignment.assigned_count());
    for (slot, photo) in assignment.occupied() {
        let rect = cfg.slots.slot(slot)?;
        let (src_w, src_h) = photo.dimensions();
        let Some(fitted) = fit::fit(&rect, src_w, src_h, cfg.fit) else {
            debug!(slot, src_w, src_h, "skipping degenerate placement");
            continue;
        };
        let clip = cfg.clip_overflow.then_some(&rect);
        draw_fitted_rgba(&mut surface, photo, &fitted, cfg.filter, clip);
        placements.push(Placement {
            slot,
            rect,
            fitted,
            source_size: (src_w, src_h),
        });
    }

    info!(
        canvas_w = cfg.canvas_width,
        canvas_h = cfg.canvas_height,
        photos = placements.len(),
        "composited strip"
    );
    Ok(RenderOutput {
        surface,
        placements,
    })
}

/// Layout-only twin of [`render`]: computes the placements render would
/// produce for photos of the given sizes (one per slot, in order), without
/// touching any pixels.
pub fn plan(sizes: &[(u32, u32)], cfg: &StripConfig) -> Result<Vec<Placement>> {
    cfg.validate()?;
    let mut placements = Vec::with_capacity(sizes.len());
    for (slot, &(src_w, src_h)) in sizes.iter().enumerate() {
        let rect = cfg.slots.slot(slot)?;
        let Some(fitted) = fit::fit(&rect, src_w, src_h, cfg.fit) else {
            continue;
        };
        placements.push(Placement {
            slot,
            rect,
            fitted,
            source_size: (src_w, src_h),
        });
    }
    Ok(placements)
}

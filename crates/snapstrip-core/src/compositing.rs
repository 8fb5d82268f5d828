use image::{Rgba, RgbaImage, imageops};

use crate::config::ResizeFilter;
use crate::fit::Fitted;
use crate::model::Rect;

/// Scale `template` to exactly `width x height`, stretching each axis
/// independently (aspect ratio is not preserved). Returns a clone when the
/// size already matches.
pub fn stretch_template(
    template: &RgbaImage,
    width: u32,
    height: u32,
    filter: ResizeFilter,
) -> RgbaImage {
    if template.dimensions() == (width, height) {
        return template.clone();
    }
    imageops::resize(template, width, height, filter.into())
}

/// Rasterize a fitted photo onto `canvas`: scale `photo` to the rounded
/// fitted size with `filter`, then source-over blend it at the rounded
/// position. `clip` restricts painting to that rectangle; the canvas bounds
/// always apply.
pub fn draw_fitted_rgba(
    canvas: &mut RgbaImage,
    photo: &RgbaImage,
    fitted: &Fitted,
    filter: ResizeFilter,
    clip: Option<&Rect>,
) {
    let (x0, x1) = round_span(fitted.x, fitted.w);
    let (y0, y1) = round_span(fitted.y, fitted.h);
    if x0 >= x1 || y0 >= y1 {
        return;
    }
    let dw = (x1 - x0) as u32;
    let dh = (y1 - y0) as u32;

    let scaled;
    let src: &RgbaImage = if photo.dimensions() == (dw, dh) {
        photo
    } else {
        scaled = imageops::resize(photo, dw, dh, filter.into());
        &scaled
    };

    let (cw, ch) = canvas.dimensions();
    let mut wx0 = x0.max(0);
    let mut wy0 = y0.max(0);
    let mut wx1 = x1.min(cw as i64);
    let mut wy1 = y1.min(ch as i64);
    if let Some(clip) = clip {
        let (cx0, cx1) = round_span(clip.x, clip.w);
        let (cy0, cy1) = round_span(clip.y, clip.h);
        wx0 = wx0.max(cx0);
        wy0 = wy0.max(cy0);
        wx1 = wx1.min(cx1);
        wy1 = wy1.min(cy1);
    }
    if wx0 >= wx1 || wy0 >= wy1 {
        return;
    }

    for dy in wy0..wy1 {
        for dx in wx0..wx1 {
            let px = *src.get_pixel((dx - x0) as u32, (dy - y0) as u32);
            blend_pixel(canvas.get_pixel_mut(dx as u32, dy as u32), px);
        }
    }
}

/// Integer pixel span covered by a fractional origin/length pair. Both edges
/// round, so adjacent fractional rectangles stay gap-free.
fn round_span(origin: f32, len: f32) -> (i64, i64) {
    let start = origin.round() as i64;
    let end = (origin + len).round() as i64;
    (start, end)
}

/// Source-over blend of straight-alpha `src` onto `dst`.
fn blend_pixel(dst: &mut Rgba<u8>, src: Rgba<u8>) {
    let sa = src[3] as u32;
    if sa == 255 {
        *dst = src;
        return;
    }
    if sa == 0 {
        return;
    }
    let da = dst[3] as u32;
    // out_a scaled by 255^2 so the channel division stays in integers
    let out_a = sa * 255 + da * (255 - sa);
    if out_a == 0 {
        *dst = Rgba([0, 0, 0, 0]);
        return;
    }
    let mut out = [0u8; 4];
    for c in 0..3 {
        let num = src[c] as u32 * sa * 255 + dst[c] as u32 * da * (255 - sa);
        out[c] = ((num + out_a / 2) / out_a) as u8;
    }
    out[3] = ((out_a + 127) / 255) as u8;
    *dst = Rgba(out);
}

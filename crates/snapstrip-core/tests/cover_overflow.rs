use image::{Rgba, RgbaImage};
use snapstrip_core::prelude::*;

fn solid(w: u32, h: u32, rgba: [u8; 4]) -> RgbaImage {
    RgbaImage::from_pixel(w, h, Rgba(rgba))
}

const WHITE: [u8; 4] = [255, 255, 255, 255];
const GREEN: [u8; 4] = [0, 255, 0, 255];

fn cover_cfg(clip: bool) -> StripConfig {
    StripConfig::builder()
        .with_canvas(100, 100)
        .slot(Rect::new(30.0, 30.0, 40.0, 40.0))
        .fit(FitPolicy::Cover)
        .clip_overflow(clip)
        .build()
        .expect("valid config")
}

// An 80x40 photo cover-fitted into the 40x40 slot keeps scale 1.0 and spans
// x 10..90 at y 30..70, sticking 20px out of each side of the slot.

#[test]
fn cover_overflow_spills_outside_slot_by_default() {
    let cfg = cover_cfg(false);
    let template = solid(100, 100, WHITE);
    let mut assignment = Assignment::new(1);
    assignment.set_photo(0, solid(80, 40, GREEN)).expect("in range");
    let out = render(&template, &assignment, &cfg).expect("render");

    assert_eq!(*out.surface.get_pixel(50, 50), Rgba(GREEN), "inside slot");
    assert_eq!(*out.surface.get_pixel(15, 50), Rgba(GREEN), "left spill");
    assert_eq!(*out.surface.get_pixel(85, 50), Rgba(GREEN), "right spill");
    assert_eq!(*out.surface.get_pixel(50, 10), Rgba(WHITE), "above photo");
}

#[test]
fn clip_overflow_confines_photo_to_slot() {
    let cfg = cover_cfg(true);
    let template = solid(100, 100, WHITE);
    let mut assignment = Assignment::new(1);
    assignment.set_photo(0, solid(80, 40, GREEN)).expect("in range");
    let out = render(&template, &assignment, &cfg).expect("render");

    assert_eq!(*out.surface.get_pixel(50, 50), Rgba(GREEN), "inside slot");
    assert_eq!(*out.surface.get_pixel(15, 50), Rgba(WHITE), "left of slot");
    assert_eq!(*out.surface.get_pixel(85, 50), Rgba(WHITE), "right of slot");
    // clip window edges are the slot's own rounded edges
    assert_eq!(*out.surface.get_pixel(30, 50), Rgba(GREEN), "first column inside");
    assert_eq!(*out.surface.get_pixel(29, 50), Rgba(WHITE), "last column outside");
}

#[test]
fn cover_reaching_past_canvas_is_bounds_checked() {
    // Slot hugs the canvas edge; the covering photo would extend to x < 0.
    let cfg = StripConfig::builder()
        .with_canvas(60, 60)
        .slot(Rect::new(0.0, 10.0, 40.0, 40.0))
        .fit(FitPolicy::Cover)
        .build()
        .expect("valid config");
    let template = solid(60, 60, WHITE);
    let mut assignment = Assignment::new(1);
    assignment.set_photo(0, solid(160, 80, GREEN)).expect("in range");
    let out = render(&template, &assignment, &cfg).expect("render");

    // photo spans x -20..60 after centering; everything on-canvas is painted
    assert_eq!(*out.surface.get_pixel(0, 30), Rgba(GREEN));
    assert_eq!(*out.surface.get_pixel(59, 30), Rgba(GREEN));
    assert_eq!(*out.surface.get_pixel(30, 5), Rgba(WHITE), "above photo band");
}

#[test]
fn contain_photo_never_leaves_its_slot() {
    let cfg = StripConfig::builder()
        .with_canvas(100, 100)
        .slot(Rect::new(30.0, 30.0, 40.0, 40.0))
        .build()
        .expect("valid config");
    let template = solid(100, 100, WHITE);
    let mut assignment = Assignment::new(1);
    assignment.set_photo(0, solid(80, 40, GREEN)).expect("in range");
    let out = render(&template, &assignment, &cfg).expect("render");

    for (x, y, px) in out.surface.enumerate_pixels() {
        let inside = (30..70).contains(&x) && (30..70).contains(&y);
        if !inside {
            assert_eq!(*px, Rgba(WHITE), "contain painted outside the slot at ({x},{y})");
        }
    }
    assert_eq!(*out.surface.get_pixel(50, 50), Rgba(GREEN), "letterboxed band");
}

use image::{Rgba, RgbaImage};
use snapstrip_core::compositing::stretch_template;
use snapstrip_core::prelude::*;

fn solid(w: u32, h: u32, rgba: [u8; 4]) -> RgbaImage {
    RgbaImage::from_pixel(w, h, Rgba(rgba))
}

const WHITE: [u8; 4] = [255, 255, 255, 255];
const RED: [u8; 4] = [255, 0, 0, 255];
const BLUE: [u8; 4] = [0, 0, 255, 255];

fn small_cfg() -> StripConfig {
    StripConfig::builder()
        .with_canvas(300, 210)
        .slot(Rect::new(20.0, 30.0, 100.0, 120.0))
        .slot(Rect::new(160.0, 30.0, 100.0, 120.0))
        .build()
        .expect("valid config")
}

#[test]
fn template_is_stretched_over_whole_canvas() {
    let cfg = StripConfig::default();
    let template = solid(10, 10, RED);
    let out = render(&template, &Assignment::new(cfg.slots.slot_count()), &cfg).expect("render");
    assert_eq!(out.surface.dimensions(), (1500, 1050));
    assert_eq!(*out.surface.get_pixel(0, 0), Rgba(RED));
    assert_eq!(*out.surface.get_pixel(1499, 1049), Rgba(RED));
    assert!(out.placements.is_empty());
}

#[test]
fn empty_assignment_is_template_only() {
    let cfg = small_cfg();
    let template = solid(30, 21, RED);
    let out = render(&template, &Assignment::new(2), &cfg).expect("render");
    let expected = stretch_template(&template, cfg.canvas_width, cfg.canvas_height, cfg.filter);
    assert_eq!(out.surface.as_raw(), expected.as_raw());
}

#[test]
fn render_twice_yields_identical_bytes() {
    let cfg = small_cfg();
    let template = solid(300, 210, WHITE);
    let mut assignment = Assignment::new(2);
    assignment.set_photo(0, solid(50, 60, BLUE)).expect("in range");
    let a = render(&template, &assignment, &cfg).expect("render");
    let b = render(&template, &assignment, &cfg).expect("render");
    assert_eq!(a.surface.as_raw(), b.surface.as_raw());
    assert_eq!(a.placements, b.placements);
}

#[test]
fn photo_lands_inside_its_slot() {
    let cfg = small_cfg();
    let template = solid(300, 210, WHITE);
    let mut assignment = Assignment::new(2);
    // 50x60 has the slot's 5:6 aspect, so contain fills slot 0 exactly.
    assignment.set_photo(0, solid(50, 60, BLUE)).expect("in range");
    let out = render(&template, &assignment, &cfg).expect("render");

    assert_eq!(*out.surface.get_pixel(70, 90), Rgba(BLUE), "slot 0 center");
    assert_eq!(*out.surface.get_pixel(5, 5), Rgba(WHITE), "outside all slots");
    assert_eq!(*out.surface.get_pixel(210, 90), Rgba(WHITE), "unassigned slot 1");

    assert_eq!(out.placements.len(), 1);
    let p = &out.placements[0];
    assert_eq!(p.slot, 0);
    assert_eq!(p.source_size, (50, 60));
    assert!((p.fitted.w - 100.0).abs() < 1e-3);
    assert!((p.fitted.h - 120.0).abs() < 1e-3);
}

#[test]
fn degenerate_photo_is_skipped_not_fatal() {
    let cfg = small_cfg();
    let template = solid(300, 210, WHITE);
    let mut assignment = Assignment::new(2);
    assignment.set_photo(0, RgbaImage::new(0, 0)).expect("in range");
    let out = render(&template, &assignment, &cfg).expect("render");
    assert!(out.placements.is_empty());
    let expected = stretch_template(&template, cfg.canvas_width, cfg.canvas_height, cfg.filter);
    assert_eq!(out.surface.as_raw(), expected.as_raw());
}

#[test]
fn assignment_beyond_layout_errors() {
    let cfg = small_cfg();
    let template = solid(300, 210, WHITE);
    let mut assignment = Assignment::new(5);
    assignment.set_photo(4, solid(10, 10, BLUE)).expect("in range");
    let err = render(&template, &assignment, &cfg).expect_err("slot 4 of 2");
    match err {
        SnapstripError::SlotIndex { index, count } => {
            assert_eq!(index, 4);
            assert_eq!(count, 2);
        }
        other => panic!("expected SlotIndex, got {other:?}"),
    }
}

#[test]
fn plan_matches_render_geometry() {
    let cfg = StripConfig::default();
    let sizes = [(900u32, 1200u32), (1800, 600), (640, 640)];

    let planned = plan(&sizes, &cfg).expect("plan");

    let template = solid(15, 10, WHITE);
    let mut assignment = Assignment::new(3);
    for (i, &(w, h)) in sizes.iter().enumerate() {
        assignment.set_photo(i, solid(w, h, BLUE)).expect("in range");
    }
    let rendered = render(&template, &assignment, &cfg).expect("render");

    assert_eq!(planned, rendered.placements);
}

#[test]
fn semi_transparent_photo_blends_over_template() {
    let cfg = StripConfig::builder()
        .with_canvas(100, 100)
        .slot(Rect::new(0.0, 0.0, 100.0, 100.0))
        .build()
        .expect("valid config");
    let template = solid(100, 100, [0, 0, 0, 255]);
    let mut assignment = Assignment::new(1);
    // 50% white over black should land mid-gray.
    assignment
        .set_photo(0, solid(100, 100, [255, 255, 255, 128]))
        .expect("in range");
    let out = render(&template, &assignment, &cfg).expect("render");
    let px = out.surface.get_pixel(50, 50);
    for c in 0..3 {
        assert!(
            (px[c] as i32 - 128).abs() <= 1,
            "channel {c} should be ~128, got {}",
            px[c]
        );
    }
    assert_eq!(px[3], 255, "alpha stays opaque over an opaque template");
}

use std::str::FromStr;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::PngEncoder;
use image::{DynamicImage, ExtendedColorType, ImageEncoder, RgbaImage};
use serde_json::{Value, json};

use crate::config::StripConfig;
use crate::error::{Result, SnapstripError};
use crate::model::Placement;

/// Output encoding for a finished strip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EncodeFormat {
    /// Baseline JPEG at the given quality (1-100). Alpha is dropped.
    Jpeg { quality: u8 },
    /// PNG, alpha preserved.
    Png,
}

impl Default for EncodeFormat {
    fn default() -> Self {
        EncodeFormat::Jpeg { quality: 92 }
    }
}

impl EncodeFormat {
    pub fn mime(&self) -> &'static str {
        match self {
            EncodeFormat::Jpeg { .. } => "image/jpeg",
            EncodeFormat::Png => "image/png",
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            EncodeFormat::Jpeg { .. } => "jpg",
            EncodeFormat::Png => "png",
        }
    }
}

impl FromStr for EncodeFormat {
    type Err = String;
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "jpeg" | "jpg" => Ok(EncodeFormat::default()),
            "png" => Ok(EncodeFormat::Png),
            other => Err(format!("unknown encode format: {other}")),
        }
    }
}

/// Encode `surface` into the requested container. JPEG flattens to RGB
/// first since the container has no alpha channel.
pub fn encode_surface(surface: &RgbaImage, format: EncodeFormat) -> Result<Vec<u8>> {
    let mut out = Vec::new();
    match format {
        EncodeFormat::Jpeg { quality } => {
            let rgb = DynamicImage::ImageRgba8(surface.clone()).to_rgb8();
            let enc = JpegEncoder::new_with_quality(&mut out, quality.clamp(1, 100));
            enc.write_image(&rgb, rgb.width(), rgb.height(), ExtendedColorType::Rgb8)
                .map_err(|e| SnapstripError::Encode(e.to_string()))?;
        }
        EncodeFormat::Png => {
            let enc = PngEncoder::new(&mut out);
            enc.write_image(
                surface,
                surface.width(),
                surface.height(),
                ExtendedColorType::Rgba8,
            )
            .map_err(|e| SnapstripError::Encode(e.to_string()))?;
        }
    }
    Ok(out)
}

/// Wrap already-encoded image bytes as an RFC 2397 data URL, ready to hand
/// to anything expecting a browser-style image source.
pub fn to_data_url(bytes: &[u8], format: EncodeFormat) -> String {
    format!("data:{};base64,{}", format.mime(), STANDARD.encode(bytes))
}

/// Describe a composite as JSON: canvas size plus one entry per placement,
/// camelCase keys. Works for rendered and planned output alike.
pub fn to_json_manifest(placements: &[Placement], cfg: &StripConfig) -> Value {
    let placements_val: Vec<Value> = placements
        .iter()
        .map(|p| {
            json!({
                "slot": p.slot,
                "rect": {"x": p.rect.x, "y": p.rect.y, "w": p.rect.w, "h": p.rect.h},
                "fitted": {"x": p.fitted.x, "y": p.fitted.y, "w": p.fitted.w, "h": p.fitted.h},
                "sourceSize": {"w": p.source_size.0, "h": p.source_size.1},
            })
        })
        .collect();
    json!({
        "canvas": {"w": cfg.canvas_width, "h": cfg.canvas_height},
        "fit": cfg.fit,
        "placements": placements_val,
        "meta": {
            "app": "snapstrip",
            "version": env!("CARGO_PKG_VERSION"),
            "format": "RGBA8888",
            "schemaVersion": "1",
        },
    })
}

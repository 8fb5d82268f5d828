//! Core library for compositing photo-booth strips.
//!
//! - Layout: named slot rectangles on a fixed canvas, contain/cover fitting
//! - Pipeline: `render` takes a template plus per-slot photos and returns the composited surface
//! - Session: `StripSession` tracks one guest's template, photo picks, and resets
//! - Export: JPEG/PNG encoding, data URLs, JSON placement manifests
//!
//! Quick example:
//! ```ignore
//! use snapstrip_core::{StripConfig, StripSession, EncodeFormat, decode_image, encode_surface};
//! # fn main() -> anyhow::Result<()> {
//! let mut session = StripSession::new(StripConfig::default())?;
//! session.set_template(decode_image(&std::fs::read("template.png")?)?);
//! session.assign_photo(0, decode_image(&std::fs::read("guest0.jpg")?)?)?;
//! session.assign_photo(1, decode_image(&std::fs::read("guest1.jpg")?)?)?;
//! session.assign_photo(2, decode_image(&std::fs::read("guest2.jpg")?)?)?;
//! let out = session.render()?;
//! let jpeg = encode_surface(&out.surface, EncodeFormat::default())?;
//! std::fs::write("snapstrip.jpg", jpeg)?;
//! # Ok(()) }
//! ```

pub mod assignment;
pub mod compositing;
pub mod config;
pub mod decode;
pub mod error;
pub mod export;
pub mod fit;
pub mod model;
pub mod queue;
pub mod render;
pub mod session;

pub use assignment::*;
pub use config::*;
pub use decode::*;
pub use error::*;
pub use export::*;
pub use fit::*;
pub use model::*;
pub use queue::*;
pub use render::*;
pub use session::*;

/// Convenience prelude for common types and functions.
/// Importing `snapstrip_core::prelude::*` brings the primary APIs into scope.
pub mod prelude {
    pub use crate::assignment::{Assignment, SelectionTicket};
    pub use crate::config::{ResizeFilter, StripConfig, StripConfigBuilder};
    pub use crate::decode::decode_image;
    pub use crate::error::{Result, SnapstripError};
    pub use crate::export::{EncodeFormat, encode_surface, to_data_url, to_json_manifest};
    pub use crate::fit::{FitPolicy, Fitted, fit};
    pub use crate::model::{Placement, Rect, SlotLayout};
    pub use crate::queue::{MAX_COPIES, PrintJob};
    pub use crate::render::{RenderOutput, plan, render};
    pub use crate::session::StripSession;
}

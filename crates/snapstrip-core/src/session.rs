use image::RgbaImage;
use tracing::info;

use crate::assignment::{Assignment, SelectionTicket};
use crate::config::StripConfig;
use crate::error::{Result, SnapstripError};
use crate::render::{RenderOutput, render};

/// Stateful strip-building session: one template, one photo per slot,
/// renderable at any point along the way. Decoding bytes into bitmaps is the
/// caller's business (see [`decode_image`](crate::decode::decode_image));
/// the session only sequences what a finished decode is allowed to do.
#[derive(Debug, Clone)]
pub struct StripSession {
    cfg: StripConfig,
    template: Option<RgbaImage>,
    assignment: Assignment,
}

impl StripSession {
    pub fn new(cfg: StripConfig) -> Result<Self> {
        cfg.validate()?;
        let assignment = Assignment::new(cfg.slots.slot_count());
        Ok(Self {
            cfg,
            template: None,
            assignment,
        })
    }

    pub fn config(&self) -> &StripConfig {
        &self.cfg
    }

    pub fn assignment(&self) -> &Assignment {
        &self.assignment
    }

    /// Install the template backdrop. Replacing the template keeps existing
    /// photo assignments.
    pub fn set_template(&mut self, template: RgbaImage) {
        info!(
            width = template.width(),
            height = template.height(),
            "template ready"
        );
        self.template = Some(template);
    }

    pub fn template(&self) -> Option<&RgbaImage> {
        self.template.as_ref()
    }

    /// True once a template has been installed and renders can proceed.
    pub fn is_ready(&self) -> bool {
        self.template.is_some()
    }

    /// Claim `slot` for an upcoming photo; see [`Assignment::begin_selection`].
    pub fn begin_selection(&mut self, slot: usize) -> Result<SelectionTicket> {
        self.assignment.begin_selection(slot)
    }

    /// Commit a decoded photo against `ticket`. Returns `false` when the
    /// ticket was superseded and the photo dropped.
    pub fn commit_photo(&mut self, ticket: SelectionTicket, photo: RgbaImage) -> bool {
        self.assignment.commit_photo(ticket, photo)
    }

    /// Put `photo` straight into `slot`, superseding outstanding claims.
    /// Begin-plus-commit in one step for synchronous callers.
    pub fn assign_photo(&mut self, slot: usize, photo: RgbaImage) -> Result<()> {
        self.assignment.set_photo(slot, photo)
    }

    pub fn assigned_count(&self) -> usize {
        self.assignment.assigned_count()
    }

    /// True once every slot holds a photo.
    pub fn is_complete(&self) -> bool {
        self.assignment.assigned_count() == self.cfg.slots.slot_count()
    }

    /// Composite the current state. Errors with `TemplateNotReady` until a
    /// template has been set.
    pub fn render(&self) -> Result<RenderOutput> {
        let template = self
            .template
            .as_ref()
            .ok_or(SnapstripError::TemplateNotReady)?;
        render(template, &self.assignment, &self.cfg)
    }

    /// Drop all photos and invalidate outstanding claims. The template and
    /// configuration survive for the next guest.
    pub fn reset(&mut self) {
        self.assignment.clear();
        info!("session reset");
    }
}

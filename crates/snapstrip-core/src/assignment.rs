use image::RgbaImage;

use crate::error::{Result, SnapstripError};

/// Claim on a slot handed out by [`Assignment::begin_selection`]. A commit
/// is only honored while the claim is still the newest one for its slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectionTicket {
    slot: usize,
    generation: u64,
}

impl SelectionTicket {
    pub fn slot(&self) -> usize {
        self.slot
    }
}

#[derive(Debug, Clone, Default)]
struct SlotState {
    generation: u64,
    photo: Option<RgbaImage>,
}

/// Photo-to-slot assignments for one strip, with claim tracking so a slow
/// decode can never clobber a newer choice for the same slot.
#[derive(Debug, Clone)]
pub struct Assignment {
    slots: Vec<SlotState>,
}

impl Assignment {
    pub fn new(slot_count: usize) -> Self {
        Self {
            slots: (0..slot_count).map(|_| SlotState::default()).collect(),
        }
    }

    pub fn slot_count(&self) -> usize {
        self.slots.len()
    }

    fn state_mut(&mut self, slot: usize) -> Result<&mut SlotState> {
        let count = self.slots.len();
        self.slots
            .get_mut(slot)
            .ok_or(SnapstripError::SlotIndex { index: slot, count })
    }

    /// Claim `slot` for an upcoming photo. Any claim handed out earlier for
    /// the same slot is invalidated.
    pub fn begin_selection(&mut self, slot: usize) -> Result<SelectionTicket> {
        let state = self.state_mut(slot)?;
        state.generation += 1;
        Ok(SelectionTicket {
            slot,
            generation: state.generation,
        })
    }

    /// Store `photo` for the ticketed slot. Returns `false` (dropping the
    /// photo) when a newer claim or a reset has superseded the ticket.
    /// Tickets only come from [`begin_selection`](Self::begin_selection), so
    /// a foreign ticket is treated as stale rather than as an error.
    pub fn commit_photo(&mut self, ticket: SelectionTicket, photo: RgbaImage) -> bool {
        let Some(state) = self.slots.get_mut(ticket.slot) else {
            return false;
        };
        if state.generation != ticket.generation {
            return false;
        }
        state.photo = Some(photo);
        true
    }

    /// Store `photo` in `slot` immediately, superseding outstanding claims.
    pub fn set_photo(&mut self, slot: usize, photo: RgbaImage) -> Result<()> {
        let state = self.state_mut(slot)?;
        state.generation += 1;
        state.photo = Some(photo);
        Ok(())
    }

    pub fn photo(&self, slot: usize) -> Option<&RgbaImage> {
        self.slots.get(slot).and_then(|s| s.photo.as_ref())
    }

    /// Occupied slots in ascending index order.
    pub fn occupied(&self) -> impl Iterator<Item = (usize, &RgbaImage)> {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(i, s)| s.photo.as_ref().map(|p| (i, p)))
    }

    pub fn assigned_count(&self) -> usize {
        self.slots.iter().filter(|s| s.photo.is_some()).count()
    }

    /// Drop all photos and invalidate all outstanding claims.
    pub fn clear(&mut self) {
        for state in &mut self.slots {
            state.generation += 1;
            state.photo = None;
        }
    }
}

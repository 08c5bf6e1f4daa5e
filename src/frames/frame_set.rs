//! FrameSet - the bounded pool of resident pages for one run.
//!
//! A [`FrameSet`] is a fixed-capacity, slot-ordered list of [`PageId`]s.
//! Slot order matters to FIFO, Clock and LFU (they replace in place or
//! append); ARC and LIRS rebuild the whole set from their own lists after
//! every step.

use crate::common::{Error, PageId, Result};

/// The pages currently occupying frames.
///
/// The harness owns the canonical instance. A policy receives `&mut` access
/// for the duration of one step; snapshots handed to history are copies.
///
/// # Capacity
/// Every mutating method refuses to grow past `capacity` and returns
/// [`Error::PolicyInvariant`] instead. A policy that trips this has a bug.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameSet {
    /// Resident pages in slot order.
    slots: Vec<PageId>,

    /// Maximum number of resident pages (immutable after construction).
    capacity: usize,
}

impl FrameSet {
    /// Create an empty frame set with room for `capacity` pages.
    pub fn new(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            capacity,
        }
    }

    // ========================================================================
    // Queries
    // ========================================================================

    /// Maximum number of resident pages.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of resident pages.
    #[inline]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Check if every frame is occupied.
    #[inline]
    pub fn is_full(&self) -> bool {
        self.slots.len() >= self.capacity
    }

    #[inline]
    pub fn contains(&self, page: PageId) -> bool {
        self.slots.contains(&page)
    }

    /// Slot index holding `page`, if resident.
    #[inline]
    pub fn position(&self, page: PageId) -> Option<usize> {
        self.slots.iter().position(|&p| p == page)
    }

    /// Page in slot `slot`.
    #[inline]
    pub fn get(&self, slot: usize) -> Option<PageId> {
        self.slots.get(slot).copied()
    }

    /// Resident pages in slot order.
    #[inline]
    pub fn as_slice(&self) -> &[PageId] {
        &self.slots
    }

    /// Independent copy of the resident pages.
    pub fn snapshot(&self) -> Vec<PageId> {
        self.slots.clone()
    }

    // ========================================================================
    // Mutation
    // ========================================================================

    /// Append a page into the next free slot. Returns the slot index.
    pub fn push(&mut self, page: PageId) -> Result<usize> {
        if self.is_full() {
            return Err(Error::invariant(
                "frame set",
                format!(
                    "cannot load page {} into a full set of {} frames",
                    page, self.capacity
                ),
            ));
        }
        self.slots.push(page);
        Ok(self.slots.len() - 1)
    }

    /// Put `page` into an occupied slot, returning the page it displaced.
    pub fn replace(&mut self, slot: usize, page: PageId) -> Result<PageId> {
        match self.slots.get_mut(slot) {
            Some(occupant) => Ok(std::mem::replace(occupant, page)),
            None => Err(Error::invariant(
                "frame set",
                format!("slot {} is not occupied ({} resident)", slot, self.len()),
            )),
        }
    }

    /// Remove a resident page, closing the gap. Returns its former slot.
    pub fn remove(&mut self, page: PageId) -> Option<usize> {
        let slot = self.position(page)?;
        self.slots.remove(slot);
        Some(slot)
    }

    /// Remove and return the page in the lowest slot.
    pub fn remove_first(&mut self) -> Option<PageId> {
        if self.slots.is_empty() {
            None
        } else {
            Some(self.slots.remove(0))
        }
    }

    /// Replace the whole contents, e.g. from a policy's resident lists.
    pub fn rebuild<I>(&mut self, pages: I) -> Result<()>
    where
        I: IntoIterator<Item = PageId>,
    {
        self.slots.clear();
        for page in pages {
            self.push(page)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pid(id: u32) -> PageId {
        PageId::new(id)
    }

    #[test]
    fn test_frame_set_new() {
        let frames = FrameSet::new(3);
        assert!(frames.is_empty());
        assert!(!frames.is_full());
        assert_eq!(frames.capacity(), 3);
        assert_eq!(frames.len(), 0);
    }

    #[test]
    fn test_push_until_full() {
        let mut frames = FrameSet::new(2);
        assert_eq!(frames.push(pid(1)).unwrap(), 0);
        assert_eq!(frames.push(pid(2)).unwrap(), 1);
        assert!(frames.is_full());

        let err = frames.push(pid(3)).unwrap_err();
        assert!(matches!(err, Error::PolicyInvariant { .. }));
        assert_eq!(frames.as_slice(), &[pid(1), pid(2)]);
    }

    #[test]
    fn test_replace_in_place() {
        let mut frames = FrameSet::new(3);
        frames.rebuild([pid(1), pid(2), pid(3)]).unwrap();

        assert_eq!(frames.replace(1, pid(9)).unwrap(), pid(2));
        assert_eq!(frames.as_slice(), &[pid(1), pid(9), pid(3)]);
        assert!(frames.replace(5, pid(4)).is_err());
    }

    #[test]
    fn test_remove_closes_gap() {
        let mut frames = FrameSet::new(3);
        frames.rebuild([pid(1), pid(2), pid(3)]).unwrap();

        assert_eq!(frames.remove(pid(2)), Some(1));
        assert_eq!(frames.remove(pid(2)), None);
        assert_eq!(frames.as_slice(), &[pid(1), pid(3)]);
        assert_eq!(frames.remove_first(), Some(pid(1)));
        assert_eq!(frames.position(pid(3)), Some(0));
    }

    #[test]
    fn test_rebuild_respects_capacity() {
        let mut frames = FrameSet::new(2);
        assert!(frames.rebuild([pid(1), pid(2), pid(3)]).is_err());
        assert!(frames.len() <= frames.capacity());
    }

    #[test]
    fn test_snapshot_is_independent() {
        let mut frames = FrameSet::new(2);
        frames.push(pid(1)).unwrap();

        let snapshot = frames.snapshot();
        frames.replace(0, pid(5)).unwrap();

        assert_eq!(snapshot, vec![pid(1)]);
        assert_eq!(frames.get(0), Some(pid(5)));
    }
}

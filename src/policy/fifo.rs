//! FIFO (First-In-First-Out) replacement policy.

use std::collections::VecDeque;

use crate::common::{PageId, Result};
use crate::frames::FrameSet;
use crate::policy::{evict_oldest, Policy, PolicyKind};

/// Evicts pages in the order they were loaded.
///
/// Hits do not reorder anything.
#[derive(Debug, Default)]
pub struct FifoPolicy {
    /// Pages in arrival order (front = oldest).
    queue: VecDeque<PageId>,
}

impl FifoPolicy {
    /// Create a new FIFO policy.
    pub fn new() -> Self {
        Self {
            queue: VecDeque::new(),
        }
    }

    /// Track a reference another policy handled on the same frame set.
    ///
    /// A faulting page joins the queue as the newest arrival; pages no
    /// longer resident are dropped.
    pub(crate) fn observe(&mut self, page: PageId, fault: bool, frames: &FrameSet) {
        self.queue.retain(|&p| frames.contains(p));
        if fault && frames.contains(page) && !self.queue.contains(&page) {
            self.queue.push_back(page);
        }
    }
}

impl Policy for FifoPolicy {
    fn kind(&self) -> PolicyKind {
        PolicyKind::Fifo
    }

    fn step(&mut self, page: PageId, frames: &mut FrameSet) -> Result<bool> {
        if frames.contains(page) {
            return Ok(false);
        }

        if frames.is_full() {
            evict_oldest(&mut self.queue, frames)?;
        }
        frames.push(page)?;
        self.queue.push_back(page);
        Ok(true)
    }
}

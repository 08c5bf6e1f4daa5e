//! LRU (Least Recently Used) replacement policy.
//!
//! The legacy "ML" policy name resolves here; it never had behaviour of
//! its own.

use std::collections::VecDeque;

use crate::common::{PageId, Result};
use crate::frames::FrameSet;
use crate::policy::{evict_oldest, Policy, PolicyKind};

/// Evicts the page that has gone longest without a reference.
#[derive(Debug, Default)]
pub struct LruPolicy {
    /// Pages by recency (front = least recent, back = most recent).
    recency: VecDeque<PageId>,
}

impl LruPolicy {
    /// Create a new LRU policy.
    pub fn new() -> Self {
        Self {
            recency: VecDeque::new(),
        }
    }

    fn touch(&mut self, page: PageId) {
        if let Some(pos) = self.recency.iter().position(|&p| p == page) {
            self.recency.remove(pos);
        }
        self.recency.push_back(page);
    }

    /// Track a reference another policy handled on the same frame set.
    pub(crate) fn observe(&mut self, page: PageId, frames: &FrameSet) {
        self.recency.retain(|&p| frames.contains(p));
        if frames.contains(page) {
            self.touch(page);
        }
    }
}

impl Policy for LruPolicy {
    fn kind(&self) -> PolicyKind {
        PolicyKind::Lru
    }

    fn step(&mut self, page: PageId, frames: &mut FrameSet) -> Result<bool> {
        if frames.contains(page) {
            self.touch(page);
            return Ok(false);
        }

        if frames.is_full() {
            evict_oldest(&mut self.recency, frames)?;
        }
        frames.push(page)?;
        self.recency.push_back(page);
        Ok(true)
    }
}
